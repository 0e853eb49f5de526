use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use log::info;

use super::CatalogProvider;
use super::preview::extract_preview;
use crate::error::{Result, TriageError};
use crate::item::{Item, ItemKind};

/// Catalog configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Leave out entries whose name starts with `.`
    pub skip_hidden: bool,
    /// Report directories with the recursive size of their contents
    pub measure_directories: bool,
    /// Files at or above this size get no preview
    pub preview_max_file_size: u64,
    /// Non-blank lines kept for plain text previews
    pub preview_lines: usize,
    /// Lines kept for code previews (blank lines count)
    pub code_preview_lines: usize,
    /// Hard cap on preview length in bytes
    pub preview_max_bytes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            measure_directories: true,
            preview_max_file_size: 10 * 1024,
            preview_lines: 3,
            code_preview_lines: 15,
            preview_max_bytes: 800,
        }
    }
}

/// Lists the immediate children of a directory on the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsCatalog {
    config: CatalogConfig,
}

impl FsCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn build_item(&self, path: PathBuf, file_type: std::fs::FileType) -> Result<Item> {
        let metadata = std::fs::symlink_metadata(&path)
            .map_err(|e| TriageError::from_io(path.clone(), e))?;

        let kind = if file_type.is_dir() {
            ItemKind::Directory
        } else if file_type.is_symlink() {
            ItemKind::Symlink
        } else {
            ItemKind::File
        };

        let size = if kind.is_directory() && self.config.measure_directories {
            measure_directory(&path)
        } else {
            metadata.len()
        };

        let preview = if kind == ItemKind::File && size < self.config.preview_max_file_size {
            extract_preview(&path, &self.config)
        } else {
            None
        };

        let mut item = Item::new(path, kind, size).with_preview(preview);
        if let Ok(mtime) = metadata.modified() {
            item = item.with_modified(mtime);
        }
        Ok(item)
    }
}

impl CatalogProvider for FsCatalog {
    fn list(&self, root: &Path) -> Result<Vec<Item>> {
        let root_meta =
            std::fs::metadata(root).map_err(|e| TriageError::from_io(root.to_path_buf(), e))?;
        if !root_meta.is_dir() {
            return Err(TriageError::NotADirectory(root.to_path_buf()));
        }

        let walker = WalkDir::new(root)
            .skip_hidden(self.config.skip_hidden)
            .follow_links(false)
            .sort(true)
            .min_depth(1)
            .max_depth(1);

        let mut items = Vec::new();
        for entry_result in walker {
            let entry = entry_result.map_err(walk_error)?;
            items.push(self.build_item(entry.path(), entry.file_type())?);
        }

        info!("catalogued {} entries under {}", items.len(), root.display());
        Ok(items)
    }
}

/// Sum of file sizes below `path`. Unreadable entries count as zero.
pub fn measure_directory(path: &Path) -> u64 {
    WalkDir::new(path)
        .skip_hidden(false)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_type().is_dir())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

fn walk_error(err: jwalk::Error) -> TriageError {
    let path = err.path().map(Path::to_path_buf);
    let message = err.to_string();
    match (path, err.into_io_error()) {
        (Some(path), Some(source)) => TriageError::from_io(path, source),
        _ => TriageError::Walk(message),
    }
}
