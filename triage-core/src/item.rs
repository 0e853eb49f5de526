use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Directory,
    File,
    Symlink,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Directory => "DIR",
            ItemKind::File => "FILE",
            ItemKind::Symlink => "LINK",
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, ItemKind::Directory)
    }
}

/// Final verdict the user recorded for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    #[default]
    Undecided,
    Keep,
    Delete,
}

/// What the user can choose for the current item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Keep,
    Delete,
}

impl From<Outcome> for Decision {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Keep => Decision::Keep,
            Outcome::Delete => Decision::Delete,
        }
    }
}

/// Combined view of decision and deferred flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Undecided,
    Kept,
    Deleted,
    Deferred,
}

/// One filesystem entry under review
#[derive(Debug, Clone)]
pub struct Item {
    /// Path as listed by the catalog (unique within a session)
    pub path: PathBuf,
    pub name: String,
    pub kind: ItemKind,
    /// Bytes; recursive total for directories when measured
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Bounded text preview, extracted once at catalog time
    pub preview: Option<String>,
    pub(crate) decision: Decision,
    pub(crate) deferred: bool,
}

impl Item {
    pub fn new(path: PathBuf, kind: ItemKind, size: u64) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            path,
            name,
            kind,
            size,
            modified: None,
            preview: None,
            decision: Decision::Undecided,
            deferred: false,
        }
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_preview(mut self, preview: Option<String>) -> Self {
        self.preview = preview;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    pub fn status(&self) -> ItemStatus {
        match (self.decision, self.deferred) {
            (Decision::Keep, _) => ItemStatus::Kept,
            (Decision::Delete, _) => ItemStatus::Deleted,
            (Decision::Undecided, true) => ItemStatus::Deferred,
            (Decision::Undecided, false) => ItemStatus::Undecided,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.decision = Decision::Undecided;
        self.deferred = false;
    }
}
