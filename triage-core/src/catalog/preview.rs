use std::path::Path;

use super::walker::CatalogConfig;

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "go", "js", "ts", "py", "java", "c", "cpp", "h", "css", "html", "xml", "json",
    "yaml", "yml", "toml", "ini", "sh", "bat", "ps1", "sql", "r", "php", "rb", "scala", "kt",
    "csv", "log", "cfg", "conf",
];

const CODE_EXTENSIONS: &[&str] = &[
    "go", "js", "ts", "py", "java", "c", "cpp", "h", "hpp", "rs", "php", "rb", "swift", "kt",
    "scala", "jsx", "tsx", "vue", "css", "scss", "sass", "html", "xml", "json", "yaml", "yml",
    "toml", "sh", "bash", "zsh", "fish", "bat", "ps1", "sql", "r", "m", "cs", "vb", "pl", "lua",
];

const CODE_FILE_NAMES: &[&str] = &["dockerfile", "makefile"];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Source code or structured config, previewed verbatim with highlighting
pub fn is_code_file(path: &Path) -> bool {
    if let Some(ext) = extension(path)
        && CODE_EXTENSIONS.contains(&ext.as_str())
    {
        return true;
    }

    path.file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|n| CODE_FILE_NAMES.contains(&n.as_str()))
}

/// Anything worth reading as text (code files included)
pub fn is_text_file(path: &Path) -> bool {
    extension(path).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str())) || is_code_file(path)
}

/// Read a short preview of `path`. `None` when the file is not text, is
/// empty, or cannot be read.
pub(crate) fn extract_preview(path: &Path, config: &CatalogConfig) -> Option<String> {
    if !is_text_file(path) {
        return None;
    }

    let bytes = std::fs::read(path).ok()?;
    let text = String::from_utf8_lossy(&bytes);
    let code = is_code_file(path);

    let lines: Vec<&str> = if code {
        text.lines().take(config.code_preview_lines).collect()
    } else {
        text.lines()
            .filter(|l| !l.trim().is_empty())
            .take(config.preview_lines)
            .collect()
    };

    if lines.is_empty() {
        return None;
    }

    Some(cap_bytes(lines.join("\n"), config.preview_max_bytes))
}

/// Cut `text` to at most `max` bytes, ending in `...` when shortened
fn cap_bytes(mut text: String, max: usize) -> String {
    if text.len() <= max {
        return text;
    }

    let mut end = max.saturating_sub(3);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    text.push_str("...");
    text
}
