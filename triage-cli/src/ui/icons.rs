use std::path::Path;

use triage_core::ItemKind;

/// Emoji shown next to an entry, picked by kind and extension
pub fn icon_for(path: &Path, kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Directory => return "📁",
        ItemKind::Symlink => return "🔗",
        ItemKind::File => {}
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        // Code
        "go" => "🐹",
        "js" => "🟨",
        "ts" => "🔷",
        "py" => "🐍",
        "java" => "☕",
        "c" | "cpp" => "🔧",
        "rs" => "🦀",
        "php" => "🐘",
        "rb" => "💎",
        "swift" => "🍎",
        "kt" => "🟣",
        "scala" => "🔴",

        // Web
        "html" => "🌐",
        "css" | "scss" | "sass" | "svg" => "🎨",
        "jsx" | "tsx" => "⚛️",
        "vue" => "💚",

        // Data and config
        "h" | "json" | "xml" | "yaml" | "yml" | "toml" | "log" => "📋",
        "ini" | "cfg" | "conf" => "⚙️",

        // Documents
        "md" => "📝",
        "txt" => "📄",
        "pdf" => "📕",
        "doc" | "docx" => "📘",
        "xls" | "xlsx" => "📗",
        "ppt" | "pptx" => "📙",

        // Media
        "jpg" | "jpeg" | "png" | "gif" | "ico" | "webp" | "bmp" => "🖼️",
        "mp3" | "wav" | "flac" | "m4a" | "ogg" => "🎵",
        "mp4" | "avi" | "mkv" | "mov" | "wmv" | "flv" | "webm" => "🎬",

        // Archives and packages
        "zip" | "tar" | "gz" | "rar" | "7z" | "bz2" | "xz" | "deb" | "rpm" => "📦",
        "exe" => "⚡",
        "app" => "📱",
        "dmg" | "iso" => "💿",

        // Leftovers
        "tmp" | "cache" => "🗑️",
        "bak" | "old" => "💾",

        // Shell
        "sh" | "bash" | "zsh" | "fish" => "🐚",
        "bat" => "🖥️",
        "ps1" => "🔷",

        // Database
        "db" | "sqlite" | "sql" => "🗄️",

        _ => "📄",
    }
}
