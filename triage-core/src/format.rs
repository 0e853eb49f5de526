use std::time::SystemTime;

use chrono::{DateTime, Local};

const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Format bytes into human-readable string (binary units)
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT && exp < UNITS.len() - 1 {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}", bytes as f64 / div as f64, UNITS[exp])
}

/// Format a number with thousand separators (e.g., 1,234,567)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Format a modification time as local `YYYY-MM-DD HH:MM`
pub fn format_mtime(mtime: Option<SystemTime>) -> String {
    match mtime {
        Some(t) => DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

/// Keep the tail of `text` so it fits in `max` columns, prefixing `...`
pub fn truncate_left(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    if max <= 3 {
        return ".".repeat(max);
    }
    let tail: String = text.chars().skip(count - (max - 3)).collect();
    format!("...{}", tail)
}
