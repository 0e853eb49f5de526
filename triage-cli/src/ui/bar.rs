/// Eighth-block glyphs, empty to full
const EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Horizontal fill bar exactly `width` cells wide
pub fn fill_bar(percentage: f64, width: usize) -> String {
    let eighths = ((percentage.clamp(0.0, 100.0) / 100.0) * (width * 8) as f64).round() as usize;
    let full = eighths / 8;
    let partial = eighths % 8;

    let mut bar: String = std::iter::repeat_n(EIGHTHS[8], full).collect();
    if full < width {
        bar.push(EIGHTHS[partial]);
        bar.extend(std::iter::repeat_n(' ', width - full - 1));
    }
    bar
}
