use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};
use triage_core::{DeletionProgress, SPINNER_FRAMES, format_size};

use super::bar::fill_bar;
use super::theme::Theme;

/// Braille spinner characters
const SPINNER: [char; SPINNER_FRAMES] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_char(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}

/// Spinner shown while the catalog is listed
pub struct LoadingView<'a> {
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> LoadingView<'a> {
    pub fn new(spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            spinner_frame,
            theme,
        }
    }
}

impl Widget for LoadingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 20 {
            return;
        }

        let spinner_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(
            area.x + 2,
            area.y + 1,
            spinner_char(self.spinner_frame).to_string(),
            spinner_style,
        );
        buf.set_string(
            area.x + 4,
            area.y + 1,
            "Loading files...",
            Style::default().fg(self.theme.fg),
        );
    }
}

/// Progress widget shown while deleting
pub struct ProgressView<'a> {
    progress: &'a DeletionProgress,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(progress: &'a DeletionProgress, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            progress,
            spinner_frame,
            theme,
        }
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Draw border
        let block = Block::default()
            .title(" Progress ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        let spinner_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(
            inner.x,
            inner.y,
            spinner_char(self.spinner_frame).to_string(),
            spinner_style,
        );

        let status_text = format!(
            " Deleting files... {}/{}",
            self.progress.processed, self.progress.total
        );
        buf.set_string(inner.x + 2, inner.y, &status_text, Style::default().fg(self.theme.fg));

        // Bar
        let bar = fill_bar(self.progress.percentage(), inner.width as usize);
        buf.set_string(inner.x, inner.y + 1, &bar, Style::default().fg(self.theme.green));

        // Stats line
        let mut stats = format!("{} freed", format_size(self.progress.bytes_freed));
        if self.progress.failed > 0 {
            stats.push_str(&format!("  {} failed", self.progress.failed));
        }
        let stats_style = if self.progress.failed > 0 {
            Style::default().fg(self.theme.red)
        } else {
            Style::default().fg(self.theme.fg_muted)
        };
        buf.set_string(inner.x, inner.y + 2, &stats, stats_style);
    }
}
