use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use triage_core::{Screen, format_count, format_size, truncate_left};

use crate::app::AppState;

use super::progress::spinner_char;
use super::theme::Theme;

/// Header widget showing title, root path, and screen status
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn status(&self) -> String {
        let controller = self.state.controller();
        match controller.screen() {
            Screen::Loading => format!("{} loading", spinner_char(controller.spinner_frame())),
            Screen::Review => {
                let (current, total) = controller.session().position();
                format!("{}/{}", format_count(current as u64), format_count(total as u64))
            }
            Screen::Confirm => controller
                .pending()
                .map(|p| format!("{} to delete, {}", p.delete.len(), format_size(p.delete_bytes)))
                .unwrap_or_default(),
            Screen::Progress => {
                let progress = controller.progress();
                format!(
                    "{} {}/{}",
                    spinner_char(controller.spinner_frame()),
                    progress.processed,
                    progress.total
                )
            }
            Screen::Complete => "done".to_string(),
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        // Title
        let title = "TRIAGE";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);

        // Separator
        buf.set_string(
            area.x + 8,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        // Status (right-aligned)
        let status = self.status();
        let status_width = status.chars().count() as u16;
        let status_x = (area.x + area.width).saturating_sub(status_width + 2);
        let status_style = match self.state.screen() {
            Screen::Loading | Screen::Progress => Style::default().fg(self.theme.yellow),
            _ => Style::default().fg(self.theme.fg_dim),
        };

        // Root path, trimmed from the left so the tail stays visible
        let path = self.state.root_path.to_string_lossy();
        let max_path_len = status_x.saturating_sub(area.x + 12) as usize;
        let display_path = truncate_left(&path, max_path_len);
        buf.set_string(
            area.x + 10,
            area.y,
            &display_path,
            Style::default().fg(self.theme.fg),
        );

        buf.set_string(status_x, area.y, &status, status_style);
    }
}
