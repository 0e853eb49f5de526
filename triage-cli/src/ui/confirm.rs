use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};
use triage_core::{PendingSets, format_size, truncate_left};

use super::icons::icon_for;
use super::layout::centered_rect;
use super::theme::Theme;

/// Final confirmation listing everything marked for deletion
pub struct ConfirmView<'a> {
    pending: &'a PendingSets,
    theme: &'a Theme,
}

impl<'a> ConfirmView<'a> {
    pub fn new(pending: &'a PendingSets, theme: &'a Theme) -> Self {
        Self { pending, theme }
    }
}

impl Widget for ConfirmView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.pending.delete.len();
        let skipped = self.pending.deferred.len();

        // header, list, blank, total, skipped, blank, hints
        let wanted = 1 + count.max(1) + 1 + 1 + 1 + 1 + 1;
        let dialog_area = centered_rect(72, wanted as u16 + 4, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Confirmation ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let path_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let dim_style = Style::default().fg(self.theme.fg_dim);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        let bottom = inner.y + inner.height;
        let mut row = inner.y;

        if count == 0 {
            buf.set_string(inner.x, row, "No files selected for deletion.", text_style);
            row += 1;
        } else {
            buf.set_string(
                inner.x,
                row,
                format!("Files to delete ({count}):"),
                text_style,
            );
            row += 1;

            // Leave room for the summary lines and hints below the list
            let room = bottom.saturating_sub(row + 5) as usize;
            let shown = if count > room { room.saturating_sub(1) } else { count };
            let max_w = inner.width.saturating_sub(2) as usize;

            for item in self.pending.delete.iter().take(shown) {
                let size_part = format!("  ({})", format_size(item.size));
                let avail = max_w.saturating_sub(size_part.len() + 3);
                let display_path = truncate_left(&item.path.to_string_lossy(), avail);

                buf.set_string(inner.x + 1, row, icon_for(&item.path, item.kind), text_style);
                buf.set_string(inner.x + 4, row, &display_path, path_style);
                buf.set_string(
                    inner.x + 4 + display_path.chars().count() as u16,
                    row,
                    &size_part,
                    dim_style,
                );
                row += 1;
            }

            if shown < count {
                buf.set_string(
                    inner.x,
                    row,
                    format!("  ...and {} more", count - shown),
                    dim_style,
                );
                row += 1;
            }
        }

        row += 1;

        if count > 0 {
            let total = format!("Total size: {}", format_size(self.pending.delete_bytes));
            buf.set_string(inner.x, row, &total, text_style);
            row += 1;
        }

        if skipped > 0 {
            let text = format!(
                "{} item{} skipped for later review.",
                skipped,
                if skipped == 1 { "" } else { "s" }
            );
            buf.set_string(inner.x, row, &text, dim_style);
        }

        // Action hints at bottom
        let hints_y = bottom.saturating_sub(1);
        let (yes, no) = if count == 0 {
            ("Continue", "Quit")
        } else {
            ("Yes, delete", "Cancel")
        };
        buf.set_string(inner.x, hints_y, "[y]", key_style);
        buf.set_string(inner.x + 4, hints_y, yes, text_style);
        buf.set_string(inner.x + 18, hints_y, "[n]", key_style);
        buf.set_string(inner.x + 22, hints_y, no, text_style);
    }
}
