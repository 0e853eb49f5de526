use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};
use triage_core::{DeletionReport, format_size, truncate_left};

use super::theme::Theme;

const MAX_FAILURES_SHOWN: usize = 5;

/// Summary shown after the run
pub struct CompleteView<'a> {
    report: &'a DeletionReport,
    deferred: usize,
    nothing_to_review: bool,
    theme: &'a Theme,
}

impl<'a> CompleteView<'a> {
    pub fn new(report: &'a DeletionReport, theme: &'a Theme) -> Self {
        Self {
            report,
            deferred: 0,
            nothing_to_review: false,
            theme,
        }
    }

    pub fn deferred(mut self, count: usize) -> Self {
        self.deferred = count;
        self
    }

    pub fn nothing_to_review(mut self, empty: bool) -> Self {
        self.nothing_to_review = empty;
        self
    }
}

impl Widget for CompleteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.report.failed > 0 {
            self.theme.yellow
        } else {
            self.theme.green
        };
        let block = Block::default()
            .title(" Complete ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .padding(Padding::uniform(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let good_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);
        let bad_style = Style::default().fg(self.theme.red);
        let dim_style = Style::default().fg(self.theme.fg_dim);

        let bottom = inner.y + inner.height;
        let mut row = inner.y;

        if self.nothing_to_review {
            buf.set_string(inner.x, row, "Nothing to review in this directory.", text_style);
        } else {
            let summary = format!(
                "{} deleted, {} failed",
                self.report.succeeded, self.report.failed
            );
            buf.set_string(inner.x, row, &summary, good_style);
            row += 1;

            let freed = format!("Space freed: {}", format_size(self.report.bytes_freed));
            buf.set_string(inner.x, row, &freed, text_style);
            row += 1;

            if self.deferred > 0 {
                let text = format!(
                    "{} item{} skipped for later review.",
                    self.deferred,
                    if self.deferred == 1 { " was" } else { "s were" }
                );
                buf.set_string(inner.x, row, &text, dim_style);
                row += 1;
            }

            if self.report.skipped > 0 {
                let text = format!("{} not attempted (cancelled).", self.report.skipped);
                buf.set_string(inner.x, row, &text, dim_style);
                row += 1;
            }

            if !self.report.failures.is_empty() {
                row += 1;
                buf.set_string(inner.x, row, "Failed:", bad_style);
                row += 1;

                let max_w = inner.width.saturating_sub(2) as usize;
                for (path, error) in self.report.failures.iter().take(MAX_FAILURES_SHOWN) {
                    if row + 2 >= bottom {
                        break;
                    }
                    let line = format!("{}: {}", path.display(), error);
                    buf.set_string(inner.x + 1, row, truncate_left(&line, max_w), dim_style);
                    row += 1;
                }
                if self.report.failures.len() > MAX_FAILURES_SHOWN && row + 2 < bottom {
                    let more = format!(
                        "  ...and {} more",
                        self.report.failures.len() - MAX_FAILURES_SHOWN
                    );
                    buf.set_string(inner.x, row, &more, dim_style);
                }
            }
        }

        let hint_y = bottom.saturating_sub(1);
        buf.set_string(inner.x, hint_y, "Press q to quit", dim_style);
    }
}
