use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget},
};
use triage_core::HighlightedLine;

use super::theme::Theme;

/// Bordered box with syntax-highlighted source lines
pub struct CodePreviewView<'a> {
    lines: &'a [HighlightedLine],
    theme: &'a Theme,
}

impl<'a> CodePreviewView<'a> {
    pub fn new(lines: &'a [HighlightedLine], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }
}

impl Widget for CodePreviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Code Preview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.teal))
            .padding(Padding::horizontal(1));

        let text: Vec<Line> = self
            .lines
            .iter()
            .map(|line| {
                Line::from(
                    line.iter()
                        .map(|span| Span::styled(span.text.as_str(), self.theme.token_style(span.kind)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(text).block(block).render(area, buf);
    }
}
