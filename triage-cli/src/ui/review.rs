use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};
use triage_core::{HighlightedLine, Item, format_mtime, format_size, truncate_left};

use super::code_preview::CodePreviewView;
use super::icons::icon_for;
use super::theme::Theme;

/// Card for the item under review, with action buttons and position
pub struct ReviewView<'a> {
    item: &'a Item,
    position: (usize, usize),
    code_preview: Option<&'a [HighlightedLine]>,
    theme: &'a Theme,
}

impl<'a> ReviewView<'a> {
    pub fn new(item: &'a Item, position: (usize, usize), theme: &'a Theme) -> Self {
        Self {
            item,
            position,
            code_preview: None,
            theme,
        }
    }

    pub fn with_code_preview(mut self, lines: Option<&'a [HighlightedLine]>) -> Self {
        self.code_preview = lines;
        self
    }

    fn card_lines(&self, width: usize) -> Vec<Line<'a>> {
        let theme = self.theme;
        let item = self.item;
        let label_style = Style::default().fg(theme.fg_muted);
        let value_style = Style::default().fg(theme.fg);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    icon_for(&item.path, item.kind),
                    Style::default().fg(theme.icon_color(item.kind.is_directory())),
                ),
                Span::raw(" "),
                Span::styled(
                    item.kind.label(),
                    Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(
                truncate_left(&item.path.to_string_lossy(), width),
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled("Size: ", label_style),
                Span::styled(format_size(item.size), value_style),
            ]),
            Line::from(vec![
                Span::styled("Modified: ", label_style),
                Span::styled(format_mtime(item.modified), value_style),
            ]),
        ];

        // Code previews get their own box
        if self.code_preview.is_none()
            && let Some(preview) = &item.preview
        {
            lines.push(Line::default());
            lines.push(Line::styled("Preview:", label_style));
            lines.extend(
                preview
                    .lines()
                    .map(|l| Line::styled(l.to_string(), Style::default().fg(theme.fg_dim))),
            );
        }

        lines
    }

    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        let buttons = [
            ("✓ Keep (→/l/y)", self.theme.green),
            ("✗ Delete (←/h/n)", self.theme.red),
            ("↷ Skip (s)", self.theme.fg_dim),
        ];

        let mut x = area.x + 1;
        for (label, color) in buttons {
            let style = Style::default()
                .fg(self.theme.bg)
                .bg(color)
                .add_modifier(Modifier::BOLD);
            let text = format!(" {label} ");
            let width = text.chars().count() as u16;
            if x + width > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, &text, style);
            x += width + 2;
        }
    }
}

impl Widget for ReviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 6 || area.width < 20 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),    // Cards
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Position
            ])
            .split(area);

        let (card_area, code_area) = match self.code_preview {
            Some(_) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(rows[0]);
                (cols[0], Some(cols[1]))
            }
            None => (rows[0], None),
        };

        let card_border = if code_area.is_some() {
            self.theme.teal
        } else {
            self.theme.purple
        };
        let block = Block::default()
            .title(" File Review ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(card_border))
            .padding(Padding::horizontal(1));
        let text_width = block.inner(card_area).width as usize;

        Paragraph::new(self.card_lines(text_width))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(card_area, buf);

        if let (Some(code_area), Some(lines)) = (code_area, self.code_preview) {
            CodePreviewView::new(lines, self.theme).render(code_area, buf);
        }

        self.render_buttons(rows[2], buf);

        let (current, total) = self.position;
        buf.set_string(
            rows[3].x + 1,
            rows[3].y,
            format!("Progress: {current}/{total}"),
            Style::default().fg(self.theme.fg_muted),
        );
    }
}
