use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use triage_core::Screen;

use super::theme::Theme;

/// Keyboard hints for a screen
pub fn hints_for(screen: Screen) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Loading | Screen::Progress => &[("Ctrl+C", "Abort")],
        Screen::Review => &[
            ("→/l/y", "Keep"),
            ("←/h/n", "Delete"),
            ("s", "Skip"),
            ("u", "Undo"),
            ("q", "Quit"),
        ],
        Screen::Confirm => &[("y", "Delete"), ("n", "Cancel"), ("q", "Quit")],
        Screen::Complete => &[("q", "Quit")],
    }
}

/// Footer widget showing keyboard hints
pub struct Footer<'a> {
    screen: Screen,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(screen: Screen, theme: &'a Theme) -> Self {
        Self { screen, theme }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let hints = hints_for(self.screen);

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            // Key
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            // Description
            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.len() as u16;

            // Separator
            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }
    }
}
