//! Help dialog component
//!
//! Lists the keyboard and mouse controls of the portfolio.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all controls
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Controls ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    };

    let add_key = |lines: &mut Vec<Line<'static>>, key: &str, desc: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("    {:<16}", key),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Pages");
    add_key(&mut lines, "a / 1", "About me");
    add_key(&mut lines, "p / 2", "Projects (toggles the project menu)");
    add_key(&mut lines, "r / 3", "Resume");
    add_key(&mut lines, "click name", "Back to About me");

    add_section(&mut lines, "Project Menu");
    add_key(&mut lines, "j / k / ↓ / ↑", "Highlight a project");
    add_key(&mut lines, "Enter", "Open the highlighted project");
    add_key(&mut lines, "Esc / click away", "Close the menu");

    add_section(&mut lines, "Inside a Project");
    add_key(&mut lines, "] / →", "Next method tab");
    add_key(&mut lines, "[ / ←", "Previous method tab");
    add_key(&mut lines, "Backspace", "Back to the project list");

    add_section(&mut lines, "Reading");
    add_key(&mut lines, "j / k / ↓ / ↑", "Scroll one line");
    add_key(&mut lines, "PgDn / PgUp", "Scroll one page");
    add_key(&mut lines, "g", "Back to the top");
    add_key(&mut lines, "mouse wheel", "Scroll");
    add_key(&mut lines, "Tab / Shift-Tab", "Focus next / previous image or card");
    add_key(&mut lines, "Enter / click", "Enlarge image or open project");

    add_section(&mut lines, "Enlarged Image");
    add_key(&mut lines, "→ / ›", "Next image");
    add_key(&mut lines, "← / ‹", "Previous image");
    add_key(&mut lines, "Esc / ✕", "Close");

    add_section(&mut lines, "General");
    add_key(&mut lines, "?", "This help");
    add_key(&mut lines, "q", "Quit (asks first)");
    add_key(&mut lines, "Ctrl-C", "Quit immediately");

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_help_mentions_lightbox_keys() {
        let text: String = build_help_content()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Enlarged Image"));
        assert!(text.contains("Backspace"));
    }

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::default();
        for code in [KeyCode::Esc, KeyCode::Char('?'), KeyCode::Char('q')] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(
                dialog.handle_key_event(key).unwrap(),
                Some(Action::CloseModal)
            );
        }
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(down).unwrap(), None);
        assert_eq!(dialog.scroll_offset, 1);
    }
}
