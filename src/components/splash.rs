//! Splash screen component
//!
//! Shows the owner's monogram briefly before the portfolio opens.

use crate::action::Action;
use crate::component::Component;
use crate::model::content::Owner;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Width of the monogram tile
const TILE_WIDTH: u16 = 17;
/// Height of the monogram tile
const TILE_HEIGHT: u16 = 7;

/// Splash screen component
pub struct SplashComponent {
    initials: String,
    name: String,
    tagline: String,
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
}

impl SplashComponent {
    pub fn new(owner: &Owner) -> Self {
        Self {
            initials: owner.initials.clone(),
            name: owner.name.clone(),
            tagline: owner.tagline.clone(),
            start_time: None,
            duration: Duration::from_millis(1500),
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    /// Initials spread out for the tile: `AK` -> `A K`
    fn monogram(&self) -> String {
        self.initials
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // Use true black RGB for consistent appearance across terminal themes
        let bg_black = Color::Rgb(0, 0, 0);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(bg_black)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(area.height.saturating_sub(TILE_HEIGHT + 4) / 2),
                Constraint::Length(TILE_HEIGHT),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let tile_x = area.x + area.width.saturating_sub(TILE_WIDTH) / 2;
        let tile = Rect::new(tile_x, chunks[1].y, TILE_WIDTH.min(area.width), chunks[1].height);
        let monogram = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                self.monogram(),
                Style::default()
                    .fg(Color::Cyan)
                    .bg(bg_black)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Cyan).bg(bg_black))
                .style(Style::default().bg(bg_black)),
        );
        frame.render_widget(monogram, tile);

        let title = Paragraph::new(Line::from(Span::styled(
            self.name.clone(),
            Style::default()
                .fg(Color::White)
                .bg(bg_black)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[3]);

        let subtitle = Paragraph::new(Line::from(Span::styled(
            self.tagline.clone(),
            Style::default().fg(Color::DarkGray).bg(bg_black),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[4]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn owner() -> Owner {
        Owner {
            name: "Ayush Khadka".to_string(),
            initials: "AK".to_string(),
            tagline: "CS and Math @ CU Boulder".to_string(),
        }
    }

    #[test]
    fn test_not_complete_before_init() {
        let splash = SplashComponent::new(&owner());
        assert!(!splash.is_complete());
    }

    #[test]
    fn test_any_key_skips() {
        let mut splash = SplashComponent::new(&owner());
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            splash.handle_key_event(key).unwrap(),
            Some(Action::SplashComplete)
        );
    }

    #[test]
    fn test_renders_monogram_and_name() {
        let mut splash = SplashComponent::new(&owner());
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| splash.draw(f, f.area()).unwrap()).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("A K"));
        assert!(content.contains("Ayush Khadka"));
        assert!(content.contains("CS and Math @ CU Boulder"));
    }
}
