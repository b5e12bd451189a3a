//! Lightbox gallery component
//!
//! A grid of thumbnails; activating one enlarges it in a full-screen overlay
//! with previous / next / close controls. While the overlay is open the
//! gallery holds a document key listener (Esc, ←, →). The listener is
//! attached on open and released on close or when the gallery is dropped.

use crate::action::{Action, GalleryOp};
use crate::components::markup::truncate_to_width;
use crate::listeners::{rect_contains, EventListeners, ListenerGuard};
use crate::model::{GalleryItem, GalleryState};
use crate::services::resolve_asset;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

/// Rows taken by one thumbnail
pub const THUMB_HEIGHT: u16 = 4;

/// Key bindings of an open lightbox
pub fn lightbox_key_action(gallery: usize, key: &KeyEvent) -> Option<Action> {
    let op = match key.code {
        KeyCode::Esc => GalleryOp::Close,
        KeyCode::Right => GalleryOp::Next,
        KeyCode::Left => GalleryOp::Prev,
        _ => return None,
    };
    Some(Action::Gallery { gallery, op })
}

/// Thumbnail columns for a given width, mirroring the responsive grid
pub fn columns_for_width(width: u16) -> usize {
    match width {
        w if w >= 120 => 5,
        w if w >= 90 => 3,
        w if w >= 50 => 2,
        _ => 1,
    }
}

pub struct Lightbox {
    /// Position of this gallery within its panel
    id: usize,
    items: Vec<GalleryItem>,
    state: GalleryState,
    key_listener: Option<ListenerGuard>,
    asset_base: String,
    /// Overlay controls from the last draw
    controls: Vec<(Rect, GalleryOp)>,
}

impl Lightbox {
    pub fn new(id: usize, items: Vec<GalleryItem>, asset_base: impl Into<String>) -> Self {
        let state = GalleryState::new(items.len());
        Self {
            id,
            items,
            state,
            key_listener: None,
            asset_base: asset_base.into(),
            controls: Vec::new(),
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Apply a lightbox operation and attach or release the key listener
    /// to match the new open/closed state
    pub fn apply(&mut self, op: GalleryOp, listeners: &EventListeners) {
        match op {
            GalleryOp::Open(index) => {
                if !self.state.open(index) {
                    tracing::debug!(
                        "Gallery {}: ignoring open({}) with {} item(s)",
                        self.id,
                        index,
                        self.state.len()
                    );
                }
            }
            GalleryOp::Close => self.state.close(),
            GalleryOp::Next => self.state.next(),
            GalleryOp::Prev => self.state.prev(),
        }
        self.sync_listener(listeners);
    }

    fn sync_listener(&mut self, listeners: &EventListeners) {
        match (self.state.is_open(), self.key_listener.is_some()) {
            (true, false) => {
                let gallery = self.id;
                self.key_listener =
                    Some(listeners.on_key_down(move |key| lightbox_key_action(gallery, key)));
            }
            (false, true) => {
                if let Some(guard) = self.key_listener.take() {
                    tracing::debug!("Gallery {} closed, releasing {:?} listener", self.id, guard.kind());
                }
                self.controls.clear();
            }
            _ => {}
        }
    }

    /// Height of the thumbnail grid at the given width
    pub fn grid_height(&self, width: u16) -> u16 {
        if self.state.is_empty() {
            return 0;
        }
        let columns = columns_for_width(width);
        let rows = self.items.len().div_ceil(columns);
        rows as u16 * THUMB_HEIGHT
    }

    /// Thumbnail rectangles for a grid whose top-left corner is `area`
    pub fn thumbnail_rects(&self, area: Rect) -> Vec<Rect> {
        let columns = columns_for_width(area.width);
        let cell_width = area.width / columns as u16;
        (0..self.items.len())
            .map(|i| {
                let row = (i / columns) as u16;
                let col = (i % columns) as u16;
                Rect::new(
                    area.x + col * cell_width,
                    area.y + row * THUMB_HEIGHT,
                    cell_width,
                    THUMB_HEIGHT,
                )
            })
            .collect()
    }

    /// Draw one thumbnail
    pub fn render_thumbnail(&self, buf: &mut Buffer, rect: Rect, index: usize, focused: bool) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let inner = rect.width.saturating_sub(2) as usize;
        let border = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = vec![
            Line::from(Span::styled(
                truncate_to_width(&item.thumbnail_label(index), inner),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                truncate_to_width(&format!("▣ {}", item.src), inner),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", index + 1)),
        );
        paragraph.render(rect, buf);
    }

    /// Draw the enlarged item over the whole screen
    pub fn draw_modal(&mut self, frame: &mut Frame, area: Rect) {
        let Some(index) = self.state.open_index() else {
            return;
        };
        let Some(item) = self.items.get(index) else {
            return;
        };

        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Black)),
            area,
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(10),
                Constraint::Length(5),
            ])
            .split(rows[1]);

        let control_style = Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);

        let close_rect = Rect::new(area.x + area.width.saturating_sub(5), area.y, 3, 1);
        let prev_rect = Rect::new(columns[0].x + 1, columns[0].y + columns[0].height / 2, 3, 1);
        let next_rect = Rect::new(columns[2].x + 1, columns[2].y + columns[2].height / 2, 3, 1);

        frame.render_widget(Paragraph::new(Span::styled(" ✕ ", control_style)), close_rect);
        frame.render_widget(Paragraph::new(Span::styled(" ‹ ", control_style)), prev_rect);
        frame.render_widget(Paragraph::new(Span::styled(" › ", control_style)), next_rect);
        self.controls = vec![
            (close_rect, GalleryOp::Close),
            (prev_rect, GalleryOp::Prev),
            (next_rect, GalleryOp::Next),
        ];

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("▣ ", Style::default().fg(Color::Magenta)),
                Span::styled(
                    resolve_asset(&self.asset_base, &item.src),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
        ];
        if !item.caption.is_empty() {
            lines.push(Line::from(Span::styled(
                item.caption.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} / {}", index + 1, self.state.len()),
            Style::default().fg(Color::DarkGray),
        )));

        let figure = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", item.alt_text()))
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(figure, columns[1]);

        let hints = Line::from(vec![
            Span::styled(" ← ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Previous  "),
            Span::styled(" → ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Next  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("Close"),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), rows[2]);
    }

    /// Hit-test a click against the overlay controls
    pub fn handle_modal_click(&self, column: u16, row: u16) -> Option<Action> {
        self.controls
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, op)| Action::Gallery {
                gallery: self.id,
                op: *op,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerKind;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n)
            .map(|i| GalleryItem {
                src: format!("v{}.png", i + 1),
                alt: String::new(),
                caption: format!("Chart {}", i + 1),
            })
            .collect()
    }

    fn press(listeners: &EventListeners, lightbox: &mut Lightbox, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        for action in listeners.dispatch_key(&key) {
            if let Action::Gallery { gallery, op } = action {
                assert_eq!(gallery, 0);
                lightbox.apply(op, listeners);
            }
        }
    }

    #[test]
    fn test_listener_attached_only_while_open() {
        let listeners = EventListeners::new();
        let mut lightbox = Lightbox::new(0, items(3), "public/");
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);

        lightbox.apply(GalleryOp::Open(1), &listeners);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 1);

        // Stepping keeps exactly one listener
        lightbox.apply(GalleryOp::Next, &listeners);
        lightbox.apply(GalleryOp::Open(0), &listeners);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 1);

        lightbox.apply(GalleryOp::Close, &listeners);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);
    }

    #[test]
    fn test_repeated_open_close_cycles_leave_no_listener() {
        let listeners = EventListeners::new();
        let mut lightbox = Lightbox::new(0, items(2), "public/");
        for _ in 0..10 {
            lightbox.apply(GalleryOp::Open(0), &listeners);
            lightbox.apply(GalleryOp::Close, &listeners);
        }
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);
    }

    #[test]
    fn test_dropping_open_gallery_releases_listener() {
        let listeners = EventListeners::new();
        let mut lightbox = Lightbox::new(0, items(2), "public/");
        lightbox.apply(GalleryOp::Open(1), &listeners);
        drop(lightbox);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);
    }

    #[test]
    fn test_keyboard_scenario_with_wraparound() {
        let listeners = EventListeners::new();
        let mut lightbox = Lightbox::new(0, items(3), "public/");
        lightbox.apply(GalleryOp::Open(0), &listeners);

        press(&listeners, &mut lightbox, KeyCode::Right);
        press(&listeners, &mut lightbox, KeyCode::Right);
        assert_eq!(lightbox.state().open_index(), Some(2));

        press(&listeners, &mut lightbox, KeyCode::Right);
        assert_eq!(lightbox.state().open_index(), Some(0));

        press(&listeners, &mut lightbox, KeyCode::Left);
        assert_eq!(lightbox.state().open_index(), Some(2));

        press(&listeners, &mut lightbox, KeyCode::Esc);
        assert!(!lightbox.is_open());
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);

        // Keys after closing reach nothing
        press(&listeners, &mut lightbox, KeyCode::Right);
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_out_of_range_open_attaches_nothing() {
        let listeners = EventListeners::new();
        let mut lightbox = Lightbox::new(0, Vec::new(), "public/");
        lightbox.apply(GalleryOp::Open(0), &listeners);
        assert!(!lightbox.is_open());
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);
        assert_eq!(lightbox.grid_height(100), 0);
    }

    #[test]
    fn test_grid_geometry() {
        let lightbox = Lightbox::new(0, items(10), "public/");
        assert_eq!(columns_for_width(130), 5);
        assert_eq!(columns_for_width(40), 1);
        assert_eq!(lightbox.grid_height(130), 2 * THUMB_HEIGHT);

        let rects = lightbox.thumbnail_rects(Rect::new(0, 10, 130, 0));
        assert_eq!(rects.len(), 10);
        assert_eq!(rects[0], Rect::new(0, 10, 26, THUMB_HEIGHT));
        assert_eq!(rects[6], Rect::new(26, 10 + THUMB_HEIGHT, 26, THUMB_HEIGHT));
    }

    #[test]
    fn test_modal_renders_caption_and_position() {
        let listeners = EventListeners::new();
        let mut lightbox = Lightbox::new(2, items(3), "public/");
        lightbox.apply(GalleryOp::Open(1), &listeners);

        let backend = TestBackend::new(60, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| lightbox.draw_modal(f, f.area())).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Chart 2"));
        assert!(content.contains("2 / 3"));
        assert!(content.contains("public/v2.png"));

        // Close control sits in the top-right corner
        assert_eq!(
            lightbox.handle_modal_click(56, 0),
            Some(Action::Gallery {
                gallery: 2,
                op: GalleryOp::Close
            })
        );
        assert_eq!(lightbox.handle_modal_click(30, 0), None);
    }
}
