//! Content panel component
//!
//! Lays a [`Panel`] out on a tall off-screen canvas and shows a scrolled
//! window of it. Thumbnails and project cards are focus and click targets.
//! Each gallery in the panel owns a [`Lightbox`]; dropping the panel on a
//! view change drops them and any listener they still hold.

use crate::action::{Action, GalleryOp};
use crate::component::Component;
use crate::components::image::{render_image, IMAGE_HEIGHT};
use crate::components::lightbox::Lightbox;
use crate::components::markup::{truncate_to_width, wrap_text};
use crate::listeners::{rect_contains, EventListeners};
use crate::model::{Block, ImageRef, Panel, ProjectCard, ProjectId};
use crate::services::resolve_asset;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Horizontal padding on each side of the canvas
const PAD: u16 = 1;

/// Rows taken by one project card
const CARD_HEIGHT: u16 = 4;

/// Narrowest canvas that lays image rows side by side
const IMAGE_ROW_MIN_WIDTH: u16 = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// Targets
// ═══════════════════════════════════════════════════════════════════════════════

/// What a focus or click target refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    Thumbnail { gallery: usize, index: usize },
    Card(ProjectId),
}

/// An interactive box on the canvas, in canvas coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: TargetKind,
    pub rect: Rect,
}

impl Target {
    /// Action emitted when the target is clicked or activated
    pub fn action(&self) -> Action {
        match &self.kind {
            TargetKind::Thumbnail { gallery, index } => Action::Gallery {
                gallery: *gallery,
                op: GalleryOp::Open(*index),
            },
            TargetKind::Card(id) => Action::OpenProject(id.clone()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Canvas
// ═══════════════════════════════════════════════════════════════════════════════

enum Piece<'a> {
    Lines(Vec<Line<'static>>),
    Image(&'a ImageRef),
    ImageRow(&'a [ImageRef]),
    Gallery(usize),
    Card(&'a ProjectCard),
}

struct Placed<'a> {
    y: u16,
    height: u16,
    piece: Piece<'a>,
}

/// A panel laid out at a fixed width
struct Canvas<'a> {
    width: u16,
    /// Prefix for relative image and document references
    asset_base: &'a str,
    height: u16,
    pieces: Vec<Placed<'a>>,
    targets: Vec<Target>,
}

impl<'a> Canvas<'a> {
    fn build(panel: &'a Panel, lightboxes: &[Lightbox], width: u16, asset_base: &'a str) -> Self {
        let mut canvas = Self {
            width,
            asset_base,
            height: 0,
            pieces: Vec::new(),
            targets: Vec::new(),
        };
        let mut gallery = 0;
        canvas.push_blocks(&panel.blocks, lightboxes, &mut gallery);
        canvas
    }

    fn inner_width(&self) -> u16 {
        self.width.saturating_sub(PAD * 2)
    }

    fn push(&mut self, height: u16, piece: Piece<'a>) {
        self.pieces.push(Placed {
            y: self.height,
            height,
            piece,
        });
        self.height += height;
    }

    fn push_lines(&mut self, lines: Vec<Line<'static>>) {
        let added = lines.len() as u16;
        if added == 0 {
            return;
        }
        if let Some(Placed {
            piece: Piece::Lines(existing),
            height,
            ..
        }) = self.pieces.last_mut()
        {
            existing.extend(lines);
            *height += added;
            self.height += added;
            return;
        }
        self.push(added, Piece::Lines(lines));
    }

    fn gap(&mut self) {
        self.push_lines(vec![Line::from("")]);
    }

    fn push_blocks(&mut self, blocks: &'a [Block], lightboxes: &[Lightbox], gallery: &mut usize) {
        let width = self.inner_width() as usize;

        for block in blocks {
            match block {
                Block::Heading { text } => {
                    let style = Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                    self.push_lines(wrap_text(text, style, width, ""));
                    self.gap();
                }
                Block::Lead { text } => {
                    let style = Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::ITALIC);
                    self.push_lines(wrap_text(text, style, width, ""));
                    self.gap();
                }
                Block::Paragraph { text } => {
                    self.push_lines(wrap_text(text, Style::default(), width, ""));
                    self.gap();
                }
                Block::Section { title, blocks } => {
                    self.push_lines(vec![section_header(title, width)]);
                    self.gap();
                    self.push_blocks(blocks, lightboxes, gallery);
                }
                Block::Bullets { items } => {
                    for item in items {
                        self.push_lines(wrap_text(item, Style::default(), width, "• "));
                    }
                    self.gap();
                }
                Block::Numbered { items } => {
                    for (i, item) in items.iter().enumerate() {
                        let marker = format!("{}. ", i + 1);
                        self.push_lines(wrap_text(item, Style::default(), width, &marker));
                    }
                    self.gap();
                }
                Block::Code { label, code } => {
                    if let Some(label) = label {
                        self.push_lines(vec![Line::from(Span::styled(
                            label.clone(),
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::ITALIC),
                        ))]);
                    }
                    let lines = code
                        .lines()
                        .map(|line| {
                            Line::from(vec![
                                Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                                Span::styled(
                                    truncate_to_width(line, width.saturating_sub(2)),
                                    Style::default().fg(Color::Yellow),
                                ),
                            ])
                        })
                        .collect();
                    self.push_lines(lines);
                    self.gap();
                }
                Block::Image(image) => {
                    self.push(IMAGE_HEIGHT, Piece::Image(image));
                    self.gap();
                }
                Block::ImageRow { images } => {
                    if self.width >= IMAGE_ROW_MIN_WIDTH {
                        self.push(IMAGE_HEIGHT, Piece::ImageRow(images));
                    } else {
                        for image in images {
                            self.push(IMAGE_HEIGHT, Piece::Image(image));
                        }
                    }
                    self.gap();
                }
                Block::Gallery { .. } => {
                    let id = *gallery;
                    *gallery += 1;
                    let Some(lightbox) = lightboxes.get(id) else {
                        continue;
                    };
                    let origin = Rect::new(PAD, self.height, self.inner_width(), 0);
                    for (index, rect) in lightbox.thumbnail_rects(origin).into_iter().enumerate() {
                        self.targets.push(Target {
                            kind: TargetKind::Thumbnail { gallery: id, index },
                            rect,
                        });
                    }
                    let height = lightbox.grid_height(origin.width);
                    if height > 0 {
                        self.push(height, Piece::Gallery(id));
                        self.gap();
                    }
                }
                Block::Links { links } => {
                    let lines = links
                        .iter()
                        .map(|link| {
                            let href = resolve_asset(self.asset_base, &link.href);
                            Line::from(vec![
                                Span::styled(
                                    link.label.clone(),
                                    Style::default()
                                        .fg(Color::Cyan)
                                        .add_modifier(Modifier::UNDERLINED),
                                ),
                                Span::styled(" ↗ ", Style::default().fg(Color::Cyan)),
                                Span::styled(
                                    truncate_to_width(
                                        &href,
                                        width.saturating_sub(link.label.width() + 3),
                                    ),
                                    Style::default().fg(Color::DarkGray),
                                ),
                            ])
                        })
                        .collect();
                    self.push_lines(lines);
                    self.gap();
                }
                Block::ProjectCards { cards } => {
                    for card in cards {
                        let rect = Rect::new(PAD, self.height, self.inner_width(), CARD_HEIGHT);
                        self.targets.push(Target {
                            kind: TargetKind::Card(ProjectId::new(card.id.clone())),
                            rect,
                        });
                        self.push(CARD_HEIGHT, Piece::Card(card));
                    }
                    self.gap();
                }
            }
        }
    }

    fn render(&self, buf: &mut Buffer, lightboxes: &[Lightbox], focused: Option<&Target>) {
        let is_focused = |rect: Rect| focused.is_some_and(|t| t.rect == rect);

        for placed in &self.pieces {
            let area = Rect::new(PAD, placed.y, self.inner_width(), placed.height);
            match &placed.piece {
                Piece::Lines(lines) => Paragraph::new(lines.clone()).render(area, buf),
                Piece::Image(image) => render_image(buf, area, image, self.asset_base),
                Piece::ImageRow(images) => {
                    let count = images.len().max(1) as u32;
                    let columns =
                        Layout::horizontal(vec![Constraint::Ratio(1, count); images.len()])
                            .split(area);
                    for (image, rect) in images.iter().zip(columns.iter()) {
                        render_image(buf, *rect, image, self.asset_base);
                    }
                }
                Piece::Gallery(id) => {
                    let Some(lightbox) = lightboxes.get(*id) else {
                        continue;
                    };
                    for target in &self.targets {
                        if let TargetKind::Thumbnail { gallery, index } = target.kind {
                            if gallery == *id {
                                lightbox.render_thumbnail(buf, target.rect, index, is_focused(target.rect));
                            }
                        }
                    }
                }
                Piece::Card(card) => render_card(buf, area, card, is_focused(area)),
            }
        }
    }
}

/// Section title rule: `── Title ──────`
fn section_header(title: &str, width: usize) -> Line<'static> {
    let fill = width.saturating_sub(title.chars().count() + 4);
    Line::from(vec![
        Span::styled("── ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", "─".repeat(fill)), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_card(buf: &mut Buffer, area: Rect, card: &ProjectCard, focused: bool) {
    let inner = area.width.saturating_sub(4) as usize;
    let border = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(&card.title, inner)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(&card.summary, inner)),
            Style::default().fg(Color::Gray),
        )),
    ];

    Paragraph::new(lines)
        .block(
            ratatui::widgets::Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Open ↵ "),
        )
        .render(area, buf);
}

/// Copy the visible window of `canvas` onto the screen buffer
fn blit(canvas: &Buffer, scroll: u16, screen: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        for col in 0..area.width {
            let Some(cell) = canvas.cell((col, scroll.saturating_add(row))) else {
                continue;
            };
            if let Some(out) = screen.cell_mut((area.x + col, area.y + row)) {
                *out = cell.clone();
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Panel View
// ═══════════════════════════════════════════════════════════════════════════════

/// Scrollable view of one content panel
pub struct PanelView {
    panel: Panel,
    asset_base: String,
    listeners: EventListeners,
    lightboxes: Vec<Lightbox>,
    scroll: u16,
    /// Index into the panel's targets
    focus: Option<usize>,
    /// Screen area from the last draw
    viewport: Rect,
}

impl PanelView {
    pub fn new(panel: Panel, asset_base: &str, listeners: EventListeners) -> Self {
        let lightboxes = panel
            .galleries()
            .into_iter()
            .enumerate()
            .map(|(id, items)| Lightbox::new(id, items.to_vec(), asset_base))
            .collect();

        Self {
            panel,
            asset_base: asset_base.to_string(),
            listeners,
            lightboxes,
            scroll: 0,
            focus: None,
            viewport: Rect::new(0, 0, 80, 20),
        }
    }

    fn canvas(&self) -> Canvas<'_> {
        Canvas::build(
            &self.panel,
            &self.lightboxes,
            self.viewport.width.saturating_sub(1),
            &self.asset_base,
        )
    }

    /// Focus and click targets in document order
    pub fn targets(&self) -> Vec<Target> {
        self.canvas().targets
    }

    pub fn focused(&self) -> Option<Target> {
        let index = self.focus?;
        self.targets().into_iter().nth(index)
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn lightboxes(&self) -> &[Lightbox] {
        &self.lightboxes
    }

    pub fn open_lightbox(&self) -> Option<&Lightbox> {
        self.lightboxes.iter().find(|l| l.is_open())
    }

    pub fn open_lightbox_mut(&mut self) -> Option<&mut Lightbox> {
        self.lightboxes.iter_mut().find(|l| l.is_open())
    }

    pub fn has_open_lightbox(&self) -> bool {
        self.lightboxes.iter().any(|l| l.is_open())
    }

    fn max_scroll(&self) -> u16 {
        self.canvas().height.saturating_sub(self.viewport.height)
    }

    fn page(&self) -> i32 {
        self.viewport.height.saturating_sub(2).max(1) as i32
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll = target as u16;
    }

    fn move_focus(&mut self, forward: bool) {
        let targets = self.targets();
        if targets.is_empty() {
            self.focus = None;
            return;
        }
        let len = targets.len();
        let next = match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.focus = Some(next);
        self.reveal(targets[next].rect);
    }

    /// Scroll just enough to bring `rect` into view
    fn reveal(&mut self, rect: Rect) {
        let height = self.viewport.height;
        if rect.y < self.scroll {
            self.scroll = rect.y;
        } else if rect.bottom() > self.scroll + height {
            self.scroll = rect.bottom().saturating_sub(height);
        }
    }
}

impl Component for PanelView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollTop),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Enter if self.focus.is_some() => Some(Action::ActivateFocus),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !rect_contains(self.viewport, mouse.column, mouse.row) {
            return Ok(None);
        }
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::Down(MouseButton::Left) => {
                let x = mouse.column - self.viewport.x;
                let y = mouse.row - self.viewport.y + self.scroll;
                self.targets()
                    .into_iter()
                    .find(|t| rect_contains(t.rect, x, y))
                    .map(|t| t.action())
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollUp => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(self.page()),
            Action::PageUp => self.scroll_by(-self.page()),
            Action::ScrollTop => self.scroll = 0,
            Action::FocusNext => self.move_focus(true),
            Action::FocusPrev => self.move_focus(false),
            Action::ActivateFocus => return Ok(self.focused().map(|t| t.action())),
            Action::Gallery { gallery, op } => match self.lightboxes.get_mut(gallery) {
                Some(lightbox) => lightbox.apply(op, &self.listeners),
                None => tracing::warn!("No gallery #{} in the current panel", gallery),
            },
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.viewport = area;
        let canvas = Canvas::build(
            &self.panel,
            &self.lightboxes,
            area.width.saturating_sub(1),
            &self.asset_base,
        );
        self.scroll = self.scroll.min(canvas.height.saturating_sub(area.height));

        let focused = self.focus.and_then(|i| canvas.targets.get(i));
        let mut buf = Buffer::empty(Rect::new(0, 0, canvas.width, canvas.height));
        canvas.render(&mut buf, &self.lightboxes, focused);
        blit(&buf, self.scroll, frame.buffer_mut(), area);

        // Render scrollbar if content exceeds visible area
        if canvas.height > area.height {
            let mut scrollbar_state =
                ScrollbarState::new(canvas.height.saturating_sub(area.height) as usize)
                    .position(self.scroll as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area,
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}
