//! Image primitive
//!
//! Terminals cannot show the pictures themselves, so an image is a framed
//! card naming the asset, with its caption and credit underneath.

use crate::components::markup::truncate_to_width;
use crate::model::ImageRef;
use crate::services::resolve_asset;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Rows taken by one image card
pub const IMAGE_HEIGHT: u16 = 5;

/// Caption line: caption, then an italic credit with its link
pub fn caption_line(image: &ImageRef) -> Option<Line<'static>> {
    if image.caption.is_none() && image.credit.is_none() {
        return None;
    }
    let mut spans = Vec::new();
    if let Some(caption) = &image.caption {
        spans.push(Span::styled(
            caption.clone(),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(credit) = &image.credit {
        let credit = match &image.credit_url {
            Some(url) => format!(" — {} ↗ {}", credit, url),
            None => format!(" — {}", credit),
        };
        spans.push(Span::styled(
            credit,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Some(Line::from(spans))
}

/// Draw one image card
pub fn render_image(buf: &mut Buffer, area: Rect, image: &ImageRef, asset_base: &str) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let title = if image.alt.is_empty() {
        image.src.as_str()
    } else {
        image.alt.as_str()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("▣ ", Style::default().fg(Color::Magenta)),
        Span::styled(
            truncate_to_width(&resolve_asset(asset_base, &image.src), inner_width.saturating_sub(2)),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if let Some(caption) = caption_line(image) {
        lines.push(Line::from(""));
        lines.push(caption);
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", truncate_to_width(title, inner_width.saturating_sub(2))))
                .title_style(Style::default().fg(Color::White)),
        )
        .alignment(Alignment::Center);

    paragraph.render(area, buf);
}
