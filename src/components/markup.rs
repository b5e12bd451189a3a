//! Inline markup and text wrapping for panel prose
//!
//! Prose supports `**bold**`, `*emphasis*` and `` `code` ``. Wrapping is done
//! here rather than by the Paragraph widget so panel heights are known before
//! anything is drawn.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Matches bold, emphasis and inline code
static INLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(?P<bold>.+?)\*\*|\*(?P<em>[^*\s][^*]*?)\*|`(?P<code>[^`]+)`").unwrap()
});

/// Split `text` into styled spans
pub fn parse_inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_REGEX.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::styled(text[last..whole.start()].to_string(), base));
        }
        if let Some(bold) = caps.name("bold") {
            spans.push(Span::styled(
                bold.as_str().to_string(),
                base.add_modifier(Modifier::BOLD),
            ));
        } else if let Some(em) = caps.name("em") {
            spans.push(Span::styled(
                em.as_str().to_string(),
                base.add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(code) = caps.name("code") {
            spans.push(Span::styled(
                code.as_str().to_string(),
                base.fg(Color::Yellow),
            ));
        }
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base));
    }
    spans
}

/// Word-wrap styled spans to `width` display columns
pub fn wrap_spans(spans: &[Span<'static>], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        for word in span.content.split_inclusive(' ') {
            let visible = word.trim_end_matches(' ').width();
            if current_width > 0 && current_width + visible > width {
                lines.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
            }

            // Words wider than a whole line are hard-broken
            let mut rest = word;
            while rest.trim_end_matches(' ').width() > width - current_width {
                let (head, tail) = split_at_width(rest, width - current_width);
                if head.is_empty() {
                    break;
                }
                current.push(Span::styled(head.to_string(), span.style));
                lines.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
                rest = tail;
            }

            if !rest.is_empty() {
                current.push(Span::styled(rest.to_string(), span.style));
                current_width += rest.width();
            }
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Parse and wrap one paragraph, prefixing the first line with `marker` and
/// indenting continuation lines to match
pub fn wrap_text(text: &str, base: Style, width: usize, marker: &str) -> Vec<Line<'static>> {
    let indent = marker.width();
    let mut lines = wrap_spans(&parse_inline(text, base), width.saturating_sub(indent));
    for (i, line) in lines.iter_mut().enumerate() {
        let prefix = if i == 0 {
            marker.to_string()
        } else {
            " ".repeat(indent)
        };
        line.spans.insert(0, Span::styled(prefix, base));
    }
    lines
}

/// Shorten `text` to at most `max` columns, ending in `…` when cut
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let (head, _) = split_at_width(text, max - 1);
    format!("{}…", head)
}

fn split_at_width(text: &str, max: usize) -> (&str, &str) {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            return text.split_at(idx);
        }
        used += w;
    }
    (text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_parse_inline_styles() {
        let spans = parse_inline("a **bold** and *em* with `S v`", Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["a ", "bold", " and ", "em", " with ", "S v"]);
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(spans[5].style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_parse_inline_plain_text_passes_through() {
        let spans = parse_inline("2 * 3 = 6", Style::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "2 * 3 = 6");
    }

    #[test]
    fn test_wrap_respects_width() {
        let spans = parse_inline(
            "The tournament matters because it turns statistics into stories",
            Style::default(),
        );
        let lines = wrap_spans(&spans, 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(plain(line).trim_end().width() <= 20, "{:?}", plain(line));
        }
        let joined: String = lines.iter().map(plain).collect();
        assert_eq!(
            joined,
            "The tournament matters because it turns statistics into stories"
        );
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        let spans = vec![Span::raw("abcdefghijkl")];
        let lines = wrap_spans(&spans, 5);
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrap_text_indents_continuation_lines() {
        let lines = wrap_text("one two three four", Style::default(), 10, "• ");
        assert_eq!(plain(&lines[0]), "• one two ");
        assert!(plain(&lines[1]).starts_with("  "));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Scree Plot", 20), "Scree Plot");
        assert_eq!(truncate_to_width("Scree Plot", 6), "Scree…");
        assert_eq!(truncate_to_width("Scree Plot", 0), "");
    }
}
