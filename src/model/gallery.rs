//! Gallery items and lightbox state

use serde::Deserialize;

/// A single image in a gallery. Identity is its position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryItem {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

impl GalleryItem {
    /// Label for a thumbnail: caption, then alt text, then its position
    pub fn thumbnail_label(&self, index: usize) -> String {
        if !self.caption.is_empty() {
            self.caption.clone()
        } else if !self.alt.is_empty() {
            self.alt.clone()
        } else {
            format!("Image {}", index + 1)
        }
    }

    /// Alternative text for the enlarged view
    pub fn alt_text(&self) -> &str {
        if !self.alt.is_empty() {
            &self.alt
        } else if !self.caption.is_empty() {
            &self.caption
        } else {
            "Visualization"
        }
    }
}

/// Which item of a gallery is enlarged, if any
///
/// When `open_index` is `Some(i)`, `i < len` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryState {
    open_index: Option<usize>,
    len: usize,
}

impl GalleryState {
    pub fn new(len: usize) -> Self {
        Self {
            open_index: None,
            len,
        }
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open_index
    }

    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Enlarge the item at `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.open_index = Some(index);
        true
    }

    pub fn close(&mut self) {
        self.open_index = None;
    }

    /// Step forward with wraparound. No-op while closed.
    pub fn next(&mut self) {
        if let Some(i) = self.open_index {
            self.open_index = Some((i + 1) % self.len);
        }
    }

    /// Step backward with wraparound. No-op while closed.
    pub fn prev(&mut self) {
        if let Some(i) = self.open_index {
            self.open_index = Some((i + self.len - 1) % self.len);
        }
    }
}
