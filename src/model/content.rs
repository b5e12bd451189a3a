//! Static site content - typed blocks deserialized from the embedded YAML

use super::gallery::GalleryItem;
use super::navigation::{HomeTab, ProjectTab};
use serde::Deserialize;
use std::collections::HashMap;

/// Reference to an image asset, with optional caption and credit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default)]
    pub credit_url: Option<String>,
}

/// An outbound link, opened outside the application
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// A clickable card on the Projects landing tab
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// One piece of panel content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Lead { text: String },
    Paragraph { text: String },
    Section { title: String, blocks: Vec<Block> },
    Bullets { items: Vec<String> },
    Numbered { items: Vec<String> },
    Code {
        #[serde(default)]
        label: Option<String>,
        code: String,
    },
    Image(ImageRef),
    ImageRow { images: Vec<ImageRef> },
    Gallery { items: Vec<GalleryItem> },
    Links { links: Vec<Link> },
    ProjectCards { cards: Vec<ProjectCard> },
}

/// Static content rendered for one tab
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Panel {
    pub blocks: Vec<Block>,
}

impl Panel {
    /// Gallery item lists in document order
    pub fn galleries(&self) -> Vec<&[GalleryItem]> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a [GalleryItem]>) {
            for block in blocks {
                match block {
                    Block::Gallery { items } => out.push(items),
                    Block::Section { blocks, .. } => collect(blocks, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.blocks, &mut out);
        out
    }
}

/// Site owner details shown in the header, splash and footer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub name: String,
    pub initials: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HomePanels {
    pub about: Panel,
    pub projects: Panel,
    pub resume: Panel,
}

impl HomePanels {
    pub fn get(&self, tab: HomeTab) -> &Panel {
        match tab {
            HomeTab::About => &self.about,
            HomeTab::Projects => &self.projects,
            HomeTab::Resume => &self.resume,
        }
    }
}

/// A project write-up with one panel per method tab
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: String,
    /// Label in the projects dropdown
    pub menu_label: String,
    #[serde(default)]
    pub panels: HashMap<ProjectTab, Panel>,
}

/// All content of the portfolio
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    pub owner: Owner,
    #[serde(default)]
    pub footer_note: String,
    pub home: HomePanels,
    pub projects: Vec<Project>,
}

impl Site {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
