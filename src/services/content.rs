//! Content loading services
//!
//! The portfolio text ships inside the binary as YAML and is parsed once at
//! start-up. Method tabs without a write-up get a generated placeholder panel.

use crate::model::content::{Block, Panel, Site};
use crate::model::navigation::ProjectTab;
use anyhow::{bail, Context, Result};

/// Embedded site content
const SITE_YAML: &str = include_str!("../../content/site.yaml");

/// Load the embedded site content
pub fn load_site() -> Result<Site> {
    parse_site(SITE_YAML)
}

/// Parse site content and fill in placeholder method panels
pub fn parse_site(yaml: &str) -> Result<Site> {
    let mut site: Site = serde_yaml::from_str(yaml).context("Failed to parse site content")?;

    for project in &mut site.projects {
        for tab in ProjectTab::all() {
            if project.panels.contains_key(&tab) {
                continue;
            }
            match tab.placeholder_name() {
                Some(name) => {
                    project.panels.insert(tab, placeholder_method(name));
                }
                None => bail!(
                    "Project '{}' has no content for the {} tab",
                    project.id,
                    tab.label()
                ),
            }
        }
    }

    tracing::info!(
        "Loaded content for {} project(s) owned by {}",
        site.projects.len(),
        site.owner.name
    );
    Ok(site)
}

/// Template panel for a method that has not been written up yet
pub fn placeholder_method(name: &str) -> Panel {
    Panel {
        blocks: vec![
            Block::Section {
                title: format!("{} — Overview", name),
                blocks: vec![Block::Paragraph {
                    text: format!(
                        "Briefly describe the {} method in plain language and state what you plan \
                         to do with it for this project. Consider adding a small diagram or \
                         illustration here to help readers visualize the idea.",
                        name
                    ),
                }],
            },
            Block::Section {
                title: "Data".to_string(),
                blocks: vec![Block::Bullets {
                    items: vec![
                        "Small image of the prepared dataset for this method.".to_string(),
                        "Link to **raw data** and **clean data** (required).".to_string(),
                        "Note any sampling, splitting, or normalization specific to this method."
                            .to_string(),
                    ],
                }],
            },
            Block::Section {
                title: "Code".to_string(),
                blocks: vec![Block::Paragraph {
                    text: "Link to the repository or notebook for this tab. Mention the \
                           language and core packages used. *Do not paste code directly on \
                           the page.*"
                        .to_string(),
                }],
            },
            Block::Section {
                title: "Results".to_string(),
                blocks: vec![Block::Paragraph {
                    text: "Discuss and visualize the results relevant to your topic. Explain \
                           parameter choices and what the outcomes mean for everyday \
                           understanding. Include charts or small images as needed."
                        .to_string(),
                }],
            },
        ],
    }
}

/// Resolve an asset reference against the configured base path.
/// Absolute URLs pass through untouched.
pub fn resolve_asset(base: &str, src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") || base.is_empty() {
        return src.to_string();
    }
    if base.ends_with('/') {
        format!("{}{}", base, src)
    } else {
        format!("{}/{}", base, src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::navigation::HomeTab;

    #[test]
    fn test_embedded_site_loads() {
        let site = load_site().expect("embedded content should parse");
        assert!(!site.owner.name.is_empty());

        let project = site.project("csci5612").expect("course project present");
        for tab in ProjectTab::all() {
            assert!(project.panels.contains_key(&tab), "missing {:?}", tab);
        }
    }

    #[test]
    fn test_embedded_galleries() {
        let site = load_site().unwrap();
        let project = site.project("csci5612").unwrap();

        let eda = &project.panels[&ProjectTab::DataPrepEda];
        let galleries = eda.galleries();
        assert_eq!(galleries.len(), 1);
        assert_eq!(galleries[0].len(), 10);

        assert_eq!(project.panels[&ProjectTab::Clustering].galleries()[0].len(), 8);
        assert_eq!(project.panels[&ProjectTab::Pca].galleries()[0].len(), 4);
        assert!(project.panels[&ProjectTab::Introduction].galleries().is_empty());

        assert_eq!(galleries[0][6].src, "seedxresult.png");
        assert_eq!(galleries[0][6].caption, "Tournament Seed vs Seed");
        let clustering = project.panels[&ProjectTab::Clustering].galleries();
        assert_eq!(clustering[0][7].caption, "k=6 Cluster");
    }

    #[test]
    fn test_placeholder_prose() {
        let panel = placeholder_method("SVMs");
        let sections: Vec<(&str, &[Block])> = panel
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section { title, blocks } => Some((title.as_str(), blocks.as_slice())),
                _ => None,
            })
            .collect();
        let titles: Vec<&str> = sections.iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, vec!["SVMs — Overview", "Data", "Code", "Results"]);

        match sections[1].1 {
            [Block::Bullets { items }] => assert_eq!(
                items[2],
                "Note any sampling, splitting, or normalization specific to this method."
            ),
            other => panic!("unexpected data blocks: {:?}", other),
        }
        match sections[2].1 {
            [Block::Paragraph { text }] => {
                assert!(text.starts_with("Link to the repository or notebook for this tab."));
                assert!(text.ends_with("*Do not paste code directly on the page.*"));
            }
            other => panic!("unexpected code blocks: {:?}", other),
        }
    }

    #[test]
    fn test_projects_landing_lists_every_project() {
        let site = load_site().unwrap();
        let cards: Vec<&str> = site
            .home
            .get(HomeTab::Projects)
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::ProjectCards { cards } => Some(cards),
                _ => None,
            })
            .flatten()
            .map(|c| c.id.as_str())
            .collect();
        for project in &site.projects {
            assert!(cards.contains(&project.id.as_str()));
        }
    }

    #[test]
    fn test_placeholder_tabs_are_generated() {
        let yaml = r#"
owner: { name: Test Owner, initials: TO, tagline: Testing }
home:
  about: { blocks: [] }
  projects: { blocks: [] }
  resume: { blocks: [] }
projects:
  - id: demo
    menu_label: Demo
    panels:
      introduction: { blocks: [ { type: heading, text: Hello } ] }
      conclusions: { blocks: [] }
      dataprep_eda: { blocks: [] }
      clustering: { blocks: [] }
      pca: { blocks: [] }
"#;
        let site = parse_site(yaml).unwrap();
        let project = site.project("demo").unwrap();
        assert_eq!(project.panels[&ProjectTab::Nn], placeholder_method("Neural Networks"));
        assert_eq!(
            project.panels[&ProjectTab::Introduction].blocks,
            vec![Block::Heading {
                text: "Hello".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_written_tab_is_an_error() {
        let yaml = r#"
owner: { name: Test Owner, initials: TO, tagline: Testing }
home:
  about: { blocks: [] }
  projects: { blocks: [] }
  resume: { blocks: [] }
projects:
  - id: demo
    menu_label: Demo
"#;
        let err = parse_site(yaml).unwrap_err();
        assert!(err.to_string().contains("Introduction"));
    }

    #[test]
    fn test_resolve_asset() {
        assert_eq!(resolve_asset("public/", "court.jpg"), "public/court.jpg");
        assert_eq!(resolve_asset("public", "court.jpg"), "public/court.jpg");
        assert_eq!(resolve_asset("", "court.jpg"), "court.jpg");
        assert_eq!(
            resolve_asset("public/", "https://placehold.co/800x450"),
            "https://placehold.co/800x450"
        );
    }
}
