//! Navigation state - the two-level tab state machine
//!
//! Home mode selects between About / Projects / Resume. Opening a project
//! switches to Project mode, where a fixed, ordered strip of method tabs is
//! available. The projects dropdown open/closed flag lives here as well.

use serde::Deserialize;
use std::fmt;

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Home,
    Project,
}

/// Tabs available in Home mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeTab {
    #[default]
    About,
    Projects,
    Resume,
}

impl HomeTab {
    pub fn all() -> Vec<HomeTab> {
        vec![HomeTab::About, HomeTab::Projects, HomeTab::Resume]
    }

    pub fn id(&self) -> &'static str {
        match self {
            HomeTab::About => "about",
            HomeTab::Projects => "projects",
            HomeTab::Resume => "resume",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HomeTab::About => "About Me",
            HomeTab::Projects => "Projects ▾",
            HomeTab::Resume => "Resume",
        }
    }
}

/// Method tabs shown once a project is open, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTab {
    #[default]
    Introduction,
    Conclusions,
    #[serde(rename = "dataprep_eda")]
    DataPrepEda,
    Clustering,
    Pca,
    #[serde(rename = "naivebayes")]
    NaiveBayes,
    #[serde(rename = "dectrees")]
    DecTrees,
    Svms,
    Regression,
    Nn,
}

impl ProjectTab {
    pub fn all() -> Vec<ProjectTab> {
        vec![
            ProjectTab::Introduction,
            ProjectTab::Conclusions,
            ProjectTab::DataPrepEda,
            ProjectTab::Clustering,
            ProjectTab::Pca,
            ProjectTab::NaiveBayes,
            ProjectTab::DecTrees,
            ProjectTab::Svms,
            ProjectTab::Regression,
            ProjectTab::Nn,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ProjectTab::Introduction => "introduction",
            ProjectTab::Conclusions => "conclusions",
            ProjectTab::DataPrepEda => "dataprep_eda",
            ProjectTab::Clustering => "clustering",
            ProjectTab::Pca => "pca",
            ProjectTab::NaiveBayes => "naivebayes",
            ProjectTab::DecTrees => "dectrees",
            ProjectTab::Svms => "svms",
            ProjectTab::Regression => "regression",
            ProjectTab::Nn => "nn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectTab::Introduction => "Introduction",
            ProjectTab::Conclusions => "Conclusions",
            ProjectTab::DataPrepEda => "DataPrep_EDA",
            ProjectTab::Clustering => "Clustering",
            ProjectTab::Pca => "PCA",
            ProjectTab::NaiveBayes => "NaiveBayes",
            ProjectTab::DecTrees => "DecTrees",
            ProjectTab::Svms => "SVMs",
            ProjectTab::Regression => "Regression",
            ProjectTab::Nn => "NN",
        }
    }

    /// Method name used by the generated placeholder panel, for tabs
    /// that have no written-up content yet
    pub fn placeholder_name(&self) -> Option<&'static str> {
        match self {
            ProjectTab::NaiveBayes => Some("Naive Bayes"),
            ProjectTab::DecTrees => Some("Decision Trees"),
            ProjectTab::Svms => Some("SVMs"),
            ProjectTab::Regression => Some("Regression"),
            ProjectTab::Nn => Some("Neural Networks"),
            _ => None,
        }
    }

    /// Next tab in display order, wrapping around
    pub fn next(&self) -> ProjectTab {
        let tabs = Self::all();
        let current = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(current + 1) % tabs.len()]
    }

    /// Previous tab in display order, wrapping around
    pub fn previous(&self) -> ProjectTab {
        let tabs = Self::all();
        let current = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(current + tabs.len() - 1) % tabs.len()]
    }
}

/// Identifier of a project, e.g. `csci5612`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The view currently on screen, derived from the navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home(HomeTab),
    Project(ProjectId, ProjectTab),
}

/// Navigation state owned by the application shell
///
/// `active_project` is `Some` if and only if `mode == Mode::Project`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub mode: Mode,
    pub home_tab: HomeTab,
    pub active_project: Option<ProjectId>,
    pub project_tab: ProjectTab,
    pub menu_open: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to Home mode on the given tab
    pub fn go_home(&mut self, tab: HomeTab) {
        self.mode = Mode::Home;
        self.home_tab = tab;
        self.active_project = None;
    }

    /// Open a project on its Introduction tab and close the dropdown
    pub fn open_project(&mut self, id: ProjectId) {
        self.active_project = Some(id);
        self.project_tab = ProjectTab::Introduction;
        self.mode = Mode::Project;
        self.menu_open = false;
    }

    /// Select a project tab. Ignored outside Project mode.
    ///
    /// Returns whether the tab was applied.
    pub fn set_project_tab(&mut self, tab: ProjectTab) -> bool {
        if self.mode != Mode::Project {
            tracing::warn!("Ignoring project tab '{}' outside project mode", tab.id());
            return false;
        }
        self.project_tab = tab;
        true
    }

    pub fn next_project_tab(&mut self) -> bool {
        let tab = self.project_tab.next();
        self.set_project_tab(tab)
    }

    pub fn prev_project_tab(&mut self) -> bool {
        let tab = self.project_tab.previous();
        self.set_project_tab(tab)
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// The "Projects ▾" nav control
    ///
    /// Inside a project it only toggles the dropdown; from Home it also
    /// switches to the Projects landing tab.
    pub fn press_projects(&mut self) {
        self.toggle_menu();
        if self.mode == Mode::Home {
            self.home_tab = HomeTab::Projects;
        }
    }

    /// Whether the Projects nav control should render as active
    pub fn projects_active(&self) -> bool {
        self.mode == Mode::Project || self.home_tab == HomeTab::Projects
    }

    pub fn view(&self) -> View {
        match (&self.mode, &self.active_project) {
            (Mode::Project, Some(id)) => View::Project(id.clone(), self.project_tab),
            _ => View::Home(self.home_tab),
        }
    }
}
