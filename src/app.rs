//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns the navigation state and mounts one [`PanelView`] for the current
//! view, replacing it whenever the view changes.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_shell_layout, HelpDialog, PanelView, QuitDialog, Shell, ShellRenderContext,
    SplashComponent,
};
use crate::config::Config;
use crate::listeners::{on_outside_click, EventListeners, ListenerGuard, ListenerKind};
use crate::model::{
    AppMode, HomeTab, Modal, ModalStack, Mode, NavigationState, Panel, ProjectId, Site, View,
};
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{layout::Rect, Frame};

/// Content for a view; unknown projects or tabs yield an empty panel
fn panel_for(site: &Site, view: &View) -> Panel {
    match view {
        View::Home(tab) => site.home.get(*tab).clone(),
        View::Project(id, tab) => {
            let panel = site
                .project(id.as_str())
                .and_then(|project| project.panels.get(tab));
            match panel {
                Some(panel) => panel.clone(),
                None => {
                    tracing::warn!("No content for project '{}' tab '{}'", id, tab.id());
                    Panel::default()
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    pub config: Config,

    /// Static portfolio content
    pub site: Site,

    /// Home/Project mode, tabs and dropdown
    pub nav: NavigationState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Document-level listener registry
    pub listeners: EventListeners,

    /// Highlighted entry of the projects dropdown
    pub menu_selected: usize,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// View the mounted panel was built for
    mounted_view: View,

    /// Dismisses the projects dropdown on clicks outside it
    _menu_dismiss: ListenerGuard,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub shell: Shell,
    pub panel: PanelView,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: Config, site: Site) -> App {
        let listeners = EventListeners::new();
        let shell = Shell::new();
        let menu_dismiss = on_outside_click(&listeners, shell.menu_region(), Action::CloseMenu);

        let nav = NavigationState::new();
        let mounted_view = nav.view();
        let panel = PanelView::new(
            panel_for(&site, &mounted_view),
            &config.asset_base,
            listeners.clone(),
        );

        let mode = if config.show_splash {
            AppMode::Splash
        } else {
            AppMode::Running
        };

        App {
            mode,
            splash: SplashComponent::new(&site.owner),
            quit_dialog: QuitDialog::new(&site.owner.name),
            help_dialog: HelpDialog::default(),
            config,
            site,
            nav,
            modals: ModalStack::new(),
            listeners,
            menu_selected: 0,
            should_quit: false,
            mounted_view,
            _menu_dismiss: menu_dismiss,
            shell,
            panel,
        }
    }

    /// Turn a terminal event into Actions
    ///
    /// Document listeners see every key press and pointer press first. While
    /// an image is enlarged they are the only consumers of keys.
    pub fn handle_event(&mut self, event: &Event) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        match event {
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    return Ok(vec![Action::ForceQuit]);
                }
                if self.mode == AppMode::Running {
                    let lightbox_open = self.panel.has_open_lightbox();
                    actions.extend(self.listeners.dispatch_key(key));
                    if lightbox_open {
                        return Ok(actions);
                    }
                }
                actions.extend(self.handle_key_event(*key)?);
            }
            Event::Mouse(mouse) => {
                if self.mode == AppMode::Running {
                    actions.extend(self.listeners.dispatch_pointer(mouse));
                }
                actions.extend(self.handle_mouse_event(*mouse)?);
            }
            Event::Resize(w, h) => actions.push(Action::Resize(*w, *h)),
            _ => {}
        }
        Ok(actions)
    }

    /// Remount the panel when the navigation state points at a new view.
    /// Dropping the old panel releases its lightbox listeners.
    fn sync_panel(&mut self) {
        let view = self.nav.view();
        if view == self.mounted_view {
            return;
        }
        tracing::info!("View changed: {:?} -> {:?}", self.mounted_view, view);
        self.panel = PanelView::new(
            panel_for(&self.site, &view),
            &self.config.asset_base,
            self.listeners.clone(),
        );
        self.mounted_view = view;
        tracing::debug!(
            "{} key listener(s) attached after remount",
            self.listeners.count(ListenerKind::KeyDown)
        );
    }

    fn open_project(&mut self, id: ProjectId) {
        if self.site.project(id.as_str()).is_none() {
            tracing::warn!("Ignoring unknown project '{}'", id);
            return;
        }
        self.nav.open_project(id);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().copied() {
                    return self.handle_modal_key_event(modal, key);
                }
                if self.nav.menu_open {
                    if let Some(action) = self.handle_menu_key_event(key) {
                        return Ok(Some(action));
                    }
                }
                if let Some(action) = self.handle_nav_key_event(key) {
                    return Ok(Some(action));
                }
                self.panel.handle_key_event(key)
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.mode != AppMode::Running || !self.modals.is_empty() {
            return Ok(None);
        }
        let is_press = mouse.kind == MouseEventKind::Down(MouseButton::Left);

        if let Some(lightbox) = self.panel.open_lightbox() {
            if is_press {
                return Ok(lightbox.handle_modal_click(mouse.column, mouse.row));
            }
            return Ok(None);
        }

        if is_press {
            if let Some(action) = self.shell.hit_test(mouse.column, mouse.row) {
                return Ok(Some(action));
            }
        }
        self.panel.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::debug!("Action: {}", action);
        }

        let follow_up = match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(Action::Tick);
                }
                None
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
                None
            }
            Action::ForceQuit => {
                self.should_quit = true;
                None
            }
            Action::Resize(_, _) => None,

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::GoHome(tab) => {
                self.nav.go_home(tab);
                self.nav.close_menu();
                None
            }
            Action::PressProjects => {
                self.nav.press_projects();
                if self.nav.menu_open {
                    // Start from the open project, if any
                    self.menu_selected = self
                        .nav
                        .active_project
                        .as_ref()
                        .and_then(|id| self.site.projects.iter().position(|p| p.id == id.as_str()))
                        .unwrap_or(0);
                }
                None
            }
            Action::OpenProject(id) => {
                self.open_project(id);
                None
            }
            Action::SetProjectTab(tab) => {
                self.nav.set_project_tab(tab);
                None
            }
            Action::NextProjectTab => {
                self.nav.next_project_tab();
                None
            }
            Action::PrevProjectTab => {
                self.nav.prev_project_tab();
                None
            }
            Action::CloseMenu => {
                self.nav.close_menu();
                None
            }
            Action::MenuNext => {
                let len = self.site.projects.len().max(1);
                self.menu_selected = (self.menu_selected + 1) % len;
                None
            }
            Action::MenuPrev => {
                let len = self.site.projects.len().max(1);
                self.menu_selected = (self.menu_selected + len - 1) % len;
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Panel (delegate to PanelView)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::ScrollTop
            | Action::FocusNext
            | Action::FocusPrev
            | Action::ActivateFocus
            | Action::Gallery { .. } => self.panel.update(action)?,

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
                None
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
                None
            }
            Action::CloseModal => {
                self.modals.pop();
                None
            }
        };

        self.sync_panel();
        Ok(follow_up)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::Running => {
                let layout = calculate_shell_layout(area, self.nav.mode == Mode::Project);
                let ctx = ShellRenderContext {
                    site: &self.site,
                    nav: &self.nav,
                    menu_selected: self.menu_selected,
                };

                self.shell.draw(frame, &layout, &ctx);
                self.panel.draw(frame, layout.main)?;
                self.shell.draw_dropdown(frame, area, &ctx);

                if let Some(lightbox) = self.panel.open_lightbox_mut() {
                    lightbox.draw_modal(frame, area);
                }

                // Draw modal overlay if active
                if let Some(modal) = self.modals.top().copied() {
                    self.draw_modal(frame, area, modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    /// Keys owned by the open projects dropdown; anything else falls through
    fn handle_menu_key_event(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MenuNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MenuPrev),
            KeyCode::Esc => Some(Action::CloseMenu),
            KeyCode::Enter => self
                .site
                .projects
                .get(self.menu_selected)
                .map(|p| Action::OpenProject(ProjectId::new(p.id.clone()))),
            _ => None,
        }
    }

    /// Page-level navigation keys
    fn handle_nav_key_event(&self, key: KeyEvent) -> Option<Action> {
        let global = match key.code {
            KeyCode::Char('a') | KeyCode::Char('1') => Some(Action::GoHome(HomeTab::About)),
            KeyCode::Char('p') | KeyCode::Char('2') => Some(Action::PressProjects),
            KeyCode::Char('r') | KeyCode::Char('3') => Some(Action::GoHome(HomeTab::Resume)),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        if global.is_some() || self.nav.mode != Mode::Project {
            return global;
        }

        match key.code {
            KeyCode::Char(']') | KeyCode::Right => Some(Action::NextProjectTab),
            KeyCode::Char('[') | KeyCode::Left => Some(Action::PrevProjectTab),
            KeyCode::Backspace => Some(Action::GoHome(HomeTab::Projects)),
            _ => None,
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectTab;
    use crate::services::load_site;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let config = Config {
            show_splash: false,
            ..Config::default()
        };
        App::new(config, load_site().unwrap())
    }

    /// Feed an event through the app, following up chained actions
    fn send(app: &mut App, event: Event) {
        for action in app.handle_event(&event).unwrap() {
            let mut current_action = Some(action);
            while let Some(a) = current_action {
                current_action = app.update(a).unwrap();
            }
        }
    }

    fn key(app: &mut App, code: KeyCode) {
        send(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        send(
            app,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            }),
        );
    }

    fn draw(app: &mut App) {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.draw(f, f.area()).unwrap()).unwrap();
    }

    fn csci() -> ProjectId {
        ProjectId::new("csci5612")
    }

    #[test]
    fn test_projects_dropdown_scenario() {
        let mut app = app();
        assert_eq!(app.nav.view(), View::Home(HomeTab::About));

        key(&mut app, KeyCode::Char('p'));
        assert!(app.nav.menu_open);
        assert_eq!(app.nav.home_tab, HomeTab::Projects);
        assert_eq!(app.nav.mode, Mode::Home);

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.nav.mode, Mode::Project);
        assert_eq!(app.nav.active_project, Some(csci()));
        assert_eq!(app.nav.project_tab, ProjectTab::Introduction);
        assert!(!app.nav.menu_open);
    }

    #[test]
    fn test_projects_control_inside_project_only_toggles_menu() {
        let mut app = app();
        app.update(Action::OpenProject(csci())).unwrap();
        key(&mut app, KeyCode::Char('p'));
        assert!(app.nav.menu_open);
        assert_eq!(app.nav.mode, Mode::Project);

        key(&mut app, KeyCode::Esc);
        assert!(!app.nav.menu_open);
        assert_eq!(app.nav.view(), View::Project(csci(), ProjectTab::Introduction));
    }

    #[test]
    fn test_outside_click_closes_menu() {
        let mut app = app();
        key(&mut app, KeyCode::Char('p'));
        draw(&mut app);

        click(&mut app, 0, 30);
        assert!(!app.nav.menu_open);
        assert_eq!(app.nav.mode, Mode::Home);
    }

    #[test]
    fn test_click_on_dropdown_entry_opens_project() {
        let mut app = app();
        key(&mut app, KeyCode::Char('p'));
        draw(&mut app);

        let region = app.shell.menu_region().get();
        // First entry sits inside the dropdown border, one row under the control
        click(&mut app, region.x + 2, region.y + 2);
        assert_eq!(app.nav.view(), View::Project(csci(), ProjectTab::Introduction));
        assert!(!app.nav.menu_open);
    }

    #[test]
    fn test_project_tab_keys_and_backspace() {
        let mut app = app();
        app.update(Action::OpenProject(csci())).unwrap();

        key(&mut app, KeyCode::Char(']'));
        key(&mut app, KeyCode::Right);
        assert_eq!(app.nav.project_tab, ProjectTab::DataPrepEda);

        key(&mut app, KeyCode::Left);
        key(&mut app, KeyCode::Char('['));
        key(&mut app, KeyCode::Char('['));
        assert_eq!(app.nav.project_tab, ProjectTab::Nn);

        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.nav.view(), View::Home(HomeTab::Projects));
        assert_eq!(app.nav.active_project, None);
    }

    #[test]
    fn test_project_tab_ignored_in_home_mode() {
        let mut app = app();
        app.update(Action::SetProjectTab(ProjectTab::Pca)).unwrap();
        assert_eq!(app.nav.view(), View::Home(HomeTab::About));
        assert_eq!(app.nav.project_tab, ProjectTab::Introduction);
    }

    #[test]
    fn test_unknown_project_is_ignored() {
        let mut app = app();
        app.update(Action::OpenProject(ProjectId::new("nope"))).unwrap();
        assert_eq!(app.nav.mode, Mode::Home);
    }

    #[test]
    fn test_lightbox_owns_keyboard_while_open() {
        let mut app = app();
        app.update(Action::OpenProject(csci())).unwrap();
        app.update(Action::SetProjectTab(ProjectTab::DataPrepEda)).unwrap();

        key(&mut app, KeyCode::Tab);
        key(&mut app, KeyCode::Enter);
        assert!(app.panel.has_open_lightbox());
        assert_eq!(app.listeners.count(ListenerKind::KeyDown), 1);

        // Page keys do not reach the page while the image is enlarged
        key(&mut app, KeyCode::Char('a'));
        key(&mut app, KeyCode::Char('q'));
        assert_eq!(app.nav.mode, Mode::Project);
        assert!(app.modals.is_empty());

        key(&mut app, KeyCode::Right);
        assert_eq!(app.panel.lightboxes()[0].state().open_index(), Some(1));
        assert_eq!(app.nav.project_tab, ProjectTab::DataPrepEda);

        key(&mut app, KeyCode::Esc);
        assert!(!app.panel.has_open_lightbox());
        assert_eq!(app.listeners.count(ListenerKind::KeyDown), 0);

        key(&mut app, KeyCode::Char('a'));
        assert_eq!(app.nav.view(), View::Home(HomeTab::About));
    }

    #[test]
    fn test_view_change_releases_open_lightbox() {
        let mut app = app();
        app.update(Action::OpenProject(csci())).unwrap();
        app.update(Action::SetProjectTab(ProjectTab::Clustering)).unwrap();
        app.update(Action::Gallery {
            gallery: 0,
            op: crate::action::GalleryOp::Open(2),
        })
        .unwrap();
        assert_eq!(app.listeners.count(ListenerKind::KeyDown), 1);

        app.update(Action::SetProjectTab(ProjectTab::Pca)).unwrap();
        assert!(!app.panel.has_open_lightbox());
        assert_eq!(app.listeners.count(ListenerKind::KeyDown), 0);
        // The outside-click listener stays for the lifetime of the app
        assert_eq!(app.listeners.count(ListenerKind::PointerDown), 1);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app();
        key(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        key(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        send(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_splash_skips_on_key() {
        let mut app = App::new(Config::default(), load_site().unwrap());
        app.init().unwrap();
        assert_eq!(app.mode, AppMode::Splash);
        key(&mut app, KeyCode::Char(' '));
        assert_eq!(app.mode, AppMode::Running);
    }

    #[test]
    fn test_full_frame_renders() {
        let mut app = app();
        app.update(Action::OpenProject(csci())).unwrap();
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.draw(f, f.area()).unwrap()).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Ayush Khadka"));
        assert!(content.contains("Introduction"));
    }
}
