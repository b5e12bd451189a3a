//! Page chrome: header with brand and nav, projects dropdown, breadcrumb and
//! project tab strip, footer and help bar.
//!
//! Stateless apart from the clickable areas recorded on each draw and the
//! shared region the dropdown's outside-click listener tests against.

use crate::action::Action;
use crate::components::layout::ShellLayout;
use crate::components::markup::truncate_to_width;
use crate::listeners::{rect_contains, Region};
use crate::model::{HomeTab, Mode, NavigationState, ProjectId, ProjectTab, Site};
use chrono::Datelike;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Everything the shell needs to draw one frame
pub struct ShellRenderContext<'a> {
    pub site: &'a Site,
    pub nav: &'a NavigationState,
    /// Highlighted dropdown entry
    pub menu_selected: usize,
}

fn pill_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Shell chrome and its hit areas
#[derive(Default)]
pub struct Shell {
    /// Clickable areas of the chrome from the last draw
    hits: Vec<(Rect, Action)>,
    /// Clickable dropdown entries from the last draw
    menu_hits: Vec<(Rect, Action)>,
    projects_button: Rect,
    /// Projects control plus the open dropdown
    menu_region: Region,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared container region for outside-click dismissal of the dropdown
    pub fn menu_region(&self) -> Region {
        self.menu_region.clone()
    }

    /// Resolve a click on the chrome; dropdown entries win over what they cover
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Action> {
        self.menu_hits
            .iter()
            .chain(self.hits.iter())
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, action)| action.clone())
    }

    /// Draw header, subnav, footer and help bar
    pub fn draw(&mut self, frame: &mut Frame, layout: &ShellLayout, ctx: &ShellRenderContext) {
        self.hits.clear();
        self.draw_header(frame, layout.header, ctx);
        if let Some(subnav) = layout.subnav {
            self.draw_subnav(frame, subnav, ctx);
        }
        draw_footer(frame, layout.footer, ctx.site);
        draw_help_bar(frame, layout.help, ctx.nav);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Header
    // ─────────────────────────────────────────────────────────────────────────

    fn draw_header(&mut self, frame: &mut Frame, area: Rect, ctx: &ShellRenderContext) {
        // Stays empty when the header is too narrow for the Projects pill
        self.projects_button = Rect::default();
        let owner = &ctx.site.owner;
        let brand = Line::from(vec![
            Span::styled(
                format!(" {} ", owner.initials),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                owner.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let brand_rect = Rect::new(
            area.x + 1,
            area.y,
            (brand.width() as u16).min(area.width.saturating_sub(1)),
            1,
        );
        frame.render_widget(Paragraph::new(brand), brand_rect);
        self.hits.push((brand_rect, Action::GoHome(HomeTab::About)));

        // Nav pills, right-aligned
        let pills: Vec<(HomeTab, String)> = HomeTab::all()
            .into_iter()
            .map(|tab| (tab, format!(" {} ", tab.label())))
            .collect();
        let total: u16 = pills.iter().map(|(_, label)| label.width() as u16 + 1).sum();
        let mut x = area
            .right()
            .saturating_sub(total)
            .max(brand_rect.right() + 1);

        for (tab, label) in pills {
            let width = label.width() as u16;
            if x + width > area.right() {
                break;
            }
            let rect = Rect::new(x, area.y, width, 1);
            let active = match tab {
                HomeTab::Projects => ctx.nav.projects_active(),
                _ => ctx.nav.mode == Mode::Home && ctx.nav.home_tab == tab,
            };
            frame.render_widget(Paragraph::new(Span::styled(label, pill_style(active))), rect);

            let action = match tab {
                HomeTab::Projects => {
                    self.projects_button = rect;
                    Action::PressProjects
                }
                other => Action::GoHome(other),
            };
            self.hits.push((rect, action));
            x += width + 1;
        }

        if area.height > 1 {
            let rule = Rect::new(area.x, area.y + 1, area.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "─".repeat(area.width as usize),
                    Style::default().fg(Color::DarkGray),
                )),
                rule,
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Breadcrumb and project tabs
    // ─────────────────────────────────────────────────────────────────────────

    fn draw_subnav(&mut self, frame: &mut Frame, area: Rect, ctx: &ShellRenderContext) {
        let Some(id) = &ctx.nav.active_project else {
            return;
        };
        let label = ctx
            .site
            .project(id.as_str())
            .map(|p| p.menu_label.as_str())
            .unwrap_or(id.as_str());

        let crumb = "Projects";
        let crumb_rect = Rect::new(area.x + 1, area.y, crumb.width() as u16, 1);
        let breadcrumb = Line::from(vec![
            Span::styled(
                crumb,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(" › ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                truncate_to_width(label, area.width.saturating_sub(13) as usize),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(breadcrumb),
            Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), 1),
        );
        self.hits.push((crumb_rect, Action::GoHome(HomeTab::Projects)));

        if area.height > 1 {
            let strip = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(2), 1);
            self.draw_tab_strip(frame, strip, ctx.nav.project_tab);
        }
    }

    /// One row of tab pills, shifted left as needed to keep the active tab visible
    fn draw_tab_strip(&mut self, frame: &mut Frame, area: Rect, active: ProjectTab) {
        let tabs = ProjectTab::all();
        let labels: Vec<String> = tabs.iter().map(|t| format!(" {} ", t.label())).collect();
        let widths: Vec<u16> = labels.iter().map(|l| l.width() as u16 + 1).collect();
        let active_index = tabs.iter().position(|t| *t == active).unwrap_or(0);

        // Reserve a column on each side for overflow markers
        let avail = area.width.saturating_sub(2);
        let mut first = 0;
        while first < active_index && widths[first..=active_index].iter().sum::<u16>() > avail {
            first += 1;
        }

        let mut x = area.x + 1;
        let mut clipped = false;
        for (i, tab) in tabs.iter().enumerate().skip(first) {
            let width = widths[i] - 1;
            if x + width > area.x + 1 + avail {
                clipped = true;
                break;
            }
            let rect = Rect::new(x, area.y, width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(labels[i].clone(), pill_style(*tab == active))),
                rect,
            );
            self.hits.push((rect, Action::SetProjectTab(*tab)));
            x += width + 1;
        }

        let marker = Style::default().fg(Color::DarkGray);
        if first > 0 {
            frame.render_widget(
                Paragraph::new(Span::styled("‹", marker)),
                Rect::new(area.x, area.y, 1, 1),
            );
        }
        if clipped && area.width > 0 {
            frame.render_widget(
                Paragraph::new(Span::styled("›", marker)),
                Rect::new(area.right() - 1, area.y, 1, 1),
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Projects dropdown
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the dropdown over the page; called after the panel is drawn
    pub fn draw_dropdown(&mut self, frame: &mut Frame, area: Rect, ctx: &ShellRenderContext) {
        self.menu_hits.clear();
        if !ctx.nav.menu_open || ctx.site.projects.is_empty() || self.projects_button.is_empty() {
            self.menu_region.set(self.projects_button);
            return;
        }

        let projects = &ctx.site.projects;
        let width = projects
            .iter()
            .map(|p| p.menu_label.width() as u16 + 4)
            .max()
            .unwrap_or(20)
            .min(area.width);
        let height = (projects.len() as u16 + 2).min(area.height.saturating_sub(self.projects_button.bottom()));
        let x = self.projects_button.x.min(area.right().saturating_sub(width));
        let dropdown = Rect::new(x, self.projects_button.bottom(), width, height);

        frame.render_widget(Clear, dropdown);

        let items: Vec<ListItem> = projects
            .iter()
            .enumerate()
            .map(|(i, project)| {
                let style = if i == ctx.menu_selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(
                    format!(" {} ", project.menu_label),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(list, dropdown);

        for (i, project) in projects.iter().enumerate() {
            let row = dropdown.y + 1 + i as u16;
            if row + 1 >= dropdown.bottom() {
                break;
            }
            let rect = Rect::new(dropdown.x + 1, row, dropdown.width.saturating_sub(2), 1);
            self.menu_hits
                .push((rect, Action::OpenProject(ProjectId::new(project.id.clone()))));
        }

        self.menu_region.set(self.projects_button.union(dropdown));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Footer and help bar
// ─────────────────────────────────────────────────────────────────────────────

fn draw_footer(frame: &mut Frame, area: Rect, site: &Site) {
    let year = chrono::Local::now().year();
    let mut spans = vec![Span::styled(
        format!(" © {} {} — All rights reserved.", year, site.owner.name),
        Style::default().fg(Color::DarkGray),
    )];
    if !site.footer_note.is_empty() {
        spans.push(Span::styled(
            format!("  {}", site.footer_note),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_bar(frame: &mut Frame, area: Rect, nav: &NavigationState) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" a/p/r ", key),
        Span::raw("Tabs  "),
    ];
    if nav.menu_open {
        spans.extend([
            Span::styled(" j/k ", key),
            Span::raw("Select  "),
            Span::styled(" Enter ", key),
            Span::raw("Open  "),
            Span::styled(" Esc ", key),
            Span::raw("Close menu  "),
        ]);
    } else {
        if nav.mode == Mode::Project {
            spans.extend([
                Span::styled(" [/] ", key),
                Span::raw("Method  "),
                Span::styled(" Bksp ", key),
                Span::raw("Projects  "),
            ]);
        }
        spans.extend([
            Span::styled(" j/k ", key),
            Span::raw("Scroll  "),
            Span::styled(" Tab ", key),
            Span::raw("Focus  "),
        ]);
    }
    spans.extend([
        Span::styled(" ? ", key),
        Span::raw("Help  "),
        Span::styled(" q ", key),
        Span::raw("Quit"),
    ]);

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layout::calculate_shell_layout;
    use crate::services::load_site;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(shell: &mut Shell, site: &Site, nav: &NavigationState) -> String {
        draw_sized(shell, site, nav, 100, 30)
    }

    fn draw_sized(
        shell: &mut Shell,
        site: &Site,
        nav: &NavigationState,
        width: u16,
        height: u16,
    ) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let layout = calculate_shell_layout(f.area(), nav.mode == Mode::Project);
                let ctx = ShellRenderContext {
                    site,
                    nav,
                    menu_selected: 0,
                };
                shell.draw(f, &layout, &ctx);
                shell.draw_dropdown(f, f.area(), &ctx);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn find(shell: &Shell, wanted: &Action) -> Rect {
        shell
            .menu_hits
            .iter()
            .chain(shell.hits.iter())
            .find(|(_, action)| action == wanted)
            .map(|(rect, _)| *rect)
            .unwrap()
    }

    #[test]
    fn test_header_hits_route_to_navigation() {
        let site = load_site().unwrap();
        let nav = NavigationState::new();
        let mut shell = Shell::new();
        let content = draw(&mut shell, &site, &nav);

        assert!(content.contains("Ayush Khadka"));
        assert!(content.contains("Projects ▾"));
        assert!(content.contains("All rights reserved."));

        let projects = find(&shell, &Action::PressProjects);
        assert_eq!(
            shell.hit_test(projects.x, projects.y),
            Some(Action::PressProjects)
        );
        assert_eq!(shell.hit_test(2, 0), Some(Action::GoHome(HomeTab::About)));
    }

    #[test]
    fn test_dropdown_lists_projects_and_sets_region() {
        let site = load_site().unwrap();
        let mut nav = NavigationState::new();
        nav.press_projects();
        let mut shell = Shell::new();
        let content = draw(&mut shell, &site, &nav);

        assert!(content.contains("CSCI 5612: March Madness Predictor"));

        let open = Action::OpenProject(ProjectId::new("csci5612"));
        let entry = find(&shell, &open);
        assert_eq!(shell.hit_test(entry.x, entry.y), Some(open));

        let region = shell.menu_region().get();
        assert!(rect_contains(region, entry.x, entry.y));
        assert!(rect_contains(region, shell.projects_button.x, shell.projects_button.y));
        assert!(!rect_contains(region, 0, 20));
    }

    #[test]
    fn test_project_chrome_shows_breadcrumb_and_tabs() {
        let site = load_site().unwrap();
        let mut nav = NavigationState::new();
        nav.open_project(ProjectId::new("csci5612"));
        nav.set_project_tab(ProjectTab::Nn);
        let mut shell = Shell::new();
        let content = draw(&mut shell, &site, &nav);

        assert!(content.contains("Projects › CSCI 5612"));
        // The active tab is always visible, even when the strip overflows
        assert!(content.contains(" NN "));

        let nn = find(&shell, &Action::SetProjectTab(ProjectTab::Nn));
        assert_eq!(
            shell.hit_test(nn.x, nn.y),
            Some(Action::SetProjectTab(ProjectTab::Nn))
        );
        let crumb = find(&shell, &Action::GoHome(HomeTab::Projects));
        assert_eq!(crumb.y, 2);
    }

    #[test]
    fn test_narrow_header_drops_projects_anchor() {
        let site = load_site().unwrap();
        let mut nav = NavigationState::new();
        nav.press_projects();
        assert!(nav.menu_open);

        let mut shell = Shell::new();
        draw(&mut shell, &site, &nav);
        assert!(!shell.menu_hits.is_empty());
        assert!(!shell.menu_region().get().is_empty());

        let content = draw_sized(&mut shell, &site, &nav, 36, 12);
        assert!(!content.contains("Projects ▾"));
        assert!(shell.menu_hits.is_empty());
        assert!(shell.menu_region().get().is_empty());
        assert!(shell
            .hits
            .iter()
            .all(|(_, action)| *action != Action::PressProjects));
    }
}
