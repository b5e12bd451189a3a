//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by the header (brand, nav and rule)
pub const HEADER_HEIGHT: u16 = 2;

/// Rows taken by the project breadcrumb and tab strip
pub const SUBNAV_HEIGHT: u16 = 3;

/// Page layout areas
pub struct ShellLayout {
    pub header: Rect,
    pub subnav: Option<Rect>,
    pub main: Rect,
    pub footer: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the page layout; the subnav row only exists inside a project
pub fn calculate_shell_layout(area: Rect, project_mode: bool) -> ShellLayout {
    let subnav_height = if project_mode { SUBNAV_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(subnav_height),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    ShellLayout {
        header: chunks[0],
        subnav: project_mode.then_some(chunks[1]),
        main: chunks[2],
        footer: chunks[3],
        help: chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let small = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(small, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_subnav_only_in_project_mode() {
        let area = Rect::new(0, 0, 100, 40);

        let home = calculate_shell_layout(area, false);
        assert!(home.subnav.is_none());
        assert_eq!(home.main.y, HEADER_HEIGHT);
        assert_eq!(home.main.height, 40 - HEADER_HEIGHT - 2);

        let project = calculate_shell_layout(area, true);
        assert_eq!(project.subnav.map(|r| r.height), Some(SUBNAV_HEIGHT));
        assert_eq!(project.main.y, HEADER_HEIGHT + SUBNAV_HEIGHT);
        assert_eq!(project.help.y, 39);
    }
}
