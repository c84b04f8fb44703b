use ratatui::prelude::*;

/// Create the main layout with header, body, and footer
pub fn main_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(0),     // Body
            Constraint::Length(1),  // Footer/status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Split header into title and status sections
pub fn header_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(12),        // Title
            Constraint::Length(40),     // Focus + task count
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Stack the image, container and task lists
pub fn panels_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Images
            Constraint::Percentage(35), // Containers
            Constraint::Percentage(20), // Tasks
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Three-line strip at the bottom of the body for the filter input
pub fn filter_bar_area(body: Rect) -> Rect {
    let height = body.height.min(3);
    Rect {
        y: body.bottom().saturating_sub(height),
        height,
        ..body
    }
}

/// Create a centered modal area
pub fn centered_modal(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height.min(80)) / 2),
            Constraint::Length(height),
            Constraint::Percentage((100 - height.min(80)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
