use ratatui::prelude::*;

use crate::models::{ContainerStatus, TaskStatus};

/// Catppuccin Mocha color theme
/// https://github.com/catppuccin/catppuccin
pub struct Theme;

impl Theme {
    pub const CRUST: Color = Color::Rgb(17, 17, 27);          // #11111b - Crust (darkest)

    pub const BG: Color = Self::CRUST;
    pub const BG_DARK: Color = Color::Rgb(12, 12, 20);        // Even darker for modals
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);       // #313244 - Surface0
    pub const FG: Color = Color::Rgb(205, 214, 244);          // #cdd6f4 - Text
    pub const FG_DARK: Color = Color::Rgb(147, 153, 178);     // #9399b2 - Subtext1
    pub const OVERLAY: Color = Color::Rgb(127, 132, 156);     // #7f849c - Overlay1

    pub const MAUVE: Color = Color::Rgb(203, 166, 247);       // #cba6f7
    pub const RED: Color = Color::Rgb(243, 139, 168);         // #f38ba8
    pub const PEACH: Color = Color::Rgb(250, 179, 135);       // #fab387
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);      // #f9e2af
    pub const GREEN: Color = Color::Rgb(166, 227, 161);       // #a6e3a1
    pub const TEAL: Color = Color::Rgb(148, 226, 213);        // #94e2d5
    pub const BLUE: Color = Color::Rgb(137, 180, 250);        // #89b4fa
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);    // #b4befe

    // Semantic aliases
    pub const CYAN: Color = Self::TEAL;

    // UI elements
    pub const BORDER: Color = Self::SURFACE0;
    pub const BORDER_FOCUSED: Color = Self::MAUVE;
    pub const SELECTION_BG: Color = Self::SURFACE0;
    pub const SELECTION_FG: Color = Self::LAVENDER;

    // Status colors
    pub const RUNNING: Color = Self::GREEN;
    pub const EXITED: Color = Self::RED;
    pub const PAUSED: Color = Self::YELLOW;
    pub const CREATED: Color = Self::PEACH;

    // Modal
    pub const MODAL_BG: Color = Self::BG_DARK;
    pub const MODAL_BORDER: Color = Self::MAUVE;

    // Keybinding bar
    pub const KEY_BG: Color = Self::MAUVE;
    pub const KEY_FG: Color = Self::BG_DARK;
}

/// Get the color for a container status
pub fn status_color(status: &ContainerStatus) -> Color {
    match status {
        ContainerStatus::Running => Theme::RUNNING,
        ContainerStatus::Exited => Theme::EXITED,
        ContainerStatus::Paused => Theme::PAUSED,
        ContainerStatus::Created => Theme::CREATED,
        ContainerStatus::Restarting => Theme::YELLOW,
        ContainerStatus::Removing | ContainerStatus::Dead => Theme::RED,
        ContainerStatus::Unknown => Theme::OVERLAY,
    }
}

/// Get the color for a task status
pub fn task_color(status: &TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Theme::OVERLAY,
        TaskStatus::Running => Theme::YELLOW,
        TaskStatus::Done => Theme::GREEN,
        TaskStatus::Failed(_) => Theme::RED,
    }
}

/// Create a style for selected items
pub fn selected_style() -> Style {
    Style::default()
        .bg(Theme::SELECTION_BG)
        .fg(Theme::SELECTION_FG)
        .add_modifier(Modifier::BOLD)
}

/// Create a style for borders
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Theme::BORDER_FOCUSED)
    } else {
        Style::default().fg(Theme::BORDER)
    }
}

/// Create a style for panel titles
pub fn title_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::OVERLAY)
    }
}

/// Create a keybinding span (highlighted key)
pub fn key_span(key: &str) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .bg(Theme::KEY_BG)
            .fg(Theme::KEY_FG)
            .add_modifier(Modifier::BOLD),
    )
}

/// Create a keybinding description span (with trailing separator)
pub fn key_desc_span(desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {}   ", desc),  // Space before, triple space after
        Style::default().fg(Theme::FG_DARK),
    )
}
