use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::panel::PanelName;
use crate::ui::Theme;

/// Header component with title, focused panel and task activity
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, focus: PanelName, running_tasks: usize) {
        use crate::ui::layout::header_layout;

        let (title_area, status_area) = header_layout(area);

        // Title
        let title = Paragraph::new(" dockdeck ")
            .style(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        let task_color = if running_tasks > 0 {
            Theme::YELLOW
        } else {
            Theme::GREEN
        };

        let spans = vec![
            Span::styled("PANEL ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(focus.as_str(), Style::default().fg(Theme::LAVENDER)),
            Span::styled(" │ ", Style::default().fg(Theme::BORDER)),
            Span::styled("TASKS ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(
                format!("{} running", running_tasks),
                Style::default().fg(task_color),
            ),
            Span::raw(" "),
        ];

        let status_widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
        frame.render_widget(status_widget, status_area);
    }
}
