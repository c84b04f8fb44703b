use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::panel::PanelName;
use crate::ui::{centered_modal, Theme};

/// Dismiss-only error message
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorModal {
    pub message: String,
    pub return_to: PanelName,
}

impl ErrorModal {
    pub fn new(message: impl Into<String>, return_to: PanelName) -> Self {
        Self {
            message: message.into(),
            return_to,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_modal(area, 60, 8);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" Error ")
            .title_style(Style::default().fg(Theme::RED).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::RED))
            .style(Style::default().bg(Theme::MODAL_BG));

        let text = vec![
            Line::raw(""),
            Line::styled(self.message.as_str(), Style::default().fg(Theme::FG)),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Enter/Esc ", Style::default().fg(Theme::BLUE)),
                Span::styled("close", Style::default().fg(Theme::FG_DARK)),
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, modal_area);
    }
}

/// Progress message shown while an inline backend call runs.
/// Not dismissible; the call's continuation closes it.
#[derive(Debug, Clone, PartialEq)]
pub struct StateModal {
    pub id: u64,
    pub message: String,
}

impl StateModal {
    pub fn new(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_modal(area, 40, 3);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::YELLOW))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(Line::styled(
            self.message.as_str(),
            Style::default().fg(Theme::YELLOW).add_modifier(Modifier::BOLD),
        ))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, modal_area);
    }
}
