use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::error::AppResult;
use crate::panel::PanelName;
use crate::ui::{centered_modal, Theme};

/// Guarded action behind a confirmation
pub type ConfirmFn = Box<dyn FnOnce(&mut App) -> AppResult<()> + Send>;

/// Yes/no gate for destructive actions
pub struct ConfirmModal {
    pub message: String,
    pub return_to: PanelName,
    on_yes: Option<ConfirmFn>,
}

impl ConfirmModal {
    pub fn new<F>(message: impl Into<String>, return_to: PanelName, on_yes: F) -> Self
    where
        F: FnOnce(&mut App) -> AppResult<()> + Send + 'static,
    {
        Self {
            message: message.into(),
            return_to,
            on_yes: Some(Box::new(on_yes)),
        }
    }

    /// The guarded action; can only be taken once
    pub fn take_on_yes(&mut self) -> Option<ConfirmFn> {
        self.on_yes.take()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_modal(area, 50, 8);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let text = vec![
            Line::raw(""),
            Line::styled(self.message.as_str(), Style::default().fg(Theme::FG)),
            Line::raw(""),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  y/Enter ", Style::default().fg(Theme::GREEN)),
                Span::raw("Confirm    "),
                Span::styled("n/Esc ", Style::default().fg(Theme::RED)),
                Span::raw("Cancel"),
            ]),
        ];

        let block = Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, modal_area);
    }
}
