use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::components::text_input::{EditOutcome, Editable, TextInput};
use crate::panel::PanelName;
use crate::ui::Theme;

/// Case-insensitive substring match; an empty query matches everything
pub fn matches(query: &str, label: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    label.to_lowercase().contains(&query.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    None,
    /// Text changed; re-filter the target now
    Changed(String),
    /// Keep this text as the panel's filter
    Commit(String),
    /// Drop the filter entirely
    Reset,
}

/// Live filter input for one list panel
#[derive(Debug, Clone)]
pub struct FilterBar {
    pub target: PanelName,
    input: TextInput,
}

impl FilterBar {
    pub fn new(target: PanelName, current: &str) -> Self {
        Self {
            target,
            input: TextInput::new(current),
        }
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FilterEvent {
        match key.code {
            KeyCode::Enter => FilterEvent::Commit(self.query().to_string()),
            KeyCode::Esc => FilterEvent::Reset,
            _ => match self.edit(&key) {
                EditOutcome::Changed => FilterEvent::Changed(self.query().to_string()),
                EditOutcome::Moved | EditOutcome::Ignored => FilterEvent::None,
            },
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, match_count: usize, total_count: usize) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" filter {} ", self.target.as_str()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::CYAN))
            .style(Style::default().bg(Theme::BG_DARK));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = vec![Span::styled(
            " / ",
            Style::default().fg(Theme::CYAN).add_modifier(Modifier::BOLD),
        )];
        spans.extend(self.input.spans(true));
        spans.push(Span::styled(
            format!("  ({}/{})", match_count, total_count),
            Style::default().fg(Theme::FG_DARK),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

impl Editable for FilterBar {
    fn edit(&mut self, key: &KeyEvent) -> EditOutcome {
        self.input.edit(key)
    }
}
