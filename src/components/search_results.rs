use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::Clear};

use crate::action::Action;
use crate::components::row_table::RowTable;
use crate::docker::SearchResult;
use crate::models::{SearchRow, SEARCH_COLUMNS};
use crate::ui::centered_modal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    None,
    /// Pull the chosen repository
    Pull(String),
    Close,
}

/// Docker Hub hits for one search term
pub struct SearchResults {
    pub term: String,
    table: RowTable<SearchRow>,
}

impl SearchResults {
    pub fn new(term: impl Into<String>, results: &[SearchResult]) -> Self {
        let mut table = RowTable::new(SEARCH_COLUMNS);
        table.set_rows(results.iter().map(SearchRow::from_result).collect());
        Self {
            term: term.into(),
            table,
        }
    }

    pub fn rows(&self) -> &[SearchRow] {
        self.table.rows()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SearchEvent {
        let action = match key.code {
            KeyCode::Enter => {
                return match self.table.selected() {
                    Some(row) => SearchEvent::Pull(row.name.clone()),
                    None => SearchEvent::None,
                };
            }
            KeyCode::Esc | KeyCode::Char('q') => return SearchEvent::Close,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Char('g') => Action::Top,
            KeyCode::Char('G') => Action::Bottom,
            _ => return SearchEvent::None,
        };
        self.table.navigate(action);
        SearchEvent::None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_modal(area, 80, 16);
        frame.render_widget(Clear, modal_area);

        let title = format!("Search: {}", self.term);
        self.table.render(frame, modal_area, &title, true);
    }
}
