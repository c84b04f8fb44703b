use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::action::Action;
use crate::components::filter_bar::matches;
use crate::models::ListRow;
use crate::ui::columns::{column_widths, Column};
use crate::ui::{border_style, selected_style, title_style, Theme};

/// Row set of a list panel with its filter and selection.
///
/// `set_rows` replaces everything the backend returned; the visible rows are
/// re-derived from it whenever the rows or the filter change.
pub struct RowTable<R> {
    columns: &'static [Column],
    all: Vec<R>,
    visible: Vec<R>,
    filter: String,
    /// Newest refresh handed out / newest refresh whose rows were applied
    issued: u64,
    applied: u64,
    pub state: TableState,
}

impl<R: ListRow> RowTable<R> {
    pub fn new(columns: &'static [Column]) -> Self {
        let mut state = TableState::default();
        state.select(Some(0));
        Self {
            columns,
            all: Vec::new(),
            visible: Vec::new(),
            filter: String::new(),
            issued: 0,
            applied: 0,
            state,
        }
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.all = rows;
        self.rederive();
    }

    /// Stamp a new refresh. Its rows are applied only if nothing newer landed first.
    pub fn begin_refresh(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Apply rows fetched by refresh `generation`. Returns false, leaving the
    /// rows untouched, when a newer refresh has already been applied.
    pub fn apply_refresh(&mut self, generation: u64, rows: Vec<R>) -> bool {
        if generation <= self.applied {
            return false;
        }
        self.applied = generation;
        self.set_rows(rows);
        true
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.rederive();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Rows that pass the filter, in backend order
    pub fn rows(&self) -> &[R] {
        &self.visible
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn selected(&self) -> Option<&R> {
        self.state.selected().and_then(|i| self.visible.get(i))
    }

    fn rederive(&mut self) {
        self.visible = self
            .all
            .iter()
            .filter(|row| matches(&self.filter, &row.filter_label()))
            .cloned()
            .collect();

        // Keep the selection inside the list
        match (self.visible.len(), self.state.selected()) {
            (0, _) => self.state.select(None),
            (len, Some(i)) if i >= len => self.state.select(Some(len - 1)),
            (_, None) => self.state.select(Some(0)),
            _ => {}
        }
    }

    /// Move selection up
    pub fn previous(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Move selection down
    pub fn next(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn top(&mut self) {
        if !self.visible.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn bottom(&mut self) {
        if !self.visible.is_empty() {
            self.state.select(Some(self.visible.len() - 1));
        }
    }

    pub fn navigate(&mut self, action: Action) {
        match action {
            Action::Up => self.previous(),
            Action::Down => self.next(),
            Action::Top => self.top(),
            Action::Bottom => self.bottom(),
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let widths = column_widths(self.columns, area.width.saturating_sub(2));

        let header = Row::new(
            self.columns
                .iter()
                .map(|c| Cell::from(c.label))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .visible
            .iter()
            .map(|r| Row::new(r.cells()).style(Style::default().fg(r.color())))
            .collect();

        let title = if self.filter.is_empty() {
            format!(" {} ({}) ", title, self.all.len())
        } else {
            format!(
                " {} ({}/{}) [{}] ",
                title,
                self.visible.len(),
                self.all.len(),
                self.filter
            )
        };

        let table = Table::new(rows, widths.into_iter().map(Constraint::Length))
            .header(header)
            .column_spacing(0)
            .block(
                Block::default()
                    .title(title)
                    .title_style(title_style(focused))
                    .borders(Borders::ALL)
                    .border_style(border_style(focused)),
            )
            .row_highlight_style(selected_style());

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
