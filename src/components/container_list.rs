use crossterm::event::KeyCode;
use ratatui::prelude::*;
use tracing::debug;

use crate::action::Action;
use crate::app::App;
use crate::components::row_table::RowTable;
use crate::docker::ContainerSummary;
use crate::models::{ContainerRow, CONTAINER_COLUMNS};
use crate::panel::{nav_bindings, Binding, KeyBinding, Panel, PanelContext, PanelName};

/// Container list panel
pub struct ContainerList {
    pub table: RowTable<ContainerRow>,
}

impl ContainerList {
    pub fn new() -> Self {
        Self {
            table: RowTable::new(CONTAINER_COLUMNS),
        }
    }

    pub fn set_containers(&mut self, containers: &[ContainerSummary]) {
        self.table
            .set_rows(containers.iter().map(ContainerRow::from_summary).collect());
    }

    /// Rows from refresh `generation`; stale results are dropped
    pub fn apply_containers(&mut self, generation: u64, containers: &[ContainerSummary]) {
        let rows = containers.iter().map(ContainerRow::from_summary).collect();
        if !self.table.apply_refresh(generation, rows) {
            debug!(generation, "dropping stale container list");
        }
    }

    pub fn selected(&self) -> Option<&ContainerRow> {
        self.table.selected()
    }

    pub fn rows(&self) -> &[ContainerRow] {
        self.table.rows()
    }
}

impl Default for ContainerList {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ContainerList {
    fn name(&self) -> PanelName {
        PanelName::Containers
    }

    fn key_bindings(&self) -> Vec<Binding> {
        let mut bindings = vec![
            Binding::new(KeyBinding::key(KeyCode::Enter), Action::InspectContainer, "inspect"),
            Binding::hidden(KeyBinding::char('o'), Action::InspectContainer),
            Binding::new(KeyBinding::char('d'), Action::RemoveContainer, "remove"),
            Binding::new(KeyBinding::ctrl('r'), Action::Refresh, "refresh"),
            Binding::new(KeyBinding::char('f'), Action::ShowFilter, "filter"),
        ];
        bindings.extend(nav_bindings());
        bindings
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.table.render(frame, area, "Containers", focused);
    }

    fn refresh(&mut self, ctx: &PanelContext) {
        ctx.spawn_refresh(
            PanelName::Containers,
            self.table.begin_refresh(),
            |backend| async move { backend.list_containers().await },
            |app: &mut App, generation: u64, containers: Vec<ContainerSummary>| {
                app.panels.containers.apply_containers(generation, &containers)
            },
        );
    }

    fn navigate(&mut self, action: Action) {
        self.table.navigate(action);
    }

    fn set_filter(&mut self, filter: &str) {
        self.table.set_filter(filter);
    }

    fn filter(&self) -> &str {
        self.table.filter()
    }

    fn row_counts(&self) -> (usize, usize) {
        (self.table.rows().len(), self.table.total())
    }
}
