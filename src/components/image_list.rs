use crossterm::event::KeyCode;
use ratatui::prelude::*;
use tracing::debug;

use crate::action::Action;
use crate::app::App;
use crate::components::row_table::RowTable;
use crate::docker::ImageSummary;
use crate::models::{ImageRow, IMAGE_COLUMNS};
use crate::panel::{nav_bindings, Binding, KeyBinding, Panel, PanelContext, PanelName};

/// Image list panel
pub struct ImageList {
    pub table: RowTable<ImageRow>,
}

impl ImageList {
    pub fn new() -> Self {
        Self {
            table: RowTable::new(IMAGE_COLUMNS),
        }
    }

    pub fn set_images(&mut self, images: &[ImageSummary]) {
        self.table.set_rows(ImageRow::from_summaries(images));
    }

    /// Rows from refresh `generation`; stale results are dropped
    pub fn apply_images(&mut self, generation: u64, images: &[ImageSummary]) {
        if !self
            .table
            .apply_refresh(generation, ImageRow::from_summaries(images))
        {
            debug!(generation, "dropping stale image list");
        }
    }

    pub fn selected(&self) -> Option<&ImageRow> {
        self.table.selected()
    }

    pub fn rows(&self) -> &[ImageRow] {
        self.table.rows()
    }
}

impl Default for ImageList {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ImageList {
    fn name(&self) -> PanelName {
        PanelName::Images
    }

    fn key_bindings(&self) -> Vec<Binding> {
        let mut bindings = vec![
            Binding::new(KeyBinding::key(KeyCode::Enter), Action::InspectImage, "inspect"),
            Binding::hidden(KeyBinding::char('o'), Action::InspectImage),
            Binding::new(KeyBinding::char('c'), Action::ShowCreateContainer, "create"),
            Binding::new(KeyBinding::char('p'), Action::ShowPullImage, "pull"),
            Binding::new(KeyBinding::char('d'), Action::RemoveImage, "remove"),
            Binding::new(KeyBinding::ctrl('d'), Action::RemoveDanglingImages, "prune"),
            Binding::new(KeyBinding::char('s'), Action::ShowSaveImage, "save"),
            Binding::new(KeyBinding::char('i'), Action::ShowImportImage, "import"),
            Binding::new(KeyBinding::ctrl('l'), Action::ShowLoadImage, "load"),
            Binding::new(KeyBinding::ctrl('f'), Action::ShowSearchImage, "search"),
            Binding::new(KeyBinding::ctrl('r'), Action::Refresh, "refresh"),
            Binding::new(KeyBinding::char('f'), Action::ShowFilter, "filter"),
        ];
        bindings.extend(nav_bindings());
        bindings
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.table.render(frame, area, "Images", focused);
    }

    fn refresh(&mut self, ctx: &PanelContext) {
        ctx.spawn_refresh(
            PanelName::Images,
            self.table.begin_refresh(),
            |backend| async move { backend.list_images().await },
            |app: &mut App, generation: u64, images: Vec<ImageSummary>| {
                app.panels.images.apply_images(generation, &images)
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
