//! Modal overlays layered over the panels.
//!
//! At most one overlay is visible. While it is, keys go to it and not to the
//! focused panel. Overlays opened while another is visible wait in line and
//! appear, in order, as the visible one closes.

use std::collections::VecDeque;

use crate::components::{ConfirmModal, ErrorModal, FilterBar, Form, SearchResults, StateModal};

pub enum Overlay {
    Form(Form),
    Error(ErrorModal),
    State(StateModal),
    Confirm(ConfirmModal),
    Filter(FilterBar),
    Search(SearchResults),
}

impl Overlay {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Form(_) => "form",
            Self::Error(_) => "error",
            Self::State(_) => "state",
            Self::Confirm(_) => "confirm",
            Self::Filter(_) => "filter",
            Self::Search(_) => "search",
        }
    }

    fn is_same_error(&self, other: &Overlay) -> bool {
        matches!((self, other), (Self::Error(a), Self::Error(b)) if a.message == b.message)
    }
}

#[derive(Default)]
pub struct OverlayStack {
    visible: Option<Overlay>,
    waiting: VecDeque<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.visible.is_some()
    }

    pub fn visible(&self) -> Option<&Overlay> {
        self.visible.as_ref()
    }

    pub fn visible_mut(&mut self) -> Option<&mut Overlay> {
        self.visible.as_mut()
    }

    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Show `overlay`, or queue it behind the visible one.
    /// An error identical to one already shown or queued is dropped.
    pub fn open(&mut self, overlay: Overlay) {
        let duplicate = self
            .visible
            .iter()
            .chain(self.waiting.iter())
            .any(|o| o.is_same_error(&overlay));
        if duplicate {
            return;
        }

        if self.visible.is_none() {
            self.visible = Some(overlay);
        } else {
            self.waiting.push_back(overlay);
        }
    }

    /// Take the visible overlay down and promote the next waiting one
    pub fn close(&mut self) -> Option<Overlay> {
        let closed = self.visible.take();
        self.visible = self.waiting.pop_front();
        closed
    }

    /// Remove the progress message `id` wherever it is. Returns whether it was found.
    pub fn close_state(&mut self, id: u64) -> bool {
        if matches!(&self.visible, Some(Overlay::State(s)) if s.id == id) {
            self.close();
            return true;
        }
        let before = self.waiting.len();
        self.waiting
            .retain(|o| !matches!(o, Overlay::State(s) if s.id == id));
        before != self.waiting.len()
    }
}
