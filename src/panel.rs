//! Focusable panels, their key bindings and the registry that owns them.

use std::future::Future;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tracing::warn;

use crate::action::Action;
use crate::app::App;
use crate::components::{ContainerList, DetailView, ImageList, TaskList};
use crate::docker::{Backend, BackendError};
use crate::render_loop::Updater;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelName {
    Images,
    Containers,
    Tasks,
    Detail,
}

impl PanelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Containers => "containers",
            Self::Tasks => "tasks",
            Self::Detail => "detail",
        }
    }

    /// Tab order; the detail view is never a Tab stop
    pub fn next(&self) -> Self {
        match self {
            Self::Images => Self::Containers,
            Self::Containers => Self::Tasks,
            Self::Tasks | Self::Detail => Self::Images,
        }
    }
}

/// Key combination a binding reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        // Shift is already part of the character
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }

    /// Short label for the status bar
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::CONTROL) => {
                c.to_ascii_uppercase().to_string()
            }
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("^{}", key)
        } else {
            key
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: KeyBinding,
    pub action: Action,
    /// Shown in the status bar when set
    pub desc: Option<&'static str>,
}

impl Binding {
    pub fn new(key: KeyBinding, action: Action, desc: &'static str) -> Self {
        Self {
            key,
            action,
            desc: Some(desc),
        }
    }

    pub fn hidden(key: KeyBinding, action: Action) -> Self {
        Self {
            key,
            action,
            desc: None,
        }
    }
}

/// Cursor movement shared by every list panel
pub fn nav_bindings() -> Vec<Binding> {
    vec![
        Binding::hidden(KeyBinding::key(KeyCode::Up), Action::Up),
        Binding::hidden(KeyBinding::key(KeyCode::Down), Action::Down),
        Binding::hidden(KeyBinding::char('k'), Action::Up),
        Binding::hidden(KeyBinding::char('j'), Action::Down),
        Binding::hidden(KeyBinding::char('g'), Action::Top),
        Binding::hidden(KeyBinding::char('G'), Action::Bottom),
    ]
}

/// What a panel needs to fetch its rows without touching the app
pub struct PanelContext {
    pub backend: Arc<dyn Backend>,
    pub updater: Updater<App>,
}

impl PanelContext {
    /// Run `fetch` on a worker and hand the result, stamped with `generation`,
    /// to `apply` on the render loop. A failed fetch opens an error overlay instead.
    pub fn spawn_refresh<T, F, Fut>(
        &self,
        name: PanelName,
        generation: u64,
        fetch: F,
        apply: fn(&mut App, u64, T),
    ) where
        T: Send + 'static,
        F: FnOnce(Arc<dyn Backend>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, BackendError>> + Send + 'static,
    {
        let backend = self.backend.clone();
        let updater = self.updater.clone();
        tokio::spawn(async move {
            let result = fetch(backend).await;
            updater.submit(move |app: &mut App| {
                match result {
                    Ok(rows) => apply(app, generation, rows),
                    Err(e) => {
                        warn!(panel = name.as_str(), generation, error = %e, "refresh failed");
                        app.show_error(e.into());
                    }
                }
                Ok(())
            });
        });
    }
}

pub trait Panel {
    fn name(&self) -> PanelName;

    fn key_bindings(&self) -> Vec<Binding>;

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Re-fetch rows from the backend; the result arrives through the render loop
    fn refresh(&mut self, _ctx: &PanelContext) {}

    fn navigate(&mut self, action: Action);

    fn set_filter(&mut self, _filter: &str) {}

    fn filter(&self) -> &str {
        ""
    }

    /// (visible, total) rows
    fn row_counts(&self) -> (usize, usize) {
        (0, 0)
    }
}

/// Every panel of the app, one field per `PanelName`
pub struct PanelRegistry {
    pub images: ImageList,
    pub containers: ContainerList,
    pub tasks: TaskList,
    pub detail: DetailView,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            images: ImageList::new(),
            containers: ContainerList::new(),
            tasks: TaskList::new(),
            detail: DetailView::new(),
        }
    }

    pub fn get(&self, name: PanelName) -> &dyn Panel {
        match name {
            PanelName::Images => &self.images,
            PanelName::Containers => &self.containers,
            PanelName::Tasks => &self.tasks,
            PanelName::Detail => &self.detail,
        }
    }

    pub fn get_mut(&mut self, name: PanelName) -> &mut dyn Panel {
        match name {
            PanelName::Images => &mut self.images,
            PanelName::Containers => &mut self.containers,
            PanelName::Tasks => &mut self.tasks,
            PanelName::Detail => &mut self.detail,
        }
    }
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
