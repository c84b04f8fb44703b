mod containers;
mod images;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::action::Action;
use crate::components::{
    ConfirmModal, ErrorModal, FilterBar, FilterEvent, Form, FormEvent, Header, SearchEvent,
    StateModal, StatusBar,
};
use crate::config::Config;
use crate::docker::{Backend, BackendError};
use crate::error::{AppError, AppResult};
use crate::models::image::parse_pull_target;
use crate::models::{Task, TaskId};
use crate::overlay::{Overlay, OverlayStack};
use crate::panel::{Binding, KeyBinding, Panel, PanelContext, PanelName, PanelRegistry};
use crate::render_loop::Updater;
use crate::task_queue::TaskQueue;
use crate::ui::{filter_bar_area, main_layout, panels_layout};

/// Bindings that work whichever panel has focus
fn global_bindings() -> Vec<Binding> {
    vec![
        Binding::new(KeyBinding::key(KeyCode::Tab), Action::NextPanel, "next"),
        Binding::new(KeyBinding::char('q'), Action::Quit, "quit"),
        Binding::hidden(KeyBinding::ctrl('c'), Action::Quit),
    ]
}

/// Main application state. Owned by the main loop; everything else reaches
/// it through the render loop's `Updater`.
pub struct App {
    backend: Arc<dyn Backend>,
    updater: Updater<App>,

    pub panels: PanelRegistry,
    focus: PanelName,
    bindings: HashMap<KeyBinding, Action>,
    global: HashMap<KeyBinding, Action>,

    pub overlays: OverlayStack,
    task_queue: TaskQueue,
    next_state_id: u64,

    refresh_interval: Duration,
    pub should_quit: bool,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, updater: Updater<App>, config: &Config) -> Self {
        let mut app = Self {
            backend,
            task_queue: TaskQueue::new(config.task_workers(), updater.clone()),
            updater,
            panels: PanelRegistry::new(),
            focus: PanelName::Images,
            bindings: HashMap::new(),
            global: global_bindings()
                .into_iter()
                .map(|b| (b.key, b.action))
                .collect(),
            overlays: OverlayStack::new(),
            next_state_id: 0,
            refresh_interval: config.refresh_interval(),
            should_quit: false,
        };
        app.install_bindings(PanelName::Images);
        app
    }

    /// Initial fetch of both lists, then one refresh timer per list
    pub fn start(&mut self) {
        for name in [PanelName::Images, PanelName::Containers] {
            self.refresh(name);
            self.spawn_refresh_timer(name);
        }
    }

    fn spawn_refresh_timer(&self, name: PanelName) {
        let updater = self.updater.clone();
        let period = self.refresh_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick fires immediately; `start` already refreshed
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let submitted = updater.submit(move |app: &mut App| {
                    app.refresh(name);
                    Ok(())
                });
                if !submitted {
                    break;
                }
            }
            debug!(panel = name.as_str(), "refresh timer stopped");
        });
    }

    fn panel_context(&self) -> PanelContext {
        PanelContext {
            backend: self.backend.clone(),
            updater: self.updater.clone(),
        }
    }

    pub fn refresh(&mut self, name: PanelName) {
        let ctx = self.panel_context();
        let panel = self.panels.get_mut(name);
        debug!(panel = panel.name().as_str(), "refresh");
        panel.refresh(&ctx);
    }

    pub fn focus(&self) -> PanelName {
        self.focus
    }

    /// Number of bindings installed for the focused panel
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Move focus to `name` and install its key bindings. Idempotent.
    pub fn switch_to(&mut self, name: PanelName) {
        if self.focus == name {
            return;
        }
        debug!(from = self.focus.as_str(), to = name.as_str(), "switch panel");
        self.focus = name;
        self.install_bindings(name);
    }

    fn install_bindings(&mut self, name: PanelName) {
        self.bindings = self
            .panels
            .get(name)
            .key_bindings()
            .into_iter()
            .map(|b| (b.key, b.action))
            .collect();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<()> {
        if self.overlays.is_open() {
            return self.handle_overlay_key(key);
        }

        let binding = KeyBinding::from_event(&key);
        let action = self
            .global
            .get(&binding)
            .or_else(|| self.bindings.get(&binding))
            .copied();

        match action {
            Some(action) => self.handle_action(action),
            None => Ok(()),
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> AppResult<()> {
        let Some(overlay) = self.overlays.visible_mut() else {
            return Ok(());
        };

        match overlay {
            Overlay::Form(form) => match form.handle_key(key) {
                FormEvent::Trigger(action) => self.handle_action(action),
                FormEvent::Cancel => self.close_form(),
                FormEvent::None => Ok(()),
            },
            Overlay::Error(modal) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    let return_to = modal.return_to;
                    self.overlays.close();
                    self.switch_to(return_to);
                }
                Ok(())
            }
            // Input is suspended until the backend call finishes
            Overlay::State(_) => Ok(()),
            Overlay::Confirm(modal) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let on_yes = modal.take_on_yes();
                    let return_to = modal.return_to;
                    self.overlays.close();
                    self.switch_to(return_to);
                    match on_yes {
                        Some(on_yes) => {
                            let result = on_yes(self);
                            self.funnel(result)
                        }
                        None => Err(AppError::invariant("confirm callback already taken")),
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    let return_to = modal.return_to;
                    self.overlays.close();
                    self.switch_to(return_to);
                    Ok(())
                }
                _ => Ok(()),
            },
            Overlay::Filter(bar) => {
                let target = bar.target;
                match bar.handle_key(key) {
                    FilterEvent::Changed(query) => {
                        self.panels.get_mut(target).set_filter(&query);
                    }
                    FilterEvent::Commit(query) => {
                        self.overlays.close();
                        let panel = self.panels.get_mut(target);
                        panel.set_filter(&query);
                        panel.navigate(Action::Top);
                        self.switch_to(target);
                    }
                    FilterEvent::Reset => {
                        self.overlays.close();
                        self.panels.get_mut(target).set_filter("");
                        self.switch_to(target);
                    }
                    FilterEvent::None => {}
                }
                Ok(())
            }
            Overlay::Search(results) => match results.handle_key(key) {
                SearchEvent::Pull(name) => {
                    self.overlays.close();
                    let (repository, tag) = parse_pull_target(&name);
                    let result = self.queue_pull(repository, tag).map(|_| ());
                    self.funnel(result)
                }
                SearchEvent::Close => {
                    self.overlays.close();
                    Ok(())
                }
                SearchEvent::None => Ok(()),
            },
        }
    }

    /// Execute an action and route its failure: validation errors go on the
    /// open form, other recoverable errors to an error overlay. Invariant
    /// violations are returned.
    pub fn handle_action(&mut self, action: Action) -> AppResult<()> {
        let result = self.dispatch(action);
        self.funnel(result)
    }

    fn funnel(&mut self, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(AppError::Validation { field, message }) => {
                debug!(field = %field, message = %message, "validation failed");
                if let Some(Overlay::Form(form)) = self.overlays.visible_mut() {
                    form.set_error(message);
                    return Ok(());
                }
                self.show_error(AppError::Validation { field, message });
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                self.show_error(e);
                Ok(())
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> AppResult<()> {
        match action {
            Action::Up | Action::Down | Action::Top | Action::Bottom => {
                self.panels.get_mut(self.focus).navigate(action);
                Ok(())
            }
            Action::NextPanel => {
                self.switch_to(self.focus.next());
                Ok(())
            }
            Action::Refresh => {
                self.refresh(self.focus);
                Ok(())
            }
            Action::ShowFilter => self.open_filter(),
            Action::CloseForm => self.close_form(),
            Action::CloseDetail => {
                self.switch_to(self.panels.detail.return_to);
                Ok(())
            }
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }

            Action::InspectImage => self.inspect_image(),
            Action::ShowCreateContainer => self.show_create_container(),
            Action::CreateContainer => self.create_container(),
            Action::ShowPullImage => self.show_pull_image(),
            Action::PullImage => self.pull_image(),
            Action::RemoveImage => self.remove_image(),
            Action::RemoveDanglingImages => self.remove_dangling_images(),
            Action::ShowSaveImage => self.show_save_image(),
            Action::SaveImage => self.save_image(),
            Action::ShowImportImage => self.show_import_image(),
            Action::ImportImage => self.import_image(),
            Action::ShowLoadImage => self.show_load_image(),
            Action::LoadImage => self.load_image(),
            Action::ShowSearchImage => self.show_search_image(),
            Action::SearchImage => self.search_image(),

            Action::InspectContainer => self.inspect_container(),
            Action::RemoveContainer => self.remove_container(),
        }
    }

    /// Open an error overlay that returns focus to the current panel
    pub fn show_error(&mut self, error: AppError) {
        warn!(error = %error, "showing error");
        self.overlays
            .open(Overlay::Error(ErrorModal::new(error.to_string(), self.focus)));
    }

    /// Ask before running `on_yes`
    pub fn confirm<F>(&mut self, message: &str, on_yes: F)
    where
        F: FnOnce(&mut App) -> AppResult<()> + Send + 'static,
    {
        self.overlays.open(Overlay::Confirm(ConfirmModal::new(
            message,
            self.focus,
            on_yes,
        )));
    }

    pub fn open_form(&mut self, form: Form) {
        self.overlays.open(Overlay::Form(form));
    }

    pub fn visible_form(&self) -> AppResult<&Form> {
        match self.overlays.visible() {
            Some(Overlay::Form(form)) => Ok(form),
            _ => Err(AppError::invariant("no form is open")),
        }
    }

    /// Drop the visible form and run its close callback once
    pub fn close_form(&mut self) -> AppResult<()> {
        let on_close = match self.overlays.visible_mut() {
            Some(Overlay::Form(form)) => form.take_on_close(),
            _ => return Err(AppError::invariant("no form to close")),
        };
        self.overlays.close();
        match on_close {
            Some(on_close) => on_close(self),
            None => Ok(()),
        }
    }

    fn open_filter(&mut self) -> AppResult<()> {
        let target = self.focus;
        let current = self.panels.get(target).filter().to_string();
        self.overlays
            .open(Overlay::Filter(FilterBar::new(target, &current)));
        Ok(())
    }

    /// Queue `work` as a visible task.
    ///
    /// The task is recorded, marked running, and its outcome lands back on the
    /// task list through the render loop.
    pub fn add_task<F, Fut>(&mut self, label: impl Into<String>, work: F) -> AppResult<TaskId>
    where
        F: FnOnce(PanelContext) -> Fut,
        Fut: Future<Output = Result<(), BackendError>> + Send + 'static,
    {
        let id = self.panels.tasks.push(Task::new(label));
        self.panels.tasks.start(id)?;
        self.task_queue.submit(id, work(self.panel_context()));
        Ok(id)
    }

    /// Run a short backend call behind a progress message.
    ///
    /// The message stays up, suspending input, until the call returns. The
    /// continuation then closes it and either runs `on_success` or shows the
    /// error.
    pub fn run_inline<T, F, Fut, S>(&mut self, message: &str, call: F, on_success: S)
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn Backend>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, BackendError>> + Send + 'static,
        S: FnOnce(&mut App, T) -> AppResult<()> + Send + 'static,
    {
        let id = self.next_state_id;
        self.next_state_id += 1;
        self.overlays
            .open(Overlay::State(StateModal::new(id, message)));

        let backend = self.backend.clone();
        let updater = self.updater.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(call(backend)).await {
                Ok(result) => result,
                Err(e) => Err(BackendError::Aborted(e.to_string())),
            };

            updater.submit(move |app: &mut App| {
                if !app.overlays.close_state(id) {
                    return Err(AppError::invariant(format!(
                        "state message {} is not open",
                        id
                    )));
                }
                match result {
                    Ok(value) => {
                        let outcome = on_success(app, value);
                        app.funnel(outcome)
                    }
                    Err(e) => {
                        app.show_error(e.into());
                        Ok(())
                    }
                }
            });
        });
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let (header_area, body, footer) = main_layout(frame.area());

        Header::render(frame, header_area, self.focus, self.panels.tasks.running_count());

        if self.focus == PanelName::Detail {
            self.panels.detail.render(frame, body, true);
        } else {
            let (images, containers, tasks) = panels_layout(body);
            let focus = self.focus;
            for (name, area) in [
                (PanelName::Images, images),
                (PanelName::Containers, containers),
                (PanelName::Tasks, tasks),
            ] {
                let panel = self.panels.get_mut(name);
                let focused = panel.name() == focus;
                panel.render(frame, area, focused);
            }
        }

        let mut bindings = self.panels.get(self.focus).key_bindings();
        bindings.extend(global_bindings());
        StatusBar::render(frame, footer, self.overlays.visible(), &bindings);

        let area = frame.area();
        match self.overlays.visible_mut() {
            Some(Overlay::Form(form)) => form.render(frame, area),
            Some(Overlay::Error(modal)) => modal.render(frame, area),
            Some(Overlay::State(modal)) => modal.render(frame, area),
            Some(Overlay::Confirm(modal)) => modal.render(frame, area),
            Some(Overlay::Filter(bar)) => {
                let (matched, total) = self.panels.get(bar.target).row_counts();
                bar.render(frame, filter_bar_area(body), matched, total);
            }
            Some(Overlay::Search(results)) => results.render(frame, area),
            None => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::docker::fake::FakeBackend;
    use crate::models::TaskStatus;
    use crate::render_loop::RenderLoop;
    use crossterm::event::KeyModifiers;

    pub(crate) fn setup(backend: FakeBackend) -> (App, RenderLoop<App>, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let render_loop = RenderLoop::new();
        let app = App::new(backend.clone(), render_loop.updater(), &Config::default());
        (app, render_loop, backend)
    }

    /// Load the fake's images into the panel without a round trip
    pub(crate) fn load_images(app: &mut App, backend: &FakeBackend) {
        let images = backend.images.lock().unwrap().clone();
        app.panels.images.set_images(&images);
    }

    pub(crate) fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    pub(crate) fn press_ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap();
    }

    pub(crate) fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Run queued callbacks until `done` holds
    pub(crate) async fn pump_until(
        app: &mut App,
        render_loop: &mut RenderLoop<App>,
        done: impl Fn(&App) -> bool,
    ) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(app) {
                let callback = render_loop.recv().await.expect("render loop closed");
                callback(app).expect("callback failed");
            }
        })
        .await
        .expect("timed out waiting for the render loop");
    }

    pub(crate) fn visible_kind(app: &App) -> Option<&'static str> {
        app.overlays.visible().map(Overlay::kind)
    }

    pub(crate) fn error_text(app: &App) -> Option<String> {
        match app.overlays.visible() {
            Some(Overlay::Error(modal)) => Some(modal.message.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_switch_to_is_idempotent() {
        let (mut app, _loop, _backend) = setup(FakeBackend::default());
        let images = app.binding_count();

        app.switch_to(PanelName::Images);
        app.switch_to(PanelName::Images);
        assert_eq!(app.binding_count(), images);

        app.switch_to(PanelName::Tasks);
        app.switch_to(PanelName::Tasks);
        assert_eq!(app.focus(), PanelName::Tasks);
        assert_eq!(app.binding_count(), crate::panel::nav_bindings().len());

        app.switch_to(PanelName::Images);
        assert_eq!(app.binding_count(), images);
    }

    #[tokio::test]
    async fn test_tab_cycles_panels_and_q_quits() {
        let (mut app, _loop, _backend) = setup(FakeBackend::default());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), PanelName::Containers);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), PanelName::Tasks);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), PanelName::Images);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_keys_go_to_the_overlay_first() {
        let (mut app, _loop, _backend) = setup(FakeBackend::default());
        app.show_error(AppError::Selection("boom".into()));

        // Tab would switch panels without the overlay
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), PanelName::Images);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(!app.overlays.is_open());
    }

    #[tokio::test]
    async fn test_confirm_runs_exactly_once() {
        let (mut app, mut render_loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest", "ubuntu:20.04"]));
        load_images(&mut app, &backend);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(visible_kind(&app), Some("confirm"));
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.overlays.is_open());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| {
            !app.overlays.is_open() && app.panels.images.rows().len() == 1
        })
        .await;

        let removes: Vec<String> = backend
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("remove_image"))
            .collect();
        assert_eq!(removes, vec!["remove_image alpine:latest".to_string()]);
    }

    #[tokio::test]
    async fn test_task_done_and_refreshes_images() {
        let (mut app, mut render_loop, _backend) = setup(FakeBackend::default());

        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "alpine");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(!app.overlays.is_open());

        let task = &app.panels.tasks.tasks()[0];
        assert_eq!(task.label, "pull alpine:latest");
        assert_eq!(task.status, TaskStatus::Running);

        pump_until(&mut app, &mut render_loop, |app| {
            app.panels.tasks.tasks()[0].status.is_terminal() && !app.panels.images.rows().is_empty()
        })
        .await;
        assert_eq!(app.panels.tasks.tasks()[0].status, TaskStatus::Done);
        assert_eq!(app.panels.images.rows()[0].name(), "alpine:latest");
    }

    #[tokio::test]
    async fn test_task_failed_keeps_error() {
        let (mut app, mut render_loop, backend) = setup(FakeBackend::default());
        backend.fail("manifest unknown");

        let id = app
            .add_task("pull ghost:latest", |ctx| async move {
                ctx.backend.pull_image("ghost", "latest").await
            })
            .unwrap();

        pump_until(&mut app, &mut render_loop, |app| {
            app.panels.tasks.get(id).map_or(false, |t| t.status.is_terminal())
        })
        .await;
        assert_eq!(
            app.panels.tasks.get(id).unwrap().status,
            TaskStatus::Failed("manifest unknown".into())
        );
        // Task failures stay on the task list; no overlay
        assert!(!app.overlays.is_open());
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported_failed() {
        let (mut app, mut render_loop, _backend) = setup(FakeBackend::default());

        let id = app
            .add_task("explode", |_ctx| async move {
                if true {
                    panic!("worker blew up");
                }
                Ok(())
            })
            .unwrap();

        pump_until(&mut app, &mut render_loop, |app| {
            app.panels.tasks.get(id).map_or(false, |t| t.status.is_terminal())
        })
        .await;
        assert!(matches!(
            app.panels.tasks.get(id).unwrap().status,
            TaskStatus::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_state_overlay_closes_once_on_success() {
        let (mut app, mut render_loop, _backend) = setup(FakeBackend::default());

        app.run_inline(
            "working...",
            |_backend| async move { Ok::<i32, BackendError>(7) },
            |app, n: i32| {
                assert_eq!(n, 7);
                app.switch_to(PanelName::Tasks);
                Ok(())
            },
        );
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| app.focus() == PanelName::Tasks).await;
        assert!(!app.overlays.is_open());
        assert_eq!(app.overlays.waiting(), 0);
    }

    #[tokio::test]
    async fn test_state_overlay_closes_once_on_failure() {
        let (mut app, mut render_loop, _backend) = setup(FakeBackend::default());

        app.run_inline(
            "working...",
            |_backend| async move { Err::<(), _>(BackendError::Rejected("daemon gone".into())) },
            |_app, ()| panic!("success path must not run"),
        );

        pump_until(&mut app, &mut render_loop, |app| visible_kind(app) == Some("error")).await;
        assert_eq!(error_text(&app).as_deref(), Some("daemon gone"));
        assert_eq!(app.overlays.waiting(), 0);
    }

    #[tokio::test]
    async fn test_older_refresh_never_overwrites_newer_rows() {
        let (mut app, mut render_loop, backend) = setup(FakeBackend::default());

        // Timer refresh sees an empty daemon and answers late
        backend.delay_next_list(Duration::from_millis(200));
        app.refresh(PanelName::Images);

        // A pull lands and its own refresh answers right away
        backend.push_image(&["alpine:latest"]);
        app.refresh(PanelName::Images);

        pump_until(&mut app, &mut render_loop, |app| app.panels.images.rows().len() == 1).await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        render_loop.run_pending(&mut app).unwrap();
        assert_eq!(app.panels.images.rows().len(), 1);
        assert_eq!(app.panels.images.rows()[0].name(), "alpine:latest");
    }

    #[tokio::test]
    async fn test_errors_queue_behind_an_open_form() {
        let (mut app, _loop, _backend) = setup(FakeBackend::default());
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "alp");

        app.show_error(AppError::Selection("refresh failed".into()));
        assert_eq!(visible_kind(&app), Some("form"));
        assert_eq!(app.visible_form().unwrap().text("Image"), "alp");

        press(&mut app, KeyCode::Esc);
        assert_eq!(error_text(&app).as_deref(), Some("refresh failed"));
    }

    #[tokio::test]
    async fn test_filter_via_keys() {
        let (mut app, _loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest", "ubuntu:20.04", "nginx"]));
        load_images(&mut app, &backend);
        press(&mut app, KeyCode::Char('G'));

        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "al");
        // Rows follow every keystroke
        assert_eq!(app.panels.images.rows().len(), 1);
        press(&mut app, KeyCode::Enter);

        assert!(!app.overlays.is_open());
        assert_eq!(app.panels.images.table.filter(), "al");
        assert_eq!(app.panels.images.selected().unwrap().name(), "alpine:latest");

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.panels.images.table.filter(), "");
        assert_eq!(app.panels.images.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_ctrl_keys_reach_panel_bindings() {
        let (mut app, _loop, _backend) = setup(FakeBackend::default());
        press_ctrl(&mut app, 'l');
        assert_eq!(app.visible_form().unwrap().title(), "Load image");
        press(&mut app, KeyCode::Esc);
        assert!(!app.overlays.is_open());
    }
}
