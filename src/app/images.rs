//! Image panel workflows: forms, confirmations and the backend calls behind them.

use std::path::PathBuf;

use tracing::info;

use super::App;
use crate::action::Action;
use crate::components::{Form, SearchResults, Validator};
use crate::docker::{ContainerSpec, SearchResult, VolumeType};
use crate::error::{AppError, AppResult};
use crate::models::image::parse_pull_target;
use crate::models::{ImageRow, TaskId};
use crate::overlay::Overlay;
use crate::panel::PanelName;

fn back_to_images(app: &mut App) -> AppResult<()> {
    app.switch_to(PanelName::Images);
    Ok(())
}

/// Container settings from a validated create form
fn container_spec(form: &Form) -> ContainerSpec {
    let port = match (form.text("HostPort").parse::<u16>(), form.text("Port").parse::<u16>()) {
        (Ok(host), Ok(container)) => Some((host, container)),
        _ => None,
    };

    let volume = match (form.text("HostVolume"), form.text("Volume")) {
        ("", _) | (_, "") => None,
        (host, target) => Some((
            VolumeType::parse(form.text("VolumeType")),
            host.to_string(),
            target.to_string(),
        )),
    };

    let words = |label: &str| -> Vec<String> {
        form.text(label)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    };

    ContainerSpec {
        name: form.text("Name").to_string(),
        image: form.text("Image").to_string(),
        port,
        volume,
        user: Some(form.text("User"))
            .filter(|u| !u.is_empty())
            .map(str::to_string),
        attach: form.checked("Attach"),
        env: words("Env"),
        cmd: words("Cmd"),
    }
}

impl App {
    fn selected_image(&self) -> AppResult<&ImageRow> {
        self.panels
            .images
            .selected()
            .ok_or_else(|| AppError::selection("image"))
    }

    pub(super) fn inspect_image(&mut self) -> AppResult<()> {
        let image = self.selected_image()?;
        let id = image.id.clone();
        let title = image.name();

        self.run_inline(
            "image inspecting...",
            move |backend| async move { backend.inspect_image(&id).await },
            move |app, value| {
                app.panels.detail.show(title, &value, PanelName::Images);
                app.switch_to(PanelName::Detail);
                Ok(())
            },
        );
        Ok(())
    }

    pub(super) fn show_create_container(&mut self) -> AppResult<()> {
        let image = self.selected_image()?.name();

        let mut form = Form::new("Create container");
        form.add_input("Name");
        form.add_input("HostPort")
            .validate(Validator::required_with("HostPort", "Port"))
            .validate(Validator::port("HostPort"));
        form.add_input("Port")
            .validate(Validator::required_with("Port", "HostPort"))
            .validate(Validator::port("Port"));
        form.add_select("VolumeType", &VolumeType::ALL);
        form.add_input("HostVolume")
            .validate(Validator::required_with("HostVolume", "Volume"));
        form.add_input("Volume")
            .validate(Validator::required_with("Volume", "HostVolume"));
        form.add_input("Image")
            .with_text(image)
            .validate(Validator::required("Image"));
        form.add_input("User");
        form.add_checkbox("Attach");
        form.add_input("Env");
        form.add_input("Cmd");
        form.add_button("Create", Action::CreateContainer)
            .add_button("Cancel", Action::CloseForm)
            .on_close(back_to_images);

        self.open_form(form);
        Ok(())
    }

    pub(super) fn create_container(&mut self) -> AppResult<()> {
        let form = self.visible_form()?;
        form.validate()?;
        let spec = container_spec(form);
        self.close_form()?;

        info!(name = %spec.name, image = %spec.image, "creating container");
        self.run_inline(
            "container creating...",
            move |backend| async move { backend.create_container(spec).await },
            |app, ()| {
                app.refresh(PanelName::Containers);
                back_to_images(app)
            },
        );
        Ok(())
    }

    pub(super) fn show_pull_image(&mut self) -> AppResult<()> {
        let mut form = Form::new("Pull image");
        form.add_input("Image")
            .validate(Validator::required("Image"));
        form.add_button("Pull", Action::PullImage)
            .add_button("Cancel", Action::CloseForm)
            .on_close(back_to_images);

        self.open_form(form);
        Ok(())
    }

    pub(super) fn pull_image(&mut self) -> AppResult<()> {
        let form = self.visible_form()?;
        form.validate()?;
        let (repository, tag) = parse_pull_target(form.text("Image"));
        self.close_form()?;

        self.queue_pull(repository, tag)?;
        Ok(())
    }

    /// Pull as a task; the image list is refreshed once it lands
    pub(super) fn queue_pull(&mut self, repository: String, tag: String) -> AppResult<TaskId> {
        self.add_task(format!("pull {}:{}", repository, tag), move |ctx| async move {
            ctx.backend.pull_image(&repository, &tag).await?;
            ctx.updater.submit(|app: &mut App| {
                app.refresh(PanelName::Images);
                Ok(())
            });
            Ok(())
        })
    }

    pub(super) fn show_search_image(&mut self) -> AppResult<()> {
        let mut form = Form::new("Search image");
        form.add_input("Name")
            .validate(Validator::required("Name"));
        form.add_button("Search", Action::SearchImage)
            .add_button("Cancel", Action::CloseForm)
            .on_close(back_to_images);

        self.open_form(form);
        Ok(())
    }

    pub(super) fn search_image(&mut self) -> AppResult<()> {
        let form = self.visible_form()?;
        form.validate()?;
        let term = form.text("Name").to_string();
        self.close_form()?;

        let query = term.clone();
        self.run_inline(
            "image searching...",
            move |backend| async move { backend.search_images(&query).await },
            move |app, results: Vec<SearchResult>| {
                info!(term = %term, hits = results.len(), "image search");
                app.overlays
                    .open(Overlay::Search(SearchResults::new(term, &results)));
                Ok(())
            },
        );
        Ok(())
    }

    pub(super) fn remove_image(&mut self) -> AppResult<()> {
        let name = self.selected_image()?.name();

        self.confirm("Are you sure you want to remove this image?", move |app| {
            app.run_inline(
                "image removing...",
                move |backend| async move { backend.remove_image(&name).await },
                |app, ()| {
                    app.refresh(PanelName::Images);
                    Ok(())
                },
            );
            Ok(())
        });
        Ok(())
    }

    pub(super) fn remove_dangling_images(&mut self) -> AppResult<()> {
        if self.panels.images.rows().is_empty() {
            return Err(AppError::Selection("no images".to_string()));
        }

        self.confirm("Are you sure you want to remove dangling images?", |app| {
            app.run_inline(
                "dangling images removing...",
                |backend| async move { backend.remove_dangling_images().await },
                |app, ()| {
                    app.refresh(PanelName::Images);
                    Ok(())
                },
            );
            Ok(())
        });
        Ok(())
    }

    pub(super) fn show_save_image(&mut self) -> AppResult<()> {
        let image = self.selected_image()?.name();

        let mut form = Form::new("Save image");
        form.add_input("Path")
            .validate(Validator::required("Path"));
        form.add_input("Image")
            .with_text(image)
            .validate(Validator::required("Image"));
        form.add_button("Save", Action::SaveImage)
            .add_button("Cancel", Action::CloseForm)
            .on_close(back_to_images);

        self.open_form(form);
        Ok(())
    }

    pub(super) fn save_image(&mut self) -> AppResult<()> {
        let form = self.visible_form()?;
        form.validate()?;
        let path = PathBuf::from(form.text("Path"));
        let image = form.text("Image").to_string();
        self.close_form()?;

        self.run_inline(
            "image saving...",
            move |backend| async move { backend.save_image(&image, &path).await },
            |app, ()| back_to_images(app),
        );
        Ok(())
    }

    pub(super) fn show_import_image(&mut self) -> AppResult<()> {
        let mut form = Form::new("Import image");
        form.add_input("Repository")
            .validate(Validator::required("Repository"));
        form.add_input("Path")
            .validate(Validator::required("Path"));
        form.add_input("Tag");
        form.add_button("Import", Action::ImportImage)
            .add_button("Cancel", Action::CloseForm)
            .on_close(back_to_images);

        self.open_form(form);
        Ok(())
    }

    pub(super) fn import_image(&mut self) -> AppResult<()> {
        let form = self.visible_form()?;
        form.validate()?;
        let repository = form.text("Repository").to_string();
        let path = PathBuf::from(form.text("Path"));
        let tag = match form.text("Tag") {
            "" => "latest".to_string(),
            tag => tag.to_string(),
        };
        self.close_form()?;

        self.run_inline(
            "image importing...",
            move |backend| async move { backend.import_image(&repository, &tag, &path).await },
            |app, ()| {
                app.refresh(PanelName::Images);
                back_to_images(app)
            },
        );
        Ok(())
    }

    pub(super) fn show_load_image(&mut self) -> AppResult<()> {
        let mut form = Form::new("Load image");
        form.add_input("Path")
            .validate(Validator::required("Path"));
        form.add_button("Load", Action::LoadImage)
            .add_button("Cancel", Action::CloseForm)
            .on_close(back_to_images);

        self.open_form(form);
        Ok(())
    }

    pub(super) fn load_image(&mut self) -> AppResult<()> {
        let form = self.visible_form()?;
        form.validate()?;
        let path = PathBuf::from(form.text("Path"));
        self.close_form()?;

        self.run_inline(
            "image loading...",
            move |backend| async move { backend.load_image(&path).await },
            |app, ()| {
                app.refresh(PanelName::Images);
                back_to_images(app)
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::app::tests::{
        error_text, load_images, press, press_ctrl, pump_until, setup, type_text, visible_kind,
    };
    use crate::docker::fake::FakeBackend;

    fn set_field(app: &mut App, label: &str, text: &str) {
        match app.overlays.visible_mut() {
            Some(crate::overlay::Overlay::Form(form)) => {
                form.field_mut(label).unwrap().with_text(text);
            }
            _ => panic!("no form open"),
        }
    }

    #[tokio::test]
    async fn test_pull_form_validation_keeps_form_open() {
        let (mut app, _loop, backend) = setup(FakeBackend::default());

        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        let form = app.visible_form().unwrap();
        assert_eq!(form.error(), Some("no specified Image"));
        assert!(app.panels.tasks.tasks().is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_container_cross_field_rule() {
        let (mut app, _loop, backend) = setup(FakeBackend::with_images(&["alpine:latest"]));
        load_images(&mut app, &backend);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.visible_form().unwrap().text("Image"), "alpine:latest");

        set_field(&mut app, "Port", "80");
        app.handle_action(Action::CreateContainer).unwrap();
        assert_eq!(app.visible_form().unwrap().error(), Some("no specified HostPort"));

        set_field(&mut app, "HostPort", "http");
        app.handle_action(Action::CreateContainer).unwrap();
        assert_eq!(app.visible_form().unwrap().error(), Some("invalid HostPort"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_container_refreshes_containers() {
        let (mut app, mut render_loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest"]));
        load_images(&mut app, &backend);

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "web");
        set_field(&mut app, "HostPort", "8080");
        set_field(&mut app, "Port", "80");
        app.handle_action(Action::CreateContainer).unwrap();
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| {
            !app.overlays.is_open() && app.panels.containers.rows().len() == 1
        })
        .await;
        assert_eq!(app.panels.containers.rows()[0].name, "web");
        assert_eq!(app.focus(), PanelName::Images);
        assert_eq!(backend.calls(), vec!["create web alpine:latest".to_string()]);
    }

    #[test]
    fn test_container_spec_from_form() {
        let mut form = Form::new("Create container");
        form.add_input("Name").with_text("db");
        form.add_input("HostPort").with_text("5432");
        form.add_input("Port").with_text("5432");
        form.add_select("VolumeType", &VolumeType::ALL);
        form.add_input("HostVolume").with_text("pgdata");
        form.add_input("Volume").with_text("/var/lib/postgresql/data");
        form.add_input("Image").with_text("postgres:16");
        form.add_input("User");
        form.add_checkbox("Attach");
        form.add_input("Env").with_text("POSTGRES_PASSWORD=x  PGDATA=/data");
        form.add_input("Cmd");

        let spec = container_spec(&form);
        assert_eq!(spec.port, Some((5432, 5432)));
        assert_eq!(
            spec.volume,
            Some((
                VolumeType::Bind,
                "pgdata".to_string(),
                "/var/lib/postgresql/data".to_string()
            ))
        );
        assert_eq!(spec.user, None);
        assert!(!spec.attach);
        assert_eq!(spec.env, vec!["POSTGRES_PASSWORD=x", "PGDATA=/data"]);
        assert!(spec.cmd.is_empty());
    }

    #[tokio::test]
    async fn test_save_closes_state_message_on_success() {
        let (mut app, mut render_loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest"]));
        load_images(&mut app, &backend);

        press(&mut app, KeyCode::Char('s'));
        type_text(&mut app, "/tmp/alpine.tar");
        app.handle_action(Action::SaveImage).unwrap();
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| !app.overlays.is_open()).await;
        assert_eq!(
            backend.calls(),
            vec!["save alpine:latest /tmp/alpine.tar".to_string()]
        );
    }

    #[tokio::test]
    async fn test_save_failure_shows_error() {
        let (mut app, mut render_loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest"]));
        load_images(&mut app, &backend);
        backend.fail("file exists");

        press(&mut app, KeyCode::Char('s'));
        type_text(&mut app, "/tmp/alpine.tar");
        app.handle_action(Action::SaveImage).unwrap();

        pump_until(&mut app, &mut render_loop, |app| visible_kind(app) == Some("error")).await;
        assert_eq!(error_text(&app).as_deref(), Some("file exists"));
        assert_eq!(app.overlays.waiting(), 0);

        press(&mut app, KeyCode::Enter);
        assert!(!app.overlays.is_open());
        assert_eq!(app.focus(), PanelName::Images);
    }

    #[tokio::test]
    async fn test_selection_errors_on_empty_list() {
        let (mut app, _loop, backend) = setup(FakeBackend::default());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(error_text(&app).as_deref(), Some("no image selected"));
        press(&mut app, KeyCode::Esc);

        press_ctrl(&mut app, 'd');
        assert_eq!(error_text(&app).as_deref(), Some("no images"));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Enter);
        assert_eq!(error_text(&app).as_deref(), Some("no image selected"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remove_dangling_refreshes_images() {
        let (mut app, mut render_loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest"]));
        backend.push_image(&[]);
        load_images(&mut app, &backend);
        assert_eq!(app.panels.images.rows().len(), 2);

        press_ctrl(&mut app, 'd');
        assert_eq!(visible_kind(&app), Some("confirm"));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| {
            !app.overlays.is_open() && app.panels.images.rows().len() == 1
        })
        .await;
        assert_eq!(app.panels.images.rows()[0].name(), "alpine:latest");
        assert_eq!(backend.calls(), vec!["remove_dangling".to_string()]);
    }

    #[tokio::test]
    async fn test_load_refreshes_images() {
        let (mut app, mut render_loop, backend) = setup(FakeBackend::default());

        press_ctrl(&mut app, 'l');
        type_text(&mut app, "/tmp/alpine.tar");
        app.handle_action(Action::LoadImage).unwrap();
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| {
            !app.overlays.is_open() && !app.panels.images.rows().is_empty()
        })
        .await;
        assert_eq!(app.panels.images.rows()[0].name(), "loaded:latest");
        assert_eq!(app.focus(), PanelName::Images);
        assert_eq!(backend.calls(), vec!["load /tmp/alpine.tar".to_string()]);
    }

    #[tokio::test]
    async fn test_search_hit_is_pulled_as_a_task() {
        let backend = FakeBackend::default();
        *backend.search_results.lock().unwrap() = vec![
            SearchResult {
                name: "nginx".to_string(),
                description: "Official build of Nginx.".to_string(),
                stars: 19_000,
                official: true,
            },
            SearchResult {
                name: "bitnami/nginx".to_string(),
                description: String::new(),
                stars: 200,
                official: false,
            },
        ];
        let (mut app, mut render_loop, backend) = setup(backend);

        press_ctrl(&mut app, 'f');
        assert_eq!(app.visible_form().unwrap().title(), "Search image");
        type_text(&mut app, "nginx");
        app.handle_action(Action::SearchImage).unwrap();
        assert_eq!(visible_kind(&app), Some("state"));

        pump_until(&mut app, &mut render_loop, |app| visible_kind(app) == Some("search")).await;
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(!app.overlays.is_open());
        assert_eq!(app.panels.tasks.tasks()[0].label, "pull bitnami/nginx:latest");

        pump_until(&mut app, &mut render_loop, |app| {
            app.panels.tasks.tasks()[0].status.is_terminal() && !app.panels.images.rows().is_empty()
        })
        .await;
        assert_eq!(app.panels.images.rows()[0].name(), "bitnami/nginx:latest");
        assert_eq!(
            backend.calls(),
            vec!["search nginx".to_string(), "pull bitnami/nginx:latest".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_needs_a_term() {
        let (mut app, _loop, backend) = setup(FakeBackend::default());

        press_ctrl(&mut app, 'f');
        app.handle_action(Action::SearchImage).unwrap();
        assert_eq!(app.visible_form().unwrap().error(), Some("no specified Name"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.overlays.is_open());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_import_defaults_tag() {
        let (mut app, mut render_loop, backend) = setup(FakeBackend::default());

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "myapp");
        set_field(&mut app, "Path", "/tmp/rootfs.tar");
        app.handle_action(Action::ImportImage).unwrap();

        pump_until(&mut app, &mut render_loop, |app| !app.overlays.is_open()).await;
        assert_eq!(
            backend.calls(),
            vec!["import myapp:latest /tmp/rootfs.tar".to_string()]
        );
    }

    #[tokio::test]
    async fn test_inspect_opens_detail_and_esc_returns() {
        let (mut app, mut render_loop, backend) =
            setup(FakeBackend::with_images(&["alpine:latest"]));
        load_images(&mut app, &backend);

        press(&mut app, KeyCode::Enter);
        pump_until(&mut app, &mut render_loop, |app| app.focus() == PanelName::Detail).await;
        assert_eq!(app.panels.detail.title, "alpine:latest");
        assert!(!app.panels.detail.lines().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus(), PanelName::Images);
    }
}
