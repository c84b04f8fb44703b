use super::App;
use crate::error::{AppError, AppResult};
use crate::panel::PanelName;

impl App {
    pub(super) fn inspect_container(&mut self) -> AppResult<()> {
        let container = self
            .panels
            .containers
            .selected()
            .ok_or_else(|| AppError::selection("container"))?;
        let id = container.id.clone();
        let title = container.name.clone();

        self.run_inline(
            "container inspecting...",
            move |backend| async move { backend.inspect_container(&id).await },
            move |app, value| {
                app.panels.detail.show(title, &value, PanelName::Containers);
                app.switch_to(PanelName::Detail);
                Ok(())
            },
        );
        Ok(())
    }

    pub(super) fn remove_container(&mut self) -> AppResult<()> {
        let id = self
            .panels
            .containers
            .selected()
            .ok_or_else(|| AppError::selection("container"))?
            .id
            .clone();

        self.confirm("Are you sure you want to remove this container?", move |app| {
            app.run_inline(
                "container removing...",
                move |backend| async move { backend.remove_container(&id).await },
                |app, ()| {
                    app.refresh(PanelName::Containers);
                    Ok(())
                },
            );
            Ok(())
        });
        Ok(())
    }
}
