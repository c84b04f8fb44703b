use ratatui::prelude::*;
use tracing::{info, warn};

use crate::action::Action;
use crate::components::row_table::RowTable;
use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskId, TaskStatus, TASK_COLUMNS};
use crate::panel::{nav_bindings, Binding, Panel, PanelName};

/// Task panel. Tasks are appended and kept for the whole session.
pub struct TaskList {
    tasks: Vec<Task>,
    table: RowTable<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            table: RowTable::new(TASK_COLUMNS),
        }
    }

    pub fn push(&mut self, task: Task) -> TaskId {
        info!(task = %task.label, "task queued");
        self.tasks.push(task);
        self.sync();
        self.tasks.len() - 1
    }

    pub fn start(&mut self, id: TaskId) -> AppResult<()> {
        self.task_mut(id)?.start()?;
        self.sync();
        Ok(())
    }

    pub fn finish(&mut self, id: TaskId, outcome: Result<(), String>) -> AppResult<()> {
        let task = self.task_mut(id)?;
        task.finish(outcome)?;
        match &task.status {
            TaskStatus::Failed(e) => warn!(task = %task.label, error = %e, "task failed"),
            _ => info!(task = %task.label, "task done"),
        }
        self.sync();
        Ok(())
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn running_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Running)
            .count()
    }

    fn task_mut(&mut self, id: TaskId) -> AppResult<&mut Task> {
        self.tasks
            .get_mut(id)
            .ok_or_else(|| AppError::invariant(format!("no task with id {}", id)))
    }

    fn sync(&mut self) {
        self.table.set_rows(self.tasks.clone());
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for TaskList {
    fn name(&self) -> PanelName {
        PanelName::Tasks
    }

    fn key_bindings(&self) -> Vec<Binding> {
        nav_bindings()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.table.render(frame, area, "Tasks", focused);
    }

    fn navigate(&mut self, action: Action) {
        self.table.navigate(action);
    }

    fn row_counts(&self) -> (usize, usize) {
        (self.tasks.len(), self.tasks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_task_is_fatal() {
        let mut list = TaskList::new();
        assert!(list.start(3).unwrap_err().is_fatal());
        assert!(list.finish(0, Ok(())).unwrap_err().is_fatal());
    }

    #[test]
    fn test_running_count() {
        let mut list = TaskList::new();
        let a = list.push(Task::new("pull a"));
        let b = list.push(Task::new("pull b"));
        list.start(a).unwrap();
        list.start(b).unwrap();
        assert_eq!(list.running_count(), 2);

        list.finish(a, Err("denied".into())).unwrap();
        assert_eq!(list.running_count(), 1);
        assert_eq!(list.get(a).unwrap().status, TaskStatus::Failed("denied".into()));
        assert_eq!(list.tasks().len(), 2);
    }
}
