use chrono::{DateTime, Local};
use ratatui::style::Color;

use crate::error::{AppError, AppResult};
use crate::ui::columns::Column;
use crate::ui::task_color;

use super::ListRow;

pub const TASK_COLUMNS: &[Column] = &[
    Column::new("NAME", 0.3, 0.3),
    Column::new("STATUS", 0.3, 0.3),
    Column::new("CREATED", 0.3, 0.3),
];

/// Index of a task in the task list
pub type TaskId = usize;

/// Lifecycle of a queued backend operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Done,
    Failed(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub label: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: TaskStatus::Pending,
            created_at: Local::now(),
        }
    }

    /// Pending -> Running
    pub fn start(&mut self) -> AppResult<()> {
        if self.status != TaskStatus::Pending {
            return Err(AppError::invariant(format!(
                "task '{}' started while {}",
                self.label,
                self.status.as_str()
            )));
        }
        self.status = TaskStatus::Running;
        Ok(())
    }

    /// Running -> Done | Failed. Terminal states never change again.
    pub fn finish(&mut self, outcome: Result<(), String>) -> AppResult<()> {
        if self.status != TaskStatus::Running {
            return Err(AppError::invariant(format!(
                "task '{}' finished while {}",
                self.label,
                self.status.as_str()
            )));
        }
        self.status = match outcome {
            Ok(()) => TaskStatus::Done,
            Err(e) => TaskStatus::Failed(e),
        };
        Ok(())
    }
}

impl ListRow for Task {
    fn cells(&self) -> Vec<String> {
        let status = match &self.status {
            TaskStatus::Failed(e) => format!("failed: {}", e),
            other => other.as_str().to_string(),
        };
        vec![
            self.label.clone(),
            status,
            self.created_at.format("%Y/%m/%d %H:%M:%S").to_string(),
        ]
    }

    fn filter_label(&self) -> String {
        self.label.clone()
    }

    fn color(&self) -> Color {
        task_color(&self.status)
    }
}
