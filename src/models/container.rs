use ratatui::style::Color;

use crate::docker::ContainerSummary;
use crate::ui::columns::Column;
use crate::ui::status_color;

use super::{format_timestamp, short_id, ListRow};

pub const CONTAINER_COLUMNS: &[Column] = &[
    Column::new("ID", 0.1, 0.15),
    Column::new("NAME", 0.1, 0.2),
    Column::new("IMAGE", 0.1, 0.2),
    Column::new("STATUS", 0.1, 0.2),
    Column::new("CREATED", 0.1, 0.15),
    Column::new("PORT", 0.1, 0.15),
];

/// Status of a Docker container
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContainerStatus {
    Running,
    Exited,
    Paused,
    Created,
    Restarting,
    Removing,
    Dead,
    #[default]
    Unknown,
}

impl ContainerStatus {
    pub fn from_docker_state(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "running" => Self::Running,
            "exited" => Self::Exited,
            "paused" => Self::Paused,
            "created" => Self::Created,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// One row of the container list
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: ContainerStatus,
    pub status: String,
    pub created: String,
    pub port: String,
}

impl ContainerRow {
    pub fn from_summary(container: &ContainerSummary) -> Self {
        // Show first port, with a count of the rest
        let port = match container.ports.as_slice() {
            [] => "-".to_string(),
            [only] => only.display(),
            [first, rest @ ..] => format!("{}+{}", first.display(), rest.len()),
        };

        Self {
            id: short_id(&container.id),
            name: container.name.clone(),
            image: container.image.clone(),
            state: ContainerStatus::from_docker_state(&container.state),
            status: container.status.clone(),
            created: format_timestamp(container.created),
            port,
        }
    }
}

impl ListRow for ContainerRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.image.clone(),
            self.status.clone(),
            self.created.clone(),
            self.port.clone(),
        ]
    }

    fn filter_label(&self) -> String {
        self.name.clone()
    }

    fn color(&self) -> Color {
        status_color(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::PortMapping;

    #[test]
    fn test_port_summary() {
        let mut container = ContainerSummary {
            id: "f00dfeedbeefcafe1234".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            state: "running".to_string(),
            status: "Up 2 hours".to_string(),
            created: 0,
            ports: Vec::new(),
        };
        assert_eq!(ContainerRow::from_summary(&container).port, "-");

        container.ports = vec![
            PortMapping {
                host_port: Some(8080),
                container_port: 80,
                protocol: "tcp".to_string(),
            },
            PortMapping {
                host_port: None,
                container_port: 443,
                protocol: "tcp".to_string(),
            },
        ];
        let row = ContainerRow::from_summary(&container);
        assert_eq!(row.port, "8080:80/tcp+1");
        assert_eq!(row.id, "f00dfeedbeef");
        assert!(row.state.is_running());
    }
}
