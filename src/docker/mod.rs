pub mod client;
#[cfg(test)]
pub mod fake;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use client::DockerClient;

/// Failure of a call against the container backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{context}: {source}")]
    Docker {
        context: String,
        #[source]
        source: bollard::errors::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Rejected(String),

    #[error("worker aborted: {0}")]
    Aborted(String),
}

impl BackendError {
    pub fn docker(context: impl Into<String>, source: bollard::errors::Error) -> Self {
        Self::Docker {
            context: context.into(),
            source,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Image as reported by the backend, before it is split into rows
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSummary {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub created: i64,
    pub size: i64,
}

/// Container as reported by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: String,
    pub status: String,
    pub created: i64,
    pub ports: Vec<PortMapping>,
}

/// Port mapping info
#[derive(Debug, Clone, PartialEq)]
pub struct PortMapping {
    pub host_port: Option<u16>,
    pub container_port: u16,
    pub protocol: String,
}

impl PortMapping {
    /// Format as "host:container/proto" or just "container/proto" if no host
    pub fn display(&self) -> String {
        match self.host_port {
            Some(hp) => format!("{}:{}/{}", hp, self.container_port, self.protocol),
            None => format!("{}/{}", self.container_port, self.protocol),
        }
    }
}

/// One Docker Hub search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub description: String,
    pub stars: i64,
    pub official: bool,
}

/// How a volume is attached to a new container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeType {
    Bind,
    Volume,
}

impl VolumeType {
    pub const ALL: [&'static str; 2] = ["bind", "volume"];

    pub fn parse(s: &str) -> Self {
        match s {
            "volume" => Self::Volume,
            _ => Self::Bind,
        }
    }
}

/// Everything needed to create a container
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub port: Option<(u16, u16)>,
    pub volume: Option<(VolumeType, String, String)>,
    pub user: Option<String>,
    pub attach: bool,
    pub env: Vec<String>,
    pub cmd: Vec<String>,
}

/// The container-management service the panels talk to.
///
/// Implementations must be cheap to share across worker tasks; every call may
/// run concurrently with any other.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn list_images(&self) -> Result<Vec<ImageSummary>, BackendError>;

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, BackendError>;

    async fn inspect_image(&self, id: &str) -> Result<serde_json::Value, BackendError>;

    async fn inspect_container(&self, id: &str) -> Result<serde_json::Value, BackendError>;

    async fn search_images(&self, term: &str) -> Result<Vec<SearchResult>, BackendError>;

    async fn pull_image(&self, repository: &str, tag: &str) -> Result<(), BackendError>;

    async fn remove_image(&self, name: &str) -> Result<(), BackendError>;

    async fn remove_dangling_images(&self) -> Result<(), BackendError>;

    async fn save_image(&self, name: &str, path: &Path) -> Result<(), BackendError>;

    async fn import_image(
        &self,
        repository: &str,
        tag: &str,
        path: &Path,
    ) -> Result<(), BackendError>;

    async fn load_image(&self, path: &Path) -> Result<(), BackendError>;

    async fn create_container(&self, spec: ContainerSpec) -> Result<(), BackendError>;

    async fn remove_container(&self, id: &str) -> Result<(), BackendError>;
}
