//! In-memory backend for tests

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{
    Backend, BackendError, ContainerSpec, ContainerSummary, ImageSummary, SearchResult,
};

#[derive(Default)]
pub struct FakeBackend {
    pub images: Mutex<Vec<ImageSummary>>,
    pub containers: Mutex<Vec<ContainerSummary>>,
    pub search_results: Mutex<Vec<SearchResult>>,
    /// Delays for upcoming `list_images` calls, applied after the snapshot is taken
    pub list_delays: Mutex<VecDeque<Duration>>,
    /// When set, every mutation fails with this message
    pub fail_with: Mutex<Option<String>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_images(repo_tags: &[&str]) -> Self {
        let images = repo_tags
            .iter()
            .enumerate()
            .map(|(i, tag)| ImageSummary {
                id: format!("sha256:{:064x}", i + 1),
                repo_tags: vec![tag.to_string()],
                created: 1_600_000_000,
                size: 5_000_000,
            })
            .collect();
        Self {
            images: Mutex::new(images),
            ..Default::default()
        }
    }

    /// Make the next `list_images` call return late
    pub fn delay_next_list(&self, delay: Duration) {
        self.list_delays.lock().unwrap().push_back(delay);
    }

    pub fn push_image(&self, repo_tags: &[&str]) {
        let mut images = self.images.lock().unwrap();
        let id = format!("sha256:{:064x}", 0xf000 + images.len());
        images.push(ImageSummary {
            id,
            repo_tags: repo_tags.iter().map(|t| t.to_string()).collect(),
            created: 1_700_000_000,
            size: 1_000,
        });
    }

    pub fn fail(&self, msg: &str) {
        *self.fail_with.lock().unwrap() = Some(msg.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn mutate(&self, call: String) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().clone() {
            Some(msg) => Err(BackendError::Rejected(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_images(&self) -> Result<Vec<ImageSummary>, BackendError> {
        let images = self.images.lock().unwrap().clone();
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(images)
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, BackendError> {
        Ok(self.containers.lock().unwrap().clone())
    }

    async fn inspect_image(&self, id: &str) -> Result<serde_json::Value, BackendError> {
        self.mutate(format!("inspect_image {}", id))?;
        Ok(json!({ "Id": id }))
    }

    async fn inspect_container(&self, id: &str) -> Result<serde_json::Value, BackendError> {
        self.mutate(format!("inspect_container {}", id))?;
        Ok(json!({ "Id": id }))
    }

    async fn pull_image(&self, repository: &str, tag: &str) -> Result<(), BackendError> {
        self.mutate(format!("pull {}:{}", repository, tag))?;
        self.push_image(&[&format!("{}:{}", repository, tag)]);
        Ok(())
    }

    async fn remove_image(&self, name: &str) -> Result<(), BackendError> {
        self.mutate(format!("remove_image {}", name))?;
        self.images
            .lock()
            .unwrap()
            .retain(|img| !img.repo_tags.iter().any(|t| t == name));
        Ok(())
    }

    async fn search_images(&self, term: &str) -> Result<Vec<SearchResult>, BackendError> {
        self.mutate(format!("search {}", term))?;
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.contains(term))
            .cloned()
            .collect())
    }

    async fn remove_dangling_images(&self) -> Result<(), BackendError> {
        self.mutate("remove_dangling".to_string())?;
        self.images
            .lock()
            .unwrap()
            .retain(|img| !img.repo_tags.is_empty());
        Ok(())
    }

    async fn save_image(&self, name: &str, path: &Path) -> Result<(), BackendError> {
        self.mutate(format!("save {} {}", name, path.display()))
    }

    async fn import_image(
        &self,
        repository: &str,
        tag: &str,
        path: &Path,
    ) -> Result<(), BackendError> {
        self.mutate(format!("import {}:{} {}", repository, tag, path.display()))
    }

    async fn load_image(&self, path: &Path) -> Result<(), BackendError> {
        self.mutate(format!("load {}", path.display()))?;
        self.push_image(&["loaded:latest"]);
        Ok(())
    }

    async fn create_container(&self, spec: ContainerSpec) -> Result<(), BackendError> {
        self.mutate(format!("create {} {}", spec.name, spec.image))?;
        self.containers.lock().unwrap().push(ContainerSummary {
            id: format!("{:012x}", 7),
            name: spec.name,
            image: spec.image,
            state: "created".to_string(),
            status: "Created".to_string(),
            created: 1_700_000_000,
            ports: Vec::new(),
        });
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> Result<(), BackendError> {
        self.mutate(format!("remove_container {}", id))
    }
}
