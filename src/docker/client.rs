use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions,
    RemoveContainerOptions,
};
use bollard::image::{
    CreateImageOptions, ImportImageOptions, ListImagesOptions, PruneImagesOptions,
    RemoveImageOptions, SearchImagesOptions,
};
use bollard::models::{HostConfig, Mount, MountTypeEnum, PortBinding};
use bollard::Docker;
use futures_util::{pin_mut, Stream, StreamExt};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use super::{
    Backend, BackendError, ContainerSpec, ContainerSummary, ImageSummary, PortMapping,
    SearchResult, VolumeType,
};

/// Docker Hub returns at most this many hits per search
const SEARCH_LIMIT: u64 = 25;

/// Write `chunks` to a new file at `path`. An existing file is never
/// overwritten; a partially written one is removed again.
pub(crate) async fn write_archive<S, B>(path: &Path, chunks: S) -> Result<(), BackendError>
where
    S: Stream<Item = Result<B, BackendError>>,
    B: AsRef<[u8]>,
{
    let file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| BackendError::io(format!("Failed to create {}", path.display()), e))?;

    let result = copy_chunks(file, path, chunks).await;
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "failed to remove partial archive");
        }
    }
    result
}

async fn copy_chunks<S, B>(
    mut file: tokio::fs::File,
    path: &Path,
    chunks: S,
) -> Result<(), BackendError>
where
    S: Stream<Item = Result<B, BackendError>>,
    B: AsRef<[u8]>,
{
    pin_mut!(chunks);
    while let Some(chunk) = chunks.next().await {
        file.write_all(chunk?.as_ref())
            .await
            .map_err(|e| BackendError::io(format!("Failed to write {}", path.display()), e))?;
    }
    file.flush()
        .await
        .map_err(|e| BackendError::io(format!("Failed to write {}", path.display()), e))
}

/// Backend implementation on top of the bollard Docker client
pub struct DockerClient {
    client: Docker,
}

impl DockerClient {
    /// Connect to the Docker daemon, honouring an explicit host when given
    pub fn connect(host: Option<&str>) -> Result<Self, BackendError> {
        let client = match host {
            Some(h) if h.starts_with("tcp://") || h.starts_with("http://") => {
                Docker::connect_with_http(h, 120, bollard::API_DEFAULT_VERSION)
            }
            Some(h) => Docker::connect_with_socket(h, 120, bollard::API_DEFAULT_VERSION),
            None => Docker::connect_with_local_defaults(),
        }
        .map_err(|e| BackendError::docker("Failed to connect to Docker daemon", e))?;
        Ok(Self { client })
    }

    async fn read_archive(path: &Path) -> Result<Vec<u8>, BackendError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| BackendError::io(format!("Failed to read {}", path.display()), e))
    }
}

#[async_trait]
impl Backend for DockerClient {
    async fn list_images(&self) -> Result<Vec<ImageSummary>, BackendError> {
        let options = ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        };

        let images = self
            .client
            .list_images(Some(options))
            .await
            .map_err(|e| BackendError::docker("Failed to list images", e))?;

        Ok(images
            .into_iter()
            .map(|img| ImageSummary {
                id: img.id,
                repo_tags: img.repo_tags,
                created: img.created,
                size: img.size,
            })
            .collect())
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, BackendError> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(options))
            .await
            .map_err(|e| BackendError::docker("Failed to list containers", e))?;

        let mut result = Vec::new();
        for container in containers {
            let name = container
                .names
                .and_then(|names| names.first().cloned())
                .map(|n| n.trim_start_matches('/').to_string())
                .unwrap_or_default();

            let ports = container
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(|p| PortMapping {
                    host_port: p.public_port,
                    container_port: p.private_port,
                    protocol: p
                        .typ
                        .map(|t| format!("{:?}", t).to_lowercase())
                        .unwrap_or_else(|| "tcp".to_string()),
                })
                .collect();

            result.push(ContainerSummary {
                id: container.id.unwrap_or_default(),
                name,
                image: container.image.unwrap_or_default(),
                state: container.state.unwrap_or_default(),
                status: container.status.unwrap_or_default(),
                created: container.created.unwrap_or_default(),
                ports,
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn inspect_image(&self, id: &str) -> Result<serde_json::Value, BackendError> {
        let image = self
            .client
            .inspect_image(id)
            .await
            .map_err(|e| BackendError::docker(format!("Failed to inspect image: {}", id), e))?;
        serde_json::to_value(image).map_err(|e| BackendError::Rejected(e.to_string()))
    }

    async fn inspect_container(&self, id: &str) -> Result<serde_json::Value, BackendError> {
        let container = self
            .client
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| BackendError::docker(format!("Failed to inspect container: {}", id), e))?;
        serde_json::to_value(container).map_err(|e| BackendError::Rejected(e.to_string()))
    }

    async fn search_images(&self, term: &str) -> Result<Vec<SearchResult>, BackendError> {
        let options = SearchImagesOptions::<String> {
            term: term.to_string(),
            limit: Some(SEARCH_LIMIT),
            filters: HashMap::new(),
        };

        let hits = self
            .client
            .search_images(options)
            .await
            .map_err(|e| BackendError::docker(format!("Failed to search images: {}", term), e))?;

        Ok(hits
            .into_iter()
            .map(|hit| SearchResult {
                name: hit.name.unwrap_or_default(),
                description: hit.description.unwrap_or_default(),
                stars: hit.star_count.unwrap_or_default(),
                official: hit.is_official.unwrap_or_default(),
            })
            .collect())
    }

    async fn pull_image(&self, repository: &str, tag: &str) -> Result<(), BackendError> {
        let options = CreateImageOptions {
            from_image: repository,
            tag,
            ..Default::default()
        };

        let mut stream = self.client.create_image(Some(options), None, None);
        while let Some(progress) = stream.next().await {
            progress.map_err(|e| {
                BackendError::docker(format!("Failed to pull image: {}:{}", repository, tag), e)
            })?;
        }
        Ok(())
    }

    async fn remove_image(&self, name: &str) -> Result<(), BackendError> {
        self.client
            .remove_image(name, Some(RemoveImageOptions::default()), None)
            .await
            .map_err(|e| BackendError::docker(format!("Failed to remove image: {}", name), e))?;
        Ok(())
    }

    async fn remove_dangling_images(&self) -> Result<(), BackendError> {
        let mut filters = HashMap::new();
        filters.insert("dangling", vec!["true"]);

        self.client
            .prune_images(Some(PruneImagesOptions { filters }))
            .await
            .map_err(|e| BackendError::docker("Failed to remove dangling images", e))?;
        Ok(())
    }

    async fn save_image(&self, name: &str, path: &Path) -> Result<(), BackendError> {
        let context = format!("Failed to save image: {}", name);
        let chunks = self
            .client
            .export_image(name)
            .map(move |chunk| chunk.map_err(|e| BackendError::docker(context.clone(), e)));
        write_archive(path, chunks).await
    }

    async fn import_image(
        &self,
        repository: &str,
        tag: &str,
        path: &Path,
    ) -> Result<(), BackendError> {
        let archive = Self::read_archive(path).await?;
        let options = CreateImageOptions {
            from_src: "-",
            repo: repository,
            tag,
            ..Default::default()
        };

        let mut stream = self
            .client
            .create_image(Some(options), Some(archive.into()), None);
        while let Some(progress) = stream.next().await {
            progress.map_err(|e| {
                BackendError::docker(format!("Failed to import image: {}", repository), e)
            })?;
        }
        Ok(())
    }

    async fn load_image(&self, path: &Path) -> Result<(), BackendError> {
        let archive = Self::read_archive(path).await?;

        let mut stream = self
            .client
            .import_image(ImportImageOptions::default(), archive.into(), None);
        while let Some(progress) = stream.next().await {
            progress.map_err(|e| {
                BackendError::docker(format!("Failed to load image: {}", path.display()), e)
            })?;
        }
        Ok(())
    }

    async fn create_container(&self, spec: ContainerSpec) -> Result<(), BackendError> {
        let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
        let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();

        if let Some((host_port, container_port)) = spec.port {
            let container_port_key = format!("{}/tcp", container_port);
            port_bindings.insert(
                container_port_key.clone(),
                Some(vec![PortBinding {
                    host_ip: Some("0.0.0.0".to_string()),
                    host_port: Some(host_port.to_string()),
                }]),
            );
            exposed_ports.insert(container_port_key, HashMap::new());
        }

        let mounts = spec.volume.as_ref().map(|(kind, source, target)| {
            vec![Mount {
                source: Some(source.clone()),
                target: Some(target.clone()),
                typ: Some(match kind {
                    VolumeType::Bind => MountTypeEnum::BIND,
                    VolumeType::Volume => MountTypeEnum::VOLUME,
                }),
                ..Default::default()
            }]
        });

        let host_config = HostConfig {
            port_bindings: Some(port_bindings),
            mounts,
            ..Default::default()
        };

        let config = Config {
            image: Some(spec.image.clone()),
            user: spec.user.clone(),
            env: if spec.env.is_empty() { None } else { Some(spec.env.clone()) },
            cmd: if spec.cmd.is_empty() { None } else { Some(spec.cmd.clone()) },
            exposed_ports: Some(exposed_ports),
            host_config: Some(host_config),
            tty: Some(spec.attach),
            open_stdin: Some(spec.attach),
            attach_stdin: Some(spec.attach),
            attach_stdout: Some(spec.attach),
            attach_stderr: Some(spec.attach),
            ..Default::default()
        };

        // Let the daemon pick a name when none was given
        let options = (!spec.name.is_empty()).then(|| CreateContainerOptions {
            name: spec.name.as_str(),
            platform: None,
        });

        self.client
            .create_container(options, config)
            .await
            .map_err(|e| {
                BackendError::docker(format!("Failed to create container from {}", spec.image), e)
            })?;
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> Result<(), BackendError> {
        let options = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };
        self.client
            .remove_container(id, Some(options))
            .await
            .map_err(|e| BackendError::docker(format!("Failed to remove container: {}", id), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("dockdeck-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("image.tar")
    }

    #[tokio::test]
    async fn test_failed_save_leaves_no_partial_file() {
        let path = scratch("partial");
        let _ = std::fs::remove_file(&path);

        let broken = stream::iter(vec![
            Ok(b"abc".to_vec()),
            Err(BackendError::Rejected("export broke".into())),
        ]);
        let err = write_archive(&path, broken).await.unwrap_err();
        assert_eq!(err.to_string(), "export broke");
        assert!(!path.exists());

        // A retry is not blocked by the earlier attempt
        let chunks = stream::iter(vec![
            Ok::<_, BackendError>(b"abc".to_vec()),
            Ok(b"def".to_vec()),
        ]);
        write_archive(&path, chunks).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abcdef");
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_save_never_touches_an_existing_file() {
        let path = scratch("existing");
        std::fs::write(&path, b"keep").unwrap();

        let chunks = stream::iter(vec![Ok::<_, BackendError>(b"new".to_vec())]);
        assert!(write_archive(&path, chunks).await.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"keep");
        std::fs::remove_file(&path).unwrap();
    }
}
