use crate::docker::ImageSummary;
use crate::ui::columns::Column;

use super::{format_size, format_timestamp, short_id, ListRow};

pub const IMAGE_COLUMNS: &[Column] = &[
    Column::new("ID", 0.1, 0.2),
    Column::new("REPOSITORY", 0.1, 0.3),
    Column::new("TAG", 0.1, 0.1),
    Column::new("CREATED", 0.1, 0.2),
    Column::new("SIZE", 0.1, 0.2),
];

pub const NONE: &str = "<none>";

/// One row of the image list: an image under one of its repo tags
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRow {
    pub id: String,
    pub repo: String,
    pub tag: String,
    pub created: String,
    pub size: String,
}

impl ImageRow {
    /// Expand a backend image into one row per repo tag.
    /// Untagged images still get a `<none>:<none>` row.
    pub fn from_summary(image: &ImageSummary) -> Vec<Self> {
        let id = short_id(&image.id);
        let created = format_timestamp(image.created);
        let size = format_size(image.size);

        let row = |repo: String, tag: String| Self {
            id: id.clone(),
            repo,
            tag,
            created: created.clone(),
            size: size.clone(),
        };

        if image.repo_tags.is_empty() {
            return vec![row(NONE.to_string(), NONE.to_string())];
        }

        image
            .repo_tags
            .iter()
            .map(|repo_tag| {
                let (repo, tag) = parse_repo_tag(repo_tag);
                row(repo, tag)
            })
            .collect()
    }

    pub fn from_summaries(images: &[ImageSummary]) -> Vec<Self> {
        images.iter().flat_map(Self::from_summary).collect()
    }

    pub fn is_dangling(&self) -> bool {
        self.repo == NONE || self.tag == NONE
    }

    /// Name to hand back to the backend: `repo:tag`, or the id for dangling images
    pub fn name(&self) -> String {
        if self.is_dangling() {
            self.id.clone()
        } else {
            format!("{}:{}", self.repo, self.tag)
        }
    }
}

impl ListRow for ImageRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.repo.clone(),
            self.tag.clone(),
            self.created.clone(),
            self.size.clone(),
        ]
    }

    fn filter_label(&self) -> String {
        format!("{}:{}", self.repo, self.tag)
    }
}

/// Split `repo:tag`. A colon that belongs to a registry port is not a tag separator.
pub fn parse_repo_tag(repo_tag: &str) -> (String, String) {
    match repo_tag.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo.to_string(), tag.to_string()),
        _ => (repo_tag.to_string(), NONE.to_string()),
    }
}

/// Split the pull form's `name[:tag]`, defaulting to `latest`
pub fn parse_pull_target(image: &str) -> (String, String) {
    match image.split_once(':') {
        Some((name, tag)) => (name.to_string(), tag.to_string()),
        None => (image.to_string(), "latest".to_string()),
    }
}
