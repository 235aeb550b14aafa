//! Dumps directory on the local filesystem.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use vmscope_application::{ArtifactStoreError, ArtifactStorePort};
use vmscope_domain::InfrastructureError;

/// Artifact store over one local directory.
///
/// Read-only: the directory is never created, and a missing directory
/// simply has no artifacts.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArtifactStorePort for LocalArtifactStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn resolve(&self, name: &str) -> Result<PathBuf, InfrastructureError> {
        if !is_plain_file_name(name) {
            debug!("Rejected artifact name outside {}: {}", self.root.display(), name);
            return Err(InfrastructureError::artifact_not_found(name, &self.root));
        }

        let path = self.root.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(path),
            _ => Err(InfrastructureError::artifact_not_found(name, &self.root)),
        }
    }

    async fn list(&self) -> Result<Vec<String>, ArtifactStoreError> {
        let unreadable = |e: std::io::Error| ArtifactStoreError::Unreadable {
            dir: self.root.display().to_string(),
            message: e.to_string(),
        };

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Dumps directory {} does not exist", self.root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(unreadable(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
            // Follows symlinks so linked dumps are listed too
            let is_file = tokio::fs::metadata(entry.path())
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// A single normal path component: no separators, `..`, or root.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
