//! Artifact store port
//!
//! Access to the memory dump directory the Volatility backend reads from.
//! The store only checks and enumerates; it never creates or writes files.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vmscope_domain::InfrastructureError;

/// Errors from enumerating the artifact directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStoreError {
    #[error("Failed to read memory dump directory '{dir}': {message}")]
    Unreadable { dir: String, message: String },
}

/// Port for the configured dumps directory
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Directory every artifact name is resolved against
    fn root(&self) -> &Path;

    /// Resolve `name` to an existing regular file directly under [`root`](Self::root).
    ///
    /// `name` must be a bare file name; absolute paths, separators and `..`
    /// fail with an `ArtifactNotFound` infrastructure error, as does a
    /// missing file.
    async fn resolve(&self, name: &str) -> Result<PathBuf, InfrastructureError>;

    /// File names in the directory, sorted. A missing directory is empty.
    async fn list(&self) -> Result<Vec<String>, ArtifactStoreError>;
}
