use anyhow::Context;
use reqwest::Url;
use std::path::{Component, Path, PathBuf};

use super::ObjectStore;

/// Object store backed by a directory tree, for offline use
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a remote key onto the store root, refusing keys that escape it
    pub fn resolve(&self, remote_path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(remote_path);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        anyhow::ensure!(
            is_plain && !remote_path.is_empty(),
            "Invalid object path: {:?}",
            remote_path
        );
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for LocalStore {
    async fn upload(&self, local_path: &Path, remote_path: &str) -> anyhow::Result<()> {
        let dest = self.resolve(remote_path)?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::copy(local_path, &dest)
            .await
            .with_context(|| format!("Failed to copy to {}", dest.display()))?;
        Ok(())
    }

    async fn make_public(&self, remote_path: &str) -> anyhow::Result<String> {
        if let Some(base) = &self.public_base_url {
            return Ok(format!("{}/{}", base.trim_end_matches('/'), remote_path));
        }

        let dest = self.resolve(remote_path)?;
        let absolute = tokio::fs::canonicalize(&dest)
            .await
            .with_context(|| format!("Object {} does not exist", remote_path))?;
        let url = Url::from_file_path(&absolute)
            .map_err(|_| anyhow::anyhow!("Cannot express {} as a URL", absolute.display()))?;
        Ok(url.to_string())
    }
}
