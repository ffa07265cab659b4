//! Persistence of drawings to remote object storage.
//!
//! Upper layers only talk to [`ObjectStore`]; the firebase bucket and the
//! local directory tree are interchangeable behind it.

pub mod firebase;
pub mod local;

use anyhow::Context;
use image::ImageFormat;
use std::future::Future;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::drawing::DrawingBitmap;
use crate::models::{ModelChoice, ShapeClass, UploadRecord};

pub use firebase::FirebaseBucket;
pub use local::LocalStore;

/// Remote object storage addressed by path-like keys.
pub trait ObjectStore: Send + Sync {
    /// Copy a local file to `remote_path`, replacing any existing object.
    fn upload(
        &self,
        local_path: &Path,
        remote_path: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Make the object publicly readable and return its public URL.
    fn make_public(&self, remote_path: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// File name and remote path for one uploaded drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    pub file_name: String,
    pub remote_path: String,
}

impl ObjectName {
    /// `{model}_{class}_{YYYYMMDDHHMMSS}.png` stored under `{model}/{class}/`
    pub fn new(model: ModelChoice, class: ShapeClass, at: OffsetDateTime) -> anyhow::Result<Self> {
        let model_folder = model.folder_name();
        let class_folder = class.folder_name();
        let file_name = format!("{}_{}_{}.png", model_folder, class_folder, timestamp(at)?);
        let remote_path = format!("{}/{}/{}", model_folder, class_folder, file_name);
        Ok(Self {
            file_name,
            remote_path,
        })
    }

    fn stem(&self) -> &str {
        self.file_name.trim_end_matches(".png")
    }
}

pub fn timestamp(at: OffsetDateTime) -> anyhow::Result<String> {
    Ok(at.format(format_description!(
        "[year][month][day][hour][minute][second]"
    ))?)
}

/// Local wall-clock time, falling back to UTC when the offset is unknown
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Names, stages, uploads and publishes drawings
#[derive(Debug)]
pub struct Uploader<S> {
    store: S,
    temp_dir: PathBuf,
}

impl<S: ObjectStore> Uploader<S> {
    pub fn new(store: S, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub async fn upload(
        &self,
        bitmap: &DrawingBitmap,
        model: ModelChoice,
        class: ShapeClass,
    ) -> anyhow::Result<UploadRecord> {
        self.upload_at(bitmap, model, class, now()).await
    }

    /// Upload using an explicit timestamp for the object name
    pub async fn upload_at(
        &self,
        bitmap: &DrawingBitmap,
        model: ModelChoice,
        class: ShapeClass,
        at: OffsetDateTime,
    ) -> anyhow::Result<UploadRecord> {
        let name = ObjectName::new(model, class, at)?;

        std::fs::create_dir_all(&self.temp_dir)
            .with_context(|| format!("Failed to create temp dir {}", self.temp_dir.display()))?;

        // Removed on drop, so failed uploads leave nothing behind either
        let mut staged = tempfile::Builder::new()
            .prefix(&format!("{}-", name.stem()))
            .suffix(".png")
            .tempfile_in(&self.temp_dir)
            .context("Failed to create temporary file")?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            bitmap
                .image()
                .write_to(&mut writer, ImageFormat::Png)
                .context("Failed to encode drawing as PNG")?;
            writer.flush()?;
        }
        debug!("Staged {} at {}", name.file_name, staged.path().display());

        self.store
            .upload(staged.path(), &name.remote_path)
            .await
            .with_context(|| format!("Failed to upload {}", name.remote_path))?;
        let public_url = self
            .store
            .make_public(&name.remote_path)
            .await
            .with_context(|| format!("Failed to publish {}", name.remote_path))?;

        // The object is already published at this point
        if let Err(e) = staged.close() {
            warn!("Failed to remove temporary file for {}: {}", name.file_name, e);
        }
        info!("Uploaded {} -> {}", name.remote_path, public_url);

        Ok(UploadRecord {
            file_name: name.file_name,
            remote_path: name.remote_path,
            public_url,
        })
    }
}

/// Storage backend selected by configuration
#[derive(Debug)]
pub enum StorageBackend {
    Firebase(FirebaseBucket),
    Local(LocalStore),
}

impl StorageBackend {
    /// Build the configured backend; `None` when uploads are disabled
    pub fn from_config(config: &StorageConfig) -> anyhow::Result<Option<Self>> {
        let backend = match config {
            StorageConfig::Firebase {
                bucket,
                credentials,
            } => StorageBackend::Firebase(FirebaseBucket::new(bucket, credentials)?),
            StorageConfig::Local {
                dir,
                public_base_url,
            } => StorageBackend::Local(LocalStore::new(dir, public_base_url.clone())),
            StorageConfig::Disabled => return Ok(None),
        };
        Ok(Some(backend))
    }
}

impl ObjectStore for StorageBackend {
    async fn upload(&self, local_path: &Path, remote_path: &str) -> anyhow::Result<()> {
        match self {
            StorageBackend::Firebase(bucket) => bucket.upload(local_path, remote_path).await,
            StorageBackend::Local(store) => store.upload(local_path, remote_path).await,
        }
    }

    async fn make_public(&self, remote_path: &str) -> anyhow::Result<String> {
        match self {
            StorageBackend::Firebase(bucket) => bucket.make_public(remote_path).await,
            StorageBackend::Local(store) => store.make_public(remote_path).await,
        }
    }
}
