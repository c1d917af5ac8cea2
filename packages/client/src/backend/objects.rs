//! Object stores for the local backend.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::{BackendError, ObjectStore};

fn public_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", base.trim_end_matches('/'))
}

/// Objects on disk under `{base_path}/{bucket}/{key}`.
///
/// Writes go to a temp file first and are renamed into place.
pub struct FilesystemObjectStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl FilesystemObjectStore {
    pub async fn new(base_path: PathBuf, public_base_url: &str) -> Result<Self, BackendError> {
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_base_url: public_base_url.to_string(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve `bucket/key` below the base path. Keys may contain `/` but
    /// never climb out of their bucket.
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, BackendError> {
        let relative = Path::new(bucket).join(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || bucket.is_empty() || key.is_empty() {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid object key: {bucket}/{key}"),
            )));
        }
        Ok(self.base_path.join(relative))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
        upsert: bool,
    ) -> Result<(), BackendError> {
        let object_path = self.object_path(bucket, key)?;
        if !upsert && fs::try_exists(&object_path).await? {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("object exists: {bucket}/{key}"),
            )));
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        public_url(&self.public_base_url, bucket, key)
    }
}

/// Objects kept in memory; nothing survives the process.
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    public_base_url: String,
}

impl MemoryObjectStore {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            objects: Mutex::default(),
            public_base_url: public_base_url.to_string(),
        }
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(&format!("{bucket}/{key}"))
            .cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
        upsert: bool,
    ) -> Result<(), BackendError> {
        let mut objects = self.objects.lock().await;
        let path = format!("{bucket}/{key}");
        if !upsert && objects.contains_key(&path) {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("object exists: {path}"),
            )));
        }
        objects.insert(path, bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        public_url(&self.public_base_url, bucket, key)
    }
}
