//! Collaborators the dashboard and the directory talk to: authentication,
//! table storage and object storage. Two implementations ship: a
//! Supabase-compatible REST client and an in-process local backend.

mod error;
pub mod local;
pub mod objects;
pub mod rest;
pub mod table;

use std::sync::Arc;

use async_trait::async_trait;
use common::config::{BackendConfig, BackendKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::BackendError;
pub use local::LocalBackend;
pub use objects::{FilesystemObjectStore, MemoryObjectStore};
pub use rest::RestBackend;

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// The current account, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Equality filters plus an optional single-column ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, Direction)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }
}

/// Row storage keyed by table name. Rows travel as JSON objects; the
/// typed helpers in [`table`] sit on top.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError>;

    /// Insert one row and return it as stored, with generated columns.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError>;

    /// Patch the row with `id`. Unknown ids are not an error.
    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<(), BackendError>;

    async fn delete(&self, table: &str, id: &str) -> Result<(), BackendError>;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `bucket/key`, overwriting when `upsert` is set.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), BackendError>;

    /// Publicly reachable URL of a stored object.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// The three collaborators a session works against.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthProvider>,
    pub tables: Arc<dyn TableStore>,
    pub objects: Arc<dyn ObjectStore>,
}

impl Collaborators {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        tables: Arc<dyn TableStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            auth,
            tables,
            objects,
        }
    }

    /// Build the configured backend.
    pub async fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        match config.kind {
            BackendKind::Rest => {
                let rest = Arc::new(RestBackend::new(&config.url, &config.anon_key)?);
                Ok(Self::new(rest.clone(), rest.clone(), rest))
            }
            BackendKind::Local => {
                let local = Arc::new(match &config.seed_path {
                    Some(path) => LocalBackend::from_seed_file(path).await?,
                    None => LocalBackend::default(),
                });
                let objects: Arc<dyn ObjectStore> = match &config.storage_dir {
                    Some(dir) => Arc::new(
                        FilesystemObjectStore::new(dir.clone(), &config.public_base_url).await?,
                    ),
                    None => Arc::new(MemoryObjectStore::new(&config.public_base_url)),
                };
                Ok(Self::new(local.clone(), local, objects))
            }
        }
    }
}
