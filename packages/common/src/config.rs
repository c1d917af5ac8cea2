use std::path::PathBuf;

use serde::Deserialize;

use crate::image::MAX_IMAGE_BYTES;

/// Which collaborator implementation backs a session.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Supabase-compatible REST service.
    #[default]
    Rest,
    /// In-process tables seeded from a JSON file, objects on local disk.
    Local,
}

/// Backend collaborator configuration, shared by the server and the CLI.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    /// Base URL of the REST service. Default: "http://localhost:54321".
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Public (anon) API key sent with every REST request.
    #[serde(default)]
    pub anon_key: String,
    /// Object storage bucket for company images. Default: "company-images".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// JSON seed for the local backend (tables and accounts).
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    /// Directory for locally stored objects. Objects stay in memory when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Base URL under which locally stored objects are published.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_backend_url() -> String {
    "http://localhost:54321".into()
}
fn default_bucket() -> String {
    "company-images".into()
}
fn default_public_base_url() -> String {
    "http://localhost:3000/storage".into()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            url: default_backend_url(),
            anon_key: String::new(),
            bucket: default_bucket(),
            seed_path: None,
            storage_dir: None,
            public_base_url: default_public_base_url(),
        }
    }
}

/// Admin dashboard settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Upload ceiling in bytes. Default: 5 MiB.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Currency stamped on products created from the dashboard. Default: "COP".
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_max_upload_bytes() -> u64 {
    MAX_IMAGE_BYTES
}
fn default_currency() -> String {
    "COP".into()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            currency: default_currency(),
        }
    }
}
