use client::Directory;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
    pub config: AppConfig,
}
