// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::cache::Cache;
use crate::config::Config;
use crate::repo::Repo;

/// Shared application state: explicitly constructed clients injected at
/// startup (no ambient singletons), so tests can substitute the in-memory
/// repository and cache fakes.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repo>,
    pub cache: Arc<dyn Cache>,
    pub config: Config,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
