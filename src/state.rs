//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{bulk_import::MediaProbe, config::Config, storage::MediaStorage};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Uploaded and imported media
    pub storage: MediaStorage,

    /// Remote media lookups for bulk imports
    pub probe: Arc<dyn MediaProbe>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, storage: MediaStorage, probe: Arc<dyn MediaProbe>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                storage,
                probe,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a reference to the media storage
    pub fn storage(&self) -> &MediaStorage {
        &self.inner.storage
    }

    /// Get the remote media probe
    pub fn probe(&self) -> &dyn MediaProbe {
        self.inner.probe.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
