//! State

use std::sync::Arc;

use thiserror::Error;

use storefront_app::context::{AppContext, AppInitError};

use crate::config::storage::{StorageBackend, StorageConfig};

#[derive(Debug, Error)]
pub(crate) enum StorageInitError {
    #[error("DATABASE_URL is required for the postgres storage backend")]
    MissingDatabaseUrl,

    #[error(transparent)]
    App(#[from] AppInitError),
}

#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self { app }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }
}

/// Build the application context for the configured storage backend.
pub(crate) async fn connect(storage: &StorageConfig) -> Result<AppContext, StorageInitError> {
    match storage.backend {
        StorageBackend::Memory => Ok(AppContext::in_memory()),
        StorageBackend::Postgres => {
            let url = storage
                .database_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .ok_or(StorageInitError::MissingDatabaseUrl)?;

            Ok(AppContext::from_database_url(url).await?)
        }
    }
}
