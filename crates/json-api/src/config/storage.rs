//! Storage Config

use clap::Args;

/// Where product records are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// Process memory; everything is lost on restart.
    Memory,

    /// `PostgreSQL`, via `DATABASE_URL`.
    Postgres,
}

/// Product storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Storage backend (memory, postgres)
    #[arg(
        long = "storage",
        env = "STORAGE_BACKEND",
        value_enum,
        default_value_t = StorageBackend::Memory
    )]
    pub backend: StorageBackend,

    /// `PostgreSQL` connection string, required for the postgres backend
    #[arg(
        long,
        env = "DATABASE_URL",
        hide_env_values = true,
        required_if_eq("backend", "postgres")
    )]
    pub database_url: Option<String>,
}
