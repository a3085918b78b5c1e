//! Process configuration, read once at startup from the environment.

pub mod loader;
pub mod validator;

pub use loader::*;
pub use validator::*;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Where course documents are read from.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreBackend {
    /// JSONB documents in a PostgreSQL table.
    Postgres {
        database_url: String,
        max_connections: u32,
        schema: String,
        collection: String,
    },
    /// Fixed in-process snapshot, optionally loaded from a JSON fixture file.
    Memory { fixture: Option<PathBuf> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    /// Bound on each store round trip.
    pub store_timeout: Duration,
    /// Program tags served as `/courses/<TAG>`.
    pub programs: Vec<String>,
}
