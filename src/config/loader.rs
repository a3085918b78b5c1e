//! Build `ServiceConfig` from environment variables.

use crate::config::validator::{validate_identifier, validate_programs};
use crate::config::{ServiceConfig, StoreBackend};
use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/courses";
pub const DEFAULT_SCHEMA: &str = "catalog";
pub const DEFAULT_COLLECTION: &str = "courses";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PROGRAMS: &str = "BSIS,BSIT";

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup` (variable name -> value). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = parse_nonzero(get("PORT"), "PORT", DEFAULT_PORT)?;
        let ip = match get("BIND_ADDR") {
            Some(v) => IpAddr::from_str(&v).map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: v,
                reason: "expected an IP address",
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let timeout_ms: u64 = parse_nonzero(get("STORE_TIMEOUT_MS"), "STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS)?;

        let backend = match get("STORE_BACKEND").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("postgres") => {
                let schema = get("CATALOG_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
                validate_identifier("CATALOG_SCHEMA", &schema)?;
                let collection = get("COURSES_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.into());
                validate_identifier("COURSES_COLLECTION", &collection)?;
                StoreBackend::Postgres {
                    database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
                    max_connections: parse_nonzero(
                        get("DATABASE_MAX_CONNECTIONS"),
                        "DATABASE_MAX_CONNECTIONS",
                        DEFAULT_MAX_CONNECTIONS,
                    )?,
                    schema,
                    collection,
                }
            }
            Some("memory") => StoreBackend::Memory {
                fixture: get("COURSES_FIXTURE").map(PathBuf::from),
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "STORE_BACKEND",
                    value: other.to_string(),
                    reason: "expected postgres or memory",
                })
            }
        };

        let programs: Vec<String> = get("PROGRAM_TAGS")
            .unwrap_or_else(|| DEFAULT_PROGRAMS.into())
            .split(',')
            .map(|t| t.trim().to_string())
            .collect();
        validate_programs(&programs)?;

        Ok(ServiceConfig {
            bind_addr: SocketAddr::new(ip, port),
            backend,
            store_timeout: Duration::from_millis(timeout_ms),
            programs,
        })
    }
}

fn parse_nonzero<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(v) if v != T::default() => Ok(v),
        Ok(_) => Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: "must be greater than zero",
        }),
        Err(_) => Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: "expected a positive integer",
        }),
    }
}
