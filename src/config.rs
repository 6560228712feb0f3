//! Runtime settings from environment variables (a `.env` file is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Which store backs the API, chosen by the connection string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    Postgres(String),
    /// `memory:` or `memory://`. Data lives for the life of the process.
    Memory,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "memory:" || s.starts_with("memory://") {
            return Ok(Backend::Memory);
        }
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            return Ok(Backend::Postgres(s.to_string()));
        }
        Err(ConfigError::ConnectionString(format!(
            "expected postgres:// or memory:, got '{}'",
            s
        )))
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub backend: Backend,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Settings {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS` and `BODY_LIMIT_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend: Backend = lookup("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into())
            .parse()?;
        let bind_addr: SocketAddr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), || {
            SocketAddr::from(([0, 0, 0, 0], 3000))
        })?;
        let max_connections: u32 = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), || {
            DEFAULT_MAX_CONNECTIONS
        })?;
        let body_limit_bytes: usize = parse_or("BODY_LIMIT_BYTES", lookup("BODY_LIMIT_BYTES"), || {
            DEFAULT_BODY_LIMIT_BYTES
        })?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        Ok(Self {
            backend,
            bind_addr,
            max_connections,
            body_limit_bytes,
        })
    }
}

fn parse_or<T, D>(key: &'static str, raw: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    D: FnOnce() -> T,
{
    match raw {
        None => Ok(default()),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.backend, Backend::Postgres(DEFAULT_DATABASE_URL.into()));
        assert_eq!(s.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(s.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(s.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
    }

    #[test]
    fn memory_backend() {
        let s = settings(&[("DATABASE_URL", "memory:")]).unwrap();
        assert_eq!(s.backend, Backend::Memory);
        assert_eq!("memory://students".parse::<Backend>().unwrap(), Backend::Memory);
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(matches!(
            settings(&[("DATABASE_URL", "mysql://localhost/x")]),
            Err(ConfigError::ConnectionString(_))
        ));
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = settings(&[("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));
        assert!(settings(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(settings(&[("BIND_ADDR", "nowhere")]).is_err());
    }
}
