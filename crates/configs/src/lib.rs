use std::io;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 0, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Per-binary fallbacks used when neither the TOML file nor the environment provide a value.
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    pub port: u16,
    pub database_url: &'static str,
}

pub const CAFE_DEFAULTS: ServiceDefaults = ServiceDefaults {
    port: 8000,
    database_url: "sqlite://cafes.db?mode=rwc",
};

pub const TODO_DEFAULTS: ServiceDefaults = ServiceDefaults {
    port: 5000,
    database_url: "sqlite://todo.db?mode=rwc",
};

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read and parse a TOML config. A missing file yields the default config;
/// unreadable or malformed files are errors.
pub fn load_from_file_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).with_context(|| format!("invalid config file {path}")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e).with_context(|| format!("cannot read config file {path}")),
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); a missing file is not an error and yields
    /// an environment/default-driven config instead.
    pub fn load_and_validate(defaults: ServiceDefaults) -> Result<Self> {
        Self::load_path_and_validate(&config_path(), defaults)
    }

    pub fn load_path_and_validate(path: &str, defaults: ServiceDefaults) -> Result<Self> {
        let mut cfg = load_from_file_or_default(path)?;
        cfg.normalize_and_validate(defaults)?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self, defaults: ServiceDefaults) -> Result<()> {
        self.normalize_with(defaults, process_env)
    }

    /// Normalize using `env` for lookups instead of the process environment.
    pub fn normalize_with(&mut self, defaults: ServiceDefaults, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        self.server.normalize(defaults, &env)?;
        self.database.normalize_from_env(defaults, &env);
        self.database.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self, defaults: ServiceDefaults, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        }
        if self.port == 0 {
            self.port = match env("SERVER_PORT") {
                Some(p) => p
                    .parse::<u16>()
                    .map_err(|_| anyhow!("SERVER_PORT must be an integer in 1..=65535"))?,
                None => defaults.port,
            };
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => {
                self.worker_threads = env("TOKIO_WORKER_THREADS")
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|w| *w > 0)
                    .or(Some(4));
            }
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill an empty URL from `DATABASE_URL`, then from the per-service default.
    pub fn normalize_from_env(&mut self, defaults: ServiceDefaults, env: &impl Fn(&str) -> Option<String>) {
        if self.url.trim().is_empty() {
            self.url = env("DATABASE_URL").unwrap_or_else(|| defaults.database_url.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url must start with sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "sqlite://data/cafes.db?mode=rwc"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
        assert!(!cfg.database.sqlx_logging);
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_takes_service_defaults() {
        let mut cfg: AppConfig = toml::from_str("").unwrap();
        cfg.normalize_with(TODO_DEFAULTS, no_env).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5000");
        assert_eq!(cfg.database.url, "sqlite://todo.db?mode=rwc");
    }

    #[test]
    fn env_fills_gaps_but_not_explicit_values() {
        let env = |k: &str| match k {
            "SERVER_PORT" => Some("9100".to_string()),
            "DATABASE_URL" => Some("sqlite://env.db".to_string()),
            _ => None,
        };
        let mut cfg = AppConfig::default();
        cfg.normalize_with(CAFE_DEFAULTS, env).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.database.url, "sqlite://env.db");

        let mut cfg: AppConfig = toml::from_str("[server]\nport = 7000\n").unwrap();
        cfg.normalize_with(CAFE_DEFAULTS, env).unwrap();
        assert_eq!(cfg.server.port, 7000);
    }

    #[test]
    fn bad_env_port_is_an_error() {
        let mut cfg = AppConfig::default();
        let res = cfg.normalize_with(CAFE_DEFAULTS, |k| (k == "SERVER_PORT").then(|| "eighty".to_string()));
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cfg = load_from_file_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 0);
        assert!(cfg.database.url.is_empty());
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"not-a-number\"\n").unwrap();
        let err = AppConfig::load_path_and_validate(path.to_str().unwrap(), CAFE_DEFAULTS).unwrap_err();
        assert!(err.to_string().contains("invalid config file"), "{err:#}");
    }

    #[test]
    fn rejects_non_sqlite_url() {
        let db = DatabaseConfig { url: "postgres://localhost/db".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let db = DatabaseConfig {
            url: "sqlite::memory:".into(),
            min_connections: 4,
            max_connections: 2,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }
}
