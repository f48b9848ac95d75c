use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration.
///
/// Sources, lowest precedence first:
/// - built-in defaults
/// - `config.toml` in the working directory (optional)
/// - `WYR_*` environment variables (e.g. `WYR_DATABASE_URL`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub connect_retries: usize,
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:wyr.sqlite".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cors_origins: Vec::new(),
            max_connections: 5,
            acquire_timeout_secs: 5,
            connect_retries: 5,
            body_limit_bytes: 16 * 1024,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("WYR_"))
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WYR_LISTEN_ADDR", "127.0.0.1:9000");
            jail.set_env("WYR_CORS_ORIGINS", "[\"https://wyr.example\"]");
            jail.set_env("WYR_MAX_CONNECTIONS", "2");

            let cfg = Config::load()?;
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            assert_eq!(cfg.cors_origins, vec!["https://wyr.example".to_string()]);
            assert_eq!(cfg.max_connections, 2);
            assert_eq!(cfg.database_url, "sqlite:wyr.sqlite");
            Ok(())
        });
    }

    #[test]
    fn toml_file_is_optional_and_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "body_limit_bytes = 1024\nloglevel = \"debug\"")?;

            let cfg = Config::load()?;
            assert_eq!(cfg.body_limit_bytes, 1024);
            assert_eq!(cfg.loglevel, "debug");
            assert_eq!(cfg.acquire_timeout(), Duration::from_secs(5));
            Ok(())
        });
    }
}
