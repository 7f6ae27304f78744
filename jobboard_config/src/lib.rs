use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable containing a colon separated list of additional
/// config files, applied in order after the default config.
pub const CONFIG_PATHS_ENV: &str = "JOBBOARD_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `JOBBOARD_HTTP__PORT=8000`.
pub const ENV_PREFIX: &str = "JOBBOARD";

/// Loads the default config, any files listed in [`CONFIG_PATHS_ENV`] and
/// finally the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let extra = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra.split(':').filter(|p| !p.is_empty()))
        .collect::<Vec<_>>();

    load_with(&paths, environment())
}

pub fn load_with(paths: &[impl AsRef<Path>], environment: Environment) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(environment)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// The environment source used by [`load`].
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Origin of the browser client allowed to make cross-origin requests.
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    #[serde(default)]
    pub tls: DatabaseTlsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseTlsConfig {
    pub mode: DatabaseTlsMode,
    /// Skip server certificate validation, e.g. for self-signed certificates
    /// of managed databases.
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseTlsMode {
    #[default]
    Disable,
    Prefer,
    Require,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Base address of the job store api.
    pub api_url: Url,
    pub toast_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        environment().source(Some(
            vars.iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    #[test]
    fn load_default_config() {
        let config = load_with(&[Path::new(DEFAULT_CONFIG_PATH)], env(&[])).unwrap();
        assert_eq!(config.http.port, 8000);
        assert_eq!(*config.client.toast_ttl, std::time::Duration::from_secs(3));
        assert_eq!(config.database.tls.mode, DatabaseTlsMode::Disable);
        assert!(!config.database.tls.accept_invalid_certs);
    }

    #[test]
    fn database_tls_overrides() {
        let config = load_with(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[
                ("JOBBOARD_DATABASE__TLS__MODE", "require"),
                ("JOBBOARD_DATABASE__TLS__ACCEPT_INVALID_CERTS", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.tls.mode, DatabaseTlsMode::Require);
        assert!(config.database.tls.accept_invalid_certs);
    }

    #[test]
    fn database_tls_invalid_mode() {
        let err = load_with(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[("JOBBOARD_DATABASE__TLS__MODE", "sometimes")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn environment_overrides() {
        let config = load_with(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[
                ("JOBBOARD_HTTP__PORT", "9123"),
                ("JOBBOARD_HTTP__ALLOWED_ORIGIN", "https://jobs.example.com"),
                ("JOBBOARD_DATABASE__MAX_CONNECTIONS", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.port, 9123);
        assert_eq!(config.http.allowed_origin, "https://jobs.example.com");
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn missing_file() {
        let err = load_with(&[Path::new("/nonexistent/jobboard.toml")], env(&[])).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
