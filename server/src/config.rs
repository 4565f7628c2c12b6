use std::time::Duration;

use serde::Deserialize;

/// Server settings read from the process environment.
///
/// Every field has a default, so an empty environment yields a working
/// configuration listening on `0.0.0.0:8080`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    /// Seconds.
    #[serde(default = "default_timeout")]
    pub read_timeout: u64,
    /// Seconds.
    #[serde(default = "default_timeout")]
    pub write_timeout: u64,
    /// Comma separated. `*` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables such as `SERVER_PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder().add_source(environment).build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Upper bound on handling one request: the read and write budgets combined.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout.saturating_add(self.write_timeout))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: default_host(),
            server_port: default_port(),
            read_timeout: default_timeout(),
            write_timeout: default_timeout(),
            allowed_origins: default_allowed_origins(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    10
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
