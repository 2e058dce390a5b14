use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

const CONFIG_DIR_ENV: &str = "GATEWAY_CONFIG_DIR";
const ENV_VAR_NAME: &str = "ENVIRONMENT";

/// Deployment environment the gateway is running in.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Develop,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Develop => "develop",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Gateway configuration, read once at startup.
///
/// Keys are flat so that they line up with the unprefixed environment
/// variables (`SERVICE_HOST` -> `service_host`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "Settings::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "Settings::default_http_port")]
    pub http_port: String,
    #[serde(default = "Settings::default_service_host")]
    pub service_host: String,
    #[serde(default = "Settings::default_service_port")]
    pub service_port: u16,
    #[serde(default = "Settings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "Settings::default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment file and
    /// process environment variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };
        let environment =
            std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| Environment::default().as_str().into());

        let builder = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base.toml")).required(false))
            .add_source(
                config::File::from(config_dir.join(format!("{environment}.toml"))).required(false),
            )
            .add_source(config::Environment::default());

        Self::from_builder(builder)
    }

    /// Deserialize settings from an already layered builder.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let cfg = builder
            .build()
            .context("failed to build configuration")?;

        cfg.try_deserialize()
            .context("failed to deserialize configuration; ENVIRONMENT must be develop/staging/production")
    }

    /// Socket address the HTTP listener binds to.
    ///
    /// `HTTP_PORT` accepts `:8090`, `8090` or a full `host:port`.
    pub fn http_bind_addr(&self) -> String {
        let port = self.http_port.trim();
        if let Some(stripped) = port.strip_prefix(':') {
            format!("0.0.0.0:{stripped}")
        } else if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
            format!("0.0.0.0:{port}")
        } else {
            port.to_string()
        }
    }

    /// `host:port` of the backend catalog service.
    pub fn service_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    fn default_log_level() -> String {
        "debug".to_string()
    }

    fn default_http_port() -> String {
        ":8090".to_string()
    }

    fn default_service_host() -> String {
        "localhost".to_string()
    }

    fn default_service_port() -> u16 {
        9101
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }

    fn default_connect_timeout_ms() -> u64 {
        5000
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: Self::default_log_level(),
            log_format: LogFormat::default(),
            http_port: Self::default_http_port(),
            service_host: Self::default_service_host(),
            service_port: Self::default_service_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            connect_timeout_ms: Self::default_connect_timeout_ms(),
        }
    }
}
