use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::{email_address::EmailAddressWithName, Sensitive};
use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files, applied in order.
pub const CONFIG_PATHS_ENV: &str = "PORTFOLIO_CONFIG_PATHS";

/// Environment variables that override config keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("NODE_ENV", "environment"),
    ("HOST", "http.host"),
    ("PORT", "http.port"),
    ("EMAIL_HOST", "email.host"),
    ("EMAIL_PORT", "email.port"),
    ("EMAIL_USER", "email.user"),
    ("EMAIL_PASSWORD", "email.password"),
    ("EMAIL_FROM", "email.from"),
    ("EMAIL_TO", "email.to"),
];

pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV)
        .map(|paths| {
            paths
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    load_from(&paths, |key| std::env::var(key).ok())
}

/// Build the config from the bundled defaults, the given files and the
/// environment variables returned by `env`. Empty variables count as unset.
pub fn load_from(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let env = |key: &str| env(key).filter(|value| !value.is_empty());

    let builder = paths.iter().try_fold(
        config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
        |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        },
    )?;

    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            builder.set_override_option(key, env(var))
        })?
        // only the literal "true" enables implicit tls
        .set_override_option("email.secure", env("EMAIL_SECURE").map(|x| x == "true"))?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub http: HttpConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub from: Option<EmailAddressWithName>,
    pub to: EmailAddressWithName,
}
