mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};

/// Default origin of the Podhaven CMS API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.podhaven.com/api/v1";

pub const ENV_API_TOKEN: &str = "PODHAVEN_API_TOKEN";
pub const ENV_API_CREDENTIAL: &str = "PODHAVEN_API_CREDENTIAL";

/// CLI arguments relevant to config resolution.
/// This struct mirrors the CLI arguments that can be overridden by the
/// environment or the TOML config file.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// 0 means "let the OS pick a port".
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
}

/// Fully resolved configuration the server runs with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_token: String,
    pub api_credential: String,
    pub api_base_url: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments (which clap already merged
    /// with the environment) and an optional TOML file config.
    ///
    /// Credentials resolve environment-first: `PODHAVEN_API_TOKEN` and
    /// `PODHAVEN_API_CREDENTIAL` win over the file. Both are required.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let api_token = match std::env::var(ENV_API_TOKEN) {
            Ok(token) if !token.is_empty() => token,
            _ => match file.api_token {
                Some(token) if !token.is_empty() => token,
                _ => bail!(
                    "api_token must be set via {} or the config file",
                    ENV_API_TOKEN
                ),
            },
        };

        let api_credential = match std::env::var(ENV_API_CREDENTIAL) {
            Ok(credential) if !credential.is_empty() => credential,
            _ => match file.api_credential {
                Some(credential) if !credential.is_empty() => credential,
                _ => bail!(
                    "api_credential must be set via {} or the config file",
                    ENV_API_CREDENTIAL
                ),
            },
        };

        let api_base_url = file
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        // CLI/env port wins; the file only applies when nothing was passed.
        let port = if cli.port != 0 {
            cli.port
        } else {
            file.port.unwrap_or(0)
        };

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        Ok(AppConfig {
            api_token,
            api_credential,
            api_base_url,
            port,
            logging_level,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    match s.to_lowercase().as_str() {
        "none" => Some(RequestsLoggingLevel::None),
        "path" => Some(RequestsLoggingLevel::Path),
        "headers" => Some(RequestsLoggingLevel::Headers),
        "body" => Some(RequestsLoggingLevel::Body),
        _ => None,
    }
}
