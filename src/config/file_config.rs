use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration file.
///
/// Everything in here can also come from the environment or the CLI;
/// the file is the lowest-priority source (see `AppConfig::resolve`).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub api_token: Option<String>,
    pub api_credential: Option<String>,
    pub api_base_url: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let config: FileConfig = toml::from_str(
            r#"
            api_token = "tok_123"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.api_token.as_deref(), Some("tok_123"));
        assert_eq!(config.api_credential, None);
        assert_eq!(config.port, Some(8080));
    }

    #[test]
    fn rejects_invalid_toml() {
        let result: Result<FileConfig, toml::de::Error> = toml::from_str("api_token = [");
        assert!(result.is_err());
    }
}
