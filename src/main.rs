use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cms;
use cms::CmsClient;

mod config;
use config::{AppConfig, CliConfig, FileConfig};

mod mcp;
use mcp::session::{InMemorySessionStore, SessionStore};

mod server;
use server::{run_server, RequestsLoggingLevel, ServerConfig};

const DEFAULT_CONFIG_FILE: &str = "podhaven-mcp.toml";

#[derive(Parser, Debug)]
struct CliArgs {
    /// The port to listen on. 0 lets the OS pick one.
    #[clap(short, long, env = "PORT", default_value_t = 0)]
    pub port: u16,

    /// Path to a TOML config file. Defaults to ./podhaven-mcp.toml when
    /// present.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

fn load_file_config(cli_path: &Option<PathBuf>) -> Result<Option<FileConfig>> {
    match cli_path {
        Some(path) => FileConfig::load(path).map(Some),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                FileConfig::load(&default_path).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = load_file_config(&cli_args.config)?;

    let cli_config = CliConfig {
        port: cli_args.port,
        logging_level: cli_args.logging_level,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Podhaven CMS at {}", config.api_base_url);
    let cms = Arc::new(
        CmsClient::new(
            config.api_base_url.clone(),
            &config.api_token,
            &config.api_credential,
        )
        .context("Failed to create CMS client")?,
    );

    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
    };

    run_server(server_config, cms, session_store).await
}
