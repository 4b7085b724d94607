//! Layered application configuration.
//!
//! Priority, lowest to highest: built-in defaults, the YAML config file
//! (`--config` / `CONFIG_FILE`, else `./config.yaml` when present),
//! `HELIX_`-prefixed environment variables (`HELIX_SERVER__PORT=9000`),
//! then explicit CLI flags.
//!
//! LLM connection settings are read separately from the conventional
//! `LLM_*` variables by [`load_llm_settings`].

use std::path::Path;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::llm::{LlmSettings, Provider};

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chain: ChainConfig,
    pub conversation: ConversationConfig,
    pub resilience: ResilienceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// Origins allowed to call the API cross-origin. Empty means same-origin only.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
    /// Minimum extraction confidence to pass the gate.
    pub confidence_threshold: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConversationConfig {
    /// Maximum number of stored records; zero is unbounded.
    pub history_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

/// Output format of the log subscriber.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.static_dir", "static")?
            .set_default("server.cors_origins", Vec::<String>::new())?
            .set_default(
                "chain.confidence_threshold",
                crate::recruiter::DEFAULT_CONFIDENCE_THRESHOLD,
            )?
            .set_default("conversation.history_limit", 0)?
            .set_default("resilience.request_timeout_secs", 60)?
            .set_default("resilience.body_limit_bytes", 64 * 1024)?
            .set_default("logging.filter", "info")?
            .set_default("logging.format", "pretty")?;

        match &cli.config {
            Some(path) => builder = builder.add_source(File::with_name(path).required(true)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix("HELIX")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        builder.build()?.try_deserialize()
    }
}

/// Read LLM connection settings from the environment.
///
/// `LLM_BASE_URL` defaults to `https://api.openai.com` and `LLM_MODEL` to
/// `gpt-4o`. The key comes from `LLM_API_KEY`, falling back to
/// `OPENAI_API_KEY`.
pub fn load_llm_settings() -> Result<LlmSettings, String> {
    let base_url = env_non_empty("LLM_BASE_URL").unwrap_or_else(|| "https://api.openai.com".to_string());
    url::Url::parse(&base_url).map_err(|e| format!("LLM_BASE_URL is not a valid URL: {e}"))?;

    let model = env_non_empty("LLM_MODEL").unwrap_or_else(|| "gpt-4o".to_string());

    let api_key = env_non_empty("LLM_API_KEY").or_else(|| env_non_empty("OPENAI_API_KEY"));

    let provider = Provider::detect(
        &base_url,
        &model,
        env_non_empty("AZURE_DEPLOYMENT_NAME"),
        env_non_empty("AZURE_API_VERSION"),
    );

    if api_key.is_none() && provider != Provider::Generic {
        return Err("Missing API key: set LLM_API_KEY or OPENAI_API_KEY".to_string());
    }

    Ok(LlmSettings {
        base_url,
        api_key,
        model,
        provider,
    })
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}
