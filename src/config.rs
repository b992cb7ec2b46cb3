use crate::llm::LlmSettings;
use crate::search::SearchSettings;
use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
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

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?;

        // 2. Optional YAML file: --config / CONFIG_FILE, else ./config.yaml
        //    when one exists. A file named explicitly must exist.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::new(path, FileFormat::Yaml));
        } else if std::path::Path::new("config.yaml").exists() {
            builder = builder.add_source(File::new("config.yaml", FileFormat::Yaml));
        }

        // 3. Environment variables (prefixed with SPEECHBRIDGE_)
        // E.g. SPEECHBRIDGE_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("SPEECHBRIDGE")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI overrides. clap also resolves these from PORT etc., so the
        // priority ends up: CLI flag > CLI env var > SPEECHBRIDGE_ env >
        // config file > defaults.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

pub fn load_llm_settings() -> Result<LlmSettings, String> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| "Missing required env var: OPENAI_API_KEY".to_string())?;
    if api_key.trim().is_empty() {
        return Err("OPENAI_API_KEY cannot be empty".to_string());
    }

    let base_url = std::env::var("OPENAI_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.openai.com".to_string());

    let model = std::env::var("LLM_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "gpt-4-turbo".to_string());

    Ok(LlmSettings {
        base_url,
        api_key,
        model,
    })
}

pub fn load_search_settings() -> Result<SearchSettings, String> {
    let api_key = std::env::var("SERPER_API_KEY")
        .map_err(|_| "Missing required env var: SERPER_API_KEY".to_string())?;
    if api_key.trim().is_empty() {
        return Err("SERPER_API_KEY cannot be empty".to_string());
    }

    let base_url = std::env::var("SERPER_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://google.serper.dev".to_string());

    Ok(SearchSettings { base_url, api_key })
}
