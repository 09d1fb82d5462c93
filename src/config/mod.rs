//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::credential::ApiKey;

mod cli;

pub use cli::{
    CliArgs, Command, GenerateArgs, GenerateOverrides, LoggingOverrides, OutputArgs,
    PreferenceArgs, RenderArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blueocean";
const ENV_PREFIX: &str = "BLUEOCEAN";
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_NAME: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 32_768;

#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub model: ModelSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub api_key: Option<ApiKey>,
    /// Base URL; always ends with `/` so relative joins keep its path.
    pub endpoint: Url,
    pub name: String,
    /// `None` leaves the thinking budget to the model.
    pub thinking_budget: Option<u32>,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Generate(args)) => raw.apply_generate_overrides(&args.overrides),
        Some(Command::Render(args)) => raw.apply_logging_overrides(&args.logging),
        None => raw.apply_generate_overrides(&cli.generate.overrides),
    }

    Settings::from_raw(raw)
}

pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    model: RawModelSettings,
}

impl RawSettings {
    fn apply_generate_overrides(&mut self, overrides: &GenerateOverrides) {
        self.apply_logging_overrides(&overrides.logging);

        if let Some(api_key) = overrides.api_key.as_ref() {
            self.model.api_key = Some(api_key.clone());
        }
        if let Some(name) = overrides.model.as_ref() {
            self.model.name = Some(name.clone());
        }
        if let Some(endpoint) = overrides.endpoint.as_ref() {
            self.model.endpoint = Some(endpoint.clone());
        }
        if let Some(budget) = overrides.thinking_budget {
            self.model.thinking_budget = Some(budget);
        }
        if let Some(seconds) = overrides.request_timeout_seconds {
            self.model.request_timeout_seconds = Some(seconds);
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, model } = raw;

        let logging = build_logging_settings(logging)?;
        let model = build_model_settings(model)?;

        Ok(Self { logging, model })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_model_settings(model: RawModelSettings) -> Result<ModelSettings, LoadError> {
    let api_key = model.api_key.and_then(ApiKey::from_raw);

    let endpoint = model
        .endpoint
        .unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_string());
    let endpoint = normalize_endpoint(endpoint.trim())
        .map_err(|reason| LoadError::invalid("model.endpoint", reason))?;

    let name = model
        .name
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
    if name.is_empty() {
        return Err(LoadError::invalid("model.name", "must not be empty"));
    }
    if name.contains('/') {
        return Err(LoadError::invalid("model.name", "must not contain `/`"));
    }

    let thinking_budget = match model.thinking_budget.unwrap_or(DEFAULT_THINKING_BUDGET) {
        0 => None,
        budget => Some(budget),
    };

    let request_timeout = match model.request_timeout_seconds {
        Some(0) => {
            return Err(LoadError::invalid(
                "model.request_timeout_seconds",
                "must be greater than zero",
            ));
        }
        Some(seconds) => Some(Duration::from_secs(seconds)),
        None => None,
    };

    Ok(ModelSettings {
        api_key,
        endpoint,
        name,
        thinking_budget,
        request_timeout,
    })
}

fn normalize_endpoint(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|err| format!("failed to parse `{raw}`: {err}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawModelSettings {
    api_key: Option<String>,
    endpoint: Option<String>,
    name: Option<String>,
    thinking_budget: Option<u32>,
    request_timeout_seconds: Option<u64>,
}
