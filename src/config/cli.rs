use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::{domain::preferences::Preferences, presentation::OutputFormat};

/// Command-line arguments for the BlueOcean binary.
#[derive(Debug, Parser)]
#[command(
    name = "blueocean",
    version,
    about = "Generate Blue Ocean product strategies with Gemini"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "BLUEOCEAN_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Flags for the default `generate` command.
    #[command(flatten)]
    pub generate: GenerateArgs,
}

impl CliArgs {
    /// Command to run; without a subcommand the top-level flags drive `generate`.
    pub fn into_command(self) -> Command {
        let CliArgs {
            command, generate, ..
        } = self;
        command.unwrap_or_else(|| Command::Generate(Box::new(generate)))
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Ask the model for a product strategy and render it.
    Generate(Box<GenerateArgs>),
    /// Render an existing strategy document without calling the model.
    Render(RenderArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub preferences: PreferenceArgs,

    #[command(flatten)]
    pub overrides: GenerateOverrides,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Default, Clone)]
pub struct PreferenceArgs {
    /// Preferred industry or niche.
    #[arg(long, value_name = "TEXT")]
    pub industry: Option<String>,

    /// Who the product is for.
    #[arg(long = "target-audience", value_name = "TEXT")]
    pub target_audience: Option<String>,

    /// Founder skills or assets to build on.
    #[arg(long, value_name = "TEXT")]
    pub skills: Option<String>,

    /// Optional concept seed.
    #[arg(long = "initial-idea", value_name = "TEXT")]
    pub initial_idea: Option<String>,
}

impl PreferenceArgs {
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            industry: self.industry.clone(),
            target_audience: self.target_audience.clone(),
            skills: self.skills.clone(),
            initial_idea: self.initial_idea.clone(),
        }
    }
}

#[derive(Debug, Args, Default, Clone)]
pub struct GenerateOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Gemini API key.
    #[arg(long = "api-key", env = "API_KEY", value_name = "KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the model name.
    #[arg(long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Override the API endpoint base URL.
    #[arg(long = "endpoint", value_name = "URL", value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Override the thinking token budget; 0 leaves it to the model.
    #[arg(long = "thinking-budget", value_name = "TOKENS")]
    pub thinking_budget: Option<u32>,

    /// Override the request timeout.
    #[arg(long = "request-timeout-seconds", value_name = "SECONDS")]
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the rendered document to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Markdown document to render, or `-` for stdin.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl RenderArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
