use std::{
    io::{IsTerminal, Write},
    path::Path,
    process,
    sync::Arc,
};

use blueocean::{
    application::{
        error::AppError,
        lifecycle::RequestController,
        progress::{STAGE_INTERVAL, track_progress},
    },
    config,
    domain::state::RequestState,
    infra::{error::InfraError, gemini::GeminiClient, telemetry},
    presentation::{self, PresentOptions},
};
use tracing::{Dispatch, Level, debug, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args.into_command();

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Generate(args) => run_generate(settings, *args).await,
        config::Command::Render(args) => run_render(args).await,
    }
}

async fn run_generate(
    settings: config::Settings,
    args: config::GenerateArgs,
) -> Result<(), AppError> {
    let client = GeminiClient::new(&settings.model)?;
    let model = client.model().to_string();
    let controller = RequestController::new(settings.model.api_key.clone(), Arc::new(client));

    let progress = tokio::spawn(track_progress(
        controller.subscribe(),
        STAGE_INTERVAL,
        |index, stage| info!(stage = index + 1, "{stage}"),
    ));

    let outcome = controller.start(args.preferences.to_preferences()).await;
    debug!(?outcome, "generation finished");
    let state = controller.current();
    drop(controller);
    let _ = progress.await;

    match state {
        RequestState::Complete { content } => {
            let options = PresentOptions {
                emphasis: wants_emphasis(&args.output),
                model: Some(model),
            };
            emit(&args.output, &content, &options).await
        }
        RequestState::Failed { message } => Err(AppError::generation(message)),
        other => Err(AppError::unexpected(format!(
            "generation ended in unexpected state `{}`",
            other.status()
        ))),
    }
}

async fn run_render(args: config::RenderArgs) -> Result<(), AppError> {
    let content = if args.reads_stdin() {
        tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
            .await
            .map_err(|err| AppError::unexpected(format!("stdin reader failed: {err}")))?
            .map_err(InfraError::from)?
    } else {
        tokio::fs::read_to_string(&args.input)
            .await
            .map_err(InfraError::from)?
    };

    let options = PresentOptions {
        emphasis: wants_emphasis(&args.output),
        model: None,
    };
    emit(&args.output, &content, &options).await
}

async fn emit(
    output: &config::OutputArgs,
    content: &str,
    options: &PresentOptions,
) -> Result<(), AppError> {
    let rendered = presentation::present(output.format, content, options)
        .map_err(|err| AppError::unexpected(err.to_string()))?;

    match output.output.as_deref() {
        Some(path) => write_file(path, &rendered).await,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(InfraError::from)?;
            Ok(())
        }
    }
}

async fn write_file(path: &Path, rendered: &str) -> Result<(), AppError> {
    tokio::fs::write(path, rendered)
        .await
        .map_err(InfraError::from)?;
    info!(path = %path.display(), bytes = rendered.len(), "wrote strategy document");
    Ok(())
}

fn wants_emphasis(output: &config::OutputArgs) -> bool {
    output.output.is_none() && std::io::stdout().is_terminal()
}
