//! CLI entrypoint for tutor-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tutor_application::{NoTranscriptLogger, SendOutcome, SessionController, TranscriptLogger};
use tutor_domain::{Model, ModelCatalog};
use tutor_infrastructure::{
    ConfigLoader, FileConfig, HttpConversationStore, JsonlTranscriptLogger, OllamaGateway,
};
use tutor_presentation::{ChatRepl, Cli, ConsoleFormatter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("could not load configuration")?
    };

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // Diagnostics go to a file when configured, stderr otherwise. The
    // appender guard must outlive the program body.
    let _log_guard = match &config.logging.log_file {
        Some(path) => {
            let directory = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => std::path::Path::new("."),
            };
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("tutor-chat.log");
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(
                    directory, file_name,
                ));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    };

    for issue in config.validate() {
        warn!("config: {issue}");
    }

    info!("Starting tutor-chat");

    // Resolve the active model: CLI flag > config > built-in default
    let model: Model = match &cli.model {
        // Model parsing is infallible; unknown ids become Custom
        Some(id) => id.parse().unwrap(),
        None => config.models.parse_default().unwrap_or_default(),
    };

    let mut catalog = ModelCatalog::built_in();
    catalog.extend(config.models.extra_entries());

    let store_url = cli
        .store_url
        .clone()
        .unwrap_or_else(|| config.endpoints.store_url.clone());
    let inference_url = cli
        .inference_url
        .clone()
        .unwrap_or_else(|| config.endpoints.inference_url.clone());

    // === Dependency Injection ===
    let store = Arc::new(HttpConversationStore::new(store_url));
    let gateway = Arc::new(
        OllamaGateway::new(
            inference_url,
            Duration::from_secs(config.endpoints.request_timeout_secs),
        )
        .context("could not build the inference client")?,
    );

    let mut controller = SessionController::new(store, gateway, model)
        .with_transcript_logger(transcript_logger(&cli, &config));

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(controller, catalog).with_progress(!cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    controller.set_draft(question);
    match controller.send_message().await {
        SendOutcome::Completed { persisted } => {
            if let Some(reply) = controller.session().visible_messages().last() {
                println!("{}", ConsoleFormatter::format_message(reply));
            }
            if !persisted {
                warn!("conversation could not be saved");
            }
        }
        // A fresh controller is never busy; kept for totality
        SendOutcome::RejectedBusy => warn!("a send was already in flight"),
        SendOutcome::NothingToSend => bail!("Question is empty."),
    }

    Ok(())
}

/// Build the transcript sink: a JSONL file under the configured (or
/// platform) data directory, or a no-op when disabled or unavailable.
fn transcript_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn TranscriptLogger> {
    if cli.no_transcript || !config.logging.transcript {
        return Arc::new(NoTranscriptLogger);
    }

    let directory = config
        .logging
        .transcript_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|d| d.join("tutor-chat").join("transcripts")));
    let Some(directory) = directory else {
        return Arc::new(NoTranscriptLogger);
    };

    let file_name = format!("{}.jsonl", chrono::Local::now().format("%Y%m%d-%H%M%S"));
    match JsonlTranscriptLogger::new(directory.join(file_name)) {
        Some(logger) => {
            info!("transcript: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoTranscriptLogger),
    }
}
