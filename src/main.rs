// src/main.rs

use clap::Parser;
use notion_recur::{
    ApiToken, CommandLineInput, EngineError, EnvAccessGrants, JsonTaskStore, NotionHttpClient,
    PageWriter, RecurrenceEngine, RunOutcome, RunSettings,
};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use serde_json::{Map, Value};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_recur.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Page writer that prints the payload instead of calling the API.
struct DryRunPageWriter;

#[async_trait::async_trait]
impl PageWriter for DryRunPageWriter {
    async fn create_page(
        &self,
        _token: &ApiToken,
        database_id: &str,
        properties: Map<String, Value>,
    ) -> Result<(), EngineError> {
        let body = serde_json::json!({
            "parent": {"database_id": database_id},
            "properties": properties,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }
}

async fn fire_task(settings: &RunSettings) -> Result<RunOutcome, EngineError> {
    let client = Arc::new(NotionHttpClient::new()?);
    let store = Arc::new(JsonTaskStore::open(&settings.tasks_file)?);
    let grants = Arc::new(EnvAccessGrants::with_token(settings.api_token.clone()));

    let pages: Arc<dyn PageWriter> = if settings.dry_run {
        Arc::new(DryRunPageWriter)
    } else {
        client.clone()
    };

    let engine = RecurrenceEngine::new(client, pages, store.clone(), grants, store);
    engine.run_scheduled_creation(&settings.task_id).await
}

#[tokio::main]
async fn main() {
    let cli = CommandLineInput::parse();

    if let Err(err) = setup_logging(cli.verbose) {
        eprintln!("Failed to set up logging: {}", err);
        std::process::exit(1);
    }

    let settings = match RunSettings::resolve(cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    match fire_task(&settings).await {
        Ok(RunOutcome::Created) => {
            log::info!("Page created for task {}", settings.task_id);
            if !settings.dry_run {
                println!("Created a new page for task {}.", settings.task_id);
            }
        }
        Ok(RunOutcome::SkippedUnbound) => {
            eprintln!(
                "Task {} is not bound to a database; nothing was created.",
                settings.task_id
            );
        }
        Ok(RunOutcome::BindingCleared) => {
            eprintln!(
                "The database for task {} is no longer reachable; its binding was cleared.",
                settings.task_id
            );
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
