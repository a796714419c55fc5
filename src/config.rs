// src/config.rs
use crate::error::EngineError;
use crate::types::ApiToken;
use clap::Parser;
use std::path::PathBuf;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Identifier of the stored recurring task to fire
    pub task_id: String,

    /// Path to the JSON task store
    #[arg(short = 'f', long, default_value = "tasks.json")]
    pub tasks_file: String,

    /// Print the page-creation payload instead of calling the API
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved run settings — validated and ready to drive one fire.
#[derive(Debug)]
pub struct RunSettings {
    pub task_id: String,
    pub tasks_file: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
    pub api_token: ApiToken,
}

impl RunSettings {
    /// Resolve settings from CLI input and environment.
    ///
    /// `NOTION_API_KEY` must be set even for a dry run: reconciliation
    /// always fetches the live schema.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, EngineError> {
        let api_key = std::env::var("NOTION_API_KEY").map_err(|_| {
            EngineError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        let api_token = ApiToken::new(api_key)?;

        Ok(RunSettings {
            task_id: cli.task_id,
            tasks_file: PathBuf::from(cli.tasks_file),
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            api_token,
        })
    }
}
