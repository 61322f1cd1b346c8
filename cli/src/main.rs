mod console;
mod prompt;
mod scenario;

use std::fs::File;
use std::io::{stdout, BufReader};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crossbeam_channel::unbounded;
use stk::{Config, Dispatcher};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{ConsolePresenter, JsonCard};
use crate::scenario::Scenario;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The session stopped unexpectedly: {0}")]
    Session(#[from] stk::Error),

    #[error("The prompt thread panicked")]
    PromptPanicked,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to a JSON file with the session configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replays a recorded scenario, printing every response to the card as a JSON line.
    Replay {
        /// Path to the scenario file.
        scenario: PathBuf,
    },

    /// Feeds the card's side of a scenario, asking the user for every response.
    Interactive {
        /// Path to the scenario file. Its user responses are skipped.
        scenario: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?),
        None => Ok(Config::default()),
    }
}

fn replay(config: Config, scenario: Scenario) -> Result<()> {
    let presenter = ConsolePresenter::new(scenario.language, None);
    let mut dispatcher = Dispatcher::new(presenter, JsonCard::new(stdout()), config);
    let handle = dispatcher.handle();

    for step in scenario.steps {
        step.post(&handle)?;
        dispatcher.run_pending();
    }

    Ok(())
}

fn interactive(config: Config, scenario: Scenario) -> Result<()> {
    let (prompts, prompt_inbox) = unbounded();
    let presenter = ConsolePresenter::new(scenario.language, Some(prompts));
    let mut dispatcher = Dispatcher::new(presenter, JsonCard::new(stdout()), config);
    let handle = dispatcher.handle();
    let worker = prompt::spawn(prompt_inbox, handle.clone());

    for step in scenario.steps {
        match step.is_user_response() {
            true => warn!("Skipping a recorded user response"),
            _ => step.post(&handle)?,
        }
    }

    info!("Session started, leave the main menu to quit");
    dispatcher.run();

    worker.join().map_err(|_| Error::PromptPanicked)?
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { scenario } => replay(config, Scenario::open(&scenario)?),
        Commands::Interactive { scenario } => interactive(config, Scenario::open(&scenario)?),
    }
}
