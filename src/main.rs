//! ai-commit - CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ai_commit::config::{self, ConfigStore};
use ai_commit::error::single_line;
use ai_commit::{GeneratorKind, GitCli, Outcome, Pipeline, RunMode, create_generator};

/// Generate a commit message from staged changes and commit it.
#[derive(Parser, Debug)]
#[command(name = "ai-commit")]
#[command(about = "Generate a conventional commit message from staged changes and commit it")]
#[command(version)]
struct Cli {
    /// Print the generated message instead of committing
    #[arg(long)]
    debug: bool,

    /// Generator backend to use (openai, enterprise) [default: openai]
    #[arg(long)]
    generator: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", single_line(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber filtered by RUST_LOG (default: warn).
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // A missing .env file is fine
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let store = ConfigStore::default_location()?;
    let config = config::resolve(&store, config::prompt_api_key)?;

    let kind: GeneratorKind = config.generator_name(cli.generator.as_deref()).parse()?;
    let generator = create_generator(kind, &config.generator_settings())?;

    let workdir = std::env::current_dir()?;
    let pipeline = Pipeline::new(GitCli::new(&workdir), generator, workdir);

    match pipeline.run(RunMode::from_debug_flag(cli.debug)).await? {
        Outcome::DryRun(message) => println!("{}", message),
        Outcome::Committed(message) => println!("Committed: {}", message),
    }

    Ok(())
}
