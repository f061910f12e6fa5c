mod commands;

use app_state::{load_app_settings, load_app_settings_from};
use clap::Parser;
use color_eyre::Result;
use commands::{Command, run};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(version, about = "Manage the media album tree and check StoreApi accounts", long_about = None)]
struct Args {
    /// Settings file, defaults to config/settings.yaml.
    #[clap(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_app_settings_from(path)?,
        None => load_app_settings()?,
    };

    // Logs go to stderr, stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Running {}", args.command.name());
    let output = run(args.command, &settings).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
