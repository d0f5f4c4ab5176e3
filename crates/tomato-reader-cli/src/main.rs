/*
[INPUT]:  CLI arguments, optional YAML configuration file
[OUTPUT]: JSON results of reading-API commands on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomato_reader_cli::{Command, ReaderConfig, run};

#[derive(Parser, Debug)]
#[command(name = "tomato-reader", version, about = "Signed client for the reading API")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    info!(
        base_url = %config.api.base_url,
        signer = ?config.signer,
        "configuration loaded"
    );

    let output = run(args.command, &config).await?;
    println!("{output}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<ReaderConfig> {
    match path {
        Some(path) => ReaderConfig::from_file(path).context("load config"),
        None => Ok(ReaderConfig::default()),
    }
}
