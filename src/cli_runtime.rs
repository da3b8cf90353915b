use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sfclone::browser::CookieJar;
use sfclone::config::{Settings, StateDir};

use crate::Commands;

#[derive(Parser)]
#[command(name = "sfclone")]
#[command(about = "Clone Salesforce records between orgs", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding settings and the pending record
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Exported browser cookies (JSON) to read the session from
    #[arg(long, global = true, value_name = "FILE")]
    cookies: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let root = match cli.state_dir {
        Some(dir) => dir,
        None => StateDir::default_root()?,
    };
    let state = StateDir::open(&root)?;
    crate::cli_exec::handle_command(&state, cli.cookies.as_deref(), cli.command)
}

fn init_logging(level: &str) -> Result<()> {
    let level: tracing::Level = level.parse().context("invalid log level")?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("install log subscriber")?;
    Ok(())
}

pub(crate) fn require_cookie_jar(settings: &Settings, cookies: Option<&Path>) -> Result<CookieJar> {
    let path = cookies.or(settings.cookie_file.as_deref()).context(
        "no cookie file configured (pass --cookies or run `sfclone config set --cookie-file ...`)",
    )?;
    CookieJar::open(path)
}
