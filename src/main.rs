use std::path::PathBuf;

use clap::Subcommand;

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
enum Commands {
    /// Select the record open at URL as the clone source
    Select {
        /// URL of the record detail page
        #[arg(long)]
        url: String,
        /// Comma-separated field API names to carry over (defaults to every writable field)
        #[arg(long)]
        fields: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Insert the pending record into the org open at URL
    Clone {
        /// Any page URL of the destination org
        #[arg(long)]
        url: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List the object types of the org open at URL
    Objects {
        #[arg(long)]
        url: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change settings
    Set {
        /// REST API version, e.g. v35.0
        #[arg(long)]
        api_version: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Default cookie export file
        #[arg(long, value_name = "FILE")]
        cookie_file: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
