use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use sfclone::browser::{DirStorage, FixedTab};
use sfclone::config::StateDir;
use sfclone::model::FieldSelection;
use sfclone::orchestrator::Orchestrator;
use sfclone::remote::RestConnector;

use crate::cli_runtime::require_cookie_jar;
use crate::{Commands, ConfigCommands};

#[derive(Serialize)]
struct ObjectRow {
    key_prefix: String,
    api_name: String,
    custom_setting: bool,
    record_url_template: String,
}

fn print_json<T: Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}

/// Wires the file-backed collaborators for one action against `url`.
fn with_orchestrator<T>(
    state: &StateDir,
    cookies: Option<&Path>,
    url: String,
    action: impl FnOnce(&Orchestrator<'_>) -> sfclone::Result<T>,
) -> Result<T> {
    let settings = state.read_settings()?;
    let jar = require_cookie_jar(&settings, cookies)?;
    let storage = DirStorage::open(&state.storage_dir())?;
    let connector = RestConnector::new(settings);
    let tab = FixedTab::new(url);
    let orchestrator = Orchestrator::new(&tab, &jar, &connector, &storage);
    Ok(action(&orchestrator)?)
}

pub(crate) fn handle_command(
    state: &StateDir,
    cookies: Option<&Path>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Select { url, fields, json } => {
            let selection = fields
                .as_deref()
                .map(FieldSelection::parse_list)
                .unwrap_or_default();
            let selected =
                with_orchestrator(state, cookies, url, |o| o.select_source_record(&selection))?;
            if json {
                print_json(&selected, "selection")?;
            } else {
                println!(
                    "Selected {} {} ({} fields) from {}",
                    selected.object_api_name,
                    selected.record_id,
                    selected.field_count,
                    selected.instance_url
                );
            }
        }
        Commands::Clone { url, json } => {
            let outcome = with_orchestrator(state, cookies, url, |o| o.clone_to_destination())?;
            if json {
                print_json(&outcome, "clone outcome")?;
            } else {
                println!(
                    "Created {} {} in {}",
                    outcome.object_api_name, outcome.new_id, outcome.instance_url
                );
            }
        }
        Commands::Objects { url, json } => {
            let objects = with_orchestrator(state, cookies, url, |o| o.list_objects())?;
            if json {
                let rows = objects
                    .into_iter()
                    .map(|(key_prefix, d)| ObjectRow {
                        key_prefix,
                        api_name: d.api_name,
                        custom_setting: d.is_custom_setting,
                        record_url_template: d.record_url_template,
                    })
                    .collect::<Vec<_>>();
                print_json(&rows, "objects")?;
            } else {
                for (prefix, d) in objects {
                    let kind = if d.is_custom_setting {
                        " (custom setting)"
                    } else {
                        ""
                    };
                    println!("{} {}{}", prefix, d.api_name, kind);
                }
            }
        }
        Commands::Config { command } => handle_config(state, command)?,
    }

    Ok(())
}

fn handle_config(state: &StateDir, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let settings = state.read_settings()?;
            if json {
                print_json(&settings, "settings")?;
            } else {
                println!("state_dir: {}", state.root().display());
                println!("api_version: {}", settings.api_version);
                println!("timeout_secs: {}", settings.timeout_secs);
                match &settings.cookie_file {
                    Some(p) => println!("cookie_file: {}", p.display()),
                    None => println!("cookie_file: (none)"),
                }
            }
        }
        ConfigCommands::Set {
            api_version,
            timeout_secs,
            cookie_file,
        } => {
            let mut settings = state.read_settings()?;
            if let Some(v) = api_version {
                settings.api_version = v;
            }
            if let Some(t) = timeout_secs {
                settings.timeout_secs = t;
            }
            if let Some(p) = cookie_file {
                settings.cookie_file =
                    Some(std::path::absolute(&p).context("resolve cookie file path")?);
            }
            state.write_settings(&settings)?;
            println!("Updated settings in {}", state.root().display());
        }
    }
    Ok(())
}
