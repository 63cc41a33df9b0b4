//! Model listing command for LexQA
//!
//! Lists the model identifiers a session may select, marking the default
//! (or, inside a session, the currently selected) model.

use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use prettytable::{format, Table};
use serde::Serialize;

/// One row of the model listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    /// Model identifier
    pub name: String,
    /// Whether this is the selected model
    pub selected: bool,
}

/// Build the model listing
///
/// # Examples
///
/// ```
/// use lexqa::commands::models::model_entries;
///
/// let supported = vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()];
/// let entries = model_entries(&supported, "gpt-4");
/// assert!(entries[1].selected);
/// ```
pub fn model_entries(supported: &[String], selected: &str) -> Vec<ModelEntry> {
    supported
        .iter()
        .map(|name| ModelEntry {
            name: name.clone(),
            selected: name == selected,
        })
        .collect()
}

/// List the supported models from configuration
///
/// # Arguments
///
/// * `config` - Configuration containing the model settings
/// * `json` - Print JSON instead of a table
///
/// # Errors
///
/// Returns error if JSON serialization fails
pub fn list_models(config: &Config, json: bool) -> Result<()> {
    tracing::info!("Listing supported models");
    let entries = model_entries(&config.model.supported, &config.model.default);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_model_table(&entries);
    }
    Ok(())
}

/// Print a model listing as a table
pub fn print_model_table(entries: &[ModelEntry]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Model".bold(), "Selected".bold()]);

    for entry in entries {
        let marker = if entry.selected {
            "*".green().to_string()
        } else {
            String::new()
        };
        table.add_row(prettytable::row![entry.name, marker]);
    }

    println!("\nSupported Models:");
    table.printstd();
    println!();
}
