/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.
They are the rendering side of LexQA: they collect input, call into the
query controller, and display what it returns.

- `chat`   - Interactive question-answering session
- `ask`    - Answer a single question
- `auth`   - Store the API key in the system keyring
- `models` - List the supported models
*/

use crate::config::Config;
use crate::controller::{Outcome, QueryController};
use crate::error::{QaError, Result};
use crate::providers::create_provider;
use colored::Colorize;

// History, record, and statistics rendering
pub mod history;

// Model listing
pub mod models;

// Special commands parser for interactive sessions
pub mod special_commands;

/// Build a controller from configuration, resolving the provider
fn build_controller(config: &Config) -> Result<QueryController> {
    let provider = create_provider(config)?;
    Ok(QueryController::from_config(config, provider)?)
}

/// Print the outcome of a submission
///
/// Returns true if the outcome was `Completed`.
pub fn print_outcome(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Completed { record, export } => {
            println!("{}", "Answer complete".green());
            history::print_record(record);
            match export {
                Some(Ok(path)) => println!("Saved to {}", path.display().to_string().cyan()),
                Some(Err(e)) => println!(
                    "{}",
                    format!("Could not save the answer: {}. Use /export to retry.", e).yellow()
                ),
                None => {}
            }
            true
        }
        Outcome::Rejected(reason) => {
            println!("{}", format!("Please enter a question ({})", reason).red());
            false
        }
        Outcome::Failed(error) => {
            println!("{}", format!("The question could not be answered: {}", error).red());
            if matches!(error, QaError::Authentication(_)) {
                println!("Check {} or run `lexqa auth`.", crate::config::API_KEY_ENV);
            }
            false
        }
    }
}

// Interactive session handler
pub mod chat {
    //! Interactive session handler.
    //!
    //! Creates the provider and a query controller, then runs a
    //! readline-based loop: plain lines are submitted as questions and
    //! `/`-prefixed lines are special commands acting on the session.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive session
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration with command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created (for example, no API
    /// key) or the terminal cannot be read. Failures of individual questions
    /// are displayed and the session continues.
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive session");

        let mut controller = build_controller(&config)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&controller);

        loop {
            let prompt = format!("[{}] >> ", controller.session().selected_model().cyan());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    if command != SpecialCommand::None {
                        if handle_special_command(&mut controller, command) {
                            break;
                        }
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "Thinking...".dimmed());
                    let outcome = controller.submit(trimmed).await;
                    if print_outcome(&outcome) {
                        println!("Rate this answer with {}", "/rate <1-5>".cyan());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return Err(e.into());
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Apply a special command to the session
    ///
    /// Returns true if the session should end.
    pub fn handle_special_command(controller: &mut QueryController, command: SpecialCommand) -> bool {
        match command {
            SpecialCommand::SwitchModel(model) => match controller.set_model(&model) {
                Ok(()) => println!("Switched to model {}\n", model.green()),
                Err(e) => println!(
                    "{}\nSupported models: {}\n",
                    e.to_string().red(),
                    controller.session().supported_models().join(", ")
                ),
            },
            SpecialCommand::ListModels => {
                let entries = models::model_entries(
                    controller.session().supported_models(),
                    controller.session().selected_model(),
                );
                models::print_model_table(&entries);
            }
            SpecialCommand::Rate(score) => match controller.set_rating(score) {
                Ok(()) => println!("Thank you for your rating: {}\n", "*".repeat(score as usize).yellow()),
                Err(e) => println!("{}\n", e.to_string().red()),
            },
            SpecialCommand::ClearHistory => {
                controller.clear_history();
                println!("{}\n", "History cleared".green());
            }
            SpecialCommand::ShowHistory => history::print_history(&controller.session().snapshot()),
            SpecialCommand::ShowRecord(n) => {
                if !history::print_nth_record(&controller.session().snapshot(), n) {
                    println!("{}\n", format!("No history entry {}", n).yellow());
                }
            }
            SpecialCommand::Export => match controller.session().latest() {
                Some(record) => match controller.export(record) {
                    Ok(path) => println!("Saved to {}\n", path.display().to_string().cyan()),
                    Err(e) => println!("{}\n", format!("Export failed: {}", e).red()),
                },
                None => println!("{}\n", "Nothing to export yet".yellow()),
            },
            SpecialCommand::ShowStats => history::print_stats(&controller.session().snapshot()),
            SpecialCommand::ShowStatus => print_status(controller),
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit => return true,
            SpecialCommand::None => {}
        }
        false
    }

    fn print_welcome_banner(controller: &QueryController) {
        println!();
        println!("{}", "LexQA - Regulation Knowledge Q&A".bold());
        println!("Ask questions about vehicle and traffic regulations.");
        println!(
            "Model: {}  Temperature: {}",
            controller.session().selected_model().cyan(),
            controller.temperature()
        );
        println!("Type {} for commands, {} to leave.\n", "/help".cyan(), "exit".cyan());
    }

    fn print_status(controller: &QueryController) {
        let session = controller.session();
        println!();
        println!("Provider:      {}", controller.provider_name());
        println!("Model:         {}", session.selected_model().cyan());
        println!("Temperature:   {}", controller.temperature());
        println!("Total queries: {}", session.total_queries());
        println!("In history:    {}", session.history().len());
        println!(
            "Auto-export:   {} ({})",
            if controller.auto_export() { "on" } else { "off" },
            controller.exporter().output_dir().display()
        );
        println!();
    }
}

// One-shot question handler
pub mod ask {
    //! Answer a single question and exit.

    use super::*;

    /// Ask one question
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created, or if the question
    /// is rejected or fails, so the process exits with a non-zero status.
    pub async fn run_ask(config: Config, question: String) -> Result<()> {
        let mut controller = build_controller(&config)?;
        let outcome = controller.submit(&question).await;
        print_outcome(&outcome);

        match outcome {
            Outcome::Completed { .. } => Ok(()),
            Outcome::Rejected(reason) => Err(reason.into()),
            Outcome::Failed(error) => Err(error.into()),
        }
    }
}

// Credential setup handler
pub mod auth {
    //! Store the API key in the system keyring.

    use super::*;
    use crate::config::{KEYRING_SERVICE, KEYRING_USER};
    use rustyline::DefaultEditor;

    /// Prompt for an API key and store it in the keyring
    ///
    /// # Errors
    ///
    /// Returns error if the terminal cannot be read, the key is empty, or
    /// the keyring rejects the entry
    pub fn authenticate() -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let key = rl.readline("API key: ")?;
        let key = key.trim();
        if key.is_empty() {
            return Err(QaError::Authentication("API key cannot be empty".to_string()).into());
        }

        store_api_key(key)?;
        println!("{}", "API key stored in the system keyring".green());
        Ok(())
    }

    /// Store an API key in the keyring
    pub fn store_api_key(key: &str) -> std::result::Result<(), QaError> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
        entry.set_password(key)?;
        tracing::info!("Stored API key in keyring service '{}'", KEYRING_SERVICE);
        Ok(())
    }
}
