//! Special commands parser for interactive sessions
//!
//! Special commands act on the session instead of being sent to the model:
//! - Switch the model or list supported models
//! - Rate the latest answer
//! - Show, inspect, export, or clear the history
//! - View statistics and status
//! - Display help and exit
//!
//! Commands are prefixed with `/`; the command word is case-insensitive.

use crate::session::{MAX_RATING, MIN_RATING};
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Select the model for subsequent questions
    SwitchModel(String),

    /// List supported models, marking the selected one
    ListModels,

    /// Rate the latest answer
    ///
    /// The score is passed through unchecked; the session rejects values
    /// outside 1-5.
    Rate(i64),

    /// Clear the history (the submission counter is kept)
    ClearHistory,

    /// Show the history, most recent first
    ShowHistory,

    /// Show one history entry in full; 1 is the most recent
    ShowRecord(usize),

    /// Export the most recent answer again
    Export,

    /// Show usage statistics
    ShowStats,

    /// Show the current model, temperature, and output settings
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be submitted as a question.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not a
/// valid command, `CommandError::MissingArgument` if a required argument is
/// absent, and `CommandError::UnsupportedArgument` if an argument cannot be parsed.
///
/// # Examples
///
/// ```
/// use lexqa::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/model gpt-4").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchModel("gpt-4".to_string()));
///
/// let cmd = parse_special_command("/rate 5").unwrap();
/// assert_eq!(cmd, SpecialCommand::Rate(5));
///
/// let cmd = parse_special_command("駕照扣分制度如何運作？").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match word.as_str() {
        "/model" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/model".to_string(),
                    usage: "/model <name>".to_string(),
                })
            } else {
                Ok(SpecialCommand::SwitchModel(arg.to_string()))
            }
        }
        "/models" => Ok(SpecialCommand::ListModels),

        "/rate" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/rate".to_string(),
                    usage: format!("/rate <{}-{}>", MIN_RATING, MAX_RATING),
                });
            }
            arg.parse::<i64>()
                .map(SpecialCommand::Rate)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/rate".to_string(),
                    arg: arg.to_string(),
                })
        }

        "/clear" => Ok(SpecialCommand::ClearHistory),
        "/history" => Ok(SpecialCommand::ShowHistory),
        "/show" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/show".to_string(),
                    usage: "/show <n>  (1 = most recent)".to_string(),
                });
            }
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Ok(SpecialCommand::ShowRecord(n)),
                _ => Err(CommandError::UnsupportedArgument {
                    command: "/show".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }
        "/export" => Ok(SpecialCommand::Export),
        "/stats" => Ok(SpecialCommand::ShowStats),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for interactive sessions
pub fn print_help() {
    println!(
        r#"
Interactive Session Commands
============================

ASKING:
  <question>      - Any line not starting with '/' is sent to the model

MODEL:
  /models         - List supported models
  /model <name>   - Switch to a different model

FEEDBACK:
  /rate <1-5>     - Rate the latest answer

HISTORY:
  /history        - List answered questions, most recent first
  /show <n>       - Show entry n in full (1 = most recent)
  /export         - Export the latest answer to the output directory
  /clear          - Clear the history (the query counter is kept)

SESSION INFORMATION:
  /stats          - Show usage statistics
  /status         - Show model, temperature, and export settings
  /help, /?       - Show this help message

EXIT:
  exit, quit      - Exit the session

EXAMPLE QUESTIONS:
  Traffic violations  酒後開車會受到什麼處罰？ 超速會被罰多少錢？ 闖紅燈的處罰規定是什麼？
  Driving licences    考駕照需要哪些條件？ 駕照被吊銷後如何恢復？ 駕照扣分制度如何運作？
  Vehicle management  車輛年檢的規定是什麼？ 車輛報廢的標準是什麼？ 如何辦理車輛過戶？
"#
    );
}
