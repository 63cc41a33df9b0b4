//! LexQA - Regulation knowledge question answering library
//!
//! This library provides the single-session core of LexQA: it accepts a
//! natural-language question, forwards it to a chat-completion model,
//! records the exchange in an in-memory session, and exports answers as
//! plain-text files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `providers`: Model client abstraction and the OpenAI-compatible backend
//! - `session`: Query records, the session store, and usage statistics
//! - `controller`: Query lifecycle (validate, ask, record, export)
//! - `export`: Plain-text result files
//! - `commands`: Terminal rendering for the CLI commands
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use lexqa::{providers::create_provider, Config, Outcome, QueryController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config)?;
//!     let mut controller = QueryController::from_config(&config, provider)?;
//!     if let Outcome::Completed { record, .. } = controller.submit("超速會被罰多少錢？").await {
//!         println!("{}", record.response());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Outcome, QueryController};
pub use error::{QaError, Result};
pub use export::ResultExporter;
pub use session::{QueryRecord, SessionStore};
