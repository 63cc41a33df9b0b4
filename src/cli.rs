//! Command-line interface definition for LexQA
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive sessions, one-shot questions,
//! model listing, and credential setup.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LexQA - Regulation knowledge question answering
///
/// Ask natural-language questions and get answers from a chat-completion
/// model, with session history, ratings, and plain-text export.
#[derive(Parser, Debug, Clone)]
#[command(name = "lexqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for LexQA
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive question-answering session
    Chat {
        /// Model to start the session with
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature override
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Directory for exported answers
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Do not write every answer to the output directory
        #[arg(long)]
        no_export: bool,
    },

    /// Ask a single question and exit
    Ask {
        /// The question to ask
        question: String,

        /// Model to use for this question
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature override
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Directory for the exported answer
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Do not write the answer to the output directory
        #[arg(long)]
        no_export: bool,
    },

    /// List the supported models
    Models {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Store the model backend API key in the system keyring
    Auth,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Models { json: false },
        }
    }
}
