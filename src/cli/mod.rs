//! Command-line entry points
//!
//! - `serve`: run the HTTP API
//! - `ask`: answer one question and print the result as JSON
//! - `seed`: load known question/answer pairs from a JSON file

pub mod ask;
pub mod seed;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::observability::init_tracing;

/// Semantic question answering with a similarity cache
#[derive(Parser, Debug)]
#[command(name = "semantic-qa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer a single question
    Ask {
        /// The question to answer
        question: String,
    },

    /// Add question/answer pairs from a JSON array of `{question, answer}`
    Seed {
        /// Path to the JSON file
        file: PathBuf,
    },
}

/// Load `.env` and configuration, then install the subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging, &config.observability.tracing)?;

    Ok(config)
}
