//! Command-line interface definition for the wardrobe assistant
//!
//! This module defines the CLI structure using clap's derive API,
//! providing an interactive chat command and a one-shot ask command.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wardrobe - chat with a stylist about the clothes you actually own
///
/// Upload photos of your clothes, ask for outfit ideas, and keep track of
/// what you've already worn in the laundry basket.
#[derive(Parser, Debug, Clone)]
#[command(name = "wardrobe")]
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

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive stylist session
    Chat {
        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Clothing images to upload before the session starts (jpg, jpeg, png)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },

    /// Ask the stylist a single question and exit
    Ask {
        /// The question to ask
        #[arg(long)]
        prompt: String,

        /// Clothing images to upload for this question (jpg, jpeg, png)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Print the answer and recommendations as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat {
                provider: None,
                images: Vec::new(),
            },
        }
    }
}
