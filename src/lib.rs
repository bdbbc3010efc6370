//! Wardrobe - stylist assistant library
//!
//! This library provides the core functionality for the wardrobe assistant:
//! uploading clothing photos, chatting with a multimodal stylist model that
//! recommends outfits only from those photos, and tracking worn items in a
//! laundry basket.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `stylist`: Session state, image registry, basket and reference extraction
//! - `providers`: Model provider abstraction and implementations (Gemini, Ollama)
//! - `prompts`: Stylist instructions and prompt composition
//! - `commands`: Interactive chat and one-shot command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use wardrobe::providers::create_provider;
//! use wardrobe::stylist::Session;
//! use wardrobe::Config;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider.provider_type, &config.provider)?;
//!     let mut session = Session::new();
//!     session
//!         .upload_path(Path::new("hoodie.png"), config.wardrobe.max_image_bytes)
//!         .await?;
//!
//!     let reply = session.ask(provider.as_ref(), "What goes with jeans?").await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod stylist;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, WardrobeError};
pub use stylist::{ChatReply, ConfirmOutcome, ItemId, Session};

#[cfg(test)]
pub mod test_utils;
