//! Wardrobe domain: uploaded items, the laundry basket and the stylist chat
//!
//! # Structure
//!
//! - `registry`: append-only store of uploaded images
//! - `basket`: items set aside as worn
//! - `conversation`: chat history
//! - `extractor`: recovers cited items from model text
//! - `image`: upload validation
//! - `session`: per-user state tying the above together

pub mod basket;
pub mod conversation;
pub mod extractor;
pub mod image;
pub mod registry;
pub mod session;

pub use basket::Basket;
pub use conversation::{Conversation, Role, Turn};
pub use extractor::extract_references;
pub use image::{ImageFormat, ImageMetadata};
pub use registry::{ImageRecord, ItemId, Registry};
pub use session::{ChatReply, ConfirmOutcome, Session, UploadReport};
