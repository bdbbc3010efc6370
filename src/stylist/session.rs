//! Stylist session state
//!
//! A [`Session`] owns everything one user accumulates while chatting: the
//! uploaded items, the laundry basket, the conversation and the selection
//! recommended by the latest answer. The front end owns the session and
//! passes it by `&mut` to each handler, so no locking is involved.

use super::basket::Basket;
use super::conversation::{Conversation, Turn};
use super::extractor::extract_references;
use super::image::{is_accepted_image, validate_image};
use super::registry::{ImageRecord, ItemId, Registry};
use crate::error::{Result, WardrobeError};
use crate::prompts::build_prompt;
use crate::providers::{GenerateRequest, Provider};

use std::path::Path;

/// Answer to one chat turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Raw model text
    pub text: String,
    /// Items the model cited, in citation order
    pub recommendations: Vec<ItemId>,
    /// 1-based numbers under which each recommendation was shown to the model
    pub indices: Vec<usize>,
}

/// Result of confirming the pending selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// No recommendation is waiting to be confirmed
    NothingPending,
    /// The pending selection was applied to the basket
    Confirmed {
        /// Items newly set aside
        added: Vec<ItemId>,
        /// Items that were already in the basket
        already_present: Vec<ItemId>,
    },
}

/// Outcome of uploading a batch of files
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Identifiers of accepted files, in batch order
    pub accepted: Vec<ItemId>,
    /// Rejected files with the reason each was rejected
    pub rejected: Vec<(String, String)>,
}

impl UploadReport {
    /// Whether every file in the batch was accepted
    pub fn all_accepted(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Per-user session state
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
    basket: Basket,
    conversation: Conversation,
    pending: Vec<ItemId>,
}

impl Session {
    /// Creates an empty session
    ///
    /// # Examples
    ///
    /// ```
    /// use wardrobe::stylist::Session;
    ///
    /// let session = Session::new();
    /// assert!(session.available().is_empty());
    /// assert!(session.pending().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers one upload held in memory
    ///
    /// # Errors
    ///
    /// Returns `WardrobeError::Upload` if the file is rejected; the session
    /// is unchanged in that case
    pub fn upload_bytes(&mut self, name: &str, bytes: Vec<u8>, max_bytes: usize) -> Result<ItemId> {
        let metadata = validate_image(name, &bytes, max_bytes)?;
        let id = self.registry.insert(
            name,
            metadata.format,
            bytes,
            metadata.width,
            metadata.height,
        );

        tracing::info!(
            "Uploaded {} as {} ({}, {}x{})",
            name,
            id.short(),
            metadata.format,
            metadata.width,
            metadata.height
        );

        Ok(id)
    }

    /// Reads, validates and registers one file from disk
    ///
    /// The display name is the file name component of `path`.
    ///
    /// # Errors
    ///
    /// Returns `WardrobeError::Upload` if the file cannot be read or is rejected
    pub async fn upload_path(&mut self, path: &Path, max_bytes: usize) -> Result<ItemId> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if !is_accepted_image(path) {
            return Err(WardrobeError::upload(
                &name,
                "unsupported file type (expected .jpg, .jpeg or .png)",
            )
            .into());
        }

        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| WardrobeError::upload(&name, format!("cannot read file: {}", e)))?
            .len();
        if size > max_bytes as u64 {
            return Err(WardrobeError::upload(
                &name,
                format!("file is {} bytes, limit is {} bytes", size, max_bytes),
            )
            .into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| WardrobeError::upload(&name, format!("cannot read file: {}", e)))?;

        self.upload_bytes(&name, bytes, max_bytes)
    }

    /// Uploads a batch of files one by one
    ///
    /// A rejected file is recorded in the report and does not stop the rest
    /// of the batch.
    pub async fn upload_batch<P: AsRef<Path>>(&mut self, paths: &[P], max_bytes: usize) -> UploadReport {
        let mut report = UploadReport::default();

        for path in paths {
            let path = path.as_ref();
            match self.upload_path(path, max_bytes).await {
                Ok(id) => report.accepted.push(id),
                Err(e) => {
                    tracing::warn!("Rejected upload {}: {}", path.display(), e);
                    report.rejected.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        report
    }

    /// Items not in the basket, in upload order
    ///
    /// This is the enumeration the model sees: position `i` here is the
    /// item the model calls `i + 1`.
    pub fn available(&self) -> Vec<&ImageRecord> {
        self.registry
            .iter()
            .filter(|record| !self.basket.contains(&record.id))
            .collect()
    }

    /// Items in the basket, in the order they were set aside
    pub fn basket_items(&self) -> Vec<&ImageRecord> {
        self.basket
            .ids()
            .iter()
            .filter_map(|id| self.registry.get(id))
            .collect()
    }

    /// Looks up an uploaded item
    ///
    /// # Errors
    ///
    /// Returns `WardrobeError::UnknownItem` if the identifier was never uploaded
    pub fn item(&self, id: &ItemId) -> Result<&ImageRecord> {
        self.registry
            .get(id)
            .ok_or_else(|| WardrobeError::UnknownItem(id.to_string()).into())
    }

    /// Selection recommended by the latest answer
    pub fn pending(&self) -> &[ItemId] {
        &self.pending
    }

    /// Conversation so far, oldest first
    pub fn history(&self) -> &[Turn] {
        self.conversation.turns()
    }

    /// Number of uploaded items, available or not
    pub fn total_items(&self) -> usize {
        self.registry.len()
    }

    /// Number of items in the basket
    pub fn basket_len(&self) -> usize {
        self.basket.len()
    }

    /// Sends one user message to the stylist
    ///
    /// The prompt carries the prior turns only. All available images are
    /// attached in enumeration order; with none available the request is
    /// text-only. Cited numbers are resolved against that same enumeration.
    ///
    /// The turn is committed only when the provider answers: on error the
    /// conversation and the pending selection are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged
    pub async fn ask(&mut self, provider: &dyn Provider, text: &str) -> Result<ChatReply> {
        let available = self.available();
        let available_ids: Vec<ItemId> = available.iter().map(|r| r.id).collect();
        let images = available.iter().map(|r| r.image_part()).collect();

        let prompt = build_prompt(self.conversation.turns(), text);
        let request = GenerateRequest::with_images(images, prompt);

        tracing::debug!(
            "Asking {} ({}) with {} images and {} prior turns",
            provider.name(),
            provider.model(),
            request.images.len(),
            self.conversation.len()
        );

        let response = provider.generate(&request).await?;
        let recommendations = extract_references(&response.text, &available_ids);
        let indices = recommendations
            .iter()
            .filter_map(|id| available_ids.iter().position(|a| a == id))
            .map(|pos| pos + 1)
            .collect();

        let reply_text = response.text.trim().to_string();

        self.conversation.add_user_turn(text);
        self.conversation.add_assistant_turn(reply_text.clone());
        self.pending = recommendations.clone();

        Ok(ChatReply {
            text: reply_text,
            recommendations,
            indices,
        })
    }

    /// Moves the pending selection into the basket
    ///
    /// Items already in the basket are left as they are. The pending
    /// selection is consumed.
    pub fn confirm_selection(&mut self) -> ConfirmOutcome {
        if self.pending.is_empty() {
            return ConfirmOutcome::NothingPending;
        }

        let mut added = Vec::new();
        let mut already_present = Vec::new();
        for id in std::mem::take(&mut self.pending) {
            if self.basket.insert(id) {
                added.push(id);
            } else if !already_present.contains(&id) && !added.contains(&id) {
                already_present.push(id);
            }
        }

        tracing::info!(
            "Confirmed selection: {} added, {} already in basket",
            added.len(),
            already_present.len()
        );

        ConfirmOutcome::Confirmed {
            added,
            already_present,
        }
    }

    /// Empties the basket, returning every item to the available pool
    pub fn clear_basket(&mut self) -> usize {
        let released = self.basket.clear();
        tracing::info!("Cleared basket: {} items returned", released);
        released
    }
}
