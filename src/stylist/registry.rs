//! In-memory image registry
//!
//! Append-only, insertion-ordered store of uploaded wardrobe items. Records
//! are immutable once inserted and live as long as the session.

use super::image::ImageFormat;
use crate::providers::ImagePart;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identifier of an uploaded item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generates a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight characters, for compact display
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One uploaded image
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Unique identifier
    pub id: ItemId,
    /// Display name (the uploaded file name)
    pub name: String,
    /// Validated format
    pub format: ImageFormat,
    /// Raw file contents
    pub bytes: Arc<[u8]>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageRecord {
    /// The record as an image part for a model request
    pub fn image_part(&self) -> ImagePart {
        ImagePart::new(self.format.mime_type(), Arc::clone(&self.bytes))
    }

    /// Size of the image in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Insertion-ordered map from [`ItemId`] to [`ImageRecord`]
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<ImageRecord>,
    index: HashMap<ItemId, usize>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its identifier
    ///
    /// Identifiers are generated fresh for every insert, so two uploads of
    /// the same file produce two distinct entries.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        format: ImageFormat,
        bytes: impl Into<Arc<[u8]>>,
        width: u32,
        height: u32,
    ) -> ItemId {
        let mut id = ItemId::new();
        while self.index.contains_key(&id) {
            id = ItemId::new();
        }

        self.index.insert(id, self.records.len());
        self.records.push(ImageRecord {
            id,
            name: name.into(),
            format,
            bytes: bytes.into(),
            width,
            height,
        });
        id
    }

    /// Looks up a record by identifier
    pub fn get(&self, id: &ItemId) -> Option<&ImageRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Whether the identifier is registered
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
