//! Document model: placed fields, their status and content, and the in-memory store.
//!
//! This module defines what sits on a page (`Field`, `FieldType`,
//! `FieldStatus`, `RenderedContent`), the request shape for a not-yet-created
//! field (`NewField`), and the ordered store that owns all fields of the open
//! document (`FieldSet`).
//!
//! Data flows into this layer from the backend (wholesale snapshots) and from
//! the reconciliation layer (optimistic patches). The overlay renderer reads
//! from `FieldSet` via `on_page`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::identity::FieldId;

/// The kind of data a field captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Full signature. The only type required for completion.
    #[default]
    Signature,
    /// Initials.
    Initials,
    /// Printed full name.
    Name,
    /// Signing date.
    Date,
    /// Free text.
    Text,
}

impl FieldType {
    /// Every field type, in palette order.
    pub const ALL: [Self; 5] = [Self::Signature, Self::Initials, Self::Name, Self::Date, Self::Text];

    /// Whether a pending field of this type blocks finalizing the document.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Self::Signature)
    }

    /// Parse the palette drag payload / wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "signature" => Some(Self::Signature),
            "initials" => Some(Self::Initials),
            "name" => Some(Self::Name),
            "date" => Some(Self::Date),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::Initials => "initials",
            Self::Name => "name",
            Self::Date => "date",
            Self::Text => "text",
        }
    }

    /// Placeholder label shown inside a pending field.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Signature => "Sign here",
            Self::Initials => "Add initials",
            Self::Name => "Full Name",
            Self::Date => "Date",
            Self::Text => "Text",
        }
    }

    /// Icon shown above the placeholder label.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Signature => "✍️",
            Self::Initials => "🔤",
            Self::Name => "👤",
            Self::Date => "📅",
            Self::Text => "📝",
        }
    }
}

/// Signing status of a field. Only ever moves `Pending → Signed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    #[default]
    Pending,
    Signed,
}

/// Overall status of the document being signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Signed,
    Rejected,
}

impl DocumentStatus {
    /// Whether the document no longer accepts field edits.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Signed | Self::Rejected)
    }
}

/// What a signed field displays. Image and text are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedContent {
    /// Uploaded signature image, referenced by its stored filename/path.
    Image { path: String },
    /// Image submitted locally whose stored reference is not known yet.
    PendingImage,
    /// Typed text rendered in the given font.
    Text { text: String, font: String },
}

/// A field placed on a document page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    /// 1-based page the field belongs to.
    pub page_number: u32,
    /// Committed geometry in page fractions.
    pub rect: Rect,
    pub field_type: FieldType,
    pub status: FieldStatus,
    /// Display name of the assigned signer, if the backend knows it.
    pub signer_name: Option<String>,
    /// Email of the assigned signer, if the backend knows it.
    pub signer_email: Option<String>,
    /// Present once the field is signed.
    pub content: Option<RenderedContent>,
}

impl Field {
    /// A fresh pending field under a new provisional id.
    #[must_use]
    pub fn provisional(new: &NewField) -> Self {
        Self {
            id: FieldId::new_provisional(),
            page_number: new.page_number,
            rect: new.rect,
            field_type: new.field_type,
            status: FieldStatus::Pending,
            signer_name: None,
            signer_email: None,
            content: None,
        }
    }

    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.status == FieldStatus::Signed
    }

    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.id.is_provisional()
    }
}

/// Geometry and type of a field about to be created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewField {
    pub page_number: u32,
    pub rect: Rect,
    pub field_type: FieldType,
}

/// Ordered in-memory store of the document's fields.
///
/// Order is the backend's list order, with locally created fields appended.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Replace all fields with a full snapshot.
    pub fn replace_all(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    /// Insert a field, replacing any field with the same id in place.
    pub fn insert(&mut self, field: Field) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.id == field.id) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
    }

    /// Remove a field by id, returning it if it was present.
    pub fn remove(&mut self, id: &FieldId) -> Option<Field> {
        let index = self.fields.iter().position(|f| &f.id == id)?;
        Some(self.fields.remove(index))
    }

    /// Return a reference to a field by id.
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &FieldId) -> bool {
        self.get(id).is_some()
    }

    /// Overwrite a field's committed geometry. Returns false if the field doesn't exist.
    pub fn patch_rect(&mut self, id: &FieldId, rect: Rect) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| &f.id == id) else {
            return false;
        };
        field.rect = rect;
        true
    }

    /// Mark a field signed with the given content. Returns false if the field doesn't exist.
    pub fn mark_signed(&mut self, id: &FieldId, content: RenderedContent) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| &f.id == id) else {
            return false;
        };
        field.status = FieldStatus::Signed;
        field.content = Some(content);
        true
    }

    /// Fields on the given 1-based page, in store order.
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.page_number == page)
    }

    /// All fields in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Number of `signature` fields still pending.
    #[must_use]
    pub fn pending_required(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.field_type.is_required() && !f.is_signed())
            .count()
    }

    /// Number of signed fields of any type.
    #[must_use]
    pub fn signed_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_signed()).count()
    }

    /// Clone the fields out in store order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Field> {
        self.fields.clone()
    }

    /// Number of fields currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the store contains no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
