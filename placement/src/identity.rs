//! Field identity: provisional client tokens vs. server-assigned ids.
//!
//! A field created locally is shown immediately under a provisional id and is
//! only later replaced by the backend's record. Remote mutations take the
//! server id as a plain `i64`, obtainable only through [`FieldId::persisted`],
//! so a provisional field cannot reach a move/resize/delete/sign request.
//!
//! The legacy string shapes (`temp_…` / `temp-…` for provisional, a positive
//! integer for persisted) are accepted at the boundary by [`FieldId::parse`].

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

const PROVISIONAL_PREFIX: &str = "temp_";
const LEGACY_PROVISIONAL_PREFIX: &str = "temp-";

/// Opaque client-generated token for a field the backend has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProvisionalId(String);

impl ProvisionalId {
    /// Generate a token unique within this client session.
    ///
    /// UUIDv7 combines a millisecond timestamp with random bits, so tokens are
    /// never reused without needing a registry.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{PROVISIONAL_PREFIX}{}", Uuid::now_v7().simple()))
    }

    /// The token's string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a placed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Local-only field awaiting its backend record.
    Provisional(ProvisionalId),
    /// Field confirmed by the backend.
    Persisted(i64),
}

impl FieldId {
    /// A fresh provisional id.
    #[must_use]
    pub fn new_provisional() -> Self {
        Self::Provisional(ProvisionalId::generate())
    }

    #[must_use]
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }

    /// The server id, or `None` for a provisional field.
    #[must_use]
    pub fn persisted(&self) -> Option<i64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Provisional(_) => None,
        }
    }

    /// Parse a wire/string id.
    ///
    /// `temp_…` and `temp-…` are provisional; a positive integer is persisted;
    /// anything else is rejected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if has_provisional_shape(raw) {
            return Some(Self::Provisional(ProvisionalId(raw.to_owned())));
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Some(Self::Persisted(id)),
            _ => None,
        }
    }
}

/// Whether a raw, possibly-missing id refers to a field that is not persisted yet.
///
/// A missing id counts as provisional.
#[must_use]
pub fn is_provisional_raw(raw: Option<&str>) -> bool {
    raw.is_none_or(|s| has_provisional_shape(s.trim()))
}

fn has_provisional_shape(raw: &str) -> bool {
    raw.starts_with(PROVISIONAL_PREFIX) || raw.starts_with(LEGACY_PROVISIONAL_PREFIX)
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provisional(token) => f.write_str(token.as_str()),
            Self::Persisted(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for FieldId {
    fn from(id: i64) -> Self {
        Self::Persisted(id)
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Persisted(id) => serializer.serialize_i64(*id),
            Self::Provisional(token) => serializer.serialize_str(token.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) if id > 0 => Ok(Self::Persisted(id)),
            Raw::Number(id) => Err(serde::de::Error::custom(format!("invalid field id: {id}"))),
            Raw::Text(text) => {
                Self::parse(&text).ok_or_else(|| serde::de::Error::custom(format!("invalid field id: {text}")))
            }
        }
    }
}
