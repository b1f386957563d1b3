//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the coverage stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `PartnerId` where a `BroadcastId` is expected.
//!
//! `ShiftRef` and `LocationRef` are deliberately opaque: the escalation
//! engine carries them for correlation and display but never interprets
//! their contents. They belong to the roster subsystem.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Unique identifier for one shift-coverage broadcast lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BroadcastId(pub Uuid);

/// Unique identifier for an external staffing partner (agency).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerId(pub Uuid);

/// Opaque reference to a shift in the roster subsystem.
///
/// Not interpreted by the engine; format is owned by the roster service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftRef(pub String);

/// Opaque reference to a location/department in the staff directory.
///
/// Not interpreted by the engine; format is owned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRef(pub String);

/// Stable identifier of a configured escalation rule.
///
/// Applied rules are tagged into the escalation history by this identifier,
/// which is what makes rule application idempotent under repeated
/// evaluation. Rule ids come from tenant configuration and must be
/// non-empty and unique within a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(String);

impl BroadcastId {
    /// Generate a new random broadcast identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BroadcastId {
    fn default() -> Self {
        Self::new()
    }
}

impl PartnerId {
    /// Generate a new random partner identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PartnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftRef {
    /// Wrap a roster-subsystem shift reference.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Access the raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl LocationRef {
    /// Wrap a directory-subsystem location reference.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Access the raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RuleId {
    /// Create a rule identifier from configuration.
    ///
    /// # Errors
    ///
    /// Rejects empty or whitespace-only identifiers — a blank id would make
    /// the applied-rule tags in the escalation history ambiguous.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyRuleId);
        }
        Ok(Self(raw))
    }

    /// Access the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "broadcast:{}", self.0)
    }
}

impl std::fmt::Display for PartnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "partner:{}", self.0)
    }
}

impl std::fmt::Display for ShiftRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for LocationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
