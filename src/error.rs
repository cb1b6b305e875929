//!
//! Defines error types for the platform access layer.

use crate::types::{CapabilityName, RoleSlug};

/// Represents errors that can occur while reading or mutating role and
/// capability state, or while dispatching administrative actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The host's role registry could not be loaded. Fatal for the operation;
    /// nothing has been partially applied when this surfaces from a listing.
    #[error("role registry unavailable: {0}")]
    RegistryUnavailable(String),
    /// The named role does not exist in the registry. Tolerated (skipped)
    /// inside reconciliation loops; an error where a caller named the role
    /// explicitly.
    #[error("role `{0}` not found in the registry")]
    RoleNotFound(RoleSlug),
    /// The caller does not hold the capability required for the action.
    #[error("caller lacks the `{0}` capability")]
    PermissionDenied(CapabilityName),
    /// The action token is missing, unknown, or already spent.
    #[error("action token is invalid")]
    InvalidToken,
    /// The dispatched action name is not recognized.
    #[error("unknown admin action `{0}`")]
    UnknownAction(String),
    /// Encoding or decoding the action envelope failed.
    #[error("envelope serialization failed: {0}")]
    Serialization(String),
}

// serde_json::Error is neither Clone nor Eq, so carry its rendering instead.
impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::Serialization(err.to_string())
    }
}
