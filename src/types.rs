//!
//! Shared identifier types for the platform access layer.
//!
//! `RoleSlug` and `CapabilityName` are thin wrappers over `String`: the host
//! registry is a string-keyed store, and everything this crate does is
//! bookkeeping over those keys. Keeping them as distinct types stops a
//! capability name from being passed where a role slug is expected.

use std::fmt;

/// Slug of the host's privileged role. Not owned by this crate, but always
/// granted the full platform capability universe.
pub const ADMINISTRATOR_SLUG: &str = "administrator";

/// Identifies a role in the host registry (e.g. `platform_finance`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RoleSlug(String);

impl RoleSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        RoleSlug(slug.into())
    }

    /// The host's privileged role.
    pub fn administrator() -> Self {
        RoleSlug(ADMINISTRATOR_SLUG.to_string())
    }

    pub fn is_administrator(&self) -> bool {
        self.0 == ADMINISTRATOR_SLUG
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleSlug {
    fn from(slug: &str) -> Self {
        RoleSlug(slug.to_string())
    }
}

impl From<String> for RoleSlug {
    fn from(slug: String) -> Self {
        RoleSlug(slug)
    }
}

/// Identifies a capability flag (e.g. `view_orders`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CapabilityName(String);

impl CapabilityName {
    pub fn new(name: impl Into<String>) -> Self {
        CapabilityName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityName {
    fn from(name: &str) -> Self {
        CapabilityName(name.to_string())
    }
}

impl From<String> for CapabilityName {
    fn from(name: String) -> Self {
        CapabilityName(name)
    }
}
