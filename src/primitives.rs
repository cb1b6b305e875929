use std::collections::{BTreeMap, BTreeSet};

use crate::types::{CapabilityName, RoleSlug};

// --- Capability metadata ----------------------------------------------------

/// A capability as declared by a provider: the flag name plus the
/// human-readable description shown in the permissions UI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilityDescriptor {
    pub name: CapabilityName,
    pub description: String,
}

impl CapabilityDescriptor {
    pub fn new(name: impl Into<CapabilityName>, description: impl Into<String>) -> Self {
        CapabilityDescriptor {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One provider's capabilities, grouped for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilityGroup {
    /// Stable group key (e.g. `orders`).
    pub key: String,
    /// Display label (e.g. `Orders`).
    pub label: String,
    pub capabilities: Vec<CapabilityDescriptor>,
}

// --- Owned roles ------------------------------------------------------------

/// A role this crate creates and is responsible for resetting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OwnedRole {
    pub slug: RoleSlug,
    pub display_name: String,
}

impl OwnedRole {
    pub fn new(slug: impl Into<RoleSlug>, display_name: impl Into<String>) -> Self {
        OwnedRole {
            slug: slug.into(),
            display_name: display_name.into(),
        }
    }
}

// --- Desired state ----------------------------------------------------------

/// The static role → capability table this crate reconciles the registry
/// against. Derived once from the registered providers; never persisted.
///
/// Ownership is the enumerable set of slugs in this table. A role the table
/// does not mention is foreign, no matter what its slug looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredState {
    roles: Vec<OwnedRole>,
    assignments: BTreeMap<RoleSlug, BTreeSet<CapabilityName>>,
    universe: BTreeSet<CapabilityName>,
}

impl DesiredState {
    /// Assembles the table. Every owned role gets an entry, even when no
    /// provider assigns it anything.
    pub fn new(
        roles: Vec<OwnedRole>,
        assignments: BTreeMap<RoleSlug, BTreeSet<CapabilityName>>,
        universe: BTreeSet<CapabilityName>,
    ) -> Self {
        let mut assignments = assignments;
        for role in &roles {
            assignments.entry(role.slug.clone()).or_default();
        }
        DesiredState {
            roles,
            assignments,
            universe,
        }
    }

    pub fn owned_roles(&self) -> &[OwnedRole] {
        &self.roles
    }

    /// True when the slug is in the owned set. Administrator is not owned;
    /// it is handled as its own case by the reconciler.
    pub fn is_owned(&self, slug: &RoleSlug) -> bool {
        self.assignments.contains_key(slug)
    }

    /// Capabilities assigned to an owned role. `None` for foreign slugs.
    pub fn capabilities_for(&self, slug: &RoleSlug) -> Option<&BTreeSet<CapabilityName>> {
        self.assignments.get(slug)
    }

    /// Every capability name this crate defines, across all providers.
    pub fn universe(&self) -> &BTreeSet<CapabilityName> {
        &self.universe
    }
}

// --- Role/capability matrix -------------------------------------------------

/// Snapshot of actual capability state for the permissions UI: one row per
/// present platform role (administrator included), one column per capability
/// in the universe.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoleCapabilityMatrix {
    /// Column order, sorted by capability name.
    pub capabilities: Vec<CapabilityName>,
    pub rows: Vec<MatrixRow>,
}

/// One role's row in the matrix.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatrixRow {
    pub role: RoleSlug,
    pub granted: BTreeMap<CapabilityName, bool>,
}
