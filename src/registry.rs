//! Role registry abstraction.
//!
//! The registry is the host-owned, persisted role → capability store. This
//! crate never owns it; it reads and mutates it through this trait so the
//! reconciler stays generic over where the data actually lives, and so tests
//! run against `MemoryRoleRegistry` instead of a live host.
//!
//! Mutations keyed by a missing role return [`AccessError::RoleNotFound`];
//! callers decide whether that is fatal (an explicitly named role) or
//! tolerable (a reconciliation sweep over a possibly stale listing).

use std::collections::{BTreeMap, BTreeSet};

use crate::error::AccessError;
use crate::types::{CapabilityName, RoleSlug};

/// Interface to the host's role/capability store.
pub trait RoleRegistry {
    /// Slugs of every role currently present. The only call whose failure is
    /// fatal for a reconciliation pass.
    fn editable_roles(&self) -> Result<Vec<RoleSlug>, AccessError>;

    fn role_exists(&self, slug: &RoleSlug) -> bool;

    /// Creates an empty role. Overwrites nothing if the slug already exists.
    fn create_role(&mut self, slug: &RoleSlug, display_name: &str) -> Result<(), AccessError>;

    fn remove_role(&mut self, slug: &RoleSlug) -> Result<(), AccessError>;

    /// Sets a capability flag on a role. Idempotent.
    fn add_cap(&mut self, slug: &RoleSlug, cap: &CapabilityName) -> Result<(), AccessError>;

    /// Clears a capability flag on a role. Idempotent; clearing a flag the
    /// role never held is not an error.
    fn remove_cap(&mut self, slug: &RoleSlug, cap: &CapabilityName) -> Result<(), AccessError>;

    /// Whether the role currently holds the capability. A missing role simply
    /// holds nothing.
    fn has_cap(&self, slug: &RoleSlug, cap: &CapabilityName) -> Result<bool, AccessError>;

    /// The role's full capability set, platform-owned names and foreign names
    /// alike.
    fn capabilities_of(&self, slug: &RoleSlug) -> Result<BTreeSet<CapabilityName>, AccessError>;
}

// --- In-memory implementation -----------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct RoleRecord {
    display_name: String,
    capabilities: BTreeSet<CapabilityName>,
}

/// In-memory role registry. Backs unit tests, property tests, and fuzz
/// targets; also usable by hosts that keep role state elsewhere and only
/// need the reconciliation logic.
///
/// `BTreeMap` keeps iteration deterministic, which the idempotence and
/// non-interference tests rely on when comparing whole-registry snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleRegistry {
    roles: BTreeMap<RoleSlug, RoleRecord>,
}

impl MemoryRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full dump of the registry, for snapshot comparisons in tests.
    pub fn snapshot(&self) -> BTreeMap<RoleSlug, BTreeSet<CapabilityName>> {
        self.roles
            .iter()
            .map(|(slug, record)| (slug.clone(), record.capabilities.clone()))
            .collect()
    }
}

impl RoleRegistry for MemoryRoleRegistry {
    fn editable_roles(&self) -> Result<Vec<RoleSlug>, AccessError> {
        Ok(self.roles.keys().cloned().collect())
    }

    fn role_exists(&self, slug: &RoleSlug) -> bool {
        self.roles.contains_key(slug)
    }

    fn create_role(&mut self, slug: &RoleSlug, display_name: &str) -> Result<(), AccessError> {
        self.roles
            .entry(slug.clone())
            .or_insert_with(|| RoleRecord {
                display_name: display_name.to_string(),
                capabilities: BTreeSet::new(),
            });
        Ok(())
    }

    fn remove_role(&mut self, slug: &RoleSlug) -> Result<(), AccessError> {
        self.roles
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| AccessError::RoleNotFound(slug.clone()))
    }

    fn add_cap(&mut self, slug: &RoleSlug, cap: &CapabilityName) -> Result<(), AccessError> {
        let record = self
            .roles
            .get_mut(slug)
            .ok_or_else(|| AccessError::RoleNotFound(slug.clone()))?;
        record.capabilities.insert(cap.clone());
        Ok(())
    }

    fn remove_cap(&mut self, slug: &RoleSlug, cap: &CapabilityName) -> Result<(), AccessError> {
        let record = self
            .roles
            .get_mut(slug)
            .ok_or_else(|| AccessError::RoleNotFound(slug.clone()))?;
        record.capabilities.remove(cap);
        Ok(())
    }

    fn has_cap(&self, slug: &RoleSlug, cap: &CapabilityName) -> Result<bool, AccessError> {
        Ok(self
            .roles
            .get(slug)
            .map(|record| record.capabilities.contains(cap))
            .unwrap_or(false))
    }

    fn capabilities_of(&self, slug: &RoleSlug) -> Result<BTreeSet<CapabilityName>, AccessError> {
        self.roles
            .get(slug)
            .map(|record| record.capabilities.clone())
            .ok_or_else(|| AccessError::RoleNotFound(slug.clone()))
    }
}
