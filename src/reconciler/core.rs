//!
//! Capability reconciliation against the host role registry.
//!
//! The reconciler's one hard obligation: it may only ever write capability
//! names from its own universe, and only onto roles it owns (plus
//! administrator). Roles outside the owned set keep their capability sets
//! untouched through a reset, even when one of them holds a platform
//! capability name that some other party granted.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::error::AccessError;
use crate::primitives::{DesiredState, MatrixRow, RoleCapabilityMatrix};
use crate::provider::ProviderRegistry;
use crate::registry::RoleRegistry;
use crate::types::{CapabilityName, RoleSlug};

/// Applies the [`DesiredState`] table to a [`RoleRegistry`].
///
/// All operations are idempotent and re-runnable: per-role mutations are not
/// transactional across roles, so a failure mid-pass leaves some roles
/// reconciled and others not, and the recovery story is simply to run the
/// operation again.
#[derive(Debug, Clone)]
pub struct Reconciler {
    desired: DesiredState,
}

impl Reconciler {
    pub fn new(desired: DesiredState) -> Self {
        Reconciler { desired }
    }

    /// Convenience constructor from the startup provider registry.
    pub fn from_providers(providers: &ProviderRegistry) -> Self {
        Reconciler::new(providers.desired_state())
    }

    pub fn desired(&self) -> &DesiredState {
        &self.desired
    }

    /// Ensures every (owned role, capability) pair in the table is set, and
    /// grants the entire universe to administrator. Never removes anything.
    ///
    /// Owned roles missing from the registry are skipped; that a role was
    /// deleted out from under us is tolerated, not an error.
    pub fn add_capabilities<R: RoleRegistry>(&self, registry: &mut R) -> Result<(), AccessError> {
        for role in self.desired.owned_roles() {
            // Every owned role has a table entry (DesiredState::new fills
            // empty ones in), so the None arm never fires.
            if let Some(caps) = self.desired.capabilities_for(&role.slug) {
                self.grant_all(registry, &role.slug, caps)?;
            }
        }
        self.grant_all(registry, &RoleSlug::administrator(), self.desired.universe())
    }

    /// Reconciles the registry to the table: every owned role ends up with
    /// exactly its table entry (restricted to platform capability names),
    /// administrator ends up holding the whole universe, and no other role
    /// is touched at all.
    pub fn reset_to_default<R: RoleRegistry>(&self, registry: &mut R) -> Result<(), AccessError> {
        // The only fatal failure point: without the listing there is nothing
        // to partition and nothing has been mutated yet.
        let present = registry.editable_roles()?;

        let mut reconciled = 0usize;
        for slug in &present {
            // Partition before any strip: a slug that is neither owned nor
            // administrator is foreign and must not be written to, whatever
            // capability names it happens to hold.
            let target: &BTreeSet<CapabilityName> = if slug.is_administrator() {
                self.desired.universe()
            } else if let Some(caps) = self.desired.capabilities_for(slug) {
                caps
            } else {
                debug!(role = %slug, "foreign role, leaving untouched");
                continue;
            };

            self.overwrite_platform_caps(registry, slug, target)?;
            reconciled += 1;
        }

        info!(roles = reconciled, "platform capabilities reset to defaults");
        Ok(())
    }

    /// Actual capability state for the permissions screen: one row per
    /// present platform role (administrator last), one column per capability
    /// in the universe.
    pub fn role_capabilities_matrix<R: RoleRegistry>(
        &self,
        registry: &R,
    ) -> Result<RoleCapabilityMatrix, AccessError> {
        let capabilities: Vec<CapabilityName> = self.desired.universe().iter().cloned().collect();

        let mut rows = Vec::new();
        let admin = RoleSlug::administrator();
        let row_slugs = self
            .desired
            .owned_roles()
            .iter()
            .map(|role| role.slug.clone())
            .chain(std::iter::once(admin));

        for slug in row_slugs {
            if !registry.role_exists(&slug) {
                continue;
            }
            let mut granted = BTreeMap::new();
            for cap in &capabilities {
                granted.insert(cap.clone(), registry.has_cap(&slug, cap)?);
            }
            rows.push(MatrixRow { role: slug, granted });
        }

        Ok(RoleCapabilityMatrix { capabilities, rows })
    }

    /// Applies a capability → granted map onto one named role, as-is. No
    /// ownership filtering: the caller (an authenticated administrator)
    /// explicitly named the role to edit, so an absent role is an error here
    /// rather than a skip.
    pub fn update_role_capabilities<R: RoleRegistry>(
        &self,
        registry: &mut R,
        slug: &RoleSlug,
        changes: &BTreeMap<CapabilityName, bool>,
    ) -> Result<(), AccessError> {
        if !registry.role_exists(slug) {
            return Err(AccessError::RoleNotFound(slug.clone()));
        }
        for (cap, granted) in changes {
            if *granted {
                registry.add_cap(slug, cap)?;
            } else {
                registry.remove_cap(slug, cap)?;
            }
        }
        debug!(role = %slug, changes = changes.len(), "role capabilities updated");
        Ok(())
    }

    /// Sets every capability in `caps` on the role, skipping the role
    /// entirely if it no longer exists.
    fn grant_all<R: RoleRegistry>(
        &self,
        registry: &mut R,
        slug: &RoleSlug,
        caps: &BTreeSet<CapabilityName>,
    ) -> Result<(), AccessError> {
        if !registry.role_exists(slug) {
            warn!(role = %slug, "role missing from registry, skipping grant");
            return Ok(());
        }
        for cap in caps {
            match registry.add_cap(slug, cap) {
                Ok(()) | Err(AccessError::RoleNotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Strip-then-reapply for a single role, always scoped to the platform
    /// capability universe. Capability names outside the universe are never
    /// removed, which is what keeps administrator's host-granted
    /// capabilities intact.
    fn overwrite_platform_caps<R: RoleRegistry>(
        &self,
        registry: &mut R,
        slug: &RoleSlug,
        target: &BTreeSet<CapabilityName>,
    ) -> Result<(), AccessError> {
        for cap in self.desired.universe() {
            match registry.remove_cap(slug, cap) {
                Ok(()) => {}
                Err(AccessError::RoleNotFound(_)) => {
                    // Listed a moment ago but gone now; nothing left to do.
                    warn!(role = %slug, "role vanished during reset, skipping");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
        for cap in target {
            match registry.add_cap(slug, cap) {
                Ok(()) => {}
                Err(AccessError::RoleNotFound(_)) => {
                    warn!(role = %slug, "role vanished during reset, skipping");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
        debug!(role = %slug, caps = target.len(), "role reconciled");
        Ok(())
    }
}
