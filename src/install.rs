//! Activation and deactivation lifecycle.
//!
//! Activation creates the owned roles and seeds their default capabilities;
//! it is idempotent, so upgrades re-run it freely. Deactivation leaves
//! everything in place in production and only tears the owned roles down in
//! development mode.

use tracing::info;

use crate::error::AccessError;
use crate::provider::ProviderRegistry;
use crate::reconciler::Reconciler;
use crate::registry::RoleRegistry;

/// What deactivation is allowed to destroy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivateMode {
    /// Leave roles and capabilities in place.
    Production,
    /// Remove the owned roles entirely. Foreign roles and administrator are
    /// never candidates.
    Development,
}

/// Creates each owned role (if absent) and applies default capabilities,
/// administrator grant included.
pub fn activate<R: RoleRegistry>(
    registry: &mut R,
    providers: &ProviderRegistry,
) -> Result<(), AccessError> {
    for role in providers.owned_roles() {
        if !registry.role_exists(&role.slug) {
            registry.create_role(&role.slug, &role.display_name)?;
        }
    }
    Reconciler::from_providers(providers).add_capabilities(registry)?;
    info!(roles = providers.owned_roles().len(), "platform roles activated");
    Ok(())
}

/// Tears down owned roles in development mode; a no-op in production.
pub fn deactivate<R: RoleRegistry>(
    registry: &mut R,
    providers: &ProviderRegistry,
    mode: DeactivateMode,
) -> Result<(), AccessError> {
    if mode == DeactivateMode::Production {
        return Ok(());
    }
    for role in providers.owned_roles() {
        match registry.remove_role(&role.slug) {
            Ok(()) | Err(AccessError::RoleNotFound(_)) => {}
            Err(err) => return Err(err),
        }
    }
    info!("platform roles removed (development deactivation)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::builtin::{caps, roles};
    use crate::registry::MemoryRoleRegistry;
    use crate::types::{CapabilityName, RoleSlug};

    #[test]
    fn activate_creates_roles_and_seeds_defaults() {
        let providers = ProviderRegistry::with_builtin();
        let mut registry = MemoryRoleRegistry::new();
        registry
            .create_role(&RoleSlug::administrator(), "Administrator")
            .unwrap();

        activate(&mut registry, &providers).unwrap();

        assert!(registry.role_exists(&RoleSlug::from(roles::PLATFORM_FINANCE)));
        assert!(registry
            .has_cap(
                &RoleSlug::from(roles::PLATFORM_FINANCE),
                &CapabilityName::from(caps::APPROVE_PAYOUTS)
            )
            .unwrap());
        assert!(registry
            .has_cap(
                &RoleSlug::administrator(),
                &CapabilityName::from(caps::MANAGE_PLATFORM)
            )
            .unwrap());
    }

    #[test]
    fn activate_twice_changes_nothing() {
        let providers = ProviderRegistry::with_builtin();
        let mut registry = MemoryRoleRegistry::new();
        activate(&mut registry, &providers).unwrap();
        let once = registry.snapshot();
        activate(&mut registry, &providers).unwrap();
        assert_eq!(once, registry.snapshot());
    }

    #[test]
    fn production_deactivation_is_a_no_op() {
        let providers = ProviderRegistry::with_builtin();
        let mut registry = MemoryRoleRegistry::new();
        activate(&mut registry, &providers).unwrap();
        let before = registry.snapshot();
        deactivate(&mut registry, &providers, DeactivateMode::Production).unwrap();
        assert_eq!(before, registry.snapshot());
    }

    #[test]
    fn development_deactivation_removes_only_owned_roles() {
        let providers = ProviderRegistry::with_builtin();
        let mut registry = MemoryRoleRegistry::new();
        registry
            .create_role(&RoleSlug::administrator(), "Administrator")
            .unwrap();
        registry
            .create_role(&RoleSlug::from("agency_admin"), "Agency Admin")
            .unwrap();
        activate(&mut registry, &providers).unwrap();

        deactivate(&mut registry, &providers, DeactivateMode::Development).unwrap();

        for role in providers.owned_roles() {
            assert!(!registry.role_exists(&role.slug));
        }
        assert!(registry.role_exists(&RoleSlug::administrator()));
        assert!(registry.role_exists(&RoleSlug::from("agency_admin")));
    }

    #[test]
    fn development_deactivation_tolerates_already_missing_roles() {
        let providers = ProviderRegistry::with_builtin();
        let mut registry = MemoryRoleRegistry::new();
        // Nothing was ever activated.
        deactivate(&mut registry, &providers, DeactivateMode::Development).unwrap();
    }
}
