//! Shared fixtures for integration tests and fuzz targets.
//!
//! Only compiled with the `test-utils` feature; the crate's own dev-dependency
//! on itself turns the feature on for everything under `tests/`.

use crate::provider::builtin::caps;
use crate::provider::ProviderRegistry;
use crate::reconciler::Reconciler;
use crate::registry::{MemoryRoleRegistry, RoleRegistry};
use crate::types::{CapabilityName, RoleSlug};

/// Reconciler over the built-in provider table.
pub fn builtin_reconciler() -> Reconciler {
    Reconciler::from_providers(&ProviderRegistry::with_builtin())
}

/// Creates a role and grants it the listed capabilities.
pub fn seed_role(registry: &mut MemoryRoleRegistry, slug: &str, capabilities: &[&str]) {
    let role = RoleSlug::from(slug);
    registry
        .create_role(&role, slug)
        .expect("memory registry create cannot fail");
    for cap in capabilities {
        registry
            .add_cap(&role, &CapabilityName::from(*cap))
            .expect("role was just created");
    }
}

/// A populated registry resembling a live install: activated platform roles,
/// an administrator with host-granted capabilities, and a foreign
/// `agency_admin` role that holds one platform capability name via its own
/// plugin's grant.
pub fn marketplace_registry() -> MemoryRoleRegistry {
    let providers = ProviderRegistry::with_builtin();
    let mut registry = MemoryRoleRegistry::new();

    seed_role(&mut registry, "administrator", &["manage_host", "edit_users"]);
    seed_role(
        &mut registry,
        "agency_admin",
        &["manage_agency", caps::VIEW_ORDERS],
    );
    crate::install::activate(&mut registry, &providers)
        .expect("activation against a memory registry cannot fail");

    registry
}
