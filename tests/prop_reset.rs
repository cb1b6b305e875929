use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use platform_access::provider::builtin::{caps, roles};
use platform_access::registry::{MemoryRoleRegistry, RoleRegistry};
use platform_access::testkit;
use platform_access::types::{CapabilityName, RoleSlug};

const PLATFORM_CAPS: &[&str] = &[
    caps::VIEW_ORDERS,
    caps::CREATE_ORDERS,
    caps::EDIT_ORDERS,
    caps::DELETE_ORDERS,
    caps::VIEW_PRODUCTS,
    caps::CREATE_PRODUCTS,
    caps::EDIT_PRODUCTS,
    caps::DELETE_PRODUCTS,
    caps::VIEW_PAYOUTS,
    caps::EDIT_PAYOUTS,
    caps::APPROVE_PAYOUTS,
    caps::VIEW_REPORTS,
    caps::EXPORT_REPORTS,
    caps::MANAGE_PLATFORM,
    caps::MANAGE_PLATFORM_SETTINGS,
    caps::MANAGE_PLATFORM_ROLES,
];

const OWNED_SLUGS: &[&str] = &[
    roles::PLATFORM_ADMIN,
    roles::PLATFORM_MANAGER,
    roles::PLATFORM_FINANCE,
    roles::PLATFORM_STAFF,
];

/// Capability names as they occur in the wild: sometimes ours, sometimes
/// another plugin's.
fn any_cap() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(PLATFORM_CAPS).prop_map(str::to_string),
        "[a-z]{3,8}_cap",
    ]
}

fn cap_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(any_cap(), 0..8)
}

/// Foreign slugs end in `_role`, so they can never collide with the owned
/// slugs or `administrator`.
fn foreign_roles() -> impl Strategy<Value = BTreeMap<String, BTreeSet<String>>> {
    proptest::collection::btree_map("[a-z]{3,8}_role", cap_set(), 0..4)
}

#[derive(Debug, Clone)]
struct RegistryState {
    foreign: BTreeMap<String, BTreeSet<String>>,
    owned_present: Vec<bool>,
    owned_caps: Vec<BTreeSet<String>>,
    admin_present: bool,
    admin_caps: BTreeSet<String>,
}

fn registry_state() -> impl Strategy<Value = RegistryState> {
    (
        foreign_roles(),
        proptest::collection::vec(any::<bool>(), OWNED_SLUGS.len()),
        proptest::collection::vec(cap_set(), OWNED_SLUGS.len()),
        any::<bool>(),
        cap_set(),
    )
        .prop_map(
            |(foreign, owned_present, owned_caps, admin_present, admin_caps)| RegistryState {
                foreign,
                owned_present,
                owned_caps,
                admin_present,
                admin_caps,
            },
        )
}

fn build_registry(state: &RegistryState) -> MemoryRoleRegistry {
    let mut registry = MemoryRoleRegistry::new();
    for (slug, capabilities) in &state.foreign {
        let names: Vec<&str> = capabilities.iter().map(String::as_str).collect();
        testkit::seed_role(&mut registry, slug, &names);
    }
    for (idx, slug) in OWNED_SLUGS.iter().enumerate() {
        if state.owned_present[idx] {
            let names: Vec<&str> = state.owned_caps[idx].iter().map(String::as_str).collect();
            testkit::seed_role(&mut registry, slug, &names);
        }
    }
    if state.admin_present {
        let names: Vec<&str> = state.admin_caps.iter().map(String::as_str).collect();
        testkit::seed_role(&mut registry, "administrator", &names);
    }
    registry
}

fn universe() -> BTreeSet<CapabilityName> {
    PLATFORM_CAPS.iter().map(|name| CapabilityName::from(*name)).collect()
}

proptest! {
    /// Any role outside the owned set keeps its capability set bit-for-bit
    /// across a reset, even when it holds platform capability names.
    #[test]
    fn prop_foreign_roles_untouched(state in registry_state()) {
        let mut registry = build_registry(&state);
        let before = registry.snapshot();
        testkit::builtin_reconciler().reset_to_default(&mut registry).unwrap();
        let after = registry.snapshot();

        for slug in state.foreign.keys() {
            let role = RoleSlug::from(slug.as_str());
            prop_assert_eq!(before.get(&role), after.get(&role), "foreign role {} changed", slug);
        }
    }

    /// Running the reset twice produces the same registry as running it once.
    #[test]
    fn prop_reset_is_idempotent(state in registry_state()) {
        let mut registry = build_registry(&state);
        let reconciler = testkit::builtin_reconciler();
        reconciler.reset_to_default(&mut registry).unwrap();
        let once = registry.snapshot();
        reconciler.reset_to_default(&mut registry).unwrap();
        prop_assert_eq!(once, registry.snapshot());
    }

    /// After a reset, each present owned role holds exactly its table entry
    /// among platform names; capability names outside the universe survive.
    #[test]
    fn prop_owned_roles_exactly_overwritten(state in registry_state()) {
        let mut registry = build_registry(&state);
        let before = registry.snapshot();
        let reconciler = testkit::builtin_reconciler();
        reconciler.reset_to_default(&mut registry).unwrap();
        let universe = universe();

        for (idx, slug) in OWNED_SLUGS.iter().enumerate() {
            if !state.owned_present[idx] {
                continue;
            }
            let role = RoleSlug::from(*slug);
            let after = registry.capabilities_of(&role).unwrap();
            let desired = reconciler.desired().capabilities_for(&role).unwrap();

            let platform_after: BTreeSet<_> =
                after.intersection(&universe).cloned().collect();
            prop_assert_eq!(&platform_after, desired, "role {}", slug);

            let non_platform_before: BTreeSet<_> =
                before[&role].difference(&universe).cloned().collect();
            let non_platform_after: BTreeSet<_> =
                after.difference(&universe).cloned().collect();
            prop_assert_eq!(non_platform_before, non_platform_after, "role {}", slug);
        }
    }

    /// Administrator ends up holding the whole universe, and its
    /// host-granted capabilities are preserved.
    #[test]
    fn prop_administrator_superset(state in registry_state()) {
        prop_assume!(state.admin_present);
        let mut registry = build_registry(&state);
        let before = registry.snapshot();
        testkit::builtin_reconciler().reset_to_default(&mut registry).unwrap();

        let admin = RoleSlug::administrator();
        let after = registry.capabilities_of(&admin).unwrap();
        let universe = universe();
        prop_assert!(universe.is_subset(&after));

        let host_before: BTreeSet<_> = before[&admin].difference(&universe).cloned().collect();
        let host_after: BTreeSet<_> = after.difference(&universe).cloned().collect();
        prop_assert_eq!(host_before, host_after);
    }
}
