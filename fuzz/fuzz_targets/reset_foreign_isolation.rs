#![no_main]

//! Drives `reset_to_default` over arbitrary registry states and checks the
//! non-interference contract: foreign roles keep their capability sets
//! bit-for-bit, administrator ends up with the full universe, and owned
//! roles hold exactly their table entries among platform names.

use libfuzzer_sys::fuzz_target;
use platform_access::registry::MemoryRoleRegistry;
use platform_access::testkit;
use platform_access::types::{CapabilityName, RoleSlug};

// Mix of platform capability names and names other plugins might define.
const CAP_POOL: &[&str] = &[
    "view_orders",
    "edit_orders",
    "delete_orders",
    "view_products",
    "edit_products",
    "view_payouts",
    "edit_payouts",
    "approve_payouts",
    "view_reports",
    "export_reports",
    "manage_platform",
    "manage_platform_settings",
    "manage_agency",
    "edit_users",
    "custom_cap_a",
    "custom_cap_b",
];

const OWNED_SLUGS: &[&str] = &[
    "platform_admin",
    "platform_manager",
    "platform_finance",
    "platform_staff",
];

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct FuzzRegistry {
    foreign: Vec<(u8, Vec<u8>)>,
    owned_present: [bool; 4],
    owned_caps: [Vec<u8>; 4],
    admin_present: bool,
    admin_caps: Vec<u8>,
}

fn caps_from(indices: &[u8]) -> Vec<&'static str> {
    indices
        .iter()
        .map(|idx| CAP_POOL[*idx as usize % CAP_POOL.len()])
        .collect()
}

fn build(input: &FuzzRegistry) -> MemoryRoleRegistry {
    let mut registry = MemoryRoleRegistry::new();
    for (slug_idx, cap_indices) in &input.foreign {
        let slug = format!("foreign_{}", slug_idx % 16);
        testkit::seed_role(&mut registry, &slug, &caps_from(cap_indices));
    }
    for (idx, slug) in OWNED_SLUGS.iter().enumerate() {
        if input.owned_present[idx] {
            testkit::seed_role(&mut registry, slug, &caps_from(&input.owned_caps[idx]));
        }
    }
    if input.admin_present {
        testkit::seed_role(&mut registry, "administrator", &caps_from(&input.admin_caps));
    }
    registry
}

fuzz_target!(|input: FuzzRegistry| {
    let mut registry = build(&input);
    let before = registry.snapshot();

    let reconciler = testkit::builtin_reconciler();
    reconciler
        .reset_to_default(&mut registry)
        .expect("memory registry never fails");
    let after = registry.snapshot();
    let universe = reconciler.desired().universe();

    // Foreign roles: bit-for-bit identical.
    for slug in before.keys() {
        if slug.is_administrator() || reconciler.desired().is_owned(slug) {
            continue;
        }
        assert_eq!(before.get(slug), after.get(slug), "foreign role {slug} changed");
    }

    // Administrator: full universe plus untouched host capabilities.
    if input.admin_present {
        let admin = RoleSlug::administrator();
        assert!(universe.is_subset(&after[&admin]));
        let host_before: Vec<&CapabilityName> =
            before[&admin].iter().filter(|cap| !universe.contains(*cap)).collect();
        let host_after: Vec<&CapabilityName> =
            after[&admin].iter().filter(|cap| !universe.contains(*cap)).collect();
        assert_eq!(host_before, host_after);
    }

    // Owned roles: exactly the table entry among platform names.
    for (idx, slug) in OWNED_SLUGS.iter().enumerate() {
        if !input.owned_present[idx] {
            continue;
        }
        let role = RoleSlug::from(*slug);
        let desired = reconciler.desired().capabilities_for(&role).unwrap();
        let platform_after: Vec<&CapabilityName> =
            after[&role].iter().filter(|cap| universe.contains(*cap)).collect();
        let expected: Vec<&CapabilityName> = desired.iter().collect();
        assert_eq!(platform_after, expected, "role {slug}");
    }
});
