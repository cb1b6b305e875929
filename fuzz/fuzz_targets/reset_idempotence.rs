#![no_main]

//! Checks that a second `reset_to_default` over any reachable registry state
//! is a no-op.

use libfuzzer_sys::fuzz_target;
use platform_access::registry::MemoryRoleRegistry;
use platform_access::testkit;

const CAP_POOL: &[&str] = &[
    "view_orders",
    "edit_orders",
    "view_products",
    "view_payouts",
    "approve_payouts",
    "manage_platform",
    "manage_agency",
    "custom_cap_a",
];

const ROLE_POOL: &[&str] = &[
    "platform_admin",
    "platform_manager",
    "platform_finance",
    "platform_staff",
    "administrator",
    "agency_admin",
    "shop_vendor",
];

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct FuzzRegistry {
    roles: Vec<(u8, Vec<u8>)>,
}

fn build(input: &FuzzRegistry) -> MemoryRoleRegistry {
    let mut registry = MemoryRoleRegistry::new();
    for (slug_idx, cap_indices) in &input.roles {
        let slug = ROLE_POOL[*slug_idx as usize % ROLE_POOL.len()];
        let caps: Vec<&str> = cap_indices
            .iter()
            .map(|idx| CAP_POOL[*idx as usize % CAP_POOL.len()])
            .collect();
        testkit::seed_role(&mut registry, slug, &caps);
    }
    registry
}

fuzz_target!(|input: FuzzRegistry| {
    let mut registry = build(&input);
    let reconciler = testkit::builtin_reconciler();

    reconciler
        .reset_to_default(&mut registry)
        .expect("memory registry never fails");
    let once = registry.snapshot();

    reconciler
        .reset_to_default(&mut registry)
        .expect("memory registry never fails");
    assert_eq!(once, registry.snapshot());
});
