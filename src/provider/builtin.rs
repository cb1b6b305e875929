//! The platform's own roles and capability providers.
//!
//! These are the modules every installation ships with. Sibling plugins add
//! their own providers through [`ProviderRegistry::register`].
//!
//! [`ProviderRegistry::register`]: super::ProviderRegistry::register

use crate::primitives::{CapabilityDescriptor, OwnedRole};
use crate::provider::CapabilityProvider;
use crate::types::{CapabilityName, RoleSlug};

/// Slugs of the roles this crate owns.
pub mod roles {
    pub const PLATFORM_ADMIN: &str = "platform_admin";
    pub const PLATFORM_MANAGER: &str = "platform_manager";
    pub const PLATFORM_FINANCE: &str = "platform_finance";
    pub const PLATFORM_STAFF: &str = "platform_staff";
}

/// Capability names across all built-in providers.
pub mod caps {
    pub const VIEW_ORDERS: &str = "view_orders";
    pub const CREATE_ORDERS: &str = "create_orders";
    pub const EDIT_ORDERS: &str = "edit_orders";
    pub const DELETE_ORDERS: &str = "delete_orders";

    pub const VIEW_PRODUCTS: &str = "view_products";
    pub const CREATE_PRODUCTS: &str = "create_products";
    pub const EDIT_PRODUCTS: &str = "edit_products";
    pub const DELETE_PRODUCTS: &str = "delete_products";

    pub const VIEW_PAYOUTS: &str = "view_payouts";
    pub const EDIT_PAYOUTS: &str = "edit_payouts";
    pub const APPROVE_PAYOUTS: &str = "approve_payouts";

    pub const VIEW_REPORTS: &str = "view_reports";
    pub const EXPORT_REPORTS: &str = "export_reports";

    pub const MANAGE_PLATFORM: &str = "manage_platform";
    pub const MANAGE_PLATFORM_SETTINGS: &str = "manage_platform_settings";
    pub const MANAGE_PLATFORM_ROLES: &str = "manage_platform_roles";
}

/// The owned role list, in display order.
pub fn owned_roles() -> Vec<OwnedRole> {
    vec![
        OwnedRole::new(roles::PLATFORM_ADMIN, "Platform Administrator"),
        OwnedRole::new(roles::PLATFORM_MANAGER, "Platform Manager"),
        OwnedRole::new(roles::PLATFORM_FINANCE, "Platform Finance"),
        OwnedRole::new(roles::PLATFORM_STAFF, "Platform Staff"),
    ]
}

/// Every built-in provider, in registration order.
pub fn providers() -> Vec<Box<dyn CapabilityProvider>> {
    vec![
        Box::new(OrdersProvider),
        Box::new(ProductsProvider),
        Box::new(PayoutsProvider),
        Box::new(ReportsProvider),
        Box::new(PlatformAdminProvider),
    ]
}

fn assign(cap: &str, slugs: &[&str]) -> (CapabilityName, Vec<RoleSlug>) {
    (
        CapabilityName::from(cap),
        slugs.iter().map(|slug| RoleSlug::from(*slug)).collect(),
    )
}

/// Order management.
pub struct OrdersProvider;

impl CapabilityProvider for OrdersProvider {
    fn group(&self) -> &'static str {
        "orders"
    }

    fn group_label(&self) -> &'static str {
        "Orders"
    }

    fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        vec![
            CapabilityDescriptor::new(caps::VIEW_ORDERS, "View marketplace orders."),
            CapabilityDescriptor::new(caps::CREATE_ORDERS, "Create orders on behalf of customers."),
            CapabilityDescriptor::new(caps::EDIT_ORDERS, "Edit order details and status."),
            CapabilityDescriptor::new(caps::DELETE_ORDERS, "Delete orders permanently."),
        ]
    }

    fn default_assignments(&self) -> Vec<(CapabilityName, Vec<RoleSlug>)> {
        use roles::*;
        vec![
            assign(
                caps::VIEW_ORDERS,
                &[PLATFORM_ADMIN, PLATFORM_MANAGER, PLATFORM_FINANCE, PLATFORM_STAFF],
            ),
            assign(caps::CREATE_ORDERS, &[PLATFORM_ADMIN, PLATFORM_MANAGER]),
            assign(caps::EDIT_ORDERS, &[PLATFORM_ADMIN, PLATFORM_MANAGER]),
            assign(caps::DELETE_ORDERS, &[PLATFORM_ADMIN]),
        ]
    }
}

/// Product catalog management.
pub struct ProductsProvider;

impl CapabilityProvider for ProductsProvider {
    fn group(&self) -> &'static str {
        "products"
    }

    fn group_label(&self) -> &'static str {
        "Products"
    }

    fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        vec![
            CapabilityDescriptor::new(caps::VIEW_PRODUCTS, "View the product catalog."),
            CapabilityDescriptor::new(caps::CREATE_PRODUCTS, "Add products to the catalog."),
            CapabilityDescriptor::new(caps::EDIT_PRODUCTS, "Edit product listings."),
            CapabilityDescriptor::new(caps::DELETE_PRODUCTS, "Remove products from the catalog."),
        ]
    }

    fn default_assignments(&self) -> Vec<(CapabilityName, Vec<RoleSlug>)> {
        use roles::*;
        vec![
            assign(
                caps::VIEW_PRODUCTS,
                &[PLATFORM_ADMIN, PLATFORM_MANAGER, PLATFORM_STAFF],
            ),
            assign(caps::CREATE_PRODUCTS, &[PLATFORM_ADMIN, PLATFORM_MANAGER]),
            assign(caps::EDIT_PRODUCTS, &[PLATFORM_ADMIN, PLATFORM_MANAGER]),
            assign(caps::DELETE_PRODUCTS, &[PLATFORM_ADMIN]),
        ]
    }
}

/// Vendor payout handling.
pub struct PayoutsProvider;

impl CapabilityProvider for PayoutsProvider {
    fn group(&self) -> &'static str {
        "payouts"
    }

    fn group_label(&self) -> &'static str {
        "Payouts"
    }

    fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        vec![
            CapabilityDescriptor::new(caps::VIEW_PAYOUTS, "View vendor payout records."),
            CapabilityDescriptor::new(caps::EDIT_PAYOUTS, "Adjust payout amounts and schedules."),
            CapabilityDescriptor::new(caps::APPROVE_PAYOUTS, "Approve payouts for disbursement."),
        ]
    }

    fn default_assignments(&self) -> Vec<(CapabilityName, Vec<RoleSlug>)> {
        use roles::*;
        vec![
            assign(
                caps::VIEW_PAYOUTS,
                &[PLATFORM_ADMIN, PLATFORM_MANAGER, PLATFORM_FINANCE],
            ),
            assign(caps::EDIT_PAYOUTS, &[PLATFORM_ADMIN, PLATFORM_FINANCE]),
            assign(caps::APPROVE_PAYOUTS, &[PLATFORM_ADMIN, PLATFORM_FINANCE]),
        ]
    }
}

/// Sales and commission reporting.
pub struct ReportsProvider;

impl CapabilityProvider for ReportsProvider {
    fn group(&self) -> &'static str {
        "reports"
    }

    fn group_label(&self) -> &'static str {
        "Reports"
    }

    fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        vec![
            CapabilityDescriptor::new(caps::VIEW_REPORTS, "View sales and commission reports."),
            CapabilityDescriptor::new(caps::EXPORT_REPORTS, "Export reports to file."),
        ]
    }

    fn default_assignments(&self) -> Vec<(CapabilityName, Vec<RoleSlug>)> {
        use roles::*;
        vec![
            assign(
                caps::VIEW_REPORTS,
                &[PLATFORM_ADMIN, PLATFORM_MANAGER, PLATFORM_FINANCE],
            ),
            assign(
                caps::EXPORT_REPORTS,
                &[PLATFORM_ADMIN, PLATFORM_MANAGER, PLATFORM_FINANCE],
            ),
        ]
    }
}

/// Platform administration itself: settings access and the permission to run
/// capability management actions.
pub struct PlatformAdminProvider;

impl CapabilityProvider for PlatformAdminProvider {
    fn group(&self) -> &'static str {
        "platform"
    }

    fn group_label(&self) -> &'static str {
        "Platform"
    }

    fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        vec![
            CapabilityDescriptor::new(caps::MANAGE_PLATFORM, "Run platform administration actions."),
            CapabilityDescriptor::new(
                caps::MANAGE_PLATFORM_SETTINGS,
                "Change platform-wide settings.",
            ),
            CapabilityDescriptor::new(
                caps::MANAGE_PLATFORM_ROLES,
                "Edit role permission assignments.",
            ),
        ]
    }

    fn default_assignments(&self) -> Vec<(CapabilityName, Vec<RoleSlug>)> {
        use roles::*;
        vec![
            assign(caps::MANAGE_PLATFORM, &[PLATFORM_ADMIN]),
            assign(caps::MANAGE_PLATFORM_SETTINGS, &[PLATFORM_ADMIN]),
            assign(caps::MANAGE_PLATFORM_ROLES, &[PLATFORM_ADMIN]),
        ]
    }
}
