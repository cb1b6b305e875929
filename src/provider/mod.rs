//! Capability providers.
//!
//! Each platform module (orders, products, payouts, ...) declares the
//! capabilities it defines and which owned roles hold them by default, by
//! implementing [`CapabilityProvider`] and registering it at startup. The
//! [`ProviderRegistry`] folds every registered provider into the derived
//! views the rest of the crate consumes: the capability universe, the grouped
//! descriptors for the permissions UI, and the [`DesiredState`] table the
//! reconciler enforces.
//!
//! Sibling plugins that extend the platform register their own provider next
//! to the built-in ones instead of hooking a named filter bus.

pub mod builtin;

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::primitives::{CapabilityDescriptor, CapabilityGroup, DesiredState, OwnedRole};
use crate::types::{CapabilityName, RoleSlug};

/// A module's capability declaration.
pub trait CapabilityProvider: Send + Sync {
    /// Stable group key (e.g. `orders`).
    fn group(&self) -> &'static str;

    /// Display label for the group (e.g. `Orders`).
    fn group_label(&self) -> &'static str;

    /// Every capability this module defines, with descriptions.
    fn capabilities(&self) -> Vec<CapabilityDescriptor>;

    /// Which owned roles hold each capability by default. Administrator is
    /// never listed here; it implicitly receives the whole universe.
    fn default_assignments(&self) -> Vec<(CapabilityName, Vec<RoleSlug>)>;
}

/// Startup-time registry of capability providers plus the owned role list.
pub struct ProviderRegistry {
    roles: Vec<OwnedRole>,
    providers: Vec<Box<dyn CapabilityProvider>>,
}

impl ProviderRegistry {
    /// An empty registry over the given owned roles.
    pub fn new(roles: Vec<OwnedRole>) -> Self {
        ProviderRegistry {
            roles,
            providers: Vec::new(),
        }
    }

    /// The platform's own roles and providers, pre-registered.
    pub fn with_builtin() -> Self {
        let mut registry = ProviderRegistry::new(builtin::owned_roles());
        for provider in builtin::providers() {
            registry.register(provider);
        }
        registry
    }

    pub fn register(&mut self, provider: Box<dyn CapabilityProvider>) {
        self.providers.push(provider);
    }

    pub fn owned_roles(&self) -> &[OwnedRole] {
        &self.roles
    }

    /// Grouped capability descriptors, in registration order.
    pub fn capability_groups(&self) -> Vec<CapabilityGroup> {
        self.providers
            .iter()
            .map(|provider| CapabilityGroup {
                key: provider.group().to_string(),
                label: provider.group_label().to_string(),
                capabilities: provider.capabilities(),
            })
            .collect()
    }

    /// The full capability universe across all providers.
    pub fn all_capabilities(&self) -> BTreeSet<CapabilityName> {
        self.providers
            .iter()
            .flat_map(|provider| provider.capabilities())
            .map(|descriptor| descriptor.name)
            .collect()
    }

    /// Capability name → description, for the permissions UI.
    pub fn capability_descriptions(&self) -> BTreeMap<CapabilityName, String> {
        self.providers
            .iter()
            .flat_map(|provider| provider.capabilities())
            .map(|descriptor| (descriptor.name, descriptor.description))
            .collect()
    }

    /// Folds provider assignments into the table the reconciler enforces.
    /// Assignments to slugs outside the owned role list are dropped.
    pub fn desired_state(&self) -> DesiredState {
        let owned: BTreeSet<RoleSlug> =
            self.roles.iter().map(|role| role.slug.clone()).collect();
        let mut assignments: BTreeMap<RoleSlug, BTreeSet<CapabilityName>> = BTreeMap::new();

        for provider in &self.providers {
            for (cap, slugs) in provider.default_assignments() {
                for slug in slugs {
                    if !owned.contains(&slug) {
                        warn!(
                            group = provider.group(),
                            role = %slug,
                            capability = %cap,
                            "provider assigned a capability to a role outside the owned set; dropping"
                        );
                        continue;
                    }
                    assignments.entry(slug).or_default().insert(cap.clone());
                }
            }
        }

        DesiredState::new(self.roles.clone(), assignments, self.all_capabilities())
    }
}
