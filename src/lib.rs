#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Role and capability management core for the marketplace platform.
//!
//! The crate owns a declarative table of role → capability assignments
//! (contributed by [`provider::CapabilityProvider`] implementations) and
//! keeps a host-owned role registry reconciled with it. The one invariant
//! everything here is built around: reconciliation only ever writes platform
//! capability names onto platform-owned roles and the administrator role.
//! Every other role in the shared registry passes through a reset untouched.

// Module for shared identifier types (RoleSlug, CapabilityName).
pub mod types;

// Module for core data structures (descriptors, desired state, matrix).
pub mod primitives;

// Re-export the core data structures for easier access at the crate root.
pub use primitives::*;

// Module for error types.
pub mod error;

// Module for the host role registry abstraction.
pub mod registry;

// Module for capability providers and the startup registry.
pub mod provider;

// Module for the reconciliation logic.
pub mod reconciler;

// Module for the token-gated admin action surface.
pub mod admin;

// Module for the activation/deactivation lifecycle.
pub mod install;

// Module for the capability-check cache.
pub mod cache;

// Test fixtures, shared with integration tests and fuzz targets.
#[cfg(feature = "test-utils")]
pub mod testkit;
