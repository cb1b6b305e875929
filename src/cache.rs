//! Read-through cache for capability checks.
//!
//! Capability checks run on nearly every request while the underlying data
//! changes rarely, so results are memoized for a few minutes. The cache is
//! intentionally not wired into the reconciler: a reset may be followed by
//! stale answers until the TTL lapses, and callers that need fresh state
//! call [`CapabilityCache::invalidate`] themselves.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::AccessError;
use crate::registry::RoleRegistry;
use crate::types::{CapabilityName, RoleSlug};

const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    granted: bool,
    fetched_at: Instant,
}

/// TTL-bounded memoization of `(role, capability) → granted`.
#[derive(Debug)]
pub struct CapabilityCache {
    ttl: Duration,
    entries: HashMap<(RoleSlug, CapabilityName), CacheEntry>,
}

impl Default for CapabilityCache {
    fn default() -> Self {
        CapabilityCache::new(DEFAULT_TTL)
    }
}

impl CapabilityCache {
    pub fn new(ttl: Duration) -> Self {
        CapabilityCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Answers from the cache when the entry is fresh, otherwise reads
    /// through to the registry and stores the result.
    pub fn check<R: RoleRegistry>(
        &mut self,
        registry: &R,
        slug: &RoleSlug,
        cap: &CapabilityName,
    ) -> Result<bool, AccessError> {
        let key = (slug.clone(), cap.clone());
        if let Some(entry) = self.entries.get(&key) {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(entry.granted);
            }
        }

        let granted = registry.has_cap(slug, cap)?;
        self.entries.insert(
            key,
            CacheEntry {
                granted,
                fetched_at: Instant::now(),
            },
        );
        Ok(granted)
    }

    /// Drops every cached answer.
    pub fn invalidate(&mut self) {
        debug!(entries = self.entries.len(), "capability cache invalidated");
        self.entries.clear();
    }
}
