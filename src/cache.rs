//! Processed-container cache for cross-page deduplication.
//!
//! Maps a [`ContainerFingerprint`] to the link-identity keys already reported inside
//! containers of that shape. The cache is an owned value handed to the auditor, so
//! tests and independent audit sessions each get their own. Growth is bounded by a
//! [`CachePolicy`]: a cap on the number of fingerprints (least recently used evicted
//! first) and an optional time-to-live counted from a fingerprint's first sighting.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info};
use lru::LruCache;

use crate::fingerprint::ContainerFingerprint;

/// Identity of a reported link inside a container: `text-href-selector`.
#[must_use]
pub fn link_identity_key(text: &str, href: &str, selector_label: &str) -> String {
    format!("{text}-{href}-{selector_label}")
}

/// Eviction policy for [`HeaderCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Maximum number of fingerprints kept. `None` (or `Some(0)`) disables the cap.
    ///
    /// Default: `Some(10_000)`
    pub max_containers: Option<usize>,

    /// Lifetime of a fingerprint from its first sighting. `None` keeps entries until
    /// they are evicted by the cap or the cache is cleared.
    ///
    /// Default: `None`
    pub ttl: Option<Duration>,
}

impl CachePolicy {
    /// Grow without bound for the life of the cache.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_containers: None,
            ttl: None,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_containers: Some(10_000),
            ttl: None,
        }
    }
}

/// Outcome of checking one (container, link) pair against the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// First sighting of this container shape; report the link.
    NewContainer,
    /// Known container shape, new link; report it.
    NewLink,
    /// Already reported for this container shape; suppress it.
    Duplicate,
}

impl Decision {
    /// Whether the link belongs in the report.
    #[must_use]
    pub fn should_report(self) -> bool {
        !matches!(self, Self::Duplicate)
    }
}

struct Entry {
    keys: HashSet<String>,
    created: Instant,
}

/// Fingerprint → reported link keys, with bounded growth.
pub struct HeaderCache {
    policy: CachePolicy,
    entries: LruCache<ContainerFingerprint, Entry>,
    evicted: usize,
}

impl Default for HeaderCache {
    fn default() -> Self {
        Self::with_policy(CachePolicy::default())
    }
}

impl fmt::Debug for HeaderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderCache")
            .field("policy", &self.policy)
            .field("containers", &self.entries.len())
            .field("evicted", &self.evicted)
            .finish_non_exhaustive()
    }
}

impl HeaderCache {
    /// Empty cache with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache with a custom policy.
    #[must_use]
    pub fn with_policy(policy: CachePolicy) -> Self {
        let entries = policy
            .max_containers
            .and_then(NonZeroUsize::new)
            .map_or_else(LruCache::unbounded, LruCache::new);

        Self {
            policy,
            entries,
            evicted: 0,
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Number of container fingerprints held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no fingerprints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of link keys across all fingerprints.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.entries.iter().map(|(_, e)| e.keys.len()).sum()
    }

    /// Fingerprints dropped by the capacity cap since the cache was created.
    #[must_use]
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Whether `key` has been recorded for `fingerprint`.
    ///
    /// Does not count as a use for eviction purposes.
    #[must_use]
    pub fn contains(&self, fingerprint: &ContainerFingerprint, key: &str) -> bool {
        self.entries
            .peek(fingerprint)
            .is_some_and(|e| e.keys.contains(key))
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            info!("clearing header cache ({} containers)", self.entries.len());
        }
        self.entries.clear();
    }

    /// Check and record a (container, link) pair. Returns `true` when it should be reported.
    pub fn should_report(&mut self, fingerprint: &ContainerFingerprint, key: &str) -> bool {
        self.check(fingerprint, key).should_report()
    }

    /// Check and record a (container, link) pair.
    pub fn check(&mut self, fingerprint: &ContainerFingerprint, key: &str) -> Decision {
        self.check_at(fingerprint, key, Instant::now())
    }

    /// Check and record a (container, link) pair as of `now`.
    pub fn check_at(&mut self, fingerprint: &ContainerFingerprint, key: &str, now: Instant) -> Decision {
        let expired = self
            .entries
            .peek(fingerprint)
            .is_some_and(|e| self.is_expired(e, now));
        if expired {
            self.entries.pop(fingerprint);
        }

        if let Some(entry) = self.entries.get_mut(fingerprint) {
            return if entry.keys.insert(key.to_string()) {
                Decision::NewLink
            } else {
                Decision::Duplicate
            };
        }

        let entry = Entry {
            keys: HashSet::from([key.to_string()]),
            created: now,
        };
        if let Some((dropped, _)) = self.entries.push(fingerprint.clone(), entry) {
            debug!("evicted least recently used container {dropped}");
            self.evicted += 1;
        }
        Decision::NewContainer
    }

    /// Drop every fingerprint whose time-to-live has elapsed as of `now`.
    ///
    /// Returns the number of fingerprints removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        if self.policy.ttl.is_none() {
            return 0;
        }

        let stale: Vec<ContainerFingerprint> = self
            .entries
            .iter()
            .filter(|(_, e)| self.is_expired(e, now))
            .map(|(fp, _)| fp.clone())
            .collect();
        for fp in &stale {
            self.entries.pop(fp);
        }
        if !stale.is_empty() {
            info!("evicted {} expired containers from header cache", stale.len());
        }
        stale.len()
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        self.policy
            .ttl
            .is_some_and(|ttl| now.saturating_duration_since(entry.created) > ttl)
    }
}

/// A [`HeaderCache`] shared between threads.
///
/// Each audit takes the lock once for all dedup decisions of its page, so the decisions
/// of one request are never interleaved with another's.
#[derive(Debug, Clone, Default)]
pub struct SharedHeaderCache(Arc<Mutex<HeaderCache>>);

impl SharedHeaderCache {
    /// Wrap a cache for sharing.
    #[must_use]
    pub fn new(cache: HeaderCache) -> Self {
        Self(Arc::new(Mutex::new(cache)))
    }

    /// Lock the cache. A poisoned lock is recovered: every cache operation leaves the
    /// map consistent, so a panic elsewhere cannot corrupt it.
    pub fn lock(&self) -> MutexGuard<'_, HeaderCache> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
