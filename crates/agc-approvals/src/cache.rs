//! Bounded decision cache
//!
//! A single-process, in-memory mapping from [`DecisionKey`] to the most
//! recent decision for that key, bounded by both entry count and age:
//!
//! - a save refreshes the entry timestamp and evicts oldest-first once
//!   the capacity is exceeded;
//! - a read past the configured lifetime deletes the entry lazily; a
//!   live read refreshes its timestamp (LRU-ish);
//! - ordered accessors return survivors oldest-first.
//!
//! Time is injected through [`Clock`] so tests drive expiry
//! explicitly. Last-write-wins per key, no versioning: callers needing
//! strict per-key ordering serialize their own calls. No durability —
//! a restart clears everything.

use crate::key::DecisionKey;
use crate::packet::ApprovalPacket;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default capacity (entries).
pub const DEFAULT_MAX_ITEMS: usize = 500;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Source of "now" for the cache.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    touched_at: Instant,
    packet: ApprovalPacket,
}

/// A live entry with its age, as returned by
/// [`DecisionCache::snapshot`].
#[derive(Debug, Clone)]
pub struct CacheSnapshotEntry {
    /// The entry's key.
    pub key: DecisionKey,
    /// Time since the entry was last saved or read.
    pub age: Duration,
    /// The cached decision.
    pub packet: ApprovalPacket,
}

/// Capacity- and age-bounded store of recent decisions.
#[derive(Debug)]
pub struct DecisionCache {
    entries: HashMap<DecisionKey, CacheEntry>,
    max_items: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS, DEFAULT_TTL)
    }
}

impl DecisionCache {
    /// Cache with the given bounds and the system clock.
    #[must_use]
    pub fn new(max_items: usize, ttl: Duration) -> Self {
        Self::with_clock(max_items, ttl, Arc::new(SystemClock))
    }

    /// Cache with the given bounds and an injected clock.
    #[must_use]
    pub fn with_clock(max_items: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            // A zero-capacity cache could never hold the entry just
            // saved; clamp to one.
            max_items: max_items.max(1),
            ttl,
            clock,
        }
    }

    /// Upsert a decision and refresh its timestamp, then enforce the
    /// capacity bound by evicting oldest-first.
    pub fn save(&mut self, key: DecisionKey, packet: ApprovalPacket) {
        let now = self.clock.now();
        self.entries.insert(
            key,
            CacheEntry {
                touched_at: now,
                packet,
            },
        );
        self.enforce_limits(now);
    }

    /// Fetch a decision. Misses on absent or expired keys (expired
    /// entries are deleted on the spot); a hit refreshes the entry's
    /// timestamp.
    pub fn get(&mut self, key: &DecisionKey) -> Option<ApprovalPacket> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => self.is_expired(entry, now),
        };

        if expired {
            self.entries.remove(key);
            debug!(%key, "decision expired on read");
            return None;
        }

        self.entries.get_mut(key).map(|entry| {
            entry.touched_at = now;
            entry.packet.clone()
        })
    }

    /// All live decisions, oldest-first.
    pub fn get_all(&mut self) -> Vec<ApprovalPacket> {
        self.snapshot()
            .into_iter()
            .map(|entry| entry.packet)
            .collect()
    }

    /// All live entries with their ages, oldest-first.
    pub fn snapshot(&mut self) -> Vec<CacheSnapshotEntry> {
        let now = self.clock.now();
        self.prune_expired(now);

        let mut live: Vec<(&DecisionKey, &CacheEntry)> = self.entries.iter().collect();
        live.sort_by_key(|(_, entry)| entry.touched_at);
        live.into_iter()
            .map(|(key, entry)| CacheSnapshotEntry {
                key: key.clone(),
                age: now.saturating_duration_since(entry.touched_at),
                packet: entry.packet.clone(),
            })
            .collect()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of live (non-expired) entries.
    pub fn len(&mut self) -> usize {
        let now = self.clock.now();
        self.prune_expired(now);
        self.entries.len()
    }

    /// Whether no live entries remain.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    #[inline]
    #[must_use]
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Configured entry lifetime.
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.touched_at) > self.ttl
    }

    fn prune_expired(&mut self, now: Instant) {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.touched_at) <= ttl);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!(pruned, "expired decisions pruned");
        }
    }

    fn enforce_limits(&mut self, now: Instant) {
        self.prune_expired(now);
        if self.entries.len() <= self.max_items {
            return;
        }

        let mut by_age: Vec<(DecisionKey, Instant)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.touched_at))
            .collect();
        by_age.sort_by_key(|(_, touched_at)| *touched_at);

        let excess = self.entries.len() - self.max_items;
        for (key, _) in by_age.into_iter().take(excess) {
            self.entries.remove(&key);
            debug!(%key, "decision evicted under capacity pressure");
        }
    }
}
