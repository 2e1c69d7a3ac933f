//! Tiered response storage.
//!
//! Each tier is a `DashMap`, so a `put` or `delete` is atomic with respect
//! to concurrent scans: a reader sees either the old entry or the new state,
//! never a partial write. Every entry carries a registration sequence number
//! used to break ties between several eligible entries of one tier.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::schema::ResponseCandidate;
use crate::index::key::{HeaderMatcher, MatchKey, Tier};
use crate::observability::metrics;

/// A candidate response with its matchers parsed once at registration.
#[derive(Debug)]
pub struct MockEntry {
    /// The response as declared.
    pub candidate: ResponseCandidate,
    /// Uppercased body matcher.
    pub body_matcher: Option<String>,
    /// Parsed header matcher.
    pub header_matcher: Option<HeaderMatcher>,
}

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    entry: Arc<MockEntry>,
}

/// In-memory index of registered responses, one map per tier.
#[derive(Debug, Default)]
pub struct ResponseIndex {
    body: DashMap<MatchKey, Slot>,
    header: DashMap<MatchKey, Slot>,
    fallback: DashMap<MatchKey, Slot>,
    next_seq: AtomicU64,
}

impl ResponseIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    fn tier(&self, tier: Tier) -> &DashMap<MatchKey, Slot> {
        match tier {
            Tier::Body => &self.body,
            Tier::Header => &self.header,
            Tier::Fallback => &self.fallback,
        }
    }

    /// Insert an entry into the tier named by the key, replacing any entry
    /// with the same key. Returns the replaced entry.
    pub fn put(&self, key: MatchKey, entry: Arc<MockEntry>) -> Option<Arc<MockEntry>> {
        let tier = key.tier();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let map = self.tier(tier);
        let replaced = map.insert(key, Slot { seq, entry }).map(|slot| slot.entry);
        metrics::record_index_size(tier.as_str(), map.len());
        replaced
    }

    /// Exact lookup.
    pub fn get(&self, key: &MatchKey) -> Option<Arc<MockEntry>> {
        self.tier(key.tier()).get(key).map(|slot| slot.entry.clone())
    }

    /// Remove a Tier A entry. Keys of other tiers are never removed.
    pub fn delete(&self, key: &MatchKey) -> bool {
        if key.tier() != Tier::Body {
            return false;
        }
        let removed = self.body.remove(key).is_some();
        metrics::record_index_size(Tier::Body.as_str(), self.body.len());
        removed
    }

    /// Remove the Tier A entry whose rendered key equals `raw`.
    ///
    /// An exact match wins. Otherwise the text is trimmed and uppercased,
    /// then tried as-is and without a trailing `|BODY` suffix.
    pub fn delete_by_key(&self, raw: &str) -> bool {
        let normalized = raw.trim().to_uppercase();
        let mut wanted = vec![raw, normalized.as_str()];
        if let Some(stripped) = normalized.strip_suffix("|BODY") {
            wanted.push(stripped);
        }

        for text in wanted.into_iter().filter(|text| !text.is_empty()) {
            // The iterator guard must be released before removing.
            let found = self
                .body
                .iter()
                .find(|slot| slot.key().to_string() == text)
                .map(|slot| slot.key().clone());

            if let Some(key) = found {
                return self.delete(&key);
            }
        }
        false
    }

    /// Copy of the Tier A contents keyed by rendered key.
    pub fn snapshot(&self) -> BTreeMap<String, ResponseCandidate> {
        self.body
            .iter()
            .map(|slot| (slot.key().to_string(), slot.value().entry.candidate.clone()))
            .collect()
    }

    /// Number of entries in a tier.
    pub fn len(&self, tier: Tier) -> usize {
        self.tier(tier).len()
    }

    /// True when no tier holds an entry.
    pub fn is_empty(&self) -> bool {
        Tier::ALL.iter().all(|tier| self.tier(*tier).is_empty())
    }

    /// Scan a tier and return the earliest-registered entry accepted by `accept`.
    pub(crate) fn first_match<F>(&self, tier: Tier, accept: F) -> Option<Arc<MockEntry>>
    where
        F: Fn(&MatchKey, &MockEntry) -> bool,
    {
        self.tier(tier)
            .iter()
            .filter(|slot| accept(slot.key(), &slot.value().entry))
            .min_by_key(|slot| slot.value().seq)
            .map(|slot| slot.value().entry.clone())
    }
}
