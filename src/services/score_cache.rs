use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Order-independent identifier for an unordered pair of user keys.
///
/// Built by lexicographically ordering the two keys, so (A, B) and (B, A)
/// address the same cache slot. Keys are expected to be pre-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                low: a.to_string(),
                high: b.to_string(),
            }
        } else {
            Self {
                low: b.to_string(),
                high: a.to_string(),
            }
        }
    }

    pub fn contains(&self, user_key: &str) -> bool {
        self.low == user_key || self.high == user_key
    }

    /// The other side of the pair, if `user_key` is one of the sides.
    pub fn partner_of(&self, user_key: &str) -> Option<&str> {
        if self.low == user_key {
            Some(&self.high)
        } else if self.high == user_key {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedScore {
    score: u8,
    expires_at: Instant,
}

/// TTL-bounded pairwise score cache with targeted invalidation.
///
/// Two structures: the score map itself, and a per-user index of the pair
/// keys that mention each user. Invalidating a user walks only that user's
/// index slot, never the whole map. The two locks are never held at the
/// same time; an invalidation racing an in-flight miss may leave a freshly
/// recomputed entry behind or drop it before use — both outcomes are
/// benign, the next save or miss settles it.
#[derive(Debug)]
pub struct ScoreCache {
    ttl: Duration,
    entries: RwLock<HashMap<PairKey, CachedScore>>,
    index: RwLock<HashMap<String, HashSet<PairKey>>>,
}

impl ScoreCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            index: RwLock::new(HashMap::new()),
        }
    }

    /// Cached score for the pair, or `None` on miss or past-TTL entry.
    pub fn get(&self, a: &str, b: &str) -> Option<u8> {
        let key = PairKey::new(a, b);
        let entries = self.entries.read().expect("score cache lock poisoned");
        let cached = entries.get(&key)?;
        if Instant::now() >= cached.expires_at {
            tracing::debug!("Score cache expired: {}", key);
            return None;
        }
        tracing::debug!("Score cache hit: {}", key);
        Some(cached.score)
    }

    /// Store a freshly computed score with a new TTL clock and register the
    /// pair under both users for later invalidation.
    pub fn insert(&self, a: &str, b: &str, score: u8) {
        let key = PairKey::new(a, b);
        let cached = CachedScore {
            score,
            expires_at: Instant::now() + self.ttl,
        };

        {
            let mut entries = self.entries.write().expect("score cache lock poisoned");
            entries.insert(key.clone(), cached);
        }
        {
            let mut index = self.index.write().expect("score cache lock poisoned");
            index.entry(a.to_string()).or_default().insert(key.clone());
            index.entry(b.to_string()).or_default().insert(key);
        }
    }

    /// Remove every cached score involving `user_key`, on either side.
    ///
    /// Scans only the user's own index slot; untouched users keep their
    /// entries.
    pub fn invalidate(&self, user_key: &str) {
        let removed: Vec<PairKey> = {
            let mut index = self.index.write().expect("score cache lock poisoned");
            let Some(keys) = index.remove(user_key) else {
                return;
            };
            for key in &keys {
                if let Some(partner) = key.partner_of(user_key) {
                    let partner = partner.to_string();
                    if let Some(partner_keys) = index.get_mut(&partner) {
                        partner_keys.remove(key);
                        if partner_keys.is_empty() {
                            index.remove(&partner);
                        }
                    }
                }
            }
            keys.into_iter().collect()
        };

        let mut entries = self.entries.write().expect("score cache lock poisoned");
        for key in &removed {
            entries.remove(key);
        }
        tracing::debug!("Invalidated {} cached scores for {}", removed.len(), user_key);
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("score cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
