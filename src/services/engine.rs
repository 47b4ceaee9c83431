use crate::core::compat::{compatibility_score, tier_label, ScoreWeights};
use crate::core::selection::{RankedCandidate, TopSelection};
use crate::models::{BirthChart, ScoredMatch, SignTriad};
use crate::services::deriver::{DeriveError, DerivedSigns, SignDeriver};
use crate::services::profiles::{normalize_user_key, ProfileStore};
use crate::services::score_cache::ScoreCache;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by the matching engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no chart found for {0}")]
    NotFound(String),

    #[error("no other charts to rank against")]
    EmptyPopulation,

    #[error(transparent)]
    Derive(#[from] DeriveError),
}

/// Result of a top-K ranking
#[derive(Debug)]
pub struct TopMatches {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// The compatibility matching engine.
///
/// Owns the profile store and score cache explicitly (injected, never
/// ambient), derives signs at save time, and ranks candidates with a
/// concurrent bounded top-K selection.
pub struct MatchingEngine {
    profiles: Arc<ProfileStore>,
    deriver: Arc<SignDeriver>,
    score_cache: Arc<ScoreCache>,
    weights: ScoreWeights,
    concurrency: usize,
}

impl MatchingEngine {
    pub fn new(
        profiles: Arc<ProfileStore>,
        deriver: Arc<SignDeriver>,
        score_cache: Arc<ScoreCache>,
        weights: ScoreWeights,
        concurrency: usize,
    ) -> Self {
        Self {
            profiles,
            deriver,
            score_cache,
            weights,
            concurrency: concurrency.max(1),
        }
    }

    /// Save (or overwrite) a user's birth chart.
    ///
    /// Validates inputs before any computation, derives the full sign triad,
    /// stores the chart wholesale and synchronously invalidates every cached
    /// pair score involving the user. Derivation failures abort the save and
    /// leave the previous chart untouched.
    pub async fn save_chart(
        &self,
        email: &str,
        birth_date: NaiveDate,
        birth_time: NaiveTime,
        birth_location: &str,
    ) -> Result<BirthChart, EngineError> {
        let user_key = normalize_user_key(email);
        if user_key.is_empty() {
            return Err(EngineError::Validation("email must not be empty".into()));
        }
        if birth_location.trim().is_empty() {
            return Err(EngineError::Validation(
                "birth location must not be empty".into(),
            ));
        }

        let signs = self
            .deriver
            .derive_triad(birth_location, birth_date, birth_time)
            .await?;

        let chart = BirthChart {
            email: user_key.clone(),
            birth_date,
            birth_time,
            birth_location: birth_location.trim().to_string(),
            signs,
        };

        self.profiles.put(chart.clone());
        // Overwrite must not leave stale pair scores behind
        self.score_cache.invalidate(&user_key);

        tracing::info!(
            "Saved chart for {}: {}/{}/{}",
            user_key,
            signs.sun,
            signs.moon,
            signs.rising
        );

        Ok(chart)
    }

    pub fn chart(&self, email: &str) -> Result<BirthChart, EngineError> {
        let user_key = normalize_user_key(email);
        self.profiles
            .get(&user_key)
            .ok_or(EngineError::NotFound(user_key))
    }

    /// Ad-hoc sign derivation without saving anything.
    pub async fn derive_signs(
        &self,
        birth_date: NaiveDate,
        birth_time: Option<NaiveTime>,
        birth_location: Option<&str>,
    ) -> Result<DerivedSigns, EngineError> {
        Ok(self
            .deriver
            .derive_signs(birth_date, birth_time, birth_location)
            .await?)
    }

    /// Pairwise score through the cache: hit within TTL short-circuits,
    /// miss computes from the two stored charts and repopulates.
    pub fn score_pair(&self, a: &str, b: &str) -> Result<u8, EngineError> {
        let key_a = normalize_user_key(a);
        let key_b = normalize_user_key(b);

        if let Some(score) = self.score_cache.get(&key_a, &key_b) {
            return Ok(score);
        }

        let chart_a = self
            .profiles
            .get(&key_a)
            .ok_or_else(|| EngineError::NotFound(key_a.clone()))?;
        let chart_b = self
            .profiles
            .get(&key_b)
            .ok_or_else(|| EngineError::NotFound(key_b.clone()))?;

        let score = compatibility_score(&chart_a.signs, &chart_b.signs, &self.weights);
        self.score_cache.insert(&key_a, &key_b, score);
        Ok(score)
    }

    /// Rank the `k` most compatible users for `email`.
    ///
    /// Scores every other stored chart concurrently (bounded worker
    /// fan-out) into a mutex-protected bounded heap, then drains it into a
    /// deterministic order: descending score, ties ascending by user key.
    /// A failed worker only loses its own candidate.
    pub async fn top_matches(&self, email: &str, k: usize) -> Result<TopMatches, EngineError> {
        let user_key = normalize_user_key(email);
        let target = self
            .profiles
            .get(&user_key)
            .ok_or_else(|| EngineError::NotFound(user_key.clone()))?;

        let candidates: Vec<BirthChart> = self
            .profiles
            .get_all()
            .into_iter()
            .filter(|chart| chart.email != user_key)
            .collect();

        if candidates.is_empty() {
            return Err(EngineError::EmptyPopulation);
        }
        let total_candidates = candidates.len();

        tracing::info!(
            "Ranking top {} of {} candidates for {}",
            k,
            candidates.len(),
            user_key
        );

        let triads: HashMap<String, SignTriad> = candidates
            .iter()
            .map(|chart| (chart.email.clone(), chart.signs))
            .collect();

        let selection = Arc::new(Mutex::new(TopSelection::new(k)));
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.concurrency));
        let mut workers = tokio::task::JoinSet::new();

        for candidate in candidates {
            let selection = Arc::clone(&selection);
            let semaphore = Arc::clone(&semaphore);
            let cache = Arc::clone(&self.score_cache);
            let weights = self.weights;
            let target_key = user_key.clone();
            let target_signs = target.signs;

            workers.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("selection semaphore closed");

                let score = match cache.get(&target_key, &candidate.email) {
                    Some(cached) => cached,
                    None => {
                        let computed =
                            compatibility_score(&target_signs, &candidate.signs, &weights);
                        cache.insert(&target_key, &candidate.email, computed);
                        computed
                    }
                };

                // Capacity check and insert are one atomic step under the lock
                let mut selection = selection.lock().expect("selection lock poisoned");
                selection.offer(RankedCandidate {
                    user_key: candidate.email,
                    score,
                });
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                // A lost worker costs one candidate, never the whole ranking
                tracing::warn!("Candidate scoring worker failed, skipping: {}", e);
            }
        }

        let selection = Arc::try_unwrap(selection)
            .expect("selection still shared after join")
            .into_inner()
            .expect("selection lock poisoned");

        let matches = selection
            .into_ranked()
            .into_iter()
            .filter_map(|ranked| {
                let signs = triads.get(&ranked.user_key).copied()?;
                Some(ScoredMatch {
                    email: ranked.user_key,
                    score: ranked.score,
                    tier: tier_label(ranked.score).to_string(),
                    signs,
                })
            })
            .collect();

        Ok(TopMatches {
            matches,
            total_candidates,
        })
    }
}
