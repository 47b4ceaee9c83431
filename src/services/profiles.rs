use crate::models::BirthChart;
use std::collections::HashMap;
use std::sync::RwLock;

/// Canonical store key for a user: trimmed, lowercased email.
pub fn normalize_user_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// In-memory birth chart store, one record per user key.
///
/// Saves are wholesale overwrites (last write wins); there is no partial
/// update path, which is what keeps a stored chart's signs consistent with
/// its date, time and location. Instances are injected wherever charts are
/// needed, so tests get isolation by constructing fresh stores.
#[derive(Debug, Default)]
pub struct ProfileStore {
    charts: RwLock<HashMap<String, BirthChart>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, email: &str) -> Option<BirthChart> {
        let charts = self.charts.read().expect("profile store lock poisoned");
        charts.get(&normalize_user_key(email)).cloned()
    }

    pub fn get_all(&self) -> Vec<BirthChart> {
        let charts = self.charts.read().expect("profile store lock poisoned");
        charts.values().cloned().collect()
    }

    /// Insert or overwrite the chart under its normalized email key.
    ///
    /// The chart's email field is rewritten to the key itself, so every
    /// stored record compares equal to its own key no matter how the
    /// caller cased the address. Callers that cache pairwise scores must
    /// invalidate the affected user after this returns;
    /// `MatchingEngine::save_chart` is the single write path that does so.
    pub fn put(&self, mut chart: BirthChart) {
        let key = normalize_user_key(&chart.email);
        chart.email = key.clone();
        let mut charts = self.charts.write().expect("profile store lock poisoned");
        charts.insert(key, chart);
    }

    pub fn len(&self) -> usize {
        let charts = self.charts.read().expect("profile store lock poisoned");
        charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
