use crate::config::Config;
use crate::session::LiveSession;
use crate::types::sample::GeoSample;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub history: HistoryArchive,
    /// Every live push goes through this lock, one sample at a time.
    pub live: Arc<Mutex<LiveSession>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            history: HistoryArchive::new(),
            live: Arc::new(Mutex::new(LiveSession::new())),
        }
    }
}

/// Recorded trips keyed by an opaque date key such as `2024-05-01`.
#[derive(Clone, Default)]
pub struct HistoryArchive {
    trips: Arc<DashMap<String, Arc<Vec<GeoSample>>>>,
}

impl HistoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was stored under `key`.
    pub fn store(&self, key: String, samples: Vec<GeoSample>) {
        tracing::info!("Archived {} samples under {}", samples.len(), key);
        self.trips.insert(key, Arc::new(samples));
    }

    pub fn fetch(&self, key: &str) -> Option<Arc<Vec<GeoSample>>> {
        self.trips.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Snapshot of every trip, sorted by key.
    pub fn entries(&self) -> Vec<(String, Arc<Vec<GeoSample>>)> {
        let mut entries: Vec<_> = self
            .trips
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
