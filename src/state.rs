use crate::config::Config;
use crate::pipeline::race::RaceSession;
use crate::types::activity::Activity;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    activities: Arc<DashMap<String, CachedActivity>>,
    races: Arc<DashMap<String, CachedRace>>,
}

struct CachedActivity {
    activity: Arc<Activity>,
    inserted_at: Instant,
}

struct CachedRace {
    session: RaceSession,
    touched_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            activities: Arc::new(DashMap::new()),
            races: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn insert_activity(&self, activity: Arc<Activity>) {
        self.activities.insert(
            activity.id().to_string(),
            CachedActivity {
                activity,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn get_activity(&self, activity_id: &str) -> Option<Arc<Activity>> {
        self.activities
            .get(activity_id)
            .map(|entry| entry.activity.clone())
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    pub fn create_race(&self, session: RaceSession) -> String {
        let race_id = Uuid::new_v4().to_string();
        self.races.insert(
            race_id.clone(),
            CachedRace {
                session,
                touched_at: Instant::now(),
            },
        );
        race_id
    }

    /// Runs `f` with exclusive access to one race. Commands and ticks for the
    /// same race are serialized by the map entry lock.
    pub fn with_race<R>(&self, race_id: &str, f: impl FnOnce(&mut RaceSession) -> R) -> Option<R> {
        let mut entry = self.races.get_mut(race_id)?;
        entry.touched_at = Instant::now();
        Some(f(&mut entry.session))
    }

    pub fn remove_race(&self, race_id: &str) -> bool {
        self.races.remove(race_id).is_some()
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.activities
            .retain(|_, cached| now.duration_since(cached.inserted_at) < ttl);
        self.races
            .retain(|_, cached| now.duration_since(cached.touched_at) < ttl);
        tracing::info!(
            "Cache eviction complete. Activities: {}, races: {}",
            self.activities.len(),
            self.races.len()
        );
    }
}
