use chrono::{DateTime, Duration, Utc};

use crate::error::StorageError;
use crate::storage::SessionStorage;

/// Cumulative number of advances.
pub const CLICKS_KEY: &str = "om_clicks";
/// Last interaction, epoch milliseconds.
pub const LAST_VISIT_KEY: &str = "om_last";

/// A visit more than this long after the previous one counts as returning.
pub const RETURNING_AFTER: Duration = Duration::hours(24);

/// Per-visitor state persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub clicks: u64,
    pub previous_visit: Option<DateTime<Utc>>,
    pub returning: bool,
}

impl SessionState {
    /// Read the stored counters and stamp `now` as the latest visit.
    ///
    /// Unparseable stored values are treated as absent.
    pub fn restore<K: SessionStorage>(
        storage: &mut K,
        now: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        let clicks = storage
            .get(CLICKS_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        let previous_visit = storage
            .get(LAST_VISIT_KEY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis);
        let returning = previous_visit.is_some_and(|at| now - at > RETURNING_AFTER);

        storage.set(LAST_VISIT_KEY, now.timestamp_millis().to_string())?;

        Ok(Self {
            clicks,
            previous_visit,
            returning,
        })
    }

    /// Persist a completed advance.
    pub fn record_interaction<K: SessionStorage>(
        &mut self,
        storage: &mut K,
        count: u64,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.clicks = count;
        storage.set(CLICKS_KEY, count.to_string())?;
        storage.set(LAST_VISIT_KEY, now.timestamp_millis().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::storage::MemoryStorage;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn first_visit_starts_at_zero() {
        let mut storage = MemoryStorage::new();
        let state = SessionState::restore(&mut storage, at(1_000)).unwrap();
        assert_eq!(state, SessionState::default());
        assert_eq!(storage.get(LAST_VISIT_KEY).as_deref(), Some("1000"));
    }

    #[test]
    fn restores_clicks_and_flags_returning_after_a_day() {
        let mut storage = MemoryStorage::new();
        storage.set(CLICKS_KEY, "17".into()).unwrap();
        storage.set(LAST_VISIT_KEY, "0".into()).unwrap();

        let later = at(0) + Duration::hours(25);
        let state = SessionState::restore(&mut storage, later).unwrap();
        assert_eq!(state.clicks, 17);
        assert_eq!(state.previous_visit, Some(at(0)));
        assert!(state.returning);
    }

    #[test]
    fn recent_visit_is_not_returning() {
        let mut storage = MemoryStorage::new();
        storage.set(LAST_VISIT_KEY, "0".into()).unwrap();
        let state = SessionState::restore(&mut storage, at(0) + Duration::hours(23)).unwrap();
        assert!(!state.returning);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let mut storage = MemoryStorage::new();
        storage.set(CLICKS_KEY, "many".into()).unwrap();
        storage.set(LAST_VISIT_KEY, "yesterday".into()).unwrap();
        let state = SessionState::restore(&mut storage, at(5)).unwrap();
        assert_eq!(state.clicks, 0);
        assert_eq!(state.previous_visit, None);
    }

    #[test]
    fn interaction_persists_count_and_time() {
        let mut storage = MemoryStorage::new();
        let mut state = SessionState::restore(&mut storage, at(0)).unwrap();
        state.record_interaction(&mut storage, 4, at(9_000)).unwrap();
        assert_eq!(state.clicks, 4);
        assert_eq!(storage.get(CLICKS_KEY).as_deref(), Some("4"));
        assert_eq!(storage.get(LAST_VISIT_KEY).as_deref(), Some("9000"));
    }
}
