//! Single-slot look-ahead buffer.
//!
//! At most one fetch is in flight. Issuing a new request aborts the previous
//! task and bumps the generation; a completed fetch only fills the slot when
//! its generation is still current, so a slow superseded response can never
//! overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use onemore_core::ContentItem;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::source::ContentSource;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    item: Option<ContentItem>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Prefetcher<S> {
    source: Arc<S>,
    slot: Arc<Mutex<Slot>>,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl<S> std::fmt::Debug for Prefetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Prefetcher(generation {}, ready: {})",
            self.generation,
            self.is_ready()
        )
    }
}

impl<S: ContentSource> Prefetcher<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            slot: Arc::new(Mutex::new(Slot::default())),
            generation: 0,
            in_flight: None,
        }
    }

    /// Start fetching the next item, superseding any fetch in flight.
    /// Returns the generation of the new request.
    ///
    /// Must be called within a tokio runtime.
    pub fn request(&mut self, exclude: Option<String>) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        {
            let mut slot = lock(&self.slot);
            slot.generation = generation;
            slot.item = None;
        }

        let source = Arc::clone(&self.source);
        let slot = Arc::clone(&self.slot);
        let task = tokio::spawn(async move {
            match source.fetch_one(exclude.as_deref()).await {
                Ok(item) => {
                    let mut slot = lock(&slot);
                    if slot.generation == generation {
                        debug!(generation, id = %item.id, "prefetched");
                        slot.item = Some(item);
                    } else {
                        debug!(generation, current = slot.generation, "dropping stale prefetch");
                    }
                }
                Err(e) => debug!(generation, error = %e, "prefetch failed"),
            }
        });
        self.in_flight = Some(task.abort_handle());
        generation
    }
}

impl<S> Prefetcher<S> {
    /// Abort the fetch in flight, if any. A buffered item is kept.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    pub fn is_ready(&self) -> bool {
        lock(&self.slot).item.is_some()
    }

    /// A fetch is running and has not completed yet.
    pub fn is_pending(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn peek(&self) -> Option<ContentItem> {
        lock(&self.slot).item.clone()
    }

    /// Empty the buffer, returning what it held.
    pub fn take(&mut self) -> Option<ContentItem> {
        lock(&self.slot).item.take()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<S> Drop for Prefetcher<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{FakeSource, Reply, item};
    use std::time::Duration;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn fills_the_slot_once_the_fetch_resolves() {
        let source = Arc::new(FakeSource::counting(ms(30)));
        let mut prefetcher = Prefetcher::new(Arc::clone(&source));

        assert_eq!(prefetcher.request(Some("a".into())), 1);
        sleep(ms(10)).await;
        assert!(!prefetcher.is_ready());
        assert!(prefetcher.is_pending());

        sleep(ms(30)).await;
        assert_eq!(prefetcher.peek(), Some(item("c1")));
        assert!(!prefetcher.is_pending());
        assert_eq!(source.fetches(), vec![Some("a".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_requests_keep_only_the_second_result() {
        // The superseded fetch would resolve first if it were not aborted.
        let source = Arc::new(FakeSource::new(|exclude| match exclude {
            None => Reply::After(ms(10), item("first")),
            Some(_) => Reply::After(ms(100), item("second")),
        }));
        let mut prefetcher = Prefetcher::new(Arc::clone(&source));

        prefetcher.request(None);
        prefetcher.request(Some("x".into()));

        sleep(ms(50)).await;
        assert_eq!(prefetcher.peek(), None);

        sleep(ms(100)).await;
        assert_eq!(prefetcher.peek(), Some(item("second")));
        assert_eq!(prefetcher.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_superseded_fetch_never_overwrites() {
        let source = Arc::new(FakeSource::new(|exclude| match exclude {
            None => Reply::After(ms(100), item("first")),
            Some(_) => Reply::After(ms(10), item("second")),
        }));
        let mut prefetcher = Prefetcher::new(Arc::clone(&source));

        prefetcher.request(None);
        prefetcher.request(Some("x".into()));

        sleep(ms(200)).await;
        assert_eq!(prefetcher.peek(), Some(item("second")));
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_absorbed() {
        let source = Arc::new(FakeSource::new(|_| Reply::Fail));
        let mut prefetcher = Prefetcher::new(source);

        prefetcher.request(None);
        sleep(ms(1)).await;
        assert!(!prefetcher.is_ready());
        assert!(!prefetcher.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn take_empties_the_buffer() {
        let source = Arc::new(FakeSource::counting(ms(5)));
        let mut prefetcher = Prefetcher::new(source);

        prefetcher.request(None);
        sleep(ms(10)).await;
        assert_eq!(prefetcher.take(), Some(item("c1")));
        assert!(!prefetcher.is_ready());
        assert_eq!(prefetcher.take(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_a_hung_fetch() {
        let source = Arc::new(FakeSource::new(|_| Reply::Hang));
        let mut prefetcher = Prefetcher::new(Arc::clone(&source));

        prefetcher.request(None);
        sleep(ms(1)).await;
        assert!(prefetcher.is_pending());

        prefetcher.cancel();
        assert!(!prefetcher.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_prefetcher_aborts_its_task() {
        let source = Arc::new(FakeSource::new(|_| Reply::Hang));
        let mut prefetcher = Prefetcher::new(Arc::clone(&source));
        prefetcher.request(None);
        sleep(ms(1)).await;
        assert_eq!(Arc::strong_count(&source), 3);

        drop(prefetcher);
        sleep(ms(1)).await;
        assert_eq!(Arc::strong_count(&source), 1);
    }
}
