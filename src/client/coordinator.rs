use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

use super::error::RefreshFailure;

type RefreshFuture = Shared<BoxFuture<'static, Result<String, RefreshFailure>>>;

#[derive(Default)]
struct Slot {
    generation: u64,
    in_flight: Option<RefreshFuture>,
}

/// Single-flight coordination for token refreshes.
///
/// The first caller to ask for a refresh starts it; everyone who asks while it
/// is running awaits the same shared outcome. The slot is emptied as soon as
/// the refresh resolves, so the next rejection starts a fresh one.
///
/// Cloning yields a handle to the same slot.
#[derive(Clone, Default)]
pub struct RefreshCoordinator {
    slot: Arc<Mutex<Slot>>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the running refresh, or starts one with `start` if none is running.
    ///
    /// `start` is only called when this caller actually begins a new refresh.
    pub async fn get_or_start<F, Fut>(&self, start: F) -> Result<String, RefreshFailure>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, RefreshFailure>> + Send + 'static,
    {
        let refresh = {
            let mut slot = self.lock();
            match &slot.in_flight {
                Some(running) => {
                    debug!(
                        generation = slot.generation,
                        "joining token refresh already in flight"
                    );
                    running.clone()
                }
                None => {
                    slot.generation += 1;
                    let generation = slot.generation;
                    let handle = self.slot.clone();
                    let work = start();
                    let refresh = async move {
                        let outcome = work.await;
                        let mut slot = handle.lock().unwrap_or_else(|e| e.into_inner());
                        if slot.generation == generation {
                            slot.in_flight = None;
                        }
                        outcome
                    }
                    .boxed()
                    .shared();
                    debug!(generation, "starting token refresh");
                    slot.in_flight = Some(refresh.clone());
                    refresh
                }
            }
        };
        refresh.await
    }

    /// Whether a refresh is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Forgets any running refresh. Callers already awaiting it still get its outcome.
    pub fn reset(&self) {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.in_flight = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        // The slot holds no invariants a panicking holder could break.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}
