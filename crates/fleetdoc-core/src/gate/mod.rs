//! Run-wide admission control.
//!
//! One [`ConcurrencyGate`] is created per orchestrator and cloned into every task.
//! The bound applies to the whole run, across all profiles combined.

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use crate::error::CoreError;

/// Default number of tasks allowed to hold a slot at once.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// Counting gate bounding the number of in-flight tasks.
///
/// Admission is eventual, not FIFO-guaranteed.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    slots: Arc<Semaphore>,
    limit: usize,
}

/// Slot held by a task. Dropping it releases the slot, on success and failure alike.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    pub fn new(limit: usize) -> Result<Self, CoreError> {
        if limit == 0 {
            return Err(CoreError::ConfigurationUnavailable(
                "concurrency limit must be positive".into(),
            ));
        }
        if limit > Semaphore::MAX_PERMITS {
            return Err(CoreError::ConfigurationUnavailable(format!(
                "concurrency limit {limit} exceeds {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self {
            slots: Arc::new(Semaphore::new(limit)),
            limit,
        })
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Wait until fewer than `limit` holders are active, then take a slot.
    ///
    /// Fails only if the underlying semaphore was closed.
    pub async fn acquire(&self) -> Result<GatePermit, AcquireError> {
        let permit = Arc::clone(&self.slots).acquire_owned().await?;
        trace!(limit = self.limit, "gate slot acquired");
        Ok(GatePermit { _permit: permit })
    }
}

impl Default for ConcurrencyGate {
    fn default() -> Self {
        Self {
            slots: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY_LIMIT)),
            limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn zero_limit_is_rejected() {
        assert!(matches!(
            ConcurrencyGate::new(0),
            Err(CoreError::ConfigurationUnavailable(_))
        ));
    }

    #[test]
    fn default_limit_is_ten() {
        assert_eq!(ConcurrencyGate::default().limit(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn never_more_than_limit_holders() {
        let gate = ConcurrencyGate::new(3).unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let gate = gate.clone();
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _slot = gate.acquire().await.unwrap();
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(active.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn slot_is_released_when_holder_fails() {
        let gate = ConcurrencyGate::new(1).unwrap();

        let g = gate.clone();
        let failed = tokio::spawn(async move {
            let _slot = g.acquire().await.unwrap();
            Err::<(), &str>("remote call failed")
        })
        .await
        .unwrap();
        assert!(failed.is_err());

        // Would wait forever if the failed holder had leaked its slot.
        let _slot = gate.acquire().await.unwrap();
    }

    #[tokio::test]
    async fn separate_gates_do_not_share_slots() {
        let a = ConcurrencyGate::new(1).unwrap();
        let b = ConcurrencyGate::new(1).unwrap();

        let _held = a.acquire().await.unwrap();
        let _other = b.acquire().await.unwrap();
    }
}
