//! Bounded background execution for enhancement tasks.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::Instrument;

use tabula_model::AnalysisId;

/// Spawns detached tasks, at most `max_concurrent` running at once.
///
/// Every task's completion is logged. A task that panics resolves its handle
/// to `None` instead of propagating the panic.
#[derive(Debug, Clone)]
pub struct EnhancementDispatcher {
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl EnhancementDispatcher {
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Permits not currently held by a running task.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `task` in the background for `analysis_id`.
    ///
    /// Callers may drop the handle; the task keeps running.
    pub fn spawn<F, T>(&self, analysis_id: AnalysisId, task: F) -> JoinHandle<Option<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let span = tracing::info_span!("enhance", analysis_id = %analysis_id);

        let worker = tokio::spawn(
            async move {
                // Never closed, so acquisition cannot fail.
                let _permit = permits.acquire_owned().await.ok();
                task.await
            }
            .instrument(span),
        );

        tokio::spawn(async move {
            match worker.await {
                Ok(output) => {
                    tracing::debug!(analysis_id = %analysis_id, "enhancement task finished");
                    Some(output)
                }
                Err(err) => {
                    tracing::error!(
                        analysis_id = %analysis_id,
                        error = %err,
                        "enhancement task did not complete"
                    );
                    None
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let dispatcher = EnhancementDispatcher::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                dispatcher.spawn(AnalysisId::generate(), async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some(()));
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(dispatcher.available(), 2);
    }

    #[tokio::test]
    async fn panicking_task_resolves_to_none() {
        let dispatcher = EnhancementDispatcher::new(1);
        let handle = dispatcher.spawn(AnalysisId::generate(), async {
            panic!("provider exploded");
        });
        let outcome: Option<()> = handle.await.unwrap();
        assert!(outcome.is_none());

        // The permit is released after the panic.
        let after = dispatcher.spawn(AnalysisId::generate(), async { 7 });
        assert_eq!(after.await.unwrap(), Some(7));
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        assert_eq!(EnhancementDispatcher::new(0).max_concurrent(), 1);
    }
}
