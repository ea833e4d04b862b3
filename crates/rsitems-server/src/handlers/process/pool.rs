//! Fixed-capacity worker pool.
//!
//! A [`Semaphore`] bounds execution: submitted tasks are spawned
//! immediately and run once they hold one of the pool's permits, so at most
//! `capacity` tasks execute concurrently. Submission never blocks the
//! submitter; tasks beyond the capacity queue on the semaphore, and the
//! queue is unbounded.
//!
//! The pool is a long-lived resource owned by the service, not recreated
//! per batch. [`WorkerPool::shutdown`] drains it: every task submitted
//! before the call runs to completion, whether it already held a permit or
//! was still queued, then the pool closes and later submissions resolve to
//! [`PoolClosed`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, Semaphore};
use tokio::task::JoinHandle;
use tracing::debug;

/// Error returned by tasks submitted after shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("worker pool is shut down")]
pub struct PoolClosed;

/// Fixed-size set of execution slots running submitted tasks concurrently.
#[derive(Debug)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    closed: AtomicBool,
    outstanding: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

/// Settles one outstanding submission when the task finishes or is dropped.
struct SubmissionGuard {
    outstanding: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        if self.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_one();
        }
    }
}

impl WorkerPool {
    /// Creates a pool with the given number of slots.
    ///
    /// Capacity must be at least 1; configuration validation enforces this
    /// before the pool is constructed.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            closed: AtomicBool::new(false),
            outstanding: Arc::new(AtomicUsize::new(0)),
            idle: Arc::new(Notify::new()),
        }
    }

    /// Creates a pool wrapped in Arc, ready to be shared across handlers.
    pub fn new_shared(capacity: usize) -> Arc<Self> {
        Arc::new(Self::new(capacity))
    }

    /// Returns the number of execution slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true once the pool has been shut down.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Submits a unit of work.
    ///
    /// Returns immediately; the task starts once a slot frees up. The
    /// handle yields `Err(PoolClosed)` if the pool was already shut down
    /// when the task was submitted.
    pub fn submit<F>(&self, task: F) -> JoinHandle<Result<F::Output, PoolClosed>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        // Register before reading the closed flag: shutdown flips the flag
        // first, so a submission that saw it unset is counted and drained.
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        let rejected = self.closed.load(Ordering::SeqCst);

        let guard = SubmissionGuard {
            outstanding: Arc::clone(&self.outstanding),
            idle: Arc::clone(&self.idle),
        };
        let semaphore = Arc::clone(&self.semaphore);
        tokio::spawn(async move {
            let _guard = guard;
            if rejected {
                return Err(PoolClosed);
            }
            let _permit = semaphore.acquire_owned().await.map_err(|_| PoolClosed)?;
            Ok(task.await)
        })
    }

    /// Drains the pool and closes it.
    ///
    /// Rejects submissions arriving from this point on, then waits until
    /// every earlier submission has settled, running or still queued, before
    /// closing the semaphore.
    pub async fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        while self.outstanding.load(Ordering::SeqCst) > 0 {
            self.idle.notified().await;
        }
        // Wake any sibling shutdown caller parked on the same notify.
        self.idle.notify_one();
        self.semaphore.close();
        debug!(capacity = self.capacity, "worker pool shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_submit_runs_task_to_completion() {
        let pool = WorkerPool::new(2);

        let handle = pool.submit(async { 21 * 2 });

        assert_eq!(handle.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_capacity_limits_concurrency() {
        let pool = WorkerPool::new(2);
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_concurrent = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let concurrent = Arc::clone(&concurrent);
            let max_concurrent = Arc::clone(&max_concurrent);
            handles.push(pool.submit(async move {
                let current = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                max_concurrent.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let max = max_concurrent.load(Ordering::SeqCst);
        assert!(max <= 2, "capacity 2 must never run {max} tasks at once");
        assert!(max > 1, "tasks should overlap, max concurrent was {max}");
    }

    #[tokio::test]
    async fn test_submission_never_blocks_the_submitter() {
        let pool = WorkerPool::new(1);

        // Saturate the single slot, then queue far more work than fits.
        let start = Instant::now();
        let mut handles = Vec::new();
        for _ in 0..100 {
            handles.push(pool.submit(async {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }));
        }
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(50),
            "submitting queued work should return immediately, took {elapsed:?}"
        );

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
    }

    #[tokio::test]
    async fn test_shutdown_drains_in_flight_tasks() {
        let pool = WorkerPool::new(2);
        let finished = Arc::new(AtomicUsize::new(0));

        for _ in 0..6 {
            let finished = Arc::clone(&finished);
            pool.submit(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                finished.fetch_add(1, Ordering::SeqCst);
            });
        }

        pool.shutdown().await;

        assert_eq!(
            finished.load(Ordering::SeqCst),
            6,
            "shutdown must wait for queued tasks"
        );
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_shutdown_drains_tasks_that_have_not_started() {
        // Capacity 1 so most submissions are still queued, never having
        // acquired a permit, when shutdown begins.
        let pool = WorkerPool::new(1);
        let finished = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let finished = Arc::clone(&finished);
            handles.push(pool.submit(async move {
                finished.fetch_add(1, Ordering::SeqCst);
            }));
        }

        // No yield before shutdown: none of the tasks has been polled yet.
        pool.shutdown().await;

        assert_eq!(
            finished.load(Ordering::SeqCst),
            10,
            "queued tasks must run before shutdown resolves"
        );
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
    }

    #[tokio::test]
    async fn test_submission_after_shutdown_is_rejected() {
        let pool = WorkerPool::new(2);
        pool.shutdown().await;

        let handle = pool.submit(async { 1 });

        assert_eq!(handle.await.unwrap(), Err(PoolClosed));
    }
}
