//! Worker pool for batch work that doesn't have to finish inside one frame, such as
//! populating voxel chunks that just streamed in.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// A finished job with its submission id and how long the worker spent on it.
#[derive(Debug)]
pub struct JobOut<R> {
    pub job_id: u64,
    pub result: R,
    pub t_ms: u32,
}

struct Queued<J> {
    job_id: u64,
    job: J,
}

/// Fixed set of workers pulling jobs from one bounded queue and pushing results to an
/// unbounded one. Dropping the pool closes the queue and lets the workers exit.
pub struct JobPool<J, R> {
    job_tx: Option<Sender<Queued<J>>>,
    res_rx: Receiver<JobOut<R>>,
    _pool: ThreadPool,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    next_job_id: u64,
    workers: usize,
}

impl<J, R> JobPool<J, R>
where
    J: Send + 'static,
    R: Send + 'static,
{
    /// Starts `workers` threads named `<name>-<i>` that run `process` on each job.
    pub fn new<F>(name: &str, workers: usize, queue_capacity: usize, process: F) -> Self
    where
        F: Fn(J) -> R + Send + Sync + 'static,
    {
        assert!(workers > 0, "job pool needs at least one worker");
        assert!(queue_capacity > 0, "job queue needs room for one job");
        let (job_tx, job_rx) = bounded::<Queued<J>>(queue_capacity);
        let (res_tx, res_rx) = unbounded();
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));
        let process = Arc::new(process);

        let thread_name = name.to_owned();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{thread_name}-{i}"))
            .build()
            .expect("job pool");
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx: Sender<JobOut<R>> = res_tx.clone();
            let process = Arc::clone(&process);
            let queued = Arc::clone(&queued);
            let inflight = Arc::clone(&inflight);
            pool.spawn(move || {
                while let Ok(Queued { job_id, job }) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    let t0 = Instant::now();
                    let result = process(job);
                    let t_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                    inflight.fetch_sub(1, Ordering::Relaxed);
                    if tx.send(JobOut { job_id, result, t_ms }).is_err() {
                        break;
                    }
                }
            });
        }
        log::debug!(target: "events", "job_pool_started name={name} workers={workers}");

        Self {
            job_tx: Some(job_tx),
            res_rx,
            _pool: pool,
            queued,
            inflight,
            next_job_id: 0,
            workers,
        }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queues a job, blocking while the queue is full. Returns its id, or `None` if the
    /// workers are gone.
    pub fn submit(&mut self, job: J) -> Option<u64> {
        let tx = self.job_tx.as_ref()?;
        let job_id = self.next_job_id;
        self.queued.fetch_add(1, Ordering::Relaxed);
        if tx.send(Queued { job_id, job }).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
            return None;
        }
        self.next_job_id += 1;
        Some(job_id)
    }

    /// Like [`JobPool::submit`] but hands the job back instead of waiting for room.
    pub fn try_submit(&mut self, job: J) -> Result<u64, J> {
        let Some(tx) = self.job_tx.as_ref() else {
            return Err(job);
        };
        let job_id = self.next_job_id;
        self.queued.fetch_add(1, Ordering::Relaxed);
        match tx.try_send(Queued { job_id, job }) {
            Ok(()) => {
                self.next_job_id += 1;
                Ok(job_id)
            }
            Err(TrySendError::Full(q) | TrySendError::Disconnected(q)) => {
                self.queued.fetch_sub(1, Ordering::Relaxed);
                Err(q.job)
            }
        }
    }

    /// Results that are ready now, in completion order.
    pub fn drain_results(&self) -> Vec<JobOut<R>> {
        self.res_rx.try_iter().collect()
    }

    /// Blocks until `count` more results arrive.
    pub fn wait_results(&self, count: usize) -> Vec<JobOut<R>> {
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            match self.res_rx.recv() {
                Ok(res) => out.push(res),
                Err(_) => break,
            }
        }
        out
    }

    /// Runs a whole batch and returns its results in submission order. Results of
    /// earlier jobs that were never drained are dropped.
    pub fn run_batch(&mut self, jobs: impl IntoIterator<Item = J>) -> Vec<R> {
        let t0 = Instant::now();
        let stale = self.drain_results().len();
        if stale > 0 {
            log::warn!("dropping {stale} undrained job results");
        }
        let first_id = self.next_job_id;
        let mut count = 0;
        for job in jobs {
            if self.submit(job).is_none() {
                break;
            }
            count += 1;
        }
        let mut results = Vec::with_capacity(count);
        while results.len() < count {
            match self.res_rx.recv() {
                Ok(res) if res.job_id >= first_id => results.push(res),
                Ok(_) => {}
                Err(_) => break,
            }
        }
        results.sort_by_key(|r| r.job_id);
        log::debug!(
            target: "perf",
            "ms={} job_batch jobs={} workers={}",
            t0.elapsed().as_millis(),
            count,
            self.workers
        );
        results.into_iter().map(|r| r.result).collect()
    }

    /// `(queued, in flight)` job counts.
    pub fn queue_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}

impl<J, R> Drop for JobPool<J, R> {
    fn drop(&mut self) {
        // Workers leave their recv loop once the sender is gone.
        self.job_tx.take();
    }
}
