//! Fixed-size barrier-synchronous worker pool.
//!
//! The simulation driver advances through four strictly ordered stages per
//! iteration (repulsion, attraction, integration, stats) and every worker
//! must finish a stage before any worker starts the next one. Rayon's
//! fire-and-forget `spawn`/poll model (used elsewhere in this codebase's
//! ancestry) has no notion of "wait for this batch, then hand out the
//! next" without rebuilding that synchronization on top of it, so stages
//! are dispatched here over a small hand-rolled pool of persistent OS
//! threads and `crossbeam_channel` queues instead, one task batch and one
//! barrier per stage.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::{LayoutError, LayoutResult};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A pool of `worker_count` persistent threads that run one job batch at a
/// time and block the caller until the whole batch has completed.
pub struct ThreadPool {
  job_tx: Option<Sender<Job>>,
  done_rx: Receiver<()>,
  done_tx: Sender<()>,
  handles: Vec<std::thread::JoinHandle<()>>,
  worker_count: usize,
}

impl ThreadPool {
  pub fn new(worker_count: usize) -> LayoutResult<Self> {
    let worker_count = worker_count.max(1);
    let (job_tx, job_rx) = bounded::<Job>(worker_count * 4);
    let (done_tx, done_rx) = bounded::<()>(worker_count);

    let mut handles = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
      let job_rx: Receiver<Job> = job_rx.clone();
      let done_tx = done_tx.clone();
      let handle = std::thread::Builder::new()
        .name("layout-worker".into())
        .spawn(move || {
          while let Ok(job) = job_rx.recv() {
            job();
            // Disconnection during shutdown just drops the send.
            let _ = done_tx.send(());
          }
        })
        .map_err(LayoutError::ThreadFailure)?;
      handles.push(handle);
    }

    Ok(Self {
      job_tx: Some(job_tx),
      done_rx,
      done_tx,
      handles,
      worker_count,
    })
  }

  pub fn worker_count(&self) -> usize {
    self.worker_count
  }

  /// Submit `jobs` (at most one per worker slot in flight at a time isn't
  /// required; any number of jobs may be queued) and block until every one
  /// of them has run. This is the barrier: `run_batch` never returns
  /// before the last job completes.
  pub fn run_batch(&self, jobs: Vec<Job>) {
    let count = jobs.len();
    let tx = self.job_tx.as_ref().expect("pool not yet shut down");
    for job in jobs {
      tx.send(job).expect("worker threads outlive run_batch");
    }
    for _ in 0..count {
      self.done_rx.recv().expect("worker threads outlive run_batch");
    }
  }

  /// Split `0..len` into `worker_count` contiguous-ish chunks and run
  /// `body` once per chunk, on the pool, blocking until all chunks finish.
  pub fn run_striped<F>(&self, len: usize, body: F)
  where
    F: Fn(std::ops::Range<usize>) + Send + Sync + 'static,
  {
    if len == 0 {
      return;
    }
    let body = Arc::new(body);
    let workers = self.worker_count.min(len);
    let chunk = len.div_ceil(workers);
    let mut jobs: Vec<Job> = Vec::with_capacity(workers);
    let mut start = 0;
    while start < len {
      let end = (start + chunk).min(len);
      let body = Arc::clone(&body);
      jobs.push(Box::new(move || body(start..end)));
      start = end;
    }
    self.run_batch(jobs);
  }

  /// As `run_batch`, but for jobs that borrow driver-local state instead
  /// of owning it. Sound because `run_batch` never returns before every
  /// submitted job has finished and been dropped on its worker thread, so
  /// no borrowed data can outlive its jobs — the same argument
  /// `std::thread::scope` makes, applied to a persistent pool instead of
  /// threads spawned fresh per batch.
  fn run_scoped<'a>(&self, jobs: Vec<Box<dyn FnOnce() + Send + 'a>>) {
    let extended: Vec<Job> = jobs
      .into_iter()
      .map(|job| unsafe {
        std::mem::transmute::<Box<dyn FnOnce() + Send + 'a>, Job>(job)
      })
      .collect();
    self.run_batch(extended);
  }

  /// As `run_striped`, but `body` may borrow from the caller's stack
  /// instead of needing `'static` + `Arc`.
  pub fn run_striped_scoped<'a, F>(&self, len: usize, body: &'a F)
  where
    F: Fn(std::ops::Range<usize>) + Sync + 'a,
  {
    if len == 0 {
      return;
    }
    let workers = self.worker_count.min(len);
    let chunk = len.div_ceil(workers);
    let mut jobs: Vec<Box<dyn FnOnce() + Send + 'a>> = Vec::with_capacity(workers);
    let mut start = 0;
    while start < len {
      let end = (start + chunk).min(len);
      jobs.push(Box::new(move || body(start..end)));
      start = end;
    }
    self.run_scoped(jobs);
  }

  /// One job per worker index `0..worker_count`, each running to
  /// completion independently; `body` decides what that worker does with
  /// its index (e.g. walk a pre-partitioned strided slice). Unlike
  /// `run_striped_scoped`, the caller controls the partitioning instead of
  /// getting a contiguous range.
  pub fn run_worker_scoped<'a, F>(&self, worker_count: usize, body: &'a F)
  where
    F: Fn(usize) + Sync + 'a,
  {
    if worker_count == 0 {
      return;
    }
    let jobs: Vec<Box<dyn FnOnce() + Send + 'a>> = (0..worker_count)
      .map(|w| Box::new(move || body(w)) as Box<dyn FnOnce() + Send + 'a>)
      .collect();
    self.run_scoped(jobs);
  }
}

impl Drop for ThreadPool {
  fn drop(&mut self) {
    // Dropping the sender disconnects `job_rx` in every worker, which
    // ends their `recv()` loop after the current job (if any).
    self.job_tx.take();
    for handle in self.handles.drain(..) {
      let _ = handle.join();
    }
  }
}

#[cfg(test)]
#[path = "threading_test.rs"]
mod threading_test;
