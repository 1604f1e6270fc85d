use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[test]
fn run_batch_waits_for_every_job() {
  let pool = ThreadPool::new(4).unwrap();
  let counter = Arc::new(AtomicUsize::new(0));
  let jobs: Vec<Job> = (0..10)
    .map(|_| {
      let counter = Arc::clone(&counter);
      Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
      }) as Job
    })
    .collect();
  pool.run_batch(jobs);
  assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn run_striped_covers_the_whole_range_without_overlap() {
  let pool = ThreadPool::new(3).unwrap();
  let seen: Arc<std::sync::Mutex<Vec<usize>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
  let seen_for_body = Arc::clone(&seen);
  pool.run_striped(17, move |range| {
    let mut guard = seen_for_body.lock().unwrap();
    guard.extend(range);
  });
  let mut got = seen.lock().unwrap().clone();
  got.sort_unstable();
  assert_eq!(got, (0..17).collect::<Vec<_>>());
}

#[test]
fn run_striped_scoped_can_borrow_the_caller_stack() {
  let pool = ThreadPool::new(3).unwrap();
  let mut buffer = vec![0usize; 12];
  let totals: Mutex<usize> = Mutex::new(0);
  let body = |range: std::ops::Range<usize>| {
    *totals.lock().unwrap() += range.len();
  };
  pool.run_striped_scoped(buffer.len(), &body);
  assert_eq!(*totals.lock().unwrap(), buffer.len());
  buffer.fill(1);
  assert_eq!(buffer.iter().sum::<usize>(), 12);
}

#[test]
fn run_worker_scoped_invokes_every_worker_index_once() {
  let pool = ThreadPool::new(3).unwrap();
  let seen: Mutex<Vec<usize>> = Mutex::new(Vec::new());
  let body = |w: usize| {
    seen.lock().unwrap().push(w);
  };
  pool.run_worker_scoped(5, &body);
  let mut got = seen.lock().unwrap().clone();
  got.sort_unstable();
  assert_eq!(got, (0..5).collect::<Vec<_>>());
}

#[test]
fn pool_shuts_down_cleanly_on_drop() {
  let pool = ThreadPool::new(2).unwrap();
  assert_eq!(pool.worker_count(), 2);
  drop(pool);
}
