use super::*;
use crate::particle::ParticleContainer;

#[test]
fn zero_interval_never_emits() {
  let mut emitter = SnapshotEmitter::new(0);
  let container: ParticleContainer<2> = ParticleContainer::with_ids(["a".into()]);
  let mut emitted = 0;
  for iteration in 0..10 {
    emitter.maybe_emit(0, iteration, &container, |_| emitted += 1);
  }
  assert_eq!(emitted, 0);
}

#[test]
fn sequence_is_monotonic_across_layers() {
  let mut emitter = SnapshotEmitter::new(1);
  let container: ParticleContainer<2> = ParticleContainer::with_ids(["a".into()]);
  let mut sequences = Vec::new();
  for layer in 0..2 {
    for iteration in 0..3 {
      emitter.maybe_emit(layer, iteration, &container, |s| sequences.push(s.sequence));
    }
  }
  let mut sorted = sequences.clone();
  sorted.sort_unstable();
  assert_eq!(sequences, sorted);
  assert_eq!(sequences, (0..sequences.len() as u64).collect::<Vec<_>>());
}
