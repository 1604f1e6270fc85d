use super::*;
use crate::particle::ParticleContainer;

#[test]
fn seed_random_positions_skips_anchors_and_already_set() {
  let mut rng = rand::rng();
  let mut c: ParticleContainer<2> = ParticleContainer::with_ids(["a".into(), "b".into()]);
  c.get_mut(0).mark_anchor();
  seed_random_positions(&mut c, 5.0, &mut rng);
  assert!(!c.get(0).is_position_initialized());
  assert!(c.get(1).is_position_initialized());
}

#[test]
fn apply_anchors_overrides_existing_position() {
  let mut c: ParticleContainer<2> = ParticleContainer::with_ids(["a".into()]);
  c.get(0).set_x(FixedVec::from_array([9.0, 9.0]));
  apply_anchors(&mut c, [(0, FixedVec::from_array([1.0, 2.0]))]);
  assert_eq!(c.get(0).x(), FixedVec::from_array([1.0, 2.0]));
  assert!(c.get(0).is_anchor());
}

#[test]
fn interpolation_propagates_from_initialized_neighbors() {
  let mut g = Graph::new(3);
  g.add_edge(0, 1, 1.0);
  g.add_edge(1, 2, 1.0);
  let mut c: ParticleContainer<2> =
    ParticleContainer::with_ids(["a".into(), "b".into(), "c".into()]);
  c.get(0).set_x(FixedVec::from_array([0.0, 2.0]));
  c.get(2).set_x(FixedVec::from_array([4.0, 2.0]));
  interpolate_unset_positions(&mut c, &g, &[true, true, true]);
  assert_eq!(c.get(1).x(), FixedVec::from_array([2.0, 2.0]));
}

#[test]
fn initial_positions_are_applied_but_not_marked_as_anchors() {
  let mut c: ParticleContainer<2> = ParticleContainer::with_ids(["a".into(), "b".into()]);
  apply_initial_positions(&mut c, [(0, FixedVec::from_array([3.0, 4.0]))]);
  assert_eq!(c.get(0).x(), FixedVec::from_array([3.0, 4.0]));
  assert!(!c.get(0).is_anchor());
  assert!(!c.get(1).is_position_initialized());
}

#[test]
fn initial_positions_never_override_an_anchor() {
  let mut c: ParticleContainer<2> = ParticleContainer::with_ids(["a".into()]);
  apply_anchors(&mut c, [(0, FixedVec::from_array([1.0, 1.0]))]);
  apply_initial_positions(&mut c, [(0, FixedVec::from_array([9.0, 9.0]))]);
  assert_eq!(c.get(0).x(), FixedVec::from_array([1.0, 1.0]));
}

#[test]
fn interpolation_leaves_isolated_vertices_alone() {
  let g = Graph::new(2);
  let mut c: ParticleContainer<2> = ParticleContainer::with_ids(["a".into(), "b".into()]);
  interpolate_unset_positions(&mut c, &g, &[true, true]);
  assert!(!c.get(0).is_position_initialized());
  assert!(!c.get(1).is_position_initialized());
}
