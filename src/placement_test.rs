use super::*;

#[test]
fn placement_distance_uses_override_when_given() {
  assert_eq!(placement_distance(100, 2, Some(3.5)), 3.5);
}

#[test]
fn placement_distance_is_capped_at_ten() {
  assert_eq!(placement_distance(1_000_000, 2, None), 10.0);
}

#[test]
fn placement_distance_differs_by_dimension_formula() {
  let d2 = placement_distance(16, 2, None);
  let d3 = placement_distance(16, 3, None);
  assert!((d2 - 1.0).abs() < 1e-9); // 0.25 * sqrt(16)
  assert!(d3 > 0.0 && d3 != d2);
}

#[test]
fn center_of_mass_of_empty_set_is_origin() {
  let com = center_of_mass::<2>(&[]);
  assert_eq!(com, FixedVec::ZERO);
}

#[test]
fn center_of_mass_is_weighted_by_mass() {
  let a = FixedVec::<2>::from_array([0.0, 0.0]);
  let b = FixedVec::<2>::from_array([4.0, 0.0]);
  let com = center_of_mass(&[(a, 1.0), (b, 3.0)]);
  assert!((com[0] - 3.0).abs() < 1e-9);
}

#[test]
fn expansion_direction_falls_back_when_degenerate() {
  let mut rng = rand::rng();
  let parent = FixedVec::<2>::from_array([1.0, 1.0]);
  let dir = expansion_direction(parent, parent, None, &mut rng);
  assert!((dir.magnitude() - 1.0).abs() < 1e-9);
}

#[test]
fn expansion_direction_blends_com_and_grandparent_terms() {
  let mut rng = rand::rng();
  let parent = FixedVec::<2>::from_array([1.0, 0.0]);
  let com = FixedVec::<2>::ZERO;
  let grandparent = FixedVec::<2>::from_array([1.0, 1.0]);
  let dir = expansion_direction(parent, com, Some(grandparent), &mut rng);
  assert!((dir.magnitude() - 1.0).abs() < 1e-9);
  assert!(dir[0] > 0.0);
}

#[test]
fn expansion_direction_uses_com_term_when_grandparent_absent() {
  let mut rng = rand::rng();
  let parent = FixedVec::<2>::from_array([1.0, 0.0]);
  let com = FixedVec::<2>::ZERO;
  let dir = expansion_direction(parent, com, None, &mut rng);
  assert!((dir[0] - 1.0).abs() < 1e-9);
}

#[test]
fn place_leafs_close_collapses_onto_parent() {
  let mut rng = rand::rng();
  let config = SimConfig::default().with_place_leafs_close(true);
  let parent = FixedVec::<2>::from_array([5.0, 5.0]);
  let direction = FixedVec::<2>::from_array([1.0, 0.0]);
  let placed = place_children(parent, direction, &[1, 2, 3], true, &config, &mut rng);
  for (_, pos) in placed {
    assert!(pos.distance(&parent) <= config.placement_radius + 1e-9);
  }
}
