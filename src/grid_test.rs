use super::*;

#[test]
fn stencil_sizes_match_half_plus_self() {
  assert_eq!(half_neighbor_offsets::<1>().len(), 2);
  assert_eq!(half_neighbor_offsets::<2>().len(), 5);
  assert_eq!(half_neighbor_offsets::<3>().len(), 14);
}

#[test]
fn stencil_always_includes_the_zero_offset() {
  let s = half_neighbor_offsets::<3>();
  assert!(s.iter().any(|o| o.iter().all(|&c| c == 0)));
}

#[test]
fn full_stencil_sizes_exclude_self() {
  assert_eq!(full_neighbor_offsets::<1>().len(), 2);
  assert_eq!(full_neighbor_offsets::<2>().len(), 8);
  assert_eq!(full_neighbor_offsets::<3>().len(), 26);
}

#[test]
fn full_stencil_never_includes_the_zero_offset() {
  let s = full_neighbor_offsets::<3>();
  assert!(!s.iter().any(|o| o.iter().all(|&c| c == 0)));
}

#[test]
fn voxel_of_maps_origin_to_first_cell() {
  let g = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([10.0, 10.0]));
  assert_eq!(g.voxel_of(&FixedVec::ZERO), 0);
}

#[test]
fn voxel_of_clamps_points_outside_the_bounding_box() {
  let g = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([2.0, 2.0]));
  let inside = g.voxel_of(&FixedVec::from_array([1.5, 1.5]));
  let outside = g.voxel_of(&FixedVec::from_array([1000.0, 1000.0]));
  assert_eq!(inside, outside);
}

#[test]
fn place_then_shift_moves_between_voxels() {
  let g = Grid::<1>::new(1.0, FixedVec::ZERO, FixedVec::from_array([10.0]));
  let v0 = g.place(0, &FixedVec::from_array([0.4]));
  assert_eq!(g.voxel(v0).len(), 1);
  let v1 = g.shift(0, v0, &FixedVec::from_array([5.4]));
  assert_ne!(v0, v1);
  assert!(g.voxel(v0).is_empty());
  assert_eq!(g.voxel(v1).len(), 1);
}

#[test]
fn half_neighbors_of_a_corner_voxel_stay_in_bounds() {
  let g = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([3.0, 3.0]));
  let corner = g.voxel_of(&FixedVec::from_array([2.9, 2.9]));
  let neighbors = g.half_neighbors(corner);
  assert!(neighbors.len() <= 5);
  assert!(neighbors.contains(&corner));
}

#[test]
fn full_neighbors_of_a_corner_voxel_exclude_self_and_stay_in_bounds() {
  let g = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([3.0, 3.0]));
  let corner = g.voxel_of(&FixedVec::from_array([2.9, 2.9]));
  let neighbors = g.full_neighbors(corner);
  assert!(neighbors.len() <= 8);
  assert!(!neighbors.contains(&corner));
}
