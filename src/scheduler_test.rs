use super::*;
use crate::math::FixedVec;

#[test]
fn every_voxel_appears_exactly_once() {
  let grid = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([6.0, 6.0]));
  let sched = GridScheduler::build(&grid);
  let mut visited: Vec<usize> = sched.visit_list().to_vec();
  visited.sort_unstable();
  let mut expected: Vec<usize> = (0..grid.voxel_count()).collect();
  expected.sort_unstable();
  assert_eq!(visited, expected);
}

#[test]
fn round_robin_slices_never_collide_with_a_full_neighbor() {
  let grid = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([9.0, 9.0]));
  let sched = GridScheduler::build(&grid);
  let thread_count = sched.effective_thread_count(8);
  for w in 0..thread_count {
    let slice = sched.voxel_list_for(w, thread_count);
    for &v in &slice {
      let neighbors = grid.full_neighbors(v);
      for &n in &neighbors {
        assert!(
          !slice.contains(&n),
          "voxel {v} and same-slice neighbor {n} must not collide"
        );
      }
    }
  }
}

#[test]
fn voxel_list_for_partitions_the_visit_list() {
  let grid = Grid::<2>::new(1.0, FixedVec::ZERO, FixedVec::from_array([6.0, 6.0]));
  let sched = GridScheduler::build(&grid);
  let thread_count = 3;
  let mut recombined: Vec<usize> = (0..thread_count)
    .flat_map(|w| sched.voxel_list_for(w, thread_count))
    .collect();
  recombined.sort_unstable();
  let mut expected: Vec<usize> = (0..grid.voxel_count()).collect();
  expected.sort_unstable();
  assert_eq!(recombined, expected);
}

#[test]
fn effective_thread_count_is_capped_by_voxels_per_edge_over_two() {
  let grid = Grid::<1>::new(1.0, FixedVec::ZERO, FixedVec::from_array([4.0]));
  let sched = GridScheduler::build(&grid);
  assert_eq!(sched.effective_thread_count(64), 2);
  assert!(sched.effective_thread_count(1) >= 1);
}
