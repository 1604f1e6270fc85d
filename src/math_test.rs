use super::*;

#[test]
fn distance_is_symmetric() {
  let a = FixedVec::<2>::from_array([0.0, 0.0]);
  let b = FixedVec::<2>::from_array([3.0, 4.0]);
  assert_eq!(a.distance(&b), 5.0);
  assert_eq!(b.distance(&a), 5.0);
}

#[test]
fn normalized_zero_vector_is_none() {
  let z = FixedVec::<3>::ZERO;
  assert!(z.normalized().is_none());
}

#[test]
fn normalized_has_unit_magnitude() {
  let v = FixedVec::<3>::from_array([2.0, 0.0, 0.0]);
  let n = v.normalized().unwrap();
  assert!((n.magnitude() - 1.0).abs() < 1e-9);
}

#[test]
fn clamp_components_caps_each_axis() {
  let v = FixedVec::<2>::from_array([10.0, -10.0]);
  let c = v.clamp_components(-1.0, 1.0);
  assert_eq!(c.0, [1.0, -1.0]);
}

#[test]
fn is_all_zero_detects_origin() {
  assert!(FixedVec::<2>::ZERO.is_all_zero());
  assert!(!FixedVec::<2>::from_array([0.0, 0.1]).is_all_zero());
}

#[test]
fn point_on_unit_sphere_2d_is_unit_length() {
  let mut rng = rand::rng();
  for _ in 0..100 {
    let p = point_on_unit_sphere::<2>(&mut rng);
    assert!((p.magnitude() - 1.0).abs() < 1e-9);
  }
}

#[test]
fn point_on_unit_sphere_3d_is_unit_length() {
  let mut rng = rand::rng();
  for _ in 0..100 {
    let p = point_on_unit_sphere::<3>(&mut rng);
    assert!((p.magnitude() - 1.0).abs() < 1e-9);
  }
}

#[test]
fn point_on_sphere_is_at_requested_radius() {
  let mut rng = rand::rng();
  let center = FixedVec::<3>::from_array([1.0, 2.0, 3.0]);
  let p = point_on_sphere::<3>(&mut rng, center, 2.5);
  assert!((p.distance(&center) - 2.5).abs() < 1e-9);
}
