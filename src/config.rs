//! Simulation configuration.
//!
//! `SimConfig` mirrors the teacher's `MeshConfig`/`OctreeConfig` idiom: a
//! plain data struct with documented field-level defaults and chainable
//! `with_*` setters, rather than a builder object distinct from the config
//! itself.

use smallvec::SmallVec;

use crate::error::{LayoutError, LayoutResult};

/// Per-dimension anisotropy factors for the repulsion/attraction law.
///
/// An empty vector means isotropic (all factors effectively 1); this is
/// exactly the optimization the original engine performs after parsing user
/// input, carried forward here so the interaction handler never has to
/// special-case "all ones".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EllipseFactors(SmallVec<[f64; 3]>);

impl EllipseFactors {
  pub fn isotropic() -> Self {
    Self(SmallVec::new())
  }

  /// Build from explicit per-axis factors, collapsing an all-ones input to
  /// the isotropic (empty) representation.
  pub fn new(factors: impl IntoIterator<Item = f64>) -> Self {
    let collected: SmallVec<[f64; 3]> = factors.into_iter().collect();
    if collected.iter().all(|&f| f == 1.0) {
      Self(SmallVec::new())
    } else {
      Self(collected)
    }
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Factor for dimension `d`, or `1.0` if isotropic or not specified for
  /// that axis (the last supplied factor is repeated, matching the
  /// original `resize(dimension, back())` behavior).
  pub fn factor(&self, d: usize) -> f64 {
    if self.0.is_empty() {
      1.0
    } else if d < self.0.len() {
      self.0[d]
    } else {
      *self.0.last().unwrap()
    }
  }
}

/// Tunable parameters for a simulation run (§6 of the specification).
#[derive(Clone, Debug)]
pub struct SimConfig {
  /// Requested worker count; the grid scheduler may cap it lower.
  pub thread_count: usize,
  /// Per-layer iteration cap; the effective cap is `min(150, max_iterations)`.
  pub max_iterations: u32,
  /// Euler integration time step.
  pub time_step: f64,
  /// Relative-change convergence threshold.
  pub cutoff_precision: f64,
  /// Repulsion range; also used as the voxel edge length.
  pub nbhd_radius: f64,
  /// Attraction equilibrium separation along active edges.
  pub eq_distance: f64,
  /// Collision radius used for the per-particle default.
  pub node_radius: f64,
  /// Default particle mass.
  pub mass: f64,
  /// Bounding radius for random initial placement; `None` means derive it
  /// from vertex count and dimension (`n^(1/D)`).
  pub outer_radius: Option<f64>,
  /// Layer seeding stride; `None` means derive it from child count and
  /// dimension.
  pub placement_distance: Option<f64>,
  /// Radius of the sphere children are scattered on when seeded.
  pub placement_radius: f64,
  /// Repulsion spring constant.
  pub casual_spring_constant: f64,
  /// Attraction spring constant.
  pub special_spring_constant: f64,
  /// Per-axis anisotropy; empty/isotropic by default.
  pub ellipse_factors: EllipseFactors,
  /// Iterations between snapshot emissions; 0 disables snapshotting.
  pub write_interval: u32,
  /// Collapse an all-leaf child batch onto its parent (scalef = 0).
  pub place_leafs_close: bool,
  /// Simulate the guiding MST instead of the full graph.
  pub layout_tree_only: bool,
  /// Use the graph's own edge weights for MST construction instead of the
  /// synthetic degree-based weighting.
  pub use_original_weights: bool,
  /// Drop particles left uninitialized after interpolation instead of
  /// leaving them at the origin for the simulation to push out.
  pub disregard_disconnected: bool,
  /// Suppress per-iteration progress logging (soft errors still warn).
  pub silent: bool,
}

impl Default for SimConfig {
  fn default() -> Self {
    Self {
      thread_count: 1,
      max_iterations: 250_000,
      time_step: 0.001,
      cutoff_precision: 1e-5,
      nbhd_radius: 1.0,
      eq_distance: 0.5,
      node_radius: 0.01,
      mass: 1.0,
      outer_radius: None,
      placement_distance: None,
      placement_radius: 0.1,
      casual_spring_constant: 10.0,
      special_spring_constant: 10.0,
      ellipse_factors: EllipseFactors::isotropic(),
      write_interval: 0,
      place_leafs_close: false,
      layout_tree_only: false,
      use_original_weights: false,
      disregard_disconnected: false,
      silent: false,
    }
  }
}

impl SimConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_thread_count(mut self, n: usize) -> Self {
    self.thread_count = n;
    self
  }

  pub fn with_max_iterations(mut self, n: u32) -> Self {
    self.max_iterations = n;
    self
  }

  pub fn with_time_step(mut self, t: f64) -> Self {
    self.time_step = t;
    self
  }

  pub fn with_cutoff_precision(mut self, c: f64) -> Self {
    self.cutoff_precision = c;
    self
  }

  pub fn with_nbhd_radius(mut self, r: f64) -> Self {
    self.nbhd_radius = r;
    self
  }

  pub fn with_eq_distance(mut self, e: f64) -> Self {
    self.eq_distance = e;
    self
  }

  pub fn with_node_radius(mut self, r: f64) -> Self {
    self.node_radius = r;
    self
  }

  pub fn with_mass(mut self, m: f64) -> Self {
    self.mass = m;
    self
  }

  pub fn with_outer_radius(mut self, r: f64) -> Self {
    self.outer_radius = Some(r);
    self
  }

  pub fn with_placement_distance(mut self, d: f64) -> Self {
    self.placement_distance = Some(d);
    self
  }

  pub fn with_placement_radius(mut self, r: f64) -> Self {
    self.placement_radius = r;
    self
  }

  pub fn with_ellipse_factors(mut self, f: EllipseFactors) -> Self {
    self.ellipse_factors = f;
    self
  }

  pub fn with_write_interval(mut self, n: u32) -> Self {
    self.write_interval = n;
    self
  }

  pub fn with_place_leafs_close(mut self, v: bool) -> Self {
    self.place_leafs_close = v;
    self
  }

  pub fn with_layout_tree_only(mut self, v: bool) -> Self {
    self.layout_tree_only = v;
    self
  }

  pub fn with_use_original_weights(mut self, v: bool) -> Self {
    self.use_original_weights = v;
    self
  }

  pub fn with_disregard_disconnected(mut self, v: bool) -> Self {
    self.disregard_disconnected = v;
    self
  }

  pub fn with_silent(mut self, v: bool) -> Self {
    self.silent = v;
    self
  }

  /// The effective per-layer iteration cap: `min(150, max_iterations)`.
  pub fn effective_iteration_cap(&self) -> u32 {
    self.max_iterations.min(150)
  }

  /// Reject configurations that cannot be honored before any simulation
  /// state is allocated.
  pub fn validate(&self, graph_has_weights: bool) -> LayoutResult<()> {
    if self.thread_count == 0 {
      return Err(LayoutError::Configuration(
        "thread_count must be at least 1".into(),
      ));
    }
    if self.use_original_weights && !graph_has_weights {
      return Err(LayoutError::Configuration(
        "use_original_weights requested but the graph has no edge weights".into(),
      ));
    }
    if self.nbhd_radius <= 0.0 {
      return Err(LayoutError::Configuration(
        "nbhd_radius must be positive".into(),
      ));
    }
    if self.time_step <= 0.0 {
      return Err(LayoutError::Configuration(
        "time_step must be positive".into(),
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
