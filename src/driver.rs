//! The simulation driver: the multi-level, four-stage barrier pipeline that
//! ties every other module together.

use rand::Rng;
use tracing::{debug, info, info_span};

use crate::config::SimConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::graph::Graph;
use crate::grid::Grid;
use crate::init::{
  apply_anchors, apply_initial_positions, default_outer_radius, interpolate_unset_positions,
  seed_random_positions,
};
use crate::interaction::InteractionHandler;
use crate::math::{point_on_sphere, FixedVec};
use crate::particle::ParticleContainer;
use crate::placement::{center_of_mass, expansion_direction, place_children};
use crate::scheduler::GridScheduler;
use crate::snapshot::{Snapshot, SnapshotEmitter};
use crate::stats::{ConvergenceTracker, EdgeLengthStats, StatsAccumulator};
use crate::threading::ThreadPool;
use crate::tree::GuidingTree;

/// Final state of a completed (or layout-tree-only) layout run.
pub struct LayoutOutput<const D: usize> {
  pub positions: Vec<FixedVec<D>>,
  pub root: usize,
  /// The guiding tree's own edges, `(u, v, weight)` with `u < v`.
  pub guiding_tree_edges: Vec<(usize, usize, f64)>,
  pub level_of: Vec<Option<usize>>,
  /// One entry per guiding-tree level, plus a trailing entry for the final
  /// settle pass over the fully-activated graph. When the caller supplied
  /// initial positions for every vertex, the per-layer loop is skipped
  /// entirely (§4.4's initial-coords shortcut) and this holds just two
  /// entries: the shortcut's single full-graph relaxation, then the final
  /// settle.
  pub iterations_per_layer: Vec<u32>,
}

/// Restrict `graph` to the induced subgraph over vertices whose level is at
/// most `layer`.
fn activated_subgraph(graph: &Graph, level_of: &[Option<usize>], layer: usize) -> Graph {
  let mut g = Graph::new(graph.vertex_count());
  if graph.has_weights() {
    g.mark_weighted();
  }
  for (u, v, w) in graph.edges() {
    let active = matches!(level_of[u], Some(l) if l <= layer)
      && matches!(level_of[v], Some(l) if l <= layer);
    if active {
      g.add_edge(u, v, w);
    }
  }
  g
}

/// Orchestrates the whole run: one pass of the four-stage pipeline per
/// iteration, one set of layers per the guiding tree's depth.
pub struct SimulationDriver<const D: usize> {
  config: SimConfig,
  handler: InteractionHandler<D>,
  pool: ThreadPool,
}

impl<const D: usize> SimulationDriver<D> {
  pub fn new(config: SimConfig) -> LayoutResult<Self> {
    let pool = ThreadPool::new(config.thread_count)?;
    Ok(Self {
      handler: InteractionHandler::new(config.clone()),
      config,
      pool,
    })
  }

  pub fn run(
    &self,
    graph: &Graph,
    anchors: impl IntoIterator<Item = (usize, FixedVec<D>)>,
    init_positions: impl IntoIterator<Item = (usize, FixedVec<D>)>,
    mut on_snapshot: impl FnMut(Snapshot<D>),
  ) -> LayoutResult<LayoutOutput<D>> {
    self.config.validate(graph.has_weights())?;
    if graph.vertex_count() == 0 {
      return Err(LayoutError::GraphTooSmall);
    }

    let guiding = GuidingTree::build(graph, self.config.use_original_weights);
    let mut container: ParticleContainer<D> =
      ParticleContainer::with_ids((0..graph.vertex_count()).map(|i| i.to_string()));
    for p in container.iter_mut() {
      p.set_radius(self.config.node_radius);
      p.set_mass(self.config.mass);
    }

    let mut rng = rand::rng();
    let outer_radius = self
      .config
      .outer_radius
      .unwrap_or_else(|| default_outer_radius(graph.vertex_count(), D));

    apply_anchors(&mut container, anchors);
    // `init_positions` is distinct from anchors: these vertices still
    // move during simulation, they just start somewhere the caller
    // chose rather than wherever random seeding or interpolation would
    // otherwise put them.
    apply_initial_positions(&mut container, init_positions);

    let all_positions_supplied =
      (0..graph.vertex_count()).all(|v| container.get(v).is_position_initialized());

    // Seed the root close to the origin so it reads as initialized
    // under the all-zero proxy without biasing where layout begins,
    // unless the caller already gave it a position.
    if !container.get(guiding.root).is_position_initialized() {
      container
        .get(guiding.root)
        .set_x(point_on_sphere(&mut rng, FixedVec::ZERO, outer_radius * 1e-3));
    }

    // One-time initialization: fall back to random placement for
    // anything the caller left unset, then fill gaps from whatever
    // initial/anchor positions were supplied, by neighbor averaging.
    // This runs once over the whole graph, independent of layering —
    // per-layer activation only decides when a vertex starts *moving*,
    // not whether it starts with some position.
    seed_random_positions(&mut container, outer_radius, &mut rng);
    let fully_eligible = vec![true; graph.vertex_count()];
    interpolate_unset_positions(&mut container, graph, &fully_eligible);

    let total_levels = guiding.level_count();
    let mut iterations_per_layer = Vec::new();
    let mut snapshotter = SnapshotEmitter::new(self.config.write_interval);

    if all_positions_supplied {
      // Initial-coords shortcut (§4.4): every vertex already has a
      // position, so there is nothing to reveal layer by layer. Relax
      // the whole graph from iteration one instead.
      let active_graph = graph.clone();
      let iterations = self.simulate_layer(
        total_levels,
        &active_graph,
        &fully_eligible,
        self.config.cutoff_precision,
        &mut container,
        &mut snapshotter,
        &mut on_snapshot,
        None,
        &guiding.level_of,
      );
      iterations_per_layer.push(iterations);
      info!(iterations, "initial-coords shortcut settled");
    } else {
      for layer in 0..total_levels {
        let span = info_span!("driver", layer, total_levels);
        let _enter = span.enter();

        if layer > 0 {
          self.seed_layer(&guiding, layer, &container, &mut rng);
        }

        let eligible: Vec<bool> = (0..graph.vertex_count())
          .map(|v| matches!(guiding.level_of[v], Some(l) if l <= layer))
          .collect();

        let active_graph = if self.config.layout_tree_only {
          guiding.layout_graph_at(layer)
        } else {
          activated_subgraph(graph, &guiding.level_of, layer)
        };

        let iterations = self.simulate_layer(
          layer,
          &active_graph,
          &eligible,
          self.config.cutoff_precision,
          &mut container,
          &mut snapshotter,
          &mut on_snapshot,
          Some(layer),
          &guiding.level_of,
        );
        iterations_per_layer.push(iterations);
        info!(layer, iterations, "layer settled");
      }
    }

    // Final settle: one more pass over the fully-activated graph with a
    // tightened cutoff, since per-layer convergence only has to satisfy
    // the coarser per-layer threshold.
    let final_eligible: Vec<bool> = (0..graph.vertex_count())
      .map(|v| guiding.level_of[v].is_some())
      .collect();
    let final_graph = if self.config.layout_tree_only {
      guiding.layout_graph_at(total_levels.saturating_sub(1))
    } else {
      activated_subgraph(graph, &guiding.level_of, total_levels.saturating_sub(1))
    };
    let settle_iterations = self.simulate_layer(
      total_levels,
      &final_graph,
      &final_eligible,
      self.config.cutoff_precision / 10.0,
      &mut container,
      &mut snapshotter,
      &mut on_snapshot,
      None,
      &guiding.level_of,
    );
    info!(settle_iterations, "final settle complete");
    iterations_per_layer.push(settle_iterations);

    let positions = container.iter().map(|p| p.x()).collect();
    Ok(LayoutOutput {
      positions,
      root: guiding.root,
      guiding_tree_edges: guiding.tree.edges(),
      level_of: guiding.level_of,
      iterations_per_layer,
    })
  }

  /// Place every vertex newly activated at `layer`, grouped by parent so
  /// siblings scatter around one seed point out from their parent.
  fn seed_layer(
    &self,
    guiding: &GuidingTree,
    layer: usize,
    container: &ParticleContainer<D>,
    rng: &mut impl Rng,
  ) {
    let mut by_parent: rustc_hash::FxHashMap<usize, Vec<usize>> = rustc_hash::FxHashMap::default();
    for &v in &guiding.levels[layer] {
      if let Some(parent) = guiding.parent[v] {
        by_parent.entry(parent).or_default().push(v);
      }
    }

    // Layer 1's children scatter directly on a unit sphere around their
    // parent — there is no "rest of the graph" yet to compute a center
    // of mass against.
    if layer == 1 {
      for (parent, children) in by_parent {
        if container.get(parent).is_anchor() {
          continue;
        }
        let parent_pos = container.get(parent).x();
        for &child in &children {
          if container.get(child).is_anchor() {
            continue;
          }
          let pos = point_on_sphere(rng, parent_pos, 1.0);
          container.get(child).set_x(pos);
        }
      }
      return;
    }

    let placed_weighted: Vec<(FixedVec<D>, f64)> = (0..container.len())
      .filter(|&v| matches!(guiding.level_of[v], Some(l) if l < layer))
      .map(|v| {
        let p = container.get(v);
        (p.x(), p.mass())
      })
      .collect();
    let com = center_of_mass(&placed_weighted);

    for (parent, children) in by_parent {
      if container.get(parent).is_anchor() {
        continue;
      }
      let parent_pos = container.get(parent).x();
      let grandparent_pos = guiding.parent[parent].map(|gp| container.get(gp).x());
      let direction = expansion_direction(parent_pos, com, grandparent_pos, rng);
      let all_leaves = children.iter().all(|&c| guiding.tree.degree(c) == 1);
      let placed = place_children(parent_pos, direction, &children, all_leaves, &self.config, rng);
      for (idx, pos) in placed {
        if !container.get(idx).is_anchor() {
          container.get(idx).set_x(pos);
        }
      }
    }
  }

  /// Run the four-stage pipeline against `active_graph` until convergence
  /// or the layer's iteration cap, returning how many iterations ran.
  /// `cutoff_precision` is threaded through explicitly rather than read
  /// from `self.config` so the final settle pass can tighten it.
  /// `level_filter` restricts Stage D's edge-length average to edges
  /// touching that level (§4.4 Stage D); `None` counts every active edge,
  /// used by the final settle and the initial-coords shortcut where there
  /// is no single "just activated" level.
  #[allow(clippy::too_many_arguments)]
  fn simulate_layer(
    &self,
    layer: usize,
    active_graph: &Graph,
    eligible: &[bool],
    cutoff_precision: f64,
    container: &mut ParticleContainer<D>,
    snapshotter: &mut SnapshotEmitter,
    on_snapshot: &mut impl FnMut(Snapshot<D>),
    level_filter: Option<usize>,
    level_of: &[Option<usize>],
  ) -> u32 {
    let cap = self.config.effective_iteration_cap();
    let active_indices: Vec<usize> = (0..container.len()).filter(|&v| eligible[v]).collect();
    if active_indices.is_empty() {
      return 0;
    }

    let positions: Vec<FixedVec<D>> = active_indices.iter().map(|&v| container.get(v).x()).collect();
    let (min_corner, extent) = bounding_box(&positions);
    let grid: Grid<D> = Grid::new(self.config.nbhd_radius, min_corner, extent);
    let scheduler = GridScheduler::build(&grid);
    let thread_count = scheduler.effective_thread_count(self.config.thread_count);
    debug!(
      requested = self.config.thread_count,
      usable = thread_count,
      "grid visit list built for this layer"
    );

    for &v in &active_indices {
      let voxel = grid.place(v, &container.get(v).x());
      container.get(v).set_container(Some(voxel));
    }

    let edges = active_graph.edges();
    let mut tracker = ConvergenceTracker::new();

    for iteration in 0..cap {
      // Stage A: repulsion, one barrier over the whole voxel visit
      // list, each worker walking its own round-robin slice.
      let repulse_body = |w: usize| {
        let mut local_rng = rand::rng();
        for voxel_id in scheduler.voxel_list_for(w, thread_count) {
          let here = grid.voxel(voxel_id).snapshot();
          for neighbor_id in grid.half_neighbors(voxel_id) {
            let there = if neighbor_id == voxel_id {
              here.clone()
            } else {
              grid.voxel(neighbor_id).snapshot()
            };
            for (hi, &i) in here.iter().enumerate() {
              let start = if neighbor_id == voxel_id { hi + 1 } else { 0 };
              for &j in &there[start..] {
                self.handler.repulse(container.get(i), container.get(j), &mut local_rng);
              }
            }
          }
        }
      };
      self.pool.run_worker_scoped(thread_count, &repulse_body);

      // Stage B: attraction along active edges.
      let attract_body = |range: std::ops::Range<usize>| {
        for idx in range {
          let (u, v, _) = edges[idx];
          self.handler.attract(container.get(u), container.get(v));
        }
      };
      self.pool.run_striped_scoped(edges.len(), &attract_body);

      // Stage C: integrate and re-bucket into the grid.
      let integrate_body = |range: std::ops::Range<usize>| {
        for idx in range {
          let v = active_indices[idx];
          let particle = container.get(v);
          self.handler.integrate(particle);
          let old_voxel = particle.container().expect("active particle was placed in the grid");
          let new_voxel = grid.shift(v, old_voxel, &particle.x());
          particle.set_container(Some(new_voxel));
        }
      };
      self.pool.run_striped_scoped(active_indices.len(), &integrate_body);

      // Stage D: accumulate edge-length stats over the edges touching
      // the just-activated level, one barrier.
      let accumulator = StatsAccumulator::new();
      let stats_body = |range: std::ops::Range<usize>| {
        let mut local = EdgeLengthStats::default();
        for idx in range {
          let (u, v, _) = edges[idx];
          let touches_level = match level_filter {
            Some(l) => level_of[u] == Some(l) || level_of[v] == Some(l),
            None => true,
          };
          if !touches_level {
            continue;
          }
          let length = container.get(u).x().distance(&container.get(v).x());
          local.record(length);
        }
        accumulator.merge_local(&local);
      };
      self.pool.run_striped_scoped(edges.len(), &stats_body);

      let dx = accumulator.take().average();
      if !self.config.silent {
        debug!(iteration, dx, "iteration stats");
      }
      snapshotter.maybe_emit(layer, iteration, container, |s| on_snapshot(s));

      if tracker.step(dx, iteration, cutoff_precision) {
        return iteration + 1;
      }
    }

    cap
  }
}

fn bounding_box<const D: usize>(positions: &[FixedVec<D>]) -> (FixedVec<D>, FixedVec<D>) {
  if positions.is_empty() {
    return (FixedVec::ZERO, FixedVec::splat(1.0));
  }
  let mut min = positions[0];
  let mut max = positions[0];
  for p in positions {
    for d in 0..D {
      min[d] = min[d].min(p[d]);
      max[d] = max[d].max(p[d]);
    }
  }
  let mut extent = max - min;
  for d in 0..D {
    if extent[d] <= 0.0 {
      extent[d] = 1.0;
    }
  }
  (min, extent)
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;
