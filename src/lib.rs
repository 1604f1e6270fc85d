//! Multi-level force-directed layout engine for large weighted graphs.
//!
//! A caller builds a [`graph::Graph`], configures a [`config::SimConfig`],
//! and drives a [`driver::SimulationDriver`] to produce final positions. The
//! guiding tree ([`tree::GuidingTree`]) reveals the graph level by level from
//! a centroid root; each level is seeded near its parent ([`placement`]) and
//! relaxed by a four-stage, barrier-synchronous simulation pipeline over a
//! uniform voxel grid ([`grid`], [`scheduler`], [`threading`]).

pub mod config;
pub mod driver;
pub mod error;
pub mod graph;
pub mod grid;
pub mod init;
pub mod interaction;
pub mod math;
pub mod particle;
pub mod placement;
pub mod scheduler;
pub mod snapshot;
pub mod stats;
pub mod threading;
pub mod tree;
pub mod voxel;

pub use config::SimConfig;
pub use driver::{LayoutOutput, SimulationDriver};
pub use error::{LayoutError, LayoutResult};
pub use graph::Graph;
pub use math::FixedVec;
pub use snapshot::Snapshot;
