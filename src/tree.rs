//! Guiding tree construction: a spanning tree plus a root and per-vertex
//! levels used to seed the multi-level layout.

use crate::graph::Graph;

/// Synthetic edge ranking used in place of the graph's own weights: the
/// negative sum of the two endpoints' degrees. Kruskal's algorithm then
/// favors low-degree endpoints first, pulling hub vertices toward the
/// leaves of the spanning tree rather than letting them dominate it.
pub fn synthetic_weight(graph: &Graph, u: usize, v: usize) -> f64 {
  -((graph.degree(u) + graph.degree(v)) as f64)
}

/// Index of the tree's centroid (1-median): the vertex minimizing the size
/// of the largest component left behind if it were removed. Two linear
/// passes over `component` — one BFS for subtree sizes via reverse visit
/// order, one scan evaluating each vertex's largest remaining component —
/// keep this O(n) rather than the O(n^2) all-pairs alternative.
fn find_centroid(tree: &Graph, component: &[usize]) -> usize {
  if component.len() <= 1 {
    return component[0];
  }
  let root = component[0];
  let bfs = tree.bfs(root);
  let mut size = vec![0usize; tree.vertex_count()];
  for &v in component {
    size[v] = 1;
  }
  for &v in bfs.order.iter().rev() {
    if let Some(p) = bfs.parent[v] {
      size[p] += size[v];
    }
  }

  let n = component.len();
  let mut best = root;
  let mut best_max = usize::MAX;
  for &v in component {
    let mut max_piece = n - size[v];
    for &(child, _) in tree.neighbors(v) {
      if bfs.parent[child] == Some(v) {
        max_piece = max_piece.max(size[child]);
      }
    }
    if max_piece < best_max {
      best_max = max_piece;
      best = v;
    }
  }
  best
}

/// The spanning tree used to guide multi-level placement: a minimum
/// spanning forest of the input graph, rooted at each component's centroid,
/// with every vertex assigned a BFS level from that root.
pub struct GuidingTree {
  pub tree: Graph,
  pub root: usize,
  pub parent: Vec<Option<usize>>,
  pub level_of: Vec<Option<usize>>,
  /// `levels[L]` lists every vertex at BFS depth `L` from its component's
  /// centroid, across all components.
  pub levels: Vec<Vec<usize>>,
}

impl GuidingTree {
  pub fn build(graph: &Graph, use_original_weights: bool) -> Self {
    let n = graph.vertex_count();
    let mst_edges = if use_original_weights && graph.has_weights() {
      graph.minimum_spanning_forest(|_, _, w| w)
    } else {
      graph.minimum_spanning_forest(|u, v, _| synthetic_weight(graph, u, v))
    };

    let mut tree = Graph::new(n);
    for (u, v, w) in mst_edges {
      tree.add_edge(u, v, w);
    }

    let mut components = tree.components();
    components.sort_by_key(|c| std::cmp::Reverse(c.len()));

    let mut parent = vec![None; n];
    let mut level_of = vec![None; n];
    let mut levels: Vec<Vec<usize>> = Vec::new();
    let mut root = 0;
    let mut root_assigned = false;

    for component in &components {
      let centroid = find_centroid(&tree, component);
      if !root_assigned {
        root = centroid;
        root_assigned = true;
      }
      let bfs = tree.bfs(centroid);
      for &v in component {
        let depth = bfs.depth[v].expect("bfs from centroid reaches its own component");
        parent[v] = bfs.parent[v];
        level_of[v] = Some(depth);
        if levels.len() <= depth {
          levels.resize_with(depth + 1, Vec::new);
        }
        levels[depth].push(v);
      }
    }

    Self {
      tree,
      root,
      parent,
      level_of,
      levels,
    }
  }

  pub fn level_count(&self) -> usize {
    self.levels.len()
  }

  /// The "layout graph" for level `layer`: every tree edge whose both
  /// endpoints have already been activated (level <= `layer`). Activation
  /// is monotonic — each successive layer's layout graph is a superset of
  /// the previous one's.
  pub fn layout_graph_at(&self, layer: usize) -> Graph {
    let n = self.tree.vertex_count();
    let mut g = Graph::new(n);
    for u in 0..n {
      let Some(lu) = self.level_of[u] else { continue };
      if lu > layer {
        continue;
      }
      for &(v, w) in self.tree.neighbors(u) {
        if u >= v {
          continue;
        }
        if matches!(self.level_of[v], Some(lv) if lv <= layer) {
          g.add_edge(u, v, w);
        }
      }
    }
    g
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
