//! The input graph: adjacency, traversal, and spanning-tree construction.

use rustc_hash::FxHashSet;

/// An undirected, optionally weighted graph over `0..vertex_count()`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
  adjacency: Vec<Vec<(usize, f64)>>,
  has_weights: bool,
}

impl Graph {
  pub fn new(vertex_count: usize) -> Self {
    Self {
      adjacency: vec![Vec::new(); vertex_count],
      has_weights: false,
    }
  }

  pub fn vertex_count(&self) -> usize {
    self.adjacency.len()
  }

  pub fn has_weights(&self) -> bool {
    self.has_weights
  }

  /// Add an undirected edge. `weight` of `1.0` is treated as "unweighted"
  /// for the purpose of `has_weights` only if every edge added uses it;
  /// callers that genuinely have edge weights should pass them even when
  /// one happens to equal `1.0`.
  pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) {
    self.adjacency[u].push((v, weight));
    self.adjacency[v].push((u, weight));
  }

  /// Mark this graph as carrying meaningful edge weights (as opposed to
  /// the uniform placeholder used when the input format has none).
  pub fn mark_weighted(&mut self) {
    self.has_weights = true;
  }

  pub fn degree(&self, v: usize) -> usize {
    self.adjacency[v].len()
  }

  pub fn neighbors(&self, v: usize) -> &[(usize, f64)] {
    &self.adjacency[v]
  }

  pub fn edge_count(&self) -> usize {
    self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
  }

  /// Every undirected edge, each listed once with `u < v`.
  pub fn edges(&self) -> Vec<(usize, usize, f64)> {
    let mut out = Vec::with_capacity(self.edge_count());
    for u in 0..self.vertex_count() {
      for &(v, w) in self.neighbors(u) {
        if u < v {
          out.push((u, v, w));
        }
      }
    }
    out
  }

  /// Breadth-first traversal from `start`: parent pointers (`None` for the
  /// root and for anything unreached) and visit order.
  pub fn bfs(&self, start: usize) -> BfsResult {
    let n = self.vertex_count();
    let mut parent = vec![None; n];
    let mut depth = vec![None; n];
    let mut order = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut queue = std::collections::VecDeque::new();

    visited[start] = true;
    depth[start] = Some(0);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
      order.push(u);
      for &(v, _) in self.neighbors(u) {
        if !visited[v] {
          visited[v] = true;
          parent[v] = Some(u);
          depth[v] = Some(depth[u].unwrap() + 1);
          queue.push_back(v);
        }
      }
    }

    BfsResult {
      parent,
      depth,
      order,
    }
  }

  /// Connected components, as vertex lists.
  pub fn components(&self) -> Vec<Vec<usize>> {
    let n = self.vertex_count();
    let mut seen = vec![false; n];
    let mut out = Vec::new();
    for start in 0..n {
      if seen[start] {
        continue;
      }
      let reached = self.bfs(start);
      for &v in &reached.order {
        seen[v] = true;
      }
      out.push(reached.order);
    }
    out
  }

  /// Minimum spanning forest (one tree per connected component) via
  /// Kruskal's algorithm, ranking edges by `weight_of(u, v, original_weight)`
  /// rather than the stored weight directly, so callers can substitute a
  /// synthetic ranking without rebuilding the graph.
  pub fn minimum_spanning_forest(
    &self,
    mut weight_of: impl FnMut(usize, usize, f64) -> f64,
  ) -> Vec<(usize, usize, f64)> {
    let n = self.vertex_count();
    let mut candidates: Vec<(f64, usize, usize, f64)> = Vec::with_capacity(self.edge_count());
    let mut seen_pairs: FxHashSet<(usize, usize)> = FxHashSet::default();
    for u in 0..n {
      for &(v, w) in self.neighbors(u) {
        let key = (u.min(v), u.max(v));
        if seen_pairs.insert(key) {
          candidates.push((weight_of(u, v, w), u, v, w));
        }
      }
    }
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut uf = UnionFind::new(n);
    let mut mst = Vec::new();
    for (_, u, v, original_weight) in candidates {
      if uf.union(u, v) {
        mst.push((u, v, original_weight));
      }
    }
    mst
  }
}

pub struct BfsResult {
  pub parent: Vec<Option<usize>>,
  pub depth: Vec<Option<usize>>,
  pub order: Vec<usize>,
}

struct UnionFind {
  parent: Vec<usize>,
  rank: Vec<u8>,
}

impl UnionFind {
  fn new(n: usize) -> Self {
    Self {
      parent: (0..n).collect(),
      rank: vec![0; n],
    }
  }

  fn find(&mut self, x: usize) -> usize {
    if self.parent[x] != x {
      self.parent[x] = self.find(self.parent[x]);
    }
    self.parent[x]
  }

  /// Union the sets containing `a` and `b`; returns `true` if they were
  /// previously distinct (i.e. the edge belongs in the spanning tree).
  fn union(&mut self, a: usize, b: usize) -> bool {
    let ra = self.find(a);
    let rb = self.find(b);
    if ra == rb {
      return false;
    }
    match self.rank[ra].cmp(&self.rank[rb]) {
      std::cmp::Ordering::Less => self.parent[ra] = rb,
      std::cmp::Ordering::Greater => self.parent[rb] = ra,
      std::cmp::Ordering::Equal => {
        self.parent[rb] = ra;
        self.rank[ra] += 1;
      }
    }
    true
  }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;
