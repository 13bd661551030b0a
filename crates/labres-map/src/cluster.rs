//! Similarity clustering of raw test names.
//!
//! Union-find over all pairs whose similarity meets the threshold. The
//! output is always an exact partition of the distinct input names, and the
//! representative of each cluster is its first-seen member, so results are
//! stable across reruns of the same batch.

use labres_model::NameCluster;
use tracing::debug;

use crate::normalize::normalize;
use crate::score::similarity_normalized;

/// Group raw names into equivalence clusters.
///
/// `threshold` is the minimum similarity in [0, 1] for two names to share a
/// cluster. The boundary values need no special handling: 1.0 clusters only
/// exact normalized matches, 0.0 yields a single cluster of everything.
/// Duplicate input names join the cluster of their first occurrence.
pub fn cluster_names(names: &[String], threshold: f64) -> Vec<NameCluster> {
    // Distinct names, first-seen order.
    let mut distinct: Vec<&str> = Vec::with_capacity(names.len());
    for name in names {
        if !distinct.contains(&name.as_str()) {
            distinct.push(name);
        }
    }
    if distinct.is_empty() {
        return Vec::new();
    }

    let normalized: Vec<String> = distinct.iter().map(|name| normalize(name)).collect();

    let mut uf = UnionFind::new(distinct.len());
    for i in 0..distinct.len() {
        for j in (i + 1)..distinct.len() {
            let score = similarity_normalized(&normalized[i], &normalized[j]);
            if score >= threshold {
                uf.union(i, j);
            }
        }
    }

    // Emit clusters ordered by the first occurrence of their first member.
    let mut clusters: Vec<NameCluster> = Vec::new();
    let mut cluster_of_root: Vec<Option<usize>> = vec![None; distinct.len()];
    for (idx, name) in distinct.iter().enumerate() {
        let root = uf.find(idx);
        match cluster_of_root[root] {
            Some(pos) => clusters[pos].members.push((*name).to_string()),
            None => {
                cluster_of_root[root] = Some(clusters.len());
                clusters.push(NameCluster {
                    representative: (*name).to_string(),
                    members: vec![(*name).to_string()],
                });
            }
        }
    }

    debug!(
        names = distinct.len(),
        clusters = clusters.len(),
        threshold,
        "clustered raw names"
    );
    clusters
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            // Path halving keeps the trees flat.
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            // Attach the later-seen root under the earlier one so the
            // first-seen member stays the representative.
            let (keep, absorb) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            self.parent[absorb] = keep;
        }
    }
}
