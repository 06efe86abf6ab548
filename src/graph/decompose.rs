//! Splits a connected graph into balanced, connected partitions.
//!
//! Not an optimal partitioning (exact balanced graph partitioning is
//! NP-hard); a greedy approximation is enough to drive partition-by-
//! partition room placement.

use tracing::debug;

use super::Graph;

/// An ordered, connected subset of a graph's vertex keys.
///
/// The order encodes a viable placement sequence: it comes from a
/// breadth-first traversal, so every vertex after the first has an earlier
/// neighbor within the partition. It does not correspond to the real
/// adjacency order between the vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedPartition {
    vertices: Vec<String>,
}

impl OrderedPartition {
    /// Wraps an ordered vertex-key list.
    #[must_use]
    pub fn new(vertices: Vec<String>) -> Self {
        Self { vertices }
    }

    /// The vertex keys, in placement order.
    #[must_use]
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Number of member vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the partition has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether `key` is a member.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vertices.iter().any(|v| v == key)
    }

    /// Two partitions are next to each other when at least one member of
    /// `self` shares an edge in `graph` with a member of `other`.
    #[must_use]
    pub fn is_next_to<V, E>(&self, graph: &Graph<V, E>, other: &OrderedPartition) -> bool {
        self.vertices
            .iter()
            .any(|v| graph.neighbors(v).any(|n| other.contains(n)))
    }

    fn absorb(&mut self, other: OrderedPartition) {
        self.vertices.extend(other.vertices);
    }
}

/// Decomposes a graph into partitions of at least `min_partition_size`
/// vertices by repeated bounded breadth-first searches.
#[derive(Debug, Clone, Copy)]
pub struct BfsDecomposer {
    min_partition_size: usize,
}

impl Default for BfsDecomposer {
    fn default() -> Self {
        Self {
            min_partition_size: 4,
        }
    }
}

impl BfsDecomposer {
    /// Creates a decomposer with the given minimum partition size.
    #[must_use]
    pub fn new(min_partition_size: usize) -> Self {
        Self {
            min_partition_size: min_partition_size.max(1),
        }
    }

    /// Splits `graph` into partitions.
    ///
    /// When the whole graph is no larger than the minimum size, one
    /// partition containing everything is returned. Otherwise partitions
    /// are grown by breadth-first search from the remaining vertex with
    /// the fewest remaining neighbors (ties broken by key order) on a
    /// working copy, then undersized partitions are merged into their
    /// smallest adjacent partition until every partition meets the minimum
    /// or no merge is possible. For a connected input every vertex ends up
    /// in exactly one partition.
    #[must_use]
    pub fn decompose<V: Clone, E: Clone>(&self, graph: &Graph<V, E>) -> Vec<OrderedPartition> {
        if graph.len() <= self.min_partition_size {
            let all: Vec<String> = graph.vertex_keys().map(str::to_owned).collect();
            return vec![OrderedPartition::new(all)];
        }

        let mut working = graph.clone();
        let mut partitions = Vec::new();
        while let Some(start) = Self::select_start(&working) {
            let found: Vec<String> = working
                .breadth_first(&start)
                .take(self.min_partition_size)
                .collect();
            for key in &found {
                working.remove_vertex(key);
            }
            partitions.push(OrderedPartition::new(found));
        }
        debug!(
            partitions = partitions.len(),
            min_size = self.min_partition_size,
            "collected raw partitions"
        );

        self.balance(graph, partitions)
    }

    /// The remaining vertex with the fewest remaining neighbors. Starting
    /// at low-degree vertices keeps the search from stranding vertices in
    /// the graph's interior.
    fn select_start<V, E>(graph: &Graph<V, E>) -> Option<String> {
        graph
            .vertex_keys()
            .min_by_key(|&key| (graph.degree(key), key.to_owned()))
            .map(str::to_owned)
    }

    /// Merges undersized partitions into their smallest adjacent partition.
    /// Terminates because the source graph is connected: as long as more
    /// than one partition exists, every partition has an adjacent one.
    fn balance<V, E>(
        &self,
        graph: &Graph<V, E>,
        mut partitions: Vec<OrderedPartition>,
    ) -> Vec<OrderedPartition> {
        loop {
            let Some(small_index) = partitions
                .iter()
                .position(|p| p.len() < self.min_partition_size)
            else {
                return partitions;
            };
            let small = &partitions[small_index];

            let Some(target_index) = partitions
                .iter()
                .enumerate()
                .filter(|&(i, p)| i != small_index && p.is_next_to(graph, small))
                .min_by_key(|&(_, p)| p.len())
                .map(|(i, _)| i)
            else {
                return partitions;
            };

            let absorbed = partitions.remove(small_index);
            let target_index = if target_index > small_index {
                target_index - 1
            } else {
                target_index
            };
            debug!(
                absorbed = absorbed.len(),
                target = partitions[target_index].len(),
                "merging undersized partition"
            );
            partitions[target_index].absorb(absorbed);
        }
    }
}
