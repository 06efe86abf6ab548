pub mod bfs;
pub mod decompose;
mod planarity;

pub use bfs::BreadthFirst;
pub use decompose::{BfsDecomposer, OrderedPartition};

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;

use crate::error::TopologyError;

/// Edge descriptors whose meaning depends on direction can be flipped.
///
/// Undirected edges are stored once, but callers often want to observe an
/// edge from a chosen endpoint's point of view; flipping the descriptor
/// keeps its payload consistent with that perspective.
pub trait Flippable {
    #[must_use]
    fn flip(&self) -> Self;
}

impl Flippable for () {
    fn flip(&self) {}
}

/// An undirected edge between two string-keyed vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<E> {
    from: String,
    to: String,
    descriptor: E,
}

impl<E> Edge<E> {
    /// Creates an edge with a descriptor.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, descriptor: E) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            descriptor,
        }
    }

    /// The vertex the edge is currently viewed from.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// The vertex the edge currently points at.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// The edge payload.
    #[must_use]
    pub fn descriptor(&self) -> &E {
        &self.descriptor
    }

    /// Whether `vertex` is one of the two endpoints.
    #[must_use]
    pub fn connects(&self, vertex: &str) -> bool {
        self.from == vertex || self.to == vertex
    }
}

impl<E: Flippable> Edge<E> {
    /// Swaps the endpoints and flips the descriptor with them.
    #[must_use]
    pub fn flip(&self) -> Edge<E> {
        Edge {
            from: self.to.clone(),
            to: self.from.clone(),
            descriptor: self.descriptor.flip(),
        }
    }
}

impl<E: Flippable + Clone> Edge<E> {
    /// Returns the edge viewed from `vertex`, flipping it if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotAnEndpoint`] if `vertex` is neither
    /// endpoint.
    pub fn with_perspective(&self, vertex: &str) -> Result<Edge<E>, TopologyError> {
        if self.from == vertex {
            Ok(self.clone())
        } else if self.to == vertex {
            Ok(self.flip())
        } else {
            Err(TopologyError::NotAnEndpoint {
                from: self.from.clone(),
                to: self.to.clone(),
                vertex: vertex.to_owned(),
            })
        }
    }
}

/// A generic undirected graph keyed by string identifiers.
///
/// Vertex payloads and adjacency live in ordered maps so every iteration,
/// and therefore every seeded generation run built on top, is
/// deterministic. A petgraph mirror is kept in lockstep for the delegated
/// algorithms (Dijkstra, connectivity); planarity is answered by the
/// in-crate inspector. `Clone` provides the deep copy the decomposer uses
/// for its destructive search.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    vertices: BTreeMap<String, V>,
    adjacency: BTreeMap<String, BTreeSet<String>>,
    edges: Vec<Edge<E>>,
    mirror: UnGraph<String, ()>,
    indices: BTreeMap<String, NodeIndex>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            edges: Vec::new(),
            mirror: UnGraph::default(),
            indices: BTreeMap::new(),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether `key` names a vertex.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vertices.contains_key(key)
    }

    /// The vertex payload, if present.
    #[must_use]
    pub fn vertex(&self, key: &str) -> Option<&V> {
        self.vertices.get(key)
    }

    /// Mutable access to a vertex payload.
    #[must_use]
    pub fn vertex_mut(&mut self, key: &str) -> Option<&mut V> {
        self.vertices.get_mut(key)
    }

    /// All vertex keys, in sorted order.
    pub fn vertex_keys(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// All edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }

    /// The neighbors of `vertex`, in sorted order (empty if unknown).
    pub fn neighbors<'a>(&'a self, vertex: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Number of neighbors of `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: &str) -> usize {
        self.adjacency.get(vertex).map_or(0, BTreeSet::len)
    }

    /// The edges incident to `vertex`, in insertion order.
    pub fn incident_edges<'a>(&'a self, vertex: &str) -> impl Iterator<Item = &'a Edge<E>> + 'a {
        let owned = vertex.to_owned();
        self.edges.iter().filter(move |e| e.connects(&owned))
    }

    /// The stored edge between `a` and `b` in either direction.
    #[must_use]
    pub fn edge(&self, a: &str, b: &str) -> Option<&Edge<E>> {
        self.edges
            .iter()
            .find(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
    }

    /// Inserts a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateVertex`] if the key is taken.
    pub fn add_vertex(&mut self, key: impl Into<String>, value: V) -> Result<(), TopologyError> {
        let key = key.into();
        if self.vertices.contains_key(&key) {
            return Err(TopologyError::DuplicateVertex(key));
        }
        let index = self.mirror.add_node(key.clone());
        self.indices.insert(key.clone(), index);
        self.adjacency.insert(key.clone(), BTreeSet::new());
        self.vertices.insert(key, value);
        Ok(())
    }

    /// Inserts an undirected edge with a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexNotFound`] for unknown endpoints,
    /// [`TopologyError::SelfLoop`] for a loop, and
    /// [`TopologyError::DuplicateEdge`] if the edge exists in either
    /// direction.
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        descriptor: E,
    ) -> Result<(), TopologyError> {
        let from = from.into();
        let to = to.into();
        if !self.vertices.contains_key(&from) {
            return Err(TopologyError::VertexNotFound(from));
        }
        if !self.vertices.contains_key(&to) {
            return Err(TopologyError::VertexNotFound(to));
        }
        if from == to {
            return Err(TopologyError::SelfLoop(from));
        }
        if self.edge(&from, &to).is_some() {
            return Err(TopologyError::DuplicateEdge(from, to));
        }
        if let (Some(&a), Some(&b)) = (self.indices.get(&from), self.indices.get(&to)) {
            self.mirror.add_edge(a, b, ());
        }
        if let Some(set) = self.adjacency.get_mut(&from) {
            set.insert(to.clone());
        }
        if let Some(set) = self.adjacency.get_mut(&to) {
            set.insert(from.clone());
        }
        self.edges.push(Edge {
            from,
            to,
            descriptor,
        });
        Ok(())
    }

    /// Removes a vertex and every incident edge. Unknown keys are a no-op.
    pub fn remove_vertex(&mut self, key: &str) -> Option<V> {
        let value = self.vertices.remove(key)?;
        self.edges.retain(|e| !e.connects(key));
        self.adjacency.remove(key);
        for set in self.adjacency.values_mut() {
            set.remove(key);
        }
        if let Some(index) = self.indices.remove(key) {
            self.mirror.remove_node(index);
            // petgraph swap-removes: the node that held the last index now
            // sits at `index`, so its key must be remapped.
            if let Some(moved) = self.mirror.node_weight(index) {
                self.indices.insert(moved.clone(), index);
            }
        }
        Some(value)
    }

    /// Removes the edge between `a` and `b` in either direction.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Option<E> {
        let position = self
            .edges
            .iter()
            .position(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))?;
        let edge = self.edges.remove(position);
        if let Some(set) = self.adjacency.get_mut(a) {
            set.remove(b);
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.remove(a);
        }
        if let (Some(&ia), Some(&ib)) = (self.indices.get(a), self.indices.get(b)) {
            if let Some(edge_index) = self.mirror.find_edge(ia, ib) {
                self.mirror.remove_edge(edge_index);
            }
        }
        Some(edge.descriptor)
    }

    /// Shortest distance between two vertices in hops, if reachable.
    #[must_use]
    pub fn shortest_distance(&self, from: &str, to: &str) -> Option<usize> {
        let &a = self.indices.get(from)?;
        let &b = self.indices.get(to)?;
        let distances = petgraph::algo::dijkstra(&self.mirror, a, Some(b), |_| 1_usize);
        distances.get(&b).copied()
    }

    /// Whether every vertex is reachable from every other.
    /// The empty and the single-vertex graph count as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.len() <= 1 || petgraph::algo::connected_components(&self.mirror) == 1
    }

    /// Whether the graph can be drawn in the plane without edge crossings.
    #[must_use]
    pub fn is_planar(&self) -> bool {
        let index_of: BTreeMap<&str, usize> = self
            .vertex_keys()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        let edges: Vec<(usize, usize)> = self
            .edges
            .iter()
            .filter_map(|e| {
                let a = index_of.get(e.from())?;
                let b = index_of.get(e.to())?;
                Some((*a, *b))
            })
            .collect();
        planarity::is_planar(self.len(), &edges)
    }

    /// Breadth-first traversal starting at `start`.
    #[must_use]
    pub fn breadth_first<'a>(&'a self, start: &str) -> BreadthFirst<'a, V, E> {
        BreadthFirst::new(self, start)
    }
}
