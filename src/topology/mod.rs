//! Target adjacency structures for dungeon generation.
//!
//! A [`Topology`] describes the room-adjacency graph a dungeon *should*
//! realize, before any geometry is chosen. Vertices may constrain which
//! blueprint kinds can fill them; edges become door connections.

use crate::blueprint::RoomKind;
use crate::error::TopologyError;
use crate::graph::Graph;

/// Optional constraint on the blueprint kinds allowed to fill a vertex.
/// `None` admits every kind.
pub type KindConstraint = Option<Vec<RoomKind>>;

/// A validated, immutable target adjacency graph.
///
/// Construction enforces everything generation relies on: at least two
/// vertices, connectivity, and planarity (a non-planar layout cannot be
/// embedded as non-overlapping 2D rooms without crossings). Both verdicts
/// are established once here; the topology never changes afterwards.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: Graph<KindConstraint, ()>,
}

impl Topology {
    /// Builds a topology from vertex keys (with optional kind constraints)
    /// and undirected edges.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::TooFewVertices`] for fewer than two
    /// vertices, [`TopologyError::NotConnected`] /
    /// [`TopologyError::NotPlanar`] when the graph fails those checks, and
    /// the corresponding variant for duplicate keys, self-loops, duplicate
    /// edges or edges naming unknown vertices.
    pub fn new(
        vertices: Vec<(String, KindConstraint)>,
        edges: Vec<(String, String)>,
    ) -> Result<Self, TopologyError> {
        if vertices.len() < 2 {
            return Err(TopologyError::TooFewVertices(vertices.len()));
        }
        let mut graph = Graph::new();
        for (key, constraint) in vertices {
            graph.add_vertex(key, constraint)?;
        }
        for (from, to) in edges {
            graph.add_edge(from, to, ())?;
        }
        if !graph.is_connected() {
            return Err(TopologyError::NotConnected);
        }
        if !graph.is_planar() {
            return Err(TopologyError::NotPlanar);
        }
        Ok(Self { graph })
    }

    /// Convenience constructor for unconstrained vertices.
    ///
    /// # Errors
    ///
    /// See [`Topology::new`].
    pub fn unconstrained(
        keys: &[&str],
        edges: &[(&str, &str)],
    ) -> Result<Self, TopologyError> {
        Self::new(
            keys.iter().map(|k| ((*k).to_owned(), None)).collect(),
            edges
                .iter()
                .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
                .collect(),
        )
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// A topology is never empty; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Whether `key` names a vertex.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.graph.contains(key)
    }

    /// All vertex keys, in sorted order.
    pub fn vertex_keys(&self) -> impl Iterator<Item = &str> {
        self.graph.vertex_keys()
    }

    /// The kind constraint of `key`, if the vertex exists and carries one.
    #[must_use]
    pub fn constraint(&self, key: &str) -> Option<&[RoomKind]> {
        self.graph.vertex(key)?.as_deref()
    }

    /// The neighbors of `vertex`, in sorted order.
    pub fn neighbors<'a>(&'a self, vertex: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.graph.neighbors(vertex)
    }

    /// Number of neighbors of `vertex`, which is the door count any
    /// blueprint filling it must offer.
    #[must_use]
    pub fn degree(&self, vertex: &str) -> usize {
        self.graph.degree(vertex)
    }

    /// Shortest distance between two vertices in hops. `None` only for
    /// unknown keys; the topology itself is connected by invariant.
    #[must_use]
    pub fn shortest_distance(&self, from: &str, to: &str) -> Option<usize> {
        self.graph.shortest_distance(from, to)
    }

    /// The underlying graph view, for the decomposer.
    #[must_use]
    pub fn graph(&self) -> &Graph<KindConstraint, ()> {
        &self.graph
    }
}
