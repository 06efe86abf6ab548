//! Breadth-first traversal over a [`Graph`].
//!
//! Starts at one vertex and explores outward one neighborhood layer at a
//! time. Vertices are marked visited when enqueued, not when yielded, so
//! cycles never produce a vertex twice. Visits every vertex reachable from
//! the start once, in O(V + E).

use std::collections::BTreeSet;
use std::collections::VecDeque;

use super::Graph;

/// Iterator yielding vertex keys in breadth-first order.
pub struct BreadthFirst<'a, V, E> {
    graph: &'a Graph<V, E>,
    queue: VecDeque<String>,
    visited: BTreeSet<String>,
}

impl<'a, V, E> BreadthFirst<'a, V, E> {
    /// Creates a traversal rooted at `start`. An unknown start yields
    /// nothing.
    #[must_use]
    pub fn new(graph: &'a Graph<V, E>, start: &str) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = BTreeSet::new();
        if graph.contains(start) {
            queue.push_back(start.to_owned());
            visited.insert(start.to_owned());
        }
        Self {
            graph,
            queue,
            visited,
        }
    }
}

impl<V, E> Iterator for BreadthFirst<'_, V, E> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.queue.pop_front()?;
        for neighbor in self.graph.neighbors(&next) {
            if self.visited.insert(neighbor.to_owned()) {
                self.queue.push_back(neighbor.to_owned());
            }
        }
        Some(next)
    }
}
