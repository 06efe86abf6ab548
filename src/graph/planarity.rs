//! Planarity test for undirected simple graphs.
//!
//! A graph is planar iff every biconnected component is, so the input is
//! split with the DFS low-point algorithm and each component is checked by
//! Demoucron-Malgrange-Pertuiset face embedding: start from any cycle,
//! then repeatedly pick a fragment (a chord, or a component of the
//! not-yet-embedded rest together with its attachment vertices), draw a
//! path of it into a face whose boundary contains all its attachments and
//! split that face in two. A fragment with no such face proves the graph
//! non-planar; running out of fragments proves it planar. Fragments with
//! exactly one admissible face are embedded first; skipping that rule
//! breaks the algorithm.
//!
//! O(V * E), which is far below any cost this crate cares about for
//! dungeon-sized topologies. The Euler bound `E <= 3V - 6` rejects dense
//! graphs before any embedding work.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;

/// Whether the graph given as `vertex_count` and an edge list is planar.
/// Self-loops and duplicate edges are ignored.
pub(crate) fn is_planar(vertex_count: usize, edges: &[(usize, usize)]) -> bool {
    let mut edge_set: BTreeSet<(usize, usize)> = BTreeSet::new();
    for &(a, b) in edges {
        if a != b {
            edge_set.insert(ordered(a, b));
        }
    }
    if vertex_count <= 4 {
        return true;
    }
    if edge_set.len() > 3 * vertex_count - 6 {
        return false;
    }
    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); vertex_count];
    for &(a, b) in &edge_set {
        adjacency[a].insert(b);
        adjacency[b].insert(a);
    }
    biconnected_components(&adjacency)
        .iter()
        .all(|component| component_is_planar(component))
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

struct BicompState<'a> {
    adjacency: &'a [BTreeSet<usize>],
    discovery: Vec<Option<usize>>,
    low: Vec<usize>,
    timer: usize,
    stack: Vec<(usize, usize)>,
    components: Vec<Vec<(usize, usize)>>,
}

/// Splits the graph into biconnected components, each as an edge list.
fn biconnected_components(adjacency: &[BTreeSet<usize>]) -> Vec<Vec<(usize, usize)>> {
    let n = adjacency.len();
    let mut state = BicompState {
        adjacency,
        discovery: vec![None; n],
        low: vec![0; n],
        timer: 0,
        stack: Vec::new(),
        components: Vec::new(),
    };
    for start in 0..n {
        if state.discovery[start].is_none() && !adjacency[start].is_empty() {
            bicomp_dfs(&mut state, start, None);
        }
    }
    state.components
}

fn bicomp_dfs(state: &mut BicompState<'_>, u: usize, parent: Option<usize>) {
    let disc_u = state.timer;
    state.discovery[u] = Some(disc_u);
    state.low[u] = disc_u;
    state.timer += 1;

    let neighbors: Vec<usize> = state.adjacency[u].iter().copied().collect();
    for v in neighbors {
        if Some(v) == parent {
            continue;
        }
        match state.discovery[v] {
            None => {
                state.stack.push((u, v));
                bicomp_dfs(state, v, Some(u));
                state.low[u] = state.low[u].min(state.low[v]);
                if state.low[v] >= disc_u {
                    // u separates the subtree below v: pop its edges
                    let mut component = Vec::new();
                    while let Some(edge) = state.stack.pop() {
                        component.push(edge);
                        if edge == (u, v) {
                            break;
                        }
                    }
                    state.components.push(component);
                }
            }
            Some(disc_v) if disc_v < disc_u => {
                state.stack.push((u, v));
                state.low[u] = state.low[u].min(disc_v);
            }
            Some(_) => {}
        }
    }
}

/// A fragment relative to the embedded subgraph: either a single chord or
/// one component of the remaining graph plus its edges into the embedding.
struct Fragment {
    attachments: BTreeSet<usize>,
    edges: BTreeSet<(usize, usize)>,
}

fn component_is_planar(component: &[(usize, usize)]) -> bool {
    let mut vertices: BTreeSet<usize> = BTreeSet::new();
    for &(a, b) in component {
        vertices.insert(a);
        vertices.insert(b);
    }
    if vertices.len() < 5 {
        return true;
    }
    if component.len() > 3 * vertices.len() - 6 {
        return false;
    }

    let mut adjacency: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for &(a, b) in component {
        adjacency.entry(a).or_default().insert(b);
        adjacency.entry(b).or_default().insert(a);
    }

    let Some(cycle) = find_cycle(&adjacency) else {
        return true;
    };

    let mut embedded_vertices: BTreeSet<usize> = cycle.iter().copied().collect();
    let mut embedded_edges: BTreeSet<(usize, usize)> = BTreeSet::new();
    for i in 0..cycle.len() {
        embedded_edges.insert(ordered(cycle[i], cycle[(i + 1) % cycle.len()]));
    }
    let mut reversed = cycle.clone();
    reversed.reverse();
    let mut faces: Vec<Vec<usize>> = vec![cycle, reversed];

    loop {
        let fragments = collect_fragments(&adjacency, &embedded_vertices, &embedded_edges);
        if fragments.is_empty() {
            return true;
        }

        let mut forced: Option<(usize, usize)> = None;
        let mut fallback: Option<(usize, usize)> = None;
        for (fragment_index, fragment) in fragments.iter().enumerate() {
            let admissible: Vec<usize> = faces
                .iter()
                .enumerate()
                .filter(|(_, face)| {
                    fragment
                        .attachments
                        .iter()
                        .all(|a| face.contains(a))
                })
                .map(|(face_index, _)| face_index)
                .collect();
            match admissible.as_slice() {
                [] => return false,
                [only] => {
                    if forced.is_none() {
                        forced = Some((fragment_index, *only));
                    }
                }
                [first, ..] => {
                    if fallback.is_none() {
                        fallback = Some((fragment_index, *first));
                    }
                }
            }
        }
        let Some((fragment_index, face_index)) = forced.or(fallback) else {
            return true;
        };

        let Some(path) = fragment_path(&fragments[fragment_index], &embedded_vertices) else {
            // a fragment of a biconnected component always has two
            // attachments joined by a path; reject if that breaks down
            return false;
        };

        for window in path.windows(2) {
            embedded_edges.insert(ordered(window[0], window[1]));
        }
        for &v in &path {
            embedded_vertices.insert(v);
        }

        let face = faces.swap_remove(face_index);
        let (first_face, second_face) = split_face(&face, &path);
        faces.push(first_face);
        faces.push(second_face);
    }
}

/// Finds a simple cycle via DFS back edges, if one exists.
fn find_cycle(adjacency: &BTreeMap<usize, BTreeSet<usize>>) -> Option<Vec<usize>> {
    let &start = adjacency.keys().next()?;
    let mut visited = BTreeSet::new();
    let mut path = Vec::new();
    let mut cycle = None;
    cycle_dfs(adjacency, start, None, &mut visited, &mut path, &mut cycle);
    cycle
}

fn cycle_dfs(
    adjacency: &BTreeMap<usize, BTreeSet<usize>>,
    u: usize,
    parent: Option<usize>,
    visited: &mut BTreeSet<usize>,
    path: &mut Vec<usize>,
    cycle: &mut Option<Vec<usize>>,
) {
    if cycle.is_some() {
        return;
    }
    visited.insert(u);
    path.push(u);
    for &v in adjacency.get(&u).into_iter().flatten() {
        if cycle.is_some() {
            break;
        }
        if Some(v) == parent {
            continue;
        }
        if visited.contains(&v) {
            // undirected DFS only produces back edges, so v is on the path
            if let Some(position) = path.iter().position(|&w| w == v) {
                *cycle = Some(path[position..].to_vec());
            }
        } else {
            cycle_dfs(adjacency, v, Some(u), visited, path, cycle);
        }
    }
    path.pop();
}

fn collect_fragments(
    adjacency: &BTreeMap<usize, BTreeSet<usize>>,
    embedded_vertices: &BTreeSet<usize>,
    embedded_edges: &BTreeSet<(usize, usize)>,
) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    // chords: unembedded edges between two embedded vertices
    for (&u, neighbors) in adjacency {
        if !embedded_vertices.contains(&u) {
            continue;
        }
        for &v in neighbors {
            if u < v && embedded_vertices.contains(&v) && !embedded_edges.contains(&(u, v)) {
                fragments.push(Fragment {
                    attachments: [u, v].into_iter().collect(),
                    edges: [(u, v)].into_iter().collect(),
                });
            }
        }
    }

    // components of the graph minus the embedded subgraph
    let mut seen: BTreeSet<usize> = BTreeSet::new();
    for &start in adjacency.keys() {
        if embedded_vertices.contains(&start) || seen.contains(&start) {
            continue;
        }
        let mut component = BTreeSet::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(u) = queue.pop_front() {
            component.insert(u);
            for &v in adjacency.get(&u).into_iter().flatten() {
                if !embedded_vertices.contains(&v) && seen.insert(v) {
                    queue.push_back(v);
                }
            }
        }
        let mut edges = BTreeSet::new();
        let mut attachments = BTreeSet::new();
        for &u in &component {
            for &v in adjacency.get(&u).into_iter().flatten() {
                edges.insert(ordered(u, v));
                if embedded_vertices.contains(&v) {
                    attachments.insert(v);
                }
            }
        }
        fragments.push(Fragment { attachments, edges });
    }

    fragments
}

/// A path through the fragment between two distinct attachment vertices,
/// with every interior vertex outside the embedding.
fn fragment_path(fragment: &Fragment, embedded_vertices: &BTreeSet<usize>) -> Option<Vec<usize>> {
    let mut attachments = fragment.attachments.iter();
    let &first = attachments.next()?;
    if fragment.edges.len() == 1 {
        // a chord is its own path
        let &second = attachments.next()?;
        return Some(vec![first, second]);
    }

    let mut local: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for &(a, b) in &fragment.edges {
        local.entry(a).or_default().insert(b);
        local.entry(b).or_default().insert(a);
    }

    let mut parent: BTreeMap<usize, usize> = BTreeMap::new();
    let mut visited = BTreeSet::from([first]);
    let mut queue = VecDeque::from([first]);
    while let Some(u) = queue.pop_front() {
        for &v in local.get(&u).into_iter().flatten() {
            if !visited.insert(v) {
                continue;
            }
            parent.insert(v, u);
            if embedded_vertices.contains(&v) {
                let mut path = vec![v];
                let mut current = v;
                while let Some(&p) = parent.get(&current) {
                    path.push(p);
                    current = p;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(v);
        }
    }
    None
}

/// Splits a face along an embedded path whose endpoints lie on the face.
fn split_face(face: &[usize], path: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let a = path.first().copied().unwrap_or_default();
    let b = path.last().copied().unwrap_or_default();
    let i = face.iter().position(|&v| v == a).unwrap_or_default();
    let j = face.iter().position(|&v| v == b).unwrap_or_default();
    let n = face.len();

    let mut first_face = Vec::new();
    let mut k = i;
    loop {
        first_face.push(face[k]);
        if k == j {
            break;
        }
        k = (k + 1) % n;
    }
    let mut second_face = Vec::new();
    let mut k = j;
    loop {
        second_face.push(face[k]);
        if k == i {
            break;
        }
        k = (k + 1) % n;
    }

    let interior = &path[1..path.len().saturating_sub(1)];
    first_face.extend(interior.iter().rev().copied());
    second_face.extend(interior.iter().copied());
    (first_face, second_face)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete(n: usize) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                edges.push((a, b));
            }
        }
        edges
    }

    #[test]
    fn small_graphs_are_planar() {
        assert!(is_planar(0, &[]));
        assert!(is_planar(1, &[]));
        assert!(is_planar(4, &complete(4)));
    }

    #[test]
    fn cycles_and_trees_are_planar() {
        let cycle: Vec<(usize, usize)> = (0..6).map(|i| (i, (i + 1) % 6)).collect();
        assert!(is_planar(6, &cycle));
        let tree = [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5)];
        assert!(is_planar(6, &tree));
    }

    #[test]
    fn k5_is_not_planar() {
        assert!(!is_planar(5, &complete(5)));
    }

    #[test]
    fn k33_is_not_planar() {
        let mut edges = Vec::new();
        for a in 0..3 {
            for b in 3..6 {
                edges.push((a, b));
            }
        }
        assert!(!is_planar(6, &edges));
    }

    #[test]
    fn grid_is_planar() {
        // 3x3 grid
        let mut edges = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                let v = row * 3 + col;
                if col < 2 {
                    edges.push((v, v + 1));
                }
                if row < 2 {
                    edges.push((v, v + 3));
                }
            }
        }
        assert!(is_planar(9, &edges));
    }

    #[test]
    fn octahedron_is_planar() {
        // maximal planar: every vertex adjacent to all but its opposite
        let opposite = [5, 4, 3, 2, 1, 0];
        let mut edges = Vec::new();
        for a in 0..6 {
            for b in (a + 1)..6 {
                if opposite[a] != b {
                    edges.push((a, b));
                }
            }
        }
        assert_eq!(edges.len(), 12);
        assert!(is_planar(6, &edges));
    }

    #[test]
    fn petersen_graph_is_not_planar() {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for i in 0..5 {
            edges.push((i, (i + 1) % 5)); // outer cycle
            edges.push((i, i + 5)); // spokes
            edges.push((i + 5, (i + 2) % 5 + 5)); // inner pentagram
        }
        assert!(!is_planar(10, &edges));
    }

    #[test]
    fn two_blocks_sharing_a_cut_vertex() {
        // two K4s glued at vertex 0: planar, and exercises the
        // biconnected split
        let mut edges = complete(4);
        for a in [0, 4, 5, 6] {
            for b in [0, 4, 5, 6] {
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        assert!(is_planar(7, &edges));
    }

    #[test]
    fn k5_plus_pendant_vertex_is_still_rejected() {
        // the dense core hides behind a sparse overall edge count
        let mut edges = complete(5);
        edges.push((4, 5));
        edges.push((5, 6));
        assert!(!is_planar(7, &edges));
    }
}
