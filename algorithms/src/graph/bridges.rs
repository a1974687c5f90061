//! Bridges of an undirected multigraph (Tarjan low-link).
//!
//! Variables:
//!   disc[v] : DFS discovery time of v
//!   low[v]  : min disc reachable from v's subtree using one back edge
//!
//! Equations:
//!   tree edge (p, v) is a bridge  <=>  low[v] > disc[p]
//!   low[v] = min(disc[v], disc[w] for back edges v-w, low[c] for children c)
//!
//! Only the edge a vertex was entered through is skipped (by id), so a
//! parallel copy of that edge still counts as a back edge.

use std::collections::HashMap;

const UNVISITED: usize = usize::MAX;

/// Edges of `edges` whose removal disconnects their endpoints, in input order.
///
/// Vertex ids may be any `usize` values, however sparse; only ids that appear
/// as an endpoint exist. Every component is searched.
pub fn find_bridges(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    // Dense slots in first-seen order.
    let mut slot: HashMap<usize, usize> = HashMap::new();
    let mut dense = |id: usize| {
        let next = slot.len();
        *slot.entry(id).or_insert(next)
    };
    let pairs: Vec<(usize, usize)> = edges.iter().map(|&(u, v)| (dense(u), dense(v))).collect();
    let n = slot.len();

    // adj[v] = (neighbour, edge id)
    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (id, &(u, v)) in pairs.iter().enumerate() {
        if u != v {
            adj[u].push((v, id));
            adj[v].push((u, id));
        }
    }

    let mut disc = vec![UNVISITED; n];
    let mut low = vec![UNVISITED; n];
    let mut is_bridge = vec![false; edges.len()];
    let mut time = 0;

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;

        // Frames: (vertex, id of the edge used to enter it, next adjacency slot).
        let mut stack = vec![(root, UNVISITED, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (v, via, pos) = *frame;
            if let Some(&(w, id)) = adj[v].get(pos) {
                frame.2 += 1;
                if id == via {
                    continue;
                }
                if disc[w] == UNVISITED {
                    disc[w] = time;
                    low[w] = time;
                    time += 1;
                    stack.push((w, id, 0));
                } else {
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                stack.pop();
                if let Some(&(parent, _, _)) = stack.last() {
                    low[parent] = low[parent].min(low[v]);
                    if low[v] > disc[parent] {
                        is_bridge[via] = true;
                    }
                }
            }
        }
    }

    let bridges: Vec<(usize, usize)> = edges
        .iter()
        .zip(&is_bridge)
        .filter(|(_, bridge)| **bridge)
        .map(|(edge, _)| *edge)
        .collect();
    tracing::debug!(
        vertices = n,
        edges = edges.len(),
        bridges = bridges.len(),
        "bridge search done"
    );
    bridges
}
