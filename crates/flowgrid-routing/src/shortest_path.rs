//! Hop-count shortest paths over the residual link matrix.
//!
//! A link exists while its residual bandwidth is positive, so distances
//! shift between requests as earlier flows drain links to zero. Neighbor
//! expansion is in ascending node order, which makes every path choice
//! deterministic.

use std::collections::VecDeque;

use flowgrid_core::{LinkMatrix, NodeId};

/// Hops on the shortest path from `from` to `to`, or `None` if unreachable.
pub fn hop_distance(links: &LinkMatrix, from: NodeId, to: NodeId) -> Option<u32> {
    shortest_path(links, from, to).map(|path| (path.len() - 1) as u32)
}

/// Shortest path as a node sequence including both endpoints.
///
/// `from == to` yields the single-node path.
pub fn shortest_path(links: &LinkMatrix, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    let n = links.len();
    if from >= n || to >= n {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    visited[from] = true;
    queue.push_back(from);

    while let Some(u) = queue.pop_front() {
        for v in links.neighbors(u) {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            parent[v] = Some(u);
            if v == to {
                return Some(unwind(&parent, from, to));
            }
            queue.push_back(v);
        }
    }

    None
}

fn unwind(parent: &[Option<NodeId>], from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cursor = to;
    while cursor != from {
        match parent[cursor] {
            Some(p) => {
                path.push(p);
                cursor = p;
            }
            // Unreachable: every enqueued node has a parent chain back to `from`.
            None => break,
        }
    }
    path.reverse();
    path
}
