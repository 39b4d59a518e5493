//! Candidate node ranking for one request.
//!
//! Nodes close to both the source and the destination come first; among
//! equally distant nodes the more available one wins. The ranking is
//! recomputed for every request because earlier flows reshape the residual
//! graph — candidate order is never cached across requests.

use flowgrid_core::{NodeId, Topology};
use flowgrid_routing::hop_distance;

/// Legs through a disconnected node sort after every reachable one.
const UNREACHABLE: u32 = u32::MAX;

/// A scored candidate node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub node: NodeId,
    /// Hops to the source plus hops to the destination.
    pub distance: u32,
    pub availability: f64,
}

/// Rank every node for a request from `source` to `destination`.
///
/// Sorted by combined distance ascending, availability descending, node id
/// ascending — a total order, so the result is deterministic.
pub fn rank_candidates(topology: &Topology, source: NodeId, destination: NodeId) -> Vec<Candidate> {
    let links = &topology.links;
    let mut candidates: Vec<Candidate> = topology
        .nodes
        .iter()
        .map(|node| {
            let to_src = hop_distance(links, source, node.id);
            let to_dst = hop_distance(links, node.id, destination);
            let distance = match (to_src, to_dst) {
                (Some(a), Some(b)) => a.saturating_add(b),
                _ => UNREACHABLE,
            };
            Candidate { node: node.id, distance, availability: node.availability }
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| b.availability.total_cmp(&a.availability))
            .then_with(|| a.node.cmp(&b.node))
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgrid_core::{LinkMatrix, Node};

    fn topology(availabilities: &[f64], links: &[(usize, usize)]) -> Topology {
        let mut m = LinkMatrix::zeros(availabilities.len());
        for &(u, v) in links {
            m.set(u, v, 100.0);
        }
        let nodes = availabilities
            .iter()
            .enumerate()
            .map(|(id, &a)| Node::new(id, 100, a))
            .collect();
        Topology::new(m, nodes).unwrap()
    }

    #[test]
    fn closer_nodes_rank_first() {
        // Line 0-1-2-3; request 0 → 1.
        let topo = topology(&[0.9, 0.9, 0.9, 0.9], &[(0, 1), (1, 2), (2, 3)]);
        let ranked = rank_candidates(&topo, 0, 1);

        let order: Vec<_> = ranked.iter().map(|c| c.node).collect();
        // 0 and 1 are endpoints (distance 1 each), then 2, then 3.
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(ranked[0].distance, 1);
        assert_eq!(ranked[2].distance, 3);
    }

    #[test]
    fn availability_breaks_distance_ties() {
        // Square: 0-1, 0-2, 1-3, 2-3; request 0 → 3. Every node's combined
        // distance is 2, so availability decides the whole order.
        let topo = topology(&[0.9, 0.8, 0.95, 0.9], &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let ranked = rank_candidates(&topo, 0, 3);

        let order: Vec<_> = ranked.iter().map(|c| c.node).collect();
        assert_eq!(order, vec![2, 0, 3, 1]);
    }

    #[test]
    fn node_id_breaks_full_ties() {
        let topo = topology(&[0.9, 0.9, 0.9, 0.9], &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let ranked = rank_candidates(&topo, 0, 3);

        let order: Vec<_> = ranked.iter().map(|c| c.node).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn disconnected_nodes_rank_last() {
        // Node 3 has no links at all.
        let topo = topology(&[0.9, 0.9, 0.9, 0.99], &[(0, 1), (1, 2)]);
        let ranked = rank_candidates(&topo, 0, 2);

        assert_eq!(ranked.last().map(|c| c.node), Some(3));
        assert_eq!(ranked.last().map(|c| c.distance), Some(UNREACHABLE));
    }
}
