//! Flow assignment — placement in, flow matrix out.
//!
//! The router is the seam between placement and bandwidth accounting: the
//! engine hands it a finished placement and subtracts whatever matrix it
//! returns. Swapping the split policy means swapping the [`FlowRouter`]
//! implementation, not touching the greedy core.

use tracing::debug;

use flowgrid_core::{LinkMatrix, NodeId, Placement, Request};

use crate::error::RoutingError;
use crate::shortest_path::shortest_path;

/// Turns a request's finished placement into a flow matrix.
///
/// The returned matrix has the bandwidth matrix's shape, non-negative
/// entries, and must be subtractable from the residual matrix without
/// driving any cell negative; implementations fail instead of producing an
/// infeasible matrix.
pub trait FlowRouter {
    fn route(
        &self,
        links: &LinkMatrix,
        request: &Request,
        placement: &Placement,
    ) -> Result<LinkMatrix, RoutingError>;
}

/// Default router: equal split across a stage's replicas, hop-count
/// shortest paths between consecutive stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathRouter;

impl FlowRouter for ShortestPathRouter {
    fn route(
        &self,
        links: &LinkMatrix,
        request: &Request,
        placement: &Placement,
    ) -> Result<LinkMatrix, RoutingError> {
        let mut flow = LinkMatrix::zeros(links.len());

        // Source and destination carry the full rate; each stage divides it
        // equally across its replicas.
        let mut layers: Vec<Vec<(NodeId, f64)>> = Vec::with_capacity(placement.len() + 2);
        layers.push(vec![(request.source, 1.0)]);
        for (i, stage) in placement.stages().iter().enumerate() {
            if stage.is_empty() {
                return Err(RoutingError::EmptyStage { stage: i });
            }
            let share = 1.0 / stage.len() as f64;
            layers.push(stage.keys().map(|&node| (node, share)).collect());
        }
        layers.push(vec![(request.destination, 1.0)]);

        for pair in layers.windows(2) {
            for &(u, from_share) in &pair[0] {
                for &(v, to_share) in &pair[1] {
                    let amount = request.rate * from_share * to_share;
                    if u == v || amount == 0.0 {
                        continue;
                    }
                    let path = shortest_path(links, u, v)
                        .ok_or(RoutingError::Unreachable { from: u, to: v })?;
                    for leg in path.windows(2) {
                        flow.add(leg[0], leg[1], amount);
                    }
                }
            }
        }

        if let Some(underflow) = links.underflow_after(&flow) {
            return Err(RoutingError::Bandwidth(underflow));
        }

        debug!(
            request = request.id,
            stages = placement.len(),
            consumed = flow.total_weight(),
            "flow routed"
        );
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgrid_core::{InstanceId, NfTypeId};

    fn line_links() -> LinkMatrix {
        // 0 - 1 - 2 - 3, each link 100.
        let mut m = LinkMatrix::zeros(4);
        m.set(0, 1, 100.0);
        m.set(1, 2, 100.0);
        m.set(2, 3, 100.0);
        m
    }

    fn inst(nf: u32, seq: u32) -> InstanceId {
        InstanceId { nf: NfTypeId(nf), seq }
    }

    fn request(rate: f64) -> Request {
        Request {
            id: 0,
            source: 0,
            destination: 3,
            chain: vec![NfTypeId(1)],
            rate,
            required_availability: 0.9,
        }
    }

    #[test]
    fn single_instance_on_path_consumes_each_link_once() {
        let links = line_links();
        let mut placement = Placement::for_chain(1);
        placement.stage_mut(0).insert(1, inst(1, 0));

        let flow = ShortestPathRouter.route(&links, &request(10.0), &placement).unwrap();

        // src 0 → stage node 1 → dst 3.
        assert_eq!(flow.get(0, 1), 10.0);
        assert_eq!(flow.get(1, 2), 10.0);
        assert_eq!(flow.get(2, 3), 10.0);
        assert_eq!(flow.get(0, 2), 0.0);
    }

    #[test]
    fn stage_on_source_node_consumes_nothing_inbound() {
        let links = line_links();
        let mut placement = Placement::for_chain(1);
        placement.stage_mut(0).insert(0, inst(1, 0));

        let flow = ShortestPathRouter.route(&links, &request(10.0), &placement).unwrap();

        // Only the 0 → 3 traversal remains.
        assert_eq!(flow.get(0, 1), 10.0);
        assert_eq!(flow.get(1, 2), 10.0);
        assert_eq!(flow.get(2, 3), 10.0);
    }

    #[test]
    fn replicas_split_traffic_equally() {
        let mut links = LinkMatrix::zeros(4);
        // Diamond: 0 joined to 1 and 2, both joined to 3.
        links.set(0, 1, 100.0);
        links.set(0, 2, 100.0);
        links.set(1, 3, 100.0);
        links.set(2, 3, 100.0);

        let mut placement = Placement::for_chain(1);
        placement.stage_mut(0).insert(1, inst(1, 0));
        placement.stage_mut(0).insert(2, inst(1, 1));

        let flow = ShortestPathRouter.route(&links, &request(20.0), &placement).unwrap();

        assert_eq!(flow.get(0, 1), 10.0);
        assert_eq!(flow.get(0, 2), 10.0);
        assert_eq!(flow.get(1, 3), 10.0);
        assert_eq!(flow.get(2, 3), 10.0);
    }

    #[test]
    fn empty_chain_routes_source_to_destination() {
        let links = line_links();
        let placement = Placement::for_chain(0);

        let flow = ShortestPathRouter.route(&links, &request(5.0), &placement).unwrap();

        assert_eq!(flow.get(0, 1), 5.0);
        assert_eq!(flow.get(1, 2), 5.0);
        assert_eq!(flow.get(2, 3), 5.0);
    }

    #[test]
    fn flow_matrix_is_symmetric() {
        let links = line_links();
        let mut placement = Placement::for_chain(1);
        placement.stage_mut(0).insert(2, inst(1, 0));

        let flow = ShortestPathRouter.route(&links, &request(10.0), &placement).unwrap();

        for u in 0..4 {
            for v in 0..4 {
                assert_eq!(flow.get(u, v), flow.get(v, u));
            }
        }
    }

    #[test]
    fn unreachable_stage_fails() {
        let mut links = LinkMatrix::zeros(4);
        links.set(0, 1, 100.0); // node 2 isolated
        links.set(1, 3, 100.0);

        let mut placement = Placement::for_chain(1);
        placement.stage_mut(0).insert(2, inst(1, 0));

        let err = ShortestPathRouter.route(&links, &request(10.0), &placement).unwrap_err();
        assert!(matches!(err, RoutingError::Unreachable { .. }));
    }

    #[test]
    fn infeasible_demand_is_rejected_not_clamped() {
        let links = line_links();
        let placement = Placement::for_chain(0);

        let err = ShortestPathRouter.route(&links, &request(150.0), &placement).unwrap_err();
        assert!(matches!(err, RoutingError::Bandwidth(_)));
    }

    #[test]
    fn unplaced_stage_is_an_error() {
        let links = line_links();
        let placement = Placement::for_chain(1); // stage left empty

        let err = ShortestPathRouter.route(&links, &request(10.0), &placement).unwrap_err();
        assert_eq!(err, RoutingError::EmptyStage { stage: 0 });
    }
}
