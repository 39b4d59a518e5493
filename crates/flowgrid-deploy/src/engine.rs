//! The deployment engine — one batch, one ranked pass, no backtracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use flowgrid_core::{
    InstanceRegistry, LinkMatrix, NfCatalog, NfTypeId, Node, Placement, Request, RequestId,
    Topology,
};
use flowgrid_placement::{
    availability_bottleneck, capacity_bottleneck, chain_availability, place_stage,
    rank_candidates, replica_target, worst_node_availability,
};
use flowgrid_routing::{FlowRouter, RoutingError, ShortestPathRouter};

use crate::error::{DeployError, DeployResult};
use crate::rank::deployment_order;
use crate::strategy::{DeployOptions, ExhaustionPolicy, Strategy};

/// A request the engine gave up on under [`ExhaustionPolicy::SkipRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRequest {
    pub request: RequestId,
    pub reason: String,
}

/// Everything a deployment run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentReport {
    /// Stage → node → instance, per deployed request.
    pub placements: BTreeMap<RequestId, Placement>,
    /// Instances created per NF type across the whole run.
    pub instance_counts: BTreeMap<NfTypeId, u32>,
    /// Bandwidth consumed per deployed request.
    pub flows: BTreeMap<RequestId, LinkMatrix>,
    /// Residual bandwidth after the whole batch.
    pub residual: LinkMatrix,
    /// Final node state (CPU, hosted instances).
    pub nodes: Vec<Node>,
    /// Requests abandoned under the skip policy, with the error that
    /// stopped them. Empty under fail-fast.
    pub skipped: Vec<SkippedRequest>,
}

/// Greedy chain deployment over one substrate.
///
/// The engine takes its topology by value: a run owns its state, and
/// concurrent batches need independent copies by construction.
pub struct DeploymentEngine {
    catalog: NfCatalog,
    options: DeployOptions,
    router: Box<dyn FlowRouter>,
}

impl DeploymentEngine {
    pub fn new(catalog: NfCatalog, options: DeployOptions) -> Self {
        Self { catalog, options, router: Box::new(ShortestPathRouter) }
    }

    /// Swap the flow router (split policy, path selection).
    pub fn with_router(mut self, router: Box<dyn FlowRouter>) -> Self {
        self.router = router;
        self
    }

    pub fn options(&self) -> DeployOptions {
        self.options
    }

    /// Deploy a whole batch, highest rank first.
    pub fn deploy(
        &self,
        mut topology: Topology,
        requests: &[Request],
    ) -> DeployResult<DeploymentReport> {
        self.validate(&topology, requests)?;

        let mut registry = InstanceRegistry::new();
        let mut placements = BTreeMap::new();
        let mut flows = BTreeMap::new();
        let mut skipped = Vec::new();

        for index in deployment_order(requests) {
            let request = &requests[index];
            info!(
                request = request.id,
                strategy = self.options.strategy.label(),
                stages = request.chain.len(),
                rate = request.rate,
                "deploying request"
            );

            match self.deploy_one(&mut topology, &mut registry, request) {
                Ok((placement, flow)) => {
                    info!(
                        request = request.id,
                        replicas = placement.replica_count(),
                        availability = chain_availability(&topology, &placement),
                        "request deployed"
                    );
                    placements.insert(request.id, placement);
                    flows.insert(request.id, flow);
                }
                Err(err) if self.options.exhaustion == ExhaustionPolicy::SkipRequest => {
                    warn!(request = request.id, error = %err, "request skipped");
                    skipped.push(SkippedRequest { request: request.id, reason: err.to_string() });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(DeploymentReport {
            placements,
            instance_counts: registry.counts(),
            flows,
            residual: topology.links,
            nodes: topology.nodes,
            skipped,
        })
    }

    /// Place, grow, route, and account one request.
    fn deploy_one(
        &self,
        topology: &mut Topology,
        registry: &mut InstanceRegistry,
        request: &Request,
    ) -> DeployResult<(Placement, LinkMatrix)> {
        let candidates = rank_candidates(topology, request.source, request.destination);
        let mut placement = Placement::for_chain(request.chain.len());

        // One instance per stage before any replica is considered.
        for (i, &nf) in request.chain.iter().enumerate() {
            place_stage(topology, registry, &self.catalog, &candidates, nf, placement.stage_mut(i))
                .map_err(|source| DeployError::Placement { request: request.id, stage: i, source })?;
        }

        match self.options.strategy {
            Strategy::Vne => {
                let worst = worst_node_availability(&topology.nodes);
                let target = replica_target(
                    worst,
                    request.required_availability,
                    request.chain.len(),
                    topology.node_count() as u32,
                );
                debug!(request = request.id, target, worst, "replica pre-estimate");
                for (i, &nf) in request.chain.iter().enumerate() {
                    // Single top-up per undersized stage, not a loop.
                    if (placement.stage(i).len() as u32) < target {
                        place_stage(
                            topology,
                            registry,
                            &self.catalog,
                            &candidates,
                            nf,
                            placement.stage_mut(i),
                        )
                        .map_err(|source| DeployError::Placement {
                            request: request.id,
                            stage: i,
                            source,
                        })?;
                    }
                }
            }
            Strategy::Extend => {
                while let Some(i) = availability_bottleneck(topology, request, &placement) {
                    debug!(request = request.id, stage = i, "availability below target");
                    place_stage(
                        topology,
                        registry,
                        &self.catalog,
                        &candidates,
                        request.chain[i],
                        placement.stage_mut(i),
                    )
                    .map_err(|source| DeployError::Placement {
                        request: request.id,
                        stage: i,
                        source,
                    })?;
                }
            }
        }

        // Capacity resolution runs for both strategies. Each added replica
        // occupies a fresh node in its stage, so the loop is bounded by the
        // node count before the placer reports exhaustion.
        while let Some(i) = capacity_bottleneck(registry, request, &placement) {
            debug!(request = request.id, stage = i, "capacity below share");
            place_stage(
                topology,
                registry,
                &self.catalog,
                &candidates,
                request.chain[i],
                placement.stage_mut(i),
            )
            .map_err(|source| DeployError::Placement { request: request.id, stage: i, source })?;
        }

        let flow = self
            .router
            .route(&topology.links, request, &placement)
            .map_err(|source| DeployError::Routing { request: request.id, source })?;

        // Consume capacity once per request-stage assignment.
        for stage in placement.stages() {
            let share = request.rate / stage.len() as f64;
            for &id in stage.values() {
                if let Some(instance) = registry.get_mut(id) {
                    instance.capacity_free -= share;
                }
            }
        }

        topology
            .links
            .try_subtract(&flow)
            .map_err(|underflow| DeployError::Routing {
                request: request.id,
                source: RoutingError::Bandwidth(underflow),
            })?;

        Ok((placement, flow))
    }

    fn validate(&self, topology: &Topology, requests: &[Request]) -> DeployResult<()> {
        let n = topology.node_count();
        let mut seen = std::collections::BTreeSet::new();
        for request in requests {
            if !seen.insert(request.id) {
                return Err(DeployError::InvalidInput(format!(
                    "duplicate request id {}",
                    request.id
                )));
            }
            if request.source >= n || request.destination >= n {
                return Err(DeployError::InvalidInput(format!(
                    "request {} endpoints {}→{} outside topology of {n} nodes",
                    request.id, request.source, request.destination
                )));
            }
            if !request.rate.is_finite() || request.rate < 0.0 {
                return Err(DeployError::InvalidInput(format!(
                    "request {} has invalid rate {}",
                    request.id, request.rate
                )));
            }
            if !(0.0..=1.0).contains(&request.required_availability) {
                return Err(DeployError::InvalidInput(format!(
                    "request {} availability {} outside [0, 1]",
                    request.id, request.required_availability
                )));
            }
            for &nf in &request.chain {
                if !self.catalog.contains(nf) {
                    return Err(DeployError::InvalidInput(format!(
                        "request {} uses {nf}, which is not in the catalog",
                        request.id
                    )));
                }
            }
        }
        Ok(())
    }
}
