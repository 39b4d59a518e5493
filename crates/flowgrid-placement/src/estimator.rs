//! Proactive replica targets.
//!
//! Before any reactive bottleneck resolution, the VNE-style strategy sizes
//! each stage from the worst node availability in the topology: enough
//! replicas that a stage of worst-case hosts still reaches the per-stage
//! availability floor `required^chain_len`.

use flowgrid_core::Node;

/// Minimum availability across all substrate nodes; 1.0 for an empty list.
pub fn worst_node_availability(nodes: &[Node]) -> f64 {
    nodes.iter().map(|n| n.availability).fold(1.0, f64::min)
}

/// Replicas per stage so that `1 − (1 − worst)^target ≥ required^chain_len`.
///
/// `target = ⌈ log(1 − required^chain_len) / log(1 − worst) ⌉`, clamped to
/// `1..=max_replicas`. Degenerate inputs (perfect nodes, an unreachable
/// requirement, never-up nodes) clamp instead of leaving the logarithm's
/// domain: perfect nodes need one replica, the rest saturate at
/// `max_replicas`.
pub fn replica_target(
    worst_availability: f64,
    required_availability: f64,
    chain_len: usize,
    max_replicas: u32,
) -> u32 {
    if chain_len == 0 || max_replicas == 0 {
        return 0;
    }
    if worst_availability >= 1.0 {
        return 1;
    }
    if worst_availability <= 0.0 {
        return max_replicas;
    }

    let stage_miss = 1.0 - required_availability.powi(chain_len as i32);
    if stage_miss <= 0.0 {
        return max_replicas;
    }

    let target = (stage_miss.ln() / (1.0 - worst_availability).ln()).ceil();
    (target as u32).clamp(1, max_replicas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgrid_core::Node;

    #[test]
    fn worst_availability_is_the_minimum() {
        let nodes = vec![
            Node::new(0, 100, 0.9),
            Node::new(1, 100, 0.8),
            Node::new(2, 100, 0.95),
        ];
        assert_eq!(worst_node_availability(&nodes), 0.8);
    }

    #[test]
    fn worst_availability_of_empty_list() {
        assert_eq!(worst_node_availability(&[]), 1.0);
    }

    #[test]
    fn demo_parameters_need_two_replicas() {
        // worst 0.8, required 0.95, chain of 3:
        // ⌈ln(1 − 0.857375) / ln(0.2)⌉ = ⌈1.21⌉ = 2.
        assert_eq!(replica_target(0.8, 0.95, 3, 8), 2);
    }

    #[test]
    fn short_chain_with_modest_target_needs_two() {
        // worst 0.8, required 0.9, chain of 2: ⌈ln(0.19)/ln(0.2)⌉ = 2.
        assert_eq!(replica_target(0.8, 0.9, 2, 8), 2);
    }

    #[test]
    fn lax_requirement_needs_one() {
        assert_eq!(replica_target(0.9, 0.5, 1, 8), 1);
    }

    #[test]
    fn perfect_nodes_need_one_replica() {
        assert_eq!(replica_target(1.0, 0.999, 5, 8), 1);
    }

    #[test]
    fn unreachable_requirement_saturates() {
        assert_eq!(replica_target(0.9, 1.0, 3, 8), 8);
    }

    #[test]
    fn never_up_nodes_saturate() {
        assert_eq!(replica_target(0.0, 0.9, 3, 8), 8);
    }

    #[test]
    fn empty_chain_needs_nothing() {
        assert_eq!(replica_target(0.8, 0.95, 0, 8), 0);
    }
}
