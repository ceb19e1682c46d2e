use rand::Rng;
use tracing::debug;

use super::{run_simulation, RoutingPolicy, SimulationError};
use crate::config::SweepConfig;
use crate::topology::Topology;

#[derive(Clone,Copy,Debug,PartialEq)]
pub struct SweepPoint {
    pub policy:RoutingPolicy,
    pub window_size:usize,
    pub blocking_probability:f64,
}

// first occurrence wins, order kept
pub fn distinct_policies(policies:&[RoutingPolicy]) -> Vec<RoutingPolicy> {
    let mut distinct:Vec<RoutingPolicy> = Vec::with_capacity(policies.len());
    for policy in policies {
        if !distinct.contains(policy) {
            distinct.push(*policy);
        }
    }
    distinct
}

/// Runs every policy over every window size, policy-major, drawing all
/// calls from the one `rng` stream.
pub fn run_sweep<R:Rng>(
    topology:&Topology,
    config:&SweepConfig,
    policies:&[RoutingPolicy],
    windows:&[usize],
    rng:&mut R
) -> Result<Vec<SweepPoint>,SimulationError> {
    let mut points = Vec::with_capacity(policies.len()*windows.len());
    for policy in policies {
        for window_size in windows {
            let blocking_probability = run_simulation(
                *window_size,
                topology.max_node,
                config.trials,
                &topology.graph,
                *policy,
                rng
            )?;
            debug!(policy = %policy,window = *window_size,probability = blocking_probability,"sweep point");
            points.push(SweepPoint {policy:*policy,window_size:*window_size,blocking_probability});
        }
    }
    Ok(points)
}
