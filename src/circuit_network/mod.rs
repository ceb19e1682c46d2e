// mimics a circuit-switched network on an undirected capacitated graph
// and estimates how often a call attempt finds no free end-to-end circuit

/* every link carries a fixed number of channels
a call between two nodes holds one channel on every link of its route
until it is released, and the same channel count is shared by both
directions of a link */

/* calls live in a fifo window of `n` attempts. when the window is full
the oldest attempt is released before the next one is routed, blocked
attempts included, they simply give nothing back */

pub mod sweep;

use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::dsa::graph::{CapacitatedGraph, GraphError, NodeId};
use crate::routing::Route;
use crate::routing::shortest_path::shortest_path;
use crate::routing::widest_path::widest_path;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum SimulationError {
    #[error("Window size must be at least 1")]
    EmptyWindow,
    #[error("At least one trial is required to estimate a probability")]
    NoTrials,
    #[error("Max node id is {max_node}, at least two nodes are needed to draw a call")]
    TooFewNodes{max_node:NodeId},
    #[error("Max node id is {max_node}, but the graph only has {node_count} nodes")]
    NodeOutOfRange{max_node:NodeId,node_count:usize},
    #[error(transparent)]
    Graph(#[from] GraphError),
}

type Result<T> = std::result::Result<T,SimulationError>;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
#[error("Unknown routing policy `{0}`, expected one of fixed-minhop, dynamic-minhop, fixed-widest, dynamic-widest")]
pub struct UnknownPolicy(String);

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum RoutingPolicy {
    /// min-weight route on the untouched reference topology
    FixedMinHop,
    /// min-weight route on the live residual capacities
    DynamicMinHop,
    /// widest route on the untouched reference topology
    FixedWidest,
    /// widest route on the live residual capacities
    DynamicWidest,
}

impl RoutingPolicy {
    pub const ALL:[RoutingPolicy;4] = [
        RoutingPolicy::FixedMinHop,
        RoutingPolicy::DynamicMinHop,
        RoutingPolicy::FixedWidest,
        RoutingPolicy::DynamicWidest,
    ];

    pub fn is_dynamic(&self) -> bool {
        matches!(self,RoutingPolicy::DynamicMinHop | RoutingPolicy::DynamicWidest)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoutingPolicy::FixedMinHop => "fixed-minhop",
            RoutingPolicy::DynamicMinHop => "dynamic-minhop",
            RoutingPolicy::FixedWidest => "fixed-widest",
            RoutingPolicy::DynamicWidest => "dynamic-widest",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoutingPolicy::FixedMinHop => "fixed routing over min-hop paths",
            RoutingPolicy::DynamicMinHop => "on-demand routing over min-hop paths",
            RoutingPolicy::FixedWidest => "fixed routing over widest paths",
            RoutingPolicy::DynamicWidest => "on-demand routing over widest paths",
        }
    }

    // fixed policies look at the reference, dynamic ones at the working copy
    fn route(&self,reference:&CapacitatedGraph,working:&CapacitatedGraph,source:NodeId,target:NodeId) -> Route {
        let graph = if self.is_dynamic() {working} else {reference};
        match self {
            RoutingPolicy::FixedMinHop | RoutingPolicy::DynamicMinHop => shortest_path(graph, source, target),
            RoutingPolicy::FixedWidest | RoutingPolicy::DynamicWidest => widest_path(graph, source, target),
        }
    }
}

impl Display for RoutingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.name())
    }
}

impl FromStr for RoutingPolicy {
    type Err = UnknownPolicy;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RoutingPolicy::ALL.into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

/// What happened to one call attempt once it was routed.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum CallOutcome {
    Established{source:NodeId,destination:NodeId,hops:usize},
    Blocked{source:NodeId,destination:NodeId},
}

impl CallOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self,CallOutcome::Blocked{..})
    }
}

#[derive(Clone,Copy,Debug,PartialEq)]
pub struct SimulationReport {
    pub trials:usize,
    pub blocked:usize,
}

impl SimulationReport {
    pub fn blocking_probability(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.blocked as f64/self.trials as f64
    }
}

pub struct CircuitSimulator<'g,R> {
    reference:&'g CapacitatedGraph,
    working:CapacitatedGraph,
    // routes of the last `window_size` attempts, oldest at the front
    window:VecDeque<Route>,
    window_size:usize,
    max_node:NodeId,
    policy:RoutingPolicy,
    rng:R,
    trials:usize,
    blocked:usize
}

impl<'g,R:Rng> CircuitSimulator<'g,R> {
    pub fn new(reference:&'g CapacitatedGraph,window_size:usize,max_node:NodeId,policy:RoutingPolicy,rng:R) -> Result<Self> {
        if window_size == 0 {
            return Err(SimulationError::EmptyWindow);
        }
        if max_node == 0 {
            return Err(SimulationError::TooFewNodes {max_node});
        }
        if max_node >= reference.node_count() {
            return Err(SimulationError::NodeOutOfRange {max_node,node_count:reference.node_count()});
        }
        Ok(Self {
            reference,
            working:reference.clone(),
            // grows with the attempts actually made, never with window_size
            window:VecDeque::new(),
            window_size,
            max_node,
            policy,
            rng,
            trials:0,
            blocked:0
        })
    }

    pub fn policy(&self) -> RoutingPolicy {
        self.policy
    }
    pub fn working_graph(&self) -> &CapacitatedGraph {
        &self.working
    }
    // attempts still holding a window slot, oldest first
    pub fn in_flight(&self) -> impl Iterator<Item = &Route> {
        self.window.iter()
    }
    pub fn report(&self) -> SimulationReport {
        SimulationReport {trials:self.trials,blocked:self.blocked}
    }

    fn release_oldest(&mut self) -> Result<()> {
        if self.window.len() < self.window_size {
            return Ok(());
        }
        let Some(finished) = self.window.pop_front() else {
            return Ok(());
        };
        for link in finished.links() {
            self.working.release_link(*link)?;
        }
        Ok(())
    }

    fn draw_pair(&mut self) -> (NodeId,NodeId) {
        loop {
            let source = self.rng.random_range(0..=self.max_node);
            let destination = self.rng.random_range(0..=self.max_node);
            if source != destination {
                return (source,destination);
            }
        }
    }

    /// Runs one trial: release, draw, route, admit or block, enqueue.
    pub fn step(&mut self) -> Result<CallOutcome> {
        self.release_oldest()?;

        let (source,destination) = self.draw_pair();
        let mut route = self.policy.route(self.reference, &self.working, source, destination);

        // fixed routes may cross links the live network has run out of
        let exhausted = route.links().iter()
            .any(|id| self.working.link(*id).is_none_or(|link| link.capacity() == 0));
        if exhausted {
            route.clear();
        }

        // all links were checked above, so either every reservation succeeds or none is tried
        for link in route.links() {
            self.working.reserve_link(*link)?;
        }

        self.trials += 1;
        let outcome = if route.is_established() {
            CallOutcome::Established {source,destination,hops:route.hop_count()}
        } else {
            self.blocked += 1;
            CallOutcome::Blocked {source,destination}
        };
        match outcome {
            CallOutcome::Blocked{..} => debug!(source,destination,policy = %self.policy,"call blocked"),
            CallOutcome::Established{hops,..} => trace!(source,destination,hops,"call established"),
        }

        self.window.push_back(route);
        Ok(outcome)
    }

    pub fn run(&mut self,trials:usize) -> Result<SimulationReport> {
        if trials == 0 {
            return Err(SimulationError::NoTrials);
        }
        for _ in 0..trials {
            self.step()?;
        }
        let report = self.report();
        info!(
            policy = %self.policy,
            window = self.window_size,
            trials = report.trials,
            blocked = report.blocked,
            probability = report.blocking_probability(),
            "simulation finished"
        );
        Ok(report)
    }
}

/// Estimates the blocking probability of `policy` over `graph` with `trial_count`
/// call attempts and a release window of `window_size` attempts. Calls are drawn
/// between distinct nodes in `0..=max_node`.
pub fn run_simulation<R:Rng>(
    window_size:usize,
    max_node:NodeId,
    trial_count:usize,
    graph:&CapacitatedGraph,
    policy:RoutingPolicy,
    rng:&mut R
) -> Result<f64> {
    if trial_count == 0 {
        return Err(SimulationError::NoTrials);
    }
    let mut simulator = CircuitSimulator::new(graph, window_size, max_node, policy, rng)?;
    let report = simulator.run(trial_count)?;
    Ok(report.blocking_probability())
}
