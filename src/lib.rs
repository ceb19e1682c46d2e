// call-blocking estimation for circuit-switched networks
// capacitated topology, min-hop and widest-path routing, monte-carlo admission

pub mod circuit_network;
pub mod config;
pub mod dsa;
pub mod routing;
pub mod topology;

pub use circuit_network::{run_simulation, CircuitSimulator, RoutingPolicy, SimulationError, SimulationReport};
pub use dsa::graph::{CapacitatedGraph, GraphError};
pub use routing::Route;
pub use topology::{load_topology, Topology, TopologyError};
