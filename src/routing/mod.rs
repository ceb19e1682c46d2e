// path selection over a capacitated graph
// both solvers are read-only over the graph they are handed

pub mod shortest_path;
pub mod widest_path;

use crate::dsa::graph::{CapacitatedGraph, Capacity, LinkId, NodeId, Weight};

/// An ordered source-to-destination node sequence together with the link
/// taken for every hop. An empty route means "no route".
#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct Route {
    nodes:Vec<NodeId>,
    // links[i] joins nodes[i] and nodes[i+1]
    links:Vec<LinkId>
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }
    pub(crate) fn single(node:NodeId) -> Self {
        Self {nodes:vec![node],links:vec![]}
    }
    pub(crate) fn from_parts(nodes:Vec<NodeId>,links:Vec<LinkId>) -> Self {
        debug_assert!(nodes.len() == links.len() + 1 || (nodes.is_empty() && links.is_empty()));
        Self {nodes,links}
    }
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn hop_count(&self) -> usize {
        self.links.len()
    }
    // a route that actually connects two distinct endpoints
    pub fn is_established(&self) -> bool {
        self.nodes.len() >= 2
    }
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }
    pub fn weight(&self,graph:&CapacitatedGraph) -> Weight {
        self.links.iter()
            .filter_map(|id| graph.link(*id))
            .map(|link| link.weight())
            .sum()
    }
    /// Smallest residual capacity along the route in `graph`, None for a route with no hops.
    pub fn bottleneck(&self,graph:&CapacitatedGraph) -> Option<Capacity> {
        self.links.iter()
            .filter_map(|id| graph.link(*id))
            .map(|link| link.capacity())
            .min()
    }
}
