use std::borrow::Borrow;
use thiserror::Error;

type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;

pub type NodeId = usize;
pub type LinkId = usize;
pub type Weight = u64;
pub type Capacity = u32;

// (from, to, weight, capacity), one undirected link
pub type LinkSpec = (NodeId,NodeId,Weight,Capacity);

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum GraphError {
    #[error("Graph has {links_len} links, but link {link} was accessed")]
    LinkOutOfBounds{links_len:usize,link:LinkId},
    #[error("No link between node {from} and node {to}")]
    NoSuchLink{from:NodeId,to:NodeId},
    #[error("Attempted to reserve link {link} ({from} <-> {to}) which has no residual capacity")]
    CapacityUnderflow{link:LinkId,from:NodeId,to:NodeId},
    #[error("Attempted to release link {link} above its installed capacity {installed}")]
    CapacityOverflow{link:LinkId,installed:Capacity},
}

type Result<T> = std::result::Result<T,GraphError>;

/// One undirected link. Both directed adjacency entries of the link point
/// at this record, so there is exactly one residual capacity cell per link.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Link {
    a:NodeId,
    b:NodeId,
    weight:Weight,
    installed:Capacity,
    residual:Capacity
}

impl Link {
    pub fn endpoints(&self) -> (NodeId,NodeId) {
        (self.a,self.b)
    }
    pub fn weight(&self) -> Weight {
        self.weight
    }
    pub fn capacity(&self) -> Capacity {
        self.residual
    }
    pub fn installed_capacity(&self) -> Capacity {
        self.installed
    }
    // the endpoint opposite to `node`, None if `node` is not on this link
    pub fn opposite(&self,node:NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Directed view of a link as seen from the node owning the adjacency list.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Edge {
    pub to:NodeId,
    pub link:LinkId
}

#[derive(Clone,Debug,Default)]
pub struct CapacitatedGraph {
    links:Vec<Link>,
    adjacency:Vec<Vec<Edge>>,
    // neighbour -> first link inserted towards it, one map per node
    lookup:Vec<HashMap<NodeId,LinkId>>
}

impl CapacitatedGraph {
    pub fn new() -> Self {
        Self {links:vec![],adjacency:vec![],lookup:vec![]}
    }
    pub fn with_capacity(nodes:usize,links:usize) -> Self {
        if nodes == 0 && links == 0 {
            return Self::new();
        }
        let mut graph = Self {
            links:Vec::with_capacity(links),
            adjacency:Vec::with_capacity(nodes),
            lookup:Vec::with_capacity(nodes)
        };
        if nodes > 0 {
            graph.push_node(nodes - 1);
        }
        graph
    }
    pub fn shrink_to_fit(&mut self) {
        self.links.shrink_to_fit();
        self.adjacency.shrink_to_fit();
        for edges in self.adjacency.iter_mut() {
            edges.shrink_to_fit();
        }
        self.lookup.shrink_to_fit();
        for map in self.lookup.iter_mut() {
            map.shrink_to_fit();
        }
    }
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
    pub fn links_len(&self) -> usize {
        self.links.len()
    }
    pub fn is_empty(&self) -> bool {
        if self.node_count() == 0 {
            debug_assert!(self.links_len() == 0);
            return true;
        }
        false
    }
    pub fn contains_node(&self,node:NodeId) -> bool {
        node < self.node_count()
    }
    // grows the dense id range so that `node` exists, without adding links
    pub fn push_node(&mut self,node:NodeId) {
        if self.contains_node(node) {return;}
        self.adjacency.resize_with(node + 1,Vec::new);
        self.lookup.resize_with(node + 1,|| HashMap::with_hasher(nohash::BuildNoHashHasher::default()));
    }
    pub fn push_link(&mut self,from:NodeId,to:NodeId,weight:Weight,capacity:Capacity) -> LinkId {
        self.push_node(from.max(to));
        let id = self.links.len();
        self.links.push(Link {a:from,b:to,weight,installed:capacity,residual:capacity});

        self.adjacency[from].push(Edge {to,link:id});
        self.lookup[from].entry(to).or_insert(id);
        if from != to {
            self.adjacency[to].push(Edge {to:from,link:id});
            self.lookup[to].entry(from).or_insert(id);
        }

        #[cfg(debug_assertions)]
        self.assert_link(id);
        id
    }
    #[cfg(debug_assertions)]
    fn assert_link(&self,id:LinkId) {
        let link = &self.links[id];
        let (a,b) = link.endpoints();
        if !self.adjacency[a].iter().any(|e| e.link == id && e.to == b) {
            panic!("Link {id} defined, but {b} is not in {a}'s adjacency list");
        }
        if !self.adjacency[b].iter().any(|e| e.link == id && e.to == a) {
            panic!("Link {id} defined, but {a} is not in {b}'s adjacency list");
        }
    }
    pub fn links(&self) -> &[Link] {
        &self.links
    }
    pub fn link(&self,id:LinkId) -> Option<&Link> {
        self.links.get(id)
    }
    // outgoing edges in insertion order, empty for unknown nodes
    pub fn neighbours(&self,node:NodeId) -> &[Edge] {
        match self.adjacency.get(node) {
            Some(edges) => edges,
            None => &[]
        }
    }
    pub fn link_between(&self,from:NodeId,to:NodeId) -> Option<LinkId> {
        self.lookup.get(from)?.get(&to).copied()
    }
    pub fn capacity_of(&self,from:NodeId,to:NodeId) -> Option<Capacity> {
        let id = self.link_between(from, to)?;
        Some(self.links[id].residual)
    }
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.adjacency.iter().enumerate()
            .filter_map(|(node,edges)| if edges.is_empty() {Some(node)} else {None})
            .collect()
    }

    fn link_mut(&mut self,id:LinkId) -> Result<&mut Link> {
        let links_len = self.links.len();
        self.links.get_mut(id).ok_or(GraphError::LinkOutOfBounds {links_len,link:id})
    }
    /// Takes one channel from the link. Returns the residual capacity left.
    pub fn reserve_link(&mut self,id:LinkId) -> Result<Capacity> {
        let link = self.link_mut(id)?;
        if link.residual == 0 {
            return Err(GraphError::CapacityUnderflow {link:id,from:link.a,to:link.b});
        }
        link.residual -= 1;
        Ok(link.residual)
    }
    /// Gives one channel back to the link. Returns the residual capacity after.
    pub fn release_link(&mut self,id:LinkId) -> Result<Capacity> {
        let link = self.link_mut(id)?;
        if link.residual >= link.installed {
            return Err(GraphError::CapacityOverflow {link:id,installed:link.installed});
        }
        link.residual += 1;
        Ok(link.residual)
    }
    pub fn reserve(&mut self,from:NodeId,to:NodeId) -> Result<Capacity> {
        let id = self.link_between(from, to).ok_or(GraphError::NoSuchLink {from,to})?;
        self.reserve_link(id)
    }
    pub fn release(&mut self,from:NodeId,to:NodeId) -> Result<Capacity> {
        let id = self.link_between(from, to).ok_or(GraphError::NoSuchLink {from,to})?;
        self.release_link(id)
    }
}

impl<B:Borrow<LinkSpec>> FromIterator<B> for CapacitatedGraph {
    fn from_iter<T: IntoIterator<Item = B>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size = match iter.size_hint() {
            (_,Some(higher)) => {higher},
            (lower,None) => {lower}
        };
        let mut new_graph = Self::with_capacity(0,size);
        for spec in iter {
            let (from,to,weight,capacity) = spec.borrow();
            new_graph.push_link(*from, *to, *weight, *capacity);
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

impl<T> From<T> for CapacitatedGraph
    where T:AsRef<[LinkSpec]>
{
    fn from(value: T) -> Self {
        value.as_ref().iter().collect()
    }
}
