// reads `from to weight capacity` quadruples, one undirected link per line

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::dsa::graph::{CapacitatedGraph, Capacity, LinkSpec, NodeId, Weight};

#[derive(Error,Debug)]
pub enum TopologyError {
    #[error("Failed to open topology file {path:?}")]
    Open{path:PathBuf,#[source] source:std::io::Error},
    #[error("Failed to read topology input")]
    Read(#[from] std::io::Error),
    #[error("Malformed topology at line {line}: {reason}")]
    Malformed{line:usize,reason:String},
    #[error("Topology input contains no links")]
    Empty,
}

type Result<T> = std::result::Result<T,TopologyError>;

// node ids are dense, so the largest id sizes every per-node table
pub const MAX_NODE_ID:NodeId = (1 << 20) - 1;

/// A loaded network: the reference graph and the largest node id it mentions.
#[derive(Clone,Debug)]
pub struct Topology {
    pub graph:CapacitatedGraph,
    pub max_node:NodeId,
}

fn parse_field<T:std::str::FromStr>(token:&str,name:&str,line:usize) -> Result<T> {
    token.parse::<T>().map_err(|_| TopologyError::Malformed {
        line,
        reason:format!("{name} `{token}` is not a non-negative integer")
    })
}

// None for blank and comment lines
fn parse_line(text:&str,line:usize) -> Result<Option<LinkSpec>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let tokens:Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(TopologyError::Malformed {
            line,
            reason:format!("expected 4 integers (from to weight capacity), found {}",tokens.len())
        });
    }
    let from:NodeId = parse_field(tokens[0],"from",line)?;
    let to:NodeId = parse_field(tokens[1],"to",line)?;
    let weight:Weight = parse_field(tokens[2],"weight",line)?;
    let capacity:Capacity = parse_field(tokens[3],"capacity",line)?;
    for node in [from,to] {
        if node > MAX_NODE_ID {
            return Err(TopologyError::Malformed {line,reason:format!("node id {node} exceeds the supported maximum {MAX_NODE_ID}")});
        }
    }
    if weight == 0 {
        return Err(TopologyError::Malformed {line,reason:"weight must be positive".to_string()});
    }
    Ok(Some((from,to,weight,capacity)))
}

pub fn read_topology<R:Read>(reader:R) -> Result<Topology> {
    let mut links:Vec<LinkSpec> = vec![];
    for (index,text) in BufReader::new(reader).lines().enumerate() {
        let text = text?;
        if let Some(spec) = parse_line(&text,index + 1)? {
            links.push(spec);
        }
    }
    if links.is_empty() {
        return Err(TopologyError::Empty);
    }

    let graph = CapacitatedGraph::from(&links);
    let max_node = graph.node_count() - 1;

    let isolated = graph.isolated_nodes();
    if !isolated.is_empty() {
        warn!(count = isolated.len(),nodes = ?isolated,"topology has nodes without links, calls to them always block");
    }
    info!(nodes = graph.node_count(),links = graph.links_len(),"topology loaded");

    Ok(Topology {graph,max_node})
}

pub fn parse_topology(text:&str) -> Result<Topology> {
    read_topology(text.as_bytes())
}

pub fn load_topology<P:AsRef<Path>>(path:P) -> Result<Topology> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TopologyError::Open {path:path.to_path_buf(),source})?;
    read_topology(file)
}
