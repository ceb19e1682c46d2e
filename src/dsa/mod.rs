pub(crate) mod disjoint_set;
pub mod graph;
