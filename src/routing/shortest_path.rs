use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Route;
use crate::dsa::graph::{CapacitatedGraph, Edge, LinkId, NodeId, Weight};

/// Minimum-weight route from `source` to `target` over links with residual
/// capacity. Returns the empty route when `target` cannot be reached.
pub fn shortest_path(graph:&CapacitatedGraph,source:NodeId,target:NodeId) -> Route {
    shortest_path_filtered(graph, source, target, |_| true)
}

// dijkstra restricted to the links `admit` accepts
pub(crate) fn shortest_path_filtered<F>(graph:&CapacitatedGraph,source:NodeId,target:NodeId,admit:F) -> Route
    where F:Fn(LinkId) -> bool
{
    if !graph.contains_node(source) || !graph.contains_node(target) {
        return Route::empty();
    }
    if source == target {
        return Route::single(source);
    }

    let node_count = graph.node_count();
    let mut dist:Vec<Option<Weight>> = vec![None;node_count];
    // pred[v].to is the node v was first reached from at its final distance
    let mut pred:Vec<Option<Edge>> = vec![None;node_count];
    let mut frontier = BinaryHeap::with_capacity(node_count);

    dist[source] = Some(0);
    frontier.push(Reverse((0,source)));

    while let Some(Reverse((d,node))) = frontier.pop() {
        if dist[node].is_some_and(|best| d > best) {
            continue;
        }
        if node == target {
            break;
        }
        for edge in graph.neighbours(node) {
            if !admit(edge.link) {
                continue;
            }
            let Some(link) = graph.link(edge.link) else {continue};
            if link.capacity() == 0 {
                continue;
            }
            let next = d.saturating_add(link.weight());
            // strict improvement only, so an equal-weight tie keeps the first predecessor
            if dist[edge.to].is_none_or(|best| next < best) {
                dist[edge.to] = Some(next);
                pred[edge.to] = Some(Edge {to:node,link:edge.link});
                frontier.push(Reverse((next,edge.to)));
            }
        }
    }

    if pred[target].is_none() {
        return Route::empty();
    }

    let mut nodes = vec![target];
    let mut links = vec![];
    let mut node = target;
    while node != source {
        let Some(back) = pred[node] else {
            return Route::empty();
        };
        links.push(back.link);
        nodes.push(back.to);
        node = back.to;
    }
    nodes.reverse();
    links.reverse();
    Route::from_parts(nodes, links)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    use super::shortest_path;
    use crate::dsa::graph::{CapacitatedGraph, LinkSpec, Weight};

    fn graph(links:&[LinkSpec]) -> CapacitatedGraph {
        CapacitatedGraph::from(links)
    }

    // floyd-warshall over links with residual capacity
    fn reference_distances(graph:&CapacitatedGraph) -> Vec<Vec<Option<Weight>>> {
        let n = graph.node_count();
        let mut dist = vec![vec![None;n];n];
        for (i,row) in dist.iter_mut().enumerate() {
            row[i] = Some(0);
        }
        for link in graph.links() {
            if link.capacity() == 0 {continue}
            let (a,b) = link.endpoints();
            let w = link.weight();
            if dist[a][b].is_none_or(|d| w < d) {
                dist[a][b] = Some(w);
                dist[b][a] = Some(w);
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(ik),Some(kj)) = (dist[i][k],dist[k][j]) {
                        if dist[i][j].is_none_or(|d| ik + kj < d) {
                            dist[i][j] = Some(ik + kj);
                        }
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn test_simple_route() {
        let graph = graph(&[(0,1,1,1),(1,2,1,1),(0,2,5,1),(2,3,1,1)]);
        let route = shortest_path(&graph,0,3);
        assert_eq!(route.nodes(),&[0,1,2,3]);
        assert_eq!(route.links(),&[0,1,3]);
        assert_eq!(route.weight(&graph),3);

        let back = shortest_path(&graph,3,0);
        assert_eq!(back.nodes(),&[3,2,1,0]);
    }

    #[test]
    fn test_skips_exhausted_links() {
        let mut graph = graph(&[(0,1,1,1),(1,2,1,1),(0,2,5,1)]);
        graph.reserve(0,1).unwrap();
        let route = shortest_path(&graph,0,2);
        assert_eq!(route.nodes(),&[0,2]);

        graph.reserve(0,2).unwrap();
        assert!(shortest_path(&graph,0,2).is_empty());
    }

    #[test]
    fn test_unreachable_and_degenerate() {
        let graph = graph(&[(0,1,1,1),(2,3,1,1)]);
        assert!(shortest_path(&graph,0,3).is_empty());
        assert!(shortest_path(&graph,0,99).is_empty());
        let itself = shortest_path(&graph,1,1);
        assert_eq!(itself.nodes(),&[1]);
        assert!(!itself.is_established());
    }

    #[test]
    fn test_tie_keeps_first_predecessor() {
        // 0-2-3 and 0-1-3 weigh the same; node 1 is settled first so it wins
        let diamond = graph(&[(0,2,1,1),(2,3,1,1),(0,1,1,1),(1,3,1,1)]);
        for _ in 0..10 {
            assert_eq!(shortest_path(&diamond,0,3).nodes(),&[0,1,3]);
        }
        // parallel links of equal weight: the first inserted one is used
        let parallel = graph(&[(0,1,2,1),(1,0,2,1)]);
        assert_eq!(shortest_path(&parallel,0,1).links(),&[0]);
    }

    #[test]
    fn test_against_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            let nodes = rng.random_range(2..16);
            let link_count = rng.random_range(1..nodes*3);
            let links:Vec<LinkSpec> = (0..link_count).map(|_| (
                rng.random_range(0..nodes),
                rng.random_range(0..nodes),
                rng.random_range(1..20),
                rng.random_range(0..3)
            )).collect();
            let graph = graph(&links);
            let reference = reference_distances(&graph);
            let n = graph.node_count();

            for s in 0..n {
                for g in 0..n {
                    if s == g {continue}
                    let route = shortest_path(&graph,s,g);
                    match reference[s][g] {
                        None => assert!(route.is_empty(),"{s}->{g} should be unreachable"),
                        Some(d) => {
                            assert_eq!(route.source(),Some(s));
                            assert_eq!(route.destination(),Some(g));
                            assert_eq!(route.weight(&graph),d);
                            assert!(route.bottleneck(&graph).unwrap() > 0);
                            for (i,id) in route.links().iter().enumerate() {
                                let link = graph.link(*id).unwrap();
                                assert_eq!(link.opposite(route.nodes()[i]),Some(route.nodes()[i+1]));
                            }
                        }
                    }
                }
            }
        }
    }
}
