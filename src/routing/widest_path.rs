use super::Route;
use super::shortest_path::shortest_path_filtered;
use crate::dsa::disjoint_set::DisjointSet;
use crate::dsa::graph::{CapacitatedGraph, LinkId, NodeId};

/// Route from `source` to `target` maximising the smallest residual capacity
/// among its links. Among routes with that bottleneck the minimum-weight one
/// inside the spanning prefix is returned.
pub fn widest_path(graph:&CapacitatedGraph,source:NodeId,target:NodeId) -> Route {
    if !graph.contains_node(source) || !graph.contains_node(target) {
        return Route::empty();
    }
    if source == target {
        return Route::single(source);
    }

    let links = graph.links();
    // widest first, stable so equal capacities keep insertion order
    let mut order:Vec<LinkId> = (0..links.len()).collect();
    order.sort_by(|a,b| links[*b].capacity().cmp(&links[*a].capacity()));

    let mut components = DisjointSet::new(graph.node_count());
    debug_assert_eq!(components.len(),graph.node_count());
    let mut admitted = vec![false;links.len()];
    let mut connected = false;
    for id in order {
        let (a,b) = links[id].endpoints();
        components.unite(a,b);
        admitted[id] = true;
        if components.same(source,target) {
            connected = true;
            break;
        }
    }
    if !connected {
        return Route::empty();
    }

    shortest_path_filtered(graph, source, target, |id| admitted[id])
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    use super::widest_path;
    use crate::dsa::graph::{CapacitatedGraph, Capacity, LinkSpec, NodeId};
    use crate::routing::shortest_path::shortest_path;

    fn graph(links:&[LinkSpec]) -> CapacitatedGraph {
        CapacitatedGraph::from(links)
    }

    // best bottleneck over every simple path, by exhaustive search
    fn brute_force_bottleneck(graph:&CapacitatedGraph,source:NodeId,target:NodeId) -> Option<Capacity> {
        fn walk(graph:&CapacitatedGraph,node:NodeId,target:NodeId,seen:&mut Vec<bool>,narrowest:Capacity,best:&mut Option<Capacity>) {
            if node == target {
                if best.is_none_or(|b| narrowest > b) {
                    *best = Some(narrowest);
                }
                return;
            }
            for edge in graph.neighbours(node) {
                if seen[edge.to] {continue}
                let capacity = graph.link(edge.link).unwrap().capacity();
                seen[edge.to] = true;
                walk(graph,edge.to,target,seen,narrowest.min(capacity),best);
                seen[edge.to] = false;
            }
        }
        let mut seen = vec![false;graph.node_count()];
        seen[source] = true;
        let mut best = None;
        walk(graph,source,target,&mut seen,Capacity::MAX,&mut best);
        best
    }

    #[test]
    fn test_prefers_wide_detour() {
        // direct link is short but narrow, the detour is long and wide
        let graph = graph(&[(0,3,1,1),(0,1,5,10),(1,2,5,8),(2,3,5,9)]);
        assert_eq!(shortest_path(&graph,0,3).nodes(),&[0,3]);
        let route = widest_path(&graph,0,3);
        assert_eq!(route.nodes(),&[0,1,2,3]);
        assert_eq!(route.bottleneck(&graph),Some(8));
    }

    #[test]
    fn test_shortest_among_equally_wide() {
        let graph = graph(&[(0,1,1,5),(1,2,1,5),(0,2,9,5),(2,3,1,1)]);
        let route = widest_path(&graph,0,2);
        assert_eq!(route.nodes(),&[0,1,2]);
    }

    #[test]
    fn test_exhausted_and_disconnected() {
        let mut graph = graph(&[(0,1,1,1),(2,3,1,4)]);
        assert!(widest_path(&graph,0,3).is_empty());
        assert_eq!(widest_path(&graph,1,0).nodes(),&[1,0]);
        graph.reserve(0,1).unwrap();
        assert!(widest_path(&graph,0,1).is_empty());
        assert!(widest_path(&graph,0,42).is_empty());
        assert_eq!(widest_path(&graph,2,2).nodes(),&[2]);
    }

    #[test]
    fn test_bottleneck_is_optimal() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..40 {
            let nodes = rng.random_range(2..9);
            let link_count = rng.random_range(1..nodes*2);
            let links:Vec<LinkSpec> = (0..link_count).map(|_| (
                rng.random_range(0..nodes),
                rng.random_range(0..nodes),
                rng.random_range(1..10),
                rng.random_range(0..6)
            )).collect();
            let graph = graph(&links);
            let n = graph.node_count();

            for s in 0..n {
                for g in 0..n {
                    if s == g {continue}
                    let route = widest_path(&graph,s,g);
                    match brute_force_bottleneck(&graph,s,g) {
                        Some(best) if best > 0 => {
                            assert_eq!(route.source(),Some(s));
                            assert_eq!(route.destination(),Some(g));
                            assert_eq!(route.bottleneck(&graph),Some(best),"{s}->{g} is not the widest");
                        }
                        _ => assert!(route.is_empty(),"{s}->{g} has no usable route"),
                    }
                }
            }
        }
    }
}
