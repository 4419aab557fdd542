use std::collections::HashSet;

use petgraph::graph::DiGraph;
use petgraph::visit::{DfsEvent, EdgeRef, depth_first_search};

/// Edge list of `graph` with every DFS back edge reversed and self-loops
/// dropped, which leaves an acyclic edge set over the same node indices.
pub(crate) fn forward_edges<N>(graph: &DiGraph<N, ()>) -> Vec<(usize, usize)> {
	let mut back = HashSet::new();
	depth_first_search(graph, graph.node_indices(), |event| {
		if let DfsEvent::BackEdge(u, v) = event {
			back.insert((u, v));
		}
	});

	graph
		.edge_references()
		.filter(|edge| edge.source() != edge.target())
		.map(|edge| {
			let (source, target) = (edge.source(), edge.target());
			if back.contains(&(source, target)) {
				(target.index(), source.index())
			} else {
				(source.index(), target.index())
			}
		})
		.collect()
}
