use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

/// Assign ranks to nodes of an acyclic edge set.
///
/// Uses a two-pass approach to keep edges short:
/// - Forward: each node sits one rank after its deepest predecessor
/// - Backward: nodes are pulled down toward their nearest successor
///
/// Ranks are normalized so the smallest is 0.
pub(crate) fn assign_ranks(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
	let mut dag: DiGraph<(), ()> = DiGraph::with_capacity(node_count, edges.len());
	for _ in 0..node_count {
		dag.add_node(());
	}
	for &(source, target) in edges {
		dag.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
	}

	// Edges come from `forward_edges`, so a cycle cannot show up here.
	let order = toposort(&dag, None).unwrap_or_else(|_| dag.node_indices().collect());
	let mut rank = vec![0usize; node_count];

	for &node in &order {
		let r = dag
			.neighbors_directed(node, Direction::Incoming)
			.map(|pred| rank[pred.index()] + 1)
			.max()
			.unwrap_or(0);
		rank[node.index()] = r;
	}

	for &node in order.iter().rev() {
		let current = rank[node.index()];
		let nearest = dag
			.neighbors_directed(node, Direction::Outgoing)
			.map(|succ| rank[succ.index()])
			.min();
		if let Some(nearest) = nearest {
			if nearest > current + 1 {
				rank[node.index()] = nearest - 1;
			}
		}
	}

	let min = rank.iter().copied().min().unwrap_or(0);
	rank.iter_mut().for_each(|r| *r -= min);
	rank
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn chain_gets_consecutive_ranks() {
		assert_eq!(assign_ranks(3, &[(0, 1), (1, 2)]), vec![0, 1, 2]);
	}

	#[test]
	fn longest_path_wins() {
		// 0 -> 1 -> 2 and 0 -> 2
		assert_eq!(assign_ranks(3, &[(0, 1), (1, 2), (0, 2)]), vec![0, 1, 2]);
	}

	#[test]
	fn late_source_is_pulled_toward_successor() {
		// 0 -> 1 -> 2 -> 3 and 4 -> 3
		let ranks = assign_ranks(5, &[(0, 1), (1, 2), (2, 3), (4, 3)]);
		assert_eq!(ranks, vec![0, 1, 2, 3, 2]);
	}

	#[test]
	fn isolated_nodes_sit_on_rank_zero() {
		assert_eq!(assign_ranks(2, &[]), vec![0, 0]);
	}

	#[test]
	fn every_edge_points_down() {
		let edges = [(0, 3), (1, 3), (3, 4), (2, 4), (0, 1)];
		let ranks = assign_ranks(5, &edges);
		for (s, t) in edges {
			assert!(ranks[t] > ranks[s], "edge {s}->{t} ranks {ranks:?}");
		}
	}
}
