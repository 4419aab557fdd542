use log::{debug, warn};

use super::types::{Direction, FlowEdge, FlowNode, Position};
use crate::layered::{LayeredLayout, LayoutGraph, Size};

/// Width of the fixed node footprint handed to the layout engine.
pub const NODE_WIDTH: f64 = 170.0;
/// Height of the fixed node footprint.
pub const NODE_HEIGHT: f64 = 40.0;

/// Nodes and edges after a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutedElements {
	/// Input nodes with fresh positions, in input order
	pub nodes: Vec<FlowNode>,
	/// Input edges, unchanged
	pub edges: Vec<FlowEdge>,
}

/// Lay out `nodes` and `edges` flowing in `direction`.
///
/// Every output node is its input node with the position replaced; prior
/// positions are ignored. Edges are returned as given. Edges naming unknown
/// nodes are tolerated but their placement is unspecified.
pub fn layout_elements(
	nodes: &[FlowNode],
	edges: &[FlowEdge],
	direction: Direction,
) -> LayoutedElements {
	let mut graph = LayoutGraph::new();
	for node in nodes {
		graph.set_node(&node.id, Size::new(NODE_WIDTH, NODE_HEIGHT));
	}
	for edge in edges {
		if !graph.has_node(&edge.source) || !graph.has_node(&edge.target) {
			warn!(
				"edge {} references a missing node ({} -> {})",
				edge.id, edge.source, edge.target
			);
		}
		graph.set_edge(&edge.source, &edge.target);
	}

	let layout = LayeredLayout::new(direction.into()).layout(&graph);
	debug!(
		"layout pass {:?}: {} nodes, {} edges, {} crossings, {}x{}",
		direction,
		nodes.len(),
		edges.len(),
		layout.crossings,
		layout.width,
		layout.height
	);

	let nodes = nodes
		.iter()
		.map(|node| {
			let mut node = node.clone();
			if let Some(center) = layout.position(&node.id) {
				node.position = Position::new(
					center.x - NODE_WIDTH / 2.0,
					center.y - NODE_HEIGHT / 2.0,
				);
			}
			node
		})
		.collect();

	LayoutedElements {
		nodes,
		edges: edges.to_vec(),
	}
}
