use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::Size;

#[derive(Clone, Debug)]
pub(crate) struct Vertex {
	pub id: String,
	pub size: Size,
}

/// Input graph for a single layout pass.
///
/// Build a fresh one per pass; nothing here is meant to outlive the call to
/// [`LayeredLayout::layout`](super::LayeredLayout::layout).
#[derive(Clone, Debug, Default)]
pub struct LayoutGraph {
	pub(crate) graph: DiGraph<Vertex, ()>,
	index: HashMap<String, NodeIndex>,
}

impl LayoutGraph {
	/// Create an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a node, or overwrite the size of an existing one.
	pub fn set_node(&mut self, id: &str, size: Size) {
		match self.index.get(id) {
			Some(&idx) => self.graph[idx].size = size,
			None => {
				self.insert(id, size);
			}
		}
	}

	/// Insert a directed edge. Repeated edges collapse into one.
	///
	/// Endpoints that were never passed to [`set_node`](Self::set_node) are
	/// created implicitly with a zero size.
	pub fn set_edge(&mut self, source: &str, target: &str) {
		let source = self.ensure_node(source);
		let target = self.ensure_node(target);
		self.graph.update_edge(source, target, ());
	}

	/// Whether `id` is a node of this graph.
	pub fn has_node(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Number of nodes, implicit ones included.
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	/// Number of distinct edges.
	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	fn ensure_node(&mut self, id: &str) -> NodeIndex {
		match self.index.get(id) {
			Some(&idx) => idx,
			None => self.insert(id, Size::ZERO),
		}
	}

	fn insert(&mut self, id: &str, size: Size) -> NodeIndex {
		let idx = self.graph.add_node(Vertex {
			id: id.to_owned(),
			size,
		});
		self.index.insert(id.to_owned(), idx);
		idx
	}
}
