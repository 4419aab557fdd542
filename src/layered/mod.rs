//! Layered (Sugiyama-style) placement for directed graphs.
//!
//! Phases, in order:
//! 1. Break cycles by reversing DFS back edges
//! 2. Assign ranks (longest path, then tightened toward successors)
//! 3. Split edges spanning several ranks with dummy nodes
//! 4. Order nodes within ranks (barycenter sweeps)
//! 5. Assign coordinates and translate the drawing to the origin
//!
//! Everything is computed from a [`LayoutGraph`] built for the call; the
//! engine keeps no state between passes.

mod acyclic;
mod graph;
mod layers;
mod order;
mod position;
mod rank;

use std::collections::HashMap;

pub use graph::LayoutGraph;

use layers::Layers;

/// Width and height of a node box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	/// Horizontal extent
	pub width: f64,
	/// Vertical extent
	pub height: f64,
}

impl Size {
	/// A zero-sized box.
	pub const ZERO: Size = Size::new(0.0, 0.0);

	/// Create a size.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	fn transposed(self) -> Self {
		Self::new(self.height, self.width)
	}
}

/// Node center produced by a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate
	pub x: f64,
	/// Vertical coordinate
	pub y: f64,
}

impl Point {
	/// Create a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Flow direction of the ranks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RankDir {
	/// Ranks stack downward
	#[default]
	TopBottom,
	/// Ranks stack rightward
	LeftRight,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Spacing {
	pub node_sep: f64,
	pub edge_sep: f64,
	pub rank_sep: f64,
}

/// Configuration for the layered layout.
#[derive(Clone, Debug)]
pub struct LayeredLayout {
	/// Direction ranks flow in
	pub rank_dir: RankDir,
	/// Gap between neighboring nodes of one rank
	pub node_sep: f64,
	/// Gap reserved around edges passing through a rank
	pub edge_sep: f64,
	/// Gap between consecutive ranks
	pub rank_sep: f64,
	/// Upper bound on crossing-minimization sweeps
	pub max_order_sweeps: usize,
	/// Upper bound on coordinate-alignment sweeps
	pub max_position_iterations: usize,
}

impl Default for LayeredLayout {
	fn default() -> Self {
		Self {
			rank_dir: RankDir::TopBottom,
			node_sep: 50.0,
			edge_sep: 10.0,
			rank_sep: 50.0,
			max_order_sweeps: 24,
			max_position_iterations: 8,
		}
	}
}

/// Result of a layout pass: one center point per graph node.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	positions: HashMap<String, Point>,
	/// Width of the whole drawing
	pub width: f64,
	/// Height of the whole drawing
	pub height: f64,
	/// Edge crossings left after ordering
	pub crossings: usize,
}

impl Layout {
	/// Center of node `id`, if it was part of the graph.
	pub fn position(&self, id: &str) -> Option<Point> {
		self.positions.get(id).copied()
	}

	/// Number of positioned nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether the layout has no nodes.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}
}

impl LayeredLayout {
	/// Create a layered layout flowing in `rank_dir` with default spacing.
	pub fn new(rank_dir: RankDir) -> Self {
		Self {
			rank_dir,
			..Default::default()
		}
	}

	/// Compute node centers for `input`.
	///
	/// Never fails: cycles are broken, self-loops ignored and implicit nodes
	/// placed like any other.
	pub fn layout(&self, input: &LayoutGraph) -> Layout {
		let graph = &input.graph;
		if graph.node_count() == 0 {
			return Layout::default();
		}

		let horizontal = self.rank_dir == RankDir::LeftRight;
		let sizes: Vec<Size> = graph
			.node_indices()
			.map(|idx| graph[idx].size)
			.map(|size| if horizontal { size.transposed() } else { size })
			.collect();

		let edges = acyclic::forward_edges(graph);
		let ranks = rank::assign_ranks(sizes.len(), &edges);
		let mut layers = Layers::build(&sizes, &ranks, &edges);
		let crossings = order::minimize_crossings(&mut layers, self.max_order_sweeps);
		let spacing = Spacing {
			node_sep: self.node_sep,
			edge_sep: self.edge_sep,
			rank_sep: self.rank_sep,
		};
		let mut points = position::assign_coordinates(&layers, &spacing, self.max_position_iterations);
		points.truncate(layers.real_count);

		// Translate so the drawing's top-left corner sits at the origin.
		let (min_x, min_y) = points
			.iter()
			.zip(&sizes)
			.fold((f64::INFINITY, f64::INFINITY), |(mx, my), (p, s)| {
				(mx.min(p.x - s.width / 2.0), my.min(p.y - s.height / 2.0))
			});
		let (mut width, mut height) = (0.0f64, 0.0f64);
		for (p, s) in points.iter_mut().zip(&sizes) {
			p.x -= min_x;
			p.y -= min_y;
			width = width.max(p.x + s.width / 2.0);
			height = height.max(p.y + s.height / 2.0);
		}

		if horizontal {
			for p in &mut points {
				*p = Point::new(p.y, p.x);
			}
			std::mem::swap(&mut width, &mut height);
		}

		let positions = graph
			.node_indices()
			.zip(points)
			.map(|(idx, p)| (graph[idx].id.clone(), p))
			.collect();

		Layout {
			positions,
			width,
			height,
			crossings,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BOX: Size = Size::new(170.0, 40.0);

	fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> LayoutGraph {
		let mut graph = LayoutGraph::new();
		for id in nodes {
			graph.set_node(id, BOX);
		}
		for (s, t) in edges {
			graph.set_edge(s, t);
		}
		graph
	}

	fn pos(layout: &Layout, id: &str) -> Point {
		layout.position(id).unwrap_or_else(|| panic!("{id} not laid out"))
	}

	#[test]
	fn empty_graph() {
		let layout = LayeredLayout::default().layout(&LayoutGraph::new());
		assert!(layout.is_empty());
		assert_eq!(layout.width, 0.0);
	}

	#[test]
	fn chain_flows_down() {
		let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
		let layout = LayeredLayout::default().layout(&g);
		assert_eq!(pos(&layout, "a"), Point::new(85.0, 20.0));
		assert_eq!(pos(&layout, "b"), Point::new(85.0, 110.0));
		assert_eq!(pos(&layout, "c"), Point::new(85.0, 200.0));
		assert_eq!(layout.width, 170.0);
		assert_eq!(layout.height, 220.0);
	}

	#[test]
	fn chain_flows_right() {
		let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
		let layout = LayeredLayout::new(RankDir::LeftRight).layout(&g);
		assert_eq!(pos(&layout, "a"), Point::new(85.0, 20.0));
		assert_eq!(pos(&layout, "b"), Point::new(305.0, 20.0));
		assert_eq!(pos(&layout, "c"), Point::new(525.0, 20.0));
		assert_eq!(layout.width, 610.0);
		assert_eq!(layout.height, 40.0);
	}

	#[test]
	fn cycle_still_lays_out() {
		let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
		let layout = LayeredLayout::default().layout(&g);
		assert_eq!(layout.len(), 3);
		assert!(pos(&layout, "a").y < pos(&layout, "b").y);
		assert!(pos(&layout, "b").y < pos(&layout, "c").y);
	}

	#[test]
	fn deterministic() {
		let g = graph(
			&["a", "b", "c", "d", "e"],
			&[("a", "c"), ("b", "c"), ("a", "d"), ("c", "e"), ("d", "e"), ("b", "e")],
		);
		let engine = LayeredLayout::default();
		let first = engine.layout(&g);
		let second = engine.layout(&g);
		for id in ["a", "b", "c", "d", "e"] {
			assert_eq!(pos(&first, id), pos(&second, id));
		}
	}

	#[test]
	fn no_overlap_in_diamond() {
		let ids = ["root", "l", "m", "r", "sink"];
		let g = graph(
			&ids,
			&[
				("root", "l"),
				("root", "m"),
				("root", "r"),
				("l", "sink"),
				("m", "sink"),
				("r", "sink"),
			],
		);
		let layout = LayeredLayout::default().layout(&g);
		for (i, a) in ids.iter().enumerate() {
			for b in &ids[i + 1..] {
				let (pa, pb) = (pos(&layout, a), pos(&layout, b));
				let apart = (pa.x - pb.x).abs() >= BOX.width || (pa.y - pb.y).abs() >= BOX.height;
				assert!(apart, "{a} overlaps {b}");
			}
		}
	}

	#[test]
	fn implicit_node_is_positioned() {
		let mut g = graph(&["a"], &[]);
		g.set_edge("a", "ghost");
		let layout = LayeredLayout::default().layout(&g);
		assert_eq!(layout.len(), 2);
		assert!(pos(&layout, "ghost").y > pos(&layout, "a").y);
	}
}
