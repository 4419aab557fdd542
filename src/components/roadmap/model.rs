use super::layout::layout_elements;
use super::state::PointerRelease;
use super::types::{Direction, FlowEdge, FlowNode, Position};

/// Nodes, edges and flow direction currently shown by a diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowModel {
	pub nodes: Vec<FlowNode>,
	pub edges: Vec<FlowEdge>,
	pub direction: Direction,
}

impl FlowModel {
	/// Replace everything with a top-to-bottom layout of fresh caller input.
	pub fn replace_input(&mut self, nodes: &[FlowNode], edges: &[FlowEdge]) {
		self.apply_layout(nodes, edges, Direction::TopToBottom);
	}

	/// Lay out what is currently shown again, flowing in `direction`.
	pub fn relayout(&mut self, direction: Direction) {
		let nodes = std::mem::take(&mut self.nodes);
		let edges = std::mem::take(&mut self.edges);
		self.apply_layout(&nodes, &edges, direction);
	}

	fn apply_layout(&mut self, nodes: &[FlowNode], edges: &[FlowEdge], direction: Direction) {
		let layouted = layout_elements(nodes, edges, direction);
		self.nodes = layouted.nodes;
		self.edges = layouted.edges;
		self.direction = direction;
	}

	/// Store a dragged node's final position. Returns false for unknown ids.
	pub fn write_back(&mut self, id: &str, position: Position) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	/// Fold a pointer release into the model and hand back the clicked id.
	pub fn apply_release(&mut self, release: PointerRelease) -> Option<String> {
		if let Some((id, position)) = release.moved {
			self.write_back(&id, position);
		}
		release.clicked
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::roadmap::state::CanvasState;
	use crate::components::roadmap::types::NodeData;

	fn input() -> (Vec<FlowNode>, Vec<FlowEdge>) {
		let nodes = ["a", "b", "c"]
			.iter()
			.map(|id| FlowNode::new(*id, NodeData::label(*id)))
			.collect();
		let edges = vec![FlowEdge::new("a", "b"), FlowEdge::new("b", "c")];
		(nodes, edges)
	}

	fn position(model: &FlowModel, id: &str) -> Position {
		model
			.nodes
			.iter()
			.find(|n| n.id == id)
			.map(|n| n.position)
			.unwrap_or_else(|| panic!("{id} missing"))
	}

	#[test]
	fn new_input_is_laid_out_top_to_bottom() {
		let (nodes, edges) = input();
		let mut model = FlowModel::default();
		model.replace_input(&nodes, &edges);
		model.relayout(Direction::LeftToRight);
		assert_eq!(model.direction, Direction::LeftToRight);

		model.replace_input(&nodes, &edges);
		assert_eq!(model.direction, Direction::TopToBottom);
		assert!(position(&model, "b").y > position(&model, "a").y);
		assert_eq!(position(&model, "a").x, position(&model, "b").x);
	}

	#[test]
	fn relayout_uses_current_elements() {
		let (nodes, edges) = input();
		let mut model = FlowModel::default();
		model.replace_input(&nodes, &edges);
		model.nodes.push(FlowNode::new("d", NodeData::label("d")));
		model.edges.push(FlowEdge::new("c", "d"));

		model.relayout(Direction::LeftToRight);
		let ids: Vec<&str> = model.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["a", "b", "c", "d"]);
		assert_eq!(model.edges.len(), 3);
		assert!(position(&model, "d").x > position(&model, "c").x);
	}

	#[test]
	fn relayout_discards_dragged_positions() {
		let (nodes, edges) = input();
		let mut model = FlowModel::default();
		model.replace_input(&nodes, &edges);
		let expected = model.clone();

		assert!(model.write_back("b", Position::new(400.0, -30.0)));
		assert_eq!(position(&model, "b"), Position::new(400.0, -30.0));
		model.relayout(Direction::TopToBottom);
		assert_eq!(model, expected);
	}

	#[test]
	fn unknown_node_is_not_written_back() {
		let mut model = FlowModel::default();
		assert!(!model.write_back("ghost", Position::new(1.0, 1.0)));
	}

	#[test]
	fn release_reports_each_click_once() {
		let (nodes, edges) = input();
		let mut model = FlowModel::default();
		model.replace_input(&nodes, &edges);

		let mut canvas = CanvasState::new(800.0, 600.0);
		canvas.set_elements(model.nodes.clone(), model.edges.clone(), model.direction);
		canvas.transform.x = 0.0;
		canvas.transform.y = 0.0;
		canvas.transform.k = 1.0;

		let a = position(&model, "a");
		canvas.begin_pointer(a.x, a.y);
		let clicked = model.apply_release(canvas.end_pointer(a.x, a.y));
		assert_eq!(clicked.as_deref(), Some("a"));
		assert_eq!(model.apply_release(canvas.end_pointer(a.x, a.y)), None);
		assert_eq!(model.apply_release(canvas.cancel_pointer()), None);
	}

	#[test]
	fn drag_release_moves_node_without_click() {
		let (nodes, edges) = input();
		let mut model = FlowModel::default();
		model.replace_input(&nodes, &edges);

		let mut canvas = CanvasState::new(800.0, 600.0);
		canvas.set_elements(model.nodes.clone(), model.edges.clone(), model.direction);
		canvas.transform.x = 0.0;
		canvas.transform.y = 0.0;
		canvas.transform.k = 1.0;

		let c = position(&model, "c");
		canvas.begin_pointer(c.x, c.y);
		canvas.move_pointer(c.x + 40.0, c.y + 10.0);
		let clicked = model.apply_release(canvas.end_pointer(c.x + 40.0, c.y + 10.0));
		assert_eq!(clicked, None);
		assert_eq!(position(&model, "c"), Position::new(c.x + 40.0, c.y + 10.0));
	}
}
