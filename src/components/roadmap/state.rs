use super::layout::{NODE_HEIGHT, NODE_WIDTH};
use super::types::{Direction, FlowEdge, FlowNode, Position};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
/// Zoom factor of one zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;
/// Fraction of the diagram extent kept free around it by fit view.
pub const FIT_PADDING: f64 = 0.1;
/// Pointer travel (screen pixels) below which a press still counts as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Viewport requests coming from the controls overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportCommand {
	/// Zoom in one step about the canvas center
	ZoomIn,
	/// Zoom out one step about the canvas center
	ZoomOut,
	/// Fit every node into the canvas
	FitView,
}

/// Outcome of releasing the pointer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerRelease {
	/// Node that was clicked
	pub clicked: Option<String>,
	/// Node that was dragged, with its final position
	pub moved: Option<(String, Position)>,
}

/// Everything the canvas needs to draw and interact with one diagram.
pub struct CanvasState {
	pub nodes: Vec<FlowNode>,
	pub edges: Vec<FlowEdge>,
	pub direction: Direction,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<usize>,
	pub selected: Option<String>,
	/// When false nodes cannot be dragged; clicks still go through.
	pub interactive: bool,
	pub width: f64,
	pub height: f64,
	/// Set whenever the next frame has to be redrawn.
	pub dirty: bool,
	fitted: bool,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			direction: Direction::default(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			selected: None,
			interactive: true,
			width,
			height,
			dirty: true,
			fitted: false,
		}
	}

	/// Replace the drawn elements. The first non-empty node set also fits
	/// the view.
	pub fn set_elements(&mut self, nodes: Vec<FlowNode>, edges: Vec<FlowEdge>, direction: Direction) {
		self.nodes = nodes;
		self.edges = edges;
		self.direction = direction;
		self.drag = DragState::default();
		self.hovered = None;
		if let Some(id) = &self.selected {
			if !self.nodes.iter().any(|n| &n.id == id) {
				self.selected = None;
			}
		}
		if !self.fitted && !self.nodes.is_empty() {
			self.fit_view();
			self.fitted = true;
		}
		self.dirty = true;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose box contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes.iter().rposition(|node| {
			(node.position.x - gx).abs() <= NODE_WIDTH / 2.0
				&& (node.position.y - gy).abs() <= NODE_HEIGHT / 2.0
		})
	}

	/// Point where edges leave `node`.
	pub fn source_handle(&self, node: &FlowNode) -> (f64, f64) {
		let Position { x, y } = node.position;
		match self.direction {
			Direction::TopToBottom => (x, y + NODE_HEIGHT / 2.0),
			Direction::LeftToRight => (x + NODE_WIDTH / 2.0, y),
		}
	}

	/// Point where edges enter `node`.
	pub fn target_handle(&self, node: &FlowNode) -> (f64, f64) {
		let Position { x, y } = node.position;
		match self.direction {
			Direction::TopToBottom => (x, y - NODE_HEIGHT / 2.0),
			Direction::LeftToRight => (x - NODE_WIDTH / 2.0, y),
		}
	}

	/// Bounding box of all node boxes as `(min_x, min_y, max_x, max_y)`.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		if self.nodes.is_empty() {
			return None;
		}
		Some(self.nodes.iter().fold(
			(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
			|(x0, y0, x1, y1), node| {
				let Position { x, y } = node.position;
				(
					x0.min(x - NODE_WIDTH / 2.0),
					y0.min(y - NODE_HEIGHT / 2.0),
					x1.max(x + NODE_WIDTH / 2.0),
					y1.max(y + NODE_HEIGHT / 2.0),
				)
			},
		))
	}

	pub fn fit_view(&mut self) {
		let Some((x0, y0, x1, y1)) = self.bounds() else {
			return;
		};
		let (bw, bh) = (x1 - x0, y1 - y0);
		let k = (self.width / (bw * (1.0 + FIT_PADDING)))
			.min(self.height / (bh * (1.0 + FIT_PADDING)))
			.clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
		self.dirty = true;
	}

	/// Scale by `factor` keeping the screen point (sx, sy) fixed.
	pub fn zoom_by(&mut self, factor: f64, sx: f64, sy: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.dirty = true;
	}

	pub fn apply(&mut self, command: ViewportCommand) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		match command {
			ViewportCommand::ZoomIn => self.zoom_by(ZOOM_STEP, cx, cy),
			ViewportCommand::ZoomOut => self.zoom_by(1.0 / ZOOM_STEP, cx, cy),
			ViewportCommand::FitView => self.fit_view(),
		}
	}

	pub fn begin_pointer(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start: self.nodes[idx].position,
				moved: false,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			if self.selected.take().is_some() {
				self.dirty = true;
			}
		}
	}

	pub fn move_pointer(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node_idx {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && dx.hypot(dy) < CLICK_TOLERANCE {
				return;
			}
			self.drag.moved = true;
			if !self.interactive {
				return;
			}
			let k = self.transform.k;
			let start = self.drag.node_start;
			if let Some(node) = self.nodes.get_mut(idx) {
				node.position = Position::new(start.x + dx / k, start.y + dy / k);
				self.dirty = true;
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
			self.dirty = true;
		} else {
			let hovered = self.node_at_position(x, y);
			if hovered != self.hovered {
				self.hovered = hovered;
				self.dirty = true;
			}
		}
	}

	pub fn end_pointer(&mut self, x: f64, y: f64) -> PointerRelease {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;

		let Some(idx) = drag.node_idx else {
			return PointerRelease::default();
		};
		let Some(node) = self.nodes.get(idx) else {
			return PointerRelease::default();
		};

		if drag.moved {
			return PointerRelease {
				clicked: None,
				moved: self
					.interactive
					.then(|| (node.id.clone(), node.position)),
			};
		}
		if self.node_at_position(x, y) != Some(idx) {
			return PointerRelease::default();
		}

		let id = node.id.clone();
		self.selected = Some(id.clone());
		self.dirty = true;
		PointerRelease {
			clicked: Some(id),
			moved: None,
		}
	}

	/// End any press in progress when the pointer leaves the canvas. A drag
	/// keeps the ground it covered; leaving never counts as a click.
	pub fn cancel_pointer(&mut self) -> PointerRelease {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		if self.hovered.take().is_some() {
			self.dirty = true;
		}

		let moved = drag
			.node_idx
			.filter(|_| drag.moved && self.interactive)
			.and_then(|idx| self.nodes.get(idx))
			.map(|node| (node.id.clone(), node.position));
		PointerRelease {
			clicked: None,
			moved,
		}
	}

	/// CSS cursor matching the current interaction.
	pub fn cursor(&self) -> &'static str {
		if self.pan.active || (self.drag.moved && self.interactive) {
			"grabbing"
		} else if self.hovered.is_some() || self.drag.node_idx.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	pub fn is_selected(&self, node: &FlowNode) -> bool {
		self.selected.as_deref() == Some(node.id.as_str())
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.dirty = true;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::roadmap::types::NodeData;

	fn node_at(id: &str, x: f64, y: f64) -> FlowNode {
		let mut node = FlowNode::new(id, NodeData::label(id));
		node.position = Position::new(x, y);
		node
	}

	/// 800x600 canvas with identity transform and two nodes.
	fn state() -> CanvasState {
		let mut state = CanvasState::new(800.0, 600.0);
		state.nodes = vec![node_at("a", 100.0, 100.0), node_at("b", 100.0, 200.0)];
		state.edges = vec![FlowEdge::new("a", "b")];
		state
	}

	#[test]
	fn hit_test_uses_centered_boxes() {
		let s = state();
		assert_eq!(s.node_at_position(100.0, 100.0), Some(0));
		assert_eq!(s.node_at_position(180.0, 115.0), Some(0));
		assert_eq!(s.node_at_position(190.0, 100.0), None);
		assert_eq!(s.node_at_position(100.0, 200.0), Some(1));
	}

	#[test]
	fn topmost_node_wins() {
		let mut s = state();
		s.nodes.push(node_at("c", 110.0, 100.0));
		assert_eq!(s.node_at_position(105.0, 100.0), Some(2));
	}

	#[test]
	fn click_reports_node_once() {
		let mut s = state();
		s.begin_pointer(100.0, 100.0);
		s.move_pointer(101.0, 101.0);
		let release = s.end_pointer(101.0, 101.0);
		assert_eq!(release.clicked.as_deref(), Some("a"));
		assert_eq!(release.moved, None);
		assert_eq!(s.selected.as_deref(), Some("a"));

		// a second release without a press reports nothing
		assert_eq!(s.end_pointer(101.0, 101.0), PointerRelease::default());
	}

	#[test]
	fn drag_moves_node_instead_of_clicking() {
		let mut s = state();
		s.transform.k = 2.0;
		s.transform.x = 0.0;
		s.transform.y = 0.0;
		// node a is now at screen (200, 200)
		s.begin_pointer(200.0, 200.0);
		s.move_pointer(220.0, 240.0);
		let release = s.end_pointer(220.0, 240.0);
		assert_eq!(release.clicked, None);
		assert_eq!(
			release.moved,
			Some(("a".to_owned(), Position::new(110.0, 120.0)))
		);
		assert_eq!(s.nodes[0].position, Position::new(110.0, 120.0));
	}

	#[test]
	fn locked_canvas_keeps_nodes_in_place() {
		let mut s = state();
		s.interactive = false;
		s.begin_pointer(100.0, 100.0);
		s.move_pointer(150.0, 150.0);
		let release = s.end_pointer(150.0, 150.0);
		assert_eq!(release, PointerRelease::default());
		assert_eq!(s.nodes[0].position, Position::new(100.0, 100.0));

		s.begin_pointer(100.0, 100.0);
		assert_eq!(s.end_pointer(100.0, 100.0).clicked.as_deref(), Some("a"));
	}

	#[test]
	fn leaving_mid_drag_reports_the_move() {
		let mut s = state();
		s.begin_pointer(100.0, 100.0);
		s.move_pointer(200.0, 180.0);
		let release = s.cancel_pointer();
		assert_eq!(
			release.moved,
			Some(("a".to_owned(), Position::new(200.0, 180.0)))
		);
		assert_eq!(release.clicked, None);
		assert_eq!(s.drag.node_idx, None);
		assert_eq!(s.cancel_pointer(), PointerRelease::default());
	}

	#[test]
	fn leaving_after_a_press_is_not_a_click() {
		let mut s = state();
		s.begin_pointer(100.0, 100.0);
		assert_eq!(s.cancel_pointer(), PointerRelease::default());
		assert_eq!(s.selected, None);
	}

	#[test]
	fn releasing_elsewhere_is_not_a_click() {
		let mut s = state();
		s.begin_pointer(100.0, 100.0);
		assert_eq!(s.end_pointer(400.0, 400.0), PointerRelease::default());
		assert_eq!(s.selected, None);
	}

	#[test]
	fn pane_press_pans_and_clears_selection() {
		let mut s = state();
		s.selected = Some("a".into());
		s.begin_pointer(500.0, 500.0);
		assert_eq!(s.selected, None);
		s.move_pointer(530.0, 480.0);
		assert_eq!((s.transform.x, s.transform.y), (30.0, -20.0));
		s.end_pointer(530.0, 480.0);
		assert!(!s.pan.active);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..20 {
			s.apply(ViewportCommand::ZoomIn);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..20 {
			s.apply(ViewportCommand::ZoomOut);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut s = state();
		let before = s.screen_to_graph(300.0, 250.0);
		s.zoom_by(1.5, 300.0, 250.0);
		let after = s.screen_to_graph(300.0, 250.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn fit_view_shows_every_node() {
		let mut s = state();
		s.nodes.push(node_at("far", 1500.0, 900.0));
		s.fit_view();
		let (x0, y0, x1, y1) = s.bounds().unwrap_or_default();
		let k = s.transform.k;
		for (gx, gy) in [(x0, y0), (x1, y1)] {
			let (sx, sy) = (gx * k + s.transform.x, gy * k + s.transform.y);
			assert!((0.0..=s.width).contains(&sx), "x {sx}");
			assert!((0.0..=s.height).contains(&sy), "y {sy}");
		}
	}

	#[test]
	fn first_elements_fit_once() {
		let mut s = CanvasState::new(800.0, 600.0);
		s.set_elements(vec![node_at("a", 0.0, 0.0)], Vec::new(), Direction::TopToBottom);
		assert_eq!((s.transform.x, s.transform.y), (400.0, 300.0));

		s.transform.x = 10.0;
		s.set_elements(vec![node_at("a", 50.0, 50.0)], Vec::new(), Direction::LeftToRight);
		assert_eq!(s.transform.x, 10.0);
		assert_eq!(s.direction, Direction::LeftToRight);
	}

	#[test]
	fn replacing_elements_drops_stale_selection() {
		let mut s = state();
		s.selected = Some("a".into());
		s.set_elements(vec![node_at("b", 0.0, 0.0)], Vec::new(), Direction::TopToBottom);
		assert_eq!(s.selected, None);
	}

	#[test]
	fn cursor_tracks_interaction() {
		let mut s = state();
		assert_eq!(s.cursor(), "grab");
		s.move_pointer(100.0, 100.0);
		assert_eq!(s.cursor(), "pointer");
		s.begin_pointer(100.0, 100.0);
		s.move_pointer(140.0, 100.0);
		assert_eq!(s.cursor(), "grabbing");
		s.end_pointer(140.0, 100.0);
		s.begin_pointer(600.0, 500.0);
		assert_eq!(s.cursor(), "grabbing");
	}

	#[test]
	fn handles_follow_direction() {
		let mut s = state();
		let a = node_at("a", 100.0, 100.0);
		assert_eq!(s.source_handle(&a), (100.0, 120.0));
		assert_eq!(s.target_handle(&a), (100.0, 80.0));
		s.direction = Direction::LeftToRight;
		assert_eq!(s.source_handle(&a), (185.0, 100.0));
		assert_eq!(s.target_handle(&a), (15.0, 100.0));
	}
}
