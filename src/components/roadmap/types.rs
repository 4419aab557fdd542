use crate::layered::RankDir;

/// Node kind rendered as a roadmap card (accent bar and subtitle).
pub const CUSTOM_NODE_KIND: &str = "custom";

/// Layout flow orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Ranks stack downward
	#[default]
	TopToBottom,
	/// Ranks stack rightward
	LeftToRight,
}

impl Direction {
	/// Button caption.
	pub fn label(self) -> &'static str {
		match self {
			Direction::TopToBottom => "Vertical",
			Direction::LeftToRight => "Horizontal",
		}
	}
}

impl From<Direction> for RankDir {
	fn from(direction: Direction) -> Self {
		match direction {
			Direction::TopToBottom => RankDir::TopBottom,
			Direction::LeftToRight => RankDir::LeftRight,
		}
	}
}

/// Position in diagram space. The canvas draws a node centered on it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate
	pub x: f64,
	/// Vertical coordinate
	pub y: f64,
}

impl Position {
	/// Create a position.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Caller-defined display payload of a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeData {
	/// Main caption
	pub label: String,
	/// Secondary line, shown on custom nodes
	pub subtitle: Option<String>,
	/// Accent color (any CSS color)
	pub color: Option<String>,
}

impl NodeData {
	/// Payload with just a label.
	pub fn label(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Default::default()
		}
	}
}

/// A diagram node.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowNode {
	/// Identity, unique within one diagram
	pub id: String,
	/// Rendering kind tag
	pub kind: String,
	/// Display payload
	pub data: NodeData,
	/// Position, overwritten by every layout pass
	pub position: Position,
}

impl FlowNode {
	/// A custom-kind node at the origin.
	pub fn new(id: impl Into<String>, data: NodeData) -> Self {
		Self {
			id: id.into(),
			kind: CUSTOM_NODE_KIND.to_owned(),
			data,
			position: Position::default(),
		}
	}

	/// Replace the rendering kind.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = kind.into();
		self
	}

	/// Whether this node renders as a roadmap card.
	pub fn is_custom(&self) -> bool {
		self.kind == CUSTOM_NODE_KIND
	}
}

/// A directed relation between two node identities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowEdge {
	/// Identity of the edge itself
	pub id: String,
	/// Source node identity
	pub source: String,
	/// Target node identity
	pub target: String,
}

impl FlowEdge {
	/// Edge `source -> target`, identified as `"{source}-{target}"`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: format!("{source}-{target}"),
			source,
			target,
		}
	}
}
