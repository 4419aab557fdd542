//! Layered roadmap diagram on a canvas.

mod component;
mod controls;
mod edge_path;
mod layout;
mod model;
mod render;
mod state;
mod types;

pub use component::{CanvasError, RoadmapFlow};
pub use layout::{LayoutedElements, NODE_HEIGHT, NODE_WIDTH, layout_elements};
pub use types::{CUSTOM_NODE_KIND, Direction, FlowEdge, FlowNode, NodeData, Position};
