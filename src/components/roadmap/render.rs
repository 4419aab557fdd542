use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::edge_path::{CORNER_RADIUS, corner_radius, step_path};
use super::layout::{NODE_HEIGHT, NODE_WIDTH};
use super::state::CanvasState;
use super::types::FlowNode;

const BACKGROUND: &str = "#ffffff";
const DOT_COLOR: &str = "#91919a";
const DOT_GAP: f64 = 20.0;
const EDGE_COLOR: &str = "#334155";
const EDGE_WIDTH: f64 = 2.0;
const NODE_FILL: &str = "#ffffff";
const NODE_BORDER: &str = "#1a192b";
const HOVER_BORDER: &str = "#64748b";
const SELECTED_BORDER: &str = "#3b82f6";
const DEFAULT_ACCENT: &str = "#3b82f6";
const LABEL_COLOR: &str = "#0f172a";
const SUBTITLE_COLOR: &str = "#64748b";
const NODE_RADIUS: f64 = 6.0;
const ACCENT_WIDTH: f64 = 5.0;
const TEXT_PADDING: f64 = 10.0;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_dots(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_dots(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let gap = DOT_GAP * k;
	if gap < 4.0 {
		return;
	}
	let size = k.max(0.5);
	let (ox, oy) = (
		state.transform.x.rem_euclid(gap),
		state.transform.y.rem_euclid(gap),
	);
	ctx.set_fill_style_str(DOT_COLOR);
	let mut x = ox;
	while x < state.width {
		let mut y = oy;
		while y < state.height {
			ctx.fill_rect(x - size / 2.0, y - size / 2.0, size, size);
			y += gap;
		}
		x += gap;
	}
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let by_id: HashMap<&str, &FlowNode> = state
		.nodes
		.iter()
		.map(|node| (node.id.as_str(), node))
		.collect();

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(EDGE_WIDTH);
	for edge in &state.edges {
		let (Some(source), Some(target)) = (
			by_id.get(edge.source.as_str()),
			by_id.get(edge.target.as_str()),
		) else {
			continue;
		};
		let path = step_path(
			state.source_handle(source),
			state.target_handle(target),
			state.direction,
		);
		let Some((&first, rest)) = path.split_first() else {
			continue;
		};

		ctx.begin_path();
		ctx.move_to(first.0, first.1);
		for (i, point) in rest.iter().enumerate() {
			match rest.get(i + 1) {
				Some(next) => {
					let prev = if i == 0 { first } else { rest[i - 1] };
					let r = corner_radius(prev, *point, *next, CORNER_RADIUS);
					let _ = ctx.arc_to(point.0, point.1, next.0, next.1, r);
				}
				None => ctx.line_to(point.0, point.1),
			}
		}
		ctx.stroke();
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	for (idx, node) in state.nodes.iter().enumerate() {
		let (x, y) = (
			node.position.x - NODE_WIDTH / 2.0,
			node.position.y - NODE_HEIGHT / 2.0,
		);
		let selected = state.is_selected(node);
		let hovered = state.hovered == Some(idx);

		rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, NODE_RADIUS);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();

		if node.is_custom() {
			ctx.save();
			ctx.clip();
			ctx.set_fill_style_str(node.data.color.as_deref().unwrap_or(DEFAULT_ACCENT));
			ctx.fill_rect(x, y, ACCENT_WIDTH, NODE_HEIGHT);
			ctx.restore();
		}

		let (border, width) = if selected {
			(SELECTED_BORDER, 2.0)
		} else if hovered {
			(HOVER_BORDER, 1.5)
		} else {
			(NODE_BORDER, 1.0)
		};
		rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, NODE_RADIUS);
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(width);
		ctx.stroke();

		if selected {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(4.0),
				&JsValue::from_f64(3.0),
			));
			rounded_rect(
				ctx,
				x - 4.0,
				y - 4.0,
				NODE_WIDTH + 8.0,
				NODE_HEIGHT + 8.0,
				NODE_RADIUS + 4.0,
			);
			ctx.set_line_width(1.0);
			ctx.stroke();
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		draw_label(ctx, node);
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, node: &FlowNode) {
	let (cx, cy) = (node.position.x, node.position.y);
	let max_width = NODE_WIDTH - 2.0 * TEXT_PADDING;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	match node.data.subtitle.as_deref().filter(|_| node.is_custom()) {
		Some(subtitle) => {
			ctx.set_font("600 12px sans-serif");
			ctx.set_fill_style_str(LABEL_COLOR);
			let label = fit_text(ctx, &node.data.label, max_width);
			let _ = ctx.fill_text(&label, cx, cy - 7.0);

			ctx.set_font("10px sans-serif");
			ctx.set_fill_style_str(SUBTITLE_COLOR);
			let subtitle = fit_text(ctx, subtitle, max_width);
			let _ = ctx.fill_text(&subtitle, cx, cy + 8.0);
		}
		None => {
			ctx.set_font("12px sans-serif");
			ctx.set_fill_style_str(LABEL_COLOR);
			let label = fit_text(ctx, &node.data.label, max_width);
			let _ = ctx.fill_text(&label, cx, cy);
		}
	}
}

/// Truncate `text` with an ellipsis until it fits `max_width` in the current font.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
	let measure = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
	if measure(text) <= max_width {
		return text.to_owned();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate: String = chars.iter().chain(std::iter::once(&'…')).collect();
		if measure(&candidate) <= max_width {
			return candidate;
		}
	}
	String::new()
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
