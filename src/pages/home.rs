use leptos::prelude::*;
use log::info;

use crate::components::roadmap::{FlowEdge, FlowNode, NodeData, RoadmapFlow};

/// (id, label, subtitle, accent)
type Step = (&'static str, &'static str, &'static str, &'static str);

const BASICS: &[Step] = &[
	("intro", "Introduction", "syllabus and exam format", "#3b82f6"),
	("const", "Constitution", "principles and rights", "#3b82f6"),
	("admin", "Administrative law", "procedure and acts", "#f97316"),
	("civil", "Civil law", "contracts and obligations", "#f97316"),
	("eu", "EU law", "institutions and sources", "#22c55e"),
	("cases", "Case practice", "written exercises", "#a855f7"),
	("exam", "Mock exam", "timed simulation", "#ef4444"),
];

const BASICS_EDGES: &[(&str, &str)] = &[
	("intro", "const"),
	("intro", "civil"),
	("const", "admin"),
	("const", "eu"),
	("admin", "cases"),
	("civil", "cases"),
	("eu", "exam"),
	("cases", "exam"),
];

const ADVANCED: &[Step] = &[
	("review", "Review", "weak topics first", "#3b82f6"),
	("tax", "Tax law", "", "#f97316"),
	("labor", "Labor law", "", "#f97316"),
	("drill", "Question drill", "500 questions", "#a855f7"),
	("final", "Final exam", "", "#ef4444"),
];

const ADVANCED_EDGES: &[(&str, &str)] = &[
	("review", "tax"),
	("review", "labor"),
	("tax", "drill"),
	("labor", "drill"),
	("drill", "final"),
];

fn roadmap(steps: &[Step], links: &[(&str, &str)]) -> (Vec<FlowNode>, Vec<FlowEdge>) {
	let nodes = steps
		.iter()
		.map(|&(id, label, subtitle, color)| {
			FlowNode::new(
				id,
				NodeData {
					label: label.to_owned(),
					subtitle: (!subtitle.is_empty()).then(|| subtitle.to_owned()),
					color: Some(color.to_owned()),
				},
			)
		})
		.collect();
	let edges = links.iter().map(|&(s, t)| FlowEdge::new(s, t)).collect();
	(nodes, edges)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (basics_nodes, basics_edges) = roadmap(BASICS, BASICS_EDGES);
	let nodes = RwSignal::new(basics_nodes);
	let edges = RwSignal::new(basics_edges);
	let advanced = RwSignal::new(false);
	let selected = RwSignal::new(None::<String>);

	let switch_plan = move |_| {
		let next = !advanced.get_untracked();
		let (n, e) = if next {
			roadmap(ADVANCED, ADVANCED_EDGES)
		} else {
			roadmap(BASICS, BASICS_EDGES)
		};
		advanced.set(next);
		selected.set(None);
		nodes.set(n);
		edges.set(e);
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="roadmap-page">
				<header class="roadmap-header">
					<h1>"Study roadmap"</h1>
					<p class="subtitle">
						"Click a step for details. Drag steps to rearrange. Scroll to zoom."
					</p>
					<button class="roadmap-button" on:click=switch_plan>
						{move || if advanced.get() { "Show basics" } else { "Show advanced" }}
					</button>
				</header>
				<RoadmapFlow
					initial_nodes=nodes
					initial_edges=edges
					on_node_click=move |id: String| {
						info!("selected step {id}");
						selected.set(Some(id));
					}
				/>
				<p class="roadmap-selection">
					{move || match selected.get() {
						Some(id) => format!("Selected step: {id}"),
						None => "No step selected".to_owned(),
					}}
				</p>
			</div>
		</ErrorBoundary>
	}
}
