use leptos::prelude::*;

use super::state::ViewportCommand;
use super::types::Direction;

/// Top-right panel with one re-layout button per direction.
#[component]
pub fn LayoutPanel(#[prop(into)] on_layout: Callback<Direction>) -> impl IntoView {
	let button = move |direction: Direction| {
		view! {
			<button class="roadmap-button" on:click=move |_| on_layout.run(direction)>
				{direction.label()}
			</button>
		}
	};

	view! {
		<div class="roadmap-panel roadmap-panel--top-right">
			{button(Direction::TopToBottom)}
			{button(Direction::LeftToRight)}
		</div>
	}
}

/// Bottom-left zoom, fit and lock buttons.
#[component]
pub fn ViewportControls(
	#[prop(into)] on_command: Callback<ViewportCommand>,
	interactive: RwSignal<bool>,
) -> impl IntoView {
	view! {
		<div class="roadmap-controls">
			<button title="zoom in" on:click=move |_| on_command.run(ViewportCommand::ZoomIn)>
				"+"
			</button>
			<button title="zoom out" on:click=move |_| on_command.run(ViewportCommand::ZoomOut)>
				"−"
			</button>
			<button title="fit view" on:click=move |_| on_command.run(ViewportCommand::FitView)>
				"⤢"
			</button>
			<button
				title="toggle interactivity"
				on:click=move |_| interactive.update(|on| *on = !*on)
			>
				{move || if interactive.get() { "🔓" } else { "🔒" }}
			</button>
		</div>
	}
}
