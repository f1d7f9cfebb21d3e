//! Dialog opened by clicking a node in the knowledge graph.

use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use log::warn;

use crate::model::{EditorAction, EditorState, GraphStore};

/// Run `f` on a copy of the editor state against the store, then write the
/// editor back. Store subscribers are only notified when `f` returns `true`.
fn apply(
	store: RwSignal<GraphStore>,
	editor: RwSignal<EditorState>,
	f: impl FnOnce(&mut EditorState, &mut GraphStore) -> bool,
) {
	let mut state = editor.get_untracked();
	store.maybe_update(|graph| f(&mut state, graph));
	editor.set(state);
}

#[component]
pub fn RelationshipModal(
	store: RwSignal<GraphStore>,
	editor: RwSignal<EditorState>,
) -> impl IntoView {
	let name = RwSignal::new(String::new());
	let description = RwSignal::new(String::new());

	let selected_name = move || {
		editor.with(|e| {
			e.selected
				.as_ref()
				.map(|n| n.name.clone())
				.unwrap_or_default()
		})
	};

	let choose = move |action: EditorAction| {
		let (n, d) = match action {
			// Editing starts from the node's current values.
			EditorAction::EditRelationship => editor.with_untracked(|e| {
				e.selected
					.as_ref()
					.map(|n| (n.name.clone(), n.description.clone().unwrap_or_default()))
					.unwrap_or_default()
			}),
			EditorAction::AddRelationship => Default::default(),
		};
		name.set(n);
		description.set(d);
		editor.update(|e| e.choose(action));
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (n, d) = (name.get_untracked(), description.get_untracked());
		apply(store, editor, |state, graph| match state.submit(graph, &n, &d) {
			Ok(submission) => submission.changed_graph(),
			Err(err) => {
				warn!("relationship rejected: {err}");
				false
			}
		});
	};

	let on_delete = move |_: MouseEvent| {
		apply(store, editor, |state, graph| state.delete(graph).is_some())
	};
	let on_expand = move |_: MouseEvent| {
		apply(store, editor, |state, graph| state.expand_collapse(graph) > 0)
	};
	let on_back = move |_: MouseEvent| editor.update(|e| e.go_back());
	let on_close = move |_: MouseEvent| editor.update(|e| e.close());

	let actions = move || match editor.with(|e| e.action) {
		None => view! {
			<div class="modal-actions">
				<button class="btn" on:click=move |_| choose(EditorAction::AddRelationship)>
					"Add Relationship"
				</button>
				<button class="btn" on:click=move |_| choose(EditorAction::EditRelationship)>
					"Edit Relationship"
				</button>
				<button class="btn" on:click=on_expand>
					"Expand / Collapse"
				</button>
				<button class="btn btn-danger" on:click=on_delete>
					"Delete"
				</button>
			</div>
		}
		.into_any(),
		Some(action) => view! {
			<form class="modal-form" on:submit=on_submit>
				<h3>{action.title()}</h3>
				<label>
					"Name"
					<input
						type="text"
						prop:value=move || name.get()
						on:input=move |ev| name.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"Description"
					<textarea
						prop:value=move || description.get()
						on:input=move |ev| description.set(event_target_value(&ev))
					/>
				</label>
				<Show when=move || editor.with(|e| e.validation_failed)>
					<p class="form-error">"Name and description are required."</p>
				</Show>
				<div class="modal-actions">
					<button type="button" class="btn" on:click=on_back>
						"Back"
					</button>
					<button type="submit" class="btn btn-primary">
						"Save"
					</button>
				</div>
			</form>
		}
		.into_any(),
	};

	view! {
		<div class="modal-backdrop">
			<div class="modal" role="dialog" aria-modal="true">
				<div class="modal-header">
					<h2>{selected_name}</h2>
					<button class="modal-close" aria-label="Close" on:click=on_close>
						"×"
					</button>
				</div>
				{actions}
			</div>
		</div>
	}
}
