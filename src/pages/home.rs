use leptos::prelude::*;
use log::error;

use crate::components::archive_graph::{ArchiveGraphCanvas, GraphStore};

/// The archive dataset ships with the bundle and is parsed once at startup.
const DATASET: &str = include_str!("../../assets/graph.json");

/// Default Home Page: the full-screen cartography canvas with its title and
/// legend chrome, or an error page when the dataset is malformed.
#[component]
pub fn Home() -> impl IntoView {
	match GraphStore::from_json(DATASET) {
		Ok(store) => {
			let data = Signal::derive(move || store.clone());
			view! {
				<div class="fullscreen-graph">
					<ArchiveGraphCanvas data=data fullscreen=true />
					<div class="graph-overlay">
						<h1>"HIMO Archives Cartography"</h1>
						<p class="subtitle">
							"Click a dashed node to reveal its archives. Drag nodes to reposition, scroll to zoom, drag the background to pan."
						</p>
					</div>
					<Legend />
				</div>
			}
			.into_any()
		}
		Err(err) => {
			error!("archive dataset rejected: {err}");
			view! {
				<div class="load-error">
					<h1>"Unable to load the archive dataset"</h1>
					<p>{err.to_string()}</p>
				</div>
			}
			.into_any()
		}
	}
}

#[component]
fn Legend() -> impl IntoView {
	view! {
		<div class="graph-legend">
			<div class="legend-item">
				<span class="legend-dot himo-fonds"></span>
				"Archives in HIMO fonds"
			</div>
			<div class="legend-item">
				<span class="legend-dot" style="background: #56beb9;"></span>
				"Possible extra-archives"
			</div>
			<div class="legend-item">
				<span class="legend-dot" style="background: #bc98df;"></span>
				"Archives of Contextualization"
			</div>
			<div class="legend-item">
				<span class="legend-dot legend-dashed"></span>
				"Expandable node"
			</div>
			<div class="legend-item">
				<span class="legend-icon">"🔗"</span>
				"External links"
			</div>
		</div>
	}
}
