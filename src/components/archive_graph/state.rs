//! Visible-subset state: the force simulation, the pan/zoom transform, and
//! the expansion controller that grows the visible subgraph on click.
//!
//! The full dataset stays in the immutable [`GraphStore`]; only nodes revealed
//! by expansion are ever added to the simulation, and nothing is removed for
//! the lifetime of the session.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::layout::{self, LabelConfig, TextMeasure};
use super::store::{ArchiveEdge, ArchiveNode, GraphStore};
use super::style;

/// Newly revealed children spawn within this distance of their parent on
/// each axis, so the simulation never sees two exactly coincident nodes.
pub const JITTER_RANGE: f64 = 50.0;
/// Seconds of simulation time an expanded node stays pinned while the layout
/// settles around its new children.
pub const PIN_RELEASE_DELAY: f64 = 0.3;

/// Per-node render annotations, derived from the store record at the moment
/// the node becomes visible. Identity stays with the store; everything here
/// is disposable display state.
#[derive(Clone, Debug, Default)]
pub struct NodeRender {
	pub id: String,
	pub category: String,
	pub name: String,
	pub url: Option<String>,
	pub color: &'static str,
	pub lines: Vec<String>,
	pub radius: f64,
	pub expanded: bool,
}

/// A visible edge, referencing live simulation nodes by index.
#[derive(Clone, Debug)]
pub struct VisibleEdge {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer travels far enough that release means "drag end",
	/// not "click".
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

pub struct ArchiveGraphState {
	store: GraphStore,
	pub sim: ForceGraph<NodeRender, ()>,
	pub edges: Vec<VisibleEdge>,
	visible: HashMap<String, DefaultNodeIdx>,
	edge_pairs: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
	/// Simulation-clock deadlines for releasing expansion pins. Overwritten
	/// by a re-expansion, removed by a drag; last writer wins.
	pin_deadlines: HashMap<DefaultNodeIdx, f64>,
	clock: f64,
	jitter_state: usize,
	label_cfg: LabelConfig,
	measure: Box<dyn TextMeasure>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
}

impl ArchiveGraphState {
	/// Seed the visible subset with the store's root at the world origin; the
	/// view transform centers the origin on screen.
	pub fn new(store: GraphStore, width: f64, height: f64, measure: Box<dyn TextMeasure>) -> Self {
		let sim = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut state = Self {
			store,
			sim,
			edges: Vec::new(),
			visible: HashMap::new(),
			edge_pairs: HashSet::new(),
			pin_deadlines: HashMap::new(),
			clock: 0.0,
			jitter_state: 0,
			label_cfg: LabelConfig::default(),
			measure,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: true,
		};

		let root = state.store.root().clone();
		state.insert_visible(&root, 0.0, 0.0, None);
		state
	}

	/// Reveal the children of the node at `idx`.
	///
	/// Silent no-op for leaves and for already-expanded nodes; never removes
	/// or duplicates anything, so the visible subset only grows. The expanded
	/// node is pinned until the layout has had [`PIN_RELEASE_DELAY`] to
	/// settle around the newcomers.
	pub fn expand(&mut self, idx: DefaultNodeIdx) {
		let mut clicked = None;
		self.sim.visit_nodes(|node| {
			if node.index() == idx {
				let d = &node.data.user_data;
				clicked = Some((d.id.clone(), d.name.clone(), d.expanded, node.x(), node.y()));
			}
		});
		let Some((id, parent_name, expanded, px, py)) = clicked else {
			return;
		};
		let children: Vec<ArchiveEdge> = self.store.child_edges_of(&id).cloned().collect();
		if expanded || children.is_empty() {
			return;
		}

		self.sim.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.user_data.expanded = true;
				node.data.is_anchor = true;
			}
		});
		self.pin_deadlines.insert(idx, self.clock + PIN_RELEASE_DELAY);

		let mut new_nodes = 0usize;
		for edge in children {
			let target_idx = match self.visible.get(&edge.target).copied() {
				Some(existing) => existing,
				None => {
					// Validated at load: every edge endpoint resolves.
					let Some(target) = self.store.node(&edge.target).cloned() else {
						continue;
					};
					let (jx, jy) = (self.jitter(), self.jitter());
					new_nodes += 1;
					self.insert_visible(&target, px as f64 + jx, py as f64 + jy, Some(&parent_name))
				}
			};
			if self.edge_pairs.insert((idx, target_idx)) {
				self.sim.add_edge(idx, target_idx, EdgeData::default());
				self.edges.push(VisibleEdge {
					source: idx,
					target: target_idx,
					label: edge.label,
				});
			}
		}
		log::debug!(
			"expanded {id:?}: {new_nodes} new nodes, {} nodes visible",
			self.visible.len()
		);
	}

	fn insert_visible(
		&mut self,
		node: &ArchiveNode,
		x: f64,
		y: f64,
		parent_name: Option<&str>,
	) -> DefaultNodeIdx {
		let color = parent_name
			.and_then(style::parent_color_override)
			.unwrap_or_else(|| style::category_color(node.category()));
		let lines = layout::wrap(&node.name, self.label_cfg.max_width, self.measure.as_ref());
		let radius = layout::circle_radius(&node.name, &self.label_cfg, self.measure.as_ref());

		let idx = self.sim.add_node(NodeData {
			x: x as f32,
			y: y as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: NodeRender {
				id: node.id.clone(),
				category: node.labels[0].clone(),
				name: node.name.clone(),
				url: node.url.clone(),
				color,
				lines,
				radius,
				expanded: false,
			},
		});
		self.visible.insert(node.id.clone(), idx);
		idx
	}

	/// Bounded pseudo-random offset in `(-JITTER_RANGE, JITTER_RANGE)`,
	/// deterministic for reproducible layouts.
	fn jitter(&mut self) -> f64 {
		self.jitter_state = (self.jitter_state * 9301 + 49297) % 233280;
		(self.jitter_state as f64 / 233280.0 - 0.5) * 2.0 * JITTER_RANGE
	}

	/// Advance the simulation and release expansion pins whose settle delay
	/// has elapsed. Pins taken over by a drag are no longer in the deadline
	/// map, so a stale release never clobbers them.
	pub fn tick(&mut self, dt: f32) {
		self.sim.update(dt);
		self.clock += dt as f64;

		if self.pin_deadlines.is_empty() {
			return;
		}
		let due: Vec<DefaultNodeIdx> = self
			.pin_deadlines
			.iter()
			.filter(|&(_, &at)| at <= self.clock)
			.map(|(&idx, _)| idx)
			.collect();
		for idx in due {
			self.pin_deadlines.remove(&idx);
			self.sim.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
	}

	/// Take over a node's pin for a drag gesture: any pending expansion
	/// release is cancelled, the drag owns the pin until [`Self::unpin`].
	pub fn pin_at(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.pin_deadlines.remove(&idx);
		self.sim.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn unpin(&mut self, idx: DefaultNodeIdx) {
		self.pin_deadlines.remove(&idx);
		self.sim.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = false;
			}
		});
	}

	pub fn pinned(&self, idx: DefaultNodeIdx) -> bool {
		let mut anchored = false;
		self.sim.visit_nodes(|node| {
			if node.index() == idx {
				anchored = node.data.is_anchor;
			}
		});
		anchored
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn visible_node_count(&self) -> usize {
		self.visible.len()
	}

	pub fn is_visible(&self, id: &str) -> bool {
		self.visible.contains_key(id)
	}

	pub fn visible_idx(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.visible.get(id).copied()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Hit-test against each node's own circle radius (circles are sized per
	/// label, so there is no single hit radius).
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.sim.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::super::layout::EstimatedMeasure;
	use super::super::store::GraphStore;
	use super::*;

	/// r -> {a, b}, a -> c, b -> c: c is reachable through two parents.
	fn demo_store() -> GraphStore {
		let raw = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "r", "labels": ["HIMO"], "attributes": {"name": "HIMO"}},
					{"id": "a", "labels": ["Fonds"], "attributes": {"name": "Fonds A"}},
					{"id": "b", "labels": ["Fonds"], "attributes": {"name": "Fonds B"}},
					{"id": "c", "labels": ["Subfonds"], "attributes": {"name": "Shared child"}}
				],
				"edges": [
					{"source": "r", "target": "a", "label": "contains"},
					{"source": "r", "target": "b", "label": "contains"},
					{"source": "a", "target": "c", "label": "contains"},
					{"source": "b", "target": "c", "label": "contains"}
				]
			}"#,
		)
		.unwrap();
		GraphStore::load(raw).unwrap()
	}

	fn new_state() -> ArchiveGraphState {
		ArchiveGraphState::new(
			demo_store(),
			800.0,
			600.0,
			Box::new(EstimatedMeasure::default()),
		)
	}

	fn visible_indices(state: &ArchiveGraphState) -> HashSet<DefaultNodeIdx> {
		let mut set = HashSet::new();
		state.sim.visit_nodes(|node| {
			set.insert(node.index());
		});
		set
	}

	#[test]
	fn seeds_only_the_root() {
		let state = new_state();
		assert_eq!(state.visible_node_count(), 1);
		assert!(state.is_visible("r"));
		assert!(!state.is_visible("a"));
		assert!(state.edges.is_empty());
	}

	#[test]
	fn expanding_the_root_reveals_its_children_once() {
		let mut state = new_state();
		let root = state.visible_idx("r").unwrap();

		state.expand(root);
		assert_eq!(state.visible_node_count(), 3);
		assert!(state.is_visible("a") && state.is_visible("b"));
		assert_eq!(state.edges.len(), 2);
		assert!(state.edges.iter().all(|e| e.label == "contains"));

		// Re-expanding is a silent no-op: same subset, nothing duplicated.
		state.expand(root);
		assert_eq!(state.visible_node_count(), 3);
		assert_eq!(state.edges.len(), 2);
	}

	#[test]
	fn expanding_a_leaf_is_a_noop() {
		let mut state = new_state();
		let root = state.visible_idx("r").unwrap();
		state.expand(root);
		state.expand(state.visible_idx("a").unwrap());
		let leaf = state.visible_idx("c").unwrap();

		state.expand(leaf);
		assert_eq!(state.visible_node_count(), 4);
		assert_eq!(state.edges.len(), 3);
		// A leaf never gets marked expanded, so the affordance logic stays
		// consistent with the full dataset.
		let mut expanded = true;
		state.sim.visit_nodes(|node| {
			if node.index() == leaf {
				expanded = node.data.user_data.expanded;
			}
		});
		assert!(!expanded);
	}

	#[test]
	fn a_shared_child_is_added_once_with_one_edge_per_parent() {
		let mut state = new_state();
		state.expand(state.visible_idx("r").unwrap());
		state.expand(state.visible_idx("a").unwrap());
		state.expand(state.visible_idx("b").unwrap());

		assert_eq!(state.visible_node_count(), 4);
		assert_eq!(state.edges.len(), 4);

		// No duplicate (source, target) pairs.
		let pairs: HashSet<_> = state.edges.iter().map(|e| (e.source, e.target)).collect();
		assert_eq!(pairs.len(), state.edges.len());

		// Referential integrity: every edge endpoint is a visible node.
		let visible = visible_indices(&state);
		for edge in &state.edges {
			assert!(visible.contains(&edge.source));
			assert!(visible.contains(&edge.target));
		}
	}

	#[test]
	fn expansion_is_monotonic_across_any_call_sequence() {
		let mut state = new_state();
		let mut last_nodes = state.visible_node_count();
		let mut last_edges = state.edges.len();

		for id in ["r", "a", "r", "b", "a", "c", "b"] {
			if let Some(idx) = state.visible_idx(id) {
				state.expand(idx);
			}
			assert!(state.visible_node_count() >= last_nodes);
			assert!(state.edges.len() >= last_edges);
			last_nodes = state.visible_node_count();
			last_edges = state.edges.len();
		}
		assert_eq!(last_nodes, 4);
		assert_eq!(last_edges, 4);
	}

	#[test]
	fn children_spawn_near_their_parent() {
		let mut state = new_state();
		let root = state.visible_idx("r").unwrap();
		// Root seeded at the origin and pinned by the expansion, so the
		// children's initial offsets are pure jitter.
		state.expand(root);
		state.sim.visit_nodes(|node| {
			if node.index() != root {
				assert!((node.x() as f64).abs() <= JITTER_RANGE);
				assert!((node.y() as f64).abs() <= JITTER_RANGE);
			}
		});
	}

	#[test]
	fn expansion_pins_the_node_until_the_settle_delay_elapses() {
		let mut state = new_state();
		let root = state.visible_idx("r").unwrap();
		state.expand(root);
		assert!(state.pinned(root));

		state.tick(0.1);
		assert!(state.pinned(root), "released before the settle delay");
		state.tick(0.25);
		assert!(!state.pinned(root), "still pinned after the settle delay");
	}

	#[test]
	fn a_drag_pin_is_not_clobbered_by_a_pending_release() {
		let mut state = new_state();
		let root = state.visible_idx("r").unwrap();
		state.expand(root);

		// Drag takes over before the expansion release fires.
		state.pin_at(root, 10.0, 10.0);
		state.tick(1.0);
		assert!(state.pinned(root), "stale release clobbered the drag pin");

		state.unpin(root);
		assert!(!state.pinned(root));
	}

	#[test]
	fn hit_testing_uses_the_node_radius() {
		let state = new_state();
		// Root sits at the world origin; the transform centers it on screen.
		let (cx, cy) = (state.width / 2.0, state.height / 2.0);
		assert!(state.node_at_position(cx, cy).is_some());
		assert!(state.node_at_position(cx + 20.0, cy).is_some());
		assert!(state.node_at_position(cx + 300.0, cy).is_none());
	}
}
