//! The immutable full graph: every node and edge of the dataset, validated
//! once at load. The visible subset grown by expansion lives elsewhere
//! (`state`); this store is never mutated after `load`.

use std::collections::HashMap;

use super::dataset::{DatasetError, RawDataset, ROOT_CATEGORY};

/// A validated archive node. `name` is empty when the export carried no
/// `name` attribute; rendering degrades to a bare circle in that case.
#[derive(Clone, Debug)]
pub struct ArchiveNode {
	pub id: String,
	pub labels: Vec<String>,
	pub name: String,
	pub url: Option<String>,
}

impl ArchiveNode {
	/// Primary category tag, used for coloring and styling.
	pub fn category(&self) -> &str {
		&self.labels[0]
	}
}

/// A directed edge of the full graph, by node id.
#[derive(Clone, Debug)]
pub struct ArchiveEdge {
	pub source: String,
	pub target: String,
	pub label: String,
}

/// Immutable full dataset with an id index and a designated root.
#[derive(Clone, Debug)]
pub struct GraphStore {
	nodes: Vec<ArchiveNode>,
	edges: Vec<ArchiveEdge>,
	index: HashMap<String, usize>,
	root: usize,
}

impl GraphStore {
	/// Parse and validate a JSON dataset export.
	pub fn from_json(json: &str) -> Result<Self, DatasetError> {
		Self::load(serde_json::from_str(json)?)
	}

	/// Validate a raw dataset: every node needs a non-empty labels list,
	/// every edge endpoint must resolve, and exactly one node must carry the
	/// root category as its primary label.
	pub fn load(raw: RawDataset) -> Result<Self, DatasetError> {
		let mut nodes = Vec::with_capacity(raw.nodes.len());
		let mut index = HashMap::with_capacity(raw.nodes.len());
		let mut root = None;

		for mut node in raw.nodes {
			if node.labels.is_empty() {
				return Err(DatasetError::EmptyLabels(node.id));
			}
			if node.labels[0] == ROOT_CATEGORY && root.is_none() {
				root = Some(nodes.len());
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(ArchiveNode {
				name: node.attributes.remove("name").unwrap_or_default(),
				url: node.attributes.remove("url"),
				id: node.id,
				labels: node.labels,
			});
		}

		let root = root.ok_or(DatasetError::MissingRoot)?;

		let mut edges = Vec::with_capacity(raw.edges.len());
		for edge in raw.edges {
			for endpoint in [&edge.source, &edge.target] {
				if !index.contains_key(endpoint) {
					return Err(DatasetError::UnknownNodeId {
						from: edge.source.clone(),
						to: edge.target.clone(),
						id: endpoint.clone(),
					});
				}
			}
			edges.push(ArchiveEdge {
				source: edge.source,
				target: edge.target,
				label: edge.label,
			});
		}

		Ok(Self {
			nodes,
			edges,
			index,
			root,
		})
	}

	/// The designated root node (primary label `"HIMO"`).
	pub fn root(&self) -> &ArchiveNode {
		&self.nodes[self.root]
	}

	pub fn node(&self, id: &str) -> Option<&ArchiveNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// All edges whose source is `id`, in dataset order. Computed on demand
	/// so it reflects the full dataset before any expansion.
	pub fn child_edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ArchiveEdge> {
		self.edges.iter().filter(move |e| e.source == id)
	}

	/// True iff the full graph has at least one edge out of `id`. Drives the
	/// dashed "expandable" ring.
	pub fn is_expandable(&self, id: &str) -> bool {
		self.child_edges_of(id).next().is_some()
	}
}
