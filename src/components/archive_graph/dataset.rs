//! Serde mirror of the archive dataset export and its load-time errors.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Category tag that identifies the single root node of the dataset.
pub const ROOT_CATEGORY: &str = "HIMO";

/// One node record as it appears in the JSON export.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
	pub id: String,
	pub labels: Vec<String>,
	#[serde(default)]
	pub attributes: HashMap<String, String>,
}

/// One directed edge record, `source` reveals `target`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub label: String,
}

/// The full dataset as loaded once at startup.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDataset {
	pub nodes: Vec<RawNode>,
	pub edges: Vec<RawEdge>,
}

/// Reasons a dataset is rejected wholesale. No partial graph is ever built
/// from a malformed export.
#[derive(Debug, Error)]
pub enum DatasetError {
	#[error("dataset contains no node with root category \"HIMO\"")]
	MissingRoot,
	#[error("edge {from:?} -> {to:?} references unknown node id {id:?}")]
	UnknownNodeId { from: String, to: String, id: String },
	#[error("node {0:?} has an empty labels list")]
	EmptyLabels(String),
	#[error("dataset is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
}
