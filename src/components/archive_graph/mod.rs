mod component;
mod dataset;
mod layout;
mod render;
mod state;
mod store;
mod style;

pub use component::ArchiveGraphCanvas;
pub use dataset::DatasetError;
pub use store::GraphStore;
