pub mod archive_graph;
