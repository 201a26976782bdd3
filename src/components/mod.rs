pub mod dijkstra_graph;
pub mod panels;
