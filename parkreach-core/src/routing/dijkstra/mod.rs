mod point_to_point;
mod shortest_path_tree;
mod state;

pub(crate) use point_to_point::shortest_path_length;
pub use shortest_path_tree::ShortestPathTree;
