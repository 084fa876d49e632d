mod chu_liu_edmonds;
pub mod error;
pub mod generator;
pub mod graph;

pub use chu_liu_edmonds::Solution;
pub use chu_liu_edmonds::chu_liu_edmonds;
pub use chu_liu_edmonds::min_arborescence_weight;
pub use chu_liu_edmonds::solve_with_stats;
pub use error::ArborescenceError;
pub use graph::DirectedGraph;
pub use graph::Edge;
