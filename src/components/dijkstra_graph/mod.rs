mod component;
mod engine;
mod path;
mod render;
mod state;
mod types;

pub use component::DijkstraCanvas;
pub use engine::{RunResult, Step, run};
pub use types::{Graph, NodeStatus};
