//! Domain model types for capacitated arc routing.
//!
//! Provides the core abstractions: the road graph and its required edges
//! (tasks), the validated instance, the preprocessed problem shared by all
//! heuristics, routes as oriented task sequences, complete solutions, and
//! best-known reference costs.

mod best_known;
mod graph;
mod instance;
mod problem;
mod route;
mod solution;
mod task;

pub use best_known::BestKnown;
pub use graph::{Edge, Graph};
pub use instance::Instance;
pub use problem::Problem;
pub use route::Route;
pub use solution::Solution;
pub use task::{ServedTask, Task};
