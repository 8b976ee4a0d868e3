//! # u-carp
//!
//! Capacitated Arc Routing (CARP) heuristics: a four-phase engine that
//! combines GRASP path-scanning, giant-tour split, local search, variable
//! neighborhood search and ejection chains, stopping early once a target
//! gap to the best-known cost is reached.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Graph, Task, Instance, Problem, Route, Solution)
//! - [`distance`] — All-pairs shortest path matrix
//! - [`evaluation`] — Cost/feasibility oracle and incremental move evaluation
//! - [`constructive`] — GRASP path-scanning, giant tours, Prins split
//! - [`local_search`] — 2-opt, relocate, ejection moves and the sweep driver
//! - [`vns`] — Variable Neighborhood Search over random kicks
//! - [`budget`] — Per-phase time/iteration budgets
//! - [`solver`] — Phase configuration and orchestration
//! - [`io`] — Instance loading and solution reports
//!
//! ## Example
//!
//! ```
//! use u_carp::models::{Edge, Graph, Instance};
//! use u_carp::solver::{Solver, SolverConfig};
//!
//! let graph = Graph::new(4, vec![
//!     Edge::required(1, 2, 3.0, 2),
//!     Edge::required(2, 3, 2.0, 1),
//!     Edge::required(3, 4, 4.0, 2),
//!     Edge::deadhead(4, 1, 3.0),
//! ]);
//! let instance = Instance::new("demo", graph, 1, 4).unwrap();
//!
//! let solver = Solver::new(SolverConfig::default().with_iteration_limits(20, 20, 20, 5)).unwrap();
//! let result = solver.solve_instance(instance).unwrap();
//! assert_eq!(result.solution.num_served(), 3);
//! ```

pub mod budget;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod solver;
pub mod vns;

pub use error::{CarpError, Result};
