//! Constructive heuristics for building initial CARP solutions.
//!
//! - [`grasp_path_scanning`] — GRASP path-scanning with a restricted candidate list, O(m² log m)
//! - [`GiantTour`] — capacity-free task orderings (uniform or nearest-top-k)
//! - [`split`] — Prins (2004) split DP partitioning a giant tour into routes, O(m²)
//! - [`trivial_solution`] — one route per task

mod giant_tour;
mod grasp;
mod split;
mod trivial;

pub use giant_tour::{GiantTour, GiantTourStrategy};
pub use grasp::grasp_path_scanning;
pub use split::{split, SplitResult};
pub use trivial::trivial_solution;
