//! Variable Neighborhood Search (VNS) over CARP solutions.
//!
//! A single-solution metaheuristic that systematically changes
//! perturbation strength during the search. At each step a random kick in
//! the current neighborhood is followed by local search. If improvement is
//! found, the search resets to the first (mildest) kick; otherwise it moves
//! to the next (stronger) one, wrapping around after the last.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hertz, A., Laporte, G. & Mittaz, M. (2000). "A tabu search heuristic
//!   for the capacitated arc routing problem", *Operations Research* 48(1), 129-135.

mod config;
mod kick;
mod runner;

pub use config::VnsConfig;
pub use kick::Kick;
pub use runner::{VnsResult, VnsRunner};
