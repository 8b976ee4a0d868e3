//! Phase orchestration.
//!
//! - [`SolverConfig`] / [`PhaseLimit`] — budgets and parameters
//! - [`Phase`] — the `Phase1 → Phase2 → Phase3 → Phase4 → Done` state machine
//! - [`Solver`] — runs the phases and keeps the best solution

mod config;
mod orchestrator;
mod phase;

pub use config::{PhaseLimit, SolverConfig};
pub use orchestrator::{gap_percent, PhaseReport, SolveResult, Solver};
pub use phase::Phase;
