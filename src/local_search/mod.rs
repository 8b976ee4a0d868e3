//! Local search operators for improving CARP solutions.
//!
//! - [`two_opt_step`] — Intra-route segment reversal with direction flips
//! - [`relocate_step`] — Inter-route task relocation
//! - [`shallow_ejection_step`] — Remove a task and reinsert it anywhere
//! - [`ejection_chain_step`] — Linked relocations through overloaded routes
//! - [`LocalSearch`] — Ordered sweep over [`Neighborhood`]s

mod ejection;
mod neighborhood;
mod relocate;
mod two_opt;

pub use ejection::{ejection_chain_step, find_improving_chain, shallow_ejection_step};
pub use neighborhood::{LocalSearch, Neighborhood};
pub use relocate::{find_best_relocate, relocate_improve, relocate_step};
pub use two_opt::{find_best_two_opt, two_opt_improve, two_opt_step};
