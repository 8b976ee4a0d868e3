//! Solution evaluation.
//!
//! - [`RouteEvaluator`] — full recomputation and validation (the oracle)
//! - [`evaluate_two_opt`], [`evaluate_relocate`], [`evaluate_chain`],
//!   [`best_reinsertion`] — exact, non-mutating move deltas
//! - [`apply_two_opt`], [`apply_relocate`], [`apply_chain`] — incremental
//!   application

mod evaluator;
mod moves;

pub use evaluator::{RouteEvaluator, Violation, ViolationType};
pub use moves::{
    apply_chain, apply_relocate, apply_two_opt, best_reinsertion, evaluate_chain,
    evaluate_relocate, evaluate_two_opt, EjectionChain, MoveEval, RelocateMove, TwoOptMove,
};
pub(crate) use moves::{insertion_delta, removal_delta};

/// Tolerance below which a cost delta counts as zero.
pub const EPSILON: f64 = 1e-9;
