//! Phase state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Solver phases, in execution order.
///
/// # Examples
///
/// ```
/// use u_carp::solver::Phase;
///
/// let mut phase = Phase::Phase1;
/// let mut seen = vec![phase];
/// while phase != Phase::Done {
///     phase = phase.next();
///     seen.push(phase);
/// }
/// assert_eq!(seen.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// GRASP construction + full local search.
    Phase1,
    /// Giant tour + split + 2-opt.
    Phase2,
    /// Variable neighborhood search on the incumbent.
    Phase3,
    /// Deep ejection chains on the incumbent.
    Phase4,
    /// Terminal state.
    Done,
}

impl Phase {
    /// The following state; `Done` is absorbing.
    pub fn next(self) -> Self {
        match self {
            Phase::Phase1 => Phase::Phase2,
            Phase::Phase2 => Phase::Phase3,
            Phase::Phase3 => Phase::Phase4,
            Phase::Phase4 | Phase::Done => Phase::Done,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Phase1 => write!(f, "phase 1 (grasp)"),
            Phase::Phase2 => write!(f, "phase 2 (split)"),
            Phase::Phase3 => write!(f, "phase 3 (vns)"),
            Phase::Phase4 => write!(f, "phase 4 (ejection chains)"),
            Phase::Done => write!(f, "done"),
        }
    }
}
