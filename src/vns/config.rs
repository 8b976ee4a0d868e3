//! Variable Neighborhood Search configuration.

use serde::{Deserialize, Serialize};

use super::kick::Kick;
use crate::local_search::{LocalSearch, Neighborhood};

/// Configuration parameters for the VNS phase.
///
/// The run length is governed by the [`Budget`](crate::budget::Budget)
/// passed to [`VnsRunner::run`](super::VnsRunner::run); `max_no_improve`
/// optionally stops earlier on stagnation.
///
/// # Examples
///
/// ```
/// use u_carp::vns::{Kick, VnsConfig};
///
/// let config = VnsConfig::default()
///     .with_kicks(vec![Kick::SegmentReversal])
///     .with_max_no_improve(100);
/// assert_eq!(config.kicks.len(), 1);
/// assert_eq!(config.max_no_improve, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VnsConfig {
    /// Perturbations, mildest first.
    pub kicks: Vec<Kick>,
    /// Descent applied after every kick.
    pub local_search: LocalSearch,
    /// Stop after this many consecutive non-improving kicks (None for no
    /// limit).
    pub max_no_improve: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            kicks: vec![
                Kick::ShallowEjection,
                Kick::SegmentReversal,
                Kick::RelocateJump,
            ],
            local_search: LocalSearch::new(vec![Neighborhood::TwoOpt, Neighborhood::Relocate]),
            max_no_improve: None,
        }
    }
}

impl VnsConfig {
    /// Sets the kick sequence.
    pub fn with_kicks(mut self, kicks: Vec<Kick>) -> Self {
        self.kicks = kicks;
        self
    }

    /// Sets the post-kick local search.
    pub fn with_local_search(mut self, local_search: LocalSearch) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_max_no_improve(mut self, n: u64) -> Self {
        self.max_no_improve = Some(n);
        self
    }
}
