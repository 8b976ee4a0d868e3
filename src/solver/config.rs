//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::budget::Budget;
use crate::constructive::GiantTourStrategy;
use crate::error::{CarpError, Result};
use crate::vns::VnsConfig;

/// Wall-clock and/or iteration limit for one phase.
///
/// Times are (de)serialized as fractional seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_carp::solver::PhaseLimit;
///
/// let limit = PhaseLimit::time(Duration::from_secs(60));
/// assert!(limit.is_bounded());
/// assert!(!PhaseLimit::default().is_bounded());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseLimit {
    /// Wall-clock limit.
    #[serde(with = "opt_secs")]
    pub time: Option<Duration>,
    /// Iteration limit.
    pub iterations: Option<u64>,
}

impl PhaseLimit {
    /// Creates a limit; `None` leaves that dimension unbounded.
    pub fn new(time: Option<Duration>, iterations: Option<u64>) -> Self {
        Self { time, iterations }
    }

    /// Time limit only.
    pub fn time(limit: Duration) -> Self {
        Self::new(Some(limit), None)
    }

    /// Iteration limit only; reproducible for a fixed seed.
    pub fn iterations(n: u64) -> Self {
        Self::new(None, Some(n))
    }

    /// Returns true if at least one dimension is limited.
    pub fn is_bounded(&self) -> bool {
        self.time.is_some() || self.iterations.is_some()
    }

    /// Starts a fresh budget for this limit.
    pub fn budget(&self) -> Budget {
        Budget::new(self.time, self.iterations)
    }
}

mod opt_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs_f64()).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Configuration for the four-phase [`Solver`](super::Solver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_carp::solver::{PhaseLimit, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_alpha(0.3)
///     .with_seed(7)
///     .with_phase1(PhaseLimit::iterations(20));
/// assert_eq!(config.alpha, 0.3);
/// assert!(config.validate().is_ok());
///
/// // phase 3 defaults to a quarter of the mean of phases 1 and 2
/// let default = SolverConfig::default();
/// assert_eq!(default.phase3_limit().time, Some(Duration::from_secs(15)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// GRASP + local search.
    pub phase1: PhaseLimit,
    /// Giant tour + split + 2-opt.
    pub phase2: PhaseLimit,
    /// VNS. A missing time is derived from phases 1 and 2, see
    /// [`phase3_limit`](Self::phase3_limit).
    pub phase3: PhaseLimit,
    /// Deep ejection chains.
    pub phase4: PhaseLimit,
    /// Share of the mean phase 1/2 time given to phase 3.
    pub phase3_fraction: f64,
    /// RCL greediness in (0, 1].
    pub alpha: f64,
    /// Stop once the gap to the best-known cost is at most this (percent).
    pub gap_target: f64,
    /// Random seed.
    pub seed: u64,
    /// Maximum ejection chain depth in phase 4.
    pub chain_depth: usize,
    /// How phase 2 draws giant tours.
    pub giant_tour: GiantTourStrategy,
    /// Phase 3 parameters.
    pub vns: VnsConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            phase1: PhaseLimit::time(Duration::from_secs(60)),
            phase2: PhaseLimit::time(Duration::from_secs(60)),
            phase3: PhaseLimit::default(),
            phase4: PhaseLimit::time(Duration::from_secs(15)),
            phase3_fraction: 0.25,
            alpha: 0.15,
            gap_target: 3.0,
            seed: 42,
            chain_depth: 3,
            giant_tour: GiantTourStrategy::Shuffle,
            vns: VnsConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Sets the phase 1 limit.
    pub fn with_phase1(mut self, limit: PhaseLimit) -> Self {
        self.phase1 = limit;
        self
    }

    /// Sets the phase 2 limit.
    pub fn with_phase2(mut self, limit: PhaseLimit) -> Self {
        self.phase2 = limit;
        self
    }

    /// Sets the phase 3 limit.
    pub fn with_phase3(mut self, limit: PhaseLimit) -> Self {
        self.phase3 = limit;
        self
    }

    /// Sets the phase 4 limit.
    pub fn with_phase4(mut self, limit: PhaseLimit) -> Self {
        self.phase4 = limit;
        self
    }

    /// Sets the same iteration-only limit on every phase.
    pub fn with_iteration_limits(self, p1: u64, p2: u64, p3: u64, p4: u64) -> Self {
        self.with_phase1(PhaseLimit::iterations(p1))
            .with_phase2(PhaseLimit::iterations(p2))
            .with_phase3(PhaseLimit::iterations(p3))
            .with_phase4(PhaseLimit::iterations(p4))
    }

    /// Sets the phase 3 time fraction.
    pub fn with_phase3_fraction(mut self, fraction: f64) -> Self {
        self.phase3_fraction = fraction;
        self
    }

    /// Sets the RCL parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the gap target (percent).
    pub fn with_gap_target(mut self, gap: f64) -> Self {
        self.gap_target = gap;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximum ejection chain depth.
    pub fn with_chain_depth(mut self, depth: usize) -> Self {
        self.chain_depth = depth;
        self
    }

    /// Sets the giant tour strategy.
    pub fn with_giant_tour(mut self, strategy: GiantTourStrategy) -> Self {
        self.giant_tour = strategy;
        self
    }

    /// Sets the VNS parameters.
    pub fn with_vns(mut self, vns: VnsConfig) -> Self {
        self.vns = vns;
        self
    }

    /// The phase 3 limit actually used.
    ///
    /// When no phase 3 time is set and phases 1 and 2 both have one, the
    /// time is `phase3_fraction × (t1 + t2) / 2`.
    pub fn phase3_limit(&self) -> PhaseLimit {
        if self.phase3.time.is_some() {
            return self.phase3;
        }
        let derived = match (self.phase1.time, self.phase2.time) {
            (Some(t1), Some(t2)) => {
                let mean = (t1.as_secs_f64() + t2.as_secs_f64()) / 2.0;
                Duration::try_from_secs_f64(self.phase3_fraction * mean).ok()
            }
            _ => None,
        };
        PhaseLimit::new(derived, self.phase3.iterations)
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// [`CarpError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(CarpError::invalid_config(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !self.gap_target.is_finite() || self.gap_target < 0.0 {
            return Err(CarpError::invalid_config(format!(
                "gap target must be a non-negative percentage, got {}",
                self.gap_target
            )));
        }
        if !self.phase3_fraction.is_finite() || self.phase3_fraction < 0.0 {
            return Err(CarpError::invalid_config(format!(
                "phase 3 fraction must be finite and non-negative, got {}",
                self.phase3_fraction
            )));
        }
        if self.chain_depth == 0 {
            return Err(CarpError::invalid_config("chain depth must be at least 1"));
        }
        let limits = [self.phase1, self.phase2, self.phase3_limit(), self.phase4];
        if let Some(i) = limits.iter().position(|l| !l.is_bounded()) {
            return Err(CarpError::invalid_config(format!(
                "phase {} has neither a time nor an iteration limit",
                i + 1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.phase1.time, Some(Duration::from_secs(60)));
        assert_eq!(c.phase4.time, Some(Duration::from_secs(15)));
        assert_eq!(c.alpha, 0.15);
        assert_eq!(c.gap_target, 3.0);
        assert_eq!(c.seed, 42);
        assert_eq!(c.chain_depth, 3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_phase3_derivation() {
        let c = SolverConfig::default()
            .with_phase1(PhaseLimit::time(Duration::from_secs(10)))
            .with_phase2(PhaseLimit::time(Duration::from_secs(30)))
            .with_phase3_fraction(0.5);
        assert_eq!(c.phase3_limit().time, Some(Duration::from_secs(10)));

        let explicit = c.clone().with_phase3(PhaseLimit::time(Duration::from_secs(2)));
        assert_eq!(explicit.phase3_limit().time, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_iteration_limits_do_not_derive_time() {
        let c = SolverConfig::default().with_iteration_limits(5, 5, 5, 5);
        assert_eq!(c.phase3_limit(), PhaseLimit::iterations(5));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            SolverConfig::default().with_alpha(0.0),
            SolverConfig::default().with_alpha(1.5),
            SolverConfig::default().with_alpha(f64::NAN),
            SolverConfig::default().with_gap_target(-1.0),
            SolverConfig::default().with_phase3_fraction(f64::INFINITY),
            SolverConfig::default().with_chain_depth(0),
            SolverConfig::default().with_phase1(PhaseLimit::default()),
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(CarpError::InvalidConfig { .. })), "{c:?}");
        }
        assert!(SolverConfig::default().with_alpha(1.0).validate().is_ok());
    }

    #[test]
    fn test_unbounded_phase3_is_rejected() {
        let c = SolverConfig::default()
            .with_phase1(PhaseLimit::iterations(1))
            .with_phase2(PhaseLimit::iterations(1));
        let err = c.validate().expect_err("phase 3 has no limit");
        assert!(err.to_string().contains("phase 3"));
    }

    #[test]
    fn test_serde_json() {
        let c = SolverConfig::default().with_phase2(PhaseLimit::new(Some(Duration::from_millis(1500)), Some(9)));
        let json = serde_json::to_string(&c).expect("serialize");
        assert!(json.contains("1.5"));
        let back: SolverConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);

        let partial: SolverConfig =
            serde_json::from_str(r#"{"alpha": 0.4, "phase4": {"iterations": 3}}"#).expect("partial");
        assert_eq!(partial.alpha, 0.4);
        assert_eq!(partial.phase4, PhaseLimit::iterations(3));
        assert_eq!(partial.seed, 42);
    }
}
