//! Four-phase orchestration.
//!
//! # Algorithm
//!
//! Starting from the trivial one-route-per-task solution, the phases run in
//! order, each bounded by its own [`PhaseLimit`](super::PhaseLimit):
//!
//! 1. GRASP path-scanning, then 2-opt / relocate / shallow ejection
//! 2. Random giant tour, Prins split, then 2-opt
//! 3. VNS on the incumbent
//! 4. Ejection chains of bounded depth on the incumbent
//!
//! The incumbent only changes for a strictly cheaper solution. When a
//! best-known cost is available, the gap is checked before every phase and
//! after every improvement; reaching the target skips the remaining phases.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SolverConfig;
use super::phase::Phase;
use crate::budget::Budget;
use crate::constructive::{grasp_path_scanning, split, trivial_solution};
use crate::error::Result;
use crate::evaluation::EPSILON;
use crate::local_search::{ejection_chain_step, LocalSearch};
use crate::models::{BestKnown, Instance, Problem, Solution};
use crate::vns::VnsRunner;

/// Percentage gap of `cost` above `best_known`, if one is known.
///
/// # Examples
///
/// ```
/// use u_carp::models::BestKnown;
/// use u_carp::solver::gap_percent;
///
/// assert_eq!(gap_percent(330.0, BestKnown::new(300.0)), Some(10.0));
/// assert_eq!(gap_percent(330.0, None), None);
/// ```
pub fn gap_percent(cost: f64, best_known: Option<BestKnown>) -> Option<f64> {
    best_known.map(|b| b.gap_percent(cost))
}

/// Summary of one executed phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    /// Which phase.
    pub phase: Phase,
    /// Construction or perturbation attempts in this phase.
    pub iterations: u64,
    /// Times the incumbent improved in this phase.
    pub improvements: u64,
    /// Incumbent cost when the phase ended.
    pub best_cost: f64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Best solution found, with caches recomputed from scratch.
    pub solution: Solution,
    /// Reference cost used for the gap, if any.
    pub best_known: Option<BestKnown>,
    /// Final gap in percent, if a reference is known.
    pub gap: Option<f64>,
    /// Attempts across all phases.
    pub iterations: u64,
    /// Total wall-clock time.
    pub elapsed: Duration,
    /// The phases that ran, in order.
    pub phases: Vec<PhaseReport>,
}

impl SolveResult {
    /// Total cost of the returned solution.
    pub fn cost(&self) -> f64 {
        self.solution.cost()
    }
}

/// Incumbent plus the global counters shared by all phases.
struct Search<'a> {
    problem: &'a Problem,
    best: Solution,
    best_known: Option<BestKnown>,
    gap_target: f64,
    iterations: u64,
}

impl Search<'_> {
    fn target_reached(&self) -> bool {
        gap_percent(self.best.cost(), self.best_known).is_some_and(|g| g <= self.gap_target)
    }

    /// Replaces the incumbent if `candidate` is strictly cheaper.
    fn offer(&mut self, phase: Phase, candidate: Solution) -> bool {
        if candidate.cost() >= self.best.cost() - EPSILON {
            return false;
        }
        self.best = candidate;
        match gap_percent(self.best.cost(), self.best_known) {
            Some(gap) => log::debug!(
                "{phase}: iteration {}, cost {:.2}, gap {gap:.2}%",
                self.iterations,
                self.best.cost()
            ),
            None => log::debug!(
                "{phase}: iteration {}, cost {:.2}",
                self.iterations,
                self.best.cost()
            ),
        }
        true
    }

    fn report(&self, phase: Phase, budget: &Budget, improvements: u64) -> PhaseReport {
        PhaseReport {
            phase,
            iterations: budget.iterations_done(),
            improvements,
            best_cost: self.best.cost(),
            elapsed: budget.elapsed(),
        }
    }
}

/// The four-phase CARP solver.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem};
/// use u_carp::solver::{Solver, SolverConfig};
///
/// let graph = Graph::new(4, vec![
///     Edge::required(1, 2, 2.0, 3),
///     Edge::required(2, 3, 2.0, 3),
///     Edge::required(3, 4, 2.0, 3),
///     Edge::required(4, 1, 2.0, 3),
/// ]);
/// let problem = Problem::new(Instance::new("square", graph, 1, 6).unwrap()).unwrap();
///
/// let config = SolverConfig::default().with_iteration_limits(10, 10, 10, 5);
/// let solver = Solver::new(config).unwrap();
/// let result = solver.solve(&problem, None).unwrap();
///
/// assert_eq!(result.solution.num_served(), 4);
/// assert!(result.solution.routes().iter().all(|r| r.load() <= 6));
/// assert_eq!(result.cost(), 16.0); // two routes of two tasks each
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver after validating `config`.
    ///
    /// # Errors
    ///
    /// [`CarpError::InvalidConfig`](crate::CarpError::InvalidConfig) if a
    /// parameter is out of range.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Preprocesses `instance` and solves it, looking the best-known cost up
    /// in the built-in table by instance name.
    ///
    /// # Errors
    ///
    /// Any error of [`Problem::new`], in particular
    /// [`CarpError::InfeasibleDemand`](crate::CarpError::InfeasibleDemand)
    /// and [`CarpError::Unreachable`](crate::CarpError::Unreachable), raised
    /// before any construction starts.
    pub fn solve_instance(&self, instance: Instance) -> Result<SolveResult> {
        let best_known = BestKnown::for_instance(instance.name());
        let problem = Problem::new(instance)?;
        self.solve(&problem, best_known)
    }

    /// Runs the phases on `problem`.
    ///
    /// Without a best-known cost every phase runs to its limit.
    pub fn solve(&self, problem: &Problem, best_known: Option<BestKnown>) -> Result<SolveResult> {
        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut search = Search {
            problem,
            best: trivial_solution(problem),
            best_known,
            gap_target: self.config.gap_target,
            iterations: 0,
        };
        let mut phases = Vec::new();

        log::info!(
            "solving {}: {} tasks, capacity {}, initial cost {:.2}",
            problem.instance().name(),
            problem.num_tasks(),
            problem.capacity(),
            search.best.cost()
        );

        let mut phase = if problem.num_tasks() == 0 {
            Phase::Done
        } else {
            Phase::Phase1
        };
        while phase != Phase::Done {
            if search.target_reached() {
                log::info!("gap target {:.2}% reached, skipping {phase}", self.config.gap_target);
                break;
            }
            log::info!("entering {phase}, incumbent {:.2}", search.best.cost());
            let report = match phase {
                Phase::Phase1 => self.grasp_phase(&mut search, &mut rng),
                Phase::Phase2 => self.split_phase(&mut search, &mut rng)?,
                Phase::Phase3 => self.vns_phase(&mut search, &mut rng),
                Phase::Phase4 => self.ejection_phase(&mut search),
                Phase::Done => break,
            };
            log::info!(
                "{phase} finished: {} iterations, {} improvements, best {:.2}",
                report.iterations,
                report.improvements,
                report.best_cost
            );
            phases.push(report);
            phase = phase.next();
        }

        let mut solution = search.best;
        solution.recompute(problem);
        let gap = gap_percent(solution.cost(), best_known);
        let elapsed = started.elapsed();
        log::info!(
            "{}: cost {:.2}, gap {}, {} iterations, {:.2}s",
            problem.instance().name(),
            solution.cost(),
            gap.map_or_else(|| "n/a".to_string(), |g| format!("{g:.2}%")),
            search.iterations,
            elapsed.as_secs_f64()
        );

        Ok(SolveResult {
            solution,
            best_known,
            gap,
            iterations: search.iterations,
            elapsed,
            phases,
        })
    }

    fn grasp_phase(&self, search: &mut Search<'_>, rng: &mut StdRng) -> PhaseReport {
        let mut budget = self.config.phase1.budget();
        let ls = LocalSearch::full();
        let mut improvements = 0;
        while !budget.expired() {
            let mut sol = grasp_path_scanning(search.problem, self.config.alpha, rng);
            ls.run(search.problem, &mut sol, &budget);
            budget.tick();
            search.iterations += 1;
            if search.offer(Phase::Phase1, sol) {
                improvements += 1;
                if search.target_reached() {
                    break;
                }
            }
        }
        search.report(Phase::Phase1, &budget, improvements)
    }

    fn split_phase(&self, search: &mut Search<'_>, rng: &mut StdRng) -> Result<PhaseReport> {
        let mut budget = self.config.phase2.budget();
        let ls = LocalSearch::two_opt();
        let mut improvements = 0;
        while !budget.expired() {
            let tour = self.config.giant_tour.build(search.problem, rng);
            let mut sol = split(search.problem, tour.services())?.into_solution(search.problem);
            ls.run(search.problem, &mut sol, &budget);
            budget.tick();
            search.iterations += 1;
            if search.offer(Phase::Phase2, sol) {
                improvements += 1;
                if search.target_reached() {
                    break;
                }
            }
        }
        Ok(search.report(Phase::Phase2, &budget, improvements))
    }

    fn vns_phase(&self, search: &mut Search<'_>, rng: &mut StdRng) -> PhaseReport {
        let mut budget = self.config.phase3_limit().budget();
        let best_known = search.best_known;
        let target = search.gap_target;
        let result = VnsRunner::run(
            search.problem,
            search.best.clone(),
            &self.config.vns,
            &mut budget,
            rng,
            |s| gap_percent(s.cost(), best_known).is_some_and(|g| g <= target),
        );
        search.iterations += result.iterations;
        // VNS starts from the incumbent, so every new VNS best is a new incumbent
        let improvements = if search.offer(Phase::Phase3, result.best) {
            result.improvements
        } else {
            0
        };
        search.report(Phase::Phase3, &budget, improvements)
    }

    fn ejection_phase(&self, search: &mut Search<'_>) -> PhaseReport {
        let mut budget = self.config.phase4.budget();
        let mut current = search.best.clone();
        let mut improvements = 0;
        while !budget.expired() {
            let improved = ejection_chain_step(search.problem, &mut current, self.config.chain_depth);
            budget.tick();
            search.iterations += 1;
            if !improved {
                log::debug!("phase 4: no improving chain of depth <= {}", self.config.chain_depth);
                break;
            }
            if search.offer(Phase::Phase4, current.clone()) {
                improvements += 1;
                if search.target_reached() {
                    break;
                }
            }
        }
        search.report(Phase::Phase4, &budget, improvements)
    }
}
