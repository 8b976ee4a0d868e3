//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Start from the given incumbent x, set k = 0
//! 2. While the budget lasts:
//!    a. **Shaking**: apply kick k to a copy of x
//!    b. **Local search**: descend from the kicked copy → x''
//!    c. **Move or not**: if f(x'') < f(x), set x = x'' and k = 0;
//!    otherwise accept x'' only if f(x'') = f(x), and set k = k + 1
//!    d. If k = k_max, reset k = 0 (one full pass done)
//! 3. Return the best solution found
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use rand::Rng;

use super::config::VnsConfig;
use crate::budget::Budget;
use crate::evaluation::EPSILON;
use crate::models::{Problem, Solution};

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Best solution found.
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Kicks executed.
    pub iterations: u64,
    /// Iteration at which the best solution was found (0 = the start).
    pub best_iteration: u64,
    /// How many times the best solution was replaced.
    pub improvements: u64,
    /// Best cost after each full pass through the kicks.
    pub cost_history: Vec<f64>,
    /// Whether the run ended because the stop condition accepted the best
    /// solution.
    pub target_reached: bool,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Runs Basic VNS from `initial` until `budget` expires, the stagnation
    /// limit is hit, or `stop` returns `true` for a new best solution.
    ///
    /// Ticks `budget` once per kick.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use u_carp::budget::Budget;
    /// use u_carp::constructive::trivial_solution;
    /// use u_carp::models::{Edge, Graph, Instance, Problem};
    /// use u_carp::vns::{VnsConfig, VnsRunner};
    ///
    /// let graph = Graph::new(4, vec![
    ///     Edge::required(1, 2, 1.0, 1),
    ///     Edge::required(2, 3, 1.0, 1),
    ///     Edge::required(3, 4, 1.0, 1),
    ///     Edge::required(4, 1, 1.0, 1),
    /// ]);
    /// let problem = Problem::new(Instance::new("square", graph, 1, 4).unwrap()).unwrap();
    /// let start = trivial_solution(&problem);
    ///
    /// let mut budget = Budget::iterations(50);
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let result = VnsRunner::run(&problem, start.clone(), &VnsConfig::default(), &mut budget, &mut rng, |_| false);
    /// assert!(result.best_cost <= start.cost());
    /// assert_eq!(result.iterations, 50);
    /// ```
    pub fn run<R, F>(
        problem: &Problem,
        initial: Solution,
        config: &VnsConfig,
        budget: &mut Budget,
        rng: &mut R,
        mut stop: F,
    ) -> VnsResult
    where
        R: Rng,
        F: FnMut(&Solution) -> bool,
    {
        let k_max = config.kicks.len();
        let mut current = initial;
        let mut best = current.clone();
        let mut best_iteration = 0;
        let mut improvements = 0u64;
        let mut cost_history = Vec::new();
        let mut no_improve = 0u64;
        let mut iterations = 0u64;
        let mut target_reached = false;
        let mut k = 0;

        while k_max > 0 && !budget.expired() {
            if config.max_no_improve.is_some_and(|limit| no_improve >= limit) {
                break;
            }

            // Shaking in neighborhood k, then descent
            let mut candidate = current.clone();
            config.kicks[k].apply(problem, &mut candidate, rng);
            config.local_search.run(problem, &mut candidate, budget);
            budget.tick();
            iterations += 1;

            if candidate.cost() < current.cost() - EPSILON {
                // Improvement found: accept and reset to the mildest kick
                current = candidate;
                k = 0;
                no_improve = 0;
                if current.cost() < best.cost() - EPSILON {
                    best = current.clone();
                    best_iteration = iterations;
                    improvements += 1;
                    log::debug!("vns: iteration {iterations}, cost {:.3}", best.cost());
                    if stop(&best) {
                        target_reached = true;
                        break;
                    }
                }
            } else {
                if candidate.cost() <= current.cost() + EPSILON {
                    current = candidate;
                }
                k += 1;
                no_improve += 1;
                if k == k_max {
                    k = 0;
                    cost_history.push(best.cost());
                }
            }
        }

        VnsResult {
            best_cost: best.cost(),
            best,
            iterations,
            best_iteration,
            improvements,
            cost_history,
            target_reached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::trivial_solution;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Edge, Graph, Instance};
    use crate::vns::Kick;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 4x4 grid with tasks on every horizontal edge.
    fn grid() -> Problem {
        let id = |r: usize, c: usize| r * 4 + c + 1;
        let mut edges = Vec::new();
        for r in 0..4 {
            for c in 0..4 {
                if c < 3 {
                    edges.push(Edge::required(id(r, c), id(r, c + 1), 1.0 + c as f64, 1 + (r as i32) % 2));
                }
                if r < 3 {
                    edges.push(Edge::deadhead(id(r, c), id(r + 1, c), 2.0));
                }
            }
        }
        Problem::new(Instance::new("grid", Graph::new(16, edges), 1, 6).expect("valid"))
            .expect("feasible")
    }

    fn run(seed: u64, iterations: u64) -> VnsResult {
        let p = grid();
        let mut budget = Budget::iterations(iterations);
        let mut rng = StdRng::seed_from_u64(seed);
        VnsRunner::run(&p, trivial_solution(&p), &VnsConfig::default(), &mut budget, &mut rng, |_| false)
    }

    #[test]
    fn test_vns_improves_and_stays_valid() {
        let p = grid();
        let start = trivial_solution(&p).cost();
        let result = run(7, 200);
        assert!(result.best_cost < start);
        assert!(result.improvements >= 1);
        assert!(result.best_iteration >= result.improvements);
        assert_eq!(result.best_cost, result.best.cost());
        assert!(RouteEvaluator::new(&p).validate(&result.best).is_empty());
        assert!((result.best.cost() - result.best.recomputed_cost(&p)).abs() < 1e-6);
    }

    #[test]
    fn test_vns_deterministic_with_iteration_budget() {
        let a = run(11, 100);
        let b = run(11, 100);
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_iteration, b.best_iteration);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_vns_history_non_increasing() {
        let result = run(3, 300);
        for pair in result.cost_history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_vns_stop_condition() {
        let p = grid();
        let mut budget = Budget::iterations(1000);
        let mut rng = StdRng::seed_from_u64(1);
        let result = VnsRunner::run(&p, trivial_solution(&p), &VnsConfig::default(), &mut budget, &mut rng, |_| true);
        assert!(result.target_reached);
        assert_eq!(result.iterations, result.best_iteration);
        assert_eq!(result.improvements, 1);
        assert!(result.iterations < 1000);
    }

    #[test]
    fn test_vns_stagnation_limit() {
        let p = grid();
        let config = VnsConfig::default()
            .with_kicks(vec![Kick::SegmentReversal])
            .with_max_no_improve(5);
        let mut budget = Budget::iterations(10_000);
        let mut rng = StdRng::seed_from_u64(2);
        let result = VnsRunner::run(&p, trivial_solution(&p), &config, &mut budget, &mut rng, |_| false);
        assert!(result.iterations < 10_000);
    }

    #[test]
    fn test_vns_no_kicks() {
        let p = grid();
        let config = VnsConfig::default().with_kicks(vec![]);
        let mut budget = Budget::iterations(10);
        let mut rng = StdRng::seed_from_u64(2);
        let start = trivial_solution(&p);
        let result = VnsRunner::run(&p, start.clone(), &config, &mut budget, &mut rng, |_| false);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.best, start);
    }
}
