//! Neighborhood sweep driver.

use serde::{Deserialize, Serialize};

use super::ejection::shallow_ejection_step;
use super::relocate::relocate_step;
use super::two_opt::two_opt_step;
use crate::budget::Budget;
use crate::models::{Problem, Solution};

/// A local search neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Intra-route segment reversal, see [`two_opt_step`](super::two_opt_step).
    TwoOpt,
    /// Inter-route task move, see [`relocate_step`](super::relocate_step).
    Relocate,
    /// Remove-and-reinsert anywhere, see
    /// [`shallow_ejection_step`](super::shallow_ejection_step).
    ShallowEjection,
}

impl Neighborhood {
    /// Applies this neighborhood's improving move, if one exists.
    pub fn step(self, problem: &Problem, solution: &mut Solution) -> bool {
        match self {
            Neighborhood::TwoOpt => two_opt_step(problem, solution),
            Neighborhood::Relocate => relocate_step(problem, solution),
            Neighborhood::ShallowEjection => shallow_ejection_step(problem, solution),
        }
    }

    /// Short lowercase name, used in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::TwoOpt => "2-opt",
            Neighborhood::Relocate => "relocate",
            Neighborhood::ShallowEjection => "shallow-ejection",
        }
    }
}

/// Descent over an ordered list of neighborhoods.
///
/// Neighborhoods are tried in order; after any improving move the sweep
/// starts again from the first one. It stops at a solution that is locally
/// optimal for all of them, or when the budget expires.
///
/// # Examples
///
/// ```
/// use u_carp::budget::Budget;
/// use u_carp::local_search::LocalSearch;
/// use u_carp::models::{Edge, Graph, Instance, Problem, Route, ServedTask, Solution};
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 1.0, 1),
///     Edge::required(2, 3, 1.0, 1),
///     Edge::required(3, 1, 1.0, 1),
/// ]);
/// let problem = Problem::new(Instance::new("tri", graph, 1, 3).unwrap()).unwrap();
/// let routes = vec![
///     Route::from_services(&problem, vec![ServedTask::backward(1)]),
///     Route::from_services(&problem, vec![ServedTask::forward(0), ServedTask::forward(2)]),
/// ];
/// let mut sol = Solution::from_routes(routes);
///
/// LocalSearch::full().run(&problem, &mut sol, &Budget::unlimited());
/// assert_eq!(sol.cost(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSearch {
    neighborhoods: Vec<Neighborhood>,
}

impl LocalSearch {
    /// Creates a sweep over the given neighborhoods, in order.
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self { neighborhoods }
    }

    /// 2-opt, then relocate, then shallow ejection.
    pub fn full() -> Self {
        Self::new(vec![
            Neighborhood::TwoOpt,
            Neighborhood::Relocate,
            Neighborhood::ShallowEjection,
        ])
    }

    /// 2-opt only.
    pub fn two_opt() -> Self {
        Self::new(vec![Neighborhood::TwoOpt])
    }

    /// The configured neighborhoods.
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Improves `solution` in place. Returns the number of moves applied.
    ///
    /// The budget is only polled, never ticked.
    pub fn run(&self, problem: &Problem, solution: &mut Solution, budget: &Budget) -> usize {
        let mut moves = 0;
        'sweep: loop {
            for &nb in &self.neighborhoods {
                if budget.expired() {
                    break 'sweep;
                }
                if nb.step(problem, solution) {
                    moves += 1;
                    continue 'sweep;
                }
            }
            break;
        }
        if moves > 0 {
            log::trace!("local search: {moves} moves, cost {:.3}", solution.cost());
        }
        moves
    }
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::full()
    }
}
