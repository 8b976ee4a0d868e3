//! Inter-route task relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each task from its current route to every position of every
//! other route that has spare capacity, in both service directions. Each
//! step applies the single best improving move found.
//!
//! # Complexity
//!
//! O(m² × R) per step where m = number of tasks, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::evaluation::{
    apply_relocate, evaluate_relocate, insertion_delta, MoveEval, RelocateMove,
};
use crate::models::{Problem, ServedTask, Solution};

/// Finds the best improving inter-route relocation.
///
/// Ties keep the first move in scan order.
pub fn find_best_relocate(
    problem: &Problem,
    solution: &Solution,
) -> Option<(RelocateMove, MoveEval)> {
    let routes = solution.routes();
    let capacity = problem.capacity();
    let mut best: Option<(RelocateMove, MoveEval)> = None;

    for (from_route, source) in routes.iter().enumerate() {
        for (from_pos, s) in source.services().iter().enumerate() {
            let demand = problem.demand(s.task);
            for (to_route, dest) in routes.iter().enumerate() {
                if to_route == from_route || dest.load() + demand > capacity {
                    continue;
                }
                for to_pos in 0..=dest.len() {
                    for reversed in [false, true] {
                        let mv = RelocateMove {
                            from_route,
                            from_pos,
                            to_route,
                            to_pos,
                            reversed,
                        };
                        let eval = evaluate_relocate(problem, solution, &mv);
                        if eval.is_improving()
                            && best.as_ref().is_none_or(|(_, b)| eval.delta < b.delta)
                        {
                            best = Some((mv, eval));
                        }
                    }
                }
            }
        }
    }
    best
}

/// Applies the best improving relocation, if any, and drops a route the
/// move left empty. Returns `true` if a move was applied.
pub fn relocate_step(problem: &Problem, solution: &mut Solution) -> bool {
    match find_best_relocate(problem, solution) {
        Some((mv, eval)) => {
            log::trace!("relocate {mv:?} delta {:.3}", eval.delta);
            apply_relocate(problem, solution, &mv);
            solution.remove_empty_routes();
            true
        }
        None => false,
    }
}

/// Relocates tasks between routes until no move improves the solution.
/// Returns the number of moves applied.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem, Route, ServedTask, Solution};
/// use u_carp::local_search::relocate_improve;
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 1.0, 1),
///     Edge::required(2, 3, 1.0, 1),
///     Edge::required(3, 1, 1.0, 1),
/// ]);
/// let problem = Problem::new(Instance::new("tri", graph, 1, 3).unwrap()).unwrap();
///
/// // one task per route
/// let routes = (0..3)
///     .map(|t| Route::from_services(&problem, vec![ServedTask::forward(t)]))
///     .collect();
/// let mut sol = Solution::from_routes(routes);
/// assert_eq!(sol.cost(), 7.0);
///
/// relocate_improve(&problem, &mut sol);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.cost(), 3.0);
/// ```
pub fn relocate_improve(problem: &Problem, solution: &mut Solution) -> usize {
    let mut moves = 0;
    while relocate_step(problem, solution) {
        moves += 1;
    }
    moves
}

/// Cheapest place to insert `task` into `seq`: `(position, reversed, delta)`.
///
/// Ties keep the earliest position, forward before reversed.
pub(crate) fn best_insertion(
    problem: &Problem,
    seq: &[ServedTask],
    task: usize,
) -> (usize, bool, f64) {
    let mut best = (0, false, f64::INFINITY);
    for pos in 0..=seq.len() {
        for reversed in [false, true] {
            let delta = insertion_delta(problem, seq, None, pos, ServedTask { task, reversed });
            if delta < best.2 {
                best = (pos, reversed, delta);
            }
        }
    }
    best
}
