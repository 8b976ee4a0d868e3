//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For every contiguous run of tasks `r[i..=j]` in a route, compute the
//! change in cost from reversing the run (which also flips the service
//! direction of each task in it):
//!
//! ```text
//! delta = d(prev, exit(r[j])) + d(entry(r[i]), next)
//!       - d(prev, entry(r[i])) - d(exit(r[j]), next)
//! ```
//!
//! Deadheads inside the run keep their cost because distances are
//! symmetric. Each step applies the best improving reversal over all routes.
//!
//! # Complexity
//!
//! O(n²) per step for a route of n tasks.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::evaluation::{apply_two_opt, evaluate_two_opt, MoveEval, TwoOptMove};
use crate::models::{Problem, Solution};

/// Finds the best improving reversal across all routes.
///
/// Ties keep the first move in scan order (route, start, end).
pub fn find_best_two_opt(problem: &Problem, solution: &Solution) -> Option<(TwoOptMove, MoveEval)> {
    let mut best: Option<(TwoOptMove, MoveEval)> = None;
    for (route, r) in solution.routes().iter().enumerate() {
        let n = r.len();
        for start in 0..n {
            for end in start..n {
                let mv = TwoOptMove { route, start, end };
                let eval = evaluate_two_opt(problem, solution, &mv);
                if eval.is_improving() && best.as_ref().is_none_or(|(_, b)| eval.delta < b.delta) {
                    best = Some((mv, eval));
                }
            }
        }
    }
    best
}

/// Applies the best improving reversal, if any. Returns `true` if a move
/// was applied.
pub fn two_opt_step(problem: &Problem, solution: &mut Solution) -> bool {
    match find_best_two_opt(problem, solution) {
        Some((mv, eval)) => {
            log::trace!("2-opt {mv:?} delta {:.3}", eval.delta);
            apply_two_opt(problem, solution, &mv);
            true
        }
        None => false,
    }
}

/// Applies 2-opt until no reversal improves any route. Returns the number
/// of moves applied.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem, Route, ServedTask, Solution};
/// use u_carp::local_search::two_opt_improve;
///
/// let graph = Graph::new(4, vec![
///     Edge::required(1, 2, 1.0, 1),
///     Edge::required(2, 3, 1.0, 1),
///     Edge::required(3, 4, 1.0, 1),
/// ]);
/// let problem = Problem::new(Instance::new("path", graph, 1, 5).unwrap()).unwrap();
///
/// // tasks serviced in a zig-zag order
/// let services = vec![ServedTask::backward(2), ServedTask::forward(1), ServedTask::forward(0)];
/// let mut sol = Solution::from_routes(vec![Route::from_services(&problem, services)]);
/// let before = sol.cost();
///
/// two_opt_improve(&problem, &mut sol);
/// assert!(sol.cost() < before);
/// assert_eq!(sol.cost(), 6.0); // 1→4 deadhead, 4→3→2→1 serviced
/// ```
pub fn two_opt_improve(problem: &Problem, solution: &mut Solution) -> usize {
    let mut moves = 0;
    while two_opt_step(problem, solution) {
        moves += 1;
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, Graph, Instance, Route, ServedTask};

    fn ring() -> Problem {
        let edges = (1..=6)
            .map(|v| Edge::required(v, v % 6 + 1, 1.0, 1))
            .collect::<Vec<_>>();
        Problem::new(Instance::new("ring", Graph::new(6, edges), 1, 10).expect("valid"))
            .expect("feasible")
    }

    fn single_route(p: &Problem, services: Vec<ServedTask>) -> Solution {
        Solution::from_routes(vec![Route::from_services(p, services)])
    }

    #[test]
    fn test_2opt_already_optimal() {
        let p = ring();
        let services: Vec<_> = (0..6).map(ServedTask::forward).collect();
        let mut sol = single_route(&p, services.clone());
        assert_eq!(two_opt_improve(&p, &mut sol), 0);
        assert_eq!(sol.routes()[0].services(), services.as_slice());
        assert_eq!(sol.cost(), 6.0);
    }

    #[test]
    fn test_2opt_fixes_reversed_block() {
        let p = ring();
        let f = ServedTask::forward;
        let b = ServedTask::backward;
        let mut sol = single_route(&p, vec![f(0), b(3), b(2), b(1), f(4), f(5)]);
        let before = sol.cost();
        assert!(two_opt_improve(&p, &mut sol) > 0);
        assert!(sol.cost() < before);
        assert_eq!(sol.cost(), 6.0);
        assert!((sol.cost() - sol.recomputed_cost(&p)).abs() < 1e-9);
    }

    #[test]
    fn test_2opt_empty_and_single() {
        let p = ring();
        let mut sol = Solution::from_routes(vec![Route::new()]);
        assert_eq!(two_opt_improve(&p, &mut sol), 0);

        let mut sol = single_route(&p, vec![ServedTask::backward(0)]);
        two_opt_improve(&p, &mut sol);
        // 1→2 forward and 2→1 backward cost the same on a ring
        assert!((sol.cost() - sol.recomputed_cost(&p)).abs() < 1e-9);
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let p = ring();
        let f = ServedTask::forward;
        let b = ServedTask::backward;
        let mut sol = single_route(&p, vec![b(4), f(1), b(5), f(0), b(3), f(2)]);
        let before = sol.cost();
        two_opt_improve(&p, &mut sol);
        assert!(sol.cost() <= before + 1e-9);
        assert!((sol.cost() - sol.recomputed_cost(&p)).abs() < 1e-9);
    }
}
