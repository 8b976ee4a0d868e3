//! One-route-per-task solution.

use crate::models::{Problem, Route, ServedTask, Solution};

/// Services every task in its own route, in input direction.
///
/// Always feasible once [`Problem`] construction has succeeded, so it is a
/// safe starting incumbent before any heuristic runs.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem};
/// use u_carp::constructive::trivial_solution;
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 2.0, 1),
///     Edge::required(2, 3, 2.0, 1),
/// ]);
/// let problem = Problem::new(Instance::new("x", graph, 1, 5).unwrap()).unwrap();
/// let sol = trivial_solution(&problem);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.cost(), 4.0 + 8.0);
/// ```
pub fn trivial_solution(problem: &Problem) -> Solution {
    Solution::from_routes(
        (0..problem.num_tasks())
            .map(|t| Route::from_services(problem, vec![ServedTask::forward(t)]))
            .collect(),
    )
}
