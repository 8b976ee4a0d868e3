//! Split procedure for partitioning a giant tour into feasible routes.
//!
//! # Algorithm
//!
//! Given a giant tour (oriented permutation of tasks), finds the optimal
//! partition into contiguous sub-routes such that each route respects
//! vehicle capacity and the total cost is minimized.
//!
//! Models the problem as a shortest-path problem on an auxiliary DAG where
//! node i represents the boundary after task i, and edge (i, j) represents
//! serving tasks i+1..=j in one route, weighted by that route's cost.
//!
//! # Complexity
//!
//! O(n²) where n = number of tasks (worst case when all tasks fit in a
//! single route). In practice much faster due to capacity pruning.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

use crate::error::{CarpError, Result};
use crate::models::{Problem, Route, ServedTask, Solution};

/// Result of the split algorithm.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Routes as oriented task sequences.
    pub routes: Vec<Vec<ServedTask>>,
    /// Total cost of all routes.
    pub total_cost: f64,
}

impl SplitResult {
    /// Converts the partition into a [`Solution`].
    pub fn into_solution(self, problem: &Problem) -> Solution {
        Solution::from_routes(
            self.routes
                .into_iter()
                .map(|s| Route::from_services(problem, s))
                .collect(),
        )
    }
}

/// Splits a giant tour into optimal sub-routes using dynamic programming.
///
/// Task order and service directions are kept; only the cut points are
/// chosen. Among equally cheap partitions the one with the earliest cuts
/// wins.
///
/// # Errors
///
/// [`CarpError::InfeasibleDemand`] if a single task exceeds capacity.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem, ServedTask};
/// use u_carp::constructive::split;
///
/// // path 1-2-3-4 with a task on each edge, demand 1
/// let graph = Graph::new(4, vec![
///     Edge::required(1, 2, 1.0, 1),
///     Edge::required(2, 3, 1.0, 1),
///     Edge::required(3, 4, 1.0, 1),
/// ]);
/// let problem = Problem::new(Instance::new("path", graph, 1, 3).unwrap()).unwrap();
/// let tour: Vec<_> = (0..3).map(ServedTask::forward).collect();
///
/// let result = split(&problem, &tour).unwrap();
/// assert_eq!(result.routes.len(), 1); // all fit in one route
/// assert_eq!(result.total_cost, 6.0);
/// ```
pub fn split(problem: &Problem, tour: &[ServedTask]) -> Result<SplitResult> {
    let capacity = problem.capacity();
    if let Some(s) = tour.iter().find(|s| problem.demand(s.task) > capacity) {
        return Err(CarpError::InfeasibleDemand {
            task: s.task,
            demand: problem.demand(s.task),
            capacity,
        });
    }

    let n = tour.len();
    if n == 0 {
        return Ok(SplitResult {
            routes: vec![],
            total_cost: 0.0,
        });
    }

    // cost[i] = minimum total cost to serve tour[0..i]
    // pred[i] = start of the last route ending at i
    let mut cost = vec![f64::INFINITY; n + 1];
    let mut pred = vec![0usize; n + 1];
    cost[0] = 0.0;

    for i in 0..n {
        if cost[i] == f64::INFINITY {
            continue;
        }

        let mut load = 0i32;
        let mut route_cost = 0.0;

        for j in i..n {
            let s = tour[j];
            load += problem.demand(s.task);
            if load > capacity {
                break;
            }

            let service = problem.tasks()[s.task].service_cost();
            if j == i {
                route_cost = problem.link(None, Some(s)) + service;
            } else {
                route_cost += problem.link(Some(tour[j - 1]), Some(s)) + service;
            }

            let new_cost = cost[i] + route_cost + problem.link(Some(s), None);
            if new_cost < cost[j + 1] {
                cost[j + 1] = new_cost;
                pred[j + 1] = i;
            }
        }
    }

    let mut routes = Vec::new();
    let mut j = n;
    while j > 0 {
        let i = pred[j];
        routes.push(tour[i..j].to_vec());
        j = i;
    }
    routes.reverse();

    Ok(SplitResult {
        routes,
        total_cost: cost[n],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, Graph, Instance};
    use proptest::prelude::*;

    /// Path 1-2-3-4 with unit tasks on each edge.
    fn path_problem(capacity: i32) -> Problem {
        let graph = Graph::new(
            4,
            vec![
                Edge::required(1, 2, 1.0, 1),
                Edge::required(2, 3, 1.0, 1),
                Edge::required(3, 4, 1.0, 1),
            ],
        );
        Problem::new(Instance::new("path", graph, 1, capacity).expect("valid")).expect("ok")
    }

    fn forward(ids: &[usize]) -> Vec<ServedTask> {
        ids.iter().map(|&t| ServedTask::forward(t)).collect()
    }

    #[test]
    fn test_split_single_route() {
        let p = path_problem(3);
        let result = split(&p, &forward(&[0, 1, 2])).expect("feasible");
        assert_eq!(result.routes.len(), 1);
        // 1→2→3→4 serviced (3) + 4→1 deadhead (3)
        assert_eq!(result.total_cost, 6.0);
    }

    #[test]
    fn test_split_forced_two_routes() {
        let p = path_problem(2);
        let result = split(&p, &forward(&[0, 1, 2])).expect("feasible");
        assert_eq!(result.routes.len(), 2);
        // [0] + [1,2] = 2 + 6 = 8 beats [0,1] + [2] = 4 + 6 = 10
        assert_eq!(result.routes[0], forward(&[0]));
        assert_eq!(result.routes[1], forward(&[1, 2]));
        assert_eq!(result.total_cost, 8.0);
    }

    #[test]
    fn test_split_each_alone() {
        let p = path_problem(1);
        let result = split(&p, &forward(&[0, 1, 2])).expect("feasible");
        assert_eq!(result.routes.len(), 3);
        // 2 + 4 + 6
        assert_eq!(result.total_cost, 12.0);
    }

    #[test]
    fn test_split_empty() {
        let p = path_problem(3);
        let result = split(&p, &[]).expect("feasible");
        assert!(result.routes.is_empty());
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_split_keeps_directions() {
        let p = path_problem(3);
        let tour = vec![ServedTask::backward(2), ServedTask::backward(1)];
        let result = split(&p, &tour).expect("feasible");
        assert_eq!(result.routes, vec![tour]);
        // 1→4 (3) + 4→3→2 serviced (2) + 2→1 (1)
        assert_eq!(result.total_cost, 6.0);
    }

    #[test]
    fn test_into_solution_matches_cost() {
        let p = path_problem(2);
        let result = split(&p, &forward(&[2, 0, 1])).expect("feasible");
        let total = result.total_cost;
        let sol = result.into_solution(&p);
        assert!((sol.cost() - total).abs() < 1e-9);
        assert!((sol.recomputed_cost(&p) - total).abs() < 1e-9);
    }

    /// Cheapest partition of `tour` into contiguous feasible segments, by
    /// enumerating every set of cut points.
    fn brute_force(problem: &Problem, tour: &[ServedTask]) -> f64 {
        let n = tour.len();
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << (n - 1)) {
            let mut total = 0.0;
            let mut start = 0;
            let mut feasible = true;
            for end in 1..=n {
                let cut = end == n || mask & (1 << (end - 1)) != 0;
                if !cut {
                    continue;
                }
                let seg = &tour[start..end];
                if problem.route_load(seg) > problem.capacity() {
                    feasible = false;
                    break;
                }
                total += problem.route_cost(seg);
                start = end;
            }
            if feasible && total < best {
                best = total;
            }
        }
        best
    }

    /// A cycle 1..=n+1 whose first n edges are tasks, plus a chord.
    fn cycle_problem(costs: &[u8], demands: &[u8], capacity: i32) -> Problem {
        let n = costs.len();
        let mut edges: Vec<Edge> = (0..n)
            .map(|i| Edge::required(i + 1, i + 2, costs[i] as f64, demands[i] as i32))
            .collect();
        edges.push(Edge::deadhead(n + 1, 1, 4.0));
        edges.push(Edge::deadhead(1, n / 2 + 1, 3.0));
        Problem::new(Instance::new("cycle", Graph::new(n + 1, edges), 1, capacity).expect("valid"))
            .expect("feasible")
    }

    proptest! {
        #[test]
        fn prop_split_is_optimal_for_fixed_order(
            (costs, demands, order, dirs) in (2usize..=7).prop_flat_map(|n| (
                prop::collection::vec(1u8..10, n),
                prop::collection::vec(1u8..=5, n),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
                prop::collection::vec(any::<bool>(), n),
            )),
            capacity in 5i32..=12,
        ) {
            let problem = cycle_problem(&costs, &demands, capacity);
            let tour: Vec<ServedTask> = order
                .iter()
                .zip(&dirs)
                .map(|(&task, &reversed)| ServedTask { task, reversed })
                .collect();

            let result = split(&problem, &tour).expect("every task fits");
            let oracle = brute_force(&problem, &tour);
            prop_assert!((result.total_cost - oracle).abs() < 1e-9);

            let flat: Vec<ServedTask> = result.routes.iter().flatten().copied().collect();
            prop_assert_eq!(flat, tour);
            for r in &result.routes {
                prop_assert!(problem.route_load(r) <= capacity);
            }
        }
    }
}
