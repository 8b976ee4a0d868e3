//! Full-recomputation oracle: checks coverage, capacity and cached costs.

use crate::models::{Problem, Solution};

use super::EPSILON;

/// A type of defect found in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A task is serviced more than once.
    DuplicateTask {
        /// Task id.
        task: usize,
    },
    /// A task is not serviced by any route.
    MissingTask {
        /// Task id.
        task: usize,
    },
    /// A route references a task id the instance does not have.
    UnknownTask {
        /// Route index.
        route_index: usize,
        /// Offending id.
        task: usize,
    },
    /// A cached route load disagrees with its task sequence.
    LoadMismatch {
        /// Route index.
        route_index: usize,
        /// Cached load.
        cached: i32,
        /// Load recomputed from the sequence.
        actual: i32,
    },
    /// A cached cost disagrees with the recomputed one.
    CostMismatch {
        /// Route index, or `None` for the solution total.
        route_index: Option<usize>,
        /// Cached cost.
        cached: f64,
        /// Cost recomputed from the sequence.
        actual: f64,
    },
}

/// A defect in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Recomputes everything about a solution from its task sequences and
/// compares with what the solution claims.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem, Route, ServedTask, Solution};
/// use u_carp::evaluation::RouteEvaluator;
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 1.0, 3),
///     Edge::required(2, 3, 1.0, 3),
///     Edge::deadhead(3, 1, 1.0),
/// ]);
/// let problem = Problem::new(Instance::new("x", graph, 1, 5).unwrap()).unwrap();
/// let evaluator = RouteEvaluator::new(&problem);
///
/// // both tasks in one route overload the vehicle
/// let sol = Solution::from_routes(vec![Route::from_services(
///     &problem,
///     vec![ServedTask::forward(0), ServedTask::forward(1)],
/// )]);
/// assert_eq!(evaluator.validate(&sol).len(), 1);
/// assert!(!evaluator.is_feasible(&sol));
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Returns every violation found; empty means the solution is valid.
    pub fn validate(&self, solution: &Solution) -> Vec<Violation> {
        let problem = self.problem;
        let mut violations = Vec::new();
        let mut seen = vec![0usize; problem.num_tasks()];
        let mut total = 0.0;

        for (idx, route) in solution.routes().iter().enumerate() {
            let mut known = true;
            for s in route.services() {
                match seen.get_mut(s.task) {
                    Some(count) => *count += 1,
                    None => {
                        known = false;
                        violations.push(Violation::new(ViolationType::UnknownTask {
                            route_index: idx,
                            task: s.task,
                        }));
                    }
                }
            }
            if !known {
                continue;
            }

            let load = problem.route_load(route.services());
            if load > problem.capacity() {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load,
                    capacity: problem.capacity(),
                }));
            }
            if load != route.load() {
                violations.push(Violation::new(ViolationType::LoadMismatch {
                    route_index: idx,
                    cached: route.load(),
                    actual: load,
                }));
            }
            let cost = problem.route_cost(route.services());
            if (cost - route.cost()).abs() > EPSILON * cost.abs().max(1.0) {
                violations.push(Violation::new(ViolationType::CostMismatch {
                    route_index: Some(idx),
                    cached: route.cost(),
                    actual: cost,
                }));
            }
            total += cost;
        }

        for (task, &count) in seen.iter().enumerate() {
            match count {
                0 => violations.push(Violation::new(ViolationType::MissingTask { task })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateTask { task })),
            }
        }

        if (total - solution.cost()).abs() > EPSILON * total.abs().max(1.0) {
            violations.push(Violation::new(ViolationType::CostMismatch {
                route_index: None,
                cached: solution.cost(),
                actual: total,
            }));
        }

        violations
    }

    /// Returns `true` if the solution has no violations.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.validate(solution).is_empty()
    }
}
