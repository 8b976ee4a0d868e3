//! Complete CARP solutions.

use super::{Problem, Route};

/// A set of routes covering every task exactly once.
///
/// The cached total cost equals the sum of route costs; move application
/// keeps both in step.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Solution, Route};
///
/// let sol = Solution::from_routes(vec![Route::new()]);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            cost: 0.0,
        }
    }

    /// Builds a solution from routes whose cached costs are already correct.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let cost = routes.iter().map(|r| r.cost()).sum();
        Self { routes, cost }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.cost += route.cost();
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total cost (incrementally maintained).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Total number of tasks serviced (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Cost recomputed from the task sequences, ignoring every cache.
    pub fn recomputed_cost(&self, problem: &Problem) -> f64 {
        self.routes
            .iter()
            .map(|r| problem.route_cost(r.services()))
            .sum()
    }

    /// Rebuilds every cached route load/cost and the total.
    pub fn recompute(&mut self, problem: &Problem) {
        for route in &mut self.routes {
            route.recompute(problem);
        }
        self.cost = self.routes.iter().map(|r| r.cost()).sum();
    }

    /// Drops routes that service nothing. Their cost is zero, so the total
    /// is unaffected.
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }

    pub(crate) fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    pub(crate) fn add_cost(&mut self, delta: f64) {
        self.cost += delta;
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}
