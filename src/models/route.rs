//! Closed vehicle routes over oriented tasks.

use super::{Problem, ServedTask};

/// An ordered sequence of serviced tasks, starting and ending at the depot
/// (the depot is not stored).
///
/// `load` and `cost` are cached. Move application keeps them up to date
/// incrementally; [`Route::recompute`] rebuilds them from scratch.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem, Route, ServedTask};
///
/// let graph = Graph::new(2, vec![Edge::required(1, 2, 3.0, 4)]);
/// let problem = Problem::new(Instance::new("x", graph, 1, 10).unwrap()).unwrap();
///
/// let route = Route::from_services(&problem, vec![ServedTask::forward(0)]);
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.load(), 4);
/// assert_eq!(route.cost(), 6.0); // 1→2 serviced, 2→1 deadhead
/// assert_eq!(route.vertex_path(&problem), vec![1, 1, 2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    services: Vec<ServedTask>,
    load: i32,
    cost: f64,
}

impl Route {
    /// Creates an empty route.
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
            load: 0,
            cost: 0.0,
        }
    }

    /// Creates a route over the given sequence, computing load and cost.
    pub fn from_services(problem: &Problem, services: Vec<ServedTask>) -> Self {
        let load = problem.route_load(&services);
        let cost = problem.route_cost(&services);
        Self {
            services,
            load,
            cost,
        }
    }

    /// The serviced tasks in order.
    pub fn services(&self) -> &[ServedTask] {
        &self.services
    }

    /// Number of tasks serviced.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if the route services nothing.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Total demand collected.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Service plus deadhead cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Task ids in service order.
    pub fn task_ids(&self) -> Vec<usize> {
        self.services.iter().map(|s| s.task).collect()
    }

    /// Vertex sequence: depot, then entry and exit vertex of every task,
    /// then depot. Deadhead paths between tasks are implied.
    pub fn vertex_path(&self, problem: &Problem) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.services.len() * 2 + 2);
        path.push(problem.depot());
        for &s in &self.services {
            let (entry, exit) = problem.endpoints(s);
            path.push(entry);
            path.push(exit);
        }
        path.push(problem.depot());
        path
    }

    /// Rebuilds load and cost from the task sequence.
    pub fn recompute(&mut self, problem: &Problem) {
        self.load = problem.route_load(&self.services);
        self.cost = problem.route_cost(&self.services);
    }

    pub(crate) fn services_mut(&mut self) -> &mut Vec<ServedTask> {
        &mut self.services
    }

    pub(crate) fn add_load(&mut self, delta: i32) {
        self.load += delta;
    }

    pub(crate) fn add_cost(&mut self, delta: f64) {
        self.cost += delta;
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}
