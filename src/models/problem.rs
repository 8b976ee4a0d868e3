//! Preprocessed problem data shared read-only by every solver phase.

use super::{Instance, ServedTask, Task};
use crate::distance::DistanceMatrix;
use crate::error::{CarpError, Result};

/// An instance together with its shortest-path matrix.
///
/// Construction performs every fatal precheck (connectivity, per-task
/// demand), so heuristics operating on a `Problem` never fail.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance, Problem, ServedTask};
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 4.0, 2),
///     Edge::required(2, 3, 3.0, 1),
///     Edge::deadhead(3, 1, 5.0),
/// ]);
/// let inst = Instance::new("tiny", graph, 1, 5).unwrap();
/// let problem = Problem::new(inst).unwrap();
///
/// // 1 -(4)-> 2 -(3)-> 3, deadhead 3 -> 1 costs 5
/// let seq = [ServedTask::forward(0), ServedTask::forward(1)];
/// assert_eq!(problem.route_cost(&seq), 12.0);
/// assert_eq!(problem.route_load(&seq), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    instance: Instance,
    distances: DistanceMatrix,
}

impl Problem {
    /// Computes distances and validates that a feasible solution exists.
    ///
    /// # Errors
    ///
    /// - [`CarpError::Unreachable`] if the graph is disconnected.
    /// - [`CarpError::InfeasibleDemand`] if a task's demand exceeds capacity.
    pub fn new(instance: Instance) -> Result<Self> {
        check_demands(&instance)?;
        let distances = DistanceMatrix::shortest_paths(instance.graph())?;
        Ok(Self {
            instance,
            distances,
        })
    }

    /// The underlying instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Shortest-path matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Shortest-path cost between two vertices.
    #[inline]
    pub fn dist(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Depot vertex.
    pub fn depot(&self) -> usize {
        self.instance.depot()
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.instance.capacity()
    }

    /// Tasks, indexed by id.
    pub fn tasks(&self) -> &[Task] {
        self.instance.tasks()
    }

    /// Number of tasks.
    pub fn num_tasks(&self) -> usize {
        self.instance.tasks().len()
    }

    /// Demand of a task.
    #[inline]
    pub fn demand(&self, task: usize) -> i32 {
        self.instance.tasks()[task].demand()
    }

    /// Entry and exit vertex of a task serviced in the given direction.
    #[inline]
    pub fn endpoints(&self, served: ServedTask) -> (usize, usize) {
        let (u, v) = self.instance.tasks()[served.task].endpoints();
        if served.reversed {
            (v, u)
        } else {
            (u, v)
        }
    }

    /// Vertex where servicing starts.
    #[inline]
    pub fn entry(&self, served: ServedTask) -> usize {
        self.endpoints(served).0
    }

    /// Vertex where servicing ends.
    #[inline]
    pub fn exit(&self, served: ServedTask) -> usize {
        self.endpoints(served).1
    }

    /// Deadhead from the end of `from` (or the depot) to the start of `to`
    /// (or the depot).
    #[inline]
    pub fn link(&self, from: Option<ServedTask>, to: Option<ServedTask>) -> f64 {
        let a = from.map_or(self.depot(), |s| self.exit(s));
        let b = to.map_or(self.depot(), |s| self.entry(s));
        self.dist(a, b)
    }

    /// Full cost of a closed route over the given sequence: service costs
    /// plus depot-to-depot deadheading. An empty sequence costs zero.
    pub fn route_cost(&self, services: &[ServedTask]) -> f64 {
        if services.is_empty() {
            return 0.0;
        }
        let tasks = self.instance.tasks();
        let mut cost = 0.0;
        let mut prev = self.depot();
        for &s in services {
            let (entry, exit) = self.endpoints(s);
            cost += self.dist(prev, entry) + tasks[s.task].service_cost();
            prev = exit;
        }
        cost + self.dist(prev, self.depot())
    }

    /// Total demand of the given sequence.
    pub fn route_load(&self, services: &[ServedTask]) -> i32 {
        services.iter().map(|s| self.demand(s.task)).sum()
    }
}

fn check_demands(instance: &Instance) -> Result<()> {
    let capacity = instance.capacity();
    match instance.tasks().iter().find(|t| t.demand() > capacity) {
        Some(t) => Err(CarpError::InfeasibleDemand {
            task: t.id(),
            demand: t.demand(),
            capacity,
        }),
        None => Ok(()),
    }
}
