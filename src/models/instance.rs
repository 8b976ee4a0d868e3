//! Validated CARP instance definition.

use super::{Graph, Task};
use crate::error::{CarpError, Result};

/// A single-depot CARP instance: graph, depot, vehicle capacity and the
/// tasks derived from the required edges.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph, Instance};
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 4.0, 2),
///     Edge::required(2, 3, 3.0, 1),
///     Edge::deadhead(3, 1, 5.0),
/// ]);
/// let inst = Instance::new("tiny", graph, 1, 5).unwrap();
/// assert_eq!(inst.tasks().len(), 2);
/// assert_eq!(inst.total_demand(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    graph: Graph,
    depot: usize,
    capacity: i32,
    tasks: Vec<Task>,
}

impl Instance {
    /// Validates the definition and extracts tasks from the required edges.
    ///
    /// # Errors
    ///
    /// [`CarpError::MalformedInstance`] if the graph has no vertices, the
    /// depot or an edge endpoint is outside `1..=num_vertices`, the capacity
    /// is not positive, or an edge has a negative/non-finite cost or a
    /// negative demand.
    pub fn new(name: impl Into<String>, graph: Graph, depot: usize, capacity: i32) -> Result<Self> {
        let n = graph.num_vertices();
        if n == 0 {
            return Err(CarpError::malformed("graph has no vertices"));
        }
        if depot == 0 || depot > n {
            return Err(CarpError::malformed(format!(
                "depot {depot} is not a vertex of 1..={n}"
            )));
        }
        if capacity <= 0 {
            return Err(CarpError::malformed(format!(
                "vehicle capacity must be positive, got {capacity}"
            )));
        }
        for (idx, e) in graph.edges().iter().enumerate() {
            if e.u == 0 || e.u > n || e.v == 0 || e.v > n {
                return Err(CarpError::malformed(format!(
                    "edge #{idx} ({}, {}) references a vertex outside 1..={n}",
                    e.u, e.v
                )));
            }
            if !e.cost.is_finite() || e.cost < 0.0 {
                return Err(CarpError::malformed(format!(
                    "edge ({}, {}) has invalid cost {}",
                    e.u, e.v, e.cost
                )));
            }
            if e.demand < 0 {
                return Err(CarpError::malformed(format!(
                    "edge ({}, {}) has negative demand {}",
                    e.u, e.v, e.demand
                )));
            }
        }

        let tasks = graph
            .required_edges()
            .enumerate()
            .map(|(id, e)| Task::new(id, e.u, e.v, e.demand, e.cost))
            .collect();

        Ok(Self {
            name: name.into(),
            graph,
            depot,
            capacity,
            tasks,
        })
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Depot vertex.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Tasks, indexed by id.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Sum of all task demands.
    pub fn total_demand(&self) -> i32 {
        self.tasks.iter().map(|t| t.demand()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edge;

    fn edges() -> Vec<Edge> {
        vec![Edge::required(1, 2, 1.0, 1), Edge::deadhead(2, 3, 1.0)]
    }

    #[test]
    fn test_valid_instance() {
        let inst = Instance::new("x", Graph::new(3, edges()), 1, 10).expect("valid");
        assert_eq!(inst.name(), "x");
        assert_eq!(inst.depot(), 1);
        assert_eq!(inst.capacity(), 10);
        assert_eq!(inst.tasks()[0].endpoints(), (1, 2));
    }

    #[test]
    fn test_missing_depot() {
        let err = Instance::new("x", Graph::new(3, edges()), 0, 10).unwrap_err();
        assert!(matches!(err, CarpError::MalformedInstance { .. }));
        let err = Instance::new("x", Graph::new(3, edges()), 4, 10).unwrap_err();
        assert!(matches!(err, CarpError::MalformedInstance { .. }));
    }

    #[test]
    fn test_negative_cost_and_demand() {
        let g = Graph::new(2, vec![Edge::deadhead(1, 2, -1.0)]);
        assert!(Instance::new("x", g, 1, 10).is_err());
        let g = Graph::new(2, vec![Edge::required(1, 2, 1.0, -3)]);
        assert!(Instance::new("x", g, 1, 10).is_err());
    }

    #[test]
    fn test_edge_out_of_range() {
        let g = Graph::new(2, vec![Edge::deadhead(1, 5, 1.0)]);
        assert!(Instance::new("x", g, 1, 10).is_err());
    }

    #[test]
    fn test_non_positive_capacity() {
        assert!(Instance::new("x", Graph::new(3, edges()), 1, 0).is_err());
    }
}
