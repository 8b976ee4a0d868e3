//! Undirected road graph with required and deadhead edges.

use serde::{Deserialize, Serialize};

/// An undirected edge of the road network.
///
/// Required edges must be serviced exactly once; every edge can be
/// traversed any number of times as deadhead.
///
/// # Examples
///
/// ```
/// use u_carp::models::Edge;
///
/// let e = Edge::required(1, 2, 13.0, 4);
/// assert!(e.required);
/// assert_eq!(e.demand, 4);
///
/// let d = Edge::deadhead(2, 3, 7.0);
/// assert!(!d.required);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint (1-based vertex id).
    pub u: usize,
    /// Second endpoint (1-based vertex id).
    pub v: usize,
    /// Traversal cost, identical in both directions.
    pub cost: f64,
    /// Demand collected when the edge is serviced.
    pub demand: i32,
    /// Whether the edge must be serviced.
    pub required: bool,
}

impl Edge {
    /// Creates a required edge.
    pub fn required(u: usize, v: usize, cost: f64, demand: i32) -> Self {
        Self {
            u,
            v,
            cost,
            demand,
            required: true,
        }
    }

    /// Creates an edge that is only ever traversed, never serviced.
    pub fn deadhead(u: usize, v: usize, cost: f64) -> Self {
        Self {
            u,
            v,
            cost,
            demand: 0,
            required: false,
        }
    }
}

/// An undirected graph over vertices `1..=num_vertices`. Immutable after load.
#[derive(Debug, Clone)]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph from its vertex count and edge list.
    pub fn new(num_vertices: usize, edges: Vec<Edge>) -> Self {
        Self {
            num_vertices,
            edges,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// All edges, required or not.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates the required edges in input order.
    pub fn required_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.required)
    }
}
