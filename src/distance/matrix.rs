//! Dense shortest-path distance matrix.

use crate::error::{CarpError, Result};
use crate::models::Graph;

/// A dense n×n matrix of shortest-path costs, stored in row-major order.
///
/// Vertex ids are 1-based (`1..=size`), matching the instance files.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Edge, Graph};
/// use u_carp::distance::DistanceMatrix;
///
/// let graph = Graph::new(3, vec![
///     Edge::required(1, 2, 4.0, 1),
///     Edge::deadhead(2, 3, 5.0),
///     Edge::deadhead(1, 3, 20.0),
/// ]);
/// let dm = DistanceMatrix::shortest_paths(&graph).unwrap();
/// assert_eq!(dm.get(1, 3), 9.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix for `size` vertices with every entry set to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes exact all-pairs shortest paths over every edge of the graph,
    /// required or not (Floyd–Warshall).
    ///
    /// Parallel edges keep the cheapest one.
    ///
    /// # Errors
    ///
    /// [`CarpError::Unreachable`] if some pair of vertices is disconnected.
    pub fn shortest_paths(graph: &Graph) -> Result<Self> {
        let n = graph.num_vertices();
        let mut dm = Self {
            data: vec![f64::INFINITY; n * n],
            size: n,
        };
        for v in 1..=n {
            dm.set(v, v, 0.0);
        }
        for edge in graph.edges() {
            if edge.cost < dm.get(edge.u, edge.v) {
                dm.set(edge.u, edge.v, edge.cost);
                dm.set(edge.v, edge.u, edge.cost);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = dm.data[i * n + k];
                if d_ik == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let through = d_ik + dm.data[k * n + j];
                    if through < dm.data[i * n + j] {
                        dm.data[i * n + j] = through;
                    }
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if dm.data[i * n + j] == f64::INFINITY {
                    return Err(CarpError::Unreachable {
                        from: i + 1,
                        to: j + 1,
                    });
                }
            }
        }
        Ok(dm)
    }

    /// Creates a distance matrix from an explicit n×n grid, row `i` holding
    /// the distances from vertex `i + 1`.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the shortest-path cost from vertex `from` to vertex `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside `1..=size`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[(from - 1) * self.size + (to - 1)]
    }

    /// Sets the cost from vertex `from` to vertex `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[(from - 1) * self.size + (to - 1)] = distance;
    }

    /// Number of vertices in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 1..=self.size {
            for j in (i + 1)..=self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edge;

    fn square_with_diagonal() -> Graph {
        // 1 - 2
        // |   |
        // 4 - 3, plus a costly diagonal 1-3
        Graph::new(
            4,
            vec![
                Edge::required(1, 2, 1.0, 1),
                Edge::required(2, 3, 2.0, 1),
                Edge::deadhead(3, 4, 1.0),
                Edge::deadhead(4, 1, 5.0),
                Edge::deadhead(1, 3, 10.0),
            ],
        )
    }

    #[test]
    fn test_shortest_paths() {
        let dm = DistanceMatrix::shortest_paths(&square_with_diagonal()).expect("connected");
        assert_eq!(dm.get(1, 3), 3.0);
        assert_eq!(dm.get(1, 4), 4.0);
        assert_eq!(dm.get(2, 4), 3.0);
        for v in 1..=4 {
            assert_eq!(dm.get(v, v), 0.0);
        }
    }

    #[test]
    fn test_symmetric_and_triangle() {
        let dm = DistanceMatrix::shortest_paths(&square_with_diagonal()).expect("connected");
        assert!(dm.is_symmetric(1e-12));
        for i in 1..=4 {
            for j in 1..=4 {
                for k in 1..=4 {
                    assert!(dm.get(i, j) <= dm.get(i, k) + dm.get(k, j) + 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_parallel_edges_keep_cheapest() {
        let graph = Graph::new(
            2,
            vec![Edge::deadhead(1, 2, 7.0), Edge::required(2, 1, 3.0, 2)],
        );
        let dm = DistanceMatrix::shortest_paths(&graph).expect("connected");
        assert_eq!(dm.get(1, 2), 3.0);
    }

    #[test]
    fn test_disconnected_graph() {
        let graph = Graph::new(
            4,
            vec![Edge::required(1, 2, 1.0, 1), Edge::deadhead(3, 4, 1.0)],
        );
        match DistanceMatrix::shortest_paths(&graph) {
            Err(CarpError::Unreachable { from, to }) => {
                assert_eq!((from, to), (1, 3));
            }
            other => panic!("expected Unreachable, got {other:?}"),
        }
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(1, 2), 5.0);
        assert_eq!(dm.get(2, 1), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(1, 2, 42.0);
        assert_eq!(dm.get(1, 2), 42.0);
        assert_eq!(dm.get(2, 1), 0.0);
        assert!(!dm.is_symmetric(1e-10));
    }
}
