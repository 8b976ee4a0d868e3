//! Shortest-path distances between graph vertices.
//!
//! Provides a dense all-pairs matrix computed once per instance.

mod matrix;

pub use matrix::DistanceMatrix;
