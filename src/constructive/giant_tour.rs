//! Giant tours: capacity-free orderings of every task.
//!
//! A giant tour encodes a solution as one oriented permutation of all tasks.
//! [`split`](super::split()) turns it into capacity-feasible routes.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grasp::nearest_entry;
use crate::models::{Problem, ServedTask};

/// How a random giant tour is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiantTourStrategy {
    /// Uniform random permutation with random service directions.
    Shuffle,
    /// Randomized nearest neighbour: from the current vertex, pick uniformly
    /// among the `k` closest unserved tasks.
    NearestTopK(usize),
}

impl GiantTourStrategy {
    /// Draws a giant tour with this strategy.
    pub fn build<R: Rng>(&self, problem: &Problem, rng: &mut R) -> GiantTour {
        match *self {
            GiantTourStrategy::Shuffle => GiantTour::shuffled(problem, rng),
            GiantTourStrategy::NearestTopK(k) => GiantTour::nearest_top_k(problem, k, rng),
        }
    }
}

/// An oriented permutation of all tasks, ignoring capacity.
///
/// # Examples
///
/// ```
/// use u_carp::constructive::GiantTour;
/// use u_carp::models::ServedTask;
///
/// let tour = GiantTour::new(vec![ServedTask::forward(2), ServedTask::backward(0)]);
/// assert_eq!(tour.len(), 2);
/// assert_eq!(tour.services()[1].task, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GiantTour {
    services: Vec<ServedTask>,
}

impl GiantTour {
    /// Wraps an explicit sequence.
    pub fn new(services: Vec<ServedTask>) -> Self {
        Self { services }
    }

    /// Uniform random permutation; each task's direction is a fair coin.
    pub fn shuffled<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        let mut services: Vec<ServedTask> = (0..problem.num_tasks())
            .map(|t| ServedTask {
                task: t,
                reversed: rng.random_bool(0.5),
            })
            .collect();
        services.shuffle(rng);
        Self { services }
    }

    /// Randomized nearest-neighbour walk from the depot. Candidates are
    /// ranked by deadhead distance (ties by task id); `k == 0` is treated
    /// as `1`.
    pub fn nearest_top_k<R: Rng>(problem: &Problem, k: usize, rng: &mut R) -> Self {
        let n = problem.num_tasks();
        let mut served = vec![false; n];
        let mut services = Vec::with_capacity(n);
        let mut current = problem.depot();
        let mut candidates: Vec<(f64, ServedTask)> = Vec::with_capacity(n);

        for _ in 0..n {
            candidates.clear();
            candidates.extend(
                (0..n)
                    .filter(|&t| !served[t])
                    .map(|t| nearest_entry(problem, current, t)),
            );
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.task.cmp(&b.1.task)));
            let top = k.clamp(1, candidates.len());
            let (_, pick) = candidates[rng.random_range(0..top)];
            served[pick.task] = true;
            current = problem.exit(pick);
            services.push(pick);
        }
        Self { services }
    }

    /// The oriented task sequence.
    pub fn services(&self) -> &[ServedTask] {
        &self.services
    }

    /// Number of tasks in the tour.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if the tour has no tasks.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
