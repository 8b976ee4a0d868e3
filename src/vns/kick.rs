//! Random perturbations ("kicks") used for shaking.
//!
//! Every kick keeps the solution capacity-feasible and its caches exact.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluation::{apply_relocate, apply_two_opt, RelocateMove, TwoOptMove};
use crate::models::{Problem, Solution};

/// A perturbation neighborhood, from mild to strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kick {
    /// Move one random task to a random position, in any route with room
    /// (its own included), in a random direction.
    ShallowEjection,
    /// Reverse a random segment of a random route.
    SegmentReversal,
    /// Move two or three random tasks to random other routes with room.
    RelocateJump,
}

impl Kick {
    /// Perturbs `solution` in place. Returns `false` if the kick found
    /// nothing to change.
    pub fn apply<R: Rng>(self, problem: &Problem, solution: &mut Solution, rng: &mut R) -> bool {
        match self {
            Kick::ShallowEjection => random_relocate(problem, solution, true, rng),
            Kick::SegmentReversal => random_reversal(problem, solution, rng),
            Kick::RelocateJump => {
                let jumps = rng.random_range(2..=3);
                let mut changed = false;
                for _ in 0..jumps {
                    changed |= random_relocate(problem, solution, false, rng);
                }
                changed
            }
        }
    }
}

fn random_reversal<R: Rng>(problem: &Problem, solution: &mut Solution, rng: &mut R) -> bool {
    let candidates: Vec<usize> = solution
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_empty())
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return false;
    }
    let route = candidates[rng.random_range(0..candidates.len())];
    let len = solution.routes()[route].len();
    let start = rng.random_range(0..len);
    let end = rng.random_range(start..len);
    apply_two_opt(problem, solution, &TwoOptMove { route, start, end });
    true
}

fn random_relocate<R: Rng>(
    problem: &Problem,
    solution: &mut Solution,
    same_route: bool,
    rng: &mut R,
) -> bool {
    let routes = solution.routes();
    if routes.is_empty() {
        return false;
    }
    let from_route = rng.random_range(0..routes.len());
    let source = &routes[from_route];
    if source.is_empty() {
        return false;
    }
    let from_pos = rng.random_range(0..source.len());
    let original = source.services()[from_pos];
    let demand = problem.demand(original.task);

    let targets: Vec<usize> = (0..routes.len())
        .filter(|&r| {
            if r == from_route {
                same_route
            } else {
                routes[r].load() + demand <= problem.capacity()
            }
        })
        .collect();
    if targets.is_empty() {
        return false;
    }
    let to_route = targets[rng.random_range(0..targets.len())];
    let len = if to_route == from_route {
        source.len() - 1
    } else {
        routes[to_route].len()
    };
    let (to_pos, reversed) = if to_route == from_route {
        // any (position, direction) pair except the current one
        let current = 2 * from_pos + usize::from(original.reversed);
        let mut k = rng.random_range(0..2 * (len + 1) - 1);
        if k >= current {
            k += 1;
        }
        (k / 2, k % 2 == 1)
    } else {
        (rng.random_range(0..=len), rng.random_bool(0.5))
    };
    let mv = RelocateMove {
        from_route,
        from_pos,
        to_route,
        to_pos,
        reversed,
    };
    apply_relocate(problem, solution, &mv);
    solution.remove_empty_routes();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::trivial_solution;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Edge, Graph, Instance, Route, ServedTask};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ring(capacity: i32) -> Problem {
        let edges = (1..=8)
            .map(|v| Edge::required(v, v % 8 + 1, 1.0 + (v % 3) as f64, 1 + (v as i32) % 2))
            .collect::<Vec<_>>();
        Problem::new(Instance::new("ring", Graph::new(8, edges), 1, capacity).expect("valid"))
            .expect("feasible")
    }

    #[test]
    fn test_kicks_keep_solution_valid() {
        let p = ring(4);
        let mut sol = trivial_solution(&p);
        let mut rng = StdRng::seed_from_u64(5);
        let evaluator = RouteEvaluator::new(&p);
        for i in 0..300 {
            let kick = [Kick::ShallowEjection, Kick::SegmentReversal, Kick::RelocateJump][i % 3];
            kick.apply(&p, &mut sol, &mut rng);
            assert!(evaluator.validate(&sol).is_empty(), "after {kick:?}");
        }
    }

    #[test]
    fn test_relocate_jump_needs_room() {
        // every route is full, so nothing can jump
        let edges = (1..=4)
            .map(|v| Edge::required(v, v % 4 + 1, 1.0, 1))
            .collect::<Vec<_>>();
        let p = Problem::new(Instance::new("sq", Graph::new(4, edges), 1, 1).expect("valid"))
            .expect("feasible");
        let mut sol = trivial_solution(&p);
        let before = sol.clone();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!Kick::RelocateJump.apply(&p, &mut sol, &mut rng));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_shallow_kick_always_changes_solution() {
        let p = ring(100);
        let single = Solution::from_routes(vec![Route::from_services(
            &p,
            (0..8).map(ServedTask::forward).collect(),
        )]);
        for seed in 0..50 {
            let mut sol = single.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(Kick::ShallowEjection.apply(&p, &mut sol, &mut rng));
            assert_ne!(sol.routes()[0].services(), single.routes()[0].services());
        }
    }

    #[test]
    fn test_shallow_kick_on_lone_task_flips_it() {
        let p = Problem::new(
            Instance::new("one", Graph::new(2, vec![Edge::required(1, 2, 3.0, 1)]), 1, 5)
                .expect("valid"),
        )
        .expect("feasible");
        for seed in 0..10 {
            let mut sol = trivial_solution(&p);
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(Kick::ShallowEjection.apply(&p, &mut sol, &mut rng));
            assert_eq!(sol.routes()[0].services(), &[ServedTask::backward(0)]);
        }
    }

    #[test]
    fn test_empty_solution() {
        let p = ring(4);
        let mut sol = Solution::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!Kick::SegmentReversal.apply(&p, &mut sol, &mut rng));
        assert!(!Kick::ShallowEjection.apply(&p, &mut sol, &mut rng));
    }
}
