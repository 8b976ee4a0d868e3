//! Ejection moves: single-task reinsertion and bounded ejection chains.
//!
//! # Algorithm
//!
//! *Shallow ejection* takes each task out in turn and puts it back at the
//! cheapest position anywhere in the solution (same route included, either
//! direction). The first task with an improving reinsertion is moved.
//!
//! *Ejection chains* relocate a task into another route even when that
//! overloads it, then eject one task from the overloaded route into a third
//! route, and so on, up to a fixed depth. Only chains whose final state
//! respects capacity count. A route emptied by an earlier link may receive a
//! later one. The search is a depth-first enumeration on a
//! scratch copy of the route sequences; each task is placed at its cheapest
//! position in the receiving route.
//!
//! # Complexity
//!
//! Shallow: O(m² · R) per step. Chains: O(m · (m·R)^(k−1) · m/R) for depth k
//! in the worst case, much less in practice since a link is only extended
//! out of an overloaded route.
//!
//! # Reference
//!
//! Glover, F. (1996). "Ejection chains, reference structures and alternating
//! path methods for traveling salesman problems", *Discrete Applied
//! Mathematics* 65, 223-253.

use super::relocate::best_insertion;
use crate::evaluation::{
    apply_chain, apply_relocate, best_reinsertion, removal_delta, EjectionChain, MoveEval,
    RelocateMove, EPSILON,
};
use crate::models::{Problem, ServedTask, Solution};

/// Moves the first task (in route/position order) whose best reinsertion
/// improves the solution. Returns `true` if a move was applied.
pub fn shallow_ejection_step(problem: &Problem, solution: &mut Solution) -> bool {
    for route in 0..solution.num_routes() {
        for pos in 0..solution.routes()[route].len() {
            let Some((mv, eval)) = best_reinsertion(problem, solution, route, pos) else {
                continue;
            };
            if eval.is_improving() {
                log::trace!("eject {mv:?} delta {:.3}", eval.delta);
                apply_relocate(problem, solution, &mv);
                solution.remove_empty_routes();
                return true;
            }
        }
    }
    false
}

/// Searches for the best improving ejection chain of at most `max_depth`
/// linked relocations.
///
/// Returns `None` if no feasible chain improves the solution.
pub fn find_improving_chain(
    problem: &Problem,
    solution: &Solution,
    max_depth: usize,
) -> Option<(EjectionChain, MoveEval)> {
    if max_depth == 0 {
        return None;
    }
    let mut search = ChainSearch::new(problem, solution, max_depth);
    for route in 0..search.seqs.len() {
        for pos in 0..search.seqs[route].len() {
            search.expand(route, pos, 0.0);
        }
    }
    search.best.map(|(moves, delta)| {
        (
            EjectionChain { moves },
            MoveEval {
                delta,
                feasible: true,
            },
        )
    })
}

/// Applies the best improving ejection chain, if any. Returns `true` if a
/// chain was applied.
pub fn ejection_chain_step(problem: &Problem, solution: &mut Solution, max_depth: usize) -> bool {
    match find_improving_chain(problem, solution, max_depth) {
        Some((chain, eval)) => {
            log::trace!("chain depth {} delta {:.3}", chain.depth(), eval.delta);
            apply_chain(problem, solution, &chain);
            solution.remove_empty_routes();
            true
        }
        None => false,
    }
}

struct ChainSearch<'a> {
    problem: &'a Problem,
    max_depth: usize,
    seqs: Vec<Vec<ServedTask>>,
    loads: Vec<i32>,
    /// Routes with tasks before the search started.
    open: Vec<bool>,
    path: Vec<RelocateMove>,
    best: Option<(Vec<RelocateMove>, f64)>,
}

impl<'a> ChainSearch<'a> {
    fn new(problem: &'a Problem, solution: &Solution, max_depth: usize) -> Self {
        Self {
            problem,
            max_depth,
            seqs: solution.routes().iter().map(|r| r.services().to_vec()).collect(),
            loads: solution.routes().iter().map(|r| r.load()).collect(),
            open: solution.routes().iter().map(|r| !r.is_empty()).collect(),
            path: Vec::with_capacity(max_depth),
            best: None,
        }
    }

    /// Tries every receiving route for `seqs[from_route][from_pos]`, then
    /// recurses out of the receiver while it is overloaded.
    fn expand(&mut self, from_route: usize, from_pos: usize, delta: f64) {
        let capacity = self.problem.capacity();
        for to_route in 0..self.seqs.len() {
            if to_route == from_route || !self.open[to_route] {
                continue;
            }
            let (mv, step, original) = self.push(from_route, from_pos, to_route);
            let total = delta + step;

            let excess = self.loads[to_route] - capacity;
            if excess <= 0 {
                if total < -EPSILON && self.best.as_ref().is_none_or(|(_, b)| total < *b) {
                    self.best = Some((self.path.clone(), total));
                }
            } else if self.path.len() < self.max_depth {
                for pos in 0..self.seqs[to_route].len() {
                    let task = self.seqs[to_route][pos].task;
                    if pos != mv.to_pos && self.problem.demand(task) >= excess {
                        self.expand(to_route, pos, total);
                    }
                }
            }

            self.pop(&mv, original);
        }
    }

    fn push(
        &mut self,
        from_route: usize,
        from_pos: usize,
        to_route: usize,
    ) -> (RelocateMove, f64, ServedTask) {
        let original = self.seqs[from_route][from_pos];
        let removal = removal_delta(self.problem, &self.seqs[from_route], from_pos);
        let (to_pos, reversed, insertion) =
            best_insertion(self.problem, &self.seqs[to_route], original.task);
        let mv = RelocateMove {
            from_route,
            from_pos,
            to_route,
            to_pos,
            reversed,
        };

        let demand = self.problem.demand(original.task);
        self.seqs[from_route].remove(from_pos);
        self.seqs[to_route].insert(
            to_pos,
            ServedTask {
                task: original.task,
                reversed,
            },
        );
        self.loads[from_route] -= demand;
        self.loads[to_route] += demand;
        self.path.push(mv);
        (mv, removal + insertion, original)
    }

    fn pop(&mut self, mv: &RelocateMove, original: ServedTask) {
        let demand = self.problem.demand(original.task);
        self.seqs[mv.to_route].remove(mv.to_pos);
        self.seqs[mv.from_route].insert(mv.from_pos, original);
        self.loads[mv.to_route] -= demand;
        self.loads[mv.from_route] += demand;
        self.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{evaluate_chain, RouteEvaluator};
    use crate::local_search::find_best_relocate;
    use crate::models::{Edge, Graph, Instance, Route};

    /// Ring 1..6 of unit tasks with a chord 1-4 of cost 2.
    fn ring(capacity: i32) -> Problem {
        let mut edges: Vec<Edge> = (1..=6)
            .map(|v| Edge::required(v, v % 6 + 1, 1.0, 1))
            .collect();
        edges.push(Edge::deadhead(1, 4, 2.0));
        Problem::new(Instance::new("ring", Graph::new(6, edges), 1, capacity).expect("valid"))
            .expect("feasible")
    }

    fn solution(p: &Problem, routes: Vec<Vec<ServedTask>>) -> Solution {
        Solution::from_routes(routes.into_iter().map(|s| Route::from_services(p, s)).collect())
    }

    #[test]
    fn test_shallow_ejection_moves_misplaced_task() {
        let p = ring(10);
        let f = ServedTask::forward;
        let mut sol = solution(&p, vec![vec![f(0), f(2)], vec![f(3), f(1), f(4)]]);
        let before = sol.cost();
        assert!(shallow_ejection_step(&p, &mut sol));
        assert!(sol.cost() < before);
        assert!(RouteEvaluator::new(&p).validate(&sol).is_empty());
    }

    #[test]
    fn test_shallow_ejection_at_optimum() {
        let p = ring(10);
        let services: Vec<_> = (0..6).map(ServedTask::forward).collect();
        let mut sol = solution(&p, vec![services]);
        assert!(!shallow_ejection_step(&p, &mut sol));
    }

    #[test]
    fn test_chain_needs_depth_two_when_routes_are_full() {
        let p = ring(2);
        let f = ServedTask::forward;
        // 11 as given; swapping tasks 1 and 3 gives 10
        let sol = solution(&p, vec![vec![f(0), f(3)], vec![f(1), f(2)]]);
        assert!(find_improving_chain(&p, &sol, 1).is_none());

        let (chain, eval) = find_improving_chain(&p, &sol, 2).expect("swap improves");
        assert_eq!(chain.depth(), 2);
        assert!(eval.delta <= -1.0 + 1e-9);

        let check = evaluate_chain(&p, &sol, &chain);
        assert!(check.feasible);
        assert!((check.delta - eval.delta).abs() < 1e-9);
    }

    #[test]
    fn test_chain_refills_emptied_route() {
        // b sits next to the depot, a/c/f form a triangle behind a 10-cost link
        let graph = Graph::new(
            5,
            vec![
                Edge::required(3, 4, 1.0, 1),
                Edge::required(1, 2, 1.0, 1),
                Edge::required(4, 5, 1.0, 1),
                Edge::required(5, 3, 1.0, 1),
                Edge::deadhead(1, 3, 10.0),
            ],
        );
        let p = Problem::new(Instance::new("swap", graph, 1, 3).expect("valid")).expect("feasible");
        let f = ServedTask::forward;
        // [a] 22 + [b, c, f] 25; swapping a and b gives 2 + 25
        let sol = solution(&p, vec![vec![f(0)], vec![f(1), f(2), f(3)]]);
        assert!(find_best_relocate(&p, &sol).is_none());

        let (chain, eval) = find_improving_chain(&p, &sol, 2).expect("swap improves");
        assert_eq!(chain.depth(), 2);
        assert_eq!(chain.moves[1].to_route, chain.moves[0].from_route);
        assert!(eval.delta <= -20.0 + 1e-9);
        let check = evaluate_chain(&p, &sol, &chain);
        assert!(check.feasible);
        assert!((check.delta - eval.delta).abs() < 1e-9);

        let mut sol = sol;
        assert!(ejection_chain_step(&p, &mut sol, 2));
        assert_eq!(sol.num_routes(), 2);
        assert!(RouteEvaluator::new(&p).validate(&sol).is_empty());
        assert!((sol.cost() - sol.recomputed_cost(&p)).abs() < 1e-9);
    }

    #[test]
    fn test_chain_step_keeps_solution_valid() {
        let p = ring(2);
        let f = ServedTask::forward;
        let mut sol = solution(&p, vec![vec![f(0), f(3)], vec![f(1), f(2)], vec![f(4), f(5)]]);
        let before = sol.cost();
        while ejection_chain_step(&p, &mut sol, 3) {}
        assert!(sol.cost() <= before - 1.0 + 1e-9);
        assert!(RouteEvaluator::new(&p).validate(&sol).is_empty());
        assert!((sol.cost() - sol.recomputed_cost(&p)).abs() < 1e-9);
    }

    #[test]
    fn test_chain_depth_zero() {
        let p = ring(2);
        let f = ServedTask::forward;
        let mut sol = solution(&p, vec![vec![f(0), f(3)], vec![f(1), f(2)]]);
        assert!(!ejection_chain_step(&p, &mut sol, 0));
    }
}
