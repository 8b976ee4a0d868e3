//! Move descriptors, their exact cost deltas, and incremental application.
//!
//! Every `evaluate_*` function is pure: it reads the solution and returns a
//! [`MoveEval`]. The matching `apply_*` function performs the move and
//! updates cached route loads/costs and the solution total by the same
//! delta, so the caches always match a full recomputation.
//!
//! Distances are symmetric, so reversing a run of tasks only changes the
//! two deadhead legs at its ends.

use crate::models::{Problem, ServedTask, Solution};

use super::EPSILON;

/// Result of evaluating a move without applying it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEval {
    /// Change in total solution cost if the move were applied.
    pub delta: f64,
    /// Whether every touched route stays within capacity.
    pub feasible: bool,
}

impl MoveEval {
    /// Feasible and strictly cheaper.
    pub fn is_improving(&self) -> bool {
        self.feasible && self.delta < -EPSILON
    }
}

/// Reverse `services[start..=end]` of one route, flipping each task's
/// direction. `start == end` flips a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    /// Route index.
    pub route: usize,
    /// First reversed position.
    pub start: usize,
    /// Last reversed position (inclusive).
    pub end: usize,
}

/// Move one task to a new position, in the same or another route.
///
/// `to_pos` indexes the destination sequence *after* the task has been
/// removed (relevant when `from_route == to_route`). `reversed` is the
/// direction the task is serviced in at its new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocateMove {
    /// Source route index.
    pub from_route: usize,
    /// Position in the source route.
    pub from_pos: usize,
    /// Destination route index.
    pub to_route: usize,
    /// Insertion position in the destination route.
    pub to_pos: usize,
    /// Service direction at the destination.
    pub reversed: bool,
}

/// A sequence of linked relocations applied in order; each move's indices
/// refer to the state left by the previous moves.
///
/// Intermediate states may overload a route; only the final state must be
/// capacity-feasible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EjectionChain {
    /// Relocations in application order.
    pub moves: Vec<RelocateMove>,
}

impl EjectionChain {
    /// Number of linked relocations.
    pub fn depth(&self) -> usize {
        self.moves.len()
    }
}

/// Cost change from removing `seq[pos]`.
pub(crate) fn removal_delta(problem: &Problem, seq: &[ServedTask], pos: usize) -> f64 {
    let s = seq[pos];
    let prev = pos.checked_sub(1).map(|i| seq[i]);
    let next = seq.get(pos + 1).copied();
    problem.link(prev, next)
        - problem.link(prev, Some(s))
        - problem.link(Some(s), next)
        - problem.tasks()[s.task].service_cost()
}

/// Cost change from inserting `served` before `seq[pos]` (`pos == len`
/// appends). `skip` hides one element of `seq`, which then behaves as the
/// sequence with that element removed.
pub(crate) fn insertion_delta(
    problem: &Problem,
    seq: &[ServedTask],
    skip: Option<usize>,
    pos: usize,
    served: ServedTask,
) -> f64 {
    let at = |i: usize| match skip {
        Some(k) if i >= k => seq[i + 1],
        _ => seq[i],
    };
    let len = seq.len() - usize::from(skip.is_some());
    let prev = pos.checked_sub(1).map(at);
    let next = if pos < len { Some(at(pos)) } else { None };
    problem.link(prev, Some(served))
        + problem.tasks()[served.task].service_cost()
        + problem.link(Some(served), next)
        - problem.link(prev, next)
}

fn relocate_delta(
    problem: &Problem,
    from: &[ServedTask],
    to: Option<&[ServedTask]>,
    mv: &RelocateMove,
) -> f64 {
    let served = ServedTask {
        task: from[mv.from_pos].task,
        reversed: mv.reversed,
    };
    let removal = removal_delta(problem, from, mv.from_pos);
    let insertion = match to {
        Some(dest) => insertion_delta(problem, dest, None, mv.to_pos, served),
        None => insertion_delta(problem, from, Some(mv.from_pos), mv.to_pos, served),
    };
    removal + insertion
}

/// Evaluates a 2-opt reversal. Always feasible: loads do not change.
pub fn evaluate_two_opt(problem: &Problem, solution: &Solution, mv: &TwoOptMove) -> MoveEval {
    let seq = solution.routes()[mv.route].services();
    let prev = mv.start.checked_sub(1).map(|i| seq[i]);
    let next = seq.get(mv.end + 1).copied();
    let first = seq[mv.start];
    let last = seq[mv.end];

    let old = problem.link(prev, Some(first)) + problem.link(Some(last), next);
    let new = problem.link(prev, Some(last.flipped())) + problem.link(Some(first.flipped()), next);
    MoveEval {
        delta: new - old,
        feasible: true,
    }
}

/// Applies a 2-opt reversal, updating caches incrementally.
pub fn apply_two_opt(problem: &Problem, solution: &mut Solution, mv: &TwoOptMove) {
    let eval = evaluate_two_opt(problem, solution, mv);
    let route = &mut solution.routes_mut()[mv.route];
    let seq = route.services_mut();
    seq[mv.start..=mv.end].reverse();
    for s in &mut seq[mv.start..=mv.end] {
        *s = s.flipped();
    }
    route.add_cost(eval.delta);
    solution.add_cost(eval.delta);
}

/// Evaluates a relocation.
pub fn evaluate_relocate(problem: &Problem, solution: &Solution, mv: &RelocateMove) -> MoveEval {
    let routes = solution.routes();
    let from = routes[mv.from_route].services();
    if mv.from_route == mv.to_route {
        return MoveEval {
            delta: relocate_delta(problem, from, None, mv),
            feasible: true,
        };
    }
    let dest = &routes[mv.to_route];
    let demand = problem.demand(from[mv.from_pos].task);
    MoveEval {
        delta: relocate_delta(problem, from, Some(dest.services()), mv),
        feasible: dest.load() + demand <= problem.capacity(),
    }
}

/// Applies a relocation, updating caches incrementally.
///
/// A source route emptied by the move is kept (at zero cost) so that route
/// indices stay stable; call [`Solution::remove_empty_routes`] afterwards.
pub fn apply_relocate(problem: &Problem, solution: &mut Solution, mv: &RelocateMove) {
    let from_seq = solution.routes()[mv.from_route].services();
    let task = from_seq[mv.from_pos].task;
    let removal = removal_delta(problem, from_seq, mv.from_pos);
    let served = ServedTask {
        task,
        reversed: mv.reversed,
    };
    let insertion = if mv.from_route == mv.to_route {
        insertion_delta(problem, from_seq, Some(mv.from_pos), mv.to_pos, served)
    } else {
        insertion_delta(
            problem,
            solution.routes()[mv.to_route].services(),
            None,
            mv.to_pos,
            served,
        )
    };
    let demand = problem.demand(task);

    let routes = solution.routes_mut();
    let source = &mut routes[mv.from_route];
    source.services_mut().remove(mv.from_pos);
    source.add_cost(removal);
    source.add_load(-demand);

    let dest = &mut routes[mv.to_route];
    dest.services_mut().insert(mv.to_pos, served);
    dest.add_cost(insertion);
    dest.add_load(demand);

    solution.add_cost(removal + insertion);
}

/// Evaluates a whole ejection chain on scratch copies of the routes.
pub fn evaluate_chain(problem: &Problem, solution: &Solution, chain: &EjectionChain) -> MoveEval {
    let routes = solution.routes();
    let mut seqs: Vec<Vec<ServedTask>> = routes.iter().map(|r| r.services().to_vec()).collect();
    let mut loads: Vec<i32> = routes.iter().map(|r| r.load()).collect();
    let mut touched = vec![false; routes.len()];
    let mut delta = 0.0;

    for mv in &chain.moves {
        let from = &seqs[mv.from_route];
        let to = if mv.from_route == mv.to_route {
            None
        } else {
            Some(seqs[mv.to_route].as_slice())
        };
        delta += relocate_delta(problem, from, to, mv);
        let served = ServedTask {
            task: from[mv.from_pos].task,
            reversed: mv.reversed,
        };
        let demand = problem.demand(served.task);

        seqs[mv.from_route].remove(mv.from_pos);
        seqs[mv.to_route].insert(mv.to_pos, served);
        loads[mv.from_route] -= demand;
        loads[mv.to_route] += demand;
        touched[mv.from_route] = true;
        touched[mv.to_route] = true;
    }

    let feasible = loads
        .iter()
        .zip(&touched)
        .all(|(&load, &t)| !t || load <= problem.capacity());
    MoveEval { delta, feasible }
}

/// Applies every relocation of the chain in order.
pub fn apply_chain(problem: &Problem, solution: &mut Solution, chain: &EjectionChain) {
    for mv in &chain.moves {
        apply_relocate(problem, solution, mv);
    }
}

/// Best way to take the task at `(route, pos)` out and put it back anywhere
/// (any route, any position, either direction) where capacity allows.
///
/// Returns `None` when the task has no feasible alternative position at all.
/// Ties keep the first candidate in scan order (route, position, forward
/// before reversed).
pub fn best_reinsertion(
    problem: &Problem,
    solution: &Solution,
    route: usize,
    pos: usize,
) -> Option<(RelocateMove, MoveEval)> {
    let routes = solution.routes();
    let from = routes[route].services();
    let task = from[pos].task;
    let demand = problem.demand(task);
    let removal = removal_delta(problem, from, pos);
    let mut best: Option<(RelocateMove, MoveEval)> = None;

    for (to_route, dest) in routes.iter().enumerate() {
        let same = to_route == route;
        if !same && dest.load() + demand > problem.capacity() {
            continue;
        }
        let len = if same { dest.len() - 1 } else { dest.len() };
        for to_pos in 0..=len {
            for reversed in [false, true] {
                let served = ServedTask { task, reversed };
                if same && to_pos == pos && served == from[pos] {
                    continue;
                }
                let insertion = if same {
                    insertion_delta(problem, from, Some(pos), to_pos, served)
                } else {
                    insertion_delta(problem, dest.services(), None, to_pos, served)
                };
                let delta = removal + insertion;
                if best.as_ref().is_none_or(|(_, b)| delta < b.delta) {
                    best = Some((
                        RelocateMove {
                            from_route: route,
                            from_pos: pos,
                            to_route,
                            to_pos,
                            reversed,
                        },
                        MoveEval {
                            delta,
                            feasible: true,
                        },
                    ));
                }
            }
        }
    }
    best
}
