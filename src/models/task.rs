//! Tasks (required edges) and their oriented service inside a route.

/// A required edge that some route must service.
///
/// # Examples
///
/// ```
/// use u_carp::models::Task;
///
/// let t = Task::new(0, 1, 2, 3, 10.0);
/// assert_eq!(t.endpoints(), (1, 2));
/// assert_eq!(t.demand(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: usize,
    u: usize,
    v: usize,
    demand: i32,
    service_cost: f64,
}

impl Task {
    /// Creates a task; `id` is its index in the instance task list.
    pub fn new(id: usize, u: usize, v: usize, demand: i32, service_cost: f64) -> Self {
        Self {
            id,
            u,
            v,
            demand,
            service_cost,
        }
    }

    /// Task id (0-based index in the instance task list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// The two endpoints in input order.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }

    /// Demand collected when servicing this task.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Cost of traversing the edge while servicing it.
    pub fn service_cost(&self) -> f64 {
        self.service_cost
    }
}

/// A task serviced in a given direction.
///
/// `reversed == false` traverses the edge `u → v`, otherwise `v → u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServedTask {
    /// Task id.
    pub task: usize,
    /// Traversal direction.
    pub reversed: bool,
}

impl ServedTask {
    /// Services `task` in its input direction.
    pub fn forward(task: usize) -> Self {
        Self {
            task,
            reversed: false,
        }
    }

    /// Services `task` against its input direction.
    pub fn backward(task: usize) -> Self {
        Self {
            task,
            reversed: true,
        }
    }

    /// The same task traversed the other way.
    pub fn flipped(self) -> Self {
        Self {
            task: self.task,
            reversed: !self.reversed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip() {
        let s = ServedTask::forward(4);
        assert_eq!(s.flipped(), ServedTask::backward(4));
        assert_eq!(s.flipped().flipped(), s);
    }
}
