//! Error type shared by instance loading, preprocessing and configuration.

use std::fmt;

/// Fatal conditions that prevent the solver from running.
///
/// "No improving move" and budget expiry are normal outcomes and are never
/// reported through this type.
#[derive(Debug)]
pub enum CarpError {
    /// The instance definition is structurally invalid.
    MalformedInstance {
        /// Human-readable description of the defect.
        reason: String,
    },
    /// Two vertices have no connecting path.
    Unreachable {
        /// Source vertex id.
        from: usize,
        /// Target vertex id.
        to: usize,
    },
    /// A single task needs more than one vehicle can carry.
    InfeasibleDemand {
        /// Task id.
        task: usize,
        /// Demand of the task.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A solver parameter is out of range.
    InvalidConfig {
        /// Description of the offending parameter.
        reason: String,
    },
    /// Reading or writing an external resource failed.
    Io(std::io::Error),
}

impl CarpError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CarpError::MalformedInstance {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        CarpError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CarpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarpError::MalformedInstance { reason } => write!(f, "malformed instance: {reason}"),
            CarpError::Unreachable { from, to } => {
                write!(f, "graph is not connected: no path from {from} to {to}")
            }
            CarpError::InfeasibleDemand {
                task,
                demand,
                capacity,
            } => write!(
                f,
                "task {task} has demand {demand} exceeding vehicle capacity {capacity}"
            ),
            CarpError::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            CarpError::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for CarpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CarpError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CarpError {
    fn from(err: std::io::Error) -> Self {
        CarpError::Io(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CarpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_infeasible_demand() {
        let err = CarpError::InfeasibleDemand {
            task: 3,
            demand: 12,
            capacity: 10,
        };
        assert_eq!(
            err.to_string(),
            "task 3 has demand 12 exceeding vehicle capacity 10"
        );
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;
        let err = CarpError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(CarpError::malformed("x").source().is_none());
    }
}
