//! Adapters between the solver and external text formats.
//!
//! - [`InstanceLoader`] / [`GdbLoader`] — instance files in the `gdb` `.dat` layout
//! - [`SolutionWriter`] / [`TextSolutionWriter`] — the plain-text solution report

mod gdb;
mod writer;

pub use gdb::GdbLoader;
pub use writer::TextSolutionWriter;

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Instance, Problem};
use crate::solver::SolveResult;

/// Produces an [`Instance`] from some textual source.
pub trait InstanceLoader {
    /// Parses an instance from its text.
    ///
    /// # Errors
    ///
    /// [`CarpError::MalformedInstance`](crate::CarpError::MalformedInstance)
    /// for unreadable or inconsistent content.
    fn parse(&self, text: &str) -> Result<Instance>;

    /// Reads and parses a file.
    ///
    /// # Errors
    ///
    /// [`CarpError::Io`](crate::CarpError::Io) if the file cannot be read,
    /// otherwise as [`parse`](Self::parse).
    fn load(&self, path: &Path) -> Result<Instance> {
        let text = fs::read_to_string(path)?;
        self.parse(&text)
    }
}

/// Serializes a finished run.
pub trait SolutionWriter {
    /// Writes `result` for `problem` to `out`.
    ///
    /// # Errors
    ///
    /// [`CarpError::Io`](crate::CarpError::Io) if writing fails.
    fn write(&self, problem: &Problem, result: &SolveResult, out: &mut dyn Write) -> Result<()>;

    /// Writes to a newly created (or truncated) file.
    ///
    /// # Errors
    ///
    /// [`CarpError::Io`](crate::CarpError::Io) if the file cannot be created
    /// or written.
    fn write_to_path(&self, problem: &Problem, result: &SolveResult, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path)?;
        self.write(problem, result, &mut file)?;
        file.flush()?;
        Ok(())
    }
}
