//! Plain-text solution report.

use std::io::Write;

use super::SolutionWriter;
use crate::error::Result;
use crate::models::Problem;
use crate::solver::SolveResult;

/// Writes the human-readable report:
///
/// ```text
/// Instance: gdb1
/// Route  1 (load=  5): 1-1-2-2-4-1
/// ...
///
/// Total cost: 317
/// BKS: 316
/// GAP: 0.32%
/// Iters: 1234
/// Time: 12.34s
/// ```
///
/// A route line lists the depot, the entry and exit vertex of every task in
/// service order, then the depot. Integral costs are printed without
/// decimals; without a best-known cost the last two fields read `n/a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSolutionWriter;

impl TextSolutionWriter {
    /// Renders the report into a string.
    pub fn render(&self, problem: &Problem, result: &SolveResult) -> Result<String> {
        let mut buf = Vec::new();
        self.write(problem, result, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl SolutionWriter for TextSolutionWriter {
    fn write(&self, problem: &Problem, result: &SolveResult, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Instance: {}", problem.instance().name())?;
        for (i, route) in result.solution.routes().iter().enumerate() {
            let path = route
                .vertex_path(problem)
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("-");
            writeln!(out, "Route {:2} (load={:3}): {path}", i + 1, route.load())?;
        }
        writeln!(out)?;
        writeln!(out, "Total cost: {}", format_cost(result.solution.cost()))?;
        match result.best_known {
            Some(b) => writeln!(out, "BKS: {}", format_cost(b.value()))?,
            None => writeln!(out, "BKS: n/a")?,
        }
        match result.gap {
            Some(g) => writeln!(out, "GAP: {g:.2}%")?,
            None => writeln!(out, "GAP: n/a")?,
        }
        writeln!(out, "Iters: {}", result.iterations)?;
        writeln!(out, "Time: {:.2}s", result.elapsed.as_secs_f64())?;
        Ok(())
    }
}

fn format_cost(cost: f64) -> String {
    if cost.is_finite() && cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else {
        format!("{cost:.2}")
    }
}
