//! Best-known reference costs used to report the optimality gap.

/// A best-known solution cost (BKS) for an instance.
///
/// Only used to compute the gap and decide early termination; never part of
/// the optimization state.
///
/// # Examples
///
/// ```
/// use u_carp::models::BestKnown;
///
/// let bks = BestKnown::new(316.0).unwrap();
/// assert_eq!(format!("{:.2}", bks.gap_percent(317.0)), "0.32");
/// assert!(BestKnown::new(0.0).is_none());
/// assert_eq!(BestKnown::for_instance("gdb1").map(|b| b.value()), Some(316.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestKnown {
    value: f64,
}

/// Optimal costs of the DeArmon `gdb` benchmark set.
const GDB_BKS: [(&str, f64); 23] = [
    ("gdb1", 316.0),
    ("gdb2", 339.0),
    ("gdb3", 275.0),
    ("gdb4", 287.0),
    ("gdb5", 377.0),
    ("gdb6", 298.0),
    ("gdb7", 325.0),
    ("gdb8", 348.0),
    ("gdb9", 303.0),
    ("gdb10", 275.0),
    ("gdb11", 395.0),
    ("gdb12", 458.0),
    ("gdb13", 538.0),
    ("gdb14", 100.0),
    ("gdb15", 58.0),
    ("gdb16", 127.0),
    ("gdb17", 91.0),
    ("gdb18", 164.0),
    ("gdb19", 55.0),
    ("gdb20", 121.0),
    ("gdb21", 156.0),
    ("gdb22", 200.0),
    ("gdb23", 233.0),
];

impl BestKnown {
    /// Creates a reference value.
    ///
    /// Returns `None` unless `value` is finite and strictly positive.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Some(Self { value })
    }

    /// Looks up the built-in table of benchmark optima (case-insensitive).
    pub fn for_instance(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        GDB_BKS
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|&(_, v)| Self::new(v))
    }

    /// The reference cost.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Percentage excess of `cost` over this reference.
    pub fn gap_percent(&self, cost: f64) -> f64 {
        (cost - self.value) / self.value * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_formula() {
        let bks = BestKnown::new(316.0).expect("positive");
        let gap = bks.gap_percent(317.0);
        assert!((gap - 0.316_455_696).abs() < 1e-6);
        assert_eq!((gap * 100.0).round() / 100.0, 0.32);
    }

    #[test]
    fn test_gap_zero_and_negative() {
        let bks = BestKnown::new(100.0).expect("positive");
        assert_eq!(bks.gap_percent(100.0), 0.0);
        assert!(bks.gap_percent(90.0) < 0.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(BestKnown::new(-1.0).is_none());
        assert!(BestKnown::new(f64::NAN).is_none());
        assert!(BestKnown::new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(BestKnown::for_instance("GDB23").map(|b| b.value()), Some(233.0));
        assert!(BestKnown::for_instance("egl-e1-a").is_none());
    }
}
