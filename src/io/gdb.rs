//! Loader for the `gdb` benchmark `.dat` format.
//!
//! ```text
//! NOMBRE : gdb1
//! VERTICES : 12
//! CAPACIDAD : 5
//! LISTA_ARISTAS_REQ :
//!  ( 1, 2)   coste 13   demanda 1
//!  ...
//! LISTA_ARISTAS_NOREQ :
//!  ( 3, 7)   coste 4
//! DEPOSITO :   1
//! ```
//!
//! Header lines are `KEY : value`; unknown keys are skipped. Edge lines are
//! read as the integers they contain, in order: `u v cost demand` for
//! required edges, `u v cost` for the others.

use super::InstanceLoader;
use crate::error::{CarpError, Result};
use crate::models::{Edge, Graph, Instance};

/// Parses `gdb`-style instance files.
///
/// # Examples
///
/// ```
/// use u_carp::io::{GdbLoader, InstanceLoader};
///
/// let text = "NOMBRE : gdb1\nVERTICES : 3\nCAPACIDAD : 5\n\
///             LISTA_ARISTAS_REQ :\n ( 1, 2) coste 4 demanda 2\n ( 2, 3) coste 3 demanda 1\n\
///             LISTA_ARISTAS_NOREQ :\n ( 3, 1) coste 5\nDEPOSITO : 1\n";
/// let inst = GdbLoader.parse(text).unwrap();
/// assert_eq!(inst.name(), "gdb1");
/// assert_eq!(inst.tasks().len(), 2);
/// assert_eq!(inst.graph().edges().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GdbLoader;

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Header,
    Required,
    NonRequired,
}

impl InstanceLoader for GdbLoader {
    fn parse(&self, text: &str) -> Result<Instance> {
        let mut name = None;
        let mut vertices = None;
        let mut capacity = None;
        let mut depot = None;
        let mut edges = Vec::new();
        let mut section = Section::Header;

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().to_ascii_uppercase();
                section = Section::Header;
                match key.as_str() {
                    "NOMBRE" => name = Some(normalize_name(value.trim())),
                    "VERTICES" => vertices = Some(header_int(&key, value)?),
                    "CAPACIDAD" => capacity = Some(header_int(&key, value)?),
                    "DEPOSITO" => depot = Some(header_int(&key, value)?),
                    "LISTA_ARISTAS_REQ" => section = Section::Required,
                    "LISTA_ARISTAS_NOREQ" | "LISTA_ARISTAS_NO_REQ" => {
                        section = Section::NonRequired
                    }
                    _ => {}
                }
                continue;
            }

            let nums = integers(line);
            match section {
                Section::Header => {}
                Section::Required => match nums.as_slice() {
                    [u, v, cost, demand, ..] => {
                        let (u, v) = (vertex(*u, lineno)?, vertex(*v, lineno)?);
                        let cost = *cost as f64;
                        let demand = i32::try_from(*demand).map_err(|_| {
                            CarpError::malformed(format!("line {}: demand out of range", lineno + 1))
                        })?;
                        // negative demand stays required so `Instance::new` rejects it
                        edges.push(if demand != 0 {
                            Edge::required(u, v, cost, demand)
                        } else {
                            Edge::deadhead(u, v, cost)
                        });
                    }
                    _ => return Err(edge_error(lineno, line)),
                },
                Section::NonRequired => match nums.as_slice() {
                    [u, v, cost, ..] => {
                        edges.push(Edge::deadhead(
                            vertex(*u, lineno)?,
                            vertex(*v, lineno)?,
                            *cost as f64,
                        ));
                    }
                    _ => return Err(edge_error(lineno, line)),
                },
            }
        }

        let name = name.ok_or_else(|| CarpError::malformed("missing NOMBRE"))?;
        let vertices = vertices.ok_or_else(|| CarpError::malformed("missing VERTICES"))?;
        let capacity = capacity.ok_or_else(|| CarpError::malformed("missing CAPACIDAD"))?;
        let depot = depot.ok_or_else(|| CarpError::malformed("missing DEPOSITO"))?;
        let capacity = i32::try_from(capacity)
            .map_err(|_| CarpError::malformed(format!("capacity {capacity} too large")))?;

        Instance::new(name, Graph::new(vertices, edges), depot, capacity)
    }
}

/// Lower-cases the name and keeps only a leading `gdbN` if there is one.
fn normalize_name(raw: &str) -> String {
    let name = raw.split_whitespace().next().unwrap_or("").to_ascii_lowercase();
    if let Some(rest) = name.strip_prefix("gdb") {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            return name[..3 + digits].to_string();
        }
    }
    name
}

/// Every maximal run of ASCII digits in `line`, in order. A `-` directly
/// before a run makes it negative.
fn integers(line: &str) -> Vec<i64> {
    let bytes = line.as_bytes();
    let mut nums = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        if bytes[i] == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if !bytes[i].is_ascii_digit() {
            i = start + 1;
            continue;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if let Ok(n) = line[start..i].parse() {
            nums.push(n);
        }
    }
    nums
}

fn header_int(key: &str, value: &str) -> Result<usize> {
    integers(value)
        .first()
        .and_then(|&n| usize::try_from(n).ok())
        .ok_or_else(|| CarpError::malformed(format!("{key}: expected an integer, got {:?}", value.trim())))
}

fn vertex(n: i64, lineno: usize) -> Result<usize> {
    usize::try_from(n)
        .map_err(|_| CarpError::malformed(format!("line {}: invalid vertex id {n}", lineno + 1)))
}

fn edge_error(lineno: usize, line: &str) -> CarpError {
    CarpError::malformed(format!("line {}: cannot read edge from {line:?}", lineno + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
NOMBRE : GDB7_square
COMENTARIO : 16 (cota superior)
VERTICES : 4
ARISTAS_REQ : 4
ARISTAS_NOREQ : 1
VEHICULOS : 2
CAPACIDAD : 6
TIPO_COSTES_ARISTAS : EXPLICITOS
COSTE_TOTAL_REQ : 8
LISTA_ARISTAS_REQ :
 ( 1, 2)   coste 2   demanda 3
 ( 2, 3)   coste 2   demanda 3
 ( 3, 4)   coste 2   demanda 3
 ( 4, 1)   coste 2   demanda 3
LISTA_ARISTAS_NOREQ :
 ( 1, 3)   coste 5
DEPOSITO :   1
";

    #[test]
    fn test_parse_full_file() {
        let inst = GdbLoader.parse(SQUARE).expect("valid");
        assert_eq!(inst.name(), "gdb7");
        assert_eq!(inst.graph().num_vertices(), 4);
        assert_eq!(inst.capacity(), 6);
        assert_eq!(inst.depot(), 1);
        assert_eq!(inst.tasks().len(), 4);
        assert_eq!(inst.total_demand(), 12);
        let chord = &inst.graph().edges()[4];
        assert!(!chord.required);
        assert_eq!((chord.u, chord.v, chord.cost), (1, 3, 5.0));
    }

    #[test]
    fn test_zero_demand_required_edge_is_deadhead() {
        let text = SQUARE.replace("( 2, 3)   coste 2   demanda 3", "( 2, 3)   coste 2   demanda 0");
        let inst = GdbLoader.parse(&text).expect("valid");
        assert_eq!(inst.tasks().len(), 3);
        assert_eq!(inst.graph().edges().len(), 5);
    }

    #[test]
    fn test_negative_cost_rejected() {
        let text = SQUARE.replace("( 1, 2)   coste 2", "( 1, 2)   coste -7");
        assert!(matches!(GdbLoader.parse(&text), Err(CarpError::MalformedInstance { .. })));

        let text = SQUARE.replace("( 1, 3)   coste 5", "( 1, 3)   coste -5");
        assert!(matches!(GdbLoader.parse(&text), Err(CarpError::MalformedInstance { .. })));
    }

    #[test]
    fn test_negative_demand_rejected() {
        let text = SQUARE.replace("( 1, 2)   coste 2   demanda 3", "( 1, 2)   coste 2   demanda -3");
        assert!(matches!(GdbLoader.parse(&text), Err(CarpError::MalformedInstance { .. })));

        let text = SQUARE.replace("( 1, 2)   coste 2   demanda 3", "( 1, 2)   coste -7   demanda -3");
        assert!(matches!(GdbLoader.parse(&text), Err(CarpError::MalformedInstance { .. })));
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(integers("( 1, 2) coste -7 demanda -3"), vec![1, 2, -7, -3]);
        assert_eq!(integers("a - 4 -x 5-6"), vec![4, 5, -6]);
        assert!(integers("coste").is_empty());
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_name("gdb12"), "gdb12");
        assert_eq!(normalize_name("GDB3.dat"), "gdb3");
        assert_eq!(normalize_name("Custom"), "custom");
        assert_eq!(normalize_name("gdbx"), "gdbx");
    }

    #[test]
    fn test_missing_header_field() {
        let text = SQUARE.replace("CAPACIDAD : 6\n", "");
        let err = GdbLoader.parse(&text).expect_err("no capacity");
        assert!(err.to_string().contains("CAPACIDAD"));
    }

    #[test]
    fn test_short_edge_line() {
        let text = SQUARE.replace("( 3, 4)   coste 2   demanda 3", "( 3, 4)   coste");
        assert!(matches!(GdbLoader.parse(&text), Err(CarpError::MalformedInstance { .. })));
    }

    #[test]
    fn test_depot_out_of_range() {
        let text = SQUARE.replace("DEPOSITO :   1", "DEPOSITO :   9");
        assert!(matches!(GdbLoader.parse(&text), Err(CarpError::MalformedInstance { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GdbLoader
            .load(std::path::Path::new("/nonexistent/instance.dat"))
            .expect_err("no file");
        assert!(matches!(err, CarpError::Io(_)));
    }
}
