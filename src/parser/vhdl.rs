// Line-level recognizers for VHDL entity declarations.
//
// Every function here works on a single line that has already been passed
// through `normalize_line`, so tokens are separated by exactly one space.
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::DirectionPolicy;
use crate::ir::{BitRange, Port, PortDirection, RangeOrder, RangeSpec};
use crate::parser::RangeError;

lazy_static! {
    static ref PORT_RE: Regex = Regex::new(
        r"([[:word:]]+)\s*:\s*(inout|in|out)\s+([[:word:]]+)(?:\s*\(\s*([0-9]+)\s+((?i:downto|to))\s+([0-9]+)\s*\))?"
    )
    .expect("port regex is valid");
    static ref ENTITY_START_RE: Regex =
        Regex::new(r"\bentity\s+([[:word:]]+)\s+is\b").expect("entity start regex is valid");
    static ref ENTITY_END_RE: Regex =
        Regex::new(r"\bend\s+(?:entity\s+)?([[:word:]]+)\s*;").expect("entity end regex is valid");
}

/// Collapse every whitespace run into a single space and trim both ends.
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Recognize `name : direction type [(msb downto|to lsb)]`.
///
/// Returns `None` for lines that are not port declarations, including
/// declarations whose direction is rejected by `directions`. A port whose type
/// is followed by an unreadable range clause is still returned, with
/// `RangeSpec::Malformed` holding the clause as written; it is never given a
/// default width.
pub fn match_port(line: &str, directions: DirectionPolicy) -> Option<Port> {
    let cap = PORT_RE.captures(line)?;

    let direction = PortDirection::from_vhdl(&cap[2]).filter(|d| directions.allows(*d))?;
    let mut port = Port::new(cap[1].to_string(), direction, cap[3].to_string());

    let type_end = cap.get(3).map(|m| m.end()).unwrap_or(line.len());
    let match_end = cap.get(0).map(|m| m.end()).unwrap_or(line.len());

    port.range = match (cap.get(4), cap.get(5), cap.get(6)) {
        (Some(msb), Some(order), Some(lsb)) => {
            match (parse_bound(msb.as_str()), parse_bound(lsb.as_str())) {
                (Ok(msb), Ok(lsb)) => {
                    // The regex only admits the two keywords.
                    let order = RangeOrder::from_vhdl(order.as_str()).unwrap_or(RangeOrder::Downto);
                    RangeSpec::Bits(BitRange { msb, lsb, order })
                }
                (Err(error), _) | (_, Err(error)) => RangeSpec::Malformed {
                    clause: line[type_end..match_end].trim_start().to_string(),
                    error,
                },
            }
        }
        _ => match paren_clause(&line[type_end..]) {
            Some(clause) => RangeSpec::Malformed {
                clause: clause.to_string(),
                error: RangeError::Shape(clause.to_string()),
            },
            None => RangeSpec::None,
        },
    };

    Some(port)
}

// Leading "(...)" group of `rest`, balancing nested parentheses. An unclosed
// group runs to the end of the line.
fn paren_clause(rest: &str) -> Option<&str> {
    let rest = rest.trim_start();
    if !rest.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..=i]);
                }
            }
            _ => {}
        }
    }
    Some(rest)
}

fn parse_bound(digits: &str) -> Result<u32, RangeError> {
    digits
        .parse::<u32>()
        .map_err(|_| RangeError::Bound(digits.to_string()))
}

/// Name of the entity opened on this line, if any.
pub fn match_entity_start(line: &str) -> Option<String> {
    ENTITY_START_RE
        .captures(line)
        .map(|cap| cap[1].to_string())
}

/// Whether this line closes the entity called `name`.
///
/// An `end` for any other name does not close it.
pub fn match_entity_end(line: &str, name: &str) -> bool {
    ENTITY_END_RE
        .captures(line)
        .map(|cap| &cap[1] == name)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(line: &str) -> Option<Port> {
        match_port(&normalize_line(line), DirectionPolicy::All)
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("  A \t:   in\tstd_logic ;  "), "A : in std_logic ;");
        assert_eq!(normalize_line("\t \n"), "");
        assert_eq!(normalize_line(""), "");
    }

    #[test]
    fn test_match_single_bit_port() {
        let p = port("A : in std_logic;").unwrap();
        assert_eq!(p.name, "A");
        assert_eq!(p.direction, PortDirection::In);
        assert_eq!(p.port_type, "std_logic");
        assert_eq!(p.range, RangeSpec::None);
    }

    #[test]
    fn test_match_vector_port() {
        let p = port("B : out std_logic_vector(7 downto 0);").unwrap();
        assert_eq!(p.direction, PortDirection::Out);
        assert_eq!(p.port_type, "std_logic_vector");
        assert_eq!(p.bit_range(), Some(&BitRange::downto(7, 0)));
    }

    #[test]
    fn test_match_ascending_range_kept_verbatim() {
        let p = port("IDX : in unsigned ( 0 to 3 ) ;").unwrap();
        assert_eq!(p.bit_range(), Some(&BitRange::to(0, 3)));
    }

    #[test]
    fn test_match_inout_port() {
        let p = port("SDA : inout std_logic;").unwrap();
        assert_eq!(p.direction, PortDirection::InOut);
        assert_eq!(p.port_type, "std_logic");
    }

    #[test]
    fn test_inout_rejected_by_policy() {
        let line = normalize_line("SDA : inout std_logic;");
        assert_eq!(match_port(&line, DirectionPolicy::InOutOnly), None);
        assert!(match_port("SCL : in std_logic;", DirectionPolicy::InOutOnly).is_some());
    }

    #[test]
    fn test_port_inside_port_clause_opener() {
        let p = port("port ( CLK : in std_logic;").unwrap();
        assert_eq!(p.name, "CLK");
    }

    #[test]
    fn test_non_port_lines() {
        assert_eq!(port("entity counter is"), None);
        assert_eq!(port("port ("), None);
        assert_eq!(port(");"), None);
        assert_eq!(port(""), None);
        assert_eq!(port("signal cnt : std_logic;"), None);
        assert_eq!(port("X : input std_logic;"), None);
    }

    #[test]
    fn test_uppercase_range_keyword() {
        let p = port("D : in std_logic_vector(7 DOWNTO 0);").unwrap();
        assert_eq!(p.bit_range(), Some(&BitRange::downto(7, 0)));
        assert_eq!(p.to_vhdl(), "D : in std_logic_vector(7 downto 0)");
    }

    #[test]
    fn test_malformed_range_shape_keeps_port() {
        let p = port("D : in std_logic_vector(WIDTH-1 downto 0);").unwrap();
        assert_eq!(p.name, "D");
        assert_eq!(p.direction, PortDirection::In);
        assert_eq!(
            p.range,
            RangeSpec::Malformed {
                clause: "(WIDTH-1 downto 0)".to_string(),
                error: RangeError::Shape("(WIDTH-1 downto 0)".to_string()),
            }
        );
        assert_eq!(p.to_vhdl(), "D : in std_logic_vector(WIDTH-1 downto 0)");
    }

    #[test]
    fn test_malformed_range_nested_parens() {
        let p = port("D : out unsigned(log2(N) downto 0);").unwrap();
        assert_eq!(p.type_to_vhdl(), "unsigned(log2(N) downto 0)");
        assert!(p.range_error().is_some());
    }

    #[test]
    fn test_malformed_range_bound_overflow() {
        let p = port("D : in std_logic_vector(99999999999 downto 0);").unwrap();
        assert_eq!(
            p.range_error(),
            Some(&RangeError::Bound("99999999999".to_string()))
        );
        assert_eq!(p.type_to_vhdl(), "std_logic_vector(99999999999 downto 0)");
    }

    #[test]
    fn test_entity_start() {
        assert_eq!(match_entity_start("entity counter is"), Some("counter".to_string()));
        assert_eq!(match_entity_start("end entity counter;"), None);
        assert_eq!(match_entity_start("architecture rtl of counter is"), None);
    }

    #[test]
    fn test_entity_end() {
        assert!(match_entity_end("end counter;", "counter"));
        assert!(match_entity_end("end counter ;", "counter"));
        assert!(match_entity_end("end entity counter;", "counter"));
        assert!(!match_entity_end("end Other;", "counter"));
        assert!(!match_entity_end("end process;", "counter"));
        assert!(!match_entity_end("end counter", "counter"));
    }

    #[test]
    fn test_full_declaration_rematches() {
        let original = Port::new(
            "DATA".to_string(),
            PortDirection::Out,
            "std_logic_vector".to_string(),
        )
        .with_range(BitRange::downto(31, 0));
        let reparsed = port(&original.to_vhdl()).unwrap();
        assert_eq!(reparsed, original);
    }
}
