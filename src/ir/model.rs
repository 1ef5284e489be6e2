use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    In,
    Out,
    InOut,
}

impl PortDirection {
    pub fn from_vhdl(s: &str) -> Option<Self> {
        match s {
            "in" => Some(PortDirection::In),
            "out" => Some(PortDirection::Out),
            "inout" => Some(PortDirection::InOut),
            _ => None,
        }
    }

    pub fn as_vhdl(&self) -> &'static str {
        match self {
            PortDirection::In => "in",
            PortDirection::Out => "out",
            PortDirection::InOut => "inout",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_vhdl())
    }
}

/// Keyword used between the two bounds of a bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOrder {
    Downto,
    To,
}

impl RangeOrder {
    /// VHDL keywords are case-insensitive; `DOWNTO` reads as `downto`.
    pub fn from_vhdl(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "downto" => Some(RangeOrder::Downto),
            "to" => Some(RangeOrder::To),
            _ => None,
        }
    }

    pub fn as_vhdl(&self) -> &'static str {
        match self {
            RangeOrder::Downto => "downto",
            RangeOrder::To => "to",
        }
    }
}

/// Explicit bit range of a vector port.
///
/// `msb` and `lsb` hold the first and second captured bound. Ascending ranges
/// are stored verbatim, so `msb < lsb` is possible when `order` is `To`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitRange {
    pub msb: u32,
    pub lsb: u32,
    pub order: RangeOrder,
}

impl BitRange {
    pub fn downto(msb: u32, lsb: u32) -> Self {
        Self {
            msb,
            lsb,
            order: RangeOrder::Downto,
        }
    }

    pub fn to(msb: u32, lsb: u32) -> Self {
        Self {
            msb,
            lsb,
            order: RangeOrder::To,
        }
    }

    /// Format: "(7 downto 0)"
    pub fn to_vhdl(&self) -> String {
        format!("({} {} {})", self.msb, self.order.as_vhdl(), self.lsb)
    }
}

/// Why a bit range clause following a port type could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RangeError {
    #[error("expected '(<msb> downto|to <lsb>)', found '{0}'")]
    Shape(String),

    #[error("bound '{0}' does not fit a bit index")]
    Bound(String),
}

/// Bit range clause of a port declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeSpec {
    /// No clause after the type.
    #[default]
    None,
    Bits(BitRange),
    /// A clause is present but could not be read; `clause` is the text as written.
    Malformed { clause: String, error: RangeError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub direction: PortDirection,
    pub port_type: String,
    pub range: RangeSpec,
}

impl Port {
    pub fn new(name: String, direction: PortDirection, port_type: String) -> Self {
        Self {
            name,
            direction,
            port_type,
            range: RangeSpec::None,
        }
    }

    pub fn with_range(mut self, range: BitRange) -> Self {
        self.range = RangeSpec::Bits(range);
        self
    }

    pub fn bit_range(&self) -> Option<&BitRange> {
        match &self.range {
            RangeSpec::Bits(range) => Some(range),
            _ => None,
        }
    }

    pub fn range_error(&self) -> Option<&RangeError> {
        match &self.range {
            RangeSpec::Malformed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// True when the declaration carries any range clause, readable or not.
    pub fn is_vector(&self) -> bool {
        self.range != RangeSpec::None
    }

    pub fn is_single_bit(&self, single_bit_type: &str) -> bool {
        self.port_type == single_bit_type
    }

    /// Type as written in a declaration, e.g. "std_logic_vector(7 downto 0)".
    ///
    /// An unreadable clause is reproduced verbatim.
    pub fn type_to_vhdl(&self) -> String {
        match &self.range {
            RangeSpec::None => self.port_type.clone(),
            RangeSpec::Bits(range) => format!("{}{}", self.port_type, range.to_vhdl()),
            RangeSpec::Malformed { clause, .. } => format!("{}{}", self.port_type, clause),
        }
    }

    /// Format: "data : in std_logic_vector(7 downto 0)"
    pub fn to_vhdl(&self) -> String {
        format!("{} : {} {}", self.name, self.direction, self.type_to_vhdl())
    }
}

/// A line whose port could not be fully read, kept so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractWarning {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub ports: Vec<Port>,
    pub clock: Option<Port>,
    pub reset: Option<Port>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<ExtractWarning>,
}

impl Interface {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn add_port(&mut self, port: Port) {
        self.ports.push(port);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
