use crate::constants::{CLOCK_MARKER, RESET_NAMES};
use crate::ir::Port;

/// Clock and reset ports picked out of an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub clock: Option<Port>,
    pub reset: Option<Port>,
}

/// Designate the clock and reset ports by name and type.
///
/// A clock is a single-bit port whose name contains `CLK`; a reset is a
/// single-bit port named exactly `RST` or `RESET`. Matching is case-sensitive
/// and the last matching port in declaration order wins.
pub fn classify_signals(ports: &[Port], single_bit_type: &str) -> Classification {
    let mut result = Classification::default();

    for port in ports {
        if !port.is_single_bit(single_bit_type) {
            continue;
        }
        if port.name.contains(CLOCK_MARKER) {
            result.clock = Some(port.clone());
        } else if RESET_NAMES.contains(&port.name.as_str()) {
            result.reset = Some(port.clone());
        }
    }

    result
}
