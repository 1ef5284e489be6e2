use serde::Serialize;

use crate::ir::{Interface, Port, PortDirection};

/// Text blocks derived from a port list, ready to drop into a template.
///
/// Each block keeps declaration order and is empty when there is nothing to
/// list; no block ever ends in a dangling separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortBlocks {
    pub ports: String,
    pub input_signals: String,
    pub output_signals: String,
    pub inout_signals: String,
    pub port_map: String,
}

impl PortBlocks {
    pub fn from_interface(iface: &Interface, single_bit_type: &str) -> Self {
        Self {
            ports: declaration_list(&iface.ports),
            input_signals: input_signal_declarations(&iface.ports, single_bit_type),
            output_signals: output_signal_declarations(&iface.ports),
            inout_signals: inout_signal_declarations(&iface.ports),
            port_map: port_map_associations(&iface.ports),
        }
    }
}

/// Port clause body: "A : in std_logic;\nB : out std_logic_vector(7 downto 0)"
pub fn declaration_list(ports: &[Port]) -> String {
    join_entries(ports.iter().map(Port::to_vhdl), ";\n")
}

/// Local signals for every `in` port, initialised to zero.
pub fn input_signal_declarations(ports: &[Port], single_bit_type: &str) -> String {
    let entries = ports
        .iter()
        .filter(|p| p.direction == PortDirection::In)
        .map(|p| {
            let default = if p.is_vector() {
                Some("(others => '0')")
            } else if p.is_single_bit(single_bit_type) {
                Some("'0'")
            } else {
                None
            };
            match default {
                Some(value) => format!("signal {} : {} := {};", p.name, p.type_to_vhdl(), value),
                None => signal_declaration(p),
            }
        });
    join_entries(entries, "\n")
}

/// Local signals for every `out` port, without initial values.
pub fn output_signal_declarations(ports: &[Port]) -> String {
    let entries = ports
        .iter()
        .filter(|p| p.direction == PortDirection::Out)
        .map(signal_declaration);
    join_entries(entries, "\n")
}

/// Local signals for every `inout` port, so the port map has a net to drive.
pub fn inout_signal_declarations(ports: &[Port]) -> String {
    let entries = ports
        .iter()
        .filter(|p| p.direction == PortDirection::InOut)
        .map(signal_declaration);
    join_entries(entries, "\n")
}

/// Port map body: "A => A,\nB => B"
pub fn port_map_associations(ports: &[Port]) -> String {
    join_entries(ports.iter().map(|p| format!("{} => {}", p.name, p.name)), ",\n")
}

fn signal_declaration(port: &Port) -> String {
    format!("signal {} : {};", port.name, port.type_to_vhdl())
}

// Separator goes between entries only, so an empty list gives an empty string.
fn join_entries<I>(entries: I, separator: &str) -> String
where
    I: Iterator<Item = String>,
{
    entries.collect::<Vec<_>>().join(separator)
}
