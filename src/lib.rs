pub mod config;
pub mod constants;
pub mod harness;
pub mod ir;
pub mod parser;

// Re-export commonly used types
pub use config::{DirectionPolicy, GeneratorConfig};
pub use harness::{HarnessTemplate, PortBlocks, TestbenchGenerator};
pub use ir::{BitRange, Interface, Port, PortDirection, RangeError, RangeOrder, RangeSpec};
pub use parser::{InterfaceExtractor, ParseError};
