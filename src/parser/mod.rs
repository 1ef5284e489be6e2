pub mod classify;
pub mod error;
pub mod extractor;
pub mod vhdl;

pub use classify::{classify_signals, Classification};
pub use error::{ParseError, RangeError};
pub use extractor::InterfaceExtractor;
pub use vhdl::{match_entity_end, match_entity_start, match_port, normalize_line};
