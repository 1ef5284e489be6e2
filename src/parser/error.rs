pub use crate::ir::RangeError;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed bit range on line {line}: {source}")]
    MalformedRange {
        line: usize,
        #[source]
        source: RangeError,
    },

    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },
}
