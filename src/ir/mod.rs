pub mod model;

pub use model::{
    BitRange, ExtractWarning, Interface, Port, PortDirection, RangeError, RangeOrder, RangeSpec,
};
