pub mod generator;
pub mod reducers;
pub mod template;

pub use generator::TestbenchGenerator;
pub use reducers::{
    declaration_list, inout_signal_declarations, input_signal_declarations,
    output_signal_declarations, port_map_associations, PortBlocks,
};
pub use template::{HarnessTemplate, TemplateContext, TemplateError};
