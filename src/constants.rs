// Signal classification
pub const SINGLE_BIT_TYPE: &str = "std_logic";
pub const CLOCK_MARKER: &str = "CLK";
pub const RESET_NAMES: [&str; 2] = ["RST", "RESET"];

// Output naming
pub const DEFAULT_OUTPUT_PREFIX: &str = "tb_";
pub const OUTPUT_EXTENSION: &str = "vhd";

// Harness timing
pub const DEFAULT_CLOCK_PERIOD_NS: u32 = 10;

// File size limits
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024; // 10 MB
