use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants;
use crate::ir::PortDirection;

/// Which port directions the matcher accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    /// in, out and inout
    #[default]
    All,
    /// in and out only; inout declarations are not recognized as ports
    InOutOnly,
}

impl DirectionPolicy {
    pub fn allows(&self, direction: PortDirection) -> bool {
        match self {
            DirectionPolicy::All => true,
            DirectionPolicy::InOutOnly => direction != PortDirection::InOut,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub single_bit_type: String,
    pub directions: DirectionPolicy,
    /// Fail extraction on a malformed bit range instead of keeping the port with a warning.
    pub strict_ranges: bool,
    /// Custom template; the built-in testbench template is used when unset.
    pub template: Option<PathBuf>,
    pub output_prefix: String,
    pub clock_period_ns: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            single_bit_type: constants::SINGLE_BIT_TYPE.to_string(),
            directions: DirectionPolicy::All,
            strict_ranges: false,
            template: None,
            output_prefix: constants::DEFAULT_OUTPUT_PREFIX.to_string(),
            clock_period_ns: constants::DEFAULT_CLOCK_PERIOD_NS,
        }
    }
}

impl GeneratorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .context(format!("Invalid config file: {:?}", path))?;
        config
            .validate()
            .context(format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock_period_ns == 0 {
            return Err(anyhow::anyhow!("clock_period_ns must be greater than zero"));
        }
        self.reset_hold_ns()?;
        Ok(())
    }

    /// Reset is held for two clock periods.
    pub fn reset_hold_ns(&self) -> Result<u32> {
        self.clock_period_ns.checked_mul(2).ok_or_else(|| {
            anyhow::anyhow!(
                "clock_period_ns {} is too large: reset hold of two periods overflows u32",
                self.clock_period_ns
            )
        })
    }

    /// Default output path: `<input dir>/tb_<entity>.vhd`
    pub fn default_output_path(&self, input: &Path, entity_name: &str) -> PathBuf {
        let dir = input.parent().unwrap_or(Path::new("."));
        dir.join(format!(
            "{}{}.{}",
            self.output_prefix,
            entity_name,
            constants::OUTPUT_EXTENSION
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_direction_policy() {
        assert!(DirectionPolicy::All.allows(PortDirection::InOut));
        assert!(DirectionPolicy::InOutOnly.allows(PortDirection::In));
        assert!(DirectionPolicy::InOutOnly.allows(PortDirection::Out));
        assert!(!DirectionPolicy::InOutOnly.allows(PortDirection::InOut));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "directions": "in_out_only", "strict_ranges": true }"#)
            .unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.directions, DirectionPolicy::InOutOnly);
        assert!(config.strict_ranges);
        assert_eq!(config.single_bit_type, "std_logic");
        assert_eq!(config.clock_period_ns, 10);
        assert!(config.template.is_none());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(GeneratorConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_huge_clock_period_rejected_on_load() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "clock_period_ns": 3000000000 }"#).unwrap();

        let err = GeneratorConfig::from_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("too large"));
    }

    #[test]
    fn test_zero_clock_period_rejected() {
        let config = GeneratorConfig {
            clock_period_ns: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reset_hold_is_two_periods() {
        let config = GeneratorConfig::default();
        assert_eq!(config.reset_hold_ns().unwrap(), 20);

        let config = GeneratorConfig {
            clock_period_ns: u32::MAX / 2 + 1,
            ..Default::default()
        };
        assert!(config.reset_hold_ns().is_err());
    }

    #[test]
    fn test_default_output_path() {
        let config = GeneratorConfig::default();
        let path = config.default_output_path(Path::new("rtl/counter.vhd"), "counter");
        assert_eq!(path, PathBuf::from("rtl/tb_counter.vhd"));
    }
}
