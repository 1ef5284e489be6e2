use anyhow::{Context, Result};
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::constants;
use crate::ir::{ExtractWarning, Interface};
use crate::parser::vhdl::{match_entity_end, match_entity_start, match_port, normalize_line};
use crate::parser::{classify_signals, ParseError};

/// Where the scan currently is relative to the entity declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside { name: String },
}

/// Single-pass, line-oriented extraction of an entity's port list.
pub struct InterfaceExtractor {
    config: GeneratorConfig,
}

impl InterfaceExtractor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn extract_file(&self, path: &Path) -> Result<Interface> {
        let size = std::fs::metadata(path)
            .context(format!("Failed to read VHDL file: {:?}", path))?
            .len();
        check_size(size).context(format!("Refusing to read VHDL file: {:?}", path))?;

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read VHDL file: {:?}", path))?;
        let iface = self
            .extract(&content)
            .context(format!("Failed to extract interface from: {:?}", path))?;
        Ok(iface)
    }

    /// Scan `source` and return the entity name, ports and clock/reset picks.
    ///
    /// Text without an entity declaration yields an empty interface.
    pub fn extract(&self, source: &str) -> Result<Interface, ParseError> {
        check_size(source.len() as u64)?;

        let mut state = ScanState::Outside;
        let mut iface = Interface::default();

        for (index, raw) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = normalize_line(raw);

            if let Some(name) = match_entity_start(&line) {
                tracing::debug!("Entity '{}' opened on line {}", name, line_no);
                iface.name = name.clone();
                state = ScanState::Inside { name };
            }

            let name = match &state {
                ScanState::Inside { name } => name,
                ScanState::Outside => continue,
            };

            let closes = match_entity_end(&line, name);

            if let Some(port) = match_port(&line, self.config.directions) {
                if let Some(error) = port.range_error() {
                    if self.config.strict_ranges {
                        return Err(ParseError::MalformedRange {
                            line: line_no,
                            source: error.clone(),
                        });
                    }
                    tracing::warn!(
                        "Port '{}' on line {} has a malformed bit range: {}",
                        port.name,
                        line_no,
                        error
                    );
                    iface.warnings.push(ExtractWarning {
                        line: line_no,
                        message: format!("port '{}': {}", port.name, error),
                    });
                }
                tracing::debug!("Port on line {}: {}", line_no, port.to_vhdl());
                iface.add_port(port);
            }

            if closes {
                tracing::debug!("Entity '{}' closed on line {}", name, line_no);
                state = ScanState::Outside;
            }
        }

        if let ScanState::Inside { name } = &state {
            tracing::debug!("Entity '{}' not closed before end of input", name);
        }

        let classification = classify_signals(&iface.ports, &self.config.single_bit_type);
        iface.clock = classification.clock;
        iface.reset = classification.reset;

        tracing::info!(
            "Extracted entity '{}' with {} port(s)",
            iface.name,
            iface.ports.len()
        );

        Ok(iface)
    }
}

fn check_size(size: u64) -> Result<(), ParseError> {
    let limit = constants::MAX_FILE_SIZE_BYTES as u64;
    if size > limit {
        return Err(ParseError::InputTooLarge { size, limit });
    }
    Ok(())
}

impl Default for InterfaceExtractor {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
