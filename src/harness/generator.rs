use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::GeneratorConfig;
use crate::harness::{HarnessTemplate, PortBlocks, TemplateContext};
use crate::ir::{Interface, Port};
use crate::parser::InterfaceExtractor;

/// Generate a VHDL testbench from an extracted interface.
pub struct TestbenchGenerator {
    config: GeneratorConfig,
    template: HarnessTemplate,
}

impl TestbenchGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let template = match &config.template {
            Some(path) => HarnessTemplate::from_file(path)
                .context(format!("Failed to load template: {:?}", path))?,
            None => HarnessTemplate::builtin(),
        };
        Ok(Self { config, template })
    }

    pub fn with_template(config: GeneratorConfig, template: HarnessTemplate) -> Self {
        Self { config, template }
    }

    /// Values exposed to the template for this interface.
    pub fn context(&self, iface: &Interface) -> Result<TemplateContext> {
        let blocks = PortBlocks::from_interface(iface, &self.config.single_bit_type);
        let reset_hold = self
            .config
            .reset_hold_ns()
            .context(format!("Cannot derive reset hold for entity: {}", iface.name))?;
        let port_name = |p: &Option<Port>| {
            p.as_ref().map(|p| p.name.clone()).unwrap_or_default()
        };

        let mut ctx = TemplateContext::new();
        ctx.set("entity", iface.name.as_str())
            .set("ports", blocks.ports)
            .set("input_signals", blocks.input_signals)
            .set("output_signals", blocks.output_signals)
            .set("inout_signals", blocks.inout_signals)
            .set("port_map", blocks.port_map)
            .set("clock", port_name(&iface.clock))
            .set("reset", port_name(&iface.reset))
            .set("clock_period", self.config.clock_period_ns.to_string())
            .set("reset_hold", reset_hold.to_string())
            .set(
                "generated_at",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            );
        Ok(ctx)
    }

    pub fn generate(&self, iface: &Interface) -> Result<String> {
        tracing::info!("Generating testbench for entity: {}", iface.name);
        let ctx = self.context(iface)?;
        let text = self
            .template
            .render(&ctx)
            .context(format!("Failed to render testbench for entity: {}", iface.name))?;
        Ok(text)
    }

    /// Render fully in memory, then replace `path` in one rename.
    pub fn write(&self, iface: &Interface, path: &Path) -> Result<()> {
        let text = self.generate(iface)?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .context(format!("Failed to create output file in: {:?}", dir))?;
        tmp.write_all(text.as_bytes())
            .context(format!("Failed to write testbench to: {:?}", path))?;
        tmp.persist(path)
            .context(format!("Failed to create output file: {:?}", path))?;

        tracing::info!("Testbench written to: {:?}", path);
        Ok(())
    }

    /// Extract `input`, render, and write to `output` or the default path.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let extractor = InterfaceExtractor::new(self.config.clone());
        let iface = extractor.extract_file(input)?;

        if iface.name.is_empty() {
            tracing::warn!("No entity declaration found in {:?}", input);
        }
        for warning in &iface.warnings {
            tracing::warn!("{:?} line {}: {}", input, warning.line, warning.message);
        }

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => self.config.default_output_path(input, &iface.name),
        };

        self.write(&iface, &output)?;
        Ok(output)
    }
}
