//! VHDL Testbench Generator
//!
//! Reads a VHDL file, extracts the entity's port list and writes a matching
//! testbench skeleton next to it.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vhdl_tbgen::{GeneratorConfig, TestbenchGenerator};

#[derive(Parser)]
#[command(name = "vhdl-tbgen")]
#[command(about = "Generate a VHDL testbench skeleton from an entity's port list")]
#[command(version)]
struct Args {
    /// Input VHDL file
    #[arg(short, long)]
    input: PathBuf,

    /// Output testbench file (default: <input dir>/tb_<entity>.vhd)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON generator configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    let generator = TestbenchGenerator::new(config)?;
    let written = generator.run(&args.input, args.output.as_deref())?;

    println!("✓ Testbench written to: {}", written.display());
    Ok(())
}
