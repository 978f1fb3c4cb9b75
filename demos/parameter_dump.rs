//! Parameter Dump Example
//!
//! Sets up a simulated ClearPath-SC node and prints every parameter it
//! exposes in engineering units, then the same data as a JSON snapshot.
//!
//! Usage:
//!   cargo run --example parameter_dump
//!   cargo run --example parameter_dump -- json     # JSON snapshot only
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug cargo run --example parameter_dump

use cpm_params::sim::SimulatedDrive;
use cpm_params::{Cpm, NodeId, Result};
use log::info;

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let json_only = std::env::args().nth(1).as_deref() == Some("json");

    let node = NodeId::new(0, 0);
    let mut cpm = Cpm::new(SimulatedDrive::clearpath(node));
    let info = cpm.setup_node(node)?;
    info!(
        "Node {}: firmware {:#06x}, hardware {:#06x}",
        node, info.fw_version, info.hw_version
    );

    let snapshot = cpm.snapshot(node)?;

    if !json_only {
        info!("=== Parameters ===");
        for entry in &snapshot.parameters {
            let desc = cpm.parameter_info(node, entry.id)?;
            println!(
                "{:>4}  {:<40} {:>16.4}  {:?}",
                entry.id, entry.name, entry.value, desc.unit
            );
        }
        info!("{} parameters read", snapshot.parameters.len());
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize snapshot: {}", e),
    }

    Ok(())
}
