//! Status Report Example
//!
//! Reads the status and alert registers of a simulated node and prints the
//! diagnostic reports. A few alerts are raised on the simulated drive first
//! so the report has something to show.
//!
//! Usage:
//!   cargo run --example status_report
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug cargo run --example status_report

use cpm_params::constants::{P_ALERT_REG, P_STATUS_RT_REG};
use cpm_params::sim::SimulatedDrive;
use cpm_params::{
    decode_alert_register, decode_status_register, write_status_report, AlertRegister, Cpm,
    NodeId, Result, StatusRegister,
};
use log::info;

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let node = NodeId::new(0, 1);
    let mut sim = SimulatedDrive::clearpath(node);

    // Enabled, moving in the positive direction, an RMS overload warning
    let status = StatusRegister::default().with_bit(4).with_bit(16).with_bit(32);
    sim.set_register(node, P_STATUS_RT_REG, status.to_bytes());
    let alerts = AlertRegister::default().with_bit(70).with_bit(28);
    sim.set_register(node, P_ALERT_REG, alerts.to_bytes());

    let mut cpm = Cpm::new(sim);
    cpm.setup_node(node)?;

    info!("=== Realtime Status ===");
    let status = cpm.status_rt_reg(node)?;
    print!("{}", decode_status_register(&status));

    info!("=== Alerts ===");
    let alerts = cpm.alert_reg(node)?;
    if alerts.is_clear() {
        info!("No alerts");
    } else {
        print!("{}", decode_alert_register(&alerts));
    }

    // Fixed-size buffer, as a display panel would use
    info!("=== Status (64 byte buffer) ===");
    let mut buf = [0u8; 64];
    let len = write_status_report(&status, &mut buf);
    print!("{}", String::from_utf8_lossy(&buf[..len]));

    let monitor = cpm.get_monitor(node, 0)?;
    info!(
        "Monitor channel 0: test point {}, full scale {:.1}, filter {:.3}ms",
        monitor.test_point.0, monitor.gain, monitor.filter_ms
    );

    Ok(())
}
