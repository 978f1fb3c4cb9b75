//! # ClearPath-SC Parameter Library
//!
//! A Rust library for reading and writing the parameters of Teknic
//! ClearPath-SC motor drives in engineering units. Every addressable
//! parameter is described by a static descriptor (wire size, fixed-point
//! scale, storage class, firmware gate) and, where the drive's internal
//! representation is not a plain scale, a bidirectional unit converter.
//!
//! ## Features
//!
//! - Descriptor tables for the base, drive, application and 2.0 banks
//! - Converters for currents, RMS limits and filters, time constants,
//!   commutation angle, velocity, jerk smoothing and monitor gain
//! - Per-node value caches with firmware and hardware gating
//! - Stimulus generator and monitor port access
//! - Human-readable status and alert register reports
//! - An in-memory simulated drive for tests and demos
//!
//! The library never talks to a port itself: supply a [`Transport`]
//! implementation for your network layer.
//!
//! ## Example
//!
//! ```no_run
//! use cpm_params::{constants::P_I_MAX, sim::SimulatedDrive, Cpm, NodeId};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let node = NodeId::new(0, 0);
//!     let mut cpm = Cpm::new(SimulatedDrive::clearpath(node));
//!     cpm.setup_node(node)?;
//!     let amps = cpm.get_parameter(node, P_I_MAX)?;
//!     println!("Drive maximum current: {:.2}A", amps);
//!     Ok(())
//! }
//! ```

pub mod constants;
pub mod convert;
pub mod data;
pub mod database;
pub mod error;
pub mod protocol;
pub mod registers;
pub mod scale;
pub mod sim;
pub mod transport;
pub mod types;

pub use convert::{apply, Aux, Conversion, ConverterKind, Direction};
pub use database::{NodeParameterDatabase, NodeRegistry, ParameterBank};
pub use error::{ParamError, Result};
pub use protocol::Cpm;
pub use registers::{
    decode_alert_register, decode_status_register, write_alert_report, write_status_report,
    AlertRegister, InMotion, ShutdownState, StatusRegister,
};
pub use transport::Transport;
pub use types::*;
