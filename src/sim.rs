//! In-memory simulated drive.
//!
//! Implements [`Transport`] over a register map so the library can be driven
//! without hardware. Every request is recorded for later inspection, and
//! reads, writes or commands can be made to fail on demand.
//!
//! Commands follow a simple get/set convention: a packet with an empty
//! payload returns the stored command state, a packet with a payload
//! overwrites the front of that state and returns nothing. Explicitly queued
//! responses take precedence over both.
//!
//! # Example
//!
//! ```
//! use cpm_params::sim::SimulatedDrive;
//! use cpm_params::{Cpm, NodeId};
//!
//! let node = NodeId::new(0, 0);
//! let mut cpm = Cpm::new(SimulatedDrive::clearpath(node));
//! cpm.setup_node(node).unwrap();
//! let amps = cpm.get_parameter(node, cpm_params::constants::P_I_MAX).unwrap();
//! assert_eq!(amps, 20.0);
//! ```

use crate::constants::*;
use crate::data::BANKS;
use crate::error::{ParamError, Result};
use crate::scale::{pack, to_q};
use crate::transport::Transport;
use crate::types::{NodeId, TestPoint};
use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;

/// Simulated set of nodes behind one transport
#[derive(Debug, Default)]
pub struct SimulatedDrive {
    registers: HashMap<(NodeId, u16), Vec<u8>>,
    command_state: HashMap<(NodeId, u8), Vec<u8>>,
    queued: HashMap<(NodeId, u8), VecDeque<Vec<u8>>>,
    failing_reads: HashSet<(NodeId, u16)>,
    failing_writes: HashSet<(NodeId, u16)>,
    failing_commands: HashSet<(NodeId, u8)>,
    reads: Vec<(NodeId, u16)>,
    writes: Vec<(NodeId, u16, Vec<u8>)>,
    commands: Vec<(NodeId, Vec<u8>)>,
}

impl SimulatedDrive {
    /// Empty simulator with no nodes
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator holding one ClearPath-SC node on 2.0 firmware
    pub fn clearpath(node: NodeId) -> Self {
        let mut sim = Self::new();
        sim.add_clearpath(node);
        sim
    }

    /// Populate `node` with a plausible ClearPath-SC register image:
    /// 20 A drive, 25 A ADC, 50 us sample period, 8 pole motor with a
    /// 4000 count encoder and 800 step command density. Every other
    /// parameter reads as zero.
    pub fn add_clearpath(&mut self, node: NodeId) {
        for desc in BANKS.iter().flat_map(|bank| bank.iter()) {
            if !desc.is_placeholder() {
                self.set_register(node, desc.id, vec![0; desc.size as usize]);
            }
        }

        let device_id = ((DEVICE_TYPE_CS as i64) << 8) | 0x01;
        let values: &[(u16, i64, usize)] = &[
            (P_DEVICE_ID, device_id, 2),
            (P_FW_VERSION, FW_MILESTONE_2R0 as i64, 2),
            (P_HW_VERSION, 0x0100, 2),
            (P_SAMPLE_PERIOD, 50_000, 4),
            (P_STATUS_RT_REG, 0x0001_0000, 6),
            (P_NETERR_APP[0], 3, 2),
            (P_NETERR_APP[2], 1, 2),
            (11, 2000, 2),
            (61, 4 * 131072, 4),
            (62, 16 * 131072, 4),
            (80, 8192, 2),
            (82, 10_737_418, 4),
            (83, -1500, 3),
            (85, 262_144, 4),
            (91, 100, 4),
            (P_ADC_MAX, 13107, 2),
            (P_I_MAX, 20 * 512, 2),
            (P_FS_BUS_VOLTS, 100 * 32, 2),
            (P_RMS_LIM, 42_949_673, 4),
            (271, 5000, 2),
            (P_RMS_SLOW_LIM, 27_487_791, 4),
            (280, 24_576, 2),
            (P_ENC_DENS, 4000, 4),
            (P_MTR_POLES, 8, 2),
            (P_MTR_OHMS, 768, 2),
            (317, 1000, 4),
            (P_CMD_CNTS_PER_REV, 800, 4),
            (350, 24_576, 2),
            (352, 32_000, 2),
            (778, 16_384, 4),
        ];
        for &(id, bits, size) in values {
            self.set_register(node, id, pack(bits, size));
        }

        let mut monitor = TestPoint::VEL_MEAS.0.to_le_bytes().to_vec();
        monitor.extend_from_slice(&(to_q(2.0, MON_GAIN_Q) as i32).to_le_bytes());
        monitor.extend_from_slice(&32_000u16.to_le_bytes());
        monitor.push(0);
        self.set_command_state(node, CMD_GET_SET_MONITOR, monitor.clone());
        self.set_command_state(node, CMD_GET_SET_MONITOR1, monitor);
        self.set_command_state(node, CMD_GET_SET_STIMULUS, vec![0; STIM_RESP_OCTETS]);
        let mut name = b"CPM-SCSK-2321S-EQNA".to_vec();
        name.resize(MOTOR_FILE_NAME_SIZE, 0);
        self.set_command_state(node, CMD_MOTOR_FILE, name);
    }

    pub fn set_register(&mut self, node: NodeId, id: u16, bytes: Vec<u8>) {
        self.registers.insert((node, id), bytes);
    }

    /// Store `bits` as a `size`-byte little-endian image
    pub fn set_bits(&mut self, node: NodeId, id: u16, bits: i64, size: usize) {
        self.set_register(node, id, pack(bits, size));
    }

    pub fn register(&self, node: NodeId, id: u16) -> Option<&[u8]> {
        self.registers.get(&(node, id)).map(Vec::as_slice)
    }

    pub fn remove_register(&mut self, node: NodeId, id: u16) {
        self.registers.remove(&(node, id));
    }

    pub fn set_command_state(&mut self, node: NodeId, code: u8, bytes: Vec<u8>) {
        self.command_state.insert((node, code), bytes);
    }

    pub fn command_state(&self, node: NodeId, code: u8) -> Option<&[u8]> {
        self.command_state.get(&(node, code)).map(Vec::as_slice)
    }

    /// Queue a one-shot response for the next `code` command to `node`
    pub fn queue_response(&mut self, node: NodeId, code: u8, response: Vec<u8>) {
        self.queued.entry((node, code)).or_default().push_back(response);
    }

    /// Make reads of `id` fail with a transport error
    pub fn fail_read(&mut self, node: NodeId, id: u16) {
        self.failing_reads.insert((node, id));
    }

    /// Make writes of `id` fail as a broken link
    pub fn fail_write(&mut self, node: NodeId, id: u16) {
        self.failing_writes.insert((node, id));
    }

    pub fn fail_command(&mut self, node: NodeId, code: u8) {
        self.failing_commands.insert((node, code));
    }

    pub fn clear_failures(&mut self) {
        self.failing_reads.clear();
        self.failing_writes.clear();
        self.failing_commands.clear();
    }

    /// Every read issued so far
    pub fn reads(&self) -> &[(NodeId, u16)] {
        &self.reads
    }

    /// Every write issued so far
    pub fn writes(&self) -> &[(NodeId, u16, Vec<u8>)] {
        &self.writes
    }

    /// Every command packet issued so far, code byte first
    pub fn commands(&self) -> &[(NodeId, Vec<u8>)] {
        &self.commands
    }

    pub fn read_count(&self, node: NodeId, id: u16) -> usize {
        self.reads.iter().filter(|&&r| r == (node, id)).count()
    }

    pub fn clear_history(&mut self) {
        self.reads.clear();
        self.writes.clear();
        self.commands.clear();
    }
}

impl Transport for SimulatedDrive {
    fn read_raw(&mut self, node: NodeId, param: u16) -> Result<Vec<u8>> {
        debug!("sim read {} param {}", node, param);
        self.reads.push((node, param));
        if self.failing_reads.contains(&(node, param)) {
            return Err(ParamError::Transport(format!(
                "read of {} on node {} failed",
                param, node
            )));
        }
        self.registers
            .get(&(node, param))
            .cloned()
            .ok_or(ParamError::Timeout)
    }

    fn write_raw(&mut self, node: NodeId, param: u16, data: &[u8]) -> Result<()> {
        debug!("sim write {} param {} = {:02X?}", node, param, data);
        self.writes.push((node, param, data.to_vec()));
        if self.failing_writes.contains(&(node, param)) {
            let err = io::Error::new(
                io::ErrorKind::BrokenPipe,
                format!("write of {} on node {} failed", param, node),
            );
            return Err(err.into());
        }
        self.registers.insert((node, param), data.to_vec());
        Ok(())
    }

    fn run_command(&mut self, node: NodeId, code: u8, payload: &[u8]) -> Result<Vec<u8>> {
        let mut packet = Vec::with_capacity(payload.len() + 1);
        packet.push(code);
        packet.extend_from_slice(payload);
        debug!("sim command {} {:02X?}", node, packet);
        self.commands.push((node, packet));
        if self.failing_commands.contains(&(node, code)) {
            return Err(ParamError::Transport(format!(
                "command {:#04x} on node {} failed",
                code, node
            )));
        }
        if let Some(response) = self.queued.get_mut(&(node, code)).and_then(VecDeque::pop_front) {
            return Ok(response);
        }
        if payload.is_empty() {
            return Ok(self.command_state(node, code).map(<[u8]>::to_vec).unwrap_or_default());
        }
        let state = self.command_state.entry((node, code)).or_default();
        if state.len() < payload.len() {
            state.resize(payload.len(), 0);
        }
        state[..payload.len()].copy_from_slice(payload);
        Ok(Vec::new())
    }
}
