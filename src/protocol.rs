use crate::constants::*;
use crate::convert::{self, Aux, Conversion, ConverterKind, Direction};
use crate::database::{NodeParameterDatabase, NodeRegistry};
use crate::error::{ParamError, Result};
use crate::registers::{AlertRegister, StatusRegister};
use crate::scale::{decode_bits, encode_bits, unpack};
use crate::transport::Transport;
use crate::types::*;
use chrono::Utc;
use log::{debug, info, warn};

/// Main ClearPath-SC parameter interface
pub struct Cpm<T: Transport> {
    transport: T,
    registry: NodeRegistry,
    factory_access: bool,
}

impl<T: Transport> Cpm<T> {
    /// Create an interface over `transport` with no nodes set up
    pub fn new(transport: T) -> Self {
        Cpm {
            transport,
            registry: NodeRegistry::new(),
            factory_access: false,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NodeRegistry {
        &mut self.registry
    }

    /// Allow writes to factory parameters and hardware-locked descriptors
    pub fn set_factory_access(&mut self, enabled: bool) {
        self.factory_access = enabled;
    }

    pub fn factory_access(&self) -> bool {
        self.factory_access
    }

    /// Identify `node` and build its parameter database.
    ///
    /// Any previous database for the node is dropped first, so a failed
    /// setup leaves the node unregistered.
    pub fn setup_node(&mut self, node: NodeId) -> Result<NodeInfo> {
        if self.registry.remove(node).is_some() {
            info!("Dropped previous parameter database of node {}", node);
        }

        let id_raw = self.transport.read_raw(node, P_DEVICE_ID)?;
        let device_id = unpack(&id_raw, Signedness::Unsigned) as u16;
        let device_type = (device_id >> 8) as u8;
        if !matches!(device_type, DEVICE_TYPE_CS | DEVICE_TYPE_GS | DEVICE_TYPE_EP) {
            return Err(ParamError::WrongNodeType { device_type });
        }

        let fw_raw = self.transport.read_raw(node, P_FW_VERSION)?;
        let fw_version = unpack(&fw_raw, Signedness::Unsigned) as u16;
        let hw_raw = match self.transport.read_raw(node, P_HW_VERSION) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("Node {}: hardware revision unreadable ({}), assuming 0", node, e);
                None
            }
        };
        let hw_version = hw_raw
            .as_deref()
            .map_or(0, |raw| unpack(raw, Signedness::Unsigned) as u16);

        let info = NodeInfo {
            device_type,
            device_model: device_id as u8,
            fw_version,
            hw_version,
        };
        let mut db = NodeParameterDatabase::new(node, info);
        let seeds = [(P_DEVICE_ID, Some(id_raw)), (P_FW_VERSION, Some(fw_raw)), (P_HW_VERSION, hw_raw)];
        for (id, raw) in seeds {
            if let (Some(raw), Ok(desc)) = (raw, db.descriptor(id)) {
                db.store(id, scaled_value(desc, raw));
            }
        }
        self.registry.insert(db);

        // Network error counters clear on read
        for id in P_NETERR_APP {
            if let Err(e) = self.transport.read_raw(node, id) {
                warn!("Node {}: clearing error counter {} failed: {}", node, id, e);
            }
        }

        info!(
            "Node {} set up: device type {:#04x}, model {}, firmware {:#06x}, hardware {:#06x}",
            node, info.device_type, info.device_model, info.fw_version, info.hw_version
        );
        Ok(info)
    }

    /// Drop the database of `node`; returns whether one existed
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let removed = self.registry.remove(node).is_some();
        if removed {
            info!("Node {} removed", node);
        }
        removed
    }

    /// Identity captured when `node` was set up
    pub fn node_info(&self, node: NodeId) -> Result<NodeInfo> {
        Ok(*self.registry.get(node)?.info())
    }

    /// Descriptor of parameter `id` on `node`
    pub fn parameter_info(&self, node: NodeId, id: u16) -> Result<&'static ParamDesc> {
        self.registry.get(node)?.descriptor(id)
    }

    /// Descriptor of a parameter this node actually exposes
    fn readable(&self, node: NodeId, id: u16) -> Result<&'static ParamDesc> {
        let db = self.registry.get(node)?;
        let desc = db.descriptor(id)?;
        if desc.is_placeholder() || !db.firmware_supports(desc) {
            return Err(ParamError::NotSupported { id });
        }
        Ok(desc)
    }

    /// Descriptor of a parameter the caller may write right now
    fn writable(&self, node: NodeId, id: u16) -> Result<&'static ParamDesc> {
        let desc = self.readable(node, id)?;
        if desc.storage.is_read_only() {
            return Err(ParamError::ReadOnly { id });
        }
        let hw_version = self.registry.get(node)?.info().hw_version;
        let locked = desc.hw_locked && hw_version >= HW_REV_2;
        if !self.factory_access && (desc.storage.is_factory() || locked) {
            return Err(ParamError::FactoryOnly { id });
        }
        Ok(desc)
    }

    /// Cached value when it can be trusted, otherwise a fresh read
    fn fetch(&mut self, node: NodeId, desc: &'static ParamDesc) -> Result<ParamValue> {
        if !desc.storage.is_realtime() {
            if let Some(cached) = self.registry.get(node)?.cached(desc.id).filter(|v| v.valid) {
                debug!("Node {} param {}: cache hit", node, desc.id);
                return Ok(cached.clone());
            }
        }
        debug!("Node {} read param {}", node, desc.id);
        let raw = self.transport.read_raw(node, desc.id)?;
        if desc.is_numeric() && raw.len() != desc.size as usize {
            return Err(ParamError::response_len(
                format!("{} bytes for param {}", desc.size, desc.id),
                raw.len(),
            ));
        }
        Ok(scaled_value(desc, raw))
    }

    /// Run `kind` with its auxiliary parameters read from `node`, recording
    /// any monitor state it reports
    fn convert(
        &mut self,
        node: NodeId,
        kind: ConverterKind,
        direction: Direction,
        value: f64,
    ) -> Conversion {
        let aux = Aux::resolve(kind, |id| self.get_parameter(node, id).ok());
        let conversion = convert::apply(kind, direction, &aux, value);
        if let Some(update) = &conversion.monitor {
            if let Ok(db) = self.registry.get_mut(node) {
                db.apply_monitor_update(update);
            }
        }
        conversion
    }

    /// Engineering value of `bits` through the descriptor's converter
    fn engineering(&mut self, node: NodeId, desc: &'static ParamDesc, bits: i64) -> f64 {
        let x = decode_bits(bits, desc.scale);
        match desc.converter {
            Some(kind) => self.convert(node, kind, Direction::Decode, x).value,
            None => x,
        }
    }

    /// Read parameter `id` in engineering units
    pub fn get_parameter(&mut self, node: NodeId, id: u16) -> Result<f64> {
        let desc = self.readable(node, id)?;
        let mut value = self.fetch(node, desc)?;
        if desc.is_numeric() {
            value.value = self.engineering(node, desc, value.bits);
        }
        let result = value.value;
        self.registry.get_mut(node)?.store(id, value);
        Ok(result)
    }

    /// Write parameter `id` from engineering units
    pub fn set_parameter(&mut self, node: NodeId, id: u16, value: f64) -> Result<()> {
        let desc = self.writable(node, id)?;
        if !desc.is_numeric() {
            return Err(ParamError::BadArgument(format!(
                "parameter {} is a {} byte block",
                id, desc.size
            )));
        }
        let x = match desc.converter {
            Some(kind) => self.convert(node, kind, Direction::Encode, value).value,
            None => value,
        };
        let bits = encode_bits(x, desc.scale, desc.size as usize, desc.signedness);
        let raw = crate::scale::pack(bits, desc.size as usize);
        self.commit(node, desc, raw)
    }

    /// Little-endian image of parameter `id`, no conversion
    pub fn get_parameter_raw(&mut self, node: NodeId, id: u16) -> Result<Vec<u8>> {
        let desc = self.readable(node, id)?;
        let value = self.fetch(node, desc)?;
        let raw = value.raw.clone();
        self.registry.get_mut(node)?.store(id, value);
        Ok(raw)
    }

    /// Write the little-endian image of parameter `id`, no conversion
    pub fn set_parameter_raw(&mut self, node: NodeId, id: u16, data: &[u8]) -> Result<()> {
        let desc = self.writable(node, id)?;
        let size = desc.size as usize;
        let fits = if desc.is_numeric() {
            data.len() == size
        } else {
            data.len() <= size
        };
        if !fits {
            return Err(ParamError::BadArgument(format!(
                "{} bytes for {} byte parameter {}",
                data.len(),
                size,
                id
            )));
        }
        self.commit(node, desc, data.to_vec())
    }

    /// Write `raw` to the node and cache what it now holds
    fn commit(&mut self, node: NodeId, desc: &'static ParamDesc, raw: Vec<u8>) -> Result<()> {
        debug!("Node {} write param {} = {:02X?}", node, desc.id, raw);
        self.transport.write_raw(node, desc.id, &raw)?;

        let mut value = scaled_value(desc, raw);
        if desc.is_numeric() {
            value.value = self.engineering(node, desc, value.bits);
        }
        let db = self.registry.get_mut(node)?;
        db.store(desc.id, value);
        if desc.storage.is_nonvolatile() {
            db.mark_dirty(desc.id);
            if let Ok(flag) = db.descriptor(P_NV_MODIFIED) {
                db.store(P_NV_MODIFIED, scaled_value(flag, crate::scale::pack(1, flag.size as usize)));
            }
        }
        Ok(())
    }

    /// A nonvolatile parameter changed since the flag was last cleared
    pub fn is_modified(&self, node: NodeId) -> Result<bool> {
        let db = self.registry.get(node)?;
        let flagged = db
            .cached(P_NV_MODIFIED)
            .map_or(false, |v| v.valid && v.bits != 0);
        Ok(db.is_dirty() || flagged)
    }

    /// Reset the modified flag on the node and in the cache
    pub fn clear_modified(&mut self, node: NodeId) -> Result<()> {
        self.set_parameter(node, P_NV_MODIFIED, 0.0)?;
        self.registry.get_mut(node)?.clear_dirty();
        Ok(())
    }

    /// Refresh every parameter the node exposes
    pub fn read_all_parameters(&mut self, node: NodeId) -> Result<Vec<(u16, f64)>> {
        let db = self.registry.get(node)?;
        let ids: Vec<u16> = db
            .banks()
            .iter()
            .flat_map(|bank| bank.descriptors().iter())
            .filter(|d| !d.is_placeholder() && db.firmware_supports(d))
            .map(|d| d.id)
            .collect();

        let mut values = Vec::with_capacity(ids.len());
        for id in ids {
            values.push((id, self.get_parameter(node, id)?));
        }
        Ok(values)
    }

    /// Timestamped dump of every readable parameter
    pub fn snapshot(&mut self, node: NodeId) -> Result<ParameterSnapshot> {
        let values = self.read_all_parameters(node)?;
        let db = self.registry.get(node)?;
        let parameters = values
            .into_iter()
            .map(|(id, value)| SnapshotEntry {
                id,
                name: db.descriptor(id).map_or_else(|_| String::new(), |d| d.name.to_string()),
                value,
            })
            .collect();
        Ok(ParameterSnapshot {
            timestamp: Utc::now(),
            node,
            info: *db.info(),
            parameters,
        })
    }

    fn command(&mut self, node: NodeId, code: u8, payload: &[u8]) -> Result<Vec<u8>> {
        self.registry.get(node)?;
        debug!("Node {} command {:#04x} {:02X?}", node, code, payload);
        self.transport.run_command(node, code, payload)
    }

    /// Sample period in milliseconds, if known and non-zero
    fn sample_time_ms(&mut self, node: NodeId) -> Option<f64> {
        self.get_parameter(node, P_SAMPLE_PERIOD)
            .ok()
            .map(|us| us * 0.001)
            .filter(|st| *st > 0.0)
    }

    /// Current stimulus generator settings
    pub fn get_stimulus(&mut self, node: NodeId) -> Result<StimulusState> {
        self.registry.get(node)?;
        let st = self
            .sample_time_ms(node)
            .ok_or_else(|| ParamError::ResponseFormat {
                expected: "non-zero sample period".to_string(),
                actual: "0".to_string(),
            })?;
        let resp = self.command(node, CMD_GET_SET_STIMULUS, &[])?;
        if resp.len() != STIM_RESP_OCTETS {
            return Err(ParamError::response_len(
                format!("{} byte stimulus state", STIM_RESP_OCTETS),
                resp.len(),
            ));
        }

        let mode_code = u16::from_le_bytes([resp[0], resp[1]]);
        let mode = StimulusMode::try_from(mode_code).map_err(|_| ParamError::ResponseFormat {
            expected: "stimulus mode 0-7".to_string(),
            actual: mode_code.to_string(),
        })?;
        let period = i16::from_le_bytes([resp[2], resp[3]]);
        let amplitude = i32::from_le_bytes([resp[4], resp[5], resp[6], resp[7]]);
        let dwell = i16::from_le_bytes([resp[8], resp[9]]);
        let slew = i16::from_le_bytes([resp[10], resp[11]]);
        let status = u16::from_le_bytes([resp[12], resp[13]]);

        let amplitude = match mode {
            StimulusMode::Off => 0.0,
            StimulusMode::Velocity => 8192.0 * amplitude as f64 / st / 32767.0,
            StimulusMode::Calibrate | StimulusMode::Torque => amplitude as f64 / 327.67,
            _ => amplitude as f64,
        };
        let period = if mode.is_move() {
            period as i32
        } else {
            (period as f64 * st).round() as i32
        };

        Ok(StimulusState {
            mode,
            period,
            amplitude,
            slew: slew as i32,
            dwell: (dwell as f64 * st).round() as i32,
            status,
        })
    }

    /// Program the stimulus generator
    pub fn set_stimulus(&mut self, node: NodeId, state: &StimulusState) -> Result<()> {
        self.registry.get(node)?;
        let st = self
            .sample_time_ms(node)
            .ok_or_else(|| ParamError::BadArgument("sample period unavailable".to_string()))?;
        let max = i16::MAX as f64;

        let amplitude = match state.mode {
            StimulusMode::Off => 0,
            StimulusMode::Velocity => {
                let bits = 32767.0 * state.amplitude * st / 8192.0;
                let bits = if bits >= 0.0 { bits + 0.5 } else { bits - 0.5 };
                bits.min(max) as i32
            }
            StimulusMode::Calibrate | StimulusMode::Torque => (327.67 * state.amplitude).min(max) as i32,
            StimulusMode::Position => state.amplitude.min(max) as i32,
            _ => state.amplitude as i32,
        };
        let period = if state.mode.is_move() {
            state.period.clamp(i16::MIN as i32, i16::MAX as i32) as i16
        } else {
            (0.5 + state.period as f64 / st).min(max) as i16
        };

        let mut payload = Vec::with_capacity(STIM_CMD_PROF_OCTETS);
        payload.extend_from_slice(&(state.mode as u16).to_le_bytes());
        payload.extend_from_slice(&period.to_le_bytes());
        payload.extend_from_slice(&amplitude.to_le_bytes());
        if state.mode.is_move() {
            let dwell = (0.5 + state.dwell as f64 / st).min(max) as i16;
            let slew = state.slew.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
            payload.extend_from_slice(&dwell.to_le_bytes());
            payload.extend_from_slice(&slew.to_le_bytes());
        }

        let resp = self.command(node, CMD_GET_SET_STIMULUS, &payload)?;
        if !resp.is_empty() {
            return Err(ParamError::response_len("empty stimulus acknowledgement", resp.len()));
        }
        Ok(())
    }

    fn monitor_code(&self, node: NodeId, channel: u8) -> Result<u8> {
        let fw = self.registry.get(node)?.info().fw_version;
        let max_channel = if fw >= FW_MILESTONE_2R0 { 1 } else { 0 };
        match channel {
            0 => Ok(CMD_GET_SET_MONITOR),
            1 if max_channel >= 1 => Ok(CMD_GET_SET_MONITOR1),
            _ => Err(ParamError::BadArgument(format!(
                "monitor channel {} (max {})",
                channel, max_channel
            ))),
        }
    }

    /// Current settings of monitor port `channel`
    pub fn get_monitor(&mut self, node: NodeId, channel: u8) -> Result<MonitorChannelState> {
        let code = self.monitor_code(node, channel)?;
        let resp = self.command(node, code, &[])?;
        if resp.len() != MON_CMD_OCTETS && resp.len() != MON_CMD_OCTETS + 1 {
            return Err(ParamError::response_len(
                format!("{} byte monitor state", MON_CMD_OCTETS),
                resp.len(),
            ));
        }

        let test_point = TestPoint(u16::from_le_bytes([resp[0], resp[1]]));
        let gain_bits = i32::from_le_bytes([resp[2], resp[3], resp[4], resp[5]]);
        let filter_bits = u16::from_le_bytes([resp[6], resp[7]]);
        let gain = self
            .convert(node, ConverterKind::MonGain(test_point), Direction::Decode, gain_bits as f64)
            .value;
        let filter_ms = self
            .convert(node, ConverterKind::Filt1Tc, Direction::Decode, filter_bits as f64)
            .value;

        Ok(MonitorChannelState {
            test_point,
            gain,
            filter_ms,
            tune_sync: resp[8],
        })
    }

    /// Program monitor port `channel`
    pub fn set_monitor(
        &mut self,
        node: NodeId,
        channel: u8,
        state: &MonitorChannelState,
    ) -> Result<()> {
        let code = self.monitor_code(node, channel)?;
        let scaling = state.test_point.without_save_nv();
        let gain = self
            .convert(node, ConverterKind::MonGain(scaling), Direction::Encode, state.gain)
            .value;
        let filter = self
            .convert(node, ConverterKind::Filt1Tc, Direction::Encode, state.filter_ms)
            .value;

        let mut payload = Vec::with_capacity(MON_CMD_OCTETS);
        payload.extend_from_slice(&state.test_point.0.to_le_bytes());
        payload.extend_from_slice(&(gain as i32).to_le_bytes());
        payload.extend_from_slice(&(filter as u16).to_le_bytes());
        payload.push(state.tune_sync);

        let resp = self.command(node, code, &payload)?;
        if !resp.is_empty() {
            return Err(ParamError::response_len("empty monitor acknowledgement", resp.len()));
        }
        Ok(())
    }

    /// Monitor record left by the last monitor gain conversion
    pub fn monitor_state(&self, node: NodeId) -> Result<MonitorState> {
        Ok(*self.registry.get(node)?.monitor())
    }

    /// Name of the motor file the node was configured with
    pub fn motor_file_name(&mut self, node: NodeId) -> Result<String> {
        let resp = self.command(node, CMD_MOTOR_FILE, &[])?;
        let end = resp.iter().position(|&b| b == 0).unwrap_or(resp.len());
        Ok(String::from_utf8_lossy(&resp[..end]).into_owned())
    }

    pub fn set_motor_file_name(&mut self, node: NodeId, name: &str) -> Result<()> {
        let mut payload = name.as_bytes().to_vec();
        payload.resize(MOTOR_FILE_NAME_SIZE, 0);
        self.command(node, CMD_MOTOR_FILE, &payload)?;
        Ok(())
    }

    /// User description stored across the description chunks
    pub fn user_description(&mut self, node: NodeId) -> Result<String> {
        let mut text = Vec::with_capacity(USER_DESC_CHUNKS as usize * USER_DESC_CHUNK_SIZE);
        for i in 0..USER_DESC_CHUNKS {
            text.extend(self.get_parameter_raw(node, P_USER_DESC + i)?);
        }
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        Ok(String::from_utf8_lossy(&text[..end]).into_owned())
    }

    /// Store `text`, truncated to the description capacity and NUL padded
    pub fn set_user_description(&mut self, node: NodeId, text: &str) -> Result<()> {
        let mut bytes = text.as_bytes().to_vec();
        bytes.resize(USER_DESC_CHUNKS as usize * USER_DESC_CHUNK_SIZE, 0);
        for (i, chunk) in bytes.chunks(USER_DESC_CHUNK_SIZE).enumerate() {
            self.set_parameter_raw(node, P_USER_DESC + i as u16, chunk)?;
        }
        Ok(())
    }

    /// Restoring factory defaults is no longer offered
    pub fn factory_defaults(&mut self, _node: NodeId) -> Result<()> {
        Err(ParamError::Deprecated("factory_defaults"))
    }

    /// Restart the commutation vector search
    pub fn re_vector(&mut self, node: NodeId) -> Result<()> {
        self.command(node, CMD_RE_VECTOR, &[])?;
        Ok(())
    }

    /// Shift the position number space by `offset` counts
    pub fn add_to_position(&mut self, node: NodeId, offset: i32) -> Result<()> {
        self.command(node, CMD_ADD_POSN, &offset.to_le_bytes())?;
        Ok(())
    }

    /// Start the homing sequence
    pub fn send_home(&mut self, node: NodeId) -> Result<()> {
        self.set_parameter(node, P_SET_FLAGS, SET_FLAGS_SEND_HOME)
    }

    fn read_u32(&mut self, node: NodeId, id: u16) -> Result<u32> {
        let raw = self.get_parameter_raw(node, id)?;
        Ok(unpack(&raw, Signedness::Unsigned) as u32)
    }

    pub fn user_output_reg(&mut self, node: NodeId) -> Result<u16> {
        Ok(self.read_u32(node, P_USER_OUT_REG)? as u16)
    }

    pub fn set_user_output_reg(&mut self, node: NodeId, value: u16) -> Result<()> {
        self.set_parameter_raw(node, P_USER_OUT_REG, &value.to_le_bytes())
    }

    pub fn hw_config_reg(&mut self, node: NodeId) -> Result<u32> {
        self.read_u32(node, P_HW_CONFIG_REG)
    }

    pub fn set_hw_config_reg(&mut self, node: NodeId, value: u32) -> Result<()> {
        self.set_parameter_raw(node, P_HW_CONFIG_REG, &value.to_le_bytes())
    }

    pub fn app_config_reg(&mut self, node: NodeId) -> Result<u32> {
        self.read_u32(node, P_APP_CONFIG_REG)
    }

    pub fn set_app_config_reg(&mut self, node: NodeId, value: u32) -> Result<()> {
        self.set_parameter_raw(node, P_APP_CONFIG_REG, &value.to_le_bytes())
    }

    fn status_reg(&mut self, node: NodeId, id: u16) -> Result<StatusRegister> {
        Ok(StatusRegister::from_bytes(&self.get_parameter_raw(node, id)?))
    }

    /// Status bits accumulated since the last read (clears on read)
    pub fn status_accum_reg(&mut self, node: NodeId) -> Result<StatusRegister> {
        self.status_reg(node, P_STATUS_ACCUM_REG)
    }

    /// Status bits that rose since the last read
    pub fn status_rise_reg(&mut self, node: NodeId) -> Result<StatusRegister> {
        self.status_reg(node, P_STATUS_RISE_REG)
    }

    /// Status bits that fell since the last read
    pub fn status_fall_reg(&mut self, node: NodeId) -> Result<StatusRegister> {
        self.status_reg(node, P_STATUS_FALL_REG)
    }

    pub fn status_rt_reg(&mut self, node: NodeId) -> Result<StatusRegister> {
        self.status_reg(node, P_STATUS_RT_REG)
    }

    pub fn alert_reg(&mut self, node: NodeId) -> Result<AlertRegister> {
        Ok(AlertRegister::from_bytes(&self.get_parameter_raw(node, P_ALERT_REG)?))
    }

    pub fn warning_reg(&mut self, node: NodeId) -> Result<AlertRegister> {
        Ok(AlertRegister::from_bytes(&self.get_parameter_raw(node, P_WARN_REG)?))
    }
}

/// Cache entry for `raw` with the descriptor's linear scale applied
fn scaled_value(desc: &ParamDesc, raw: Vec<u8>) -> ParamValue {
    let bits = if desc.is_numeric() {
        unpack(&raw, desc.signedness)
    } else {
        0
    };
    ParamValue {
        bits,
        value: decode_bits(bits, desc.scale),
        raw,
        valid: true,
    }
}
