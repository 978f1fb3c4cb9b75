//! Status and alert registers and their diagnostic text reports.
//!
//! Registers are held as plain word arrays, word 0 carrying bits 0..=15
//! (status) or 0..=31 (alert). Bit `n` is bit `n % width` of word
//! `n / width`. Reports list set bits from the highest index down, after a
//! hex header that prints the most significant word first.

use serde::{Deserialize, Serialize};

/// Status bit names, index = bit number
pub const STATUS_BIT_NAMES: [&str; 48] = [
    "Warning",
    "UserAlert",
    "NotReady",
    "MoveBufAvail",
    "Ready",
    "PowerEvent",
    "Alert Present",
    "#7",
    "#8",
    "InPosLimit",
    "InNegLimit",
    "MotionBlocked",
    "WasHomed",
    "Homing",
    "GoingDisabled",
    "StatusEvent",
    "Enabled",
    "MoveCanceled",
    "MoveDone",
    "OutOfRange",
    "BFromEnd",
    "AbovePosn",
    "AtTargetVel",
    "InA",
    "InB",
    "InvInA",
    "InvInB",
    "#27",
    "AFromStart",
    "MoveCmdNeg",
    "Disabled",
    "TimerExpired",
    "InMotionPos",
    "InMotionNeg",
    "InDisableStop",
    "InCtrlStop",
    "FanOn",
    "VectorSearch",
    "MoveCmdComplete",
    "InHardStop",
    "ShutdownState",
    "ShutdownState1",
    "HwFailure",
    "TriggerArmed",
    "StepsActive",
    "IndexMtr",
    "SoftwareInputs",
    "#47",
];

/// Alert bit names, index = bit number
pub const ALERT_BIT_NAMES: [&str; 96] = [
    "FwSelfTest",
    "FwNetBufferOverrun",
    "FwError0",
    "FwError1",
    "FwStackOverrun",
    "FwWatchdogRestarted",
    "FwInvalidConfiguration",
    "#7",
    "#8",
    "#9",
    "#10",
    "HwPowerProblem",
    "HwClockProblem",
    "HwEEPROMdead",
    "HwFlashCorrupt",
    "HwFlashChanged",
    "HwRAM",
    "HwADC",
    "HwADCsat",
    "#19",
    "#20",
    "#21",
    "#22",
    "#23",
    "NetVoltageLow",
    "NetWatchdog",
    "#26",
    "#27",
    "EStopped",
    "ConfigOutOfDate",
    "RunTimeErr",
    "#31",
    "#32",
    "#33",
    "#34",
    "MoveGenRange",
    "JrkLimRequestBad",
    "MoveBufUnderrun",
    "JrkLimVelRequestBad",
    "MoveSpecAltered",
    "PhaseSensorFailed",
    "LimSwitchActivated",
    "SoftLimitExceeded",
    "#43",
    "#44",
    "#45",
    "#46",
    "#47",
    "#48",
    "#49",
    "#50",
    "#51",
    "AClost",
    "ACphaseLost",
    "#54",
    "LowTemp",
    "#56",
    "#57",
    "MtrVectorBad",
    "#59",
    "MtrEncGlitch",
    "MtrEncOverspeed",
    "#62",
    "#63",
    "MtrPhaseOverload",
    "#65",
    "MtrBadSetupParams",
    "HardStopBrokeFree",
    "#68",
    "TrackingShutdown",
    "RMSOverload",
    "RMSOverloadShutdown",
    "#72",
    "#73",
    "BusVoltSat",
    "TrqSat",
    "NoCommSweepFailed",
    "NoCommSweepReversed",
    "NoCommFailed",
    "IndexCountZeroWarn",
    "TempAmbientHigh",
    "StatorHot",
    "BusOverCurrent",
    "BusOverVoltage",
    "BusVoltageLow",
    "BusRMSOverload",
    "#86",
    "MtrEncIndexMissing",
    "BusVoltageUnderOperatingV",
    "#89",
    "#90",
    "#91",
    "#92",
    "MtrEncIndexMisplaced",
    "StepsDuringPosnRecovery",
    "#95",
];

/// Low bit of the two-bit motion direction field
pub const IN_MOTION_BIT: usize = 32;

/// Low bit of the two-bit shutdown state field
pub const SHUTDOWN_STATE_BIT: usize = 40;

/// Motion direction field of the status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InMotion {
    Stopped,
    Positive,
    Negative,
    Both,
}

impl InMotion {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => InMotion::Stopped,
            1 => InMotion::Positive,
            2 => InMotion::Negative,
            _ => InMotion::Both,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InMotion::Stopped => "Stopped",
            InMotion::Positive => "+",
            InMotion::Negative => "-",
            InMotion::Both => "+/-",
        }
    }
}

/// Shutdown progress field of the status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownState {
    Ok,
    Imminent,
    Ramping,
    Shutdown,
}

impl ShutdownState {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => ShutdownState::Ok,
            1 => ShutdownState::Imminent,
            2 => ShutdownState::Ramping,
            _ => ShutdownState::Shutdown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownState::Ok => "OK",
            ShutdownState::Imminent => "Shutdown Imminent",
            ShutdownState::Ramping => "Shutdown Ramping",
            ShutdownState::Shutdown => "Shutdown",
        }
    }
}

/// 48-bit status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusRegister(pub [u16; 3]);

impl StatusRegister {
    pub const BITS: usize = 48;

    /// Build from a little-endian image; missing bytes read as zero
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut words = [0u16; 3];
        for (i, word) in words.iter_mut().enumerate() {
            let lo = bytes.get(2 * i).copied().unwrap_or(0);
            let hi = bytes.get(2 * i + 1).copied().unwrap_or(0);
            *word = u16::from_le_bytes([lo, hi]);
        }
        StatusRegister(words)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn bit(&self, n: usize) -> bool {
        n < Self::BITS && self.0[n / 16] & (1 << (n % 16)) != 0
    }

    pub fn set_bit(&mut self, n: usize, on: bool) {
        if n >= Self::BITS {
            return;
        }
        let mask = 1 << (n % 16);
        if on {
            self.0[n / 16] |= mask;
        } else {
            self.0[n / 16] &= !mask;
        }
    }

    /// Copy with bit `n` set
    pub fn with_bit(mut self, n: usize) -> Self {
        self.set_bit(n, true);
        self
    }

    fn field(&self, low: usize) -> u8 {
        self.bit(low) as u8 | (self.bit(low + 1) as u8) << 1
    }

    pub fn in_motion(&self) -> InMotion {
        InMotion::from_bits(self.field(IN_MOTION_BIT))
    }

    pub fn shutdown_state(&self) -> ShutdownState {
        ShutdownState::from_bits(self.field(SHUTDOWN_STATE_BIT))
    }

    pub fn is_enabled(&self) -> bool {
        self.bit(16)
    }

    fn header(&self) -> String {
        let words: Vec<String> = self.0.iter().rev().map(|w| format!("{:04X}", w)).collect();
        format!("0x{}\n\n", words.join(" "))
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut n = Self::BITS;
        while n > 0 {
            n -= 1;
            if n == SHUTDOWN_STATE_BIT + 1 {
                lines.push(format!(
                    "[{}-{}] ShutdownState: {}\n",
                    SHUTDOWN_STATE_BIT,
                    SHUTDOWN_STATE_BIT + 1,
                    self.shutdown_state().as_str()
                ));
                n -= 1;
            } else if n == IN_MOTION_BIT + 1 {
                lines.push(format!(
                    "[{}-{}] InMotion: {}\n",
                    IN_MOTION_BIT,
                    IN_MOTION_BIT + 1,
                    self.in_motion().as_str()
                ));
                n -= 1;
            } else if self.bit(n) {
                lines.push(format!("[{:02}] {}\n", n, STATUS_BIT_NAMES[n]));
            }
        }
        lines
    }
}

impl From<[u16; 3]> for StatusRegister {
    fn from(words: [u16; 3]) -> Self {
        StatusRegister(words)
    }
}

/// 96-bit alert (or warning) register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertRegister(pub [u32; 3]);

impl AlertRegister {
    pub const BITS: usize = 96;

    /// Build from a little-endian image; missing bytes read as zero
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut words = [0u32; 3];
        for (i, word) in words.iter_mut().enumerate() {
            let mut buf = [0u8; 4];
            for (j, b) in buf.iter_mut().enumerate() {
                *b = bytes.get(4 * i + j).copied().unwrap_or(0);
            }
            *word = u32::from_le_bytes(buf);
        }
        AlertRegister(words)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn bit(&self, n: usize) -> bool {
        n < Self::BITS && self.0[n / 32] & (1 << (n % 32)) != 0
    }

    pub fn set_bit(&mut self, n: usize, on: bool) {
        if n >= Self::BITS {
            return;
        }
        let mask = 1 << (n % 32);
        if on {
            self.0[n / 32] |= mask;
        } else {
            self.0[n / 32] &= !mask;
        }
    }

    pub fn with_bit(mut self, n: usize) -> Self {
        self.set_bit(n, true);
        self
    }

    /// No alert is raised
    pub fn is_clear(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    /// Names of the raised alerts, highest bit first
    pub fn active(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        (0..Self::BITS)
            .rev()
            .filter(|&n| self.bit(n))
            .map(|n| (n, ALERT_BIT_NAMES[n]))
    }

    fn header(&self) -> String {
        let words: Vec<String> = self
            .0
            .iter()
            .rev()
            .map(|w| format!("{:04X} {:04X}", w >> 16, w & 0xFFFF))
            .collect();
        format!("0x{}\n\n", words.join(" "))
    }

    fn lines(&self) -> Vec<String> {
        self.active()
            .map(|(n, name)| format!("[{:02}] {}\n", n, name))
            .collect()
    }
}

impl From<[u32; 3]> for AlertRegister {
    fn from(words: [u32; 3]) -> Self {
        AlertRegister(words)
    }
}

/// Text report of a status register
pub fn decode_status_register(reg: &StatusRegister) -> String {
    reg.header() + &reg.lines().concat()
}

/// Text report of an alert register
pub fn decode_alert_register(reg: &AlertRegister) -> String {
    reg.header() + &reg.lines().concat()
}

/// Write the status report into `buf`, NUL-terminated. Returns the number of
/// bytes written before the terminator.
pub fn write_status_report(reg: &StatusRegister, buf: &mut [u8]) -> usize {
    fill_buffer(&reg.header(), &reg.lines(), buf)
}

/// Write the alert report into `buf`, NUL-terminated. Returns the number of
/// bytes written before the terminator.
pub fn write_alert_report(reg: &AlertRegister, buf: &mut [u8]) -> usize {
    fill_buffer(&reg.header(), &reg.lines(), buf)
}

/// Header first (cut only if it alone overflows), then whole lines while
/// they fit.
fn fill_buffer(header: &str, lines: &[String], buf: &mut [u8]) -> usize {
    let Some(capacity) = buf.len().checked_sub(1) else {
        return 0;
    };
    let head = header.len().min(capacity);
    buf[..head].copy_from_slice(&header.as_bytes()[..head]);
    let mut pos = head;
    for line in lines {
        if pos + line.len() > capacity {
            break;
        }
        buf[pos..pos + line.len()].copy_from_slice(line.as_bytes());
        pos += line.len();
    }
    buf[pos] = 0;
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_status_report() {
        let report = decode_status_register(&StatusRegister::default());
        assert_eq!(
            report,
            "0x0000 0000 0000\n\n[40-41] ShutdownState: OK\n[32-33] InMotion: Stopped\n"
        );
    }

    #[test]
    fn test_enabled_moving_positive() {
        let reg = StatusRegister::default().with_bit(16).with_bit(32);
        assert_eq!(reg.in_motion(), InMotion::Positive);
        let report = decode_status_register(&reg);
        assert!(report.starts_with("0x0001 0001 0000\n\n"));
        assert!(report.contains("[16] Enabled\n"));
        assert!(report.contains("[32-33] InMotion: +\n"));
        // Descending order
        let motion = report.find("InMotion").unwrap();
        let enabled = report.find("Enabled").unwrap();
        assert!(motion < enabled);
    }

    #[test]
    fn test_status_fields_are_not_listed_as_bits() {
        let reg = StatusRegister::default()
            .with_bit(33)
            .with_bit(40)
            .with_bit(41)
            .with_bit(4);
        let report = decode_status_register(&reg);
        assert!(report.contains("[40-41] ShutdownState: Shutdown\n"));
        assert!(report.contains("[32-33] InMotion: -\n"));
        assert!(report.contains("[04] Ready\n"));
        assert!(!report.contains("InMotionNeg"));
        assert!(!report.contains("ShutdownState1"));
    }

    #[test]
    fn test_status_from_bytes_is_little_endian() {
        let reg = StatusRegister::from_bytes(&[0x00, 0x00, 0x01, 0x00, 0x03, 0x00]);
        assert!(reg.is_enabled());
        assert_eq!(reg.in_motion(), InMotion::Both);
        assert_eq!(reg.to_bytes(), vec![0x00, 0x00, 0x01, 0x00, 0x03, 0x00]);
        // Short images pad with zeros
        assert_eq!(StatusRegister::from_bytes(&[0x10]).0, [0x0010, 0, 0]);
    }

    #[test]
    fn test_alert_report() {
        let reg = AlertRegister::default().with_bit(70).with_bit(1);
        let report = decode_alert_register(&reg);
        assert_eq!(
            report,
            "0x0000 0040 0000 0000 0000 0002\n\n[70] RMSOverload\n[01] FwNetBufferOverrun\n"
        );
        assert!(!reg.is_clear());
        assert!(AlertRegister::default().is_clear());
    }

    #[test]
    fn test_alert_from_bytes() {
        let mut bytes = vec![0u8; 12];
        bytes[11] = 0x80;
        let reg = AlertRegister::from_bytes(&bytes);
        assert!(reg.bit(95));
        assert_eq!(reg.active().next(), Some((95, "#95")));
    }

    #[test]
    fn test_buffer_report_is_nul_terminated() {
        let reg = StatusRegister::default().with_bit(16);
        let mut buf = [0xFFu8; 256];
        let n = write_status_report(&reg, &mut buf);
        assert_eq!(buf[n], 0);
        assert_eq!(
            std::str::from_utf8(&buf[..n]).unwrap(),
            decode_status_register(&reg)
        );
    }

    #[test]
    fn test_buffer_report_truncates_whole_lines() {
        let reg = StatusRegister::default().with_bit(16);
        let header = "0x0000 0001 0000\n\n";
        let shutdown = "[40-41] ShutdownState: OK\n";
        // Room for the header, the first line and half of the second
        let mut buf = vec![0xFFu8; header.len() + shutdown.len() + 10 + 1];
        let n = write_status_report(&reg, &mut buf);
        assert_eq!(n, header.len() + shutdown.len());
        assert_eq!(buf[n], 0);
        assert_eq!(
            std::str::from_utf8(&buf[..n]).unwrap(),
            format!("{}{}", header, shutdown)
        );
    }

    #[test]
    fn test_buffer_report_header_only_cut_when_it_cannot_fit() {
        let reg = AlertRegister::default().with_bit(0);
        let mut buf = [0xFFu8; 8];
        let n = write_alert_report(&reg, &mut buf);
        assert_eq!(n, 7);
        assert_eq!(&buf[..7], b"0x0000 ");
        assert_eq!(buf[7], 0);
        assert_eq!(write_alert_report(&reg, &mut []), 0);
    }
}
