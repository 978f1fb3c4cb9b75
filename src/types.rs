use crate::constants::*;
use crate::convert::ConverterKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of one node: controller (port) number plus node address on that port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub controller: u8,
    pub address: u8,
}

impl NodeId {
    pub const fn new(controller: u8, address: u8) -> Self {
        NodeId {
            controller,
            address,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.controller, self.address)
    }
}

/// How the raw bits of a parameter are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signedness {
    Unsigned,
    Signed,
    /// Signed storage restricted to non-negative values
    PositiveOnly,
}

/// Access semantics of a parameter on the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageClass {
    /// Placeholder, no storage behind the id
    None,
    ReadOnly,
    ReadOnlyRealtime,
    /// Realtime, can raise an attention
    ReadOnlyRealtimeAttn,
    /// Realtime, cleared by the node when read
    ReadOnlyClearRealtime,
    Factory,
    FactoryRealtime,
    FactoryConfig,
    FactoryMotor,
    MotionLabFactory,
    Config,
    ConfigTuning,
    ConfigAttn,
    NvReadWrite,
    NvReadWriteAttn,
    NvReadWriteRealtime,
    Motor,
    MotorRestricted,
    Volatile,
    VolatileAttn,
    Ram,
    RamRealtime,
    /// Volatile realtime flag used by tuning tools
    ReadWriteRealtimeTuning,
}

impl StorageClass {
    /// Writes are rejected outright
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            StorageClass::ReadOnly
                | StorageClass::ReadOnlyRealtime
                | StorageClass::ReadOnlyRealtimeAttn
                | StorageClass::ReadOnlyClearRealtime
        )
    }

    /// Writes need factory access
    pub fn is_factory(self) -> bool {
        matches!(
            self,
            StorageClass::Factory
                | StorageClass::FactoryRealtime
                | StorageClass::FactoryConfig
                | StorageClass::FactoryMotor
                | StorageClass::MotionLabFactory
        )
    }

    /// Value changes on its own and is never served from the cache
    pub fn is_realtime(self) -> bool {
        matches!(
            self,
            StorageClass::ReadOnlyRealtime
                | StorageClass::ReadOnlyRealtimeAttn
                | StorageClass::ReadOnlyClearRealtime
                | StorageClass::FactoryRealtime
                | StorageClass::NvReadWriteRealtime
                | StorageClass::RamRealtime
                | StorageClass::ReadWriteRealtimeTuning
        )
    }

    /// Persisted on the node; writes leave the node modified until committed
    pub fn is_nonvolatile(self) -> bool {
        matches!(
            self,
            StorageClass::Factory
                | StorageClass::FactoryConfig
                | StorageClass::FactoryMotor
                | StorageClass::MotionLabFactory
                | StorageClass::Config
                | StorageClass::ConfigTuning
                | StorageClass::ConfigAttn
                | StorageClass::NvReadWrite
                | StorageClass::NvReadWriteAttn
                | StorageClass::NvReadWriteRealtime
                | StorageClass::Motor
                | StorageClass::MotorRestricted
        )
    }
}

/// Engineering unit tag (documentation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    NoUnit,
    BitField,
    DeviceId,
    FirmwareVersion,
    HardwareVersion,
    ShipoutVersion,
    Text,
    Hertz,
    Hours,
    Seconds,
    Minutes,
    Milliseconds,
    Microseconds,
    SampleTimes,
    Ticks,
    TicksPerSec,
    TicksPerSec2,
    CountsPerRev,
    Degrees,
    DegreesC,
    Amperes,
    AmperesSquared,
    TorqueLimit,
    Volts,
    Ohms,
    VoltsPerKrpm,
    PercentMax,
    PercentShutdown,
    PercentTorqueLimit,
}

/// Display grouping (non-functional)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    None,
    DriveInfo,
    FactorySettings,
    NonDisplay,
    StatusInfo,
    SafetyInfo,
    ConfigurationInfo,
    MiscellaneousInfo,
    IoInfo,
    MotorInfo,
    MotionConstraints,
    TuningInfo,
    CommutationInfo,
    ModeInfo,
    FoldbackInfo,
    Homing,
    SpecialFunctions,
}

/// Descriptor of one device parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDesc {
    pub id: u16,
    pub name: &'static str,
    pub signedness: Signedness,
    pub storage: StorageClass,
    pub unit: Unit,
    /// Byte width on the wire
    pub size: u8,
    /// Fixed-point scale, `engineering = raw / scale` before any converter
    pub scale: f64,
    pub group: Group,
    pub converter: Option<ConverterKind>,
    /// Lowest firmware version exposing this parameter
    pub min_firmware: u16,
    /// Factory-only on hardware revision 2 and later
    pub hw_locked: bool,
}

impl ParamDesc {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: u16,
        name: &'static str,
        signedness: Signedness,
        storage: StorageClass,
        unit: Unit,
        size: u8,
        scale: f64,
        group: Group,
    ) -> Self {
        ParamDesc {
            id,
            name,
            signedness,
            storage,
            unit,
            size,
            scale,
            group,
            converter: None,
            min_firmware: FW_MILESTONE_ALL_VERS,
            hw_locked: false,
        }
    }

    pub const fn convert(mut self, kind: ConverterKind) -> Self {
        self.converter = Some(kind);
        self
    }

    pub const fn since(mut self, milestone: u16) -> Self {
        self.min_firmware = milestone;
        self
    }

    pub const fn hw_locked(mut self) -> Self {
        self.hw_locked = true;
        self
    }

    /// Reserved id with nothing behind it
    pub fn is_placeholder(&self) -> bool {
        self.storage == StorageClass::None || (self.size == 0 && self.converter.is_none())
    }

    /// Fits in an integer; wider descriptors are opaque byte blocks
    pub fn is_numeric(&self) -> bool {
        self.size > 0 && self.size as usize <= MAX_NUMERIC_SIZE
    }
}

/// Cached value of one parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamValue {
    /// Raw bits, sign-extended per the descriptor
    pub bits: i64,
    /// Engineering value
    pub value: f64,
    /// Byte image as read from / written to the node
    pub raw: Vec<u8>,
    pub valid: bool,
}

/// Node identity captured at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub device_type: u8,
    pub device_model: u8,
    pub fw_version: u16,
    pub hw_version: u16,
}

/// Monitor port test point selector. Codes outside the named set are legal
/// and scale like the torque command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestPoint(pub u16);

impl TestPoint {
    pub const CALIBRATE: Self = Self(0);
    pub const VEL_MEAS: Self = Self(1);
    pub const VEL_CMD: Self = Self(2);
    pub const VEL_TRK: Self = Self(3);
    pub const TRQ_MEAS: Self = Self(4);
    pub const TRQ_CMD: Self = Self(5);
    pub const POSN_TRK: Self = Self(6);
    pub const POSN_MEAS: Self = Self(7);
    pub const INTEGRATOR: Self = Self(8);
    pub const VEL_STEP: Self = Self(9);
    pub const TRQ_TRK: Self = Self(10);
    pub const SINE_R: Self = Self(11);
    pub const COS_R: Self = Self(12);
    pub const BUS_VOLTS: Self = Self(13);
    pub const POSN_DIR_TRK: Self = Self(14);
    pub const TRK_LD: Self = Self(15);
    pub const JRK_CMD: Self = Self(16);
    pub const ACC_CMD: Self = Self(17);
    pub const VEL_TRK_SERVO: Self = Self(18);
    pub const TRQ_MEAS_PEAK: Self = Self(19);
    pub const TRQ_TRK_PEAK: Self = Self(20);
    pub const TRQ_D_MEAS: Self = Self(21);
    pub const POSN_DIR_TRK_MTR: Self = Self(22);
    pub const POSN_TRK_MTR: Self = Self(23);
    pub const COUPLING: Self = Self(24);
    pub const SGN_CMD_VEL: Self = Self(25);
    pub const SGN_CMD_STEP: Self = Self(26);
    pub const VEL_ERR_GATED: Self = Self(27);
    pub const VEL_RAS: Self = Self(59);
    pub const POSN_CMD: Self = Self(76);
    pub const FG_RATE: Self = Self(77);

    /// Selector with the option bits removed
    pub fn base(self) -> Self {
        Self(self.0 & !MON_OPTION_MASKS)
    }

    /// Selector with only the save-to-NV request removed
    pub fn without_save_nv(self) -> Self {
        Self(self.0 & !MON_SAVE_NV_MASK)
    }
}

/// Per-node monitor record, updated whenever a monitor gain is converted
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonitorState {
    pub test_point: TestPoint,
    /// Engineering value of the monitor full scale
    pub full_scale: f64,
    pub valid: bool,
}

impl MonitorState {
    pub fn apply(&mut self, update: &MonitorStateUpdate) {
        self.test_point = update.test_point;
        self.full_scale = update.full_scale;
        self.valid = update.valid;
    }
}

/// Side effect of a monitor gain conversion, returned to the caller instead
/// of being written behind its back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorStateUpdate {
    pub test_point: TestPoint,
    pub full_scale: f64,
    pub valid: bool,
}

/// Monitor port channel settings in engineering units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonitorChannelState {
    pub test_point: TestPoint,
    /// Full-scale value in the test point's units
    pub gain: f64,
    /// Output filter time constant in milliseconds
    pub filter_ms: f64,
    pub tune_sync: u8,
}

/// Stimulus generator mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u16)]
pub enum StimulusMode {
    #[default]
    Off = 0,
    Velocity = 1,
    Calibrate = 2,
    Torque = 3,
    Position = 4,
    MoveOnce = 5,
    MoveReciprocate = 6,
    MoveRepeat = 7,
}

impl StimulusMode {
    /// Profiled move modes carry slew and dwell
    pub fn is_move(self) -> bool {
        matches!(
            self,
            StimulusMode::MoveOnce | StimulusMode::MoveReciprocate | StimulusMode::MoveRepeat
        )
    }
}

impl TryFrom<u16> for StimulusMode {
    type Error = crate::ParamError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StimulusMode::Off),
            1 => Ok(StimulusMode::Velocity),
            2 => Ok(StimulusMode::Calibrate),
            3 => Ok(StimulusMode::Torque),
            4 => Ok(StimulusMode::Position),
            5 => Ok(StimulusMode::MoveOnce),
            6 => Ok(StimulusMode::MoveReciprocate),
            7 => Ok(StimulusMode::MoveRepeat),
            _ => Err(crate::ParamError::BadArgument(format!(
                "stimulus mode {}",
                code
            ))),
        }
    }
}

/// Stimulus generator settings in engineering units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StimulusState {
    pub mode: StimulusMode,
    /// Period in milliseconds (sample times for move modes)
    pub period: i32,
    /// Ticks/ms for velocity, percent for torque/calibrate, ticks otherwise
    pub amplitude: f64,
    pub slew: i32,
    /// Dwell in milliseconds
    pub dwell: i32,
    /// Generator status bits (read only)
    pub status: u16,
}

/// View over the option register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionReg(pub u32);

impl OptionReg {
    pub fn vector_lock(self) -> bool {
        self.0 & OPTION_VECTOR_LOCK != 0
    }

    pub fn product(self) -> u32 {
        (self.0 >> OPTION_PRODUCT_SHIFT) & OPTION_PRODUCT_MASK
    }

    pub fn is_k_drive(self) -> bool {
        self.product() == PRODUCT_K_DRIVE
    }
}

/// One row of a parameter snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: u16,
    pub name: String,
    pub value: f64,
}

/// Timestamped dump of every readable parameter of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub timestamp: DateTime<Utc>,
    pub node: NodeId,
    pub info: NodeInfo,
    pub parameters: Vec<SnapshotEntry>,
}
