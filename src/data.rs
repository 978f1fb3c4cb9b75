//! Static parameter descriptor tables for the ClearPath-SC node class.
//!
//! Four banks, each a contiguous run of ids starting at its base. The row at
//! index `i` of a bank describes parameter `base + i`; reserved ids are kept
//! as placeholder rows so that lookups stay a plain offset.

use crate::constants::*;
use crate::convert::ConverterKind as C;
use crate::types::{
    Group as G,
    ParamDesc,
    Signedness::{PositiveOnly, Signed, Unsigned},
    StorageClass as S,
    Unit as U,
};

const Q2: f64 = 4.0;
const Q5: f64 = 32.0;
const Q6: f64 = 64.0;
const Q7: f64 = 128.0;
const Q8: f64 = 256.0;
const Q9: f64 = 512.0;
const Q14: f64 = 16384.0;
const Q15: f64 = 32768.0;
const Q16: f64 = 65536.0;
const Q17: f64 = 131072.0;
const Q18: f64 = 262144.0;
const Q31: f64 = 2147483648.0;

/// Percent in 1.15 format
const PCT_Q15: f64 = Q15 / 100.0;

const fn reserved(id: u16) -> ParamDesc {
    ParamDesc::new(id, "Reserved", Unsigned, S::None, U::NoUnit, 0, 1.0, G::None)
}

/// Base bank: core node parameters, status and motion constraints
pub static BASE_PARAMS: &[ParamDesc] = &[
    ParamDesc::new(0, "Device ID", Unsigned, S::ReadOnly, U::DeviceId, 2, Q8, G::None),
    ParamDesc::new(1, "Firmware version", Signed, S::ReadOnly, U::FirmwareVersion, 2, 1.0, G::DriveInfo),
    ParamDesc::new(2, "Hardware version", Unsigned, S::Factory, U::HardwareVersion, 2, 1.0, G::DriveInfo),
    ParamDesc::new(3, "Reseller ID", Unsigned, S::ReadOnly, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(4, "Serial number", Signed, S::Factory, U::NoUnit, 4, 1.0, G::DriveInfo),
    ParamDesc::new(5, "Option register", Signed, S::FactoryConfig, U::BitField, 4, 1.0, G::FactorySettings),
    ParamDesc::new(6, "ROM update ack", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::NonDisplay),
    ParamDesc::new(7, "Firmware checksum", Unsigned, S::ReadOnly, U::NoUnit, 2, 1.0, G::NonDisplay),
    ParamDesc::new(8, "Sample period", Unsigned, S::ReadOnly, U::Microseconds, 4, 1000.0, G::NonDisplay),
    ParamDesc::new(9, "Alert register", Signed, S::ReadOnlyRealtime, U::BitField, 12, 1.0, G::StatusInfo),
    ParamDesc::new(10, "Stop type", Signed, S::Config, U::BitField, 2, 1.0, G::SafetyInfo),
    ParamDesc::new(11, "Watchdog time constant", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::SafetyInfo)
        .convert(C::TimeMs),
    ParamDesc::new(12, "Network status", Unsigned, S::ReadOnly, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(13, "Status accumulated", Signed, S::ReadOnlyClearRealtime, U::BitField, 6, 1.0, G::StatusInfo),
    ParamDesc::new(14, "Status attention rise", Signed, S::ReadOnlyClearRealtime, U::BitField, 6, 1.0, G::StatusInfo),
    ParamDesc::new(15, "Drive modes", Signed, S::FactoryConfig, U::BitField, 4, 1.0, G::FactorySettings),
    ParamDesc::new(16, "Status realtime", Signed, S::ReadOnlyRealtime, U::BitField, 6, 1.0, G::StatusInfo),
    ParamDesc::new(17, "Timestamp (16 bit)", Unsigned, S::ReadOnlyRealtime, U::Milliseconds, 2, 1.0, G::None)
        .convert(C::TimeMs),
    ParamDesc::new(18, "Timestamp", Unsigned, S::ReadOnlyRealtime, U::Milliseconds, 1, 1.0, G::None)
        .convert(C::TimeMs),
    ParamDesc::new(19, "Part number", Unsigned, S::Factory, U::Text, PART_NUMBER_SIZE, 1.0, G::FactorySettings),
    ParamDesc::new(20, "EEPROM update ack", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::NonDisplay),
    ParamDesc::new(21, "EEPROM version", Unsigned, S::ReadOnly, U::NoUnit, 2, 1.0, G::NonDisplay),
    ParamDesc::new(22, "Status fall", Signed, S::ReadOnlyClearRealtime, U::BitField, 6, 1.0, G::None),
    ParamDesc::new(23, "Hardware config register", Signed, S::Config, U::BitField, 4, 1.0, G::ConfigurationInfo),
    ParamDesc::new(24, "App config register", Signed, S::Config, U::BitField, 4, 1.0, G::ConfigurationInfo),
    ParamDesc::new(25, "Warning accumulated", Signed, S::ReadOnlyClearRealtime, U::BitField, 12, 1.0, G::NonDisplay),
    ParamDesc::new(26, "Warning register", Unsigned, S::ReadOnlyClearRealtime, U::NoUnit, 12, 1.0, G::None),
    ParamDesc::new(27, "User warning mask", Unsigned, S::Volatile, U::NoUnit, 12, 1.0, G::None),
    ParamDesc::new(28, "User alert mask", Unsigned, S::Volatile, U::NoUnit, 12, 1.0, G::None),
    // Tenths of a second on the wire
    ParamDesc::new(29, "On time", Unsigned, S::FactoryRealtime, U::Hours, 4, 36000.0, G::DriveInfo),
    ParamDesc::new(30, "Position capture input A", Signed, S::ReadOnlyRealtimeAttn, U::Ticks, 4, 1.0, G::MiscellaneousInfo),
    ParamDesc::new(31, "User RAM 0", Unsigned, S::Volatile, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(32, "User NV 0", Unsigned, S::NvReadWrite, U::NoUnit, USER_NV_SIZE, 1.0, G::None),
    ParamDesc::new(33, "User NV 1", Unsigned, S::NvReadWrite, U::NoUnit, USER_NV_SIZE, 1.0, G::None),
    ParamDesc::new(34, "User NV 2", Unsigned, S::NvReadWrite, U::NoUnit, USER_NV_SIZE, 1.0, G::None),
    ParamDesc::new(35, "User NV 3", Unsigned, S::NvReadWrite, U::NoUnit, USER_NV_SIZE, 1.0, G::None),
    ParamDesc::new(36, "App net checksum errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(37, "App net fragment errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(38, "App net stray errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(39, "App net overrun errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(40, "Diag net checksum errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(41, "Diag net fragment errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(42, "Diag net stray errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(43, "Diag net overrun errors", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    reserved(44),
    ParamDesc::new(45, "Attention mask", Signed, S::VolatileAttn, U::BitField, ATTN_MASK_OCTETS, 1.0, G::None),
    ParamDesc::new(46, "General purpose timer", Unsigned, S::NvReadWrite, U::Milliseconds, 2, 1.0, G::None)
        .convert(C::TimeMs),
    ParamDesc::new(47, "Position trigger point", Signed, S::NvReadWriteAttn, U::Ticks, 4, 1.0, G::MiscellaneousInfo),
    ParamDesc::new(48, "A after start distance", PositiveOnly, S::NvReadWriteAttn, U::Ticks, 4, 1.0, G::MiscellaneousInfo),
    ParamDesc::new(49, "B before end distance", PositiveOnly, S::NvReadWriteAttn, U::Ticks, 4, 1.0, G::MiscellaneousInfo),
    ParamDesc::new(50, "User output register", Signed, S::Volatile, U::BitField, 2, 1.0, G::IoInfo),
    ParamDesc::new(51, "Alert accumulated", Signed, S::FactoryRealtime, U::BitField, 12, 1.0, G::StatusInfo)
        .since(FW_MILESTONE_SC_HAS_AC_REG),
    ParamDesc::new(52, "Output register", Signed, S::ReadOnlyRealtime, U::BitField, 2, 1.0, G::IoInfo),
    ParamDesc::new(53, "Speed limit", PositiveOnly, S::Motor, U::TicksPerSec, 2, Q2, G::MotorInfo)
        .convert(C::SpdLim)
        .hw_locked(),
    ParamDesc::new(54, "Test point IO 1", Unsigned, S::ReadOnlyRealtime, U::BitField, 4, 1.0, G::NonDisplay),
    ParamDesc::new(55, "Driver attention mask", Unsigned, S::Volatile, U::NoUnit, ATTN_MASK_OCTETS, 1.0, G::NonDisplay),
    ParamDesc::new(56, "Group shutdown mask", Signed, S::Volatile, U::BitField, 6, 1.0, G::NonDisplay),
    ParamDesc::new(57, "RAS delay", Unsigned, S::ReadOnlyRealtime, U::Milliseconds, 2, 1.0, G::NonDisplay)
        .convert(C::TimeMs),
    ParamDesc::new(58, "Jog velocity limit", PositiveOnly, S::NvReadWrite, U::TicksPerSec, 4, Q17, G::MotionConstraints)
        .convert(C::Vel),
    ParamDesc::new(59, "Jog acceleration limit", PositiveOnly, S::NvReadWrite, U::TicksPerSec2, 4, Q17, G::MotionConstraints)
        .convert(C::Acc),
    ParamDesc::new(60, "RAS max velocity", Signed, S::ReadOnlyRealtime, U::TicksPerSec, 4, Q18, G::NonDisplay)
        .convert(C::Vel),
    ParamDesc::new(61, "Velocity limit", PositiveOnly, S::NvReadWrite, U::TicksPerSec, 4, Q17, G::MotionConstraints)
        .convert(C::Vel),
    ParamDesc::new(62, "Acceleration limit", PositiveOnly, S::NvReadWrite, U::TicksPerSec2, 4, Q17, G::MotionConstraints)
        .convert(C::Acc),
    ParamDesc::new(63, "RAS control register", Signed, S::ConfigTuning, U::BitField, 4, 1.0, G::TuningInfo)
        .convert(C::Jerk),
    ParamDesc::new(64, "Deceleration limit", PositiveOnly, S::NvReadWriteAttn, U::TicksPerSec2, 4, Q17, G::MotionConstraints)
        .convert(C::Acc),
    ParamDesc::new(65, "E-stop deceleration", PositiveOnly, S::Config, U::TicksPerSec2, 4, Q17, G::MotionConstraints)
        .convert(C::Acc),
    ParamDesc::new(66, "Head distance", PositiveOnly, S::NvReadWriteAttn, U::Ticks, 4, 1.0, G::MotionConstraints),
    ParamDesc::new(67, "Tail distance", PositiveOnly, S::NvReadWriteAttn, U::Ticks, 4, 1.0, G::MotionConstraints),
    ParamDesc::new(68, "Head/tail velocity", PositiveOnly, S::NvReadWriteAttn, U::TicksPerSec, 4, Q17, G::MotionConstraints)
        .convert(C::Vel),
    ParamDesc::new(69, "Move dwell", Unsigned, S::NvReadWrite, U::Milliseconds, 2, 1.0, G::NonDisplay)
        .convert(C::TimeMs),
    ParamDesc::new(70, "Soft limit positive", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::None),
    ParamDesc::new(71, "Soft limit negative", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::None),
    ParamDesc::new(72, "Stop qualifier time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::SafetyInfo)
        .convert(C::TimeMs),
    ParamDesc::new(73, "Voltage Q command", Signed, S::Ram, U::PercentMax, 2, PCT_Q15, G::NonDisplay),
    ParamDesc::new(74, "Stop qualifier velocity", PositiveOnly, S::Config, U::TicksPerSec, 4, Q18, G::SafetyInfo)
        .convert(C::Vel),
    ParamDesc::new(75, "Velocity limit max", Unsigned, S::NvReadWrite, U::TicksPerSec, 4, Q17, G::TuningInfo)
        .convert(C::Vel),
    ParamDesc::new(76, "Acceleration limit max", Unsigned, S::NvReadWrite, U::TicksPerSec2, 4, Q17, G::NonDisplay)
        .convert(C::Acc),
    ParamDesc::new(77, "Stop acceleration limit max", PositiveOnly, S::NvReadWrite, U::TicksPerSec2, 4, Q17, G::None)
        .convert(C::Acc),
    ParamDesc::new(78, "RMS stopped factor", PositiveOnly, S::Factory, U::NoUnit, 4, Q15, G::FactorySettings)
        .convert(C::RmsFactor)
        .since(FW_MILESTONE_INDEX_IB),
    ParamDesc::new(79, "RMS stopped speed", PositiveOnly, S::FactoryMotor, U::TicksPerSec, 2, Q2, G::FactorySettings)
        .convert(C::SpdLim)
        .since(FW_MILESTONE_INDEX_IB),
    ParamDesc::new(80, "Torque command", Signed, S::ReadOnlyRealtime, U::TorqueLimit, 2, Q15, G::StatusInfo)
        .convert(C::Amperes),
    ParamDesc::new(81, "Torque measured", Signed, S::ReadOnlyRealtime, U::Amperes, 2, Q15, G::None)
        .convert(C::MeasAmperes),
    ParamDesc::new(82, "RMS level", PositiveOnly, S::ReadOnlyRealtime, U::PercentShutdown, 4, 1.0, G::StatusInfo)
        .convert(C::RmsLevel),
    ParamDesc::new(83, "Measured position", Signed, S::ReadOnlyRealtime, U::Ticks, 3, 1.0, G::StatusInfo),
    ParamDesc::new(84, "Commanded position", Signed, S::ReadOnlyRealtime, U::Ticks, 3, 1.0, G::StatusInfo),
    ParamDesc::new(85, "Measured velocity", Signed, S::ReadOnlyRealtime, U::TicksPerSec, 4, Q18, G::StatusInfo)
        .convert(C::Vel),
    ParamDesc::new(86, "Commanded velocity", Signed, S::ReadOnlyRealtime, U::TicksPerSec, 4, Q18, G::StatusInfo)
        .convert(C::Vel),
    ParamDesc::new(87, "Motor position", Signed, S::ReadOnlyRealtime, U::Ticks, 3, 1.0, G::NonDisplay),
    ParamDesc::new(88, "RMS slow level", PositiveOnly, S::ReadOnlyRealtime, U::PercentShutdown, 4, 1.0, G::StatusInfo)
        .convert(C::RmsLevelSlow)
        .since(FW_MILESTONE_DUAL_RMS),
    ParamDesc::new(89, "Acceleration max", PositiveOnly, S::ReadOnlyRealtime, U::TicksPerSec2, 4, Q18, G::None)
        .convert(C::Acc),
    ParamDesc::new(90, "Tracking error", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::NonDisplay),
    ParamDesc::new(91, "In-range window", Signed, S::Config, U::Ticks, 4, 1.0, G::ConfigurationInfo)
        .convert(C::CheckPosnLimit),
    ParamDesc::new(92, "Move done time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::ConfigurationInfo)
        .convert(C::TimeMs),
    ParamDesc::new(93, "Index position capture", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::NonDisplay),
    ParamDesc::new(94, "Hi-res commanded position", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::None),
    ParamDesc::new(95, "Hi-res measured position", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::None),
    ParamDesc::new(96, "Steps accumulator", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(97, "In-range velocity", PositiveOnly, S::Config, U::PercentMax, 2, PCT_Q15, G::ConfigurationInfo),
    ParamDesc::new(98, "Move options", Signed, S::NvReadWriteAttn, U::BitField, 2, 1.0, G::MotionConstraints)
        .since(FW_MILESTONE_SC_MOVE_OPTIONS),
    ParamDesc::new(99, "Input 1 time constant", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::IoInfo)
        .convert(C::TimeMs),
    ParamDesc::new(100, "Shipout version", Signed, S::Factory, U::ShipoutVersion, 4, 1.0, G::FactorySettings)
        .since(FW_MILESTONE_2R0),
    reserved(101),
    ParamDesc::new(102, "Input 2 time constant", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::IoInfo)
        .convert(C::TimeMs),
    ParamDesc::new(103, "Vector drift limit", PositiveOnly, S::None, U::Degrees, 4, 1.0, G::FactorySettings),
    ParamDesc::new(104, "Commutation check angle limit", PositiveOnly, S::Config, U::Degrees, 4, Q17 / 360.0, G::CommutationInfo),
    ParamDesc::new(105, "Sensorless ramp-up time", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::CommutationInfo)
        .convert(C::TimeMs),
    ParamDesc::new(106, "Sensorless sweep time", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::CommutationInfo)
        .convert(C::TimeMs),
    ParamDesc::new(107, "Sensorless settle time", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::CommutationInfo)
        .convert(C::TimeMs),
    ParamDesc::new(108, "Sensorless volts", Unsigned, S::FactoryMotor, U::Volts, 2, Q5, G::CommutationInfo),
    ParamDesc::new(109, "Sensorless reading samples", Unsigned, S::FactoryMotor, U::SampleTimes, 2, 1.0, G::CommutationInfo),
    ParamDesc::new(110, "Sensorless setup samples", Unsigned, S::FactoryMotor, U::SampleTimes, 2, 1.0, G::CommutationInfo),
    ParamDesc::new(111, "Sensorless verify torque time", Signed, S::Config, U::Milliseconds, 2, 1.0, G::CommutationInfo)
        .convert(C::TimeMs),
    ParamDesc::new(112, "Encoder quality", Unsigned, S::RamRealtime, U::NoUnit, 24, 1.0, G::None),
    ParamDesc::new(113, "Sensorless verify max motion", Unsigned, S::Config, U::Degrees, 2, Q15 / 360.0, G::CommutationInfo),
    ParamDesc::new(114, "Sensorless verify min motion", Unsigned, S::Config, U::Degrees, 2, Q15 / 360.0, G::CommutationInfo),
    ParamDesc::new(115, "Sensorless verify ramp time", Signed, S::Config, U::Milliseconds, 2, 1.0, G::CommutationInfo)
        .convert(C::TimeMs),
];

/// Drive bank: electrical limits, motor data, tuning and foldback
pub static DRIVE_PARAMS: &[ParamDesc] = &[
    ParamDesc::new(256, "ADC max", Signed, S::FactoryConfig, U::Amperes, 2, Q14, G::FactorySettings)
        .convert(C::AdcMax),
    ParamDesc::new(257, "Drive max current", Signed, S::FactoryConfig, U::Amperes, 2, Q9, G::DriveInfo),
    ParamDesc::new(258, "RMS max", PositiveOnly, S::FactoryConfig, U::Amperes, 2, 1.0, G::FactorySettings)
        .convert(C::RmsLimit),
    ParamDesc::new(259, "IR calibration factor", Unsigned, S::Factory, U::NoUnit, 2, Q14, G::FactorySettings),
    ParamDesc::new(260, "IS calibration factor", Unsigned, S::Factory, U::NoUnit, 2, Q14, G::FactorySettings),
    ParamDesc::new(261, "Power limit exponent", Unsigned, S::Factory, U::NoUnit, 2, 1.0, G::FactorySettings),
    ParamDesc::new(262, "Minimum winding resistance", PositiveOnly, S::Factory, U::Ohms, 2, Q9, G::FactorySettings),
    ParamDesc::new(263, "Bus current filter time constant", PositiveOnly, S::Factory, U::Milliseconds, 2, 1.0, G::FactorySettings)
        .convert(C::IbRmsTc),
    ParamDesc::new(264, "Bus current trip", Signed, S::Factory, U::AmperesSquared, 2, Q15, G::FactorySettings)
        .convert(C::AmpsRms),
    ParamDesc::new(265, "Phase current trip", PositiveOnly, S::Factory, U::Amperes, 2, Q15, G::FactorySettings)
        .convert(C::MeasAmperes),
    ParamDesc::new(266, "Bus volts full scale", PositiveOnly, S::Factory, U::Volts, 2, Q5, G::FactorySettings),
    ParamDesc::new(267, "Sensorless start torque", PositiveOnly, S::Config, U::AmperesSquared, 2, Q15, G::CommutationInfo)
        .convert(C::Amperes),
    ParamDesc::new(268, "Over-voltage trip", PositiveOnly, S::Factory, U::Volts, 2, Q5, G::FactorySettings),
    ParamDesc::new(269, "Bus voltage calibration", Unsigned, S::Factory, U::Volts, 2, Q14, G::FactorySettings),
    ParamDesc::new(270, "RMS limit", PositiveOnly, S::MotorRestricted, U::AmperesSquared, 4, 1.0, G::MotorInfo)
        .convert(C::RmsLimit32),
    ParamDesc::new(271, "RMS time constant", PositiveOnly, S::Motor, U::Seconds, 2, 1.0, G::MotorInfo)
        .convert(C::RmsTc),
    ParamDesc::new(272, "Tracking error limit", PositiveOnly, S::ConfigTuning, U::Ticks, 4, 1.0, G::SafetyInfo)
        .convert(C::CheckPosnLimit),
    ParamDesc::new(273, "RMS initial level", Signed, S::Config, U::PercentShutdown, 2, PCT_Q15, G::MotorInfo),
    ParamDesc::new(274, "Bus current peak", PositiveOnly, S::ReadOnlyRealtime, U::Amperes, 4, Q31, G::StatusInfo)
        .convert(C::AmpsRms)
        .since(FW_MILESTONE_SC_HAS_IBPEAK),
    ParamDesc::new(275, "RMS slow limit", PositiveOnly, S::MotorRestricted, U::AmperesSquared, 4, 1.0, G::MotorInfo)
        .convert(C::RmsLimit32)
        .since(FW_MILESTONE_DUAL_RMS),
    ParamDesc::new(276, "Test point 3.3V", Unsigned, S::ReadOnlyRealtime, U::Volts, 2, Q15 / 3.3, G::None),
    ParamDesc::new(277, "Position capture input B", Signed, S::ReadOnlyRealtimeAttn, U::Ticks, 4, 1.0, G::MiscellaneousInfo),
    ParamDesc::new(278, "Bus volts at enable", PositiveOnly, S::ReadOnlyRealtime, U::Volts, 2, Q15, G::NonDisplay)
        .convert(C::MeasVolts),
    ParamDesc::new(279, "Test point 5V", Unsigned, S::ReadOnlyRealtime, U::Volts, 2, Q15 / 6.6, G::StatusInfo),
    ParamDesc::new(280, "Bus volts", PositiveOnly, S::ReadOnlyRealtime, U::Volts, 2, Q15, G::DriveInfo)
        .convert(C::MeasVolts),
    ParamDesc::new(281, "NV modified", Unsigned, S::ReadWriteRealtimeTuning, U::NoUnit, 2, 1.0, G::NonDisplay),
    ParamDesc::new(282, "Vector rate", Unsigned, S::ReadOnly, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(283, "Test point reference", Unsigned, S::ReadOnlyRealtime, U::Volts, 2, Q15 / 3.3, G::StatusInfo),
    ParamDesc::new(284, "Test point 12V", Unsigned, S::ReadOnlyRealtime, U::Volts, 2, Q15 / 36.3, G::StatusInfo),
    ParamDesc::new(285, "Test point IO", Signed, S::ReadOnlyRealtime, U::BitField, 4, 1.0, G::NonDisplay),
    ParamDesc::new(286, "Phase R current", Signed, S::ReadOnlyRealtime, U::Amperes, 2, Q15, G::None)
        .convert(C::MeasAmperes),
    ParamDesc::new(287, "Phase S current", Signed, S::ReadOnlyRealtime, U::Amperes, 2, Q15, G::None)
        .convert(C::MeasAmperes),
    ParamDesc::new(288, "Phase current filter time constant", Unsigned, S::Factory, U::Milliseconds, 2, 1.0, G::FactorySettings)
        .convert(C::Filt1Tc),
    ParamDesc::new(289, "Phase R current filtered", Signed, S::ReadOnlyRealtime, U::Amperes, 2, Q15, G::NonDisplay)
        .convert(C::MeasAmperes),
    ParamDesc::new(290, "Phase S current filtered", Signed, S::ReadOnlyRealtime, U::Amperes, 2, Q15, G::NonDisplay)
        .convert(C::MeasAmperes),
    ParamDesc::new(291, "Board temperature", Signed, S::ReadOnlyRealtime, U::DegreesC, 2, 1.0, G::StatusInfo),
    ParamDesc::new(292, "Temperature simulation", Signed, S::Volatile, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(293, "DSP info", Unsigned, S::ReadOnly, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(294, "Bus current RMS", Unsigned, S::ReadOnlyRealtime, U::Amperes, 4, Q31, G::StatusInfo)
        .convert(C::AmpsRms),
    ParamDesc::new(295, "Time slot period", Unsigned, S::ReadOnlyRealtime, U::Microseconds, 4, 1000.0, G::NonDisplay),
    ParamDesc::new(296, "Bad time slot count", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(297, "Bad slot count", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(298, "Load slot 0", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(299, "Load slot 1", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(300, "Load slot 2", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(301, "Load slot 3", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(302, "Average load", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(303, "Reserved", Signed, S::None, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(304, "Diagnostic 304", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(305, "Diagnostic 305", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(306, "Phase R offset", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(307, "Phase S offset", Unsigned, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(308, "Over-temperature limit", PositiveOnly, S::Factory, U::DegreesC, 2, 1.0, G::FactorySettings),
    ParamDesc::new(309, "Current loop KP adjust", Signed, S::ConfigTuning, U::NoUnit, 2, 1.0, G::TuningInfo),
    ParamDesc::new(310, "Encoder density", PositiveOnly, S::Motor, U::CountsPerRev, 4, 1.0, G::MotorInfo)
        .hw_locked(),
    ParamDesc::new(311, "Motor poles", PositiveOnly, S::Motor, U::NoUnit, 2, 1.0, G::MotorInfo)
        .hw_locked(),
    ParamDesc::new(312, "Motor KE", PositiveOnly, S::Motor, U::VoltsPerKrpm, 4, Q7, G::MotorInfo)
        .hw_locked(),
    ParamDesc::new(313, "Motor resistance", PositiveOnly, S::Motor, U::Ohms, 2, Q9, G::MotorInfo)
        .hw_locked(),
    ParamDesc::new(314, "Motor electrical time constant", PositiveOnly, S::Motor, U::Milliseconds, 2, Q9, G::MotorInfo)
        .hw_locked(),
    ParamDesc::new(315, "Rotor offset", Signed, S::FactoryMotor, U::Degrees, 2, Q15 / 360.0, G::MotorInfo),
    reserved(316),
    ParamDesc::new(317, "Commutation angle", PositiveOnly, S::FactoryRealtime, U::Degrees, 4, 1.0, G::NonDisplay)
        .convert(C::Angle),
    ParamDesc::new(318, "Current loop KP", PositiveOnly, S::ConfigTuning, U::NoUnit, 2, 1.0, G::TuningInfo),
    ParamDesc::new(319, "Current loop KI", PositiveOnly, S::ConfigTuning, U::NoUnit, 2, 1.0, G::TuningInfo),
    ParamDesc::new(320, "Command density", PositiveOnly, S::Config, U::CountsPerRev, 4, 1.0, G::ModeInfo),
    ParamDesc::new(321, "Index detect speed", Signed, S::FactoryMotor, U::TicksPerSec, 2, Q2, G::FactorySettings)
        .convert(C::SpdLim)
        .since(FW_MILESTONE_INDEX_IB)
        .hw_locked(),
    ParamDesc::new(322, "Active step resolution", PositiveOnly, S::FactoryMotor, U::CountsPerRev, 4, 1.0, G::DriveInfo)
        .hw_locked(),
    ParamDesc::new(323, "KR", PositiveOnly, S::ConfigTuning, U::NoUnit, 2, Q9, G::TuningInfo),
    ParamDesc::new(324, "Current loop KI adjust", Signed, S::ConfigTuning, U::NoUnit, 2, 1.0, G::TuningInfo),
    ParamDesc::new(325, "Tuning config register", Signed, S::ConfigTuning, U::BitField, 4, 1.0, G::TuningInfo),
    ParamDesc::new(326, "KV", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(327, "KP", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(328, "KI", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(329, "KFV", Signed, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(330, "KFA", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo)
        .convert(C::Limit2To27),
    ParamDesc::new(331, "KFJ", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo)
        .convert(C::Limit2To27),
    ParamDesc::new(332, "Tuning status", Signed, S::ReadOnlyRealtime, U::BitField, 4, 1.0, G::None),
    ParamDesc::new(333, "KNV", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(334, "Anti-hunt voltage filter", Unsigned, S::ConfigTuning, U::Milliseconds, 2, 1.0, G::TuningInfo)
        .convert(C::VectorFilt99pct),
    ParamDesc::new(335, "Torque bias", Signed, S::ConfigTuning, U::TorqueLimit, 2, Q15, G::TuningInfo)
        .convert(C::Amperes),
    ParamDesc::new(336, "Fuzzy aperture", PositiveOnly, S::ConfigTuning, U::Ticks, 2, 1.0, G::TuningInfo),
    ParamDesc::new(337, "Anti-hunt hysteresis", PositiveOnly, S::ConfigTuning, U::Ticks, 2, 1.0, G::TuningInfo),
    ParamDesc::new(338, "Anti-hunt holdoff", PositiveOnly, S::ConfigTuning, U::Milliseconds, 2, 1.0, G::TuningInfo)
        .convert(C::TimeMs),
    ParamDesc::new(339, "KP zero", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(340, "KI zero", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, 1.0, G::TuningInfo),
    ParamDesc::new(341, "Target window", PositiveOnly, S::ConfigTuning, U::Ticks, 2, 1.0, G::TuningInfo),
    ParamDesc::new(342, "Stability window", PositiveOnly, S::ConfigTuning, U::Ticks, 2, 1.0, G::TuningInfo),
    ParamDesc::new(343, "Motor inertia", Unsigned, S::NvReadWrite, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(344, "Motor static friction", Unsigned, S::NvReadWrite, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(345, "Motor viscous friction", Unsigned, S::NvReadWrite, U::NoUnit, 4, 1.0, G::None),
    ParamDesc::new(346, "KP factor", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, Q16, G::TuningInfo),
    ParamDesc::new(347, "KP zero factor", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, Q16, G::TuningInfo),
    ParamDesc::new(348, "KI factor", PositiveOnly, S::ConfigTuning, U::NoUnit, 4, Q16, G::TuningInfo),
    ParamDesc::new(349, "Fine tune", Unsigned, S::ConfigTuning, U::NoUnit, 2, 1.0, G::TuningInfo),
    ParamDesc::new(350, "Torque limit", PositiveOnly, S::Config, U::TorqueLimit, 2, Q15, G::SafetyInfo)
        .convert(C::Amperes),
    ParamDesc::new(351, "Positive foldback torque", PositiveOnly, S::ConfigAttn, U::TorqueLimit, 2, Q15, G::FoldbackInfo)
        .convert(C::Amperes),
    ParamDesc::new(352, "Positive foldback time constant", PositiveOnly, S::ConfigAttn, U::Milliseconds, 2, 1.0, G::FoldbackInfo)
        .convert(C::Filt99pct),
    ParamDesc::new(353, "Negative foldback torque", PositiveOnly, S::ConfigAttn, U::TorqueLimit, 2, Q15, G::FoldbackInfo)
        .convert(C::Amperes),
    ParamDesc::new(354, "Negative foldback time constant", PositiveOnly, S::ConfigAttn, U::Milliseconds, 2, 1.0, G::FoldbackInfo)
        .convert(C::Filt99pct),
    reserved(355),
    reserved(356),
    ParamDesc::new(357, "Hard stop foldback torque", PositiveOnly, S::Config, U::TorqueLimit, 2, Q15, G::FoldbackInfo)
        .convert(C::Amperes),
    ParamDesc::new(358, "Hard stop foldback time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::FoldbackInfo)
        .convert(C::Filt99pct),
    ParamDesc::new(359, "Hard stop qualifying speed", PositiveOnly, S::Config, U::TicksPerSec, 4, Q18, G::Homing)
        .convert(C::Vel),
    ParamDesc::new(360, "Hard stop torque trip", PositiveOnly, S::Config, U::PercentTorqueLimit, 2, PCT_Q15, G::Homing),
    ParamDesc::new(361, "Hard stop time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::Homing)
        .convert(C::TimeMs),
    ParamDesc::new(362, "Regen off voltage", PositiveOnly, S::Config, U::Volts, 2, Q5, G::SpecialFunctions)
        .since(FW_MILESTONE_AC_GREEN),
    ParamDesc::new(363, "Homing torque limit", PositiveOnly, S::Config, U::TorqueLimit, 2, Q15, G::Homing)
        .convert(C::Amperes),
    ParamDesc::new(364, "RMS slow time constant", PositiveOnly, S::Motor, U::Minutes, 2, 1.0, G::MotorInfo)
        .convert(C::RmsSlowTc)
        .since(FW_MILESTONE_DUAL_RMS),
    ParamDesc::new(365, "Acceleration enhancement phase", Signed, S::MotionLabFactory, U::Ticks, 4, 1.0, G::FactorySettings),
    ParamDesc::new(366, "Acceleration enhancement amplitude", Signed, S::MotionLabFactory, U::Ticks, 4, 1.0, G::FactorySettings),
    ParamDesc::new(367, "Mechanical position", PositiveOnly, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::NonDisplay),
    ParamDesc::new(368, "Delay to disable", Unsigned, S::Config, U::Milliseconds, 2, 1.0, G::SafetyInfo)
        .convert(C::TimeMs),
    ParamDesc::new(369, "Soft start frequency", Signed, S::Factory, U::Hertz, 4, 1.0, G::FactorySettings)
        .since(FW_MILESTONE_SC_VBUS_ADJ),
    ParamDesc::new(370, "Regen power time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::SpecialFunctions)
        .convert(C::Filt99pct)
        .since(FW_MILESTONE_AC_GREEN),
    ParamDesc::new(371, "Regen on voltage", PositiveOnly, S::Config, U::Volts, 2, Q5, G::SpecialFunctions)
        .since(FW_MILESTONE_AC_GREEN),
    ParamDesc::new(372, "Bus voltage adjust rate", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::SpecialFunctions)
        .since(FW_MILESTONE_SC_VBUS_ADJ),
    ParamDesc::new(373, "Velocity trim", PositiveOnly, S::RamRealtime, U::NoUnit, 4, Q16, G::NonDisplay)
        .convert(C::Vel),
    ParamDesc::new(374, "Runtime counter", PositiveOnly, S::RamRealtime, U::NoUnit, 2, 1.0, G::NonDisplay),
    ParamDesc::new(375, "Set flags", Signed, S::RamRealtime, U::BitField, 4, 1.0, G::NonDisplay),
    ParamDesc::new(376, "Test point reference simulation", Unsigned, S::Ram, U::Volts, 2, Q15 / 3.3, G::None),
    ParamDesc::new(377, "Bus volts simulation", Unsigned, S::Ram, U::Volts, 2, Q15, G::None)
        .convert(C::MeasVolts),
    ParamDesc::new(378, "Runtime flags", Unsigned, S::Ram, U::BitField, 4, 1.0, G::NonDisplay),
    ParamDesc::new(379, "Under-temperature trip", Signed, S::ReadOnly, U::DegreesC, 2, Q6, G::FactorySettings),
    ParamDesc::new(380, "Encoder temperature", Signed, S::ReadOnlyRealtime, U::DegreesC, 2, Q6, G::StatusInfo),
    ParamDesc::new(381, "Stator temperature", Signed, S::ReadOnlyRealtime, U::DegreesC, 2, Q6, G::StatusInfo),
    ParamDesc::new(382, "Stator temperature trip", Signed, S::ReadOnly, U::DegreesC, 2, Q6, G::FactorySettings),
    ParamDesc::new(383, "Stator temperature warning", Signed, S::ReadOnly, U::DegreesC, 2, Q6, G::FactorySettings),
];

/// Application bank: homing, power sequencing, user description and I/O routing
pub static APP_PARAMS: &[ParamDesc] = &[
    ParamDesc::new(512, "Homing velocity", Signed, S::Config, U::TicksPerSec, 4, Q17, G::Homing)
        .convert(C::Vel),
    ParamDesc::new(513, "Homing offset", PositiveOnly, S::Config, U::Ticks, 4, 1.0, G::Homing),
    ParamDesc::new(514, "Homing acceleration", PositiveOnly, S::Config, U::TicksPerSec2, 4, Q17, G::Homing)
        .convert(C::Acc),
    reserved(515),
    ParamDesc::new(516, "Hard stop delay", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::Homing)
        .convert(C::TimeMs),
    ParamDesc::new(517, "Event shutdown mask", Signed, S::Config, U::BitField, 12, 1.0, G::ConfigurationInfo)
        .since(FW_MILESTONE_CL_MIN_VOLT),
    ParamDesc::new(518, "AC loss time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::SafetyInfo)
        .convert(C::TimeMs)
        .since(FW_MILESTONE_CL_MIN_VOLT),
    ParamDesc::new(519, "AC wiring error time constant", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::SafetyInfo)
        .convert(C::TimeMs)
        .since(FW_MILESTONE_CL_MIN_VOLT),
    ParamDesc::new(520, "Sensorless minimum volts", PositiveOnly, S::Factory, U::Volts, 2, Q5, G::DriveInfo),
    ParamDesc::new(521, "Power-up holdoff time", PositiveOnly, S::Config, U::Milliseconds, 2, 1.0, G::MiscellaneousInfo)
        .convert(C::TimeMs),
    ParamDesc::new(522, "Commutation low voltage", Unsigned, S::Factory, U::Volts, 2, Q5, G::FactorySettings)
        .since(FW_MILESTONE_SC_HAS_LPB),
    ParamDesc::new(523, "Bus current slow filter time constant", PositiveOnly, S::Factory, U::Milliseconds, 2, 1.0, G::FactorySettings)
        .convert(C::IbRmsSlowTc)
        .since(FW_MILESTONE_SC_MIN_VOLT),
    reserved(524),
    reserved(525),
    reserved(526),
    reserved(527),
    reserved(528),
    reserved(529),
    reserved(530),
    reserved(531),
    reserved(532),
    ParamDesc::new(533, "Index count", Signed, S::ReadOnlyRealtime, U::NoUnit, 4, 1.0, G::DriveInfo),
    reserved(534),
    reserved(535),
    reserved(536),
    reserved(537),
    reserved(538),
    reserved(539),
    ParamDesc::new(540, "User description 0", Unsigned, S::NvReadWrite, U::NoUnit, USER_DESC_CHUNK_SIZE as u8, 1.0, G::None),
    ParamDesc::new(541, "User description 1", Unsigned, S::NvReadWrite, U::NoUnit, USER_DESC_CHUNK_SIZE as u8, 1.0, G::None),
    ParamDesc::new(542, "User description 2", Unsigned, S::NvReadWrite, U::NoUnit, USER_DESC_CHUNK_SIZE as u8, 1.0, G::None),
    ParamDesc::new(543, "User description 3", Unsigned, S::NvReadWrite, U::NoUnit, USER_DESC_CHUNK_SIZE as u8, 1.0, G::None),
    ParamDesc::new(544, "User description 4", Unsigned, S::NvReadWrite, U::NoUnit, USER_DESC_CHUNK_SIZE as u8, 1.0, G::None),
    ParamDesc::new(545, "Output source register", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(546, "Input source register", Signed, S::Config, U::BitField, 2, 1.0, G::IoInfo),
    ParamDesc::new(547, "Reserved", Unsigned, S::None, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(548, "User input register", Signed, S::Config, U::BitField, 2, 1.0, G::IoInfo),
    ParamDesc::new(549, "Actual input register", Signed, S::ReadOnlyRealtime, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(550, "Invert input", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(551, "Invert output", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(552, "Feature 0", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(553, "Feature 1", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(554, "Feature enable", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(555, "Feature 3", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(556, "Feature trigger", Signed, S::ConfigAttn, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(557, "Feature node stop", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(558, "Feature reset timer", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(559, "Feature attention 0", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(560, "Feature attention 1", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(561, "Feature 9", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(562, "Feature 10", Unsigned, S::NvReadWrite, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(563, "Feature at home", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(564, "Feature positive foldback", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(565, "Feature negative foldback", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(566, "Feature in positive limit", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(567, "Feature in negative limit", Signed, S::Config, U::BitField, 2, 1.0, G::NonDisplay),
    ParamDesc::new(568, "Soft limit position 1", Signed, S::Config, U::Ticks, 4, 1.0, G::MotionConstraints),
    ParamDesc::new(569, "Soft limit position 2", Signed, S::Config, U::Ticks, 4, 1.0, G::MotionConstraints),
    ParamDesc::new(570, "Runtime scratch 0", Unsigned, S::RamRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(571, "Runtime scratch 1", Unsigned, S::RamRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(572, "Power status", Signed, S::ReadOnlyRealtime, U::BitField, 4, 1.0, G::StatusInfo)
        .since(FW_MILESTONE_SC_HAS_AC_REG),
    reserved(573),
    ParamDesc::new(574, "Power board serial number", Signed, S::Factory, U::NoUnit, 4, 1.0, G::DriveInfo),
    ParamDesc::new(575, "Power board revision", Unsigned, S::Factory, U::HardwareVersion, 2, 1.0, G::DriveInfo),
    ParamDesc::new(576, "Temperature simulation 2", Signed, S::Volatile, U::NoUnit, 2, 1.0, G::None),
    reserved(577),
    ParamDesc::new(578, "Minimum operating volts", PositiveOnly, S::Config, U::Volts, 2, Q5, G::DriveInfo)
        .since(FW_MILESTONE_SC_MIN_VOLT),
    ParamDesc::new(579, "User temperature limit", PositiveOnly, S::Config, U::DegreesC, 2, 1.0, G::DriveInfo)
        .since(FW_MILESTONE_SC_USER_TEMP),
    ParamDesc::new(580, "User bus current trip", Signed, S::Config, U::AmperesSquared, 2, Q15, G::DriveInfo)
        .convert(C::AmpsRms)
        .since(FW_MILESTONE_INDEX_IB),
    ParamDesc::new(581, "Runtime scratch 2", Unsigned, S::RamRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(582, "Runtime scratch 3", Unsigned, S::RamRealtime, U::NoUnit, 2, 1.0, G::None),
    ParamDesc::new(583, "Physical home clearance", PositiveOnly, S::Config, U::Ticks, 4, 1.0, G::Homing)
        .since(FW_MILESTONE_2R0),
];

/// Extended bank: ClearPath 2.0 homing and motor thermal model
pub static APP20_PARAMS: &[ParamDesc] = &[
    ParamDesc::new(768, "Shaft home target", Signed, S::NvReadWrite, U::Ticks, 4, 1.0, G::Homing)
        .since(FW_MILESTONE_2R0),
    ParamDesc::new(769, "Precision home position", Signed, S::NvReadWriteRealtime, U::Ticks, 4, 1.0, G::Homing)
        .since(FW_MILESTONE_2R0),
    ParamDesc::new(770, "Precision home last", Signed, S::ReadOnlyRealtime, U::Ticks, 4, 1.0, G::Homing)
        .since(FW_MILESTONE_2R0),
    reserved(771),
    reserved(772),
    reserved(773),
    reserved(774),
    reserved(775),
    reserved(776),
    reserved(777),
    ParamDesc::new(778, "Heating current", PositiveOnly, S::NvReadWrite, U::NoUnit, 4, Q15, G::DriveInfo)
        .convert(C::DHeatFact)
        .since(FW_MILESTONE_2R0),
    ParamDesc::new(779, "Heating factor", PositiveOnly, S::NvReadWrite, U::NoUnit, 4, Q15, G::DriveInfo)
        .since(FW_MILESTONE_2R0),
    ParamDesc::new(780, "Motor status register", Signed, S::ReadOnlyRealtime, U::BitField, 4, 1.0, G::StatusInfo)
        .since(FW_MILESTONE_2R0),
    ParamDesc::new(781, "Phase resistance", PositiveOnly, S::ReadOnlyRealtime, U::Ohms, 2, Q9, G::MotorInfo)
        .since(FW_MILESTONE_2R0),
];

/// Every bank of the node class, ordered by base id
pub static BANKS: [&[ParamDesc]; 4] = [BASE_PARAMS, DRIVE_PARAMS, APP_PARAMS, APP20_PARAMS];

/// Find the descriptor for `id` across all banks
pub fn find(id: u16) -> Option<&'static ParamDesc> {
    BANKS.iter().find_map(|bank| {
        let base = bank.first()?.id;
        let index = id.checked_sub(base)? as usize;
        bank.get(index)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banks_are_contiguous() {
        for bank in BANKS.iter() {
            let base = bank[0].id;
            for (i, desc) in bank.iter().enumerate() {
                assert_eq!(desc.id, base + i as u16, "bank at {} row {}", base, i);
            }
        }
    }

    #[test]
    fn test_bank_ranges_do_not_overlap() {
        let mut last_end: Option<u16> = None;
        for bank in BANKS.iter() {
            let first = bank[0].id;
            let last = bank[bank.len() - 1].id;
            if let Some(end) = last_end {
                assert!(first > end, "bank {} overlaps previous end {}", first, end);
            }
            last_end = Some(last);
        }
    }

    #[test]
    fn test_bank_sizes() {
        assert_eq!(BASE_PARAMS.len(), 116);
        assert_eq!(DRIVE_PARAMS.len(), 128);
        assert_eq!(APP_PARAMS.len(), 72);
        assert_eq!(APP20_PARAMS.len(), 14);
    }

    #[test]
    fn test_find_by_offset() {
        assert_eq!(find(P_I_MAX).map(|d| d.name), Some("Drive max current"));
        assert_eq!(find(P_NV_MODIFIED).map(|d| d.id), Some(P_NV_MODIFIED));
        assert_eq!(find(781).map(|d| d.id), Some(781));
        assert!(find(116).is_none());
        assert!(find(384).is_none());
        assert!(find(782).is_none());
    }

    #[test]
    fn test_placeholders() {
        for id in [44u16, 101, 103, 303, 316, 355, 515, 547, 777] {
            assert!(find(id).map_or(false, |d| d.is_placeholder()), "id {}", id);
        }
        assert!(!find(P_FW_VERSION).map_or(true, |d| d.is_placeholder()));
    }

    #[test]
    fn test_wide_rows_are_blocks() {
        for id in [P_ALERT_REG, P_STATUS_RT_REG, P_WARN_REG, 19, P_USER_DESC] {
            let desc = find(id).unwrap();
            assert!(desc.size > 0);
            assert!(desc.converter.is_none());
        }
        assert!(!find(P_ALERT_REG).unwrap().is_numeric());
        assert!(find(83).unwrap().is_numeric());
    }

    #[test]
    fn test_no_converter_depends_on_itself() {
        fn reaches(target: u16, id: u16, depth: usize) -> bool {
            if depth > 8 {
                return true;
            }
            let Some(kind) = find(id).and_then(|d| d.converter) else {
                return false;
            };
            kind.aux_params()
                .iter()
                .any(|&aux| aux == target || reaches(target, aux, depth + 1))
        }
        for bank in BANKS.iter() {
            for desc in bank.iter() {
                assert!(!reaches(desc.id, desc.id, 0), "cycle through {}", desc.id);
            }
        }
    }

    #[test]
    fn test_hw_locked_rows() {
        let locked: Vec<u16> = BANKS
            .iter()
            .flat_map(|b| b.iter())
            .filter(|d| d.hw_locked)
            .map(|d| d.id)
            .collect();
        assert_eq!(locked, vec![53, 310, 311, 312, 313, 314, 321, 322]);
    }
}
