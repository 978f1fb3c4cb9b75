//! Protocol constants for ClearPath-SC parameter access.
//!
//! This module defines the parameter ids the library reaches for by name,
//! command codes for the non-parameter operations, firmware milestones that
//! gate descriptors, and the fixed-point constants shared by the converters.

// --- Parameter ids --------------------------------------------------------

/// Device id (type in the high byte, model in the low byte)
pub const P_DEVICE_ID: u16 = 0;

/// Firmware version
pub const P_FW_VERSION: u16 = 1;

/// Hardware revision
pub const P_HW_VERSION: u16 = 2;

/// Option register (vector lock, product family)
pub const P_OPTION_REG: u16 = 5;

/// Sample period in microseconds
pub const P_SAMPLE_PERIOD: u16 = 8;

/// Alert register (96 bits)
pub const P_ALERT_REG: u16 = 9;

/// Accumulated status register (clears on read)
pub const P_STATUS_ACCUM_REG: u16 = 13;

/// Attention rising-edge status register
pub const P_STATUS_RISE_REG: u16 = 14;

/// Realtime status register
pub const P_STATUS_RT_REG: u16 = 16;

/// Falling-edge status register
pub const P_STATUS_FALL_REG: u16 = 22;

/// Hardware configuration register
pub const P_HW_CONFIG_REG: u16 = 23;

/// Application configuration register
pub const P_APP_CONFIG_REG: u16 = 24;

/// Warning register (96 bits)
pub const P_WARN_REG: u16 = 26;

/// Application channel network error counters, cleared on read at setup
pub const P_NETERR_APP: [u16; 4] = [36, 37, 38, 39];

/// User output register
pub const P_USER_OUT_REG: u16 = 50;

/// ADC full scale in amperes
pub const P_ADC_MAX: u16 = 256;

/// Drive maximum current in amperes
pub const P_I_MAX: u16 = 257;

/// Bus voltage full scale
pub const P_FS_BUS_VOLTS: u16 = 266;

/// Fast RMS limit
pub const P_RMS_LIM: u16 = 270;

/// Slow RMS limit
pub const P_RMS_SLOW_LIM: u16 = 275;

/// Nonvolatile "modified" flag
pub const P_NV_MODIFIED: u16 = 281;

/// Encoder density (counts per revolution)
pub const P_ENC_DENS: u16 = 310;

/// Motor pole count
pub const P_MTR_POLES: u16 = 311;

/// Motor winding resistance
pub const P_MTR_OHMS: u16 = 313;

/// Command counts per revolution
pub const P_CMD_CNTS_PER_REV: u16 = 320;

/// Drive set-flags register
pub const P_SET_FLAGS: u16 = 375;

/// First of the user description chunks
pub const P_USER_DESC: u16 = 540;

// --- Sizes ----------------------------------------------------------------

/// Number of user description chunks
pub const USER_DESC_CHUNKS: u16 = 5;

/// Bytes per user description chunk
pub const USER_DESC_CHUNK_SIZE: usize = 13;

/// Part number block size
pub const PART_NUMBER_SIZE: u8 = 32;

/// User nonvolatile scratch block size
pub const USER_NV_SIZE: u8 = 13;

/// Attention mask size (covers the status register)
pub const ATTN_MASK_OCTETS: u8 = 6;

/// Motor file name length on the wire
pub const MOTOR_FILE_NAME_SIZE: usize = 25;

/// Largest value treated as an integer; wider descriptors are opaque blocks
pub const MAX_NUMERIC_SIZE: usize = 8;

// --- Commands -------------------------------------------------------------

/// Get/set motor file name
pub const CMD_MOTOR_FILE: u8 = 0x23;

/// Get/set monitor port channel 0
pub const CMD_GET_SET_MONITOR: u8 = 0x1A;

/// Get/set monitor port channel 1
pub const CMD_GET_SET_MONITOR1: u8 = 0x1B;

/// Get/set stimulus generator
pub const CMD_GET_SET_STIMULUS: u8 = 0x1C;

/// Restart the vector search
pub const CMD_RE_VECTOR: u8 = 0x2C;

/// Offset the position number space
pub const CMD_ADD_POSN: u8 = 0x2D;

/// Set-flags value that starts the homing sequencer
pub const SET_FLAGS_SEND_HOME: f64 = 4.0;

/// Stimulus response length
pub const STIM_RESP_OCTETS: usize = 14;

/// Stimulus set payload for basic modes
pub const STIM_CMD_OCTETS: usize = 8;

/// Stimulus set payload for profiled move modes
pub const STIM_CMD_PROF_OCTETS: usize = 12;

/// Monitor set payload
pub const MON_CMD_OCTETS: usize = 9;

// --- Node identity --------------------------------------------------------

/// Unknown device
pub const DEVICE_TYPE_UNKNOWN: u8 = 0;

/// ClearPath-SC
pub const DEVICE_TYPE_CS: u8 = 4;

/// ClearPath-SC general-purpose variant
pub const DEVICE_TYPE_GS: u8 = 5;

/// ClearPath-SC EtherPath variant
pub const DEVICE_TYPE_EP: u8 = 6;

/// Hardware revision from which hardware-locked descriptors become factory-only
pub const HW_REV_2: u16 = 0x0200;

// --- Firmware milestones ----------------------------------------------------

/// Present on every firmware
pub const FW_MILESTONE_ALL_VERS: u16 = 0;

/// Enhanced jerk (RAS) handling, raw code passes through
pub const FW_MILESTONE_RAS_ENHANCED: u16 = 0x1400;

/// Index capture and bus current parameters
pub const FW_MILESTONE_INDEX_IB: u16 = 0x1420;

/// Dual (fast/slow) RMS protection
pub const FW_MILESTONE_DUAL_RMS: u16 = 0x1440;

/// Alert accumulator and power status registers
pub const FW_MILESTONE_SC_HAS_AC_REG: u16 = 0x1460;

/// Peak bus current
pub const FW_MILESTONE_SC_HAS_IBPEAK: u16 = 0x1470;

/// Move option register
pub const FW_MILESTONE_SC_MOVE_OPTIONS: u16 = 0x1480;

/// Bus voltage adjust
pub const FW_MILESTONE_SC_VBUS_ADJ: u16 = 0x1500;

/// Regeneration control
pub const FW_MILESTONE_AC_GREEN: u16 = 0x1510;

/// AC loss timing
pub const FW_MILESTONE_CL_MIN_VOLT: u16 = 0x1520;

/// Low power bus threshold
pub const FW_MILESTONE_SC_HAS_LPB: u16 = 0x1530;

/// Minimum operating voltage
pub const FW_MILESTONE_SC_MIN_VOLT: u16 = 0x1540;

/// User temperature limit
pub const FW_MILESTONE_SC_USER_TEMP: u16 = 0x1550;

/// ClearPath 2.0 feature set (second monitor channel, bank 3)
pub const FW_MILESTONE_2R0: u16 = 0x2000;

// --- Fixed point ----------------------------------------------------------

/// Largest 1.15 fraction
pub const Q15_MAX: f64 = 32767.0 / 32768.0;

/// Fraction bits of the monitor gain (16.16)
pub const MON_GAIN_Q: u32 = 16;

/// Monitor gain format (16.16)
pub const MON_SCALE: f64 = (1u32 << MON_GAIN_Q) as f64;

/// Monitor velocity full scale (quads per sample time)
pub const MON_MAX_VEL: f64 = 8192.0;

/// Monitor position error full scale
pub const MON_MAX_POS: f64 = 32768.0;

/// Monitor measured/commanded position full scale
pub const MON_MAX_POS_MEAS: f64 = (1u32 << 20) as f64;

/// Monitor integrator full scale
pub const MON_MAX_INTG: f64 = 2147483648.0;

/// Monitor feedback-generator rate full scale
pub const MON_FG_RATE_MAX: f64 = 100000.0;

/// Test point option bits (stripped before selecting a scaling)
pub const MON_OPTION_MASKS: u16 = 0xFF00;

/// Test point option bit requesting the setting be saved to NV
pub const MON_SAVE_NV_MASK: u16 = 0x8000;

/// Smallest gain treated as non-zero
pub const MON_MIN_GAIN: f64 = 0.0001;

/// RMS level reference (Q28)
pub const RMS_LEVEL_SCALE: f64 = 268435456.0;

/// 16-bit RMS limit format
pub const RMS_LIMIT_SCALE: f64 = 4096.0;

/// 32-bit RMS limit format
pub const RMS_LIMIT32_SCALE: f64 = 268435456.0;

/// RMS limit saturation as a fraction of ADC full scale
pub const RMS_LIMIT_SAT: f64 = 0.9999;

/// Fraction bits of the RMS filter coefficient
pub const RMS_TC_Q: u32 = 23;

/// RMS filter coefficient format (Q23)
pub const RMS_TC_SCALE: f64 = (1u32 << RMS_TC_Q) as f64;

/// Slow RMS time constants are minutes in Q8
pub const RMS_SLOW_TC_Q: u32 = 8;

/// Extra fraction bits of the slow IB RMS time constant
pub const IB_RMS_SLOW_TC_Q: u32 = 7;

/// Fraction of the step remaining after one time constant in the RMS model
pub const RMS_TC_DECAY: f64 = 8.0 / 9.0;

/// Smallest time constant accepted by the RMS filters
pub const RMS_TC_MIN: f64 = 0.01;

/// Largest RMS filter coefficient
pub const RMS_TC_MAX_BITS: f64 = 32767.0;

/// Fraction bits of the filter coefficient
pub const FILT_Q: u32 = 15;

/// Filter coefficient full scale
pub const FILT_SCALE: f64 = (1u32 << FILT_Q) as f64;

/// Largest filter coefficient
pub const FILT_MAX_BITS: f64 = 32767.0;

/// Residual after the 99% settling time
pub const FILT_99PCT_TRIP: f64 = 0.01;

/// Residual after one time constant (1/e)
pub const FILT_1TC_TRIP: f64 = 0.367879;

/// Magnitude limit for the feed-forward tuning gains
pub const LIMIT_2_TO_27: f64 = (1u32 << 27) as f64;

// --- Jerk (RAS) codes ------------------------------------------------------

/// Jerk limiting off
pub const RAS_OFF: u32 = 0;
/// 3 ms smoothing
pub const RAS_3MS: u32 = 1;
/// 5 ms smoothing
pub const RAS_5MS: u32 = 2;
/// 9 ms smoothing
pub const RAS_9MS: u32 = 3;
/// 15 ms smoothing
pub const RAS_15MS: u32 = 4;
/// 24 ms smoothing
pub const RAS_24MS: u32 = 5;
/// 44 ms smoothing
pub const RAS_44MS: u32 = 6;

// --- Option register ------------------------------------------------------

/// Vector lock: commutation angle reported with a 90 degree offset
pub const OPTION_VECTOR_LOCK: u32 = 1 << 10;

/// Product family field position
pub const OPTION_PRODUCT_SHIFT: u32 = 24;

/// Product family field width mask
pub const OPTION_PRODUCT_MASK: u32 = 0x0F;

/// Product family code of the K-drive
pub const PRODUCT_K_DRIVE: u32 = 1;
