//! Bidirectional unit converters.
//!
//! Every converter is a pure numeric transform between the drive's internal
//! representation (after the descriptor's fixed-point scale has been applied)
//! and engineering units. A converter that needs other parameters of the same
//! node declares their ids through [`ConverterKind::aux_params`]; the caller
//! resolves those values into an [`Aux`] before calling [`apply`], so nothing
//! in here touches the transport.
//!
//! Degenerate inputs (a zero denominator, an auxiliary value that could not be
//! read, an out-of-domain logarithm) make the transform return `None`
//! internally. [`apply`] turns that into `0.0`, which is what callers see.
//!
//! The monitor gain converter is the only one with a side effect: it reports
//! the monitor full scale it computed as a [`MonitorStateUpdate`] in the
//! returned [`Conversion`].

use crate::constants::*;
use crate::scale::from_q;
use crate::types::{MonitorStateUpdate, OptionReg, TestPoint};
use log::warn;

/// Which way a value is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Drive bits to engineering units
    Decode,
    /// Engineering units to drive bits
    Encode,
}

/// Closed set of converters referenced by the descriptor tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConverterKind {
    AdcMax,
    Amperes,
    AmpsRms,
    DHeatFact,
    MeasAmperes,
    MeasVolts,
    MonGain(TestPoint),
    RmsLevel,
    RmsLevelSlow,
    CheckPosnLimit,
    RmsLimit,
    RmsLimit32,
    RmsFactor,
    RmsTc,
    RmsSlowTc,
    IbRmsTc,
    IbRmsSlowTc,
    Angle,
    SpdLim,
    Filt99pct,
    Filt1Tc,
    VectorFilt99pct,
    Jerk,
    TimeMs,
    Vel,
    Acc,
    Limit2To27,
}

const AUX_I_MAX: &[u16] = &[P_I_MAX];
const AUX_ADC_MAX: &[u16] = &[P_ADC_MAX];
const AUX_SAMPLE: &[u16] = &[P_SAMPLE_PERIOD];
const AUX_MON_GAIN: &[u16] = &[
    P_I_MAX,
    P_ADC_MAX,
    P_CMD_CNTS_PER_REV,
    P_ENC_DENS,
    P_SAMPLE_PERIOD,
];
const AUX_MON_GAIN_BUS: &[u16] = &[
    P_I_MAX,
    P_ADC_MAX,
    P_CMD_CNTS_PER_REV,
    P_ENC_DENS,
    P_SAMPLE_PERIOD,
    P_FS_BUS_VOLTS,
];

impl ConverterKind {
    /// Ids of the other parameters this converter reads
    pub fn aux_params(&self) -> &'static [u16] {
        match self {
            ConverterKind::AdcMax | ConverterKind::Amperes => AUX_I_MAX,
            ConverterKind::AmpsRms
            | ConverterKind::MeasAmperes
            | ConverterKind::RmsLimit
            | ConverterKind::RmsLimit32 => AUX_ADC_MAX,
            ConverterKind::DHeatFact => &[P_I_MAX, P_MTR_OHMS],
            ConverterKind::MeasVolts => &[P_FS_BUS_VOLTS],
            ConverterKind::MonGain(tp) if tp.base() == TestPoint::BUS_VOLTS => AUX_MON_GAIN_BUS,
            ConverterKind::MonGain(_) => AUX_MON_GAIN,
            ConverterKind::RmsLevel => &[P_ADC_MAX, P_RMS_LIM],
            ConverterKind::RmsLevelSlow => &[P_ADC_MAX, P_RMS_SLOW_LIM],
            ConverterKind::CheckPosnLimit => &[P_FW_VERSION],
            ConverterKind::RmsFactor | ConverterKind::Limit2To27 => &[],
            ConverterKind::RmsTc
            | ConverterKind::RmsSlowTc
            | ConverterKind::IbRmsTc
            | ConverterKind::IbRmsSlowTc
            | ConverterKind::Filt99pct
            | ConverterKind::Filt1Tc
            | ConverterKind::VectorFilt99pct
            | ConverterKind::TimeMs
            | ConverterKind::Vel
            | ConverterKind::Acc => AUX_SAMPLE,
            ConverterKind::Angle => &[P_MTR_POLES, P_ENC_DENS, P_HW_CONFIG_REG, P_OPTION_REG],
            ConverterKind::SpdLim => &[P_SAMPLE_PERIOD, P_ENC_DENS, P_CMD_CNTS_PER_REV],
            ConverterKind::Jerk => &[P_SAMPLE_PERIOD, P_FW_VERSION, P_OPTION_REG],
        }
    }
}

/// Resolved auxiliary parameter values; `None` marks a failed read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aux {
    values: Vec<(u16, Option<f64>)>,
}

impl Aux {
    /// No values resolved
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every auxiliary parameter of `kind` through `read`
    pub fn resolve(kind: ConverterKind, mut read: impl FnMut(u16) -> Option<f64>) -> Self {
        let mut aux = Aux::new();
        for &id in kind.aux_params() {
            let value = read(id);
            aux.insert(id, value);
        }
        aux
    }

    /// Builder form of [`Aux::insert`] for a known value
    pub fn with(mut self, id: u16, value: f64) -> Self {
        self.insert(id, Some(value));
        self
    }

    /// Record the value of `id`, `None` for a failed read
    pub fn insert(&mut self, id: u16, value: Option<f64>) {
        match self.values.iter_mut().find(|(k, _)| *k == id) {
            Some(slot) => slot.1 = value,
            None => self.values.push((id, value)),
        }
    }

    /// Value of `id` if it was read successfully
    pub fn get(&self, id: u16) -> Option<f64> {
        self.values
            .iter()
            .find(|(k, _)| *k == id)
            .and_then(|(_, v)| *v)
    }

    fn positive(&self, id: u16) -> Option<f64> {
        self.get(id).filter(|v| *v > 0.0)
    }
}

/// Result of one converter call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    /// Present only for the monitor gain converter
    pub monitor: Option<MonitorStateUpdate>,
}

/// Run `kind` in `direction` on `value`. Never fails; a degenerate
/// conversion yields `0.0`.
pub fn apply(kind: ConverterKind, direction: Direction, aux: &Aux, value: f64) -> Conversion {
    let (result, monitor) = match kind {
        ConverterKind::MonGain(test_point) => {
            let (result, update) = mon_gain(direction, test_point, aux, value);
            (result, Some(update))
        }
        _ => (transform(kind, direction, aux, value), None),
    };
    let value = result.unwrap_or_else(|| {
        warn!("{:?} {:?} of {} is degenerate, using 0", kind, direction, value);
        0.0
    });
    Conversion { value, monitor }
}

/// Pure transform for every converter except the monitor gain
pub fn transform(kind: ConverterKind, direction: Direction, aux: &Aux, x: f64) -> Option<f64> {
    use Direction::*;
    match kind {
        ConverterKind::AdcMax => {
            let i_max = aux.get(P_I_MAX)?;
            if x == 0.0 {
                return None;
            }
            Some(i_max / x)
        }
        ConverterKind::Amperes => {
            let i_max = aux.positive(P_I_MAX)?;
            match direction {
                Decode => Some(x * i_max),
                Encode => Some((x / i_max).min(Q15_MAX)),
            }
        }
        ConverterKind::AmpsRms => {
            let adc_max = aux.positive(P_ADC_MAX)?;
            match direction {
                Decode => Some(x.max(0.0).sqrt() * adc_max),
                Encode => Some((x / adc_max).powi(2)),
            }
        }
        ConverterKind::DHeatFact => {
            let i_max = aux.positive(P_I_MAX)?;
            let ohms = aux.positive(P_MTR_OHMS)?;
            let k = 0.75 * ohms;
            match direction {
                Decode if x < 0.0 => None,
                Decode => Some((x / k).sqrt() / i_max),
                Encode => Some((x * i_max).powi(2) * k),
            }
        }
        ConverterKind::MeasAmperes => full_scale(direction, aux.positive(P_ADC_MAX)?, x),
        ConverterKind::MeasVolts => full_scale(direction, aux.positive(P_FS_BUS_VOLTS)?, x),
        ConverterKind::MonGain(test_point) => mon_gain(direction, test_point, aux, x).0,
        ConverterKind::RmsLevel => rms_level(direction, aux, P_RMS_LIM, x),
        ConverterKind::RmsLevelSlow => rms_level(direction, aux, P_RMS_SLOW_LIM, x),
        ConverterKind::CheckPosnLimit => {
            let fw = aux.get(P_FW_VERSION)?;
            if fw < FW_MILESTONE_DUAL_RMS as f64 && x > i16::MAX as f64 {
                Some(i16::MAX as f64)
            } else {
                Some(x)
            }
        }
        ConverterKind::RmsLimit => rms_limit(direction, aux, RMS_LIMIT_SCALE, x),
        ConverterKind::RmsLimit32 => rms_limit(direction, aux, RMS_LIMIT32_SCALE, x),
        ConverterKind::RmsFactor => {
            if x <= 0.0 {
                return Some(0.0);
            }
            match direction {
                Decode => Some(x.sqrt()),
                Encode => Some(x * x),
            }
        }
        ConverterKind::RmsTc => {
            let st = aux.positive(P_SAMPLE_PERIOD)? * 1e-6;
            match direction {
                Decode => rms_tc_decode(st, x),
                Encode => Some(rms_tc_encode(st, x).round_clamped()),
            }
        }
        ConverterKind::RmsSlowTc => {
            let st = aux.positive(P_SAMPLE_PERIOD)? * 1e-6;
            match direction {
                Decode => rms_tc_decode(st, x).map(|t| t / from_q(60.0, RMS_SLOW_TC_Q)),
                Encode => {
                    let tau = from_q(x * 60.0, RMS_SLOW_TC_Q);
                    Some(rms_tc_encode(st, tau).round_clamped())
                }
            }
        }
        ConverterKind::IbRmsTc => {
            let st = aux.positive(P_SAMPLE_PERIOD)? * 1e-6 / 4.0;
            match direction {
                Decode => Some(ib_rms_tc_decode(st, x, 0)),
                Encode => Some(ib_rms_tc_encode(st, x)),
            }
        }
        ConverterKind::IbRmsSlowTc => {
            let st = aux.positive(P_SAMPLE_PERIOD)? * 1e-6 / 4.0;
            match direction {
                Decode => Some(ib_rms_tc_decode(st, x, IB_RMS_SLOW_TC_Q)),
                Encode => Some(ib_rms_tc_encode(st, from_q(x, IB_RMS_SLOW_TC_Q))),
            }
        }
        ConverterKind::Angle => angle(direction, aux, x),
        ConverterKind::SpdLim => {
            let sample_us = aux.positive(P_SAMPLE_PERIOD)?;
            let enc_dens = aux.get(P_ENC_DENS)?;
            let user_dens = aux.get(P_CMD_CNTS_PER_REV)?;
            match direction {
                Decode if enc_dens == 0.0 => None,
                Decode => Some(1e6 * x * user_dens / (enc_dens * sample_us)),
                Encode if user_dens == 0.0 => None,
                Encode => Some(1e-6 * x * sample_us * enc_dens / user_dens),
            }
        }
        ConverterKind::Filt99pct => filt(direction, aux, FILT_99PCT_TRIP, x),
        ConverterKind::Filt1Tc => filt(direction, aux, FILT_1TC_TRIP, x),
        ConverterKind::VectorFilt99pct => match direction {
            Decode => filt(Decode, aux, FILT_99PCT_TRIP, x).map(|ms| ms / 4.0),
            Encode => filt(Encode, aux, FILT_99PCT_TRIP, x * 4.0),
        },
        ConverterKind::Jerk => jerk(direction, aux, x),
        ConverterKind::TimeMs => {
            let sample_us = aux.positive(P_SAMPLE_PERIOD)?;
            match direction {
                Decode => Some(x * sample_us / 1000.0),
                Encode => Some(x * 1000.0 / sample_us),
            }
        }
        ConverterKind::Vel => {
            let sample_us = aux.positive(P_SAMPLE_PERIOD)?;
            match direction {
                Decode => Some(x * 1e6 / sample_us),
                Encode => Some(x * sample_us / 1e6),
            }
        }
        ConverterKind::Acc => {
            let sample_us = aux.positive(P_SAMPLE_PERIOD)?;
            match direction {
                Decode => Some(x * 1e12 / (sample_us * sample_us)),
                Encode => Some(x * sample_us * sample_us / 1e12),
            }
        }
        ConverterKind::Limit2To27 => match direction {
            Decode => Some(x),
            Encode => Some(x.clamp(-LIMIT_2_TO_27, LIMIT_2_TO_27)),
        },
    }
}

/// Linear scaling by a measured full scale, clamped to the largest 1.15 fraction
fn full_scale(direction: Direction, fs: f64, x: f64) -> Option<f64> {
    match direction {
        Direction::Decode => Some(x * fs),
        Direction::Encode => Some((x / fs).min(Q15_MAX)),
    }
}

fn rms_level(direction: Direction, aux: &Aux, limit_id: u16, x: f64) -> Option<f64> {
    // Display-only: there are no bits to produce
    if direction == Direction::Encode {
        return None;
    }
    let adc_max = aux.get(P_ADC_MAX).filter(|v| *v != 0.0)?;
    let limit = aux.get(limit_id).filter(|v| *v != 0.0)?;
    if !(0.0..=i32::MAX as f64).contains(&x) {
        return None;
    }
    let level = (100.0 * (x / RMS_LEVEL_SCALE).sqrt() * adc_max / limit + 0.5).trunc();
    Some(level.clamp(0.0, 100.0))
}

fn rms_limit(direction: Direction, aux: &Aux, c: f64, x: f64) -> Option<f64> {
    let adc_max = aux.positive(P_ADC_MAX)?;
    if x <= 0.0 {
        return Some(0.0);
    }
    match direction {
        Direction::Decode => Some((x * adc_max * adc_max / c).sqrt()),
        Direction::Encode if x > adc_max => Some((c * RMS_LIMIT_SAT * RMS_LIMIT_SAT).trunc()),
        Direction::Encode => Some((c * (x / adc_max).powi(2) + 0.5).trunc()),
    }
}

/// Time constant of the single-pole RMS filter with coefficient `x / 2^23`
fn rms_tc_decode(st: f64, x: f64) -> Option<f64> {
    let b = 1.0 - from_q(x, RMS_TC_Q);
    if b <= 0.0 || b >= 1.0 {
        return None;
    }
    Some(RMS_TC_DECAY.ln() / (b.ln() / st))
}

/// Unrounded filter coefficient for time constant `tau` (floored at 10 ms)
fn rms_tc_encode(st: f64, tau: f64) -> f64 {
    let tau = tau.max(RMS_TC_MIN);
    let b = 1.0 - RMS_TC_DECAY.powf(st / tau);
    b * RMS_TC_SCALE
}

/// Time constant scaled up by `2^q`, then floored at 10 ms. A coefficient
/// outside the filter's range reads as the floor.
fn ib_rms_tc_decode(st: f64, x: f64, q: u32) -> f64 {
    let tau = rms_tc_decode(st, x).unwrap_or(0.0);
    (tau * f64::from(1u32 << q)).max(RMS_TC_MIN)
}

fn ib_rms_tc_encode(st: f64, tau: f64) -> f64 {
    rms_tc_encode(st, tau).trunc().min(RMS_TC_MAX_BITS)
}

trait RoundClamped {
    fn round_clamped(self) -> f64;
}

impl RoundClamped for f64 {
    /// Round half up into `[1, 32767]`
    fn round_clamped(self) -> f64 {
        (self + 0.5).trunc().clamp(1.0, RMS_TC_MAX_BITS)
    }
}

fn angle(direction: Direction, aux: &Aux, x: f64) -> Option<f64> {
    let poles = aux.get(P_MTR_POLES)?;
    let enc_dens = aux.get(P_ENC_DENS)?;
    // Only its readability matters
    aux.get(P_HW_CONFIG_REG)?;
    let options = OptionReg(aux.get(P_OPTION_REG)? as i64 as u32);
    if poles == 0.0 {
        return None;
    }
    let degrees_per_turn = poles * 180.0;
    let ticks_per_degree = enc_dens / degrees_per_turn;
    if ticks_per_degree <= 0.0 {
        return None;
    }
    let offset = if options.vector_lock() { 90.0 } else { 0.0 };
    match direction {
        Direction::Decode => Some((x / ticks_per_degree + offset).rem_euclid(degrees_per_turn)),
        Direction::Encode => {
            let ticks = ((x - offset) * ticks_per_degree)
                .rem_euclid(ticks_per_degree * degrees_per_turn);
            Some((ticks + 0.5).trunc())
        }
    }
}

/// Settling time (ms) of a one-pole filter whose coefficient is `x / 32768`,
/// where `trip` is the residual fraction at that time
fn filt(direction: Direction, aux: &Aux, trip: f64, x: f64) -> Option<f64> {
    let sample_us = aux.positive(P_SAMPLE_PERIOD)?;
    match direction {
        Direction::Decode => {
            if x <= 0.0 || x > FILT_MAX_BITS {
                return None;
            }
            Some(0.001 * sample_us * trip.ln() / from_q(x, FILT_Q).ln())
        }
        Direction::Encode => {
            if x <= 0.0 {
                return None;
            }
            let bits = (FILT_SCALE * trip.powf(0.001 * sample_us / x) + 0.5).trunc();
            Some(bits.min(FILT_MAX_BITS))
        }
    }
}

/// Legacy RAS codes and the smoothing time each one selects
const RAS_TABLE: [(u32, f64); 7] = [
    (RAS_OFF, 0.0),
    (RAS_3MS, 3.0),
    (RAS_5MS, 5.0),
    (RAS_9MS, 9.0),
    (RAS_15MS, 15.0),
    (RAS_24MS, 24.0),
    (RAS_44MS, 44.0),
];

/// Upper bounds (exclusive) of the millisecond bands that select each code
const RAS_BANDS: [(f64, u32); 6] = [
    (1.5, RAS_OFF),
    (4.0, RAS_3MS),
    (7.0, RAS_5MS),
    (12.0, RAS_9MS),
    (19.5, RAS_15MS),
    (34.0, RAS_24MS),
];

fn jerk(direction: Direction, aux: &Aux, x: f64) -> Option<f64> {
    aux.get(P_SAMPLE_PERIOD)?;
    let fw = aux.get(P_FW_VERSION)?;
    if fw >= FW_MILESTONE_RAS_ENHANCED as f64 {
        return Some(x);
    }
    let k_drive = OptionReg(aux.get(P_OPTION_REG)? as i64 as u32).is_k_drive();
    match direction {
        Direction::Decode => {
            let mut code = x.max(0.0) as u32;
            if k_drive && code > RAS_9MS {
                code = RAS_9MS;
            }
            let ms = RAS_TABLE
                .iter()
                .find(|(c, _)| *c == code)
                .map_or(0.0, |(_, ms)| *ms);
            Some(ms)
        }
        Direction::Encode => {
            let ms = if k_drive { x.min(9.0) } else { x };
            let code = RAS_BANDS
                .iter()
                .find(|(limit, _)| ms < *limit)
                .map_or(RAS_44MS, |(_, code)| *code);
            Some(code as f64)
        }
    }
}

/// Full scale of test point `test_point` for a monitor gain `gain`.
/// The same expression maps both ways since it is its own inverse.
fn mon_full_scale(test_point: TestPoint, aux: &Aux, gain: f64, clamp_posn: bool) -> Option<f64> {
    let i_max = aux.positive(P_I_MAX)?;
    let adc_max = aux.positive(P_ADC_MAX)?;
    let cmd_res = aux.get(P_CMD_CNTS_PER_REV)?;
    let enc_res = aux.get(P_ENC_DENS)?;
    let res_scale = if cmd_res > 0.0 && enc_res > 0.0 {
        enc_res / cmd_res
    } else {
        1.0
    };
    let st = aux.get(P_SAMPLE_PERIOD)?;
    if st.abs() < 0.001 || gain.abs() < MON_MIN_GAIN {
        return None;
    }
    let x = gain;
    let base = match test_point.base() {
        TestPoint::VEL_MEAS
        | TestPoint::VEL_CMD
        | TestPoint::VEL_TRK
        | TestPoint::VEL_TRK_SERVO
        | TestPoint::VEL_RAS
        | TestPoint::VEL_ERR_GATED => 1e3 * MON_MAX_VEL / (st * x * res_scale),
        TestPoint::VEL_STEP => 4e3 * MON_MAX_VEL / (st * x * res_scale),
        TestPoint::JRK_CMD => 1e12 * MON_MAX_VEL / (st.powi(3) * x * res_scale),
        TestPoint::ACC_CMD => 1e6 * MON_MAX_VEL / (st * st * x * res_scale),
        TestPoint::POSN_TRK
        | TestPoint::POSN_DIR_TRK
        | TestPoint::TRK_LD
        | TestPoint::POSN_DIR_TRK_MTR
        | TestPoint::POSN_TRK_MTR
        | TestPoint::COUPLING => MON_MAX_POS / (x * res_scale),
        TestPoint::SINE_R | TestPoint::COS_R => 200.0 / x,
        TestPoint::TRQ_MEAS
        | TestPoint::TRQ_MEAS_PEAK
        | TestPoint::TRQ_D_MEAS
        | TestPoint::TRQ_TRK
        | TestPoint::TRQ_TRK_PEAK => (100.0 * adc_max / i_max) / x,
        TestPoint::POSN_MEAS | TestPoint::POSN_CMD => {
            let x = if clamp_posn {
                x.min(MON_MAX_POS_MEAS / res_scale * 2.0)
            } else {
                x
            };
            MON_MAX_POS_MEAS / (x * res_scale)
        }
        TestPoint::FG_RATE => MON_FG_RATE_MAX / x,
        TestPoint::INTEGRATOR => MON_MAX_INTG / x,
        TestPoint::SGN_CMD_VEL | TestPoint::SGN_CMD_STEP => 100.0 / x,
        TestPoint::BUS_VOLTS => aux.get(P_FS_BUS_VOLTS)? / x,
        // Torque command, calibrate and anything unnamed
        _ => 100.0 / x,
    };
    Some(base)
}

/// Monitor gain conversion. Decoding takes the 16.16 gain and yields the
/// engineering full scale; encoding takes a full scale and yields 16.16 bits
/// clamped to `[1, i32::MAX]`.
fn mon_gain(
    direction: Direction,
    test_point: TestPoint,
    aux: &Aux,
    x: f64,
) -> (Option<f64>, MonitorStateUpdate) {
    let mut update = MonitorStateUpdate {
        test_point,
        full_scale: 0.0,
        valid: false,
    };
    let result = match direction {
        Direction::Decode => {
            let gain = from_q(x, MON_GAIN_Q);
            mon_full_scale(test_point, aux, gain, false).map(|fs| {
                update.full_scale = fs;
                update.valid = true;
                fs
            })
        }
        Direction::Encode => mon_full_scale(test_point, aux, x, true).map(|base| {
            let bits = (base * MON_SCALE).clamp(1.0, i32::MAX as f64);
            if let Some(fs) = mon_full_scale(test_point, aux, from_q(bits, MON_GAIN_Q), false) {
                update.full_scale = fs;
                update.valid = true;
            }
            bits
        }),
    };
    (result, update)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_US: f64 = 50.0;

    fn drive_aux() -> Aux {
        Aux::new()
            .with(P_I_MAX, 20.0)
            .with(P_ADC_MAX, 25.0)
            .with(P_SAMPLE_PERIOD, SAMPLE_US)
            .with(P_ENC_DENS, 4000.0)
            .with(P_CMD_CNTS_PER_REV, 800.0)
            .with(P_MTR_POLES, 8.0)
            .with(P_MTR_OHMS, 1.5)
            .with(P_FS_BUS_VOLTS, 100.0)
            .with(P_RMS_LIM, 10.0)
            .with(P_RMS_SLOW_LIM, 8.0)
            .with(P_HW_CONFIG_REG, 0.0)
            .with(P_OPTION_REG, 0.0)
            .with(P_FW_VERSION, FW_MILESTONE_2R0 as f64)
    }

    fn decode(kind: ConverterKind, aux: &Aux, x: f64) -> f64 {
        apply(kind, Direction::Decode, aux, x).value
    }

    fn encode(kind: ConverterKind, aux: &Aux, x: f64) -> f64 {
        apply(kind, Direction::Encode, aux, x).value
    }

    /// Evenly spaced points from `lo` to `hi` inclusive
    fn span(lo: f64, hi: f64) -> impl Iterator<Item = f64> {
        const POINTS: u32 = 200;
        (0..=POINTS).map(move |i| lo + (hi - lo) * f64::from(i) / f64::from(POINTS))
    }

    /// Encode `x`, quantize to `scale` counts per unit and decode again.
    /// The result must land within the wider of the two neighbouring steps.
    fn assert_round_trip(kind: ConverterKind, aux: &Aux, scale: f64, x: f64) {
        let bits = (encode(kind, aux, x) * scale).round();
        let back = decode(kind, aux, bits / scale);
        let up = (decode(kind, aux, (bits + 1.0) / scale) - back).abs();
        let down = (back - decode(kind, aux, (bits - 1.0) / scale)).abs();
        let step = up.max(down) + 1e-9 * x.abs().max(1.0);
        assert!(
            (back - x).abs() <= step,
            "{:?}: {} -> {} -> {} (step {})",
            kind,
            x,
            bits,
            back,
            step
        );
    }

    #[test]
    fn test_amperes_round_trip_and_clamp() {
        let aux = drive_aux();
        let bits = encode(ConverterKind::Amperes, &aux, 5.0);
        assert!((bits - 0.25).abs() < 1e-12);
        assert!((decode(ConverterKind::Amperes, &aux, bits) - 5.0).abs() < 1e-9);
        // Above the drive maximum saturates at the 1.15 maximum
        assert_eq!(encode(ConverterKind::Amperes, &aux, 50.0), Q15_MAX);
        assert_eq!(
            crate::scale::encode_bits(Q15_MAX, 32768.0, 2, crate::Signedness::Signed),
            32767
        );
    }

    #[test]
    fn test_amps_rms_round_trip() {
        let aux = drive_aux();
        let bits = encode(ConverterKind::AmpsRms, &aux, 12.5);
        assert!((bits - 0.25).abs() < 1e-12);
        assert!((decode(ConverterKind::AmpsRms, &aux, bits) - 12.5).abs() < 1e-9);
        // Negative squares read as zero current
        assert_eq!(decode(ConverterKind::AmpsRms, &aux, -1.0), 0.0);
    }

    #[test]
    fn test_adc_max_is_reciprocal_of_imax_ratio() {
        let aux = drive_aux();
        assert_eq!(decode(ConverterKind::AdcMax, &aux, 0.8), 25.0);
        assert_eq!(encode(ConverterKind::AdcMax, &aux, 25.0), 0.8);
        assert_eq!(decode(ConverterKind::AdcMax, &aux, 0.0), 0.0);
    }

    #[test]
    fn test_dheat_fact_round_trip() {
        let aux = drive_aux();
        let bits = encode(ConverterKind::DHeatFact, &aux, 0.3);
        assert!((bits - (0.3f64 * 20.0).powi(2) * 0.75 * 1.5).abs() < 1e-9);
        assert!((decode(ConverterKind::DHeatFact, &aux, bits) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_meas_volts_clamps_on_encode() {
        let aux = drive_aux();
        assert_eq!(decode(ConverterKind::MeasVolts, &aux, 0.5), 50.0);
        assert_eq!(encode(ConverterKind::MeasVolts, &aux, 50.0), 0.5);
        assert_eq!(encode(ConverterKind::MeasVolts, &aux, 150.0), Q15_MAX);
        assert_eq!(encode(ConverterKind::MeasAmperes, &aux, 30.0), Q15_MAX);
    }

    #[test]
    fn test_rms_level_percent_of_limit() {
        let aux = drive_aux();
        // sqrt(x / 2^28) = 0.2 -> 0.2 * 25 / 10 = 50%
        let x = 0.04 * RMS_LEVEL_SCALE;
        assert_eq!(decode(ConverterKind::RmsLevel, &aux, x), 50.0);
        assert_eq!(decode(ConverterKind::RmsLevel, &aux, RMS_LEVEL_SCALE), 100.0);
        assert_eq!(decode(ConverterKind::RmsLevel, &aux, -1.0), 0.0);
        // Display only
        assert_eq!(encode(ConverterKind::RmsLevel, &aux, 50.0), 0.0);
        let slow = decode(ConverterKind::RmsLevelSlow, &aux, x);
        assert_eq!(slow, (100.0f64 * 0.2 * 25.0 / 8.0 + 0.5).trunc());
    }

    #[test]
    fn test_rms_level_zero_limit_is_degenerate() {
        let aux = drive_aux().with(P_RMS_LIM, 0.0);
        assert_eq!(decode(ConverterKind::RmsLevel, &aux, 1000.0), 0.0);
    }

    #[test]
    fn test_rms_limit_saturates_at_scale() {
        let aux = drive_aux();
        let sat = (RMS_LIMIT32_SCALE * 0.9999 * 0.9999).trunc();
        assert_eq!(encode(ConverterKind::RmsLimit32, &aux, 30.0), sat);
        assert_eq!(
            encode(ConverterKind::RmsLimit, &aux, 26.0),
            (4096.0f64 * 0.9999 * 0.9999).trunc()
        );
        let bits = encode(ConverterKind::RmsLimit32, &aux, 10.0);
        let amps = decode(ConverterKind::RmsLimit32, &aux, bits);
        assert!((amps - 10.0).abs() < 1e-3);
        assert_eq!(encode(ConverterKind::RmsLimit32, &aux, -1.0), 0.0);
    }

    #[test]
    fn test_rms_factor() {
        let aux = Aux::new();
        assert_eq!(decode(ConverterKind::RmsFactor, &aux, 0.25), 0.5);
        assert_eq!(encode(ConverterKind::RmsFactor, &aux, 0.5), 0.25);
        assert_eq!(decode(ConverterKind::RmsFactor, &aux, -0.25), 0.0);
    }

    #[test]
    fn test_rms_tc_floor_and_round_trip() {
        let aux = drive_aux();
        let bits = encode(ConverterKind::RmsTc, &aux, 0.01);
        let tau = decode(ConverterKind::RmsTc, &aux, bits);
        // One count of coefficient around this operating point
        let step = (decode(ConverterKind::RmsTc, &aux, bits - 1.0) - tau).abs();
        assert!((tau - 0.01).abs() <= step);
        // Below the floor encodes like the floor
        assert_eq!(encode(ConverterKind::RmsTc, &aux, 0.001), bits);
        assert_eq!(encode(ConverterKind::RmsTc, &aux, 0.0), bits);
    }

    #[test]
    fn test_rms_tc_clamps() {
        let aux = drive_aux();
        // Very long time constants still produce at least one count
        assert_eq!(encode(ConverterKind::RmsTc, &aux, 1e9), 1.0);
        let fast = Aux::new().with(P_SAMPLE_PERIOD, 1e6);
        assert_eq!(encode(ConverterKind::RmsTc, &fast, 0.01), RMS_TC_MAX_BITS);
    }

    #[test]
    fn test_rms_slow_tc_round_trip() {
        let aux = drive_aux();
        let bits = encode(ConverterKind::RmsSlowTc, &aux, 2.0);
        let back = decode(ConverterKind::RmsSlowTc, &aux, bits);
        assert!((back - 2.0).abs() / 2.0 < 0.01);
    }

    #[test]
    fn test_ib_rms_tc_truncates_without_lower_clamp() {
        let aux = drive_aux();
        let st = SAMPLE_US * 1e-6 / 4.0;
        let expected = ((1.0 - RMS_TC_DECAY.powf(st / 0.5)) * RMS_TC_SCALE).trunc();
        assert_eq!(encode(ConverterKind::IbRmsTc, &aux, 0.5), expected);
        assert_eq!(encode(ConverterKind::IbRmsTc, &aux, 1e9), 0.0);
        let tau = decode(ConverterKind::IbRmsTc, &aux, expected);
        assert!((tau - 0.5).abs() / 0.5 < 0.01);
        // Decoded time constants never drop under the floor
        assert_eq!(decode(ConverterKind::IbRmsTc, &aux, 32767.0), RMS_TC_MIN);
        let slow = encode(ConverterKind::IbRmsSlowTc, &aux, 64.0);
        assert_eq!(slow, encode(ConverterKind::IbRmsTc, &aux, 0.5));
    }

    #[test]
    fn test_ib_rms_slow_tc_scales_before_flooring() {
        let aux = drive_aux();
        let st = SAMPLE_US * 1e-6 / 4.0;
        // Coefficient of a 5 ms filter, under the floor on its own
        let bits = (1.0 - RMS_TC_DECAY.powf(st / 0.005)) * RMS_TC_SCALE;
        assert_eq!(decode(ConverterKind::IbRmsTc, &aux, bits), RMS_TC_MIN);
        let slow = decode(ConverterKind::IbRmsSlowTc, &aux, bits);
        assert!((slow - 0.005 * 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_ib_rms_tc_out_of_range_reads_as_floor() {
        let aux = drive_aux();
        for kind in [ConverterKind::IbRmsTc, ConverterKind::IbRmsSlowTc] {
            assert_eq!(decode(kind, &aux, 0.0), RMS_TC_MIN);
            assert_eq!(decode(kind, &aux, RMS_TC_SCALE), RMS_TC_MIN);
        }
    }

    #[test]
    fn test_angle_wraps_and_honours_vector_lock() {
        let aux = drive_aux();
        // 8 poles -> 1440 degrees per turn, 4000 ticks per turn
        let ticks = encode(ConverterKind::Angle, &aux, 720.0);
        assert_eq!(ticks, 2000.0);
        assert!((decode(ConverterKind::Angle, &aux, ticks) - 720.0).abs() < 1e-9);
        assert_eq!(encode(ConverterKind::Angle, &aux, -360.0), 3000.0);

        let locked = drive_aux().with(P_OPTION_REG, OPTION_VECTOR_LOCK as f64);
        assert!((decode(ConverterKind::Angle, &locked, 0.0) - 90.0).abs() < 1e-9);
        assert_eq!(encode(ConverterKind::Angle, &locked, 90.0), 0.0);
        // 1400 + 90 wraps past the end of the turn
        let wrapped = decode(ConverterKind::Angle, &locked, 3944.4444444444443);
        assert!(wrapped < 1440.0);
    }

    #[test]
    fn test_angle_zero_poles_is_degenerate() {
        let aux = drive_aux().with(P_MTR_POLES, 0.0);
        assert_eq!(decode(ConverterKind::Angle, &aux, 100.0), 0.0);
    }

    #[test]
    fn test_spd_lim_round_trip() {
        let aux = drive_aux();
        let bits = encode(ConverterKind::SpdLim, &aux, 1000.0);
        assert!((bits - 1e-6 * 1000.0 * 50.0 * 4000.0 / 800.0).abs() < 1e-12);
        assert!((decode(ConverterKind::SpdLim, &aux, bits) - 1000.0).abs() < 1e-9);
        let no_enc = drive_aux().with(P_ENC_DENS, 0.0);
        assert_eq!(decode(ConverterKind::SpdLim, &no_enc, 1.0), 0.0);
    }

    #[test]
    fn test_filt_round_trip_within_a_count() {
        let aux = drive_aux();
        for kind in [ConverterKind::Filt99pct, ConverterKind::Filt1Tc] {
            let bits = encode(kind, &aux, 10.0);
            let ms = decode(kind, &aux, bits);
            let neighbour = decode(kind, &aux, bits + 1.0);
            assert!((ms - 10.0).abs() <= (neighbour - ms).abs());
        }
        assert_eq!(decode(ConverterKind::Filt99pct, &aux, 0.0), 0.0);
        assert_eq!(decode(ConverterKind::Filt99pct, &aux, 40000.0), 0.0);
        assert_eq!(encode(ConverterKind::Filt99pct, &aux, 1e9), FILT_MAX_BITS);
    }

    #[test]
    fn test_vector_filt_uses_quarter_period() {
        let aux = drive_aux();
        assert_eq!(
            encode(ConverterKind::VectorFilt99pct, &aux, 5.0),
            encode(ConverterKind::Filt99pct, &aux, 20.0)
        );
        let bits = encode(ConverterKind::Filt99pct, &aux, 20.0);
        assert!((decode(ConverterKind::VectorFilt99pct, &aux, bits) * 4.0
            - decode(ConverterKind::Filt99pct, &aux, bits))
        .abs()
            < 1e-12);
    }

    #[test]
    fn test_jerk_passes_through_on_enhanced_firmware() {
        let aux = drive_aux();
        assert_eq!(decode(ConverterKind::Jerk, &aux, 3.0), 3.0);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 17.0), 17.0);
    }

    #[test]
    fn test_jerk_legacy_codes() {
        let aux = drive_aux().with(P_FW_VERSION, 0x1000 as f64);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 1.0), RAS_OFF as f64);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 3.9), RAS_3MS as f64);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 4.0), RAS_5MS as f64);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 19.4), RAS_15MS as f64);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 34.0), RAS_44MS as f64);
        assert_eq!(decode(ConverterKind::Jerk, &aux, RAS_24MS as f64), 24.0);
        assert_eq!(decode(ConverterKind::Jerk, &aux, 42.0), 0.0);
    }

    #[test]
    fn test_jerk_k_drive_clamps_to_9ms() {
        let k_drive = (PRODUCT_K_DRIVE << OPTION_PRODUCT_SHIFT) as f64;
        let aux = drive_aux()
            .with(P_FW_VERSION, 0x1000 as f64)
            .with(P_OPTION_REG, k_drive);
        assert_eq!(encode(ConverterKind::Jerk, &aux, 44.0), RAS_9MS as f64);
        assert_eq!(decode(ConverterKind::Jerk, &aux, RAS_44MS as f64), 9.0);
    }

    #[test]
    fn test_check_posn_limit_on_old_firmware() {
        let old = Aux::new().with(P_FW_VERSION, (FW_MILESTONE_DUAL_RMS - 1) as f64);
        assert_eq!(encode(ConverterKind::CheckPosnLimit, &old, 100000.0), 32767.0);
        assert_eq!(decode(ConverterKind::CheckPosnLimit, &old, 100000.0), 32767.0);
        let new = Aux::new().with(P_FW_VERSION, FW_MILESTONE_DUAL_RMS as f64);
        assert_eq!(encode(ConverterKind::CheckPosnLimit, &new, 100000.0), 100000.0);
    }

    #[test]
    fn test_time_vel_acc() {
        let aux = drive_aux();
        assert_eq!(decode(ConverterKind::TimeMs, &aux, 20.0), 1.0);
        assert_eq!(encode(ConverterKind::TimeMs, &aux, 1.0), 20.0);
        assert_eq!(decode(ConverterKind::Vel, &aux, 1.0), 20000.0);
        assert_eq!(encode(ConverterKind::Vel, &aux, 20000.0), 1.0);
        assert_eq!(decode(ConverterKind::Acc, &aux, 1.0), 4e8);
        assert_eq!(
            encode(ConverterKind::Limit2To27, &aux, 1e12),
            LIMIT_2_TO_27
        );
    }

    #[test]
    fn test_missing_aux_soft_fails_both_ways() {
        let aux = Aux::new().with(P_SAMPLE_PERIOD, SAMPLE_US);
        for kind in [ConverterKind::Amperes, ConverterKind::AmpsRms, ConverterKind::Angle] {
            assert_eq!(decode(kind, &aux, 1.0), 0.0);
            assert_eq!(encode(kind, &aux, 1.0), 0.0);
        }
        let mut failed = drive_aux();
        failed.insert(P_I_MAX, None);
        assert_eq!(decode(ConverterKind::Amperes, &failed, 0.5), 0.0);
    }

    #[test]
    fn test_mon_gain_encode_marks_state_valid() {
        let aux = drive_aux();
        let tp = TestPoint::TRQ_MEAS;
        // Full scale of 100% * adc / imax = 125 at unity gain
        let conv = apply(ConverterKind::MonGain(tp), Direction::Encode, &aux, 62.5);
        assert_eq!(conv.value, 2.0 * MON_SCALE);
        let update = conv.monitor.unwrap();
        assert!(update.valid);
        assert_eq!(update.test_point, tp);
        assert!((update.full_scale - 62.5).abs() < 1e-9);

        let back = apply(ConverterKind::MonGain(tp), Direction::Decode, &aux, conv.value);
        assert!((back.value - 62.5).abs() < 1e-9);
        assert!(back.monitor.unwrap().valid);
    }

    #[test]
    fn test_mon_gain_zero_sample_period_invalidates() {
        let aux = drive_aux().with(P_SAMPLE_PERIOD, 0.0);
        let tp = TestPoint::VEL_MEAS;
        let conv = apply(ConverterKind::MonGain(tp), Direction::Encode, &aux, 1000.0);
        assert_eq!(conv.value, 0.0);
        let update = conv.monitor.unwrap();
        assert!(!update.valid);
        assert_eq!(update.test_point, tp);
    }

    #[test]
    fn test_mon_gain_bits_clamped_to_i32() {
        let aux = drive_aux();
        let conv = apply(
            ConverterKind::MonGain(TestPoint::TRQ_CMD),
            Direction::Encode,
            &aux,
            1e-3,
        );
        assert_eq!(conv.value, i32::MAX as f64);
        let conv = apply(
            ConverterKind::MonGain(TestPoint::TRQ_CMD),
            Direction::Encode,
            &aux,
            1e12,
        );
        assert_eq!(conv.value, 1.0);
    }

    #[test]
    fn test_mon_gain_velocity_and_bus_scaling() {
        let aux = drive_aux();
        let rs = 4000.0 / 800.0;
        let gain = 2.0;
        let vel = apply(
            ConverterKind::MonGain(TestPoint::VEL_CMD),
            Direction::Decode,
            &aux,
            gain * MON_SCALE,
        );
        assert!((vel.value - 1e3 * MON_MAX_VEL / (SAMPLE_US * gain * rs)).abs() < 1e-9);
        let bus = apply(
            ConverterKind::MonGain(TestPoint::BUS_VOLTS),
            Direction::Decode,
            &aux,
            gain * MON_SCALE,
        );
        assert_eq!(bus.value, 50.0);
        assert!(ConverterKind::MonGain(TestPoint::BUS_VOLTS)
            .aux_params()
            .contains(&P_FS_BUS_VOLTS));
    }

    #[test]
    fn test_current_converters_round_trip_across_range() {
        let aux = drive_aux();
        for x in span(-20.0, 20.0 * Q15_MAX) {
            assert_round_trip(ConverterKind::Amperes, &aux, 32768.0, x);
        }
        for x in span(0.0, 25.0) {
            assert_round_trip(ConverterKind::AmpsRms, &aux, 32768.0, x);
            assert_round_trip(ConverterKind::RmsLimit, &aux, 1.0, x);
            assert_round_trip(ConverterKind::RmsLimit32, &aux, 1.0, x);
        }
        for x in span(0.0, 1.0) {
            assert_round_trip(ConverterKind::DHeatFact, &aux, 1.0, x);
        }
    }

    #[test]
    fn test_time_constants_round_trip_across_range() {
        let aux = drive_aux();
        for x in span(0.01, 20.0) {
            assert_round_trip(ConverterKind::RmsTc, &aux, 1.0, x);
        }
        for x in span(0.05, 200.0) {
            assert_round_trip(ConverterKind::RmsSlowTc, &aux, 1.0, x);
        }
        for x in span(0.01, 10.0) {
            assert_round_trip(ConverterKind::IbRmsTc, &aux, 1.0, x);
        }
        for x in span(1.28, 1280.0) {
            assert_round_trip(ConverterKind::IbRmsSlowTc, &aux, 1.0, x);
        }
    }

    #[test]
    fn test_filters_round_trip_across_range() {
        let aux = drive_aux();
        for x in span(0.1, 5000.0) {
            assert_round_trip(ConverterKind::Filt99pct, &aux, 1.0, x);
        }
        for x in span(0.1, 1000.0) {
            assert_round_trip(ConverterKind::Filt1Tc, &aux, 1.0, x);
            assert_round_trip(ConverterKind::VectorFilt99pct, &aux, 1.0, x);
        }
    }

    #[test]
    fn test_motion_converters_round_trip_across_range() {
        let aux = drive_aux();
        for x in span(0.0, 1439.0) {
            assert_round_trip(ConverterKind::Angle, &aux, 1.0, x);
        }
        for x in span(0.0, 100_000.0) {
            assert_round_trip(ConverterKind::SpdLim, &aux, 65536.0, x);
        }
        for x in span(0.0, 1000.0) {
            assert_round_trip(ConverterKind::TimeMs, &aux, 1.0, x);
        }
        for x in span(-1e6, 1e6) {
            assert_round_trip(ConverterKind::Vel, &aux, 131072.0, x);
        }
        for x in span(0.0, 1e9) {
            assert_round_trip(ConverterKind::Acc, &aux, 16_777_216.0, x);
        }
        for x in span(-LIMIT_2_TO_27, LIMIT_2_TO_27) {
            assert_round_trip(ConverterKind::Limit2To27, &aux, 1.0, x);
        }
    }

    #[test]
    fn test_mon_gain_round_trip_across_range() {
        let aux = drive_aux();
        for x in span(1.0, 1000.0) {
            assert_round_trip(ConverterKind::MonGain(TestPoint::TRQ_MEAS), &aux, 1.0, x);
        }
        for x in span(100.0, 100_000.0) {
            assert_round_trip(ConverterKind::MonGain(TestPoint::VEL_MEAS), &aux, 1.0, x);
        }
    }

    #[test]
    fn test_aux_resolve_records_failures() {
        let aux = Aux::resolve(ConverterKind::SpdLim, |id| {
            if id == P_ENC_DENS {
                None
            } else {
                Some(1.0)
            }
        });
        assert_eq!(aux.get(P_SAMPLE_PERIOD), Some(1.0));
        assert_eq!(aux.get(P_ENC_DENS), None);
    }
}
