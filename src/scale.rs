//! Fixed-point scale and wire-format primitives.
//!
//! Raw parameter images are little-endian and `size` bytes wide. Encoding
//! never wraps: values outside the representable range saturate at the
//! extreme for the descriptor's signedness.

use crate::constants::MAX_NUMERIC_SIZE;
use crate::types::Signedness;

/// `value / 2^q`
pub fn from_q(value: f64, q: u32) -> f64 {
    value / (1u64 << q) as f64
}

/// `value * 2^q`, rounded half up
pub fn to_q(value: f64, q: u32) -> i64 {
    (value * (1u64 << q) as f64 + 0.5).floor() as i64
}

/// Representable range of a `size`-byte field
pub fn bit_range(size: usize, signedness: Signedness) -> (i64, i64) {
    if size == 0 {
        return (0, 0);
    }
    if size >= MAX_NUMERIC_SIZE {
        return match signedness {
            Signedness::Signed => (i64::MIN, i64::MAX),
            _ => (0, i64::MAX),
        };
    }
    let bits = 8 * size as u32;
    let half = 1i64 << (bits - 1);
    match signedness {
        Signedness::Signed => (-half, half - 1),
        Signedness::PositiveOnly => (0, half - 1),
        Signedness::Unsigned => (0, (1i64 << bits) - 1),
    }
}

/// Truncate an already-rounded value into the field range
pub fn saturate(value: f64, size: usize, signedness: Signedness) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let (lo, hi) = bit_range(size, signedness);
    if value <= lo as f64 {
        lo
    } else if value >= hi as f64 {
        hi
    } else {
        value as i64
    }
}

/// Default engineering -> bits transform: `round(value * scale)` then saturate
pub fn encode_bits(value: f64, scale: f64, size: usize, signedness: Signedness) -> i64 {
    saturate((value * scale).round(), size, signedness)
}

/// Default bits -> engineering transform
pub fn decode_bits(bits: i64, scale: f64) -> f64 {
    bits as f64 / scale
}

/// Read a little-endian field, sign-extending signed storage
pub fn unpack(bytes: &[u8], signedness: Signedness) -> i64 {
    let len = bytes.len();
    if len == 0 || len > MAX_NUMERIC_SIZE {
        return 0;
    }
    let mut buf = [0u8; 8];
    buf[..len].copy_from_slice(bytes);
    let raw = u64::from_le_bytes(buf);
    if signedness == Signedness::Unsigned || len == MAX_NUMERIC_SIZE {
        return raw as i64;
    }
    let shift = 64 - 8 * len as u32;
    ((raw << shift) as i64) >> shift
}

/// Little-endian image of the low `size` bytes of `bits`
pub fn pack(bits: i64, size: usize) -> Vec<u8> {
    let bytes = bits.to_le_bytes();
    bytes[..size.min(MAX_NUMERIC_SIZE)].to_vec()
}
