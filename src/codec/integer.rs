//! Two's-complement integer packing.
//!
//! Values are reduced with ToInt32 before masking, so packing never fails:
//! NaN and the infinities become 0 and out-of-range inputs wrap modulo the
//! format's width. Bytes are always produced most significant first.

use crate::types::number_ops::to_int32;

/// Sign-extend the low `bits` of `n`.
pub fn as_signed(n: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((n << shift) as i32) >> shift
}

/// Zero-extend the low `bits` of `n`.
pub fn as_unsigned(n: u32, bits: u32) -> u32 {
    let shift = 32 - bits;
    (n << shift) >> shift
}

/// Write the low `out.len()` bytes of `value` (after ToInt32) big-endian.
pub fn pack_int(value: f64, out: &mut [u8]) {
    let n = to_int32(value) as u32;
    let width = out.len();
    for (i, byte) in out.iter_mut().enumerate() {
        let shift = 8 * (width - 1 - i);
        *byte = ((n >> shift) & 0xff) as u8;
    }
}

/// Reassemble a big-endian byte run into its raw 32-bit pattern.
pub fn unpack_int(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

pub fn unpack_signed(bytes: &[u8]) -> f64 {
    f64::from(as_signed(unpack_int(bytes), 8 * bytes.len() as u32))
}

pub fn unpack_unsigned(bytes: &[u8]) -> f64 {
    f64::from(as_unsigned(unpack_int(bytes), 8 * bytes.len() as u32))
}

/// Round half to even, the tie rule used by clamped byte conversion.
pub(crate) fn round_half_even(n: f64) -> f64 {
    let w = n.floor();
    let f = n - w;
    if f < 0.5 {
        w
    } else if f > 0.5 {
        w + 1.0
    } else if w % 2.0 != 0.0 {
        w + 1.0
    } else {
        w
    }
}

pub fn pack_clamped(value: f64, out: &mut [u8]) {
    let n = round_half_even(value);
    out[0] = if n.is_nan() || n <= 0.0 {
        0
    } else if n >= 255.0 {
        255
    } else {
        n as u8
    };
}
