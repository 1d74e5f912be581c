//! Generic IEEE 754 binary interchange packing, parameterized by exponent
//! and fraction width. Rounding is round-to-nearest, ties to even.

use super::integer::round_half_even;

/// Exact power of two, including the subnormal range of f64.
fn pow2(e: i32) -> f64 {
    if e > 1023 {
        f64::INFINITY
    } else if e >= -1022 {
        f64::from_bits(((e + 1023) as u64) << 52)
    } else if e >= -1074 {
        f64::from_bits(1u64 << (e + 1074))
    } else {
        0.0
    }
}

fn bias(ebits: u32) -> i32 {
    (1 << (ebits - 1)) - 1
}

/// Encode `v` into `(1 + ebits + fbits) / 8` big-endian bytes.
pub fn pack_ieee754(v: f64, ebits: u32, fbits: u32, out: &mut [u8]) {
    debug_assert_eq!(out.len() as u32 * 8, 1 + ebits + fbits);
    let bias = bias(ebits);
    let max_exp = (1u64 << ebits) - 1;

    let (sign, exp, frac): (u64, u64, u64) = if v.is_nan() {
        (0, max_exp, 1u64 << (fbits - 1))
    } else if v.is_infinite() {
        (u64::from(v < 0.0), max_exp, 0)
    } else if v == 0.0 {
        (u64::from(v.is_sign_negative()), 0, 0)
    } else {
        let sign = u64::from(v < 0.0);
        let v = v.abs();
        if v >= pow2(1 - bias) {
            let mut e = (v.log2().floor() as i32).min(1023);
            let mut significand = v / pow2(e);
            if significand < 1.0 {
                e -= 1;
                significand *= 2.0;
            }
            if significand >= 2.0 {
                e += 1;
                significand /= 2.0;
            }
            let d = pow2(fbits as i32);
            let mut f = round_half_even(significand * d) - d;
            let mut biased = e + bias;
            if f / d >= 1.0 {
                biased += 1;
                f = 0.0;
            }
            if biased > 2 * bias {
                (sign, max_exp, 0)
            } else {
                (sign, biased as u64, f as u64)
            }
        } else {
            // Subnormal; a fraction that rounds up to 2^fbits carries into
            // the exponent field and yields the smallest normal.
            let f = round_half_even(v / pow2(1 - bias - fbits as i32));
            (sign, 0, f as u64)
        }
    };

    let bits = (sign << (ebits + fbits)) | (exp << fbits) | frac;
    let width = out.len();
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = (bits >> (8 * (width - 1 - i))) as u8;
    }
}

/// Decode big-endian bytes produced by [`pack_ieee754`] with the same widths.
pub fn unpack_ieee754(bytes: &[u8], ebits: u32, fbits: u32) -> f64 {
    let bits = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let bias = bias(ebits);
    let negative = (bits >> (ebits + fbits)) & 1 == 1;
    let exp = ((bits >> fbits) & ((1u64 << ebits) - 1)) as i32;
    let frac = (bits & ((1u64 << fbits) - 1)) as f64;
    let s = if negative { -1.0 } else { 1.0 };
    let scale = pow2(fbits as i32);

    if exp == (1 << ebits) - 1 {
        if frac != 0.0 { f64::NAN } else { s * f64::INFINITY }
    } else if exp > 0 {
        s * pow2(exp - bias) * (1.0 + frac / scale)
    } else if frac != 0.0 {
        s * pow2(1 - bias) * (frac / scale)
    } else if negative {
        -0.0
    } else {
        0.0
    }
}
