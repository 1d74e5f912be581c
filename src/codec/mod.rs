//! Numeric formats and their byte encodings.
//!
//! Every codec packs to a fixed number of big-endian bytes and unpacks back
//! to an `f64`. Packing is total: any input, including NaN and the
//! infinities, produces a valid byte pattern.

pub mod ieee754;
pub mod integer;

use std::fmt;

/// Runtime tag for the nine element formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Int8,
        ElementKind::Uint8,
        ElementKind::Uint8Clamped,
        ElementKind::Int16,
        ElementKind::Uint16,
        ElementKind::Int32,
        ElementKind::Uint32,
        ElementKind::Float32,
        ElementKind::Float64,
    ];

    pub fn bytes_per_element(self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 | ElementKind::Uint8Clamped => 1,
            ElementKind::Int16 | ElementKind::Uint16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 => 8,
        }
    }

    /// Constructor name of the matching view type.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Int8 => "Int8Array",
            ElementKind::Uint8 => "Uint8Array",
            ElementKind::Uint8Clamped => "Uint8ClampedArray",
            ElementKind::Int16 => "Int16Array",
            ElementKind::Uint16 => "Uint16Array",
            ElementKind::Int32 => "Int32Array",
            ElementKind::Uint32 => "Uint32Array",
            ElementKind::Float32 => "Float32Array",
            ElementKind::Float64 => "Float64Array",
        }
    }

    pub fn pack(self, value: f64, out: &mut [u8]) {
        match self {
            ElementKind::Int8 => Int8::pack(value, out),
            ElementKind::Uint8 => Uint8::pack(value, out),
            ElementKind::Uint8Clamped => Uint8Clamped::pack(value, out),
            ElementKind::Int16 => Int16::pack(value, out),
            ElementKind::Uint16 => Uint16::pack(value, out),
            ElementKind::Int32 => Int32::pack(value, out),
            ElementKind::Uint32 => Uint32::pack(value, out),
            ElementKind::Float32 => Float32::pack(value, out),
            ElementKind::Float64 => Float64::pack(value, out),
        }
    }

    pub fn unpack(self, bytes: &[u8]) -> f64 {
        match self {
            ElementKind::Int8 => Int8::unpack(bytes),
            ElementKind::Uint8 => Uint8::unpack(bytes),
            ElementKind::Uint8Clamped => Uint8Clamped::unpack(bytes),
            ElementKind::Int16 => Int16::unpack(bytes),
            ElementKind::Uint16 => Uint16::unpack(bytes),
            ElementKind::Int32 => Int32::unpack(bytes),
            ElementKind::Uint32 => Uint32::unpack(bytes),
            ElementKind::Float32 => Float32::unpack(bytes),
            ElementKind::Float64 => Float64::unpack(bytes),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-width numeric format.
///
/// `pack` writes exactly `BYTES` bytes into `out` (which must be that long),
/// most significant byte first; `unpack` reads the same layout.
pub trait Codec: 'static {
    const KIND: ElementKind;
    const BYTES: usize;

    fn pack(value: f64, out: &mut [u8]);
    fn unpack(bytes: &[u8]) -> f64;
}

macro_rules! int_codec {
    ($name:ident, $kind:ident, $bytes:expr, $unpack:path) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl Codec for $name {
            const KIND: ElementKind = ElementKind::$kind;
            const BYTES: usize = $bytes;

            fn pack(value: f64, out: &mut [u8]) {
                integer::pack_int(value, out);
            }

            fn unpack(bytes: &[u8]) -> f64 {
                $unpack(bytes)
            }
        }
    };
}

int_codec!(Int8, Int8, 1, integer::unpack_signed);
int_codec!(Uint8, Uint8, 1, integer::unpack_unsigned);
int_codec!(Int16, Int16, 2, integer::unpack_signed);
int_codec!(Uint16, Uint16, 2, integer::unpack_unsigned);
int_codec!(Int32, Int32, 4, integer::unpack_signed);
int_codec!(Uint32, Uint32, 4, integer::unpack_unsigned);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Uint8Clamped;

impl Codec for Uint8Clamped {
    const KIND: ElementKind = ElementKind::Uint8Clamped;
    const BYTES: usize = 1;

    fn pack(value: f64, out: &mut [u8]) {
        integer::pack_clamped(value, out);
    }

    fn unpack(bytes: &[u8]) -> f64 {
        integer::unpack_unsigned(bytes)
    }
}

macro_rules! float_codec {
    ($name:ident, $kind:ident, $bytes:expr, $ebits:expr, $fbits:expr) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl Codec for $name {
            const KIND: ElementKind = ElementKind::$kind;
            const BYTES: usize = $bytes;

            fn pack(value: f64, out: &mut [u8]) {
                ieee754::pack_ieee754(value, $ebits, $fbits, out);
            }

            fn unpack(bytes: &[u8]) -> f64 {
                ieee754::unpack_ieee754(bytes, $ebits, $fbits)
            }
        }
    };
}

float_codec!(Float32, Float32, 4, 8, 23);
float_codec!(Float64, Float64, 8, 11, 52);
