//! Byte-addressed reads and writes with explicit endianness.
//!
//! Codecs always produce big-endian bytes; little-endian access reverses
//! the byte run on the way in and out.

use crate::buffer::ArrayBuffer;
use crate::codec::{
    Codec, ElementKind, Float32, Float64, Int8, Int16, Int32, Uint8, Uint16, Uint32,
};
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct DataView {
    buffer: ArrayBuffer,
    byte_offset: usize,
    byte_length: usize,
}

impl DataView {
    /// View `byte_length` bytes of `buffer` from `byte_offset` (default: the
    /// rest of the buffer). No alignment is required.
    pub fn new(buffer: &ArrayBuffer, byte_offset: i64, byte_length: Option<i64>) -> Result<Self> {
        let buffer_len = buffer.byte_length();
        if byte_offset < 0 || byte_offset as u64 > buffer_len as u64 {
            return Err(Error::range("start offset is outside the bounds of the buffer"));
        }
        let byte_offset = byte_offset as usize;
        let byte_length = match byte_length {
            None => buffer_len - byte_offset,
            Some(n) if n < 0 => return Err(Error::range("invalid DataView length")),
            Some(n) => n as usize,
        };
        if byte_offset
            .checked_add(byte_length)
            .is_none_or(|end| end > buffer_len)
        {
            return Err(Error::range("invalid DataView length"));
        }
        tracing::trace!(byte_offset, byte_length, "data view created");
        Ok(Self {
            buffer: buffer.clone(),
            byte_offset,
            byte_length,
        })
    }

    pub fn buffer(&self) -> &ArrayBuffer {
        &self.buffer
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    fn start(&self, byte_offset: usize, size: usize) -> Result<usize> {
        match byte_offset.checked_add(size) {
            Some(end) if end <= self.byte_length => Ok(self.byte_offset + byte_offset),
            _ => Err(Error::range("offset is outside the bounds of the DataView")),
        }
    }

    /// Read one `kind` value at `byte_offset` (relative to this view).
    pub fn get_kind(&self, kind: ElementKind, byte_offset: usize, little_endian: bool) -> Result<f64> {
        let size = kind.bytes_per_element();
        let start = self.start(byte_offset, size)?;
        let mut raw = [0u8; 8];
        let raw = &mut raw[..size];
        raw.copy_from_slice(&self.buffer.bytes()[start..start + size]);
        if little_endian {
            raw.reverse();
        }
        Ok(kind.unpack(raw))
    }

    /// Write `value` as one `kind` value at `byte_offset`.
    pub fn set_kind(
        &self,
        kind: ElementKind,
        byte_offset: usize,
        value: f64,
        little_endian: bool,
    ) -> Result<()> {
        let size = kind.bytes_per_element();
        let start = self.start(byte_offset, size)?;
        let mut raw = [0u8; 8];
        let raw = &mut raw[..size];
        kind.pack(value, raw);
        if little_endian {
            raw.reverse();
        }
        self.buffer.bytes_mut()[start..start + size].copy_from_slice(raw);
        Ok(())
    }

    pub fn get<C: Codec>(&self, byte_offset: usize, little_endian: bool) -> Result<f64> {
        self.get_kind(C::KIND, byte_offset, little_endian)
    }

    pub fn set<C: Codec>(&self, byte_offset: usize, value: f64, little_endian: bool) -> Result<()> {
        self.set_kind(C::KIND, byte_offset, value, little_endian)
    }
}

macro_rules! dv_accessors {
    ($get:ident, $set:ident, $codec:ty, $ty:ty) => {
        impl DataView {
            pub fn $get(&self, byte_offset: usize, little_endian: bool) -> Result<$ty> {
                self.get::<$codec>(byte_offset, little_endian).map(|v| v as $ty)
            }

            pub fn $set(&self, byte_offset: usize, value: f64, little_endian: bool) -> Result<()> {
                self.set::<$codec>(byte_offset, value, little_endian)
            }
        }
    };
}

dv_accessors!(get_int8, set_int8, Int8, i8);
dv_accessors!(get_uint8, set_uint8, Uint8, u8);
dv_accessors!(get_int16, set_int16, Int16, i16);
dv_accessors!(get_uint16, set_uint16, Uint16, u16);
dv_accessors!(get_int32, set_int32, Int32, i32);
dv_accessors!(get_uint32, set_uint32, Uint32, u32);
dv_accessors!(get_float32, set_float32, Float32, f32);
dv_accessors!(get_float64, set_float64, Float64, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_to_rest_of_buffer() {
        let buf = ArrayBuffer::new(10).unwrap();
        let dv = DataView::new(&buf, 3, None).unwrap();
        assert_eq!(dv.byte_offset(), 3);
        assert_eq!(dv.byte_length(), 7);
        assert_eq!(DataView::new(&buf, 10, None).unwrap().byte_length(), 0);
    }

    #[test]
    fn construction_bounds() {
        let buf = ArrayBuffer::new(4).unwrap();
        for (offset, len) in [(5, None), (-1, None), (2, Some(3)), (0, Some(-1))] {
            let err = DataView::new(&buf, offset, len).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
        }
        // Unaligned offsets are fine.
        assert!(DataView::new(&buf, 1, Some(3)).is_ok());
    }

    #[test]
    fn endianness_is_a_byte_reversal() {
        let buf = ArrayBuffer::new(4).unwrap();
        let dv = DataView::new(&buf, 0, None).unwrap();
        dv.set_uint32(0, f64::from(0x0102_0304), false).unwrap();
        assert_eq!(buf.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(dv.get_uint32(0, true).unwrap(), 0x0403_0201);

        dv.set_int16(1, -2.0, true).unwrap();
        assert_eq!(buf.to_vec(), vec![1, 0xfe, 0xff, 4]);
        assert_eq!(dv.get_int16(1, true).unwrap(), -2);
        assert_eq!(dv.get_uint16(1, false).unwrap(), 0xfeff);
    }

    #[test]
    fn floats_in_both_orders() {
        let buf = ArrayBuffer::new(12).unwrap();
        let dv = DataView::new(&buf, 0, None).unwrap();
        dv.set_float64(1, std::f64::consts::PI, true).unwrap();
        assert_eq!(dv.get_float64(1, true).unwrap(), std::f64::consts::PI);
        assert_eq!(
            buf.to_vec()[1..9],
            std::f64::consts::PI.to_le_bytes()
        );
        dv.set_float32(8, 1.5, false).unwrap();
        assert_eq!(dv.get_float32(8, false).unwrap(), 1.5);
        assert_eq!(buf.to_vec()[8..12], [0x3f, 0xc0, 0, 0]);
    }

    #[test]
    fn access_is_relative_to_view_and_bounded() {
        let buf = ArrayBuffer::new(8).unwrap();
        let dv = DataView::new(&buf, 4, Some(2)).unwrap();
        dv.set_uint8(1, 257.0, false).unwrap();
        assert_eq!(buf.to_vec()[5], 1);
        assert_eq!(dv.get_int8(1, false).unwrap(), 1);

        assert_eq!(dv.get_uint16(1, false).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(dv.set_int32(0, 0.0, false).unwrap_err().kind(), ErrorKind::Range);
        assert!(dv.get_uint8(2, false).is_err());
        assert!(dv.get_uint8(usize::MAX, false).is_err());
    }

    #[test]
    fn generic_and_kind_access_agree() {
        let buf = ArrayBuffer::new(4).unwrap();
        let dv = DataView::new(&buf, 0, None).unwrap();
        dv.set::<Int32>(0, -1.0, false).unwrap();
        assert_eq!(dv.get_kind(ElementKind::Uint32, 0, false).unwrap(), 4294967295.0);
        dv.set_kind(ElementKind::Uint8Clamped, 0, 999.0, false).unwrap();
        assert_eq!(dv.get::<Uint8>(0, false).unwrap(), 255.0);
    }
}
