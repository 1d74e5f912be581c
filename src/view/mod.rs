//! Fixed-stride typed views over an [`ArrayBuffer`].
//!
//! A `TypedArray<C>` is a window `(buffer, byte_offset, length)` whose
//! elements are encoded with codec `C`. Views never own their bytes
//! exclusively: several views (of any element type) may alias the same
//! buffer, and writes through one are visible through the others.

mod ops;

use crate::any::AnyTypedArray;
use crate::buffer::{ArrayBuffer, MAX_SAFE_INTEGER};
use crate::codec::{Codec, ElementKind};
use crate::error::{Error, Result};
use crate::types::{Value, number_ops};
use std::fmt;
use std::marker::PhantomData;

/// How to build a view. Each variant is one constructor form.
#[derive(Clone, Debug)]
pub enum ViewInit {
    /// A fresh zeroed buffer holding `length` elements.
    Length(i64),
    /// An element-wise copy of another view of the same element type.
    View(AnyTypedArray),
    /// A fresh buffer filled from loosely typed values.
    ArrayLike(Vec<Value>),
    /// An alias over existing storage; `length` defaults to the rest of
    /// the buffer.
    Buffer {
        buffer: ArrayBuffer,
        byte_offset: i64,
        length: Option<i64>,
    },
}

pub struct TypedArray<C: Codec> {
    buffer: ArrayBuffer,
    byte_offset: usize,
    length: usize,
    codec: PhantomData<fn() -> C>,
}

// Cloning copies the handle, not the elements; use `slice` for a copy.
impl<C: Codec> Clone for TypedArray<C> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            byte_offset: self.byte_offset,
            length: self.length,
            codec: PhantomData,
        }
    }
}

impl<C: Codec> TypedArray<C> {
    pub const BYTES_PER_ELEMENT: usize = C::BYTES;

    pub fn construct(init: ViewInit) -> Result<Self> {
        match init {
            ViewInit::Length(length) => Self::with_length(length),
            ViewInit::View(source) => Self::from_view(&source),
            ViewInit::ArrayLike(values) => Ok(Self::from_array_like(&values)),
            ViewInit::Buffer {
                buffer,
                byte_offset,
                length,
            } => Self::from_buffer(&buffer, byte_offset, length),
        }
    }

    /// A zeroed view of `length` elements over a new buffer.
    pub fn new(length: usize) -> Result<Self> {
        let byte_length = length
            .checked_mul(C::BYTES)
            .filter(|&n| n as u64 <= MAX_SAFE_INTEGER as u64)
            .ok_or_else(|| Error::range(format!("{} length too large", C::KIND)))?;
        let view = Self::from_parts(ArrayBuffer::allocate(byte_length)?, 0, length);
        tracing::trace!(kind = %C::KIND, length, "view allocated");
        Ok(view)
    }

    pub fn with_length(length: i64) -> Result<Self> {
        if length < 0 {
            return Err(Error::range(format!("{} length must be non-negative", C::KIND)));
        }
        let length =
            usize::try_from(length).map_err(|_| Error::range("invalid typed array length"))?;
        Self::new(length)
    }

    /// A zeroed view sized like storage that already exists.
    pub(crate) fn zeroed(length: usize) -> Self {
        Self::from_parts(ArrayBuffer::zeroed(length * C::BYTES), 0, length)
    }

    /// Copy every element of `source`, which must have this view's element
    /// type.
    pub fn from_view(source: &AnyTypedArray) -> Result<Self> {
        if source.kind() != C::KIND {
            return Err(Error::type_error(format!(
                "cannot construct {} from {}",
                C::KIND,
                source.kind()
            )));
        }
        let view = Self::zeroed(source.len());
        view.buffer.bytes_mut().copy_from_slice(&source.byte_range());
        Ok(view)
    }

    pub fn from_array_like(values: &[Value]) -> Self {
        let view = Self::zeroed(values.len());
        for (i, v) in values.iter().enumerate() {
            view.write(i, v.to_number());
        }
        view
    }

    pub fn from_values(values: &[f64]) -> Self {
        values.iter().copied().collect()
    }

    /// Alias `buffer` starting at `byte_offset`. The offset must be aligned
    /// to the element size and the view must fit inside the buffer.
    pub fn from_buffer(buffer: &ArrayBuffer, byte_offset: i64, length: Option<i64>) -> Result<Self> {
        let buffer_len = buffer.byte_length();
        if byte_offset < 0 || byte_offset as u64 > buffer_len as u64 {
            return Err(Error::range("byteOffset out of range"));
        }
        let byte_offset = byte_offset as usize;
        if byte_offset % C::BYTES != 0 {
            return Err(Error::range(format!(
                "start offset of {} should be a multiple of {}",
                C::KIND,
                C::BYTES
            )));
        }
        let length = match length {
            None => {
                let remaining = buffer_len - byte_offset;
                if remaining % C::BYTES != 0 {
                    return Err(Error::range(format!(
                        "byte length of {} should be a multiple of {}",
                        C::KIND,
                        C::BYTES
                    )));
                }
                remaining / C::BYTES
            }
            Some(n) if n < 0 => return Err(Error::range("invalid typed array length")),
            Some(n) => n as usize,
        };
        let fits = length
            .checked_mul(C::BYTES)
            .and_then(|bytes| bytes.checked_add(byte_offset))
            .is_some_and(|end| end <= buffer_len);
        if !fits {
            return Err(Error::range("length out of range of buffer"));
        }
        tracing::trace!(kind = %C::KIND, byte_offset, length, "view over existing buffer");
        Ok(Self::from_parts(buffer.clone(), byte_offset, length))
    }

    pub(crate) fn from_parts(buffer: ArrayBuffer, byte_offset: usize, length: usize) -> Self {
        debug_assert!(byte_offset % C::BYTES == 0);
        debug_assert!(byte_offset + length * C::BYTES <= buffer.byte_length());
        Self {
            buffer,
            byte_offset,
            length,
            codec: PhantomData,
        }
    }

    pub fn kind(&self) -> ElementKind {
        C::KIND
    }

    pub fn buffer(&self) -> &ArrayBuffer {
        &self.buffer
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn byte_length(&self) -> usize {
        self.length * C::BYTES
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.length).then(|| self.read(index))
    }

    /// Store `value` at `index`. Writes past the end are ignored.
    pub fn set(&self, index: usize, value: f64) {
        if index < self.length {
            self.write(index, value);
        } else {
            tracing::trace!(kind = %C::KIND, index, length = self.length, "ignored out-of-range write");
        }
    }

    pub fn try_get(&self, index: usize) -> Result<f64> {
        self.get(index)
            .ok_or_else(|| Error::range(format!("index {index} out of range")))
    }

    pub fn try_set(&self, index: usize, value: f64) -> Result<()> {
        if index >= self.length {
            return Err(Error::range(format!("index {index} out of range")));
        }
        self.write(index, value);
        Ok(())
    }

    fn read(&self, index: usize) -> f64 {
        let start = self.byte_offset + index * C::BYTES;
        let bytes = self.buffer.bytes();
        C::unpack(&bytes[start..start + C::BYTES])
    }

    fn write(&self, index: usize, value: f64) {
        let mut scratch = [0u8; 8];
        let packed = &mut scratch[..C::BYTES];
        C::pack(value, packed);
        let start = self.byte_offset + index * C::BYTES;
        self.buffer.bytes_mut()[start..start + C::BYTES].copy_from_slice(packed);
    }

    fn elements(&self) -> impl DoubleEndedIterator<Item = f64> + '_ {
        (0..self.length).map(|i| self.read(i))
    }
}

impl<C: Codec> FromIterator<f64> for TypedArray<C> {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let values: Vec<f64> = iter.into_iter().collect();
        let view = Self::zeroed(values.len());
        for (i, v) in values.into_iter().enumerate() {
            view.write(i, v);
        }
        view
    }
}

impl<C: Codec> fmt::Display for TypedArray<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(","))
    }
}

impl<C: Codec> fmt::Debug for TypedArray<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", C::KIND)?;
        f.debug_list()
            .entries(self.elements().map(number_ops::to_string))
            .finish()?;
        write!(f, ")")
    }
}
