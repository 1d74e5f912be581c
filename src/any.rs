//! A view whose element type is known only at runtime.

use crate::buffer::ArrayBuffer;
use crate::codec::{
    Codec, ElementKind, Float32, Float64, Int8, Int16, Int32, Uint8, Uint8Clamped, Uint16, Uint32,
};
use crate::error::Result;
use crate::view::{TypedArray, ViewInit};
use std::fmt;

/// Type-erased counterpart of [`TypedArray`]: the same `(buffer, offset,
/// length)` window, tagged with its [`ElementKind`].
#[derive(Clone)]
pub struct AnyTypedArray {
    kind: ElementKind,
    buffer: ArrayBuffer,
    byte_offset: usize,
    length: usize,
}

impl AnyTypedArray {
    /// Build a view of `kind` from any constructor form.
    pub fn construct(kind: ElementKind, init: ViewInit) -> Result<Self> {
        match kind {
            ElementKind::Int8 => TypedArray::<Int8>::construct(init).map(Self::from),
            ElementKind::Uint8 => TypedArray::<Uint8>::construct(init).map(Self::from),
            ElementKind::Uint8Clamped => {
                TypedArray::<Uint8Clamped>::construct(init).map(Self::from)
            }
            ElementKind::Int16 => TypedArray::<Int16>::construct(init).map(Self::from),
            ElementKind::Uint16 => TypedArray::<Uint16>::construct(init).map(Self::from),
            ElementKind::Int32 => TypedArray::<Int32>::construct(init).map(Self::from),
            ElementKind::Uint32 => TypedArray::<Uint32>::construct(init).map(Self::from),
            ElementKind::Float32 => TypedArray::<Float32>::construct(init).map(Self::from),
            ElementKind::Float64 => TypedArray::<Float64>::construct(init).map(Self::from),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn buffer(&self) -> &ArrayBuffer {
        &self.buffer
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn byte_length(&self) -> usize {
        self.length * self.kind.bytes_per_element()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.length {
            return None;
        }
        let size = self.kind.bytes_per_element();
        let start = self.byte_offset + index * size;
        let bytes = self.buffer.bytes();
        Some(self.kind.unpack(&bytes[start..start + size]))
    }

    pub fn set(&self, index: usize, value: f64) {
        if index >= self.length {
            tracing::trace!(kind = %self.kind, index, length = self.length, "ignored out-of-range write");
            return;
        }
        let size = self.kind.bytes_per_element();
        let mut scratch = [0u8; 8];
        self.kind.pack(value, &mut scratch[..size]);
        let start = self.byte_offset + index * size;
        self.buffer.bytes_mut()[start..start + size].copy_from_slice(&scratch[..size]);
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.length).filter_map(|i| self.get(i)).collect()
    }

    /// Recover the statically typed view, if `C` is this view's format.
    pub fn downcast<C: Codec>(&self) -> Option<TypedArray<C>> {
        (self.kind == C::KIND)
            .then(|| TypedArray::from_parts(self.buffer.clone(), self.byte_offset, self.length))
    }

    /// Snapshot of the raw bytes this view covers.
    pub(crate) fn byte_range(&self) -> Vec<u8> {
        let start = self.byte_offset;
        self.buffer.bytes()[start..start + self.byte_length()].to_vec()
    }
}

impl<C: Codec> From<&TypedArray<C>> for AnyTypedArray {
    fn from(view: &TypedArray<C>) -> Self {
        Self {
            kind: C::KIND,
            buffer: view.buffer().clone(),
            byte_offset: view.byte_offset(),
            length: view.len(),
        }
    }
}

impl<C: Codec> From<TypedArray<C>> for AnyTypedArray {
    fn from(view: TypedArray<C>) -> Self {
        Self::from(&view)
    }
}

impl fmt::Debug for AnyTypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyTypedArray")
            .field("kind", &self.kind)
            .field("byte_offset", &self.byte_offset)
            .field("length", &self.length)
            .finish()
    }
}
