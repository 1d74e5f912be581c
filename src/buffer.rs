//! Fixed-length shared byte storage.

use crate::error::{Error, Result};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

// 2^53 - 1
pub(crate) const MAX_SAFE_INTEGER: i64 = 9007199254740991;

/// A zero-initialized byte store whose length never changes.
///
/// Cloning yields another handle to the same bytes; the storage lives as
/// long as the last handle (held directly or by a view).
#[derive(Clone)]
pub struct ArrayBuffer {
    data: Rc<RefCell<Vec<u8>>>,
}

impl ArrayBuffer {
    /// Allocate `byte_length` zero bytes. Negative lengths are a RangeError.
    pub fn new(byte_length: i64) -> Result<Self> {
        if byte_length < 0 {
            return Err(Error::range("ArrayBuffer length must be non-negative"));
        }
        if byte_length > MAX_SAFE_INTEGER {
            return Err(Error::range("ArrayBuffer length too large"));
        }
        Self::allocate(byte_length as usize)
    }

    /// Zeroed storage for a length the caller has already validated. A failed
    /// allocation is reported instead of aborting.
    pub(crate) fn allocate(byte_length: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(byte_length).is_err() {
            return Err(Error::range("Array buffer allocation failed"));
        }
        bytes.resize(byte_length, 0);
        tracing::trace!(byte_length, "allocating buffer");
        Ok(Self::from(bytes))
    }

    pub(crate) fn zeroed(byte_length: usize) -> Self {
        tracing::trace!(byte_length, "allocating buffer");
        Self {
            data: Rc::new(RefCell::new(vec![0; byte_length])),
        }
    }

    pub fn byte_length(&self) -> usize {
        self.data.borrow().len()
    }

    /// Copy the bytes in `[start, end)` into a new buffer. Negative positions
    /// count from the end; both are clamped to the buffer.
    pub fn slice(&self, start: i64, end: Option<i64>) -> ArrayBuffer {
        let len = self.byte_length();
        let first = relative_position(start, len);
        let last = end.map_or(len, |e| relative_position(e, len));
        let bytes = if first < last {
            self.data.borrow()[first..last].to_vec()
        } else {
            Vec::new()
        };
        ArrayBuffer::from(bytes)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    /// Whether both handles refer to the same storage.
    pub fn same_buffer(&self, other: &ArrayBuffer) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn bytes(&self) -> Ref<'_, Vec<u8>> {
        self.data.borrow()
    }

    pub(crate) fn bytes_mut(&self) -> RefMut<'_, Vec<u8>> {
        self.data.borrow_mut()
    }
}

impl From<Vec<u8>> for ArrayBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            data: Rc::new(RefCell::new(bytes)),
        }
    }
}

impl fmt::Debug for ArrayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("byte_length", &self.byte_length())
            .finish()
    }
}

/// Resolve a relative index against `len`: negative counts from the end,
/// the result is clamped to `[0, len]`.
pub(crate) fn relative_position(rel: i64, len: usize) -> usize {
    let len_i = len as i64;
    if rel < 0 {
        (len_i + rel).max(0) as usize
    } else {
        rel.min(len_i) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn allocates_zeroed() {
        let buf = ArrayBuffer::new(16).unwrap();
        assert_eq!(buf.byte_length(), 16);
        assert!(buf.to_vec().iter().all(|&b| b == 0));
        assert_eq!(ArrayBuffer::new(0).unwrap().byte_length(), 0);
    }

    #[test]
    fn negative_length_is_range_error() {
        let err = ArrayBuffer::new(-1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn oversized_length_is_range_error() {
        let err = ArrayBuffer::new(MAX_SAFE_INTEGER + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn failed_allocation_is_range_error() {
        // Exceeds isize::MAX, so the reservation fails without touching memory.
        let err = ArrayBuffer::allocate(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.message(), "Array buffer allocation failed");
    }

    #[test]
    fn clones_share_storage() {
        let a = ArrayBuffer::new(4).unwrap();
        let b = a.clone();
        b.bytes_mut()[2] = 7;
        assert_eq!(a.to_vec(), vec![0, 0, 7, 0]);
        assert!(a.same_buffer(&b));
        assert!(!a.same_buffer(&ArrayBuffer::new(4).unwrap()));
    }

    #[test]
    fn slice_copies_with_relative_bounds() {
        let buf = ArrayBuffer::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(buf.slice(1, Some(3)).to_vec(), vec![2, 3]);
        assert_eq!(buf.slice(-2, None).to_vec(), vec![4, 5]);
        assert_eq!(buf.slice(3, Some(1)).byte_length(), 0);
        assert_eq!(buf.slice(-100, Some(100)).to_vec(), vec![1, 2, 3, 4, 5]);

        let copy = buf.slice(0, None);
        copy.bytes_mut()[0] = 9;
        assert_eq!(buf.to_vec()[0], 1);
    }

    #[test]
    fn relative_positions_clamp() {
        assert_eq!(relative_position(-1, 4), 3);
        assert_eq!(relative_position(-9, 4), 0);
        assert_eq!(relative_position(9, 4), 4);
        assert_eq!(relative_position(2, 4), 2);
    }
}
