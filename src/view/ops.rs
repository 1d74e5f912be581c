//! Array-style operations shared by every view type.
//!
//! Positions given as `i64` are relative: negative values count back from
//! the end and everything is clamped to `[0, len]`. Callbacks receive the
//! element, its index, and the view being walked.

use super::TypedArray;
use crate::any::AnyTypedArray;
use crate::buffer::relative_position;
use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::types::{Value, number_ops};
use std::cmp::Ordering;

/// Ascending numeric order with `-0` before `+0` and NaN last.
fn default_compare(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(b),
    }
}

fn same_value_zero(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

impl<C: Codec> TypedArray<C> {
    fn range(&self, start: i64, end: Option<i64>) -> (usize, usize) {
        let first = relative_position(start, self.length);
        let last = end.map_or(self.length, |e| relative_position(e, self.length));
        (first, last.max(first))
    }

    pub fn at(&self, index: i64) -> Option<f64> {
        let len = self.length as i64;
        let actual = if index < 0 { len + index } else { index };
        if actual < 0 || actual >= len {
            return None;
        }
        Some(self.read(actual as usize))
    }

    /// Copy elements `[start, end)` to `target`, handling overlap.
    pub fn copy_within(&self, target: i64, start: i64, end: Option<i64>) -> &Self {
        let to = relative_position(target, self.length);
        let (from, last) = self.range(start, end);
        let count = (last - from).min(self.length - to);
        if count > 0 {
            let base = self.byte_offset;
            let src = base + from * C::BYTES;
            let dst = base + to * C::BYTES;
            self.buffer
                .bytes_mut()
                .copy_within(src..src + count * C::BYTES, dst);
        }
        self
    }

    pub fn fill(&self, value: f64, start: i64, end: Option<i64>) -> &Self {
        let (first, last) = self.range(start, end);
        for i in first..last {
            self.write(i, value);
        }
        self
    }

    /// A new view (of the same type) holding the elements `pred` accepts.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        let kept: Vec<f64> = (0..self.length)
            .filter_map(|i| {
                let v = self.read(i);
                pred(v, i, self).then_some(v)
            })
            .collect();
        Self::from_values(&kept)
    }

    pub fn find<F>(&self, pred: F) -> Option<f64>
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        self.find_index(pred).map(|i| self.read(i))
    }

    pub fn find_index<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        (0..self.length).find(|&i| pred(self.read(i), i, self))
    }

    pub fn find_last<F>(&self, pred: F) -> Option<f64>
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        self.find_last_index(pred).map(|i| self.read(i))
    }

    pub fn find_last_index<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        (0..self.length).rev().find(|&i| pred(self.read(i), i, self))
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(f64, usize, &Self),
    {
        for i in 0..self.length {
            f(self.read(i), i, self);
        }
    }

    pub fn every<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        (0..self.length).all(|i| pred(self.read(i), i, self))
    }

    pub fn some<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(f64, usize, &Self) -> bool,
    {
        (0..self.length).any(|i| pred(self.read(i), i, self))
    }

    /// First index holding a value strictly equal to `search`; NaN is never
    /// found and `-0` matches `+0`.
    pub fn index_of(&self, search: f64, from: Option<i64>) -> Option<usize> {
        if search.is_nan() {
            return None;
        }
        let start = relative_position(from.unwrap_or(0), self.length);
        (start..self.length).find(|&i| self.read(i) == search)
    }

    pub fn last_index_of(&self, search: f64, from: Option<i64>) -> Option<usize> {
        if search.is_nan() || self.length == 0 {
            return None;
        }
        let len = self.length as i64;
        let from = from.unwrap_or(len - 1);
        let start = if from < 0 { len + from } else { from.min(len - 1) };
        if start < 0 {
            return None;
        }
        (0..=start as usize).rev().find(|&i| self.read(i) == search)
    }

    /// Like `index_of`, but NaN finds NaN.
    pub fn includes(&self, search: f64, from: Option<i64>) -> bool {
        let start = relative_position(from.unwrap_or(0), self.length);
        (start..self.length).any(|i| same_value_zero(self.read(i), search))
    }

    pub fn join(&self, separator: &str) -> String {
        self.elements()
            .map(number_ops::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// A new view (of the same type) holding `f` applied to each element.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64, usize, &Self) -> f64,
    {
        let out = Self::zeroed(self.length);
        for i in 0..self.length {
            out.write(i, f(self.read(i), i, self));
        }
        out
    }

    /// Fold left to right. Without `initial`, the first element seeds the
    /// accumulator; an empty view then has nothing to fold.
    pub fn reduce<F>(&self, mut f: F, initial: Option<f64>) -> Result<f64>
    where
        F: FnMut(f64, f64, usize, &Self) -> f64,
    {
        let (mut acc, first) = match initial {
            Some(v) => (v, 0),
            None if self.length == 0 => {
                return Err(Error::range("reduce of empty array with no initial value"));
            }
            None => (self.read(0), 1),
        };
        for i in first..self.length {
            acc = f(acc, self.read(i), i, self);
        }
        Ok(acc)
    }

    pub fn reduce_right<F>(&self, mut f: F, initial: Option<f64>) -> Result<f64>
    where
        F: FnMut(f64, f64, usize, &Self) -> f64,
    {
        let (mut acc, end) = match initial {
            Some(v) => (v, self.length),
            None if self.length == 0 => {
                return Err(Error::range(
                    "reduceRight of empty array with no initial value",
                ));
            }
            None => (self.read(self.length - 1), self.length - 1),
        };
        for i in (0..end).rev() {
            acc = f(acc, self.read(i), i, self);
        }
        Ok(acc)
    }

    pub fn reverse(&self) -> &Self {
        let mut lo = 0usize;
        let mut hi = self.length;
        while lo < hi {
            hi -= 1;
            let a = self.read(lo);
            let b = self.read(hi);
            self.write(lo, b);
            self.write(hi, a);
            lo += 1;
        }
        self
    }

    /// Copy `source` into this view starting at element `offset`.
    ///
    /// Nothing is written unless the whole source fits. Element types may
    /// differ; values are converted through the destination codec.
    pub fn set_from_view(&self, source: &AnyTypedArray, offset: usize) -> Result<()> {
        self.check_fits(source.len(), offset)?;
        let same_buffer = self.buffer.same_buffer(source.buffer());
        if source.kind() == C::KIND {
            let bytes = source.byte_range();
            let dst = self.byte_offset + offset * C::BYTES;
            self.buffer.bytes_mut()[dst..dst + bytes.len()].copy_from_slice(&bytes);
        } else if same_buffer {
            // Read everything before writing; the ranges may overlap.
            let values = source.to_vec();
            for (i, v) in values.into_iter().enumerate() {
                self.write(offset + i, v);
            }
        } else {
            for i in 0..source.len() {
                if let Some(v) = source.get(i) {
                    self.write(offset + i, v);
                }
            }
        }
        Ok(())
    }

    pub fn set_from<D: Codec>(&self, source: &TypedArray<D>, offset: usize) -> Result<()> {
        self.set_from_view(&AnyTypedArray::from(source), offset)
    }

    pub fn set_from_slice(&self, values: &[f64], offset: usize) -> Result<()> {
        self.check_fits(values.len(), offset)?;
        for (i, &v) in values.iter().enumerate() {
            self.write(offset + i, v);
        }
        Ok(())
    }

    pub fn set_from_array_like(&self, values: &[Value], offset: usize) -> Result<()> {
        self.check_fits(values.len(), offset)?;
        for (i, v) in values.iter().enumerate() {
            self.write(offset + i, v.to_number());
        }
        Ok(())
    }

    fn check_fits(&self, count: usize, offset: usize) -> Result<()> {
        match offset.checked_add(count) {
            Some(end) if end <= self.length => Ok(()),
            _ => Err(Error::range("offset is out of bounds")),
        }
    }

    /// A copy of elements `[start, end)` in a new buffer.
    pub fn slice(&self, start: i64, end: Option<i64>) -> Self {
        let (first, last) = self.range(start, end);
        let count = last - first;
        let out = Self::zeroed(count);
        if count > 0 {
            let src = self.byte_offset + first * C::BYTES;
            let bytes = self.buffer.bytes()[src..src + count * C::BYTES].to_vec();
            out.buffer.bytes_mut().copy_from_slice(&bytes);
        }
        out
    }

    /// Sort in place in ascending numeric order.
    pub fn sort(&self) -> &Self {
        self.sort_by(default_compare)
    }

    /// Stable sort in place. Elements are copied out, sorted, and written back.
    pub fn sort_by<F>(&self, compare: F) -> &Self
    where
        F: FnMut(&f64, &f64) -> Ordering,
    {
        let mut values = self.to_vec();
        values.sort_by(compare);
        for (i, v) in values.into_iter().enumerate() {
            self.write(i, v);
        }
        self
    }

    /// A view over elements `[start, end)` sharing this view's buffer.
    pub fn subarray(&self, start: i64, end: Option<i64>) -> Self {
        let (first, last) = self.range(start, end);
        Self::from_parts(
            self.buffer.clone(),
            self.byte_offset + first * C::BYTES,
            last - first,
        )
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.elements().collect()
    }

    pub fn to_reversed(&self) -> Self {
        self.elements().rev().collect()
    }

    pub fn to_sorted(&self) -> Self {
        let sorted = self.slice(0, None);
        sorted.sort();
        sorted
    }

    /// A copy with the element at relative `index` replaced.
    pub fn with(&self, index: i64, value: f64) -> Result<Self> {
        let len = self.length as i64;
        let actual = if index < 0 { len + index } else { index };
        if actual < 0 || actual >= len {
            return Err(Error::range("invalid index for with()"));
        }
        let copy = self.slice(0, None);
        copy.write(actual as usize, value);
        Ok(copy)
    }
}
