//! Argument-list entry points for callers that pass loosely typed values.
//!
//! Indices and byte offsets are coerced with ToUint32 and `littleEndian`
//! with ToBoolean. Omitting a required argument is a SyntaxError.

use crate::any::AnyTypedArray;
use crate::codec::ElementKind;
use crate::dataview::DataView;
use crate::error::{Error, Result};
use crate::types::{Value, number_ops};

fn required(args: &[Value], count: usize) -> Result<()> {
    if args.len() < count {
        return Err(Error::syntax("Not enough arguments"));
    }
    Ok(())
}

fn index_arg(value: &Value) -> usize {
    number_ops::to_uint32(value.to_number()) as usize
}

fn flag_arg(args: &[Value], position: usize) -> bool {
    args.get(position).is_some_and(Value::to_boolean)
}

impl AnyTypedArray {
    /// `view[index]`: `Undefined` past the end.
    pub fn get_value(&self, args: &[Value]) -> Result<Value> {
        required(args, 1)?;
        Ok(self.get(index_arg(&args[0])).into())
    }

    /// `view[index] = value`: ignored past the end.
    pub fn set_value(&self, args: &[Value]) -> Result<()> {
        required(args, 2)?;
        self.set(index_arg(&args[0]), args[1].to_number());
        Ok(())
    }
}

impl DataView {
    /// `get<Kind>(byteOffset, littleEndian?)`.
    pub fn get_value(&self, kind: ElementKind, args: &[Value]) -> Result<Value> {
        required(args, 1)?;
        let value = self.get_kind(kind, index_arg(&args[0]), flag_arg(args, 1))?;
        Ok(Value::Number(value))
    }

    /// `set<Kind>(byteOffset, value, littleEndian?)`.
    pub fn set_value(&self, kind: ElementKind, args: &[Value]) -> Result<()> {
        required(args, 2)?;
        self.set_kind(
            kind,
            index_arg(&args[0]),
            args[1].to_number(),
            flag_arg(args, 2),
        )
    }
}
