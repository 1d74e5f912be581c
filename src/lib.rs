//! Typed views over shared byte buffers: `ArrayBuffer`, the nine typed
//! array element formats, and `DataView`.
//!
//! ```
//! use typedshim::{ArrayBuffer, DataView, Float32Array};
//!
//! let buf = ArrayBuffer::new(4)?;
//! let floats = Float32Array::from_buffer(&buf, 0, None)?;
//! floats.set(0, 1.5);
//!
//! let dv = DataView::new(&buf, 0, None)?;
//! assert_eq!(dv.get_uint32(0, false)?, 0x3FC0_0000);
//! # Ok::<(), typedshim::Error>(())
//! ```

pub mod any;
pub mod buffer;
pub mod codec;
pub mod dataview;
pub mod error;
pub mod script;
pub mod types;
pub mod view;

pub use any::AnyTypedArray;
pub use buffer::ArrayBuffer;
pub use codec::{Codec, ElementKind};
pub use dataview::DataView;
pub use error::{Error, ErrorKind, Result};
pub use types::Value;
pub use view::{TypedArray, ViewInit};

pub type Int8Array = TypedArray<codec::Int8>;
pub type Uint8Array = TypedArray<codec::Uint8>;
pub type Uint8ClampedArray = TypedArray<codec::Uint8Clamped>;
pub type Int16Array = TypedArray<codec::Int16>;
pub type Uint16Array = TypedArray<codec::Uint16>;
pub type Int32Array = TypedArray<codec::Int32>;
pub type Uint32Array = TypedArray<codec::Uint32>;
pub type Float32Array = TypedArray<codec::Float32>;
pub type Float64Array = TypedArray<codec::Float64>;
