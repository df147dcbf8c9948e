//! strict-array: owning numeric arrays with zero-copy slicing views.
//!
//! This crate provides resizable one- and two-dimensional arrays over a single
//! exact-size heap buffer, fixed-size counterparts whose extents live in the
//! type, and borrowed views produced by composable slice descriptors
//! (ranges, strides, parity, reversal, index lists and complements).
//!
//! Every fallible operation validates its arguments before touching any state.
//! Operations that replace an array's contents from a lazily computed source
//! build the replacement off to the side first (see [`commit`]), so a failure
//! leaves the target exactly as it was.
pub mod array;
pub mod commit;
pub mod config;
pub mod error;
pub mod scalar;
pub mod slice;
pub mod storage;
pub mod view;

pub use array::{Array1, Array2, FixedArray1, FixedArray2};
pub use commit::{try_map, zip_with, Replicate, Replicate2};
pub use config::PrintOptions;
pub use error::{ArrayError, ErrorKind, Index, Result};
pub use scalar::{RawLayout, Strict};
pub use slice::{IndexMap, Parity, Slice};
pub use view::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, AsView1, AsView2, AsViewMut1, AsViewMut2};
