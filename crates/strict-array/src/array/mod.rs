//! Owning arrays.
//!
//! Provides the resizable `Array1` (1D) and `Array2` (2D, row-major) containers
//! and their fixed-size counterparts. Every mutating method validates its
//! arguments before touching the array, and the `resize_and_assign` family
//! builds the new value off to the side before committing it.
pub mod fixed;
pub mod matrix;
pub mod vector;

pub use fixed::{FixedArray1, FixedArray2};
pub use matrix::Array2;
pub use vector::Array1;
