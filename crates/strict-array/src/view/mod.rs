//! Non-owning windows over element buffers.
//!
//! A view pairs a borrowed buffer with one [`IndexMap`](crate::slice::IndexMap)
//! per axis. Slicing a view composes maps and never copies elements. Views borrow
//! their owner, so the owner cannot be resized, reallocated or dropped while a
//! view over it is alive; the compiler rejects such code.
//!
//! Owning arrays, fixed-size arrays and views share one read surface through
//! [`AsView1`] / [`AsView2`], resolved statically.
pub mod matrix;
pub mod vector;

use std::fmt;

pub use matrix::{ArrayView2, ArrayViewMut2, Iter2};
pub use vector::{ArrayView1, ArrayViewMut1, Iter};

use crate::array::{Array1, Array2};
use crate::config::PrintOptions;
use crate::error::{Index, Result};
use crate::slice::Slice;

/// One-dimensional read surface.
pub trait AsView1<T> {
    fn view(&self) -> ArrayView1<'_, T>;

    fn view_len(&self) -> usize {
        self.view().len()
    }

    fn slice(&self, slice: impl Into<Slice>) -> Result<ArrayView1<'_, T>> {
        self.view().into_slice(slice)
    }

    fn to_array(&self) -> Array1<T>
    where
        T: Clone,
    {
        self.view().to_owned()
    }
}

/// One-dimensional write surface.
pub trait AsViewMut1<T>: AsView1<T> {
    fn view_mut(&mut self) -> ArrayViewMut1<'_, T>;

    fn slice_mut(&mut self, slice: impl Into<Slice>) -> Result<ArrayViewMut1<'_, T>> {
        self.view_mut().into_slice_mut(slice)
    }
}

/// Two-dimensional read surface.
pub trait AsView2<T> {
    fn view(&self) -> ArrayView2<'_, T>;

    fn view_shape(&self) -> (usize, usize) {
        self.view().shape()
    }

    fn slice2(
        &self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayView2<'_, T>> {
        self.view().into_slice2(rows, cols)
    }

    fn to_array(&self) -> Array2<T>
    where
        T: Clone,
    {
        self.view().to_owned()
    }
}

/// Two-dimensional write surface.
pub trait AsViewMut2<T>: AsView2<T> {
    fn view_mut(&mut self) -> ArrayViewMut2<'_, T>;

    fn slice2_mut(
        &mut self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayViewMut2<'_, T>> {
        self.view_mut().into_slice2_mut(rows, cols)
    }
}

impl<T> AsView1<T> for [T] {
    fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_slice(self)
    }
}

impl<T> AsViewMut1<T> for [T] {
    fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1::from_slice_mut(self)
    }
}

impl<T> AsView1<T> for Vec<T> {
    fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_slice(self)
    }
}

impl<T> AsViewMut1<T> for Vec<T> {
    fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1::from_slice_mut(self)
    }
}

pub(crate) fn fmt_vector<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    opts: &PrintOptions,
    view: &ArrayView1<'_, T>,
) -> fmt::Result {
    let (shown, gap) = opts.visible(view.len());
    if shown.is_empty() && gap.is_some() {
        return write!(f, "[...]");
    }
    write!(f, "[")?;
    for (k, &i) in shown.iter().enumerate() {
        if k > 0 {
            write!(f, ", ")?;
        }
        if gap == Some(k) {
            write!(f, "..., ")?;
        }
        opts.write_value(f, &view[i])?;
    }
    write!(f, "]")
}

pub(crate) fn fmt_matrix<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    opts: &PrintOptions,
    view: &ArrayView2<'_, T>,
) -> fmt::Result {
    let (shown, gap) = opts.visible(view.rows());
    if shown.is_empty() && gap.is_some() {
        return write!(f, "[...]");
    }
    write!(f, "[")?;
    for (k, &i) in shown.iter().enumerate() {
        if k > 0 {
            write!(f, ",\n ")?;
        }
        if gap == Some(k) {
            write!(f, "...,\n ")?;
        }
        let row = view.row(i as Index).map_err(|_| fmt::Error)?;
        fmt_vector(f, opts, &row)?;
    }
    write!(f, "]")
}

/// Adapter that renders a view with explicit [`PrintOptions`].
pub(crate) struct WithOptions<'o, V> {
    pub(crate) value: V,
    pub(crate) opts: &'o PrintOptions,
}

impl<T: fmt::Display> fmt::Display for WithOptions<'_, ArrayView1<'_, T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_vector(f, self.opts, &self.value)
    }
}

impl<T: fmt::Display> fmt::Display for WithOptions<'_, ArrayView2<'_, T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(f, self.opts, &self.value)
    }
}
