//! Arrays whose extents are part of the type.
//!
//! `FixedArray1<T, N>` and `FixedArray2<T, R, C>` store their elements inline
//! and can never change size, so they offer no resize, insert or remove
//! operations. They share the read and write surface of the resizable arrays
//! through [`AsView1`] / [`AsView2`].

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::PrintOptions;
use crate::error::{ArrayError, Result};
use crate::scalar::{as_raw, as_raw_mut, RawLayout};
use crate::slice::Slice;
use crate::view::{
    ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, AsView1, AsView2, AsViewMut1,
    AsViewMut2,
};

/// One-dimensional array of exactly `N` elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedArray1<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> FixedArray1<T, N> {
    pub fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_inner(self) -> [T; N] {
        self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.data.get_mut(i)
    }

    pub fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_slice(&self.data)
    }

    pub fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1::from_slice_mut(&mut self.data)
    }

    pub fn slice(&self, slice: impl Into<Slice>) -> Result<ArrayView1<'_, T>> {
        self.view().into_slice(slice)
    }

    pub fn slice_mut(&mut self, slice: impl Into<Slice>) -> Result<ArrayViewMut1<'_, T>> {
        self.view_mut().into_slice_mut(slice)
    }

    /// Exchanges contents element by element.
    pub fn swap(&mut self, other: &mut Self) {
        self.data.swap_with_slice(&mut other.data);
    }

    /// Copies `source` in; its length must be exactly `N`.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: AsView1<T> + ?Sized,
        T: Clone,
    {
        self.view_mut().assign(source)
    }

    pub fn format_with(&self, opts: &PrintOptions) -> String
    where
        T: fmt::Display,
    {
        self.view().format_with(opts)
    }
}

impl<T: Default, const N: usize> FixedArray1<T, N> {
    pub fn new() -> Self {
        Self {
            data: std::array::from_fn(|_| T::default()),
        }
    }
}

impl<T: Clone, const N: usize> FixedArray1<T, N> {
    pub fn from_elem(value: T) -> Self {
        Self {
            data: std::array::from_fn(|_| value.clone()),
        }
    }

    pub fn from_slice(values: &[T]) -> Result<Self> {
        let data: [T; N] = values
            .to_vec()
            .try_into()
            .map_err(|_| ArrayError::shape1(N, values.len()))?;
        Ok(Self { data })
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: RawLayout, const N: usize> FixedArray1<T, N> {
    pub fn blas_data(&self) -> &[T::Raw] {
        as_raw(&self.data)
    }

    pub fn blas_data_mut(&mut self) -> &mut [T::Raw] {
        as_raw_mut(&mut self.data)
    }
}

impl<T: Default, const N: usize> Default for FixedArray1<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray1<T, N> {
    fn from(data: [T; N]) -> Self {
        Self { data }
    }
}

impl<T, const N: usize> AsView1<T> for FixedArray1<T, N> {
    fn view(&self) -> ArrayView1<'_, T> {
        FixedArray1::view(self)
    }
}

impl<T, const N: usize> AsViewMut1<T> for FixedArray1<T, N> {
    fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        FixedArray1::view_mut(self)
    }
}

impl<T, const N: usize> Index<usize> for FixedArray1<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray1<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for FixedArray1<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

/// Two-dimensional array of exactly `R x C` elements, row-major.
///
/// Either both extents are zero or neither is; any other combination fails to
/// compile as soon as a value of the type is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedArray2<T, const R: usize, const C: usize> {
    data: [[T; C]; R],
}

impl<T, const R: usize, const C: usize> FixedArray2<T, R, C> {
    const SHAPE_OK: () = assert!((R == 0) == (C == 0), "only (0, 0) may have an empty axis");

    pub fn from_array(data: [[T; C]; R]) -> Self {
        let () = Self::SHAPE_OK;
        Self { data }
    }

    pub const fn rows(&self) -> usize {
        R
    }

    pub const fn cols(&self) -> usize {
        C
    }

    pub const fn shape(&self) -> (usize, usize) {
        (R, C)
    }

    pub const fn len(&self) -> usize {
        R * C
    }

    pub const fn is_empty(&self) -> bool {
        R * C == 0
    }

    pub fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }

    pub fn into_inner(self) -> [[T; C]; R] {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.data.get_mut(row).and_then(|r| r.get_mut(col))
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        ArrayView2::dense(self.data.as_flattened(), R, C)
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        ArrayViewMut2::dense(self.data.as_flattened_mut(), R, C)
    }

    pub fn view1(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_slice(self.data.as_flattened())
    }

    pub fn slice2(
        &self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayView2<'_, T>> {
        self.view().into_slice2(rows, cols)
    }

    pub fn slice2_mut(
        &mut self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayViewMut2<'_, T>> {
        self.view_mut().into_slice2_mut(rows, cols)
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.data.swap_with_slice(&mut other.data);
    }

    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        self.view_mut().assign(source)
    }
}

impl<T: Default, const R: usize, const C: usize> FixedArray2<T, R, C> {
    pub fn new() -> Self {
        Self::from_array(std::array::from_fn(|_| std::array::from_fn(|_| T::default())))
    }
}

impl<T: Clone, const R: usize, const C: usize> FixedArray2<T, R, C> {
    pub fn from_elem(value: T) -> Self {
        Self::from_array(std::array::from_fn(|_| {
            std::array::from_fn(|_| value.clone())
        }))
    }

    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }
}

impl<T: RawLayout, const R: usize, const C: usize> FixedArray2<T, R, C> {
    pub fn blas_data(&self) -> &[T::Raw] {
        as_raw(self.data.as_flattened())
    }

    pub fn blas_data_mut(&mut self) -> &mut [T::Raw] {
        as_raw_mut(self.data.as_flattened_mut())
    }
}

impl<T: Default, const R: usize, const C: usize> Default for FixedArray2<T, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for FixedArray2<T, R, C> {
    fn from(data: [[T; C]; R]) -> Self {
        Self::from_array(data)
    }
}

impl<T, const R: usize, const C: usize> AsView2<T> for FixedArray2<T, R, C> {
    fn view(&self) -> ArrayView2<'_, T> {
        FixedArray2::view(self)
    }
}

impl<T, const R: usize, const C: usize> AsViewMut2<T> for FixedArray2<T, R, C> {
    fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        FixedArray2::view_mut(self)
    }
}

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for FixedArray2<T, R, C> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0][index.1]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for FixedArray2<T, R, C> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.data[index.0][index.1]
    }
}

impl<T: fmt::Display, const R: usize, const C: usize> fmt::Display for FixedArray2<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}
