use std::fmt;
use std::ops::{Index, IndexMut};

use crate::array::Array2;
use crate::config::PrintOptions;
use crate::error::{check_dims, ArrayError, Index as Idx, Result};
use crate::slice::{IndexMap, Slice};
use crate::view::{fmt_matrix, ArrayView1, ArrayViewMut1, AsView2, AsViewMut2, WithOptions};

/// Row and column maps over a row-major buffer with leading dimension `ld`.
///
/// Element `(i, j)` lives at `rows.at(i) * ld + cols.at(j)`. A layout with one
/// empty axis is normalised to `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    ld: usize,
    rows: IndexMap,
    cols: IndexMap,
}

impl Layout {
    fn dense(rows: usize, cols: usize) -> Self {
        Layout {
            ld: cols,
            rows: IndexMap::identity(rows),
            cols: IndexMap::identity(cols),
        }
        .normalized()
    }

    fn checked(len: usize, rows: Idx, cols: Idx) -> Result<Self> {
        let (r, c) = check_dims(rows, cols)?;
        if r * c != len {
            return Err(ArrayError::Shape {
                expected: (len, 1),
                actual: (r, c),
            });
        }
        Ok(Layout::dense(r, c))
    }

    fn normalized(self) -> Self {
        if self.rows.is_empty() || self.cols.is_empty() {
            Layout {
                ld: self.ld,
                rows: IndexMap::empty(),
                cols: IndexMap::empty(),
            }
        } else {
            self
        }
    }

    fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        let r = self.rows.get(i)?;
        let c = self.cols.get(j)?;
        Some(r * self.ld + c)
    }

    fn slice(&self, rows: Slice, cols: Slice) -> Result<Self> {
        let r = rows.resolve(self.rows.len())?;
        let c = cols.resolve(self.cols.len())?;
        Ok(Layout {
            ld: self.ld,
            rows: self.rows.compose(&r),
            cols: self.cols.compose(&c),
        }
        .normalized())
    }

    fn row(&self, i: Idx) -> Result<IndexMap> {
        let r = self.axis(&self.rows, i)?;
        Ok(self.cols.affine(1, r * self.ld))
    }

    fn col(&self, j: Idx) -> Result<IndexMap> {
        let c = self.axis(&self.cols, j)?;
        Ok(self.rows.affine(self.ld, c))
    }

    fn axis(&self, map: &IndexMap, i: Idx) -> Result<usize> {
        usize::try_from(i)
            .ok()
            .and_then(|i| map.get(i))
            .ok_or(ArrayError::Bounds {
                index: i,
                bound: map.len(),
            })
    }

    fn flat(&self) -> Positions2<'_> {
        Positions2 {
            layout: self,
            front: 0,
            back: self.rows.len() * self.cols.len(),
        }
    }
}

/// Row-major walk over the positions of a [`Layout`].
#[derive(Debug, Clone)]
struct Positions2<'s> {
    layout: &'s Layout,
    front: usize,
    back: usize,
}

impl Positions2<'_> {
    fn flat_offset(&self, k: usize) -> usize {
        let cols = self.layout.cols.len();
        self.layout.rows.at(k / cols) * self.layout.ld + self.layout.cols.at(k % cols)
    }
}

impl Iterator for Positions2<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.front == self.back {
            return None;
        }
        let p = self.flat_offset(self.front);
        self.front += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Positions2<'_> {
    fn next_back(&mut self) -> Option<usize> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.flat_offset(self.back))
    }
}

/// Shared two-dimensional view.
pub struct ArrayView2<'a, T> {
    base: &'a [T],
    layout: Layout,
}

impl<'a, T> ArrayView2<'a, T> {
    /// Views an external row-major buffer as a `rows x cols` matrix.
    pub fn from_shape(base: &'a [T], rows: Idx, cols: Idx) -> Result<Self> {
        let layout = Layout::checked(base.len(), rows, cols)?;
        Ok(Self { base, layout })
    }

    pub(crate) fn dense(base: &'a [T], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(rows * cols, base.len());
        Self {
            base,
            layout: Layout::dense(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.layout.cols.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.layout.shape()
    }

    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&'a T> {
        let base = self.base;
        self.layout.offset(i, j).map(|p| &base[p])
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        ArrayView2 {
            base: self.base,
            layout: self.layout.clone(),
        }
    }

    pub fn slice2(
        &self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayView2<'a, T>> {
        Ok(ArrayView2 {
            base: self.base,
            layout: self.layout.slice(rows.into(), cols.into())?,
        })
    }

    pub fn into_slice2(
        self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayView2<'a, T>> {
        self.slice2(rows, cols)
    }

    pub fn row(&self, i: Idx) -> Result<ArrayView1<'a, T>> {
        Ok(ArrayView1::from_parts(self.base, self.layout.row(i)?))
    }

    pub fn col(&self, j: Idx) -> Result<ArrayView1<'a, T>> {
        Ok(ArrayView1::from_parts(self.base, self.layout.col(j)?))
    }

    /// Elements in row-major order.
    pub fn iter(&self) -> Iter2<'_, T> {
        Iter2 {
            base: self.base,
            positions: self.layout.flat(),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn to_owned(&self) -> Array2<T>
    where
        T: Clone,
    {
        Array2::from_dense(self.rows(), self.cols(), self.to_vec())
    }

    pub fn format_with(&self, opts: &PrintOptions) -> String
    where
        T: fmt::Display,
    {
        WithOptions {
            value: self.view(),
            opts,
        }
        .to_string()
    }
}

impl<T> Clone for ArrayView2<'_, T> {
    fn clone(&self) -> Self {
        ArrayView2 {
            base: self.base,
            layout: self.layout.clone(),
        }
    }
}

impl<T> AsView2<T> for ArrayView2<'_, T> {
    fn view(&self) -> ArrayView2<'_, T> {
        ArrayView2::view(self)
    }
}

impl<T> Index<(usize, usize)> for ArrayView2<'_, T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        match self.layout.offset(i, j) {
            Some(p) => &self.base[p],
            None => panic!("index ({}, {}) out of bounds for view of shape {:?}", i, j, self.shape()),
        }
    }
}

impl<T: PartialEq> PartialEq for ArrayView2<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayView2<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for i in 0..self.rows() {
            if let Ok(row) = self.row(i as Idx) {
                list.entry(&row);
            }
        }
        list.finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayView2<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(f, &PrintOptions::default(), self)
    }
}

/// Exclusive two-dimensional view.
///
/// As with [`ArrayViewMut1`], repeated row or column positions make bulk writes
/// store into the same element several times, in an unspecified order.
pub struct ArrayViewMut2<'a, T> {
    base: &'a mut [T],
    layout: Layout,
}

impl<'a, T> ArrayViewMut2<'a, T> {
    pub fn from_shape_mut(base: &'a mut [T], rows: Idx, cols: Idx) -> Result<Self> {
        let layout = Layout::checked(base.len(), rows, cols)?;
        Ok(Self { base, layout })
    }

    pub(crate) fn dense(base: &'a mut [T], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(rows * cols, base.len());
        Self {
            base,
            layout: Layout::dense(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.layout.cols.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.layout.shape()
    }

    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.layout.offset(i, j).map(|p| &self.base[p])
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        match self.layout.offset(i, j) {
            Some(p) => Some(&mut self.base[p]),
            None => None,
        }
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        ArrayView2 {
            base: &*self.base,
            layout: self.layout.clone(),
        }
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        ArrayViewMut2 {
            base: &mut *self.base,
            layout: self.layout.clone(),
        }
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

    pub fn into_slice2_mut(
        self,
        rows: impl Into<Slice>,
        cols: impl Into<Slice>,
    ) -> Result<ArrayViewMut2<'a, T>> {
        let layout = self.layout.slice(rows.into(), cols.into())?;
        Ok(ArrayViewMut2 {
            base: self.base,
            layout,
        })
    }

    pub fn row(&self, i: Idx) -> Result<ArrayView1<'_, T>> {
        Ok(ArrayView1::from_parts(&*self.base, self.layout.row(i)?))
    }

    pub fn col(&self, j: Idx) -> Result<ArrayView1<'_, T>> {
        Ok(ArrayView1::from_parts(&*self.base, self.layout.col(j)?))
    }

    pub fn row_mut(&mut self, i: Idx) -> Result<ArrayViewMut1<'_, T>> {
        let map = self.layout.row(i)?;
        Ok(ArrayViewMut1::from_parts(&mut *self.base, map))
    }

    pub fn col_mut(&mut self, j: Idx) -> Result<ArrayViewMut1<'_, T>> {
        let map = self.layout.col(j)?;
        Ok(ArrayViewMut1::from_parts(&mut *self.base, map))
    }

    pub fn iter(&self) -> Iter2<'_, T> {
        Iter2 {
            base: &*self.base,
            positions: self.layout.flat(),
        }
    }

    /// Calls `f` on every selected element in row-major order.
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for p in self.layout.flat() {
            f(&mut self.base[p]);
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|x| *x = value.clone());
    }

    /// Copies `source` into the selected elements; shapes must match exactly.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        let source = source.view();
        if source.shape() != self.shape() {
            return Err(ArrayError::Shape {
                expected: self.shape(),
                actual: source.shape(),
            });
        }
        for (p, value) in self.layout.flat().zip(source.iter()) {
            self.base[p] = value.clone();
        }
        Ok(())
    }

    pub fn to_owned(&self) -> Array2<T>
    where
        T: Clone,
    {
        self.view().to_owned()
    }

    pub fn format_with(&self, opts: &PrintOptions) -> String
    where
        T: fmt::Display,
    {
        self.view().format_with(opts)
    }
}

impl<T> AsView2<T> for ArrayViewMut2<'_, T> {
    fn view(&self) -> ArrayView2<'_, T> {
        ArrayViewMut2::view(self)
    }
}

impl<T> AsViewMut2<T> for ArrayViewMut2<'_, T> {
    fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        ArrayViewMut2::view_mut(self)
    }
}

impl<T> Index<(usize, usize)> for ArrayViewMut2<'_, T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        match self.layout.offset(i, j) {
            Some(p) => &self.base[p],
            None => panic!("index ({}, {}) out of bounds for view of shape {:?}", i, j, self.shape()),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for ArrayViewMut2<'_, T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        match self.layout.offset(i, j) {
            Some(p) => &mut self.base[p],
            None => panic!("index ({}, {}) out of bounds for view of shape {:?}", i, j, self.shape()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayViewMut2<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}

impl<T: fmt::Display> fmt::Display for ArrayViewMut2<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(f, &PrintOptions::default(), &self.view())
    }
}

/// Row-major iterator over the elements of a two-dimensional view.
#[derive(Debug, Clone)]
pub struct Iter2<'s, T> {
    base: &'s [T],
    positions: Positions2<'s>,
}

impl<'s, T> Iterator for Iter2<'s, T> {
    type Item = &'s T;

    fn next(&mut self) -> Option<&'s T> {
        let base = self.base;
        self.positions.next().map(|p| &base[p])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter2<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let base = self.base;
        self.positions.next_back().map(|p| &base[p])
    }
}

impl<T> ExactSizeIterator for Iter2<'_, T> {}
