use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use num_traits::{One, Zero};

use crate::commit::{self, Replicate2};
use crate::config::PrintOptions;
use crate::error::{check_block, check_dims, check_insert, ArrayError, Index as Idx, Result};
use crate::scalar::{as_raw, as_raw_mut, RawLayout};
use crate::slice::{check_list, Slice};
use crate::storage::Storage;
use crate::view::{
    ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, AsView2, AsViewMut2,
};

/// Resizable two-dimensional array stored row-major: element `(i, j)` lives at
/// offset `i * cols + j`.
///
/// The only empty shape is `(0, 0)`; operations that would leave one axis
/// empty (removing every row, say) produce `(0, 0)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Array2<T> {
    storage: Storage<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        check_dims(rows as Idx, cols as Idx)?;
        if data.len() != rows * cols {
            return Err(ArrayError::Shape {
                expected: (rows, cols),
                actual: (data.len(), 1),
            });
        }
        Ok(Self::from_dense(rows, cols, data))
    }

    /// Builds from rows of equal length; ragged input is a shape error.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(ArrayError::Shape {
                expected: (1, cols),
                actual: (1, bad.len()),
            });
        }
        let nrows = rows.len();
        check_dims(nrows as Idx, cols as Idx)?;
        Ok(Self::from_dense(nrows, cols, rows.into_iter().flatten().collect()))
    }

    /// Caller guarantees `data.len() == rows * cols`; one empty axis collapses to `(0, 0)`.
    pub(crate) fn from_dense(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        let (rows, cols) = if rows == 0 || cols == 0 { (0, 0) } else { (rows, cols) };
        Self {
            storage: Storage::from_vec(data),
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    pub fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Elements in row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.storage.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.storage.as_mut_slice().iter_mut()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.storage.get(self.offset(row, col))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            let offset = self.offset(row, col);
            self.storage.get_mut(offset)
        } else {
            None
        }
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.storage.as_slice()[start..start + self.cols]
    }

    pub fn take(&mut self) -> Self {
        let (rows, cols) = self.shape();
        self.rows = 0;
        self.cols = 0;
        Self {
            storage: self.storage.take(),
            rows,
            cols,
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array2<U>
    where
        F: FnMut(&T) -> U,
    {
        Array2::from_dense(self.rows, self.cols, self.iter().map(|v| f(v)).collect())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn view(&self) -> ArrayView2<'_, T> {
        ArrayView2::dense(self.storage.as_slice(), self.rows, self.cols)
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        let (rows, cols) = self.shape();
        ArrayViewMut2::dense(self.storage.as_mut_slice(), rows, cols)
    }

    /// Flat row-major view of every element.
    pub fn view1(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_slice(self.storage.as_slice())
    }

    pub fn view1_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1::from_slice_mut(self.storage.as_mut_slice())
    }

    /// Reinterprets the elements as a `rows x cols` matrix.
    pub fn view2(&self, rows: Idx, cols: Idx) -> Result<ArrayView2<'_, T>> {
        ArrayView2::from_shape(self.storage.as_slice(), rows, cols)
    }

    pub fn view2_mut(&mut self, rows: Idx, cols: Idx) -> Result<ArrayViewMut2<'_, T>> {
        ArrayViewMut2::from_shape_mut(self.storage.as_mut_slice(), rows, cols)
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

    pub fn row(&self, i: Idx) -> Result<ArrayView1<'_, T>> {
        self.view().row(i)
    }

    pub fn col(&self, j: Idx) -> Result<ArrayView1<'_, T>> {
        self.view().col(j)
    }

    pub fn row_mut(&mut self, i: Idx) -> Result<ArrayViewMut1<'_, T>> {
        let map = self.view().row(i)?.index_map().clone();
        Ok(ArrayViewMut1::from_parts(self.storage.as_mut_slice(), map))
    }

    pub fn col_mut(&mut self, j: Idx) -> Result<ArrayViewMut1<'_, T>> {
        let map = self.view().col(j)?.index_map().clone();
        Ok(ArrayViewMut1::from_parts(self.storage.as_mut_slice(), map))
    }

    // ------------------------------------------------------------------
    // Assignment
    // ------------------------------------------------------------------

    /// Replaces the contents with `rows`, adopting their shape.
    pub fn assign_rows(&mut self, rows: Vec<Vec<T>>) -> Result<()> {
        let replacement = Array2::from_rows(rows)?;
        *self = replacement;
        Ok(())
    }

    /// Copies `source` element by element; shapes must match.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        self.view_mut().assign(source)
    }

    pub fn assign_move(&mut self, source: &mut Array2<T>) {
        *self = source.take();
    }

    /// Replaces the contents with a replica of `source`, adopting its shape.
    ///
    /// The replica is built completely before `self` is modified: if building it
    /// fails, `self` keeps its previous value.
    pub fn resize_and_assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: Replicate2<T> + ?Sized,
    {
        let ((rows, cols), replica) = commit::replicate2(source)?;
        check_dims(rows as Idx, cols as Idx)?;
        commit::install(&mut self.storage, replica);
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    pub fn resize_and_assign_move(&mut self, source: &mut Array2<T>) {
        let (rows, cols) = source.shape();
        let replica = source.take().storage;
        commit::install(&mut self.storage, replica);
        self.rows = rows;
        self.cols = cols;
    }

    // ------------------------------------------------------------------
    // Row and column removal
    // ------------------------------------------------------------------

    pub fn remove_rows(&mut self, pos: Idx, count: Idx) -> Result<()> {
        let start = check_block(pos, count, self.rows)?;
        let end = start + count as usize;
        let cols = self.cols;
        let mut data = self.storage.take().into_vec();
        data.drain(start * cols..end * cols);
        *self = Self::from_dense(self.rows - (end - start), cols, data);
        Ok(())
    }

    pub fn remove_cols(&mut self, pos: Idx, count: Idx) -> Result<()> {
        let start = check_block(pos, count, self.cols)?;
        let end = start + count as usize;
        let cols = self.cols;
        self.retain(self.rows, cols - (end - start), |_, c| c < start || c >= end);
        Ok(())
    }

    /// Removes the listed rows; repeats remove their row once.
    pub fn remove_rows_at(&mut self, indices: &[Idx]) -> Result<()> {
        let gone = mask(&check_list(indices, self.rows)?, self.rows);
        let kept = gone.iter().filter(|d| !**d).count();
        self.retain(kept, self.cols, |r, _| !gone[r]);
        Ok(())
    }

    /// Removes the listed columns; repeats remove their column once.
    pub fn remove_cols_at(&mut self, indices: &[Idx]) -> Result<()> {
        let gone = mask(&check_list(indices, self.cols)?, self.cols);
        let kept = gone.iter().filter(|d| !**d).count();
        self.retain(self.rows, kept, |_, c| !gone[c]);
        Ok(())
    }

    fn retain<F>(&mut self, rows: usize, cols: usize, mut keep: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        let width = self.cols;
        let mut data = self.storage.take().into_vec();
        let mut k = 0;
        data.retain(|_| {
            let (r, c) = (k / width, k % width);
            k += 1;
            keep(r, c)
        });
        *self = Self::from_dense(rows, cols, data);
    }

    // ------------------------------------------------------------------
    // Row and column insertion
    // ------------------------------------------------------------------

    /// Inserts the rows of `block` before row `pos`; the block must have exactly
    /// `cols()` columns.
    pub fn insert_rows<S>(&mut self, pos: Idx, block: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        let at = check_insert(pos, self.rows)?;
        let block = block.view();
        if block.is_empty() {
            return Ok(());
        }
        if block.cols() != self.cols {
            return Err(ArrayError::Shape {
                expected: (block.rows(), self.cols),
                actual: block.shape(),
            });
        }
        let values = block.to_vec();
        let (rows, cols) = (self.rows + block.rows(), self.cols);
        let mut data = self.storage.take().into_vec();
        data.reserve_exact(values.len());
        data.splice(at * cols..at * cols, values);
        *self = Self::from_dense(rows, cols, data);
        Ok(())
    }

    /// Inserts the columns of `block` before column `pos`; the block must have
    /// exactly `rows()` rows.
    pub fn insert_cols<S>(&mut self, pos: Idx, block: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        let at = check_insert(pos, self.cols)?;
        let block = block.view();
        if block.is_empty() {
            return Ok(());
        }
        if block.rows() != self.rows {
            return Err(ArrayError::Shape {
                expected: (self.rows, block.cols()),
                actual: block.shape(),
            });
        }
        let width = block.cols();
        let (rows, cols) = (self.rows, self.cols + width);
        let mut old = self.storage.take().into_vec().into_iter();
        let mut new = block.to_vec().into_iter();
        let mut data = Vec::with_capacity(rows * cols);
        for _ in 0..rows {
            data.extend(old.by_ref().take(at));
            data.extend(new.by_ref().take(width));
            data.extend(old.by_ref().take(self.cols - at));
        }
        *self = Self::from_dense(rows, cols, data);
        Ok(())
    }

    pub fn insert_rows_front<S>(&mut self, block: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        self.insert_rows(0, block)
    }

    pub fn insert_rows_back<S>(&mut self, block: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        self.insert_rows(self.rows as Idx, block)
    }

    pub fn insert_cols_front<S>(&mut self, block: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        self.insert_cols(0, block)
    }

    pub fn insert_cols_back<S>(&mut self, block: &S) -> Result<()>
    where
        S: AsView2<T> + ?Sized,
        T: Clone,
    {
        self.insert_cols(self.cols as Idx, block)
    }

    pub fn format_with(&self, opts: &PrintOptions) -> String
    where
        T: fmt::Display,
    {
        self.view().format_with(opts)
    }
}

fn mask(positions: &[usize], len: usize) -> Vec<bool> {
    let mut m = vec![false; len];
    for &p in positions {
        m[p] = true;
    }
    m
}

impl<T: Default> Array2<T> {
    /// A `rows x cols` array of default values.
    pub fn new(rows: Idx, cols: Idx) -> Result<Self> {
        let (r, c) = check_dims(rows, cols)?;
        let storage = Storage::allocate((r * c) as Idx)?;
        Ok(Self {
            storage,
            rows: r,
            cols: c,
        })
    }

    /// Changes the shape. Contents are discarded and replaced by default values
    /// unless the shape is unchanged, in which case nothing happens.
    pub fn resize(&mut self, rows: Idx, cols: Idx) -> Result<()> {
        let (r, c) = check_dims(rows, cols)?;
        if (r, c) == self.shape() {
            return Ok(());
        }
        log::debug!(
            "resize: reallocating {:?} -> {:?}",
            self.shape(),
            (r, c)
        );
        *self = Self::new(rows, cols)?;
        Ok(())
    }
}

impl<T: Clone> Array2<T> {
    pub fn from_elem(rows: Idx, cols: Idx, value: T) -> Result<Self> {
        let (r, c) = check_dims(rows, cols)?;
        Ok(Self::from_dense(r, c, vec![value; r * c]))
    }

    pub fn from_view(view: &ArrayView2<'_, T>) -> Self {
        view.to_owned()
    }

    pub fn fill(&mut self, value: T) {
        self.storage.as_mut_slice().fill(value);
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Clone + Zero> Array2<T> {
    pub fn zeros(rows: Idx, cols: Idx) -> Result<Self> {
        Self::from_elem(rows, cols, T::zero())
    }
}

impl<T: Clone + One> Array2<T> {
    pub fn ones(rows: Idx, cols: Idx) -> Result<Self> {
        Self::from_elem(rows, cols, T::one())
    }
}

impl<T: RawLayout> Array2<T> {
    /// Row-major elements as their builtin representation.
    pub fn blas_data(&self) -> &[T::Raw] {
        as_raw(self.storage.as_slice())
    }

    pub fn blas_data_mut(&mut self) -> &mut [T::Raw] {
        as_raw_mut(self.storage.as_mut_slice())
    }
}

impl<T> Default for Array2<T> {
    fn default() -> Self {
        Self {
            storage: Storage::new(),
            rows: 0,
            cols: 0,
        }
    }
}

impl<T> AsView2<T> for Array2<T> {
    fn view(&self) -> ArrayView2<'_, T> {
        Array2::view(self)
    }
}

impl<T> AsViewMut2<T> for Array2<T> {
    fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        Array2::view_mut(self)
    }
}

impl<T: Clone> From<ArrayView2<'_, T>> for Array2<T> {
    fn from(value: ArrayView2<'_, T>) -> Self {
        value.to_owned()
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Array2<T> {
    fn from(value: [[T; C]; R]) -> Self {
        let data: Vec<T> = value.into_iter().flatten().collect();
        Self::from_dense(R, C, data)
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of bounds for shape {:?}",
            index,
            self.shape()
        );
        let offset = self.offset(index.0, index.1);
        &self.storage.as_slice()[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of bounds for shape {:?}",
            index,
            self.shape()
        );
        let offset = self.offset(index.0, index.1);
        &mut self.storage.as_mut_slice()[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Array2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn grid() -> Array2<i32> {
        Array2::from_shape_vec((3, 3), (1..=9).collect()).unwrap()
    }

    #[test]
    fn removing_every_row_leaves_empty_shape() {
        let mut a = grid();
        a.remove_rows(0, 3).unwrap();
        assert_eq!(a.shape(), (0, 0));
        assert!(a.as_ptr().is_null());
    }

    #[test]
    fn remove_cols_at_compacts_rows() {
        let mut a = grid();
        a.remove_cols_at(&[2, 0, 2]).unwrap();
        assert_eq!(a.shape(), (3, 1));
        assert_eq!(a.to_vec(), vec![2, 5, 8]);
    }

    #[test]
    fn remove_rows_at_validates_first() {
        let mut a = grid();
        assert_eq!(a.remove_rows_at(&[0, 3]).unwrap_err().kind(), ErrorKind::Bounds);
        assert_eq!(a, grid());
        a.remove_rows_at(&[1]).unwrap();
        assert_eq!(a.to_vec(), vec![1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn insert_cols_interleaves_block() {
        let mut a = Array2::from([[1, 4], [5, 8]]);
        let block = Array2::from([[2, 3], [6, 7]]);
        a.insert_cols(1, &block).unwrap();
        assert_eq!(a.shape(), (2, 4));
        assert_eq!(a.to_vec(), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn display_prints_rows() {
        let a = Array2::from([[1, 2], [3, 4]]);
        assert_eq!(a.to_string(), "[[1, 2],\n [3, 4]]");
    }
}
