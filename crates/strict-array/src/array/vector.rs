use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use num_traits::{One, Zero};

use crate::commit::{self, Replicate};
use crate::config::PrintOptions;
use crate::error::{check_block, check_insert, check_len, ArrayError, Index as Idx, Result};
use crate::scalar::{as_raw, as_raw_mut, RawLayout};
use crate::slice::{check_list, Slice};
use crate::storage::Storage;
use crate::view::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, AsView1, AsViewMut1};

/// Resizable one-dimensional array.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Array1<T> {
    storage: Storage<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            storage: Storage::from_vec(data),
        }
    }

    pub(crate) fn from_storage(storage: Storage<T>) -> Self {
        Self { storage }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn shape(&self) -> (usize,) {
        (self.len(),)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.storage.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.storage.as_mut_slice().iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// The element sequence; empty for an empty array.
    pub fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Pointer to the first element, null for an empty array.
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.storage.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.storage.get_mut(i)
    }

    /// Moves the contents out, leaving `self` empty with a null data pointer.
    pub fn take(&mut self) -> Self {
        Self {
            storage: self.storage.take(),
        }
    }

    /// Exchanges contents with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array1<U>
    where
        F: FnMut(&T) -> U,
    {
        Array1::from_vec(self.iter().map(|v| f(v)).collect())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_slice(self.storage.as_slice())
    }

    pub fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1::from_slice_mut(self.storage.as_mut_slice())
    }

    pub fn slice(&self, slice: impl Into<Slice>) -> Result<ArrayView1<'_, T>> {
        self.view().into_slice(slice)
    }

    pub fn slice_mut(&mut self, slice: impl Into<Slice>) -> Result<ArrayViewMut1<'_, T>> {
        self.view_mut().into_slice_mut(slice)
    }

    /// Views the elements as a `rows x cols` row-major matrix.
    pub fn view2(&self, rows: Idx, cols: Idx) -> Result<ArrayView2<'_, T>> {
        ArrayView2::from_shape(self.storage.as_slice(), rows, cols)
    }

    pub fn view2_mut(&mut self, rows: Idx, cols: Idx) -> Result<ArrayViewMut2<'_, T>> {
        ArrayViewMut2::from_shape_mut(self.storage.as_mut_slice(), rows, cols)
    }

    // ------------------------------------------------------------------
    // Assignment
    // ------------------------------------------------------------------

    /// Replaces the contents with `list`, adopting its length.
    pub fn assign_list(&mut self, list: impl Into<Vec<T>>) {
        self.storage = Storage::from_vec(list.into());
    }

    /// Copies `source` element by element; lengths must match.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: AsView1<T> + ?Sized,
        T: Clone,
    {
        self.view_mut().assign(source)
    }

    /// Takes over the contents of `source`, which is left empty.
    pub fn assign_move(&mut self, source: &mut Array1<T>) {
        self.storage = source.storage.take();
    }

    /// Replaces the contents with a replica of `source`, adopting its length.
    ///
    /// The replica is built completely before `self` is modified: if building it
    /// fails, `self` keeps its previous value.
    pub fn resize_and_assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: Replicate<T> + ?Sized,
    {
        let replica = commit::replicate(source)?;
        commit::install(&mut self.storage, replica);
        Ok(())
    }

    /// Takes over the contents of `source`; `source` is emptied once the new
    /// value is in place.
    pub fn resize_and_assign_move(&mut self, source: &mut Array1<T>) {
        let replica = source.storage.take();
        commit::install(&mut self.storage, replica);
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Removes `count` elements starting at `pos`.
    pub fn remove(&mut self, pos: Idx, count: Idx) -> Result<()> {
        let start = check_block(pos, count, self.len())?;
        let mut data = self.storage.take().into_vec();
        data.drain(start..start + count as usize);
        self.storage = Storage::from_vec(data);
        Ok(())
    }

    pub fn remove_front(&mut self, count: Idx) -> Result<()> {
        self.remove(0, count)
    }

    pub fn remove_back(&mut self, count: Idx) -> Result<()> {
        if count <= 0 {
            return self.remove(0, count);
        }
        self.remove(self.len() as Idx - count, count)
    }

    /// Removes the elements at the listed positions. Repeated positions remove
    /// their element once; an empty list leaves the array unchanged.
    pub fn remove_indices(&mut self, indices: &[Idx]) -> Result<()> {
        let positions = check_list(indices, self.len())?;
        if positions.is_empty() {
            return Ok(());
        }
        let mut keep = vec![true; self.len()];
        for p in positions {
            keep[p] = false;
        }
        let mut data = self.storage.take().into_vec();
        let mut k = 0;
        data.retain(|_| {
            k += 1;
            keep[k - 1]
        });
        self.storage = Storage::from_vec(data);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Inserts `value` before position `pos`; `pos == len()` appends.
    pub fn insert(&mut self, pos: Idx, value: T) -> Result<()> {
        let at = check_insert(pos, self.len())?;
        self.splice_in(at, vec![value]);
        Ok(())
    }

    /// Inserts a copy of every element of `source` before position `pos`.
    pub fn insert_slice<S>(&mut self, pos: Idx, source: &S) -> Result<()>
    where
        S: AsView1<T> + ?Sized,
        T: Clone,
    {
        let at = check_insert(pos, self.len())?;
        let values = source.view().to_vec();
        self.splice_in(at, values);
        Ok(())
    }

    pub fn insert_front(&mut self, value: T) {
        self.splice_in(0, vec![value]);
    }

    pub fn insert_back(&mut self, value: T) {
        let end = self.len();
        self.splice_in(end, vec![value]);
    }

    pub fn insert_front_slice<S>(&mut self, source: &S)
    where
        S: AsView1<T> + ?Sized,
        T: Clone,
    {
        let values = source.view().to_vec();
        self.splice_in(0, values);
    }

    pub fn insert_back_slice<S>(&mut self, source: &S)
    where
        S: AsView1<T> + ?Sized,
        T: Clone,
    {
        let values = source.view().to_vec();
        let end = self.len();
        self.splice_in(end, values);
    }

    fn splice_in(&mut self, at: usize, values: Vec<T>) {
        if values.is_empty() {
            return;
        }
        let mut data = self.storage.take().into_vec();
        data.reserve_exact(values.len());
        data.splice(at..at, values);
        self.storage = Storage::from_vec(data);
    }

    pub fn format_with(&self, opts: &PrintOptions) -> String
    where
        T: fmt::Display,
    {
        self.view().format_with(opts)
    }
}

impl<T: Default> Array1<T> {
    /// `len` default-valued elements (zero for the builtin numerics).
    pub fn new(len: Idx) -> Result<Self> {
        Ok(Self::from_storage(Storage::allocate(len)?))
    }

    /// Changes the length to `len`. Contents are discarded and replaced by
    /// default values unless the length is unchanged, in which case nothing
    /// happens.
    pub fn resize(&mut self, len: Idx) -> Result<()> {
        let n = check_len(len)?;
        if n == self.len() {
            return Ok(());
        }
        log::debug!("resize: reallocating {} -> {} elements", self.len(), n);
        self.storage = Storage::allocate(len)?;
        Ok(())
    }
}

impl<T: Clone> Array1<T> {
    pub fn from_elem(len: Idx, value: T) -> Result<Self> {
        Ok(Self::from_storage(Storage::filled(len, value)?))
    }

    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Copies `source[begin..end]`.
    pub fn from_range(source: &[T], begin: Idx, end: Idx) -> Result<Self> {
        if begin > end {
            return Err(ArrayError::Range { begin, end });
        }
        if begin < 0 {
            return Err(ArrayError::Bounds {
                index: begin,
                bound: source.len(),
            });
        }
        if end as usize > source.len() {
            return Err(ArrayError::Bounds {
                index: end,
                bound: source.len(),
            });
        }
        Ok(Self::from_slice(&source[begin as usize..end as usize]))
    }

    /// Deep copy of whatever `view` selects.
    pub fn from_view(view: &ArrayView1<'_, T>) -> Self {
        view.to_owned()
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.storage.as_mut_slice().fill(value);
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Clone + Zero> Array1<T> {
    pub fn zeros(len: Idx) -> Result<Self> {
        Self::from_elem(len, T::zero())
    }
}

impl<T: Clone + One> Array1<T> {
    pub fn ones(len: Idx) -> Result<Self> {
        Self::from_elem(len, T::one())
    }
}

impl<T: RawLayout> Array1<T> {
    /// Elements as their builtin representation, for external numeric routines.
    pub fn blas_data(&self) -> &[T::Raw] {
        as_raw(self.storage.as_slice())
    }

    pub fn blas_data_mut(&mut self) -> &mut [T::Raw] {
        as_raw_mut(self.storage.as_mut_slice())
    }
}

impl<T> Default for Array1<T> {
    fn default() -> Self {
        Self {
            storage: Storage::new(),
        }
    }
}

impl<T> AsView1<T> for Array1<T> {
    fn view(&self) -> ArrayView1<'_, T> {
        Array1::view(self)
    }
}

impl<T> AsViewMut1<T> for Array1<T> {
    fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        Array1::view_mut(self)
    }
}

impl<T> From<Vec<T>> for Array1<T> {
    fn from(value: Vec<T>) -> Self {
        Array1::from_vec(value)
    }
}

impl<T, const N: usize> From<[T; N]> for Array1<T> {
    fn from(value: [T; N]) -> Self {
        Array1::from_vec(Vec::from(value))
    }
}

impl<T: Clone> From<ArrayView1<'_, T>> for Array1<T> {
    fn from(value: ArrayView1<'_, T>) -> Self {
        value.to_owned()
    }
}

impl<T> From<Array1<T>> for Vec<T> {
    fn from(value: Array1<T>) -> Self {
        value.into_vec()
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Array1<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array1<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Array1<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.storage.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for Array1<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.storage.as_mut_slice()[index]
    }
}

impl<T: fmt::Display> fmt::Display for Array1<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn remove_back_counts_from_the_end() {
        let mut a = Array1::from_vec(vec![1, 2, 3, 4]);
        a.remove_back(3).unwrap();
        assert_eq!(a.as_slice(), &[1]);
        assert_eq!(a.remove_back(2).unwrap_err().kind(), ErrorKind::Bounds);
        assert_eq!(a.remove_back(0).unwrap_err().kind(), ErrorKind::Argument);
    }

    #[test]
    fn remove_indices_ignores_repeats() {
        let mut a = Array1::from_vec(vec![0, 1, 2, 3, 4]);
        a.remove_indices(&[3, 0, 3]).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 4]);
        assert_eq!(a.remove_indices(&[3]).unwrap_err().kind(), ErrorKind::Bounds);
        assert_eq!(a.as_slice(), &[1, 2, 4]);
    }

    #[test]
    fn splice_keeps_exact_length() {
        let mut a = Array1::from_vec(vec![1, 4]);
        a.insert_slice(1, &[2, 3][..]).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn display_uses_print_options() {
        let a: Array1<i32> = (0..20).collect();
        assert_eq!(a.format_with(&PrintOptions::compact()), "[0, 1, ..., 18, 19]");
        assert_eq!(Array1::from_vec(vec![1.5f64]).to_string(), "[1.5]");
    }
}
