use std::fmt;
use std::ops::{Index, IndexMut};

use crate::array::Array1;
use crate::config::PrintOptions;
use crate::error::{ArrayError, Index as Idx, Result};
use crate::slice::{IndexMap, Positions, Slice};
use crate::view::{fmt_vector, AsView1, AsViewMut1, WithOptions};

/// Shared one-dimensional view.
pub struct ArrayView1<'a, T> {
    base: &'a [T],
    map: IndexMap,
}

impl<'a, T> ArrayView1<'a, T> {
    /// Views an externally owned buffer as a whole.
    pub fn from_slice(base: &'a [T]) -> Self {
        Self {
            map: IndexMap::identity(base.len()),
            base,
        }
    }

    pub(crate) fn from_parts(base: &'a [T], map: IndexMap) -> Self {
        debug_assert!(map.max_position().map_or(true, |p| p < base.len()));
        Self { base, map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn index_map(&self) -> &IndexMap {
        &self.map
    }

    pub fn get(&self, i: usize) -> Option<&'a T> {
        let base = self.base;
        self.map.get(i).map(|p| &base[p])
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            base: self.base,
            positions: self.map.iter(),
        }
    }

    pub fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1 {
            base: self.base,
            map: self.map.clone(),
        }
    }

    /// Slices the view again; the result borrows the same buffer.
    pub fn slice(&self, slice: impl Into<Slice>) -> Result<ArrayView1<'a, T>> {
        let inner = slice.into().resolve(self.len())?;
        Ok(ArrayView1::from_parts(self.base, self.map.compose(&inner)))
    }

    pub fn into_slice(self, slice: impl Into<Slice>) -> Result<ArrayView1<'a, T>> {
        self.slice(slice)
    }

    /// The selected elements as a plain slice, when they are contiguous and ascending.
    pub fn as_slice(&self) -> Option<&'a [T]> {
        if self.map.is_empty() {
            return Some(&[]);
        }
        if !self.map.is_contiguous() {
            return None;
        }
        let start = self.map.at(0);
        Some(&self.base[start..start + self.len()])
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Deep copy into a new owning array.
    pub fn to_owned(&self) -> Array1<T>
    where
        T: Clone,
    {
        Array1::from_vec(self.to_vec())
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

impl<T> Clone for ArrayView1<'_, T> {
    fn clone(&self) -> Self {
        ArrayView1 {
            base: self.base,
            map: self.map.clone(),
        }
    }
}

impl<T> AsView1<T> for ArrayView1<'_, T> {
    fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::view(self)
    }
}

impl<T> Index<usize> for ArrayView1<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.map.get(index) {
            Some(p) => &self.base[p],
            None => panic!("index {} out of bounds for view of length {}", index, self.len()),
        }
    }
}

impl<'s, T> IntoIterator for &'s ArrayView1<'_, T> {
    type Item = &'s T;
    type IntoIter = Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for ArrayView1<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayView1<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayView1<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_vector(f, &PrintOptions::default(), self)
    }
}

/// Exclusive one-dimensional view.
///
/// Writes go straight to the borrowed buffer. When the view was produced from
/// an explicit index list with repeated positions, several logical positions
/// name the same element: bulk writes (`assign`, `fill`, `for_each_mut`) then
/// store into that element more than once, in an unspecified order.
pub struct ArrayViewMut1<'a, T> {
    base: &'a mut [T],
    map: IndexMap,
}

impl<'a, T> ArrayViewMut1<'a, T> {
    pub fn from_slice_mut(base: &'a mut [T]) -> Self {
        Self {
            map: IndexMap::identity(base.len()),
            base,
        }
    }

    pub(crate) fn from_parts(base: &'a mut [T], map: IndexMap) -> Self {
        debug_assert!(map.max_position().map_or(true, |p| p < base.len()));
        Self { base, map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn index_map(&self) -> &IndexMap {
        &self.map
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.map.get(i).map(|p| &self.base[p])
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        match self.map.get(i) {
            Some(p) => Some(&mut self.base[p]),
            None => None,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            base: &*self.base,
            positions: self.map.iter(),
        }
    }

    pub fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from_parts(&*self.base, self.map.clone())
    }

    pub fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1 {
            base: &mut *self.base,
            map: self.map.clone(),
        }
    }

    pub fn slice(&self, slice: impl Into<Slice>) -> Result<ArrayView1<'_, T>> {
        self.view().into_slice(slice)
    }

    pub fn slice_mut(&mut self, slice: impl Into<Slice>) -> Result<ArrayViewMut1<'_, T>> {
        self.view_mut().into_slice_mut(slice)
    }

    pub fn into_slice_mut(self, slice: impl Into<Slice>) -> Result<ArrayViewMut1<'a, T>> {
        let inner = slice.into().resolve(self.len())?;
        let map = self.map.compose(&inner);
        Ok(ArrayViewMut1::from_parts(self.base, map))
    }

    /// Calls `f` on every selected element in logical order.
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for p in self.map.iter() {
            f(&mut self.base[p]);
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|x| *x = value.clone());
    }

    /// Copies `source` into the selected elements.
    ///
    /// A view cannot change the extent of its buffer, so the source must have
    /// exactly as many elements as the view.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: AsView1<T> + ?Sized,
        T: Clone,
    {
        let source = source.view();
        if source.len() != self.len() {
            return Err(ArrayError::shape1(self.len(), source.len()));
        }
        for (p, value) in self.map.iter().zip(source.iter()) {
            self.base[p] = value.clone();
        }
        Ok(())
    }

    /// Writes `value` at logical position `i`.
    pub fn set(&mut self, i: Idx, value: T) -> Result<()> {
        let bound = self.len();
        let slot = usize::try_from(i)
            .ok()
            .and_then(|i| self.get_mut(i))
            .ok_or(ArrayError::Bounds { index: i, bound })?;
        *slot = value;
        Ok(())
    }

    pub fn to_owned(&self) -> Array1<T>
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

impl<T> AsView1<T> for ArrayViewMut1<'_, T> {
    fn view(&self) -> ArrayView1<'_, T> {
        ArrayViewMut1::view(self)
    }
}

impl<T> AsViewMut1<T> for ArrayViewMut1<'_, T> {
    fn view_mut(&mut self) -> ArrayViewMut1<'_, T> {
        ArrayViewMut1::view_mut(self)
    }
}

impl<T> Index<usize> for ArrayViewMut1<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.map.get(index) {
            Some(p) => &self.base[p],
            None => panic!("index {} out of bounds for view of length {}", index, self.len()),
        }
    }
}

impl<T> IndexMut<usize> for ArrayViewMut1<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.map.get(index) {
            Some(p) => &mut self.base[p],
            None => panic!("index {} out of bounds for view of length {}", index, self.len()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayViewMut1<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayViewMut1<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_vector(f, &PrintOptions::default(), &self.view())
    }
}

/// Iterator over the elements of a one-dimensional view.
#[derive(Debug, Clone)]
pub struct Iter<'s, T> {
    base: &'s [T],
    positions: Positions<'s>,
}

impl<'s, T> Iterator for Iter<'s, T> {
    type Item = &'s T;

    fn next(&mut self) -> Option<&'s T> {
        let base = self.base;
        self.positions.next().map(|p| &base[p])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let base = self.base;
        self.positions.next_back().map(|p| &base[p])
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_over_external_buffer() {
        let data = [1, 2, 3, 4, 5];
        let v = ArrayView1::from_slice(&data);
        assert_eq!(v.len(), 5);
        assert_eq!(v.slice(Slice::odd()).unwrap().to_vec(), vec![2, 4]);
    }

    #[test]
    fn contiguous_selection_exposes_slice() {
        let data = [1, 2, 3, 4, 5];
        let v = ArrayView1::from_slice(&data);
        assert_eq!(v.slice(Slice::last(2)).unwrap().as_slice(), Some(&[4, 5][..]));
        assert_eq!(v.slice(Slice::even()).unwrap().as_slice(), None);
    }

    #[test]
    fn mutable_view_writes_through() {
        let mut data = vec![0; 6];
        {
            let mut v = ArrayViewMut1::from_slice_mut(&mut data);
            let mut evens = v.slice_mut(Slice::even()).unwrap();
            evens.fill(1);
            evens[2] = 9;
        }
        assert_eq!(data, vec![1, 0, 1, 0, 9, 0]);
    }

    #[test]
    fn set_reports_bounds() {
        let mut data = vec![0; 2];
        let mut v = ArrayViewMut1::from_slice_mut(&mut data);
        assert!(v.set(-1, 3).is_err());
        assert!(v.set(2, 3).is_err());
        v.set(1, 3).unwrap();
        assert_eq!(data, vec![0, 3]);
    }
}
