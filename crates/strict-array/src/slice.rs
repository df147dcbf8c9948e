//! Declarative slice descriptors and their resolution into index maps.
//!
//! A [`Slice`] describes *which* positions of an axis to select. Resolving it
//! against an axis length yields an [`IndexMap`], the canonical, bounds-checked
//! sequence of selected positions. Views carry index maps and compose them when
//! sliced again, so no element is ever copied by slicing.
//!
//! Resolution rules:
//!
//! - A descriptor that selects nothing is always valid, whatever its other
//!   parameters are (`Slice::range(-5, 0, 100)` resolves to an empty map).
//! - Strides, steps and counts that make no sense on their own are
//!   [`ArgumentError`](crate::ArrayError::Argument)s.
//! - Positions outside the axis are
//!   [`BoundsError`](crate::ArrayError::Bounds)s.

use std::ops;

use crate::error::{ArrayError, Index, Result};

/// Which half of an axis [`Slice::Parity`] selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

/// A slice descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Every position, in order.
    All,
    /// `count` positions starting at `first`, `stride` apart. The stride may be
    /// negative, and may be zero when `count <= 1`.
    Range {
        first: Index,
        count: Index,
        stride: Index,
    },
    /// Positions from `first` towards `last` (exclusive), `stride` apart. The
    /// stride sign must agree with the direction from `first` to `last`.
    RangeEndpoints {
        first: Index,
        last: Index,
        stride: Index,
    },
    /// Positions `0, k, 2k, ...`.
    SkipEvery(Index),
    /// The first `n` positions.
    FirstN(Index),
    /// The last `n` positions.
    LastN(Index),
    /// Even or odd positions.
    Parity(Parity),
    /// Every position, back to front.
    Reverse,
    /// Explicit positions, in the given order. Repeats are allowed and alias the
    /// same element.
    ///
    /// Reading through repeated positions is well defined. Writing through them
    /// (`assign`, `fill`, `for_each_mut` on a mutable view) writes the same
    /// element several times and the order of those writes is unspecified:
    /// callers must not rely on which value ends up stored.
    IndexList(Vec<Index>),
    /// Every position not named in the list, ascending.
    Complement(Vec<Index>),
}

impl Slice {
    pub fn range(first: Index, count: Index, stride: Index) -> Self {
        Slice::Range {
            first,
            count,
            stride,
        }
    }

    pub fn span(first: Index, last: Index, stride: Index) -> Self {
        Slice::RangeEndpoints {
            first,
            last,
            stride,
        }
    }

    pub fn every(k: Index) -> Self {
        Slice::SkipEvery(k)
    }

    pub fn first(n: Index) -> Self {
        Slice::FirstN(n)
    }

    pub fn last(n: Index) -> Self {
        Slice::LastN(n)
    }

    pub fn even() -> Self {
        Slice::Parity(Parity::Even)
    }

    pub fn odd() -> Self {
        Slice::Parity(Parity::Odd)
    }

    pub fn reverse() -> Self {
        Slice::Reverse
    }

    pub fn indices<I: IntoIterator<Item = Index>>(indices: I) -> Self {
        Slice::IndexList(indices.into_iter().collect())
    }

    pub fn complement<I: IntoIterator<Item = Index>>(indices: I) -> Self {
        Slice::Complement(indices.into_iter().collect())
    }

    /// Resolves the descriptor against an axis of length `n`.
    pub fn resolve(&self, n: usize) -> Result<IndexMap> {
        if self.selects_nothing(n) {
            return Ok(IndexMap::empty());
        }
        let map = match *self {
            Slice::All => IndexMap::identity(n),
            Slice::Range {
                first,
                count,
                stride,
            } => resolve_range(first, count, stride, n)?,
            Slice::RangeEndpoints {
                first,
                last,
                stride,
            } => {
                let count = endpoint_count(first, last, stride)?;
                resolve_range(first, count, stride, n)?
            }
            Slice::SkipEvery(k) => {
                if k <= 0 {
                    return Err(ArrayError::argument(format!(
                        "skip step must be positive, got {}",
                        k
                    )));
                }
                IndexMap::Strided {
                    offset: 0,
                    stride: k,
                    len: (n - 1) / k as usize + 1,
                }
            }
            Slice::FirstN(m) => IndexMap::Strided {
                offset: 0,
                stride: 1,
                len: check_take(m, n)?,
            },
            Slice::LastN(m) => {
                let m = check_take(m, n)?;
                IndexMap::Strided {
                    offset: n - m,
                    stride: 1,
                    len: m,
                }
            }
            Slice::Parity(Parity::Even) => IndexMap::Strided {
                offset: 0,
                stride: 2,
                len: (n + 1) / 2,
            },
            Slice::Parity(Parity::Odd) => IndexMap::Strided {
                offset: 1,
                stride: 2,
                len: n / 2,
            },
            Slice::Reverse => IndexMap::Strided {
                offset: n - 1,
                stride: -1,
                len: n,
            },
            Slice::IndexList(ref list) => IndexMap::Gather(check_list(list, n)?),
            Slice::Complement(ref list) => {
                let mut keep = vec![true; n];
                for i in check_list(list, n)? {
                    keep[i] = false;
                }
                IndexMap::Gather(
                    keep.iter()
                        .enumerate()
                        .filter_map(|(i, &k)| k.then_some(i))
                        .collect(),
                )
            }
        };
        log::trace!("resolved {:?} over {} into {} positions", self, n, map.len());
        Ok(map.normalized())
    }

    /// True when the selection is empty, decided without validating anything
    /// the empty result does not depend on.
    fn selects_nothing(&self, n: usize) -> bool {
        match *self {
            Slice::All | Slice::Reverse => n == 0,
            Slice::Range { count, .. } => count == 0,
            Slice::RangeEndpoints { first, last, .. } => first == last,
            Slice::SkipEvery(_) => n == 0,
            Slice::FirstN(m) | Slice::LastN(m) => m == 0,
            Slice::Parity(Parity::Even) => n == 0,
            Slice::Parity(Parity::Odd) => n < 2,
            Slice::IndexList(ref list) => list.is_empty(),
            Slice::Complement(ref list) => {
                let mut keep = vec![true; n];
                for &i in list {
                    if i >= 0 && (i as usize) < n {
                        keep[i as usize] = false;
                    }
                }
                !keep.contains(&true)
            }
        }
    }
}

impl From<ops::RangeFull> for Slice {
    fn from(_: ops::RangeFull) -> Self {
        Slice::All
    }
}

impl From<ops::Range<Index>> for Slice {
    fn from(r: ops::Range<Index>) -> Self {
        Slice::span(r.start, r.end, 1)
    }
}

impl From<Vec<Index>> for Slice {
    fn from(list: Vec<Index>) -> Self {
        Slice::IndexList(list)
    }
}

fn resolve_range(first: Index, count: Index, stride: Index, n: usize) -> Result<IndexMap> {
    if count < 0 {
        return Err(ArrayError::argument(format!(
            "range count must not be negative, got {}",
            count
        )));
    }
    if count > 1 && stride == 0 {
        return Err(ArrayError::argument(
            "range stride may only be zero for a single element",
        ));
    }
    check_position(first, n)?;
    let last = (count - 1)
        .checked_mul(stride)
        .and_then(|d| first.checked_add(d))
        .ok_or(ArrayError::Bounds {
            index: Index::MAX,
            bound: n,
        })?;
    check_position(last, n)?;
    Ok(IndexMap::Strided {
        offset: first as usize,
        stride,
        len: count as usize,
    })
}

fn endpoint_count(first: Index, last: Index, stride: Index) -> Result<Index> {
    if stride == 0 || (last > first) != (stride > 0) {
        return Err(ArrayError::argument(format!(
            "stride {} cannot walk from {} to {}",
            stride, first, last
        )));
    }
    let span = (last as i128 - first as i128).abs();
    let step = (stride as i128).abs();
    Index::try_from((span + step - 1) / step)
        .map_err(|_| ArrayError::argument("range endpoints span too many elements"))
}

fn check_take(m: Index, n: usize) -> Result<usize> {
    if m < 0 {
        return Err(ArrayError::argument(format!(
            "element count must not be negative, got {}",
            m
        )));
    }
    if m as usize > n {
        return Err(ArrayError::Bounds { index: m, bound: n });
    }
    Ok(m as usize)
}

fn check_position(i: Index, n: usize) -> Result<usize> {
    if i < 0 || i as usize >= n {
        return Err(ArrayError::Bounds { index: i, bound: n });
    }
    Ok(i as usize)
}

/// Validates every entry of an explicit index list against an axis of length `n`.
pub(crate) fn check_list(list: &[Index], n: usize) -> Result<Vec<usize>> {
    list.iter().map(|&i| check_position(i, n)).collect()
}

/// A resolved selection: logical position `i` maps to `self.at(i)`.
///
/// Composition keeps the canonical form flat: a strided map composed with a
/// strided map is again strided, anything else collapses to a gather list of
/// final positions. Either way an access costs O(1) no matter how many times
/// the selection was sliced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexMap {
    Strided {
        offset: usize,
        stride: isize,
        len: usize,
    },
    Gather(Vec<usize>),
}

impl IndexMap {
    pub fn empty() -> Self {
        IndexMap::Strided {
            offset: 0,
            stride: 1,
            len: 0,
        }
    }

    pub fn identity(len: usize) -> Self {
        IndexMap::Strided {
            offset: 0,
            stride: 1,
            len,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexMap::Strided { len, .. } => *len,
            IndexMap::Gather(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<usize> {
        if i < self.len() {
            Some(self.at(i))
        } else {
            None
        }
    }

    /// Maps a logical position that is known to be in range.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> usize {
        match self {
            IndexMap::Strided { offset, stride, .. } => {
                (*offset as isize + *stride * i as isize) as usize
            }
            IndexMap::Gather(list) => list[i],
        }
    }

    /// True when the map selects a contiguous ascending run.
    pub fn is_contiguous(&self) -> bool {
        match self {
            IndexMap::Strided { stride, len, .. } => *stride == 1 || *len <= 1,
            IndexMap::Gather(list) => list.windows(2).all(|w| w[1] == w[0] + 1),
        }
    }

    /// `self ∘ inner`: position `i` maps to `self.at(inner.at(i))`.
    ///
    /// `inner` must have been resolved against `self.len()`.
    pub fn compose(&self, inner: &IndexMap) -> IndexMap {
        debug_assert!(inner.iter().all(|i| i < self.len()));
        match (self, inner) {
            (_, inner) if inner.is_empty() => IndexMap::empty(),
            (
                IndexMap::Strided { stride: outer, .. },
                IndexMap::Strided {
                    offset,
                    stride,
                    len,
                },
            ) => IndexMap::Strided {
                offset: self.at(*offset),
                stride: outer * stride,
                len: *len,
            },
            (_, inner) => IndexMap::Gather(inner.iter().map(|i| self.at(i)).collect()),
        }
    }

    /// Maps every position `p` to `p * scale + shift`.
    pub fn affine(&self, scale: usize, shift: usize) -> IndexMap {
        match self {
            IndexMap::Strided {
                offset,
                stride,
                len,
            } => IndexMap::Strided {
                offset: offset * scale + shift,
                stride: stride * scale as isize,
                len: *len,
            },
            IndexMap::Gather(list) => {
                IndexMap::Gather(list.iter().map(|p| p * scale + shift).collect())
            }
        }
    }

    /// Largest position the map touches.
    pub fn max_position(&self) -> Option<usize> {
        match self {
            IndexMap::Strided { len: 0, .. } => None,
            IndexMap::Strided { len, .. } => Some(self.at(0).max(self.at(len - 1))),
            IndexMap::Gather(list) => list.iter().copied().max(),
        }
    }

    pub fn iter(&self) -> Positions<'_> {
        Positions {
            map: self,
            front: 0,
            back: self.len(),
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    fn normalized(self) -> Self {
        if self.is_empty() {
            IndexMap::empty()
        } else {
            self
        }
    }
}

/// Iterator over the positions of an [`IndexMap`].
#[derive(Debug, Clone)]
pub struct Positions<'a> {
    map: &'a IndexMap,
    front: usize,
    back: usize,
}

impl Iterator for Positions<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.front == self.back {
            return None;
        }
        let p = self.map.at(self.front);
        self.front += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Positions<'_> {
    fn next_back(&mut self) -> Option<usize> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.map.at(self.back))
    }
}

impl ExactSizeIterator for Positions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind(s: Slice, n: usize) -> ErrorKind {
        s.resolve(n).unwrap_err().kind()
    }

    fn positions(s: Slice, n: usize) -> Vec<usize> {
        s.resolve(n).unwrap().to_vec()
    }

    #[test]
    fn range_with_stride() {
        assert_eq!(positions(Slice::range(0, 3, 2), 10), vec![0, 2, 4]);
        assert_eq!(positions(Slice::range(9, 3, -3), 10), vec![9, 6, 3]);
        assert_eq!(positions(Slice::range(4, 1, 0), 10), vec![4]);
    }

    #[test]
    fn range_errors() {
        assert_eq!(kind(Slice::range(1, 4, 3), 10), ErrorKind::Bounds);
        assert_eq!(positions(Slice::range(0, 4, 3), 10), vec![0, 3, 6, 9]);
        assert_eq!(kind(Slice::range(-1, 2, 1), 10), ErrorKind::Bounds);
        assert_eq!(kind(Slice::range(1, 2, -2), 10), ErrorKind::Bounds);
        assert_eq!(kind(Slice::range(0, 2, 0), 10), ErrorKind::Argument);
        assert_eq!(kind(Slice::range(0, -2, 1), 10), ErrorKind::Argument);
        assert_eq!(kind(Slice::range(0, 2, Index::MAX), 10), ErrorKind::Bounds);
    }

    #[test]
    fn empty_selections_never_fail() {
        assert!(Slice::range(-7, 0, 1000).resolve(3).unwrap().is_empty());
        assert!(Slice::span(12, 12, -4).resolve(0).unwrap().is_empty());
        assert!(Slice::every(0).resolve(0).unwrap().is_empty());
        assert!(Slice::first(0).resolve(0).unwrap().is_empty());
        assert!(Slice::last(0).resolve(5).unwrap().is_empty());
        assert!(Slice::odd().resolve(1).unwrap().is_empty());
        assert!(Slice::reverse().resolve(0).unwrap().is_empty());
        assert!(Slice::indices(vec![]).resolve(0).unwrap().is_empty());
        assert!(Slice::complement(vec![]).resolve(0).unwrap().is_empty());
        assert!(Slice::complement(vec![0, 1, 1]).resolve(2).unwrap().is_empty());
    }

    #[test]
    fn endpoints_convert_to_count() {
        assert_eq!(positions(Slice::span(1, 7, 2), 10), vec![1, 3, 5]);
        assert_eq!(positions(Slice::span(1, 8, 2), 10), vec![1, 3, 5, 7]);
        assert_eq!(positions(Slice::span(9, 0, -4), 10), vec![9, 5, 1]);
        assert_eq!(positions(Slice::from(2..5), 10), vec![2, 3, 4]);
    }

    #[test]
    fn endpoints_reject_inconsistent_stride() {
        assert_eq!(kind(Slice::span(0, 5, -1), 10), ErrorKind::Argument);
        assert_eq!(kind(Slice::span(5, 0, 1), 10), ErrorKind::Argument);
        assert_eq!(kind(Slice::span(0, 5, 0), 10), ErrorKind::Argument);
        assert_eq!(kind(Slice::span(0, 12, 1), 10), ErrorKind::Bounds);
    }

    #[test]
    fn skip_every() {
        assert_eq!(positions(Slice::every(3), 10), vec![0, 3, 6, 9]);
        assert_eq!(positions(Slice::every(20), 10), vec![0]);
        assert_eq!(kind(Slice::every(0), 10), ErrorKind::Argument);
        assert_eq!(kind(Slice::every(-2), 10), ErrorKind::Argument);
    }

    #[test]
    fn first_and_last() {
        assert_eq!(positions(Slice::first(2), 5), vec![0, 1]);
        assert_eq!(positions(Slice::last(2), 5), vec![3, 4]);
        assert_eq!(positions(Slice::last(5), 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(kind(Slice::first(6), 5), ErrorKind::Bounds);
        assert_eq!(kind(Slice::last(6), 5), ErrorKind::Bounds);
        assert_eq!(kind(Slice::first(-1), 5), ErrorKind::Argument);
    }

    #[test]
    fn parity_and_reverse() {
        assert_eq!(positions(Slice::even(), 5), vec![0, 2, 4]);
        assert_eq!(positions(Slice::odd(), 5), vec![1, 3]);
        assert_eq!(positions(Slice::reverse(), 4), vec![3, 2, 1, 0]);
    }

    #[test]
    fn lists_and_complements() {
        assert_eq!(positions(Slice::indices(vec![3, 0, 3]), 4), vec![3, 0, 3]);
        assert_eq!(kind(Slice::indices(vec![0, 4]), 4), ErrorKind::Bounds);
        assert_eq!(kind(Slice::indices(vec![-1]), 4), ErrorKind::Bounds);
        assert_eq!(positions(Slice::complement(vec![3, 1, 3]), 5), vec![0, 2, 4]);
        assert_eq!(kind(Slice::complement(vec![9]), 5), ErrorKind::Bounds);
    }

    #[test]
    fn composition_stays_strided() {
        let outer = Slice::range(1, 5, 2).resolve(10).unwrap();
        let inner = Slice::reverse().resolve(outer.len()).unwrap();
        let composed = outer.compose(&inner);
        assert!(matches!(composed, IndexMap::Strided { .. }));
        assert_eq!(composed.to_vec(), vec![9, 7, 5, 3, 1]);
    }

    #[test]
    fn composition_through_a_gather() {
        let outer = Slice::even().resolve(10).unwrap();
        let inner = Slice::indices(vec![4, 0, 4]).resolve(outer.len()).unwrap();
        assert_eq!(outer.compose(&inner).to_vec(), vec![8, 0, 8]);
    }

    #[test]
    fn affine_projects_onto_rows() {
        let rows = Slice::odd().resolve(4).unwrap();
        assert_eq!(rows.affine(3, 2).to_vec(), vec![5, 11]);
    }

    #[test]
    fn positions_iterate_from_both_ends() {
        let map = Slice::range(0, 4, 3).resolve(10).unwrap();
        let mut it = map.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next_back(), Some(9));
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.collect::<Vec<_>>(), vec![3, 6]);
    }
}
