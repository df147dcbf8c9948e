//! Build-then-commit support for mutations with the strong failure guarantee.
//!
//! A replacement value is first produced into a [`Staging`] buffer that nothing
//! else can observe. Only a fully built, length-checked buffer is turned into a
//! [`Storage`] and swapped into the target; if any step fails the staging
//! buffer is dropped and the target is never touched.

use std::marker::PhantomData;

use crate::array::{Array1, Array2, FixedArray1, FixedArray2};
use crate::error::{ArrayError, Index, Result};
use crate::storage::Storage;
use crate::view::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, AsView1, AsView2};

/// A source able to produce a one-dimensional replica of itself.
pub trait Replicate<T> {
    /// Number of elements the replica will have. Fails when the source is
    /// ill-formed, e.g. an elementwise expression over mismatched operands.
    fn extent(&self) -> Result<usize>;

    /// Pushes every element, in order, into `sink`.
    fn emit(&self, sink: &mut Staging<T>) -> Result<()>;
}

/// A source able to produce a two-dimensional, row-major replica of itself.
pub trait Replicate2<T> {
    fn extent2(&self) -> Result<(usize, usize)>;

    fn emit2(&self, sink: &mut Staging<T>) -> Result<()>;
}

/// Private buffer receiving a replica under construction.
#[derive(Debug)]
pub struct Staging<T> {
    buf: Vec<T>,
    expected: usize,
    done: bool,
}

impl<T> Staging<T> {
    pub fn new(expected: usize) -> Self {
        Self {
            buf: Vec::with_capacity(expected),
            expected,
            done: false,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.expected - self.buf.len()
    }

    pub fn push(&mut self, value: T) -> Result<()> {
        if self.buf.len() == self.expected {
            return Err(ArrayError::shape1(self.expected, self.expected + 1));
        }
        self.buf.push(value);
        Ok(())
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<()> {
        values.into_iter().try_for_each(|v| self.push(v))
    }

    /// Seals the staging buffer; fails unless exactly the announced number of
    /// elements was pushed.
    pub fn finish(mut self) -> Result<Storage<T>> {
        if self.buf.len() != self.expected {
            return Err(ArrayError::shape1(self.expected, self.buf.len()));
        }
        self.done = true;
        Ok(Storage::from_vec(std::mem::take(&mut self.buf)))
    }
}

impl<T> Drop for Staging<T> {
    fn drop(&mut self) {
        if !self.done {
            log::debug!(
                "rollback: discarding staged replica ({} of {} elements built)",
                self.buf.len(),
                self.expected
            );
        }
    }
}

/// Builds a complete one-dimensional replica of `source`.
pub fn replicate<T, S>(source: &S) -> Result<Storage<T>>
where
    S: Replicate<T> + ?Sized,
{
    let len = source.extent()?;
    let mut staging = Staging::new(len);
    source.emit(&mut staging)?;
    staging.finish()
}

/// Builds a complete two-dimensional replica of `source`.
pub fn replicate2<T, S>(source: &S) -> Result<((usize, usize), Storage<T>)>
where
    S: Replicate2<T> + ?Sized,
{
    let (rows, cols) = source.extent2()?;
    let len = rows.checked_mul(cols).ok_or(ArrayError::Size {
        rows: rows as Index,
        cols: cols as Index,
    })?;
    let mut staging = Staging::new(len);
    source.emit2(&mut staging)?;
    Ok(((rows, cols), staging.finish()?))
}

/// Evaluates a source into a plain vector.
pub fn evaluate<T, S>(source: &S) -> Result<Vec<T>>
where
    S: Replicate<T> + ?Sized,
{
    Ok(replicate(source)?.into_vec())
}

/// Swaps a fully built replica into `target`. Cannot fail.
pub(crate) fn install<T>(target: &mut Storage<T>, replica: Storage<T>) {
    log::debug!(
        "commit: replacing {} elements with {}",
        target.len(),
        replica.len()
    );
    *target = replica;
}

impl<T, S: Replicate<T> + ?Sized> Replicate<T> for &S {
    fn extent(&self) -> Result<usize> {
        (**self).extent()
    }

    fn emit(&self, sink: &mut Staging<T>) -> Result<()> {
        (**self).emit(sink)
    }
}

impl<T, S: Replicate2<T> + ?Sized> Replicate2<T> for &S {
    fn extent2(&self) -> Result<(usize, usize)> {
        (**self).extent2()
    }

    fn emit2(&self, sink: &mut Staging<T>) -> Result<()> {
        (**self).emit2(sink)
    }
}

fn emit_view<T: Clone>(view: ArrayView1<'_, T>, sink: &mut Staging<T>) -> Result<()> {
    sink.extend(view.iter().cloned())
}

fn emit_view2<T: Clone>(view: ArrayView2<'_, T>, sink: &mut Staging<T>) -> Result<()> {
    sink.extend(view.iter().cloned())
}

macro_rules! replicate_as_view1 {
    ($($ty:ty => [$($gen:tt)*]),* $(,)?) => {$(
        impl<$($gen)*> Replicate<T> for $ty {
            fn extent(&self) -> Result<usize> {
                Ok(AsView1::view(self).len())
            }

            fn emit(&self, sink: &mut Staging<T>) -> Result<()> {
                emit_view(AsView1::view(self), sink)
            }
        }
    )*};
}

replicate_as_view1!(
    [T] => [T: Clone],
    Vec<T> => [T: Clone],
    Array1<T> => [T: Clone],
    ArrayView1<'_, T> => [T: Clone],
    ArrayViewMut1<'_, T> => [T: Clone],
    FixedArray1<T, N> => [T: Clone, const N: usize],
);

macro_rules! replicate_as_view2 {
    ($($ty:ty => [$($gen:tt)*]),* $(,)?) => {$(
        impl<$($gen)*> Replicate2<T> for $ty {
            fn extent2(&self) -> Result<(usize, usize)> {
                Ok(AsView2::view(self).shape())
            }

            fn emit2(&self, sink: &mut Staging<T>) -> Result<()> {
                emit_view2(AsView2::view(self), sink)
            }
        }
    )*};
}

replicate_as_view2!(
    Array2<T> => [T: Clone],
    ArrayView2<'_, T> => [T: Clone],
    ArrayViewMut2<'_, T> => [T: Clone],
    FixedArray2<T, R, C> => [T: Clone, const R: usize, const C: usize],
);

/// Lazy elementwise combination of two sources.
///
/// The operands must have identical extents; a mismatch surfaces as a shape
/// error when the expression is replicated, before any target is modified.
pub struct ZipWith<A, B, F, X, Y> {
    lhs: A,
    rhs: B,
    f: F,
    _marker: PhantomData<fn(X, Y)>,
}

pub fn zip_with<A, B, F, X, Y, T>(lhs: A, rhs: B, f: F) -> ZipWith<A, B, F, X, Y>
where
    F: Fn(X, Y) -> T,
{
    ZipWith {
        lhs,
        rhs,
        f,
        _marker: PhantomData,
    }
}

impl<A, B, F, X, Y, T> Replicate<T> for ZipWith<A, B, F, X, Y>
where
    A: Replicate<X>,
    B: Replicate<Y>,
    F: Fn(X, Y) -> T,
{
    fn extent(&self) -> Result<usize> {
        let (l, r) = (self.lhs.extent()?, self.rhs.extent()?);
        if l != r {
            return Err(ArrayError::shape1(l, r));
        }
        Ok(l)
    }

    fn emit(&self, sink: &mut Staging<T>) -> Result<()> {
        let lhs = evaluate(&self.lhs)?;
        let rhs = evaluate(&self.rhs)?;
        if lhs.len() != rhs.len() {
            return Err(ArrayError::shape1(lhs.len(), rhs.len()));
        }
        sink.extend(lhs.into_iter().zip(rhs).map(|(x, y)| (self.f)(x, y)))
    }
}

impl<A, B, F, X, Y, T> Replicate2<T> for ZipWith<A, B, F, X, Y>
where
    A: Replicate2<X>,
    B: Replicate2<Y>,
    F: Fn(X, Y) -> T,
{
    fn extent2(&self) -> Result<(usize, usize)> {
        let (l, r) = (self.lhs.extent2()?, self.rhs.extent2()?);
        if l != r {
            return Err(ArrayError::Shape {
                expected: l,
                actual: r,
            });
        }
        Ok(l)
    }

    fn emit2(&self, sink: &mut Staging<T>) -> Result<()> {
        let (lshape, lhs) = replicate2(&self.lhs)?;
        let (rshape, rhs) = replicate2(&self.rhs)?;
        if lshape != rshape {
            return Err(ArrayError::Shape {
                expected: lshape,
                actual: rshape,
            });
        }
        sink.extend(
            lhs.into_vec()
                .into_iter()
                .zip(rhs.into_vec())
                .map(|(x, y)| (self.f)(x, y)),
        )
    }
}

/// Lazy elementwise map whose element function may fail.
///
/// A failing element aborts replication midway; whatever was already built is
/// discarded.
pub struct TryMap<A, F, X> {
    source: A,
    f: F,
    _marker: PhantomData<fn(X)>,
}

pub fn try_map<A, F, X, T>(source: A, f: F) -> TryMap<A, F, X>
where
    F: Fn(X) -> Result<T>,
{
    TryMap {
        source,
        f,
        _marker: PhantomData,
    }
}

impl<A, F, X, T> Replicate<T> for TryMap<A, F, X>
where
    A: Replicate<X>,
    F: Fn(X) -> Result<T>,
{
    fn extent(&self) -> Result<usize> {
        self.source.extent()
    }

    fn emit(&self, sink: &mut Staging<T>) -> Result<()> {
        for x in evaluate(&self.source)? {
            sink.push((self.f)(x)?)?;
        }
        Ok(())
    }
}

impl<A, F, X, T> Replicate2<T> for TryMap<A, F, X>
where
    A: Replicate2<X>,
    F: Fn(X) -> Result<T>,
{
    fn extent2(&self) -> Result<(usize, usize)> {
        self.source.extent2()
    }

    fn emit2(&self, sink: &mut Staging<T>) -> Result<()> {
        let (_, values) = replicate2(&self.source)?;
        for x in values.into_vec() {
            sink.push((self.f)(x)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn staging_rejects_overflow_and_underflow() {
        let mut s = Staging::new(2);
        s.push(1).unwrap();
        assert_eq!(s.remaining(), 1);
        assert_eq!(s.finish().unwrap_err().kind(), ErrorKind::Shape);

        let mut s = Staging::new(1);
        s.push(1).unwrap();
        assert_eq!(s.push(2).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn zip_with_checks_extents() {
        let a = vec![1, 2, 3];
        let b = vec![10, 20];
        let expr = zip_with(&a, &b, |x: i32, y: i32| x + y);
        assert_eq!(Replicate::<i32>::extent(&expr).unwrap_err().kind(), ErrorKind::Shape);

        let c = vec![10, 20, 30];
        let ok = zip_with(&a, &c, |x: i32, y: i32| x + y);
        assert_eq!(evaluate(&ok).unwrap(), vec![11, 22, 33]);
    }

    #[test]
    fn nested_expressions_compose() {
        let a = vec![1, 2];
        let inner = zip_with(&a, &a, |x: i32, y: i32| x * y);
        let outer = zip_with(inner, &a, |x: i32, y: i32| x - y);
        assert_eq!(evaluate(&outer).unwrap(), vec![0, 2]);
    }

    #[test]
    fn try_map_aborts_midway() {
        let a = vec![1u8, 200, 3];
        let doubled = try_map(&a, |x: u8| {
            x.checked_mul(2)
                .ok_or_else(|| ArrayError::argument("element overflow"))
        });
        assert_eq!(evaluate(&doubled).unwrap_err().kind(), ErrorKind::Argument);
    }
}
