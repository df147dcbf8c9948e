//! Scalar wrapper boundary.
//!
//! [`Strict`] wraps a builtin numeric (or boolean) value and only converts by
//! explicit construction. Arrays do not depend on it: they accept any element
//! type. It exists so that the raw-layout interop accessors
//! (`blas_data`) can be expressed: [`RawLayout`] is implemented for builtin
//! numerics and for `Strict` over builtin numerics, never for booleans.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

/// Explicitly constructed scalar.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, PartialOrd, Hash)]
pub struct Strict<T>(T);

impl<T: Copy> Strict<T> {
    pub const fn new(value: T) -> Self {
        Strict(value)
    }

    pub fn get(self) -> T {
        self.0
    }
}

impl<T: Zero + Copy> Strict<T> {
    pub fn zero() -> Self {
        Strict(T::zero())
    }
}

impl<T: One + Copy> Strict<T> {
    pub fn one() -> Self {
        Strict(T::one())
    }
}

impl<T: One + Neg<Output = T> + Copy> Strict<T> {
    pub fn neg_one() -> Self {
        Strict(-T::one())
    }
}

impl<T: fmt::Debug> fmt::Debug for Strict<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Strict<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! strict_binop {
    ($($trait:ident :: $method:ident),*) => {$(
        impl<T: $trait<Output = T>> $trait for Strict<T> {
            type Output = Strict<T>;

            fn $method(self, rhs: Self) -> Self::Output {
                Strict(self.0.$method(rhs.0))
            }
        }
    )*};
}

strict_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl<T: Neg<Output = T>> Neg for Strict<T> {
    type Output = Strict<T>;

    fn neg(self) -> Self::Output {
        Strict(-self.0)
    }
}

impl<T: Zero + Copy> Zero for Strict<T> {
    fn zero() -> Self {
        Strict(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<T: One + Copy> One for Strict<T> {
    fn one() -> Self {
        Strict(T::one())
    }
}

/// Element types whose in-memory representation is exactly a builtin numeric,
/// suitable for handing to external linear-algebra routines.
///
/// # Safety
///
/// `Self` must have the same size, alignment and bit validity as `Self::Raw`.
pub unsafe trait RawLayout: Sized {
    type Raw: Copy;
}

macro_rules! raw_layout {
    ($($t:ty),*) => {$(
        unsafe impl RawLayout for $t {
            type Raw = $t;
        }

        unsafe impl RawLayout for Strict<$t> {
            type Raw = $t;
        }
    )*};
}

raw_layout!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Reinterprets a slice of layout-compatible elements as their raw representation.
pub(crate) fn as_raw<T: RawLayout>(data: &[T]) -> &[T::Raw] {
    // SAFETY: `RawLayout` guarantees identical size, alignment and validity.
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const T::Raw, data.len()) }
}

pub(crate) fn as_raw_mut<T: RawLayout>(data: &mut [T]) -> &mut [T::Raw] {
    // SAFETY: as above; `T::Raw` has no invalid bit patterns for a valid `T`, and
    // every valid `T::Raw` is a valid `T` for the implemented types.
    unsafe { std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut T::Raw, data.len()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constants() {
        assert_eq!(Strict::<i32>::zero().get(), 0);
        assert_eq!(Strict::<f64>::one().get(), 1.0);
        assert_eq!(Strict::<i64>::neg_one().get(), -1);
    }

    #[test]
    fn arithmetic_stays_wrapped() {
        let a = Strict::new(3.0f32);
        let b = Strict::new(0.5f32);
        assert_eq!((a * b + a).get(), 4.5);
        assert_eq!((-a).get(), -3.0);
    }

    #[test]
    fn raw_view_shares_memory() {
        let data = [Strict::new(1.5f64), Strict::new(-2.0)];
        let raw = as_raw(&data);
        assert_eq!(raw, &[1.5, -2.0]);
        assert_eq!(raw.as_ptr() as usize, data.as_ptr() as usize);
    }
}
