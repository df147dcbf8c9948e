//! Exclusively-owned, exact-size element buffer backing every owning array.
//!
//! `Storage` never over-allocates: each mutation computes the exact target
//! length and builds a buffer of that length. An empty storage reports a null
//! data pointer.

use std::ptr;

use crate::error::{check_len, ArrayError, Index, Result};

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Storage<T> {
    data: Box<[T]>,
}

impl<T> Storage<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new().into_boxed_slice(),
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        if !data.is_empty() {
            log::trace!("storage: adopting buffer of {} elements", data.len());
        }
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Collects exactly `len` elements from `iter`.
    ///
    /// Fails with a shape error if the iterator yields a different count; nothing
    /// is kept in that case.
    pub fn from_exact_iter<I>(len: Index, iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let len = check_len(len)?;
        let mut data = Vec::with_capacity(len);
        data.extend(iter.into_iter().take(len + 1));
        if data.len() != len {
            return Err(ArrayError::shape1(len, data.len()));
        }
        Ok(Self::from_vec(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pointer to the first element, or null when the storage is empty.
    pub fn as_ptr(&self) -> *const T {
        if self.data.is_empty() {
            ptr::null()
        } else {
            self.data.as_ptr()
        }
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.data.is_empty() {
            ptr::null_mut()
        } else {
            self.data.as_mut_ptr()
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, offset: usize) -> Option<&T> {
        self.data.get(offset)
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.data.get_mut(offset)
    }

    /// Moves the buffer out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Exchanges buffers in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.data, &mut other.data);
    }

    pub fn into_vec(mut self) -> Vec<T> {
        std::mem::take(&mut self.data).into_vec()
    }
}

impl<T: Default> Storage<T> {
    /// Allocates `len` default-valued elements.
    pub fn allocate(len: Index) -> Result<Self> {
        let len = check_len(len)?;
        Ok(Self::from_vec(
            std::iter::repeat_with(T::default).take(len).collect(),
        ))
    }
}

impl<T: Clone> Storage<T> {
    pub fn filled(len: Index, value: T) -> Result<Self> {
        let len = check_len(len)?;
        Ok(Self::from_vec(vec![value; len]))
    }
}

impl<T> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<T> Drop for Storage<T> {
    fn drop(&mut self) {
        if !self.data.is_empty() {
            log::trace!("storage: releasing {} elements", self.data.len());
        }
    }
}
