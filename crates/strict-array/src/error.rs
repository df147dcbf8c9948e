use thiserror::Error;

/// Signed index type accepted by every API that takes a size, position, count or
/// slice parameter. Negative requests are reported as errors instead of wrapping.
pub type Index = isize;

pub type Result<T, E = ArrayError> = std::result::Result<T, E>;

/// Coarse classification of an [`ArrayError`], convenient for matching in callers
/// and tests that do not care about the attached context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Size,
    Bounds,
    Argument,
    Shape,
    Range,
}

/// Errors raised by storage, slicing and array operations.
///
/// Every check happens before the receiver is modified, so an `Err` always means
/// the receiver still holds the value it had before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// A requested dimension is negative, or a 2D shape has exactly one zero extent.
    #[error("invalid size: {rows} x {cols}")]
    Size { rows: Index, cols: Index },
    /// An index or position lies outside `[0, bound)` (or `[0, bound]` for insertion points).
    #[error("index {index} out of bounds for length {bound}")]
    Bounds { index: Index, bound: usize },
    /// A count, stride or step is invalid on its own.
    #[error("invalid argument: {0}")]
    Argument(String),
    /// Source and destination extents differ.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    Shape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// An iterator-style range starts past its end.
    #[error("invalid range: begin {begin} is past end {end}")]
    Range { begin: Index, end: Index },
}

impl ArrayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArrayError::Size { .. } => ErrorKind::Size,
            ArrayError::Bounds { .. } => ErrorKind::Bounds,
            ArrayError::Argument(_) => ErrorKind::Argument,
            ArrayError::Shape { .. } => ErrorKind::Shape,
            ArrayError::Range { .. } => ErrorKind::Range,
        }
    }

    pub(crate) fn size1(len: Index) -> Self {
        ArrayError::Size { rows: len, cols: 1 }
    }

    pub(crate) fn shape1(expected: usize, actual: usize) -> Self {
        ArrayError::Shape {
            expected: (expected, 1),
            actual: (actual, 1),
        }
    }

    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        ArrayError::Argument(msg.into())
    }
}

/// Validates a 1D extent.
pub(crate) fn check_len(len: Index) -> Result<usize> {
    if len < 0 {
        return Err(ArrayError::size1(len));
    }
    Ok(len as usize)
}

/// Validates a 2D extent: no negative dimension, no asymmetric zero, and an
/// element count that fits in `Index`.
pub(crate) fn check_dims(rows: Index, cols: Index) -> Result<(usize, usize)> {
    if rows < 0 || cols < 0 || ((rows == 0) != (cols == 0)) || rows.checked_mul(cols).is_none() {
        return Err(ArrayError::Size { rows, cols });
    }
    Ok((rows as usize, cols as usize))
}

/// Validates a `(pos, count)` block for removal from an axis of length `len`.
pub(crate) fn check_block(pos: Index, count: Index, len: usize) -> Result<usize> {
    if count <= 0 {
        return Err(ArrayError::argument(format!(
            "removal count must be positive, got {}",
            count
        )));
    }
    if pos < 0 {
        return Err(ArrayError::Bounds { index: pos, bound: len });
    }
    match pos.checked_add(count) {
        Some(end) if end as usize <= len => Ok(pos as usize),
        _ => Err(ArrayError::Bounds {
            index: pos.saturating_add(count),
            bound: len,
        }),
    }
}

/// Validates an insertion point in `[0, len]`.
pub(crate) fn check_insert(pos: Index, len: usize) -> Result<usize> {
    if pos < 0 || pos as usize > len {
        return Err(ArrayError::Bounds { index: pos, bound: len });
    }
    Ok(pos as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asymmetric_zero_is_a_size_error() {
        assert_eq!(check_dims(0, 3).unwrap_err().kind(), ErrorKind::Size);
        assert_eq!(check_dims(2, 0).unwrap_err().kind(), ErrorKind::Size);
        assert_eq!(check_dims(0, 0).unwrap(), (0, 0));
    }

    #[test]
    fn overflowing_element_count_is_a_size_error() {
        assert_eq!(check_dims(Index::MAX / 2 + 1, 4).unwrap_err().kind(), ErrorKind::Size);
        assert_eq!(check_dims(Index::MAX, 2).unwrap_err().kind(), ErrorKind::Size);
        assert_eq!(check_dims(Index::MAX, 1).unwrap(), (Index::MAX as usize, 1));
    }

    #[test]
    fn block_checks_order() {
        assert_eq!(check_block(0, 0, 4).unwrap_err().kind(), ErrorKind::Argument);
        assert_eq!(check_block(-1, 1, 4).unwrap_err().kind(), ErrorKind::Bounds);
        assert_eq!(check_block(3, 2, 4).unwrap_err().kind(), ErrorKind::Bounds);
        assert_eq!(check_block(0, 4, 4).unwrap(), 0);
    }

    #[test]
    fn display_carries_context() {
        let err = ArrayError::Bounds { index: 7, bound: 3 };
        assert_eq!(err.to_string(), "index 7 out of bounds for length 3");
    }
}
