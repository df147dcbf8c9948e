//! Integration tests for build-then-commit assignment.

use strict_array::commit::evaluate;
use strict_array::{try_map, zip_with, Array1, Array2, ArrayError, ErrorKind, Slice};

fn snapshot<T: Clone>(a: &Array1<T>) -> (Vec<T>, *const T) {
    (a.to_vec(), a.as_ptr())
}

// ---------------------------------------------------------------------------
// Successful commits
// ---------------------------------------------------------------------------

#[test]
fn resize_and_assign_adopts_source_length() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    a.resize_and_assign(&vec![7, 8, 9, 10, 11]).unwrap();
    assert_eq!(a.to_vec(), vec![7, 8, 9, 10, 11]);
}

#[test]
fn resize_and_assign_from_view_of_itself_copy() {
    let src = Array1::from_vec((0..8).collect::<Vec<i32>>());
    let mut a = Array1::from_vec(vec![0]);
    a.resize_and_assign(&src.slice(Slice::every(3)).unwrap()).unwrap();
    assert_eq!(a.to_vec(), vec![0, 3, 6]);
}

#[test]
fn resize_and_assign_from_expression() {
    let x = Array1::from_vec(vec![1.0, 2.0, 3.0]);
    let y = vec![0.5, 0.5, 0.5];
    let mut out = Array1::default();
    out.resize_and_assign(&zip_with(&x, &y, |a: f64, b: f64| a * b))
        .unwrap();
    assert_eq!(out.to_vec(), vec![0.5, 1.0, 1.5]);
}

#[test]
fn resize_and_assign_move_transfers_buffer() {
    let mut a = Array1::from_vec(vec![1]);
    let mut b = Array1::from_vec(vec![4, 5, 6]);
    let ptr = b.as_ptr();
    a.resize_and_assign_move(&mut b);
    assert_eq!(a.as_ptr(), ptr);
    assert!(b.is_empty());
}

#[test]
fn matrix_resize_and_assign_adopts_shape() {
    let mut m = Array2::<i32>::new(1, 1).unwrap();
    let src = Array2::from([[1, 2, 3], [4, 5, 6]]);
    m.resize_and_assign(&src.slice2(.., Slice::reverse()).unwrap())
        .unwrap();
    assert_eq!(m, Array2::from([[3, 2, 1], [6, 5, 4]]));
}

// ---------------------------------------------------------------------------
// Failed commits leave the target untouched
// ---------------------------------------------------------------------------

#[test]
fn mismatched_operands_leave_target_unchanged() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    let before = snapshot(&a);
    let lhs = vec![1, 2];
    let rhs = vec![1, 2, 3, 4];
    let err = a
        .resize_and_assign(&zip_with(&lhs, &rhs, |x: i32, y: i32| x + y))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert_eq!(snapshot(&a), before);
}

#[test]
fn failing_element_leaves_target_unchanged() {
    let mut a = Array1::from_vec(vec![9u8, 9, 9]);
    let before = snapshot(&a);
    let src = vec![1u8, 2, 130, 4];
    let doubled = try_map(&src, |v: u8| {
        v.checked_mul(2).ok_or(ArrayError::Argument(format!(
            "{} * 2 overflows",
            v
        )))
    });
    let err = a.resize_and_assign(&doubled).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(snapshot(&a), before);
}

#[test]
fn failing_matrix_expression_leaves_target_unchanged() {
    let mut m = Array2::from([[1, 2], [3, 4]]);
    let ptr = m.as_ptr();
    let a = Array2::from([[1, 2, 3]]);
    let b = Array2::from([[1], [2], [3]]);
    let err = m
        .resize_and_assign(&zip_with(&a, &b, |x: i32, y: i32| x * y))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert_eq!(m, Array2::from([[1, 2], [3, 4]]));
    assert_eq!(m.as_ptr(), ptr);
}

#[test]
fn evaluate_collects_expression() {
    let a = vec![1, 2, 3];
    let squares = zip_with(&a, &a, |x: i32, y: i32| x * y);
    assert_eq!(evaluate(&squares).unwrap(), vec![1, 4, 9]);
}
