//! Integration tests for the resizable one-dimensional array.

use strict_array::{Array1, ErrorKind, PrintOptions, Slice, Strict};

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn array1_new_is_zero_filled() {
    let a: Array1<f64> = Array1::new(4).unwrap();
    assert_eq!(a.len(), 4);
    assert!(a.iter().all(|v| *v == 0.0));
}

#[test]
fn array1_new_negative_length_is_size_error() {
    let err = Array1::<i32>::new(-1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Size);
}

#[test]
fn array1_empty_has_null_data() {
    let a: Array1<f32> = Array1::new(0).unwrap();
    assert!(a.is_empty());
    assert!(a.as_ptr().is_null());
    let b: Array1<f32> = Array1::default();
    assert!(b.as_ptr().is_null());
}

#[test]
fn array1_from_elem_and_ones() {
    let a = Array1::from_elem(3, 7u8).unwrap();
    assert_eq!(a.to_vec(), vec![7, 7, 7]);
    let none = Array1::from_elem(0, 7u8).unwrap();
    assert!(none.is_empty());
    assert!(none.as_ptr().is_null());
    assert_eq!(Array1::from_elem(-1, 7u8).unwrap_err().kind(), ErrorKind::Size);
    let b: Array1<Strict<f64>> = Array1::ones(2).unwrap();
    assert_eq!(b[1], Strict::new(1.0));
}

#[test]
fn array1_from_range_copies_half_open_window() {
    let src = [1, 2, 3, 4, 5];
    assert_eq!(Array1::from_range(&src, 1, 4).unwrap().to_vec(), vec![2, 3, 4]);
    assert!(Array1::from_range(&src, 2, 2).unwrap().is_empty());
    assert_eq!(
        Array1::from_range(&src, 3, 1).unwrap_err().kind(),
        ErrorKind::Range
    );
    assert_eq!(
        Array1::from_range(&src, 0, 6).unwrap_err().kind(),
        ErrorKind::Bounds
    );
}

#[test]
fn array1_from_view_copies_selection() {
    let a = Array1::from_vec((0..10).collect::<Vec<i32>>());
    let v = a.slice(Slice::odd()).unwrap();
    let b = Array1::from_view(&v);
    assert_eq!(b.to_vec(), vec![1, 3, 5, 7, 9]);
}

// ---------------------------------------------------------------------------
// Resize and assignment
// ---------------------------------------------------------------------------

#[test]
fn array1_resize_same_length_keeps_contents() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    let before = a.as_ptr();
    a.resize(3).unwrap();
    assert_eq!(a.to_vec(), vec![1, 2, 3]);
    assert_eq!(a.as_ptr(), before);
}

#[test]
fn array1_resize_new_length_discards_contents() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    a.resize(5).unwrap();
    assert_eq!(a.to_vec(), vec![0; 5]);
    assert_eq!(a.resize(-2).unwrap_err().kind(), ErrorKind::Size);
    assert_eq!(a.len(), 5);
}

#[test]
fn array1_assign_requires_equal_length() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    let err = a.assign(&vec![4, 5]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert_eq!(a.to_vec(), vec![1, 2, 3]);
    a.assign(&[4, 5, 6][..]).unwrap();
    assert_eq!(a.to_vec(), vec![4, 5, 6]);
}

#[test]
fn array1_assign_list_adopts_length() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    a.assign_list(vec![9]);
    assert_eq!(a.to_vec(), vec![9]);
}

#[test]
fn array1_assign_move_empties_source() {
    let mut a = Array1::from_vec(vec![1, 2]);
    let mut b = Array1::from_vec(vec![3, 4, 5]);
    a.assign_move(&mut b);
    assert_eq!(a.to_vec(), vec![3, 4, 5]);
    assert!(b.is_empty());
    assert!(b.as_ptr().is_null());
}

#[test]
fn array1_take_and_swap() {
    let mut a = Array1::from_vec(vec![1, 2]);
    let mut b = Array1::from_vec(vec![3]);
    a.swap(&mut b);
    assert_eq!(a.to_vec(), vec![3]);
    assert_eq!(b.to_vec(), vec![1, 2]);
    let c = b.take();
    assert_eq!(c.to_vec(), vec![1, 2]);
    assert!(b.is_empty());
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[test]
fn array1_remove_block() {
    let mut a = Array1::from_vec(vec![0, 0, 1, 1]);
    a.remove(1, 2).unwrap();
    assert_eq!(a.to_vec(), vec![0, 1]);
}

#[test]
fn array1_remove_validates_before_mutating() {
    let mut a = Array1::from_vec(vec![1, 2, 3]);
    assert_eq!(a.remove(0, 0).unwrap_err().kind(), ErrorKind::Argument);
    assert_eq!(a.remove(2, 2).unwrap_err().kind(), ErrorKind::Bounds);
    assert_eq!(a.remove(-1, 1).unwrap_err().kind(), ErrorKind::Bounds);
    assert_eq!(a.to_vec(), vec![1, 2, 3]);
}

#[test]
fn array1_remove_front_and_back() {
    let mut a = Array1::from_vec((1..=6).collect::<Vec<i32>>());
    a.remove_front(2).unwrap();
    a.remove_back(1).unwrap();
    assert_eq!(a.to_vec(), vec![3, 4, 5]);
    assert_eq!(a.remove_back(4).unwrap_err().kind(), ErrorKind::Bounds);
    assert_eq!(a.remove_back(0).unwrap_err().kind(), ErrorKind::Argument);
}

#[test]
fn array1_remove_indices_ignores_order_and_repeats() {
    let mut a = Array1::from_vec(vec![10, 11, 12, 13, 14]);
    a.remove_indices(&[3, 0, 3]).unwrap();
    assert_eq!(a.to_vec(), vec![11, 12, 14]);
    a.remove_indices(&[]).unwrap();
    assert_eq!(a.len(), 3);
    assert_eq!(a.remove_indices(&[3]).unwrap_err().kind(), ErrorKind::Bounds);
    assert_eq!(a.to_vec(), vec![11, 12, 14]);
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

#[test]
fn array1_insert_at_end_appends() {
    let mut a: Array1<i32> = Array1::new(4).unwrap();
    a.insert(4, 7).unwrap();
    assert_eq!(a.to_vec(), vec![0, 0, 0, 0, 7]);
    assert_eq!(a.insert(6, 1).unwrap_err().kind(), ErrorKind::Bounds);
}

#[test]
fn array1_insert_slice_and_ends() {
    let mut a = Array1::from_vec(vec![1, 4]);
    a.insert_slice(1, &vec![2, 3]).unwrap();
    a.insert_front(0);
    a.insert_back(5);
    a.insert_back_slice(&[6, 7][..]);
    a.insert_front_slice(&Array1::from_vec(vec![-1]));
    assert_eq!(a.to_vec(), vec![-1, 0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn array1_insert_from_view_of_other_array() {
    let src = Array1::from_vec(vec![1, 2, 3, 4]);
    let mut a = Array1::from_vec(vec![0]);
    a.insert_slice(1, &src.slice(Slice::reverse()).unwrap()).unwrap();
    assert_eq!(a.to_vec(), vec![0, 4, 3, 2, 1]);
}

// ---------------------------------------------------------------------------
// Formatting and raw access
// ---------------------------------------------------------------------------

#[test]
fn array1_display_truncates_with_options() {
    let a = Array1::from_vec((0..20).collect::<Vec<i32>>());
    assert_eq!(a.format_with(&PrintOptions::compact()), "[0, 1, ..., 18, 19]");
    assert_eq!(Array1::from_vec(vec![1, 2]).to_string(), "[1, 2]");
}

#[test]
fn array1_blas_data_exposes_builtin_layout() {
    let mut a = Array1::from_vec(vec![Strict::new(1.5f64), Strict::new(-2.0)]);
    assert_eq!(a.blas_data(), &[1.5, -2.0]);
    a.blas_data_mut()[0] = 3.0;
    assert_eq!(a[0].get(), 3.0);
}
