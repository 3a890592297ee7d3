//! Contiguous views over borrowed elements.
//!
//! [`Span`] is a read-only view, [`SpanMut`] is a mutable view.
//! Both act like a queue over their elements: popping from either end
//! shrinks the view without touching the underlying storage.
//!
//! Every bound-sensitive operation has a checked form returning
//! `Result` and an `unsafe` unchecked form with `_unchecked` suffix.
use crate::algorithm;
use crate::elementwise::display_seq;
use crate::seq::{Sequence, SequenceMut};
use mzlib_common::error::{Error, Result};
use mzlib_common::fmt::ElemFormat;
use mzlib_common::layout::{reinterpret, reinterpret_mut, Pod};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Raw descriptor of a contiguous range: data pointer and length.
#[derive(Debug, PartialEq, Eq)]
pub struct SpanView<T> {
    pub data: *const T,
    pub len: usize,
}

impl<T> Clone for SpanView<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SpanView<T> {}

#[inline]
fn check_non_empty(op: &'static str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::EmptyContainer(op));
    }
    Ok(())
}

#[inline]
fn check_count(op: &'static str, requested: usize, available: usize) -> Result<()> {
    if requested > available {
        return Err(Error::CountOverflow {
            op,
            requested,
            available,
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn partial_sort_by<T: PartialOrd>(data: &mut [T]) {
    data.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

#[inline]
pub(crate) fn find_sorted<T: PartialOrd>(data: &[T], value: &T) -> isize {
    let idx = data.partition_point(|x| x < value);
    match data.get(idx) {
        Some(x) if x == value => idx as isize,
        _ => -1,
    }
}

/// Read-only contiguous view.
pub struct Span<'a, T> {
    data: &'a [T],
}

impl<T> Clone for Span<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<'_, T> {}

impl<T> Default for Span<'_, T> {
    #[inline]
    fn default() -> Self {
        Span { data: &[] }
    }
}

impl<'a, T> Span<'a, T> {
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Span { data }
    }

    /// Create a span from pointer and length.
    ///
    /// # Safety
    ///
    /// Same requirements as `std::slice::from_raw_parts`, except that
    /// a null pointer is allowed when `len` is zero.
    #[inline]
    pub unsafe fn from_raw_parts(data: *const T, len: usize) -> Self {
        if len == 0 {
            return Span::default();
        }
        Span {
            data: std::slice::from_raw_parts(data, len),
        }
    }

    /// Create a span from begin and end pointers.
    ///
    /// # Safety
    ///
    /// Both pointers must belong to the same allocation, `begin <= end`,
    /// and every element in between must be valid for `'a`.
    #[inline]
    pub unsafe fn from_range(begin: *const T, end: *const T) -> Self {
        let len = end.offset_from(begin) as usize;
        Span::from_raw_parts(begin, len)
    }

    /// # Safety
    ///
    /// Same as [`Span::from_raw_parts`].
    #[inline]
    pub unsafe fn from_view(view: SpanView<T>) -> Self {
        Span::from_raw_parts(view.data, view.len)
    }

    #[inline]
    pub fn view(&self) -> SpanView<T> {
        SpanView {
            data: self.data.as_ptr(),
            len: self.data.len(),
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn step(&self) -> usize {
        1
    }

    #[inline]
    pub fn contiguous(&self) -> bool {
        true
    }

    /// Become an empty view.
    #[inline]
    pub fn clear(&mut self) {
        self.data = &[];
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }

    /// Returns the first `n` elements, or all if fewer.
    #[inline]
    pub fn head(&self, n: usize) -> Span<'a, T> {
        let data = self.data;
        Span::new(&data[..n.min(data.len())])
    }

    /// Returns the last `n` elements, or all if fewer.
    #[inline]
    pub fn tail(&self, n: usize) -> Span<'a, T> {
        let data = self.data;
        Span::new(&data[data.len() - n.min(data.len())..])
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &'a T {
        self.data.get_unchecked(0)
    }

    #[inline]
    pub fn front(&self) -> Result<&'a T> {
        check_non_empty("front", self.len())?;
        Ok(unsafe { self.front_unchecked() })
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &'a T {
        self.data.get_unchecked(self.len() - 1)
    }

    #[inline]
    pub fn back(&self) -> Result<&'a T> {
        check_non_empty("back", self.len())?;
        Ok(unsafe { self.back_unchecked() })
    }

    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn front_n_unchecked(&self, n: usize) -> Span<'a, T> {
        Span::new(self.data.get_unchecked(..n))
    }

    #[inline]
    pub fn front_n(&self, n: usize) -> Result<Span<'a, T>> {
        check_count("front", n, self.len())?;
        Ok(unsafe { self.front_n_unchecked(n) })
    }

    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn back_n_unchecked(&self, n: usize) -> Span<'a, T> {
        Span::new(self.data.get_unchecked(self.len() - n..))
    }

    #[inline]
    pub fn back_n(&self, n: usize) -> Result<Span<'a, T>> {
        check_count("back", n, self.len())?;
        Ok(unsafe { self.back_n_unchecked(n) })
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn pop_front_unchecked(&mut self) -> &'a T {
        let data = self.data;
        self.data = data.get_unchecked(1..);
        data.get_unchecked(0)
    }

    #[inline]
    pub fn pop_front(&mut self) -> Result<&'a T> {
        check_non_empty("pop_front", self.len())?;
        Ok(unsafe { self.pop_front_unchecked() })
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn pop_back_unchecked(&mut self) -> &'a T {
        let data = self.data;
        let last = data.len() - 1;
        self.data = data.get_unchecked(..last);
        data.get_unchecked(last)
    }

    #[inline]
    pub fn pop_back(&mut self) -> Result<&'a T> {
        check_non_empty("pop_back", self.len())?;
        Ok(unsafe { self.pop_back_unchecked() })
    }

    /// Remove first `n` elements and return them.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_front_n_unchecked(&mut self, n: usize) -> Span<'a, T> {
        let data = self.data;
        self.data = data.get_unchecked(n..);
        Span::new(data.get_unchecked(..n))
    }

    #[inline]
    pub fn pop_front_n(&mut self, n: usize) -> Result<Span<'a, T>> {
        check_count("pop_front", n, self.len())?;
        Ok(unsafe { self.pop_front_n_unchecked(n) })
    }

    /// Remove last `n` elements and return them.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_back_n_unchecked(&mut self, n: usize) -> Span<'a, T> {
        let data = self.data;
        let mid = data.len() - n;
        self.data = data.get_unchecked(..mid);
        Span::new(data.get_unchecked(mid..))
    }

    #[inline]
    pub fn pop_back_n(&mut self, n: usize) -> Result<Span<'a, T>> {
        check_count("pop_back", n, self.len())?;
        Ok(unsafe { self.pop_back_n_unchecked(n) })
    }

    /// Count leading elements matching predicate.
    /// See [`algorithm::count_filter_front`].
    #[inline]
    pub fn count_filter_front<F: FnMut(&T) -> bool>(&self, pred: F, step: usize) -> usize {
        algorithm::count_filter_front(self.data, pred, step)
    }

    /// Remove and return leading elements matching predicate.
    #[inline]
    pub fn pop_front_filter<F: FnMut(&T) -> bool>(&mut self, pred: F, step: usize) -> Span<'a, T> {
        let n = self.count_filter_front(pred, step);
        // SAFETY: count never exceeds length.
        unsafe { self.pop_front_n_unchecked(n) }
    }

    /// Returns index of first element not less than value.
    #[inline]
    pub fn lower_bound(&self, value: &T) -> usize
    where
        T: PartialOrd,
    {
        self.data.partition_point(|x| x < value)
    }

    /// Returns index of first element for which `less(elem, value)` is false.
    #[inline]
    pub fn lower_bound_by<F>(&self, value: &T, mut less: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.data.partition_point(|x| less(x, value))
    }

    /// Returns index of value in sorted span, or -1 if absent.
    #[inline]
    pub fn find(&self, value: &T) -> isize
    where
        T: PartialOrd,
    {
        find_sorted(self.data, value)
    }

    /// Reinterpret elements as another plain type of identical layout.
    #[inline]
    pub fn cast_as<U: Pod>(&self) -> Span<'a, U>
    where
        T: Pod,
    {
        Span::new(reinterpret(self.data))
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    #[inline]
    fn from(data: &'a [T]) -> Self {
        Span::new(data)
    }
}

impl<'a, T> From<SpanMut<'a, T>> for Span<'a, T> {
    #[inline]
    fn from(src: SpanMut<'a, T>) -> Self {
        Span::new(src.data)
    }
}

impl<T> Index<usize> for Span<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> Sequence for Span<'_, T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.data.get_unchecked(idx)
    }
}

impl<'a, T> IntoIterator for Span<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'b, T: PartialEq<U>, U> PartialEq<Span<'b, U>> for Span<'_, T> {
    #[inline]
    fn eq(&self, other: &Span<'b, U>) -> bool {
        self.data == other.data
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Span<'_, T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.data == &other[..]
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<Span<'_, U>> for [T; N] {
    #[inline]
    fn eq(&self, other: &Span<'_, U>) -> bool {
        self[..] == *other.data
    }
}

impl<T: fmt::Debug> fmt::Debug for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data).finish()
    }
}

impl<T: ElemFormat> fmt::Display for Span<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_seq(self, f)
    }
}

/// Mutable contiguous view.
pub struct SpanMut<'a, T> {
    data: &'a mut [T],
}

impl<T> Default for SpanMut<'_, T> {
    #[inline]
    fn default() -> Self {
        SpanMut { data: &mut [] }
    }
}

impl<'a, T> SpanMut<'a, T> {
    #[inline]
    pub fn new(data: &'a mut [T]) -> Self {
        SpanMut { data }
    }

    /// # Safety
    ///
    /// Same requirements as `std::slice::from_raw_parts_mut`, except
    /// that a null pointer is allowed when `len` is zero.
    #[inline]
    pub unsafe fn from_raw_parts(data: *mut T, len: usize) -> Self {
        if len == 0 {
            return SpanMut::default();
        }
        SpanMut {
            data: std::slice::from_raw_parts_mut(data, len),
        }
    }

    /// # Safety
    ///
    /// Both pointers must belong to the same allocation, `begin <= end`,
    /// and the range must not be aliased for `'a`.
    #[inline]
    pub unsafe fn from_range(begin: *mut T, end: *mut T) -> Self {
        let len = end.offset_from(begin) as usize;
        SpanMut::from_raw_parts(begin, len)
    }

    /// # Safety
    ///
    /// Same as [`SpanMut::from_raw_parts`].
    #[inline]
    pub unsafe fn from_view(view: SpanView<T>) -> Self {
        SpanMut::from_raw_parts(view.data as *mut T, view.len)
    }

    #[inline]
    pub fn view(&self) -> SpanView<T> {
        SpanView {
            data: self.data.as_ptr(),
            len: self.data.len(),
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        self.data
    }

    /// Returns read-only span borrowing this view.
    #[inline]
    pub fn as_span(&self) -> Span<'_, T> {
        Span::new(&*self.data)
    }

    /// Returns a shorter-lived mutable view of the same elements.
    #[inline]
    pub fn reborrow(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(&mut *self.data)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn step(&self) -> usize {
        1
    }

    #[inline]
    pub fn contiguous(&self) -> bool {
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data = &mut [];
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Returns the first `n` elements, or all if fewer.
    #[inline]
    pub fn head(&mut self, n: usize) -> SpanMut<'_, T> {
        let n = n.min(self.len());
        SpanMut::new(&mut self.data[..n])
    }

    /// Returns the last `n` elements, or all if fewer.
    #[inline]
    pub fn tail(&mut self, n: usize) -> SpanMut<'_, T> {
        let len = self.len();
        let n = n.min(len);
        SpanMut::new(&mut self.data[len - n..])
    }

    #[inline]
    pub fn front(&self) -> Result<&T> {
        check_non_empty("front", self.len())?;
        Ok(&self.data[0])
    }

    #[inline]
    pub fn back(&self) -> Result<&T> {
        check_non_empty("back", self.len())?;
        Ok(&self.data[self.len() - 1])
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn front_mut_unchecked(&mut self) -> &mut T {
        self.data.get_unchecked_mut(0)
    }

    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        check_non_empty("front", self.len())?;
        Ok(unsafe { self.front_mut_unchecked() })
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn back_mut_unchecked(&mut self) -> &mut T {
        let last = self.len() - 1;
        self.data.get_unchecked_mut(last)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        check_non_empty("back", self.len())?;
        Ok(unsafe { self.back_mut_unchecked() })
    }

    /// Split off the first `n` elements.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_front_n_unchecked(&mut self, n: usize) -> SpanMut<'a, T> {
        let len = self.data.len();
        let ptr = self.data.as_mut_ptr();
        self.data = std::slice::from_raw_parts_mut(ptr.add(n), len - n);
        SpanMut::new(std::slice::from_raw_parts_mut(ptr, n))
    }

    #[inline]
    pub fn pop_front_n(&mut self, n: usize) -> Result<SpanMut<'a, T>> {
        check_count("pop_front", n, self.len())?;
        Ok(unsafe { self.pop_front_n_unchecked(n) })
    }

    /// Split off the last `n` elements.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_back_n_unchecked(&mut self, n: usize) -> SpanMut<'a, T> {
        let len = self.data.len();
        let ptr = self.data.as_mut_ptr();
        self.data = std::slice::from_raw_parts_mut(ptr, len - n);
        SpanMut::new(std::slice::from_raw_parts_mut(ptr.add(len - n), n))
    }

    #[inline]
    pub fn pop_back_n(&mut self, n: usize) -> Result<SpanMut<'a, T>> {
        check_count("pop_back", n, self.len())?;
        Ok(unsafe { self.pop_back_n_unchecked(n) })
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn pop_front_unchecked(&mut self) -> &'a mut T {
        let head = self.pop_front_n_unchecked(1).into_slice();
        head.get_unchecked_mut(0)
    }

    #[inline]
    pub fn pop_front(&mut self) -> Result<&'a mut T> {
        check_non_empty("pop_front", self.len())?;
        Ok(unsafe { self.pop_front_unchecked() })
    }

    /// # Safety
    ///
    /// Span must not be empty.
    #[inline]
    pub unsafe fn pop_back_unchecked(&mut self) -> &'a mut T {
        let tail = self.pop_back_n_unchecked(1).into_slice();
        tail.get_unchecked_mut(0)
    }

    #[inline]
    pub fn pop_back(&mut self) -> Result<&'a mut T> {
        check_non_empty("pop_back", self.len())?;
        Ok(unsafe { self.pop_back_unchecked() })
    }

    #[inline]
    pub fn count_filter_front<F: FnMut(&T) -> bool>(&self, pred: F, step: usize) -> usize {
        algorithm::count_filter_front(&*self.data, pred, step)
    }

    #[inline]
    pub fn pop_front_filter<F>(&mut self, pred: F, step: usize) -> SpanMut<'a, T>
    where
        F: FnMut(&T) -> bool,
    {
        let n = self.count_filter_front(pred, step);
        // SAFETY: count never exceeds length.
        unsafe { self.pop_front_n_unchecked(n) }
    }

    #[inline]
    pub fn lower_bound(&self, value: &T) -> usize
    where
        T: PartialOrd,
    {
        self.as_span().lower_bound(value)
    }

    #[inline]
    pub fn lower_bound_by<F>(&self, value: &T, less: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.as_span().lower_bound_by(value, less)
    }

    #[inline]
    pub fn find(&self, value: &T) -> isize
    where
        T: PartialOrd,
    {
        find_sorted(&*self.data, value)
    }

    /// Sort in ascending order. Incomparable elements are treated as equal.
    #[inline]
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        partial_sort_by(&mut *self.data)
    }

    #[inline]
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.data.sort_unstable_by(cmp)
    }

    /// Copy all elements from a span of the same length.
    #[inline]
    pub fn copy_from(&mut self, src: Span<'_, T>) -> Result<()>
    where
        T: Copy,
    {
        Error::check_size("assignment", self.len(), src.len())?;
        self.data.copy_from_slice(src.data);
        Ok(())
    }

    #[inline]
    pub fn cast_as<U: Pod>(&self) -> Span<'_, U>
    where
        T: Pod,
    {
        Span::new(reinterpret(&*self.data))
    }

    #[inline]
    pub fn cast_as_mut<U: Pod>(&mut self) -> SpanMut<'_, U>
    where
        T: Pod,
    {
        SpanMut::new(reinterpret_mut(&mut *self.data))
    }
}

impl<'a, T> From<&'a mut [T]> for SpanMut<'a, T> {
    #[inline]
    fn from(data: &'a mut [T]) -> Self {
        SpanMut::new(data)
    }
}

impl<T> Index<usize> for SpanMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> IndexMut<usize> for SpanMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}

impl<T> Sequence for SpanMut<'_, T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.data.get_unchecked(idx)
    }
}

impl<T> SequenceMut for SpanMut<'_, T> {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.data.get_unchecked_mut(idx)
    }
}

impl<'b, T: PartialEq<U>, U> PartialEq<SpanMut<'b, U>> for SpanMut<'_, T> {
    #[inline]
    fn eq(&self, other: &SpanMut<'b, U>) -> bool {
        *self.data == *other.data
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for SpanMut<'_, T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        *self.data == other[..]
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<SpanMut<'_, U>> for [T; N] {
    #[inline]
    fn eq(&self, other: &SpanMut<'_, U>) -> bool {
        self[..] == *other.data
    }
}

impl<T: fmt::Debug> fmt::Debug for SpanMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: ElemFormat> fmt::Display for SpanMut<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_seq(self, f)
    }
}
