//! Strided views over borrowed elements.
//!
//! A slice addresses `len` elements at `data + i * step`. The step is
//! always positive; reversed views are not supported. Safe constructors
//! derive the length from the borrowed slice so that every addressed
//! element lies inside it.
use crate::algorithm;
use crate::elementwise::display_seq;
use crate::seq::{Sequence, SequenceMut};
use crate::span::{Span, SpanMut};
use mzlib_common::error::{Error, Result};
use mzlib_common::fmt::ElemFormat;
use mzlib_common::layout::{assert_same_layout, Pod};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{AddAssign, Index, IndexMut, Mul};

/// Raw descriptor of a strided range: data pointer, length and step.
#[derive(Debug, PartialEq, Eq)]
pub struct SliceView<T> {
    pub data: *const T,
    pub len: usize,
    pub step: usize,
}

impl<T> Clone for SliceView<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceView<T> {}

/// Returns number of strided elements inside a range of given length.
#[inline]
fn strided_len(len: usize, step: usize) -> usize {
    if len == 0 {
        0
    } else {
        (len - 1) / step + 1
    }
}

#[inline]
fn check_step(step: usize) -> Result<()> {
    if step == 0 {
        return Err(Error::InvalidArgument("slice step must be positive".to_string()));
    }
    Ok(())
}

#[inline]
fn check_column(col: usize, n_cols: usize) -> Result<()> {
    if col >= n_cols {
        return Err(Error::InvalidArgument(format!(
            "column {} out of {} columns",
            col, n_cols
        )));
    }
    Ok(())
}

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

/// Binary search over a strided sequence, returning the first index
/// where predicate is false.
#[inline]
fn partition_point<S, F>(seq: &S, mut pred: F) -> usize
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Elem) -> bool,
{
    let mut first = 0;
    let mut count = seq.len();
    while count > 0 {
        let step = count / 2;
        let mid = first + step;
        // SAFETY: mid < first + count <= len.
        if pred(unsafe { seq.elem_unchecked(mid) }) {
            first = mid + 1;
            count -= step + 1;
        } else {
            count = step;
        }
    }
    first
}

/// Read-only strided view.
pub struct Slice<'a, T> {
    data: *const T,
    len: usize,
    step: usize,
    _marker: PhantomData<&'a T>,
}

unsafe impl<T: Sync> Send for Slice<'_, T> {}
unsafe impl<T: Sync> Sync for Slice<'_, T> {}

impl<T> Clone for Slice<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slice<'_, T> {}

impl<T> Default for Slice<'_, T> {
    #[inline]
    fn default() -> Self {
        Slice {
            data: std::ptr::null(),
            len: 0,
            step: 1,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Slice<'a, T> {
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Slice {
            data: data.as_ptr(),
            len: data.len(),
            step: 1,
            _marker: PhantomData,
        }
    }

    /// Create a slice over every `step`-th element of data.
    #[inline]
    pub fn with_step(data: &'a [T], step: usize) -> Result<Self> {
        check_step(step)?;
        Ok(Slice {
            data: data.as_ptr(),
            len: strided_len(data.len(), step),
            step,
            _marker: PhantomData,
        })
    }

    /// Create a slice over one column of a row-major matrix with `n_cols` columns.
    #[inline]
    pub fn column(data: &'a [T], col: usize, n_cols: usize) -> Result<Self> {
        check_column(col, n_cols)?;
        if col >= data.len() {
            return Ok(Slice::default());
        }
        Slice::with_step(&data[col..], n_cols)
    }

    /// # Safety
    ///
    /// For every `i < len`, `data + i * step` must point to a valid
    /// element for `'a`. `data` may be null only if `len` is zero.
    #[inline]
    pub unsafe fn from_raw_parts(data: *const T, len: usize, step: usize) -> Self {
        Slice {
            data,
            len,
            step,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same as [`Slice::from_raw_parts`].
    #[inline]
    pub unsafe fn from_view(view: SliceView<T>) -> Self {
        Slice::from_raw_parts(view.data, view.len, view.step)
    }

    #[inline]
    pub fn view(&self) -> SliceView<T> {
        SliceView {
            data: self.data,
            len: self.len,
            step: self.step,
        }
    }

    /// Returns true if data is set and step is positive.
    #[inline]
    pub fn valid(&self) -> bool {
        !self.data.is_null() && self.step != 0
    }

    #[inline]
    pub fn contiguous(&self) -> bool {
        self.step == 1
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data
    }

    /// Returns contiguous elements as a standard slice, if step is 1.
    #[inline]
    pub fn as_contiguous(&self) -> Option<&'a [T]> {
        if self.len == 0 {
            return Some(&[]);
        }
        if self.step != 1 {
            return None;
        }
        // SAFETY: step is 1, so elements are adjacent.
        Some(unsafe { std::slice::from_raw_parts(self.data, self.len) })
    }

    /// # Safety
    ///
    /// `idx` must be less than length.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &'a T {
        &*self.data.add(idx * self.step)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&'a T> {
        if idx < self.len {
            Some(unsafe { self.get_unchecked(idx) })
        } else {
            None
        }
    }

    #[inline]
    pub fn at(&self, idx: usize) -> Result<&'a T> {
        self.get(idx).ok_or(Error::IndexOutOfBound {
            index: idx,
            len: self.len,
        })
    }

    #[inline]
    pub fn iter(&self) -> SliceIter<'a, T> {
        SliceIter {
            slice: *self,
            idx: 0,
        }
    }

    /// Returns the first `n` elements, or all if fewer.
    #[inline]
    pub fn head(&self, n: usize) -> Slice<'a, T> {
        let n = n.min(self.len);
        // SAFETY: clamped within current range.
        unsafe { self.front_n_unchecked(n) }
    }

    /// Returns the last `n` elements, or all if fewer.
    #[inline]
    pub fn tail(&self, n: usize) -> Slice<'a, T> {
        let n = n.min(self.len);
        // SAFETY: clamped within current range.
        unsafe { self.back_n_unchecked(n) }
    }

    /// # Safety
    ///
    /// Slice must not be empty.
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &'a T {
        self.get_unchecked(0)
    }

    #[inline]
    pub fn front(&self) -> Result<&'a T> {
        check_non_empty("front", self.len)?;
        Ok(unsafe { self.front_unchecked() })
    }

    /// # Safety
    ///
    /// Slice must not be empty.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &'a T {
        self.get_unchecked(self.len - 1)
    }

    #[inline]
    pub fn back(&self) -> Result<&'a T> {
        check_non_empty("back", self.len)?;
        Ok(unsafe { self.back_unchecked() })
    }

    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn front_n_unchecked(&self, n: usize) -> Slice<'a, T> {
        Slice::from_raw_parts(self.data, n, self.step)
    }

    #[inline]
    pub fn front_n(&self, n: usize) -> Result<Slice<'a, T>> {
        check_count("front", n, self.len)?;
        Ok(unsafe { self.front_n_unchecked(n) })
    }

    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn back_n_unchecked(&self, n: usize) -> Slice<'a, T> {
        if n == 0 {
            return Slice::from_raw_parts(self.data, 0, self.step);
        }
        Slice::from_raw_parts(self.data.add((self.len - n) * self.step), n, self.step)
    }

    #[inline]
    pub fn back_n(&self, n: usize) -> Result<Slice<'a, T>> {
        check_count("back", n, self.len)?;
        Ok(unsafe { self.back_n_unchecked(n) })
    }

    /// Remove first `n` elements and return them.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_front_n_unchecked(&mut self, n: usize) -> Slice<'a, T> {
        let head = self.front_n_unchecked(n);
        if n == self.len {
            self.len = 0;
        } else {
            self.data = self.data.add(n * self.step);
            self.len -= n;
        }
        head
    }

    #[inline]
    pub fn pop_front_n(&mut self, n: usize) -> Result<Slice<'a, T>> {
        check_count("pop_front", n, self.len)?;
        Ok(unsafe { self.pop_front_n_unchecked(n) })
    }

    /// Remove last `n` elements and return them.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_back_n_unchecked(&mut self, n: usize) -> Slice<'a, T> {
        let tail = self.back_n_unchecked(n);
        self.len -= n;
        tail
    }

    #[inline]
    pub fn pop_back_n(&mut self, n: usize) -> Result<Slice<'a, T>> {
        check_count("pop_back", n, self.len)?;
        Ok(unsafe { self.pop_back_n_unchecked(n) })
    }

    /// # Safety
    ///
    /// Slice must not be empty.
    #[inline]
    pub unsafe fn pop_front_unchecked(&mut self) -> &'a T {
        self.pop_front_n_unchecked(1).get_unchecked(0)
    }

    #[inline]
    pub fn pop_front(&mut self) -> Result<&'a T> {
        check_non_empty("pop_front", self.len)?;
        Ok(unsafe { self.pop_front_unchecked() })
    }

    /// # Safety
    ///
    /// Slice must not be empty.
    #[inline]
    pub unsafe fn pop_back_unchecked(&mut self) -> &'a T {
        self.pop_back_n_unchecked(1).get_unchecked(0)
    }

    #[inline]
    pub fn pop_back(&mut self) -> Result<&'a T> {
        check_non_empty("pop_back", self.len)?;
        Ok(unsafe { self.pop_back_unchecked() })
    }

    #[inline]
    pub fn count_filter_front<F: FnMut(&T) -> bool>(&self, pred: F, step: usize) -> usize {
        algorithm::count_filter_front(self, pred, step)
    }

    #[inline]
    pub fn pop_front_filter<F: FnMut(&T) -> bool>(&mut self, pred: F, step: usize) -> Slice<'a, T> {
        let n = self.count_filter_front(pred, step);
        // SAFETY: count never exceeds length.
        unsafe { self.pop_front_n_unchecked(n) }
    }

    #[inline]
    pub fn lower_bound(&self, value: &T) -> usize
    where
        T: PartialOrd,
    {
        partition_point(self, |x| x < value)
    }

    #[inline]
    pub fn lower_bound_by<F>(&self, value: &T, mut less: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        partition_point(self, |x| less(x, value))
    }

    /// Returns index of value in sorted slice, or -1 if absent.
    #[inline]
    pub fn find(&self, value: &T) -> isize
    where
        T: PartialOrd,
    {
        let idx = self.lower_bound(value);
        match self.get(idx) {
            Some(x) if x == value => idx as isize,
            _ => -1,
        }
    }

    /// Returns `sum(self[i] * f(i))`.
    #[inline]
    pub fn dot<F>(&self, mut f: F) -> T
    where
        T: Copy + Default + AddAssign + Mul<Output = T>,
        F: FnMut(usize) -> T,
    {
        let mut res = T::default();
        for (i, v) in self.iter().enumerate() {
            res += *v * f(i);
        }
        res
    }

    /// Reinterpret elements as another plain type of identical layout.
    /// The step is kept unchanged.
    #[inline]
    pub fn cast_as<U: Pod>(&self) -> Slice<'a, U>
    where
        T: Pod,
    {
        assert_same_layout::<T, U>();
        // SAFETY: layouts are identical, and every bit pattern is valid for U.
        unsafe { Slice::from_raw_parts(self.data as *const U, self.len, self.step) }
    }

    #[inline]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, T> From<&'a [T]> for Slice<'a, T> {
    #[inline]
    fn from(data: &'a [T]) -> Self {
        Slice::new(data)
    }
}

impl<'a, T> From<Span<'a, T>> for Slice<'a, T> {
    #[inline]
    fn from(span: Span<'a, T>) -> Self {
        Slice::new(span.as_slice())
    }
}

impl<'a, T> From<SliceMut<'a, T>> for Slice<'a, T> {
    #[inline]
    fn from(src: SliceMut<'a, T>) -> Self {
        // SAFETY: exclusive borrow is downgraded to a shared one.
        unsafe { Slice::from_raw_parts(src.data, src.len, src.step) }
    }
}

impl<T> Index<usize> for Slice<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        let len = self.len;
        match self.get(idx) {
            Some(v) => v,
            None => panic!("index {} out of bound {}", idx, len),
        }
    }
}

impl<T> Sequence for Slice<'_, T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.get_unchecked(idx)
    }
}

impl<'b, T: PartialEq<U>, U> PartialEq<Slice<'b, U>> for Slice<'_, T> {
    #[inline]
    fn eq(&self, other: &Slice<'b, U>) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Slice<'_, T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.len == N && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<Slice<'_, U>> for [T; N] {
    #[inline]
    fn eq(&self, other: &Slice<'_, U>) -> bool {
        other.len == N && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: fmt::Debug> fmt::Debug for Slice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: ElemFormat> fmt::Display for Slice<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_seq(self, f)
    }
}

pub struct SliceIter<'a, T> {
    slice: Slice<'a, T>,
    idx: usize,
}

impl<'a, T> Iterator for SliceIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let item = self.slice.get(self.idx)?;
        self.idx += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.slice.len - self.idx;
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for SliceIter<'_, T> {}

impl<'a, T> IntoIterator for Slice<'a, T> {
    type Item = &'a T;
    type IntoIter = SliceIter<'a, T>;

    #[inline]
    fn into_iter(self) -> SliceIter<'a, T> {
        SliceIter {
            slice: self,
            idx: 0,
        }
    }
}

/// Mutable strided view.
pub struct SliceMut<'a, T> {
    data: *mut T,
    len: usize,
    step: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for SliceMut<'_, T> {}
unsafe impl<T: Sync> Sync for SliceMut<'_, T> {}

impl<T> Default for SliceMut<'_, T> {
    #[inline]
    fn default() -> Self {
        SliceMut {
            data: std::ptr::null_mut(),
            len: 0,
            step: 1,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> SliceMut<'a, T> {
    #[inline]
    pub fn new(data: &'a mut [T]) -> Self {
        SliceMut {
            data: data.as_mut_ptr(),
            len: data.len(),
            step: 1,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn with_step(data: &'a mut [T], step: usize) -> Result<Self> {
        check_step(step)?;
        Ok(SliceMut {
            data: data.as_mut_ptr(),
            len: strided_len(data.len(), step),
            step,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn column(data: &'a mut [T], col: usize, n_cols: usize) -> Result<Self> {
        check_column(col, n_cols)?;
        if col >= data.len() {
            return Ok(SliceMut::default());
        }
        SliceMut::with_step(&mut data[col..], n_cols)
    }

    /// # Safety
    ///
    /// For every `i < len`, `data + i * step` must point to a valid
    /// element not aliased for `'a`. `data` may be null only if `len` is zero.
    #[inline]
    pub unsafe fn from_raw_parts(data: *mut T, len: usize, step: usize) -> Self {
        SliceMut {
            data,
            len,
            step,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same as [`SliceMut::from_raw_parts`].
    #[inline]
    pub unsafe fn from_view(view: SliceView<T>) -> Self {
        SliceMut::from_raw_parts(view.data as *mut T, view.len, view.step)
    }

    #[inline]
    pub fn view(&self) -> SliceView<T> {
        SliceView {
            data: self.data,
            len: self.len,
            step: self.step,
        }
    }

    /// Returns read-only slice borrowing this view.
    #[inline]
    pub fn as_slice(&self) -> Slice<'_, T> {
        // SAFETY: shared borrow of self prevents mutation meanwhile.
        unsafe { Slice::from_raw_parts(self.data, self.len, self.step) }
    }

    #[inline]
    pub fn reborrow(&mut self) -> SliceMut<'_, T> {
        // SAFETY: exclusive borrow of self prevents other access meanwhile.
        unsafe { SliceMut::from_raw_parts(self.data, self.len, self.step) }
    }

    #[inline]
    pub fn valid(&self) -> bool {
        !self.data.is_null() && self.step != 0
    }

    #[inline]
    pub fn contiguous(&self) -> bool {
        self.step == 1
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data
    }

    #[inline]
    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        if self.len == 0 {
            return Some(&mut []);
        }
        if self.step != 1 {
            return None;
        }
        // SAFETY: step is 1, so elements are adjacent.
        Some(unsafe { std::slice::from_raw_parts_mut(self.data, self.len) })
    }

    /// # Safety
    ///
    /// `idx` must be less than length.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        &*self.data.add(idx * self.step)
    }

    /// # Safety
    ///
    /// `idx` must be less than length.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        &mut *self.data.add(idx * self.step)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx < self.len {
            Some(unsafe { self.get_unchecked(idx) })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx < self.len {
            Some(unsafe { self.get_unchecked_mut(idx) })
        } else {
            None
        }
    }

    #[inline]
    pub fn at(&self, idx: usize) -> Result<&T> {
        let len = self.len;
        self.get(idx)
            .ok_or(Error::IndexOutOfBound { index: idx, len })
    }

    #[inline]
    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T> {
        let len = self.len;
        self.get_mut(idx)
            .ok_or(Error::IndexOutOfBound { index: idx, len })
    }

    #[inline]
    pub fn iter(&self) -> SliceIter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the first `n` elements, or all if fewer.
    #[inline]
    pub fn head(&mut self, n: usize) -> SliceMut<'_, T> {
        let n = n.min(self.len);
        // SAFETY: clamped within current range.
        unsafe { SliceMut::from_raw_parts(self.data, n, self.step) }
    }

    /// Returns the last `n` elements, or all if fewer.
    #[inline]
    pub fn tail(&mut self, n: usize) -> SliceMut<'_, T> {
        let n = n.min(self.len);
        let mut tmp = self.reborrow();
        // SAFETY: clamped within current range.
        unsafe { tmp.pop_back_n_unchecked(n) }
    }

    #[inline]
    pub fn front(&self) -> Result<&T> {
        check_non_empty("front", self.len)?;
        Ok(unsafe { self.get_unchecked(0) })
    }

    #[inline]
    pub fn back(&self) -> Result<&T> {
        check_non_empty("back", self.len)?;
        Ok(unsafe { self.get_unchecked(self.len - 1) })
    }

    /// Split off the first `n` elements.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_front_n_unchecked(&mut self, n: usize) -> SliceMut<'a, T> {
        let head = SliceMut::from_raw_parts(self.data, n, self.step);
        if n == self.len {
            self.len = 0;
        } else {
            self.data = self.data.add(n * self.step);
            self.len -= n;
        }
        head
    }

    #[inline]
    pub fn pop_front_n(&mut self, n: usize) -> Result<SliceMut<'a, T>> {
        check_count("pop_front", n, self.len)?;
        Ok(unsafe { self.pop_front_n_unchecked(n) })
    }

    /// Split off the last `n` elements.
    ///
    /// # Safety
    ///
    /// `n` must not exceed length.
    #[inline]
    pub unsafe fn pop_back_n_unchecked(&mut self, n: usize) -> SliceMut<'a, T> {
        let start = if n == 0 {
            self.data
        } else {
            self.data.add((self.len - n) * self.step)
        };
        self.len -= n;
        SliceMut::from_raw_parts(start, n, self.step)
    }

    #[inline]
    pub fn pop_back_n(&mut self, n: usize) -> Result<SliceMut<'a, T>> {
        check_count("pop_back", n, self.len)?;
        Ok(unsafe { self.pop_back_n_unchecked(n) })
    }

    /// # Safety
    ///
    /// Slice must not be empty.
    #[inline]
    pub unsafe fn pop_front_unchecked(&mut self) -> &'a mut T {
        let head = self.pop_front_n_unchecked(1);
        &mut *head.data
    }

    #[inline]
    pub fn pop_front(&mut self) -> Result<&'a mut T> {
        check_non_empty("pop_front", self.len)?;
        Ok(unsafe { self.pop_front_unchecked() })
    }

    /// # Safety
    ///
    /// Slice must not be empty.
    #[inline]
    pub unsafe fn pop_back_unchecked(&mut self) -> &'a mut T {
        let tail = self.pop_back_n_unchecked(1);
        &mut *tail.data
    }

    #[inline]
    pub fn pop_back(&mut self) -> Result<&'a mut T> {
        check_non_empty("pop_back", self.len)?;
        Ok(unsafe { self.pop_back_unchecked() })
    }

    #[inline]
    pub fn count_filter_front<F: FnMut(&T) -> bool>(&self, pred: F, step: usize) -> usize {
        self.as_slice().count_filter_front(pred, step)
    }

    #[inline]
    pub fn pop_front_filter<F>(&mut self, pred: F, step: usize) -> SliceMut<'a, T>
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
        self.as_slice().lower_bound(value)
    }

    #[inline]
    pub fn lower_bound_by<F>(&self, value: &T, less: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.as_slice().lower_bound_by(value, less)
    }

    #[inline]
    pub fn find(&self, value: &T) -> isize
    where
        T: PartialOrd,
    {
        self.as_slice().find(value)
    }

    #[inline]
    pub fn dot<F>(&self, f: F) -> T
    where
        T: Copy + Default + AddAssign + Mul<Output = T>,
        F: FnMut(usize) -> T,
    {
        self.as_slice().dot(f)
    }

    /// Sort in ascending order. Incomparable elements are treated as equal.
    #[inline]
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        self.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Sort with comparator. A strided slice is sorted through an index
    /// permutation which is then applied by swapping elements in place.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if let Some(data) = self.as_contiguous_mut() {
            data.sort_unstable_by(cmp);
            return;
        }
        let mut perm: SmallVec<[usize; 32]> = (0..self.len).collect();
        // SAFETY: all indices are less than length.
        perm.sort_unstable_by(|&a, &b| unsafe { cmp(self.get_unchecked(a), self.get_unchecked(b)) });
        for i in 0..perm.len() {
            if perm[i] == usize::MAX {
                continue;
            }
            let mut cur = i;
            loop {
                let next = perm[cur];
                perm[cur] = usize::MAX;
                if next == i {
                    break;
                }
                // SAFETY: cur and next are distinct indices less than length.
                unsafe {
                    std::ptr::swap(
                        self.data.add(cur * self.step),
                        self.data.add(next * self.step),
                    )
                }
                cur = next;
            }
        }
    }

    /// Copy all elements from a slice of the same length.
    /// Copies as one block if both slices are contiguous.
    pub fn copy_from(&mut self, src: Slice<'_, T>) -> Result<()>
    where
        T: Copy,
    {
        Error::check_size("assignment", self.len, src.len())?;
        if self.len == 0 {
            return Ok(());
        }
        if self.contiguous() && src.contiguous() {
            // SAFETY: both ranges hold `len` adjacent elements, and `src` is
            // a distinct shared borrow.
            unsafe { std::ptr::copy(src.as_ptr(), self.data, self.len) }
        } else {
            for i in 0..self.len {
                // SAFETY: i < len of both slices.
                unsafe { *self.get_unchecked_mut(i) = *src.get_unchecked(i) }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn cast_as<U: Pod>(&self) -> Slice<'_, U>
    where
        T: Pod,
    {
        self.as_slice().cast_as()
    }

    #[inline]
    pub fn cast_as_mut<U: Pod>(&mut self) -> SliceMut<'_, U>
    where
        T: Pod,
    {
        assert_same_layout::<T, U>();
        // SAFETY: layouts are identical, and every bit pattern is valid for both types.
        unsafe { SliceMut::from_raw_parts(self.data as *mut U, self.len, self.step) }
    }
}

impl<'a, T> From<&'a mut [T]> for SliceMut<'a, T> {
    #[inline]
    fn from(data: &'a mut [T]) -> Self {
        SliceMut::new(data)
    }
}

impl<'a, T> From<SpanMut<'a, T>> for SliceMut<'a, T> {
    #[inline]
    fn from(span: SpanMut<'a, T>) -> Self {
        SliceMut::new(span.into_slice())
    }
}

impl<T> Index<usize> for SliceMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        let len = self.len;
        match self.get(idx) {
            Some(v) => v,
            None => panic!("index {} out of bound {}", idx, len),
        }
    }
}

impl<T> IndexMut<usize> for SliceMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(idx) {
            Some(v) => v,
            None => panic!("index {} out of bound {}", idx, len),
        }
    }
}

impl<T> Sequence for SliceMut<'_, T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.get_unchecked(idx)
    }
}

impl<T> SequenceMut for SliceMut<'_, T> {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.get_unchecked_mut(idx)
    }
}

impl<'b, T: PartialEq<U>, U> PartialEq<SliceMut<'b, U>> for SliceMut<'_, T> {
    #[inline]
    fn eq(&self, other: &SliceMut<'b, U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for SliceMut<'_, T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<SliceMut<'_, U>> for [T; N] {
    #[inline]
    fn eq(&self, other: &SliceMut<'_, U>) -> bool {
        *self == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for SliceMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: ElemFormat> fmt::Display for SliceMut<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_seq(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elementwise::{ElementwiseConstOps, ElementwiseOps};
    use rand::Rng;

    #[test]
    fn test_slice_strided_access() {
        let buf: Vec<i32> = (0..10).collect();
        let s = Slice::with_step(&buf, 2).unwrap();
        assert_eq!(5, s.len());
        assert!(!s.contiguous());
        assert!(s.valid());
        for i in 0..s.len() {
            assert_eq!(buf[i * 2], s[i]);
        }
        assert_eq!([0, 2, 4, 6, 8], s);
        let s3 = Slice::with_step(&buf, 3).unwrap();
        assert_eq!([0, 3, 6, 9], s3);
        assert!(Slice::with_step(&buf, 0).is_err());
        assert!(!Slice::<i32>::default().valid());
        let view = unsafe { Slice::from_view(s3.view()) };
        assert_eq!(s3, view);
    }

    #[test]
    fn test_slice_huge_step() {
        let buf = [1, 2, 3];
        let s = Slice::with_step(&buf, usize::MAX).unwrap();
        assert_eq!(1, s.len());
        assert_eq!([1], s);
        let s = Slice::with_step(&buf, buf.len()).unwrap();
        assert_eq!([1], s);
        let empty: [i32; 0] = [];
        assert_eq!(0, Slice::with_step(&empty, usize::MAX).unwrap().len());
        let mut buf = [4, 5];
        let mut m = SliceMut::with_step(&mut buf, usize::MAX - 1).unwrap();
        assert_eq!(1, m.len());
        m[0] = 9;
        assert_eq!([9, 5], buf);
    }

    #[test]
    fn test_slice_column() {
        // 3 x 4 row-major matrix
        let m: Vec<i32> = (0..12).collect();
        let c1 = Slice::column(&m, 1, 4).unwrap();
        assert_eq!([1, 5, 9], c1);
        let c3 = Slice::column(&m, 3, 4).unwrap();
        assert_eq!([3, 7, 11], c3);
        assert!(Slice::column(&m, 4, 4).is_err());
        assert!(Slice::column(&m[..2], 3, 4).unwrap().is_empty());
        assert_eq!(1 + 25 + 81, c1.dot(|i| c1[i]));
    }

    #[test]
    fn test_slice_queue() {
        let buf: Vec<i32> = (0..10).collect();
        let mut s = Slice::with_step(&buf, 2).unwrap();
        assert_eq!(&0, s.front().unwrap());
        assert_eq!(&8, s.back().unwrap());
        assert_eq!([0, 2], s.head(2));
        assert_eq!([6, 8], s.tail(2));
        assert_eq!(5, s.tail(9).len());
        assert_eq!(&0, s.pop_front().unwrap());
        assert_eq!(&8, s.pop_back().unwrap());
        assert_eq!([2, 4, 6], s);
        assert_eq!([6], s.pop_back_n(1).unwrap());
        assert!(s.pop_front_n(3).is_err());
        assert_eq!([2, 4], s.pop_front_n(2).unwrap());
        assert!(s.is_empty());
        assert!(s.front().is_err());
        assert!(s.pop_back().is_err());
        assert_eq!(
            Error::IndexOutOfBound { index: 7, len: 5 },
            Slice::with_step(&buf, 2).unwrap().at(7).unwrap_err()
        );
    }

    #[test]
    fn test_slice_search() {
        let buf = [1, 100, 3, 100, 3, 100, 7, 100];
        let s = Slice::with_step(&buf, 2).unwrap();
        assert_eq!(1, s.lower_bound(&3));
        assert_eq!(1, s.find(&3));
        assert_eq!(-1, s.find(&5));
        assert_eq!(3, s.lower_bound_by(&5, |a, b| a < b));
        assert_eq!(1, s.count_filter_front(|x| *x < 2, 2));
        let mut s2 = s;
        assert_eq!([1], s2.pop_front_filter(|x| *x < 2, 1));
        assert_eq!([3, 3, 7], s2);
    }

    #[test]
    fn test_slice_cast_keeps_step() {
        let buf = [1.0f32, 2.0, 3.0, 4.0];
        let s = Slice::with_step(&buf, 2).unwrap();
        let bits = s.cast_as::<u32>();
        assert_eq!(2, bits.step());
        assert_eq!([1.0f32.to_bits(), 3.0f32.to_bits()], bits);
        assert_eq!(s, bits.cast_as::<f32>());
    }

    #[test]
    fn test_slice_mut_sort_strided() {
        let mut buf = [5, -1, 3, -2, 9, -3, 1, -4];
        {
            let mut s = SliceMut::with_step(&mut buf, 2).unwrap();
            s.sort();
            assert_eq!([1, 3, 5, 9], s);
        }
        assert_eq!([1, -1, 3, -2, 5, -3, 9, -4], buf);
        {
            let mut s = SliceMut::column(&mut buf, 1, 2).unwrap();
            s.sort_by(|a, b| b.cmp(a));
        }
        assert_eq!([1, -1, 3, -2, 5, -3, 9, -4], buf);
        let mut s = SliceMut::new(&mut buf);
        s.sort();
        assert_eq!([-4, -3, -2, -1, 1, 3, 5, 9], s);
    }

    #[test]
    fn test_slice_mut_sort_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let step = rng.gen_range(1..5);
            let n = rng.gen_range(0..40);
            let mut buf: Vec<i32> = (0..n).map(|_| rng.gen_range(-50..50)).collect();
            let mut expected: Vec<i32> = buf.iter().step_by(step).copied().collect();
            expected.sort();
            let untouched: Vec<(usize, i32)> = buf
                .iter()
                .copied()
                .enumerate()
                .filter(|(i, _)| i % step != 0)
                .collect();
            let mut s = SliceMut::with_step(&mut buf, step).unwrap();
            s.sort();
            assert_eq!(expected, s.as_slice().to_vec());
            for (i, v) in untouched {
                assert_eq!(v, buf[i]);
            }
        }
    }

    #[test]
    fn test_slice_mut_copy_and_ops() {
        let src = [1, 2, 3];
        let mut buf = [0; 6];
        let mut s = SliceMut::with_step(&mut buf, 2).unwrap();
        s.copy_from(Slice::new(&src)).unwrap();
        assert!(s.copy_from(Slice::new(&src[..1])).is_err());
        s.mul_scalar(10);
        s.add_seq(&[1, 1, 1]).unwrap();
        s[0] = 0;
        *s.at_mut(2).unwrap() += 1;
        assert!(s.at_mut(3).is_err());
        assert_eq!("[0,21,32]", s.to_default_string());
        let mut contiguous = [0; 3];
        SliceMut::new(&mut contiguous)
            .copy_from(Slice::new(&src))
            .unwrap();
        assert_eq!(src, contiguous);
        assert_eq!([0, 0, 21, 0, 32, 0], buf);
    }

    #[test]
    fn test_slice_mut_queue() {
        let mut buf = [0, 1, 2, 3, 4, 5];
        let mut s = SliceMut::with_step(&mut buf, 2).unwrap();
        *s.head(1).at_mut(0).unwrap() = 10;
        *s.tail(1).at_mut(0).unwrap() = 40;
        let first = s.pop_front().unwrap();
        *first += 1;
        let last = s.pop_back().unwrap();
        *last += 1;
        assert_eq!([2], s);
        assert_eq!(&2, s.front().unwrap());
        assert_eq!(&2, s.back().unwrap());
        drop(s);
        assert_eq!([11, 1, 2, 3, 41, 5], buf);
    }

    #[test]
    fn test_slice_from_span_and_display() {
        let data = [1.5f64, 2.5, 3.5];
        let s: Slice<'_, f64> = Span::new(&data).into();
        assert!(s.contiguous());
        assert_eq!(Some(&data[..]), s.as_contiguous());
        assert_eq!("[1.5,2.5,3.5]", s.to_string());
        let st = Slice::with_step(&data, 2).unwrap();
        assert_eq!(None, st.as_contiguous());
        assert_eq!("[1.5; 3.5]", st.string_with("{}", "; ", "[]").unwrap());
        assert_eq!("[1.5, 3.5]", format!("{:?}", st));
    }
}
