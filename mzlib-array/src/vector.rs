//! Owning growable buffer.
//!
//! [`Vector`] owns an aligned [`RawBuf`] and a logical length. Slots
//! between length and capacity stay initialized: they hold default
//! values after allocation, or stale values after shrinking. Resizing
//! within capacity exposes them as they are.
//!
//! Growth is controlled by a [`GrowthPolicy`] type parameter, which is
//! only consulted by [`Vector::enlarge`] when the buffer is full.
use crate::elementwise::display_seq;
use crate::seq::{self, IndexElem, Sequence, SequenceMut};
use crate::slice::{Slice, SliceMut};
use crate::span::{find_sorted, partial_sort_by, Span, SpanMut};
use mzlib_common::alloc::RawBuf;
use mzlib_common::error::{Error, Result};
use mzlib_common::fmt::ElemFormat;
use mzlib_common::growth::{Doubling, GrowthPolicy};
use mzlib_common::layout::{Pod, Zeroable};
use mzlib_common::stream::Stream;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

pub struct Vector<T, G: GrowthPolicy = Doubling> {
    buf: RawBuf<T>,
    len: usize,
    _policy: PhantomData<G>,
}

impl<T, G: GrowthPolicy> Vector<T, G> {
    /// Create an empty vector without allocation.
    #[inline]
    pub const fn new() -> Self {
        Vector {
            buf: RawBuf::empty(),
            len: 0,
            _policy: PhantomData,
        }
    }

    #[inline]
    fn from_buf(buf: RawBuf<T>, len: usize) -> Self {
        debug_assert!(len <= buf.cap());
        Vector {
            buf,
            len,
            _policy: PhantomData,
        }
    }

    /// Move all content out, leaving this vector empty and unallocated.
    #[inline]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns pointer to the first slot, null if capacity is zero.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf.as_slice()[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        &mut self.buf.as_slice_mut()[..len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Set length to zero. Capacity and slot values are kept.
    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        self.len = 0;
        self
    }

    /// Release memory and become empty.
    #[inline]
    pub fn clean(&mut self) {
        self.buf.release();
        self.len = 0;
    }

    /// Set length to capacity, exposing all slots.
    #[inline]
    pub fn expand_to_capacity(&mut self) {
        self.len = self.buf.cap();
    }

    /// # Safety
    ///
    /// Caller must guarantee `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        self.buf.as_slice().get_unchecked(idx)
    }

    /// # Safety
    ///
    /// Caller must guarantee `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.buf.as_slice_mut().get_unchecked_mut(idx)
    }

    #[inline]
    pub fn at(&self, idx: usize) -> Result<&T> {
        self.as_slice().get(idx).ok_or(Error::IndexOutOfBound {
            index: idx,
            len: self.len,
        })
    }

    #[inline]
    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(idx)
            .ok_or(Error::IndexOutOfBound { index: idx, len })
    }

    /// # Safety
    ///
    /// Caller must guarantee the vector is not empty.
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &T {
        self.get_unchecked(0)
    }

    #[inline]
    pub fn front(&self) -> Result<&T> {
        self.as_slice().first().ok_or(Error::EmptyContainer("front"))
    }

    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice()
            .first_mut()
            .ok_or(Error::EmptyContainer("front"))
    }

    /// # Safety
    ///
    /// Caller must guarantee the vector is not empty.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &T {
        self.get_unchecked(self.len - 1)
    }

    #[inline]
    pub fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(Error::EmptyContainer("back"))
    }

    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice()
            .last_mut()
            .ok_or(Error::EmptyContainer("back"))
    }

    /// Write value into the slot after the last element.
    ///
    /// # Safety
    ///
    /// Caller must guarantee `self.len() < self.capacity()`.
    #[inline]
    pub unsafe fn push_back_unchecked(&mut self, value: T) {
        let len = self.len;
        *self.buf.as_slice_mut().get_unchecked_mut(len) = value;
        self.len += 1;
    }

    #[inline]
    pub fn span(&self) -> Span<'_, T> {
        Span::new(self.as_slice())
    }

    #[inline]
    pub fn span_mut(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(self.as_mut_slice())
    }

    #[inline]
    fn clamp_range(&self, first: usize, len: usize) -> (usize, usize) {
        let first = first.min(self.len);
        (first, first + len.min(self.len - first))
    }

    /// Returns view of `len` elements starting from `first`.
    /// Both are clamped to the valid range.
    #[inline]
    pub fn span_range(&self, first: usize, len: usize) -> Span<'_, T> {
        let (start, end) = self.clamp_range(first, len);
        Span::new(&self.as_slice()[start..end])
    }

    #[inline]
    pub fn span_range_mut(&mut self, first: usize, len: usize) -> SpanMut<'_, T> {
        let (start, end) = self.clamp_range(first, len);
        SpanMut::new(&mut self.as_mut_slice()[start..end])
    }

    #[inline]
    pub fn slice(&self) -> Slice<'_, T> {
        Slice::new(self.as_slice())
    }

    #[inline]
    pub fn slice_mut(&mut self) -> SliceMut<'_, T> {
        SliceMut::new(self.as_mut_slice())
    }

    /// Returns view of at most first `n` elements.
    #[inline]
    pub fn head(&self, n: usize) -> Span<'_, T> {
        self.span_range(0, n)
    }

    /// Returns view of at most last `n` elements.
    #[inline]
    pub fn tail(&self, n: usize) -> Span<'_, T> {
        let n = n.min(self.len);
        self.span_range(self.len - n, n)
    }

    #[inline]
    pub fn sort(&mut self) -> &mut Self
    where
        T: PartialOrd,
    {
        partial_sort_by(self.as_mut_slice());
        self
    }

    #[inline]
    pub fn sort_by<F>(&mut self, cmp: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(cmp);
        self
    }

    /// Remove consecutive duplicates, returns number of removed elements.
    #[inline]
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|a, b| a == b)
    }

    /// Remove consecutive elements considered the same as the last kept
    /// one, returns number of removed elements. Removed values are moved
    /// behind the new length.
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let len = self.len;
        if len <= 1 {
            return 0;
        }
        let data = self.as_mut_slice();
        let mut kept = 1;
        for i in 1..len {
            if !same(&data[i], &data[kept - 1]) {
                data.swap(kept, i);
                kept += 1;
            }
        }
        self.len = kept;
        len - kept
    }

    /// Returns index of first element not less than value.
    #[inline]
    pub fn lower_bound(&self, value: &T) -> usize
    where
        T: PartialOrd,
    {
        self.as_slice().partition_point(|x| x < value)
    }

    /// Returns index of value in sorted vector, or -1 if absent.
    #[inline]
    pub fn find(&self, value: &T) -> isize
    where
        T: PartialOrd,
    {
        find_sorted(self.as_slice(), value)
    }

    /// Save elements with a custom per-element writer.
    pub fn save_with<S, F>(&self, stream: &mut S, mut save_elem: F) -> Result<()>
    where
        S: Stream,
        F: FnMut(&mut S, &T) -> Result<()>,
    {
        stream.write_len(self.len)?;
        for elem in self.as_slice() {
            save_elem(stream, elem)?;
        }
        Ok(())
    }

    /// Save with labels around the content. See [`Vector::load_labeled_with`].
    #[inline]
    pub fn save_labeled_with<S, F>(&self, stream: &mut S, encoding: u64, save_elem: F) -> Result<()>
    where
        S: Stream,
        F: FnMut(&mut S, &T) -> Result<()>,
    {
        stream.write_label(encoding)?;
        self.save_with(stream, save_elem)?;
        stream.write_label(encoding)
    }
}

impl<T: Default, G: GrowthPolicy> Vector<T, G> {
    /// Create an empty vector with given capacity.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self::from_buf(RawBuf::with_capacity(cap), 0)
    }

    /// Create a vector of `len` default elements with at least `len` capacity.
    #[inline]
    pub fn with_capacity_and_len(cap: usize, len: usize) -> Self {
        Self::from_buf(RawBuf::with_capacity(cap.max(len)), len)
    }

    /// Create a vector converting elements of any sequence.
    #[inline]
    pub fn from_seq<S>(src: &S) -> Self
    where
        S: Sequence + ?Sized,
        S::Elem: Clone,
        T: From<S::Elem>,
    {
        let mut res = Self::with_capacity(src.len());
        for elem in seq::SeqIter::new(src) {
            // SAFETY: capacity equals source length.
            unsafe { res.push_back_unchecked(T::from(elem.clone())) }
        }
        res
    }

    #[inline]
    fn grow_to(&mut self, cap: usize, keep: bool) {
        log::trace!(
            "vector grows from {} to {} slots, keep={}",
            self.buf.cap(),
            cap,
            keep
        );
        if keep {
            self.buf.realloc(cap, self.len);
        } else {
            self.buf = RawBuf::with_capacity(cap);
            self.len = 0;
        }
    }

    /// Make capacity at least `cap`. When growing without keeping
    /// existing elements, length is reset to zero.
    #[inline]
    pub fn reserve(&mut self, cap: usize, keep: bool) {
        if cap > self.buf.cap() {
            self.grow_to(cap, keep);
        }
    }

    /// Make room for `n` more elements, keeping existing ones.
    #[inline]
    pub fn reserve_extra(&mut self, n: usize) {
        self.reserve(self.len + n, true)
    }

    #[inline]
    pub fn reserve_and_clear(&mut self, cap: usize) {
        self.reserve(cap, false);
        self.len = 0;
    }

    /// Make capacity at least `len` and set length to it.
    /// Element values are unspecified.
    #[inline]
    pub fn reserve_and_resize(&mut self, len: usize) {
        self.reserve(len, false);
        self.len = len;
    }

    /// Set length, growing capacity if needed. Elements beyond the old
    /// length keep whatever value their slot holds.
    #[inline]
    pub fn resize(&mut self, len: usize, keep: bool) {
        self.reserve(len, keep);
        self.len = len;
    }

    #[inline]
    pub fn resize_and_initialize(&mut self, len: usize, value: T) -> &mut Self
    where
        T: Clone,
    {
        self.resize(len, false);
        self.as_mut_slice().fill(value);
        self
    }

    #[inline]
    pub fn resize_and_clear(&mut self, len: usize) -> &mut Self
    where
        T: Zeroable,
    {
        self.resize(len, false);
        self.as_mut_slice().fill_with(T::zeroed);
        self
    }

    /// Grow capacity by growth policy if the buffer is full.
    #[inline]
    pub fn enlarge(&mut self) {
        let cap = self.buf.cap();
        if self.len == cap {
            self.grow_to(G::next_capacity(cap, cap + 1), true);
        }
    }

    /// Reallocate to exactly the current length.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        if self.len < self.buf.cap() {
            log::trace!("vector shrinks from {} to {} slots", self.buf.cap(), self.len);
            self.buf.realloc(self.len, self.len);
        }
    }

    #[inline]
    pub fn push_back(&mut self, value: T) -> &mut Self {
        self.enlarge();
        // SAFETY: enlarge guarantees a free slot.
        unsafe { self.push_back_unchecked(value) }
        self
    }

    /// Append an element built by given function and return reference to it.
    #[inline]
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.enlarge();
        // SAFETY: enlarge guarantees a free slot.
        unsafe {
            self.push_back_unchecked(f());
            let idx = self.len - 1;
            self.get_unchecked_mut(idx)
        }
    }

    /// Remove last element, its slot is reset to default.
    ///
    /// # Safety
    ///
    /// Caller must guarantee the vector is not empty.
    #[inline]
    pub unsafe fn pop_back_unchecked(&mut self) -> T {
        self.len -= 1;
        let idx = self.len;
        std::mem::take(self.get_unchecked_mut(idx))
    }

    /// Remove last element, its slot is reset to default.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer("pop_back"));
        }
        // SAFETY: checked non-empty above.
        Ok(unsafe { self.pop_back_unchecked() })
    }

    /// Append elements of any sequence.
    pub fn append<S>(&mut self, src: &S) -> &mut Self
    where
        S: Sequence + ?Sized,
        S::Elem: Clone,
        T: From<S::Elem>,
    {
        self.reserve_extra(src.len());
        for elem in seq::SeqIter::new(src) {
            // SAFETY: capacity reserved above.
            unsafe { self.push_back_unchecked(T::from(elem.clone())) }
        }
        self
    }

    /// Append elements of a span with a single copy.
    #[inline]
    pub fn append_span(&mut self, src: Span<'_, T>) -> &mut Self
    where
        T: Copy,
    {
        let n = src.len();
        self.reserve_extra(n);
        let start = self.len;
        self.buf.as_slice_mut()[start..start + n].copy_from_slice(src.as_slice());
        self.len += n;
        self
    }

    /// Replace content with elements of any sequence. The buffer is reused
    /// if it is large enough, otherwise a fresh copy is swapped in.
    pub fn assign<S>(&mut self, src: &S) -> &mut Self
    where
        S: Sequence + ?Sized,
        S::Elem: Clone,
        T: From<S::Elem>,
    {
        let n = src.len();
        if n > self.buf.cap() {
            *self = Self::from_seq(src);
        } else {
            self.len = n;
            for (dst, elem) in self.as_mut_slice().iter_mut().zip(seq::SeqIter::new(src)) {
                *dst = T::from(elem.clone());
            }
        }
        self
    }

    /// Collect elements at given indexes without bound check.
    ///
    /// # Safety
    ///
    /// Caller must guarantee every index is within `0..self.len()`.
    pub unsafe fn gather<I>(&self, indexes: &I) -> Self
    where
        I: Sequence + ?Sized,
        I::Elem: IndexElem,
        T: Clone,
    {
        let mut res = Self::with_capacity(indexes.len());
        for idx in seq::SeqIter::new(indexes) {
            res.push_back_unchecked(self.get_unchecked(idx.to_index()).clone());
        }
        res
    }

    /// Collect elements at given indexes.
    pub fn gather_checked<I>(&self, indexes: &I) -> Result<Self>
    where
        I: Sequence + ?Sized,
        I::Elem: IndexElem,
        T: Clone,
    {
        let mut res = Self::with_capacity(indexes.len());
        for idx in seq::SeqIter::new(indexes) {
            let value = self.at(idx.to_index())?.clone();
            // SAFETY: capacity equals number of indexes.
            unsafe { res.push_back_unchecked(value) }
        }
        Ok(res)
    }

    /// Collect elements where mask is nonzero.
    pub fn select<M>(&self, mask: &M) -> Result<Self>
    where
        M: Sequence + ?Sized,
        M::Elem: Zeroable + PartialEq,
        T: Clone,
    {
        if mask.len() != self.len {
            log::warn!(
                "select mask length {} does not match vector length {}",
                mask.len(),
                self.len
            );
            return Err(Error::InvalidArgument(format!(
                "mask length {} != vector length {}",
                mask.len(),
                self.len
            )));
        }
        let mut res = Self::with_capacity(seq::count_nonzero(mask));
        let zero = M::Elem::zeroed();
        for (elem, flag) in self.iter().zip(seq::SeqIter::new(mask)) {
            if *flag != zero {
                // SAFETY: capacity equals number of nonzero flags.
                unsafe { res.push_back_unchecked(elem.clone()) }
            }
        }
        Ok(res)
    }

    /// Load elements with a custom per-element reader.
    ///
    /// Capacity grows to the length prefix before any element is read, so
    /// a single load allocates at most `u32::MAX` slots. On error the
    /// vector is left empty.
    pub fn load_with<S, F>(&mut self, stream: &mut S, mut load_elem: F) -> Result<()>
    where
        S: Stream,
        F: FnMut(&mut S, &mut T) -> Result<()>,
    {
        let len = stream.read_len()?;
        self.resize(len, false);
        let res = self
            .as_mut_slice()
            .iter_mut()
            .try_for_each(|elem| load_elem(stream, elem));
        self.empty_on_err(res)
    }

    #[inline]
    fn empty_on_err<R>(&mut self, res: Result<R>) -> Result<R> {
        if res.is_err() {
            self.len = 0;
        }
        res
    }

    /// Load content surrounded by labels with a custom per-element reader.
    ///
    /// Returns true if either label does not match encoding, or the
    /// reader reports a mismatch for any element.
    pub fn load_labeled_with<S, F>(&mut self, stream: &mut S, encoding: u64, mut load_elem: F) -> Result<bool>
    where
        S: Stream,
        F: FnMut(&mut S, &mut T) -> Result<bool>,
    {
        if stream.read_label(encoding)? {
            return Ok(true);
        }
        let len = stream.read_len()?;
        self.resize(len, false);
        let res = self.as_mut_slice().iter_mut().try_fold(false, |mismatch, elem| {
            if mismatch {
                return Ok(true);
            }
            load_elem(stream, elem)
        });
        if self.empty_on_err(res)? {
            return Ok(true);
        }
        stream.read_label(encoding)
    }
}

impl<T: Pod + Default, G: GrowthPolicy> Vector<T, G> {
    /// Save as `u32` length followed by raw element bytes.
    #[inline]
    pub fn save<S: Stream>(&self, stream: &mut S) -> Result<()> {
        stream.write_len(self.len)?;
        stream.write_slice(self.as_slice())
    }

    /// Load records written by [`Vector::save`]. Allocates at most
    /// `u32::MAX` slots, and leaves the vector empty on error.
    #[inline]
    pub fn load<S: Stream>(&mut self, stream: &mut S) -> Result<()> {
        let len = stream.read_len()?;
        self.resize(len, false);
        let res = stream.read_slice(self.as_mut_slice());
        self.empty_on_err(res)
    }

    #[inline]
    pub fn save_labeled<S: Stream>(&self, stream: &mut S, encoding: u64) -> Result<()> {
        stream.write_label(encoding)?;
        self.save(stream)?;
        stream.write_label(encoding)
    }

    /// Returns true if either label does not match encoding.
    #[inline]
    pub fn load_labeled<S: Stream>(&mut self, stream: &mut S, encoding: u64) -> Result<bool> {
        if stream.read_label(encoding)? {
            return Ok(true);
        }
        self.load(stream)?;
        stream.read_label(encoding)
    }
}

impl<T, G: GrowthPolicy> Default for Vector<T, G> {
    #[inline]
    fn default() -> Self {
        Vector::new()
    }
}

impl<T: Clone, G: GrowthPolicy> Clone for Vector<T, G> {
    /// Deep copy with capacity equal to length.
    #[inline]
    fn clone(&self) -> Self {
        Self::from(self.as_slice())
    }
}

impl<T: Clone, G: GrowthPolicy> From<&[T]> for Vector<T, G> {
    #[inline]
    fn from(src: &[T]) -> Self {
        match src.first() {
            Some(first) => {
                let mut buf = RawBuf::filled(src.len(), first);
                buf.as_slice_mut().clone_from_slice(src);
                Self::from_buf(buf, src.len())
            }
            None => Vector::new(),
        }
    }
}

impl<T: Default, G: GrowthPolicy> From<Vec<T>> for Vector<T, G> {
    #[inline]
    fn from(src: Vec<T>) -> Self {
        let mut res = Self::with_capacity(src.len());
        for value in src {
            // SAFETY: capacity equals source length.
            unsafe { res.push_back_unchecked(value) }
        }
        res
    }
}

impl<T: Default, G: GrowthPolicy> FromIterator<T> for Vector<T, G> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut res = Vector::new();
        res.extend(iter);
        res
    }
}

impl<T: Default, G: GrowthPolicy> Extend<T> for Vector<T, G> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_extra(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, G: GrowthPolicy> IntoIterator for &'a Vector<T, G> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, G: GrowthPolicy> IntoIterator for &'a mut Vector<T, G> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, G: GrowthPolicy> Index<usize> for Vector<T, G> {
    type Output = T;
    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.as_slice()[idx]
    }
}

impl<T, G: GrowthPolicy> IndexMut<usize> for Vector<T, G> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.as_mut_slice()[idx]
    }
}

impl<T, G: GrowthPolicy> Sequence for Vector<T, G> {
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

impl<T, G: GrowthPolicy> SequenceMut for Vector<T, G> {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.get_unchecked_mut(idx)
    }
}

impl<T, U, G1, G2> PartialEq<Vector<U, G2>> for Vector<T, G1>
where
    T: PartialEq<U>,
    G1: GrowthPolicy,
    G2: GrowthPolicy,
{
    #[inline]
    fn eq(&self, other: &Vector<U, G2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, G: GrowthPolicy, const N: usize> PartialEq<[U; N]> for Vector<T, G> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T: PartialEq<U>, U, G: GrowthPolicy, const N: usize> PartialEq<Vector<U, G>> for [T; N] {
    #[inline]
    fn eq(&self, other: &Vector<U, G>) -> bool {
        &self[..] == other.as_slice()
    }
}

impl<T: fmt::Debug, G: GrowthPolicy> fmt::Debug for Vector<T, G> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: ElemFormat, G: GrowthPolicy> fmt::Display for Vector<T, G> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_seq(self, f)
    }
}
