//! Stack of borrowed element references.
//!
//! A slot is either a reference or empty. Emptied slots are left in
//! place by [`Stack::pop_at`] and [`Stack::clear`], and [`Stack::pop`]
//! skips them while scanning down from the top.
use mzlib_common::alloc::RawBuf;
use mzlib_common::error::{Error, Result};
use mzlib_common::growth::{DoublePlusTwo, GrowthPolicy};
use std::fmt;
use std::ptr;

pub struct Stack<'a, T> {
    slots: RawBuf<Option<&'a T>>,
    len: usize,
}

#[inline]
fn addr<T>(slot: &Option<&T>) -> *const T {
    slot.map_or(ptr::null(), |r| r as *const T)
}

impl<'a, T> Stack<'a, T> {
    #[inline]
    pub const fn new() -> Self {
        Stack {
            slots: RawBuf::empty(),
            len: 0,
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Stack {
            slots: RawBuf::with_capacity(cap),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.cap()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn occupied(&self) -> &[Option<&'a T>] {
        &self.slots.as_slice()[..self.len]
    }

    #[inline]
    fn occupied_mut(&mut self) -> &mut [Option<&'a T>] {
        let len = self.len;
        &mut self.slots.as_slice_mut()[..len]
    }

    /// Returns reference at given slot, None if out of range or emptied.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&'a T> {
        self.occupied().get(idx).copied().flatten()
    }

    #[inline]
    pub fn swap_elements(&mut self, lidx: usize, ridx: usize) -> Result<()> {
        let len = self.len;
        for index in [lidx, ridx] {
            if index >= len {
                return Err(Error::IndexOutOfBound { index, len });
            }
        }
        self.occupied_mut().swap(lidx, ridx);
        Ok(())
    }

    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        std::mem::swap(self, other)
    }

    /// Empty all slots and set length to zero.
    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        self.occupied_mut().fill(None);
        self.len = 0;
        self
    }

    /// Push reference and return its slot index.
    #[inline]
    pub fn push(&mut self, elem: &'a T) -> usize {
        let cap = self.slots.cap();
        if self.len == cap {
            let new_cap = DoublePlusTwo::next_capacity(cap, cap + 1);
            log::trace!("stack grows from {} to {} slots", cap, new_cap);
            self.slots.realloc(new_cap, self.len);
        }
        let pos = self.len;
        self.slots.as_slice_mut()[pos] = Some(elem);
        self.len += 1;
        pos
    }

    /// Push reference if present. Returns None without pushing otherwise.
    #[inline]
    pub fn push_opt(&mut self, elem: Option<&'a T>) -> Option<usize> {
        elem.map(|e| self.push(e))
    }

    /// # Safety
    ///
    /// Caller must guarantee the stack is not empty.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> Option<&'a T> {
        *self.slots.as_slice().get_unchecked(self.len - 1)
    }

    /// Pop the topmost present reference. Emptied slots on top are
    /// discarded along the way.
    #[inline]
    pub fn pop(&mut self) -> Option<&'a T> {
        while self.len > 0 {
            self.len -= 1;
            let idx = self.len;
            if let Some(elem) = self.slots.as_slice_mut()[idx].take() {
                return Some(elem);
            }
        }
        None
    }

    /// Take reference out of given slot, leaving it empty.
    #[inline]
    pub fn pop_at(&mut self, idx: usize) -> Option<&'a T> {
        self.occupied_mut().get_mut(idx).and_then(Option::take)
    }

    /// Sort slots by address. Empty slots come first.
    #[inline]
    pub fn sort(&mut self) -> &mut Self {
        self.occupied_mut().sort_unstable_by_key(addr);
        self
    }

    /// Remove adjacent slots of the same address, emptying the vacated tail.
    pub fn unique(&mut self) {
        let len = self.len;
        if len <= 1 {
            return;
        }
        let slots = self.occupied_mut();
        let mut kept = 1;
        for i in 1..len {
            if addr(&slots[i]) != addr(&slots[kept - 1]) {
                slots[kept] = slots[i];
                kept += 1;
            }
        }
        slots[kept..].fill(None);
        self.len = kept;
    }

    /// Iterate over slots in push order, including emptied ones.
    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Option<&'a T>>> {
        self.occupied().iter().copied()
    }
}

impl<T> Default for Stack<'_, T> {
    #[inline]
    fn default() -> Self {
        Stack::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
