use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem::{align_of, size_of};
use std::ptr::{self, NonNull};

/// Used internally to make sure all slot buffers
/// are aligned to at least 16 bytes.
pub const ALIGNMENT: usize = 16;

#[inline]
fn slot_layout<T>(cap: usize) -> Layout {
    let align = usize::max(ALIGNMENT, align_of::<T>());
    match size_of::<T>()
        .checked_mul(cap)
        .and_then(|size| Layout::from_size_align(size, align).ok())
    {
        Some(layout) => layout,
        None => panic!("capacity overflow: {} slots", cap),
    }
}

/// This method allocates `cap` slots with alignment of at least 16 bytes
/// and initializes every slot with the given function.
///
/// The memory is leaked, and raw pointer is returned.
/// Caller should always call free_slots to release the memory.
#[inline]
pub(crate) fn alloc_slots<T>(cap: usize, mut init: impl FnMut() -> T) -> NonNull<T> {
    if cap == 0 {
        return NonNull::dangling();
    }
    let layout = slot_layout::<T>(cap);
    let ptr = if layout.size() == 0 {
        NonNull::dangling()
    } else {
        // SAFETY:
        //
        // Layout size is non-zero.
        let raw = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        }
    };
    for i in 0..cap {
        // SAFETY:
        //
        // i is within the allocated capacity and the slot is not initialized yet.
        unsafe { ptr.as_ptr().add(i).write(init()) }
    }
    ptr
}

/// Release memory allocated by [`alloc_slots`], dropping every slot.
///
/// # Safety
///
/// Caller must guarantee the input pointer and capacity are identical to
/// the ones used with `alloc_slots`, and only call this method
/// once. After this call, the memory must not be used.
#[inline]
pub(crate) unsafe fn free_slots<T>(ptr: NonNull<T>, cap: usize) {
    if cap == 0 {
        return;
    }
    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), cap));
    let layout = slot_layout::<T>(cap);
    if layout.size() != 0 {
        dealloc(ptr.as_ptr() as *mut u8, layout);
    }
}

/// RawBuf is a safe abstraction of an aligned array of slots.
///
/// Every slot is always initialized, so the buffer can be viewed as
/// a slice of its whole capacity. Slots beyond the logical length of
/// an owning container hold either default values or stale values
/// left behind by previous operations.
///
/// RawBuf never reallocates by itself. Growing is done explicitly via
/// [`RawBuf::realloc`], which moves a prefix into a fresh buffer.
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> Drop for RawBuf<T> {
    #[inline]
    fn drop(&mut self) {
        // # SAFETY
        //
        // The pointer and capacity are guaranteed to be always valid.
        unsafe { free_slots(self.ptr, self.cap) }
    }
}

impl<T> RawBuf<T> {
    /// Create an empty buffer without allocation.
    #[inline]
    pub const fn empty() -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Create a new buffer with given capacity.
    /// All slots are initialized with default value.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self
    where
        T: Default,
    {
        let ptr = alloc_slots(cap, T::default);
        RawBuf {
            ptr,
            cap,
            _marker: PhantomData,
        }
    }

    /// Create a new buffer with given capacity, all slots cloned from given value.
    #[inline]
    pub fn filled(cap: usize, value: &T) -> Self
    where
        T: Clone,
    {
        let ptr = alloc_slots(cap, || value.clone());
        RawBuf {
            ptr,
            cap,
            _marker: PhantomData,
        }
    }

    /// Returns slot capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns whether any memory is held.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.cap != 0
    }

    /// Returns pointer to the first slot, or null if nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        if self.cap == 0 {
            ptr::null()
        } else {
            self.ptr.as_ptr()
        }
    }

    /// Returns mutable pointer to the first slot, or null if nothing is allocated.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.cap == 0 {
            ptr::null_mut()
        } else {
            self.ptr.as_ptr()
        }
    }

    /// Returns immutable slice of all slots.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // # SAFETY
        //
        // RawBuf is not allowed to realloc in place and all slots
        // are initialized, so capacity is always valid.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    /// Returns mutable slice of all slots.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        // # SAFETY
        //
        // RawBuf is not allowed to realloc in place and all slots
        // are initialized, so capacity is always valid.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }

    /// Replace this buffer with a new one of `new_cap` slots, moving the
    /// first `keep` slots over. Slots that are not kept are dropped.
    #[inline]
    pub fn realloc(&mut self, new_cap: usize, keep: usize)
    where
        T: Default,
    {
        let keep = keep.min(self.cap).min(new_cap);
        let mut new_buf = RawBuf::with_capacity(new_cap);
        new_buf.as_slice_mut()[..keep].swap_with_slice(&mut self.as_slice_mut()[..keep]);
        std::mem::swap(self, &mut new_buf);
    }

    /// Release memory and become empty.
    #[inline]
    pub fn release(&mut self) {
        *self = RawBuf::empty();
    }
}

impl<T> Default for RawBuf<T> {
    #[inline]
    fn default() -> Self {
        RawBuf::empty()
    }
}

impl<T> fmt::Debug for RawBuf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("ptr", &self.as_ptr())
            .field("cap", &self.cap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_alloc_slots() {
        let ptr = alloc_slots::<u8>(1, || 7);
        assert_eq!(0, ptr.as_ptr() as usize % ALIGNMENT);
        unsafe {
            assert_eq!(7, *ptr.as_ptr());
            free_slots(ptr, 1)
        }

        let ptr = alloc_slots::<u64>(16, u64::default);
        assert_eq!(0, ptr.as_ptr() as usize % ALIGNMENT);
        unsafe { free_slots(ptr, 16) }
    }

    #[test]
    fn test_raw_buf() {
        let mut buf = RawBuf::<i64>::with_capacity(4);
        assert_eq!(4, buf.cap());
        assert!(buf.is_allocated());
        assert_eq!(&[0, 0, 0, 0], buf.as_slice());
        for (i, v) in buf.as_slice_mut().iter_mut().enumerate() {
            *v = i as i64;
        }
        assert_eq!(&[0, 1, 2, 3], buf.as_slice());
        buf.realloc(8, 3);
        assert_eq!(8, buf.cap());
        assert_eq!(&[0, 1, 2, 0, 0, 0, 0, 0], buf.as_slice());
        buf.release();
        assert!(buf.as_ptr().is_null());
        assert!(buf.as_slice().is_empty());
    }

    #[test]
    fn test_raw_buf_empty() {
        let buf = RawBuf::<String>::empty();
        assert_eq!(0, buf.cap());
        assert!(!buf.is_allocated());
        assert!(buf.as_ptr().is_null());
        let buf = RawBuf::<String>::with_capacity(0);
        assert!(buf.as_ptr().is_null());
    }

    #[test]
    fn test_raw_buf_drops_slots() {
        let tracker = Rc::new(());
        {
            let mut buf = RawBuf::filled(5, &Some(Rc::clone(&tracker)));
            assert_eq!(6, Rc::strong_count(&tracker));
            buf.realloc(2, 1);
            assert_eq!(2, Rc::strong_count(&tracker));
        }
        assert_eq!(1, Rc::strong_count(&tracker));
    }

    #[test]
    fn test_raw_buf_zero_sized() {
        let mut buf = RawBuf::<()>::with_capacity(10);
        assert_eq!(10, buf.as_slice().len());
        buf.realloc(20, 10);
        assert_eq!(20, buf.as_slice_mut().len());
    }
}
