use std::marker::PhantomData;
use std::mem::{align_of, size_of};

pub use bytemuck::{Pod, Zeroable};

struct SameLayout<T, U>(PhantomData<(T, U)>);

impl<T, U> SameLayout<T, U> {
    const OK: () = assert!(
        size_of::<T>() == size_of::<U>() && align_of::<T>() == align_of::<U>(),
        "reinterpretation requires identical size and alignment"
    );
}

/// Evaluated at monomorphization, so a mismatched pair of types
/// is rejected at build time instead of at runtime.
#[inline(always)]
pub const fn assert_same_layout<T, U>() {
    #[allow(clippy::let_unit_value)]
    let () = SameLayout::<T, U>::OK;
}

/// Reinterpret a slice of T as a slice of U sharing the same memory.
#[inline]
pub fn reinterpret<T: Pod, U: Pod>(src: &[T]) -> &[U] {
    assert_same_layout::<T, U>();
    bytemuck::cast_slice(src)
}

/// Reinterpret a mutable slice of T as a mutable slice of U sharing the same memory.
#[inline]
pub fn reinterpret_mut<T: Pod, U: Pod>(src: &mut [T]) -> &mut [U] {
    assert_same_layout::<T, U>();
    bytemuck::cast_slice_mut(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinterpret_round_trip() {
        let src = vec![1.5f32, -2.0, 0.0, f32::MAX];
        let bits: &[u32] = reinterpret(&src);
        assert_eq!(1.5f32.to_bits(), bits[0]);
        let back: &[f32] = reinterpret(bits);
        assert_eq!(&src[..], back);
    }

    #[test]
    fn test_reinterpret_mut() {
        let mut src = vec![-1i32, 2, -3];
        {
            let u: &mut [u32] = reinterpret_mut(&mut src);
            assert_eq!(u32::MAX, u[0]);
            u[1] = 7;
        }
        assert_eq!(vec![-1, 7, -3], src);
    }

    #[test]
    fn test_reinterpret_empty() {
        let src: Vec<u64> = Vec::new();
        let dst: &[f64] = reinterpret(&src);
        assert!(dst.is_empty());
        let mut src: Vec<i16> = Vec::new();
        let dst: &mut [u16] = reinterpret_mut(&mut src);
        assert!(dst.is_empty());
    }
}
