//! Elementwise operations shared by every sequence type.
//!
//! Each in-place operator comes in three right-hand shapes:
//!
//! - `*_scalar`: broadcast a single value to all elements.
//! - `*_seq`: combine with another sequence of the same length,
//!   including literal arrays. Fails with size mismatch and leaves
//!   the receiver untouched.
//! - `*_with`: combine with values generated from the element index.
//!
//! An operator only exists for element types that implement the
//! matching compound assignment trait, e.g. `add_*` requires `AddAssign`.
use crate::seq::{Sequence, SequenceMut};
use mzlib_common::error::{Error, Result};
use mzlib_common::fmt::{format_sequence_to, ElemFormat, FormatSpec};
use std::ops::{
    AddAssign, BitAndAssign, BitOrAssign, BitXorAssign, DivAssign, MulAssign, SubAssign,
};

macro_rules! elementwise_op {
    ($scalar:ident, $seq:ident, $with:ident, $trait:ident, $op:tt, $name:literal) => {
        #[inline]
        fn $scalar<U: Clone>(&mut self, value: U) -> &mut Self
        where
            Self::Elem: $trait<U>,
        {
            for i in 0..self.len() {
                // SAFETY: i < len.
                unsafe { *self.elem_unchecked_mut(i) $op value.clone() }
            }
            self
        }

        #[inline]
        fn $seq<R>(&mut self, rhs: &R) -> Result<&mut Self>
        where
            R: Sequence + ?Sized,
            R::Elem: Clone,
            Self::Elem: $trait<R::Elem>,
        {
            Error::check_size($name, self.len(), rhs.len())?;
            for i in 0..self.len() {
                // SAFETY: i < len, and both lengths are equal.
                unsafe { *self.elem_unchecked_mut(i) $op rhs.elem_unchecked(i).clone() }
            }
            Ok(self)
        }

        #[inline]
        fn $with<U, F>(&mut self, mut f: F) -> &mut Self
        where
            F: FnMut(usize) -> U,
            Self::Elem: $trait<U>,
        {
            for i in 0..self.len() {
                let value = f(i);
                // SAFETY: i < len.
                unsafe { *self.elem_unchecked_mut(i) $op value }
            }
            self
        }
    };
}

/// In-place operators of mutable sequences.
pub trait ElementwiseOps: SequenceMut {
    elementwise_op!(and_scalar, and_seq, and_with, BitAndAssign, &=, "bitwise and");
    elementwise_op!(or_scalar, or_seq, or_with, BitOrAssign, |=, "bitwise or");
    elementwise_op!(xor_scalar, xor_seq, xor_with, BitXorAssign, ^=, "bitwise xor");
    elementwise_op!(add_scalar, add_seq, add_with, AddAssign, +=, "addition");
    elementwise_op!(sub_scalar, sub_seq, sub_with, SubAssign, -=, "subtraction");
    elementwise_op!(mul_scalar, mul_seq, mul_with, MulAssign, *=, "multiplication");
    elementwise_op!(div_scalar, div_seq, div_with, DivAssign, /=, "division");

    /// Apply a binary function to each pair of elements.
    #[inline]
    fn apply_seq<R, F>(&mut self, rhs: &R, mut f: F) -> Result<&mut Self>
    where
        R: Sequence + ?Sized,
        F: FnMut(&mut Self::Elem, &R::Elem),
    {
        Error::check_size("apply", self.len(), rhs.len())?;
        for i in 0..self.len() {
            // SAFETY: i < len, and both lengths are equal.
            unsafe { f(self.elem_unchecked_mut(i), rhs.elem_unchecked(i)) }
        }
        Ok(self)
    }

    /// Set all elements to given value.
    #[inline]
    fn fill(&mut self, value: Self::Elem) -> &mut Self
    where
        Self::Elem: Clone,
    {
        for i in 0..self.len() {
            // SAFETY: i < len.
            unsafe { *self.elem_unchecked_mut(i) = value.clone() }
        }
        self
    }

    /// Assign elements of another sequence of the same length.
    #[inline]
    fn assign_seq<R>(&mut self, rhs: &R) -> Result<&mut Self>
    where
        R: Sequence + ?Sized,
        R::Elem: Clone,
        Self::Elem: From<R::Elem>,
    {
        Error::check_size("assignment", self.len(), rhs.len())?;
        for i in 0..self.len() {
            // SAFETY: i < len, and both lengths are equal.
            unsafe { *self.elem_unchecked_mut(i) = Self::Elem::from(rhs.elem_unchecked(i).clone()) }
        }
        Ok(self)
    }

    /// Exchange elements with another sequence of the same length.
    #[inline]
    fn swap_elements<R>(&mut self, other: &mut R) -> Result<()>
    where
        R: SequenceMut<Elem = Self::Elem> + ?Sized,
    {
        Error::check_size("swap", self.len(), other.len())?;
        for i in 0..self.len() {
            // SAFETY: i < len, and the two sequences are distinct mutable borrows.
            unsafe { std::mem::swap(self.elem_unchecked_mut(i), other.elem_unchecked_mut(i)) }
        }
        Ok(())
    }
}

impl<S: SequenceMut + ?Sized> ElementwiseOps for S {}

/// Read-only operations of sequences: string conversion.
pub trait ElementwiseConstOps: Sequence {
    /// Append formatted elements to buffer.
    #[inline]
    fn format_to(&self, buf: &mut String, spec: &FormatSpec, sep: &str, enc: &str)
    where
        Self::Elem: ElemFormat,
    {
        format_sequence_to(buf, self.len(), sep, enc, |i, buf| {
            // SAFETY: format_sequence_to only passes i < len.
            let elem = unsafe { self.elem_unchecked(i) };
            elem.format_elem(spec, buf)
        })
    }

    #[inline]
    fn string(&self, spec: &FormatSpec, sep: &str, enc: &str) -> String
    where
        Self::Elem: ElemFormat,
    {
        let mut buf = String::new();
        self.format_to(&mut buf, spec, sep, enc);
        buf
    }

    /// Format with a format spec string such as `{:.2}`.
    #[inline]
    fn string_with(&self, spec: &str, sep: &str, enc: &str) -> Result<String>
    where
        Self::Elem: ElemFormat,
    {
        let spec = FormatSpec::parse(spec)?;
        Ok(self.string(&spec, sep, enc))
    }

    /// Format as `[e0,e1,...]`.
    #[inline]
    fn to_default_string(&self) -> String
    where
        Self::Elem: ElemFormat,
    {
        self.string(&FormatSpec::default(), ",", "[]")
    }
}

impl<S: Sequence + ?Sized> ElementwiseConstOps for S {}

/// Shared `Display` body of containers and views.
#[inline]
pub(crate) fn display_seq<S>(seq: &S, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
where
    S: Sequence + ?Sized,
    S::Elem: ElemFormat,
{
    let spec = FormatSpec::from_formatter(f);
    let mut buf = String::new();
    seq.format_to(&mut buf, &spec, ",", "[]");
    f.write_str(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mzlib_common::error::ErrorKind;

    #[test]
    fn test_scalar_ops() {
        let mut v = vec![1, 2, 3];
        v.add_scalar(1).mul_scalar(2);
        assert_eq!(vec![4, 6, 8], v);
        v.sub_scalar(2).div_scalar(2);
        assert_eq!(vec![1, 2, 3], v);
        v.and_scalar(1).or_scalar(4).xor_scalar(1);
        assert_eq!(vec![4, 5, 4], v);
        let mut f = [1.0f64, 2.0];
        f.mul_scalar(0.5);
        assert_eq!([0.5, 1.0], f);
    }

    #[test]
    fn test_seq_ops() {
        let mut v = vec![1, 2, 3];
        v.add_seq(&[10, 20, 30]).unwrap();
        assert_eq!(vec![11, 22, 33], v);
        v.sub_seq(&vec![1, 2, 3]).unwrap().div_seq(&[10, 10, 10]).unwrap();
        assert_eq!(vec![1, 2, 3], v);
        let rhs: &[i32] = &[2, 2, 2];
        v.mul_seq(rhs).unwrap();
        assert_eq!(vec![2, 4, 6], v);
        let mut b = [true, false, true];
        b.and_seq(&[true, true, false]).unwrap();
        assert_eq!([true, false, false], b);
    }

    #[test]
    fn test_seq_size_mismatch() {
        let mut v = vec![1];
        let err = v.add_seq(&[1, 2]).unwrap_err();
        assert_eq!(ErrorKind::Domain, err.kind());
        assert_eq!(vec![1], v);
        let mut e: Vec<i32> = vec![];
        assert!(e.or_seq(&[1]).is_err());
        assert!(e.is_empty());
        assert!(e.add_seq(&[] as &[i32]).is_ok());
    }

    #[test]
    fn test_with_ops() {
        let mut v = vec![0usize; 4];
        v.add_with(|i| i * i);
        assert_eq!(vec![0, 1, 4, 9], v);
        v.sub_with(|i| i);
        assert_eq!(vec![0, 0, 2, 6], v);
        let mut f = vec![1.0f32; 3];
        f.mul_with(|i| i as f32).div_with(|_| 2.0f32);
        assert_eq!(vec![0.0, 0.5, 1.0], f);
    }

    #[test]
    fn test_apply_fill_assign_swap() {
        let mut v = vec![1, 2, 3];
        v.apply_seq(&[3, 2, 1], |l, r| *l = *l * 10 + *r).unwrap();
        assert_eq!(vec![13, 22, 31], v);
        assert!(v.apply_seq(&[1], |_, _| ()).is_err());
        v.fill(7);
        assert_eq!(vec![7, 7, 7], v);
        let mut w = vec![0i64; 3];
        w.assign_seq(&[1i32, 2, 3]).unwrap();
        assert_eq!(vec![1i64, 2, 3], w);
        assert!(w.assign_seq(&[1i32]).is_err());
        let mut a = [1, 2];
        let mut b = vec![3, 4];
        a.swap_elements(&mut b).unwrap();
        assert_eq!([3, 4], a);
        assert_eq!(vec![1, 2], b);
        assert!(a.swap_elements(&mut vec![0]).is_err());
    }

    #[test]
    fn test_string() {
        let v = vec![1.0f64, 2.5, -3.0];
        assert_eq!("[1,2.5,-3]", v.to_default_string());
        let spec = FormatSpec::parse("{:.1}").unwrap();
        assert_eq!("(1.0; 2.5; -3.0)", v.string(&spec, "; ", "()"));
        assert_eq!("1.00 2.50 -3.00", v.string_with("{:.2}", " ", "").unwrap());
        assert!(v.string_with("{:q}", ",", "[]").is_err());
        let empty: [u8; 0] = [];
        assert_eq!("[]", empty.to_default_string());
    }

    struct Point(i32, i32);

    impl ElemFormat for Point {
        fn format_elem(&self, spec: &FormatSpec, buf: &mut String) {
            buf.push('<');
            self.0.format_elem(spec, buf);
            buf.push(' ');
            self.1.format_elem(spec, buf);
            buf.push('>');
        }
    }

    #[test]
    fn test_custom_elem_format() {
        let pts = [Point(1, 2), Point(3, 4)];
        assert_eq!("[<1 2>,<3 4>]", pts.to_default_string());
        let spec = FormatSpec::parse("{:02}").unwrap();
        assert_eq!("<01 02>|<03 04>", pts.string(&spec, "|", ""));
    }
}
