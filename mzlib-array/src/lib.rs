//! Containers and views of mzlib.
//!
//! [`Vector`] owns its elements. [`Span`] and [`Slice`] borrow contiguous
//! and strided elements from any owner. All of them implement
//! [`Sequence`], so elementwise operations and assignments work across
//! container types, e.g. adding a span to a vector or assigning a vector
//! to a column slice.
pub mod algorithm;
pub mod elementwise;
pub mod seq;
pub mod slice;
pub mod span;
pub mod stack;
pub mod vector;
pub mod xa;

pub use crate::elementwise::{ElementwiseConstOps, ElementwiseOps};
pub use crate::seq::{Sequence, SequenceMut};
pub use crate::slice::{Slice, SliceMut};
pub use crate::span::{Span, SpanMut};
pub use crate::stack::Stack;
pub use crate::vector::Vector;
pub use crate::xa::XA;
pub use mzlib_common::error::{Error, ErrorKind, Result};
