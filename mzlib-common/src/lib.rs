//! Common module of mzlib.
//!
//! Contains the building blocks shared by all containers:
//! aligned slot buffers, growth policies, layout checks for
//! reinterpretation casts, element formatting by format spec and
//! the byte stream used for binary serialization.
pub mod alloc;
pub mod error;
pub mod fmt;
pub mod growth;
pub mod layout;
pub mod stream;
