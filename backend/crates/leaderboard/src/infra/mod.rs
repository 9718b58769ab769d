//! Infrastructure Layer
//!
//! Repository implementations.

pub mod blob;
