//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every other crate agrees on:
//! - The unified error type ([`error::app_error::AppError`]) and its classification
//! - Typed identifiers for persisted entities ([`id::Id`])
//!
//! Nothing here knows about leaderboards, storage or HTTP routing.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
