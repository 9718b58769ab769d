//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Key/value blob storage (file-backed and in-memory)
//! - Injectable wall clock
//! - Cooldown (per-key sliding window) rate limiting

pub mod clock;
pub mod rate_limit;
pub mod storage;
