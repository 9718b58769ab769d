//! Entity Module

pub mod submission;
pub mod user;
