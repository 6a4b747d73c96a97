//! # Domain Models
//!
//! This crate contains pure domain types with a single dependency (`serde`).
//! Keep it lean: data and simple helpers only, no I/O.

pub mod config;
pub mod constants;
pub mod pagination;
pub mod registry;
