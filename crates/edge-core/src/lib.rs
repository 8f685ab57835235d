//! Core primitives for the edge revalidation platform.
//!
//! This crate provides:
//! - `RevalidateConfig` - Implicit tag prefix and soft tag length limits
//! - `is_dynamic_route` - Detects bracket-delimited dynamic route segments

mod config;
mod route;

pub use config::*;
pub use route::*;
