//! Gridsnap Core
//!
//! This crate contains the shared primitives for gridsnap: geometry types,
//! math re-exports, collection aliases, logging and profiling setup.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
