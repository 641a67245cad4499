//! Collection types used across gridsnap.
//!
//! Re-exports the AHash-backed hash collections so dependent crates do not
//! pick their own hasher.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
