//! On-disk cache for the last good record of each panel
//!
//! Keeps the mirror from starting blank: panels render the previous run's
//! data immediately while the first fetches are in flight.

pub mod store;

pub use store::{CacheStore, Cached};
