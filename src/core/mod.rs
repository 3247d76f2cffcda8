//! The dashboard engine: classification, filtering, sorting, pagination,
//! change highlighting and summary aggregation.
//!
//! Everything in here is synchronous and deterministic; the async edges
//! (telemetry, rendering) live in [`crate::telemetry`] and the binary.

pub mod classify;
pub mod filter;
pub mod highlight;
pub mod page;
pub mod sort;
pub mod summary;
