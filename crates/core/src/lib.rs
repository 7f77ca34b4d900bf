//! Pure domain logic for the media-generation orchestrator.
//!
//! Holds the canonical request model, the closed provider catalogue,
//! per-provider constraint and price tables, image selection, and the
//! task lifecycle state machine. Nothing in this crate performs I/O.

pub mod constraints;
pub mod error;
pub mod images;
pub mod pricing;
pub mod provider;
pub mod task;
pub mod types;
