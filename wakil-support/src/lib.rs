//! # Wakil Support
//!
//! Shared helpers for the Wakil DI crates.
//!
//! This crate provides:
//! - Text rendering for diagnostics (dependency chains, name lists)
//! - Type-name shortening used to name callable instances
//! - "Did you mean?" suggestions for unknown provider names

pub mod rendering;
