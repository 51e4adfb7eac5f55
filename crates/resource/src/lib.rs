//! Metrics sources for the quire font pipeline.
//!
//! This crate provides platform-specific implementations of the
//! `MetricsSource` trait from quire-traits.
//!
//! ## Available Sources
//!
//! - [`FilesystemMetricsSource`]: Opens AFM files under a base directory
//!
//! The in-memory source is re-exported from quire-traits for convenience:
//! - [`InMemoryMetricsSource`]

mod filesystem;

pub use filesystem::FilesystemMetricsSource;

pub use quire_traits::InMemoryMetricsSource;
