//! Core components of the `openinsider-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`OiClient`] and its builder.
//! - The primary [`OiError`] type.
//! - The per-page retry policy and its backoff combinator.

/// The main client (`OiClient`), builder, and retry configuration.
pub mod client;
/// The primary error type (`OiError`) for the crate.
pub mod error;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::OiClient`
pub use client::{OiClient, OiClientBuilder, RetryClass, RetryConfig};
pub use error::OiError;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
