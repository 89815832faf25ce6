//! cardstorm core: label derivation, the in-process series store, the
//! generation loop and the Prometheus text encoder.
//!
//! This crate carries no transport or runtime dependencies; the HTTP surface
//! lives in `cardstorm-server`.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `CardstormError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod generator;
pub mod labels;
pub mod registry;

/// Shared result type.
pub use error::{CardstormError, Result};
pub use registry::SeriesStore;
