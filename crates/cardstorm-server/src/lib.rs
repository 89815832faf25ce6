//! cardstorm server library entry.
//!
//! Wires config, shared state and the HTTP routes around the core store. It
//! is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
