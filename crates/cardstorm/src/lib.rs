//! Top-level facade crate for cardstorm.
//!
//! Re-exports the core store and the server library so users can depend on a single crate.

pub mod core {
    pub use cardstorm_core::*;
}

pub mod server {
    pub use cardstorm_server::*;
}
