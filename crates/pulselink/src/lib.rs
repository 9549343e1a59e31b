//! Top-level facade crate for PulseLink.
//!
//! Re-exports the codec core and the relay surface so users can depend on a
//! single crate.

pub mod core {
    pub use pulselink_core::*;
}

pub mod relay {
    pub use pulselink_relay::*;
}
