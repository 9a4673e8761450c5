//! Top-level facade crate for loancalc.
//!
//! Re-exports the core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use loancalc_core::*;
}

pub mod gateway {
    pub use loancalc_gateway::*;
}
