//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`access`, `layers`) so individual components
//! can depend on small focused models provided through context.

pub mod access;
pub mod layers;
