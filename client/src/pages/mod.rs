//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! One page per route table view. Pages own their route-scoped data loading
//! and delegate shared chrome to `components`.

pub mod auth;
pub mod history;
pub mod layers;
pub mod uploader;
