//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chrome shared by route pages: the protected layout
//! and its navigation bar.

pub mod nav_bar;
pub mod protected_layout;
