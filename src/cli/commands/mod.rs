//! Command implementations

pub mod anchor;
pub mod render;
