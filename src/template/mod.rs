//! Tera integration for sorting directives

pub mod directive;
pub mod engine;

pub use directive::{extract, split_contents, Directives, ANCHORS_VAR};
pub use engine::SortingTemplates;
