//! Sortable table columns for Tera templates
//!
//! Renders column-header links that toggle the sort direction while keeping
//! the rest of the query string, and reorders table rows by the field named
//! in the current request.

pub mod cli;
pub mod core;
pub mod sorting;
pub mod template;

pub use crate::core::{QueryParams, SortDirection, SortRequest, SortingConfig, SortingError};
pub use crate::sorting::{CollectionSorter, SortAnchor, SortableCollection, SqliteCollection};
pub use crate::template::SortingTemplates;
