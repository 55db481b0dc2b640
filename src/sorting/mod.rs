//! Sortable table columns: header anchors and row ordering

pub mod anchor;
pub mod autosort;
pub mod collection;
pub mod sqlite;

pub use anchor::SortAnchor;
pub use autosort::{AutoSort, CollectionSorter};
pub use collection::{compare_values, sort_by_attribute, OrderField, SortableCollection};
pub use sqlite::SqliteCollection;
