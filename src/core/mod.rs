//! Core module - configuration, errors and per-request sort state

pub mod config;
pub mod direction;
pub mod error;
pub mod request;

pub use config::SortingConfig;
pub use direction::SortDirection;
pub use error::{Result, SortingError};
pub use request::{QueryParams, SortRequest, DIR_PARAM, SORT_PARAM};
