//! Sorting configuration
//!
//! Settings are read once at startup (YAML file, then environment overrides)
//! and handed to the anchor renderer and the collection sorter explicitly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, SortingError};

/// Default icon for a column sorted ascending
pub const DEFAULT_SORT_UP: &str = "&uarr;";

/// Default icon for a column sorted descending or with no direction
pub const DEFAULT_SORT_DOWN: &str = "&darr;";

/// Options shared by every sortable table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortingConfig {
    /// Icon appended to the active column when sorted ascending
    pub sort_up_icon: String,

    /// Icon appended to the active column when sorted descending or unset
    pub sort_down_icon: String,

    /// Abort with "not found" on a malformed sort field instead of ignoring it
    pub invalid_field_raises_404: bool,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            sort_up_icon: DEFAULT_SORT_UP.to_string(),
            sort_down_icon: DEFAULT_SORT_DOWN.to_string(),
            invalid_field_raises_404: false,
        }
    }
}

impl SortingConfig {
    /// Parse configuration from YAML; absent keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content).map_err(|e| SortingError::Config(e.to_string()))
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SortingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    /// Apply `SORTING_*` environment overrides
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(icon) = lookup("SORTING_SORT_UP_ICON") {
            self.sort_up_icon = icon;
        }
        if let Some(icon) = lookup("SORTING_SORT_DOWN_ICON") {
            self.sort_down_icon = icon;
        }
        if let Some(flag) = lookup("SORTING_INVALID_FIELD_RAISES_404") {
            self.invalid_field_raises_404 = parse_flag(&flag).ok_or_else(|| {
                SortingError::Config(format!(
                    "SORTING_INVALID_FIELD_RAISES_404 must be a boolean, got '{}'",
                    flag
                ))
            })?;
        }
        Ok(self)
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.invalid_field_raises_404 = strict;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
