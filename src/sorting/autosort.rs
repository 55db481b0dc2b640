//! Request-driven reordering of table rows

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{Result, SortingConfig, SortingError};
use crate::sorting::collection::{sort_by_attribute, OrderField, SortableCollection};

const DIRECTIVE: &str = "autosort";

/// `{% autosort rows %}`: sort the context variable `rows` before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSort {
    binding: String,
}

impl AutoSort {
    pub fn new(binding: impl Into<String>) -> Self {
        Self {
            binding: binding.into(),
        }
    }

    /// Build from directive arguments; exactly one is required
    pub fn from_directive_args(args: &[String]) -> Result<Self> {
        match args {
            [binding] if !binding.is_empty() => Ok(Self::new(binding.as_str())),
            _ => Err(SortingError::syntax(DIRECTIVE, "takes exactly one argument")),
        }
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }
}

/// Orders collections by the field named in the current request
#[derive(Debug, Clone, Default)]
pub struct CollectionSorter {
    config: SortingConfig,
}

impl CollectionSorter {
    pub fn new(config: SortingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SortingConfig {
        &self.config
    }

    /// Records of `collection` ordered by `requested` (`field` or `-field`)
    ///
    /// Empty or single-character requests leave the order untouched, as do
    /// malformed fields unless strict mode turns them into
    /// [`SortingError::NotFound`].
    pub fn sort(
        &self,
        collection: &(impl SortableCollection + ?Sized),
        requested: &str,
    ) -> Result<Vec<Value>> {
        if requested.chars().count() <= 1 {
            debug!(field = requested, "sort field too short, keeping original order");
            return collection.records();
        }

        let field = match OrderField::parse(requested) {
            Ok(field) => field,
            Err(invalid) => {
                if self.config.invalid_field_raises_404 {
                    warn!(field = requested, "rejecting invalid sort field");
                    return Err(SortingError::NotFound(requested.to_string()));
                }
                debug!(%invalid, "ignoring invalid sort field");
                return collection.records();
            }
        };

        if collection.supports_ordering(&field) {
            return collection.order_by(&field);
        }

        debug!(
            field = %field.name(),
            descending = field.is_descending(),
            "field not natively orderable, sorting by attribute"
        );
        sort_by_attribute(collection.records()?, &field)
    }

    /// Sort the list bound at `key` in `context` and rebind it
    pub fn sort_binding(
        &self,
        context: &mut tera::Context,
        key: &str,
        requested: &str,
    ) -> Result<()> {
        let records = match context.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(SortingError::MissingBinding(key.to_string())),
        };
        let sorted = self.sort(&records, requested)?;
        context.insert(key, &sorted);
        Ok(())
    }

    /// Sort `collection` and bind the result at `key` in `context`
    pub fn sort_binding_with(
        &self,
        context: &mut tera::Context,
        key: &str,
        collection: &(impl SortableCollection + ?Sized),
        requested: &str,
    ) -> Result<()> {
        let sorted = self.sort(collection, requested)?;
        context.insert(key, &sorted);
        Ok(())
    }
}
