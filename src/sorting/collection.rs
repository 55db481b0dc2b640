//! Sortable collections and the attribute-based fallback ordering

use serde_json::Value;
use std::cmp::Ordering;

use crate::core::{Result, SortingError};

/// A parsed sort field such as `name`, `-age` or `author.name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderField {
    path: Vec<String>,
    descending: bool,
}

/// Reason a requested field could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField(pub String);

impl std::fmt::Display for InvalidField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid sort field '{}'", self.0)
    }
}

impl OrderField {
    /// Parse `[-]segment(.segment|__segment)*`
    pub fn parse(raw: &str) -> std::result::Result<Self, InvalidField> {
        let invalid = || InvalidField(raw.to_string());
        let (descending, rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let path: Vec<String> = rest
            .replace("__", ".")
            .split('.')
            .map(str::to_string)
            .collect();
        if !path.iter().all(|segment| is_segment(segment)) {
            return Err(invalid());
        }

        Ok(Self { path, descending })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Dotted attribute name without the direction marker
    pub fn name(&self) -> String {
        self.path.join(".")
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Single stored column name, if the field is not nested
    pub fn column(&self) -> Option<&str> {
        match self.path.as_slice() {
            [column] => Some(column.as_str()),
            _ => None,
        }
    }

    /// Read this field off a record
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.path
            .iter()
            .try_fold(record, |value, segment| match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

/// `[A-Za-z0-9_]+`, the shape of one path segment
pub(crate) fn is_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// An ordered collection of records a table can be sorted by
///
/// Implementors that can order natively (a database query, an index) report
/// which fields they support through [`supports_ordering`](Self::supports_ordering);
/// every other field is sorted in memory from [`records`](Self::records).
pub trait SortableCollection {
    /// All records in their current order
    fn records(&self) -> Result<Vec<Value>>;

    /// Whether [`order_by`](Self::order_by) can handle `field`
    fn supports_ordering(&self, _field: &OrderField) -> bool {
        false
    }

    /// Records ordered natively by `field`
    fn order_by(&self, field: &OrderField) -> Result<Vec<Value>> {
        sort_by_attribute(self.records()?, field)
    }
}

impl SortableCollection for [Value] {
    fn records(&self) -> Result<Vec<Value>> {
        Ok(self.to_vec())
    }
}

impl SortableCollection for Vec<Value> {
    fn records(&self) -> Result<Vec<Value>> {
        Ok(self.clone())
    }
}

/// Stable in-memory sort by reading `field` off each record
pub fn sort_by_attribute(records: Vec<Value>, field: &OrderField) -> Result<Vec<Value>> {
    let mut keyed = Vec::with_capacity(records.len());
    for record in records {
        let key = field
            .lookup(&record)
            .cloned()
            .ok_or_else(|| SortingError::MissingAttribute { field: field.name() })?;
        keyed.push((key, record));
    }

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_values(a, b);
        if field.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    });

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// Total order over JSON values
///
/// Values of the same kind compare naturally; different kinds order as
/// null < bool < number < string < array < object.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => number_key(x).cmp(&number_key(y)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Sort key for a JSON number
///
/// Numbers order by their `f64` value. Ties (including integers that round
/// to the same `f64`) put floats first, then integers by exact value.
fn number_key(n: &serde_json::Number) -> (NumberOrd, u8, i128) {
    let exact = n
        .as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from));
    let approx = n.as_f64().unwrap_or_default();
    match exact {
        Some(int) => (NumberOrd(approx), 1, int),
        None => (NumberOrd(approx), 0, 0),
    }
}

#[derive(Debug, Clone, Copy)]
struct NumberOrd(f64);

impl PartialEq for NumberOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumberOrd {}

impl PartialOrd for NumberOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumberOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
