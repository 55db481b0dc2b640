//! Per-request sort state
//!
//! A [`SortRequest`] carries the request path and its query parameters. It is
//! built by the host application for every render and threaded explicitly into
//! the anchor renderer and the collection sorter.

use url::form_urlencoded;

/// Query parameter carrying the sort field
pub const SORT_PARAM: &str = "sort";

/// Query parameter carrying the sort direction
pub const DIR_PARAM: &str = "dir";

/// Ordered query-string multimap
///
/// Keeps insertion order and repeated keys so that forwarded parameters come
/// back out exactly as they came in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string (no leading `?`)
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Last value bound to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Remove every value of `key`, returning the last one
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let mut removed = None;
        self.pairs.retain(|(k, v)| {
            if k == key {
                removed = Some(v.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Bind `key` to a single value, keeping its position if already present
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(k, _)| {
                    if *k == key {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode back to a query string
    pub fn urlencode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// The request a sortable table is rendered for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortRequest {
    path: String,
    query: QueryParams,
}

impl SortRequest {
    pub fn new(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Build from a request target such as `/items/?sort=name&dir=asc`
    ///
    /// Any `#fragment` is dropped.
    pub fn from_uri(uri: &str) -> Self {
        let uri = uri.split('#').next().unwrap_or_default();
        match uri.split_once('?') {
            Some((path, query)) => Self::new(path, QueryParams::parse(query)),
            None => Self::new(uri, QueryParams::new()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Requested sort field name, empty when none
    pub fn sort(&self) -> &str {
        self.query.get(SORT_PARAM).unwrap_or_default()
    }

    /// Raw `dir` token, if the request carries one
    pub fn direction_token(&self) -> Option<&str> {
        self.query.get(DIR_PARAM)
    }

    /// Sort field in ordering form: `-field` when sorting descending
    pub fn field(&self) -> String {
        let sort = self.sort();
        if !sort.is_empty() && self.direction_token() == Some("desc") {
            format!("-{}", sort)
        } else {
            sort.to_string()
        }
    }
}
