//! Query string construction
//!
//! [`QueryParams`] keeps an ordered list of key/value pairs and serializes them
//! once, as `application/x-www-form-urlencoded`. Optional filters go through
//! [`QueryParams::push_opt`], which omits `None` and empty strings. Required
//! values and list elements are always emitted, even when empty.

use std::fmt::Display;

use url::form_urlencoded;

/// Ordered, repeatable query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single pair as is
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a pair only when a non-empty value is present
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        let Some(value) = value.map(|v| v.to_string()) else {
            return self;
        };
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    /// Append one pair per element, preserving order
    pub fn extend<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// True when no pair has been added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Borrow the pairs in insertion order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Values recorded for `key`, in insertion order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Serialize to an encoded query string (no leading `?` or `&`)
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Set the query of `url`, leaving it without `?` when empty
    pub fn apply_to(&self, url: &mut url::Url) {
        if self.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
    }
}
