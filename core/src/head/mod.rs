//! Header multimap.
//!
//! # Design
//! `Head` keeps its entries in a `Vec` rather than a hash map: header sets
//! are small, and a `Vec` preserves first-insertion order of names for free,
//! so the transport sees headers in the order the caller added them. Names
//! are compared exactly as stored; no case folding happens here.

mod builder;
pub mod header;
pub mod mime;

use crate::error::Result;
use header::Header;

pub use builder::HeadBuilder;

/// Immutable ordered multimap from header name to values.
///
/// Every name present maps to at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    entries: Vec<(String, Vec<String>)>,
}

impl Head {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> HeadBuilder {
        HeadBuilder::new()
    }

    pub(crate) fn from_entries(entries: Vec<(String, Vec<String>)>) -> Self {
        debug_assert!(entries.iter().all(|(_, values)| !values.is_empty()));
        Self { entries }
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_at(name, 0)
    }

    /// The `index`-th value of `name`, or `None` if either is missing.
    pub fn get_at(&self, name: &str, index: usize) -> Option<&str> {
        self.get_all(name)?.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_all(name).is_some()
    }

    /// First value of `header`, parsed. A missing header is `Ok(None)`;
    /// only a present value that fails to parse is an error.
    pub fn value<V>(&self, header: &Header<V>) -> Result<Option<V>> {
        self.value_at(header, 0)
    }

    pub fn value_at<V>(&self, header: &Header<V>, index: usize) -> Result<Option<V>> {
        match self.get_at(header.name(), index) {
            Some(raw) => header.parse(raw),
            None => Ok(None),
        }
    }

    /// Every value of `header` that parses to something. Raw values a
    /// mapped header does not recognise are skipped.
    pub fn values<V>(&self, header: &Header<V>) -> Result<Option<Vec<V>>> {
        let Some(raw) = self.get_all(header.name()) else {
            return Ok(None);
        };
        let mut parsed = Vec::with_capacity(raw.len());
        for value in raw {
            if let Some(v) = header.parse(value)? {
                parsed.push(v);
            }
        }
        Ok(Some(parsed))
    }

    /// Names with their values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `(name, value)` pair per value, the shape a transport sends.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.clone(), v.clone())))
            .collect()
    }
}

impl FromIterator<(String, String)> for Head {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut builder = HeadBuilder::new();
        for (name, value) in iter {
            builder.add(name, [value]);
        }
        builder.build()
    }
}

impl From<Vec<(String, String)>> for Head {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}
