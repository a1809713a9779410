//! Query serialization: projects the active field values into ordered
//! key/value pairs and composes the displayed URL.

use itertools::Itertools;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::engine::DependencyEngine;
use crate::schema::ParameterDescriptor;

/// Characters escaped in query values. Starts from the full
/// non-alphanumeric set and re-admits the characters that must stay
/// readable in the displayed link; timestamps especially, so `:` is
/// never mangled.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b':')
    .remove(b',')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'*')
    .remove(b'/');

/// One serialized query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPair {
    pub name: String,
    pub value: String,
}

/// Serializes the current form state into a canonical query.
pub struct QuerySerializer;

impl QuerySerializer {
    /// Walks the parameters in declared order (not graph-registration
    /// order) and keeps those that are active, externally visible (name
    /// not starting with `_`) and non-empty. An inactive node is skipped
    /// regardless of its stored value.
    pub fn serialize(
        descriptors: &[ParameterDescriptor],
        engine: &DependencyEngine,
    ) -> Vec<QueryPair> {
        let mut pairs = Vec::new();
        for descriptor in descriptors {
            if descriptor.name.starts_with('_') {
                continue;
            }
            let Some(id) = engine.lookup(&descriptor.name) else {
                continue;
            };
            if !engine.graph().is_active(id) {
                continue;
            }
            let value = engine.graph().node(id).value.clone();
            if value.is_empty() {
                continue;
            }
            pairs.push(QueryPair {
                name: descriptor.name.clone(),
                value,
            });
        }
        pairs
    }

    /// `name=value` pairs joined with `&`, minimally encoded.
    pub fn query_string(pairs: &[QueryPair]) -> String {
        pairs
            .iter()
            .map(|pair| {
                format!(
                    "{}={}",
                    pair.name,
                    utf8_percent_encode(&pair.value, QUERY_VALUE)
                )
            })
            .join("&")
    }

    /// The full clickable link for the given form action.
    pub fn full_url(action: &str, pairs: &[QueryPair]) -> String {
        format!("{}?{}", action, Self::query_string(pairs))
    }
}
