//! Request-driven field filtering.
//!
//! A shallower algorithm than the class-level reducer in `filter`: it
//! operates on the live per-instance field set, understands flat names only
//! (no `{...}` grammar), activates only for GET requests, and never errors —
//! unknown query-parameter names are ignored.

use std::collections::BTreeSet;

use tracing::debug;

use crate::schema::SerializerDef;

/// Read access to the pieces of an HTTP request the field property needs.
///
/// The host web framework implements this for its own request type;
/// [`QueryRequest`] is a plain owned implementation for glue code and tests.
pub trait RequestContext {
    /// The request method, e.g. `"GET"`.
    fn method(&self) -> &str;

    /// A query parameter by name, if present.
    fn query_param(&self, key: &str) -> Option<&str>;
}

/// A minimal owned [`RequestContext`].
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    method: String,
    params: Vec<(String, String)>,
}

impl QueryRequest {
    /// Create a request with an explicit method.
    pub fn new<M, I, K, V>(method: M, params: I) -> Self
    where
        M: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: method.into(),
            params: params
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Create a GET request.
    pub fn get<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new("GET", params)
    }
}

impl RequestContext for QueryRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn query_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == key)
            .map(|(_, value)| value.as_str())
    }
}

impl SerializerDef {
    /// Effective field names after applying `include_fields` /
    /// `exclude_fields` query parameters.
    ///
    /// Returns the declared names unchanged unless a request is attached, the
    /// method is GET, and at least one of the two parameters is present.
    ///
    /// When both parameters produce a non-empty removal set, only
    /// `min(to_pop_include, to_pop_exclude)` is removed, where the two sets
    /// are compared lexicographically as whole values. This mirrors the
    /// behavior of the system this library replaces; it is a compatibility
    /// quirk, not a size- or priority-based policy.
    pub fn effective_field_names(&self, request: Option<&dyn RequestContext>) -> Vec<String> {
        let mut all: Vec<String> = self.declared_names().map(ToString::to_string).collect();

        let Some(request) = request else {
            return all;
        };
        if request.method() != "GET" {
            return all;
        }

        let include_raw = request.query_param("include_fields");
        let exclude_raw = request.query_param("exclude_fields");
        if include_raw.is_none() && exclude_raw.is_none() {
            return all;
        }

        let existing: BTreeSet<&str> = all.iter().map(String::as_str).collect();

        let to_pop_include: BTreeSet<String> = match include_raw {
            Some(raw) => {
                let include: BTreeSet<&str> = raw
                    .split(',')
                    .filter(|name| existing.contains(name))
                    .collect();
                existing
                    .iter()
                    .filter(|name| !include.contains(*name))
                    .map(ToString::to_string)
                    .collect()
            }
            None => BTreeSet::new(),
        };

        let to_pop_exclude: BTreeSet<String> = match exclude_raw {
            Some(raw) => raw
                .split(',')
                .filter(|name| existing.contains(name))
                .map(ToString::to_string)
                .collect(),
            None => BTreeSet::new(),
        };

        let to_pop = if !to_pop_include.is_empty() && !to_pop_exclude.is_empty() {
            std::cmp::min(to_pop_include, to_pop_exclude)
        } else if !to_pop_include.is_empty() {
            to_pop_include
        } else {
            to_pop_exclude
        };

        if !to_pop.is_empty() {
            debug!(serializer = %self.name(), popped = ?to_pop, "query-param field filtering");
            all.retain(|name| !to_pop.contains(name));
        }

        all
    }
}
