//! Typed coercion of raw path and query parameters.

use std::collections::HashMap;
use std::num::ParseIntError;

use gateway_rpc::ListQuery;
use thiserror::Error;

/// A numeric parameter that did not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value {raw:?} for `{field}`: {source}")]
pub struct ParseError {
    pub field: String,
    pub raw: String,
    #[source]
    pub source: ParseIntError,
}

/// Parse a base-10 `i32`, naming `field` in the error.
pub fn parse_int_param(raw: &str, field: &str) -> Result<i32, ParseError> {
    raw.parse::<i32>().map_err(|source| ParseError {
        field: field.to_string(),
        raw: raw.to_string(),
        source,
    })
}

/// Collapse repeated query keys, keeping the first value of each.
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut params = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

/// Build a [`ListQuery`] from query parameters.
///
/// Defaults apply only to absent parameters; `?limit=` is an error, not 10.
pub fn parse_list_query(params: &HashMap<String, String>) -> Result<ListQuery, ParseError> {
    let limit = match params.get("limit") {
        Some(raw) => parse_int_param(raw, "limit")?,
        None => ListQuery::DEFAULT_LIMIT,
    };
    let offset = match params.get("offset") {
        Some(raw) => parse_int_param(raw, "offset")?,
        None => ListQuery::DEFAULT_OFFSET,
    };

    Ok(ListQuery {
        search: params.get("search").cloned().unwrap_or_default(),
        limit,
        offset,
    })
}
