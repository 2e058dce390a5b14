//! Request translation: parameter parsing, body decoding, and the generic
//! handlers that forward to the catalog service.

pub mod extract;
pub mod params;
pub mod resource;

pub use extract::{JsonBody, ListParams, PathId};
pub use params::{first_values, parse_int_param, parse_list_query, ParseError};
pub use resource::{Catalog, Operation, Resource};
