#![cfg_attr(docsrs, feature(doc_cfg))]
/*!
jsontools is a JSON tooling suite written in Rust: a restricted JSONPath
query engine, format conversion (JSON↔YAML, JSON→XML, JSON→CSV) and
JSON Schema validation.
*/

mod error;
mod json_path;
mod parsing;
mod query;
mod session;

pub mod convert;
pub mod schema;

pub use error::*;
pub use json_path::*;
pub use query::*;
pub use session::*;

#[cfg(test)]
mod tests;
