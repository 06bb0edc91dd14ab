use crate::JsonPath;
use log::debug;
use serde::Serialize;
use serde_json::Value;

/// A single query match: where it was found, the value itself and the value's
/// runtime type tag.
///
/// Produced fresh per query; independently serializable for display or copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Concrete path of the match, e.g. `$.store.book[0].title`.
    ///
    /// Feeding this path back into a new query resolves to the same value.
    pub path: String,
    pub value: Value,
    /// One of `object`, `array`, `number`, `string`, `boolean`, `null`.
    #[serde(rename = "type")]
    pub value_type: String,
}

/// Applies a path query to an already-parsed JSON document.
///
/// This never fails: a malformed or unsupported path expression yields an
/// empty vector, exactly like a well-formed expression that matches nothing.
/// Callers that need to distinguish the two cases can parse through
/// [`JsonPath::parse`] first.
pub fn evaluate(root: &Value, expr: &str) -> Vec<QueryResult> {
    let path = match JsonPath::parse(expr) {
        Ok(path) => path,
        Err(e) => {
            debug!("query `{expr}` not recognized: {e}");
            return Vec::new();
        }
    };

    path.matches(root)
        .into_iter()
        .map(|(path, value)| QueryResult {
            path: path.to_string(),
            value_type: type_name(value).to_owned(),
            value: value.clone(),
        })
        .collect()
}

/// Runtime type tag of a JSON value.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
