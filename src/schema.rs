//! JSON Schema validation.
//!
//! A thin wrapper over the `jsonschema` crate that reports violations as
//! plain serializable records, with format assertions (`email`, `date`, ...)
//! enabled.

use crate::Error;
use serde::Serialize;
use serde_json::Value;

/// One schema violation found in an instance document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// JSON pointer to the offending part of the instance (empty for the root).
    pub instance_path: String,
    /// JSON pointer to the schema keyword that failed.
    pub schema_path: String,
    /// The failed keyword, e.g. `type` or `required`.
    pub keyword: String,
    /// Human-readable description of the violation.
    pub message: String,
}

/// Validates an instance document against a JSON Schema.
/// # Return
/// All violations found in the instance, in document order; an empty vector
/// means the instance is valid. A schema that does not compile is an
/// [`Error::Schema`].
pub fn validate(schema: &Value, instance: &Value) -> Result<Vec<SchemaViolation>, Error> {
    let validator = compile(schema)?;

    Ok(validator
        .iter_errors(instance)
        .map(|error| {
            let schema_path = error.schema_path.to_string();
            SchemaViolation {
                instance_path: error.instance_path.to_string(),
                keyword: schema_path
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_owned(),
                schema_path,
                message: error.to_string(),
            }
        })
        .collect())
}

/// Boolean shortcut for [`validate`].
pub fn is_valid(schema: &Value, instance: &Value) -> Result<bool, Error> {
    Ok(compile(schema)?.is_valid(instance))
}

fn compile(schema: &Value) -> Result<jsonschema::Validator, Error> {
    jsonschema::options()
        .should_validate_formats(true)
        .build(schema)
        .map_err(|e| Error::Schema(e.to_string()))
}
