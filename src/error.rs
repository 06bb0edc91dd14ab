use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// The path expression cannot be parsed or uses an unsupported form
    Parsing(String),
    /// The input JSON document is malformed
    Json(String),
    /// The input YAML document is malformed
    Yaml(String),
    /// A format conversion failed
    Conversion(String),
    /// The JSON Schema cannot be compiled
    Schema(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Yaml(e.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parsing(msg) => write!(f, "path parsing error: {msg}"),
            Error::Json(msg) => write!(f, "invalid JSON: {msg}"),
            Error::Yaml(msg) => write!(f, "invalid YAML: {msg}"),
            Error::Conversion(msg) => write!(f, "conversion error: {msg}"),
            Error::Schema(msg) => write!(f, "schema error: {msg}"),
        }
    }
}
