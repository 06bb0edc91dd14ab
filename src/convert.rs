//! Format conversion between JSON, YAML, XML and CSV.
//!
//! JSON is the pivot format: YAML converts both ways, XML and CSV are
//! one-way renderings of a JSON document.

use crate::Error;
use serde::Serialize;
use serde_json::{Map, Value};

/// Supported conversion directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    JsonToYaml,
    YamlToJson,
    JsonToXml,
    JsonToCsv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Emit one element per line, indented per depth.
    pub pretty: bool,
    /// Indentation unit used when `pretty` is on.
    pub indent: String,
    /// Prepend the XML declaration.
    pub header: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_owned(),
            header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: char,
    /// Emit a header row with the column names.
    pub header: bool,
    /// Collapse nested structure into single-level key paths before writing.
    pub flatten: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: true,
            flatten: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Indent width for JSON output.
    pub indent: usize,
    pub xml: XmlOptions,
    pub csv: CsvOptions,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            xml: XmlOptions::default(),
            csv: CsvOptions::default(),
        }
    }
}

/// Converts an input document according to the requested direction.
/// # Return
/// The converted text, or an error when the input document does not parse.
pub fn convert(
    input: &str,
    conversion: Conversion,
    options: &ConversionOptions,
) -> Result<String, Error> {
    match conversion {
        Conversion::JsonToYaml => {
            let value: Value = serde_json::from_str(input)?;
            Ok(serde_yaml::to_string(&value)?)
        }
        Conversion::YamlToJson => {
            let value: Value = serde_yaml::from_str(input)?;
            to_json_pretty(&value, options.indent)
        }
        Conversion::JsonToXml => {
            let value: Value = serde_json::from_str(input)?;
            Ok(json_to_xml(&value, &options.xml))
        }
        Conversion::JsonToCsv => {
            let value: Value = serde_json::from_str(input)?;
            Ok(json_to_csv(&value, &options.csv))
        }
    }
}

/// Serializes a JSON value with a configurable indent width.
pub fn to_json_pretty(value: &Value, indent: usize) -> Result<String, Error> {
    let indent = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| Error::Conversion(e.to_string()))
}

/// Renders a JSON value as XML.
///
/// Every object key becomes an element; an array repeats the enclosing
/// element name once per item; scalars become escaped text content. A root
/// array has no enclosing key, so its items are wrapped in `<item>`.
pub fn json_to_xml(value: &Value, options: &XmlOptions) -> String {
    let mut out = String::new();
    if options.header {
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        if options.pretty {
            out.push('\n');
        }
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(&mut out, key, child, 0, options);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(&mut out, "item", item, 0, options);
            }
        }
        scalar => out.push_str(&escape_xml(&scalar_text(scalar))),
    }

    out
}

fn write_element(out: &mut String, name: &str, value: &Value, depth: usize, options: &XmlOptions) {
    // arrays repeat the element name at the same depth instead of nesting
    if let Value::Array(items) = value {
        for item in items {
            write_element(out, name, item, depth, options);
        }
        return;
    }

    if options.pretty {
        for _ in 0..depth {
            out.push_str(&options.indent);
        }
    }

    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push_str(&format!("<{name}>"));
            if options.pretty {
                out.push('\n');
            }
            for (key, child) in map {
                write_element(out, key, child, depth + 1, options);
            }
            if options.pretty {
                for _ in 0..depth {
                    out.push_str(&options.indent);
                }
            }
            out.push_str(&format!("</{name}>"));
        }
        Value::Object(_) | Value::Null => {
            out.push_str(&format!("<{name}/>"));
        }
        scalar => {
            out.push_str(&format!(
                "<{name}>{}</{name}>",
                escape_xml(&scalar_text(scalar))
            ));
        }
    }

    if options.pretty {
        out.push('\n');
    }
}

/// Renders a JSON value as delimiter-separated text.
///
/// With `flatten` on, the whole document collapses to a single row keyed by
/// flattened paths. Otherwise an array of objects becomes one row per
/// element, with a header union of the keys in first-appearance order; any
/// other document becomes a single row.
pub fn json_to_csv(value: &Value, options: &CsvOptions) -> String {
    let rows: Vec<Map<String, Value>> = if options.flatten {
        vec![flatten(value)]
    } else {
        match value {
            Value::Array(items) => items.iter().map(row_of).collect(),
            other => vec![row_of(other)],
        }
    };

    let mut columns: Vec<&str> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }

    let mut out = String::new();
    if options.header {
        let header = columns
            .iter()
            .map(|column| escape_csv_field(column, options.delimiter))
            .collect::<Vec<_>>()
            .join(&options.delimiter.to_string());
        out.push_str(&header);
        out.push('\n');
    }

    for row in &rows {
        let line = columns
            .iter()
            .map(|column| {
                row.get(*column)
                    .map(|cell| escape_csv_field(&cell_text(cell), options.delimiter))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(&options.delimiter.to_string());
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Collapses nested structure into single-level key paths: object members
/// chain with `.`, array elements with `[i]`. A scalar document flattens to a
/// single `value` column.
pub fn flatten(value: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(&mut flat, "", value);
    flat
}

fn flatten_into(flat: &mut Map<String, Value>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(flat, &path, child);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(flat, &format!("{prefix}[{index}]"), child);
            }
        }
        leaf => {
            let key = if prefix.is_empty() { "value" } else { prefix };
            flat.insert(key.to_owned(), leaf.clone());
        }
    }
}

fn row_of(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        other => Map::from_iter([("value".to_owned(), other.clone())]),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape_csv_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
