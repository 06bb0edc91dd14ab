use crate::{parsing, Error};
use serde_json::Value;
use std::{cmp::Ordering, fmt};

/// Represents a parsed path query expression
///
/// Once constructed, this structure can be used efficiently multiple times
/// to apply the same query to different JSON documents.
#[derive(Debug, PartialEq)]
pub struct JsonPath(Vec<Segment>);

impl JsonPath {
    #[inline]
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Parses a `JsonPath` instance from a path expression string
    /// # Return
    /// A new `JsonPath` instance or an error if the expression is not part of
    /// the supported query grammar.
    #[inline]
    pub fn parse(expr: &str) -> Result<Self, Error> {
        parsing::parse_path(expr)
    }

    /// Applies the path expression to the input JSON document
    /// # Return
    /// The matched nodes in the form of a vector of value references.
    ///
    /// Apart from the vector in itself, this function does not allocate any memory.
    /// All the value references are issued from the input reference.
    ///
    /// By convention, this process does not issue any error.
    /// If the path expression does not match the input value, an empty vector will be returned.
    #[inline]
    pub fn evaluate<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        self.matches(root).into_iter().map(|(_, value)| value).collect()
    }

    /// Applies the path expression to the input JSON document
    /// # Return
    /// The concrete paths of all matched nodes, in traversal order.
    #[inline]
    pub fn get_paths(&self, root: &Value) -> Vec<NodePath> {
        self.matches(root).into_iter().map(|(path, _)| path).collect()
    }

    /// Applies the path expression to the input JSON document
    /// # Return
    /// One `(path, value)` pair per matched node, in traversal order.
    /// Every returned path is concrete: re-evaluating it resolves to the
    /// same node.
    pub fn matches<'a>(&self, root: &'a Value) -> Vec<(NodePath, &'a Value)> {
        let mut matches = Vec::new();
        eval_segments(&self.0, root, NodePath::default(), &mut matches);
        matches
    }
}

fn eval_segments<'a>(
    segments: &[Segment],
    current: &'a Value,
    path: NodePath,
    matches: &mut Vec<(NodePath, &'a Value)>,
) {
    let Some((segment, rest)) = segments.split_first() else {
        matches.push((path, current));
        return;
    };

    match segment {
        Segment::Field(name) => {
            if let Some(child) = current.get(name) {
                eval_segments(rest, child, path.key(name), matches);
            }
        }
        Segment::Index(index) => {
            if let Some(child) = current.as_array().and_then(|array| array.get(*index)) {
                eval_segments(rest, child, path.idx(*index), matches);
            }
        }
        Segment::Wildcard => {
            if let Some(array) = current.as_array() {
                for (index, child) in array.iter().enumerate() {
                    eval_segments(rest, child, path.clone().idx(index), matches);
                }
            }
        }
        Segment::Filter(filter) => {
            if let Some(array) = current.as_array() {
                for (index, child) in array.iter().enumerate() {
                    if filter.matches(child) {
                        eval_segments(rest, child, path.clone().idx(index), matches);
                    }
                }
            }
        }
    }
}

/// A single step of a parsed path expression.
#[derive(Debug, PartialEq)]
pub(crate) enum Segment {
    /// `.name`: object member access
    Field(String),
    /// `[i]`: literal array index access
    Index(usize),
    /// `[*]`: every element of an array
    Wildcard,
    /// `[?(@.prop op literal)]`: array elements selected by a property comparison
    Filter(FilterExpr),
}

/// A concrete (non-wildcarded) location inside a JSON document.
///
/// Renders as a plain path expression, e.g. `$.store.book[0].title`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath(Vec<PathStep>);

impl NodePath {
    #[inline]
    pub fn key(mut self, key: &str) -> Self {
        self.0.push(PathStep::Key(key.to_owned()));
        self
    }

    #[inline]
    pub fn idx(mut self, index: usize) -> Self {
        self.0.push(PathStep::Index(index));
        self
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.0 {
            match step {
                PathStep::Key(key) => write!(f, ".{key}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathStep {
    Key(String),
    Index(usize),
}

#[derive(Debug, PartialEq)]
pub(crate) struct FilterExpr {
    property: String,
    operator: ComparisonOperator,
    literal: Literal,
}

impl FilterExpr {
    #[inline]
    pub(crate) fn new(property: String, operator: ComparisonOperator, literal: Literal) -> Self {
        Self {
            property,
            operator,
            literal,
        }
    }

    /// A candidate matches when it is an object carrying the property and the
    /// property value compares successfully against the literal.
    pub(crate) fn matches(&self, candidate: &Value) -> bool {
        let Some(object) = candidate.as_object() else {
            return false;
        };
        let Some(value) = object.get(&self.property) else {
            return false;
        };

        match self.operator {
            ComparisonOperator::Eq => loose_eq(value, &self.literal),
            ComparisonOperator::Neq => !loose_eq(value, &self.literal),
            ComparisonOperator::Lt => loose_cmp(value, &self.literal) == Some(Ordering::Less),
            ComparisonOperator::Gt => loose_cmp(value, &self.literal) == Some(Ordering::Greater),
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum ComparisonOperator {
    Eq,
    Neq,
    Lt,
    Gt,
}

/// A filter literal, coerced at parse time.
#[derive(Debug, PartialEq)]
pub(crate) enum Literal {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Literal {
    /// Coercion order inherited from the query grammar: the exact words
    /// `true`/`false` become booleans, anything numeric becomes a number,
    /// everything else is a string with surrounding quotes stripped.
    pub(crate) fn from_raw(raw: &str) -> Self {
        match raw {
            "true" => Literal::Bool(true),
            "false" => Literal::Bool(false),
            _ => match parse_number(raw) {
                Some(number) => Literal::Number(number),
                None => Literal::Text(strip_quotes(raw).to_owned()),
            },
        }
    }

    #[inline]
    fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(number) => Some(*number),
            Literal::Bool(true) => Some(1.0),
            Literal::Bool(false) => Some(0.0),
            Literal::Text(text) => parse_number(text),
        }
    }
}

/// Loose (type-coercing) equality between a document value and a filter literal.
///
/// Same-type scalars compare directly; number/string/boolean cross-comparisons
/// coerce both sides to numbers. Null, arrays and objects never compare equal
/// to a literal.
fn loose_eq(value: &Value, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::Bool(b), Literal::Bool(lit)) => b == lit,
        (Value::String(s), Literal::Text(lit)) => s == lit,
        (Value::Number(n), Literal::Number(lit)) => n.as_f64() == Some(*lit),
        _ => match (to_number(value), literal.as_number()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        },
    }
}

/// Loose ordering: two strings compare lexicographically, everything else
/// goes through numeric coercion. Incomparable operands yield `None`.
fn loose_cmp(value: &Value, literal: &Literal) -> Option<Ordering> {
    if let (Value::String(s), Literal::Text(lit)) = (value, literal) {
        return Some(s.as_str().cmp(lit.as_str()));
    }

    let left = to_number(value)?;
    let right = literal.as_number()?;
    left.partial_cmp(&right)
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(true) => Some(1.0),
        Value::Bool(false) => Some(0.0),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Numeric-string coercion: surrounding whitespace is ignored and a blank
/// string counts as zero.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|number| !number.is_nan())
}

fn strip_quotes(raw: &str) -> &str {
    let quoted = raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')));
    if quoted {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}
