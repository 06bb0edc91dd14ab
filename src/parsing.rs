use crate::{
    json_path::{ComparisonOperator, FilterExpr, Literal, Segment},
    Error, JsonPath,
};
use log::trace;

pub(crate) fn parse_path(expr: &str) -> Result<JsonPath, Error> {
    trace!("parsing path expression `{expr}`");

    let Some(rest) = expr.strip_prefix('$') else {
        return Err(syntax("path expressions must start with `$`"));
    };
    if rest.is_empty() {
        return Ok(JsonPath::new(Vec::new()));
    }

    // everything but the bare root is introduced by `$.`
    let Some(mut rest) = rest.strip_prefix('.') else {
        return Err(syntax("expected `.` after `$`"));
    };
    if rest.is_empty() {
        return Err(syntax("empty field name"));
    }

    let mut segments = Vec::new();
    let mut leading = true;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('[') {
            rest = parse_bracket(tail, &mut segments)?;
        } else {
            let tail = if leading {
                rest
            } else {
                match rest.strip_prefix('.') {
                    Some(tail) => tail,
                    None => return Err(syntax("expected `.` or `[`")),
                }
            };
            rest = parse_field(tail, &mut segments)?;
        }
        leading = false;
    }

    ensure_supported(&segments)?;
    Ok(JsonPath::new(segments))
}

fn parse_field<'a>(rest: &'a str, segments: &mut Vec<Segment>) -> Result<&'a str, Error> {
    let end = rest.find(['.', '[']).unwrap_or(rest.len());
    let name = &rest[..end];

    if name.is_empty() {
        return Err(syntax("empty field name"));
    }
    if name.contains('*') {
        return Err(syntax("`*` is only valid as a `[*]` wildcard segment"));
    }

    segments.push(Segment::Field(name.to_owned()));
    Ok(&rest[end..])
}

fn parse_bracket<'a>(rest: &'a str, segments: &mut Vec<Segment>) -> Result<&'a str, Error> {
    if let Some(tail) = rest.strip_prefix("*]") {
        segments.push(Segment::Wildcard);
        return Ok(tail);
    }

    if let Some(body) = rest.strip_prefix("?(") {
        let Some(end) = body.find(")]") else {
            return Err(syntax("unterminated filter expression"));
        };
        segments.push(Segment::Filter(parse_filter(&body[..end])?));
        return Ok(&body[end + 2..]);
    }

    let Some(end) = rest.find(']') else {
        return Err(syntax("unterminated bracket segment"));
    };
    let digits = &rest[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(syntax("expected a literal array index"));
    }
    let index = digits
        .parse::<usize>()
        .map_err(|_| syntax("array index out of range"))?;

    segments.push(Segment::Index(index));
    Ok(&rest[end + 1..])
}

fn parse_filter(body: &str) -> Result<FilterExpr, Error> {
    let Some(body) = body.strip_prefix("@.") else {
        return Err(syntax("filter expressions must start with `@.`"));
    };

    let mut operator = None;
    for (at, _) in body.char_indices() {
        let tail = &body[at..];
        if tail.starts_with("==") {
            operator = Some((at, ComparisonOperator::Eq, 2));
            break;
        }
        if tail.starts_with("!=") {
            operator = Some((at, ComparisonOperator::Neq, 2));
            break;
        }
        if tail.starts_with('<') {
            operator = Some((at, ComparisonOperator::Lt, 1));
            break;
        }
        if tail.starts_with('>') {
            operator = Some((at, ComparisonOperator::Gt, 1));
            break;
        }
    }
    let Some((at, operator, len)) = operator else {
        return Err(syntax("expected comparison operator `==`, `!=`, `<` or `>`"));
    };

    let property = &body[..at];
    let raw_literal = &body[at + len..];
    if property.is_empty() {
        return Err(syntax("empty filter property"));
    }
    if raw_literal.is_empty() {
        return Err(syntax("empty filter literal"));
    }

    Ok(FilterExpr::new(
        property.to_owned(),
        operator,
        Literal::from_raw(raw_literal),
    ))
}

/// Restricts parsed paths to the shapes the query grammar supports: plain
/// field traversal, field/index chains, a single wildcard surrounded by
/// fields, or a fields-only base followed by one trailing filter. Any other
/// combination is reported as unsupported.
fn ensure_supported(segments: &[Segment]) -> Result<(), Error> {
    let wildcards = segments
        .iter()
        .filter(|s| matches!(s, Segment::Wildcard))
        .count();
    let filters = segments
        .iter()
        .filter(|s| matches!(s, Segment::Filter(_)))
        .count();

    if wildcards > 1 {
        return Err(syntax("at most one `[*]` wildcard segment is supported"));
    }
    if filters > 1 {
        return Err(syntax("at most one filter segment is supported"));
    }

    if filters == 1 {
        if wildcards > 0 {
            return Err(syntax("wildcard and filter segments cannot be combined"));
        }
        let (last, base) = match segments.split_last() {
            Some(split) => split,
            None => return Ok(()),
        };
        if !matches!(last, Segment::Filter(_)) {
            return Err(syntax("filter segments are only supported in final position"));
        }
        if base.is_empty() || !base.iter().all(|s| matches!(s, Segment::Field(_))) {
            return Err(syntax("filter segments require a plain field base"));
        }
    } else if wildcards == 1
        && !segments
            .iter()
            .all(|s| matches!(s, Segment::Field(_) | Segment::Wildcard))
    {
        return Err(syntax("wildcard segments combine with plain fields only"));
    }

    Ok(())
}

#[inline]
fn syntax(msg: &str) -> Error {
    Error::Parsing(msg.to_owned())
}
