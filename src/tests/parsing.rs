use crate::{ComparisonOperator, Error, FilterExpr, JsonPath, Literal, Segment};

#[test]
fn root() -> Result<(), Error> {
    assert_eq!(JsonPath::new(vec![]), JsonPath::parse("$")?);
    Ok(())
}

#[test]
fn plain_fields() -> Result<(), Error> {
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("store".to_owned()),
            Segment::Field("book".to_owned()),
        ]),
        JsonPath::parse("$.store.book")?
    );
    Ok(())
}

#[test]
fn field_names_are_not_restricted_to_identifiers() -> Result<(), Error> {
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a?b".to_owned()),
            Segment::Field("c]d".to_owned()),
        ]),
        JsonPath::parse("$.a?b.c]d")?
    );
    Ok(())
}

#[test]
fn wildcard() -> Result<(), Error> {
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("store".to_owned()),
            Segment::Field("book".to_owned()),
            Segment::Wildcard,
        ]),
        JsonPath::parse("$.store.book[*]")?
    );

    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("book".to_owned()),
            Segment::Wildcard,
            Segment::Field("title".to_owned()),
            Segment::Field("short".to_owned()),
        ]),
        JsonPath::parse("$.book[*].title.short")?
    );

    // wildcard directly under the root, for root arrays
    assert_eq!(
        JsonPath::new(vec![Segment::Wildcard]),
        JsonPath::parse("$.[*]")?
    );

    Ok(())
}

#[test]
fn index() -> Result<(), Error> {
    assert_eq!(
        JsonPath::new(vec![Segment::Field("a".to_owned()), Segment::Index(0)]),
        JsonPath::parse("$.a[0]")?
    );

    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a".to_owned()),
            Segment::Index(0),
            Segment::Index(1),
            Segment::Field("b".to_owned()),
            Segment::Index(2),
            Segment::Field("c".to_owned()),
        ]),
        JsonPath::parse("$.a[0][1].b[2].c")?
    );

    assert_eq!(
        JsonPath::new(vec![Segment::Index(3)]),
        JsonPath::parse("$.[3]")?
    );

    Ok(())
}

#[test]
fn filter_operators() -> Result<(), Error> {
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("store".to_owned()),
            Segment::Field("book".to_owned()),
            Segment::Filter(FilterExpr::new(
                "price".to_owned(),
                ComparisonOperator::Gt,
                Literal::Number(15.0),
            )),
        ]),
        JsonPath::parse("$.store.book[?(@.price>15)]")?
    );

    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("book".to_owned()),
            Segment::Filter(FilterExpr::new(
                "price".to_owned(),
                ComparisonOperator::Lt,
                Literal::Number(10.0),
            )),
        ]),
        JsonPath::parse("$.book[?(@.price<10)]")?
    );

    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("book".to_owned()),
            Segment::Filter(FilterExpr::new(
                "inStock".to_owned(),
                ComparisonOperator::Eq,
                Literal::Bool(true),
            )),
        ]),
        JsonPath::parse("$.book[?(@.inStock==true)]")?
    );

    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("book".to_owned()),
            Segment::Filter(FilterExpr::new(
                "category".to_owned(),
                ComparisonOperator::Neq,
                Literal::Text("fiction".to_owned()),
            )),
        ]),
        JsonPath::parse("$.book[?(@.category!='fiction')]")?
    );

    Ok(())
}

#[test]
fn filter_literal_coercion() -> Result<(), Error> {
    // double quotes strip the same way as single quotes
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a".to_owned()),
            Segment::Filter(FilterExpr::new(
                "p".to_owned(),
                ComparisonOperator::Eq,
                Literal::Text("x".to_owned()),
            )),
        ]),
        JsonPath::parse(r#"$.a[?(@.p=="x")]"#)?
    );

    // unquoted non-numeric text stays text
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a".to_owned()),
            Segment::Filter(FilterExpr::new(
                "p".to_owned(),
                ComparisonOperator::Eq,
                Literal::Text("abc".to_owned()),
            )),
        ]),
        JsonPath::parse("$.a[?(@.p==abc)]")?
    );

    // numeric text with surrounding whitespace coerces to a number
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a".to_owned()),
            Segment::Filter(FilterExpr::new(
                "p".to_owned(),
                ComparisonOperator::Eq,
                Literal::Number(1.0),
            )),
        ]),
        JsonPath::parse("$.a[?(@.p== 1)]")?
    );

    // `>=` is not an operator: `>` wins and `=10` becomes a string literal
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a".to_owned()),
            Segment::Filter(FilterExpr::new(
                "p".to_owned(),
                ComparisonOperator::Gt,
                Literal::Text("=10".to_owned()),
            )),
        ]),
        JsonPath::parse("$.a[?(@.p>=10)]")?
    );

    // the property is a flat key, dots included
    assert_eq!(
        JsonPath::new(vec![
            Segment::Field("a".to_owned()),
            Segment::Filter(FilterExpr::new(
                "b.c".to_owned(),
                ComparisonOperator::Eq,
                Literal::Number(1.0),
            )),
        ]),
        JsonPath::parse("$.a[?(@.b.c==1)]")?
    );

    Ok(())
}

#[test]
fn unsupported_expressions() {
    let rejected = [
        "store.book",
        "$x",
        "$[0]",
        "$.",
        "$.a..b",
        "$.a.",
        "$.a.*",
        "$.*",
        "$.a[*][*]",
        "$.a[*][0]",
        "$.a[0][*]",
        "$.a[*][?(@.p==1)]",
        "$.a[0][?(@.p==1)]",
        "$.a[?(@.p==1)].b",
        "$.a[?(@.p==1)][0]",
        "$.[?(@.p==1)]",
        "$.a[0]xyz",
        "$.a[-1]",
        "$.a[1.5]",
        "$.a[",
        "$.a[?(@.p=1)]",
        "$.a[?(@.p==1)",
        "$.a[?(p==1)]",
        "$.a[?(@.==1)]",
        "$.a[?(@.p==)]",
    ];

    for expr in rejected {
        assert!(
            matches!(JsonPath::parse(expr), Err(Error::Parsing(_))),
            "`{expr}` should be rejected"
        );
    }
}
