use crate::schema::{is_valid, validate};
use crate::Error;
use serde_json::json;

fn user_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "number"},
            "email": {"type": "string", "format": "email"}
        },
        "required": ["name", "age"]
    })
}

#[test]
fn valid_instance_has_no_violations() -> Result<(), Error> {
    let instance = json!({"name": "John Doe", "age": 30, "email": "john.doe@example.com"});

    assert!(validate(&user_schema(), &instance)?.is_empty());
    assert!(is_valid(&user_schema(), &instance)?);

    Ok(())
}

#[test]
fn type_violations_carry_instance_paths() -> Result<(), Error> {
    let instance = json!({"name": "John Doe", "age": "thirty"});

    let violations = validate(&user_schema(), &instance)?;
    assert!(!violations.is_empty());
    assert!(violations
        .iter()
        .any(|v| v.keyword == "type" && v.instance_path == "/age"));

    Ok(())
}

#[test]
fn missing_required_members_are_reported() -> Result<(), Error> {
    let instance = json!({"name": "John Doe"});

    let violations = validate(&user_schema(), &instance)?;
    assert!(violations
        .iter()
        .any(|v| v.keyword == "required" && v.instance_path.is_empty()));

    Ok(())
}

#[test]
fn array_items_are_validated_individually() -> Result<(), Error> {
    let schema = json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {"id": {"type": "number"}},
            "required": ["id"]
        }
    });
    let instance = json!([{"id": 1}, {"id": "two"}]);

    let violations = validate(&schema, &instance)?;
    assert!(violations
        .iter()
        .any(|v| v.keyword == "type" && v.instance_path == "/1/id"));

    Ok(())
}

#[test]
fn format_assertions_are_enabled() -> Result<(), Error> {
    let schema = json!({"type": "string", "format": "email"});

    assert!(is_valid(&schema, &json!("john.doe@example.com"))?);
    assert!(!is_valid(&schema, &json!("not an email"))?);

    Ok(())
}

#[test]
fn uncompilable_schemas_are_errors() {
    let schema = json!({"type": 12});

    assert!(matches!(
        validate(&schema, &json!({})),
        Err(Error::Schema(_))
    ));
}

#[test]
fn violations_serialize_for_display() -> Result<(), Error> {
    let violations = validate(&user_schema(), &json!({"name": "x", "age": "y"}))?;
    let serialized = serde_json::to_value(&violations)?;

    let first = &serialized[0];
    assert!(first.get("instance_path").is_some());
    assert!(first.get("keyword").is_some());
    assert!(first.get("message").is_some());

    Ok(())
}
