use crate::{Session, HISTORY_LIMIT};
use serde_json::json;

#[test]
fn successful_queries_are_recorded() {
    let value = json!({"a": [1, 2]});
    let mut session = Session::new();

    let results = session.evaluate(&value, "$.a[*]");
    assert_eq!(2, results.len());

    assert_eq!(1, session.history().len());
    assert_eq!("$.a[*]", session.history()[0].query);
    assert_eq!(2, session.history()[0].result_count);
}

#[test]
fn empty_queries_are_not_recorded() {
    let value = json!({"a": [1, 2]});
    let mut session = Session::new();

    assert!(session.evaluate(&value, "$.missing").is_empty());
    assert!(session.evaluate(&value, "not a path").is_empty());

    assert!(session.history().is_empty());
}

#[test]
fn history_is_newest_first_and_capped() {
    let value = json!({"a": [1, 2]});
    let mut session = Session::new();

    for i in 0..15 {
        session.record(&format!("$.q{i}"), i);
    }

    assert_eq!(HISTORY_LIMIT, session.history().len());
    assert_eq!("$.q14", session.history()[0].query);
    assert_eq!("$.q5", session.history()[HISTORY_LIMIT - 1].query);
}
