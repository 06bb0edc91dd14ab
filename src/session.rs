use crate::{evaluate, QueryResult};
use log::trace;
use serde::Serialize;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of entries kept in the query history.
pub const HISTORY_LIMIT: usize = 10;

/// One line of the query history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryHistoryEntry {
    pub query: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub result_count: usize,
}

/// Caller-owned transient state around the pure query evaluator.
///
/// The session records successful queries into an append-only history,
/// newest first, capped at [`HISTORY_LIMIT`] entries. The evaluator itself
/// never touches it.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<QueryHistoryEntry>,
}

impl Session {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a query and records it in the history when it produced at
    /// least one result.
    pub fn evaluate(&mut self, root: &Value, expr: &str) -> Vec<QueryResult> {
        let results = evaluate(root, expr);
        if !results.is_empty() {
            self.record(expr, results.len());
        }
        results
    }

    /// Pushes an entry to the front of the history, dropping the oldest
    /// entry beyond [`HISTORY_LIMIT`].
    pub fn record(&mut self, query: &str, result_count: usize) {
        trace!("recording query `{query}` with {result_count} results");
        self.history.insert(
            0,
            QueryHistoryEntry {
                query: query.to_owned(),
                timestamp: now_millis(),
                result_count,
            },
        );
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Recorded queries, newest first.
    #[inline]
    pub fn history(&self) -> &[QueryHistoryEntry] {
        &self.history
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
