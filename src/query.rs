use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::{EventRecord, WorkflowSummary};

/// Last `limit` records in arrival order.
pub fn recent(events: &[EventRecord], limit: usize) -> &[EventRecord] {
    let start = events.len().saturating_sub(limit);
    &events[start..]
}

/// Latest run per workflow name, drawn from records whose payload carries a
/// `workflow_run` object. `name` narrows the result to a single workflow.
///
/// `updated_at` values are compared as strings; GitHub emits them in a fixed
/// UTC format, so lexical order is chronological order.
pub fn workflow_status(events: &[EventRecord], name: Option<&str>) -> Vec<WorkflowSummary> {
    let mut latest: BTreeMap<String, WorkflowSummary> = BTreeMap::new();

    for event in events {
        let Some(run) = event.payload.get("workflow_run") else {
            continue;
        };
        let Some(summary) = summarize_run(run) else {
            continue;
        };
        if let Some(filter) = name
            && summary.name != filter
        {
            continue;
        }
        match latest.get(&summary.name) {
            Some(existing) if existing.updated_at >= summary.updated_at => {}
            _ => {
                latest.insert(summary.name.clone(), summary);
            }
        }
    }

    latest.into_values().collect()
}

// Runs missing any required field are skipped rather than surfaced; the
// payload shape is owned by the provider.
fn summarize_run(run: &Value) -> Option<WorkflowSummary> {
    Some(WorkflowSummary {
        name: run.get("name")?.as_str()?.to_string(),
        status: run.get("status")?.as_str()?.to_string(),
        conclusion: run
            .get("conclusion")
            .and_then(Value::as_str)
            .map(|s| s.to_string()),
        run_number: run.get("run_number")?.as_i64()?,
        updated_at: run.get("updated_at")?.as_str()?.to_string(),
        html_url: run.get("html_url")?.as_str()?.to_string(),
    })
}
