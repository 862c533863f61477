use serde::{Deserialize, Serialize};

/// Latest known state of one GitHub Actions workflow, condensed from the
/// `workflow_run` objects in received events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub run_number: i64,
    pub updated_at: String,
    pub html_url: String,
}
