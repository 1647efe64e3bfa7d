//! Content report model.

use serde::{Deserialize, Serialize};

/// A report filed against a question, reviewed by moderators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub question_id: i64,
    pub reporter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: String,
}
