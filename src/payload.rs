use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed (item, category) pairing as it goes over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub item: String,
    pub category: String,
}

impl Assignment {
    pub fn new(item: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            category: category.into(),
        }
    }
}

/// Body sent to the submission sink: assignments in catalog order, encoded as a JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    pub selections: Vec<Assignment>,
}

impl SubmissionPayload {
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Record of an accepted submission, kept in the local history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub preset: String,
    pub submitted_at: DateTime<Utc>,
    pub selections: Vec<Assignment>,
}

impl SubmissionReceipt {
    pub fn new(preset: impl Into<String>, payload: SubmissionPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            preset: preset.into(),
            submitted_at: Utc::now(),
            selections: payload.selections,
        }
    }
}
