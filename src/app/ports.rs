use crate::error::Result;
use crate::payload::SubmissionPayload;
use async_trait::async_trait;

/// Supplies the ordered list of items a user picks from.
/// One request, no pagination, no retry.
#[async_trait]
pub trait CatalogProvider<T>: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<T>>;
}

/// Accepts a finished selection. Only success or failure is reported back.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<()>;
}
