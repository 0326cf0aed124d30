use tracing::{debug, info, instrument, warn};

use crate::app::ports::{CatalogProvider, SubmissionSink};
use crate::catalog::Catalog;
use crate::error::{PicksError, Result};
use crate::metrics::{time_operation, PickMetrics, CATALOG_FETCH_DURATION};
use crate::payload::SubmissionReceipt;
use crate::tracker::{SelectionTracker, ToggleOutcome};
use crate::types::{CategorySet, Selectable};

/// What the pick screen is showing
#[derive(Debug)]
pub enum ScreenState<T> {
    Loading,
    Failed { message: String },
    Ready(SelectionTracker<T>),
}

/// One user's pick screen: loads a catalog, tracks selections, submits them.
///
/// A failed catalog fetch parks the session in [`ScreenState::Failed`] until
/// the caller loads again. A failed submission leaves the selection untouched.
pub struct PickSession<T> {
    preset: String,
    categories: CategorySet,
    state: ScreenState<T>,
}

impl<T: Selectable> PickSession<T> {
    pub fn new(preset: impl Into<String>, categories: CategorySet) -> Self {
        Self {
            preset: preset.into(),
            categories,
            state: ScreenState::Loading,
        }
    }

    pub fn preset(&self) -> &str {
        &self.preset
    }

    pub fn state(&self) -> &ScreenState<T> {
        &self.state
    }

    pub fn tracker(&self) -> Option<&SelectionTracker<T>> {
        match &self.state {
            ScreenState::Ready(tracker) => Some(tracker),
            _ => None,
        }
    }

    pub fn tracker_mut(&mut self) -> Option<&mut SelectionTracker<T>> {
        match &mut self.state {
            ScreenState::Ready(tracker) => Some(tracker),
            _ => None,
        }
    }

    /// Fetches the catalog and starts an empty selection over it
    #[instrument(skip(self, provider), fields(preset = %self.preset))]
    pub async fn load<P>(&mut self, provider: &P) -> Result<()>
    where
        P: CatalogProvider<T> + ?Sized,
    {
        self.state = ScreenState::Loading;

        let fetched = {
            let _timing = time_operation(CATALOG_FETCH_DURATION);
            provider.fetch_catalog().await
        };

        match fetched.and_then(|items| Catalog::new(items, self.categories.clone())) {
            Ok(catalog) => {
                info!("Loaded catalog with {} items", catalog.len());
                PickMetrics::record_catalog_success(catalog.len());
                self.state = ScreenState::Ready(SelectionTracker::new(catalog));
                Ok(())
            }
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                PickMetrics::record_catalog_error();
                self.state = ScreenState::Failed { message: e.to_string() };
                Err(e)
            }
        }
    }

    /// Reloads the catalog, discarding the current selection
    pub async fn refresh<P>(&mut self, provider: &P) -> Result<()>
    where
        P: CatalogProvider<T> + ?Sized,
    {
        self.load(provider).await
    }

    /// Toggles by item key (or 1-based position) and category label
    pub fn toggle_by_key(&mut self, key: &str, label: &str) -> Result<ToggleOutcome> {
        let tracker = self.tracker_mut().ok_or(PicksError::NotReady)?;
        let item = tracker.catalog().resolve_item(key)?;
        let category = tracker.catalog().resolve_category(label)?;

        let outcome = tracker.toggle(item, category);
        debug!(item = %tracker.catalog().key(item), category = %label, ?outcome, "toggle");
        PickMetrics::record_toggle(outcome);
        Ok(outcome)
    }

    pub fn can_submit(&self) -> bool {
        self.tracker().map(|t| t.is_complete()).unwrap_or(false)
    }

    /// Sends a complete selection to `sink`, resetting it on success
    #[instrument(skip(self, sink), fields(preset = %self.preset))]
    pub async fn submit<S>(&mut self, sink: &S) -> Result<SubmissionReceipt>
    where
        S: SubmissionSink + ?Sized,
    {
        let preset = self.preset.clone();
        let tracker = self.tracker_mut().ok_or(PicksError::NotReady)?;
        if !tracker.is_complete() {
            PickMetrics::record_submission_rejected();
            return Err(PicksError::Incomplete {
                assigned: tracker.len(),
                required: tracker.required(),
            });
        }

        let payload = tracker.to_submission_payload();
        match sink.submit(&payload).await {
            Ok(()) => {
                info!("Submitted {} selections", payload.len());
                PickMetrics::record_submission_success();
                tracker.reset();
                Ok(SubmissionReceipt::new(preset, payload))
            }
            Err(e) => {
                warn!("Submission failed, selection kept: {}", e);
                PickMetrics::record_submission_error();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::SubmissionPayload;
    use crate::types::Movie;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticCatalog(std::result::Result<Vec<&'static str>, String>);

    #[async_trait]
    impl CatalogProvider<Movie> for StaticCatalog {
        async fn fetch_catalog(&self) -> Result<Vec<Movie>> {
            match &self.0 {
                Ok(titles) => Ok(titles
                    .iter()
                    .map(|t| Movie {
                        title: t.to_string(),
                        year: "1999".into(),
                        genre: String::new(),
                        poster: String::new(),
                    })
                    .collect()),
                Err(message) => Err(PicksError::Api {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        fail: bool,
        received: Mutex<Vec<SubmissionPayload>>,
    }

    #[async_trait]
    impl SubmissionSink for RecordingSink {
        async fn submit(&self, payload: &SubmissionPayload) -> Result<()> {
            if self.fail {
                return Err(PicksError::Api {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            self.received.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    fn session() -> PickSession<Movie> {
        let categories = CategorySet::from_pairs(&[("own", "Own it"), ("stream", "Stream it"), ("skip", "Skip it")]).unwrap();
        PickSession::new("flick-pick", categories)
    }

    async fn loaded() -> PickSession<Movie> {
        let mut s = session();
        s.load(&StaticCatalog(Ok(vec!["A", "B", "C"]))).await.unwrap();
        s
    }

    #[tokio::test]
    async fn test_failed_load_shows_error_state() {
        let mut s = session();
        let err = s.load(&StaticCatalog(Err("boom".into()))).await.unwrap_err();
        assert!(matches!(err, PicksError::Api { status: 500, .. }));
        assert!(matches!(s.state(), ScreenState::Failed { message } if message.contains("boom")));
        assert!(matches!(s.toggle_by_key("A", "own"), Err(PicksError::NotReady)));
    }

    #[tokio::test]
    async fn test_duplicate_catalog_keys_fail_the_load() {
        let mut s = session();
        assert!(s.load(&StaticCatalog(Ok(vec!["A", "A"]))).await.is_err());
        assert!(matches!(s.state(), ScreenState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_submit_is_gated_on_completion() {
        let mut s = loaded().await;
        s.toggle_by_key("A", "own").unwrap();
        assert!(!s.can_submit());

        let sink = RecordingSink::default();
        let err = s.submit(&sink).await.unwrap_err();
        assert!(matches!(err, PicksError::Incomplete { assigned: 1, required: 3 }));
        assert!(sink.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_resets_selection() {
        let mut s = loaded().await;
        s.toggle_by_key("C", "own").unwrap();
        s.toggle_by_key("A", "stream").unwrap();
        s.toggle_by_key("B", "skip").unwrap();
        assert!(s.can_submit());

        let sink = RecordingSink::default();
        let receipt = s.submit(&sink).await.unwrap();
        assert_eq!(receipt.preset, "flick-pick");
        assert_eq!(receipt.selections[0].item, "A");
        assert_eq!(sink.received.lock().unwrap().len(), 1);
        assert!(s.tracker().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_selection() {
        let mut s = loaded().await;
        for (key, label) in [("A", "own"), ("B", "stream"), ("C", "skip")] {
            s.toggle_by_key(key, label).unwrap();
        }
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        assert!(s.submit(&sink).await.is_err());
        assert!(s.can_submit());
        assert_eq!(s.tracker().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_inputs_are_reported() {
        let mut s = loaded().await;
        assert!(matches!(s.toggle_by_key("Z", "own"), Err(PicksError::UnknownItem(_))));
        assert!(matches!(s.toggle_by_key("A", "rent"), Err(PicksError::UnknownCategory(_))));
        assert_eq!(s.toggle_by_key("2", "own").unwrap(), ToggleOutcome::Selected);
    }

    #[tokio::test]
    async fn test_refresh_discards_selection() {
        let mut s = loaded().await;
        s.toggle_by_key("A", "own").unwrap();
        s.refresh(&StaticCatalog(Ok(vec!["A", "B", "C", "D"]))).await.unwrap();
        let tracker = s.tracker().unwrap();
        assert!(tracker.is_empty());
        assert_eq!(tracker.catalog().len(), 4);
    }
}
