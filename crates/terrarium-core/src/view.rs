// ── View state controller ──
//
// One value per displayed list. Owns the facet selection and decides which
// changes go to the network: only a time-window change (or an explicit
// refresh) issues a fetch. Text and category changes re-filter the base list
// the loader already holds.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::filter::{self, FacetSelection};
use crate::model::{Facets, ResourceKind, TimeWindow};
use crate::store::{LoadPhase, LoadState, ResourceLoader};

/// Produces one base list for the given window (`None` for unwindowed kinds).
pub type FetchFn<T> = Arc<
    dyn Fn(Option<TimeWindow>) -> BoxFuture<'static, Result<Vec<T>, CoreError>> + Send + Sync,
>;

/// Facet selection plus the loader it filters.
///
/// | change                 | fetch | recompute |
/// |------------------------|-------|-----------|
/// | text                   | no    | yes       |
/// | types / organizations  | no    | yes       |
/// | reset                  | no    | yes       |
/// | time window (changed)  | yes   | on apply  |
/// | time window (same)     | no    | no        |
/// | refresh                | yes   | on apply  |
///
/// Fetches run on spawned tokio tasks; in-flight is raised before the
/// setter returns.
pub struct ViewStateController<T> {
    selection: FacetSelection,
    window: Option<TimeWindow>,
    loader: Arc<ResourceLoader<T>>,
    fetch: FetchFn<T>,
}

impl<T: Facets + Send + Sync + 'static> ViewStateController<T> {
    /// A view over an unwindowed kind (modules, providers).
    pub fn new(loader: Arc<ResourceLoader<T>>, fetch: FetchFn<T>) -> Self {
        Self {
            selection: FacetSelection::default(),
            window: None,
            loader,
            fetch,
        }
    }

    /// A view whose base list is bounded by a time window (releases).
    pub fn windowed(loader: Arc<ResourceLoader<T>>, fetch: FetchFn<T>, window: TimeWindow) -> Self {
        debug_assert!(
            loader.kind().is_windowed(),
            "{} lists are not bounded by a time window",
            loader.kind()
        );
        Self {
            window: Some(window),
            ..Self::new(loader, fetch)
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.loader.kind()
    }

    // ── Derived output ───────────────────────────────────────────────

    /// The base list run through the current selection.
    pub fn displayed(&self) -> Vec<Arc<T>> {
        filter::filter(&self.loader.base(), &self.selection)
    }

    pub fn base(&self) -> Arc<Vec<Arc<T>>> {
        self.loader.base()
    }

    pub fn in_flight(&self) -> bool {
        self.loader.in_flight()
    }

    pub fn load_phase(&self) -> LoadPhase {
        self.loader.phase()
    }

    pub fn last_error(&self) -> Option<CoreError> {
        self.loader.last_error()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.loader.subscribe()
    }

    /// Wait until the newest fetch has been applied.
    pub async fn settled(&self) -> LoadState<T> {
        self.loader.settled().await
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    pub fn text(&self) -> &str {
        &self.selection.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.selection.text = text.into();
    }

    pub fn selected_types(&self) -> &BTreeSet<String> {
        &self.selection.types
    }

    pub fn set_selected_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.types = types.into_iter().map(Into::into).collect();
    }

    pub fn selected_organizations(&self) -> &BTreeSet<String> {
        &self.selection.organizations
    }

    pub fn set_selected_organizations<I, S>(&mut self, orgs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.organizations = orgs.into_iter().map(Into::into).collect();
    }

    /// Clear text and category selections. The window and base list stay.
    pub fn reset(&mut self) {
        self.selection.clear();
    }

    pub fn time_window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Switch the time window. Returns whether a fetch was issued.
    ///
    /// Selecting the current window is a no-op. Views without a window
    /// reject the call.
    pub fn set_time_window(&mut self, window: TimeWindow) -> Result<bool, CoreError> {
        let Some(current) = self.window else {
            return Err(CoreError::Unsupported {
                operation: format!("time window on {}", self.kind()),
                required: "a windowed view".into(),
            });
        };
        if current == window {
            debug!(%window, "time window unchanged");
            return Ok(false);
        }
        self.window = Some(window);
        self.issue();
        Ok(true)
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Issue the first fetch unless this loader has already been asked.
    pub fn start(&self) -> bool {
        if self.loader.snapshot().generation() > 0 {
            return false;
        }
        self.issue();
        true
    }

    /// Re-issue the current fetch with the current window.
    pub fn refresh(&self) {
        self.issue();
    }

    fn issue(&self) {
        let ticket = self.loader.begin();
        let fut = (self.fetch)(self.window);
        let loader = Arc::clone(&self.loader);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let result = fut.await;
                loader.complete(ticket, result)
            });
        } else {
            let _ = loader.complete(
                ticket,
                Err(CoreError::Internal("no async runtime to run the fetch on".into())),
            );
        }
    }
}
