// ── Generation-tagged resource loader ──
//
// One loader per resource kind. Every issued fetch takes a ticket carrying
// the next generation number; a completion is applied only while its ticket
// is still the newest one issued. The check and the write happen together
// under the watch channel's lock, so two completions can never interleave.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::ResourceKind;

/// Coarse lifecycle of a loader, derived from its [`LoadState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LoadPhase {
    /// Nothing fetched yet, nothing outstanding.
    Idle,
    /// The newest fetch is outstanding.
    Loading,
    /// The newest fetch succeeded.
    Ready,
    /// The newest fetch failed.
    Error,
}

/// Snapshot of one resource kind: base list plus load bookkeeping.
#[derive(Debug)]
pub struct LoadState<T> {
    base: Arc<Vec<Arc<T>>>,
    in_flight: bool,
    last_error: Option<CoreError>,
    generation: u64,
    loaded: bool,
}

impl<T> Clone for LoadState<T> {
    fn clone(&self) -> Self {
        Self {
            base: Arc::clone(&self.base),
            in_flight: self.in_flight,
            last_error: self.last_error.clone(),
            generation: self.generation,
            loaded: self.loaded,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self {
            base: Arc::new(Vec::new()),
            in_flight: false,
            last_error: None,
            generation: 0,
            loaded: false,
        }
    }
}

impl<T> LoadState<T> {
    /// The most recent successfully fetched list. Empty until the first
    /// success; kept unchanged across failures.
    pub fn base(&self) -> &Arc<Vec<Arc<T>>> {
        &self.base
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Failure of the newest applied fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&CoreError> {
        self.last_error.as_ref()
    }

    /// Generation of the newest issued fetch (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> LoadPhase {
        if self.in_flight {
            LoadPhase::Loading
        } else if self.last_error.is_some() {
            LoadPhase::Error
        } else if self.loaded {
            LoadPhase::Ready
        } else {
            LoadPhase::Idle
        }
    }
}

/// Proof that a fetch was issued. Hand it back to [`ResourceLoader::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket that is never completed leaves the loader in flight"]
pub struct LoadTicket {
    kind: ResourceKind,
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

/// Last-request-wins holder of one resource kind's [`LoadState`].
pub struct ResourceLoader<T> {
    kind: ResourceKind,
    state: watch::Sender<LoadState<T>>,
}

impl<T: Send + Sync + 'static> ResourceLoader<T> {
    pub fn new(kind: ResourceKind) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self { kind, state }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Issue a new fetch: bump the generation and raise in-flight.
    ///
    /// Any ticket handed out earlier is superseded from this point on.
    pub fn begin(&self) -> LoadTicket {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.in_flight = true;
            generation = s.generation;
        });
        debug!(kind = %self.kind, generation, "load issued");
        LoadTicket {
            kind: self.kind,
            generation,
        }
    }

    /// Apply the outcome of the fetch `ticket` was issued for.
    ///
    /// Returns `false` and leaves the state untouched when a newer fetch has
    /// been issued since. On success the base list is replaced wholesale and
    /// any previous error cleared; on failure the base list is kept.
    pub fn complete(&self, ticket: LoadTicket, result: Result<Vec<T>, CoreError>) -> bool {
        let kind = self.kind;
        self.state.send_if_modified(move |s| {
            if s.generation != ticket.generation {
                debug!(
                    %kind,
                    stale = ticket.generation,
                    latest = s.generation,
                    "discarding superseded response"
                );
                return false;
            }
            s.in_flight = false;
            match result {
                Ok(items) => {
                    debug!(%kind, generation = ticket.generation, count = items.len(), "load applied");
                    s.base = Arc::new(items.into_iter().map(Arc::new).collect());
                    s.last_error = None;
                    s.loaded = true;
                }
                Err(e) => {
                    warn!(%kind, generation = ticket.generation, error = %e, "load failed");
                    s.last_error = Some(e.for_kind(kind));
                }
            }
            true
        })
    }

    /// Issue a fetch, await `fetch`, and apply its outcome.
    ///
    /// Returns whether the outcome was applied (i.e. not superseded).
    pub async fn load<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = Result<Vec<T>, CoreError>>,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.complete(ticket, result)
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> LoadState<T> {
        self.state.borrow().clone()
    }

    pub fn base(&self) -> Arc<Vec<Arc<T>>> {
        Arc::clone(&self.state.borrow().base)
    }

    pub fn in_flight(&self) -> bool {
        self.state.borrow().in_flight
    }

    pub fn last_error(&self) -> Option<CoreError> {
        self.state.borrow().last_error.clone()
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.borrow().phase()
    }

    /// Receive every applied transition.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.state.subscribe()
    }

    /// Resolve once nothing is in flight.
    pub async fn settled(&self) -> LoadState<T> {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|s| !s.in_flight).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.snapshot(),
        }
    }
}
