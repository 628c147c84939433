//! Data-view layer between `terrarium-api` and display consumers.
//!
//! This crate owns the domain model, load bookkeeping, and facet filtering
//! for browsing a registry catalog:
//!
//! - **[`Catalog`]**: Central facade holding the HTTP client and one
//!   [`ResourceLoader`] per resource kind. Hands out views that share those
//!   loaders, and offers one-off metadata lookups.
//!
//! - **[`ResourceLoader<T>`]**: Last-request-wins holder of a base list.
//!   Every fetch is tagged with a generation number; a response is applied
//!   only while it is still the newest one issued. State is published over
//!   a `tokio::sync::watch` channel.
//!
//! - **[`ViewStateController<T>`]**: Owns the facet selection of one
//!   displayed list. Only a time-window change or an explicit refresh goes
//!   to the network; text and category changes re-filter in place.
//!
//! - **[`filter`]**: The pure type → organization → text pipeline.
//!
//! - **Domain model** ([`model`]): Canonical `ModuleEntry`,
//!   `ProviderEntry` and `ReleaseEntry`, the [`Facets`] accessor trait, and
//!   the [`TimeWindow`] presets.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod filter;
pub mod model;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BrowserConfig, TlsVerification};
pub use controller::Catalog;
pub use error::CoreError;
pub use filter::FacetSelection;
pub use store::{LoadPhase, LoadState, LoadTicket, ResourceLoader};
pub use view::{FetchFn, ViewStateController};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Facets, INVALID_LINK_LABEL, ModuleEntry, ModuleMetadata, ProviderEntry, ProviderMetadata,
    ReleaseEntry, ReleaseLink, ResourceKind, TimeWindow,
};
