// ── Catalog facade ──
//
// Owns the HTTP client and the loaders of the unwindowed kinds. Module and
// provider views share those loaders, so a second modules view sees the list
// the first one fetched. A releases base list belongs to one time window, so
// every releases view gets a loader of its own. Facet option lists
// (organizations, release types) never depend on any releases loader.

use std::sync::Arc;

use futures_util::FutureExt;
use tracing::debug;

use terrarium_api::BrowseClient;
use terrarium_api::transport::{TlsMode, TransportConfig};

use crate::config::{BrowserConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    ModuleEntry, ModuleMetadata, ProviderEntry, ProviderMetadata, ReleaseEntry, ResourceKind,
    TimeWindow,
};
use crate::store::{LoadState, ResourceLoader};
use crate::view::{FetchFn, ViewStateController};

// ── Catalog ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CatalogInner>`.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: BrowserConfig,
    client: BrowseClient,
    modules: Arc<ResourceLoader<ModuleEntry>>,
    providers: Arc<ResourceLoader<ProviderEntry>>,
    organizations: Arc<ResourceLoader<String>>,
    release_types: Arc<ResourceLoader<String>>,
}

impl Catalog {
    /// Build a catalog and its HTTP client. No request is made yet.
    pub fn new(config: BrowserConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = BrowseClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Build a catalog around an existing client.
    pub fn with_client(config: BrowserConfig, client: BrowseClient) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                config,
                client,
                modules: Arc::new(ResourceLoader::new(ResourceKind::Modules)),
                providers: Arc::new(ResourceLoader::new(ResourceKind::Providers)),
                organizations: Arc::new(ResourceLoader::new(ResourceKind::Organizations)),
                release_types: Arc::new(ResourceLoader::new(ResourceKind::ReleaseTypes)),
            }),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &BrowseClient {
        &self.inner.client
    }

    // ── Views ────────────────────────────────────────────────────

    pub fn module_view(&self) -> ViewStateController<ModuleEntry> {
        let client = self.inner.client.clone();
        let fetch: FetchFn<ModuleEntry> = Arc::new(move |_: Option<TimeWindow>| {
            let client = client.clone();
            async move { fetch_modules(&client).await }.boxed()
        });
        ViewStateController::new(Arc::clone(&self.inner.modules), fetch)
    }

    pub fn provider_view(&self) -> ViewStateController<ProviderEntry> {
        let client = self.inner.client.clone();
        let fetch: FetchFn<ProviderEntry> = Arc::new(move |_: Option<TimeWindow>| {
            let client = client.clone();
            async move { fetch_providers(&client).await }.boxed()
        });
        ViewStateController::new(Arc::clone(&self.inner.providers), fetch)
    }

    /// Releases view starting at `window`, or the configured default.
    ///
    /// The view owns its loader: two views on different windows never see
    /// each other's base list.
    pub fn release_view(&self, window: Option<TimeWindow>) -> ViewStateController<ReleaseEntry> {
        let window = window.unwrap_or(self.inner.config.default_window);
        let client = self.inner.client.clone();
        let fetch: FetchFn<ReleaseEntry> = Arc::new(move |w: Option<TimeWindow>| {
            let client = client.clone();
            async move { fetch_releases(&client, w).await }.boxed()
        });
        let loader = Arc::new(ResourceLoader::new(ResourceKind::Releases));
        ViewStateController::windowed(loader, fetch, window)
    }

    // ── Release facet options ────────────────────────────────────

    /// Load the organization and release-type option lists side by side.
    ///
    /// Each list records its own failure; one failing never blanks the other.
    pub async fn load_release_facets(&self) {
        tokio::join!(self.load_organizations(), self.load_release_types());
    }

    /// Load only the organization option list.
    pub async fn load_organizations(&self) -> LoadState<String> {
        let client = &self.inner.client;
        self.inner
            .organizations
            .load(async { client.list_release_organizations().await.map_err(CoreError::from) })
            .await;
        self.organizations()
    }

    /// Load only the release-type option list.
    pub async fn load_release_types(&self) -> LoadState<String> {
        let client = &self.inner.client;
        self.inner
            .release_types
            .load(async { client.list_release_types().await.map_err(CoreError::from) })
            .await;
        self.release_types()
    }

    pub fn organizations(&self) -> LoadState<String> {
        self.inner.organizations.snapshot()
    }

    pub fn release_types(&self) -> LoadState<String> {
        self.inner.release_types.snapshot()
    }

    // ── One-off lookups ──────────────────────────────────────────

    /// One module with its published versions.
    pub async fn module_metadata(
        &self,
        organization: &str,
        name: &str,
        provider: &str,
    ) -> Result<ModuleMetadata, CoreError> {
        match self
            .inner
            .client
            .get_module(organization, name, provider)
            .await
        {
            Ok(record) => Ok(record.into()),
            Err(e) if e.is_not_found() => Err(CoreError::ModuleNotFound {
                identifier: format!("{organization}/{name}/{provider}"),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// One provider with its published versions.
    pub async fn provider_metadata(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<ProviderMetadata, CoreError> {
        match self.inner.client.get_provider(organization, name).await {
            Ok(record) => Ok(record.into()),
            Err(e) if e.is_not_found() => Err(CoreError::ProviderNotFound {
                identifier: format!("{organization}/{name}"),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

// ── Fetchers ─────────────────────────────────────────────────────

async fn fetch_modules(client: &BrowseClient) -> Result<Vec<ModuleEntry>, CoreError> {
    let records = client.list_modules().await?;
    Ok(records.into_iter().map(ModuleEntry::from).collect())
}

async fn fetch_providers(client: &BrowseClient) -> Result<Vec<ProviderEntry>, CoreError> {
    let records = client.list_providers().await?;
    Ok(records.into_iter().map(ProviderEntry::from).collect())
}

/// Releases arrive oldest first; the view shows newest first.
async fn fetch_releases(
    client: &BrowseClient,
    window: Option<TimeWindow>,
) -> Result<Vec<ReleaseEntry>, CoreError> {
    let age = window.map(TimeWindow::token);
    debug!(age = age.unwrap_or("<backend default>"), "fetching releases");
    let records = client.list_releases(age).await?;
    Ok(records.into_iter().rev().map(ReleaseEntry::from).collect())
}

/// Build a [`TransportConfig`] from the browser configuration.
fn build_transport(config: &BrowserConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
