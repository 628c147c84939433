// Browse API HTTP client
//
// Wraps `reqwest::Client` with URL construction under the configured
// mount point, status mapping, and envelope unwrapping. All methods return
// unwrapped payloads with `null` lists already normalized to empty.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{
    DataEnvelope, ModuleMetadataRecord, ModuleRecord, ModulesEnvelope, ProviderMetadataRecord,
    ProviderRecord, ProvidersEnvelope, ReleaseRecord, ReleasesEnvelope, StringListPayload,
};
use crate::transport::TransportConfig;

/// Maximum number of body bytes echoed back in error messages.
const BODY_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for the registry's browse API.
///
/// The `base_url` is the mount point of the browse service; every endpoint
/// lives under `{base_url}/api/...`. Path segments (organization, name,
/// provider) are percent-encoded, so names containing `/` or spaces are safe.
#[derive(Debug, Clone)]
pub struct BrowseClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl BrowseClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: Some(transport.timeout),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout: None,
        }
    }

    /// The browse service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{segments...}`, percent-encoding each segment.
    pub(crate) fn api_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/modules`
    pub async fn list_modules(&self) -> Result<Vec<ModuleRecord>, Error> {
        let url = self.api_url(&["modules"])?;
        let envelope: ModulesEnvelope = self.get_json(url).await?;
        Ok(envelope.modules)
    }

    /// `GET /api/modules/{org}/{name}/{provider}`
    pub async fn get_module(
        &self,
        organization: &str,
        name: &str,
        provider: &str,
    ) -> Result<ModuleMetadataRecord, Error> {
        let url = self.api_url(&["modules", organization, name, provider])?;
        self.get_data(url).await
    }

    /// `GET /api/providers`
    pub async fn list_providers(&self) -> Result<Vec<ProviderRecord>, Error> {
        let url = self.api_url(&["providers"])?;
        let envelope: ProvidersEnvelope = self.get_json(url).await?;
        Ok(envelope.providers)
    }

    /// `GET /api/providers/{org}/{name}`
    pub async fn get_provider(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<ProviderMetadataRecord, Error> {
        let url = self.api_url(&["providers", organization, name])?;
        self.get_data(url).await
    }

    /// `GET /api/release/organizations`
    pub async fn list_release_organizations(&self) -> Result<Vec<String>, Error> {
        let url = self.api_url(&["release", "organizations"])?;
        let payload: StringListPayload = self.get_json(url).await?;
        Ok(payload.into_vec())
    }

    /// `GET /api/release/types`
    pub async fn list_release_types(&self) -> Result<Vec<String>, Error> {
        let url = self.api_url(&["release", "types"])?;
        let payload: StringListPayload = self.get_json(url).await?;
        Ok(payload.into_vec())
    }

    /// `GET /api/releases?age={age}`
    ///
    /// Releases come back oldest first, exactly as the backend sends them.
    /// Without `age` the backend applies its own default window.
    pub async fn list_releases(&self, age: Option<&str>) -> Result<Vec<ReleaseRecord>, Error> {
        let mut url = self.api_url(&["releases"])?;
        if let Some(age) = age {
            url.query_pairs_mut().append_pair("age", age);
        }
        let envelope: ReleasesEnvelope = self.get_json(url).await?;
        Ok(envelope.releases)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Unwrap a `{ "data": ... }` envelope, treating `null` data as not found.
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let path = url.path().to_owned();
        let envelope: DataEnvelope<T> = self.get_json(url).await?;
        envelope.data.ok_or(Error::NotFound { path })
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let path = url.path().to_owned();

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { path });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        let body = resp.text().await.map_err(|e| self.map_transport(e))?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        match self.timeout {
            Some(timeout) if err.is_timeout() => Error::Timeout {
                // Round up so a sub-second limit never reports as 0s.
                timeout_secs: timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0),
            },
            _ => Error::Transport(err),
        }
    }
}

/// First few hundred bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
