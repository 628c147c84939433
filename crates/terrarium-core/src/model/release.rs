// ── Release domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::facets::Facets;

/// Label shown for a link whose URL cannot be parsed.
pub const INVALID_LINK_LABEL: &str = "Invalid-Link";

/// A timestamped release announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub organization: String,
    pub name: String,
    /// Release type label, e.g. `module` or `bundle`.
    #[serde(rename = "type")]
    pub release_type: String,
    pub version: String,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub maturity: Option<String>,
    pub links: Vec<ReleaseLink>,
    /// Parsed creation time, `None` when the backend sent something unreadable.
    pub created_at: Option<DateTime<Utc>>,
    /// Creation time exactly as sent.
    pub created_at_raw: String,
}

impl Facets for ReleaseEntry {
    fn organization(&self) -> &str {
        &self.organization
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn entry_type(&self) -> Option<&str> {
        Some(&self.release_type)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.organization.as_str(),
            self.name.as_str(),
            self.release_type.as_str(),
            self.version.as_str(),
        ]
    }
}

/// A `(title, url)` pair attached to a release.
///
/// A broken URL never invalidates the release: the link is reported as
/// disabled and labelled [`INVALID_LINK_LABEL`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseLink {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl ReleaseLink {
    /// The navigable URL. Scheme-less values are treated as `http://`.
    pub fn href(&self) -> Option<Url> {
        let raw = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let has_scheme = raw
            .get(..8)
            .is_some_and(|p| p.eq_ignore_ascii_case("https://"))
            || raw
                .get(..7)
                .is_some_and(|p| p.eq_ignore_ascii_case("http://"));
        let candidate = if has_scheme {
            raw.to_owned()
        } else {
            format!("http://{raw}")
        };
        Url::parse(&candidate).ok().filter(|u| u.host_str().is_some())
    }

    pub fn is_disabled(&self) -> bool {
        self.href().is_none()
    }

    /// Title if present, else the host without a leading `www.`.
    pub fn label(&self) -> String {
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return title.to_owned();
        }
        match self.href() {
            Some(url) => url
                .host_str()
                .map(|h| h.strip_prefix("www.").unwrap_or(h).to_owned())
                .unwrap_or_else(|| INVALID_LINK_LABEL.to_owned()),
            None => INVALID_LINK_LABEL.to_owned(),
        }
    }
}
