// ── API-to-domain type conversions ──
//
// Bridges raw `terrarium_api` records into canonical `terrarium_core::model`
// types. Blank optional strings become `None`, link lists keep their order,
// and release timestamps are parsed while the raw text is kept alongside.

use chrono::{DateTime, Utc};

use terrarium_api::models::{
    LinkRecord, ModuleMetadataRecord, ModuleRecord, ProviderMetadataRecord, ProviderRecord,
    ReleaseRecord,
};

use crate::model::{
    ModuleEntry, ModuleMetadata, ProviderEntry, ProviderMetadata, ReleaseEntry, ReleaseLink,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Trim and drop empty optional strings.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Parse a release creation timestamp.
///
/// Accepts RFC 3339 and the `2024-05-01 10:00:00.123 +0000 UTC` form some
/// backends emit (anything after the offset is ignored).
pub(crate) fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let head: Vec<&str> = raw.split_whitespace().take(3).collect();
    if head.len() < 3 {
        return None;
    }
    DateTime::parse_from_str(&head.join(" "), "%Y-%m-%d %H:%M:%S%.f %z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Modules ────────────────────────────────────────────────────────

impl From<ModuleRecord> for ModuleEntry {
    fn from(r: ModuleRecord) -> Self {
        Self {
            organization: r.organization,
            name: r.name,
            provider: r.provider,
            description: non_blank(r.description),
            source_url: r.source_url,
            maturity: non_blank(r.maturity),
        }
    }
}

impl From<ModuleMetadataRecord> for ModuleMetadata {
    fn from(r: ModuleMetadataRecord) -> Self {
        Self {
            entry: r.module.into(),
            versions: r.versions,
        }
    }
}

// ── Providers ──────────────────────────────────────────────────────

impl From<ProviderRecord> for ProviderEntry {
    fn from(r: ProviderRecord) -> Self {
        Self {
            organization: r.organization,
            name: r.name,
            description: non_blank(r.description),
            source_url: r.source_repo_url,
            maturity: non_blank(r.maturity),
        }
    }
}

impl From<ProviderMetadataRecord> for ProviderMetadata {
    fn from(r: ProviderMetadataRecord) -> Self {
        Self {
            entry: r.provider.into(),
            versions: r.versions,
        }
    }
}

// ── Releases ───────────────────────────────────────────────────────

impl From<LinkRecord> for ReleaseLink {
    fn from(r: LinkRecord) -> Self {
        Self {
            title: non_blank(r.title),
            url: non_blank(r.url),
        }
    }
}

impl From<ReleaseRecord> for ReleaseEntry {
    fn from(r: ReleaseRecord) -> Self {
        let created_at = parse_created_at(&r.created_at);
        Self {
            organization: r.organization,
            name: r.name,
            release_type: r.release_type,
            version: r.version,
            description: non_blank(r.description),
            source_url: non_blank(r.source_url),
            maturity: non_blank(r.maturity),
            links: r.links.into_iter().map(ReleaseLink::from).collect(),
            created_at,
            created_at_raw: r.created_at,
        }
    }
}
