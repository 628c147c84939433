// Raw response types for the browse endpoints.
//
// This is the only place that knows about wire shapes. Every list field
// tolerates `null`, every record tolerates the casing variants the backend
// has emitted over time, and the two facet-option endpoints accept both the
// wrapped and the bare-array form.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ── Records ─────────────────────────────────────────────────────────

/// A module as listed by `GET /api/modules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default, alias = "Organization", deserialize_with = "nullable")]
    pub organization: String,
    #[serde(default, alias = "Name", deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, alias = "Provider", deserialize_with = "nullable")]
    pub provider: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "sourceUrl",
        alias = "SourceUrl",
        deserialize_with = "nullable"
    )]
    pub source_url: String,
    #[serde(default, alias = "Maturity")]
    pub maturity: Option<String>,
}

/// `GET /api/modules/{org}/{name}/{provider}` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataRecord {
    #[serde(flatten)]
    pub module: ModuleRecord,
    #[serde(default, alias = "Versions", deserialize_with = "nullable")]
    pub versions: Vec<String>,
}

/// A provider as listed by `GET /api/providers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(default, alias = "Organization", deserialize_with = "nullable")]
    pub organization: String,
    #[serde(default, alias = "Name", deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "sourceRepoUrl",
        alias = "SourceRepoUrl",
        alias = "source_url",
        deserialize_with = "nullable"
    )]
    pub source_repo_url: String,
    #[serde(default, alias = "Maturity")]
    pub maturity: Option<String>,
}

/// `GET /api/providers/{org}/{name}` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadataRecord {
    #[serde(flatten)]
    pub provider: ProviderRecord,
    #[serde(default, alias = "Versions", deserialize_with = "nullable")]
    pub versions: Vec<String>,
}

/// A link attached to a release. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Url", alias = "URL")]
    pub url: Option<String>,
}

/// A release as listed by `GET /api/releases`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    #[serde(
        rename = "type",
        default,
        alias = "Type",
        alias = "release_type",
        deserialize_with = "nullable"
    )]
    pub release_type: String,
    #[serde(default, alias = "Organization", deserialize_with = "nullable")]
    pub organization: String,
    #[serde(default, alias = "Name", deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, alias = "Version", deserialize_with = "nullable")]
    pub version: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "Links", deserialize_with = "nullable")]
    pub links: Vec<LinkRecord>,
    #[serde(
        rename = "createdAt",
        default,
        alias = "created_at",
        alias = "CreatedAt",
        deserialize_with = "nullable"
    )]
    pub created_at: String,
    /// Some backend builds attach the source repository to releases too.
    #[serde(default, alias = "sourceUrl")]
    pub source_url: Option<String>,
    #[serde(default, alias = "Maturity")]
    pub maturity: Option<String>,
}

// ── Envelopes ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ModulesEnvelope {
    #[serde(default, deserialize_with = "nullable")]
    pub modules: Vec<ModuleRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProvidersEnvelope {
    #[serde(default, deserialize_with = "nullable")]
    pub providers: Vec<ProviderRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReleasesEnvelope {
    #[serde(default, deserialize_with = "nullable")]
    pub releases: Vec<ReleaseRecord>,
}

/// `{ "data": ... }` wrapper used by the detail endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// Facet option lists arrive in several shapes depending on the backend
/// build: a bare array, a wrapper object, or plain `null`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StringListPayload {
    Bare(Vec<Option<String>>),
    Organizations {
        #[serde(rename = "releaseOrgs", deserialize_with = "nullable")]
        items: Vec<Option<String>>,
    },
    Types {
        #[serde(rename = "releaseTypes", deserialize_with = "nullable")]
        items: Vec<Option<String>>,
    },
    /// An object without either wrapper key: the list field is absent.
    Absent(serde_json::Map<String, serde_json::Value>),
    Empty,
}

impl StringListPayload {
    /// Flatten into a plain list, dropping `null` and blank members.
    pub(crate) fn into_vec(self) -> Vec<String> {
        let items = match self {
            Self::Bare(items) | Self::Organizations { items } | Self::Types { items } => items,
            Self::Absent(_) | Self::Empty => Vec::new(),
        };
        items
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}
