// ── Provider domain types ──

use serde::{Deserialize, Serialize};

use super::facets::Facets;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub organization: String,
    pub name: String,
    pub description: Option<String>,
    pub source_url: String,
    pub maturity: Option<String>,
}

impl ProviderEntry {
    pub fn address(&self) -> String {
        format!("{}/{}", self.organization, self.name)
    }
}

impl Facets for ProviderEntry {
    fn organization(&self) -> &str {
        &self.organization
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.organization.as_str(), self.name.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    #[serde(flatten)]
    pub entry: ProviderEntry,
    pub versions: Vec<String>,
}
