// ── Module domain types ──

use serde::{Deserialize, Serialize};

use super::facets::Facets;

/// A published module: `{organization}/{name}/{provider}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub organization: String,
    pub name: String,
    pub provider: String,
    pub description: Option<String>,
    /// Canonical source repository.
    pub source_url: String,
    pub maturity: Option<String>,
}

impl ModuleEntry {
    /// `org/name/provider`, the module's registry address.
    pub fn address(&self) -> String {
        format!("{}/{}/{}", self.organization, self.name, self.provider)
    }
}

impl Facets for ModuleEntry {
    fn organization(&self) -> &str {
        &self.organization
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.organization.as_str(), self.name.as_str(), self.provider.as_str()]
    }
}

/// A module together with its published versions, newest first as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    #[serde(flatten)]
    pub entry: ModuleEntry,
    pub versions: Vec<String>,
}
