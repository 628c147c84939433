use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The independently loadable lists of the browse API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Modules,
    Providers,
    Organizations,
    ReleaseTypes,
    Releases,
}

impl ResourceKind {
    /// Only releases take a parameter (the time window).
    pub fn is_windowed(self) -> bool {
        matches!(self, Self::Releases)
    }
}
