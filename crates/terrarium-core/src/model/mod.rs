// ── Domain model ──
//
// Canonical catalog types. The rest of the crate never sees wire records:
// `convert` turns them into these once, at the loader boundary.

pub mod facets;
pub mod kind;
pub mod module;
pub mod provider;
pub mod release;
pub mod window;

pub use facets::Facets;
pub use kind::ResourceKind;
pub use module::{ModuleEntry, ModuleMetadata};
pub use provider::{ProviderEntry, ProviderMetadata};
pub use release::{INVALID_LINK_LABEL, ReleaseEntry, ReleaseLink};
pub use window::TimeWindow;
