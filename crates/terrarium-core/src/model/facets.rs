// ── Facet accessors shared by every catalog entry ──

/// What the filter pipeline needs to know about an entry.
///
/// Implemented by [`ModuleEntry`](super::ModuleEntry),
/// [`ProviderEntry`](super::ProviderEntry) and
/// [`ReleaseEntry`](super::ReleaseEntry).
pub trait Facets {
    fn organization(&self) -> &str;

    fn name(&self) -> &str;

    /// Value of the categorical "type" facet. Only releases carry one.
    fn entry_type(&self) -> Option<&str> {
        None
    }

    /// The fields the free-text facet searches, in order. Missing optional
    /// fields contribute an empty string.
    fn search_fields(&self) -> Vec<&str>;

    /// Lower-cased, space-joined `search_fields`.
    fn search_text(&self) -> String {
        self.search_fields().join(" ").to_lowercase()
    }
}
