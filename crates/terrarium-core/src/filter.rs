// ── Facet filter pipeline ──
//
// Pure mapping from (base list, selection) to the displayed list. Stages run
// type → organization → text and each is a passthrough when its part of the
// selection is empty. Nothing here reorders, clones entries, or touches I/O.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::Facets;

/// The user's filter intent for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection {
    /// Free-text query, matched case-insensitively.
    pub text: String,
    /// Selected release types. Empty means "any".
    pub types: BTreeSet<String>,
    /// Selected organizations. Empty means "any".
    pub organizations: BTreeSet<String>,
}

impl FacetSelection {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_organizations<I, S>(mut self, orgs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organizations = orgs.into_iter().map(Into::into).collect();
        self
    }

    /// `true` when no facet narrows anything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.types.is_empty() && self.organizations.is_empty()
    }

    /// Clear text and category selections.
    pub fn clear(&mut self) {
        self.text.clear();
        self.types.clear();
        self.organizations.clear();
    }
}

// ── Stage predicates ─────────────────────────────────────────────────

/// Type stage. Entries without a type never match a non-empty selection.
pub fn matches_type<T: Facets + ?Sized>(entry: &T, types: &BTreeSet<String>) -> bool {
    types.is_empty() || entry.entry_type().is_some_and(|t| types.contains(t))
}

pub fn matches_organization<T: Facets + ?Sized>(entry: &T, orgs: &BTreeSet<String>) -> bool {
    orgs.is_empty() || orgs.contains(entry.organization())
}

/// Text stage. `needle` must already be lower-cased.
pub fn matches_text<T: Facets + ?Sized>(entry: &T, needle: &str) -> bool {
    needle.is_empty() || entry.search_text().contains(needle)
}

/// Apply every facet of `selection` to `base`, preserving order.
pub fn filter<T: Facets>(base: &[Arc<T>], selection: &FacetSelection) -> Vec<Arc<T>> {
    let needle = selection.text.to_lowercase();
    base.iter()
        .filter(|e| matches_type(e.as_ref(), &selection.types))
        .filter(|e| matches_organization(e.as_ref(), &selection.organizations))
        .filter(|e| matches_text(e.as_ref(), &needle))
        .cloned()
        .collect()
}
