//! Shared helpers for command handlers.

use std::sync::Arc;

use terrarium_core::{Facets, ViewStateController};

use crate::cli::ListArgs;
use crate::error::CliError;

/// Issue the view's first fetch and wait for it to land.
///
/// A failed load surfaces as an error instead of an empty table.
pub async fn load<T>(view: &ViewStateController<T>) -> Result<(), CliError>
where
    T: Facets + Send + Sync + 'static,
{
    view.start();
    let state = view.settled().await;
    match state.last_error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}

/// Push `--search` / `--org` into the view's selection and return what it shows.
pub fn apply_list_args<T>(view: &mut ViewStateController<T>, args: &ListArgs) -> Vec<Arc<T>>
where
    T: Facets + Send + Sync + 'static,
{
    if let Some(ref needle) = args.search {
        view.set_text(needle.as_str());
    }
    if !args.organizations.is_empty() {
        view.set_selected_organizations(args.organizations.iter().map(String::as_str));
    }
    view.displayed()
}

/// Split a slash-separated address into exactly `N` non-empty parts.
pub fn split_address<'a, const N: usize>(
    address: &'a str,
    form: &str,
) -> Result<[&'a str; N], CliError> {
    let parts: Vec<&str> = address.split('/').collect();
    let invalid = || CliError::Validation {
        field: "address".into(),
        reason: format!("expected {form}, got '{address}'"),
    };
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(invalid());
    }
    parts.try_into().map_err(|_| invalid())
}

/// `-` for a missing optional value in table cells.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

/// `None` for an empty string.
pub fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Comma-joined list, or `-` when there is nothing to show.
pub fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_owned()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn module_address_has_three_parts() {
        let [org, name, provider] = split_address::<3>("cie/vpc/aws", "org/name/provider").unwrap();
        assert_eq!((org, name, provider), ("cie", "vpc", "aws"));
    }

    #[test]
    fn wrong_part_count_is_a_validation_error() {
        let err = split_address::<2>("cie/vpc/aws", "org/name").unwrap_err();
        assert!(matches!(err, CliError::Validation { field, .. } if field == "address"));
        assert!(split_address::<2>("cie/", "org/name").is_err());
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("stable")), "stable");
        assert_eq!(or_dash(non_empty("")), "-");
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&["b".into(), "a".into()]), "b, a");
    }
}
