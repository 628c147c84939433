//! Release command handlers.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;
use terrarium_core::{Catalog, LoadState, ReleaseEntry, ReleaseLink, TimeWindow};

use crate::cli::{GlobalOpts, ListArgs, ReleasesArgs, ReleasesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReleaseRow {
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Type")]
    release_type: String,
    #[tabled(rename = "Organization")]
    organization: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Links")]
    links: String,
}

impl ReleaseRow {
    fn new(r: &Arc<ReleaseEntry>, color: bool) -> Self {
        Self {
            created: created_label(r),
            release_type: r.release_type.clone(),
            organization: r.organization.clone(),
            name: r.name.clone(),
            version: r.version.clone(),
            links: links_label(&r.links, color),
        }
    }
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Clone, Serialize, Tabled)]
struct WindowRow {
    #[tabled(rename = "Age")]
    age: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Hours")]
    hours: u64,
    #[tabled(rename = "Default")]
    #[serde(skip)]
    marker: &'static str,
}

fn created_label(r: &ReleaseEntry) -> String {
    r.created_at.map_or_else(
        || util::or_dash(util::non_empty(&r.created_at_raw)),
        |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// Link labels separated by commas; unusable links are dimmed and flagged.
fn links_label(links: &[ReleaseLink], color: bool) -> String {
    if links.is_empty() {
        return "-".into();
    }
    links
        .iter()
        .map(|link| {
            let label = link.label();
            if link.is_disabled() {
                output::dim(&format!("{label} (disabled)"), color)
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_window(age: Option<&str>) -> Result<Option<TimeWindow>, CliError> {
    age.map(|raw| {
        TimeWindow::from_str(raw.trim()).map_err(|_| CliError::Validation {
            field: "age".into(),
            reason: format!(
                "unknown window '{raw}', expected one of: {}",
                TimeWindow::iter()
                    .map(TimeWindow::token)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
    })
    .transpose()
}

fn facet_names(state: &LoadState<String>) -> Result<Vec<String>, CliError> {
    if let Some(err) = state.last_error() {
        return Err(err.clone().into());
    }
    Ok(state.base().iter().map(|s| s.as_ref().clone()).collect())
}

fn render_names(names: &[String], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output_format(),
        names,
        |n| NameRow { name: n.clone() },
        Clone::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ReleasesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReleasesCommand::List { list, age, types } => {
            list_releases(catalog, &list, age.as_deref(), &types, global).await
        }

        ReleasesCommand::Orgs => {
            let state = catalog.load_organizations().await;
            render_names(&facet_names(&state)?, global)
        }

        ReleasesCommand::Types => {
            let state = catalog.load_release_types().await;
            render_names(&facet_names(&state)?, global)
        }

        ReleasesCommand::Windows => {
            let default = catalog.config().default_window;
            let rows: Vec<WindowRow> = TimeWindow::iter()
                .map(|w| WindowRow {
                    age: w.token(),
                    label: w.label(),
                    hours: w.hours(),
                    marker: if w == default { "*" } else { "" },
                })
                .collect();
            let out = output::render_list(&global.output_format(), &rows, Clone::clone, |w| {
                w.age.to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn list_releases(
    catalog: &Catalog,
    list: &ListArgs,
    age: Option<&str>,
    types: &[String],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let window = parse_window(age)?;
    let mut view = catalog.release_view(window);
    tracing::debug!(window = ?view.time_window(), "listing releases");

    util::load(&view).await?;
    if !types.is_empty() {
        view.set_selected_types(types.iter().map(String::as_str));
    }
    let shown = util::apply_list_args(&mut view, list);

    let color = output::should_color(&global.color_mode());
    let out = output::render_list(
        &global.output_format(),
        &shown,
        |r| ReleaseRow::new(r, color),
        |r| format!("{}/{}@{}", r.organization, r.name, r.version),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
