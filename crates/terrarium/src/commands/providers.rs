//! Provider command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;
use terrarium_core::{Catalog, ProviderEntry, ProviderMetadata};

use crate::cli::{GlobalOpts, ProvidersArgs, ProvidersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "Organization")]
    organization: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Maturity")]
    maturity: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&Arc<ProviderEntry>> for ProviderRow {
    fn from(p: &Arc<ProviderEntry>) -> Self {
        Self {
            organization: p.organization.clone(),
            name: p.name.clone(),
            maturity: util::or_dash(p.maturity.as_deref()),
            source: util::or_dash(util::non_empty(&p.source_url)),
        }
    }
}

fn detail(meta: &ProviderMetadata, color: bool) -> String {
    let p = &meta.entry;
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&p.address(), color));
    let _ = writeln!(out, "  Description: {}", util::or_dash(p.description.as_deref()));
    let _ = writeln!(out, "  Maturity:    {}", util::or_dash(p.maturity.as_deref()));
    let _ = writeln!(out, "  Source:      {}", util::or_dash(util::non_empty(&p.source_url)));
    let _ = write!(out, "  Versions:    {}", util::join_or_dash(&meta.versions));
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ProvidersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProvidersCommand::List(list) => {
            let mut view = catalog.provider_view();
            util::load(&view).await?;
            let shown = util::apply_list_args(&mut view, &list);
            let out = output::render_list(
                &global.output_format(),
                &shown,
                |p| ProviderRow::from(p),
                |p| p.address(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProvidersCommand::Info { address } => {
            let [org, name] = util::split_address::<2>(&address, "org/name")?;
            let meta = catalog.provider_metadata(org, name).await?;
            let color = output::should_color(&global.color_mode());
            let out = output::render_single(
                &global.output_format(),
                &meta,
                |p| detail(p, color),
                |p| p.entry.address(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
