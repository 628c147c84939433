//! Module command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;
use terrarium_core::{Catalog, ModuleEntry, ModuleMetadata};

use crate::cli::{GlobalOpts, ModulesArgs, ModulesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "Organization")]
    organization: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Maturity")]
    maturity: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<ModuleEntry>> for ModuleRow {
    fn from(m: &Arc<ModuleEntry>) -> Self {
        Self {
            organization: m.organization.clone(),
            name: m.name.clone(),
            provider: m.provider.clone(),
            maturity: util::or_dash(m.maturity.as_deref()),
            description: util::or_dash(m.description.as_deref()),
        }
    }
}

fn detail(meta: &ModuleMetadata, color: bool) -> String {
    let m = &meta.entry;
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&m.address(), color));
    let _ = writeln!(out, "  Description: {}", util::or_dash(m.description.as_deref()));
    let _ = writeln!(out, "  Maturity:    {}", util::or_dash(m.maturity.as_deref()));
    let _ = writeln!(out, "  Source:      {}", util::or_dash(util::non_empty(&m.source_url)));
    let _ = write!(out, "  Versions:    {}", util::join_or_dash(&meta.versions));
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ModulesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ModulesCommand::List(list) => {
            let mut view = catalog.module_view();
            util::load(&view).await?;
            let shown = util::apply_list_args(&mut view, &list);
            let out = output::render_list(
                &global.output_format(),
                &shown,
                |m| ModuleRow::from(m),
                |m| m.address(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModulesCommand::Info { address } => {
            let [org, name, provider] = util::split_address::<3>(&address, "org/name/provider")?;
            let meta = catalog.module_metadata(org, name, provider).await?;
            let color = output::should_color(&global.color_mode());
            let out = output::render_single(
                &global.output_format(),
                &meta,
                |m| detail(m, color),
                |m| m.entry.address(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ModuleMetadata {
        ModuleMetadata {
            entry: ModuleEntry {
                organization: "cie".into(),
                name: "vpc".into(),
                provider: "aws".into(),
                description: None,
                source_url: String::new(),
                maturity: Some("stable".into()),
            },
            versions: vec!["1.1.0".into(), "1.0.0".into()],
        }
    }

    #[test]
    fn detail_lists_versions_and_dashes_missing_fields() {
        let text = detail(&meta(), false);
        assert!(text.starts_with("cie/vpc/aws"));
        assert!(text.contains("Description: -"));
        assert!(text.contains("Source:      -"));
        assert!(text.contains("Versions:    1.1.0, 1.0.0"));
    }

    #[test]
    fn row_carries_maturity() {
        let row = ModuleRow::from(&Arc::new(meta().entry));
        assert_eq!(row.maturity, "stable");
        assert_eq!(row.description, "-");
    }
}
