//! Command dispatch: bridges CLI args -> catalog views -> output formatting.

pub mod config_cmd;
pub mod modules;
pub mod providers;
pub mod releases;
pub mod util;

use terrarium_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a registry-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Modules(args) => modules::handle(catalog, args, global).await,
        Command::Providers(args) => providers::handle(catalog, args, global).await,
        Command::Releases(args) => releases::handle(catalog, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
