//! CLI configuration: thin wrapper around `terrarium_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--url, --insecure, --timeout).

use std::time::Duration;

use clap::ValueEnum;
use terrarium_core::{BrowserConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use terrarium_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build a `BrowserConfig` from the config file, profile, and CLI overrides.
///
/// Flags beat the profile, the profile beats `[defaults]`. Without a profile
/// a `--url` alone is enough.
pub fn resolve_browser_config(global: &GlobalOpts) -> Result<BrowserConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let base = match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            let mut profile = profile.clone();
            if let Some(ref url) = global.url {
                profile.url.clone_from(url);
            }
            profile
        }
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            let url = global.url.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile::new(url)
        }
    };

    let mut browser = terrarium_config::profile_to_browser_config(&base, &cfg.defaults)?;
    apply_flag_overrides(&mut browser, global);
    Ok(browser)
}

/// Fill `--output` / `--color` from `[defaults]` when no flag or env var set them.
///
/// An unrecognized value in the file is logged and ignored.
pub fn apply_output_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = parse_default("output", &defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_default("color", &defaults.color);
    }
}

fn parse_default<T: ValueEnum>(key: &str, raw: &str) -> Option<T> {
    T::from_str(raw.trim(), true)
        .inspect_err(|e| tracing::warn!(key, value = raw, "ignoring config default: {e}"))
        .ok()
}

fn apply_flag_overrides(browser: &mut BrowserConfig, global: &GlobalOpts) {
    if global.insecure {
        browser.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        browser.timeout = Duration::from_secs(secs);
    }
}
