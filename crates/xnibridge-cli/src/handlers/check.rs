//! Health-check handler.
//!
//! Loads a library manifest, bootstraps the bridge over it and reports what
//! the probe found. Any failure maps to a non-zero exit code so the command
//! can gate service startup.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use xnibridge_core::{
    BridgeSettings, LibraryManifest, ProbeReport, SettingsUpdate, bootstrap, validate_settings,
};

use crate::commands::CheckArgs;
use crate::error::CliError;

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Execute the check command.
///
/// `args` already carries `XNIBRIDGE_*` values for flags that were not
/// given, so the environment is never validated on its own.
pub fn execute(args: &CheckArgs) -> Result<(), CliError> {
    let settings = resolve_settings(BridgeSettings::default(), args)?;
    let report = run(&args.manifest, &settings)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).map_err(|e| CliError::Output(e.to_string()))?;
        println!("{json}");
    } else {
        print_report(&report, &settings, std::io::stdout().is_terminal());
    }
    Ok(())
}

/// Apply flag overrides on top of `base`, then validate the result.
pub fn resolve_settings(
    mut base: BridgeSettings,
    args: &CheckArgs,
) -> Result<BridgeSettings, CliError> {
    base.merge(&SettingsUpdate {
        version_requirement: args.version_req.clone(),
        candidate: args.candidate.clone().map(Some),
        selection_mode: args.mode,
        required_capabilities: args.require,
    });
    validate_settings(&base)?;
    Ok(base)
}

/// Probe the library declared in `manifest` under `settings`.
pub fn run(manifest: &Path, settings: &BridgeSettings) -> Result<ProbeReport, CliError> {
    info!(manifest = %manifest.display(), version_req = %settings.version_requirement, "Running bridge health check");

    let library = Arc::new(LibraryManifest::load(manifest)?);
    let bridge = bootstrap(library, settings)?;
    Ok(bridge.probe_report().clone())
}

fn print_report(report: &ProbeReport, settings: &BridgeSettings, color: bool) {
    println!("{}", summary_line(&report.library, color));
    println!("  {:<14} {}", "reported", report.raw_version);
    println!("  {:<14} {}", "version", report.version);
    println!("  {:<14} {}", "requirement", settings.version_requirement);
    println!("  {:<14} {:?}", "capabilities", report.capabilities);
    println!("  {:<14} {}", "selection", settings.selection_mode);
}

fn summary_line(library: &str, color: bool) -> String {
    if color {
        format!("{GREEN}✓{RESET} {BOLD}{library}{RESET} is supported")
    } else {
        format!("✓ {library} is supported")
    }
}
