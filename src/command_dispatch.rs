//! Purpose: Hold top-level CLI command dispatch for `nrfjprog-loader`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every command except `completion` writes one JSON document to stdout on success.
//! Invariants: `probe` always releases the library before reporting.

use super::*;
use nrfjprog_loader::api::{FIELDS, NrfjprogLibrary, SYMBOL_COUNT, SYMBOLS};

pub(super) fn dispatch_command(
    command: Command,
    config: &LoaderConfig,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "nrfjprog-loader", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_json(json!({
                "name": "nrfjprog-loader",
                "version": env!("CARGO_PKG_VERSION"),
            }));
            Ok(RunOutcome::ok())
        }
        Command::Symbols => {
            let symbols: Vec<Value> = FIELDS
                .iter()
                .zip(SYMBOLS)
                .map(|(field, name)| json!({ "field": field, "symbol": name }))
                .collect();
            emit_json(json!({ "count": SYMBOL_COUNT, "symbols": symbols }));
            Ok(RunOutcome::ok())
        }
        Command::Locate => {
            let mut library = NrfjprogLibrary::new(config);
            let path = library.locate()?.to_path_buf();
            emit_json(json!({
                "library": library.library_name(),
                "path": path.display().to_string(),
            }));
            Ok(RunOutcome::ok())
        }
        Command::Probe => {
            let mut library = NrfjprogLibrary::new(config);
            library.load_functions()?;
            let version = library.library_version();
            let path = library
                .library_path()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            library.release_library()?;
            let version = version?;

            emit_json(json!({
                "library": library.library_name(),
                "path": path,
                "symbols": SYMBOL_COUNT,
                "version": version,
                "version_string": version.to_string(),
            }));
            Ok(RunOutcome::ok())
        }
    }
}
