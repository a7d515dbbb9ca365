//! Vellum binary entry point.
//!
//! Parses arguments and dispatches through [`vellum::cli`]. A failed run
//! prints `error: ...` on stderr and exits with the code of the
//! [`OpError`] class found in the error chain (see
//! `vellum::core::error::ErrorClass`), or 1 when the failure is outside
//! the taxonomy. Usage errors are reported by clap itself with exit
//! code 2 before any repository access.

use vellum::core::error::OpError;
use vellum::ui::output;

fn main() {
    if let Err(err) = vellum::cli::run() {
        output::error(format!("{err:#}"));
        std::process::exit(exit_code(&err));
    }
}

/// Exit code for a failed run.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<OpError>())
        .map(OpError::exit_code)
        .unwrap_or(1)
}
