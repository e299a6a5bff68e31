use std::process::ExitCode;

use fisam_ledger::cli::{output, run_cli};

fn main() -> ExitCode {
    fisam_ledger::init();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("CLI error: {}", err));
            ExitCode::FAILURE
        }
    }
}
