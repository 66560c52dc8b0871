//! fixnotes binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match fixnotes::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            fixnotes::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
