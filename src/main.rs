//! dot - inspect Substrate runtime metadata from the command line

use std::process::ExitCode;

use dotinspect::cli;
use dotinspect::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}
