use std::process::ExitCode;

fn main() -> ExitCode {
    finledger::init();
    match finledger::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
