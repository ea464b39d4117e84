mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, survey};
use surveyor_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if let Err(e) = logging::init_logging() {
        eprintln!("failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    print::banner();
    let cfg = Config::default();

    let outcome = survey::survey(&commands.file_path, &cfg).await;

    print::end_of_program();
    outcome.into()
}
