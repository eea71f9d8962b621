use std::process::ExitCode;

use clap::Parser;
use hamqrg_cli::{CliArgs, HamqrgCli, Outcome};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let result = HamqrgCli::from_args("hamqrg", &args).and_then(|cli| cli.run(args));
    match result {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Denied) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
