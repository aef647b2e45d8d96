// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging and hand over to
//   `cli::run`.
// - Every failure ends up here and is reported as `Error: <message>` on
//   stderr with exit status 1.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::process::exit;
use thoth_cli::{cli, trace};

fn main() {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                exit(1);
            }
        },
    };

    if args.command.is_none() {
        let _ = cli::Cli::command().print_help();
        exit(1);
    }

    trace::init_tracer(args.verbose);

    if let Err(err) = cli::run(args) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("Error: {err}");
        exit(1);
    }
}
