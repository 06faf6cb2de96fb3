mod cli;
mod core;
mod repl;

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, USAGE};
use crate::repl::Session;

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = run(
        std::env::args_os(),
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );
    process::exit(code);
}

/// Parses arguments, loads the catalog and runs the command loop.
/// Returns the process exit status.
fn run<A, T, R, W, E>(args: A, input: R, out: &mut W, err: &mut E) -> i32
where
    A: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(parse_err)
            if matches!(
                parse_err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = write!(out, "{}", parse_err.render());
            return 0;
        }
        Err(_) => {
            let _ = writeln!(err, "{USAGE}");
            return 1;
        }
    };

    setup_tracing(cli.verbose);

    let catalog = match crate::core::load_catalog(&cli.course_files) {
        Ok(catalog) => catalog,
        Err(load_err) => {
            let _ = writeln!(err, "{load_err}");
            return 1;
        }
    };
    tracing::info!(courses = catalog.len(), "catalog ready");

    let mut session = Session::new(catalog);
    if let Err(io_err) = session.run(input, out) {
        let _ = writeln!(err, "{io_err}");
        return 1;
    }
    0
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SCHEDULE_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
