//! CLI for generating synthetic user batches as JSON.
//!
//! This binary delegates to `persona_data::users_cli` for parsing and
//! generation logic, keeping the CLI behaviour testable without spawning a
//! process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use persona_data::users_cli::{CliError, ParseOutcome, parse_args, run};

fn main() -> ExitCode {
    generate().map_or_else(
        |err| {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        },
        |()| ExitCode::SUCCESS,
    )
}

fn generate() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let rendered = run(&options)?;
            write_output(&rendered);
            Ok(())
        }
    }
}

fn print_usage(mut out: impl Write) {
    let usage = concat!(
        "Usage: persona-data-gen [options]\n",
        "\n",
        "Options:\n",
        "  --limit <n>          Number of user records to generate (default 1)\n",
        "  --gender <g>         Fix the gender: 'male' or 'female'\n",
        "  --seed <seed>        RNG seed for a reproducible batch\n",
        "  --birth <format>     Birth format: 'timestamp', 'mysql', or a d/m/y pattern\n",
        "  --language <lang>    Word-list language (default 'en')\n",
        "  --data-dir <path>    Base directory for word lists and templates\n",
        "  -h, --help           Print this help output\n",
    );
    if let Err(err) = out.write_all(usage.as_bytes()) {
        drop(err);
    }
}

fn write_output(rendered: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{rendered}") {
        drop(err);
    }
}
