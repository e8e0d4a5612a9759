use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;
use color_eyre::Result;
use mish::{config::MishConfig, parse::parse_command, MishExitStatus};
use tracing_subscriber::{prelude::*, EnvFilter};

#[macro_use]
extern crate tracing;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = MishConfig::load()?;

    // commands are forked from this thread, so write logs synchronously
    // instead of through a background worker
    let writer = tracing_appender::rolling::never(&config.log.directory, &config.log.file);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .with(tracing_error::ErrorLayer::default())
        .init();

    color_eyre::install()?;

    let args = Args::parse();

    let status = match args.command {
        Some(line) => run_line(&line).unwrap_or(MishExitStatus::SUCCESS),
        None => run_input(&config)?,
    };

    trace!(%status, "shutting down");

    let code = if status.is_request_exit() {
        MishExitStatus::SUCCESS.code()
    } else {
        status.code()
    };
    std::process::exit(code)
}

/// A line-oriented command interpreter.
///
/// Reads commands from standard input, one per line, until `exit`, `quit` or
/// end of input.
#[derive(Parser, Debug)]
#[command(name = "mish")]
#[command(version, about, long_about = None)]
struct Args {
    /// Run a single command line instead of reading standard input
    #[arg(short = 'c', value_name = "COMMAND")]
    command: Option<String>,
}

fn run_input(config: &MishConfig) -> Result<MishExitStatus> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then_some(config.prompt.as_str());
    let mut lines = stdin.lock().lines();
    let mut last = MishExitStatus::SUCCESS;

    loop {
        if let Some(prompt) = prompt {
            print!("{prompt}");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };

        match run_line(&line?) {
            Some(status) if status.is_request_exit() => break,
            Some(status) => last = status,
            None => {}
        }
    }

    Ok(last)
}

/// Parses and evaluates one line. Blank lines produce no status.
fn run_line(line: &str) -> Option<MishExitStatus> {
    match parse_command(line) {
        Ok(Some(command)) => {
            trace!(?command, "parsed command");
            let status = command.evaluate();
            debug!(%status, "command finished");
            Some(status)
        }
        Ok(None) => None,
        Err(err) => {
            warn!(%err, "failed to parse command");
            eprintln!("mish: {err}");
            Some(MishExitStatus::FAILURE)
        }
    }
}
