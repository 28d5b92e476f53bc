// Entrypoint for the CLI.
// - Keeps `main` small: check prerequisites, read stdin if it is piped,
//   then hand everything to `RunSession`.
// - Per-item failures are reported by the session and never change the
//   exit code; only usage and setup problems do.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::debug;
use ompload::{
    api::HttpUploader,
    cli::Cli,
    clipboard::{self, SystemClipboard},
    config::{Settings, DEFAULT_PIPED_NAME},
    item::UploadItem,
    session::RunSession,
    ui::{OutputMode, Reporter},
    upload::{Orchestrator, RetryPolicy, ThreadSleep},
};
use std::io::{IsTerminal, Read};
use std::process::ExitCode;

fn main() -> ExitCode {
    // A clipboard holder child must not parse our CLI.
    match clipboard::run_holder_if_requested() {
        Ok(true) => return ExitCode::SUCCESS,
        Ok(false) => {}
        Err(_) => return ExitCode::FAILURE,
    }

    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::from_env().context("invalid configuration")?;
    debug!("{:?}", settings);

    let uploader = HttpUploader::new(&settings)
        .context("no HTTP transport available. Cannot continue")?;

    let piped_given = !std::io::stdin().is_terminal();
    if cli.files.is_empty() && !piped_given {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::FAILURE);
    }

    let piped = if piped_given {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("reading standard input")?;
        // Nothing was actually piped in (e.g. stdin is /dev/null).
        (!data.is_empty()).then(|| {
            let name = cli.filename.as_deref().unwrap_or(DEFAULT_PIPED_NAME);
            UploadItem::piped(data, name)
        })
    } else {
        None
    };

    if cli.files.is_empty() && piped.is_none() {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::FAILURE);
    }

    let clipboard = if cli.no_clip {
        None
    } else {
        SystemClipboard::probe()
    };

    let mode = OutputMode::from_flags(cli.quiet, cli.url);
    let orchestrator = Orchestrator::new(uploader, ThreadSleep, RetryPolicy::from_settings(&settings));
    let session = RunSession::new(orchestrator, clipboard, Reporter::stdio(mode), settings.max_file_size);

    let tally = session.run(&cli.files, piped);
    debug!("run finished with {} errors", tally.errors);

    Ok(ExitCode::SUCCESS)
}
