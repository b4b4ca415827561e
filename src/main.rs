#[macro_use]
extern crate log;

mod configuration;
mod error;
mod reporter;
mod runner;

use log::LevelFilter;
use signal_hook::{iterator::Signals, SIGINT};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::{path::PathBuf, process::exit, thread};
use structopt::StructOpt;

use self::configuration::{
    command_line::{LogLevel, Opt},
    constants::exit_code,
    manifest::Manifest,
};
use self::error::Result;
use self::reporter::Reporter;
use self::runner::{RunStats, Runner};

fn main() {
    let mut options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.take().unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    ) {
        eprintln!("{}", e);
        exit(exit_code::RUNNER_FAILURE);
    }

    match Signals::new(&[SIGINT]) {
        Ok(signals) => {
            thread::spawn(move || {
                for sig in signals.forever() {
                    info!("Received signal {:?}, stopping", sig);
                    exit(exit_code::INTERRUPTED);
                }
            });
        }
        Err(e) => warn!("Cannot install signal handler {}", e),
    }

    match run(options) {
        Ok(stats) => exit(stats.exit_code()),
        Err(e) => {
            error!("{}", e);
            exit(exit_code::RUNNER_FAILURE);
        }
    }
}

fn run(options: Opt) -> Result<RunStats> {
    let manifest = match (options.config, options.options) {
        (Some(file), _) => Manifest::from(file)?,
        (None, Some(inline)) => Manifest::from_json(&inline)?,
        (None, None) => Manifest::default(),
    };
    debug!("Initiated configuration {:#?}", manifest);

    let input: Box<dyn BufRead> = match options.events {
        Some(path) => {
            info!("Reading events from {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    let mut runner = Runner::new(manifest);
    runner.subscribe(&mut reporter);
    runner.run(input)
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<()> {
    // stdout is reserved for the result line
    let mut dispatcher = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
