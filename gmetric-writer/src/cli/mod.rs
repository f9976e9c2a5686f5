//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use std::{
    fs::File,
    io::{stdin, BufReader, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use argh::FromArgs;
use eyre::{eyre, Context, Result};
use log::{info, warn, LevelFilter};

use crate::{
    config::Settings,
    gmetric::{CommandRunner, DryRunRunner, GmetricWriter, ProcessRunner, WriteSummary},
    query::Query,
};

#[derive(FromArgs)]
/// Submit the numeric values of a query result to Ganglia, one gmetric call per value.
struct GmetricWriterArgs {
    /// writer settings file (JSON object with gmetricPath, gmondConfig, groupName, ...)
    #[argh(option, short = 's')]
    settings: Option<PathBuf>,

    /// query result file (JSON), read from stdin when absent or "-"
    #[argh(option, short = 'q')]
    query: Option<PathBuf>,

    /// kill gmetric calls still running after this many seconds
    #[argh(option)]
    command_timeout: Option<u64>,

    /// log the gmetric commands instead of running them
    #[argh(switch)]
    dry_run: bool,

    /// verbose output
    #[argh(switch, short = 'V')]
    verbose: bool,
}

pub fn main() -> Result<()> {
    let args: GmetricWriterArgs = argh::from_env();
    init_logger(args.verbose)?;

    let summary = run(&args)?;
    if summary.failed > 0 {
        warn!("{} gmetric call(s) failed", summary.failed);
    }
    Ok(())
}

fn init_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    stderrlog::new()
        .module("gmetric_writer")
        .verbosity(level)
        .init()
        .wrap_err("Unable to initialize logger")
}

fn run(args: &GmetricWriterArgs) -> Result<WriteSummary> {
    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => Settings::new(),
    };

    if args.dry_run {
        return write(&settings, args.query.as_deref(), DryRunRunner);
    }

    let runner = match args.command_timeout {
        Some(0) => return Err(eyre!("--command-timeout must be at least 1 second")),
        Some(secs) => ProcessRunner::with_timeout(Duration::from_secs(secs)),
        None => ProcessRunner::new(),
    };
    write(&settings, args.query.as_deref(), runner)
}

/// Settings are validated before the query is even read: a bad configuration never
/// results in a partial submission.
fn write<R: CommandRunner>(
    settings: &Settings,
    query_path: Option<&Path>,
    runner: R,
) -> Result<WriteSummary> {
    let writer =
        GmetricWriter::validate_setup(settings, runner).wrap_err("Invalid gmetric settings")?;

    let query = load_query(query_path)?;
    let summary = writer
        .write(&query)
        .wrap_err_with(|| eyre!("Unable to write results of {}", query.obj))?;

    info!(
        "{}: {} submitted, {} failed, {} skipped",
        query.obj, summary.submitted, summary.failed, summary.skipped
    );
    Ok(summary)
}

fn load_settings(path: &Path) -> Result<Settings> {
    let file = File::open(path)
        .wrap_err_with(|| eyre!("Unable to open settings file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| eyre!("Unable to parse settings file {}", path.display()))
}

fn load_query(path: Option<&Path>) -> Result<Query> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .wrap_err_with(|| eyre!("Unable to open query file {}", path.display()))?;
            parse_query(BufReader::new(file))
                .wrap_err_with(|| eyre!("Unable to parse query file {}", path.display()))
        }
        _ => parse_query(stdin().lock()).wrap_err("Unable to parse query from stdin"),
    }
}

fn parse_query<R: Read>(reader: R) -> Result<Query> {
    Ok(serde_json::from_reader(reader)?)
}
