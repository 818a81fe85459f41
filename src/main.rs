#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # grade-runner
//!
//! Builds and runs a gradle project from an instructor scaffold and a student
//! submission, then reports the result for the grading server.
//!
//! Run it from the directory holding the scaffold (`build.gradle`, `gradlew`,
//! `src/`, ...) and the `submission/` directory. Locally, pass the name of
//! the sibling directory holding `config.ini`; on the grading server the
//! configuration is read from the current directory.

use std::path::PathBuf;

use anyhow::Result;
use bpaf::*;
use dotenvy::dotenv;
use grade_runner::{
    config::{self, Environment, RuntimeConfig},
    java::{LineFilter, ProjectPaths},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Parsed command line.
#[derive(Debug, Clone)]
struct Cli {
    /// Forced environment, if any
    mode:             Option<Environment>,
    /// Directory holding the scaffold and submission
    root:             PathBuf,
    /// Use strict cross-test line filtering
    strict_repackage: bool,
    /// Log at debug level
    verbose:          bool,
    /// Delete the working directory and exit
    clean:            bool,
    /// Sibling directory with `config.ini` (local runs)
    project_dir:      Option<String>,
}

/// Parse the command line arguments and return a `Cli` struct
fn options() -> Cli {
    let mode = long("mode")
        .help("Run as `local` or `hosted` instead of detecting it from the directory")
        .argument::<Environment>("MODE")
        .optional();

    let root = long("root")
        .help("Directory holding the scaffold, submission/ and working/")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from("."));

    let strict_repackage = long("strict-repackage")
        .help("Only drop exact package statements when copying cross-tests")
        .switch();

    let verbose = short('v')
        .long("verbose")
        .help("Print debug logs to stderr")
        .switch();

    let clean = long("clean")
        .help("Delete the working directory and exit")
        .switch();

    let project_dir = positional::<String>("PROJECTDIR")
        .help("Project directory holding config.ini (required when running locally)")
        .optional();

    construct!(Cli {
        mode,
        root,
        strict_repackage,
        verbose,
        clean,
        project_dir
    })
    .to_options()
    .descr("Assemble, build and report a gradle-based Java submission")
    .run()
}

fn main() -> Result<()> {
    dotenv().ok();

    let cli = options();

    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(if cli.verbose { Level::DEBUG } else { Level::INFO });
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let paths = ProjectPaths::new(cli.root.clone());

    if cli.clean {
        return grade_runner::clean(&paths);
    }

    let environment = config::resolve_environment(cli.mode, &cli.root)?;
    tracing::debug!("Running in {environment} mode");

    if environment.is_local() && cli.project_dir.is_none() {
        println!("Usage: grade-runner <projectdir>");
        std::process::exit(1);
    }

    let line_filter = if cli.strict_repackage || config::strict_repackage_requested() {
        LineFilter::Strict
    } else {
        LineFilter::Loose
    };

    let runtime = RuntimeConfig::builder()
        .environment(environment)
        .paths(paths)
        .project_dir(cli.project_dir)
        .line_filter(line_filter)
        .build();

    grade_runner::run(&runtime)?;
    Ok(())
}
