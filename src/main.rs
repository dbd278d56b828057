#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # labgrade
//!
//! Grades a lab checkout in CI. Run it from the root of the student's
//! repository (checked out with full history so the HEAD commit time is
//! available):
//!
//! ```text
//! labgrade grade
//! ```
//!
//! Artifacts land in `artifacts/grade.csv` and `artifacts/feedback/README.md`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use labgrade::{
    assignment::{Assignment, songs_api},
    config::{CiEnv, GraderConfig},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Options for grading a checkout.
#[derive(Debug, Clone)]
struct GradeOpts {
    /// Root of the student's checkout.
    root:       PathBuf,
    /// Artifacts directory override.
    artifacts:  Option<PathBuf>,
    /// Rubric file replacing the built-in lab.
    rubric:     Option<PathBuf>,
    /// Also write `grade.json`.
    json:       bool,
    /// Print the marks breakdown to stderr.
    show_table: bool,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade a checkout
    Grade(GradeOpts),
    /// Print the active rubric as JSON
    Rubric(Option<PathBuf>),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses a rubric file path
    fn rubric_file() -> impl Parser<Option<PathBuf>> {
        long("rubric")
            .help("JSON rubric file to use instead of the built-in lab")
            .argument::<PathBuf>("FILE")
            .optional()
    }

    let root = long("root")
        .help("Root of the student's checkout")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from("."));
    let artifacts = long("artifacts")
        .help("Directory for grade.csv and feedback/ (default: <root>/artifacts)")
        .argument::<PathBuf>("DIR")
        .optional();
    let rubric = rubric_file();
    let json = long("json").help("Also write grade.json").switch();
    let show_table = long("table")
        .help("Print the marks breakdown to stderr")
        .switch();

    let grade = construct!(GradeOpts {
        root,
        artifacts,
        rubric,
        json,
        show_table
    })
    .to_options()
    .command("grade")
    .help("Grade the submission and write artifacts")
    .map(Cmd::Grade);

    let path = rubric_file();
    let show_rubric = construct!(Cmd::Rubric(path))
        .to_options()
        .command("rubric")
        .help("Print the active rubric as JSON");

    let cmd = construct!([grade, show_rubric]);

    cmd.to_options()
        .descr("Rule-based lab autograder")
        .run()
}

/// Loads the rubric file if one was given, else the built-in lab.
fn load_assignment(path: Option<&PathBuf>) -> Result<Assignment> {
    match path {
        Some(p) => Ok(Assignment::load(p)?),
        None => Ok(songs_api::assignment()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Grade(opts) => {
            let assignment = load_assignment(opts.rubric.as_ref())?;
            let config = GraderConfig::builder()
                .root_dir(opts.root)
                .maybe_artifacts_dir(opts.artifacts)
                .ci(CiEnv::from_env())
                .write_json(opts.json)
                .build();

            let assessment = labgrade::grade(&config, &assignment)
                .await
                .context("Grading failed")?;
            let report = &assessment.report;

            if opts.show_table {
                eprintln!("{}", report.breakdown_table());
            }
            println!(
                "{} Lab graded: {}/100 (status={})",
                "✔".green(),
                report.total_score,
                report.status.code()
            );
        }
        Cmd::Rubric(path) => {
            let assignment = load_assignment(path.as_ref())?;
            println!("{}", assignment.to_json()?);
        }
    };

    Ok(())
}
