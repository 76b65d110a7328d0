// routinec: parse a Routine file and report what was found

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use routine::ast::Routine;
use routine::flags::FlagCache;
use routine::{full, structural, Pipeline, RecoveryMode, RoutineError};

/// Check Routine source files and dump their syntax trees
#[derive(Parser)]
#[command(name = "routinec", version)]
#[command(about = "Parses Routine scheduling scripts")]
struct Args {
    /// Routine source file
    file: PathBuf,

    /// Front end to run
    #[arg(long, value_enum, default_value_t = Pipeline::Full)]
    pipeline: Pipeline,

    /// Treat the whole file as a single condition expression
    #[arg(long)]
    condition: bool,

    /// Keep parsing after an error and report every failing block
    #[arg(long)]
    keep_going: bool,

    /// Print the tree as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// List the interned scheduling flags
    #[arg(long)]
    flags: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// What one parse produced, ready for printing.
struct Outcome {
    tree: Option<serde_json::Value>,
    summary: String,
    flags: FlagCache,
    errors: Vec<RoutineError>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    info!(file = %args.file.display(), bytes = source.len(), "parsing");

    let mode = if args.keep_going {
        RecoveryMode::Accumulate
    } else {
        RecoveryMode::FailFast
    };

    let outcome = if args.condition {
        parse_condition(&source)?
    } else {
        match args.pipeline {
            Pipeline::Structural => {
                let (graph, errors) = match mode {
                    RecoveryMode::FailFast => match structural::parse(&source) {
                        Ok(graph) => (Some(graph), Vec::new()),
                        Err(err) => (None, vec![err.into()]),
                    },
                    RecoveryMode::Accumulate => {
                        let (graph, errors) = structural::parse_recovering(&source);
                        (Some(graph), errors)
                    }
                };
                routine_outcome(graph, errors, "references")?
            }
            Pipeline::Full => {
                let (program, errors) = match mode {
                    RecoveryMode::FailFast => match full::parse(&source) {
                        Ok(program) => (Some(program), Vec::new()),
                        Err(err) => (None, vec![err]),
                    },
                    RecoveryMode::Accumulate => {
                        let (program, errors) = full::parse_recovering(&source);
                        (Some(program), errors)
                    }
                };
                routine_outcome(program, errors, "statements")?
            }
        }
    };

    report(&args, &outcome)?;

    if !outcome.errors.is_empty() {
        print_errors(&args.file, &outcome.errors);
        std::process::exit(1);
    }

    Ok(())
}

fn routine_outcome<T: Serialize>(
    routine: Option<Routine<Vec<T>>>,
    errors: Vec<RoutineError>,
    item: &str,
) -> Result<Outcome> {
    let mut flags = FlagCache::new();
    let (tree, summary) = match routine {
        Some(routine) => {
            flags.extend_from_routine(&routine);
            let items: usize = routine.blocks.iter().map(|block| block.body.len()).sum();
            let summary = format!(
                "{} scheduled blocks, {} {}, {} flags",
                routine.blocks.len(),
                items,
                item,
                flags.len()
            );
            (Some(serde_json::to_value(&routine)?), summary)
        }
        None => (None, String::new()),
    };

    Ok(Outcome {
        tree,
        summary,
        flags,
        errors,
    })
}

fn parse_condition(source: &str) -> Result<Outcome> {
    let (tree, summary, errors) = match full::parse_condition(source) {
        Ok(expr) => {
            let summary = format!("condition {}", expr);
            (Some(serde_json::to_value(&expr)?), summary, Vec::new())
        }
        Err(err) => (None, String::new(), vec![err]),
    };

    Ok(Outcome {
        tree,
        summary,
        flags: FlagCache::new(),
        errors,
    })
}

fn report(args: &Args, outcome: &Outcome) -> Result<()> {
    let Some(tree) = &outcome.tree else {
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(tree)?);
    } else {
        println!("{}: {}", args.file.display(), outcome.summary);
    }

    if args.flags {
        for (id, name) in outcome.flags.iter() {
            println!("{:>4} {}", id, name);
        }
    }

    Ok(())
}

fn print_errors(file: &Path, errors: &[RoutineError]) {
    debug!(count = errors.len(), "reporting errors");
    for err in errors {
        eprintln!("{}: {}", file.display(), err);
    }
}
