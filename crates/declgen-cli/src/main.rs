//! declgen CLI: replays the generation pipeline over project descriptions.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod project;

use anyhow::Context;
use args::CliArgs;
use clap::Parser;
use colored::Colorize;
use declgen::common::DiagnosticCategory;
use declgen::{DefaultRenderer, FileSink, Generator, LiteralParser, ModuleOutcome};
use project::ProjectDescription;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Debug, Default)]
struct Totals {
    generated: usize,
    skipped: usize,
    failed: usize,
}

impl Totals {
    fn absorb(&mut self, outcome: &ModuleOutcome) {
        self.generated += outcome.generated;
        self.skipped += outcome.skipped;
        self.failed += outcome.failed;
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let totals = run(&args);
    println!(
        "{} {} generated, {} skipped, {} failed",
        "declgen:".bold(),
        totals.generated.to_string().green(),
        totals.skipped,
        if totals.failed > 0 {
            totals.failed.to_string().red().to_string()
        } else {
            totals.failed.to_string()
        }
    );
    if totals.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &CliArgs) -> Totals {
    let mut totals = Totals::default();
    for path in collect_project_files(&args.inputs) {
        // A broken project description fails that project, not the run.
        match process_project(&path, args.out_dir.as_deref()) {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    report_diagnostics(outcome);
                    totals.absorb(outcome);
                }
            }
            Err(error) => {
                eprintln!("{} {error:#}", "error:".red().bold());
                totals.failed += 1;
            }
        }
    }
    totals
}

fn process_project(path: &Path, out_dir: Option<&Path>) -> anyhow::Result<Vec<ModuleOutcome>> {
    tracing::info!(project = %path.display(), "processing project description");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading project description {}", path.display()))?;
    let project: ProjectDescription = serde_json::from_str(&text)
        .with_context(|| format!("parsing project description {}", path.display()))?;

    let config = project.normalize_config();
    let parser = LiteralParser;
    let renderer = DefaultRenderer;
    let generator = Generator::new(
        &project.registry,
        &project.types,
        &parser,
        &renderer,
        &config,
    );

    // Modules are independent; process them in parallel with one sink per
    // module.
    let outcomes = project
        .modules
        .par_iter()
        .map(|module| {
            let mut sink = match out_dir {
                Some(directory) => FileSink::into_directory(directory.to_path_buf()),
                None => FileSink::beside_sources(),
            };
            generator.process_module(module, &mut sink)
        })
        .collect();
    Ok(outcomes)
}

fn report_diagnostics(outcome: &ModuleOutcome) {
    for diagnostic in &outcome.diagnostics {
        let rendered = diagnostic.to_string();
        match diagnostic.category {
            DiagnosticCategory::Error => eprintln!("{}", rendered.red()),
            DiagnosticCategory::Warning => eprintln!("{}", rendered.yellow()),
            DiagnosticCategory::Message => eprintln!("{rendered}"),
        }
    }
}

fn collect_project_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                match entry {
                    Ok(entry)
                        if entry.file_type().is_file()
                            && entry
                                .path()
                                .extension()
                                .is_some_and(|ext| ext.eq_ignore_ascii_case("json")) =>
                    {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(error) => {
                        tracing::warn!(%error, "cannot walk input directory entry");
                    }
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}
