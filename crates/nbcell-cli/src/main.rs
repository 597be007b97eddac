//! nbcell CLI - Jupyter notebook to reStructuredText snippet converter
//!
//! Converts a notebook into a composite rST document and splits it into
//! numbered, cell-sized snippet files for Sphinx documentation.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use nbcell_cli::{run_convert, ConvertOptions, ConvertReport, PipelineError};
use nbcell_notebook::{load_notebook, Cell, NotebookError};
use std::io;
use std::path::PathBuf;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nbcell",
    about = "Convert Jupyter notebooks to reStructuredText cell snippets",
    long_about = "Convert a Jupyter notebook (.ipynb) into reStructuredText and split it\n\
                  into numbered snippet files, one per cell, with code cells grouped\n\
                  with their outputs. Snippets can then be embedded individually in\n\
                  Sphinx documentation.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a notebook and split it into numbered snippet files
    #[command(long_about = "Convert a notebook to reStructuredText, then split the result\n\
                      into one {prefix}{n}.rst file per cell (code cells keep their\n\
                      outputs). By default the intermediate composite .rst file is\n\
                      deleted after splitting; pass --keep to retain it.")]
    Convert {
        /// Path to the Jupyter notebook (.ipynb) to convert
        #[arg(short, long, value_name = "PATH")]
        notebook: PathBuf,

        /// Prefix for the snippet files ({prefix}{n}.rst)
        #[arg(long, value_name = "PREFIX", default_value = "cell-")]
        prefix: String,

        /// Keep the composite .rst file after splitting
        #[arg(long)]
        keep: bool,

        /// Directory receiving the composite, assets and snippets
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Inspect notebook metadata and cells without converting
    #[command(long_about = "Show notebook metadata (kernel, language, title, authors) and a\n\
                      per-cell summary without writing any output files.")]
    Info {
        /// Path to the Jupyter notebook (.ipynb) to inspect
        #[arg(short, long, value_name = "PATH")]
        notebook: PathBuf,

        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for nbcell.\n\
                      \n\
                      Examples:\n\
                        nbcell completion bash > /usr/local/etc/bash_completion.d/nbcell\n\
                        nbcell completion zsh > ~/.zsh/completions/_nbcell")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    let default_filter = if verbosity.is_verbose() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.command {
        Commands::Convert {
            notebook,
            prefix,
            keep,
            output_dir,
        } => convert_command(notebook, prefix, keep, output_dir, verbosity),
        Commands::Info { notebook, json } => info_command(&notebook, json),
        Commands::Completion { shell } => completion_command(shell),
    }
}

/// Run the conversion pipeline and report the outcome
fn convert_command(
    notebook: PathBuf,
    prefix: String,
    keep: bool,
    output_dir: PathBuf,
    verbosity: Verbosity,
) -> Result<()> {
    let options = ConvertOptions {
        notebook,
        prefix,
        keep,
        output_dir,
    };

    let report = match run_convert(&options) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            if matches!(&err, PipelineError::Load(NotebookError::NotFound(_))) {
                eprintln!(
                    "{} Check that the notebook path is correct and the file exists",
                    "Help:".cyan().bold()
                );
            }
            return Err(err.into());
        }
    };

    if verbosity.should_show_output() {
        print_report(&options, &report, verbosity);
    }

    Ok(())
}

/// Success summary for the convert command
fn print_report(options: &ConvertOptions, report: &ConvertReport, verbosity: Verbosity) {
    println!(
        "{} {} ({} cell(s)) into {} snippet(s) with prefix '{}'",
        "Converted".green().bold(),
        options.notebook.display(),
        report.cells,
        report.snippets.len(),
        options.prefix
    );
    if report.composite_kept {
        println!("Composite kept at {}", report.composite_path.display());
    }
    if !report.assets.is_empty() {
        println!("{} image asset(s) extracted", report.assets.len());
    }
    if verbosity.is_verbose() {
        for path in report.snippets.iter().chain(report.assets.iter()) {
            println!("  {}", path.display());
        }
    }
}

/// Show notebook metadata and a per-cell summary
fn info_command(notebook_path: &PathBuf, json: bool) -> Result<()> {
    let notebook = match load_notebook(notebook_path) {
        Ok(notebook) => notebook,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            return Err(err.into());
        }
    };

    if json {
        let cells: Vec<serde_json::Value> = notebook
            .cells
            .iter()
            .map(|cell| {
                let execution_count = match cell {
                    Cell::Code {
                        execution_count, ..
                    } => *execution_count,
                    _ => None,
                };
                serde_json::json!({
                    "kind": cell.kind(),
                    "execution_count": execution_count,
                    "outputs": cell.outputs().len(),
                })
            })
            .collect();
        let value = serde_json::json!({
            "path": notebook_path.display().to_string(),
            "kernel": notebook.metadata.kernel_name,
            "language": notebook.metadata.language_name,
            "title": notebook.metadata.title,
            "authors": notebook.metadata.authors,
            "cells": cells,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Notebook: {}", notebook_path.display());
    if let Some(kernel) = &notebook.metadata.kernel_name {
        println!("Kernel: {kernel}");
    }
    if let Some(language) = &notebook.metadata.language_name {
        println!("Language: {language}");
    }
    if let Some(title) = &notebook.metadata.title {
        println!("Title: {title}");
    }
    if !notebook.metadata.authors.is_empty() {
        println!("Authors: {}", notebook.metadata.authors.join(", "));
    }
    println!("Cells: {}", notebook.cells.len());

    if !notebook.cells.is_empty() {
        println!();
        println!("{:<5} {:<10} {:<6} {:<8}", "#", "KIND", "EXEC", "OUTPUTS");
        println!("{}", "-".repeat(32));
        for (i, cell) in notebook.cells.iter().enumerate() {
            let exec = match cell {
                Cell::Code {
                    execution_count: Some(count),
                    ..
                } => count.to_string(),
                _ => "-".to_string(),
            };
            println!(
                "{:<5} {:<10} {:<6} {:<8}",
                i + 1,
                cell.kind(),
                exec,
                cell.outputs().len()
            );
        }
    }

    Ok(())
}

/// Generate shell completions on stdout
fn completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Args::command();
    generate(shell, &mut cmd, "nbcell", &mut io::stdout());
    Ok(())
}
