mod cli;
mod logging;

use std::{path::{Path, PathBuf}, process::ExitCode};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use libchmerge::{MergeOptions, Toolchain};

fn main() -> ExitCode {
    let cli_args = cli::Cli::parse();

    // not enough to do anything, same as asking for help
    let (output, input) = match cli_args.output {
        Some(ref output) if !cli_args.input.is_empty() => (output.clone(), cli_args.input.clone()),
        _ => {
            // nothing useful can be done if printing help fails
            let _ = cli::Cli::command().print_help();
            return ExitCode::SUCCESS;
        },
    };

    logging::init_tracing(cli_args.verbose, cli_args.quiet);

    match merge_cmd(&cli_args, &output, &input) {
        Ok(_) => ExitCode::SUCCESS,
        Err(x) => {
            eprintln!("{:#}", x);
            ExitCode::FAILURE
        },
    }
}

fn merge_cmd(args: &cli::Cli, output: &Path, input: &[PathBuf]) -> Result<()> {
    // nothing is ran in dry run so the tools do not have to exist
    let tools = if args.dry_run {
        Toolchain::new(&args.ffmpeg, &args.setfile)
    } else {
        libchmerge::check_requirements(&args.ffmpeg, &args.setfile)?
    };

    let times = libchmerge::get_file_times(input)
        .context("Error getting file times")?;

    let options = MergeOptions {
        dry_run: args.dry_run,
        temp_dir: args.temp_dir.clone(),
        working_dir: None,
    };

    libchmerge::merge_files(&tools, &options, output, input, &times)
        .context("Error merging files")?;

    if !args.dry_run {
        println!("Files merged successfully");
    }

    Ok(())
}
