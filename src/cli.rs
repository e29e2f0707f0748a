use std::{ffi::OsString, path::PathBuf};
use clap::{ArgAction, Parser};
use libchmerge::requirements::{FFMPEG, SETFILE};

/// Join chaptered camera recordings into one file, keeping the original creation and modification
/// times
#[derive(Parser, Debug)]
#[command(name = "chmerge", author, version, about)]
pub struct Cli {
    /// Just print the plan and commands that would've been ran, do not modify filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Program used to concatenate the files
    #[arg(long, env = "CHMERGE_FFMPEG", default_value = FFMPEG)]
    pub ffmpeg: OsString,

    /// Program used to set the creation time
    #[arg(long, env = "CHMERGE_SETFILE", default_value = SETFILE)]
    pub setfile: OsString,

    /// Directory for temporary files (system default if not specified)
    #[arg(long, env = "CHMERGE_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// More logging, can be repeated
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Log only warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// File to output to
    pub output: Option<PathBuf>,

    /// Chapters to merge, in any order
    pub input: Vec<PathBuf>,
}
