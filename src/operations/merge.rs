use std::{fmt, path::{Path, PathBuf}};
use serde::Serialize;
use crate::error::{Error, Result};
use crate::requirements::Toolchain;
use crate::util::{command_extensions::*, PathExt};
use super::concat::{concat_command, concat_files};
use super::plan::{validate_inputs, MergePlan};
use super::stamp::{creation_command, stamp_creation, stamp_times};
use super::times::TimeAggregate;

/// Progress of a single merge, no stage is ever entered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeStage {
    Validating,
    Ordering,
    Concatenating,
    StampingCreation,
    StampingTimes,
    Done,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeStage::Validating => "validating",
            MergeStage::Ordering => "ordering",
            MergeStage::Concatenating => "concatenating",
            MergeStage::StampingCreation => "stamping creation time",
            MergeStage::StampingTimes => "stamping file times",
            MergeStage::Done => "done",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Just print the plan and commands that would've been ran, do not modify filesystem
    pub dry_run: bool,

    /// Directory for the concat list, system temp dir if not set
    pub temp_dir: Option<PathBuf>,

    /// Directory relative inputs are resolved against, current dir if not set
    pub working_dir: Option<PathBuf>,
}

/// What a dry run prints
#[derive(Serialize)]
struct DryRun<'a> {
    output: &'a Path,
    times: &'a TimeAggregate,
    plan: &'a MergePlan,
}

/// Merge chapters into `dest` and stamp it with the aggregated times
///
/// Inputs are ordered by their names, not the order given. The whole merge is aborted on the first
/// invalid input and nothing is written in that case. Relative `dest` and inputs are resolved
/// against the working directory of `options`
pub fn merge_files(
    tools: &Toolchain,
    options: &MergeOptions,
    dest: &Path,
    inputs: &[impl AsRef<Path>],
    times: &TimeAggregate,
) -> Result<MergePlan> {
    let mut merge = Merge {
        tools,
        options,
        dest: dest.to_path_buf(),
        stage: MergeStage::Validating,
    };

    let result = merge.run(inputs, times);

    // reporting the error is up to the caller
    match &result {
        Ok(plan) => tracing::info!("Merged {} files into {:?}", plan.len(), merge.dest),
        Err(x) => tracing::debug!(stage = %merge.stage, kind = x.kind(), "Merge failed"),
    }

    result
}

struct Merge<'a> {
    tools: &'a Toolchain,
    options: &'a MergeOptions,
    dest: PathBuf,
    stage: MergeStage,
}

impl Merge<'_> {
    fn enter(&mut self, stage: MergeStage) {
        tracing::debug!(%stage, "Merge stage");
        self.stage = stage;
    }

    fn run(&mut self, inputs: &[impl AsRef<Path>], times: &TimeAggregate) -> Result<MergePlan> {
        self.enter(MergeStage::Validating);

        let cwd = match &self.options.working_dir {
            Some(x) => x.clone(),
            None => std::env::current_dir().map_err(|x| Error::io("get working directory", x))?,
        };

        self.dest = self.dest.absolute_from(&cwd);
        let files = validate_inputs(inputs, &cwd)?;

        self.enter(MergeStage::Ordering);
        let plan = MergePlan::new(files);

        if self.options.dry_run {
            self.print_dry_run(&plan, times)?;
            self.enter(MergeStage::Done);
            return Ok(plan);
        }

        self.enter(MergeStage::Concatenating);
        tracing::info!("Merging {} files into {:?}", plan.len(), self.dest);
        concat_files(
            &self.tools.ffmpeg,
            &plan,
            times.earliest_creation,
            &self.dest,
            self.options.temp_dir.as_deref(),
        )?;

        self.enter(MergeStage::StampingCreation);
        stamp_creation(&self.tools.setfile, times.earliest_creation, &self.dest)?;

        self.enter(MergeStage::StampingTimes);
        stamp_times(&self.dest, times)?;

        self.enter(MergeStage::Done);
        Ok(plan)
    }

    fn print_dry_run(&self, plan: &MergePlan, times: &TimeAggregate) -> Result<()> {
        let report = DryRun { output: &self.dest, times, plan };
        println!("{}", serde_json::to_string_pretty(&report)?);

        let commands = [
            concat_command(&self.tools.ffmpeg, Path::new("<concat list>"), times.earliest_creation, &self.dest),
            creation_command(&self.tools.setfile, times.earliest_creation, &self.dest),
        ];
        for cmd in commands {
            println!("(CMD) {}", cmd.escaped_cmd());
        }

        Ok(())
    }
}
