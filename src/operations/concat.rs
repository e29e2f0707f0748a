use std::{io::Write, path::Path};
use chrono::{DateTime, SecondsFormat, Utc};
use tempfile::NamedTempFile;
use crate::error::{Error, Result};
use crate::util::{self, command_extensions::*};
use super::plan::MergePlan;

/// Metadata stream of the recording device, its tag is lost unless set explicitly
const METADATA_TAG: &str = "gpmd";

/// Build the ffmpeg command that concatenates files listed in `list_file` into `dest`
pub fn concat_command(ffmpeg: &Path, list_file: &Path, creation_time: DateTime<Utc>, dest: &Path) -> Command {
    let mut cmd = Command::new(ffmpeg);
    cmd.args([
            // print only errors
            "-loglevel", "error",

            "-f", "concat",

            // paths in the list are absolute
            "-safe", "0",

            // use following file for the concat list
            "-i"
        ])
        .arg(list_file)
        .args([
            // no re-encoding
            "-c", "copy",

            // do not ask to overwrite
            "-y",

            // video is required, audio and device metadata only if the source has them
            "-map", "0:v",
            "-map", "0:a?",
            "-map", "0:3?",
            "-copy_unknown",

            "-tag:2", METADATA_TAG,

            "-metadata",
        ])
        .arg(format!("creation_time={}", creation_time.to_rfc3339_opts(SecondsFormat::Secs, true)))
        .arg(dest);

    cmd
}

/// Write the manifest into a temporary file, removed when dropped
pub fn write_manifest(plan: &MergePlan, temp_dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("chmerge-").suffix(".txt");

    let mut list_file = match temp_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }.map_err(|x| Error::io("create temp file", x))?;

    list_file.write_all(plan.manifest().as_bytes())
        .and_then(|_| list_file.flush())
        .map_err(|x| Error::io(format!("write to {:?}", list_file.path()), x))?;

    Ok(list_file)
}

/// Concatenate the files without re-encoding, embeds `creation_time` into the container
///
/// Failure is never retried as partial output may already exist
pub fn concat_files(
    ffmpeg: &Path,
    plan: &MergePlan,
    creation_time: DateTime<Utc>,
    dest: &Path,
    temp_dir: Option<&Path>,
) -> Result<()> {
    let list_file = write_manifest(plan, temp_dir)?;

    tracing::debug!("Concat list {:?}:\n{}", list_file.path(), plan.manifest().trim_end());

    let result = util::run_tool(&mut concat_command(ffmpeg, list_file.path(), creation_time, dest));

    // explicit close so a failure to remove the list is at least logged
    if let Err(x) = list_file.close() {
        tracing::warn!("Could not remove concat list: {}", x);
    }

    result
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};
    use chrono::{TimeZone, Utc};
    use crate::operations::plan::{validate_inputs, MergePlan};
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args().map(|x| x.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn concat_command_test() {
        let creation = Utc.with_ymd_and_hms(2020, 1, 1, 8, 30, 0).unwrap();
        let cmd = concat_command(Path::new("ffmpeg"), Path::new("/tmp/list.txt"), creation, Path::new("out.mp4"));

        assert_eq!(cmd.get_program(), "ffmpeg");
        assert_eq!(
            args(&cmd),
            [
                "-loglevel", "error",
                "-f", "concat", "-safe", "0", "-i", "/tmp/list.txt",
                "-c", "copy", "-y",
                "-map", "0:v", "-map", "0:a?", "-map", "0:3?", "-copy_unknown",
                "-tag:2", "gpmd",
                "-metadata", "creation_time=2020-01-01T08:30:00Z",
                "out.mp4",
            ]
        );
    }

    #[test]
    fn manifest_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let plan = MergePlan::new(validate_inputs(&["GH020001.MP4", "GH010001.MP4"], Path::new("/videos")).unwrap());

        let list_file = write_manifest(&plan, Some(dir.path())).unwrap();
        let path = list_file.path().to_path_buf();

        assert!(path.starts_with(dir.path()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "file '/videos/GH010001.MP4'\nfile '/videos/GH020001.MP4'\n"
        );

        drop(list_file);
        assert!(!path.exists());
    }
}
