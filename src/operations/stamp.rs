use std::{fmt::Display, path::Path};
use chrono::{DateTime, Local, TimeZone, Utc};
use filetime::FileTime;
use crate::error::{Error, Result};
use crate::util::{self, command_extensions::*};
use super::times::TimeAggregate;

/// Date format accepted by `SetFile -d`
const SETFILE_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Render time for `SetFile`, which expects the time in the given (local) zone
pub fn setfile_date<Tz>(time: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(tz).format(SETFILE_DATE_FORMAT).to_string()
}

pub fn creation_command(setfile: &Path, creation_time: DateTime<Utc>, dest: &Path) -> Command {
    let mut cmd = Command::new(setfile);
    cmd.arg("-d")
        .arg(setfile_date(creation_time, &Local))
        .arg(dest);

    cmd
}

/// Set birth time of `dest` using the external tool
pub fn stamp_creation(setfile: &Path, creation_time: DateTime<Utc>, dest: &Path) -> Result<()> {
    tracing::info!("Setting creation time: {}", setfile_date(creation_time, &Local));

    util::run_tool(&mut creation_command(setfile, creation_time, dest))
        .map_err(|x| Error::TimestampApplyFailure {
            path: dest.to_path_buf(),
            reason: x.to_string(),
        })
}

/// Set access time to creation and modification time to latest modification
pub fn stamp_times(dest: &Path, times: &TimeAggregate) -> Result<()> {
    let atime = FileTime::from_system_time(times.earliest_creation.into());
    let mtime = FileTime::from_system_time(times.latest_modification.into());

    tracing::debug!(?dest, ?atime, ?mtime, "Setting file times");

    filetime::set_file_times(dest, atime, mtime)
        .map_err(|x| Error::TimestampApplyFailure {
            path: dest.to_path_buf(),
            reason: x.to_string(),
        })
}
