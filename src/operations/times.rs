use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::error::{Error, Result};

/// Filesystem times of a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    /// Birth time, not every filesystem reports it
    pub created: Option<SystemTime>,
    pub modified: SystemTime,
}

impl FileTimes {
    pub fn read(path: &Path) -> Result<Self> {
        let stat_failure = |source| Error::StatFailure { path: path.to_path_buf(), source };

        let meta = fs::metadata(path).map_err(stat_failure)?;

        Ok(Self {
            // unsupported birth time is not an error for a single file
            created: meta.created().ok(),
            modified: meta.modified().map_err(stat_failure)?,
        })
    }
}

/// Seconds from 0001-01-01T00:00:00Z to the unix epoch
const YEAR_ONE_BEFORE_EPOCH: Duration = Duration::from_secs(62_135_596_800);

/// Zero value the modification time reduction starts from, earlier than any real file time
fn zero_time() -> SystemTime {
    SystemTime::UNIX_EPOCH
        .checked_sub(YEAR_ONE_BEFORE_EPOCH)
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Earliest creation and latest modification over a set of files, stamped onto the merged output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeAggregate {
    pub earliest_creation: DateTime<Utc>,
    pub latest_modification: DateTime<Utc>,
}

/// Read times of all files and reduce them into single aggregate
pub fn get_file_times(paths: &[impl AsRef<Path>]) -> Result<TimeAggregate> {
    let aggregate = aggregate_times(paths.iter().map(|x| {
        let path = x.as_ref();
        let times = FileTimes::read(path)?;

        tracing::trace!(?path, ?times, "Read file times");

        Ok(times)
    }))?;

    tracing::debug!(
        creation = %aggregate.earliest_creation,
        modification = %aggregate.latest_modification,
        "Aggregated times of {} files", paths.len()
    );

    Ok(aggregate)
}

/// Reduce file times, stops at the first error
///
/// Modification time is a running maximum starting at year 1, creation time is the minimum
/// of the files that report one
pub fn aggregate_times(times: impl IntoIterator<Item = Result<FileTimes>>) -> Result<TimeAggregate> {
    let mut oldest: Option<SystemTime> = None;
    let mut modified = zero_time();

    for x in times {
        let x = x?;

        if let Some(created) = x.created {
            if oldest.map_or(true, |oldest| created < oldest) {
                oldest = Some(created);
            }
        }

        if modified < x.modified {
            modified = x.modified;
        }
    }

    let oldest = oldest.ok_or(Error::MissingCreationTime)?;

    Ok(TimeAggregate {
        earliest_creation: oldest.into(),
        latest_modification: modified.into(),
    })
}
