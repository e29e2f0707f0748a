mod util;
mod operations;
pub mod error;
pub mod requirements;

pub use error::{Error, Result};
pub use requirements::{check_requirements, Toolchain};

pub use operations::chapter::{parse_file_name, ChapterKey};
pub use operations::times::{aggregate_times, get_file_times, FileTimes, TimeAggregate};
pub use operations::plan::{validate_inputs, InputFile, MergePlan};
pub use operations::concat::concat_files;
pub use operations::stamp::{stamp_creation, stamp_times};
pub use operations::merge::{merge_files, MergeOptions};
