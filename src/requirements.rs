//! Host capability checks, done once at startup.
//!
//! The result is a [`Toolchain`] with resolved program paths which is then passed to the merge, so
//! nothing downstream looks at `PATH` again.

use std::ffi::OsStr;
use std::path::PathBuf;
use crate::error::{Error, Result};

/// Default program used for concatenation
pub const FFMPEG: &str = "ffmpeg";

/// Default program used to set birth time
pub const SETFILE: &str = "SetFile";

/// Resolved external programs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub setfile: PathBuf,
}

impl Toolchain {
    /// Use the programs as they are, without any checks
    pub fn new(ffmpeg: impl Into<PathBuf>, setfile: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            setfile: setfile.into(),
        }
    }
}

/// Verify the platform supports birth times and both programs can be found
pub fn check_requirements(ffmpeg: impl AsRef<OsStr>, setfile: impl AsRef<OsStr>) -> Result<Toolchain> {
    check_platform()?;

    let ffmpeg = resolve_program(
        ffmpeg.as_ref(),
        "Please install it using Homebrew:\n\nbrew install ffmpeg",
    )?;

    let setfile = resolve_program(
        setfile.as_ref(),
        "Please install Command Line Tools:\n\nxcode-select --install",
    )?;

    tracing::debug!(?ffmpeg, ?setfile, "Requirements met");

    Ok(Toolchain { ffmpeg, setfile })
}

fn check_platform() -> Result<()> {
    if cfg!(target_os = "macos") {
        Ok(())
    } else {
        Err(Error::requirement(
            "this program is designed to run on macOS",
            "Setting file birth time requires SetFile which is only available on macOS",
        ))
    }
}

/// Find program on `PATH`, or check it directly if it is a path
fn resolve_program(program: &OsStr, hint: &str) -> Result<PathBuf> {
    which::which(program).map_err(|x| {
        tracing::debug!("Could not resolve {:?}: {}", program, x);
        Error::requirement(format!("{} is not installed", program.to_string_lossy()), hint)
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use super::*;

    #[cfg(unix)]
    #[test]
    fn resolve_program_on_path() {
        let sh = resolve_program(OsStr::new("sh"), "").unwrap();
        assert!(sh.is_absolute());
        assert!(sh.ends_with("sh"));
    }

    #[test]
    fn resolve_missing_program_has_hint() {
        match resolve_program(OsStr::new("chmerge-no-such-program"), "install it") {
            Err(Error::RequirementUnmet { requirement, hint }) => {
                assert_eq!(requirement, "chmerge-no-such-program is not installed");
                assert_eq!(hint, "install it");
            },
            x => panic!("expected unmet requirement, got {:?}", x),
        }
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn other_platforms_are_rejected() {
        assert!(matches!(
            check_requirements(FFMPEG, SETFILE),
            Err(Error::RequirementUnmet { .. })
        ));
    }
}
