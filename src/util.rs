pub mod extensions;

use std::path::Path;
use crate::error::{Error, Result};
use command_extensions::*;

pub use extensions::PathExt;

#[allow(unused_imports)]
pub mod command_extensions {
    pub use std::process::Command;
    pub use super::extensions::{CommandExt, CommandOutputExt};
}

/// Name of the program for messages, `/opt/homebrew/bin/ffmpeg` is just `ffmpeg`
pub fn program_name(cmd: &Command) -> String {
    let program = Path::new(cmd.get_program());
    program.file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .to_string()
}

/// Run command to completion with output captured, failure carries the captured stderr
pub fn run_tool(cmd: &mut Command) -> Result<()> {
    let tool = program_name(cmd);

    tracing::debug!("Running: {}", cmd.escaped_cmd());

    let output = cmd.output()
        .map_err(|x| Error::tool(&tool, format!("could not be executed: {}", x), ""))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    match output.to_exitcode() {
        Ok(_) => {
            if !stderr.trim().is_empty() {
                tracing::debug!("{} stderr:\n{}", tool, stderr.trim_end());
            }

            Ok(())
        },
        Err(code) => {
            // some tools print their errors to stdout
            let diagnostics = if stderr.trim().is_empty() { stdout } else { stderr };

            Err(Error::tool(tool, format!("exited with code {}", code), diagnostics))
        },
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn program_name_test() {
        assert_eq!(program_name(&Command::new("/opt/homebrew/bin/ffmpeg")), "ffmpeg");
        assert_eq!(program_name(&Command::new("SetFile")), "SetFile");
    }

    #[test]
    fn run_tool_captures_diagnostics() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'no such stream' >&2; exit 3"]);

        match run_tool(&mut cmd) {
            Err(Error::ExternalToolFailure { tool, reason, diagnostics }) => {
                assert_eq!(tool, "sh");
                assert_eq!(reason, "exited with code 3");
                assert_eq!(diagnostics.trim(), "no such stream");
            },
            x => panic!("expected tool failure, got {:?}", x),
        }

        assert!(run_tool(Command::new("sh").args(["-c", "true"])).is_ok());
    }

    #[test]
    fn run_tool_missing_program() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            run_tool(&mut Command::new(dir.path().join("nonexistent"))),
            Err(Error::ExternalToolFailure { .. })
        ));
    }
}
