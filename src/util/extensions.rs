use std::path::{Component, Path, PathBuf};

pub type CommandExit = Result<(), u8>;

/// Simple extension trait to avoid duplicating code, allow easy conversion to an exit code
pub trait CommandOutputExt {
    /// Convert into exit code consistantly
    ///
    /// Equal to `Err(1)` in case of signal termination (or any exit code larger than 255)
    fn to_exitcode(&self) -> CommandExit;
}

impl CommandOutputExt for std::process::ExitStatus {
    fn to_exitcode(&self) -> CommandExit {
        // termination by signal has no code, and codes above 255 do not fit into u8 anyway
        match TryInto::<u8>::try_into(self.code().unwrap_or(1)).unwrap_or(1) {
            0 => Ok(()),
            x => Err(x),
        }
    }
}

impl CommandOutputExt for std::process::Output {
    fn to_exitcode(&self) -> CommandExit {
        self.status.to_exitcode()
    }
}

pub trait CommandExt {
    /// Render the command in readable and copy-able format
    fn escaped_cmd(&self) -> String;
}

impl CommandExt for std::process::Command {
    fn escaped_cmd(&self) -> String {
        let mut out = quote_arg(&self.get_program().to_string_lossy());
        for arg in self.get_args() {
            out.push(' ');
            out.push_str(&quote_arg(&arg.to_string_lossy()));
        }

        out
    }
}

/// Quote argument for POSIX shell only if it needs it
fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty() && arg.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '+' | ',')
    });

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

pub trait PathExt {
    /// Make path absolute against `cwd` and remove `.` and `..` components
    ///
    /// Purely lexical, symlinks are not resolved
    fn absolute_from(&self, cwd: &Path) -> PathBuf;
}

impl PathExt for Path {
    fn absolute_from(&self, cwd: &Path) -> PathBuf {
        let joined = if self.is_absolute() {
            self.to_path_buf()
        } else {
            cwd.join(self)
        };

        let mut out = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {},
                // popping the root is a no-op which is what we want for `/..`
                Component::ParentDir => { out.pop(); },
                x => out.push(x.as_os_str()),
            }
        }

        out
    }
}

impl PathExt for PathBuf {
    fn absolute_from(&self, cwd: &Path) -> PathBuf {
        self.as_path().absolute_from(cwd)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::process::Command;
    use super::{CommandExt, PathExt};

    #[test]
    fn path_ext_absolute_test() {
        let cwd = Path::new("/videos/trip");

        // relative path
        assert_eq!(
            Path::new("GH010042.MP4").absolute_from(cwd),
            Path::new("/videos/trip/GH010042.MP4"),
        );

        // already absolute
        assert_eq!(
            Path::new("/etc/GH010042.MP4").absolute_from(cwd),
            Path::new("/etc/GH010042.MP4"),
        );

        // dots are removed
        assert_eq!(
            Path::new("./raw/../GH010042.MP4").absolute_from(cwd),
            Path::new("/videos/trip/GH010042.MP4"),
        );

        // cannot go above root
        assert_eq!(
            Path::new("/../../GH010042.MP4").absolute_from(cwd),
            Path::new("/GH010042.MP4"),
        );
    }

    #[test]
    fn escaped_cmd_test() {
        let mut cmd = Command::new("SetFile");
        cmd.args(["-d", "01/02/2020 10:00:00", "/tmp/it's.mp4"]);

        assert_eq!(
            cmd.escaped_cmd(),
            r"SetFile -d '01/02/2020 10:00:00' '/tmp/it'\''s.mp4'",
        );
    }
}
