use std::collections::HashSet;
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::error::{Error, Result};
use crate::util::PathExt;
use super::chapter::{parse_file_name, ChapterKey};

/// Validated input chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFile {
    /// Absolute path, unique within a merge
    pub path: PathBuf,
    pub file_number: u32,
    pub chapter_number: u32,
}

impl InputFile {
    pub fn key(&self) -> ChapterKey {
        ChapterKey {
            file_number: self.file_number,
            chapter_number: self.chapter_number,
        }
    }
}

/// Make every input absolute, reject duplicates and parse chapter numbers
///
/// Paths are compared lexically, two different paths to the same file (symlinks, hardlinks) are not
/// duplicates
pub fn validate_inputs(inputs: &[impl AsRef<Path>], cwd: &Path) -> Result<Vec<InputFile>> {
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }

    let mut seen = HashSet::new();
    let mut files = Vec::with_capacity(inputs.len());

    for input in inputs {
        let input = input.as_ref();
        let path = input.absolute_from(cwd);

        if !seen.insert(path.clone()) {
            return Err(Error::DuplicateInput(path));
        }

        let ChapterKey { file_number, chapter_number } = parse_file_name(input)?;
        files.push(InputFile { path, file_number, chapter_number });
    }

    Ok(files)
}

/// Input files in playback order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergePlan {
    files: Vec<InputFile>,
}

impl MergePlan {
    /// Order files by session then chapter, path breaks ties so the order never depends on input
    /// order
    pub fn new(mut files: Vec<InputFile>) -> Self {
        files.sort_by(|a, b| a.key().cmp(&b.key()).then_with(|| a.path.cmp(&b.path)));

        Self { files }
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Render the list in ffmpeg concat demuxer format
    pub fn manifest(&self) -> String {
        let mut list = String::new();
        for file in &self.files {
            list.push_str("file '");
            // quotes inside quoted string have to be closed, escaped and reopened
            list.push_str(&file.path.to_string_lossy().replace('\'', r"'\''"));
            list.push_str("'\n");
        }

        list
    }
}
