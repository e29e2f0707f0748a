use std::path::Path;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::error::{Error, Result};

// chapter comes first in the name but file number is the session, so chapter varies fastest
static CHAPTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?x)
        (?:GH|GX)
        (?P<chapter>[0-9]{2})
        (?P<file>[0-9]{4})
        \.MP4
    "#).expect("Error building chapter name regex")
});

/// Ordering key encoded in the name of a chaptered recording, ex. `GX020137.MP4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterKey {
    /// Recording session the chapter belongs to
    pub file_number: u32,

    /// Position of the chapter in the session
    pub chapter_number: u32,
}

/// Parse file and chapter number from the base name of the path (case-insensitive)
pub fn parse_file_name(path: &Path) -> Result<ChapterKey> {
    let invalid = || Error::InvalidFilenameFormat(path.to_path_buf());

    let name = path.file_name()
        .ok_or_else(invalid)?
        .to_string_lossy()
        .to_uppercase();

    let captures = CHAPTER_RE.captures(&name).ok_or_else(invalid)?;

    // the regex guarantees ascii digits that fit, but do not panic on it
    let number = |group: &str| captures.name(group)
        .and_then(|x| x.as_str().parse::<u32>().ok())
        .ok_or_else(invalid);

    Ok(ChapterKey {
        chapter_number: number("chapter")?,
        file_number: number("file")?,
    })
}
