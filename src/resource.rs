use std::fmt;
use std::path::Path;

pub const ARCHIVE_EXTENSION: &str = "zip";

const PREFIX: &str = "twic";
const ARCHIVE_SUFFIX: &str = "g.zip";
const ENTRY_SUFFIX: &str = ".pgn";

/// Sequential issue number of a weekly archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(pub u32);

impl Identifier {
    pub fn archive_name(self) -> String {
        format!("{PREFIX}{self}{ARCHIVE_SUFFIX}")
    }

    pub fn entry_name(self) -> String {
        format!("{PREFIX}{self}{ENTRY_SUFFIX}")
    }

    /// Recovers the identifier from an archive file name such as `twic920g.zip`.
    pub fn from_archive_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix(PREFIX)?.strip_suffix(ARCHIVE_SUFFIX)?;
        if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Identifier)
    }

    pub fn from_archive_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::from_archive_name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Identifier(value)
    }
}

/// Everything needed to fetch and unpack one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: Identifier,
    pub archive_name: String,
    pub entry_name: String,
    pub url: String,
}

impl Resource {
    pub fn new(id: Identifier, base_url: &str) -> Self {
        let archive_name = id.archive_name();
        let url = if base_url.ends_with('/') {
            format!("{base_url}{archive_name}")
        } else {
            format!("{base_url}/{archive_name}")
        };
        Resource {
            id,
            entry_name: id.entry_name(),
            archive_name,
            url,
        }
    }
}
