use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// The fixed allow-list of playable formats. Detection is by file
/// extension only; file contents are never sniffed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Ogg,
    Wav,
    M4a,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 4] = [
        AudioFormat::Mp3,
        AudioFormat::Ogg,
        AudioFormat::Wav,
        AudioFormat::M4a,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Wav => "wav",
            AudioFormat::M4a => "m4a",
        }
    }

    /// Match the (case-insensitive) extension of `path` against the allow-list.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Extensions in the form file dialogs expect.
    pub fn extensions() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.extension()).collect()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn is_supported(path: &Path) -> bool {
    AudioFormat::from_path(path).is_some()
}

/// Result of turning user-picked paths into playlist entries.
#[derive(Debug, Default, PartialEq)]
pub struct Expanded {
    /// Supported files, in the order they should be appended.
    pub accepted: Vec<PathBuf>,
    /// Files skipped because their extension is not on the allow-list.
    pub skipped: usize,
}

/// Expand `inputs` into playable files: files are kept in the given order
/// when supported, directories are walked recursively and contribute their
/// supported files sorted by path.
pub fn expand_paths(inputs: &[PathBuf]) -> Expanded {
    let mut out = Expanded::default();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = Vec::new();
            for entry in WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if is_supported(path) {
                    found.push(path.to_path_buf());
                } else {
                    out.skipped += 1;
                }
            }
            found.sort();
            out.accepted.extend(found);
        } else if is_supported(input) {
            out.accepted.push(input.clone());
        } else {
            out.skipped += 1;
        }
    }

    out
}
