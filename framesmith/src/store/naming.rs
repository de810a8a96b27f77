use std::path::{Path, PathBuf};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Literal inserted between stem and extension while a frame is being moved.
///
/// Stems and extensions never contain `-` while the token does, so a temporary name cannot
/// decode as a regular frame of any sequence sharing the directory.
pub const TEMP_TOKEN: &str = ".framesmith-tmp";

/// Delimiter between the index prefix and the stem.
pub const INDEX_DELIMITER: char = '-';

/// Directory, stem and extension shared by every frame of one sequence.
///
/// Stems must not contain `-`: the index is read back from the text before the first `-`, and
/// the store treats a stem carrying the delimiter as a configuration error instead of guessing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceIdentity {
    dir: PathBuf,
    stem: String,
    ext: String,
    frame_suffix: String,
    temp_suffix: String,
}

impl SequenceIdentity {
    /// Build an identity from its parts. `ext` may be given with or without its leading `.`.
    pub fn new(
        dir: impl Into<PathBuf>,
        stem: impl Into<String>,
        ext: &str,
    ) -> FramesmithResult<Self> {
        let stem = stem.into();
        validate_stem(&stem)?;
        let ext = normalize_ext(ext)?;
        let frame_suffix = format!("{stem}{ext}");
        let temp_suffix = format!("{stem}{TEMP_TOKEN}{ext}");
        Ok(Self {
            dir: dir.into(),
            stem,
            ext,
            frame_suffix,
            temp_suffix,
        })
    }

    /// Split a base output path (`dir/stem`, optionally already ending in `ext`) into an identity.
    pub fn from_base_path(base: &Path, ext: &str) -> FramesmithResult<Self> {
        let ext = normalize_ext(ext)?;
        let file_name = base
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                FramesmithError::configuration(format!(
                    "base output path '{}' has no usable file name",
                    base.display()
                ))
            })?;
        let stem = if !ext.is_empty() && file_name.len() > ext.len() {
            file_name.strip_suffix(ext.as_str()).unwrap_or(file_name)
        } else {
            file_name
        };
        let dir = match base.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::new(dir, stem, &ext)
    }

    /// Directory holding the frames.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stem shared by all frames.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension including its leading `.` (empty when frames carry none).
    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// Encode `idx` as a frame file name: `<idx>-<stem><ext>`.
    pub fn file_name(&self, idx: FrameIndex) -> String {
        format!("{}{INDEX_DELIMITER}{}", idx.0, self.frame_suffix)
    }

    /// Full path of the frame stored at `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(self.file_name(idx))
    }

    /// Temporary file name used while the frame at `idx` is in flight.
    pub fn temp_file_name(&self, idx: FrameIndex) -> String {
        format!("{}{INDEX_DELIMITER}{}", idx.0, self.temp_suffix)
    }

    /// Full temporary path for the frame at `idx`.
    pub fn temp_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(self.temp_file_name(idx))
    }

    /// Decode a frame file name produced by [`Self::file_name`].
    ///
    /// Returns `None` for anything else: other stems or extensions, temporary names,
    /// non-numeric or non-canonical (`007`, `+7`) prefixes.
    pub fn decode(&self, file_name: &str) -> Option<FrameIndex> {
        split_encoded(file_name, &self.frame_suffix)
    }

    /// Decode a temporary name produced by [`Self::temp_file_name`].
    pub fn decode_temp(&self, file_name: &str) -> Option<FrameIndex> {
        split_encoded(file_name, &self.temp_suffix)
    }
}

/// Parse the canonical decimal form of an index: ASCII digits only, no leading zeros.
pub fn parse_index(prefix: &str) -> Option<FrameIndex> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if prefix.len() > 1 && prefix.starts_with('0') {
        return None;
    }
    prefix.parse::<u64>().ok().map(FrameIndex)
}

/// Split a file name that looks like `<index>-<rest>` without knowing its stem.
///
/// Used to discover the identity of a sequence from the contents of a folder.
pub fn split_any(file_name: &str) -> Option<(FrameIndex, &str)> {
    let (prefix, rest) = file_name.split_once(INDEX_DELIMITER)?;
    if rest.is_empty() || rest.contains(TEMP_TOKEN) {
        return None;
    }
    Some((parse_index(prefix)?, rest))
}

fn split_encoded(file_name: &str, suffix: &str) -> Option<FrameIndex> {
    let (prefix, rest) = file_name.split_once(INDEX_DELIMITER)?;
    if rest != suffix {
        return None;
    }
    parse_index(prefix)
}

fn validate_stem(stem: &str) -> FramesmithResult<()> {
    if stem.is_empty() {
        return Err(FramesmithError::configuration("sequence stem must not be empty"));
    }
    if stem.contains(INDEX_DELIMITER) {
        return Err(FramesmithError::configuration(format!(
            "sequence stem '{stem}' must not contain '{INDEX_DELIMITER}'"
        )));
    }
    if stem.contains('/') || stem.contains('\\') {
        return Err(FramesmithError::configuration(format!(
            "sequence stem '{stem}' must not contain path separators"
        )));
    }
    Ok(())
}

fn normalize_ext(ext: &str) -> FramesmithResult<String> {
    if ext.contains('/') || ext.contains('\\') || ext.contains(INDEX_DELIMITER) {
        return Err(FramesmithError::configuration(format!(
            "invalid frame extension '{ext}'"
        )));
    }
    if ext.is_empty() || ext.starts_with('.') {
        Ok(ext.to_string())
    } else {
        Ok(format!(".{ext}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/naming.rs"]
mod tests;
