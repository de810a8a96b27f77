use std::path::{Path, PathBuf};

use crate::animation::ease::Ease;
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::timing::resample::TemporalBudget;

/// Where relative output paths are resolved.
///
/// Passed explicitly into whatever builds output paths; there is no process-wide default.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Folder prepended to relative paths. `None` resolves against the working directory.
    pub out_folder: Option<PathBuf>,
}

impl OutputConfig {
    /// Use `folder` for relative output paths. The folder must already exist.
    pub fn with_out_folder(folder: impl Into<PathBuf>) -> FramesmithResult<Self> {
        let cfg = Self {
            out_folder: Some(folder.into()),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that a configured folder exists.
    pub fn validate(&self) -> FramesmithResult<()> {
        if let Some(folder) = &self.out_folder
            && !folder.is_dir()
        {
            return Err(FramesmithError::configuration(format!(
                "out folder '{}' doesn't exist",
                folder.display()
            )));
        }
        Ok(())
    }

    /// Join a relative `path` onto the out folder; absolute paths pass through.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match &self.out_folder {
            Some(folder) if path.is_relative() => folder.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Options for opening a [`FrameStore`](crate::FrameStore).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOpts {
    /// Frame file extension, with or without the leading `.`.
    pub extension: String,
    /// Continue an existing sequence instead of overwriting it from index 0.
    pub recover_existing: bool,
}

impl Default for StoreOpts {
    fn default() -> Self {
        Self {
            extension: ".png".to_string(),
            recover_existing: false,
        }
    }
}

impl StoreOpts {
    /// Default options with recovery enabled.
    pub fn recovering() -> Self {
        Self {
            recover_existing: true,
            ..Self::default()
        }
    }
}

/// Options for turning a stored sequence into an animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOpts {
    /// Flat or eased timing.
    pub timing: TemporalBudget,
    /// Curve used when `timing.total_ms` is set.
    pub ease: Option<Ease>,
    /// Loop playback forever instead of playing once.
    pub loop_forever: bool,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            timing: TemporalBudget::default(),
            ease: Some(Ease::OutQuint),
            loop_forever: true,
        }
    }
}

/// JSON project file: `{ "output": {..}, "store": {..}, "animation": {..} }`.
///
/// Every section and field is optional.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Output folder settings.
    pub output: OutputConfig,
    /// Frame store settings.
    pub store: StoreOpts,
    /// Animation settings.
    pub animation: AnimationOpts,
}

impl ProjectConfig {
    /// Parse a project from JSON text and validate it.
    pub fn from_json_str(s: &str) -> FramesmithResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FramesmithError::configuration(format!("invalid project json: {e}")))?;
        cfg.output.validate()?;
        Ok(cfg)
    }

    /// Read and parse a project file.
    pub fn from_path(path: &Path) -> FramesmithResult<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| FramesmithError::io("read", path, e))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/project.rs"]
mod tests;
