use std::path::Path;

use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Persistence interface for the payload behind a frame.
///
/// The store never inspects payloads; it only asks the codec to write them under a name, read
/// them back, or clone one file into another.
pub trait PayloadCodec {
    /// In-memory payload type.
    type Payload;

    /// Read the payload stored at `path`.
    fn load(&self, path: &Path) -> FramesmithResult<Self::Payload>;

    /// Write `payload` to `path`, replacing any existing file.
    fn save(&self, payload: &Self::Payload, path: &Path) -> FramesmithResult<()>;

    /// Duplicate the file at `from` into `to`.
    fn copy(&self, from: &Path, to: &Path) -> FramesmithResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FramesmithError::io("copy", from, e))
    }
}

/// Image payloads through the `image` crate; the on-disk format follows the file extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCodec;

impl PayloadCodec for ImageCodec {
    type Payload = image::DynamicImage;

    fn load(&self, path: &Path) -> FramesmithResult<Self::Payload> {
        match image::open(path) {
            Ok(img) => Ok(img),
            Err(image::ImageError::IoError(e)) => Err(FramesmithError::io("read", path, e)),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("decode image '{}'", path.display()))
                .into()),
        }
    }

    fn save(&self, payload: &Self::Payload, path: &Path) -> FramesmithResult<()> {
        match payload.save(path) {
            Ok(()) => Ok(()),
            Err(image::ImageError::IoError(e)) => Err(FramesmithError::io("write", path, e)),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("encode image '{}'", path.display()))
                .into()),
        }
    }
}

/// Raw byte payloads, written and read back verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesCodec;

impl PayloadCodec for BytesCodec {
    type Payload = Vec<u8>;

    fn load(&self, path: &Path) -> FramesmithResult<Self::Payload> {
        std::fs::read(path).map_err(|e| FramesmithError::io("read", path, e))
    }

    fn save(&self, payload: &Self::Payload, path: &Path) -> FramesmithResult<()> {
        std::fs::write(path, payload).map_err(|e| FramesmithError::io("write", path, e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/codec.rs"]
mod tests;
