//! JPEG persistence of captured images.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use streetsense_core::{CapturedImage, ImageSink, SinkError};
use streetsense_fs::{create_utf8_file, ensure_dir};

use crate::jpeg;

/// Sub-directory of the output directory holding captures.
pub const IMAGES_DIR: &str = "images";

/// Writes captures to `{output}/images/{lat}_{lon}_{heading}.jpg`.
///
/// The identifier returned for each image is its file name, which is what
/// the report lists in its `image_files` column.
#[derive(Debug, Clone)]
pub struct DirectoryImageSink {
    images_dir: Utf8PathBuf,
}

impl DirectoryImageSink {
    /// Create the images directory below `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created.
    pub fn create(output_dir: &Utf8Path) -> std::io::Result<Self> {
        let images_dir = output_dir.join(IMAGES_DIR);
        ensure_dir(&images_dir)?;
        Ok(Self { images_dir })
    }

    /// Directory the captures are written to.
    #[must_use]
    pub fn images_dir(&self) -> &Utf8Path {
        &self.images_dir
    }
}

impl ImageSink for DirectoryImageSink {
    fn persist(&self, image: &CapturedImage) -> Result<String, SinkError> {
        let file_name = image.file_name();
        let fail = |source: Box<dyn std::error::Error + Send + Sync>| SinkError::Persist {
            identifier: file_name.clone(),
            source,
        };
        let bytes = jpeg::encode(image.pixels()).map_err(|err| fail(Box::new(err)))?;
        let path = self.images_dir.join(&file_name);
        create_utf8_file(&path)
            .and_then(|mut file| file.write_all(&bytes))
            .map_err(|err| fail(Box::new(err)))?;
        debug!("stored {path}");
        Ok(file_name)
    }
}
