//! Tagging stage: overlay tag images on matched faces and write JPEGs.

use crate::compositor;
use crate::error::PipelineError;
use crate::label::{file_stem, source_image_name, tag_file_name, tagged_file_name};
use crate::types::IdentifiedFaces;
use crate::walk::{ensure_dir, list_files};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Quality used when the caller does not choose one.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

#[derive(Debug, Clone)]
pub struct TagOptions {
    /// Detection results written by the identifier.
    pub faces_dir: PathBuf,
    /// Source images, named `<stem>.jpg` after their result file.
    pub images_dir: PathBuf,
    /// Tag images, named `<identity>.jpg`.
    pub tags_dir: PathBuf,
    pub out_dir: PathBuf,
    pub jpeg_quality: u8,
}

impl TagOptions {
    pub fn new(
        faces_dir: impl Into<PathBuf>,
        images_dir: impl Into<PathBuf>,
        tags_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            faces_dir: faces_dir.into(),
            images_dir: images_dir.into(),
            tags_dir: tags_dir.into(),
            out_dir: out_dir.into(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

/// Read and decode an image, detecting the format from its contents.
fn load_image(path: &Path) -> Result<DynamicImage, PipelineError> {
    let data = std::fs::read(path).map_err(PipelineError::io(path))?;
    image::load_from_memory(&data).map_err(PipelineError::image(path))
}

/// Composite tags for every detection result and write `tagged_<stem>.jpg`.
///
/// A missing or undecodable tag for a matched face aborts the run before
/// that image's output is written. Returns the images written.
pub fn tag(opts: &TagOptions) -> Result<Vec<PathBuf>, PipelineError> {
    let files = list_files(&opts.faces_dir)?;
    ensure_dir(&opts.out_dir)?;
    tracing::info!(dir = %opts.faces_dir.display(), count = files.len(), "tagging");

    let mut written = Vec::with_capacity(files.len());
    for file in &files {
        let raw = std::fs::read(&file.path).map_err(PipelineError::io(&file.path))?;
        let identified: IdentifiedFaces =
            serde_json::from_slice(&raw).map_err(PipelineError::json(&file.path))?;

        let image_name = source_image_name(file_stem(&file.name));
        let background = load_image(&opts.images_dir.join(&image_name))?;

        let (canvas, placements) = compositor::compose(&background, &identified.faces, |name| {
            load_image(&opts.tags_dir.join(tag_file_name(name)))
        })?;

        let out_path = opts.out_dir.join(tagged_file_name(&image_name));
        let data = compositor::encode_jpeg(canvas, opts.jpeg_quality)
            .map_err(PipelineError::image(&out_path))?;
        std::fs::write(&out_path, data).map_err(PipelineError::io(&out_path))?;

        tracing::info!(image = %image_name, tags = placements.len(), "tagged");
        written.push(out_path);
    }

    Ok(written)
}
