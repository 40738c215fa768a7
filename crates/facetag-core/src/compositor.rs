//! Tag compositing: draw each matched identity's tag image over its face.
//!
//! A tag is drawn at its own native size with its top-left corner on the
//! face rectangle's top-left corner. The face's width and height are not
//! used. Pixels are copied as-is (source replace, no alpha blending) and
//! anything falling outside the canvas is clipped.

use facebox_client::{Face, FaceRect};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ExtendedColorType, ImageEncoder, ImageError, RgbaImage};

/// Destination rectangle of one tag on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPlacement {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

impl TagPlacement {
    /// Anchor a `tag_width` x `tag_height` tag at the face's top-left corner.
    pub fn for_face(rect: &FaceRect, tag_width: u32, tag_height: u32) -> Self {
        Self {
            left: i64::from(rect.left),
            top: i64::from(rect.top),
            width: tag_width,
            height: tag_height,
        }
    }

    /// Whether the placement lies entirely inside a `width` x `height` canvas.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.left + i64::from(self.width) <= i64::from(width)
            && self.top + i64::from(self.height) <= i64::from(height)
    }
}

/// An RGBA canvas pre-filled with the background's pixels.
pub fn new_canvas(background: &DynamicImage) -> RgbaImage {
    background.to_rgba8()
}

/// Copy `tag` onto `canvas` at the face's top-left corner, clipping to the canvas.
pub fn stamp(canvas: &mut RgbaImage, tag: &RgbaImage, rect: &FaceRect) -> TagPlacement {
    let placement = TagPlacement::for_face(rect, tag.width(), tag.height());
    if !placement.fits_within(canvas.width(), canvas.height()) {
        tracing::warn!(
            left = placement.left,
            top = placement.top,
            width = placement.width,
            height = placement.height,
            canvas_width = canvas.width(),
            canvas_height = canvas.height(),
            "tag extends past the canvas; clipping"
        );
    }
    imageops::replace(canvas, tag, placement.left, placement.top);
    placement
}

/// Composite the tags of all matched faces over `background`.
///
/// `load_tag` is called with the face's identity name once per matched
/// face; its first error aborts compositing. Unmatched faces are skipped.
pub fn compose<E>(
    background: &DynamicImage,
    faces: &[Face],
    mut load_tag: impl FnMut(&str) -> Result<DynamicImage, E>,
) -> Result<(RgbaImage, Vec<TagPlacement>), E> {
    let mut canvas = new_canvas(background);
    let mut placements = Vec::new();

    for face in faces.iter().filter(|f| f.matched) {
        let tag = load_tag(&face.name)?.to_rgba8();
        let placement = stamp(&mut canvas, &tag, &face.rect);
        tracing::debug!(name = %face.name, ?placement, "tag drawn");
        placements.push(placement);
    }

    Ok((canvas, placements))
}

/// Encode the canvas as baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(canvas: RgbaImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100)).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buffer)
}
