mod common;

use common::write_jpeg;
use facebox_client::{Face, FaceRect};
use facetag_core::compositor::{encode_jpeg, new_canvas};
use facetag_core::{tag, IdentifiedFaces, PipelineError, TagOptions};
use std::path::Path;
use tempfile::TempDir;

struct Dirs {
    faces: TempDir,
    images: TempDir,
    tags: TempDir,
    out: TempDir,
}

impl Dirs {
    fn new() -> Self {
        Self {
            faces: tempfile::tempdir().unwrap(),
            images: tempfile::tempdir().unwrap(),
            tags: tempfile::tempdir().unwrap(),
            out: tempfile::tempdir().unwrap(),
        }
    }

    fn options(&self) -> TagOptions {
        TagOptions::new(
            self.faces.path(),
            self.images.path(),
            self.tags.path(),
            self.out.path(),
        )
    }

    fn write_result(&self, stem: &str, faces: Vec<Face>) {
        let data = serde_json::to_vec(&IdentifiedFaces::from_faces(faces)).unwrap();
        std::fs::write(self.faces.path().join(format!("{stem}.json")), data).unwrap();
    }
}

fn alice(matched: bool) -> Face {
    Face {
        rect: FaceRect { top: 10, left: 20, width: 50, height: 50 },
        id: "alice1.jpg".into(),
        name: "alice".into(),
        matched,
    }
}

/// The background decoded and re-encoded with no tags applied.
fn undecorated(path: &Path) -> Vec<u8> {
    let background = image::open(path).unwrap();
    encode_jpeg(new_canvas(&background), facetag_core::DEFAULT_JPEG_QUALITY).unwrap()
}

fn is_close(actual: [u8; 3], expected: [u8; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (i16::from(*a) - i16::from(*e)).abs() <= 24)
}

#[test]
fn matched_face_gets_tag_at_native_size() {
    let dirs = Dirs::new();
    write_jpeg(&dirs.images.path().join("party.jpg"), 128, 128, [0, 0, 0]);
    write_jpeg(&dirs.tags.path().join("alice.jpg"), 32, 32, [255, 255, 255]);
    dirs.write_result("party", vec![alice(true)]);

    let written = tag(&dirs.options()).unwrap();
    assert_eq!(written, vec![dirs.out.path().join("tagged_party.jpg")]);

    let out = image::open(&written[0]).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (128, 128));
    // Center of the tag: (20 + 16, 10 + 16).
    assert!(is_close(out.get_pixel(36, 26).0, [255, 255, 255]));
    // Inside the face rectangle, outside the 32x32 tag.
    assert!(is_close(out.get_pixel(64, 54).0, [0, 0, 0]));
    assert!(is_close(out.get_pixel(100, 100).0, [0, 0, 0]));
}

#[test]
fn unmatched_face_leaves_image_undecorated() {
    let dirs = Dirs::new();
    let image_path = dirs.images.path().join("street.jpg");
    write_jpeg(&image_path, 64, 48, [40, 120, 200]);
    // No tag file exists; an unmatched face must not try to load one.
    dirs.write_result("street", vec![alice(false)]);

    let written = tag(&dirs.options()).unwrap();
    assert_eq!(std::fs::read(&written[0]).unwrap(), undecorated(&image_path));
}

#[test]
fn zero_faces_reencodes_background() {
    let dirs = Dirs::new();
    let image_path = dirs.images.path().join("empty.jpg");
    write_jpeg(&image_path, 40, 30, [90, 90, 90]);
    std::fs::write(
        dirs.faces.path().join("empty.json"),
        br#"{"success":true,"facesCount":0,"faces":[]}"#,
    )
    .unwrap();

    let written = tag(&dirs.options()).unwrap();
    assert_eq!(std::fs::read(&written[0]).unwrap(), undecorated(&image_path));
}

#[test]
fn missing_tag_aborts_before_output() {
    let dirs = Dirs::new();
    write_jpeg(&dirs.images.path().join("a.jpg"), 32, 32, [0, 0, 0]);
    write_jpeg(&dirs.images.path().join("b.jpg"), 32, 32, [0, 0, 0]);
    write_jpeg(&dirs.images.path().join("c.jpg"), 32, 32, [0, 0, 0]);
    dirs.write_result("a", vec![]);
    dirs.write_result("b", vec![alice(true)]);
    dirs.write_result("c", vec![]);

    let err = tag(&dirs.options()).unwrap_err();

    assert!(matches!(err, PipelineError::Io { .. }));
    assert_eq!(err.path(), dirs.tags.path().join("alice.jpg"));
    assert!(dirs.out.path().join("tagged_a.jpg").exists());
    assert!(!dirs.out.path().join("tagged_b.jpg").exists());
    assert!(!dirs.out.path().join("tagged_c.jpg").exists());
}

#[test]
fn malformed_result_is_json_error() {
    let dirs = Dirs::new();
    std::fs::write(dirs.faces.path().join("bad.json"), b"{not json").unwrap();

    let err = tag(&dirs.options()).unwrap_err();
    assert!(matches!(err, PipelineError::Json { .. }));
}

#[test]
fn missing_source_image_is_io_error() {
    let dirs = Dirs::new();
    dirs.write_result("ghost", vec![]);

    let err = tag(&dirs.options()).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }));
    assert_eq!(err.path(), dirs.images.path().join("ghost.jpg"));
}

#[test]
fn undecodable_tag_is_image_error() {
    let dirs = Dirs::new();
    write_jpeg(&dirs.images.path().join("party.jpg"), 64, 64, [0, 0, 0]);
    std::fs::write(dirs.tags.path().join("alice.jpg"), b"not an image").unwrap();
    dirs.write_result("party", vec![alice(true)]);

    let err = tag(&dirs.options()).unwrap_err();
    assert!(matches!(err, PipelineError::Image { .. }));
}
