#![allow(dead_code)]

use facebox_client::{Face, FaceRect, RecognitionService, ServiceError, ServiceInfo};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::path::Path;

/// Rectangle the stub reports for every recognized face.
pub const STUB_RECT: FaceRect = FaceRect { top: 10, left: 20, width: 50, height: 50 };

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Sample {
    id: String,
    name: String,
    image: Vec<u8>,
}

/// In-memory recognition service.
///
/// An image is recognized when its bytes equal a taught sample; it then
/// yields one matched face at [`STUB_RECT`]. Unknown images have no faces.
#[derive(Default)]
pub struct StubService {
    samples: RefCell<Vec<Sample>>,
    pub checks: Cell<usize>,
    fail_teach_for: Option<String>,
    reject_state: bool,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub whose teach call rejects the image with id `id`.
    pub fn failing_teach(id: &str) -> Self {
        Self {
            fail_teach_for: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// A stub that rejects every imported state.
    pub fn rejecting_state() -> Self {
        Self {
            reject_state: true,
            ..Self::default()
        }
    }

    pub fn taught(&self) -> Vec<(String, String)> {
        self.samples
            .borrow()
            .iter()
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect()
    }
}

impl RecognitionService for StubService {
    fn teach(&self, image: Vec<u8>, id: &str, name: &str) -> Result<(), ServiceError> {
        if self.fail_teach_for.as_deref() == Some(id) {
            return Err(ServiceError::Rejected {
                endpoint: "/facebox/teach".into(),
                message: "no face found".into(),
            });
        }
        self.samples.borrow_mut().push(Sample {
            id: id.to_string(),
            name: name.to_string(),
            image,
        });
        Ok(())
    }

    fn check(&self, image: Vec<u8>) -> Result<Vec<Face>, ServiceError> {
        self.checks.set(self.checks.get() + 1);
        let samples = self.samples.borrow();
        Ok(samples
            .iter()
            .find(|s| s.image == image)
            .map(|s| Face {
                rect: STUB_RECT,
                id: s.id.clone(),
                name: s.name.clone(),
                matched: true,
            })
            .into_iter()
            .collect())
    }

    fn export_state(&self) -> Result<Vec<u8>, ServiceError> {
        Ok(serde_json::to_vec(&*self.samples.borrow()).expect("stub state serializes"))
    }

    fn import_state(&self, state: Vec<u8>) -> Result<(), ServiceError> {
        let samples: Vec<Sample> = match serde_json::from_slice(&state) {
            Ok(samples) if !self.reject_state => samples,
            _ => {
                return Err(ServiceError::Rejected {
                    endpoint: "/facebox/state".into(),
                    message: "invalid state file".into(),
                })
            }
        };
        *self.samples.borrow_mut() = samples;
        Ok(())
    }

    fn info(&self) -> Result<ServiceInfo, ServiceError> {
        Ok(ServiceInfo {
            name: "stub".into(),
            version: 1,
            build: "test".into(),
            status: "ready".into(),
        })
    }
}

/// Write a solid-color JPEG.
pub fn write_jpeg(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .expect("write test jpeg");
}
