//! facebox-client — Access to the external face recognition service.
//!
//! The service does all detection, recognition and training; this crate
//! only moves bytes and JSON across its HTTP API. Stages depend on the
//! [`RecognitionService`] trait so they can be driven by a stub in tests.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::FaceboxClient;
pub use error::ServiceError;
pub use service::RecognitionService;
pub use types::{Face, FaceRect, ServiceInfo};
