//! facetag-core — The train, identify and tag stages.
//!
//! Each stage walks one directory, does one unit of work per file and
//! writes one output per file. Stages stop at the first error. Face
//! detection and recognition are delegated to a [`RecognitionService`].
//!
//! [`RecognitionService`]: facebox_client::RecognitionService

pub mod compositor;
pub mod error;
pub mod identifier;
pub mod label;
pub mod tagger;
pub mod trainer;
pub mod types;
pub mod walk;

pub use error::PipelineError;
pub use identifier::{identify, IdentifyOptions};
pub use tagger::{tag, TagOptions, DEFAULT_JPEG_QUALITY};
pub use trainer::{train, TrainOptions, DEFAULT_TRAIN_DELAY};
pub use types::IdentifiedFaces;
