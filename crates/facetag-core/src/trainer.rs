//! Training stage: teach the service every labeled image, then export its state.

use crate::error::PipelineError;
use crate::label::{person_label, STATE_FILE_NAME};
use crate::walk::{ensure_dir, list_files};
use facebox_client::RecognitionService;
use std::path::PathBuf;
use std::time::Duration;

/// Pause after each teach call so the service can finish indexing.
///
/// This is a courtesy delay, not a synchronization point: a service slower
/// than the delay can still be indexing when the state is exported.
pub const DEFAULT_TRAIN_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Directory of images named `<person><id>.<ext>`.
    pub in_dir: PathBuf,
    /// Directory receiving `state.facebox`.
    pub out_dir: PathBuf,
    pub delay: Duration,
}

impl TrainOptions {
    pub fn new(in_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            in_dir: in_dir.into(),
            out_dir: out_dir.into(),
            delay: DEFAULT_TRAIN_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn state_path(&self) -> PathBuf {
        self.out_dir.join(STATE_FILE_NAME)
    }
}

/// Teach `service` every image in `in_dir` and write its exported state.
///
/// Returns the path of the written state file. Stops at the first failure;
/// nothing is written unless every image was taught.
pub fn train<S: RecognitionService>(
    service: &S,
    opts: &TrainOptions,
) -> Result<PathBuf, PipelineError> {
    let files = list_files(&opts.in_dir)?;
    tracing::info!(dir = %opts.in_dir.display(), count = files.len(), "training");

    for file in &files {
        let person = person_label(&file.name);
        let image = std::fs::read(&file.path).map_err(PipelineError::io(&file.path))?;

        service
            .teach(image, &file.name, person)
            .map_err(PipelineError::service(&file.path))?;
        tracing::info!(file = %file.name, person, "taught");

        if !opts.delay.is_zero() {
            std::thread::sleep(opts.delay);
        }
    }

    let state_path = opts.state_path();
    let state = service
        .export_state()
        .map_err(PipelineError::service(&state_path))?;

    ensure_dir(&opts.out_dir)?;
    std::fs::write(&state_path, &state).map_err(PipelineError::io(&state_path))?;
    tracing::info!(path = %state_path.display(), bytes = state.len(), "state exported");

    Ok(state_path)
}
