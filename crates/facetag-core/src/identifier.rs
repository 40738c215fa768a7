//! Identification stage: restore a trained state, then check every image.

use crate::error::PipelineError;
use crate::label::{file_stem, result_file_name, STATE_FILE_NAME};
use crate::types::IdentifiedFaces;
use crate::walk::{ensure_dir, list_files};
use facebox_client::RecognitionService;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct IdentifyOptions {
    /// Directory containing `state.facebox`.
    pub model_dir: PathBuf,
    pub image_dir: PathBuf,
    /// Directory receiving one `<stem>.json` per image.
    pub out_dir: PathBuf,
}

impl IdentifyOptions {
    pub fn new(
        model_dir: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model_dir: model_dir.into(),
            image_dir: image_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.model_dir.join(STATE_FILE_NAME)
    }
}

/// Load the model state into `service` and write a detection result per image.
///
/// A state that cannot be read or imported fails the run before any image
/// is checked. Returns the result files written, in processing order.
pub fn identify<S: RecognitionService>(
    service: &S,
    opts: &IdentifyOptions,
) -> Result<Vec<PathBuf>, PipelineError> {
    let state_path = opts.state_path();
    let state = std::fs::read(&state_path).map_err(PipelineError::io(&state_path))?;
    let state_len = state.len();
    service
        .import_state(state)
        .map_err(PipelineError::service(&state_path))?;
    tracing::info!(path = %state_path.display(), bytes = state_len, "state loaded");

    let files = list_files(&opts.image_dir)?;
    ensure_dir(&opts.out_dir)?;
    tracing::info!(dir = %opts.image_dir.display(), count = files.len(), "identifying");

    let mut written = Vec::with_capacity(files.len());
    for file in &files {
        let image = std::fs::read(&file.path).map_err(PipelineError::io(&file.path))?;
        let faces = service
            .check(image)
            .map_err(PipelineError::service(&file.path))?;

        let result = IdentifiedFaces::from_faces(faces);
        let data = serde_json::to_vec(&result).map_err(PipelineError::json(&file.path))?;

        let out_path = opts.out_dir.join(result_file_name(file_stem(&file.name)));
        std::fs::write(&out_path, data).map_err(PipelineError::io(&out_path))?;
        tracing::info!(
            file = %file.name,
            faces = result.faces_count,
            matched = result.matched().count(),
            "identified"
        );
        written.push(out_path);
    }

    Ok(written)
}
