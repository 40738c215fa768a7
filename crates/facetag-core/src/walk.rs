use crate::error::PipelineError;
use std::path::{Path, PathBuf};

/// A regular file found in a stage's input directory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    /// File name without the directory, lossily decoded.
    pub name: String,
}

/// List the non-directory entries directly inside `dir`, sorted by name.
///
/// Subdirectories are skipped, not descended into.
pub fn list_files(dir: &Path) -> Result<Vec<InputFile>, PipelineError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(PipelineError::io(dir))? {
        let entry = entry.map_err(PipelineError::io(dir))?;
        let path = entry.path();
        let metadata = std::fs::metadata(&path).map_err(PipelineError::io(&path))?;
        if metadata.is_dir() {
            continue;
        }
        files.push(InputFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    std::fs::create_dir_all(dir).map_err(PipelineError::io(dir))
}
