use facebox_client::ServiceError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a stage, tagged with the file being processed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: image: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("{}: json: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{}: facebox: {source}", path.display())]
    Service {
        path: PathBuf,
        source: ServiceError,
    },
}

impl PipelineError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn image(path: &Path) -> impl FnOnce(image::ImageError) -> Self + '_ {
        move |source| Self::Image {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path) -> impl FnOnce(serde_json::Error) -> Self + '_ {
        move |source| Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn service(path: &Path) -> impl FnOnce(ServiceError) -> Self + '_ {
        move |source| Self::Service {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file that was being processed when the stage failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Image { path, .. }
            | Self::Json { path, .. }
            | Self::Service { path, .. } => path,
        }
    }
}
