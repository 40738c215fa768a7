use serde::{Deserialize, Serialize};

/// Location of a detected face, in absolute pixels with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceRect {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

/// A face reported by the service's check endpoint.
///
/// `id` and `name` are empty when the face did not match a trained identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Face {
    #[serde(default)]
    pub rect: FaceRect,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub matched: bool,
}

/// Service metadata from `GET /info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub status: String,
}

/// Envelope shared by teach and state-import responses.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckResponse {
    pub success: bool,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub faces: Option<Vec<Face>>,
}
