use facebox_client::Face;
use serde::{Deserialize, Deserializer, Serialize};

/// Per-image detection result written by the identifier and read by the tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedFaces {
    #[serde(default)]
    pub success: bool,
    /// As reported by the writer; not checked against `faces`.
    #[serde(default)]
    pub faces_count: i64,
    /// Faces in the order the service reported them. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub faces: Vec<Face>,
}

impl IdentifiedFaces {
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self {
            success: true,
            faces_count: faces.len() as i64,
            faces,
        }
    }

    /// Faces the service associated with a trained identity.
    pub fn matched(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|f| f.matched)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Face>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Face>>::deserialize(deserializer)?.unwrap_or_default())
}
