//! Asset source contract.
//!
//! Card faces come from an external catalogue grouped by topic. The engine
//! only needs the face identifiers; the presentation layer also resolves a
//! display URL per face.

use rustc_hash::FxHashMap;

use crate::cards::FaceId;
use crate::core::AssetError;

/// External catalogue of card faces.
pub trait AssetSource {
    /// Faces available for a topic, in catalogue order.
    fn list_faces(&self, topic: &str) -> Result<Vec<FaceId>, AssetError>;

    /// Display URL for a face.
    fn resolve_url(&self, face: &FaceId) -> Result<String, AssetError>;
}

/// In-memory catalogue: topics map to face lists, URLs are
/// `{base_url}/{topic}/{face}`.
#[derive(Clone, Debug, Default)]
pub struct StaticAssetSource {
    base_url: String,
    topics: FxHashMap<String, Vec<FaceId>>,
    face_topics: FxHashMap<FaceId, String>,
}

impl StaticAssetSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Register a topic and its faces.
    #[must_use]
    pub fn with_topic<I, F>(mut self, topic: impl Into<String>, faces: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FaceId>,
    {
        let topic = topic.into();
        let faces: Vec<FaceId> = faces.into_iter().map(Into::into).collect();
        for face in &faces {
            self.face_topics.insert(face.clone(), topic.clone());
        }
        self.topics.insert(topic, faces);
        self
    }
}

impl AssetSource for StaticAssetSource {
    fn list_faces(&self, topic: &str) -> Result<Vec<FaceId>, AssetError> {
        self.topics
            .get(topic)
            .cloned()
            .ok_or_else(|| AssetError::UnknownTopic(topic.to_string()))
    }

    fn resolve_url(&self, face: &FaceId) -> Result<String, AssetError> {
        let topic = self
            .face_topics
            .get(face)
            .ok_or_else(|| AssetError::UnknownFace(face.to_string()))?;
        Ok(format!("{}/{}/{}", self.base_url, topic, face))
    }
}
