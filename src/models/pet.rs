//! Petstore models

use serde::{Deserialize, Serialize};

/// A pet as sent to and returned by `/pets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            tag: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Only the required field.
    pub fn minimal() -> Self {
        Self::new("Buddy")
    }

    /// Every field populated.
    pub fn complete() -> Self {
        Self::new("Buddy").with_id(1).with_tag("friendly")
    }

    /// Unique name and id, for tests that must not collide with each other.
    pub fn random() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let tags = ["friendly", "playful", "calm", "curious"];
        Self::new(format!("pet-{}", &suffix[..8]))
            .with_id(fastrand::i64(1..1_000_000))
            .with_tag(tags[fastrand::usize(..tags.len())])
    }
}

/// Error payload returned by the Petstore API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetstoreError {
    pub code: i32,
    pub message: String,
}
