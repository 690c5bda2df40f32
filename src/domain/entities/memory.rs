use serde::{Deserialize, Serialize};

/// A user-supplied text item, keyed by an opaque id.
///
/// `title` and `tags` are accepted for client compatibility only. Nothing
/// stores, indexes or returns them; only `text` reaches the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Memory {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            title: None,
            tags: Vec::new(),
        }
    }
}
