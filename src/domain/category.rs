use serde::{Deserialize, Serialize};

/// A name-only facet label. Stored categories carry their document id;
/// derived ones get a synthetic `cat-<index>` id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }
}
