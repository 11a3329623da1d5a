use serde::{Deserialize, Serialize};

/// The two fragments the gateway needs from an external ingredient page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPage {
    pub title: String,
    pub description: String,
}

impl LookupPage {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
