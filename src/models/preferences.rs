//! User food preferences

use serde::{Deserialize, Serialize};

/// Likes, dislikes and dietary exclusions, matched against recipe tags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Tags or proteins that earn a bonus
    #[serde(default)]
    pub likes: Vec<String>,

    /// Tags or proteins that disqualify a recipe
    #[serde(default)]
    pub dislikes: Vec<String>,

    /// Dietary exclusions ("pork", "shellfish"), treated like dislikes
    #[serde(default)]
    pub dietary_exclusions: Vec<String>,
}

impl Preferences {
    /// Whether no preference is set
    pub fn is_empty(&self) -> bool {
        self.likes.is_empty() && self.dislikes.is_empty() && self.dietary_exclusions.is_empty()
    }
}
