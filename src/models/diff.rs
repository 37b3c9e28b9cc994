use serde::{ Deserialize, Serialize };

/// Changed lines between two versions of the same agreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDiff {
    pub version_from: String,
    pub version_to: String,
    /// Each entry starts with '+' (added in `version_to`) or '-' (removed)
    pub changes: Vec<String>,
}

impl VersionDiff {
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().filter_map(|c| c.strip_prefix('+'))
    }

    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().filter_map(|c| c.strip_prefix('-'))
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}
