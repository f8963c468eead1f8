use std::collections::HashSet;

/// Distinct main-namespace titles a user created or only edited.
/// No title is ever in both sets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub created_titles: HashSet<String>,
    pub edited_titles: HashSet<String>,
}

impl ClassificationResult {
    pub fn created_count(&self) -> usize {
        self.created_titles.len()
    }

    pub fn edited_count(&self) -> usize {
        self.edited_titles.len()
    }
}
