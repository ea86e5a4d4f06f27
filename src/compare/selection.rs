use thiserror::Error;

/// Most products that can be compared side by side
pub const MAX_COMPARED: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("'{0}' is already in the comparison")]
    AlreadySelected(String),
    #[error("at most {max} projectors can be compared, '{0}' was not added", max = MAX_COMPARED)]
    Full(String),
    #[error("no projector with id '{0}' in the catalog")]
    UnknownProduct(String),
}

/// Ids chosen for side-by-side comparison, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Duplicates are rejected before the size cap is checked.
    pub fn add(&mut self, id: &str) -> Result<(), SelectionError> {
        if self.contains(id) {
            return Err(SelectionError::AlreadySelected(id.to_string()));
        }
        if self.ids.len() >= MAX_COMPARED {
            return Err(SelectionError::Full(id.to_string()));
        }
        self.ids.push(id.to_string());
        Ok(())
    }

    /// Remove an id.
    /// Returns true if the id was selected, false otherwise
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| selected != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARED
    }
}
