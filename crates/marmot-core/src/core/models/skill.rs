use serde::Serialize;

/// A single learnable skill in the skill catalog.
///
/// The numeric `id` doubles as the column index of the skill in every
/// course × skill matrix, so ids must be contiguous from zero within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub id: usize,
    pub key: String,
    pub name: String,
    pub category: String,
}

impl Skill {
    pub fn new(id: usize, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id,
            name: key.clone(),
            key,
            category: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
