use serde::Serialize;

/// A course that can be scheduled into a learning stage.
///
/// A course requires a set of prerequisite skills and grants a set of acquired
/// skills. Skill references are stored by key and resolved against the skill
/// catalog when the [`Catalog`](super::catalog::Catalog) is assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    /// Row index of the course in the relational matrices.
    pub id: usize,
    pub key: String,
    pub name: String,
    pub description: String,
    pub prerequisites: Vec<String>,
    pub skills_acquired: Vec<String>,
    /// Estimated time to complete the course, in hours.
    pub estimated_hours: u32,
}

impl Course {
    pub fn new(id: usize, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id,
            name: key.clone(),
            key,
            description: String::new(),
            prerequisites: Vec::new(),
            skills_acquired: Vec::new(),
            estimated_hours: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn requires<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn grants<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills_acquired.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = hours;
        self
    }
}
