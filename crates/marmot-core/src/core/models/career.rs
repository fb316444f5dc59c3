use serde::Serialize;

/// A target career expressed as the set of skills it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Career {
    pub id: usize,
    pub key: String,
    pub description: String,
    pub required_skills: Vec<String>,
}

impl Career {
    pub fn new<I, S>(id: usize, key: impl Into<String>, required_skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            key: key.into(),
            description: String::new(),
            required_skills: required_skills.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
