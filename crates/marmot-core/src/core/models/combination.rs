use itertools::Itertools;
use serde::Serialize;

/// A group of courses that reinforce each other when taken together.
///
/// The group is unordered in intent but the stored order matters: every pair
/// `(a, b)` where `a` is listed before `b` contributes `synergy_effect` to the
/// synergy matrix at `[a][b]` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub key: String,
    pub courses: Vec<String>,
    pub synergy_effect: f64,
}

impl Combination {
    pub fn new<I, S>(key: impl Into<String>, courses: I, synergy_effect: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            courses: courses.into_iter().map(Into::into).collect(),
            synergy_effect,
        }
    }

    pub fn pair(key: impl Into<String>, first: &str, second: &str, synergy_effect: f64) -> Self {
        Self::new(key, [first, second], synergy_effect)
    }

    /// Ordered 2-combinations of the listed courses, in listing order.
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.courses
            .iter()
            .map(String::as_str)
            .tuple_combinations()
    }

    pub fn contains(&self, course_key: &str) -> bool {
        self.courses.iter().any(|c| c == course_key)
    }
}
