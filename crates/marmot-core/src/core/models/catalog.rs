use super::career::Career;
use super::combination::Combination;
use super::course::Course;
use super::skill::Skill;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors raised when the catalogs do not form a consistent snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Course '{course}' references unknown skill '{skill}'")]
    UnknownSkill { course: String, skill: String },

    #[error("Combination '{combination}' references unknown course '{course}'")]
    UnknownCourse { combination: String, course: String },

    #[error("Duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },

    #[error(
        "{kind} ids must be unique and contiguous from 0, but position {position} holds id {id}"
    )]
    NonContiguousIds {
        kind: &'static str,
        position: usize,
        id: usize,
    },

    #[error("Combination '{0}' must list at least two courses")]
    DegenerateCombination(String),
}

/// An immutable, cross-validated snapshot of the skill, course, career and
/// combination catalogs.
///
/// Skills and courses are stored in id order so that a course's or skill's
/// position equals its numeric id, which is also its row/column index in the
/// relational matrices built by the engine. Careers are sorted by id as well,
/// but their ids carry no structural meaning.
#[derive(Debug, Clone)]
pub struct Catalog {
    skills: Vec<Skill>,
    courses: Vec<Course>,
    careers: Vec<Career>,
    combinations: Vec<Combination>,
    skill_index: HashMap<String, usize>,
    course_index: HashMap<String, usize>,
    career_index: HashMap<String, usize>,
}

impl Catalog {
    /// Assembles a catalog and validates every cross-reference.
    ///
    /// Courses must only reference known skills and combinations must only
    /// reference known courses. Career skill references are deliberately not
    /// checked here; an unknown skill in a career surfaces as a not-found error
    /// when that career is projected.
    pub fn new(
        mut skills: Vec<Skill>,
        mut courses: Vec<Course>,
        mut careers: Vec<Career>,
        combinations: Vec<Combination>,
    ) -> Result<Self, CatalogError> {
        skills.sort_by_key(|s| s.id);
        courses.sort_by_key(|c| c.id);
        careers.sort_by_key(|c| c.id);

        check_contiguous("skill", skills.iter().map(|s| s.id))?;
        check_contiguous("course", courses.iter().map(|c| c.id))?;

        let skill_index = index_by_key("skill", skills.iter().map(|s| s.key.as_str()))?;
        let course_index = index_by_key("course", courses.iter().map(|c| c.key.as_str()))?;
        let career_index = index_by_key("career", careers.iter().map(|c| c.key.as_str()))?;

        for course in &courses {
            for skill in course.prerequisites.iter().chain(&course.skills_acquired) {
                if !skill_index.contains_key(skill) {
                    return Err(CatalogError::UnknownSkill {
                        course: course.key.clone(),
                        skill: skill.clone(),
                    });
                }
            }
        }

        for combination in &combinations {
            if combination.courses.len() < 2 {
                return Err(CatalogError::DegenerateCombination(
                    combination.key.clone(),
                ));
            }
            if let Some(missing) = combination
                .courses
                .iter()
                .find(|c| !course_index.contains_key(*c))
            {
                return Err(CatalogError::UnknownCourse {
                    combination: combination.key.clone(),
                    course: missing.clone(),
                });
            }
        }

        Ok(Self {
            skills,
            courses,
            careers,
            combinations,
            skill_index,
            course_index,
            career_index,
        })
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn careers(&self) -> &[Career] {
        &self.careers
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn num_skills(&self) -> usize {
        self.skills.len()
    }

    pub fn num_courses(&self) -> usize {
        self.courses.len()
    }

    pub fn skill_id(&self, key: &str) -> Option<usize> {
        self.skill_index.get(key).copied()
    }

    pub fn course_id(&self, key: &str) -> Option<usize> {
        self.course_index.get(key).copied()
    }

    pub fn skill(&self, key: &str) -> Option<&Skill> {
        self.skill_id(key).map(|id| &self.skills[id])
    }

    pub fn course(&self, key: &str) -> Option<&Course> {
        self.course_id(key).map(|id| &self.courses[id])
    }

    pub fn career(&self, key: &str) -> Option<&Career> {
        self.career_index.get(key).map(|&idx| &self.careers[idx])
    }

    /// Course keys in catalog order (ascending id).
    pub fn course_keys(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.key.as_str()).collect()
    }

    /// Distinct courses that share at least one combination with `course_key`,
    /// in catalog order. Returns `None` if the course is unknown.
    pub fn recommended_partners(&self, course_key: &str) -> Option<Vec<&Course>> {
        let own_id = self.course_id(course_key)?;
        let partner_ids: BTreeSet<usize> = self
            .combinations
            .iter()
            .filter(|combo| combo.contains(course_key))
            .flat_map(|combo| combo.courses.iter())
            .filter_map(|key| self.course_id(key))
            .filter(|&id| id != own_id)
            .collect();
        Some(partner_ids.into_iter().map(|id| &self.courses[id]).collect())
    }
}

fn check_contiguous(
    kind: &'static str,
    ids: impl Iterator<Item = usize>,
) -> Result<(), CatalogError> {
    for (position, id) in ids.enumerate() {
        if position != id {
            return Err(CatalogError::NonContiguousIds { kind, position, id });
        }
    }
    Ok(())
}

fn index_by_key<'a>(
    kind: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>, CatalogError> {
    let mut index = HashMap::new();
    for (position, key) in keys.enumerate() {
        if index.insert(key.to_string(), position).is_some() {
            return Err(CatalogError::DuplicateKey {
                kind,
                key: key.to_string(),
            });
        }
    }
    Ok(index)
}
