use crate::error::{CliError, Result};
use marmotpath::core::models::{catalog::Catalog, course::Course};
use marmotpath::workflows::plan::{FlatPlanResponse, StagedPlanResponse};
use serde::Serialize;
use std::fmt::Write;

const EMPTY_STAGE: &str = "-";

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to serialize output: {}", e)))
}

pub fn render_staged(response: &StagedPlanResponse, seed: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Learning plan for career '{}'", response.career_key);
    for stage in &response.stages {
        let courses = if stage.course_keys.is_empty() {
            EMPTY_STAGE.to_string()
        } else {
            stage.course_keys.join(", ")
        };
        let _ = writeln!(out, "  Stage {}: {}", stage.stage_number, courses);
    }
    let _ = write!(
        out,
        "Total courses: {} | Estimated hours: {} | Energy: {:.4} | Seed: {}",
        response.total_courses, response.estimated_total_hours, response.energy, seed
    );
    out
}

pub fn render_flat(response: &FlatPlanResponse, seed: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Courses for career '{}'", response.career_key);
    if response.course_keys.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_STAGE);
    }
    for (i, key) in response.course_keys.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, key);
    }
    let _ = write!(
        out,
        "Total courses: {} | Estimated hours: {} | Energy: {:.4} | Seed: {}",
        response.total_courses, response.estimated_total_hours, response.energy, seed
    );
    out
}

pub fn render_careers(catalog: &Catalog) -> String {
    let mut out = String::new();
    for career in catalog.careers() {
        let _ = writeln!(out, "{:<24} {}", career.key, career.description);
        let _ = writeln!(out, "{:<24}   requires: {}", "", career.required_skills.join(", "));
    }
    out.trim_end().to_string()
}

pub fn render_courses(catalog: &Catalog) -> String {
    let mut out = String::new();
    for course in catalog.courses() {
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:>4}h  {}",
            course.id, course.key, course.estimated_hours, course.name
        );
    }
    out.trim_end().to_string()
}

pub fn render_skills(catalog: &Catalog) -> String {
    let mut out = String::new();
    for skill in catalog.skills() {
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:<16} {}",
            skill.id, skill.key, skill.category, skill.name
        );
    }
    out.trim_end().to_string()
}

#[derive(Serialize)]
pub struct CourseDetail<'a> {
    #[serde(flatten)]
    pub course: &'a Course,
    pub recommended_partners: Vec<&'a str>,
}

pub fn render_course_detail(detail: &CourseDetail<'_>) -> String {
    let course = detail.course;
    let list = |items: &[String]| {
        if items.is_empty() {
            EMPTY_STAGE.to_string()
        } else {
            items.join(", ")
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", course.name, course.key);
    if !course.description.is_empty() {
        let _ = writeln!(out, "  {}", course.description);
    }
    let _ = writeln!(out, "  Estimated hours:      {}", course.estimated_hours);
    let _ = writeln!(out, "  Prerequisites:        {}", list(&course.prerequisites));
    let _ = writeln!(out, "  Skills acquired:      {}", list(&course.skills_acquired));
    let partners = if detail.recommended_partners.is_empty() {
        EMPTY_STAGE.to_string()
    } else {
        detail.recommended_partners.join(", ")
    };
    let _ = write!(out, "  Recommended partners: {}", partners);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use marmotpath::core::models::{career::Career, combination::Combination, skill::Skill};
    use marmotpath::engine::tasks::schedule_decoding::Stage;

    fn staged() -> StagedPlanResponse {
        StagedPlanResponse {
            career_key: "frontend".into(),
            stages: vec![
                Stage {
                    stage_number: 1,
                    course_keys: vec!["web-basics".into(), "design".into()],
                },
                Stage {
                    stage_number: 2,
                    course_keys: vec![],
                },
            ],
            total_courses: 2,
            energy: -3.25,
            estimated_total_hours: 30,
        }
    }

    #[test]
    fn render_staged_lists_every_stage() {
        let text = render_staged(&staged(), 42);
        assert_eq!(
            text,
            "Learning plan for career 'frontend'\n  Stage 1: web-basics, design\n  Stage 2: -\n\
             Total courses: 2 | Estimated hours: 30 | Energy: -3.2500 | Seed: 42"
        );
    }

    #[test]
    fn render_flat_numbers_courses() {
        let flat = FlatPlanResponse {
            career_key: "frontend".into(),
            course_keys: vec!["web-basics".into(), "design".into()],
            total_courses: 2,
            energy: 0.5,
            estimated_total_hours: 12,
        };
        let text = render_flat(&flat, 1);
        assert!(text.contains(" 1. web-basics\n"));
        assert!(text.contains(" 2. design\n"));
        assert!(text.ends_with("Seed: 1"));
    }

    #[test]
    fn json_output_uses_response_field_names() {
        let json = to_json(&staged()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["career_key"], "frontend");
        assert_eq!(value["stages"][0]["stage_number"], 1);
        assert_eq!(value["stages"][0]["course_keys"][1], "design");
        assert_eq!(value["total_courses"], 2);
        assert_eq!(value["estimated_total_hours"], 30);
    }

    #[test]
    fn course_detail_flattens_course_fields_in_json() {
        let catalog = Catalog::new(
            vec![Skill::new(0, "html")],
            vec![
                Course::new(0, "web-basics").grants(["html"]).with_hours(8),
                Course::new(1, "design"),
            ],
            vec![Career::new(0, "frontend", ["html"])],
            vec![Combination::pair("pair", "web-basics", "design", 0.4)],
        )
        .unwrap();
        let course = catalog.course("web-basics").unwrap();
        let detail = CourseDetail {
            course,
            recommended_partners: catalog
                .recommended_partners("web-basics")
                .unwrap()
                .into_iter()
                .map(|c| c.key.as_str())
                .collect(),
        };

        let value: serde_json::Value = serde_json::from_str(&to_json(&detail).unwrap()).unwrap();
        assert_eq!(value["key"], "web-basics");
        assert_eq!(value["estimated_hours"], 8);
        assert_eq!(value["recommended_partners"][0], "design");

        let text = render_course_detail(&detail);
        assert!(text.contains("Skills acquired:      html"));
        assert!(text.contains("Prerequisites:        -"));
        assert!(text.ends_with("Recommended partners: design"));
    }

    #[test]
    fn catalog_listings_follow_catalog_order() {
        let catalog = Catalog::new(
            vec![Skill::new(1, "css"), Skill::new(0, "html")],
            vec![Course::new(1, "b"), Course::new(0, "a")],
            vec![],
            vec![],
        )
        .unwrap();

        let courses = render_courses(&catalog);
        let lines: Vec<&str> = courses.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" a "));
        assert!(render_skills(&catalog).lines().next().unwrap().contains("html"));
        assert!(render_careers(&catalog).is_empty());
    }
}
