//! # Catalog Models
//!
//! Data structures describing the learning domain: skills, courses that
//! require and grant skills, careers that demand skills, and combinations of
//! courses that reinforce each other.
//!
//! - [`skill`] - A learnable skill and its category
//! - [`course`] - A schedulable course with prerequisite and acquired skills
//! - [`career`] - A career goal defined by its required skills
//! - [`combination`] - Groups of courses with a synergy score
//! - [`catalog`] - The validated, immutable snapshot tying them together
//!
//! ```ignore
//! use marmotpath::core::models::{catalog::Catalog, course::Course, skill::Skill};
//!
//! let catalog = Catalog::new(
//!     vec![Skill::new(0, "html")],
//!     vec![Course::new(0, "web-basics").grants(["html"])],
//!     vec![],
//!     vec![],
//! )?;
//! ```

pub mod career;
pub mod catalog;
pub mod combination;
pub mod course;
pub mod skill;
