//! # MarmotPath Core Library
//!
//! A learning-path optimizer: given catalogs of skills, courses, careers and
//! course combinations, it schedules courses into ordered stages so that a
//! chosen career's skills are covered, prerequisites are learned first, and
//! synergistic courses are taken together.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless catalog models, the QUBO
//!   representation of the objective, and catalog file loading.
//!
//! - **[`engine`]: The Logic Core.** Builds the relational matrices, projects
//!   them onto a career goal, encodes the QUBO, samples it with simulated
//!   annealing, and decodes the result into stages.
//!
//! - **[`workflows`]: The Public API.** The [`workflows::plan::Planner`] ties
//!   the engine and core together into a single `optimize` call that returns
//!   a staged or flat plan.

pub mod core;
pub mod engine;
pub mod workflows;
