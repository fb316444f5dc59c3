//! # Workflows Module
//!
//! High-level entry points of the planner. A workflow owns the whole pipeline
//! for one request: validation, goal projection, QUBO encoding, sampling and
//! decoding, with progress reported phase by phase.
//!
//! - **Planning Workflow** ([`plan`]) - The [`plan::Planner`] facade producing
//!   staged or flattened learning plans for a career goal.

pub mod plan;
