//! Pipeline tasks of the learning-path optimizer.
//!
//! Each task is a single, deterministic computational step. Together with the
//! sampler they form the pipeline `career key → goal projection → QUBO
//! encoding → sampling → schedule decoding`; the relational matrices are built
//! once per catalog and shared by every run.

pub mod goal_projection;
pub mod problem_matrices;
pub mod qubo_encoding;
pub mod schedule_decoding;
