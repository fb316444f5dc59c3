//! # Core Module
//!
//! The stateless foundation of MarmotPath: the catalog data model, the
//! mathematical form of the learning-path objective, and catalog file I/O.
//!
//! ## Architecture
//!
//! - **Catalog Representation** ([`models`]) - Skills, courses, careers, combinations
//!   and the validated [`models::catalog::Catalog`] snapshot
//! - **Objective** ([`objective`]) - The sparse QUBO coefficient map and the objective weights
//! - **File I/O** ([`io`]) - Loading catalog snapshots from JSON or TOML documents
//!
//! Nothing in this module holds mutable shared state; every type here can be
//! built once and shared freely between threads.

pub mod io;
pub mod models;
pub mod objective;
