//! # Objective Module
//!
//! The mathematical representation of the learning-path objective: the
//! sparse [`qubo::Qubo`] coefficient map that the engine encodes and the
//! samplers minimize, and the four [`weights::ObjectiveWeights`] that balance
//! its terms.

pub mod qubo;
pub mod weights;
