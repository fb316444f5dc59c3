//! # Engine Module
//!
//! The optimization engine of the learning-path planner: it turns a validated
//! catalog and a career goal into a QUBO, minimizes it with a sampler, and
//! decodes the best assignment into a staged plan.
//!
//! ## Architecture
//!
//! - **Tasks** ([`tasks`]) - Relational matrices, goal projection, QUBO encoding and schedule decoding
//! - **Sampling** ([`sampler`], [`annealer`]) - The sampler abstraction and its simulated-annealing implementation
//! - **State** ([`state`]) - Samples and sample sets ordered by energy
//! - **Configuration** ([`config`]) - Stage count, objective weights and annealing schedule
//! - **Cancellation** ([`cancel`]) - Cooperative cancellation with optional deadlines
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front-ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Every task is deterministic; the only source of randomness is the sampler,
//! and it is fully determined by its master seed.

pub mod annealer;
pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
pub mod sampler;
pub mod state;
pub mod tasks;
