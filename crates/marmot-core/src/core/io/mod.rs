//! # Catalog I/O
//!
//! Reading catalog snapshots from disk. The engine itself never touches the
//! filesystem; this module exists for front-ends and tests that keep their
//! catalogs as JSON or TOML documents.

pub mod catalog_file;
