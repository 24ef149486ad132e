//! Shared test fixtures for wardplan crates.
//!
//! This crate provides small hand-built instances and a seeded random
//! instance generator. It depends only on `wardplan-core` so every other
//! crate can use it as a dev-dependency.
//!
//! - [`builder`] - terse constructors for patients, wards and specializations
//! - [`scenarios`] - named instances with known behavior
//! - [`generator`] - reproducible random instances
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! wardplan-test = { workspace = true }
//! ```
//!
//! ```
//! use wardplan_test::scenarios;
//!
//! let instance = scenarios::tiny();
//! assert_eq!(instance.patient_count(), 3);
//! ```

pub mod builder;
pub mod generator;
pub mod scenarios;

pub use generator::{generate, GeneratorConfig};
