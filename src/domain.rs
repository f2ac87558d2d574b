//! Domain models for degree auditing.
//!
//! This module contains the core domain types: course codes and subjects,
//! the course catalog, the declarative requirement rule language, and the
//! breadth configuration.

/// Course code and subject identifier types and parsing.
pub mod code;
pub use code::{CourseCode, Subject};

/// Courses and the immutable course catalog.
pub mod course;
pub use course::{Catalog, Course};

/// The requirement rule language and per-major rule documents.
pub mod rules;
pub use rules::{MajorRules, Requirement, RequirementKind};

/// Breadth categories and the shared breadth configuration.
pub mod breadth;
pub use breadth::{BreadthCategory, BreadthConfig};

mod config;
pub use config::Config;
