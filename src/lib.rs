//! Degree requirement auditing
//!
//! Evaluates whether a student's completed course list satisfies a
//! university major's graduation requirements, expressed as a declarative
//! rule tree per major.

pub mod domain;
pub use domain::{Catalog, Config, Course, CourseCode, MajorRules, Subject};

/// The requirement evaluation engine.
pub mod engine;
pub use engine::{Evaluator, MajorProgress};

/// Filesystem loading for the audit data directory.
pub mod storage;
pub use storage::DataDir;
