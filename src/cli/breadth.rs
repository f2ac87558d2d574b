use std::path::PathBuf;

use clap::Parser;
use magna::{DataDir, engine::breadth::classify};
use tracing::instrument;

use super::parse_course_list;

#[derive(Debug, Parser)]
#[command(about = "Classify a course list into breadth categories")]
pub struct Breadth {
    /// Comma-separated course codes, e.g. "ECON 101, PHYS 121, PHIL 145"
    courses: String,
}

impl Breadth {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let data = DataDir::open(root)?;
        let courses = parse_course_list(&self.courses)?;

        let outcome = classify(data.breadth(), &courses);
        println!("{}", serde_json::to_string_pretty(&outcome)?);

        Ok(())
    }
}
