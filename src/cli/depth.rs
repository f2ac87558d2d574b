use std::path::PathBuf;

use clap::Parser;
use magna::{DataDir, engine::depth::analyze};
use tracing::instrument;

use super::parse_course_list;

#[derive(Debug, Parser)]
#[command(about = "Check a course list for subject concentration")]
pub struct Depth {
    /// Comma-separated course codes, e.g. "MATH 106, MATH 136, MATH 237"
    courses: String,
}

impl Depth {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let data = DataDir::open(root)?;
        let courses = parse_course_list(&self.courses)?;

        let outcome = analyze(data.breadth(), data.prereqs(), &courses);
        println!("{}", serde_json::to_string_pretty(&outcome)?);

        Ok(())
    }
}
