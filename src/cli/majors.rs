use std::path::PathBuf;

use clap::Parser;
use magna::DataDir;
use tracing::instrument;

#[derive(Debug, Parser, Default)]
#[command(about = "List the majors with a loaded rule document")]
pub struct Majors {}

impl Majors {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let data = DataDir::open(root)?;

        if data.majors().next().is_none() {
            println!("No rule documents found under requirements/.");
            return Ok(());
        }

        for major in data.majors() {
            println!("{major}");
        }

        Ok(())
    }
}
