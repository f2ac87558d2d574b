use std::{path::PathBuf, process};

use anyhow::Context;
use clap::Parser;
use magna::{
    DataDir,
    domain::Config,
    engine::{CommunicationProgress, EvaluationResult, MajorProgress, depth::DepthOutcome},
};
use tracing::{instrument, warn};

use super::{parse_course_list, terminal::{Colorize, flag}};

#[derive(Debug, Parser)]
#[command(about = "Check a course list against a major's requirements")]
pub struct Check {
    /// Major identifier (the rule document's file stem)
    #[arg(short, long)]
    major: String,

    /// Comma-separated course codes, e.g. "MATH 135, MATH 136, CS 115"
    courses: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Proceed when some codes are not in the catalog instead of aborting
    #[arg(long)]
    lenient: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Check {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, root: PathBuf, config: &Config) -> anyhow::Result<()> {
        let data = DataDir::open(root)?;
        let mut courses = parse_course_list(&self.courses)?;

        // Existence check runs up front; whether unknown codes abort is the
        // caller's decision, driven by --lenient and the config.
        let missing = data.catalog().missing(&courses);
        if !missing.is_empty() {
            let listed = missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            if config.strict && !self.lenient {
                anyhow::bail!("courses not found in catalog: {listed}");
            }
            warn!(codes = %listed, "unknown courses dropped");
            courses.retain(|code| !missing.contains(code));
        }

        let rules = data
            .major(&self.major)
            .with_context(|| format!("no rule document for major '{}'", self.major))?;
        let progress = data.evaluator().evaluate(&self.major, rules, &courses);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&progress)?),
            OutputFormat::Table => render_table(&progress),
        }

        if !progress.is_complete() {
            process::exit(2);
        }

        Ok(())
    }
}

fn render_table(progress: &MajorProgress) {
    println!("Program: {}\n", progress.program);

    render_section("Required courses", &progress.required_courses);
    render_section("Elective requirements", &progress.elective_requirement);
    render_section("Additional requirements", &progress.additional_requirement);

    if let Some(communication) = &progress.communication_requirement {
        render_communication(communication);
    }

    if let Some(breadth) = &progress.breadth_requirement {
        println!(
            "Breadth requirement: {}",
            flag(breadth.result.satisfied)
        );
        println!("  {}", breadth.result.description);
        println!("  {}\n", breadth.note.dim());
    }

    if let Some(depth) = &progress.depth_requirement {
        println!("Depth requirement: {}", flag(depth.result.is_satisfied()));
        match &depth.result {
            DepthOutcome::CourseCount { subject, courses } => println!(
                "  Satisfied by course count in {subject} ({} courses)",
                courses.len()
            ),
            DepthOutcome::PrereqChain { subject, chain } => {
                let chain = chain
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                println!("  Satisfied by prerequisite chain in {subject}: {chain}");
            }
            DepthOutcome::NotDemonstrated => {
                println!("  No subject concentration demonstrated");
            }
        }
        println!("  {}\n", depth.note.dim());
    }

    if progress.is_complete() {
        println!("{}", "All evaluated requirements are satisfied".success());
    } else {
        println!("{}", "Some requirements are not yet satisfied".warning());
    }
}

fn render_section(heading: &str, results: &[EvaluationResult]) {
    if results.is_empty() {
        return;
    }

    println!("{heading}:");
    for result in results {
        println!("  {} {}", flag(result.met), result.description);
        if !result.courses_taken.is_empty() {
            let taken = result
                .courses_taken
                .iter()
                .map(|course| course.code.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("      {}", format!("taken: {taken}").dim());
        }
        if !result.courses_remaining.is_empty() {
            let remaining = result
                .courses_remaining
                .iter()
                .map(|course| course.code.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("      {}", format!("remaining: {remaining}").dim());
        }
    }
    println!();
}

fn render_communication(communication: &CommunicationProgress) {
    println!("Communication requirement: {}", flag(communication.met()));
    for (name, list) in &communication.lists {
        let taken = list.courses_taken.len();
        let total = taken + list.courses_remaining.len();
        println!("  {name}: {taken}/{total} taken");
    }
    for option in &communication.options {
        let description = option.description.as_deref().unwrap_or("option");
        println!("  {} {description}", flag(option.met));
    }
    println!();
}
