use std::path::PathBuf;

use clap::Parser;

pub const USAGE: &str = "usage: schedule <course-file>*";

#[derive(Debug, Parser)]
#[command(name = "schedule", version, about = "Course catalog browser and schedule builder")]
pub struct Cli {
    /// Course catalog files, loaded in order into one catalog
    #[arg(value_name = "COURSE_FILE", required = true)]
    pub course_files: Vec<PathBuf>,

    /// Enable debug logging on standard error
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
