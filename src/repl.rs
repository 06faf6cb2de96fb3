use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::core::catalog::{Catalog, CourseFilter, CourseOrder};
use crate::core::command::{is_command_word, parse_command, Command};
use crate::core::error::ScheduleError;
use crate::core::formatter::{format_calendar, format_listing, INVALID_COMMAND, PROMPT};
use crate::core::schedule::{Schedule, MAX_COURSES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive state: the loaded catalog and the schedule being built.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    schedule: Schedule,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            schedule: Schedule::new(),
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Lines are decoded lossily, so bytes that are not UTF-8 reach the
    /// parser as a malformed command instead of ending the loop.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let bytes_read = input.read_until(b'\n', &mut buf)?;
            if bytes_read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if self.handle_line(trimmed, out)? == Flow::Quit {
                break;
            }
        }

        out.flush()
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        if is_command_word(line) {
            writeln!(out, "{line}")?;
        }

        let output = match parse_command(line) {
            Ok(Command::Quit) => return Ok(Flow::Quit),
            Ok(command) => self.execute(command).unwrap_or_else(|err| {
                debug!(%err, line, "schedule command rejected");
                vec![INVALID_COMMAND.to_string()]
            }),
            Err(err) => {
                debug!(%err, line, "malformed command");
                vec![INVALID_COMMAND.to_string()]
            }
        };

        for text in output {
            writeln!(out, "{text}")?;
        }
        writeln!(out)?;
        Ok(Flow::Continue)
    }

    /// Runs one parsed command and returns the lines it prints.
    pub fn execute(&mut self, command: Command) -> Result<Vec<String>, ScheduleError> {
        let lines = match command {
            Command::ListCourses => {
                self.catalog.sort(CourseOrder::ById);
                format_listing(self.catalog.list(CourseFilter::All))
            }
            Command::ListNames => {
                self.catalog.sort(CourseOrder::ByName);
                format_listing(self.catalog.list(CourseFilter::All))
            }
            Command::ListDepartment(dept) => {
                self.catalog.sort(CourseOrder::ById);
                format_listing(self.catalog.list(CourseFilter::Department(&dept)))
            }
            Command::ListTimeslot(days, time) => {
                self.catalog.sort(CourseOrder::ById);
                format_listing(self.catalog.list(CourseFilter::Timeslot(days, time)))
            }
            Command::ListSchedule => {
                self.schedule.sort(&self.catalog, CourseOrder::BySlot);
                format_listing(self.schedule.courses(&self.catalog))
            }
            Command::Add { dept, number } => {
                if self.schedule.is_full() {
                    return Err(ScheduleError::Full { max: MAX_COURSES });
                }
                self.schedule.add(&self.catalog, &dept, &number)?;
                Vec::new()
            }
            Command::Drop { dept, number } => {
                self.schedule.drop_course(&self.catalog, &dept, &number)?;
                Vec::new()
            }
            Command::Calendar => format_calendar(&self.schedule.calendar(&self.catalog)),
            Command::Quit => Vec::new(),
        };
        Ok(lines)
    }
}
