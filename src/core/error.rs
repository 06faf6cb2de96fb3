use std::io;

use thiserror::Error;

/// Reason a single catalog line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 5 fields, found {found}")]
    FieldCount { found: usize },
    #[error("department must be 3 uppercase letters: {0:?}")]
    Department(String),
    #[error("number must be 3 digits: {0:?}")]
    Number(String),
    #[error("days must be MW or TH: {0:?}")]
    Days(String),
    #[error("name is {len} characters, limit is {max}")]
    NameTooLong { len: usize, max: usize },
    #[error("duplicate course id {dept} {number}")]
    Duplicate { dept: String, number: String },
    #[error("time is not a valid timeslot: {0:?}")]
    Time(String),
}

/// Fatal errors raised while building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Can't open file: {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Can't read file: {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid course file: {path}")]
    InvalidCourseFile {
        path: String,
        line: usize,
        #[source]
        reason: RecordError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no course {dept} {number} in the catalog")]
    UnknownCourse { dept: String, number: String },
    #[error("{dept} {number} is already scheduled")]
    AlreadyScheduled { dept: String, number: String },
    #[error("{dept} {number} conflicts with {other} at {days} {time}")]
    TimeslotConflict {
        dept: String,
        number: String,
        other: String,
        days: &'static str,
        time: &'static str,
    },
    #[error("schedule already holds {max} courses")]
    Full { max: usize },
    #[error("{dept} {number} is not in the schedule")]
    NotScheduled { dept: String, number: String },
}

/// A malformed interactive command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command} expects {expected} tokens, got {found}")]
    TokenCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid argument for {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },
}
