use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::RecordError;

const NAME_MAX_LEN: usize = 30;
const RECORD_FIELDS: usize = 5;

static RE_DEPARTMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());
static RE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3}$").unwrap());

/// Meeting days. `MW` orders before `TH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Days {
    MW,
    TH,
}

impl Days {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "MW" => Some(Days::MW),
            "TH" => Some(Days::TH),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Days::MW => "MW",
            Days::TH => "TH",
        }
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One of the six canonical start times.
///
/// Variants are declared in chronological order, so the derived `Ord`
/// compares by slot index rather than by the text of the token
/// (`"10:00"` sorts after `"8:30"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSlot {
    EightThirty,
    Ten,
    ElevenThirty,
    One,
    TwoThirty,
    Four,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::EightThirty,
        TimeSlot::Ten,
        TimeSlot::ElevenThirty,
        TimeSlot::One,
        TimeSlot::TwoThirty,
        TimeSlot::Four,
    ];

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slot| slot.as_str() == token)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::EightThirty => "8:30",
            TimeSlot::Ten => "10:00",
            TimeSlot::ElevenThirty => "11:30",
            TimeSlot::One => "1:00",
            TimeSlot::TwoThirty => "2:30",
            TimeSlot::Four => "4:00",
        }
    }

    /// Position in the canonical sequence, `8:30` is 0 and `4:00` is 5.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub dept: String,
    pub number: String,
    pub days: Days,
    pub time: TimeSlot,
    pub name: String,
}

impl Course {
    pub fn has_id(&self, dept: &str, number: &str) -> bool {
        self.dept == dept && self.number == number
    }

    pub fn timeslot(&self) -> (Days, TimeSlot) {
        (self.days, self.time)
    }

    /// Course id as printed in listings and the calendar, e.g. `CSC 216`.
    pub fn id(&self) -> String {
        format!("{} {}", self.dept, self.number)
    }
}

pub fn is_department(token: &str) -> bool {
    RE_DEPARTMENT.is_match(token)
}

pub fn is_course_number(token: &str) -> bool {
    RE_NUMBER.is_match(token)
}

/// Parses one catalog line into a course.
///
/// The first four whitespace tokens are department, number, days and time;
/// every remaining token is rejoined with single spaces to form the name.
/// Checks run in a fixed order: department, number, days, name length,
/// duplicate id (via `is_taken`), then time.
pub fn parse_record<F>(line: &str, is_taken: F) -> Result<Course, RecordError>
where
    F: Fn(&str, &str) -> bool,
{
    let mut tokens = line.split_whitespace();
    let head: Vec<&str> = tokens.by_ref().take(RECORD_FIELDS - 1).collect();
    let name = tokens.collect::<Vec<_>>().join(" ");

    if head.len() < RECORD_FIELDS - 1 || name.is_empty() {
        let found = head.len() + usize::from(!name.is_empty());
        return Err(RecordError::FieldCount { found });
    }

    let (dept, number, days, time) = (head[0], head[1], head[2], head[3]);

    if !is_department(dept) {
        return Err(RecordError::Department(dept.to_string()));
    }
    if !is_course_number(number) {
        return Err(RecordError::Number(number.to_string()));
    }
    let days = Days::parse(days).ok_or_else(|| RecordError::Days(days.to_string()))?;

    let len = name.chars().count();
    if len > NAME_MAX_LEN {
        return Err(RecordError::NameTooLong {
            len,
            max: NAME_MAX_LEN,
        });
    }

    if is_taken(dept, number) {
        return Err(RecordError::Duplicate {
            dept: dept.to_string(),
            number: number.to_string(),
        });
    }

    let time = TimeSlot::parse(time).ok_or_else(|| RecordError::Time(time.to_string()))?;

    Ok(Course {
        dept: dept.to_string(),
        number: number.to_string(),
        days,
        time,
        name,
    })
}
