use crate::core::course::Course;
use crate::core::schedule::Calendar;

pub const LIST_HEADER: &str = "Course  Name                           Timeslot";
pub const INVALID_COMMAND: &str = "Invalid command";
pub const PROMPT: &str = "cmd> ";
pub const CALENDAR_HEADER: &str = "         Mon      Tue      Wed      Thu";

const CELL_WIDTH: usize = 9;

pub fn format_course_line(course: &Course) -> String {
    format!(
        "{:>3} {:>3} {:<30} {:>2} {:>5}",
        course.dept, course.number, course.name, course.days, course.time
    )
}

/// Header plus one line per course.
pub fn format_listing<'a, I>(courses: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Course>,
{
    let mut lines = vec![LIST_HEADER.to_string()];
    lines.extend(courses.into_iter().map(format_course_line));
    lines
}

/// Renders the calendar grid. An occupied cell is each course id preceded
/// by two spaces; several ids in one cell are simply concatenated.
pub fn format_calendar(calendar: &Calendar) -> Vec<String> {
    let mut lines = vec![CALENDAR_HEADER.to_string()];
    for (time, row) in calendar.rows() {
        let mut line = format!("{time:>5}");
        for ids in row {
            if ids.is_empty() {
                line.push_str(&" ".repeat(CELL_WIDTH));
            } else {
                for id in ids {
                    line.push_str("  ");
                    line.push_str(id);
                }
            }
        }
        lines.push(line);
    }
    lines
}
