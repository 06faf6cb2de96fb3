use crate::core::course::{is_department, Days, TimeSlot};
use crate::core::error::CommandError;

/// Only the command word and up to three parameters are counted; anything
/// past the fourth token is ignored.
pub const MAX_TOKENS: usize = 4;

pub const COMMAND_WORDS: [&str; 5] = ["list", "add", "drop", "calendar", "quit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListCourses,
    ListNames,
    ListDepartment(String),
    ListTimeslot(Days, TimeSlot),
    ListSchedule,
    Add { dept: String, number: String },
    Drop { dept: String, number: String },
    Calendar,
    Quit,
}

/// Whether the line starts with a recognised command word. Such lines are
/// echoed back even when the rest of the command is malformed.
pub fn is_command_word(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|word| COMMAND_WORDS.contains(&word))
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().take(MAX_TOKENS).collect();
    let Some((&word, params)) = tokens.split_first() else {
        return Err(CommandError::Empty);
    };

    match word {
        "list" => parse_list(&tokens),
        "add" => {
            expect_tokens("add", &tokens, 3)?;
            Ok(Command::Add {
                dept: params[0].to_string(),
                number: params[1].to_string(),
            })
        }
        "drop" => {
            expect_tokens("drop", &tokens, 3)?;
            Ok(Command::Drop {
                dept: params[0].to_string(),
                number: params[1].to_string(),
            })
        }
        "calendar" => {
            expect_tokens("calendar", &tokens, 1)?;
            Ok(Command::Calendar)
        }
        "quit" => {
            expect_tokens("quit", &tokens, 1)?;
            Ok(Command::Quit)
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_list(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens.get(1).copied() {
        Some("courses") => {
            expect_tokens("list courses", tokens, 2)?;
            Ok(Command::ListCourses)
        }
        Some("names") => {
            expect_tokens("list names", tokens, 2)?;
            Ok(Command::ListNames)
        }
        Some("department") => {
            expect_tokens("list department", tokens, 3)?;
            let dept = tokens[2];
            if !is_department(dept) {
                return Err(CommandError::InvalidArgument {
                    command: "list department",
                    value: dept.to_string(),
                });
            }
            Ok(Command::ListDepartment(dept.to_string()))
        }
        Some("timeslot") => {
            expect_tokens("list timeslot", tokens, 4)?;
            let days = Days::parse(tokens[2]).ok_or_else(|| CommandError::InvalidArgument {
                command: "list timeslot",
                value: tokens[2].to_string(),
            })?;
            let time =
                TimeSlot::parse(tokens[3]).ok_or_else(|| CommandError::InvalidArgument {
                    command: "list timeslot",
                    value: tokens[3].to_string(),
                })?;
            Ok(Command::ListTimeslot(days, time))
        }
        Some("schedule") => {
            expect_tokens("list schedule", tokens, 2)?;
            Ok(Command::ListSchedule)
        }
        Some(other) => Err(CommandError::Unknown(format!("list {other}"))),
        None => Err(CommandError::Unknown("list".to_string())),
    }
}

fn expect_tokens(
    command: &'static str,
    tokens: &[&str],
    expected: usize,
) -> Result<(), CommandError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(CommandError::TokenCount {
            command,
            expected,
            found: tokens.len(),
        })
    }
}
