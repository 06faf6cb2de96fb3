use tracing::debug;

use crate::core::catalog::{Catalog, CourseKey, CourseOrder};
use crate::core::course::{Course, Days, TimeSlot};
use crate::core::error::ScheduleError;

pub const MAX_COURSES: usize = 10;

/// Day token meeting on each calendar column: Mon, Tue, Wed, Thu.
pub const CALENDAR_COLUMNS: [Days; 4] = [Days::MW, Days::TH, Days::MW, Days::TH];

/// A student's schedule: at most [`MAX_COURSES`] catalog courses, no
/// repeated course id and no two courses in the same timeslot.
///
/// Entries are keys into the [`Catalog`] the courses were added from; the
/// schedule never owns course data.
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    entries: Vec<CourseKey>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_COURSES
    }

    pub fn add(
        &mut self,
        catalog: &Catalog,
        dept: &str,
        number: &str,
    ) -> Result<(), ScheduleError> {
        if self.is_full() {
            return Err(ScheduleError::Full { max: MAX_COURSES });
        }

        let key = catalog
            .find(dept, number)
            .ok_or_else(|| ScheduleError::UnknownCourse {
                dept: dept.to_string(),
                number: number.to_string(),
            })?;

        if self.entries.contains(&key) {
            return Err(ScheduleError::AlreadyScheduled {
                dept: dept.to_string(),
                number: number.to_string(),
            });
        }

        let course = catalog.get(key);
        if let Some(other) = self
            .courses(catalog)
            .find(|scheduled| scheduled.timeslot() == course.timeslot())
        {
            return Err(ScheduleError::TimeslotConflict {
                dept: dept.to_string(),
                number: number.to_string(),
                other: other.id(),
                days: course.days.as_str(),
                time: course.time.as_str(),
            });
        }

        self.entries.push(key);
        debug!(course = %course.id(), size = self.len(), "added course to schedule");
        Ok(())
    }

    /// Removes a course; the remaining entries keep their relative order.
    pub fn drop_course(
        &mut self,
        catalog: &Catalog,
        dept: &str,
        number: &str,
    ) -> Result<(), ScheduleError> {
        let position = self
            .entries
            .iter()
            .position(|&key| catalog.get(key).has_id(dept, number))
            .ok_or_else(|| ScheduleError::NotScheduled {
                dept: dept.to_string(),
                number: number.to_string(),
            })?;

        self.entries.remove(position);
        debug!(dept, number, size = self.len(), "dropped course from schedule");
        Ok(())
    }

    pub fn sort(&mut self, catalog: &Catalog, order: CourseOrder) {
        self.entries
            .sort_by(|&a, &b| order.compare(catalog.get(a), catalog.get(b)));
    }

    pub fn courses<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Course> + 'a {
        self.entries.iter().map(move |&key| catalog.get(key))
    }

    pub fn calendar(&self, catalog: &Catalog) -> Calendar {
        let mut cells: [[Vec<String>; 4]; 6] = Default::default();

        for (row, time) in TimeSlot::ALL.iter().enumerate() {
            for (column, days) in CALENDAR_COLUMNS.iter().enumerate() {
                cells[row][column] = self
                    .courses(catalog)
                    .filter(|course| course.timeslot() == (*days, *time))
                    .map(Course::id)
                    .collect();
            }
        }

        Calendar { cells }
    }
}

/// Weekly grid of scheduled course ids: one row per time slot in canonical
/// order, one column per entry of [`CALENDAR_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    cells: [[Vec<String>; 4]; 6],
}

impl Calendar {
    pub fn cell(&self, time: TimeSlot, column: usize) -> &[String] {
        &self.cells[time.index()][column]
    }

    pub fn rows(&self) -> impl Iterator<Item = (TimeSlot, &[Vec<String>; 4])> {
        TimeSlot::ALL.iter().copied().zip(self.cells.iter())
    }
}
