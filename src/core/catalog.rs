use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::core::course::{parse_record, Course, Days, TimeSlot};
use crate::core::error::CatalogError;

/// Stable handle to a course stored in a [`Catalog`].
///
/// Keys index the insertion-ordered record arena, so they survive any
/// reordering of the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseKey(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseOrder {
    /// Department, then number.
    ById,
    /// Name, then department, then number.
    ByName,
    /// Days (`MW` before `TH`), then chronological time slot.
    BySlot,
}

impl CourseOrder {
    pub fn compare(self, a: &Course, b: &Course) -> Ordering {
        match self {
            CourseOrder::ById => a.dept.cmp(&b.dept).then_with(|| a.number.cmp(&b.number)),
            CourseOrder::ByName => a
                .name
                .cmp(&b.name)
                .then_with(|| CourseOrder::ById.compare(a, b)),
            CourseOrder::BySlot => a.days.cmp(&b.days).then_with(|| a.time.cmp(&b.time)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseFilter<'a> {
    All,
    Department(&'a str),
    Timeslot(Days, TimeSlot),
}

impl CourseFilter<'_> {
    pub fn matches(&self, course: &Course) -> bool {
        match *self {
            CourseFilter::All => true,
            CourseFilter::Department(dept) => course.dept == dept,
            CourseFilter::Timeslot(days, time) => course.timeslot() == (days, time),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    records: Vec<Course>,
    order: Vec<usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: CourseKey) -> &Course {
        &self.records[key.0]
    }

    pub fn find(&self, dept: &str, number: &str) -> Option<CourseKey> {
        self.records
            .iter()
            .position(|course| course.has_id(dept, number))
            .map(CourseKey)
    }

    /// Reads a catalog file and ingests every line of it.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let path_str = path.display().to_string();
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path_str.clone(),
            source,
        })?;

        let reader = BufReader::new(file);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|source| CatalogError::Read {
                path: path_str.clone(),
                source,
            })?;
            lines.push(line.trim_end_matches('\r').to_string());
        }

        let added = self.ingest(&path_str, lines)?;
        info!(path = %path_str, added, total = self.len(), "loaded course file");
        Ok(added)
    }

    /// Validates and appends every line from `source`.
    ///
    /// Either all lines are accepted or none are: a rejected line leaves the
    /// catalog exactly as it was. Duplicate ids are checked against courses
    /// already in the catalog as well as earlier lines of the same source.
    pub fn ingest<I, S>(&mut self, source: &str, lines: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut staged: Vec<Course> = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            let is_taken = |dept: &str, number: &str| {
                self.records
                    .iter()
                    .chain(staged.iter())
                    .any(|course| course.has_id(dept, number))
            };

            match parse_record(line.as_ref(), is_taken) {
                Ok(course) => staged.push(course),
                Err(reason) => {
                    debug!(source, line = index + 1, %reason, "rejected course record");
                    return Err(CatalogError::InvalidCourseFile {
                        path: source.to_string(),
                        line: index + 1,
                        reason,
                    });
                }
            }
        }

        let added = staged.len();
        let start = self.records.len();
        self.records.extend(staged);
        self.order.extend(start..self.records.len());
        Ok(added)
    }

    pub fn sort(&mut self, order: CourseOrder) {
        let records = &self.records;
        self.order
            .sort_by(|&a, &b| order.compare(&records[a], &records[b]));
    }

    /// Courses in the current catalog order that pass `filter`.
    pub fn list<'a>(&'a self, filter: CourseFilter<'a>) -> impl Iterator<Item = &'a Course> + 'a {
        self.order
            .iter()
            .map(move |&index| &self.records[index])
            .filter(move |course| filter.matches(course))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::core::error::RecordError;

    const SAMPLE: [&str; 5] = [
        "CSC 316 TH 1:00 Data Structures and Algorithms",
        "CSC 216 MW 11:30 Software Development I",
        "MAT 141 MW 8:30 Calculus I",
        "MAE 206 TH 10:00 Engineering Statics",
        "CSC 226 MW 10:00 Discrete Mathematics",
    ];

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.ingest("courses.txt", SAMPLE).unwrap();
        catalog
    }

    fn ids(catalog: &Catalog, filter: CourseFilter<'_>) -> Vec<String> {
        catalog.list(filter).map(Course::id).collect()
    }

    #[test]
    fn test_ingest_preserves_insertion_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            ids(&catalog, CourseFilter::All),
            vec!["CSC 316", "CSC 216", "MAT 141", "MAE 206", "CSC 226"]
        );
    }

    #[test]
    fn test_reingest_is_deterministic() {
        let first = sample_catalog();
        let second = sample_catalog();
        let a: Vec<&Course> = first.list(CourseFilter::All).collect();
        let b: Vec<&Course> = second.list(CourseFilter::All).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_id_is_fatal_and_leaves_catalog_untouched() {
        let mut catalog = sample_catalog();
        let err = catalog
            .ingest(
                "more.txt",
                [
                    "PSY 200 MW 2:30 Intro Psychology",
                    "CSC 216 TH 4:00 Completely Different",
                ],
            )
            .unwrap_err();

        match err {
            CatalogError::InvalidCourseFile { path, line, reason } => {
                assert_eq!(path, "more.txt");
                assert_eq!(line, 2);
                assert!(matches!(reason, RecordError::Duplicate { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(catalog.len(), 5);
        assert!(catalog.find("PSY", "200").is_none());
    }

    #[test]
    fn test_duplicate_within_one_source() {
        let mut catalog = Catalog::new();
        let err = catalog
            .ingest(
                "dup.txt",
                ["CSC 216 MW 8:30 One", "CSC 216 MW 8:30 One"],
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid course file: dup.txt");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_sort_by_id() {
        let mut catalog = sample_catalog();
        catalog.sort(CourseOrder::ById);
        assert_eq!(
            ids(&catalog, CourseFilter::All),
            vec!["CSC 216", "CSC 226", "CSC 316", "MAE 206", "MAT 141"]
        );
    }

    #[test]
    fn test_sort_by_name_breaks_ties_by_id() {
        let mut catalog = Catalog::new();
        catalog
            .ingest(
                "names.txt",
                [
                    "HIS 300 MW 8:30 Seminar",
                    "ENG 300 TH 8:30 Seminar",
                    "ENG 101 MW 10:00 Seminar",
                    "ART 100 MW 1:00 Drawing",
                ],
            )
            .unwrap();
        catalog.sort(CourseOrder::ByName);
        assert_eq!(
            ids(&catalog, CourseFilter::All),
            vec!["ART 100", "ENG 101", "ENG 300", "HIS 300"]
        );
    }

    #[test]
    fn test_repeated_sorts_restore_id_order() {
        let mut catalog = sample_catalog();
        catalog.sort(CourseOrder::ById);
        let by_id = ids(&catalog, CourseFilter::All);
        catalog.sort(CourseOrder::ByName);
        catalog.sort(CourseOrder::ById);
        assert_eq!(ids(&catalog, CourseFilter::All), by_id);
    }

    #[test]
    fn test_slot_order_uses_canonical_time_index() {
        let mut catalog = sample_catalog();
        catalog.sort(CourseOrder::BySlot);
        assert_eq!(
            ids(&catalog, CourseFilter::All),
            vec!["MAT 141", "CSC 226", "CSC 216", "MAE 206", "CSC 316"]
        );
    }

    #[test]
    fn test_filters() {
        let mut catalog = sample_catalog();
        catalog.sort(CourseOrder::ById);
        assert_eq!(
            ids(&catalog, CourseFilter::Department("CSC")),
            vec!["CSC 216", "CSC 226", "CSC 316"]
        );
        assert_eq!(
            ids(&catalog, CourseFilter::Timeslot(Days::MW, TimeSlot::Ten)),
            vec!["CSC 226"]
        );
        assert!(ids(&catalog, CourseFilter::Department("ZZZ")).is_empty());
    }

    #[test]
    fn test_keys_survive_sorting() {
        let mut catalog = sample_catalog();
        let key = catalog.find("MAE", "206").unwrap();
        catalog.sort(CourseOrder::ByName);
        assert_eq!(catalog.get(key).id(), "MAE 206");
    }

    #[test]
    fn test_load_file_and_duplicates_across_files() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        writeln!(first, "CSC 216 MW 11:30 Software Development I").unwrap();
        write!(first, "CSC 230 TH 2:30 C and Software Tools\r\n").unwrap();

        let mut second = tempfile::NamedTempFile::new().unwrap();
        writeln!(second, "CSC 230 MW 4:00 Another Section").unwrap();

        let mut catalog = Catalog::new();
        assert_eq!(catalog.load_file(first.path()).unwrap(), 2);
        assert_eq!(catalog.get(catalog.find("CSC", "230").unwrap()).name, "C and Software Tools");

        let err = catalog.load_file(second.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCourseFile { .. }));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_blank_line_mid_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CSC 216 MW 11:30 Software Development I").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "CSC 230 TH 2:30 C and Software Tools").unwrap();

        let err = Catalog::new().load_file(file.path()).unwrap_err();
        match err {
            CatalogError::InvalidCourseFile { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, RecordError::FieldCount { found: 0 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = Catalog::new().load_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Open { .. }));
        assert!(err.to_string().starts_with("Can't open file: "));
    }
}
