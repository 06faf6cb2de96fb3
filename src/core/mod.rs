pub mod catalog;
pub mod command;
pub mod course;
pub mod error;
pub mod formatter;
pub mod schedule;

use std::path::PathBuf;

use catalog::Catalog;
use error::CatalogError;

/// Builds one catalog from every file, in order. Stops at the first file
/// that cannot be opened, read or validated.
pub fn load_catalog(paths: &[PathBuf]) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    for path in paths {
        catalog.load_file(path)?;
    }
    Ok(catalog)
}
