//! Family source trait.

use std::path::Path;

use crate::error::ExtractionResult;
use crate::models::Family;

/// Trait for genealogical data readers.
///
/// Implementations read a file and return its family units in file order.
/// Person references that cannot be resolved are returned as `None` rather
/// than failing the whole load.
pub trait FamilySource {
    /// Returns a human-readable name for this source format
    fn display_name(&self) -> &'static str;

    /// Loads all families from `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    fn load_families(&self, path: &Path) -> ExtractionResult<Vec<Family>>;
}

impl<T: FamilySource + ?Sized> FamilySource for &T {
    fn display_name(&self) -> &'static str {
        (**self).display_name()
    }

    fn load_families(&self, path: &Path) -> ExtractionResult<Vec<Family>> {
        (**self).load_families(path)
    }
}
