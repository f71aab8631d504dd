//! Family extraction from genealogical data files.
//!
//! [`FamilySource`] is the seam between the adapter and whatever reads the
//! genealogical data; [`GedcomParser`] is the built-in GEDCOM reader.

mod parser;
mod traits;

pub use parser::GedcomParser;
pub use traits::FamilySource;
