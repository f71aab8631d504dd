//! GEDCOM family reader.
//!
//! Reads the `INDI` and `FAM` records of a GEDCOM file and resolves each
//! family's husband and wife. Everything else in the file is skipped.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info_span, warn};

use crate::error::{ExtractionError, ExtractionResult};
use crate::models::{Family, Person};
use crate::tracing::span_names;

use super::traits::FamilySource;

/// `level [@xref@] TAG [value]`
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s+(?:@([^@\s]+)@\s+)?([A-Za-z0-9_]+)(?:\s(.*))?$")
        .expect("Invalid regex pattern")
});

/// The level 0 record the parser is currently inside
enum Record {
    Individual(String),
    Family(String),
    Other,
}

/// A family before husband/wife pointers are resolved
#[derive(Default)]
struct FamilyRecord {
    id: String,
    husband: Option<String>,
    wife: Option<String>,
    children: Vec<String>,
}

/// Importer-side GEDCOM reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct GedcomParser;

impl GedcomParser {
    /// Creates a new parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses GEDCOM content and returns its families in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Parse`] for the first line that is not of
    /// the form `level [@xref@] TAG [value]`.
    pub fn parse_content(&self, content: &str) -> ExtractionResult<Vec<Family>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut people: HashMap<String, Person> = HashMap::new();
        let mut families: Vec<FamilyRecord> = Vec::new();
        let mut family_positions: HashMap<String, usize> = HashMap::new();

        let mut record = Record::Other;
        let mut level1_tag = String::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let captures = LINE_RE.captures(line).ok_or_else(|| ExtractionError::Parse {
                line: index + 1,
                reason: format!("expected `level [@xref@] TAG [value]`, got {line:?}"),
            })?;
            let level: u8 = captures[1].parse().map_err(|_| ExtractionError::Parse {
                line: index + 1,
                reason: "level out of range".to_string(),
            })?;
            let xref = captures.get(2).map(|m| m.as_str());
            let tag = &captures[3];
            let value = captures.get(4).map_or("", |m| m.as_str().trim());

            match level {
                0 => {
                    record = match (xref, tag) {
                        (Some(id), "INDI") => {
                            people
                                .entry(id.to_string())
                                .or_insert_with(|| Person::new(id));
                            Record::Individual(id.to_string())
                        }
                        (Some(id), "FAM") => {
                            if family_positions.contains_key(id) {
                                warn!(family = id, "Duplicate family record, merging");
                            } else {
                                family_positions.insert(id.to_string(), families.len());
                                families.push(FamilyRecord {
                                    id: id.to_string(),
                                    ..FamilyRecord::default()
                                });
                            }
                            Record::Family(id.to_string())
                        }
                        _ => Record::Other,
                    };
                    level1_tag.clear();
                }
                1 => {
                    level1_tag = tag.to_string();
                    match &record {
                        Record::Individual(id) if tag == "NAME" => {
                            if let Some(person) = people.get_mut(id) {
                                apply_name(person, value);
                            }
                        }
                        Record::Family(id) => {
                            if let Some(&pos) = family_positions.get(id) {
                                let family = &mut families[pos];
                                let pointer = strip_pointer(value);
                                match tag {
                                    "HUSB" => family.husband = pointer,
                                    "WIFE" => family.wife = pointer,
                                    "CHIL" => family.children.extend(pointer),
                                    _ => {}
                                }
                            }
                        }
                        _ => {}
                    }
                }
                2 if level1_tag == "NAME" => {
                    if let Record::Individual(id) = &record {
                        if let Some(person) = people.get_mut(id) {
                            match tag {
                                "GIVN" if person.forename.is_none() => {
                                    person.forename = non_empty(value);
                                }
                                "SURN" if person.surname.is_none() => {
                                    person.surname = non_empty(value);
                                }
                                _ => {}
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        let resolve = |pointer: Option<String>, family_id: &str| {
            let pointer = pointer?;
            let person = people.get(&pointer).cloned();
            if person.is_none() {
                debug!(family = family_id, person = %pointer, "Dangling person reference");
            }
            person
        };

        Ok(families
            .into_iter()
            .map(|record| Family {
                husband: resolve(record.husband, &record.id),
                wife: resolve(record.wife, &record.id),
                children: record.children,
                id: record.id,
            })
            .collect())
    }
}

impl FamilySource for GedcomParser {
    fn display_name(&self) -> &'static str {
        "GEDCOM"
    }

    fn load_families(&self, path: &Path) -> ExtractionResult<Vec<Family>> {
        let _span = info_span!(span_names::FAMILY_LOAD, path = %path.display()).entered();

        let bytes = fs::read(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ExtractionError::FileNotFound(path.to_path_buf())
            } else {
                ExtractionError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let content = decode_content(&bytes, path);

        let families = self.parse_content(&content)?;
        debug!(count = families.len(), "GEDCOM families loaded");
        Ok(families)
    }
}

/// Decodes file content as UTF-8, replacing undecodable bytes
fn decode_content<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let content = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = content {
        warn!(path = %path.display(), "File is not valid UTF-8, undecodable bytes replaced");
    }
    content
}

/// Splits a GEDCOM personal name `Forename /Surname/`
fn apply_name(person: &mut Person, value: &str) {
    if person.forename.is_some() || person.surname.is_some() {
        return;
    }
    match value.split_once('/') {
        Some((given, rest)) => {
            let surname = rest.split('/').next().unwrap_or("");
            person.forename = non_empty(given);
            person.surname = non_empty(surname);
        }
        None => person.forename = non_empty(value),
    }
}

/// `@I1@` -> `I1`
fn strip_pointer(value: &str) -> Option<String> {
    let inner = value.trim().strip_prefix('@')?.strip_suffix('@')?;
    non_empty(inner)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
