//! Test fixtures for import dialog testing.
//!
//! This module provides sample GEDCOM content and helpers for writing it to
//! a temporary directory.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use gedimport_core::models::{Family, Person, Property};
use gedimport_core::URL;

/// A small tree: three families, one with no husband and one with a
/// dangling wife reference.
pub const SAMPLE_GEDCOM: &str = "\
0 HEAD
1 SOUR gedimport-tests
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Smith/
1 SEX M
1 FAMS @F3@
0 @I2@ INDI
1 NAME Mary /Jones/
1 SEX F
1 FAMS @F3@
0 @I3@ INDI
1 NAME Peter /Smith/
1 FAMC @F3@
1 FAMS @F10@
0 @I4@ INDI
1 NAME Anna
1 FAMS @F10@
0 @F10@ FAM
1 HUSB @I3@
1 WIFE @I4@
0 @F3@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
0 @F2@ FAM
1 WIFE @I99@
0 TRLR
";

/// Writes `content` to `dir/name` and returns the path
pub fn write_gedcom(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write GEDCOM fixture");
    path
}

/// Returns a `file://` URL for an absolute path, escaping spaces
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display().to_string().replace(' ', "%20"))
}

/// Input properties pointing at `path`, plus one unrelated host property
pub fn input_properties(path: &Path) -> Vec<Property> {
    vec![
        Property::new(URL, file_url(path)),
        Property::new("FilterName", "GEDCOM"),
    ]
}

/// A family with optional surnames for husband and wife
pub fn family(id: &str, husband: Option<&str>, wife: Option<&str>) -> Family {
    let mut family = Family::new(id);
    family.husband = husband.map(|s| Person::new(format!("{id}H")).with_surname(s));
    family.wife = wife.map(|s| Person::new(format!("{id}W")).with_surname(s));
    family
}

/// Renders families (with their persons) as GEDCOM
pub fn render_gedcom(families: &[Family]) -> String {
    let mut out = String::from("0 HEAD\n");
    for family in families {
        for person in [&family.husband, &family.wife].into_iter().flatten() {
            let _ = writeln!(out, "0 @{}@ INDI", person.id);
            let _ = writeln!(out, "1 NAME X /{}/", person.surname_or_empty());
        }
    }
    for family in families {
        let _ = writeln!(out, "0 @{}@ FAM", family.id);
        if let Some(h) = &family.husband {
            let _ = writeln!(out, "1 HUSB @{}@", h.id);
        }
        if let Some(w) = &family.wife {
            let _ = writeln!(out, "1 WIFE @{}@", w.id);
        }
    }
    out.push_str("0 TRLR\n");
    out
}
