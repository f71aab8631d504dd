//! Display-keyed lookup of family units.
//!
//! Each family is labelled `"<id> (<husband surname>-<wife surname>)"`. The
//! label is both what the user sees in the root family list and the key used
//! to find the family again once the dialog is confirmed.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info_span, warn};

use crate::error::ExtractionResult;
use crate::gedcom::FamilySource;
use crate::models::Family;
use crate::tracing::span_names;

/// Builds the display key of a family.
///
/// Missing persons and missing surnames contribute an empty segment, so a
/// family with neither partner recorded becomes `"F9 (-)"`.
#[must_use]
pub fn display_key(family: &Family) -> String {
    format!(
        "{} ({}-{})",
        family.id,
        family.husband_surname(),
        family.wife_surname()
    )
}

/// Sort key for family identifiers.
///
/// Identifiers are a letter prefix followed by digits and order by the
/// integer value of the digits, so `F2` precedes `F10`. Identifiers that do
/// not follow that shape sort after all numeric ones, by their text.
#[must_use]
pub fn identifier_order(id: &str) -> (bool, u64, &str) {
    let digits = id.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    match digits.parse::<u64>() {
        Ok(number) if !digits.is_empty() => (false, number, id),
        _ => (true, 0, id),
    }
}

/// Mapping from display key to family, with keys in display order
#[derive(Debug, Clone, Default)]
pub struct FamilyIndex {
    families: HashMap<String, Family>,
    keys: Vec<String>,
}

impl FamilyIndex {
    /// Loads `path` through `source` and indexes the result.
    ///
    /// # Errors
    ///
    /// Propagates any error from the source; nothing is recovered here.
    pub fn build<S>(source: &S, path: &Path) -> ExtractionResult<Self>
    where
        S: FamilySource + ?Sized,
    {
        let families = source.load_families(path)?;
        Ok(Self::from_families(families))
    }

    /// Indexes an already loaded family list.
    ///
    /// Should the list repeat an identifier, the later family replaces the
    /// earlier one so the index holds one entry per identifier.
    #[must_use]
    pub fn from_families(families: Vec<Family>) -> Self {
        let _span = info_span!(span_names::FAMILY_INDEX, input = families.len()).entered();

        let mut by_id: HashMap<String, Family> = HashMap::with_capacity(families.len());
        for family in families {
            if let Some(previous) = by_id.insert(family.id.clone(), family) {
                warn!(family = %previous.id, "Family identifier repeated, keeping the last");
            }
        }

        let mut ordered: Vec<Family> = by_id.into_values().collect();
        ordered.sort_by(|a, b| identifier_order(&a.id).cmp(&identifier_order(&b.id)));

        let mut index = Self {
            families: HashMap::with_capacity(ordered.len()),
            keys: Vec::with_capacity(ordered.len()),
        };
        for family in ordered {
            let key = display_key(&family);
            index.keys.push(key.clone());
            index.families.insert(key, family);
        }

        debug!(entries = index.keys.len(), "Family index built");
        index
    }

    /// Display keys in ascending identifier order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Looks up a family by its display key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Family> {
        self.families.get(key)
    }

    /// Iterates `(display key, family)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Family)> {
        self.keys
            .iter()
            .filter_map(|key| self.families.get(key).map(|f| (key.as_str(), f)))
    }

    /// Number of indexed families
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no families were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
