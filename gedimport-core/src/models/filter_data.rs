//! Structured import configuration produced when the dialog is confirmed.

use serde::{Deserialize, Serialize};

use super::property::PropertyBag;
use crate::config::ImportSettings;
use crate::error::{ProtocolError, ProtocolResult};

/// Property name of the nested configuration entry
pub const FILTER_DATA: &str = "FilterData";
/// Nested key holding the root family identifier
pub const ROOT_FAMILY: &str = "rootFamily";
/// Nested key holding the generation depth limit
pub const LAYOUT_MAX_DEPTH: &str = "layoutMaxDepth";
/// Nested key holding the node label template
pub const NODE_LABEL_IMAGE: &str = "nodeLabelImage";

/// Whether person labels start with the forename or the surname
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameOrder {
    /// "John Smith"
    #[default]
    ForenameFirst,
    /// "Smith John"
    SurnameFirst,
}

impl NameOrder {
    /// Maps the "Forename first" checkbox state
    #[must_use]
    pub const fn from_forename_first(checked: bool) -> Self {
        if checked {
            Self::ForenameFirst
        } else {
            Self::SurnameFirst
        }
    }
}

/// The three values collected by the dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFilterData {
    /// Identifier of the family the export starts from
    pub root_family: String,
    /// Number of generations to include around the root family
    pub layout_max_depth: u32,
    /// Name ordering of person labels
    pub name_order: NameOrder,
}

impl ImportFilterData {
    /// Converts to the nested property bag stored under [`FILTER_DATA`].
    ///
    /// The name order is written as the matching label template constant
    /// from `settings`.
    #[must_use]
    pub fn to_property_bag(&self, settings: &ImportSettings) -> PropertyBag {
        let mut bag = PropertyBag::new();
        bag.insert(ROOT_FAMILY, self.root_family.as_str());
        bag.insert(LAYOUT_MAX_DEPTH, i64::from(self.layout_max_depth));
        bag.insert(NODE_LABEL_IMAGE, settings.label_template(self.name_order));
        bag
    }

    /// Reads filter data back out of a host property bag.
    ///
    /// Returns `Ok(None)` if the bag carries no [`FILTER_DATA`] entry.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] if the entry exists but is malformed.
    pub fn from_host_bag(
        bag: &PropertyBag,
        settings: &ImportSettings,
    ) -> ProtocolResult<Option<Self>> {
        let Some(value) = bag.get(FILTER_DATA) else {
            return Ok(None);
        };
        let nested: PropertyBag = value
            .as_sequence()
            .ok_or_else(|| ProtocolError::WrongType {
                name: FILTER_DATA.to_string(),
                expected: "sequence",
                found: value.type_name(),
            })?
            .iter()
            .cloned()
            .collect();

        let root_family = nested
            .get_str(ROOT_FAMILY)?
            .ok_or(ProtocolError::MissingProperty(ROOT_FAMILY))?
            .to_string();

        let depth = nested
            .get(LAYOUT_MAX_DEPTH)
            .ok_or(ProtocolError::MissingProperty(LAYOUT_MAX_DEPTH))?;
        let layout_max_depth = depth
            .as_int()
            .and_then(|d| u32::try_from(d).ok())
            .ok_or_else(|| ProtocolError::WrongType {
                name: LAYOUT_MAX_DEPTH.to_string(),
                expected: "non-negative integer",
                found: depth.type_name(),
            })?;

        let template = nested
            .get_str(NODE_LABEL_IMAGE)?
            .ok_or(ProtocolError::MissingProperty(NODE_LABEL_IMAGE))?;
        let name_order = if template == settings.node_label_image_swapped {
            NameOrder::SurnameFirst
        } else {
            NameOrder::ForenameFirst
        };

        Ok(Some(Self {
            root_family,
            layout_max_depth,
            name_order,
        }))
    }
}
