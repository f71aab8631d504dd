//! Import settings model
//!
//! Defaults offered by the dialog and the two node label templates handed to
//! the downstream exporter, stored in config.toml.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::models::NameOrder;

/// Label template with the forename on the first line
pub const NODE_LABEL_IMAGE_DEFAULT: &str = "<table border=\"0\" cellborder=\"0\"><tr><td>\
<img src=\"images/%(picture)s.jpg\"/></td></tr><tr><td>%(forename)s<br/>%(surname)s<br/>\
%(birth)s-%(death)s</td></tr></table>";

/// Label template with the surname on the first line
pub const NODE_LABEL_IMAGE_SWAPPED_DEFAULT: &str = "<table border=\"0\" cellborder=\"0\"><tr><td>\
<img src=\"images/%(picture)s.jpg\"/></td></tr><tr><td>%(surname)s<br/>%(forename)s<br/>\
%(birth)s-%(death)s</td></tr></table>";

/// Defaults for the import dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Initial value of the generation spinner
    #[serde(default = "default_layout_max_depth")]
    pub layout_max_depth: u32,
    /// Initial state of the "Forename first" checkbox
    #[serde(default = "default_true")]
    pub forename_first: bool,
    /// Template used for [`NameOrder::ForenameFirst`]
    #[serde(default = "default_node_label_image")]
    pub node_label_image: String,
    /// Template used for [`NameOrder::SurnameFirst`]
    #[serde(default = "default_node_label_image_swapped")]
    pub node_label_image_swapped: String,
    /// Title of the dialog window
    #[serde(default = "default_dialog_title")]
    pub dialog_title: String,
}

const fn default_layout_max_depth() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

fn default_node_label_image() -> String {
    NODE_LABEL_IMAGE_DEFAULT.to_string()
}

fn default_node_label_image_swapped() -> String {
    NODE_LABEL_IMAGE_SWAPPED_DEFAULT.to_string()
}

fn default_dialog_title() -> String {
    "GEDCOM Import".to_string()
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            layout_max_depth: default_layout_max_depth(),
            forename_first: default_true(),
            node_label_image: default_node_label_image(),
            node_label_image_swapped: default_node_label_image_swapped(),
            dialog_title: default_dialog_title(),
        }
    }
}

impl ImportSettings {
    /// Returns the label template constant for a name order
    #[must_use]
    pub fn label_template(&self, order: NameOrder) -> &str {
        match order {
            NameOrder::ForenameFirst => &self.node_label_image,
            NameOrder::SurnameFirst => &self.node_label_image_swapped,
        }
    }

    /// Validates the settings
    ///
    /// # Errors
    ///
    /// Returns an error if a label template is empty or both templates are
    /// identical, which would make the two name orders indistinguishable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.node_label_image.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "node_label_image".to_string(),
                reason: "Label template cannot be empty".to_string(),
            });
        }
        if self.node_label_image_swapped.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "node_label_image_swapped".to_string(),
                reason: "Label template cannot be empty".to_string(),
            });
        }
        if self.node_label_image == self.node_label_image_swapped {
            return Err(ConfigError::Validation {
                field: "node_label_image_swapped".to_string(),
                reason: "Must differ from node_label_image".to_string(),
            });
        }
        Ok(())
    }
}
