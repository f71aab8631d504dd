//! Core data models for `gedimport`
//!
//! This module defines the data exchanged between the parser collaborator,
//! the adapter and the host: family records, the host property bag and the
//! structured filter data produced on confirmation.

mod family;
mod filter_data;
mod property;

pub use family::{Family, Person};
pub use filter_data::{
    ImportFilterData, NameOrder, FILTER_DATA, LAYOUT_MAX_DEPTH, NODE_LABEL_IMAGE, ROOT_FAMILY,
};
pub use property::{Property, PropertyBag, PropertyValue};
