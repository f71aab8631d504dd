//! Family and person records as produced by the parser collaborator.

use serde::{Deserialize, Serialize};

/// A person referenced from a family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Identifier without the `@` delimiters (e.g. `I12`)
    pub id: String,
    /// Given names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

impl Person {
    /// Creates a person with only an identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            forename: None,
            surname: None,
        }
    }

    /// Sets the surname
    #[must_use]
    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    /// Returns the surname, or `""` when absent
    #[must_use]
    pub fn surname_or_empty(&self) -> &str {
        self.surname.as_deref().unwrap_or("")
    }
}

/// A family unit: a partnership and its two member references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    /// Identifier without the `@` delimiters (e.g. `F3`)
    pub id: String,
    /// The husband, if recorded and resolvable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband: Option<Person>,
    /// The wife, if recorded and resolvable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife: Option<Person>,
    /// Identifiers of the children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Family {
    /// Creates a family with no members
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the husband
    #[must_use]
    pub fn with_husband(mut self, person: Person) -> Self {
        self.husband = Some(person);
        self
    }

    /// Sets the wife
    #[must_use]
    pub fn with_wife(mut self, person: Person) -> Self {
        self.wife = Some(person);
        self
    }

    /// Surname of the husband, `""` when unknown
    #[must_use]
    pub fn husband_surname(&self) -> &str {
        self.husband.as_ref().map_or("", Person::surname_or_empty)
    }

    /// Surname of the wife, `""` when unknown
    #[must_use]
    pub fn wife_surname(&self) -> &str {
        self.wife.as_ref().map_or("", Person::surname_or_empty)
    }
}
