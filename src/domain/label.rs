//! Entity label vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PII entity categories recognized by the pipeline
///
/// This is the closed label vocabulary the NER model is trained against
/// plus the regex-only categories. Serialized in SCREAMING_SNAKE_CASE to
/// match the wire labels emitted by the token-classification endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    /// Person names
    Name,
    /// Street addresses, estates, transit infrastructure
    Address,
    /// Organizations and companies
    Org,
    /// Hong Kong phone numbers (8-digit local, optional +852)
    Phone,
    /// Bank account numbers
    Account,
    /// HKID numbers
    Id,
    /// Vehicle license plates
    LicensePlate,
    /// Email addresses
    Email,
}

impl EntityLabel {
    /// All labels in the vocabulary
    pub const ALL: [EntityLabel; 8] = [
        Self::Name,
        Self::Address,
        Self::Org,
        Self::Phone,
        Self::Account,
        Self::Id,
        Self::LicensePlate,
        Self::Email,
    ];

    /// Wire/tag label for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::Org => "ORG",
            Self::Phone => "PHONE",
            Self::Account => "ACCOUNT",
            Self::Id => "ID",
            Self::LicensePlate => "LICENSE_PLATE",
            Self::Email => "EMAIL",
        }
    }

    /// Whether boundary expansion applies to this label
    ///
    /// Identifier-like labels with rigid character classes can be grown
    /// over characters a tokenizer boundary split away.
    pub fn is_expandable(&self) -> bool {
        matches!(
            self,
            Self::Id | Self::Account | Self::Phone | Self::LicensePlate
        )
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NAME" | "PER" | "PERSON" => Ok(Self::Name),
            "ADDRESS" | "LOC" | "LOCATION" => Ok(Self::Address),
            "ORG" | "ORGANIZATION" => Ok(Self::Org),
            "PHONE" => Ok(Self::Phone),
            "ACCOUNT" => Ok(Self::Account),
            "ID" | "HKID" => Ok(Self::Id),
            "LICENSE_PLATE" | "LICENSE-PLATE" => Ok(Self::LicensePlate),
            "EMAIL" => Ok(Self::Email),
            other => Err(format!("unknown entity label: {other}")),
        }
    }
}
