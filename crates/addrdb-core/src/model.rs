// crates/addrdb-core/src/model.rs
use crate::error::AddressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One record of the address dataset.
///
/// Records have no identity of their own: two equal records are two entries,
/// indexed independently and returned independently. The JSON shape is the
/// one of the upstream dataset (camelCase keys, every value a string).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub county: String,
    pub district: String,
    pub municipality: String,
    pub municipality_number: String,
    pub post_number: String,
    pub street: String,
    /// Free-text kind of address (the upstream `type` key).
    #[serde(rename = "type")]
    pub kind: String,
    pub type_code: String,
}

impl Address {
    /// Value of a single field, by name.
    pub fn field(&self, field: AddressField) -> &str {
        match field {
            AddressField::City => &self.city,
            AddressField::County => &self.county,
            AddressField::District => &self.district,
            AddressField::Municipality => &self.municipality,
            AddressField::MunicipalityNumber => &self.municipality_number,
            AddressField::PostNumber => &self.post_number,
            AddressField::Street => &self.street,
            AddressField::Type => &self.kind,
            AddressField::TypeCode => &self.type_code,
        }
    }
}

/// The fields of an [`Address`] that an index can be configured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    City,
    County,
    District,
    Municipality,
    MunicipalityNumber,
    PostNumber,
    Street,
    Type,
    TypeCode,
}

impl AddressField {
    pub const ALL: [AddressField; 9] = [
        AddressField::City,
        AddressField::County,
        AddressField::District,
        AddressField::Municipality,
        AddressField::MunicipalityNumber,
        AddressField::PostNumber,
        AddressField::Street,
        AddressField::Type,
        AddressField::TypeCode,
    ];

    /// Street, city and post number: what a person types into an address box.
    pub const DEFAULT_INDEXED: [AddressField; 3] = [
        AddressField::Street,
        AddressField::City,
        AddressField::PostNumber,
    ];

    /// The JSON key of this field in the dataset.
    pub fn key(self) -> &'static str {
        match self {
            AddressField::City => "city",
            AddressField::County => "county",
            AddressField::District => "district",
            AddressField::Municipality => "municipality",
            AddressField::MunicipalityNumber => "municipalityNumber",
            AddressField::PostNumber => "postNumber",
            AddressField::Street => "street",
            AddressField::Type => "type",
            AddressField::TypeCode => "typeCode",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AddressField {
    type Err = AddressError;

    /// Accepts the JSON key (`postNumber`) or its snake_case spelling
    /// (`post_number`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect();
        AddressField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| AddressError::InvalidConfig(format!("unknown address field: {s}")))
    }
}

/// Simple aggregate statistics for a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Dataset records held by the index, indexable or not.
    pub entries: usize,
    /// Distinct prefix keys.
    pub terms: usize,
    /// Total (key, entry) pairs across all keys.
    pub postings: usize,
}
