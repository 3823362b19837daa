//! Generated record types.
//!
//! These are the output types of the generator: plain serialisable data with
//! no behaviour beyond a few accessors, ready to feed fixtures or seed
//! scripts.

use serde::{Deserialize, Serialize};

/// Gender of a generated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male name lists and the `men` avatar pool.
    Male,
    /// Female name lists and the `women` avatar pool.
    Female,
}

impl Gender {
    /// Returns the lowercase name used in data paths and serialised output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// A generated birth date.
///
/// Serialises untagged, so a timestamp renders as a JSON number and a
/// formatted date as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BirthValue {
    /// Unix timestamp of local 00:00:01 on the birth date.
    Timestamp(i64),
    /// The birth date rendered through a date format string.
    Text(String),
}

/// A generated postal address.
///
/// `region` is empty when the source city line carries only
/// `postcode/city` rather than `postcode/region/city`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Country name, the first line of the cities list.
    pub country: String,
    /// Postal code of the chosen city line.
    pub postcode: String,
    /// Region of the chosen city line; empty for two-part lines.
    pub region: String,
    /// City of the chosen city line.
    pub city: String,
    /// Street drawn from the streets list.
    pub street: String,
    /// House number, uniform in `9..=199`.
    pub number: u32,
}

/// A generated person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Full name, expanded from the person template.
    pub name: String,
    /// Gender the name lists were drawn from.
    pub gender: Gender,
    /// Birth date in the requested format.
    pub birth: BirthValue,
    /// Postal address.
    pub address: AddressRecord,
    /// Avatar portrait URL.
    pub avatar: String,
}

/// A generated user, composing a person with derived login and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// 1-based sequence index over emitted records in a batch.
    pub id: usize,
    /// Full name.
    pub name: String,
    /// Avatar portrait URL.
    pub avatar: String,
    /// Gender the name lists were drawn from.
    pub gender: Gender,
    /// Birth date in the requested format.
    pub birth: BirthValue,
    /// Login derived from the login word list and the name.
    pub login: String,
    /// Email derived from the name and login.
    pub email: String,
    /// Postal address.
    pub address: AddressRecord,
}
