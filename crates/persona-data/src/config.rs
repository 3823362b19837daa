//! Per-operation configuration structs.
//!
//! Every generator operation takes an explicit config struct enumerating its
//! recognised options and defaults. Struct update syntax keeps call sites
//! short:
//!
//! ```
//! use persona_data::{Gender, UsersConfig};
//!
//! let config = UsersConfig {
//!     gender: Some(Gender::Female),
//!     limit: 20,
//!     ..UsersConfig::default()
//! };
//! assert_eq!(config.tpl_name, "person");
//! ```

use crate::record::{AddressRecord, Gender};

/// Birth date output format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BirthFormat {
    /// Unix timestamp of local 00:00:01 on the birth date.
    Timestamp,
    /// MySQL `DATE` layout, an alias for the custom format `y-m-d`.
    #[default]
    Mysql,
    /// Arbitrary format string; the letters `d`, `m`, `y` (any case) become
    /// zero-padded day, zero-padded month, and four-digit year, every other
    /// character is preserved verbatim.
    Custom(String),
}

impl BirthFormat {
    /// Parses a format name the way the public config surface spells them:
    /// `timestamp` and `mysql` select the named variants, anything else is a
    /// custom format string.
    #[must_use]
    pub fn parse(format: &str) -> Self {
        match format.to_lowercase().as_str() {
            "timestamp" => Self::Timestamp,
            "mysql" => Self::Mysql,
            _ => Self::Custom(format.to_owned()),
        }
    }
}

/// Options for [`Generator::birth`](crate::Generator::birth).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthConfig {
    /// Minimum age in years, inclusive.
    pub min: i32,
    /// Maximum age in years, inclusive.
    pub max: i32,
    /// Output format.
    pub format: BirthFormat,
}

impl Default for BirthConfig {
    fn default() -> Self {
        Self {
            min: 16,
            max: 50,
            format: BirthFormat::default(),
        }
    }
}

/// Options for [`Generator::login`](crate::Generator::login).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    /// Person name mixed into the login candidate tokens.
    pub person: Option<String>,
    /// Enforce cross-call uniqueness through the login cache.
    pub unique: bool,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            person: None,
            unique: true,
        }
    }
}

/// Options for [`Generator::email`](crate::Generator::email).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// Person name mixed into the local-part tokens.
    pub person: Option<String>,
    /// Login used as one local-part token; generated with defaults when
    /// absent.
    pub login: Option<String>,
    /// Enforce cross-call uniqueness through the email cache.
    pub unique: bool,
    /// Candidate domains, lowercased on use.
    pub domains: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            person: None,
            login: None,
            unique: true,
            domains: vec![
                "example.com".to_owned(),
                "example.net".to_owned(),
                "example.org".to_owned(),
            ],
        }
    }
}

/// Options for [`Generator::person`](crate::Generator::person).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonConfig {
    /// Name of the template to expand.
    pub tpl_name: String,
    /// Explicit template, taking priority over `tpl_name`.
    pub tpl: Option<String>,
    /// Gender; drawn uniformly when absent.
    pub gender: Option<Gender>,
    /// Birth date format.
    pub birth: BirthFormat,
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            tpl_name: "person".to_owned(),
            tpl: None,
            gender: None,
            birth: BirthFormat::default(),
        }
    }
}

/// Options for [`Generator::address_string`](crate::Generator::address_string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressStringConfig {
    /// Name of the template to expand.
    pub tpl_name: String,
    /// Explicit template, taking priority over `tpl_name`.
    pub tpl: Option<String>,
    /// Address fed to the template; generated fresh when absent.
    pub data: Option<AddressRecord>,
}

impl Default for AddressStringConfig {
    fn default() -> Self {
        Self {
            tpl_name: "address".to_owned(),
            tpl: None,
            data: None,
        }
    }
}

/// Options for [`Generator::users`](crate::Generator::users).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersConfig {
    /// Name of the person template to expand.
    pub tpl_name: String,
    /// Explicit person template, taking priority over `tpl_name`.
    pub tpl: Option<String>,
    /// Gender filter; each record draws uniformly when absent.
    pub gender: Option<Gender>,
    /// Birth date format.
    pub birth: BirthFormat,
    /// Reseeds the generator's RNG once before the batch, making the whole
    /// batch reproducible.
    pub seed: Option<u64>,
    /// Number of records to generate; zero yields an empty batch.
    pub limit: usize,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            tpl_name: "person".to_owned(),
            tpl: None,
            gender: None,
            birth: BirthFormat::default(),
            seed: None,
            limit: 1,
        }
    }
}
