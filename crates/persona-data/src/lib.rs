//! Locale-aware synthetic person, login, email, and address generation.
//!
//! This crate produces believable fake personal records for tests and data
//! seeding. Names, addresses, and login words come from line-oriented word
//! lists keyed by language; names are shaped by placeholder templates; and
//! derived fields (login, email) are kept unique across calls through
//! shared caches.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Template expansion over `{field}` placeholders with scalar or
//!   choice-list values
//! - Language-keyed word lists with graceful handling of missing files
//! - Cross-call (and, deliberately, cross-generator) login and email
//!   uniqueness
//! - Reproducible batches through explicit seeding
//!
//! # Example
//!
//! ```
//! use persona_data::{Gender, Generator, SharedCaches, UsersConfig};
//!
//! let mut generator = Generator::builder()
//!     .caches(SharedCaches::default())
//!     .build();
//!
//! let users = generator.users(&UsersConfig {
//!     gender: Some(Gender::Female),
//!     seed: Some(42),
//!     limit: 5,
//!     ..UsersConfig::default()
//! });
//!
//! assert_eq!(users.len(), 5);
//! assert!(users.iter().all(|user| user.gender == Gender::Female));
//! ```

mod cache;
mod config;
mod error;
mod generator;
mod record;
mod template;
mod templates;
pub mod users_cli;
mod wordlist;

pub use cache::{CacheCategory, SharedCaches, UniquenessCache};
pub use config::{
    AddressStringConfig, BirthConfig, BirthFormat, EmailConfig, LoginConfig, PersonConfig,
    UsersConfig,
};
pub use error::GeneratorError;
pub use generator::{Generator, GeneratorBuilder};
pub use record::{AddressRecord, BirthValue, Gender, PersonRecord, UserRecord};
pub use template::{TemplateData, TemplateValue, expand};
pub use templates::TemplateSet;
pub use wordlist::WordListLoader;
