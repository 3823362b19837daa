//! CLI support for generating user batches.
//!
//! This module provides parsing and generation helpers for the
//! `persona-data-gen` binary. The binary delegates to these functions so
//! they can be exercised in tests without spawning a subprocess.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{BirthFormat, UsersConfig};
use crate::generator::Generator;
use crate::record::Gender;

/// Parsed options for the user generation CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    limit: Option<usize>,
    gender: Option<Gender>,
    seed: Option<u64>,
    birth: Option<BirthFormat>,
    language: Option<String>,
    data_dir: Option<PathBuf>,
}

impl Options {
    /// Returns the requested batch size, defaulting to one record.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(1)
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments into generation options.
///
/// # Errors
///
/// Returns [`CliError`] when a flag is unknown, misses its value, or the
/// value cannot be parsed.
///
/// # Example
///
/// ```
/// use persona_data::users_cli::{ParseOutcome, parse_args};
///
/// let args = vec!["--limit".to_string(), "5".to_string()];
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
///
/// assert_eq!(options.limit(), 5);
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--limit" => {
                let value = next_value(&mut args, "--limit")?;
                options.limit = Some(parse_number(&value, "--limit")?);
            }
            "--gender" => {
                let value = next_value(&mut args, "--gender")?;
                options.gender = Some(parse_gender(&value)?);
            }
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                options.seed = Some(parse_number(&value, "--seed")?);
            }
            "--birth" => {
                let value = next_value(&mut args, "--birth")?;
                options.birth = Some(BirthFormat::parse(&value));
            }
            "--language" => {
                let value = next_value(&mut args, "--language")?;
                options.language = Some(value);
            }
            "--data-dir" => {
                let value = next_value(&mut args, "--data-dir")?;
                options.data_dir = Some(PathBuf::from(value));
            }
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    Ok(ParseOutcome::Options(options))
}

/// Generates the requested batch and renders it as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CliError::Serialize`] when the batch cannot be rendered.
pub fn run(options: &Options) -> Result<String, CliError> {
    let mut builder = Generator::builder();
    if let Some(language) = &options.language {
        builder = builder.language(language);
    }
    if let Some(data_dir) = &options.data_dir {
        builder = builder.data_dir(data_dir);
    }
    let mut generator = builder.build();
    let users = generator.users(&UsersConfig {
        gender: options.gender,
        birth: options.birth.clone().unwrap_or_default(),
        seed: options.seed,
        limit: options.limit(),
        ..UsersConfig::default()
    });
    serde_json::to_string_pretty(&users).map_err(|err| CliError::Serialize {
        message: err.to_string(),
    })
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}

fn parse_gender(value: &str) -> Result<Gender, CliError> {
    match value.to_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        _ => Err(CliError::InvalidGender {
            value: value.to_owned(),
        }),
    }
}

/// Errors surfaced by the CLI parsing and generation flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The gender value was neither `male` nor `female`.
    #[error("invalid gender: '{value}' (expected 'male' or 'female')")]
    InvalidGender {
        /// Raw value supplied for the flag.
        value: String,
    },
    /// The generated batch could not be rendered as JSON.
    #[error("failed to render batch: {message}")]
    Serialize {
        /// Serializer error message.
        message: String,
    },
}
