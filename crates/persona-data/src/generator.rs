//! The generator: field generators and the user batch builder.
//!
//! A [`Generator`] owns its RNG, its word-list loader, and its merged
//! template set, and borrows uniqueness caches through a [`SharedCaches`]
//! handle. Every operation takes an explicit config struct from
//! [`crate::config`] and degrades rather than fails: the only error surfaced
//! is a template name that resolves to nothing.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate, TimeZone};
use deunicode::deunicode;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cache::{CacheCategory, SharedCaches};
use crate::config::{
    AddressStringConfig, BirthConfig, BirthFormat, EmailConfig, LoginConfig, PersonConfig,
    UsersConfig,
};
use crate::error::GeneratorError;
use crate::record::{AddressRecord, BirthValue, Gender, PersonRecord, UserRecord};
use crate::template::{self, TemplateData, TemplateValue};
use crate::templates::TemplateSet;
use crate::wordlist::WordListLoader;

/// Language used when none is configured.
const DEFAULT_LANGUAGE: &str = "en";

/// Lowest street number generated for addresses.
const STREET_NUMBER_MIN: u32 = 9;

/// Highest street number generated for addresses.
const STREET_NUMBER_MAX: u32 = 199;

/// Number of portrait indices per avatar pool.
const AVATAR_POOL_SIZE: u8 = 100;

/// Maximum number of tokens kept when deriving a login or email local part.
const MAX_DERIVED_TOKENS: usize = 2;

/// Numerator of the probability that person-derived login tokens are
/// shuffled.
const LOGIN_SHUFFLE_NUMERATOR: u32 = 5;

/// Denominator of the login token shuffle probability.
const LOGIN_SHUFFLE_DENOMINATOR: u32 = 7;

/// Returns the data directory shipped with the crate.
fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// The two portrait pools of the avatar image service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AvatarPool {
    Men,
    Women,
}

impl AvatarPool {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }
}

/// Lazily loaded per-gender name-part lists.
#[derive(Debug, Default)]
struct NameParts {
    male: TemplateData,
    female: TemplateData,
}

impl NameParts {
    const fn for_gender(&self, gender: Gender) -> &TemplateData {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}

/// Builder for [`Generator`] instances.
///
/// Defaults: the crate's shipped data directory, language `en`, the
/// process-wide shared caches, no template overrides, and an OS-seeded RNG.
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    data_dir: PathBuf,
    language: String,
    caches: SharedCaches,
    overrides: TemplateSet,
    seed: Option<u64>,
}

impl GeneratorBuilder {
    fn new() -> Self {
        Self {
            data_dir: default_data_dir(),
            language: DEFAULT_LANGUAGE.to_owned(),
            caches: SharedCaches::global(),
            overrides: TemplateSet::new(),
            seed: None,
        }
    }

    /// Uses `data_dir` as the base directory for word lists and templates.
    #[must_use]
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Selects the word-list and template language. Lowercased on use.
    #[must_use]
    pub fn language(mut self, language: &str) -> Self {
        self.language = language.to_lowercase();
        self
    }

    /// Shares uniqueness caches through `caches` instead of the process-wide
    /// default handle.
    #[must_use]
    pub fn caches(mut self, caches: SharedCaches) -> Self {
        self.caches = caches;
        self
    }

    /// Registers an instance-local template override, winning over the
    /// global and language sets on name collision.
    #[must_use]
    pub fn template(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.overrides.set(name, template);
        self
    }

    /// Seeds the generator's RNG for reproducible output.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the generator, loading its merged template set.
    #[must_use]
    pub fn build(self) -> Generator {
        let templates = TemplateSet::merged(&self.data_dir, &self.language);
        let rng = self
            .seed
            .map_or_else(ChaCha8Rng::from_os_rng, ChaCha8Rng::seed_from_u64);
        Generator {
            loader: WordListLoader::new(self.data_dir),
            language: self.language,
            templates,
            overrides: self.overrides,
            person_names: None,
            men_avatars: Vec::new(),
            women_avatars: Vec::new(),
            rng,
            caches: self.caches,
        }
    }
}

/// Generates synthetic person, login, email, and address records.
///
/// # Example
///
/// ```
/// use persona_data::{Generator, SharedCaches, UsersConfig};
///
/// let mut generator = Generator::builder()
///     .caches(SharedCaches::default())
///     .seed(42)
///     .build();
///
/// let users = generator.users(&UsersConfig {
///     limit: 3,
///     ..UsersConfig::default()
/// });
///
/// assert_eq!(users.len(), 3);
/// assert_eq!(users.iter().map(|user| user.id).collect::<Vec<_>>(), [1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct Generator {
    loader: WordListLoader,
    language: String,
    templates: TemplateSet,
    overrides: TemplateSet,
    person_names: Option<NameParts>,
    men_avatars: Vec<u8>,
    women_avatars: Vec<u8>,
    rng: ChaCha8Rng,
    caches: SharedCaches,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Generator {
    /// Creates a generator for `language` with the crate's shipped data and
    /// the process-wide shared caches.
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self::builder().language(language).build()
    }

    /// Returns a builder for configuring data directory, language, caches,
    /// template overrides, and seeding.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the active language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switches to `language` (lowercased).
    ///
    /// Reloads the merged template set and invalidates the instance's
    /// name-part lists. The uniqueness caches are left untouched, so logins
    /// and emails stay unique across a language switch.
    pub fn set_language(&mut self, language: &str) {
        let normalized = language.to_lowercase();
        if self.language == normalized {
            return;
        }
        self.language = normalized;
        self.templates = TemplateSet::merged(self.loader.data_dir(), &self.language);
        self.person_names = None;
    }

    /// Registers an instance-local template override.
    pub fn set_template(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.overrides.set(name, template);
    }

    /// Returns the uniqueness cache handle this generator shares.
    #[must_use]
    pub const fn caches(&self) -> &SharedCaches {
        &self.caches
    }

    /// Clears one uniqueness cache category, or both when `category` is
    /// `None`.
    pub fn clear_cache(&self, category: Option<CacheCategory>) {
        self.caches.clear(category);
    }

    /// Returns the recorded login values, sorted.
    #[must_use]
    pub fn login_cache(&self) -> Vec<String> {
        self.caches.entries(CacheCategory::Login)
    }

    /// Returns the recorded email values, sorted.
    #[must_use]
    pub fn email_cache(&self) -> Vec<String> {
        self.caches.entries(CacheCategory::Email)
    }

    /// Generates a birth date with the configured age bounds and format.
    pub fn birth(&mut self, config: &BirthConfig) -> BirthValue {
        let current_year = Local::now().year();
        let (earliest, latest) = {
            let low = current_year - config.max;
            let high = current_year - config.min;
            if low <= high { (low, high) } else { (high, low) }
        };
        let year = self.rng.random_range(earliest..=latest);
        let month = self.rng.random_range(1_u32..=12);
        let day = self.rng.random_range(1..=days_in_month(year, month));
        match &config.format {
            BirthFormat::Timestamp => BirthValue::Timestamp(midnight_timestamp(year, month, day)),
            BirthFormat::Mysql => BirthValue::Text(render_date("y-m-d", year, month, day)),
            BirthFormat::Custom(format) => BirthValue::Text(render_date(format, year, month, day)),
        }
    }

    /// Generates a login.
    ///
    /// The base token is drawn from the merged global and language login
    /// word lists, spaces replaced with underscores. When a person name is
    /// supplied its transliterated parts join the candidate tokens, the list
    /// is shuffled with probability 5/7, and a random prefix of at most two
    /// tokens is kept. Tokens are joined with `.` and lowercased. With
    /// `unique`, collisions against the login cache are resolved by the
    /// cycling digit suffix and the result is recorded.
    pub fn login(&mut self, config: &LoginConfig) -> String {
        let language_list = format!("{}/login", self.language);
        let words = self.loader.load_merged(&["login", &language_list]);
        let base = words
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
            .replace(' ', "_");
        let mut tokens = vec![base];
        if let Some(person) = config.person.as_deref().filter(|name| !name.is_empty()) {
            tokens.extend(deunicode(person).split_whitespace().map(ToOwned::to_owned));
            if self
                .rng
                .random_ratio(LOGIN_SHUFFLE_NUMERATOR, LOGIN_SHUFFLE_DENOMINATOR)
            {
                tokens.shuffle(&mut self.rng);
            }
            let keep = self.rng.random_range(1..=kept_token_bound(tokens.len()));
            tokens.truncate(keep);
        }
        let login = tokens.join(".").to_lowercase();
        if config.unique {
            self.caches
                .with(|cache| cache.reserve(CacheCategory::Login, login))
        } else {
            login
        }
    }

    /// Generates an email address.
    ///
    /// The local part is derived like a login from the transliterated person
    /// name plus the login (generated with defaults when absent), always
    /// shuffled. With `unique`, the cycling digit suffix is appended to the
    /// local part only, and the final `local@domain` string is recorded.
    pub fn email(&mut self, config: &EmailConfig) -> String {
        let mut tokens: Vec<String> = Vec::new();
        if let Some(person) = config.person.as_deref().filter(|name| !name.is_empty()) {
            tokens.extend(deunicode(person).split_whitespace().map(ToOwned::to_owned));
        }
        let login = config
            .login
            .clone()
            .unwrap_or_else(|| self.login(&LoginConfig::default()));
        tokens.push(login);
        tokens.shuffle(&mut self.rng);
        let keep = self.rng.random_range(1..=kept_token_bound(tokens.len()));
        tokens.truncate(keep);
        let local = tokens.join(".").to_lowercase();
        let domain = config
            .domains
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
            .to_lowercase();
        if !config.unique {
            return format!("{local}@{domain}");
        }
        self.caches.with(|cache| {
            let mut candidate = local;
            let mut digit: u8 = 0;
            while cache.contains(CacheCategory::Email, &format!("{candidate}@{domain}")) {
                candidate.push(char::from(b'0' + digit));
                digit = (digit + 1) % 10;
            }
            let email = format!("{candidate}@{domain}");
            cache.insert(CacheCategory::Email, email.clone());
            email
        })
    }

    /// Generates a postal address from the language's cities and streets
    /// lists.
    ///
    /// The lists are reloaded per call; a missing dataset degrades to empty
    /// fields. The record always carries all six address fields.
    pub fn address(&mut self) -> AddressRecord {
        let mut cities = self.loader.load(&format!("{}/address/cities", self.language));
        let country = if cities.is_empty() {
            String::new()
        } else {
            cities.remove(0)
        };
        let line = cities.choose(&mut self.rng).cloned().unwrap_or_default();
        let parts: Vec<&str> = line.split('/').collect();
        let postcode = parts.first().copied().unwrap_or_default().to_owned();
        let (region, city) = if parts.len() == 3 {
            (
                parts.get(1).copied().unwrap_or_default().to_owned(),
                parts.get(2).copied().unwrap_or_default().to_owned(),
            )
        } else {
            (
                String::new(),
                parts.get(1).copied().unwrap_or_default().to_owned(),
            )
        };
        let streets = self
            .loader
            .load(&format!("{}/address/streets", self.language));
        let street = streets.choose(&mut self.rng).cloned().unwrap_or_default();
        let number = self.rng.random_range(STREET_NUMBER_MIN..=STREET_NUMBER_MAX);
        AddressRecord {
            country,
            postcode,
            region,
            city,
            street,
            number,
        }
    }

    /// Expands an address template to a single string.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::TemplateNotFound`] when neither an explicit
    /// template nor a registered template under the configured name exists.
    pub fn address_string(&mut self, config: &AddressStringConfig) -> Result<String, GeneratorError> {
        let template = self.resolve_template(config.tpl.as_deref(), &config.tpl_name)?;
        let address = match &config.data {
            Some(data) => data.clone(),
            None => self.address(),
        };
        let data = address_template_data(&address);
        Ok(template::expand(&template, &data, &mut self.rng))
    }

    /// Generates a person.
    ///
    /// The name is the template expansion against the gender's name-part
    /// lists, which are loaded once per instance for both genders and
    /// invalidated on language switch. An absent gender is drawn uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::TemplateNotFound`] when neither an explicit
    /// template nor a registered template under the configured name exists.
    pub fn person(&mut self, config: &PersonConfig) -> Result<PersonRecord, GeneratorError> {
        let template = self.resolve_template(config.tpl.as_deref(), &config.tpl_name)?;
        let gender = config.gender.unwrap_or_else(|| {
            if self.rng.random_ratio(1, 2) {
                Gender::Male
            } else {
                Gender::Female
            }
        });
        self.ensure_person_names();
        let avatar = self.avatar(Some(gender));
        let address = self.address();
        let birth = self.birth(&BirthConfig {
            format: config.birth.clone(),
            ..BirthConfig::default()
        });
        let name = self
            .person_names
            .as_ref()
            .map(|parts| template::expand(&template, parts.for_gender(gender), &mut self.rng))
            .unwrap_or_default();
        Ok(PersonRecord {
            name,
            gender,
            birth,
            address,
            avatar,
        })
    }

    /// Generates an avatar portrait URL.
    ///
    /// Each gender pool is a shuffled permutation of the indices `0..=99`,
    /// consumed by removal so an index repeats only after the pool drains
    /// and is refilled with a fresh permutation. An absent gender picks a
    /// pool uniformly.
    pub fn avatar(&mut self, gender: Option<Gender>) -> String {
        let pool = match gender {
            Some(Gender::Male) => AvatarPool::Men,
            Some(Gender::Female) => AvatarPool::Women,
            None => {
                if self.rng.random_ratio(1, 2) {
                    AvatarPool::Men
                } else {
                    AvatarPool::Women
                }
            }
        };
        let indices = match pool {
            AvatarPool::Men => &mut self.men_avatars,
            AvatarPool::Women => &mut self.women_avatars,
        };
        if indices.is_empty() {
            let mut refilled: Vec<u8> = (0..AVATAR_POOL_SIZE).collect();
            refilled.shuffle(&mut self.rng);
            *indices = refilled;
        }
        let index = indices.pop().unwrap_or_default();
        format!(
            "https://randomuser.me/api/portraits/{}/{index}.jpg",
            pool.as_str()
        )
    }

    /// Generates a batch of user records.
    ///
    /// A configured seed reseeds the RNG once before the loop, making the
    /// whole batch reproducible. Iterations whose person template fails to
    /// resolve are skipped without consuming an id; ids are a 1-based
    /// sequence over emitted records.
    pub fn users(&mut self, config: &UsersConfig) -> Vec<UserRecord> {
        if let Some(seed) = config.seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        if config.limit == 0 {
            return Vec::new();
        }
        let mut records = Vec::with_capacity(config.limit);
        for _ in 0..config.limit {
            let person = match self.person(&PersonConfig {
                tpl_name: config.tpl_name.clone(),
                tpl: config.tpl.clone(),
                gender: config.gender,
                birth: config.birth.clone(),
            }) {
                Ok(person) => person,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping user record");
                    continue;
                }
            };
            let login = self.login(&LoginConfig {
                person: Some(person.name.clone()),
                ..LoginConfig::default()
            });
            let email = self.email(&EmailConfig {
                person: Some(person.name.clone()),
                login: Some(login.clone()),
                ..EmailConfig::default()
            });
            records.push(UserRecord {
                id: records.len() + 1,
                name: person.name,
                avatar: person.avatar,
                gender: person.gender,
                birth: person.birth,
                login,
                email,
                address: person.address,
            });
        }
        records
    }

    /// Resolves the template to expand: an explicit non-empty template wins,
    /// then instance overrides, then the merged global and language sets.
    fn resolve_template(
        &self,
        explicit: Option<&str>,
        name: &str,
    ) -> Result<String, GeneratorError> {
        if let Some(template) = explicit.filter(|template| !template.is_empty()) {
            return Ok(template.to_owned());
        }
        self.overrides
            .get(name)
            .or_else(|| self.templates.get(name))
            .map(ToOwned::to_owned)
            .ok_or_else(|| GeneratorError::TemplateNotFound {
                name: name.to_owned(),
            })
    }

    /// Loads the name-part lists for both genders on first use.
    fn ensure_person_names(&mut self) {
        if self.person_names.is_some() {
            return;
        }
        let male = self.load_name_parts(Gender::Male);
        let female = self.load_name_parts(Gender::Female);
        self.person_names = Some(NameParts { male, female });
    }

    fn load_name_parts(&self, gender: Gender) -> TemplateData {
        let mut data = TemplateData::new();
        for part in ["name", "middle", "last"] {
            let list = self
                .loader
                .load(&format!("{}/{}/{part}", self.language, gender.as_str()));
            data.insert(part.to_owned(), TemplateValue::Choice(list));
        }
        data
    }
}

/// Upper bound on kept tokens: at most [`MAX_DERIVED_TOKENS`], at most one
/// fewer than available, and never below one.
fn kept_token_bound(token_count: usize) -> usize {
    token_count
        .saturating_sub(1)
        .min(MAX_DERIVED_TOKENS)
        .max(1)
}

/// Converts an address record into template field data.
fn address_template_data(address: &AddressRecord) -> TemplateData {
    [
        ("country", address.country.clone()),
        ("postcode", address.postcode.clone()),
        ("region", address.region.clone()),
        ("city", address.city.clone()),
        ("street", address.street.clone()),
        ("number", address.number.to_string()),
    ]
    .into_iter()
    .map(|(field, value)| (field.to_owned(), TemplateValue::Scalar(value)))
    .collect()
}

/// Leap-aware number of days in `month` of `year`.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(28, |last_day| last_day.day())
}

/// Unix timestamp of local 00:00:01 on the date.
///
/// Falls back to UTC when the local instant does not exist.
fn midnight_timestamp(year: i32, month: u32, day: u32) -> i64 {
    Local
        .with_ymd_and_hms(year, month, day, 0, 0, 1)
        .earliest()
        .map(|date_time| date_time.timestamp())
        .or_else(|| {
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(0, 0, 1))
                .map(|date_time| date_time.and_utc().timestamp())
        })
        .unwrap_or_default()
}

/// Renders a date through a format string: `m` and `d` become zero-padded
/// month and day, `y` the four-digit year, case-insensitively; every other
/// character is preserved.
fn render_date(format: &str, year: i32, month: u32, day: u32) -> String {
    let mut rendered = String::with_capacity(format.len() + 8);
    for symbol in format.to_lowercase().chars() {
        match symbol {
            'm' => rendered.push_str(&format!("{month:02}")),
            'd' => rendered.push_str(&format!("{day:02}")),
            'y' => rendered.push_str(&year.to_string()),
            other => rendered.push(other),
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use std::collections::HashSet;
    use std::fs;

    use rstest::{fixture, rstest};

    use super::*;

    /// A generator over the shipped English data with private caches, so
    /// tests never observe each other through the process-wide sets.
    #[fixture]
    fn generator() -> Generator {
        Generator::builder().caches(SharedCaches::default()).build()
    }

    /// Creates a scratch data directory populated by `files`.
    fn scratch_data_dir(files: &[(&str, &str)]) -> PathBuf {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "persona-data-generator-{}-{counter}",
            std::process::id()
        ));
        for (relative, contents) in files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create data subdir");
            }
            fs::write(path, contents).expect("write data file");
        }
        dir
    }

    fn birth_text(generator: &mut Generator, config: &BirthConfig) -> String {
        match generator.birth(config) {
            BirthValue::Text(text) => text,
            BirthValue::Timestamp(timestamp) => panic!("expected text, got {timestamp}"),
        }
    }

    #[rstest]
    fn mysql_birth_renders_zero_padded_dashes(mut generator: Generator) {
        for _ in 0..20 {
            let text = birth_text(&mut generator, &BirthConfig::default());
            let parts: Vec<&str> = text.split('-').collect();
            assert_eq!(parts.len(), 3, "unexpected layout: {text}");
            assert_eq!(parts.first().map_or(0, |part| part.len()), 4);
            assert_eq!(parts.get(1).map_or(0, |part| part.len()), 2);
            assert_eq!(parts.get(2).map_or(0, |part| part.len()), 2);
        }
    }

    #[rstest]
    fn custom_birth_format_preserves_separators(mut generator: Generator) {
        let config = BirthConfig {
            format: BirthFormat::Custom("d.M.y".to_owned()),
            ..BirthConfig::default()
        };
        let text = birth_text(&mut generator, &config);
        let parts: Vec<&str> = text.split('.').collect();
        assert_eq!(parts.len(), 3, "unexpected layout: {text}");
        assert_eq!(parts.first().map_or(0, |part| part.len()), 2);
        assert_eq!(parts.get(1).map_or(0, |part| part.len()), 2);
        assert_eq!(parts.get(2).map_or(0, |part| part.len()), 4);
    }

    #[rstest]
    fn timestamp_birth_year_respects_age_bounds(mut generator: Generator) {
        let config = BirthConfig {
            format: BirthFormat::Timestamp,
            ..BirthConfig::default()
        };
        let current_year = Local::now().year();
        for _ in 0..20 {
            let timestamp = match generator.birth(&config) {
                BirthValue::Timestamp(timestamp) => timestamp,
                BirthValue::Text(text) => panic!("expected timestamp, got {text}"),
            };
            let year = Local
                .timestamp_opt(timestamp, 0)
                .earliest()
                .expect("valid timestamp")
                .year();
            assert!(
                (current_year - 50..=current_year - 16).contains(&year),
                "year {year} outside age bounds"
            );
        }
    }

    #[rstest]
    fn unique_logins_are_pairwise_distinct(mut generator: Generator) {
        let logins: Vec<String> = (0..30)
            .map(|_| generator.login(&LoginConfig::default()))
            .collect();
        let distinct: HashSet<&String> = logins.iter().collect();
        assert_eq!(distinct.len(), logins.len());
    }

    #[rstest]
    fn unique_logins_with_person_are_pairwise_distinct(mut generator: Generator) {
        let logins: Vec<String> = (0..30)
            .map(|_| {
                generator.login(&LoginConfig {
                    person: Some("Ada Lovelace".to_owned()),
                    unique: true,
                })
            })
            .collect();
        let distinct: HashSet<&String> = logins.iter().collect();
        assert_eq!(distinct.len(), logins.len());
    }

    #[rstest]
    fn logins_are_lowercase_without_spaces(mut generator: Generator) {
        for _ in 0..20 {
            let login = generator.login(&LoginConfig {
                person: Some("Ada Lovelace".to_owned()),
                unique: false,
            });
            assert!(!login.contains(' '), "login contains a space: {login}");
            assert_eq!(login, login.to_lowercase());
        }
    }

    #[rstest]
    fn person_derived_logins_keep_at_most_two_tokens(mut generator: Generator) {
        for _ in 0..30 {
            let login = generator.login(&LoginConfig {
                person: Some("Ada King Lovelace".to_owned()),
                unique: false,
            });
            assert!(
                login.matches('.').count() <= 1,
                "more than two tokens: {login}"
            );
        }
    }

    #[rstest]
    fn unique_emails_are_pairwise_distinct(mut generator: Generator) {
        let emails: Vec<String> = (0..30)
            .map(|_| generator.email(&EmailConfig::default()))
            .collect();
        let distinct: HashSet<&String> = emails.iter().collect();
        assert_eq!(distinct.len(), emails.len());
    }

    #[rstest]
    fn emails_use_a_configured_domain(mut generator: Generator) {
        let email = generator.email(&EmailConfig::default());
        let domain = email.split('@').next_back().unwrap_or_default();
        assert!(
            ["example.com", "example.net", "example.org"].contains(&domain),
            "unexpected domain in {email}"
        );
    }

    #[rstest]
    fn email_collisions_suffix_the_local_part(mut generator: Generator) {
        let config = EmailConfig {
            login: Some("fixed".to_owned()),
            domains: vec!["example.com".to_owned()],
            ..EmailConfig::default()
        };
        assert_eq!(generator.email(&config), "fixed@example.com");
        assert_eq!(generator.email(&config), "fixed0@example.com");
        assert_eq!(generator.email(&config), "fixed01@example.com");
    }

    #[rstest]
    fn address_fills_every_field_from_the_shipped_data(mut generator: Generator) {
        let address = generator.address();
        assert!(!address.country.is_empty());
        assert!(!address.postcode.is_empty());
        assert!(!address.city.is_empty());
        assert!(!address.street.is_empty());
        assert!((STREET_NUMBER_MIN..=STREET_NUMBER_MAX).contains(&address.number));
    }

    #[test]
    fn two_part_city_lines_leave_region_empty() {
        let dir = scratch_data_dir(&[
            ("xx/address/cities", "Testland\n12345/Teston\n"),
            ("xx/address/streets", "Main Street\n"),
        ]);
        let mut generator = Generator::builder()
            .data_dir(dir)
            .language("xx")
            .caches(SharedCaches::default())
            .build();

        let address = generator.address();
        assert_eq!(address.country, "Testland");
        assert_eq!(address.postcode, "12345");
        assert_eq!(address.region, "");
        assert_eq!(address.city, "Teston");
        assert_eq!(address.street, "Main Street");
    }

    #[test]
    fn three_part_city_lines_carry_a_region() {
        let dir = scratch_data_dir(&[
            ("xx/address/cities", "Testland\n12345/Westshire/Teston\n"),
            ("xx/address/streets", "Main Street\n"),
        ]);
        let mut generator = Generator::builder()
            .data_dir(dir)
            .language("xx")
            .caches(SharedCaches::default())
            .build();

        let address = generator.address();
        assert_eq!(address.region, "Westshire");
        assert_eq!(address.city, "Teston");
    }

    #[test]
    fn missing_address_data_degrades_to_empty_fields() {
        let dir = scratch_data_dir(&[]);
        let mut generator = Generator::builder()
            .data_dir(dir)
            .language("xx")
            .caches(SharedCaches::default())
            .build();

        let address = generator.address();
        assert_eq!(address.country, "");
        assert_eq!(address.city, "");
        assert!((STREET_NUMBER_MIN..=STREET_NUMBER_MAX).contains(&address.number));
    }

    #[rstest]
    fn address_string_expands_explicit_data(mut generator: Generator) {
        let address = generator.address();
        let expanded = generator
            .address_string(&AddressStringConfig {
                tpl: Some("{country}{city}{street}".to_owned()),
                data: Some(address.clone()),
                ..AddressStringConfig::default()
            })
            .expect("explicit template expands");
        assert_eq!(
            expanded,
            format!("{} {} {}", address.country, address.city, address.street)
        );
    }

    #[rstest]
    fn address_strings_differ_across_calls(mut generator: Generator) {
        let strings: HashSet<String> = (0..5)
            .map(|_| {
                generator
                    .address_string(&AddressStringConfig::default())
                    .expect("address template registered")
            })
            .collect();
        assert!(strings.len() > 1, "five address strings were identical");
    }

    #[rstest]
    fn address_string_reports_missing_template(mut generator: Generator) {
        let result = generator.address_string(&AddressStringConfig {
            tpl_name: "no-such-template".to_owned(),
            ..AddressStringConfig::default()
        });
        assert_eq!(
            result,
            Err(GeneratorError::TemplateNotFound {
                name: "no-such-template".to_owned()
            })
        );
    }

    #[rstest]
    #[case(Gender::Male)]
    #[case(Gender::Female)]
    fn person_honours_a_fixed_gender(mut generator: Generator, #[case] gender: Gender) {
        let person = generator
            .person(&PersonConfig {
                gender: Some(gender),
                ..PersonConfig::default()
            })
            .expect("person template registered");
        assert_eq!(person.gender, gender);
        assert!(!person.name.is_empty());
    }

    #[rstest]
    fn person_name_parts_come_from_the_word_lists(mut generator: Generator) {
        let person = generator
            .person(&PersonConfig {
                gender: Some(Gender::Female),
                ..PersonConfig::default()
            })
            .expect("person template registered");

        let loader = WordListLoader::new(default_data_dir());
        let first_names = loader.load("en/female/name");
        let last_names = loader.load("en/female/last");
        let mut parts = person.name.split(' ');
        let first = parts.next().expect("first name").to_owned();
        let last = parts.next().expect("last name").to_owned();
        assert!(first_names.contains(&first), "unknown first name {first}");
        assert!(last_names.contains(&last), "unknown last name {last}");
    }

    #[rstest]
    fn person_reports_missing_template(mut generator: Generator) {
        let result = generator.person(&PersonConfig {
            tpl_name: "no-such-template".to_owned(),
            ..PersonConfig::default()
        });
        assert!(matches!(
            result,
            Err(GeneratorError::TemplateNotFound { .. })
        ));
    }

    #[rstest]
    fn explicit_person_template_wins_over_the_registered_set(mut generator: Generator) {
        let person = generator
            .person(&PersonConfig {
                tpl: Some("{last}".to_owned()),
                gender: Some(Gender::Male),
                ..PersonConfig::default()
            })
            .expect("explicit template expands");

        let loader = WordListLoader::new(default_data_dir());
        let last_names = loader.load("en/male/last");
        assert!(last_names.contains(&person.name));
    }

    #[rstest]
    fn instance_template_overrides_win_by_name(mut generator: Generator) {
        generator.set_template("person", "{name}");
        let person = generator
            .person(&PersonConfig {
                gender: Some(Gender::Female),
                ..PersonConfig::default()
            })
            .expect("override template expands");

        let loader = WordListLoader::new(default_data_dir());
        let first_names = loader.load("en/female/name");
        assert!(first_names.contains(&person.name));
    }

    #[rstest]
    fn avatar_pools_match_the_gender(mut generator: Generator) {
        assert!(
            generator
                .avatar(Some(Gender::Male))
                .contains("/portraits/men/")
        );
        assert!(
            generator
                .avatar(Some(Gender::Female))
                .contains("/portraits/women/")
        );
    }

    #[rstest]
    fn avatar_pool_emits_one_hundred_distinct_urls_before_refilling(mut generator: Generator) {
        let urls: HashSet<String> = (0..100)
            .map(|_| generator.avatar(Some(Gender::Male)))
            .collect();
        assert_eq!(urls.len(), 100);

        // The 101st draw comes from a refilled pool and stays well formed.
        let url = generator.avatar(Some(Gender::Male));
        assert!(url.starts_with("https://randomuser.me/api/portraits/men/"));
        assert!(url.ends_with(".jpg"));
    }

    #[rstest]
    fn users_with_zero_limit_is_an_empty_batch(mut generator: Generator) {
        let users = generator.users(&UsersConfig {
            limit: 0,
            ..UsersConfig::default()
        });
        assert!(users.is_empty());
    }

    #[rstest]
    #[case(Gender::Male)]
    #[case(Gender::Female)]
    fn users_with_a_gender_filter_are_homogeneous(mut generator: Generator, #[case] gender: Gender) {
        let users = generator.users(&UsersConfig {
            gender: Some(gender),
            limit: 20,
            ..UsersConfig::default()
        });
        assert_eq!(users.len(), 20);
        assert!(users.iter().all(|user| user.gender == gender));
    }

    #[rstest]
    fn unfiltered_batches_contain_both_genders(mut generator: Generator) {
        let users = generator.users(&UsersConfig {
            limit: 20,
            ..UsersConfig::default()
        });
        let males = users
            .iter()
            .filter(|user| user.gender == Gender::Male)
            .count();
        assert_eq!(users.len(), 20);
        assert!(males > 0, "no male records in 20");
        assert!(males < 20, "no female records in 20");
    }

    #[rstest]
    fn user_ids_are_a_one_based_sequence(mut generator: Generator) {
        let users = generator.users(&UsersConfig {
            limit: 5,
            ..UsersConfig::default()
        });
        let ids: Vec<usize> = users.iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn users_skip_iterations_with_an_unresolvable_template(mut generator: Generator) {
        let users = generator.users(&UsersConfig {
            tpl_name: "no-such-template".to_owned(),
            limit: 5,
            ..UsersConfig::default()
        });
        assert!(users.is_empty());
    }

    #[test]
    fn seeded_batches_are_reproducible() {
        let batch = |caches: SharedCaches| {
            Generator::builder().caches(caches).build().users(&UsersConfig {
                seed: Some(2026),
                limit: 5,
                ..UsersConfig::default()
            })
        };
        assert_eq!(batch(SharedCaches::default()), batch(SharedCaches::default()));
    }

    #[rstest]
    fn cleared_login_cache_holds_exactly_the_next_login(mut generator: Generator) {
        generator.clear_cache(Some(CacheCategory::Login));
        assert!(generator.login_cache().is_empty());

        let login = generator.login(&LoginConfig::default());
        assert_eq!(generator.login_cache(), vec![login]);
    }

    #[rstest]
    fn clearing_without_category_empties_both_caches(mut generator: Generator) {
        drop(generator.login(&LoginConfig::default()));
        drop(generator.email(&EmailConfig::default()));
        generator.clear_cache(None);
        assert!(generator.login_cache().is_empty());
        assert!(generator.email_cache().is_empty());
    }

    #[rstest]
    fn switching_language_keeps_the_uniqueness_caches(mut generator: Generator) {
        let login = generator.login(&LoginConfig::default());
        generator.set_language("ru");
        assert_eq!(generator.language(), "ru");
        assert!(generator.login_cache().contains(&login));
    }

    #[rstest]
    fn switching_language_reloads_name_lists(mut generator: Generator) {
        drop(
            generator
                .person(&PersonConfig::default())
                .expect("person template registered"),
        );
        generator.set_language("ru");
        let person = generator
            .person(&PersonConfig {
                gender: Some(Gender::Male),
                ..PersonConfig::default()
            })
            .expect("person template registered");

        let loader = WordListLoader::new(default_data_dir());
        let russian_last_names = loader.load("ru/male/last");
        let last = person
            .name
            .split(' ')
            .next_back()
            .unwrap_or_default()
            .to_owned();
        assert!(
            russian_last_names.contains(&last),
            "'{last}' not in the Russian last-name list"
        );
    }

    #[test]
    fn kept_token_bound_clamps_sensibly() {
        assert_eq!(kept_token_bound(1), 1);
        assert_eq!(kept_token_bound(2), 1);
        assert_eq!(kept_token_bound(3), 2);
        assert_eq!(kept_token_bound(10), 2);
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(2023, 4, 30)]
    #[case(2023, 12, 31)]
    fn days_in_month_is_leap_aware(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(days_in_month(year, month), expected);
    }

    #[test]
    fn render_date_maps_symbols_case_insensitively() {
        assert_eq!(render_date("Y-M-D", 1987, 6, 5), "1987-06-05");
        assert_eq!(render_date("d.m.y", 1987, 6, 5), "05.06.1987");
        assert_eq!(render_date("y", 1987, 6, 5), "1987");
    }
}
