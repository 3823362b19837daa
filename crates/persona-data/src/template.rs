//! Placeholder template expansion.
//!
//! Templates are plain strings carrying `{field}` tokens. Each token is
//! resolved against a field mapping and replaced with one leading space plus
//! the resolved value; the final result is trimmed at both ends. A field may
//! map to a single value or to a list of candidates, in which case one
//! element is drawn uniformly per occurrence.
//!
//! The optional-field marker `{?field}` is not a separate syntax: the `?` is
//! part of the field name, so the token is an ordinary lookup that resolves
//! to empty when no such field exists.

use std::collections::HashMap;
use std::sync::LazyLock;

use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use regex::Regex;

/// A value bound to a template field.
///
/// Mirrors the two shapes template data takes in practice: a fixed string,
/// or a list of candidates to draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    /// A fixed value substituted verbatim.
    Scalar(String),
    /// A candidate list; one element is drawn uniformly per occurrence.
    Choice(Vec<String>),
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(value: Vec<String>) -> Self {
        Self::Choice(value)
    }
}

/// Field mapping supplied to [`expand`].
pub type TemplateData = HashMap<String, TemplateValue>;

/// Matches `{field}` tokens. Field names are word characters, hyphens, and
/// the optional-field marker `?`; nested braces never match.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        #[expect(clippy::expect_used, reason = "the pattern is a vetted literal")]
        let pattern = Regex::new(r"\{([\w?-]+)\}").expect("placeholder pattern compiles");
        pattern
    });
    &PATTERN
}

/// Expands `template` against `data`, drawing list values from `rng`.
///
/// Tokens are processed in first-match order. An absent field resolves to
/// the empty string; a [`TemplateValue::Choice`] is re-drawn independently
/// for every occurrence, including repeats of the same field name. Each
/// token is replaced by one leading space plus the resolved value, and the
/// final string is trimmed.
///
/// # Example
///
/// ```
/// use persona_data::{TemplateData, TemplateValue, expand};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let data: TemplateData = [
///     ("country".to_owned(), TemplateValue::from("C")),
///     ("city".to_owned(), TemplateValue::from("Ct")),
///     ("street".to_owned(), TemplateValue::from("St")),
/// ]
/// .into();
///
/// assert_eq!(expand("{country}{city}{street}", &data, &mut rng), "C Ct St");
/// ```
#[must_use]
pub fn expand(template: &str, data: &TemplateData, rng: &mut ChaCha8Rng) -> String {
    let mut expanded = String::with_capacity(template.len());
    let mut last_end = 0;
    for captures in placeholder_pattern().captures_iter(template) {
        let Some(token) = captures.get(0) else {
            continue;
        };
        let field = captures.get(1).map_or("", |group| group.as_str());
        expanded.push_str(template.get(last_end..token.start()).unwrap_or(""));
        expanded.push(' ');
        expanded.push_str(&resolve(data.get(field), rng));
        last_end = token.end();
    }
    expanded.push_str(template.get(last_end..).unwrap_or(""));
    expanded.trim().to_owned()
}

/// Resolves one field occurrence to its substitution text.
fn resolve(value: Option<&TemplateValue>, rng: &mut ChaCha8Rng) -> String {
    match value {
        None => String::new(),
        Some(TemplateValue::Scalar(scalar)) => scalar.clone(),
        Some(TemplateValue::Choice(candidates)) => {
            candidates.choose(rng).cloned().unwrap_or_default()
        }
    }
}
