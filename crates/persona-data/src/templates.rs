//! Named template sets.
//!
//! Template sets map a template name (`person`, `address`, ...) to a
//! placeholder-bearing format string. A set is loaded from a JSON object
//! file; the default set lives at `<dataDir>/templates.json` and a language
//! may ship an override file at `<dataDir>/<language>/templates.json` that
//! wins on key collision. Generator instances can layer further overrides
//! on top without affecting any other instance.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// File name of a template definition file within a data directory.
const TEMPLATE_FILE: &str = "templates.json";

/// Raw JSON representation of a template file.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawTemplates(HashMap<String, String>);

/// A named set of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    templates: HashMap<String, String>,
}

impl TemplateSet {
    /// Creates an empty template set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a template set from the JSON object file at `path`.
    ///
    /// A missing file yields an empty set; malformed JSON is logged and also
    /// yields an empty set. Template loading failures never escalate.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "template file not loaded");
            return Self::default();
        };
        serde_json::from_str::<RawTemplates>(&contents).map_or_else(
            |err| {
                tracing::warn!(path = %path.display(), error = %err, "template file ignored");
                Self::default()
            },
            |raw| Self { templates: raw.0 },
        )
    }

    /// Loads the default set merged with the `language` override set from
    /// `data_dir`, the override winning on key collision.
    #[must_use]
    pub fn merged(data_dir: &Path, language: &str) -> Self {
        let mut set = Self::load(&data_dir.join(TEMPLATE_FILE));
        let overrides = Self::load(&data_dir.join(language).join(TEMPLATE_FILE));
        set.extend(overrides);
        set
    }

    /// Returns the template registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Registers `template` under `name`, replacing any previous entry.
    pub fn set(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(name.into(), template.into());
    }

    /// Merges `other` into this set, `other` winning on key collision.
    pub fn extend(&mut self, other: Self) {
        self.templates.extend(other.templates);
    }

    /// Returns the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` when the set holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
