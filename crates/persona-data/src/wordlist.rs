//! Word-list file loading.
//!
//! Word lists are plain text files, one candidate per line, addressed by a
//! path relative to a base data directory (`<dataDir>/[<language>/]<category>
//! [/<subcategory>]`, no extension). A missing file is a normal condition --
//! for example a language without an address dataset -- and loads as an
//! empty list rather than an error.

use std::fs;
use std::path::{Path, PathBuf};

/// Loads word lists from a base data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordListLoader {
    data_dir: PathBuf,
}

impl WordListLoader {
    /// Creates a loader rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the base data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads the word list at `relative`, resolved against the data
    /// directory.
    ///
    /// Each line is trimmed; order is preserved, and blank lines survive as
    /// empty entries. A missing or unreadable file yields an empty list.
    #[must_use]
    pub fn load(&self, relative: &str) -> Vec<String> {
        let path = self.data_dir.join(relative);
        fs::read_to_string(&path).map_or_else(
            |err| {
                tracing::debug!(path = %path.display(), error = %err, "word list not loaded");
                Vec::new()
            },
            |contents| contents.lines().map(|line| line.trim().to_owned()).collect(),
        )
    }

    /// Loads and concatenates several word lists, de-duplicating entries
    /// while preserving first-seen order.
    ///
    /// Used for lists with a global base and a language-specific extension,
    /// such as the login word list.
    #[must_use]
    pub fn load_merged(&self, relatives: &[&str]) -> Vec<String> {
        let mut merged = Vec::new();
        for relative in relatives {
            for entry in self.load(relative) {
                if !merged.contains(&entry) {
                    merged.push(entry);
                }
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Creates a unique scratch directory under the system temp dir.
    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "persona-data-wordlist-{}-{counter}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let loader = WordListLoader::new(scratch_dir());
        assert!(loader.load("no/such/list").is_empty());
    }

    #[test]
    fn lines_are_trimmed_and_order_preserved() {
        let dir = scratch_dir();
        fs::write(dir.join("colours"), "  red  \nblue\n\tgreen\n").expect("write list");

        let loader = WordListLoader::new(&dir);
        assert_eq!(loader.load("colours"), vec!["red", "blue", "green"]);
    }

    #[test]
    fn blank_lines_survive_as_empty_entries() {
        let dir = scratch_dir();
        fs::write(dir.join("gappy"), "one\n\ntwo\n").expect("write list");

        let loader = WordListLoader::new(&dir);
        assert_eq!(loader.load("gappy"), vec!["one", "", "two"]);
    }

    #[test]
    fn merged_lists_deduplicate_preserving_first_seen_order() {
        let dir = scratch_dir();
        fs::write(dir.join("base"), "alpha\nbeta\n").expect("write base");
        fs::write(dir.join("extra"), "beta\ngamma\n").expect("write extra");

        let loader = WordListLoader::new(&dir);
        assert_eq!(
            loader.load_merged(&["base", "extra"]),
            vec!["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn merged_load_tolerates_missing_members() {
        let dir = scratch_dir();
        fs::write(dir.join("base"), "alpha\n").expect("write base");

        let loader = WordListLoader::new(&dir);
        assert_eq!(loader.load_merged(&["base", "absent"]), vec!["alpha"]);
    }
}
