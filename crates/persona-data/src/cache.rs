//! Uniqueness caches for derived fields.
//!
//! Two keyed sets, one per [`CacheCategory`], record every login and email
//! handed out with uniqueness requested. Generators consult the set before
//! accepting a candidate and, on collision, extend the candidate with the
//! cycling digit sequence `0..9` until a free value is found.
//!
//! Caches are shared deliberately: every generator built with the default
//! constructor observes the same process-wide sets through a
//! [`SharedCaches`] handle, so two generators never hand out the same login.
//! A private handle scopes that guarantee to the generators that share it.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// The value domains tracked for uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    /// Generated login strings.
    Login,
    /// Generated `local@domain` email strings.
    Email,
}

/// Keyed sets of previously emitted values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniquenessCache {
    login: HashSet<String>,
    email: HashSet<String>,
}

impl UniquenessCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn entries_for(&self, category: CacheCategory) -> &HashSet<String> {
        match category {
            CacheCategory::Login => &self.login,
            CacheCategory::Email => &self.email,
        }
    }

    fn entries_for_mut(&mut self, category: CacheCategory) -> &mut HashSet<String> {
        match category {
            CacheCategory::Login => &mut self.login,
            CacheCategory::Email => &mut self.email,
        }
    }

    /// Returns `true` when `value` was previously recorded for `category`.
    #[must_use]
    pub fn contains(&self, category: CacheCategory, value: &str) -> bool {
        self.entries_for(category).contains(value)
    }

    /// Records `value` for `category`. Idempotent.
    pub fn insert(&mut self, category: CacheCategory, value: impl Into<String>) {
        self.entries_for_mut(category).insert(value.into());
    }

    /// Clears one category, or both when `category` is `None`.
    pub fn clear(&mut self, category: Option<CacheCategory>) {
        if category.is_none() || category == Some(CacheCategory::Login) {
            self.login.clear();
        }
        if category.is_none() || category == Some(CacheCategory::Email) {
            self.email.clear();
        }
    }

    /// Returns the recorded values for `category`, sorted for stable reads.
    #[must_use]
    pub fn entries(&self, category: CacheCategory) -> Vec<String> {
        let mut entries: Vec<String> = self.entries_for(category).iter().cloned().collect();
        entries.sort_unstable();
        entries
    }

    /// Returns the number of recorded values for `category`.
    #[must_use]
    pub fn len(&self, category: CacheCategory) -> usize {
        self.entries_for(category).len()
    }

    /// Returns `true` when `category` holds no recorded values.
    #[must_use]
    pub fn is_empty(&self, category: CacheCategory) -> bool {
        self.entries_for(category).is_empty()
    }

    /// Resolves `candidate` to a value free in `category`, records it, and
    /// returns it.
    ///
    /// On collision the next digit of the cycling sequence `0..9` is
    /// appended and the check repeats; the digit-suffix space is practically
    /// unbounded, so the loop always terminates.
    pub fn reserve(&mut self, category: CacheCategory, candidate: impl Into<String>) -> String {
        let mut value = candidate.into();
        let mut digit: u8 = 0;
        while self.contains(category, &value) {
            value.push(char::from(b'0' + digit));
            digit = (digit + 1) % 10;
        }
        self.insert(category, value.clone());
        value
    }
}

/// A cheap-to-clone handle to a cache shared between generators.
///
/// Clones observe the same underlying sets. [`SharedCaches::global`] returns
/// a handle to the process-wide default cache used by
/// [`Generator::new`](crate::Generator::new); `SharedCaches::default()`
/// creates a fresh private cache for scoped lifetimes.
#[derive(Debug, Clone, Default)]
pub struct SharedCaches {
    inner: Arc<Mutex<UniquenessCache>>,
}

impl SharedCaches {
    /// Returns a handle to the process-wide default cache.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: LazyLock<SharedCaches> = LazyLock::new(SharedCaches::default);
        GLOBAL.clone()
    }

    /// Runs `operation` with exclusive access to the cache.
    ///
    /// Single-threaded callers never block; concurrent callers serialise on
    /// the internal mutex. A poisoned lock is recovered, since the cache
    /// holds no invariants a panicking writer could break.
    pub fn with<R>(&self, operation: impl FnOnce(&mut UniquenessCache) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        operation(&mut guard)
    }

    /// Returns `true` when `value` was previously recorded for `category`.
    #[must_use]
    pub fn contains(&self, category: CacheCategory, value: &str) -> bool {
        self.with(|cache| cache.contains(category, value))
    }

    /// Records `value` for `category`. Idempotent.
    pub fn insert(&self, category: CacheCategory, value: impl Into<String>) {
        let value = value.into();
        self.with(|cache| cache.insert(category, value));
    }

    /// Clears one category, or both when `category` is `None`.
    pub fn clear(&self, category: Option<CacheCategory>) {
        self.with(|cache| cache.clear(category));
    }

    /// Returns the recorded values for `category`, sorted for stable reads.
    #[must_use]
    pub fn entries(&self, category: CacheCategory) -> Vec<String> {
        self.with(|cache| cache.entries(category))
    }
}
