//! Word lookup service backed by a newline-delimited word list.
//!
//! The word set loads at most once, even when concurrent validations race to
//! trigger the first lookup; reads are lock-free afterwards. A load failure
//! fails closed: the dictionary becomes an empty set that rejects every word.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

pub struct Dictionary {
    words: OnceCell<HashSet<String>>,
    source: Option<PathBuf>,
}

impl Dictionary {
    /// Lazily loads from `path` on first lookup.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            words: OnceCell::new(),
            source: Some(path.into()),
        }
    }

    /// Preloaded from an in-memory word list (tests, embedded lexicons).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            words: OnceCell::with_value(set),
            source: None,
        }
    }

    /// An always-empty dictionary that rejects every word.
    pub fn empty() -> Self {
        Self::from_words(std::iter::empty::<&str>())
    }

    /// Case-insensitive membership test.
    pub fn is_valid(&self, word: &str) -> bool {
        self.load().contains(&word.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(&self) -> &HashSet<String> {
        self.words.get_or_init(|| match &self.source {
            Some(path) => load_word_list(path),
            None => HashSet::new(),
        })
    }
}

fn load_word_list(path: &Path) -> HashSet<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let words: HashSet<String> = content
                .lines()
                .map(|line| line.trim().to_ascii_uppercase())
                .filter(|line| !line.is_empty())
                .collect();
            tracing::info!(path = %path.display(), words = words.len(), "dictionary loaded");
            words
        }
        Err(e) => {
            // Fail closed: reject everything rather than accept everything.
            tracing::warn!(path = %path.display(), error = %e, "failed to load dictionary, rejecting all words");
            HashSet::new()
        }
    }
}
