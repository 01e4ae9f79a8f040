/// Lexicon loading — word lists from text files, normalized for training.

use glob::MatchOptions;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::config::LexiconSource;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("pattern '{0}' matched no files")]
    NoMatches(String),
}

/// Normalize one lexicon line: trimmed and lowercased, `None` when blank.
pub fn normalize(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// An ordered list of normalized words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: Vec<String>,
}

impl Lexicon {
    /// Parse newline-separated text, one word (or phrase) per line.
    pub fn from_text(text: &str) -> Lexicon {
        Lexicon {
            words: text.lines().filter_map(normalize).collect(),
        }
    }

    /// Load a single word-list file.
    pub fn load(path: &Path) -> Result<Lexicon, LexiconError> {
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Lexicon::from_text(&text);
        debug!("loaded {} words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Load every file matching a glob pattern like `data/adjectives/*.txt`.
    ///
    /// Wildcards only match a leading `.` when the pattern spells it out.
    /// Matches are concatenated in sorted path order.
    pub fn load_pattern(pattern: &str) -> Result<Lexicon, LexiconError> {
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let mut paths = glob::glob_with(pattern, options)
            .map_err(|source| LexiconError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .collect::<Result<Vec<PathBuf>, _>>()?;
        paths.retain(|path| path.is_file());
        paths.sort();

        if paths.is_empty() {
            return Err(LexiconError::NoMatches(pattern.to_string()));
        }

        let mut lexicon = Lexicon::default();
        for path in &paths {
            lexicon.extend(Lexicon::load(path)?);
        }
        debug!("pattern '{}' matched {} files", pattern, paths.len());
        Ok(lexicon)
    }

    /// Load and concatenate several sources, in order.
    pub fn load_sources(sources: &[LexiconSource]) -> Result<Lexicon, LexiconError> {
        let mut lexicon = Lexicon::default();
        for source in sources {
            let part = match source {
                LexiconSource::File(path) => Lexicon::load(path)?,
                LexiconSource::Pattern(pattern) => Lexicon::load_pattern(pattern)?,
            };
            lexicon.extend(part);
        }
        Ok(lexicon)
    }

    pub fn extend(&mut self, other: Lexicon) {
        self.words.extend(other.words);
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A uniformly random word, `None` if the lexicon is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

impl FromIterator<String> for Lexicon {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Lexicon {
            words: iter.into_iter().filter_map(|w| normalize(&w)).collect(),
        }
    }
}
