/// Forge configuration — which word lists feed which lexicons and models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Where a lexicon's words come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LexiconSource {
    /// A single word-list file.
    File(PathBuf),
    /// A file-name pattern such as `adjectives/*.txt`.
    Pattern(String),
}

impl LexiconSource {
    /// Resolve a relative source against `base`. Absolute sources are kept.
    pub fn resolve(&self, base: &Path) -> LexiconSource {
        match self {
            LexiconSource::File(path) if path.is_relative() => {
                LexiconSource::File(base.join(path))
            }
            LexiconSource::Pattern(pattern) if Path::new(pattern).is_relative() => {
                LexiconSource::Pattern(base.join(pattern).to_string_lossy().into_owned())
            }
            other => other.clone(),
        }
    }
}

/// Training corpus and state size for one Markov model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    pub state_size: usize,
    pub sources: Vec<LexiconSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Cap on generated word length; unbounded walks when `None`.
    #[serde(default = "default_max_word_len")]
    pub max_word_len: Option<usize>,
    #[serde(default)]
    pub lexicons: BTreeMap<String, Vec<LexiconSource>>,
    #[serde(default)]
    pub models: BTreeMap<String, ModelSpec>,
}

fn default_max_word_len() -> Option<usize> {
    Some(48)
}

impl ForgeConfig {
    /// Load a config file. Relative sources are resolved against the
    /// directory containing the file.
    pub fn load_from_ron(path: &Path) -> Result<ForgeConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = ForgeConfig::from_ron_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved(base))
    }

    /// Parse a config from a RON string without resolving paths.
    pub fn from_ron_str(contents: &str) -> Result<ForgeConfig, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    fn resolved(self, base: &Path) -> ForgeConfig {
        let resolve_all = |sources: Vec<LexiconSource>| -> Vec<LexiconSource> {
            sources.iter().map(|s| s.resolve(base)).collect()
        };

        ForgeConfig {
            max_word_len: self.max_word_len,
            lexicons: self
                .lexicons
                .into_iter()
                .map(|(id, sources)| (id, resolve_all(sources)))
                .collect(),
            models: self
                .models
                .into_iter()
                .map(|(id, spec)| {
                    let spec = ModelSpec {
                        state_size: spec.state_size,
                        sources: resolve_all(spec.sources),
                    };
                    (id, spec)
                })
                .collect(),
        }
    }
}
