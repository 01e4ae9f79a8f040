/// The name forge: composes creature, item, move and nationality names
/// from Markov-generated words and plain word lists.
///
/// Everything is built once by `NameForge::builder()` and never mutated
/// afterwards; each generation call borrows the forge and its own RNG.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::lexicon::{Lexicon, LexiconError};
use crate::core::markov::{MarkovError, WordModel};
use crate::schema::config::{ConfigError, ForgeConfig};
use crate::schema::kind::NameKind;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("markov error: {0}")]
    Markov(#[from] MarkovError),
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("model '{0}' is not configured")]
    MissingModel(String),
    #[error("lexicon '{0}' is not configured")]
    MissingLexicon(String),
    #[error("lexicon '{0}' has no words")]
    EmptyLexicon(String),
}

pub const CREATURE_MODEL: &str = "creature";
pub const ITEM_MODEL: &str = "item";
pub const ABILITY_MODEL: &str = "ability";
pub const NATION_MODEL: &str = "nation";

pub const ADJECTIVES: &str = "adjectives";
pub const ADVERBS: &str = "adverbs";
pub const UNCOUNTABLE_NOUNS: &str = "uncountable_nouns";
pub const PREFIXES: &str = "prefixes";

/// Size of the nationality roster generated at build time.
const ROSTER_SIZE: usize = 16;
/// Chance that a creature or item name gets a prefix glued to its first word.
const PREFIX_CHANCE: f64 = 0.02;
/// Markov item and ability words mixed into the item noun pool, each.
const ITEM_POOL_GENERATED: usize = 10;
/// Extra walks allowed when a generated word overruns `max_word_len`.
const MAX_REDRAWS: usize = 16;

const I_SUFFIXES: &[&str] = &["", "c", "sh", "an"];
const E_SUFFIXES: &[&str] = &["se", "an"];
const DEFAULT_SUFFIXES: &[&str] = &["ian", "ean", "ese", "an", "ish", "ic", "i"];

/// Built via `NameForge::builder()`.
#[derive(Debug, Clone)]
pub struct NameForge {
    creature: WordModel,
    item: WordModel,
    ability: WordModel,
    nation: WordModel,
    adjectives: Lexicon,
    adverbs: Lexicon,
    uncountable_nouns: Lexicon,
    prefixes: Lexicon,
    nationalities: Vec<String>,
    max_word_len: Option<usize>,
}

/// Builder for constructing a `NameForge`.
pub struct NameForgeBuilder {
    config_path: Option<PathBuf>,
    seed: u64,
    max_word_len: Option<Option<usize>>,
    /// Directly provided models (for testing without files).
    models: FxHashMap<String, WordModel>,
    /// Directly provided lexicons (for testing without files).
    lexicons: FxHashMap<String, Lexicon>,
}

impl NameForge {
    pub fn builder() -> NameForgeBuilder {
        NameForgeBuilder {
            config_path: None,
            seed: 0,
            max_word_len: None,
            models: FxHashMap::default(),
            lexicons: FxHashMap::default(),
        }
    }

    /// Generate a name of the given kind.
    pub fn forge<R: Rng + ?Sized>(&self, kind: NameKind, rng: &mut R) -> Result<String, ForgeError> {
        match kind {
            NameKind::Creature => self.name(rng),
            NameKind::Item => self.item(rng),
            NameKind::Move => self.move_name(rng),
            NameKind::Nationality => self.nationality(rng),
        }
    }

    /// A creature name: an adjective or nationality, then a generated
    /// creature word. Title-cased, parentheses removed.
    pub fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ForgeError> {
        let first = if rng.gen_bool(0.5) {
            pick(&self.adjectives, ADJECTIVES, rng)?.to_string()
        } else {
            self.nationalities
                .choose(rng)
                .cloned()
                .ok_or_else(|| ForgeError::EmptyLexicon("nationalities".to_string()))?
        };
        let first = self.maybe_prefixed(first, rng)?;
        let second = self.word(&self.creature, rng)?;

        Ok(finish(&[first, second]))
    }

    /// An item name: an adjective, then either an uncountable noun or a
    /// generated item/ability word.
    pub fn item<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ForgeError> {
        let first = pick(&self.adjectives, ADJECTIVES, rng)?.to_string();
        let first = self.maybe_prefixed(first, rng)?;

        // Uniform over nouns plus ITEM_POOL_GENERATED slots for each model.
        let nouns = self.uncountable_nouns.words();
        let slot = rng.gen_range(0..nouns.len() + 2 * ITEM_POOL_GENERATED);
        let second = if slot < nouns.len() {
            nouns[slot].clone()
        } else if slot < nouns.len() + ITEM_POOL_GENERATED {
            self.word(&self.item, rng)?
        } else {
            self.word(&self.ability, rng)?
        };

        Ok(finish(&[first, second]))
    }

    /// A move name. Single generated words get an adverb in front.
    pub fn move_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ForgeError> {
        let generated = strip_parens(&self.word(&self.ability, rng)?);
        if generated.contains(' ') {
            return Ok(generated);
        }
        let adverb = pick(&self.adverbs, ADVERBS, rng)?;
        Ok(format!("{} {}", adverb, generated))
    }

    /// A nationality adjective derived from a generated country name.
    pub fn nationality<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ForgeError> {
        let nation = self.word(&self.nation, rng)?;
        Ok(demonym(&nation, rng))
    }

    /// The nationalities rolled at build time and reused by `name`.
    pub fn nationalities(&self) -> &[String] {
        &self.nationalities
    }

    pub fn model(&self, id: &str) -> Option<&WordModel> {
        match id {
            CREATURE_MODEL => Some(&self.creature),
            ITEM_MODEL => Some(&self.item),
            ABILITY_MODEL => Some(&self.ability),
            NATION_MODEL => Some(&self.nation),
            _ => None,
        }
    }

    /// One generated word. Walks that overrun `max_word_len` are redrawn,
    /// up to `MAX_REDRAWS` extra attempts, before the error is returned.
    fn word<R: Rng + ?Sized>(&self, model: &WordModel, rng: &mut R) -> Result<String, ForgeError> {
        let Some(limit) = self.max_word_len else {
            return Ok(model.generate(rng)?);
        };

        let mut attempts = 0;
        loop {
            match model.generate_bounded(rng, limit) {
                Err(MarkovError::WalkTooLong(_)) if attempts < MAX_REDRAWS => {
                    attempts += 1;
                    debug!("word over {} characters, redrawing ({})", limit, attempts);
                }
                result => return Ok(result?),
            }
        }
    }

    fn maybe_prefixed<R: Rng + ?Sized>(&self, word: String, rng: &mut R) -> Result<String, ForgeError> {
        if rng.gen_bool(PREFIX_CHANCE) {
            let prefix = pick(&self.prefixes, PREFIXES, rng)?;
            Ok(format!("{}{}", prefix, word))
        } else {
            Ok(word)
        }
    }
}

impl NameForgeBuilder {
    /// Load lexicons and models from a RON `ForgeConfig` file.
    pub fn config(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Seed for the nationality roster rolled during `build`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the config's word length cap (`None` = unbounded).
    pub fn max_word_len(mut self, limit: Option<usize>) -> Self {
        self.max_word_len = Some(limit);
        self
    }

    /// Provide a model directly, replacing any configured one with the same id.
    pub fn with_model(mut self, id: &str, model: WordModel) -> Self {
        self.models.insert(id.to_string(), model);
        self
    }

    /// Provide a lexicon directly, replacing any configured one with the same id.
    pub fn with_lexicon(mut self, id: &str, lexicon: Lexicon) -> Self {
        self.lexicons.insert(id.to_string(), lexicon);
        self
    }

    pub fn build(self) -> Result<NameForge, ForgeError> {
        let mut models = FxHashMap::default();
        let mut lexicons = FxHashMap::default();
        let mut max_word_len = None;

        if let Some(ref path) = self.config_path {
            let config = ForgeConfig::load_from_ron(path)?;
            max_word_len = config.max_word_len;

            for (id, sources) in &config.lexicons {
                if self.lexicons.contains_key(id) {
                    continue;
                }
                let lexicon = Lexicon::load_sources(sources)?;
                info!("lexicon '{}': {} words", id, lexicon.len());
                lexicons.insert(id.clone(), lexicon);
            }

            for (id, spec) in &config.models {
                if self.models.contains_key(id) {
                    continue;
                }
                let corpus = Lexicon::load_sources(&spec.sources)?;
                info!("training model '{}' on {} words", id, corpus.len());
                let model = WordModel::build(corpus.words(), spec.state_size)?;
                models.insert(id.clone(), model);
            }
        }

        models.extend(self.models);
        lexicons.extend(self.lexicons);
        if let Some(limit) = self.max_word_len {
            max_word_len = limit;
        }

        let mut forge = NameForge {
            creature: take(&mut models, CREATURE_MODEL, ForgeError::MissingModel)?,
            item: take(&mut models, ITEM_MODEL, ForgeError::MissingModel)?,
            ability: take(&mut models, ABILITY_MODEL, ForgeError::MissingModel)?,
            nation: take(&mut models, NATION_MODEL, ForgeError::MissingModel)?,
            adjectives: take(&mut lexicons, ADJECTIVES, ForgeError::MissingLexicon)?,
            adverbs: take(&mut lexicons, ADVERBS, ForgeError::MissingLexicon)?,
            uncountable_nouns: take(&mut lexicons, UNCOUNTABLE_NOUNS, ForgeError::MissingLexicon)?,
            prefixes: take(&mut lexicons, PREFIXES, ForgeError::MissingLexicon)?,
            nationalities: Vec::new(),
            max_word_len,
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let roster = (0..ROSTER_SIZE)
            .map(|_| forge.nationality(&mut rng))
            .collect::<Result<Vec<_>, _>>()?;
        forge.nationalities = roster;

        info!(
            "name forge ready: {} nationalities rolled with seed {}",
            forge.nationalities.len(),
            self.seed
        );
        Ok(forge)
    }
}

fn take<T>(
    map: &mut FxHashMap<String, T>,
    id: &str,
    missing: fn(String) -> ForgeError,
) -> Result<T, ForgeError> {
    map.remove(id).ok_or_else(|| missing(id.to_string()))
}

fn pick<'a, R: Rng + ?Sized>(
    lexicon: &'a Lexicon,
    id: &str,
    rng: &mut R,
) -> Result<&'a str, ForgeError> {
    lexicon
        .choose(rng)
        .ok_or_else(|| ForgeError::EmptyLexicon(id.to_string()))
}

/// Turn a country-like word into a nationality by its final letter.
pub fn demonym<R: Rng + ?Sized>(nation: &str, rng: &mut R) -> String {
    match nation.chars().last() {
        Some('a') => format!("{}n", nation),
        Some('i') => format!("{}{}", nation, suffix(I_SUFFIXES, rng)),
        Some('e') => format!("{}{}", nation, suffix(E_SUFFIXES, rng)),
        Some('y') => format!("{}ian", &nation[..nation.len() - 1]),
        Some('u') => format!("{}vian", nation),
        _ => format!("{}{}", nation, suffix(DEFAULT_SUFFIXES, rng)),
    }
}

fn suffix<R: Rng + ?Sized>(options: &[&'static str], rng: &mut R) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn strip_parens(text: &str) -> String {
    text.replace(['(', ')'], "")
}

fn finish(parts: &[String]) -> String {
    strip_parens(&title_case(&parts.join(" ")))
}
