/// Character-level Markov word model — training and random-walk generation.

use log::{info, warn};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

use crate::core::weighted::weighted_choice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkovError {
    #[error("state size must be at least 1, got {0}")]
    InvalidStateSize(usize),
    #[error("no continuation from state {0} (model is empty or malformed)")]
    EmptyDistribution(State),
    #[error("walk exceeded {0} characters without reaching the end marker")]
    WalkTooLong(usize),
}

/// A vertex of the transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// Before the first character of a word.
    Start,
    /// A run of `state_size` characters, or a whole word shorter than that.
    Fragment(String),
    /// After the last character of a word.
    End,
}

impl State {
    fn fragment(chars: &[char]) -> Self {
        State::Fragment(chars.iter().collect())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => f.write_str("^"),
            State::Fragment(text) => write!(f, "{:?}", text),
            State::End => f.write_str("$"),
        }
    }
}

/// Source state → `[(destination, count)]`, destinations in first-seen order.
type TransitionTable = FxHashMap<State, Vec<(State, u32)>>;

/// A trained character n-gram model.
///
/// Immutable once built: every method takes `&self`, so a single model can
/// be shared by reference between any number of generating callers.
#[derive(Debug, Clone)]
pub struct WordModel {
    state_size: usize,
    transitions: TransitionTable,
}

impl WordModel {
    /// Build a model from normalized training words.
    ///
    /// For each word this records `START → head`, `tail → END` and every
    /// overlapping `w[i..i+n] → w[i+1..i+1+n]` step, adding 1 per
    /// occurrence. Words shorter than `state_size` contribute a single
    /// short fragment. Words are taken literally; empty words are skipped.
    pub fn build<I, S>(words: I, state_size: usize) -> Result<WordModel, MarkovError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if state_size == 0 {
            return Err(MarkovError::InvalidStateSize(state_size));
        }

        let mut transitions = TransitionTable::default();
        let mut word_count = 0usize;

        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                warn!("skipping empty training word");
                continue;
            }

            let chars: Vec<char> = word.chars().collect();
            let edge = chars.len().min(state_size);

            add_transition(&mut transitions, State::Start, State::fragment(&chars[..edge]));
            add_transition(
                &mut transitions,
                State::fragment(&chars[chars.len() - edge..]),
                State::End,
            );

            for window in chars.windows(state_size + 1) {
                add_transition(
                    &mut transitions,
                    State::fragment(&window[..state_size]),
                    State::fragment(&window[1..]),
                );
            }

            word_count += 1;
        }

        let model = WordModel {
            state_size,
            transitions,
        };
        info!(
            "Markov model built: state size {}, {} words, {} states, {} transitions",
            state_size,
            word_count,
            model.state_count(),
            model.transition_count()
        );
        Ok(model)
    }

    /// Generate a word by walking from `START` until `END` is drawn.
    ///
    /// The first fragment is emitted whole; every later fragment overlaps
    /// its predecessor in all but the final character, so only that
    /// character is appended. There is no length cap; see
    /// [`WordModel::generate_bounded`].
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, MarkovError> {
        self.walk(rng, None)
    }

    /// Like [`WordModel::generate`], but fails with `WalkTooLong` once the
    /// word grows past `max_chars` characters.
    pub fn generate_bounded<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        max_chars: usize,
    ) -> Result<String, MarkovError> {
        self.walk(rng, Some(max_chars))
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Outgoing transitions of `state`, in first-seen order.
    pub fn transitions_from(&self, state: &State) -> &[(State, u32)] {
        self.transitions
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Accumulated count of `from → to`, zero when never observed.
    pub fn weight(&self, from: &State, to: &State) -> u32 {
        self.transitions_from(from)
            .iter()
            .find(|(dest, _)| dest == to)
            .map_or(0, |(_, count)| *count)
    }

    /// Number of source states, `START` included.
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Number of distinct `(source, destination)` pairs.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        max_chars: Option<usize>,
    ) -> Result<String, MarkovError> {
        let start = State::Start;
        let mut current = &start;
        let mut word = String::new();
        let mut len = 0usize;

        loop {
            let next = self.pick_next(current, rng)?;
            match next {
                State::End => return Ok(word),
                State::Fragment(fragment) if current == &State::Start => {
                    word.push_str(fragment);
                    len += fragment.chars().count();
                }
                State::Fragment(fragment) => {
                    if let Some(last) = fragment.chars().last() {
                        word.push(last);
                        len += 1;
                    }
                }
                // Never recorded as a destination; a table that has one is malformed.
                State::Start => return Err(MarkovError::EmptyDistribution(current.clone())),
            }

            if let Some(limit) = max_chars {
                if len > limit {
                    return Err(MarkovError::WalkTooLong(limit));
                }
            }
            current = next;
        }
    }

    fn pick_next<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> Result<&State, MarkovError> {
        weighted_choice(self.transitions_from(state), rng)
            .map_err(|_| MarkovError::EmptyDistribution(state.clone()))
    }
}

/// Add a transition to a transition table, incrementing the count.
fn add_transition(table: &mut TransitionTable, from: State, to: State) {
    let entries = table.entry(from).or_default();
    if let Some(entry) = entries.iter_mut().find(|(dest, _)| dest == &to) {
        entry.1 += 1;
    } else {
        entries.push((to, 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frag(s: &str) -> State {
        State::Fragment(s.to_string())
    }

    #[test]
    fn single_word_at_state_size() {
        let model = WordModel::build(["cat"], 3).unwrap();

        assert_eq!(model.transitions_from(&State::Start), &[(frag("cat"), 1)]);
        assert_eq!(model.transitions_from(&frag("cat")), &[(State::End, 1)]);
        assert_eq!(model.state_count(), 2);
        assert_eq!(model.transition_count(), 2);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(model.generate(&mut rng).unwrap(), "cat");
        }
    }

    #[test]
    fn overlapping_states() {
        let model = WordModel::build(["abcd"], 2).unwrap();

        assert_eq!(model.weight(&State::Start, &frag("ab")), 1);
        assert_eq!(model.weight(&frag("ab"), &frag("bc")), 1);
        assert_eq!(model.weight(&frag("bc"), &frag("cd")), 1);
        assert_eq!(model.weight(&frag("cd"), &State::End), 1);
        assert_eq!(model.transition_count(), 4);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(model.generate(&mut rng).unwrap(), "abcd");
    }

    #[test]
    fn short_word_is_a_single_fragment() {
        let model = WordModel::build(["a"], 3).unwrap();

        assert_eq!(model.transitions_from(&State::Start), &[(frag("a"), 1)]);
        assert_eq!(model.transitions_from(&frag("a")), &[(State::End, 1)]);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(model.generate(&mut rng).unwrap(), "a");
    }

    #[test]
    fn counts_accumulate_across_words() {
        let model = WordModel::build(["aa", "aa", "ab"], 2).unwrap();

        assert_eq!(
            model.transitions_from(&State::Start),
            &[(frag("aa"), 2), (frag("ab"), 1)]
        );
        assert_eq!(model.weight(&frag("aa"), &State::End), 2);
        assert_eq!(model.weight(&frag("ab"), &State::End), 1);
    }

    #[test]
    fn destinations_keep_first_seen_order() {
        let model = WordModel::build(["xb", "xa", "xb", "xc"], 1).unwrap();
        let dests: Vec<&State> = model
            .transitions_from(&frag("x"))
            .iter()
            .map(|(dest, _)| dest)
            .collect();
        assert_eq!(dests, vec![&frag("b"), &frag("a"), &frag("c")]);
    }

    #[test]
    fn multibyte_characters_are_single_steps() {
        let model = WordModel::build(["çaño"], 2).unwrap();
        assert_eq!(model.weight(&State::Start, &frag("ça")), 1);
        assert_eq!(model.weight(&frag("ça"), &frag("añ")), 1);
        assert_eq!(model.weight(&frag("añ"), &frag("ño")), 1);

        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(model.generate(&mut rng).unwrap(), "çaño");
    }

    #[test]
    fn punctuation_passes_through() {
        let model = WordModel::build(["mr. mime"], 3).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(model.generate(&mut rng).unwrap(), "mr. mime");
    }

    #[test]
    fn empty_words_are_skipped() {
        let model = WordModel::build(["", "ok"], 2).unwrap();
        assert_eq!(model.transitions_from(&State::Start), &[(frag("ok"), 1)]);
    }

    #[test]
    fn zero_state_size_rejected() {
        let err = WordModel::build(["cat"], 0).unwrap_err();
        assert_eq!(err, MarkovError::InvalidStateSize(0));
    }

    #[test]
    fn empty_corpus_fails_to_generate() {
        let model = WordModel::build(Vec::<String>::new(), 3).unwrap();
        assert!(model.is_empty());

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            model.generate(&mut rng),
            Err(MarkovError::EmptyDistribution(State::Start))
        );
    }

    #[test]
    fn generate_deterministic() {
        let words = ["pikachu", "raichu", "pichu", "bulbasaur", "ivysaur", "venusaur"];
        let model = WordModel::build(words, 2).unwrap();

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(
                model.generate(&mut rng1).unwrap(),
                model.generate(&mut rng2).unwrap()
            );
        }
    }

    #[test]
    fn generated_words_are_at_least_state_size() {
        let words = ["pikachu", "raichu", "pichu", "bulbasaur", "ivysaur", "venusaur"];
        let model = WordModel::build(words, 3).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let word = model.generate(&mut rng).unwrap();
            assert!(word.chars().count() >= 3, "too short: {}", word);
        }
    }

    #[test]
    fn bounded_walk_stops_runaway_words() {
        // "aaaa..." loops on "aa" with weight 8 against one exit.
        let model = WordModel::build(["aaaaaaaaaa"], 2).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut saw_cutoff = false;
        for _ in 0..200 {
            match model.generate_bounded(&mut rng, 4) {
                Ok(word) => assert!(word.chars().count() <= 4),
                Err(MarkovError::WalkTooLong(4)) => saw_cutoff = true,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        assert!(saw_cutoff);
    }

    #[test]
    fn bounded_walk_allows_exact_limit() {
        let model = WordModel::build(["abcd"], 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.generate_bounded(&mut rng, 4).unwrap(), "abcd");
        assert_eq!(
            model.generate_bounded(&mut rng, 3),
            Err(MarkovError::WalkTooLong(3))
        );
    }

    #[test]
    fn start_as_destination_is_an_error() {
        let mut model = WordModel::build(["ab"], 2).unwrap();
        model
            .transitions
            .insert(frag("ab"), vec![(State::Start, 1)]);

        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            model.generate(&mut rng),
            Err(MarkovError::EmptyDistribution(frag("ab")))
        );
    }

    #[test]
    fn state_display() {
        assert_eq!(State::Start.to_string(), "^");
        assert_eq!(State::End.to_string(), "$");
        assert_eq!(frag("ab").to_string(), "\"ab\"");
    }
}
