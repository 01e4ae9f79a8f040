/// Word model integration tests — building from lexicons and walking the chain.

use lexigen::core::lexicon::Lexicon;
use lexigen::core::weighted::weighted_choice;
use lexigen::{MarkovError, State, WordModel};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::path::Path;

fn fixture_model(state_size: usize) -> WordModel {
    let lexicon = Lexicon::load(Path::new("tests/fixtures/creatures.txt")).unwrap();
    WordModel::build(lexicon.words(), state_size).unwrap()
}

#[test]
fn fixture_lexicon_is_normalized() {
    let lexicon = Lexicon::load(Path::new("tests/fixtures/creatures.txt")).unwrap();
    assert_eq!(lexicon.len(), 19);
    assert_eq!(lexicon.words()[0], "bulbasaur");
    assert!(lexicon.words().contains(&"pidgey".to_string()));
    assert!(lexicon.words().contains(&"mr. mime".to_string()));
}

#[test]
fn same_seed_same_words() {
    let model = fixture_model(3);

    let run = |seed: u64| -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..25).map(|_| model.generate(&mut rng).unwrap()).collect()
    };

    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}

#[test]
fn generated_words_are_made_of_corpus_fragments() {
    let lexicon = Lexicon::load(Path::new("tests/fixtures/creatures.txt")).unwrap();
    let model = WordModel::build(lexicon.words(), 2).unwrap();

    let mut bigrams: HashSet<String> = HashSet::new();
    for word in lexicon.words() {
        let chars: Vec<char> = word.chars().collect();
        for pair in chars.windows(2) {
            bigrams.insert(pair.iter().collect());
        }
    }

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let word = model.generate(&mut rng).unwrap();
        let chars: Vec<char> = word.chars().collect();
        for pair in chars.windows(2) {
            let pair: String = pair.iter().collect();
            assert!(bigrams.contains(&pair), "'{}' in '{}' not in corpus", pair, word);
        }
    }
}

#[test]
fn punctuation_survives_generation() {
    let model = WordModel::build(["farfetch'd"], 3).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(model.generate(&mut rng).unwrap(), "farfetch'd");
}

#[test]
fn start_weights_bias_sampling() {
    let model = WordModel::build(["aa", "aa", "ab"], 2).unwrap();
    let starts = model.transitions_from(&State::Start);

    let aa = State::Fragment("aa".to_string());
    let ab = State::Fragment("ab".to_string());
    assert_eq!(model.weight(&State::Start, &aa), 2);
    assert_eq!(model.weight(&State::Start, &ab), 1);

    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 10_000;
    let mut aa_count = 0;
    let mut ab_count = 0;
    for _ in 0..trials {
        match weighted_choice(starts, &mut rng).unwrap() {
            s if *s == aa => aa_count += 1,
            s if *s == ab => ab_count += 1,
            other => panic!("unexpected start state {}", other),
        }
    }

    let ratio = aa_count as f64 / ab_count as f64;
    assert!(
        (1.8..2.2).contains(&ratio),
        "Expected aa roughly twice as often as ab, got {} vs {}",
        aa_count,
        ab_count
    );
}

#[test]
fn generated_words_also_follow_start_bias() {
    let model = WordModel::build(["aa", "aa", "ab"], 2).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let words: Vec<String> = (0..3000).map(|_| model.generate(&mut rng).unwrap()).collect();
    let aa = words.iter().filter(|w| *w == "aa").count();
    let ab = words.iter().filter(|w| *w == "ab").count();

    assert_eq!(aa + ab, words.len());
    assert!(aa > ab);
}

#[test]
fn deterministic_reconstruction() {
    let mut rng = StdRng::seed_from_u64(0);

    let cat = WordModel::build(["cat"], 3).unwrap();
    assert_eq!(cat.generate(&mut rng).unwrap(), "cat");

    let abcd = WordModel::build(["abcd"], 2).unwrap();
    assert_eq!(abcd.generate(&mut rng).unwrap(), "abcd");

    let short = WordModel::build(["a"], 3).unwrap();
    assert_eq!(short.generate(&mut rng).unwrap(), "a");
}

#[test]
fn empty_corpus_never_yields_a_word() {
    let model = WordModel::build(Vec::<&str>::new(), 3).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..3 {
        assert!(matches!(
            model.generate(&mut rng),
            Err(MarkovError::EmptyDistribution(State::Start))
        ));
    }
}

#[test]
fn invalid_state_size() {
    assert!(matches!(
        WordModel::build(["cat"], 0),
        Err(MarkovError::InvalidStateSize(0))
    ));
}

#[test]
fn model_is_shareable_across_threads() {
    let model = fixture_model(3);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                let model = &model;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    model.generate(&mut rng).unwrap()
                })
            })
            .collect();

        for (seed, handle) in handles.into_iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            assert_eq!(handle.join().unwrap(), model.generate(&mut rng).unwrap());
        }
    });
}
