/// Creature Roster example — rolls a handful of wild creatures, each with
/// a held item and two moves, from the shipped lexicons.
///
/// Also shows the raw word model on its own: one model trained on the
/// country list, shared by reference between two independent RNGs.
///
/// Run with: cargo run --example creature_roster

use lexigen::core::forge::NameForge;
use lexigen::core::lexicon::Lexicon;
use lexigen::WordModel;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    // --- Build the forge from the shipped config ---
    let forge = NameForge::builder()
        .config("lexicon_data/forge.ron")
        .seed(1996)
        .build()
        .expect("Failed to build name forge");

    let mut rng = StdRng::seed_from_u64(151);

    println!("=== Wild creatures ===\n");
    for slot in 1..=6 {
        let name = forge.name(&mut rng).expect("creature name");
        let item = forge.item(&mut rng).expect("held item");
        let moves = [
            forge.move_name(&mut rng).expect("first move"),
            forge.move_name(&mut rng).expect("second move"),
        ];
        println!("#{} {}", slot, name);
        println!("   holds: {}", item);
        println!("   moves: {}, {}", moves[0], moves[1]);
    }

    println!("\n=== Rolled nationalities ===\n");
    println!("{}", forge.nationalities().join(", "));

    // --- A bare model, no forge ---
    let countries = Lexicon::load(std::path::Path::new("lexicon_data/countries.txt"))
        .expect("Failed to load country list");
    let model = WordModel::build(countries.words(), 2).expect("Failed to train model");

    let mut left = StdRng::seed_from_u64(1);
    let mut right = StdRng::seed_from_u64(2);
    println!("\n=== Invented countries (state size 2) ===\n");
    for _ in 0..5 {
        println!(
            "{:<20} {}",
            model.generate(&mut left).expect("country"),
            model.generate(&mut right).expect("country")
        );
    }
}
