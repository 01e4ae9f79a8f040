/// Forge — generate words and names from the command line.
///
/// Usage:
///   forge words --source <file|pattern>... --state-size <n> [--count <n>] [--seed <n>]
///   forge names --config <forge.ron> --kind <creature|item|move|nationality> [--count <n>]
///   forge stats --source <file|pattern>... --state-size <n>
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lexigen::core::forge::NameForge;
use lexigen::core::lexicon::Lexicon;
use lexigen::schema::config::LexiconSource;
use lexigen::schema::kind::NameKind;
use lexigen::{State, WordModel};

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Markov word and name generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model on word lists and print generated words
    Words {
        /// Word-list file, or a pattern like `data/*.txt` (repeatable)
        #[arg(short, long = "source", required = true)]
        sources: Vec<String>,

        #[arg(short = 'n', long, default_value_t = 3)]
        state_size: usize,

        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Give up on words longer than this many characters
        #[arg(long)]
        max_len: Option<usize>,
    },
    /// Compose names with the configured forge
    Names {
        #[arg(long, default_value = "lexicon_data/forge.ron")]
        config: String,

        #[arg(short, long, default_value_t = NameKind::Creature)]
        kind: NameKind,

        #[arg(short, long, default_value_t = 10)]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the size of a trained model's transition table
    Stats {
        #[arg(short, long = "source", required = true)]
        sources: Vec<String>,

        #[arg(short = 'n', long, default_value_t = 3)]
        state_size: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Words {
            sources,
            state_size,
            count,
            seed,
            max_len,
        } => {
            let model = train(&sources, state_size)?;
            let mut rng = make_rng(seed);
            for _ in 0..count {
                let word = match max_len {
                    Some(limit) => model.generate_bounded(&mut rng, limit),
                    None => model.generate(&mut rng),
                }
                .context("word generation failed")?;
                println!("{}", word);
            }
        }
        Commands::Names {
            config,
            kind,
            count,
            seed,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let forge = NameForge::builder()
                .config(&config)
                .seed(seed)
                .build()
                .with_context(|| format!("failed to build name forge from '{}'", config))?;
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..count {
                println!("{}", forge.forge(kind, &mut rng)?);
            }
        }
        Commands::Stats {
            sources,
            state_size,
        } => {
            let model = train(&sources, state_size)?;
            println!(
                "Model trained: state size {}, {} states, {} transitions, {} distinct openings",
                model.state_size(),
                model.state_count(),
                model.transition_count(),
                model.transitions_from(&State::Start).len()
            );
        }
    }

    Ok(())
}

fn train(sources: &[String], state_size: usize) -> Result<WordModel> {
    let sources: Vec<LexiconSource> = sources
        .iter()
        .map(|s| {
            if s.contains(['*', '?', '[']) {
                LexiconSource::Pattern(s.clone())
            } else {
                LexiconSource::File(s.into())
            }
        })
        .collect();

    let lexicon = Lexicon::load_sources(&sources).context("failed to load word lists")?;
    debug!("training on {} words", lexicon.len());
    let model = WordModel::build(lexicon.words(), state_size)?;
    Ok(model)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
