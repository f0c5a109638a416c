use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pizza_delivery::{GameConfig, Question, QuestionFeed, Variant, NUM_TEAMS, TEAMS};
use question_feed::{FileSource, QuestionSource, TopicIds};
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{play_game, Contestant, Recorder, Strategy};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Classic,
    Obstacles,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Random,
    Greedy,
}

#[derive(Parser)]
struct Args {
    /// Strategy of each team, in the order red, blue, green, yellow
    #[clap(num_args(4), value_delimiter = ' ', default_values = ["greedy", "greedy", "random", "random"])]
    strategies: Vec<StrategyArg>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = VariantArg::Classic)]
    variant: VariantArg,

    /// Play with the questions from this JSON file
    #[arg(short, long)]
    questions_file: Option<PathBuf>,

    /// Without a questions file, play with this many placeholder questions
    #[arg(long, default_value_t = 30)]
    num_questions: usize,

    /// Probability that a contestant knows the answer
    #[arg(short, long, default_value_t = 0.6)]
    accuracy: f64,

    /// Record every game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    wins: [usize; NUM_TEAMS],
    ties: usize,
    deliveries: u32,
    obstacles: usize,
}

fn placeholder_questions(count: usize) -> QuestionFeed {
    (1..=count)
        .map(|i| Question::Open {
            question: format!("Question {}", i),
            answer: format!("Answer {}", i),
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = &args.record_games_to_directory {
        Some(Recorder::new(dir_path.clone())?)
    } else {
        None
    };

    let questions = match &args.questions_file {
        Some(path) => FileSource::new(path.clone()).fetch(&TopicIds::default())?,
        None => placeholder_questions(args.num_questions),
    };
    info!(num_questions = questions.len());

    let variant = match args.variant {
        VariantArg::Classic => Variant::Classic,
        VariantArg::Obstacles => Variant::Obstacles,
    };
    let config = GameConfig::new(variant);

    let mut contestants: [Box<dyn Contestant>; NUM_TEAMS] = TEAMS.map(|team| {
        let strategy = match args.strategies[team.index()] {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Greedy => Strategy::Greedy,
        };
        strategy.contestant(args.accuracy)
    });

    let mut tally = Tally::default();
    for game_idx in 0..args.num_games {
        let result = play_game(&mut rng, config, &questions, &mut contestants, &mut recorder)?;
        if let [winner] = result.winners.as_slice() {
            debug!(game_idx, winner = %winner, scores = ?result.scores);
            tally.wins[winner.index()] += 1;
        } else {
            debug!(game_idx, winners = ?result.winners, "Tie");
            tally.ties += 1;
        }
        tally.deliveries += result.deliveries;
        tally.obstacles += result.obstacles;
    }

    print_results(&args, &contestants, &tally);
    Ok(())
}

fn print_results(args: &Args, contestants: &[Box<dyn Contestant>; NUM_TEAMS], tally: &Tally) {
    let num_games = args.num_games.max(1) as f32;
    println!("\nResults after {} games:\n", args.num_games);
    println!(" {:8} | {:8} | {:>6}", "team", "strategy", "wins");
    println!("----------|----------|-------");
    for team in TEAMS {
        let wins = tally.wins[team.index()];
        println!(
            " {:8} | {:8} | {:5.1}%",
            team.to_string(),
            contestants[team.index()].name(),
            wins as f32 / num_games * 100.0
        );
    }
    println!(" {:8} | {:8} | {:5.1}%", "tie", "", tally.ties as f32 / num_games * 100.0);
    println!(
        "\n{:.1} deliveries and {:.1} obstacles per game",
        tally.deliveries as f32 / num_games,
        tally.obstacles as f32 / num_games
    );
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
