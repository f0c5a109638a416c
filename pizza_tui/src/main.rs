use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use pizza_delivery::{GameConfig, QuestionFeed, Variant};
use question_feed::{FeedLoader, FileSource, HttpSource, QuestionSource, TopicIds, DEFAULT_API_BASE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    crossterm::{
        event::{self, Event},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod ui;

use app::App;

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Teams play in turn, no obstacles
    Classic,
    /// Teams are picked before answering, obstacles appear on the board
    Obstacles,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Variant {
        match arg {
            VariantArg::Classic => Variant::Classic,
            VariantArg::Obstacles => Variant::Obstacles,
        }
    }
}

#[derive(Parser)]
struct Args {
    /// Topic identifiers to fetch questions for. Without topics, the game runs in free mode
    topics: Vec<String>,

    /// A route like "/12,15" or "/?topics=12,15" to take the topics from instead
    #[arg(long, conflicts_with = "topics")]
    route: Option<String>,

    #[arg(short, long, value_enum, default_value_t = VariantArg::Classic)]
    variant: VariantArg,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Base URL of the question service
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Read the questions from this JSON file instead of the question service
    #[arg(long)]
    questions_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Write logs to this file. The terminal is taken by the game, so there are no logs otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        initialize_logging(args.log_level, path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let topics = match &args.route {
        Some(route) => TopicIds::from_route(route),
        None => TopicIds::new(&args.topics),
    };
    let source: Box<dyn QuestionSource> = match args.questions_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&args.api_base)?),
    };
    let mut app = App::new(
        GameConfig::new(args.variant.into()),
        topics.mode(),
        StdRng::seed_from_u64(seed),
    );
    let questions = spawn_loader(FeedLoader::new(source, topics));

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app, questions);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

/// Fetches the questions in the background, so the board shows up right away.
///
/// Sends the feed, or the reason there is none.
fn spawn_loader(
    mut loader: FeedLoader<Box<dyn QuestionSource>>,
) -> Receiver<Result<QuestionFeed, String>> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        if let Some(feed) = loader.load() {
            let update = match loader.failure() {
                Some(error) => Err(error.to_string()),
                None => Ok(feed),
            };
            // The receiver is gone if the player already quit.
            let _ = sender.send(update);
        }
    });
    receiver
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    questions: Receiver<Result<QuestionFeed, String>>,
) -> anyhow::Result<()> {
    while !app.should_quit {
        match questions.try_recv() {
            Ok(Ok(feed)) => app.questions_loaded(feed),
            Ok(Err(error)) => app.questions_failed(error),
            Err(_) => {}
        }
        terminal.draw(|frame| ui::draw(frame, app))?;
        handle_events(app)?;
    }
    Ok(())
}

fn handle_events(app: &mut App) -> io::Result<()> {
    if event::poll(Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(File::create(path)?)),
        )
        .with(filter)
        .init();
    Ok(())
}
