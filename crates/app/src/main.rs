use std::fmt;
use std::io;
use std::sync::Arc;

use coach_core::Clock;
use services::{CoachService, PassageGenerator};
use tracing_subscriber::EnvFilter;
use ui::ConsolePresenter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--seed <u64>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed <u64>   fix topic and skill selection (useful for demos)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COACH_AI_API_KEY    credential for the generation service (required)");
    eprintln!("  COACH_AI_BASE_URL   chat-completion endpoint base (default OpenAI)");
    eprintln!("  COACH_AI_MODEL      model name (default gpt-4o-mini)");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or(ArgsError::MissingValue { flag: "--seed" })?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { seed })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Wiring stays in the binary glue so core/services remain pure.
    let clock = Clock::default_clock();
    let generator = Arc::new(PassageGenerator::from_env());
    let mut coach = CoachService::new(clock, generator);
    if let Some(seed) = args.seed {
        coach = coach.with_seed(seed);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut presenter = ConsolePresenter::new(stdin.lock(), stdout.lock(), clock);
    presenter.run(&mut coach).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
