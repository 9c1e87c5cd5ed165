mod console;

use anyhow::{Context, Result};
use blackjack::simulation::shoe::Shoe;
use blackjack::strategy::ThresholdStrategy;
use blackjack::{parse_deck_count, GameError, Rule, TableSession};
use blackjack_drivers::{load_config, DEFAULT_CONFIG_PATH};
use clap::Parser;
use console::{ConsoleHandler, ConsoleStrategy};
use log::{debug, info};

const MISSING_DECKS_MESSAGE: &str = "When you run this script you need to include a number that denotes how many decks you'll be playing with.";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CommandLineArgs {
    /// How many decks make up the shoe, from 1 to 10
    decks: Option<String>,

    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Seed the shoe to replay the same cards
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Play one automatic round at the single-deck table and exit
    #[arg(long, default_value_t = false)]
    auto: bool,

    /// Enable verbose logging (use -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();
    debug!("{:?}", args);

    if args.auto {
        return play_automatic_round(args.seed);
    }

    let decks = match args.decks.as_deref() {
        Some(decks) => decks,
        None => {
            println!("{}", MISSING_DECKS_MESSAGE);
            return Ok(());
        }
    };
    let number_of_decks = match parse_deck_count(decks) {
        Ok(number_of_decks) => number_of_decks,
        Err(err) => {
            println!("{}", err);
            return Ok(());
        }
    };

    let config = load_config(&args.config).context("Failed to load config")?;
    let mut rule: Rule = config
        .rule
        .try_into()
        .context("Invalid rule in config file")?;
    rule.number_of_decks = number_of_decks;
    rule.validate()?;
    info!("playing with {:?}", rule);

    let shoe = build_shoe(number_of_decks, args.seed)?;
    let mut strategy = ConsoleStrategy;
    let mut handler = ConsoleHandler::default();

    let bankroll =
        match TableSession::collect_bankroll(&mut strategy, &mut handler, rule.minimum_bet) {
            Ok(bankroll) => bankroll,
            Err(GameError::InputClosed) => return Ok(()),
            Err(err) => return Err(err).context("Failed to collect the bankroll"),
        };

    let mut session = TableSession::new(&rule, shoe, bankroll)?;
    match session.run(&mut strategy, &mut handler) {
        Ok(report) => info!(
            "left the table after {} round(s) with {}",
            report.rounds_played, report.final_bankroll
        ),
        Err(GameError::ShoeExhausted) => println!("{}", GameError::ShoeExhausted),
        Err(GameError::InputClosed) => debug!("input closed, leaving the table"),
        Err(err) => return Err(err).context("The table closed unexpectedly"),
    }
    Ok(())
}

/// One round where nobody is asked anything: the player hits below 17 at
/// the single-deck table.
fn play_automatic_round(seed: Option<u64>) -> Result<()> {
    let rule = Rule::single_deck();
    let shoe = build_shoe(rule.number_of_decks, seed)?;
    let mut session = TableSession::new(&rule, shoe, rule.minimum_bet)?;
    let mut strategy = ThresholdStrategy::default();
    let mut handler = ConsoleHandler::default();
    match session.play_single_round(&mut strategy, &mut handler) {
        Ok(_) => {}
        Err(GameError::ShoeExhausted) => println!("{}", GameError::ShoeExhausted),
        Err(err) => return Err(err).context("The automatic round failed"),
    }
    Ok(())
}

fn build_shoe(number_of_decks: u8, seed: Option<u64>) -> Result<Shoe> {
    let shoe = match seed {
        Some(seed) => Shoe::with_seed(number_of_decks, seed)?,
        None => Shoe::new(number_of_decks)?,
    };
    Ok(shoe)
}
