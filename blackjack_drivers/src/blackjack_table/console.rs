use std::io::{self, BufRead, Write};

use blackjack::simulation::{
    hand::Hand, shoe::Shoe, Outcome, Rank, RoundEventHandler, RoundSummary,
};
use blackjack::strategy::Strategy;
use blackjack::{GameError, GameResult, InputError, Money};
use log::{debug, warn};

/// Asks the person at the terminal for every reply.
#[derive(Debug, Default)]
pub struct ConsoleStrategy;

impl ConsoleStrategy {
    fn ask(&mut self, prompt: &str) -> GameResult<String> {
        print!("{}", prompt);
        if let Err(err) = io::stdout().flush() {
            warn!("cannot flush stdout: {}", err);
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(GameError::InputClosed),
            Ok(_) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!("cannot read stdin: {}", err);
                Err(GameError::InputClosed)
            }
        }
    }
}

impl Strategy for ConsoleStrategy {
    fn bankroll_reply(&mut self, _: Money) -> GameResult<String> {
        self.ask("How much money do you want to play with?\n> $")
    }

    fn bet_reply(&mut self, bankroll: Money, minimum: Money) -> GameResult<String> {
        println!("\nYou currently have {}", bankroll);
        self.ask(&format!(
            "How much money would you like to bet on this hand? (min: ${})\n> $",
            minimum.compact()
        ))
    }

    fn hit_or_stay_reply(&mut self, _: &Hand) -> GameResult<String> {
        self.ask("Would you like to hit or stay?\n> ")
    }
}

/// Prints the table talk for each event of a round.
#[derive(Debug, Default)]
pub struct ConsoleHandler {
    rounds: u32,
}

impl ConsoleHandler {
    fn show_hand(&self, hand: &Hand) {
        println!("You have {} in your hand.", hand.value());
        println!("Your cards are: {}", hand);
    }
}

impl RoundEventHandler for ConsoleHandler {
    fn on_round_begin(&mut self, bankroll: Money, shoe: &Shoe) {
        self.rounds += 1;
        debug!(
            "round {} begins with {}, {} card(s) in the shoe",
            self.rounds,
            bankroll,
            shoe.remaining_total()
        );
    }

    fn on_input_rejected(&mut self, error: &InputError) {
        println!("{}\n", error);
    }

    fn on_bet_placed(&mut self, _: Money, _: Money) {}

    fn on_initial_deal(&mut self, player_hand: &Hand, _: &Hand) {
        self.show_hand(player_hand);
    }

    fn on_player_draw(&mut self, rank: Rank, player_hand: &Hand) {
        println!("\nYou drew {} into your hand.", rank);
        if !player_hand.is_bust() {
            self.show_hand(player_hand);
        }
    }

    fn on_dealer_draw(&mut self, _: Rank) {}

    fn on_summary(&mut self, summary: &RoundSummary) {
        println!("{}", summary_message(summary));
    }
}

/// What the table says once a round is settled.
pub fn summary_message(summary: &RoundSummary) -> String {
    let player_cards = summary
        .player_cards
        .iter()
        .map(|rank| rank.label())
        .collect::<Vec<_>>()
        .join(" ");
    match summary.outcome {
        Outcome::PlayerBust => format!(
            "You have {} in your hand. Bust! Try again!\n----",
            summary.player_value
        ),
        Outcome::DealerBust => format!(
            "The dealer drew {} into their hand and busted! You won!",
            summary.dealer_value
        ),
        Outcome::PlayerWins => format!(
            "You've drawn {} You have {} in your hand, and you won! Congratulations!",
            player_cards, summary.player_value
        ),
        Outcome::Push => format!(
            "You've drawn {} You have {} in your hand and tied with the dealer. No win, no loss.",
            player_cards, summary.player_value
        ),
        Outcome::DealerWins => format!(
            "You've drawn {} You have {} in your hand, but the dealer had {}. You lose!",
            player_cards, summary.player_value, summary.dealer_value
        ),
    }
}
