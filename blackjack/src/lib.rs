pub mod error;
mod input;
mod money;
pub mod session;
pub mod simulation;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use error::{GameError, GameResult, InputError};
pub use input::{parse_action, parse_bankroll, parse_bet, parse_deck_count, PlayerAction};
pub use money::{Money, ParseMoneyError};
pub use session::{SessionReport, TableSession};

pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 10;
pub const DEFAULT_MINIMUM_BET: Money = Money::from_dollars(20);

/// The table configuration a round is played under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub number_of_decks: u8,
    pub minimum_bet: Money,
    pub deal_order: DealOrder,
    pub dealer_draw_policy: DealerDrawPolicy,
}

/// The order the four initial cards go out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum DealOrder {
    /// Dealer, dealer, player, player.
    DealerFirst,
    /// Dealer, player, dealer, player.
    Alternating,
}

/// When the dealer keeps drawing. Neither policy knows about soft hands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum DealerDrawPolicy {
    /// Draw while the hand is worth 17 or less, so a 17 still draws.
    ThroughSeventeen,
    /// Draw while the hand is worth less than 17.
    BelowSeventeen,
}

impl DealerDrawPolicy {
    pub fn should_draw(&self, hand_value: u16) -> bool {
        match self {
            DealerDrawPolicy::ThroughSeventeen => hand_value <= 17,
            DealerDrawPolicy::BelowSeventeen => hand_value < 17,
        }
    }
}

impl Default for Rule {
    /// The multi-deck table.
    fn default() -> Self {
        Rule {
            number_of_decks: 6,
            minimum_bet: DEFAULT_MINIMUM_BET,
            deal_order: DealOrder::DealerFirst,
            dealer_draw_policy: DealerDrawPolicy::ThroughSeventeen,
        }
    }
}

impl Rule {
    /// The single-deck table: one deck, alternating deal, dealer stops at 17.
    pub fn single_deck() -> Self {
        Rule {
            number_of_decks: 1,
            deal_order: DealOrder::Alternating,
            dealer_draw_policy: DealerDrawPolicy::BelowSeventeen,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&self.number_of_decks) {
            return Err(GameError::InvalidConfiguration(format!(
                "The number of decks must be in the range from {} to {}",
                MIN_DECKS, MAX_DECKS
            )));
        }
        if self.minimum_bet == Money::ZERO {
            return Err(GameError::InvalidConfiguration(String::from(
                "The minimum bet must be greater than zero",
            )));
        }
        Ok(())
    }
}
