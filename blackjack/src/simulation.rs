pub mod hand;
pub mod shoe;

use crate::{
    input::{parse_action, parse_bet},
    strategy::Strategy,
    DealOrder, GameError, GameResult, InputError, Money, PlayerAction, Rule,
};
use blackjack_macros::allowed_phase;
use log::{debug, warn};
use strum_macros::{EnumCount, EnumIter, FromRepr};

use self::{hand::Hand, shoe::Shoe};

pub const BLACKJACK: u16 = 21;
pub const NUMBER_OF_RANKS: usize = 14;

static RANK_TO_BLACKJACK_VALUE: [u8; NUMBER_OF_RANKS] =
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10, 11];
static RANK_LABELS: [&str; NUMBER_OF_RANKS] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A",
];

/// A card rank. The set deliberately includes a `1` next to the ace, so a
/// deck holds 14 ranks of 4 cards each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
pub enum Rank {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Face value for 1 to 10, 10 for J, Q and K, and always 11 for an ace.
    pub fn blackjack_value(&self) -> u8 {
        RANK_TO_BLACKJACK_VALUE[self.index()]
    }

    pub fn label(&self) -> &'static str {
        RANK_LABELS[self.index()]
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Betting,
    InitialDeal,
    PlayerTurn,
    DealerTurn,
    Settlement,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    bankroll: Money,
    hand: Hand,
}

impl Player {
    pub fn new(bankroll: Money) -> Player {
        Player {
            bankroll,
            hand: Hand::new(),
        }
    }

    pub fn bankroll(&self) -> Money {
        self.bankroll
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    fn debit(&mut self, amount: Money) -> Result<(), InputError> {
        self.bankroll = self
            .bankroll
            .checked_sub(amount)
            .ok_or(InputError::BetAboveBankroll {
                bankroll: self.bankroll,
            })?;
        Ok(())
    }

    fn credit(&mut self, amount: Money) {
        self.bankroll += amount;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dealer {
    hand: Hand,
}

impl Dealer {
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWins,
    Push,
    DealerWins,
}

impl Outcome {
    /// How many times the bet is handed back to the player.
    pub fn payout_multiplier(&self) -> u64 {
        match self {
            Outcome::PlayerBust | Outcome::DealerWins => 0,
            Outcome::Push => 1,
            Outcome::DealerBust | Outcome::PlayerWins => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    pub payout: Money,
}

/// Decides a finished round from the two hand values alone. The payout
/// includes the returned stake: a win pays twice the bet, a push returns it.
pub fn settle_values(player_value: u16, dealer_value: u16, bet: Money) -> Settlement {
    let outcome = if player_value > BLACKJACK {
        Outcome::PlayerBust
    } else if dealer_value > BLACKJACK {
        Outcome::DealerBust
    } else if player_value > dealer_value {
        Outcome::PlayerWins
    } else if player_value == dealer_value {
        Outcome::Push
    } else {
        Outcome::DealerWins
    };
    Settlement {
        outcome,
        payout: bet.times(outcome.payout_multiplier()),
    }
}

/// Everything there is to say about a round once it is settled. The hands
/// it describes have already been cleared from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub outcome: Outcome,
    pub bet: Money,
    pub payout: Money,
    pub player_cards: Vec<Rank>,
    pub player_value: u16,
    pub dealer_cards: Vec<Rank>,
    pub dealer_value: u16,
    pub bankroll: Money,
}

/// Plays rounds of blackjack between one player and the dealer.
///
/// A round moves through the phases
/// `Betting -> InitialDeal -> PlayerTurn -> DealerTurn -> Settlement -> Done`.
/// Every step is a method that is only allowed in its own phase; calling it
/// at any other time returns [`GameError::WrongPhase`] and changes nothing.
/// [`RoundEngine::play_round`] runs all the steps with a [`Strategy`]
/// supplying the player's replies.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    rule: Rule,
    current_game_phase: GamePhase,
    shoe: Shoe,
    dealer: Dealer,
    current_bet: Money,
}

impl RoundEngine {
    pub fn new(rule: &Rule, shoe: Shoe) -> GameResult<Self> {
        rule.validate()?;
        Ok(Self {
            rule: *rule,
            current_game_phase: GamePhase::Betting,
            shoe,
            dealer: Dealer::default(),
            current_bet: Money::ZERO,
        })
    }

    /// Uses a fresh shoe with as many decks as the rule asks for.
    pub fn with_rule(rule: &Rule) -> GameResult<Self> {
        let shoe = Shoe::new(rule.number_of_decks)?;
        Self::new(rule, shoe)
    }

    /// Plays one whole round. Rejected replies are reported to the handler
    /// and asked for again; any other error ends the round where it stands.
    pub fn play_round<T: Strategy, U: RoundEventHandler>(
        &mut self,
        player: &mut Player,
        strategy: &mut T,
        handler: &mut U,
    ) -> GameResult<RoundSummary> {
        handler.on_round_begin(player.bankroll(), &self.shoe);

        let bet = loop {
            let reply = strategy.bet_reply(player.bankroll(), self.rule.minimum_bet)?;
            match self.place_bet(player, &reply) {
                Ok(bet) => break bet,
                Err(GameError::InvalidInput(err)) => reject(handler, &err),
                Err(err) => return Err(err),
            }
        };
        handler.on_bet_placed(bet, player.bankroll());

        self.deal_initial_cards(player)?;
        handler.on_initial_deal(player.hand(), self.dealer.hand());

        while self.current_game_phase == GamePhase::PlayerTurn {
            let reply = strategy.hit_or_stay_reply(player.hand())?;
            match self.player_acts(player, &reply) {
                Ok(Some(rank)) => handler.on_player_draw(rank, player.hand()),
                Ok(None) => {}
                Err(GameError::InvalidInput(err)) => reject(handler, &err),
                Err(err) => return Err(err),
            }
        }

        if self.current_game_phase == GamePhase::DealerTurn {
            for rank in self.dealer_plays()? {
                handler.on_dealer_draw(rank);
            }
        }

        let summary = self.settle(player)?;
        handler.on_summary(&summary);
        self.next_round()?;
        Ok(summary)
    }

    /// Can be called at Betting phase.
    /// Takes the bet out of the bankroll. A reply that is not a usable bet is
    /// returned as `InvalidInput` and the round stays in Betting.
    #[allowed_phase(Betting)]
    pub fn place_bet(&mut self, player: &mut Player, reply: &str) -> GameResult<Money> {
        let bet = parse_bet(reply, player.bankroll(), self.rule.minimum_bet)?;
        player.debit(bet)?;
        self.current_bet = bet;
        self.current_game_phase = GamePhase::InitialDeal;
        debug!("bet {} placed, {} left", bet, player.bankroll());
        Ok(bet)
    }

    /// Can be called at InitialDeal phase.
    /// Deals two cards each in the order the rule asks for. The player always
    /// gets a turn afterwards, even when the first two cards are over 21.
    #[allowed_phase(InitialDeal)]
    pub fn deal_initial_cards(&mut self, player: &mut Player) -> GameResult<()> {
        match self.rule.deal_order {
            DealOrder::DealerFirst => {
                for _ in 0..2 {
                    self.dealer.hand.draw_from(&mut self.shoe)?;
                }
                for _ in 0..2 {
                    player.hand.draw_from(&mut self.shoe)?;
                }
            }
            DealOrder::Alternating => {
                for _ in 0..2 {
                    self.dealer.hand.draw_from(&mut self.shoe)?;
                    player.hand.draw_from(&mut self.shoe)?;
                }
            }
        }
        debug!(
            "dealt player [{}] = {}, dealer [{}] = {}",
            player.hand,
            player.hand.value(),
            self.dealer.hand,
            self.dealer.hand.value()
        );

        self.current_game_phase = GamePhase::PlayerTurn;
        Ok(())
    }

    /// Can be called at PlayerTurn phase.
    /// Returns the card drawn on a hit, or None on a stay. Ending the turn
    /// over 21 skips the dealer, whether by hitting or by staying on a
    /// hand that was dealt bust.
    #[allowed_phase(PlayerTurn)]
    pub fn player_acts(&mut self, player: &mut Player, reply: &str) -> GameResult<Option<Rank>> {
        match parse_action(reply)? {
            PlayerAction::Stay => {
                self.current_game_phase = if player.hand.is_bust() {
                    GamePhase::Settlement
                } else {
                    GamePhase::DealerTurn
                };
                Ok(None)
            }
            PlayerAction::Hit => {
                let rank = player.hand.draw_from(&mut self.shoe)?;
                debug!("player hits {}, now {}", rank, player.hand.value());
                if player.hand.is_bust() {
                    self.current_game_phase = GamePhase::Settlement;
                }
                Ok(Some(rank))
            }
        }
    }

    /// Can be called at DealerTurn phase.
    /// The dealer draws according to the rule's draw policy. Returns the
    /// cards drawn, in order.
    #[allowed_phase(DealerTurn)]
    pub fn dealer_plays(&mut self) -> GameResult<Vec<Rank>> {
        let mut drawn = Vec::new();
        while self
            .rule
            .dealer_draw_policy
            .should_draw(self.dealer.hand.value())
        {
            drawn.push(self.dealer.hand.draw_from(&mut self.shoe)?);
        }
        debug!(
            "dealer stands on [{}] = {}",
            self.dealer.hand,
            self.dealer.hand.value()
        );
        self.current_game_phase = GamePhase::Settlement;
        Ok(drawn)
    }

    /// Can be called at Settlement phase.
    /// Pays the player, clears both hands and returns what happened.
    #[allowed_phase(Settlement)]
    pub fn settle(&mut self, player: &mut Player) -> GameResult<RoundSummary> {
        let player_value = player.hand.value();
        let dealer_value = self.dealer.hand.value();
        let Settlement { outcome, payout } =
            settle_values(player_value, dealer_value, self.current_bet);
        player.credit(payout);

        let summary = RoundSummary {
            outcome,
            bet: self.current_bet,
            payout,
            player_cards: player.hand.cards().to_vec(),
            player_value,
            dealer_cards: self.dealer.hand.cards().to_vec(),
            dealer_value,
            bankroll: player.bankroll(),
        };
        debug!(
            "{:?}: {} against {}, paid {}",
            outcome, player_value, dealer_value, payout
        );

        player.hand.reset();
        self.dealer.hand.reset();
        self.current_bet = Money::ZERO;
        self.current_game_phase = GamePhase::Done;
        Ok(summary)
    }

    /// Can be called at Done phase.
    /// Opens the table for the next bet.
    #[allowed_phase(Done)]
    pub fn next_round(&mut self) -> GameResult<()> {
        self.current_game_phase = GamePhase::Betting;
        Ok(())
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn current_bet(&self) -> Money {
        self.current_bet
    }
}

fn reject<U: RoundEventHandler>(handler: &mut U, err: &InputError) {
    warn!("rejected reply: {}", err);
    handler.on_input_rejected(err);
}

pub trait RoundEventHandler {
    fn on_round_begin(&mut self, bankroll: Money, shoe: &Shoe);
    fn on_input_rejected(&mut self, error: &InputError);
    fn on_bet_placed(&mut self, bet: Money, bankroll: Money);
    fn on_initial_deal(&mut self, player_hand: &Hand, dealer_hand: &Hand);
    fn on_player_draw(&mut self, rank: Rank, player_hand: &Hand);
    fn on_dealer_draw(&mut self, rank: Rank);
    fn on_summary(&mut self, summary: &RoundSummary);
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl RoundEventHandler for NoopHandler {
    fn on_round_begin(&mut self, _: Money, _: &Shoe) {}
    fn on_input_rejected(&mut self, _: &InputError) {}
    fn on_bet_placed(&mut self, _: Money, _: Money) {}
    fn on_initial_deal(&mut self, _: &Hand, _: &Hand) {}
    fn on_player_draw(&mut self, _: Rank, _: &Hand) {}
    fn on_dealer_draw(&mut self, _: Rank) {}
    fn on_summary(&mut self, _: &RoundSummary) {}
}
