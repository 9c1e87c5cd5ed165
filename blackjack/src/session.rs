//! A player's stay at the table: the bankroll carried from round to round.

use log::{info, warn};

use crate::{
    input::parse_bankroll,
    simulation::{shoe::Shoe, Player, RoundEngine, RoundEventHandler, RoundSummary},
    strategy::Strategy,
    GameError, GameResult, Money, Rule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub rounds_played: u32,
    pub final_bankroll: Money,
}

/// Owns one player, one dealer and one shoe. Sessions share nothing, so
/// several can run side by side.
#[derive(Debug, Clone)]
pub struct TableSession {
    engine: RoundEngine,
    player: Player,
    rounds_played: u32,
}

impl TableSession {
    pub fn new(rule: &Rule, shoe: Shoe, initial_bankroll: Money) -> GameResult<Self> {
        Ok(TableSession {
            engine: RoundEngine::new(rule, shoe)?,
            player: Player::new(initial_bankroll),
            rounds_played: 0,
        })
    }

    /// Asks for the money the player sits down with until the reply is a
    /// number of at least `minimum`.
    pub fn collect_bankroll<T: Strategy, U: RoundEventHandler>(
        strategy: &mut T,
        handler: &mut U,
        minimum: Money,
    ) -> GameResult<Money> {
        loop {
            let reply = strategy.bankroll_reply(minimum)?;
            match parse_bankroll(&reply, minimum) {
                Ok(bankroll) => return Ok(bankroll),
                Err(err) => {
                    warn!("rejected bankroll: {}", err);
                    handler.on_input_rejected(&err);
                }
            }
        }
    }

    /// Plays rounds until the bankroll no longer covers the minimum bet.
    /// Running out of cards ends the session with `ShoeExhausted`.
    pub fn run<T: Strategy, U: RoundEventHandler>(
        &mut self,
        strategy: &mut T,
        handler: &mut U,
    ) -> GameResult<SessionReport> {
        info!(
            "session opens with {} at a {} deck table",
            self.player.bankroll(),
            self.engine.shoe().number_of_decks()
        );
        while self.can_continue() {
            self.play_single_round(strategy, handler)?;
        }
        let report = self.report();
        info!(
            "session closes after {} round(s) with {}",
            report.rounds_played, report.final_bankroll
        );
        Ok(report)
    }

    pub fn play_single_round<T: Strategy, U: RoundEventHandler>(
        &mut self,
        strategy: &mut T,
        handler: &mut U,
    ) -> GameResult<RoundSummary> {
        if !self.can_continue() {
            return Err(GameError::InsufficientFunds {
                bankroll: self.player.bankroll(),
                minimum: self.engine.rule().minimum_bet,
            });
        }
        let summary = self.engine.play_round(&mut self.player, strategy, handler)?;
        self.rounds_played += 1;
        Ok(summary)
    }

    pub fn can_continue(&self) -> bool {
        self.player.bankroll() >= self.engine.rule().minimum_bet
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            rounds_played: self.rounds_played,
            final_bankroll: self.player.bankroll(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        simulation::{hand::Hand, NoopHandler, Outcome, Rank},
        strategy::{ScriptedStrategy, ThresholdStrategy},
        InputError,
    };

    #[derive(Debug, Default)]
    struct Rejections(Vec<InputError>);

    impl RoundEventHandler for Rejections {
        fn on_round_begin(&mut self, _: Money, _: &Shoe) {}
        fn on_input_rejected(&mut self, error: &InputError) {
            self.0.push(error.clone());
        }
        fn on_bet_placed(&mut self, _: Money, _: Money) {}
        fn on_initial_deal(&mut self, _: &Hand, _: &Hand) {}
        fn on_player_draw(&mut self, _: Rank, _: &Hand) {}
        fn on_dealer_draw(&mut self, _: Rank) {}
        fn on_summary(&mut self, _: &RoundSummary) {}
    }

    #[test]
    fn bankroll_is_asked_for_until_it_reaches_the_minimum() {
        let mut strategy = ScriptedStrategy::new(["plenty", "5", "19.99", "150"]);
        let mut handler = Rejections::default();
        let bankroll =
            TableSession::collect_bankroll(&mut strategy, &mut handler, Money::from_dollars(20))
                .unwrap();
        assert_eq!(bankroll, Money::from_dollars(150));
        assert_eq!(handler.0.len(), 3);
        assert_eq!(
            handler.0[0].to_string(),
            "You must input a number greater ≥ 20"
        );
    }

    #[test]
    fn session_ends_when_the_minimum_bet_is_out_of_reach() {
        // Eights: the player hits 16 and busts every round.
        let shoe = Shoe::with_counts(&[(Rank::Eight, 40)], 1).unwrap();
        let mut session =
            TableSession::new(&Rule::default(), shoe, Money::from_dollars(70)).unwrap();
        let mut strategy = ThresholdStrategy::default();

        let report = session.run(&mut strategy, &mut NoopHandler).unwrap();
        assert_eq!(report.rounds_played, 3);
        assert_eq!(report.final_bankroll, Money::from_dollars(10));
        assert!(!session.can_continue());
        assert_eq!(session.engine().shoe().remaining_total(), 40 - 15);

        let err = session
            .play_single_round(&mut strategy, &mut NoopHandler)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                bankroll: Money::from_dollars(10),
                minimum: Money::from_dollars(20),
            }
        );
    }

    #[test]
    fn exhausted_shoe_ends_the_session_without_refund() {
        // Kings: every round is a push, so only the shoe can end it.
        let shoe = Shoe::with_counts(&[(Rank::King, 40)], 1).unwrap();
        let mut session =
            TableSession::new(&Rule::default(), shoe, Money::from_dollars(100)).unwrap();
        let mut strategy = ThresholdStrategy::default();

        let err = session.run(&mut strategy, &mut NoopHandler).unwrap_err();
        assert_eq!(err, GameError::ShoeExhausted);
        assert_eq!(session.report().rounds_played, 10);
        assert_eq!(session.player().bankroll(), Money::from_dollars(80));
    }

    #[test]
    fn single_deck_round_plays_itself() {
        let rule = Rule::single_deck();
        let shoe = Shoe::with_seed(rule.number_of_decks, 99).unwrap();
        let mut session = TableSession::new(&rule, shoe, rule.minimum_bet).unwrap();
        let summary = session
            .play_single_round(&mut ThresholdStrategy::default(), &mut NoopHandler)
            .unwrap();

        assert_eq!(summary.bet, rule.minimum_bet);
        assert!(summary.dealer_value >= 17 || summary.outcome == Outcome::PlayerBust);
        assert_eq!(
            session.player().bankroll(),
            summary.payout,
            "the whole bankroll was the bet"
        );
    }

    #[test]
    fn scripted_session_stops_when_replies_run_out() {
        let shoe = Shoe::with_counts(&[(Rank::King, 40)], 1).unwrap();
        let mut session =
            TableSession::new(&Rule::default(), shoe, Money::from_dollars(100)).unwrap();
        let mut strategy = ScriptedStrategy::new(["40", "stay", "25"]);

        let err = session.run(&mut strategy, &mut NoopHandler).unwrap_err();
        assert_eq!(err, GameError::InputClosed);
        assert_eq!(session.report().rounds_played, 1);
        assert_eq!(session.player().bankroll(), Money::from_dollars(75));
    }
}
