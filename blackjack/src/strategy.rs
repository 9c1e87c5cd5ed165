use std::collections::VecDeque;

use crate::{simulation::hand::Hand, GameError, GameResult, Money};

/// The source of the player's replies. Replies are plain text and are
/// checked by the table, which asks again after an unusable one.
pub trait Strategy {
    fn bankroll_reply(&mut self, minimum: Money) -> GameResult<String>;
    fn bet_reply(&mut self, bankroll: Money, minimum: Money) -> GameResult<String>;
    fn hit_or_stay_reply(&mut self, hand: &Hand) -> GameResult<String>;
}

/// Plays without a person: brings and bets the minimum, hits while the hand
/// is worth less than `stand_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStrategy {
    stand_at: u16,
}

impl ThresholdStrategy {
    pub fn new(stand_at: u16) -> Self {
        ThresholdStrategy { stand_at }
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        ThresholdStrategy::new(17)
    }
}

impl Strategy for ThresholdStrategy {
    fn bankroll_reply(&mut self, minimum: Money) -> GameResult<String> {
        Ok(minimum.compact())
    }

    fn bet_reply(&mut self, _: Money, minimum: Money) -> GameResult<String> {
        Ok(minimum.compact())
    }

    fn hit_or_stay_reply(&mut self, hand: &Hand) -> GameResult<String> {
        let reply = if hand.value() < self.stand_at {
            "hit"
        } else {
            "stay"
        };
        Ok(String::from(reply))
    }
}

/// Replays a fixed list of replies in order, whatever is being asked.
/// Runs out with [`GameError::InputClosed`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    replies: VecDeque<String>,
}

impl ScriptedStrategy {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedStrategy {
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next_reply(&mut self) -> GameResult<String> {
        self.replies.pop_front().ok_or(GameError::InputClosed)
    }
}

impl Strategy for ScriptedStrategy {
    fn bankroll_reply(&mut self, _: Money) -> GameResult<String> {
        self.next_reply()
    }

    fn bet_reply(&mut self, _: Money, _: Money) -> GameResult<String> {
        self.next_reply()
    }

    fn hit_or_stay_reply(&mut self, _: &Hand) -> GameResult<String> {
        self.next_reply()
    }
}
