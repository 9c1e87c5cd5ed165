use std::fmt;

use super::{shoe::Shoe, Rank, BLACKJACK};
use crate::GameResult;

/// The cards one party holds during a round, in the order they were drawn.
/// The value is kept as a running sum and only ever grows until the hand
/// is reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    cards: Vec<Rank>,
    value: u16,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(4),
            value: 0,
        }
    }

    /// Draws a card from the shoe into this hand.
    pub fn draw_from(&mut self, shoe: &mut Shoe) -> GameResult<Rank> {
        let rank = shoe.draw()?;
        self.receive_card(rank);
        Ok(rank)
    }

    pub fn receive_card(&mut self, rank: Rank) {
        self.cards.push(rank);
        self.value += rank.blackjack_value() as u16;
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn is_bust(&self) -> bool {
        self.value > BLACKJACK
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn reset(&mut self) {
        self.cards.clear();
        self.value = 0;
    }

    /// Space separated labels in draw order, e.g. `"K 7 A"`.
    pub fn render(&self) -> String {
        self.cards
            .iter()
            .map(|rank| rank.label())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_the_running_sum() {
        let mut hand = Hand::new();
        hand.receive_card(Rank::King);
        hand.receive_card(Rank::Seven);
        assert_eq!(hand.value(), 17);
        hand.receive_card(Rank::One);
        assert_eq!(hand.value(), 18);
        assert!(!hand.is_bust());
        hand.receive_card(Rank::Four);
        assert_eq!(hand.value(), 22);
        assert!(hand.is_bust());
    }

    #[test]
    fn ace_is_always_eleven() {
        let mut hand = Hand::new();
        hand.receive_card(Rank::Ace);
        hand.receive_card(Rank::Ace);
        assert_eq!(hand.value(), 22);
        assert!(hand.is_bust());
    }

    #[test]
    fn value_never_decreases_while_drawing() {
        let mut shoe = Shoe::with_seed(1, 77).unwrap();
        let mut hand = Hand::new();
        let mut previous = hand.value();
        while !shoe.is_exhausted() {
            let rank = hand.draw_from(&mut shoe).unwrap();
            assert!(hand.value() >= previous);
            assert_eq!(hand.value(), previous + rank.blackjack_value() as u16);
            previous = hand.value();
        }
        assert_eq!(hand.len(), 56);
    }

    #[test]
    fn draw_from_an_empty_shoe_leaves_the_hand_alone() {
        let mut shoe = Shoe::with_counts(&[], 0).unwrap();
        let mut hand = Hand::new();
        hand.receive_card(Rank::Nine);
        assert!(hand.draw_from(&mut shoe).is_err());
        assert_eq!(hand.cards(), &[Rank::Nine]);
        assert_eq!(hand.value(), 9);
    }

    #[test]
    fn renders_in_draw_order_and_resets() {
        let mut hand = Hand::new();
        for rank in [Rank::Ten, Rank::Jack, Rank::One, Rank::Ace] {
            hand.receive_card(rank);
        }
        assert_eq!(hand.render(), "10 J 1 A");
        assert_eq!(hand.to_string(), "10 J 1 A");

        hand.reset();
        assert!(hand.is_empty());
        assert_eq!(hand.value(), 0);
        assert_eq!(hand.render(), "");
    }
}
