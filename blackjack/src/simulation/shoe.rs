use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use super::{Rank, NUMBER_OF_RANKS};
use crate::{GameError, GameResult, MAX_DECKS, MIN_DECKS};

const CARDS_PER_RANK_PER_DECK: u16 = 4;

/// Represents the card supply of the table as a remaining count per rank.
/// Cards are drawn without replacement and never put back.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    counts: [u16; NUMBER_OF_RANKS],
    total: u16,
    rng: StdRng,
}

impl Shoe {
    /// Creates a full shoe of `number_of_decks` decks drawing from system entropy.
    pub fn new(number_of_decks: u8) -> GameResult<Shoe> {
        Self::build(number_of_decks, StdRng::from_entropy())
    }

    /// Creates a full shoe whose draws are reproducible from `seed`.
    pub fn with_seed(number_of_decks: u8, seed: u64) -> GameResult<Shoe> {
        Self::build(number_of_decks, StdRng::seed_from_u64(seed))
    }

    /// Creates a stacked shoe holding only the given cards. Ranks not listed
    /// are absent. No rank may exceed what ten decks hold.
    pub fn with_counts(counts: &[(Rank, u16)], seed: u64) -> GameResult<Shoe> {
        let limit = CARDS_PER_RANK_PER_DECK * MAX_DECKS as u16;
        let mut shoe_counts = [0; NUMBER_OF_RANKS];
        for &(rank, count) in counts {
            if count > limit {
                return Err(GameError::InvalidConfiguration(format!(
                    "A shoe holds at most {} cards of rank {}",
                    limit, rank
                )));
            }
            shoe_counts[rank.index()] = count;
        }
        let largest = shoe_counts.iter().copied().max().unwrap_or(0);
        let number_of_decks = largest.div_ceil(CARDS_PER_RANK_PER_DECK).max(1) as u8;

        Ok(Shoe {
            number_of_decks,
            counts: shoe_counts,
            total: shoe_counts.iter().sum(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn build(number_of_decks: u8, rng: StdRng) -> GameResult<Shoe> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&number_of_decks) {
            return Err(GameError::InvalidConfiguration(format!(
                "The number of decks must be in the range from {} to {}",
                MIN_DECKS, MAX_DECKS
            )));
        }
        let per_rank = CARDS_PER_RANK_PER_DECK * number_of_decks as u16;
        let mut counts = [0; NUMBER_OF_RANKS];
        for rank in Rank::iter() {
            counts[rank.index()] = per_rank;
        }
        Ok(Shoe {
            number_of_decks,
            counts,
            total: per_rank * NUMBER_OF_RANKS as u16,
            rng,
        })
    }

    /// Draws one card.
    ///
    /// A label is picked uniformly from all ranks and picked again while the
    /// shoe has none of it left, so ranks with more cards remaining are not
    /// favoured. The loop ends because `total > 0` guarantees some rank has
    /// a nonzero count.
    pub fn draw(&mut self) -> GameResult<Rank> {
        if self.total == 0 {
            return Err(GameError::ShoeExhausted);
        }

        let mut attempts = 1;
        let rank = loop {
            match Rank::from_repr(self.rng.gen_range(0..NUMBER_OF_RANKS)) {
                Some(rank) if self.counts[rank.index()] > 0 => break rank,
                _ => attempts += 1,
            }
        };

        self.counts[rank.index()] -= 1;
        self.total -= 1;
        trace!(
            "drew {} after {} attempt(s), {} card(s) left",
            rank,
            attempts,
            self.total
        );
        Ok(rank)
    }

    pub fn remaining_total(&self) -> u16 {
        self.total
    }

    pub fn count(&self, rank: Rank) -> u16 {
        self.counts[rank.index()]
    }

    pub fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    pub fn is_exhausted(&self) -> bool {
        self.total == 0
    }
}
