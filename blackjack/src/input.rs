use crate::{money::TypedAmount, GameError, GameResult, InputError, Money, MAX_DECKS, MIN_DECKS};

/// What the player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Hit,
    Stay,
}

/// Accepts exactly `"1"` to `"10"`.
pub fn parse_deck_count(text: &str) -> GameResult<u8> {
    let well_formed =
        !text.is_empty() && !text.starts_with('0') && text.bytes().all(|b| b.is_ascii_digit());
    match text.parse::<u8>() {
        Ok(n) if well_formed && (MIN_DECKS..=MAX_DECKS).contains(&n) => Ok(n),
        _ => Err(GameError::InvalidConfiguration(format!(
            "The number of decks must be in the range from {} to {}",
            MIN_DECKS, MAX_DECKS
        ))),
    }
}

/// The amount is checked as typed and rounded to cents afterwards.
pub fn parse_bankroll(text: &str, minimum: Money) -> Result<Money, InputError> {
    let too_small = InputError::BankrollTooSmall { minimum };
    match text.trim().parse::<TypedAmount>() {
        Ok(amount) if amount.is_at_least(minimum) => amount.rounded().map_err(|_| too_small),
        _ => Err(too_small),
    }
}

/// The minimum is checked before the bankroll, so an unreadable bet is
/// reported as being under the minimum. Both checks see the amount as
/// typed; only an accepted bet is rounded to cents.
pub fn parse_bet(text: &str, bankroll: Money, minimum: Money) -> Result<Money, InputError> {
    let bet = match text.trim().parse::<TypedAmount>() {
        Ok(bet) if bet.is_at_least(minimum) => bet,
        _ => return Err(InputError::BetBelowMinimum { minimum }),
    };
    if bet.exceeds(bankroll) {
        return Err(InputError::BetAboveBankroll { bankroll });
    }
    bet.rounded().map_err(|_| InputError::BetAboveBankroll { bankroll })
}

pub fn parse_action(text: &str) -> Result<PlayerAction, InputError> {
    let action = text.trim();
    if action.eq_ignore_ascii_case("hit") {
        Ok(PlayerAction::Hit)
    } else if action.eq_ignore_ascii_case("stay") {
        Ok(PlayerAction::Stay)
    } else {
        Err(InputError::UnknownAction(action.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMUM: Money = Money::from_dollars(20);

    #[test]
    fn deck_count_must_be_one_to_ten() {
        for n in 1..=10u8 {
            assert_eq!(parse_deck_count(&n.to_string()), Ok(n));
        }
        for text in ["", "0", "11", "03", "+3", " 3", "three", "-1", "256"] {
            let err = parse_deck_count(text).unwrap_err();
            assert_eq!(
                err.to_string(),
                "The number of decks must be in the range from 1 to 10"
            );
        }
    }

    #[test]
    fn bankroll_must_reach_the_minimum() {
        assert_eq!(parse_bankroll("100", MINIMUM), Ok(Money::from_dollars(100)));
        assert_eq!(parse_bankroll("20\n", MINIMUM), Ok(MINIMUM));
        let err = parse_bankroll("19.99", MINIMUM).unwrap_err();
        assert_eq!(err.to_string(), "You must input a number greater ≥ 20");
        assert!(parse_bankroll("lots", MINIMUM).is_err());
    }

    #[test]
    fn amounts_are_checked_before_rounding() {
        let bankroll = Money::from_dollars(100);
        assert_eq!(
            parse_bet("19.995", bankroll, MINIMUM),
            Err(InputError::BetBelowMinimum { minimum: MINIMUM })
        );
        assert_eq!(
            parse_bet("100.004", bankroll, MINIMUM),
            Err(InputError::BetAboveBankroll { bankroll })
        );
        assert_eq!(
            parse_bankroll("19.995", MINIMUM),
            Err(InputError::BankrollTooSmall { minimum: MINIMUM })
        );

        assert_eq!(parse_bet("99.996", bankroll, MINIMUM), Ok(bankroll));
        assert_eq!(parse_bet("100.000", bankroll, MINIMUM), Ok(bankroll));
        assert_eq!(parse_bankroll("20.004", MINIMUM), Ok(MINIMUM));
    }

    #[test]
    fn bet_is_bounded_by_minimum_and_bankroll() {
        let bankroll = Money::from_dollars(100);
        assert_eq!(parse_bet("20", bankroll, MINIMUM), Ok(MINIMUM));
        assert_eq!(parse_bet("100", bankroll, MINIMUM), Ok(bankroll));
        assert_eq!(
            parse_bet("35.5", bankroll, MINIMUM),
            Ok(Money::from_cents(3550))
        );

        let err = parse_bet("19", bankroll, MINIMUM).unwrap_err();
        assert_eq!(err.to_string(), "You must bet at least $20");
        assert_eq!(
            parse_bet("abc", bankroll, MINIMUM),
            Err(InputError::BetBelowMinimum { minimum: MINIMUM })
        );

        let err = parse_bet("100.01", bankroll, MINIMUM).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You only have $100.00. You can't bet more than you've got"
        );
    }

    #[test]
    fn action_is_hit_or_stay_in_any_case() {
        assert_eq!(parse_action("hit"), Ok(PlayerAction::Hit));
        assert_eq!(parse_action("HiT\n"), Ok(PlayerAction::Hit));
        assert_eq!(parse_action("Stay"), Ok(PlayerAction::Stay));
        let err = parse_action("double").unwrap_err();
        assert_eq!(err.to_string(), "You must type either \"hit\" or \"stay\"");
        assert!(parse_action("").is_err());
    }
}
