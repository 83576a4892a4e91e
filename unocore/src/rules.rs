//! Which cards may be played, independent of any running game.

use crate::card::{Card, PlayedCard, Symbol};
use crate::error::{Result, UnoError};

/// Whether `card` may go on top of `top` while `active_penalty` cards are owed.
///
/// Under a penalty only an escalation is allowed: a Draw Two matching the top
/// color or landing on another Draw Two, or any Wild Draw Four. Otherwise wilds
/// always fit, a colorless top accepts anything, and color or symbol must match.
pub fn is_playable(card: &Card, top: Option<&PlayedCard>, active_penalty: u32) -> bool {
    let Some(top) = top else {
        return true;
    };

    if active_penalty > 0 {
        return match card.symbol() {
            Symbol::DrawTwo => card.color() == top.color() || top.symbol() == Symbol::DrawTwo,
            Symbol::WildDrawFour => true,
            _ => false,
        };
    }

    card.is_wild()
        || top.color().is_none()
        || card.color() == top.color()
        || card.symbol() == top.symbol()
}

/// Checks a selection of hand positions and returns the selected cards.
///
/// Every index must be in range and distinct, all selected cards must be
/// identical, and the card must be playable.
pub fn validate_selection(
    hand: &[Card],
    indices: &[usize],
    top: Option<&PlayedCard>,
    active_penalty: u32,
) -> Result<Vec<Card>> {
    let Some(&first_index) = indices.first() else {
        return Err(UnoError::InvalidSelection("no card selected".to_string()));
    };

    let mut cards = Vec::with_capacity(indices.len());
    for (position, &index) in indices.iter().enumerate() {
        let Some(card) = hand.get(index) else {
            return Err(UnoError::InvalidSelection(format!(
                "there is no card number {}",
                index + 1
            )));
        };
        if indices[..position].contains(&index) {
            return Err(UnoError::InvalidSelection(format!(
                "card number {} was selected twice",
                index + 1
            )));
        }
        cards.push(*card);
    }

    let first = hand[first_index];
    if cards.iter().any(|card| card != &first) {
        return Err(UnoError::InvalidSelection(
            "selected cards are not identical".to_string(),
        ));
    }

    if !is_playable(&first, top, active_penalty) {
        return Err(UnoError::IllegalPlay(first));
    }

    Ok(cards)
}

/// Positions of every card in `hand` that is playable right now.
pub fn playable_indices(hand: &[Card], top: Option<&PlayedCard>, active_penalty: u32) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| is_playable(card, top, active_penalty))
        .map(|(index, _)| index)
        .collect()
}
