use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::{ACTION_CARD_SCORE, WILD_CARD_SCORE};

#[derive(
    Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash,
)]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

/// What is printed on a card, ignoring its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Symbol {
    pub fn is_wild(&self) -> bool {
        matches!(self, Symbol::Wild | Symbol::WildDrawFour)
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Symbol::Skip | Symbol::Reverse | Symbol::DrawTwo)
    }

    pub fn score(&self) -> u32 {
        match self {
            Symbol::Number(number) => u32::from(*number),
            Symbol::Skip | Symbol::Reverse | Symbol::DrawTwo => ACTION_CARD_SCORE,
            Symbol::Wild | Symbol::WildDrawFour => WILD_CARD_SCORE,
        }
    }
}

impl From<ColoredCard> for Symbol {
    fn from(card: ColoredCard) -> Self {
        match card {
            ColoredCard::Number(number) => Symbol::Number(number),
            ColoredCard::Skip => Symbol::Skip,
            ColoredCard::Reverse => Symbol::Reverse,
            ColoredCard::DrawTwo => Symbol::DrawTwo,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Number(number) => write!(f, "{number}"),
            Symbol::Skip => write!(f, "Skip"),
            Symbol::Reverse => write!(f, "Reverse"),
            Symbol::DrawTwo => write!(f, "Draw Two"),
            Symbol::Wild => write!(f, "Wild"),
            Symbol::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}

/// A card as it sits in a hand or in the draw pile.
///
/// Two cards are identical (and may be played together) when both their
/// symbol and color match, which is exactly `PartialEq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild,
    WildDrawFour,
}

impl Card {
    pub fn symbol(&self) -> Symbol {
        match self {
            Card::Colored(_, card) => Symbol::from(*card),
            Card::Wild => Symbol::Wild,
            Card::WildDrawFour => Symbol::WildDrawFour,
        }
    }

    /// `None` for wild-family cards, which only get a color once played.
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.symbol().score()
    }

    pub fn is_wild(&self) -> bool {
        self.symbol().is_wild()
    }

    pub fn is_special(&self) -> bool {
        self.score() > 9
    }

    /// Puts the card on the stack. `wild_color` is only used for wild-family cards.
    pub fn into_played_card(self, wild_color: Option<CardColor>) -> PlayedCard {
        match self {
            Card::Colored(color, card) => PlayedCard::Colored(color, card),
            Card::Wild => PlayedCard::Wild(wild_color),
            Card::WildDrawFour => PlayedCard::WildDrawFour(wild_color),
        }
    }
}

/// A card on the stack, carrying the color that is in force.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayedCard {
    Colored(CardColor, ColoredCard),
    Wild(Option<CardColor>),
    WildDrawFour(Option<CardColor>),
}

impl PlayedCard {
    pub fn symbol(&self) -> Symbol {
        self.card().symbol()
    }

    pub fn color(&self) -> Option<CardColor> {
        match self {
            PlayedCard::Colored(color, _) => Some(*color),
            PlayedCard::Wild(color) | PlayedCard::WildDrawFour(color) => *color,
        }
    }

    /// The hand form of this card; wilds lose their chosen color.
    pub fn card(&self) -> Card {
        match self {
            PlayedCard::Colored(color, card) => Card::Colored(*color, *card),
            PlayedCard::Wild(_) => Card::Wild,
            PlayedCard::WildDrawFour(_) => Card::WildDrawFour,
        }
    }
}

impl From<PlayedCard> for Card {
    fn from(played: PlayedCard) -> Self {
        played.card()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => write!(f, "{} {}", color, Symbol::from(*card)),
            Card::Wild | Card::WildDrawFour => write!(f, "{}", self.symbol()),
        }
    }
}

impl Display for PlayedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayedCard::Colored(color, card) => write!(f, "{} {}", color, Symbol::from(*card)),
            PlayedCard::Wild(Some(color)) | PlayedCard::WildDrawFour(Some(color)) => {
                write!(f, "{} ({})", self.symbol(), color)
            }
            PlayedCard::Wild(None) | PlayedCard::WildDrawFour(None) => {
                write!(f, "{}", self.symbol())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_correct_string_for_number_card() {
        let red_3 = Card::Colored(CardColor::Red, ColoredCard::Number(3));
        assert_eq!(red_3.to_string(), "Red 3");

        let yellow_5 = Card::Colored(CardColor::Yellow, ColoredCard::Number(5));
        assert_eq!(yellow_5.to_string(), "Yellow 5");
    }

    #[test]
    fn return_correct_string_for_action_cards() {
        let red_skip = Card::Colored(CardColor::Red, ColoredCard::Skip);
        assert_eq!(red_skip.to_string(), "Red Skip");

        let blue_reverse = Card::Colored(CardColor::Blue, ColoredCard::Reverse);
        assert_eq!(blue_reverse.to_string(), "Blue Reverse");

        let green_draw_two = Card::Colored(CardColor::Green, ColoredCard::DrawTwo);
        assert_eq!(green_draw_two.to_string(), "Green Draw Two");
    }

    #[test]
    fn return_correct_string_for_wild_cards() {
        assert_eq!(Card::Wild.to_string(), "Wild");
        assert_eq!(Card::WildDrawFour.to_string(), "Wild Draw Four");
    }

    #[test]
    fn played_wild_shows_chosen_color() {
        let played = Card::Wild.into_played_card(Some(CardColor::Yellow));
        assert_eq!(played.to_string(), "Wild (Yellow)");
        assert_eq!(played.color(), Some(CardColor::Yellow));
    }

    #[test]
    fn played_wild_turns_back_into_colorless_card() {
        let played = Card::WildDrawFour.into_played_card(Some(CardColor::Blue));
        assert_eq!(Card::from(played), Card::WildDrawFour);
        assert_eq!(Card::from(played).color(), None);
    }

    #[test]
    fn scores_follow_symbol() {
        assert_eq!(Card::Colored(CardColor::Red, ColoredCard::Number(7)).score(), 7);
        assert_eq!(Card::Colored(CardColor::Red, ColoredCard::Skip).score(), 20);
        assert_eq!(Card::Colored(CardColor::Red, ColoredCard::DrawTwo).score(), 20);
        assert_eq!(Card::Wild.score(), 50);
        assert_eq!(Card::WildDrawFour.score(), 50);
    }

    #[test]
    fn only_number_cards_are_not_special() {
        assert!(!Card::Colored(CardColor::Blue, ColoredCard::Number(9)).is_special());
        assert!(Card::Colored(CardColor::Blue, ColoredCard::Reverse).is_special());
        assert!(Card::Wild.is_special());
    }

    #[test]
    fn identical_means_same_symbol_and_color() {
        let a = Card::Colored(CardColor::Red, ColoredCard::DrawTwo);
        let b = Card::Colored(CardColor::Red, ColoredCard::DrawTwo);
        let c = Card::Colored(CardColor::Blue, ColoredCard::DrawTwo);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Card::Wild, Card::Wild);
    }
}
