use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    card::{Card, CardColor, ColoredCard, PlayedCard},
    constants::*,
    error::{Result, UnoError},
};

/// The draw pile and the discard pile (the stack).
///
/// The draw pile is popped from its end. The discard pile keeps the most
/// recently played card at the front.
#[derive(Debug)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: VecDeque<PlayedCard>,
    rng: ChaCha8Rng,
}

impl Deck {
    pub fn new(rng: ChaCha8Rng) -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        // Colored Cards
        for color in CardColor::iter() {
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Skip));
            }

            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Reverse));
            }

            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::DrawTwo));
            }

            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Number(*number)));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::Wild);
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::WildDrawFour);
        }

        Self {
            draw_pile: cards,
            discard_pile: VecDeque::new(),
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.draw_pile.shuffle(&mut self.rng);
    }

    /// Takes the top card of the draw pile, recycling the discard pile first
    /// if the draw pile is empty.
    pub fn draw(&mut self) -> Result<Card> {
        if self.draw_pile.is_empty() {
            self.recycle();
        }
        self.draw_pile.pop().ok_or(UnoError::DeckExhausted)
    }

    /// Draws `count` cards or none at all: on failure the cards already taken
    /// go back in the order they came off.
    pub fn draw_cards(&mut self, count: usize) -> Result<Vec<Card>> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw() {
                Ok(card) => cards.push(card),
                Err(error) => {
                    self.return_to_draw_pile(cards.into_iter().rev());
                    return Err(error);
                }
            }
        }
        Ok(cards)
    }

    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>> {
        self.draw_cards(count)
    }

    /// Shuffles everything under the stack top back into the draw pile.
    /// Played wilds go back colorless.
    pub fn recycle(&mut self) {
        if self.discard_pile.len() < 2 {
            return;
        }
        let recycled = self.discard_pile.drain(1..).map(Card::from).collect::<Vec<_>>();
        debug!(cards = recycled.len(), "recycling discard pile");
        self.draw_pile.extend(recycled);
        self.shuffle();
    }

    /// Reveals the first non-special card as the starting stack top. Special
    /// cards are put back and the draw pile is reshuffled.
    pub(crate) fn reveal_starting_card(&mut self) -> Result<PlayedCard> {
        loop {
            let card = self.draw_pile.pop().ok_or(UnoError::DeckExhausted)?;
            if !card.is_special() {
                let played = card.into_played_card(None);
                self.discard_pile.push_front(played);
                return Ok(played);
            }
            self.draw_pile.push(card);
            self.shuffle();
        }
    }

    pub(crate) fn push_played(&mut self, card: PlayedCard) {
        self.discard_pile.push_front(card);
    }

    pub fn top(&self) -> Option<&PlayedCard> {
        self.discard_pile.front()
    }

    /// Most recent first.
    pub fn discard_pile(&self) -> impl Iterator<Item = &PlayedCard> {
        self.discard_pile.iter()
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn cards_count(&self) -> usize {
        self.draw_pile_count() + self.discard_pile_count()
    }

    /// Pulls one specific card out of the draw pile, if it is there.
    pub fn take_from_draw_pile(&mut self, card: &Card) -> Option<Card> {
        self.draw_pile
            .iter()
            .position(|x| x == card)
            .map(|pos| self.draw_pile.remove(pos))
    }

    /// Puts cards on top of the draw pile; the last one is drawn first.
    pub fn return_to_draw_pile(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.draw_pile.extend(cards);
    }

    /// Moves a card from the draw pile onto the stack with the given color in
    /// force. Returns `false` when no such card is left in the draw pile.
    pub fn place_on_top(&mut self, card: &Card, color: Option<CardColor>) -> bool {
        match self.take_from_draw_pile(card) {
            Some(card) => {
                self.push_played(card.into_played_card(color));
                true
            }
            None => false,
        }
    }
}
