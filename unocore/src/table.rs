use tracing::debug;

use crate::card::{Card, PlayedCard};
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::{Result, UnoError};
use crate::player::Player;

pub(crate) const DECK_STREAM: u64 = 0;

/// Everything on the table: the deck, the players and the turn bookkeeping.
///
/// Only the turn engine mutates it. Renderers and controllers get a shared
/// reference.
#[derive(Debug)]
pub struct Table {
    pub(crate) deck: Deck,
    pub(crate) players: Vec<Player>,
    pub(crate) current_turn_player_index: usize,
    pub(crate) player_order_reversed: bool,
    pub(crate) active_penalty: u32,
    pub(crate) pending_skips: u32,
    pub(crate) pending_uno_violation: Option<u64>,
    pub(crate) winner: Option<u64>,
}

impl Table {
    pub(crate) fn new(players_info: Vec<(u64, String)>, config: &GameConfig) -> Result<Self> {
        let mut deck = Deck::new(config.rng(DECK_STREAM));
        deck.shuffle();

        let mut players = Vec::with_capacity(players_info.len());
        for (player_id, player_name) in players_info {
            let cards = deck.deal(config.initial_hand_size)?;
            players.push(Player::new(player_id, player_name, cards));
        }

        let top = deck.reveal_starting_card()?;
        debug!(%top, "revealed starting card");

        Ok(Table {
            deck,
            players,
            current_turn_player_index: 0,
            player_order_reversed: false,
            active_penalty: 0,
            pending_skips: 0,
            pending_uno_violation: None,
            winner: None,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// For arranging specific situations. Moving cards between the deck and
    /// hands keeps the card total intact.
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_player_ids(&self) -> Vec<u64> {
        self.players.iter().map(|player| player.id).collect()
    }

    pub fn get_player(&self, player_id: &u64) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == player_id)
    }

    pub fn get_player_mut(&mut self, player_id: &u64) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| &player.id == player_id)
    }

    pub(crate) fn player_index(&self, player_id: u64) -> Result<usize> {
        self.players
            .iter()
            .position(|player| player.id == player_id)
            .ok_or(UnoError::PlayerNotFound(player_id))
    }

    pub fn get_current_turn_player_id(&self) -> u64 {
        self.get_nth_turn_player_id(0)
    }

    pub fn get_next_turn_player_id(&self) -> u64 {
        self.get_nth_turn_player_id(1)
    }

    pub fn top_card(&self) -> Option<&PlayedCard> {
        self.deck.top()
    }

    pub fn active_penalty(&self) -> u32 {
        self.active_penalty
    }

    pub fn pending_skips(&self) -> u32 {
        self.pending_skips
    }

    pub fn pending_uno_violation(&self) -> Option<u64> {
        self.pending_uno_violation
    }

    pub fn winner(&self) -> Option<u64> {
        self.winner
    }

    /// `1` in seating order, `-1` once reversed.
    pub fn direction(&self) -> i8 {
        if self.player_order_reversed {
            -1
        } else {
            1
        }
    }

    /// Cards in the draw pile, the discard pile and every hand.
    pub fn total_cards(&self) -> usize {
        self.deck.cards_count()
            + self
                .players
                .iter()
                .map(Player::cards_count)
                .sum::<usize>()
    }

    pub(crate) fn draw_cards_to_player(&mut self, player_id: u64, count: usize) -> Result<Vec<Card>> {
        let index = self.player_index(player_id)?;
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            let card = self.deck.draw()?;
            self.players[index].add_card(card);
            cards.push(card);
        }
        Ok(cards)
    }

    pub(crate) fn perform_reverse(&mut self) {
        self.player_order_reversed = !self.player_order_reversed;
    }

    pub(crate) fn move_turn_n_players_ahead(&mut self, n: usize) {
        for _ in 0..n {
            self.current_turn_player_index = if self.player_order_reversed {
                if self.current_turn_player_index == 0 {
                    self.players.len() - 1
                } else {
                    self.current_turn_player_index - 1
                }
            } else if self.current_turn_player_index == self.players.len() - 1 {
                0
            } else {
                self.current_turn_player_index + 1
            };
        }
    }

    fn get_nth_turn_player_id(&self, n: usize) -> u64 {
        let len = self.players.len();
        let index = if self.player_order_reversed {
            (self.current_turn_player_index + len - n % len) % len
        } else {
            (self.current_turn_player_index + n) % len
        };
        self.players[index].id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_CARDS_IN_DECK;

    fn create_players_info(count: usize) -> Vec<(u64, String)> {
        (0..count)
            .map(|i| (i as u64, format!("Player {}", i + 1)))
            .collect()
    }

    fn seeded_table(count: usize) -> Table {
        Table::new(create_players_info(count), &GameConfig::default().with_seed(1)).unwrap()
    }

    #[test]
    fn all_players_start_with_7_cards() {
        let table = seeded_table(2);
        for player in table.players() {
            assert_eq!(player.cards_count(), 7);
        }
    }

    #[test]
    fn starting_state_conserves_cards() {
        let table = seeded_table(2);
        assert_eq!(table.total_cards(), TOTAL_CARDS_IN_DECK as usize);
        assert_eq!(table.deck().discard_pile_count(), 1);
        assert!(!table.top_card().unwrap().card().is_special());
    }

    #[test]
    fn next_player_turn_works_when_first_player() {
        let mut table = seeded_table(4);
        table.current_turn_player_index = 0;

        table.move_turn_n_players_ahead(1);

        assert_eq!(table.get_current_turn_player_id(), 1);
    }

    #[test]
    fn next_player_turn_works_when_last_player() {
        let mut table = seeded_table(4);
        table.current_turn_player_index = 3;

        table.move_turn_n_players_ahead(1);

        assert_eq!(table.get_current_turn_player_id(), 0);
    }

    #[test]
    fn skip_player_turn_works() {
        let mut table = seeded_table(4);
        table.current_turn_player_index = 0;

        table.move_turn_n_players_ahead(2);

        assert_eq!(table.current_turn_player_index, 2);
    }

    #[test]
    fn perform_reverse_works() {
        let mut table = seeded_table(4);
        table.current_turn_player_index = 0;

        table.perform_reverse();

        assert_eq!(table.direction(), -1);
        assert_eq!(table.get_next_turn_player_id(), 3);
        table.move_turn_n_players_ahead(1);
        assert_eq!(table.get_current_turn_player_id(), 3);
    }

    #[test]
    fn draw_cards_to_player_moves_cards_from_deck() {
        let mut table = seeded_table(2);
        let before = table.deck().draw_pile_count();

        let drawn = table.draw_cards_to_player(1, 3).unwrap();

        assert_eq!(drawn.len(), 3);
        assert_eq!(table.get_player(&1).unwrap().cards_count(), 10);
        assert_eq!(table.deck().draw_pile_count(), before - 3);
        assert_eq!(table.total_cards(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn exhausted_deck_keeps_cards_already_drawn() {
        let mut table = seeded_table(2);
        let all_but_one = table.deck.draw_pile_count() - 1;
        let cards = table.deck.draw_cards(all_but_one).unwrap();
        table.players[0].add_cards(cards);

        assert_eq!(
            table.draw_cards_to_player(1, 3),
            Err(UnoError::DeckExhausted)
        );

        assert_eq!(table.get_player(&1).unwrap().cards_count(), 8);
        assert_eq!(table.total_cards(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn unknown_player_is_an_error() {
        let mut table = seeded_table(2);
        assert_eq!(
            table.draw_cards_to_player(9, 1),
            Err(UnoError::PlayerNotFound(9))
        );
    }
}
