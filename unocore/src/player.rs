use crate::card::Card;

#[derive(Debug)]
pub struct Player {
    pub id: u64,
    name: String,
    pub hand: Vec<Card>,
    declared_uno: bool,
}

impl Player {
    pub fn new(id: u64, name: String, cards: Vec<Card>) -> Self {
        Self {
            id,
            name,
            hand: cards,
            declared_uno: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        self.reset_declaration_if_needed();
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
        self.reset_declaration_if_needed();
    }

    /// Removes the cards at the given hand positions, returned in the order
    /// they were asked for.
    pub fn remove_cards(&mut self, indices: &[usize]) -> Vec<Card> {
        let cards = indices.iter().map(|&index| self.hand[index]).collect();
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for index in sorted {
            self.hand.remove(index);
        }
        self.reset_declaration_if_needed();
        cards
    }

    pub fn declare_uno(&mut self) {
        self.declared_uno = true;
    }

    pub fn declared_uno(&self) -> bool {
        self.declared_uno
    }

    pub fn has_won(&self) -> bool {
        self.hand.is_empty()
    }

    /// Sum of the scores of the cards still held.
    pub fn hand_score(&self) -> u32 {
        self.hand.iter().map(Card::score).sum()
    }

    fn reset_declaration_if_needed(&mut self) {
        if self.hand.len() >= 2 {
            self.declared_uno = false;
        }
    }
}
