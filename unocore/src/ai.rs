//! The computer opponent.

use rand::{seq::SliceRandom, Rng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::card::{Card, CardColor, PlayedCard, Symbol};
use crate::rules::playable_indices;
use crate::table::Table;
use crate::turn::{Decision, DecisionContext};

/// Picks cards with a fixed priority list. Deterministic for a given seed.
#[derive(Debug)]
pub struct HeuristicAi {
    rng: ChaCha8Rng,
    declare_probability: f64,
}

impl HeuristicAi {
    pub fn new(rng: ChaCha8Rng, declare_probability: f64) -> Self {
        Self {
            rng,
            declare_probability: declare_probability.clamp(0.0, 1.0),
        }
    }

    pub fn select_cards(
        &mut self,
        table: &Table,
        player_id: u64,
        context: DecisionContext,
    ) -> Decision {
        let Some(player) = table.get_player(&player_id) else {
            return Decision::pass();
        };
        let hand = &player.hand;

        // Sometimes forgets, like a person would.
        let declare_uno = hand.len() == 2
            && !player.declared_uno()
            && self.rng.gen_bool(self.declare_probability);

        let top = table.top_card();
        let mut legal = playable_indices(hand, top, table.active_penalty());
        if let DecisionContext::FollowUp { drawn: Some(drawn) } = context {
            legal.retain(|&index| index == drawn);
        }

        let cards = self.pick(hand, &legal, top, table.active_penalty());
        debug!(player_id, ?context, ?cards, declare_uno, "heuristic decision");

        Decision { declare_uno, cards }
    }

    /// The most common color left in `hand`, or a random one when no colored
    /// card is left.
    pub fn choose_color(&mut self, hand: &[Card]) -> CardColor {
        match most_common_color(hand) {
            Some(color) => color,
            None => {
                let colors = CardColor::iter().collect::<Vec<_>>();
                *colors.choose(&mut self.rng).unwrap_or(&CardColor::Red)
            }
        }
    }

    fn pick(
        &mut self,
        hand: &[Card],
        legal: &[usize],
        top: Option<&PlayedCard>,
        active_penalty: u32,
    ) -> Option<Vec<usize>> {
        if legal.is_empty() {
            return None;
        }

        if let Some(group) = largest_identical_group(hand, legal) {
            return Some(group);
        }

        let favourite = most_common_color(hand);
        let matching = |filter: &dyn Fn(&Card) -> bool| {
            legal
                .iter()
                .copied()
                .filter(|&index| filter(&hand[index]))
                .collect::<Vec<_>>()
        };

        if active_penalty > 0 {
            let wild_draw_fours = matching(&|card: &Card| card == &Card::WildDrawFour);
            if let Some(&index) = wild_draw_fours.choose(&mut self.rng) {
                return Some(vec![index]);
            }
            return self.prefer_color(hand, legal, favourite);
        }

        let top_color = top.and_then(PlayedCard::color);
        let top_symbol = top.map(PlayedCard::symbol);
        let same_color = |card: &Card| top_color.is_some() && card.color() == top_color;
        let same_symbol = |card: &Card| Some(card.symbol()) == top_symbol;

        let tiers = [
            matching(&|card: &Card| card.symbol().is_action() && same_color(card)),
            matching(&|card: &Card| matches!(card.symbol(), Symbol::Number(_)) && same_color(card)),
            matching(&|card: &Card| !card.is_wild() && same_symbol(card)),
            matching(&|card: &Card| card.symbol().is_action() && same_symbol(card)),
        ];
        for tier in tiers {
            if !tier.is_empty() {
                return self.prefer_color(hand, &tier, favourite);
            }
        }

        let wilds = matching(&|card: &Card| card.is_wild());
        if !wilds.is_empty() {
            if hand.len() <= 3 {
                let wild_draw_fours = matching(&|card: &Card| card == &Card::WildDrawFour);
                if let Some(&index) = wild_draw_fours.choose(&mut self.rng) {
                    return Some(vec![index]);
                }
            }
            return wilds.choose(&mut self.rng).map(|&index| vec![index]);
        }

        self.prefer_color(hand, legal, favourite)
    }

    /// One random card from `candidates`, from the favourite color when there
    /// is a choice.
    fn prefer_color(
        &mut self,
        hand: &[Card],
        candidates: &[usize],
        favourite: Option<CardColor>,
    ) -> Option<Vec<usize>> {
        if candidates.len() > 1 {
            if let Some(favourite) = favourite {
                let preferred = candidates
                    .iter()
                    .copied()
                    .filter(|&index| hand[index].color() == Some(favourite))
                    .collect::<Vec<_>>();
                if let Some(&index) = preferred.choose(&mut self.rng) {
                    return Some(vec![index]);
                }
            }
        }
        candidates.choose(&mut self.rng).map(|&index| vec![index])
    }
}

fn largest_identical_group(hand: &[Card], legal: &[usize]) -> Option<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &index in legal {
        match groups.iter_mut().find(|group| hand[group[0]] == hand[index]) {
            Some(group) => group.push(index),
            None => groups.push(vec![index]),
        }
    }
    groups
        .into_iter()
        .filter(|group| group.len() > 1)
        .max_by_key(Vec::len)
}

fn most_common_color(hand: &[Card]) -> Option<CardColor> {
    CardColor::iter()
        .map(|color| {
            let count = hand.iter().filter(|card| card.color() == Some(color)).count();
            (color, count)
        })
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(color, _)| color)
}
