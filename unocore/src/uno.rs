use rand::Rng;
use tracing::{debug, info, warn};

use crate::ai::HeuristicAi;
use crate::card::{Card, Symbol};
use crate::config::GameConfig;
use crate::constants::{DRAW_TWO_PENALTY, MAX_PLAYERS, MIN_PLAYERS, WILD_DRAW_FOUR_PENALTY};
use crate::controller::{Controller, Prompter};
use crate::error::{Result, UnoError};
use crate::rules::{is_playable, validate_selection};
use crate::table::Table;
use crate::turn::{Decision, DecisionContext, Phase, PlayTurnResult, TurnEvent};

const ID_STREAM: u64 = 1;
const FIRST_AI_STREAM: u64 = 2;

/// A seat at the table before the match starts.
pub enum Seat {
    Interactive {
        name: String,
        prompter: Box<dyn Prompter>,
    },
    Heuristic {
        name: String,
    },
}

impl Seat {
    pub fn interactive(name: impl Into<String>, prompter: impl Prompter + 'static) -> Self {
        Seat::Interactive {
            name: name.into(),
            prompter: Box::new(prompter),
        }
    }

    pub fn heuristic(name: impl Into<String>) -> Self {
        Seat::Heuristic { name: name.into() }
    }

    fn name(&self) -> &str {
        match self {
            Seat::Interactive { name, .. } | Seat::Heuristic { name } => name,
        }
    }
}

/// The turn engine: a table plus whoever decides for each seat.
#[derive(Debug)]
pub struct Uno {
    table: Table,
    controllers: Vec<Controller>,
    uno_penalty: usize,
}

impl Uno {
    pub fn new(seats: Vec<Seat>, config: GameConfig) -> Result<Self> {
        let mut rng = config.rng(ID_STREAM);
        let mut ids: Vec<u64> = Vec::with_capacity(seats.len());

        for _ in &seats {
            loop {
                let id = rng.gen();
                if !ids.contains(&id) {
                    ids.push(id);
                    break;
                }
            }
        }

        Self::new_with_ids(ids.into_iter().zip(seats).collect(), config)
    }

    pub fn new_with_ids(seats: Vec<(u64, Seat)>, config: GameConfig) -> Result<Self> {
        if seats.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if seats.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }

        let players_info = seats
            .iter()
            .map(|(id, seat)| (*id, seat.name().to_string()))
            .collect();
        let table = Table::new(players_info, &config)?;

        let controllers = seats
            .into_iter()
            .zip(FIRST_AI_STREAM..)
            .map(|((_, seat), stream)| match seat {
                Seat::Interactive { prompter, .. } => Controller::Interactive(prompter),
                Seat::Heuristic { .. } => Controller::Heuristic(HeuristicAi::new(
                    config.rng(stream),
                    config.declare_probability,
                )),
            })
            .collect();

        Ok(Uno {
            table,
            controllers,
            uno_penalty: config.uno_penalty,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn phase(&self) -> Phase {
        let player_id = self.table.get_current_turn_player_id();
        if let Some(winner) = self.table.winner {
            Phase::GameOver(winner)
        } else if self.table.pending_skips > 0 {
            Phase::ApplyingSkip(player_id)
        } else if self.table.active_penalty > 0 {
            Phase::ResolvingPenalty(player_id)
        } else {
            Phase::AwaitingDecision(player_id)
        }
    }

    /// Runs one full turn for the current player and moves on to the next.
    ///
    /// Only a deck that cannot produce any more cards is fatal; any other
    /// failure is logged and turns into a turn without effect.
    pub fn play_turn(&mut self) -> Result<PlayTurnResult> {
        if self.table.winner.is_some() {
            return Err(UnoError::GameOver);
        }

        let player_id = self.table.get_current_turn_player_id();
        let mut events = Vec::new();

        self.enforce_uno_violation(player_id, &mut events)?;

        if self.table.pending_skips > 0 {
            self.table.pending_skips -= 1;
            info!(player_id, "turn skipped");
            events.push(TurnEvent::Skipped(player_id));
            self.table.move_turn_n_players_ahead(1);
            return Ok(PlayTurnResult { events, won: false });
        }

        match self.take_turn(player_id, &mut events) {
            Ok(()) => {}
            Err(UnoError::DeckExhausted) => return Err(UnoError::DeckExhausted),
            Err(error) => {
                warn!(player_id, %error, "turn aborted");
                events.push(TurnEvent::TurnAborted {
                    player_id,
                    reason: error.to_string(),
                });
            }
        }

        let won = self.table.winner == Some(player_id);
        if !won {
            self.table.move_turn_n_players_ahead(1);
        }

        Ok(PlayTurnResult { events, won })
    }

    /// Plays turns until someone wins and returns the winner's id.
    pub fn play_to_end(&mut self) -> Result<u64> {
        loop {
            if self.play_turn()?.won {
                return self.table.winner.ok_or(UnoError::GameOver);
            }
        }
    }

    fn enforce_uno_violation(&mut self, player_id: u64, events: &mut Vec<TurnEvent>) -> Result<()> {
        let Some(violator) = self.table.pending_uno_violation else {
            return Ok(());
        };
        if violator == player_id {
            return Ok(());
        }
        self.table.pending_uno_violation = None;

        let still_undeclared = self
            .table
            .get_player(&violator)
            .map_or(false, |player| !player.declared_uno());
        if still_undeclared {
            self.table.draw_cards_to_player(violator, self.uno_penalty)?;
            info!(player_id = violator, cards = self.uno_penalty, "forgot to call UNO");
            events.push(TurnEvent::UnoPenalty {
                player_id: violator,
                cards: self.uno_penalty,
            });
        }
        Ok(())
    }

    fn take_turn(&mut self, player_id: u64, events: &mut Vec<TurnEvent>) -> Result<()> {
        if self.table.active_penalty > 0 {
            if let Some(indices) = self.decide(player_id, DecisionContext::Penalty, events)? {
                return self.play_cards(player_id, &indices, events);
            }

            let count = self.table.active_penalty as usize;
            self.table.draw_cards_to_player(player_id, count)?;
            self.table.active_penalty = 0;
            info!(player_id, cards = count, "drew penalty cards");
            events.push(TurnEvent::DrewPenalty {
                player_id,
                cards: count,
            });

            let follow_up = DecisionContext::FollowUp { drawn: None };
            if let Some(indices) = self.decide(player_id, follow_up, events)? {
                self.play_cards(player_id, &indices, events)?;
            }
            return Ok(());
        }

        if let Some(indices) = self.decide(player_id, DecisionContext::FreeTurn, events)? {
            return self.play_cards(player_id, &indices, events);
        }

        let card = self
            .table
            .draw_cards_to_player(player_id, 1)?
            .pop()
            .ok_or(UnoError::DeckExhausted)?;
        debug!(player_id, %card, "drew a card");
        events.push(TurnEvent::Drew { player_id, card });

        if !is_playable(&card, self.table.top_card(), self.table.active_penalty) {
            events.push(TurnEvent::DrewUnplayable(player_id));
            return Ok(());
        }

        let index = self.table.player_index(player_id)?;
        let drawn = self.table.players[index].cards_count() - 1;
        let follow_up = DecisionContext::FollowUp { drawn: Some(drawn) };
        match self.decide(player_id, follow_up, events)? {
            Some(indices) => self.play_cards(player_id, &indices, events),
            None => {
                events.push(TurnEvent::KeptDrawnCard(player_id));
                Ok(())
            }
        }
    }

    /// Asks the seat's controller and applies any declaration. Returns the
    /// selection only if it passes validation.
    fn decide(
        &mut self,
        player_id: u64,
        context: DecisionContext,
        events: &mut Vec<TurnEvent>,
    ) -> Result<Option<Vec<usize>>> {
        let index = self.table.player_index(player_id)?;
        let Decision { declare_uno, cards } =
            self.controllers[index].select_cards(&self.table, player_id, context);

        let player = &mut self.table.players[index];
        if declare_uno {
            player.declare_uno();
            info!(player_id, "declared UNO");
            events.push(TurnEvent::UnoDeclared(player_id));
        }

        let Some(indices) = cards else {
            return Ok(None);
        };

        match validate_selection(
            &player.hand,
            &indices,
            self.table.deck.top(),
            self.table.active_penalty,
        ) {
            Ok(_) => Ok(Some(indices)),
            Err(error) => {
                warn!(player_id, %error, "controller returned an unusable selection");
                events.push(TurnEvent::SelectionRejected {
                    player_id,
                    reason: error.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Moves the selected cards onto the stack and applies each card's effect.
    fn play_cards(&mut self, player_id: u64, indices: &[usize], events: &mut Vec<TurnEvent>) -> Result<()> {
        let index = self.table.player_index(player_id)?;
        let cards = self.table.players[index].remove_cards(indices);

        let mut played = Vec::with_capacity(cards.len());
        let mut effects = Vec::new();
        for card in cards {
            let wild_color = if card.is_wild() {
                let color = self.controllers[index].choose_color(&self.table, player_id);
                effects.push(TurnEvent::ColorChosen { player_id, color });
                Some(color)
            } else {
                None
            };

            let played_card = card.into_played_card(wild_color);
            self.table.deck.push_played(played_card);
            played.push(played_card);
            self.apply_effect(&card, &mut effects);
        }

        info!(player_id, cards = ?played, "played");
        events.push(TurnEvent::Played {
            player_id,
            cards: played,
        });
        events.append(&mut effects);

        let player = &self.table.players[index];
        if player.has_won() {
            let score: u32 = self
                .table
                .players
                .iter()
                .filter(|other| other.id != player_id)
                .map(|other| other.hand_score())
                .sum();
            self.table.winner = Some(player_id);
            info!(player_id, score, "won the game");
            events.push(TurnEvent::Won { player_id, score });
        } else if player.cards_count() == 1 && !player.declared_uno() {
            self.table.pending_uno_violation = Some(player_id);
            debug!(player_id, "down to one card without calling UNO");
            events.push(TurnEvent::ForgotUno(player_id));
        }

        Ok(())
    }

    fn apply_effect(&mut self, card: &Card, effects: &mut Vec<TurnEvent>) {
        match card.symbol() {
            Symbol::Number(_) | Symbol::Wild => {}
            Symbol::Skip => self.table.pending_skips += 1,
            Symbol::Reverse => {
                let as_skip = self.table.players.len() == 2;
                if as_skip {
                    self.table.pending_skips += 1;
                } else {
                    self.table.perform_reverse();
                }
                effects.push(TurnEvent::Reversed { as_skip });
            }
            Symbol::DrawTwo => {
                self.table.active_penalty += DRAW_TWO_PENALTY;
                effects.push(TurnEvent::PenaltyRaised {
                    total: self.table.active_penalty,
                });
            }
            Symbol::WildDrawFour => {
                self.table.active_penalty += WILD_DRAW_FOUR_PENALTY;
                effects.push(TurnEvent::PenaltyRaised {
                    total: self.table.active_penalty,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardColor, ColoredCard, PlayedCard};
    use crate::constants::TOTAL_CARDS_IN_DECK;

    fn heuristic_seats(count: usize) -> Vec<(u64, Seat)> {
        (0..count)
            .map(|i| (i as u64, Seat::heuristic(format!("Player {}", i + 1))))
            .collect()
    }

    fn seeded(seed: u64) -> Uno {
        Uno::new_with_ids(heuristic_seats(2), GameConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn return_ok_if_enough_players() {
        let result = Uno::new(
            vec![Seat::heuristic("A"), Seat::heuristic("B")],
            GameConfig::default(),
        );
        assert!(matches!(result, Result::Ok(_)));
    }

    #[test]
    fn return_err_if_not_enough_players() {
        let error = Uno::new(vec![Seat::heuristic("A")], GameConfig::default()).unwrap_err();
        assert!(matches!(error, UnoError::NotEnoughPlayers));
    }

    #[test]
    fn return_err_if_too_many_players() {
        let seats = (0..3).map(|i| Seat::heuristic(format!("P{i}"))).collect();
        let error = Uno::new(seats, GameConfig::default()).unwrap_err();
        assert!(matches!(error, UnoError::TooManyPlayers));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let uno = Uno::new(
            vec![Seat::heuristic("A"), Seat::heuristic("B")],
            GameConfig::default().with_seed(5),
        )
        .unwrap();
        let ids = uno.table().get_player_ids();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn first_phase_awaits_first_player() {
        let uno = seeded(9);
        assert_eq!(uno.phase(), Phase::AwaitingDecision(0));
    }

    #[test]
    fn each_pending_skip_takes_the_next_turn() {
        let mut uno = seeded(9);
        let skip = Card::Colored(CardColor::Red, ColoredCard::Skip);
        let mut effects = Vec::new();
        uno.apply_effect(&skip, &mut effects);
        uno.apply_effect(&skip, &mut effects);
        uno.table.move_turn_n_players_ahead(1);
        assert_eq!(uno.phase(), Phase::ApplyingSkip(1));

        assert_eq!(uno.play_turn().unwrap().events, vec![TurnEvent::Skipped(1)]);
        assert_eq!(uno.phase(), Phase::ApplyingSkip(0));

        assert_eq!(uno.play_turn().unwrap().events, vec![TurnEvent::Skipped(0)]);
        assert_eq!(uno.table.pending_skips, 0);
        assert_eq!(uno.phase(), Phase::AwaitingDecision(1));
    }

    #[test]
    fn penalty_after_skips_is_owed_by_the_next_actor() {
        let mut uno = seeded(9);
        let mut effects = Vec::new();
        uno.apply_effect(&Card::Colored(CardColor::Red, ColoredCard::Skip), &mut effects);
        uno.table.move_turn_n_players_ahead(1);
        uno.play_turn().unwrap();
        assert_eq!(uno.phase(), Phase::AwaitingDecision(0));

        uno.apply_effect(&Card::Colored(CardColor::Red, ColoredCard::DrawTwo), &mut effects);
        uno.table.move_turn_n_players_ahead(1);
        assert_eq!(uno.phase(), Phase::ResolvingPenalty(1));
    }

    #[test]
    fn penalty_phase_is_reported() {
        let mut uno = seeded(9);
        uno.table.active_penalty = 2;
        assert_eq!(uno.phase(), Phase::ResolvingPenalty(0));
    }

    #[test]
    fn reverse_with_two_players_acts_as_skip() {
        let mut uno = seeded(9);
        let mut effects = Vec::new();
        uno.apply_effect(&Card::Colored(CardColor::Red, ColoredCard::Reverse), &mut effects);
        assert_eq!(uno.table.pending_skips, 1);
        assert_eq!(uno.table.direction(), 1);
        assert_eq!(effects, vec![TurnEvent::Reversed { as_skip: true }]);
    }

    #[test]
    fn draw_effects_add_up() {
        let mut uno = seeded(9);
        let mut effects = Vec::new();
        uno.apply_effect(&Card::Colored(CardColor::Red, ColoredCard::DrawTwo), &mut effects);
        uno.apply_effect(&Card::WildDrawFour, &mut effects);
        assert_eq!(uno.table.active_penalty, 6);
    }

    #[test]
    fn violation_is_not_enforced_on_the_violator() {
        let mut uno = seeded(9);
        uno.table.pending_uno_violation = Some(0);
        let mut events = Vec::new();

        uno.enforce_uno_violation(0, &mut events).unwrap();

        assert!(events.is_empty());
        assert_eq!(uno.table.pending_uno_violation, Some(0));
    }

    #[test]
    fn violation_is_enforced_on_the_next_player() {
        let mut uno = seeded(9);
        uno.table.pending_uno_violation = Some(0);
        let mut events = Vec::new();

        uno.enforce_uno_violation(1, &mut events).unwrap();

        assert_eq!(
            events,
            vec![TurnEvent::UnoPenalty {
                player_id: 0,
                cards: 2
            }]
        );
        assert_eq!(uno.table.get_player(&0).unwrap().cards_count(), 9);
        assert_eq!(uno.table.pending_uno_violation, None);
    }

    fn set_hand(uno: &mut Uno, player_id: u64, cards: Vec<Card>) {
        let player = uno.table.get_player_mut(&player_id).unwrap();
        let returned = std::mem::take(&mut player.hand);
        uno.table.deck.return_to_draw_pile(returned);
        for card in &cards {
            assert!(uno.table.deck.take_from_draw_pile(card).is_some());
        }
        uno.table.get_player_mut(&player_id).unwrap().hand = cards;
    }

    #[test]
    fn wild_color_comes_from_controller() {
        let mut uno = seeded(9);
        set_hand(&mut uno, 1, Vec::new());
        set_hand(
            &mut uno,
            0,
            vec![
                Card::Wild,
                Card::Colored(CardColor::Green, ColoredCard::Number(1)),
                Card::Colored(CardColor::Green, ColoredCard::Number(2)),
            ],
        );

        let mut events = Vec::new();
        uno.play_cards(0, &[0], &mut events).unwrap();

        assert_eq!(
            uno.table.top_card(),
            Some(&PlayedCard::Wild(Some(CardColor::Green)))
        );
        assert_eq!(uno.table.total_cards(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn play_turn_after_game_over_fails() {
        let mut uno = seeded(9);
        uno.table.winner = Some(0);
        assert_eq!(uno.play_turn(), Err(UnoError::GameOver));
        assert_eq!(uno.phase(), Phase::GameOver(0));
    }
}
