//! Who makes the decisions for a seat.

use std::fmt;

use tracing::debug;

use crate::ai::HeuristicAi;
use crate::card::CardColor;
use crate::error::UnoError;
use crate::rules::validate_selection;
use crate::table::Table;
use crate::turn::{Decision, DecisionContext};

/// One answer from a person at a decision point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptReply {
    DeclareUno,
    /// Hand positions, 0-based.
    Play(Vec<usize>),
    /// Draw on a normal turn, decline on a follow-up.
    Pass,
}

/// Raw input from a person. Implemented by the frontend; selections are
/// validated here and rejected ones are handed back through `reject`.
pub trait Prompter {
    fn prompt_play(&mut self, table: &Table, player_id: u64, context: DecisionContext) -> PromptReply;

    fn prompt_color(&mut self, table: &Table, player_id: u64) -> CardColor;

    fn reject(&mut self, _error: &UnoError) {}
}

pub enum Controller {
    Interactive(Box<dyn Prompter>),
    Heuristic(HeuristicAi),
}

impl Controller {
    pub fn select_cards(
        &mut self,
        table: &Table,
        player_id: u64,
        context: DecisionContext,
    ) -> Decision {
        match self {
            Controller::Interactive(prompter) => {
                select_interactively(prompter.as_mut(), table, player_id, context)
            }
            Controller::Heuristic(ai) => ai.select_cards(table, player_id, context),
        }
    }

    pub fn choose_color(&mut self, table: &Table, player_id: u64) -> CardColor {
        match self {
            Controller::Interactive(prompter) => prompter.prompt_color(table, player_id),
            Controller::Heuristic(ai) => {
                let hand = table
                    .get_player(&player_id)
                    .map(|player| player.hand.as_slice())
                    .unwrap_or_default();
                ai.choose_color(hand)
            }
        }
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Interactive(_) => write!(f, "Interactive"),
            Controller::Heuristic(ai) => f.debug_tuple("Heuristic").field(ai).finish(),
        }
    }
}

/// Keeps asking until the person passes or picks something playable.
fn select_interactively(
    prompter: &mut dyn Prompter,
    table: &Table,
    player_id: u64,
    context: DecisionContext,
) -> Decision {
    let Some(player) = table.get_player(&player_id) else {
        return Decision::pass();
    };
    let mut declare_uno = false;

    loop {
        match prompter.prompt_play(table, player_id, context) {
            PromptReply::DeclareUno => declare_uno = true,
            PromptReply::Pass => return Decision::pass().with_declaration(declare_uno),
            PromptReply::Play(indices) => {
                match validate_selection(
                    &player.hand,
                    &indices,
                    table.top_card(),
                    table.active_penalty(),
                ) {
                    Ok(_) => return Decision::play(indices).with_declaration(declare_uno),
                    Err(error) => {
                        debug!(player_id, %error, "selection rejected, asking again");
                        prompter.reject(&error);
                    }
                }
            }
        }
    }
}
