//! Plain-text views of the table. Nothing here mutates the game.

use std::fmt::Write;

use unocore::{table::Table, turn::TurnEvent};

const STACK_CARDS_SHOWN: usize = 8;

fn name(table: &Table, player_id: u64) -> &str {
    table
        .get_player(&player_id)
        .map(|player| player.name())
        .unwrap_or("Someone")
}

/// The board as seen by `viewer`: opponents' card counts, the stack and the
/// viewer's numbered hand.
pub fn render(table: &Table, viewer: u64) -> String {
    let mut out = String::new();

    for player in table.players().iter().filter(|player| player.id != viewer) {
        let _ = writeln!(out, "{}'s hand: {} cards", player.name(), player.cards_count());
    }

    let stack = table
        .deck()
        .discard_pile()
        .take(STACK_CARDS_SHOWN)
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let _ = writeln!(out, "\nBoard: {}", stack.join(" < "));

    if let Some(player) = table.get_player(&viewer) {
        let _ = writeln!(out, "\nHand:");
        for (index, card) in player.hand.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}", index + 1, card);
        }
    }

    if table.active_penalty() > 0 && table.get_current_turn_player_id() == viewer {
        let _ = writeln!(
            out,
            "\nWarning: Penalty active! You must draw {} cards or play a Draw Two/Wild Draw Four.",
            table.active_penalty()
        );
    }

    for player in table.players().iter().filter(|player| player.declared_uno()) {
        let _ = writeln!(out, "{} has called UNO!", player.name());
    }

    out
}

pub fn describe(table: &Table, event: &TurnEvent) -> String {
    match event {
        TurnEvent::UnoPenalty { player_id, cards } => format!(
            "{} forgot to call UNO! Drawing {cards} cards as penalty.",
            name(table, *player_id)
        ),
        TurnEvent::Skipped(player_id) => format!("{} has been skipped!", name(table, *player_id)),
        TurnEvent::UnoDeclared(player_id) => format!("{} called UNO!", name(table, *player_id)),
        TurnEvent::Played { player_id, cards } => {
            let cards = cards.iter().map(ToString::to_string).collect::<Vec<_>>();
            format!("{} played {}.", name(table, *player_id), cards.join(" + "))
        }
        TurnEvent::Reversed { as_skip: true } => "Reverse! The next player is skipped.".to_string(),
        TurnEvent::Reversed { as_skip: false } => "Reverse! Play order is turned around.".to_string(),
        TurnEvent::PenaltyRaised { total } => {
            format!("The next player must draw {total} cards or play a Draw Two/Wild Draw Four.")
        }
        TurnEvent::ColorChosen { player_id, color } => {
            format!("{} chose {color}!", name(table, *player_id))
        }
        TurnEvent::DrewPenalty { player_id, cards } => {
            format!("{} drew {cards} cards as penalty.", name(table, *player_id))
        }
        TurnEvent::Drew { player_id, .. } => format!("{} drew a card.", name(table, *player_id)),
        TurnEvent::KeptDrawnCard(player_id) => {
            format!("{} kept the drawn card...", name(table, *player_id))
        }
        TurnEvent::DrewUnplayable(player_id) => {
            format!("{} drew a card that is not playable...", name(table, *player_id))
        }
        TurnEvent::ForgotUno(player_id) => format!(
            "{} forgot to call UNO! Penalty applies if the next player plays.",
            name(table, *player_id)
        ),
        TurnEvent::SelectionRejected { player_id, reason } => {
            format!("{}'s selection was rejected: {reason}", name(table, *player_id))
        }
        TurnEvent::TurnAborted { player_id, reason } => {
            format!("Error in {}'s turn: {reason}", name(table, *player_id))
        }
        TurnEvent::Won { player_id, score } => {
            format!("{} won with {score} points!", name(table, *player_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use unocore::{
        config::GameConfig,
        uno::{Seat, Uno},
    };

    use super::*;

    fn uno() -> Uno {
        Uno::new_with_ids(
            vec![(0, Seat::heuristic("Alice")), (1, Seat::heuristic("Bob"))],
            GameConfig::default().with_seed(3),
        )
        .unwrap()
    }

    #[test]
    fn reverse_says_whether_it_skipped() {
        let uno = uno();
        assert_eq!(
            describe(uno.table(), &TurnEvent::Reversed { as_skip: true }),
            "Reverse! The next player is skipped."
        );
        assert_eq!(
            describe(uno.table(), &TurnEvent::Reversed { as_skip: false }),
            "Reverse! Play order is turned around."
        );
    }

    #[test]
    fn events_use_player_names() {
        let uno = uno();
        assert_eq!(
            describe(uno.table(), &TurnEvent::Skipped(1)),
            "Bob has been skipped!"
        );
    }
}
