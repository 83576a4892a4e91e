use std::{
    cell::Cell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use strum::IntoEnumIterator;
use tracing::debug;
use unocore::{
    card::CardColor,
    controller::{PromptReply, Prompter},
    error::UnoError,
    rules::playable_indices,
    table::Table,
    turn::DecisionContext,
};

use crate::render::render;

pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Turns `1+2` into hand positions `[0, 1]`.
pub fn parse_selection(input: &str) -> Option<Vec<usize>> {
    input
        .split('+')
        .map(|part| part.trim().parse::<usize>().ok()?.checked_sub(1))
        .collect()
}

/// Asks the person at the keyboard. Once stdin closes every prompt answers
/// with a pass and `closed` is raised for the game loop.
pub struct StdinPrompter {
    closed: Rc<Cell<bool>>,
}

impl StdinPrompter {
    pub fn new(closed: Rc<Cell<bool>>) -> Self {
        Self { closed }
    }

    fn ask(&self, prompt: &str) -> Option<String> {
        if self.closed.get() {
            return None;
        }
        match read_line(prompt) {
            Ok(Some(line)) => Some(line),
            Ok(None) | Err(_) => {
                debug!("stdin closed");
                self.closed.set(true);
                None
            }
        }
    }

    fn ask_letter(&self, prompt: &str, allowed: &[char]) -> Option<char> {
        loop {
            let answer = self.ask(prompt)?.to_uppercase();
            match answer.chars().next() {
                Some(letter) if answer.len() == 1 && allowed.contains(&letter) => {
                    return Some(letter)
                }
                _ => println!("Invalid input. Please enter one of {allowed:?}."),
            }
        }
    }

    fn ask_cards(&self, table: &Table, player_id: u64) -> Option<PromptReply> {
        let playable = table
            .get_player(&player_id)
            .map(|player| playable_indices(&player.hand, table.top_card(), table.active_penalty()))
            .unwrap_or_default();
        if playable.is_empty() {
            println!("You have no playable cards!");
            return None;
        }

        loop {
            let input = self.ask(r#"Card? (e.g., 1, 1+2, "u" for UNO, "r" to return): "#)?;
            match input.to_lowercase().as_str() {
                "u" => return Some(PromptReply::DeclareUno),
                "r" => return None,
                _ => match parse_selection(&input) {
                    Some(indices) => return Some(PromptReply::Play(indices)),
                    None => println!("Invalid input. Enter a number or numbers separated by '+'."),
                },
            }
        }
    }
}

impl Prompter for StdinPrompter {
    fn prompt_play(&mut self, table: &Table, player_id: u64, context: DecisionContext) -> PromptReply {
        println!("{}", render(table, player_id));

        match context {
            DecisionContext::FollowUp { drawn: Some(drawn) } => {
                let card = table
                    .get_player(&player_id)
                    .and_then(|player| player.hand.get(drawn))
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let prompt =
                    format!("You drew {card}. Play it? (U)no, (Y)es, (P)ick another, (N)o: ");
                loop {
                    match self.ask_letter(&prompt, &['U', 'Y', 'P', 'N']) {
                        Some('U') => return PromptReply::DeclareUno,
                        Some('Y') => return PromptReply::Play(vec![drawn]),
                        Some('P') => {
                            if let Some(reply) = self.ask_cards(table, player_id) {
                                return reply;
                            }
                            if self.closed.get() {
                                return PromptReply::Pass;
                            }
                        }
                        _ => return PromptReply::Pass,
                    }
                }
            }
            DecisionContext::FollowUp { drawn: None } => loop {
                let prompt = "Play a card now? (U)no, (Y)es, (N)o: ";
                match self.ask_letter(prompt, &['U', 'Y', 'N']) {
                    Some('U') => return PromptReply::DeclareUno,
                    Some('Y') => {
                        if let Some(reply) = self.ask_cards(table, player_id) {
                            return reply;
                        }
                        if self.closed.get() {
                            return PromptReply::Pass;
                        }
                    }
                    _ => return PromptReply::Pass,
                }
            },
            DecisionContext::FreeTurn | DecisionContext::Penalty => loop {
                let prompt = "(P)lay or (D)raw a card or call (U)no: ";
                match self.ask_letter(prompt, &['P', 'D', 'U']) {
                    Some('U') => return PromptReply::DeclareUno,
                    Some('P') => {
                        if let Some(reply) = self.ask_cards(table, player_id) {
                            return reply;
                        }
                        if self.closed.get() {
                            return PromptReply::Pass;
                        }
                    }
                    _ => return PromptReply::Pass,
                }
            },
        }
    }

    fn prompt_color(&mut self, _table: &Table, _player_id: u64) -> CardColor {
        let letters = CardColor::iter()
            .filter_map(|color| color.to_string().chars().next())
            .collect::<Vec<_>>();
        let prompt = "Which color do you choose? (R)ed, (G)reen, (B)lue, (Y)ellow: ";
        let letter = self.ask_letter(prompt, &letters);
        CardColor::iter()
            .find(|color| color.to_string().chars().next() == letter)
            .unwrap_or(CardColor::Red)
    }

    fn reject(&mut self, error: &UnoError) {
        println!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_card() {
        assert_eq!(parse_selection("3"), Some(vec![2]));
    }

    #[test]
    fn parses_stacked_cards() {
        assert_eq!(parse_selection("1+2 + 5"), Some(vec![0, 1, 4]));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(parse_selection("0"), None);
        assert_eq!(parse_selection("1+x"), None);
        assert_eq!(parse_selection(""), None);
    }
}
