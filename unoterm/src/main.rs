mod prompt;
mod render;

use std::{cell::Cell, env::var, rc::Rc};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use unocore::{
    config::GameConfig,
    uno::{Seat, Uno},
};

use crate::prompt::{read_line, StdinPrompter};
use crate::render::describe;

const COMPUTER_NAME: &str = "Computer";

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = GameConfig::default();
    if let Ok(seed) = var("UNO_SEED") {
        let seed = seed
            .trim()
            .parse()
            .wrap_err("`UNO_SEED` must be an unsigned number")?;
        config = config.with_seed(seed);
    }

    let name = match var("UNO_PLAYER_NAME") {
        Ok(name) if !name.trim().is_empty() => name,
        _ => read_line("Please enter your name: ")?
            .filter(|name| !name.is_empty())
            .ok_or_else(|| eyre!("No player name given"))?,
    };

    let input_closed = Rc::new(Cell::new(false));
    let prompter = StdinPrompter::new(input_closed.clone());
    let mut uno = Uno::new(
        vec![
            Seat::interactive(name, prompter),
            Seat::heuristic(COMPUTER_NAME),
        ],
        config,
    )?;
    info!(players = ?uno.table().get_player_ids(), "match started");

    loop {
        let current = uno.table().get_current_turn_player_id();
        if let Some(player) = uno.table().get_player(&current) {
            println!("\n{}'s turn", player.name());
        }

        let result = uno.play_turn()?;
        for event in &result.events {
            println!("{}", describe(uno.table(), event));
        }

        if result.won {
            break;
        }
        if input_closed.get() {
            println!("\nGame interrupted by user.");
            return Ok(());
        }
    }

    Ok(())
}
