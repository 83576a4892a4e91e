pub mod ai;
pub mod card;
pub mod config;
pub mod constants;
pub mod controller;
pub mod deck;
pub mod error;
pub mod player;
pub mod rules;
pub mod table;
pub mod turn;
pub mod uno;
