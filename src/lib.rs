pub mod animation;
pub mod automaton;
pub mod board;
pub mod card;
pub mod card_target;
pub mod error;
pub mod game_control;
pub mod game_objects;
pub mod input;
pub mod loading;
pub mod palette;
pub mod ui;
