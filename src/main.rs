#![windows_subsystem = "windows"]
extern crate quicksilver;

use quicksilver::prelude::*;

use ccg_board::automaton::Automaton;
use ccg_board::loading::LoadingState;

/// Milliseconds between updates
const UPDATE_RATE: f64 = 1000. / 60.;
const WINDOW_SIZE: (f32, f32) = (1280.0, 800.0);

struct Game {
    automaton: Automaton,
}

impl State for Game {
    fn new() -> Result<Game> {
        let game = Game {
            automaton: Automaton::new(LoadingState::new()),
        };
        Ok(game)
    }

    fn event(&mut self, event: &Event, _window: &mut Window) -> Result<()> {
        self.automaton.event(event);
        Ok(())
    }

    fn update(&mut self, _window: &mut Window) -> Result<()> {
        self.automaton.update(UPDATE_RATE as f32);
        Ok(())
    }

    fn draw(&mut self, window: &mut Window) -> Result<()> {
        self.automaton.draw(window)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Settings {
        update_rate: UPDATE_RATE,
        ..Settings::default()
    };
    run::<Game>("Wing Commander CCG", Vector::new(WINDOW_SIZE.0, WINDOW_SIZE.1), settings);
}
