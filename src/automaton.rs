/// State machine powering the application: loading, then the table, then shutdown

use log::info;
use quicksilver::lifecycle::{Event, Window};
use quicksilver::Result;
use std::process::exit;

use crate::game_objects::Side;
use crate::palette::Palette;

// NOTE: events never carry references into the board. They get queued and matched long after the borrow
//  that produced them is gone.
#[derive(Debug, Clone, Copy)]
pub enum GameEvent {
    /// Raw window input
    IO(Event),
    RotatePhase(Side),
    PowerPoints(Side, i32),
    FlipTurn,
    Quit,
}

#[derive(Debug, Default)]
pub struct GameEndedState;

impl AutomatonState for GameEndedState {
    fn event(&mut self, _event: GameEvent) -> Box<dyn AutomatonState> {
        Box::new(GameEndedState)
    }

    fn update(&mut self, _dt: f32) -> Box<dyn AutomatonState> {
        info!("Shutting down");
        exit(0)
    }
}

pub trait AutomatonState: std::fmt::Debug {
    /// Returns the state for the next event; `Box::new(take(self))` stays put.
    fn event(&mut self, event: GameEvent) -> Box<dyn AutomatonState>;

    /// Once per tick, `dt` milliseconds after the previous one. Drives loading and animations.
    /// No default: staying put needs `take(self)`, which a `dyn` receiver can't do.
    fn update(&mut self, dt: f32) -> Box<dyn AutomatonState>;

    /// Draw onto a freshly cleared window
    fn draw(&self, _window: &mut Window) {}
}

pub struct Automaton {
    state: Box<dyn AutomatonState>,
}

impl Automaton {
    pub fn new(starting_state: Box<dyn AutomatonState>) -> Self {
        Self {
            state: starting_state,
        }
    }

    pub fn event(&mut self, event: &Event) {
        self.state = self.state.event(GameEvent::IO(*event));
    }

    /// `dt` in milliseconds
    pub fn update(&mut self, dt: f32) {
        self.state = self.state.update(dt);
    }

    pub fn draw(&self, window: &mut Window) -> Result<()> {
        window.clear(Palette::color(Palette::BACKGROUND))?;
        self.state.draw(window);
        Ok(())
    }
}
