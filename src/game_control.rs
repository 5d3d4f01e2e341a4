use derivative::*;
use log::{debug, error, info};
use quicksilver::geom::Vector;
use quicksilver::input::{ButtonState, Key, MouseButton};
use quicksilver::lifecycle::{Event, Window};
use std::mem::take;

use crate::automaton::{AutomatonState, GameEndedState, GameEvent};
use crate::board::Board;
use crate::error::BoardError;
use crate::game_objects::Side;
use crate::input::{InputController, PointerEvent};
use crate::loading::{Assets, BoardLayout};
use crate::ui::UserInterface;

/// Everything the table needs per frame, passed around explicitly
#[derive(Debug, Default)]
pub struct GameContext {
    pub board: Board,
    pub input: InputController,
    pub ui: UserInterface,
    /// Last known pointer position; button events don't carry one
    pub pointer: Vector,
}

impl GameContext {
    /// Lay out the slots and widgets, then deal the starting cards
    pub fn new(layout: &BoardLayout) -> Result<Self, BoardError> {
        let mut board = Board::new(layout.card);
        let ui = UserInterface::new(layout, &mut board)?;
        for dealt in &layout.dealt {
            let id = board.deal(&dealt.texture, dealt.card_type, Vector::new(dealt.position[0], dealt.position[1]));
            debug!("dealt {} ({:?})", id, dealt.card_type);
        }
        info!("Table ready: {} slots, {} cards", board.targets().len(), board.cards().len());

        Ok(Self {
            board,
            input: InputController::new(),
            ui,
            pointer: Vector::ZERO,
        })
    }

    /// Translate a raw event into what it means on the table
    pub fn interpret(event: Event) -> GameEvent {
        match event {
            Event::Key(Key::Escape, ButtonState::Pressed) => GameEvent::Quit,
            Event::Key(Key::P, ButtonState::Pressed) => GameEvent::RotatePhase(Side::Player),
            Event::Key(Key::O, ButtonState::Pressed) => GameEvent::RotatePhase(Side::Opponent),
            Event::Key(Key::Up, ButtonState::Pressed) => GameEvent::PowerPoints(Side::Player, 1),
            Event::Key(Key::Down, ButtonState::Pressed) => GameEvent::PowerPoints(Side::Player, -1),
            Event::Key(Key::PageUp, ButtonState::Pressed) => GameEvent::PowerPoints(Side::Opponent, 1),
            Event::Key(Key::PageDown, ButtonState::Pressed) => GameEvent::PowerPoints(Side::Opponent, -1),
            Event::Key(Key::T, ButtonState::Pressed) => GameEvent::FlipTurn,
            _ => GameEvent::IO(event),
        }
    }

    /// Apply one event. Returns false once the table should close.
    pub fn handle(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::IO(io) => match Self::interpret(io) {
                GameEvent::IO(io) => self.handle_io(io),
                meaning => return self.handle(meaning),
            },
            GameEvent::RotatePhase(side) => {
                if !self.ui.rotate_phase(side) {
                    debug!("{:?} phase is still rotating", side);
                }
            }
            GameEvent::PowerPoints(Side::Player, delta) => self.ui.player_power_points(delta),
            GameEvent::PowerPoints(Side::Opponent, delta) => self.ui.opponent_power_points(delta),
            GameEvent::FlipTurn => {
                if !self.ui.flip_turn() {
                    debug!("turn indicator is still flipping");
                }
            }
            GameEvent::Quit => return false,
        }
        true
    }

    fn handle_io(&mut self, event: Event) {
        match event {
            Event::MouseMoved(position) => {
                self.pointer = position;
                self.input.handle(&mut self.board, PointerEvent::Move(position));
            }
            Event::MouseButton(MouseButton::Left, ButtonState::Pressed) => {
                // cards are drawn above the widgets, so they get the click first
                let on_card = self.input.is_dragging() || self.board.card_at(self.pointer).is_some();
                match self.ui.click(self.pointer).filter(|_| !on_card) {
                    Some(widget_event) => {
                        self.handle(widget_event);
                    }
                    None => self.input.handle(&mut self.board, PointerEvent::Down(self.pointer)),
                }
            }
            Event::MouseButton(MouseButton::Left, ButtonState::Released) => {
                self.input.handle(&mut self.board, PointerEvent::Up(self.pointer));
            }
            Event::MouseExited => {
                if self.input.is_dragging() {
                    self.input.handle(&mut self.board, PointerEvent::UpOutside);
                }
                self.input.pointer_left(&mut self.board);
            }
            _ => (),
        }
    }

    /// Advance animations by `dt` milliseconds
    pub fn update(&mut self, dt: f32) {
        self.board.update(dt);
        self.ui.update(dt);
    }
}

/// The live table: cards, slots and widgets
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct TableState {
    context: GameContext,
    #[derivative(Debug = "ignore")]
    assets: Assets,
}

impl TableState {
    pub fn new(layout: BoardLayout, assets: Assets) -> Result<Box<dyn AutomatonState>, BoardError> {
        let context = GameContext::new(&layout)?;
        Ok(Box::new(Self { context, assets }))
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }
}

impl AutomatonState for TableState {
    fn event(&mut self, event: GameEvent) -> Box<dyn AutomatonState> {
        if self.context.handle(event) {
            Box::new(take(self))
        } else {
            Box::new(GameEndedState)
        }
    }

    fn update(&mut self, dt: f32) -> Box<dyn AutomatonState> {
        self.context.update(dt);
        Box::new(take(self))
    }

    fn draw(&self, window: &mut Window) {
        if let Err(e) = self.context.ui.draw(window, &self.assets, &self.context.board) {
            error!("can't draw the table: {:?}", e);
        }
    }
}
