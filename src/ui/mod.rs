/// Everything drawn around the cards: slots, score counters, phase indicators and the turn sigil

use quicksilver::geom::Vector;
use quicksilver::lifecycle::Window;
use quicksilver::Result;
use std::collections::HashMap;

use crate::automaton::GameEvent;
use crate::board::Board;
use crate::card_target::CardTarget;
use crate::error::BoardError;
use crate::game_objects::{Phase, Side};
use crate::loading::{Assets, BoardLayout};

pub mod board_display;
pub mod widgets;

use widgets::*;

#[derive(Debug, Default)]
pub struct UserInterface {
    window: Vector,
    slot_texture: String,
    player_points: ScoreCounter,
    opponent_points: ScoreCounter,
    player_phase: PhaseIndicator,
    opponent_phase: PhaseIndicator,
    turn_indicator: TurnIndicator,
    guide_lines: GuideLines,
    ready_areas: Vec<ReadyArea>,
}

impl UserInterface {
    /// Build the widgets for `layout` and put its slots on `board`
    pub fn new(layout: &BoardLayout, board: &mut Board) -> std::result::Result<Self, BoardError> {
        layout.validate()?;
        let window = layout.window_size();
        let slot_size = board.style().card_size();

        let mut slot_positions = HashMap::new();
        for slot in &layout.slots {
            let position = slot.placement.resolve(window);
            let target = CardTarget::new(
                board.next_target_id(),
                &slot.name,
                slot.side,
                &slot.accepts,
                position,
                slot.orientation,
                slot_size,
            )?;
            board.add_target(target);
            slot_positions.insert(slot.name.as_str(), position);
        }

        let mut strokes = Vec::new();
        for names in &layout.guide_lines {
            let mut stroke = Vec::new();
            for name in names {
                match slot_positions.get(name.as_str()) {
                    Some(position) => stroke.push(*position),
                    None => return Err(BoardError::UnknownSlot(name.clone())),
                }
            }
            strokes.push(stroke);
        }

        let ready_areas = layout
            .ready_areas
            .iter()
            .map(|area| ReadyArea {
                side: area.side,
                area: area.resolve(window),
            })
            .collect();

        let points = layout.starting_power_points;
        let turn = &layout.turn_indicator;

        Ok(Self {
            window,
            slot_texture: layout.slot_texture.clone(),
            player_points: ScoreCounter::new(Side::Player, points, layout.scores.player.resolve(window), &layout.score_font),
            opponent_points: ScoreCounter::new(Side::Opponent, points, layout.scores.opponent.resolve(window), &layout.score_font),
            player_phase: PhaseIndicator::new(Side::Player, layout.phases.player.resolve(window), &layout.phase_font),
            opponent_phase: PhaseIndicator::new(Side::Opponent, layout.phases.opponent.resolve(window), &layout.phase_font),
            turn_indicator: TurnIndicator::new(
                turn.placement.resolve(window),
                Vector::new(turn.size[0], turn.size[1]),
                &turn.player_texture,
                &turn.opponent_texture,
            ),
            guide_lines: GuideLines::from_strokes(&strokes),
            ready_areas,
        })
    }

    pub fn window(&self) -> Vector {
        self.window
    }

    pub fn player_power_points(&mut self, delta: i32) {
        self.player_points.add(delta);
    }

    pub fn opponent_power_points(&mut self, delta: i32) {
        self.opponent_points.add(delta);
    }

    pub fn power_points(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_points.value(),
            Side::Opponent => self.opponent_points.value(),
        }
    }

    fn phase_indicator_mut(&mut self, side: Side) -> &mut PhaseIndicator {
        match side {
            Side::Player => &mut self.player_phase,
            Side::Opponent => &mut self.opponent_phase,
        }
    }

    pub fn phase(&self, side: Side) -> Phase {
        match side {
            Side::Player => self.player_phase.current(),
            Side::Opponent => self.opponent_phase.current(),
        }
    }

    pub fn rotate_player_phase(&mut self) -> bool {
        self.rotate_phase(Side::Player)
    }

    pub fn rotate_opponent_phase(&mut self) -> bool {
        self.rotate_phase(Side::Opponent)
    }

    /// False if that side's indicator was still scrolling and nothing changed
    pub fn rotate_phase(&mut self, side: Side) -> bool {
        self.phase_indicator_mut(side).rotate()
    }

    pub fn flip_turn(&mut self) -> bool {
        self.turn_indicator.flip()
    }

    pub fn turn(&self) -> Side {
        self.turn_indicator.showing()
    }

    fn widgets(&self) -> Vec<&dyn Widget> {
        let mut widgets = vec![
            &self.guide_lines as &dyn Widget,
            &self.player_points as &dyn Widget,
            &self.opponent_points as &dyn Widget,
            &self.player_phase as &dyn Widget,
            &self.opponent_phase as &dyn Widget,
            &self.turn_indicator as &dyn Widget,
        ];
        widgets.extend(self.ready_areas.iter().map(|a| a as &dyn Widget));
        widgets
    }

    /// Event of the first widget that reacts to a click at `point`
    pub fn click(&self, point: Vector) -> Option<GameEvent> {
        self.widgets().iter().find_map(|w| w.maybe_activate(point))
    }

    pub fn update(&mut self, dt: f32) {
        self.player_phase.update(dt);
        self.opponent_phase.update(dt);
        self.turn_indicator.update(dt);
    }

    pub fn draw(&self, window: &mut Window, assets: &Assets, board: &Board) -> Result<()> {
        for widget in self.widgets() {
            widget.draw(window, assets)?;
        }
        board_display::draw_targets(window, assets, board.targets(), &self.slot_texture);
        board_display::draw_cards(window, assets, board.cards());
        Ok(())
    }
}
