//! Pointer handling for the board: hover outlines and the card drag-and-drop protocol.
//!
//! The controller is either `Idle` or `Dragging` exactly one card. A drag begins with a pointer-down
//! on an interactive card and always ends on the next pointer-up, inside the window or outside it.
//! While dragging, only the slots that accept the card and are empty listen for hover and drop.

use log::{debug, warn};
use quicksilver::geom::Vector;
use std::mem::replace;

use crate::board::Board;
use crate::card_target::{BorderState, CardPreview};
use crate::game_objects::{CardId, TargetId};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Vector),
    Move(Vector),
    Up(Vector),
    /// Released outside the window, or the pointer left it mid-drag
    UpOutside,
}

/// The slots listening to a drag. Obtained when the drag starts, released exactly once when it ends.
#[must_use]
#[derive(Debug, PartialEq)]
pub struct Subscription {
    listeners: Vec<TargetId>,
}

impl Subscription {
    fn subscribe(board: &mut Board, card_id: CardId) -> Option<Self> {
        let card_type = board.card(card_id)?.card_type();
        let listeners = board.eligible_targets(card_type);

        for target in board.targets().iter().map(|t| t.id()).collect::<Vec<_>>() {
            let state = if listeners.contains(&target) {
                BorderState::ValidTarget
            } else {
                BorderState::InvalidTarget
            };
            if let Some(t) = board.target_mut(target) {
                t.draw_border(state);
            }
        }

        Some(Self { listeners })
    }

    pub fn listens(&self, target: TargetId) -> bool {
        self.listeners.contains(&target)
    }

    pub fn listeners(&self) -> &[TargetId] {
        &self.listeners
    }

    fn release(self, board: &mut Board) {
        for target in board.targets().iter().map(|t| t.id()).collect::<Vec<_>>() {
            if let Some(t) = board.target_mut(target) {
                t.clear_preview();
                t.draw_border(BorderState::Normal);
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct DragSession {
    card: CardId,
    /// Pointer position relative to the card centre at pointer-down
    offset: Vector,
    subscription: Subscription,
    /// Listening slot the pointer is currently over
    hovered: Option<TargetId>,
}

impl DragSession {
    pub fn card(&self) -> CardId {
        self.card
    }

    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn hovered(&self) -> Option<TargetId> {
        self.hovered
    }
}

#[derive(Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragSession),
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

#[derive(Debug, Default)]
pub struct InputController {
    state: DragState,
    outlined: Option<CardId>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    pub fn outlined(&self) -> Option<CardId> {
        self.outlined
    }

    pub fn handle(&mut self, board: &mut Board, event: PointerEvent) {
        match (event, self.is_dragging()) {
            (PointerEvent::Down(point), false) => self.card_clicked(board, point),
            (PointerEvent::Move(point), false) => self.hover(board, point),
            (PointerEvent::Move(point), true) => self.drag_card(board, point),
            (PointerEvent::Up(point), true) => self.card_drag_end(board, Some(point)),
            (PointerEvent::UpOutside, true) => self.card_drag_end(board, None),
            // nobody listens for these
            _ => (),
        }
    }

    /// Pointer-down: start dragging the topmost card under the pointer, if any
    pub fn card_clicked(&mut self, board: &mut Board, point: Vector) {
        if let Some(card) = board.card_at(point) {
            self.card_drag_start(board, card, point);
        }
    }

    /// Outline the card under the pointer and drop the outline from the one it left
    pub fn hover(&mut self, board: &mut Board, point: Vector) {
        let under = board.card_at(point);
        if under == self.outlined {
            return;
        }
        if let Some(old) = self.outlined {
            self.unoutline_card(board, old);
        }
        if let Some(new) = under {
            self.outline_card(board, new);
        }
    }

    /// Pointer left the window: nothing is under it any more
    pub fn pointer_left(&mut self, board: &mut Board) {
        if let Some(card) = self.outlined {
            self.unoutline_card(board, card);
        }
    }

    /// Outline and zoom `card`. Only one card is outlined at a time.
    pub fn outline_card(&mut self, board: &mut Board, card: CardId) {
        if self.outlined.is_some() {
            return;
        }
        match board.card_mut(card) {
            Some(c) => {
                c.hover_in();
                self.outlined = Some(card);
            }
            None => warn!("outline_card called but {} is not on the table", card),
        }
    }

    pub fn unoutline_card(&mut self, board: &mut Board, card: CardId) {
        if self.outlined != Some(card) {
            return;
        }
        self.outlined = None;
        // a card moved into a slot has already shed its hover
        if let Some(c) = board.card_mut(card) {
            c.hover_out();
        }
    }

    /// Idle -> Dragging
    pub fn card_drag_start(&mut self, board: &mut Board, card_id: CardId, pointer: Vector) {
        if let DragState::Dragging(session) = &self.state {
            warn!("card_drag_start called for {} while {} is being dragged", card_id, session.card);
            return;
        }

        let offset = match board.card_mut(card_id) {
            Some(card) if card.is_interactive() => {
                card.set_interactive(false);
                pointer - card.position()
            }
            Some(_) => {
                warn!("card_drag_start called but {} is not interactive", card_id);
                return;
            }
            None => {
                warn!("card_drag_start called but {} is not on the table", card_id);
                return;
            }
        };

        let subscription = match Subscription::subscribe(board, card_id) {
            Some(subscription) => subscription,
            None => return,
        };
        board.raise(card_id);
        debug!("dragging {} with {} listening slots", card_id, subscription.listeners.len());

        self.state = DragState::Dragging(DragSession {
            card: card_id,
            offset,
            subscription,
            hovered: None,
        });
    }

    /// Dragging -> Dragging: follow the pointer and track which listening slot is under it
    pub fn drag_card(&mut self, board: &mut Board, pointer: Vector) {
        let session = match &mut self.state {
            DragState::Dragging(session) => session,
            DragState::Idle => {
                warn!("drag_card called but no drag session is active");
                return;
            }
        };

        match board.card_mut(session.card) {
            Some(card) => card.set_position(pointer - session.offset),
            None => {
                warn!("drag_card called but dragged {} is gone", session.card);
                return;
            }
        }

        let over = board.listening_target_at(pointer, session.subscription.listeners());
        if over == session.hovered {
            return;
        }
        if session.hovered.is_some() {
            remove_card_from_target(board, session);
        }
        if let Some(target) = over {
            display_card_in_target(board, session, target);
        }
    }

    /// Pointer released. `pointer` is None when it was released outside the window.
    pub fn card_drag_end(&mut self, board: &mut Board, pointer: Option<Vector>) {
        let session = match replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(session) => session,
            DragState::Idle => {
                warn!("card_drag_end called but no drag session is active");
                return;
            }
        };

        let drop_target = pointer
            .and_then(|p| board.listening_target_at(p, session.subscription.listeners()))
            .filter(|t| board.target(*t).map_or(false, |t| t.is_empty()));

        let DragSession { card, subscription, .. } = session;
        subscription.release(board);

        match drop_target {
            Some(target) => self.set_card_in_target(board, card, target),
            None => {
                // TODO: snap the card back to where the drag started instead of leaving it where it fell
                match board.card_mut(card) {
                    Some(c) => {
                        c.set_interactive(true);
                        c.set_visible(true);
                    }
                    None => warn!("card_drag_end called but dragged {} is gone", card),
                }
                debug!("drag of {} cancelled", card);
            }
        }
    }

    fn set_card_in_target(&mut self, board: &mut Board, card: CardId, target: TargetId) {
        if self.outlined == Some(card) {
            self.outlined = None;
        }
        if board.place_card(card, target) {
            debug!("{} placed in {}", card, target);
        } else {
            warn!("set_card_in_target called but {} refused {}", target, card);
            if let Some(c) = board.card_mut(card) {
                c.set_interactive(true);
                c.set_visible(true);
            }
        }
    }
}

/// Show the dragged card inside `target` and hide the free-floating one
fn display_card_in_target(board: &mut Board, session: &mut DragSession, target: TargetId) {
    let preview = match board.card_mut(session.card) {
        Some(card) => {
            card.set_visible(false);
            CardPreview::of(card)
        }
        None => {
            warn!("display_card_in_target called but dragged {} is gone", session.card);
            return;
        }
    };

    match board.target_mut(target) {
        Some(t) => {
            t.display_card(preview);
            t.draw_border(BorderState::Highlighted);
            session.hovered = Some(target);
        }
        None => warn!("display_card_in_target called but {} does not exist", target),
    }
}

/// Undo `display_card_in_target` for the slot the pointer just left
fn remove_card_from_target(board: &mut Board, session: &mut DragSession) {
    let target = match session.hovered.take() {
        Some(target) => target,
        None => {
            warn!("remove_card_from_target called but no slot is hovered");
            return;
        }
    };
    if let Some(t) = board.target_mut(target) {
        t.clear_preview();
        t.draw_border(BorderState::ValidTarget);
    }
    if let Some(card) = board.card_mut(session.card) {
        card.set_visible(true);
    }
}
