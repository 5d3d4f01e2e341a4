use itertools::Itertools;
use quicksilver::geom::{Rectangle, Shape, Vector};
use serde_derive::*;

use crate::card::{oriented, Card};
use crate::error::BoardError;
use crate::game_objects::{CardType, Side, TargetId};
use crate::palette::Palette;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Upright,
    Sideways,
}

impl Orientation {
    pub fn angle(self) -> f32 {
        match self {
            Orientation::Upright => 0.0,
            Orientation::Sideways => 90.0,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Upright
    }
}

/// Border emphasis of a slot during the current interaction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BorderState {
    Normal,
    /// A card that fits here is being dragged
    ValidTarget,
    /// A card is being dragged, but it can't go here
    InvalidTarget,
    /// The dragged card is hovering over this slot
    Highlighted,
}

/// What a slot shows while a dragged card hovers over it
#[derive(Clone, Debug, PartialEq)]
pub struct CardPreview {
    pub texture: String,
    pub card_type: CardType,
}

impl CardPreview {
    pub fn of(card: &Card) -> Self {
        Self {
            texture: card.texture().to_string(),
            card_type: card.card_type(),
        }
    }
}

/// A fixed place on the board holding at most one card of an accepted type
#[derive(Debug)]
pub struct CardTarget {
    id: TargetId,
    name: String,
    side: Side,
    accepted: Vec<CardType>,
    position: Vector,
    orientation: Orientation,
    // upright size; `bounds` turns it
    size: Vector,
    card: Option<Card>,
    preview: Option<CardPreview>,
    border: BorderState,
}

impl CardTarget {
    pub fn new(
        id: TargetId,
        name: &str,
        side: Side,
        accepted: &[CardType],
        position: Vector,
        orientation: Orientation,
        size: Vector,
    ) -> Result<Self, BoardError> {
        if accepted.is_empty() {
            return Err(BoardError::NoAcceptedTypes(name.to_string()));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            side,
            accepted: accepted.iter().cloned().sorted().dedup().collect(),
            position,
            orientation,
            size,
            card: None,
            preview: None,
            border: BorderState::Normal,
        })
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn accepted(&self) -> &[CardType] {
        &self.accepted
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new_sized(oriented(self.size, self.orientation.angle())).with_center(self.position)
    }

    pub fn contains(&self, point: Vector) -> bool {
        self.bounds().contains(point)
    }

    pub fn accepts(&self, card_type: CardType) -> bool {
        self.accepted.contains(&card_type)
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn card_mut(&mut self) -> Option<&mut Card> {
        self.card.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    /// Take ownership of `card` and seat it in the slot.
    /// A card of a type this slot doesn't accept is handed back untouched in `Err`.
    /// On success returns the card that was displaced, if any.
    pub fn set_card(&mut self, mut card: Card) -> Result<Option<Card>, Card> {
        if !self.accepts(card.card_type()) {
            return Err(card);
        }

        card.fit_into(self.bounds(), self.orientation.angle());
        self.preview = None;
        self.border = BorderState::Normal;
        Ok(self.card.replace(card))
    }

    /// Release the held card. Does nothing on an empty slot.
    pub fn clear_card(&mut self) -> Option<Card> {
        let released = self.card.take();
        if released.is_some() {
            self.border = BorderState::Normal;
        }
        released
    }

    pub fn preview(&self) -> Option<&CardPreview> {
        self.preview.as_ref()
    }

    /// Show a card in the slot without taking it
    pub fn display_card(&mut self, preview: CardPreview) {
        self.preview = Some(preview);
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    pub fn border(&self) -> BorderState {
        self.border
    }

    /// Redraw the border in `state`. Occupancy is unaffected.
    pub fn draw_border(&mut self, state: BorderState) {
        self.border = state;
    }

    pub fn border_color(&self) -> u32 {
        match self.border {
            BorderState::Normal if self.card.is_some() => Palette::DIM,
            BorderState::Normal => Palette::BACKGROUND_HIGHLIGHT,
            BorderState::ValidTarget => Palette::BRIGHT,
            BorderState::InvalidTarget => Palette::INVALID,
            BorderState::Highlighted => Palette::HIGHLIGHT,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(card) = self.card.as_mut() {
            card.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardStyle;
    use crate::game_objects::CardId;
    use proptest::prelude::*;

    fn nav_point() -> CardTarget {
        CardTarget::new(
            TargetId(0),
            "nav_c",
            Side::Player,
            &[CardType::NavPoint],
            Vector::new(640, 400),
            Orientation::Sideways,
            CardStyle::default().card_size(),
        )
        .unwrap()
    }

    fn card(id: u32, card_type: CardType) -> Card {
        Card::new(CardId(id), "assets/wc-ccg-confed-back.png", card_type, CardStyle::default())
    }

    #[test]
    fn empty_accepted_set_is_rejected() {
        let result = CardTarget::new(TargetId(0), "bad", Side::Player, &[], Vector::ZERO, Orientation::Upright, Vector::ONE);
        assert!(matches!(result, Err(BoardError::NoAcceptedTypes(_))));
    }

    #[test]
    fn set_card_seats_accepted_card() {
        let mut target = nav_point();
        target.draw_border(BorderState::Highlighted);
        let displaced = target.set_card(card(7, CardType::NavPoint)).unwrap();
        assert!(displaced.is_none());

        let held = target.card().unwrap();
        assert_eq!(held.id(), CardId(7));
        assert!(!held.is_interactive());
        assert_eq!(held.position(), target.bounds().center());
        assert_eq!(held.angle(), 90.0);
        assert_eq!(target.border(), BorderState::Normal);
        assert_eq!(target.border_color(), Palette::DIM);
    }

    #[test]
    fn clear_card_twice_is_a_noop() {
        let mut target = nav_point();
        target.set_card(card(1, CardType::NavPoint)).unwrap();
        assert!(target.clear_card().is_some());
        assert!(target.is_empty());
        assert!(target.clear_card().is_none());
        assert!(target.is_empty());
        assert_eq!(target.border(), BorderState::Normal);
        assert_eq!(target.border_color(), Palette::BACKGROUND_HIGHLIGHT);
    }

    #[test]
    fn draw_border_keeps_occupancy() {
        let mut target = nav_point();
        target.set_card(card(1, CardType::NavPoint)).unwrap();
        target.draw_border(BorderState::InvalidTarget);
        assert!(!target.is_empty());
        assert_eq!(target.border_color(), Palette::INVALID);
    }

    proptest! {
        #[test]
        fn occupancy_changes_only_for_accepted_types(
            accepted in proptest::sample::subsequence(CardType::all().to_vec(), 1..=12),
            dealt in proptest::sample::select(CardType::all().to_vec()),
        ) {
            let mut target = CardTarget::new(
                TargetId(3), "slot", Side::Opponent, &accepted, Vector::new(100, 100), Orientation::Upright, Vector::new(50, 70),
            ).unwrap();

            let accepts = target.accepts(dealt);
            prop_assert_eq!(accepts, accepted.contains(&dealt));

            match target.set_card(card(9, dealt)) {
                Ok(_) => {
                    prop_assert!(accepts);
                    prop_assert_eq!(target.card().map(|c| c.id()), Some(CardId(9)));
                }
                Err(rejected) => {
                    prop_assert!(!accepts);
                    prop_assert!(target.is_empty());
                    prop_assert!(rejected.is_interactive());
                }
            }
        }
    }
}
