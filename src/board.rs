/// The table: free-floating cards and the fixed slots they can be dropped into.

use quicksilver::geom::Vector;

use crate::card::{Card, CardStyle};
use crate::card_target::CardTarget;
use crate::game_objects::{CardId, CardType, TargetId};

/// Where a card currently lives
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardLocation {
    Free,
    InTarget(TargetId),
}

#[derive(Debug, Default)]
pub struct Board {
    style: CardStyle,
    // later cards are drawn above earlier ones
    cards: Vec<Card>,
    targets: Vec<CardTarget>,
    next_card_id: u32,
}

impl Board {
    pub fn new(style: CardStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    /// Put a new card on the table at `position`
    pub fn deal(&mut self, texture: &str, card_type: CardType, position: Vector) -> CardId {
        let id = CardId(self.next_card_id);
        self.next_card_id += 1;

        let mut card = Card::new(id, texture, card_type, self.style);
        card.set_position(position);
        self.cards.push(card);
        id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    /// Remove a free card from the table, handing it to the caller
    pub fn take_card(&mut self, id: CardId) -> Option<Card> {
        let idx = self.cards.iter().position(|c| c.id() == id)?;
        Some(self.cards.remove(idx))
    }

    /// Put a card back on the table, above everything else
    pub fn return_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Move `id` to the top of the drawing order
    pub fn raise(&mut self, id: CardId) {
        if let Some(idx) = self.cards.iter().position(|c| c.id() == id) {
            let card = self.cards.remove(idx);
            self.cards.push(card);
        }
    }

    /// Topmost visible, interactive card under `point`
    pub fn card_at(&self, point: Vector) -> Option<CardId> {
        self.cards
            .iter()
            .rev()
            .filter(|c| c.is_visible() && c.is_interactive())
            .find(|c| c.contains(point))
            .map(Card::id)
    }

    pub fn add_target(&mut self, target: CardTarget) {
        self.targets.push(target);
    }

    /// Id the next added target should carry
    pub fn next_target_id(&self) -> TargetId {
        TargetId(self.targets.len())
    }

    pub fn targets(&self) -> &[CardTarget] {
        &self.targets
    }

    pub fn target(&self, id: TargetId) -> Option<&CardTarget> {
        self.targets.iter().find(|t| t.id() == id)
    }

    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut CardTarget> {
        self.targets.iter_mut().find(|t| t.id() == id)
    }

    pub fn target_by_name(&self, name: &str) -> Option<&CardTarget> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn target_at(&self, point: Vector) -> Option<TargetId> {
        self.targets.iter().find(|t| t.contains(point)).map(CardTarget::id)
    }

    /// First of `listeners` under `point`. Slots not listening are skipped even when they overlap.
    pub fn listening_target_at(&self, point: Vector, listeners: &[TargetId]) -> Option<TargetId> {
        self.targets
            .iter()
            .filter(|t| listeners.contains(&t.id()))
            .find(|t| t.contains(point))
            .map(CardTarget::id)
    }

    /// Slots that would take a card of `card_type` right now: accepting and empty
    pub fn eligible_targets(&self, card_type: CardType) -> Vec<TargetId> {
        self.targets
            .iter()
            .filter(|t| t.accepts(card_type) && t.is_empty())
            .map(CardTarget::id)
            .collect()
    }

    /// Move a free card into a slot. The card stays on the table if the slot refuses it.
    pub fn place_card(&mut self, card_id: CardId, target_id: TargetId) -> bool {
        let target_idx = match self.targets.iter().position(|t| t.id() == target_id) {
            Some(idx) => idx,
            None => return false,
        };
        let card = match self.take_card(card_id) {
            Some(card) => card,
            None => return false,
        };

        match self.targets[target_idx].set_card(card) {
            Ok(displaced) => {
                if let Some(mut old) = displaced {
                    old.set_interactive(true);
                    self.cards.push(old);
                }
                true
            }
            Err(card) => {
                self.cards.push(card);
                false
            }
        }
    }

    pub fn locate(&self, id: CardId) -> Option<CardLocation> {
        if self.card(id).is_some() {
            return Some(CardLocation::Free);
        }
        self.targets
            .iter()
            .find(|t| t.card().map(Card::id) == Some(id))
            .map(|t| CardLocation::InTarget(t.id()))
    }

    /// Free cards that are not interactive on their own, i.e. captured by a drag
    pub fn captured_cards(&self) -> Vec<CardId> {
        self.cards.iter().filter(|c| !c.is_interactive()).map(Card::id).collect()
    }

    pub fn update(&mut self, dt: f32) {
        for card in &mut self.cards {
            card.update(dt);
        }
        for target in &mut self.targets {
            target.update(dt);
        }
    }
}
