use serde_derive::*;
use std::fmt;

/// Every category a card can belong to. A card's type never changes after it is dealt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
    NavPoint,
    Carrier,
    Ship,
    Pilot,
    Crew,
    WeaponSystem,
    PilotAward,
    Modifier,
    BattleDamage,
    Maneuver,
    Luck,
    SecretOrders,
}

impl CardType {
    pub fn all() -> &'static [CardType] {
        &[
            CardType::NavPoint,
            CardType::Carrier,
            CardType::Ship,
            CardType::Pilot,
            CardType::Crew,
            CardType::WeaponSystem,
            CardType::PilotAward,
            CardType::Modifier,
            CardType::BattleDamage,
            CardType::Maneuver,
            CardType::Luck,
            CardType::SecretOrders,
        ]
    }
}

/// Which half of the table something belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Default for Side {
    fn default() -> Self {
        Side::Player
    }
}

/// Turn phases, in the order they are played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Muster,
    Scramble,
    Movement,
    Combat,
    Discard,
}

impl Phase {
    pub const CYCLE: [Phase; 6] = [
        Phase::Draw,
        Phase::Muster,
        Phase::Scramble,
        Phase::Movement,
        Phase::Combat,
        Phase::Discard,
    ];

    /// Phase that follows `self`; Discard wraps around to Draw.
    pub fn next(self) -> Phase {
        let idx = Phase::CYCLE.iter().position(|p| *p == self).unwrap_or(0);
        Phase::CYCLE[(idx + 1) % Phase::CYCLE.len()]
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Draw
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// NOTE: cards and slots are referred to by id rather than by reference. The board owns them, and handlers
//  only ever get a short-lived &mut to it, so a stored reference would outlive the borrow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycle_wraps_after_discard() {
        assert_eq!(Phase::Discard.next(), Phase::Draw);
        let mut phase = Phase::Draw;
        for _ in 0..Phase::CYCLE.len() {
            phase = phase.next();
        }
        assert_eq!(phase, Phase::Draw);
    }

    #[test]
    fn card_types_deserialize_from_names() {
        let parsed: Vec<CardType> = serde_json::from_str(r#"["NavPoint", "SecretOrders"]"#).unwrap();
        assert_eq!(parsed, vec![CardType::NavPoint, CardType::SecretOrders]);
        assert_eq!(CardType::all().len(), 12);
    }
}
