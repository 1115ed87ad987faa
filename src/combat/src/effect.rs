//src/combat/src/effect.rs
use strum::{Display, EnumIter, EnumString};

use crate::rng::GameRng;

/// Timed status conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    Poison,
    Burn,
    Freeze,
    Stun,
}

impl StatusKind {
    /// Poison and burn hurt every turn
    pub fn deals_damage(self) -> bool {
        matches!(self, StatusKind::Poison | StatusKind::Burn)
    }

    /// Freeze and stun cost the afflicted its action
    pub fn skips_turn(self) -> bool {
        matches!(self, StatusKind::Freeze | StatusKind::Stun)
    }
}

/// An active status on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEffect {
    kind: StatusKind,
    turns: u32,   // remaining turns
    potency: u32, // damage per turn for damaging kinds
}

impl StatusEffect {
    pub fn new(kind: StatusKind, turns: u32, potency: u32) -> Self {
        Self {
            kind,
            turns,
            potency,
        }
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_expired(&self) -> bool {
        self.turns == 0
    }

    /// Count down one turn; returns whether the effect is still active
    pub fn update(&mut self) -> bool {
        if self.turns > 0 {
            self.turns -= 1;
            !self.is_expired()
        } else {
            false
        }
    }

    /// Damage dealt each turn
    pub fn damage(&self) -> u32 {
        if self.kind.deals_damage() {
            self.potency
        } else {
            0
        }
    }

    pub fn description(&self) -> String {
        let base = match self.kind {
            StatusKind::Poison => format!("poison (-{} HP/turn)", self.damage()),
            StatusKind::Burn => format!("burn (-{} HP/turn)", self.damage()),
            StatusKind::Freeze => "frozen".to_string(),
            StatusKind::Stun => "stunned".to_string(),
        };
        format!("{} [{} turns left]", base, self.turns)
    }
}

/// Probabilistic status attached to an ability or an enemy's attacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusInfliction {
    pub kind: StatusKind,
    pub chance: f64,
    pub duration: u32,
    pub potency: u32,
}

impl StatusInfliction {
    pub const fn new(kind: StatusKind, chance: f64, duration: u32, potency: u32) -> Self {
        Self {
            kind,
            chance,
            duration,
            potency,
        }
    }

    /// Roll the infliction chance
    pub fn roll(&self, rng: &mut GameRng) -> Option<StatusEffect> {
        if rng.chance(self.chance) {
            Some(StatusEffect::new(self.kind, self.duration, self.potency))
        } else {
            None
        }
    }
}
