// src/combat/src/combatant.rs

use crate::attributes::Attributes;
use crate::rng::GameRng;

/// Anything that can take part in a battle
pub trait Combatant {
    fn name(&self) -> &str;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    fn is_alive(&self) -> bool {
        self.attributes().is_alive()
    }

    /// Raw damage of a plain attack
    fn attack_power(&self) -> u32 {
        self.attributes().attack
    }

    fn defense(&self) -> u32 {
        self.attributes().defense
    }

    /// Apply incoming damage after mitigation.
    ///
    /// Returns the effective damage, `max(0, raw - defense)`; health is
    /// clamped at zero.
    fn apply_damage(&mut self, raw: u32, _rng: &mut GameRng) -> u32 {
        let effective = raw.saturating_sub(self.defense());
        self.attributes_mut().lose_health(effective);
        effective
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.attributes_mut().heal(amount)
    }
}
