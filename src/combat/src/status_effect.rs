//! Status effect management for combatants
use crate::Combatant;
use crate::effect::{StatusEffect, StatusKind};

/// What a status tick did to its bearer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub damage: u32,
    /// Damage per condition, in application order
    pub sources: Vec<(StatusKind, u32)>,
    pub skip_turn: bool,
    pub messages: Vec<String>,
}

/// Active status effects of one combatant for the duration of a mission
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect; an existing effect of the same kind is refreshed
    pub fn add(&mut self, effect: StatusEffect) {
        match self.effects.iter().position(|e| e.kind() == effect.kind()) {
            Some(idx) => self.effects[idx] = effect,
            None => self.effects.push(effect),
        }
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind() != kind);
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Resolve one turn: damage-over-time ignores defense, any freeze/stun
    /// flags the turn as skipped, then every effect counts down.
    pub fn tick<C: Combatant + ?Sized>(&mut self, bearer: &mut C) -> StatusTick {
        let mut tick = StatusTick::default();

        for effect in &self.effects {
            let damage = effect.damage();
            if damage > 0 {
                let lost = bearer.attributes_mut().lose_health(damage);
                tick.damage += lost;
                tick.sources.push((effect.kind(), lost));
                tick.messages.push(format!(
                    "{} takes {} damage from {}",
                    bearer.name(),
                    lost,
                    effect.kind()
                ));
            }
            if effect.kind().skips_turn() && !tick.skip_turn {
                tick.skip_turn = true;
                tick.messages
                    .push(format!("{} is {} and cannot act!", bearer.name(), effect.description()));
            }
        }

        self.effects.retain_mut(|effect| {
            let active = effect.update();
            if !active {
                tick.messages
                    .push(format!("{}'s {} has worn off", bearer.name(), effect.kind()));
            }
            active
        });

        tick
    }
}
