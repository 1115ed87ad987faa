// src/hero/src/ability.rs

//! Ability and passive identifiers with their static definitions.
//!
//! Identifiers are closed enums; the definition attached to each (cost,
//! damage formula, status infliction) lives in the class progression table.

use combat::{StatusEffect, StatusInfliction};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Mana-gated combat actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AbilityId {
    DevastatingStrike,
    ShieldBash,
    Bloodthirst,
    Fireball,
    FrostLance,
    Meteor,
    PreciseShot,
    CripplingShot,
    ArrowRain,
}

/// Always-on modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PassiveId {
    Berserk,
    IronSkin,
    ArcaneShield,
    ArcaneFocus,
    Evasion,
    EagleEye,
}

impl AbilityId {
    /// Key stored in save files
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl PassiveId {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Damage of an ability relative to the caster's total attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageFormula {
    Multiplier(f64),
    Additive { multiplier: f64, bonus: u32 },
}

impl DamageFormula {
    pub fn damage(&self, total_attack: u32) -> u32 {
        match *self {
            DamageFormula::Multiplier(m) => scale(total_attack, m),
            DamageFormula::Additive { multiplier, bonus } => scale(total_attack, multiplier) + bonus,
        }
    }
}

/// Truncating scale; the epsilon keeps `15 * 1.2` from landing on 17
pub(crate) fn scale(value: u32, factor: f64) -> u32 {
    (value as f64 * factor + 1e-9).floor().max(0.0) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: &'static str,
    pub description: &'static str,
    pub mana_cost: u32,
    pub formula: DamageFormula,
    /// Fraction of the damage healed back on the caster
    pub self_heal: Option<f64>,
    pub inflicts: Option<StatusInfliction>,
}

impl AbilityDef {
    pub fn new(
        id: AbilityId,
        name: &'static str,
        description: &'static str,
        mana_cost: u32,
        formula: DamageFormula,
    ) -> Self {
        Self {
            id,
            name,
            description,
            mana_cost,
            formula,
            self_heal: None,
            inflicts: None,
        }
    }

    pub fn healing(mut self, ratio: f64) -> Self {
        self.self_heal = Some(ratio);
        self
    }

    pub fn inflicting(mut self, infliction: StatusInfliction) -> Self {
        self.inflicts = Some(infliction);
        self
    }

    /// `Fireball (25 MP) - Hurls a ball of fire`
    pub fn menu_label(&self) -> String {
        format!("{} ({} MP) - {}", self.name, self.mana_cost, self.description)
    }
}

/// What a passive does while its condition holds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassiveEffect {
    /// Base attack multiplied while health is below the ratio
    Rage { below_health: f32, factor: u32 },
    /// Flat defense while mana is above the ratio
    ManaWard { above_mana: f32, bonus: u32 },
    /// Fraction of incoming damage removed after defense
    DamageReduction(f64),
    CritBonus(f64),
    /// Chance to avoid a hit entirely
    Dodge(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassiveDef {
    pub id: PassiveId,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: PassiveEffect,
}

/// Outcome of a successful special ability
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub ability: AbilityId,
    pub damage: u32,
    pub message: String,
    pub healed: u32,
    pub inflicted: Option<StatusEffect>,
}

/// Why a cast did not happen. No failure costs mana or a turn.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CastFailure {
    #[error("{caster} does not have enough mana for {ability} ({cost} MP needed, {available} MP left)")]
    InsufficientMana {
        caster: String,
        ability: &'static str,
        cost: u32,
        available: u32,
    },
    #[error("{0} has not been learned")]
    Unknown(AbilityId),
    #[error("No special abilities learned yet")]
    NoneKnown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas_floor_scaled_attack() {
        assert_eq!(DamageFormula::Multiplier(2.0).damage(15), 30);
        assert_eq!(DamageFormula::Multiplier(1.2).damage(15), 18);
        assert_eq!(
            DamageFormula::Additive {
                multiplier: 1.5,
                bonus: 10
            }
            .damage(12),
            28
        );
    }

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(AbilityId::DevastatingStrike.key(), "devastating_strike");
        assert_eq!(PassiveId::EagleEye.key(), "eagle_eye");
        assert_eq!("frost_lance".parse::<AbilityId>().ok(), Some(AbilityId::FrostLance));
        assert!("golpe_pesado".parse::<AbilityId>().is_err());
    }
}
