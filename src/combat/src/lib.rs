// src/combat/src/lib.rs

//! Combat primitives shared by the hero and the mission engine: attributes,
//! the `Combatant` capability, status conditions, the seeded RNG and the enemy
//! catalog.

pub mod attributes;
pub mod boss;
pub mod catalog;
pub mod combatant;
pub mod effect;
pub mod enemy;
pub mod rng;
pub mod status_effect;

pub use crate::attributes::Attributes;
pub use crate::boss::{BossKind, BossState};
pub use crate::catalog::{CatalogError, Difficulty, EnemyCatalog, EnemyTemplate, Roster, Scenario};
pub use crate::combatant::Combatant;
pub use crate::effect::{StatusEffect, StatusInfliction, StatusKind};
pub use crate::enemy::{Behavior, Enemy, EnemyAction, EnemyKind, HitAftermath, SpecialMove};
pub use crate::rng::GameRng;
pub use crate::status_effect::{StatusEffects, StatusTick};

/// Multiplier applied to a critical hit
pub const CRIT_MULTIPLIER: f64 = 1.5;
/// Critical chance every attacker starts with
pub const BASE_CRIT_CHANCE: f64 = 0.05;
/// Spread of the uniform variance on enemy damage
pub const ENEMY_DAMAGE_VARIANCE: f64 = 0.1;
