// src/hero/src/lib.rs

//! The player character: classes, progression tables, abilities and
//! passives, inventory and the save snapshot.

pub mod ability;
pub mod bag;
pub mod character;
pub mod class;
pub mod progression;
pub mod snapshot;

use error::GameError;
use thiserror::Error;

pub use self::{
    ability::{AbilityDef, AbilityId, Cast, CastFailure, DamageFormula, PassiveDef, PassiveEffect, PassiveId},
    bag::{Bag, BagError},
    character::{Character, HitOutcome, Strike},
    class::Class,
    progression::{ProgressionTable, ProgressionTables, StatGrowth, Unlock},
    snapshot::{AttributesRecord, CharacterSnapshot, EquipmentRecord},
};

#[derive(Debug, Error)]
pub enum HeroError {
    #[error(transparent)]
    Bag(#[from] BagError),
    #[error(transparent)]
    Cast(#[from] CastFailure),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<BagError> for GameError {
    fn from(err: BagError) -> Self {
        match err {
            BagError::InvalidIndex(_) => GameError::InvalidSelection(err.to_string()),
            _ => GameError::InsufficientResource(err.to_string()),
        }
    }
}

impl From<CastFailure> for GameError {
    fn from(err: CastFailure) -> Self {
        GameError::InsufficientResource(err.to_string())
    }
}

impl From<HeroError> for GameError {
    fn from(err: HeroError) -> Self {
        match err {
            HeroError::Bag(e) => e.into(),
            HeroError::Cast(e) => e.into(),
            HeroError::InvalidSnapshot(reason) => GameError::InvalidCharacterData(reason),
        }
    }
}
